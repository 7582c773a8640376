//! Layout pass: turns a [`Document`] into text
//!
//! A command-stack printer in the Wadler/Prettier family. Each command pairs
//! a document with the indentation and mode (flat or broken) it is printed in.
//! A group is printed flat when its cached flat width, plus whatever follows
//! it on the same line, fits in the remaining columns and it holds no forced
//! break. Fills decide each separator from the pair of items around it.
//!
//! The pass is single-threaded, never retries and never fails.

use crate::config::{IndentStyle, PrinterOptions};
use crate::document::{DocKind, Document, FILL_SEPARATOR};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Flat,
    Break,
}

/// How [`Printer::fits`] treats groups that are not forced to break
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookahead {
    /// Groups take the mode of the command they sit in
    Inherit,
    /// Groups are measured flat
    FlatGroups,
}

#[derive(Debug, Clone, Copy)]
enum Command<'a> {
    Doc {
        indent: usize,
        mode: Mode,
        doc: &'a Document,
    },
    /// The remaining items of a fill, starting at the next content
    Fill {
        indent: usize,
        mode: Mode,
        items: &'a [Document],
    },
}

/// Render `doc` with the given options
pub fn print_document(doc: &Document, options: PrinterOptions) -> String {
    Printer::new(options).print(doc)
}

/// Layout printer
///
/// The render context (column, pending line suffixes, output buffer) lives
/// here and is reset at the start of every [`Printer::print`] call.
pub struct Printer {
    options: PrinterOptions,
    buffer: String,
    column: usize,
    line_number: usize,
}

impl Printer {
    pub fn new(options: PrinterOptions) -> Self {
        Self {
            options,
            buffer: String::with_capacity(4096),
            column: 0,
            line_number: 1,
        }
    }

    /// Print a document to a string
    pub fn print(&mut self, doc: &Document) -> String {
        self.reset();

        let mut commands = vec![Command::Doc {
            indent: 0,
            mode: Mode::Break,
            doc,
        }];
        let mut suffixes: Vec<Command<'_>> = Vec::new();

        while let Some(command) = commands.pop() {
            match command {
                Command::Fill {
                    indent,
                    mode,
                    items,
                } => self.print_fill(indent, mode, items, &mut commands),
                Command::Doc { indent, mode, doc } => match doc.kind() {
                    DocKind::Nil => {}
                    DocKind::Token(s) => self.push_text(s, doc.measure().flat_width),
                    DocKind::Text(s) => self.push_text(s, doc.measure().flat_width),
                    DocKind::Concat(parts) => {
                        commands.extend(parts.iter().rev().map(|doc| Command::Doc {
                            indent,
                            mode,
                            doc,
                        }));
                    }
                    DocKind::Indent { levels, contents } => commands.push(Command::Doc {
                        indent: indent + levels,
                        mode,
                        doc: contents,
                    }),
                    DocKind::Group { contents, .. } => {
                        let forced = doc.measure().forced_break;
                        let flat = Command::Doc {
                            indent,
                            mode: Mode::Flat,
                            doc: contents,
                        };
                        let next = match mode {
                            Mode::Flat if !forced => flat,
                            Mode::Break
                                if !forced && self.fits(flat, &commands, Lookahead::Inherit) =>
                            {
                                flat
                            }
                            _ => Command::Doc {
                                indent,
                                mode: Mode::Break,
                                doc: contents,
                            },
                        };
                        commands.push(next);
                    }
                    DocKind::ConditionalGroup(states) => {
                        if let Some(next) = self.choose_state(indent, mode, states, &commands) {
                            commands.push(next);
                        }
                    }
                    DocKind::Fill(items) => commands.push(Command::Fill {
                        indent,
                        mode,
                        items,
                    }),
                    DocKind::LineSuffix(contents) => suffixes.push(Command::Doc {
                        indent,
                        mode,
                        doc: contents,
                    }),
                    DocKind::Line | DocKind::SoftLine | DocKind::HardLine => {
                        let breaks = mode == Mode::Break || matches!(doc.kind(), DocKind::HardLine);
                        if !breaks {
                            if matches!(doc.kind(), DocKind::Line) {
                                self.push_text(" ", 1);
                            }
                        } else if !suffixes.is_empty() {
                            // Flush deferred suffixes first, then retry this line
                            commands.push(command);
                            commands.extend(suffixes.drain(..).rev());
                        } else {
                            self.newline(indent);
                        }
                    }
                },
            }

            if commands.is_empty() && !suffixes.is_empty() {
                commands.extend(suffixes.drain(..).rev());
            }
        }

        trim_trailing_whitespace(&mut self.buffer);
        std::mem::take(&mut self.buffer)
    }

    /// First state of a conditional group that fits, else the last one
    ///
    /// The first state must fit flat. Later states are printed broken and
    /// only need their text up to the first line break to fit.
    fn choose_state<'a>(
        &self,
        indent: usize,
        mode: Mode,
        states: &'a [Document],
        rest: &[Command<'a>],
    ) -> Option<Command<'a>> {
        let (first, later) = states.split_first()?;
        let flat = Command::Doc {
            indent,
            mode: Mode::Flat,
            doc: first,
        };
        if !first.measure().forced_break
            && (mode == Mode::Flat || self.fits(flat, rest, Lookahead::Inherit))
        {
            return Some(flat);
        }

        let broken = |doc| Command::Doc {
            indent,
            mode: Mode::Break,
            doc,
        };
        let Some((last, middle)) = later.split_last() else {
            return Some(broken(first));
        };
        let chosen = middle
            .iter()
            .map(broken)
            .find(|&state| self.fits(state, rest, Lookahead::FlatGroups))
            .unwrap_or_else(|| broken(last));
        Some(chosen)
    }

    /// Pairwise fill decision for the first content of `items`
    fn print_fill<'a>(
        &mut self,
        indent: usize,
        mode: Mode,
        items: &'a [Document],
        commands: &mut Vec<Command<'a>>,
    ) {
        let Some((content, rest)) = items.split_first() else {
            return;
        };
        let remaining = self.remaining();
        let content_fits = fits_flat(content, remaining);
        let content_mode = if content_fits { Mode::Flat } else { Mode::Break };

        let Some(next) = rest.first() else {
            commands.push(Command::Doc {
                indent,
                mode: content_mode,
                doc: content,
            });
            return;
        };

        let pair_width = content.measure().flat_width + 1 + next.measure().flat_width;
        let pair_fits = content_fits && !next.measure().forced_break && pair_width <= remaining;
        let separator_mode = if pair_fits { Mode::Flat } else { Mode::Break };

        commands.push(Command::Fill {
            indent,
            mode,
            items: rest,
        });
        commands.push(Command::Doc {
            indent,
            mode: separator_mode,
            doc: &FILL_SEPARATOR,
        });
        commands.push(Command::Doc {
            indent,
            mode: content_mode,
            doc: content,
        });
    }

    /// Whether `next` plus the rest of the current line fits in the remaining width
    ///
    /// Walks `next` in its own mode, then the pending commands in theirs, and
    /// stops at the first newline one of them would produce.
    fn fits<'a>(&self, next: Command<'a>, rest: &[Command<'a>], lookahead: Lookahead) -> bool {
        let mut remaining = self.remaining() as isize;
        let mut stack: Vec<(Mode, &'a Document)> = Vec::new();
        let mut rest_index = rest.len();
        push_command(&mut stack, next);

        loop {
            let Some((mode, doc)) = stack.pop() else {
                if rest_index == 0 {
                    return true;
                }
                rest_index -= 1;
                push_command(&mut stack, rest[rest_index]);
                continue;
            };

            let measure = doc.measure();
            if mode == Mode::Flat && !measure.forced_break {
                remaining -= measure.flat_width as isize;
                if remaining < 0 {
                    return false;
                }
                continue;
            }

            match doc.kind() {
                DocKind::Nil | DocKind::LineSuffix(_) => {}
                DocKind::Token(_) | DocKind::Text(_) => {
                    remaining -= measure.flat_width as isize;
                    if remaining < 0 {
                        return false;
                    }
                }
                DocKind::Concat(parts) => stack.extend(parts.iter().rev().map(|part| (mode, part))),
                DocKind::Indent { contents, .. } => stack.push((mode, &**contents)),
                DocKind::Group { contents, .. } => {
                    let mode = match lookahead {
                        _ if measure.forced_break => Mode::Break,
                        Lookahead::Inherit => mode,
                        Lookahead::FlatGroups => Mode::Flat,
                    };
                    stack.push((mode, &**contents));
                }
                DocKind::ConditionalGroup(states) => {
                    if let Some(first) = states.first() {
                        stack.push((mode, first));
                    }
                }
                DocKind::Fill(items) => push_fill(&mut stack, mode, items),
                DocKind::Line => {
                    if mode == Mode::Break {
                        return true;
                    }
                    remaining -= 1;
                    if remaining < 0 {
                        return false;
                    }
                }
                DocKind::SoftLine => {
                    if mode == Mode::Break {
                        return true;
                    }
                }
                DocKind::HardLine => return true,
            }
        }
    }

    fn push_text(&mut self, text: &str, width: usize) {
        self.buffer.push_str(text);
        self.column += width;
    }

    fn newline(&mut self, indent: usize) {
        trim_trailing_whitespace(&mut self.buffer);
        self.buffer.push('\n');
        self.line_number += 1;
        self.column = 0;
        self.write_indent(indent);
    }

    fn write_indent(&mut self, levels: usize) {
        match self.options.indent_style {
            IndentStyle::Tabs => {
                for _ in 0..levels {
                    self.buffer.push('\t');
                }
            }
            IndentStyle::Spaces => {
                let spaces = levels * self.options.indent_width;
                self.buffer.extend(std::iter::repeat_n(' ', spaces));
            }
        }
        // Tabs count one indentation unit each
        self.column += levels * self.options.indent_width;
    }

    fn remaining(&self) -> usize {
        self.options.line_width.saturating_sub(self.column)
    }

    /// Lines emitted by the last print call
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
        self.column = 0;
        self.line_number = 1;
    }
}

fn fits_flat(doc: &Document, remaining: usize) -> bool {
    let measure = doc.measure();
    !measure.forced_break && measure.flat_width <= remaining
}

fn push_command<'a>(stack: &mut Vec<(Mode, &'a Document)>, command: Command<'a>) {
    match command {
        Command::Doc { mode, doc, .. } => stack.push((mode, doc)),
        Command::Fill { mode, items, .. } => push_fill(stack, mode, items),
    }
}

fn push_fill<'a>(stack: &mut Vec<(Mode, &'a Document)>, mode: Mode, items: &'a [Document]) {
    for (i, item) in items.iter().enumerate().rev() {
        stack.push((mode, item));
        if i > 0 {
            stack.push((mode, &FILL_SEPARATOR));
        }
    }
}

fn trim_trailing_whitespace(buffer: &mut String) {
    let trimmed = buffer.trim_end_matches([' ', '\t']).len();
    buffer.truncate(trimmed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::*;

    fn options(width: usize) -> PrinterOptions {
        PrinterOptions {
            line_width: width,
            ..Default::default()
        }
    }

    fn binary_chain() -> Document {
        // a + b + c + d;
        group(concat(vec![
            token("a"),
            indent(concat(vec![
                token(" +"),
                line(),
                token("b"),
                token(" +"),
                line(),
                token("c"),
                token(" +"),
                line(),
                token("d"),
            ])),
            token(";"),
        ]))
    }

    fn call(items: Vec<Document>) -> Document {
        let count = items.len();
        let items = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                if i + 1 < count {
                    concat(vec![item, token(",")])
                } else {
                    item
                }
            })
            .collect();
        group(concat(vec![
            token("f("),
            indent(concat(vec![soft_line(), fill(items)])),
            soft_line(),
            token(");"),
        ]))
    }

    #[test]
    fn test_token_and_text() {
        let doc = concat(vec![token("const "), text("résumé"), token(";")]);
        assert_eq!(print_document(&doc, options(80)), "const résumé;");
    }

    #[test]
    fn test_group_fits_flat() {
        assert_eq!(print_document(&binary_chain(), options(80)), "a + b + c + d;");
    }

    #[test]
    fn test_group_breaks_at_every_line() {
        assert_eq!(
            print_document(&binary_chain(), options(10)),
            "a +\n  b +\n  c +\n  d;"
        );
    }

    #[test]
    fn test_trailing_text_counts_towards_fit() {
        // The group alone fits in 10 columns, the text after it does not
        let doc = concat(vec![
            group(concat(vec![
                token("a"),
                indent(concat(vec![token(" +"), line(), token("b")])),
            ])),
            token(" // trailing text"),
        ]);
        assert_eq!(
            print_document(&doc, options(10)),
            "a +\n  b // trailing text"
        );
    }

    #[test]
    fn test_hard_line_forces_group() {
        let doc = group(concat(vec![
            token("{"),
            indent(concat(vec![hard_line(), token("x;")])),
            hard_line(),
            token("}"),
        ]));
        assert_eq!(print_document(&doc, options(80)), "{\n  x;\n}");
    }

    #[test]
    fn test_fill_wraps_pairwise() {
        let items = ["aaa", "bbb", "ccc", "ddd", "eee"]
            .into_iter()
            .map(text)
            .collect();
        let output = print_document(&call(items), options(16));
        assert_eq!(output, "f(\n  aaa, bbb, ccc,\n  ddd, eee\n);");
    }

    #[test]
    fn test_fill_five_short_arguments_stay_flat() {
        let items = ["a", "b", "c", "d", "e"].into_iter().map(text).collect();
        assert_eq!(print_document(&call(items), options(80)), "f(a, b, c, d, e);");
    }

    #[test]
    fn test_fill_break_does_not_reach_back() {
        let short: Vec<Document> = ["aa", "bb", "cc", "dd"].into_iter().map(text).collect();
        let mut long = short.clone();
        long[3] = text("dddddddddddddddd");

        let before = print_document(&call(short), options(14));
        let after = print_document(&call(long), options(14));
        let first_line = |s: &str| s.lines().nth(1).map(str::to_string);
        assert_eq!(before, "f(\n  aa, bb, cc,\n  dd\n);");
        assert_eq!(first_line(&before), first_line(&after));
    }

    #[test]
    fn test_soft_line_flat_is_empty() {
        let doc = group(concat(vec![token("["), soft_line(), token("]")]));
        assert_eq!(print_document(&doc, options(80)), "[]");
    }

    #[test]
    fn test_no_trailing_whitespace_before_newline() {
        let doc = concat(vec![
            token("a"),
            indent(concat(vec![hard_line(), hard_line(), token("b")])),
        ]);
        assert_eq!(print_document(&doc, options(80)), "a\n\n  b");
    }

    #[test]
    fn test_tab_indentation() {
        let doc = concat(vec![
            token("{"),
            indent(concat(vec![hard_line(), token("x;")])),
            hard_line(),
            token("}"),
        ]);
        let tabs = PrinterOptions {
            indent_style: IndentStyle::Tabs,
            ..options(80)
        };
        assert_eq!(print_document(&doc, tabs), "{\n\tx;\n}");
    }

    #[test]
    fn test_tabs_count_indent_width_for_fit() {
        // One tab counts as four columns, leaving six of ten for the group
        let doc = indent(concat(vec![
            hard_line(),
            group(concat(vec![
                token("abc"),
                indent(concat(vec![line(), token("def")])),
            ])),
        ]));
        let tabs = PrinterOptions {
            line_width: 10,
            indent_width: 4,
            indent_style: IndentStyle::Tabs,
        };
        assert_eq!(print_document(&doc, tabs), "\n\tabc\n\t\tdef");
    }

    #[test]
    fn test_line_suffix_flushes_before_newline() {
        let doc = concat(vec![
            token("a"),
            line_suffix(text(" // note")),
            token(","),
            hard_line(),
            token("b"),
        ]);
        assert_eq!(print_document(&doc, options(80)), "a, // note\nb");
    }

    #[test]
    fn test_line_suffix_flushes_at_end() {
        let doc = concat(vec![token("x;"), line_suffix(text(" // end"))]);
        assert_eq!(print_document(&doc, options(80)), "x; // end");
    }

    #[test]
    fn test_line_suffix_breaks_enclosing_group() {
        let doc = call(vec![
            concat(vec![text("a"), line_suffix(text(" // first"))]),
            text("b"),
        ]);
        assert_eq!(
            print_document(&doc, options(80)),
            "f(\n  a, // first\n  b\n);"
        );
    }

    #[test]
    fn test_overlong_token_is_emitted_unbroken() {
        let doc = group(concat(vec![
            text("averyveryverylongidentifier"),
            indent(concat(vec![line(), token("x")])),
        ]));
        assert_eq!(
            print_document(&doc, options(10)),
            "averyveryverylongidentifier\n  x"
        );
    }

    #[test]
    fn test_printer_is_reusable() {
        let mut printer = Printer::new(options(80));
        let doc = concat(vec![token("a"), hard_line(), token("b")]);
        assert_eq!(printer.print(&doc), "a\nb");
        assert_eq!(printer.print(&doc), "a\nb");
        assert_eq!(printer.line_number(), 2);
    }
}
