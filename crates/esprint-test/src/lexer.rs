//! Fixture lexer
//!
//! Splits source text into significant tokens and raw comments. Whitespace is
//! skipped, but every token remembers whether a line break preceded it so the
//! parser can apply automatic semicolon insertion.

use std::ops::Range;

use esprint_core::{CommentKind, RawComment};
use text_size::{TextRange, TextSize};

use crate::ParseError;

/// Simple span representing a byte range in the source
pub type Span = Range<usize>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifiers and keywords alike; the parser looks at the text
    Word,
    Number,
    String,
    /// A whole template literal, interpolations included
    Template,
    RegExp,
    Punct,
}

/// A token with its kind and span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// A line terminator or a comment containing one sits between this token and the previous
    pub newline_before: bool,
}

/// Output of the lexer
#[derive(Debug, Default)]
pub struct Lexed {
    pub tokens: Vec<Token>,
    pub comments: Vec<RawComment>,
}

const PUNCTUATORS: &[&str] = &[
    ">>>=", "...", "===", "!==", "**=", "<<=", ">>=", ">>>", "&&=", "||=", "??=", "=>", "==",
    "!=", "<=", ">=", "&&", "||", "??", "?.", "++", "--", "+=", "-=", "*=", "/=", "%=", "&=",
    "|=", "^=", "**", "<<", ">>", "{", "}", "(", ")", "[", "]", ";", ",", "<", ">", "+", "-", "*",
    "/", "%", "&", "|", "^", "!", "~", "?", ":", "=", ".", "@", "#",
];

/// Words after which a `/` starts a regular expression rather than a division
const EXPRESSION_KEYWORDS: &[&str] = &[
    "return", "typeof", "instanceof", "in", "of", "new", "delete", "void", "throw", "case", "do",
    "else", "yield", "await",
];

/// Lex input into significant tokens and comments
pub fn lex(input: &str) -> Result<Lexed, ParseError> {
    let mut lexed = Lexed::default();
    let mut i = 0usize;
    let mut newline_before = false;

    while let Some((current, size)) = next_char(input, i) {
        let start = i;

        if current == '\n' || current == '\r' {
            newline_before = true;
            i += size;
            continue;
        }
        if current.is_whitespace() {
            i += size;
            continue;
        }

        if let Some((kind, end)) = lex_comment(input, start)? {
            if input[start..end].contains(['\n', '\r']) {
                newline_before = true;
            }
            lexed.comments.push(RawComment::new(range(start, end), kind));
            i = end;
            continue;
        }

        let (kind, end) = match current {
            c if is_identifier_start(c) => (TokenKind::Word, lex_word(input, start)),
            c if c.is_ascii_digit() => (TokenKind::Number, lex_number(input, start)),
            '.' if next_char(input, start + 1).is_some_and(|(c, _)| c.is_ascii_digit()) => {
                (TokenKind::Number, lex_number(input, start))
            }
            '"' | '\'' => (TokenKind::String, lex_string(input, start, current)?),
            '`' => (TokenKind::Template, lex_template(input, start)?),
            '/' if regex_allowed(input, lexed.tokens.last()) => {
                (TokenKind::RegExp, lex_regex(input, start)?)
            }
            _ => match lex_punctuator(input, start) {
                Some(end) => (TokenKind::Punct, end),
                None => {
                    return Err(ParseError::UnexpectedChar {
                        found: current,
                        offset: start,
                    });
                }
            },
        };

        lexed.tokens.push(Token {
            kind,
            span: start..end,
            newline_before,
        });
        newline_before = false;
        i = end;
    }

    Ok(lexed)
}

/// `//`, `/* */`, `/** */` and `<!-- -->`
fn lex_comment(input: &str, start: usize) -> Result<Option<(CommentKind, usize)>, ParseError> {
    let rest = &input[start..];
    if rest.starts_with("//") {
        let end = rest.find(['\n', '\r']).map_or(input.len(), |n| start + n);
        return Ok(Some((CommentKind::Line, end)));
    }
    if rest.starts_with("<!--") {
        let end = find_closer(input, start, 4, "-->", "HTML comment")?;
        return Ok(Some((CommentKind::Html, end)));
    }
    if rest.starts_with("/*") {
        let end = find_closer(input, start, 2, "*/", "block comment")?;
        // `/**/` is an empty block comment, not a doc comment
        let kind = if rest.starts_with("/**") && end - start > 4 {
            CommentKind::Doc
        } else {
            CommentKind::Block
        };
        return Ok(Some((kind, end)));
    }
    Ok(None)
}

fn find_closer(
    input: &str,
    start: usize,
    opener_len: usize,
    closer: &str,
    what: &'static str,
) -> Result<usize, ParseError> {
    input[start + opener_len..]
        .find(closer)
        .map(|n| start + opener_len + n + closer.len())
        .ok_or(ParseError::Unterminated {
            what,
            offset: start,
        })
}

fn lex_word(input: &str, start: usize) -> usize {
    let mut end = start;
    while let Some((c, size)) = next_char(input, end) {
        if !is_identifier_part(c) {
            break;
        }
        end += size;
    }
    end
}

/// Decimal, hex/octal/binary, exponents, separators and BigInt suffix
fn lex_number(input: &str, start: usize) -> usize {
    let bytes = input.as_bytes();
    let mut end = start;

    if bytes[start] == b'0'
        && bytes
            .get(start + 1)
            .is_some_and(|b| matches!(b, b'x' | b'X' | b'o' | b'O' | b'b' | b'B'))
    {
        end += 2;
        while bytes
            .get(end)
            .is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'_')
        {
            end += 1;
        }
        return end;
    }

    while bytes
        .get(end)
        .is_some_and(|b| b.is_ascii_digit() || *b == b'_')
    {
        end += 1;
    }
    if bytes.get(end) == Some(&b'.') {
        end += 1;
        while bytes
            .get(end)
            .is_some_and(|b| b.is_ascii_digit() || *b == b'_')
        {
            end += 1;
        }
    }
    if bytes.get(end).is_some_and(|b| matches!(b, b'e' | b'E')) {
        let mut exponent = end + 1;
        if bytes.get(exponent).is_some_and(|b| matches!(b, b'+' | b'-')) {
            exponent += 1;
        }
        if bytes.get(exponent).is_some_and(u8::is_ascii_digit) {
            end = exponent;
            while bytes.get(end).is_some_and(u8::is_ascii_digit) {
                end += 1;
            }
        }
    }
    if bytes.get(end) == Some(&b'n') {
        end += 1;
    }
    end
}

fn lex_string(input: &str, start: usize, quote: char) -> Result<usize, ParseError> {
    let mut i = start + 1;
    while let Some((c, size)) = next_char(input, i) {
        match c {
            '\\' => {
                i += size;
                if let Some((_, escaped)) = next_char(input, i) {
                    i += escaped;
                }
            }
            '\n' | '\r' => break,
            c if c == quote => return Ok(i + size),
            _ => i += size,
        }
    }
    Err(ParseError::Unterminated {
        what: "string literal",
        offset: start,
    })
}

/// Template literals are lexed whole; nested braces inside `${}` are balanced
fn lex_template(input: &str, start: usize) -> Result<usize, ParseError> {
    let mut i = start + 1;
    let mut depth = 0usize;
    while let Some((c, size)) = next_char(input, i) {
        match c {
            '\\' => {
                i += size;
                if let Some((_, escaped)) = next_char(input, i) {
                    i += escaped;
                }
                continue;
            }
            '$' if depth == 0 && input[i..].starts_with("${") => {
                depth = 1;
                i += 2;
                continue;
            }
            '{' if depth > 0 => depth += 1,
            '}' if depth > 0 => depth -= 1,
            '`' if depth == 0 => return Ok(i + size),
            _ => {}
        }
        i += size;
    }
    Err(ParseError::Unterminated {
        what: "template literal",
        offset: start,
    })
}

fn lex_regex(input: &str, start: usize) -> Result<usize, ParseError> {
    let mut i = start + 1;
    let mut in_class = false;
    while let Some((c, size)) = next_char(input, i) {
        match c {
            '\\' => {
                i += size;
                if let Some((_, escaped)) = next_char(input, i) {
                    i += escaped;
                }
                continue;
            }
            '\n' | '\r' => break,
            '[' => in_class = true,
            ']' => in_class = false,
            '/' if !in_class => return Ok(lex_word(input, i + size)),
            _ => {}
        }
        i += size;
    }
    Err(ParseError::Unterminated {
        what: "regular expression",
        offset: start,
    })
}

fn lex_punctuator(input: &str, start: usize) -> Option<usize> {
    let rest = &input[start..];
    PUNCTUATORS
        .iter()
        .filter(|p| rest.starts_with(**p))
        // `a?.5:b` is a conditional, not optional chaining
        .find(|p| **p != "?." || !rest[2..].starts_with(|c: char| c.is_ascii_digit()))
        .map(|p| start + p.len())
}

/// Whether a `/` at this point begins a regular expression literal
fn regex_allowed(input: &str, previous: Option<&Token>) -> bool {
    let Some(previous) = previous else {
        return true;
    };
    let text = &input[previous.span.clone()];
    match previous.kind {
        TokenKind::Word => EXPRESSION_KEYWORDS.contains(&text),
        TokenKind::Punct => !matches!(text, ")" | "]" | "}"),
        TokenKind::Number | TokenKind::String | TokenKind::Template | TokenKind::RegExp => false,
    }
}

fn is_identifier_start(c: char) -> bool {
    c == '$' || c == '_' || c.is_alphabetic()
}

fn is_identifier_part(c: char) -> bool {
    is_identifier_start(c) || c.is_alphanumeric()
}

/// Get next character and its byte length
fn next_char(input: &str, pos: usize) -> Option<(char, usize)> {
    input.get(pos..)?.chars().next().map(|c| (c, c.len_utf8()))
}

fn range(start: usize, end: usize) -> TextRange {
    TextRange::new(TextSize::from(start as u32), TextSize::from(end as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(input: &'a str, lexed: &Lexed) -> Vec<&'a str> {
        lexed
            .tokens
            .iter()
            .map(|t| &input[t.span.clone()])
            .collect()
    }

    #[test]
    fn test_splits_tokens_and_comments() {
        let input = "const x = 10; // keep";
        let lexed = lex(input).unwrap();

        assert_eq!(texts(input, &lexed), ["const", "x", "=", "10", ";"]);
        assert_eq!(lexed.comments.len(), 1);
        assert_eq!(lexed.comments[0].kind, CommentKind::Line);
        assert_eq!(lexed.comments[0].text(input), Some("// keep"));
    }

    #[test]
    fn test_comment_kinds() {
        let input = "/* a */ /** b */ /**/ <!-- c --> // d";
        let lexed = lex(input).unwrap();
        let kinds: Vec<_> = lexed.comments.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            [
                CommentKind::Block,
                CommentKind::Doc,
                CommentKind::Block,
                CommentKind::Html,
                CommentKind::Line
            ]
        );
        assert!(lexed.tokens.is_empty());
    }

    #[test]
    fn test_newline_before_is_tracked() {
        let input = "a\nb /* x\n */ c d";
        let lexed = lex(input).unwrap();
        let flags: Vec<_> = lexed.tokens.iter().map(|t| t.newline_before).collect();
        assert_eq!(flags, [false, true, true, false]);
    }

    #[test]
    fn test_regex_versus_division() {
        let input = "a = b / c; d = /x[/]y/g.test(e);";
        let lexed = lex(input).unwrap();
        let tokens = texts(input, &lexed);
        assert!(tokens.contains(&"/"));
        assert!(tokens.contains(&"/x[/]y/g"));
    }

    #[test]
    fn test_longest_punctuator_wins() {
        let input = "a >>>= b === c ?.5 : d";
        let lexed = lex(input).unwrap();
        assert_eq!(
            texts(input, &lexed),
            ["a", ">>>=", "b", "===", "c", "?", ".5", ":", "d"]
        );
    }

    #[test]
    fn test_numbers() {
        let input = "0xFF 1_000 1.5e-3 .25 10n";
        let lexed = lex(input).unwrap();
        assert_eq!(texts(input, &lexed), ["0xFF", "1_000", "1.5e-3", ".25", "10n"]);
        assert!(lexed.tokens.iter().all(|t| t.kind == TokenKind::Number));
    }

    #[test]
    fn test_unterminated_inputs() {
        assert!(matches!(
            lex("'abc"),
            Err(ParseError::Unterminated { what: "string literal", offset: 0 })
        ));
        assert!(matches!(
            lex("a /* b"),
            Err(ParseError::Unterminated { what: "block comment", offset: 2 })
        ));
    }

    #[test]
    fn test_template_is_one_token() {
        let input = "`a ${ {b: 1}.b } c`;";
        let lexed = lex(input).unwrap();
        assert_eq!(lexed.tokens[0].kind, TokenKind::Template);
        assert_eq!(texts(input, &lexed), ["`a ${ {b: 1}.b } c`", ";"]);
    }
}
