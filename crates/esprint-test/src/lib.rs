//! esprint test support
//!
//! A fixture parser for the ECMAScript subset the engine models, plus small
//! helpers the integration tests and benchmarks share:
//! - `parse` turns source text into a tree and its raw comments
//! - `format_source` runs the whole pipeline from text
//! - `comment_texts` lists comment text for conservation checks
//! - `sample_program` generates benchmark input

pub mod lexer;
pub mod parser;

use esprint_core::{FormatError, FormatOptions, RawComment, SyntaxTree, format_tree};
use thiserror::Error;

pub use lexer::{Lexed, Token, TokenKind, lex};
pub use parser::{ParseError, Parser};

/// Error from either stage of a source-to-source fixture run
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Parse fixture source into a validated-shape tree and its comments
pub fn parse(source: &str) -> Result<(SyntaxTree, Vec<RawComment>), ParseError> {
    let lexed = lex(source)?;
    let comments = lexed.comments.clone();
    let tree = Parser::new(source, lexed).parse_program()?;
    tracing::trace!(nodes = tree.len(), comments = comments.len(), "Parsed fixture");
    Ok((tree, comments))
}

/// Parse and format source text in one step
pub fn format_source(source: &str, options: &FormatOptions) -> Result<String, FixtureError> {
    let (tree, comments) = parse(source)?;
    Ok(format_tree(&tree, &comments, source, options)?)
}

/// Text of every comment in `source`, sorted, for multiset comparisons
pub fn comment_texts(source: &str) -> Result<Vec<String>, ParseError> {
    let lexed = lex(source)?;
    let mut texts: Vec<String> = lexed
        .comments
        .iter()
        .filter_map(|comment| comment.text(source))
        .map(str::to_string)
        .collect();
    texts.sort();
    Ok(texts)
}

/// A program of `units` repeated, varied declarations, functions and classes
pub fn sample_program(units: usize) -> String {
    let mut out = String::new();
    for i in 0..units {
        out.push_str(&format!(
            "// unit {i}\n\
             const value{i} = compute(first{i}, second{i}) + offset{i} * scale - adjustment{i};\n\
             function handler{i}(request, response, next) {{\n\
             \x20 if (request.method === 'GET' && request.path.startsWith('/api')) {{\n\
             \x20   return next({{ status: 200, body: [1, 2, 3, {i}], cached: true }});\n\
             \x20 }} /* fall through */\n\
             \x20 return response.send(format(value{i}, {{ pretty: true }}));\n\
             }}\n\
             class Service{i} extends Base {{\n\
             \x20 /** Handles one request */\n\
             \x20 handle(input) {{ return input.items.map((item) => item.id * {i}); }}\n\
             }}\n\n"
        ));
    }
    out
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
