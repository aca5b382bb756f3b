//! Bake descriptor parser built on `nom`.
//!
//! Transforms descriptor text into a [`BakeFile`] in three phases:
//! lexing into tokens, recursive-descent parsing into a generic block tree,
//! and decoding the known block kinds into the model.

pub mod ast;
pub mod decode;
pub mod lexer;

use std::path::Path;

use mcpbake_common::error::{BakeError, Result};

use self::ast::{Attribute, Block, Body, Expr};
use self::lexer::Token;
use crate::model::BakeFile;

/// Cursor into a token stream for recursive-descent parsing.
struct TokenCursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> TokenCursor<'a> {
    const fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expect_identifier(&mut self) -> Result<String> {
        match self.advance() {
            Some(Token::Identifier(s)) => Ok(s.clone()),
            other => Err(parse_err(format!("expected identifier, got {other:?}"))),
        }
    }

    fn expect_token(&mut self, expected: &Token) -> Result<()> {
        match self.advance() {
            Some(tok) if tok == expected => Ok(()),
            other => Err(parse_err(format!("expected {expected:?}, got {other:?}"))),
        }
    }

    const fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }
}

const fn parse_err(message: String) -> BakeError {
    BakeError::Syntax { message }
}

fn skip_optional_comma(cursor: &mut TokenCursor<'_>) {
    if cursor.peek() == Some(&Token::Comma) {
        let _ = cursor.advance();
    }
}

/// Parses descriptor text into a [`BakeFile`].
///
/// # Errors
///
/// Returns [`BakeError::Syntax`] if the text does not follow the block
/// grammar or a known attribute has the wrong type.
pub fn parse_bake(input: &str) -> Result<BakeFile> {
    tracing::info!("parsing bake descriptor");
    let tree = parse_tree(input)?;
    decode::decode(&tree)
}

/// Reads and parses the descriptor at `path`.
///
/// # Errors
///
/// Returns [`BakeError::MissingInput`] if the file does not exist,
/// [`BakeError::Io`] if it cannot be read, and
/// [`BakeError::MalformedDescriptor`] if it cannot be parsed.
pub fn load_bake_file(path: &Path) -> Result<BakeFile> {
    tracing::info!(path = %path.display(), "loading bake file");
    if !path.exists() {
        return Err(BakeError::MissingInput {
            kind: "bake file",
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path).map_err(|e| BakeError::io(path, e))?;
    parse_bake(&content).map_err(|e| match e {
        BakeError::Syntax { message } => BakeError::MalformedDescriptor {
            path: path.to_path_buf(),
            message,
        },
        other => other,
    })
}

/// Parses descriptor text into the generic block tree.
///
/// # Errors
///
/// Returns [`BakeError::Syntax`] on any grammar violation.
pub fn parse_tree(input: &str) -> Result<Body> {
    let tokens = lexer::tokenize(input)?;
    let mut cursor = TokenCursor::new(&tokens);
    parse_body(&mut cursor, false)
}

fn parse_body(cursor: &mut TokenCursor<'_>, nested: bool) -> Result<Body> {
    let mut body = Body::default();

    loop {
        match cursor.peek() {
            None if nested => {
                return Err(parse_err("unexpected end of input inside block".into()));
            }
            None => break,
            Some(Token::BraceClose) if nested => break,
            Some(Token::Identifier(_)) => {}
            Some(other) => {
                return Err(parse_err(format!(
                    "expected attribute or block, got {other:?}"
                )));
            }
        }

        let name = cursor.expect_identifier()?;
        if cursor.peek() == Some(&Token::Equals) {
            let _ = cursor.advance();
            let value = parse_expr(cursor)?;
            body.attributes.push(Attribute { key: name, value });
        } else {
            body.blocks.push(parse_block(cursor, name)?);
        }
    }

    Ok(body)
}

fn parse_block(cursor: &mut TokenCursor<'_>, kind: String) -> Result<Block> {
    let mut labels = Vec::new();
    loop {
        match cursor.peek() {
            Some(Token::StringLiteral(s) | Token::Identifier(s)) => {
                labels.push(s.clone());
                let _ = cursor.advance();
            }
            _ => break,
        }
    }

    cursor.expect_token(&Token::BraceOpen)?;
    let body = parse_body(cursor, true)?;
    cursor.expect_token(&Token::BraceClose)?;

    Ok(Block { kind, labels, body })
}

fn parse_expr(cursor: &mut TokenCursor<'_>) -> Result<Expr> {
    match cursor.advance() {
        Some(Token::StringLiteral(s)) => Ok(Expr::String(s.clone())),
        Some(Token::Number(n)) => Ok(Expr::Number(n.clone())),
        Some(Token::Identifier(word)) => Ok(match word.as_str() {
            "true" => Expr::Bool(true),
            "false" => Expr::Bool(false),
            "null" => Expr::Null,
            _ => Expr::Reference(word.clone()),
        }),
        Some(Token::BracketOpen) => parse_list(cursor),
        Some(Token::BraceOpen) => parse_object(cursor),
        other => Err(parse_err(format!("expected value, got {other:?}"))),
    }
}

fn parse_list(cursor: &mut TokenCursor<'_>) -> Result<Expr> {
    let mut items = Vec::new();

    while cursor.peek() != Some(&Token::BracketClose) {
        if cursor.at_end() {
            return Err(parse_err("unexpected end of input inside list".into()));
        }
        items.push(parse_expr(cursor)?);
        skip_optional_comma(cursor);
    }

    cursor.expect_token(&Token::BracketClose)?;
    Ok(Expr::List(items))
}

fn parse_object(cursor: &mut TokenCursor<'_>) -> Result<Expr> {
    let mut entries = Vec::new();

    while cursor.peek() != Some(&Token::BraceClose) {
        let key = match cursor.advance() {
            Some(Token::Identifier(s) | Token::StringLiteral(s)) => s.clone(),
            None => return Err(parse_err("unexpected end of input inside object".into())),
            other => return Err(parse_err(format!("expected object key, got {other:?}"))),
        };
        match cursor.advance() {
            Some(Token::Equals | Token::Colon) => {}
            other => {
                return Err(parse_err(format!(
                    "expected `=` or `:` after object key, got {other:?}"
                )));
            }
        }
        entries.push((key, parse_expr(cursor)?));
        skip_optional_comma(cursor);
    }

    cursor.expect_token(&Token::BraceClose)?;
    Ok(Expr::Object(entries))
}
