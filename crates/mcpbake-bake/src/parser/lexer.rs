//! Tokenization of bake descriptor text using `nom`.
//!
//! Produces a stream of [`Token`]s from raw input for the parser to consume.
//! Whitespace and comments (`#`, `//`, `/* */`) are discarded between tokens.

use mcpbake_common::error::{BakeError, Result};
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_until, take_while, take_while1},
    character::complete::{char, digit1, multispace1, not_line_ending},
    combinator::{opt, recognize, value},
    multi::many0,
    sequence::{delimited, preceded},
};

/// A token in the bake descriptor language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A bare word: block kind, attribute key, keyword, or reference.
    Identifier(String),
    /// A double-quoted string literal, unescaped.
    StringLiteral(String),
    /// A numeric literal, kept as written.
    Number(String),
    /// `{` opening brace.
    BraceOpen,
    /// `}` closing brace.
    BraceClose,
    /// `[` opening bracket.
    BracketOpen,
    /// `]` closing bracket.
    BracketClose,
    /// `=` assignment.
    Equals,
    /// `:` object key separator.
    Colon,
    /// `,` separator.
    Comma,
}

/// Skippable items: whitespace and comments.
fn skip_trivia(input: &str) -> IResult<&str, ()> {
    let line_comment = value((), preceded(tag("//"), not_line_ending));
    let hash_comment = value((), preceded(char('#'), not_line_ending));
    let block_comment = value((), delimited(tag("/*"), take_until("*/"), tag("*/")));
    let ws = value((), multispace1);
    let (input, _) = many0(alt((ws, line_comment, hash_comment, block_comment))).parse(input)?;
    Ok((input, ()))
}

/// Parses a double-quoted string literal, resolving escapes.
///
/// `${...}` sequences are not interpreted.
fn string_literal(input: &str) -> IResult<&str, Token> {
    let (input, _) = char('"')(input)?;
    let mut result = String::new();
    let mut chars = input.char_indices();
    loop {
        match chars.next() {
            Some((idx, '"')) => {
                let remaining = &input[idx + 1..];
                return Ok((remaining, Token::StringLiteral(result)));
            }
            Some((_, '\\')) => match chars.next() {
                Some((_, 'n')) => result.push('\n'),
                Some((_, 't')) => result.push('\t'),
                Some((_, 'r')) => result.push('\r'),
                Some((_, '\\')) => result.push('\\'),
                Some((_, '"')) => result.push('"'),
                Some((_, c)) => {
                    result.push('\\');
                    result.push(c);
                }
                None => {
                    return Err(nom::Err::Failure(nom::error::Error::new(
                        input,
                        nom::error::ErrorKind::Char,
                    )));
                }
            },
            Some((_, c)) => result.push(c),
            None => {
                return Err(nom::Err::Failure(nom::error::Error::new(
                    input,
                    nom::error::ErrorKind::Char,
                )));
            }
        }
    }
}

/// Parses a numeric literal (`42`, `1.5`).
fn number_literal(input: &str) -> IResult<&str, Token> {
    let (input, digits) = recognize((digit1, opt((char('.'), digit1)))).parse(input)?;
    Ok((input, Token::Number(digits.to_string())))
}

const fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

const fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.'
}

/// Parses a bare identifier.
fn identifier(input: &str) -> IResult<&str, Token> {
    let (input, word) = recognize((take_while1(is_ident_start), take_while(is_ident_continue)))
        .parse(input)?;
    Ok((input, Token::Identifier(word.to_string())))
}

/// Parses a symbol token.
fn symbol(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::BraceOpen, char('{')),
        value(Token::BraceClose, char('}')),
        value(Token::BracketOpen, char('[')),
        value(Token::BracketClose, char(']')),
        value(Token::Equals, char('=')),
        value(Token::Colon, char(':')),
        value(Token::Comma, char(',')),
    ))
    .parse(input)
}

/// Parses a single token (after trivia has been skipped).
fn single_token(input: &str) -> IResult<&str, Token> {
    alt((string_literal, symbol, number_literal, identifier)).parse(input)
}

/// Tokenizes descriptor text into a vector of tokens.
///
/// # Errors
///
/// Returns [`BakeError::Syntax`] if the input contains characters that
/// cannot be tokenized or an unterminated string.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut remaining = input;

    loop {
        let (rest, ()) = skip_trivia(remaining).map_err(|e| BakeError::Syntax {
            message: format!("lexer error skipping whitespace: {e}"),
        })?;
        remaining = rest;

        if remaining.is_empty() {
            break;
        }

        let (rest, token) = single_token(remaining).map_err(|e| BakeError::Syntax {
            message: format!(
                "unexpected input at line {}: \"{}\" ({e})",
                line_of(input, remaining),
                remaining.chars().take(20).collect::<String>()
            ),
        })?;
        tokens.push(token);
        remaining = rest;
    }

    Ok(tokens)
}

/// One-based line number of `rest` within `input`.
fn line_of(input: &str, rest: &str) -> usize {
    let consumed = input.len() - rest.len();
    input[..consumed].matches('\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(s: &str) -> Token {
        Token::Identifier(s.into())
    }

    #[test]
    fn tokenize_symbols() {
        let tokens = tokenize("{ } [ ] = : ,").expect("should tokenize");
        assert_eq!(
            tokens,
            vec![
                Token::BraceOpen,
                Token::BraceClose,
                Token::BracketOpen,
                Token::BracketClose,
                Token::Equals,
                Token::Colon,
                Token::Comma,
            ]
        );
    }

    #[test]
    fn tokenize_string_keeps_interpolation() {
        let tokens = tokenize(r#""alpha:${TAG}""#).expect("should tokenize");
        assert_eq!(tokens, vec![Token::StringLiteral("alpha:${TAG}".into())]);
    }

    #[test]
    fn tokenize_string_with_escapes() {
        let tokens = tokenize(r#""line\nnew\ttab\\slash\"quote""#).expect("should tokenize");
        assert_eq!(
            tokens,
            vec![Token::StringLiteral("line\nnew\ttab\\slash\"quote".into())]
        );
    }

    #[test]
    fn tokenize_numbers() {
        let tokens = tokenize("8080 1.5").expect("should tokenize");
        assert_eq!(
            tokens,
            vec![Token::Number("8080".into()), Token::Number("1.5".into())]
        );
    }

    #[test]
    fn tokenize_identifiers_with_dashes_and_dots() {
        let tokens = tokenize("my-server target.base.tags").expect("should tokenize");
        assert_eq!(tokens, vec![ident("my-server"), ident("target.base.tags")]);
    }

    #[test]
    fn tokenize_skips_all_comment_styles() {
        let input = "# hash\n// slashes\ntarget /* inline */ \"a\" {}";
        let tokens = tokenize(input).expect("should tokenize");
        assert_eq!(
            tokens,
            vec![
                ident("target"),
                Token::StringLiteral("a".into()),
                Token::BraceOpen,
                Token::BraceClose,
            ]
        );
    }

    #[test]
    fn tokenize_block() {
        let input = r#"group "default" {
    targets = ["alpha"]
}"#;
        let tokens = tokenize(input).expect("should tokenize");
        assert_eq!(
            tokens,
            vec![
                ident("group"),
                Token::StringLiteral("default".into()),
                Token::BraceOpen,
                ident("targets"),
                Token::Equals,
                Token::BracketOpen,
                Token::StringLiteral("alpha".into()),
                Token::BracketClose,
                Token::BraceClose,
            ]
        );
    }

    #[test]
    fn tokenize_empty_input() {
        assert!(tokenize("").expect("should tokenize").is_empty());
        assert!(tokenize("  # only a comment\n").expect("should tokenize").is_empty());
    }

    #[test]
    fn tokenize_unterminated_string_fails() {
        assert!(tokenize(r#"target "alpha {"#).is_err());
    }

    #[test]
    fn tokenize_error_reports_line() {
        let err = tokenize("group \"default\" {\n  targets = @\n}").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("line 2"), "got: {msg}");
    }
}
