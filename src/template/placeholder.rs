//! Placeholder body parser.
//!
//! Turns the text between the delimiters into an [`ExpressionInput`]:
//!
//! ```text
//! body       := ws identifier ws [ open arguments close ] ws
//! identifier := [A-Za-z0-9_]+
//! arguments  := [ argument { separator argument } ]
//! argument   := ws [ name ws "=" ws ] value ws
//! value      := '"' { char | '\"' | '\\' } '"' | bare
//! ```
//!
//! Bare values run to the next separator or close character and are
//! trimmed. Quoted values may contain both.

use thiserror::Error;

use crate::config::schema::Syntax;
use crate::expression::{ExpressionArgument, ExpressionInput};
use crate::registry::is_valid_identifier;

/// Why a placeholder body could not be parsed.
///
/// These never escape the engine; the placeholder is emitted raw instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaceholderError {
    /// Body does not start with an identifier
    #[error("missing expression identifier")]
    MissingIdentifier,

    /// Something other than the argument list follows the identifier
    #[error("unexpected '{found}' after identifier")]
    UnexpectedCharacter {
        /// The offending character
        found: char,
    },

    /// Argument list never closed
    #[error("argument list is not closed")]
    UnclosedArguments,

    /// Quoted value never closed
    #[error("unterminated quoted value")]
    UnterminatedQuote,

    /// Name before `=` is not an identifier
    #[error("invalid argument name '{name}'")]
    InvalidArgumentName {
        /// The rejected name
        name: String,
    },

    /// Text after the closing bracket
    #[error("unexpected text after argument list")]
    TrailingCharacters,
}

/// Parses a placeholder body with the given syntax.
///
/// # Errors
///
/// Returns a [`PlaceholderError`] describing the first problem found.
pub fn parse_placeholder(body: &str, syntax: &Syntax) -> Result<ExpressionInput, PlaceholderError> {
    let body = body.trim();
    let ident_len = body
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(body.len());
    let identifier = &body[..ident_len];
    if identifier.is_empty() {
        return Err(PlaceholderError::MissingIdentifier);
    }

    let rest = body[ident_len..].trim_start();
    let Some(first) = rest.chars().next() else {
        return Ok(ExpressionInput::bare(identifier));
    };
    if first != syntax.args_open {
        return Err(PlaceholderError::UnexpectedCharacter { found: first });
    }

    let mut cursor = Cursor::new(&rest[first.len_utf8()..]);
    let arguments = cursor.arguments(syntax)?;
    if !cursor.rest().trim().is_empty() {
        return Err(PlaceholderError::TrailingCharacters);
    }
    Ok(ExpressionInput::new(identifier, arguments))
}

/// Byte cursor over the argument section.
struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    /// Consumes up to (not including) the first character in `stops`.
    fn take_until(&mut self, stops: &[char]) -> &'a str {
        let rest = self.rest();
        let len = rest.find(stops).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    /// Parses arguments through the closing character.
    fn arguments(&mut self, syntax: &Syntax) -> Result<Vec<ExpressionArgument>, PlaceholderError> {
        let mut arguments = Vec::new();

        self.skip_whitespace();
        if self.peek() == Some(syntax.args_close) {
            self.bump();
            return Ok(arguments);
        }

        loop {
            arguments.push(self.argument(syntax)?);
            self.skip_whitespace();
            match self.bump() {
                Some(c) if c == syntax.separator => {}
                Some(c) if c == syntax.args_close => return Ok(arguments),
                _ => return Err(PlaceholderError::UnclosedArguments),
            }
        }
    }

    fn argument(&mut self, syntax: &Syntax) -> Result<ExpressionArgument, PlaceholderError> {
        self.skip_whitespace();
        if self.peek() == Some('"') {
            return self.quoted().map(ExpressionArgument::positional);
        }

        let token = self.take_until(&[syntax.separator, syntax.args_close, '=']);
        if self.peek() != Some('=') {
            return Ok(ExpressionArgument::positional(token.trim()));
        }

        self.bump();
        let name = token.trim();
        if !is_valid_identifier(name) {
            return Err(PlaceholderError::InvalidArgumentName {
                name: name.to_string(),
            });
        }

        self.skip_whitespace();
        let value = if self.peek() == Some('"') {
            self.quoted()?
        } else {
            self.take_until(&[syntax.separator, syntax.args_close])
                .trim()
                .to_string()
        };
        Ok(ExpressionArgument::named(name, value))
    }

    /// Parses `"..."`, unescaping `\"` and `\\`.
    fn quoted(&mut self) -> Result<String, PlaceholderError> {
        self.bump();
        let mut value = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(value),
                Some('\\') => match self.bump() {
                    Some(c @ ('"' | '\\')) => value.push(c),
                    Some(c) => {
                        value.push('\\');
                        value.push(c);
                    }
                    None => return Err(PlaceholderError::UnterminatedQuote),
                },
                Some(c) => value.push(c),
                None => return Err(PlaceholderError::UnterminatedQuote),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<ExpressionInput, PlaceholderError> {
        parse_placeholder(body, &Syntax::default())
    }

    #[test]
    fn bare_identifier() {
        let input = parse("RANDOM_DATE").unwrap();
        assert_eq!(input.identifier(), "RANDOM_DATE");
        assert!(input.arguments().is_empty());
    }

    #[test]
    fn surrounding_whitespace_ignored() {
        let input = parse("  RANDOM_DATE \t").unwrap();
        assert_eq!(input.identifier(), "RANDOM_DATE");
    }

    #[test]
    fn empty_argument_list() {
        let input = parse("RANDOM_UUID()").unwrap();
        assert!(input.arguments().is_empty());
        let input = parse("RANDOM_UUID( )").unwrap();
        assert!(input.arguments().is_empty());
    }

    #[test]
    fn named_arguments() {
        let input = parse("RANDOM_INTEGER(min=1, max = 10)").unwrap();
        assert_eq!(input.argument("min"), Some("1"));
        assert_eq!(input.argument("max"), Some("10"));
    }

    #[test]
    fn positional_arguments() {
        let input = parse("RANDOM_ENUM(red, green , blue)").unwrap();
        let values: Vec<_> = input.arguments().iter().map(ExpressionArgument::value).collect();
        assert_eq!(values, ["red", "green", "blue"]);
    }

    #[test]
    fn quoted_values_keep_punctuation() {
        let input = parse(r#"RANDOM_ENUM("a, b", name="x)y", "say \"hi\"")"#).unwrap();
        assert_eq!(input.positional(0), Some("a, b"));
        assert_eq!(input.argument("name"), Some("x)y"));
        assert_eq!(input.positional(1), Some(r#"say "hi""#));
    }

    #[test]
    fn quoted_unknown_escape_kept() {
        let input = parse(r#"X("a\nb")"#).unwrap();
        assert_eq!(input.positional(0), Some(r"a\nb"));
    }

    #[test]
    fn empty_body() {
        assert_eq!(parse(""), Err(PlaceholderError::MissingIdentifier));
        assert_eq!(parse("   "), Err(PlaceholderError::MissingIdentifier));
    }

    #[test]
    fn identifier_with_invalid_characters() {
        assert_eq!(
            parse("RANDOM-DATE"),
            Err(PlaceholderError::UnexpectedCharacter { found: '-' })
        );
        assert_eq!(
            parse("RANDOM DATE"),
            Err(PlaceholderError::UnexpectedCharacter { found: 'D' })
        );
        assert_eq!(
            parse("-x"),
            Err(PlaceholderError::MissingIdentifier)
        );
    }

    #[test]
    fn unclosed_arguments() {
        assert_eq!(parse("X(a, b"), Err(PlaceholderError::UnclosedArguments));
        assert_eq!(parse("X("), Err(PlaceholderError::UnclosedArguments));
    }

    #[test]
    fn unterminated_quote() {
        assert_eq!(parse(r#"X("abc)"#), Err(PlaceholderError::UnterminatedQuote));
    }

    #[test]
    fn trailing_text() {
        assert_eq!(parse("X(a) extra"), Err(PlaceholderError::TrailingCharacters));
        assert!(parse("X(a)  ").is_ok());
    }

    #[test]
    fn invalid_argument_name() {
        assert!(matches!(
            parse("X(a b=1)"),
            Err(PlaceholderError::InvalidArgumentName { .. })
        ));
    }

    #[test]
    fn text_after_quoted_value_is_rejected() {
        assert_eq!(parse(r#"X("a" b)"#), Err(PlaceholderError::UnclosedArguments));
    }

    #[test]
    fn custom_argument_punctuation() {
        let syntax = Syntax {
            args_open: '[',
            args_close: ']',
            separator: ';',
            ..Syntax::default()
        };
        let input = parse_placeholder("RANDOM_INTEGER[min=1; max=2]", &syntax).unwrap();
        assert_eq!(input.argument("min"), Some("1"));
        assert_eq!(input.argument("max"), Some("2"));
    }

    #[test]
    fn trailing_separator_yields_empty_argument() {
        let input = parse("RANDOM_ENUM(a,)").unwrap();
        assert_eq!(input.arguments().len(), 2);
        assert_eq!(input.positional(1), Some(""));
    }
}
