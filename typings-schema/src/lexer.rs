//! Tokenizer for API description files.
//!
//! Newlines are significant (one member per line) and line comments are kept
//! as tokens so the parser can attach them as documentation.

use crate::error::ParseError;
use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier or keyword.
    Ident(String),
    /// Double-quoted string, unescaped.
    Str(String),
    /// Backquoted raw string (struct tags).
    RawStr(String),
    /// Integer literal.
    Number(String),
    /// `//` comment, including the marker.
    LineComment(String),
    /// Single punctuation character.
    Punct(char),
    /// End of line.
    Newline,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(s) => write!(f, "identifier '{s}'"),
            Self::Str(s) => write!(f, "string \"{s}\""),
            Self::RawStr(s) => write!(f, "tag `{s}`"),
            Self::Number(s) => write!(f, "number {s}"),
            Self::LineComment(_) => f.write_str("comment"),
            Self::Punct(c) => write!(f, "'{c}'"),
            Self::Newline => f.write_str("end of line"),
        }
    }
}

/// Token with its source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token kind.
    pub kind: TokenKind,
    /// Line number (1-based).
    pub line: usize,
    /// Byte offset of the token's first character.
    pub offset: usize,
}

/// Splits API description source into tokens.
///
/// # Errors
/// Returns `ParseError::Unterminated` for unclosed strings, tags and block
/// comments.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();
    let mut line = 1;

    while let Some((offset, c)) = chars.next() {
        let kind = match c {
            '\n' => {
                tokens.push(Token {
                    kind: TokenKind::Newline,
                    line,
                    offset,
                });
                line += 1;
                continue;
            }
            c if c.is_whitespace() => continue,
            '/' if next_is(&mut chars, '/') => {
                let mut text = String::from("/");
                while let Some(&(_, next)) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    text.push(next);
                    chars.next();
                }
                TokenKind::LineComment(text.trim_end().to_string())
            }
            '/' if next_is(&mut chars, '*') => {
                chars.next();
                let start = line;
                let mut closed = false;
                while let Some((_, next)) = chars.next() {
                    match next {
                        '\n' => line += 1,
                        '*' if next_is(&mut chars, '/') => {
                            chars.next();
                            closed = true;
                            break;
                        }
                        _ => {}
                    }
                }
                if !closed {
                    return Err(ParseError::Unterminated {
                        line: start,
                        what: "block comment",
                    });
                }
                continue;
            }
            '"' => {
                let mut text = String::new();
                let mut closed = false;
                while let Some((_, next)) = chars.next() {
                    match next {
                        '"' => {
                            closed = true;
                            break;
                        }
                        '\\' => {
                            if let Some((_, escaped)) = chars.next() {
                                text.push(escaped);
                            }
                        }
                        '\n' => break,
                        other => text.push(other),
                    }
                }
                if !closed {
                    return Err(ParseError::Unterminated { line, what: "string" });
                }
                TokenKind::Str(text)
            }
            '`' => {
                let start = line;
                let mut text = String::new();
                let mut closed = false;
                for (_, next) in chars.by_ref() {
                    if next == '`' {
                        closed = true;
                        break;
                    }
                    if next == '\n' {
                        line += 1;
                    }
                    text.push(next);
                }
                if !closed {
                    return Err(ParseError::Unterminated {
                        line: start,
                        what: "tag",
                    });
                }
                tokens.push(Token {
                    kind: TokenKind::RawStr(text),
                    line: start,
                    offset,
                });
                continue;
            }
            c if c.is_ascii_digit() => {
                let mut text = String::from(c);
                while let Some(&(_, next)) = chars.peek() {
                    if !next.is_ascii_digit() {
                        break;
                    }
                    text.push(next);
                    chars.next();
                }
                TokenKind::Number(text)
            }
            c if is_ident_start(c) => {
                let mut text = String::from(c);
                while let Some(&(_, next)) = chars.peek() {
                    if !is_ident_continue(next) {
                        break;
                    }
                    text.push(next);
                    chars.next();
                }
                TokenKind::Ident(text)
            }
            other => TokenKind::Punct(other),
        };
        tokens.push(Token { kind, line, offset });
    }

    Ok(tokens)
}

fn next_is(chars: &mut Peekable<CharIndices<'_>>, want: char) -> bool {
    chars.peek().is_some_and(|&(_, next)| next == want)
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

// `.` admits qualified names (`time.Time`), `-` admits service names.
fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.' || c == '-'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .expect("Failed to tokenize")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_tokenize_member_line() {
        let kinds = kinds("Id int64 `json:\"id\"` // primary key\n");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Ident("Id".into()),
                TokenKind::Ident("int64".into()),
                TokenKind::RawStr("json:\"id\"".into()),
                TokenKind::LineComment("// primary key".into()),
                TokenKind::Newline,
            ]
        );
    }

    #[test]
    fn test_tokenize_type_punctuation() {
        let kinds = kinds("map[string][]*User");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Ident("map".into()),
                TokenKind::Punct('['),
                TokenKind::Ident("string".into()),
                TokenKind::Punct(']'),
                TokenKind::Punct('['),
                TokenKind::Punct(']'),
                TokenKind::Punct('*'),
                TokenKind::Ident("User".into()),
            ]
        );
    }

    #[test]
    fn test_tokenize_tracks_lines() {
        let tokens = tokenize("a\n/* x\ny */ b\nc").expect("Failed to tokenize");
        let idents: Vec<(String, usize)> = tokens
            .into_iter()
            .filter_map(|t| match t.kind {
                TokenKind::Ident(s) => Some((s, t.line)),
                _ => None,
            })
            .collect();
        assert_eq!(
            idents,
            vec![("a".into(), 1), ("b".into(), 3), ("c".into(), 4)]
        );
    }

    #[test]
    fn test_tokenize_string_escape() {
        assert_eq!(
            kinds(r#""a \"b\"""#),
            vec![TokenKind::Str("a \"b\"".into())]
        );
    }

    #[test]
    fn test_tokenize_records_offsets() {
        let tokens = tokenize("info (\n  v: 1.0\n)").expect("Failed to tokenize");
        let offsets: Vec<usize> = tokens.iter().map(|t| t.offset).collect();
        assert_eq!(offsets, vec![0, 5, 6, 9, 10, 12, 13, 14, 15, 16]);
    }

    #[test]
    fn test_unterminated_tag() {
        let err = tokenize("Id int `json:\"id\"").expect_err("should fail");
        assert!(matches!(err, ParseError::Unterminated { what: "tag", .. }));
    }

    #[test]
    fn test_unterminated_string() {
        let err = tokenize("syntax = \"v1\n").expect_err("should fail");
        assert!(matches!(
            err,
            ParseError::Unterminated {
                line: 1,
                what: "string"
            }
        ));
    }
}
