//! Tokenizer for the TypeScript declaration subset.
//!
//! Tokens carry byte offsets into the source so the parser can recover the
//! exact text of constructs it does not model (function types, generics),
//! and line/column positions for syntax diagnostics.

use crate::error::ParseError;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Ident(String),
    Str(String),
    Num(f64),
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Lt,
    Gt,
    Pipe,
    Amp,
    Colon,
    Semi,
    Question,
    Comma,
    Eq,
    Arrow,
    Dot,
    Minus,
    Other(char),
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

struct Cursor<'a> {
    file: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str, file: &'a str) -> Self {
        Self {
            file,
            chars: src.char_indices().peekable(),
            line: 1,
            column: 1,
        }
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        let next = self.chars.next();
        if let Some((_, ch)) = next {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        next
    }

    fn peek(&mut self) -> Option<(usize, char)> {
        self.chars.peek().copied()
    }

    fn error(&self, line: usize, column: usize, message: impl Into<String>) -> ParseError {
        ParseError::syntax(self.file, line, column, message)
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '$'
}

fn is_ident_continue(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

/// Tokenize a source file, skipping whitespace and comments.
pub fn tokenize(src: &str, file: &str) -> Result<Vec<Token>, ParseError> {
    let mut cursor = Cursor::new(src, file);
    let mut tokens = Vec::new();

    while let Some((start, ch)) = cursor.peek() {
        if ch.is_whitespace() {
            cursor.bump();
            continue;
        }

        let line = cursor.line;
        let column = cursor.column;

        if ch == '/' {
            let lookahead = &src[start..];
            if lookahead.starts_with("//") {
                while let Some((_, ch)) = cursor.peek() {
                    if ch == '\n' {
                        break;
                    }
                    cursor.bump();
                }
                continue;
            }
            if lookahead.starts_with("/*") {
                cursor.bump();
                cursor.bump();
                let mut closed = false;
                while let Some((offset, _)) = cursor.peek() {
                    if src[offset..].starts_with("*/") {
                        cursor.bump();
                        cursor.bump();
                        closed = true;
                        break;
                    }
                    cursor.bump();
                }
                if !closed {
                    return Err(cursor.error(line, column, "unterminated block comment"));
                }
                continue;
            }
        }

        if is_ident_start(ch) {
            cursor.bump();
            let mut end = start + ch.len_utf8();
            while let Some((offset, next)) = cursor.peek() {
                if !is_ident_continue(next) {
                    break;
                }
                end = offset + next.len_utf8();
                cursor.bump();
            }
            tokens.push(Token {
                kind: TokenKind::Ident(src[start..end].to_string()),
                start,
                end,
                line,
                column,
            });
            continue;
        }

        if ch.is_ascii_digit() {
            cursor.bump();
            let mut end = start + 1;
            let mut seen_dot = false;
            while let Some((offset, next)) = cursor.peek() {
                if next.is_ascii_digit() || (next == '.' && !seen_dot) {
                    seen_dot |= next == '.';
                    end = offset + next.len_utf8();
                    cursor.bump();
                } else {
                    break;
                }
            }
            let text = &src[start..end];
            let value: f64 = text
                .parse()
                .map_err(|_| cursor.error(line, column, format!("invalid number '{}'", text)))?;
            tokens.push(Token {
                kind: TokenKind::Num(value),
                start,
                end,
                line,
                column,
            });
            continue;
        }

        if ch == '\'' || ch == '"' || ch == '`' {
            let quote = ch;
            cursor.bump();
            let mut value = String::new();
            let mut end = None;
            while let Some((offset, next)) = cursor.bump() {
                if next == quote {
                    end = Some(offset + next.len_utf8());
                    break;
                }
                if next == '\\' {
                    match cursor.bump() {
                        Some((_, 'n')) => value.push('\n'),
                        Some((_, 't')) => value.push('\t'),
                        Some((_, escaped)) => value.push(escaped),
                        None => break,
                    }
                } else {
                    value.push(next);
                }
            }
            let end =
                end.ok_or_else(|| cursor.error(line, column, "unterminated string literal"))?;
            tokens.push(Token {
                kind: TokenKind::Str(value),
                start,
                end,
                line,
                column,
            });
            continue;
        }

        cursor.bump();
        let mut end = start + ch.len_utf8();
        let kind = match ch {
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '<' => TokenKind::Lt,
            '>' => TokenKind::Gt,
            '|' => TokenKind::Pipe,
            '&' => TokenKind::Amp,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semi,
            '?' => TokenKind::Question,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '-' => TokenKind::Minus,
            '=' => {
                if matches!(cursor.peek(), Some((_, '>'))) {
                    cursor.bump();
                    end += 1;
                    TokenKind::Arrow
                } else {
                    TokenKind::Eq
                }
            }
            other => TokenKind::Other(other),
        };
        tokens.push(Token {
            kind,
            start,
            end,
            line,
            column,
        });
    }

    Ok(tokens)
}
