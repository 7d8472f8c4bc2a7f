//! Tokenizer for RASM assembly text.
//!
//! The scanner walks the source left to right, re-scanning from the first
//! unconsumed character each time, and produces tokens in exact source
//! order. The only lookahead is the single `:` check that separates a
//! label declaration from a bare identifier.

use crate::error::AsmError;
use rasm_common::Opcode;

/// What a single token is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// A register reference, holding the register index.
    Register(u8),
    /// A signed numeric literal.
    Number(i32),
    /// An opcode mnemonic.
    Opcode(Opcode),
    /// A label declaration. The trailing `:` is consumed but not stored.
    Label(String),
    /// A jump target. The leading `@` is not stored.
    JumpTarget(String),
    /// End of input. Always the final token, exactly once.
    Eof,
}

impl TokenKind {
    /// Human-readable form for error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            TokenKind::Register(r) => format!("register R{r}"),
            TokenKind::Number(n) => format!("number {n}"),
            TokenKind::Opcode(op) => format!("mnemonic {}", op.mnemonic()),
            TokenKind::Label(name) => format!("label '{name}:'"),
            TokenKind::JumpTarget(name) => format!("jump target '@{name}'"),
            TokenKind::Eof => "end of input".to_string(),
        }
    }
}

/// A single token with the source line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) line: usize,
}

/// Tokenize a complete source text.
///
/// The returned stream is terminated by a single [`TokenKind::Eof`] token.
/// Lexing is fail-fast: the first malformed token aborts the scan.
pub(crate) fn scan(source: &str) -> Result<Vec<Token>, AsmError> {
    Scanner::new(source).scan_tokens()
}

struct Scanner<'a> {
    source: &'a [u8],
    start: usize,
    current: usize,
    line: usize,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source: source.as_bytes(),
            start: 0,
            current: 0,
            line: 1,
            tokens: Vec::new(),
        }
    }

    fn scan_tokens(mut self) -> Result<Vec<Token>, AsmError> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token()?;
        }
        self.push(TokenKind::Eof);
        Ok(self.tokens)
    }

    fn scan_token(&mut self) -> Result<(), AsmError> {
        let c = self.advance();
        match c {
            b';' => self.comment(),
            b'\n' => self.line += 1,
            b' ' | b'\t' | b'\r' => {}
            b'R' => self.register()?,
            b'@' => self.jump_target()?,
            b'-' => self.number()?,
            _ if c.is_ascii_digit() => self.number()?,
            _ if c.is_ascii_alphabetic() => self.identifier()?,
            _ => {
                // Non-ASCII bytes have no place in the grammar either;
                // show a replacement character rather than a torn byte.
                let ch = if c.is_ascii() {
                    c as char
                } else {
                    char::REPLACEMENT_CHARACTER
                };
                return Err(AsmError::UnexpectedCharacter { line: self.line, ch });
            }
        }
        Ok(())
    }

    /// `R` followed by exactly one digit.
    fn register(&mut self) -> Result<(), AsmError> {
        match self.peek() {
            Some(d) if d.is_ascii_digit() => {
                self.advance();
                self.push(TokenKind::Register(d - b'0'));
                Ok(())
            }
            _ => Err(AsmError::InvalidRegister {
                line: self.line,
                token: self.lexeme_with_next(),
            }),
        }
    }

    /// `@` followed by one or more letters; the `@` is not stored.
    fn jump_target(&mut self) -> Result<(), AsmError> {
        while self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.advance();
        }
        if self.current == self.start + 1 {
            return Err(AsmError::InvalidJumpTarget { line: self.line });
        }
        let name = self.lexeme_from(self.start + 1);
        self.push(TokenKind::JumpTarget(name));
        Ok(())
    }

    /// One or more digits, optionally preceded by a single `-`.
    fn number(&mut self) -> Result<(), AsmError> {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        let text = self.lexeme_from(self.start);
        let value: i32 = text.parse().map_err(|_| AsmError::InvalidNumber {
            line: self.line,
            token: text.clone(),
        })?;
        self.push(TokenKind::Number(value));
        Ok(())
    }

    /// One or more letters: a label declaration if followed by `:`,
    /// otherwise it must be an opcode mnemonic.
    fn identifier(&mut self) -> Result<(), AsmError> {
        while self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.advance();
        }
        let text = self.lexeme_from(self.start);

        if self.peek() == Some(b':') {
            self.advance();
            self.push(TokenKind::Label(text));
            return Ok(());
        }

        match Opcode::from_mnemonic(&text) {
            Some(opcode) => {
                self.push(TokenKind::Opcode(opcode));
                Ok(())
            }
            None => Err(AsmError::UnknownMnemonic {
                line: self.line,
                token: text,
            }),
        }
    }

    /// `;` through end of line. The newline itself is left for the next
    /// scan so the line counter stays correct.
    fn comment(&mut self) {
        while self.peek().is_some_and(|c| c != b'\n') {
            self.advance();
        }
    }

    fn push(&mut self, kind: TokenKind) {
        self.tokens.push(Token {
            kind,
            line: self.line,
        });
    }

    fn advance(&mut self) -> u8 {
        let c = self.source[self.current];
        self.current += 1;
        c
    }

    fn peek(&self) -> Option<u8> {
        self.source.get(self.current).copied()
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn lexeme_from(&self, start: usize) -> String {
        String::from_utf8_lossy(&self.source[start..self.current]).into_owned()
    }

    /// The current lexeme plus the offending next character, for errors.
    fn lexeme_with_next(&self) -> String {
        let end = (self.current + 1).min(self.source.len());
        String::from_utf8_lossy(&self.source[self.start..end]).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        scan(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn empty_source() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
    }

    #[test]
    fn whitespace_only() {
        assert_eq!(kinds("  \t \r \n  "), vec![TokenKind::Eof]);
    }

    #[test]
    fn comment_only() {
        assert_eq!(kinds("; just a comment"), vec![TokenKind::Eof]);
    }

    #[test]
    fn register_token() {
        assert_eq!(
            kinds("R0 R9"),
            vec![
                TokenKind::Register(0),
                TokenKind::Register(9),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn malformed_register_is_fatal() {
        assert_eq!(
            scan("RX").unwrap_err(),
            AsmError::InvalidRegister {
                line: 1,
                token: "RX".to_string()
            }
        );
    }

    #[test]
    fn register_at_end_of_input_is_fatal() {
        assert_eq!(
            scan("INC R").unwrap_err(),
            AsmError::InvalidRegister {
                line: 1,
                token: "R".to_string()
            }
        );
    }

    #[test]
    fn positive_number() {
        assert_eq!(kinds("42"), vec![TokenKind::Number(42), TokenKind::Eof]);
    }

    #[test]
    fn negative_number() {
        assert_eq!(kinds("-17"), vec![TokenKind::Number(-17), TokenKind::Eof]);
    }

    #[test]
    fn bare_minus_is_fatal() {
        assert_eq!(
            scan("- 3").unwrap_err(),
            AsmError::InvalidNumber {
                line: 1,
                token: "-".to_string()
            }
        );
    }

    #[test]
    fn number_overflow_is_fatal() {
        assert_eq!(
            scan("99999999999").unwrap_err(),
            AsmError::InvalidNumber {
                line: 1,
                token: "99999999999".to_string()
            }
        );
    }

    #[test]
    fn i32_extremes_fit() {
        assert_eq!(
            kinds("2147483647 -2147483648"),
            vec![
                TokenKind::Number(i32::MAX),
                TokenKind::Number(i32::MIN),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn mnemonic_token() {
        assert_eq!(
            kinds("ADD"),
            vec![TokenKind::Opcode(Opcode::Add), TokenKind::Eof]
        );
    }

    #[test]
    fn lowercase_mnemonic_is_fatal() {
        assert_eq!(
            scan("add").unwrap_err(),
            AsmError::UnknownMnemonic {
                line: 1,
                token: "add".to_string()
            }
        );
    }

    #[test]
    fn unknown_identifier_is_fatal() {
        assert_eq!(
            scan("JMP").unwrap_err(),
            AsmError::UnknownMnemonic {
                line: 1,
                token: "JMP".to_string()
            }
        );
    }

    #[test]
    fn label_declaration_consumes_colon() {
        assert_eq!(
            kinds("loop: INC R0"),
            vec![
                TokenKind::Label("loop".to_string()),
                TokenKind::Opcode(Opcode::Inc),
                TokenKind::Register(0),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn jump_target_strips_at_sign() {
        assert_eq!(
            kinds("@loop"),
            vec![TokenKind::JumpTarget("loop".to_string()), TokenKind::Eof]
        );
    }

    #[test]
    fn bare_at_sign_is_fatal() {
        assert_eq!(
            scan("@ loop").unwrap_err(),
            AsmError::InvalidJumpTarget { line: 1 }
        );
    }

    #[test]
    fn unexpected_character_is_fatal() {
        assert_eq!(
            scan("INC R0 #").unwrap_err(),
            AsmError::UnexpectedCharacter { line: 1, ch: '#' }
        );
    }

    #[test]
    fn comment_runs_to_end_of_line_only() {
        assert_eq!(
            kinds("; first\nINC R1 ; trailing\n; last"),
            vec![
                TokenKind::Opcode(Opcode::Inc),
                TokenKind::Register(1),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn line_numbers_follow_newlines() {
        let tokens = scan("INC R0\n\nDEC R1").unwrap();
        let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![1, 1, 3, 3, 3]);
    }

    #[test]
    fn error_line_is_reported() {
        assert_eq!(
            scan("INC R0\nBOGUS R1").unwrap_err(),
            AsmError::UnknownMnemonic {
                line: 2,
                token: "BOGUS".to_string()
            }
        );
    }

    #[test]
    fn full_statement() {
        assert_eq!(
            kinds("loop: NEQ R0 R1 @loop"),
            vec![
                TokenKind::Label("loop".to_string()),
                TokenKind::Opcode(Opcode::Neq),
                TokenKind::Register(0),
                TokenKind::Register(1),
                TokenKind::JumpTarget("loop".to_string()),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn describe_forms() {
        assert_eq!(TokenKind::Register(3).describe(), "register R3");
        assert_eq!(TokenKind::Number(-5).describe(), "number -5");
        assert_eq!(TokenKind::Opcode(Opcode::Set).describe(), "mnemonic SET");
        assert_eq!(TokenKind::Eof.describe(), "end of input");
    }
}
