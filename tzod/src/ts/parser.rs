//! Recursive-descent parser for top-level class-like declarations.
//!
//! Only the declaration surface the introspection contract needs is
//! modeled: `class`/`interface` headers, property declarations with their
//! optional/readonly/initializer markers, and the type-expression subset
//! (keywords, named types, arrays, unions, literals, inline object types).
//! Method bodies, initializer expressions, and heritage clauses are
//! skipped; type constructs outside the subset are captured verbatim as
//! `Unsupported` nodes.

use crate::error::ParseError;
use crate::ir::LiteralValue;

use super::ast::{ClassItem, ObjectMember, PropertyItem, TypeExpr};
use super::lexer::{tokenize, Token, TokenKind};

/// Parse all top-level class-like declarations in a source file.
pub fn parse_declarations(src: &str, file: &str) -> Result<Vec<ClassItem>, ParseError> {
    let tokens = tokenize(src, file)?;
    Parser {
        src,
        file,
        tokens,
        pos: 0,
    }
    .parse_file()
}

struct Parser<'a> {
    src: &'a str,
    file: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn parse_file(&mut self) -> Result<Vec<ClassItem>, ParseError> {
        let mut items = Vec::new();

        while !self.at_end() {
            let is_exported = self.eat_ident("export");
            if is_exported {
                self.eat_ident("default");
            }
            self.eat_ident("abstract");

            if self.check_ident("class") || self.check_ident("interface") {
                let is_interface = self.check_ident("interface");
                self.bump();
                items.push(self.parse_class_like(is_exported, is_interface)?);
            } else if !self.at_end() {
                self.skip_top_level_token()?;
            }
        }

        Ok(items)
    }

    fn parse_class_like(
        &mut self,
        is_exported: bool,
        is_interface: bool,
    ) -> Result<ClassItem, ParseError> {
        let name = self.expect_ident("expected declaration name")?;

        // Heritage clauses and type parameters are not modeled.
        while let Some(token) = self.peek() {
            if token.kind == TokenKind::LBrace {
                break;
            }
            self.bump();
        }
        if !self.eat(&TokenKind::LBrace) {
            return Err(self.error_here("expected '{' to open declaration body"));
        }

        let mut properties = Vec::new();
        loop {
            if self.eat(&TokenKind::RBrace) {
                break;
            }
            if self.at_end() {
                return Err(self.error_here("unterminated declaration body"));
            }
            if self.eat(&TokenKind::Semi) || self.eat(&TokenKind::Comma) {
                continue;
            }
            if let Some(property) = self.parse_member()? {
                properties.push(property);
            }
        }

        Ok(ClassItem {
            name,
            is_exported,
            is_interface,
            properties,
        })
    }

    /// Parse one class-body member; `None` for members that are not
    /// instance properties (methods, accessors, static members).
    fn parse_member(&mut self) -> Result<Option<PropertyItem>, ParseError> {
        while self.check(&TokenKind::Other('@')) {
            self.bump();
            self.expect_ident("expected decorator name")?;
            if self.check(&TokenKind::LParen) {
                self.skip_balanced(&TokenKind::LParen, &TokenKind::RParen)?;
            }
        }

        let mut is_readonly = false;
        let mut is_static = false;
        loop {
            match self.peek_ident() {
                Some("public") | Some("private") | Some("protected") | Some("declare")
                | Some("abstract") | Some("override") => {
                    self.bump();
                }
                Some("static") => {
                    is_static = true;
                    self.bump();
                }
                Some("readonly")
                    if matches!(
                        self.peek_kind_at(1),
                        Some(TokenKind::Ident(_)) | Some(TokenKind::Str(_))
                    ) =>
                {
                    is_readonly = true;
                    self.bump();
                }
                _ => break,
            }
        }

        // Accessors are not instance properties.
        if matches!(self.peek_ident(), Some("get") | Some("set"))
            && matches!(self.peek_kind_at(1), Some(TokenKind::Ident(_)))
        {
            self.bump();
            self.bump();
            self.skip_method_tail()?;
            return Ok(None);
        }

        let name = match self.bump() {
            Some(Token {
                kind: TokenKind::Ident(name),
                ..
            })
            | Some(Token {
                kind: TokenKind::Str(name),
                ..
            }) => name,
            _ => return Err(self.error_here("expected member name")),
        };

        // `foo?(...)` is an optional method, not an optional property.
        if self.check(&TokenKind::Question)
            && matches!(
                self.peek_kind_at(1),
                Some(TokenKind::LParen) | Some(TokenKind::Lt)
            )
        {
            self.bump();
        }
        if self.check(&TokenKind::LParen) || self.check(&TokenKind::Lt) {
            self.skip_method_tail()?;
            return Ok(None);
        }

        let is_optional = self.eat(&TokenKind::Question);
        let ty = if self.eat(&TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };

        let has_initializer = if self.eat(&TokenKind::Eq) {
            self.skip_initializer();
            true
        } else {
            false
        };

        if !self.eat(&TokenKind::Semi) {
            self.eat(&TokenKind::Comma);
        }

        if is_static {
            return Ok(None);
        }

        Ok(Some(PropertyItem {
            name,
            ty,
            is_optional,
            is_readonly,
            has_initializer,
        }))
    }

    // ------------------------------------------------------------------
    // Type expressions
    // ------------------------------------------------------------------

    fn parse_type(&mut self) -> Result<TypeExpr, ParseError> {
        let start = self.offset();
        self.eat(&TokenKind::Pipe);
        let first = self.parse_postfix(start)?;

        if self.check(&TokenKind::Amp) {
            // Intersections are outside the subset.
            return self.unsupported_from(start, 0);
        }
        if !self.check(&TokenKind::Pipe) {
            return Ok(first);
        }

        let mut members = vec![first];
        while self.eat(&TokenKind::Pipe) {
            let member_start = self.offset();
            members.push(self.parse_postfix(member_start)?);
        }
        if self.check(&TokenKind::Amp) {
            return self.unsupported_from(start, 0);
        }
        Ok(TypeExpr::Union(members))
    }

    fn parse_postfix(&mut self, start: usize) -> Result<TypeExpr, ParseError> {
        let mut ty = self.parse_primary(start)?;
        while self.check(&TokenKind::LBracket) {
            if self.peek_kind_at(1) == Some(&TokenKind::RBracket) {
                self.bump();
                self.bump();
                ty = TypeExpr::Array(Box::new(ty));
            } else {
                // Indexed access types are outside the subset.
                return self.unsupported_from(start, 0);
            }
        }
        Ok(ty)
    }

    fn parse_primary(&mut self, start: usize) -> Result<TypeExpr, ParseError> {
        let Some(token) = self.peek().cloned() else {
            return Err(self.error_here("expected a type"));
        };

        match token.kind {
            TokenKind::Str(value) => {
                self.bump();
                Ok(TypeExpr::Literal(LiteralValue::String(value)))
            }
            TokenKind::Num(value) => {
                self.bump();
                Ok(TypeExpr::Literal(LiteralValue::Number(value)))
            }
            TokenKind::Minus => {
                self.bump();
                match self.peek_kind() {
                    Some(TokenKind::Num(value)) => {
                        let value = -*value;
                        self.bump();
                        Ok(TypeExpr::Literal(LiteralValue::Number(value)))
                    }
                    _ => self.unsupported_from(start, 0),
                }
            }
            TokenKind::Ident(name) => {
                self.bump();
                match name.as_str() {
                    "string" => Ok(TypeExpr::StringKeyword),
                    "number" => Ok(TypeExpr::NumberKeyword),
                    "boolean" => Ok(TypeExpr::BooleanKeyword),
                    "true" => Ok(TypeExpr::Literal(LiteralValue::Boolean(true))),
                    "false" => Ok(TypeExpr::Literal(LiteralValue::Boolean(false))),
                    "Array" if self.check(&TokenKind::Lt) => {
                        self.bump();
                        let element = self.parse_type()?;
                        if !self.eat(&TokenKind::Gt) {
                            return self.unsupported_from(start, 0);
                        }
                        Ok(TypeExpr::Array(Box::new(element)))
                    }
                    _ => {
                        if self.check(&TokenKind::Lt) {
                            // Generic instantiations are outside the subset.
                            return self.unsupported_from(start, 0);
                        }
                        let mut full = name;
                        while self.check(&TokenKind::Dot) {
                            self.bump();
                            let segment = self.expect_ident("expected name after '.'")?;
                            full.push('.');
                            full.push_str(&segment);
                        }
                        if self.check(&TokenKind::Lt) {
                            return self.unsupported_from(start, 0);
                        }
                        Ok(TypeExpr::Named(full))
                    }
                }
            }
            TokenKind::LBrace => {
                self.bump();
                self.parse_object_type(start)
            }
            TokenKind::LParen => {
                if self.paren_starts_function() {
                    self.skip_balanced(&TokenKind::LParen, &TokenKind::RParen)?;
                    self.eat(&TokenKind::Arrow);
                    let _ = self.parse_type()?;
                    let end = self.tokens[self.pos - 1].end;
                    Ok(TypeExpr::Unsupported(
                        self.src[start..end].trim().to_string(),
                    ))
                } else {
                    self.bump();
                    let inner = self.parse_type()?;
                    if !self.eat(&TokenKind::RParen) {
                        return self.unsupported_from(start, 0);
                    }
                    Ok(inner)
                }
            }
            _ => {
                // Tuples and other unmodeled forms; if the consumed token
                // opened a bracket, the capture starts one level deep.
                let open_depth = usize::from(matches!(
                    token.kind,
                    TokenKind::LBracket | TokenKind::Lt
                ));
                self.bump();
                self.unsupported_from(start, open_depth)
            }
        }
    }

    fn parse_object_type(&mut self, start: usize) -> Result<TypeExpr, ParseError> {
        let mut members = Vec::new();
        loop {
            if self.eat(&TokenKind::RBrace) {
                break;
            }
            if self.at_end() {
                return Err(self.error_here("unterminated object type"));
            }
            if self.eat(&TokenKind::Semi) || self.eat(&TokenKind::Comma) {
                continue;
            }
            if self.check_ident("readonly")
                && matches!(
                    self.peek_kind_at(1),
                    Some(TokenKind::Ident(_)) | Some(TokenKind::Str(_))
                )
            {
                self.bump();
            }

            let name = match self.bump() {
                Some(Token {
                    kind: TokenKind::Ident(name),
                    ..
                })
                | Some(Token {
                    kind: TokenKind::Str(name),
                    ..
                }) => name,
                _ => return Err(self.error_here("expected member name in object type")),
            };

            // Call/method signatures make the whole object unsupported;
            // the open brace is still unclosed at this point.
            if self.check(&TokenKind::LParen) || self.check(&TokenKind::Lt) {
                return self.unsupported_from(start, 1);
            }

            let is_optional = self.eat(&TokenKind::Question);
            let ty = if self.eat(&TokenKind::Colon) {
                Some(self.parse_type()?)
            } else {
                None
            };
            members.push(ObjectMember {
                name,
                ty,
                is_optional,
            });
        }
        Ok(TypeExpr::ObjectLiteral(members))
    }

    /// Consume the remainder of an unmodeled type expression and keep its
    /// source text. `open_depth` accounts for brackets already consumed.
    fn unsupported_from(
        &mut self,
        start: usize,
        open_depth: usize,
    ) -> Result<TypeExpr, ParseError> {
        debug_assert!(self.pos > 0);
        let mut depth = open_depth;
        let mut end = self.tokens[self.pos - 1].end;

        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace | TokenKind::Lt => {
                    depth += 1;
                }
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace | TokenKind::Gt => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                // Separators only terminate at the outermost level; a comma
                // inside an open bracket belongs to the captured expression.
                TokenKind::Semi | TokenKind::Comma | TokenKind::Eq if depth == 0 => break,
                _ => {}
            }
            end = token.end;
            self.bump();
        }

        Ok(TypeExpr::Unsupported(
            self.src[start..end].trim().to_string(),
        ))
    }

    /// True when the `(` at the current position opens a function type.
    fn paren_starts_function(&self) -> bool {
        let mut depth = 0usize;
        let mut index = self.pos;
        while let Some(token) = self.tokens.get(index) {
            match token.kind {
                TokenKind::LParen => depth += 1,
                TokenKind::RParen => {
                    depth -= 1;
                    if depth == 0 {
                        return matches!(
                            self.tokens.get(index + 1).map(|t| &t.kind),
                            Some(TokenKind::Arrow)
                        );
                    }
                }
                _ => {}
            }
            index += 1;
        }
        false
    }

    // ------------------------------------------------------------------
    // Skipping
    // ------------------------------------------------------------------

    fn skip_top_level_token(&mut self) -> Result<(), ParseError> {
        if self.eat(&TokenKind::LBrace) {
            return self.skip_to_matching_brace();
        }
        self.bump();
        Ok(())
    }

    fn skip_method_tail(&mut self) -> Result<(), ParseError> {
        if self.check(&TokenKind::Lt) {
            self.skip_balanced(&TokenKind::Lt, &TokenKind::Gt)?;
        }
        if self.check(&TokenKind::LParen) {
            self.skip_balanced(&TokenKind::LParen, &TokenKind::RParen)?;
        }
        if self.eat(&TokenKind::Colon) {
            let _ = self.parse_type()?;
        }
        if self.eat(&TokenKind::LBrace) {
            self.skip_to_matching_brace()?;
        } else {
            self.eat(&TokenKind::Semi);
        }
        Ok(())
    }

    fn skip_initializer(&mut self) {
        let mut depth = 0usize;
        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::LBrace | TokenKind::LBracket | TokenKind::LParen => depth += 1,
                TokenKind::RBrace | TokenKind::RBracket | TokenKind::RParen => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                }
                TokenKind::Comma if depth == 0 => return,
                TokenKind::Semi if depth == 0 => {
                    self.bump();
                    return;
                }
                _ => {}
            }
            self.bump();
        }
    }

    /// Skip a balanced pair; the opening token is at the current position.
    fn skip_balanced(&mut self, open: &TokenKind, close: &TokenKind) -> Result<(), ParseError> {
        if !self.eat(open) {
            return Err(self.error_here("expected opening bracket"));
        }
        let mut depth = 1usize;
        while depth > 0 {
            let Some(token) = self.bump() else {
                return Err(self.error_here("unbalanced brackets"));
            };
            if token.kind == *open {
                depth += 1;
            } else if token.kind == *close {
                depth -= 1;
            }
        }
        Ok(())
    }

    /// Skip to the brace matching an already-consumed `{`.
    fn skip_to_matching_brace(&mut self) -> Result<(), ParseError> {
        let mut depth = 1usize;
        while depth > 0 {
            let Some(token) = self.bump() else {
                return Err(self.error_here("unbalanced braces"));
            };
            match token.kind {
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace => depth -= 1,
                _ => {}
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Token plumbing
    // ------------------------------------------------------------------

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    fn peek_kind_at(&self, ahead: usize) -> Option<&TokenKind> {
        self.tokens.get(self.pos + ahead).map(|t| &t.kind)
    }

    fn peek_ident(&self) -> Option<&str> {
        match self.peek_kind() {
            Some(TokenKind::Ident(name)) => Some(name.as_str()),
            _ => None,
        }
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    fn check_ident(&self, name: &str) -> bool {
        self.peek_ident() == Some(name)
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_ident(&mut self, name: &str) -> bool {
        if self.check_ident(name) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect_ident(&mut self, message: &str) -> Result<String, ParseError> {
        match self.bump() {
            Some(Token {
                kind: TokenKind::Ident(name),
                ..
            }) => Ok(name),
            _ => Err(self.error_here(message)),
        }
    }

    /// Byte offset of the current token, or end of source.
    fn offset(&self) -> usize {
        self.peek().map_or(self.src.len(), |t| t.start)
    }

    fn error_here(&self, message: impl Into<String>) -> ParseError {
        let (line, column) = self
            .peek()
            .or_else(|| self.tokens.last())
            .map_or((1, 1), |t| (t.line, t.column));
        ParseError::syntax(self.file, line, column, message)
    }
}
