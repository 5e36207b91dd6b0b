//! API description parser.
//!
//! This module parses the type section of a go-zero style `.api`
//! description into an [`ApiSpec`]. `syntax`, `info` and `import`
//! statements are read; `@server(...)` annotations and `service` blocks are
//! skipped.

use crate::error::ParseError;
use crate::lexer::{Token, TokenKind, tokenize};
use crate::types::{ApiSpec, Binding, DefineStruct, Member, PrimitiveKind, Type};
use std::path::Path;

/// Parses an API description from a string.
///
/// # Arguments
/// * `source` - API description content
///
/// # Returns
/// Parsed description or parse error.
///
/// # Errors
/// Returns `ParseError` if the source is malformed or declares a type twice.
pub fn parse_api(source: &str) -> Result<ApiSpec, ParseError> {
    let tokens = tokenize(source)?;
    let spec = Parser::new(source, tokens).parse()?;
    tracing::debug!(types = spec.types.len(), "parsed API description");
    Ok(spec)
}

/// Parses an API description file.
///
/// # Errors
/// Returns `ParseError` if reading or parsing fails.
pub fn parse_api_file(path: &Path) -> Result<ApiSpec, ParseError> {
    let source = std::fs::read_to_string(path)?;
    parse_api(&source)
}

/// Binding, wire name and allowed values read from a struct tag.
#[derive(Debug, Default, PartialEq, Eq)]
struct TagInfo {
    binding: Binding,
    property: Option<String>,
    options: Option<Vec<String>>,
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    spec: ApiSpec,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            spec: ApiSpec::new(),
        }
    }

    fn parse(mut self) -> Result<ApiSpec, ParseError> {
        loop {
            let docs = self.leading_docs();
            let Some(token) = self.peek().cloned() else {
                break;
            };
            match &token.kind {
                TokenKind::Ident(word) if word == "syntax" => self.parse_syntax()?,
                TokenKind::Ident(word) if word == "info" => self.parse_info()?,
                TokenKind::Ident(word) if word == "import" => self.parse_import()?,
                TokenKind::Ident(word) if word == "type" => self.parse_type_decl(docs)?,
                TokenKind::Ident(word) if word == "service" => self.skip_service()?,
                TokenKind::Punct('@') => self.skip_annotation()?,
                other => return Err(ParseError::unexpected(token.line, "declaration", other.to_string())),
            }
        }
        Ok(self.spec)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    fn next(&mut self, context: &str) -> Result<Token, ParseError> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or_else(|| ParseError::eof(context))?;
        self.pos += 1;
        Ok(token)
    }

    fn skip_newlines(&mut self) {
        while matches!(
            self.peek_kind(),
            Some(TokenKind::Newline | TokenKind::LineComment(_))
        ) {
            self.pos += 1;
        }
    }

    /// Collects the comment lines directly above the next item.
    fn leading_docs(&mut self) -> Vec<String> {
        let mut docs = Vec::new();
        loop {
            match self.peek_kind() {
                Some(TokenKind::Newline) => {
                    self.pos += 1;
                    // a blank line detaches the comments above it
                    if matches!(self.peek_kind(), Some(TokenKind::Newline)) {
                        docs.clear();
                    }
                }
                Some(TokenKind::LineComment(text)) => {
                    docs.push(text.clone());
                    self.pos += 1;
                }
                _ => break,
            }
        }
        docs
    }

    fn expect_punct(&mut self, expected: char, context: &str) -> Result<(), ParseError> {
        let token = self.next(context)?;
        match token.kind {
            TokenKind::Punct(c) if c == expected => Ok(()),
            other => Err(ParseError::unexpected(
                token.line,
                format!("'{expected}'"),
                other.to_string(),
            )),
        }
    }

    fn expect_ident(&mut self, context: &str) -> Result<(String, usize), ParseError> {
        let token = self.next(context)?;
        match token.kind {
            TokenKind::Ident(name) => Ok((name, token.line)),
            other => Err(ParseError::unexpected(token.line, context, other.to_string())),
        }
    }

    fn eat_punct(&mut self, expected: char) -> bool {
        if self.peek_kind() == Some(&TokenKind::Punct(expected)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if matches!(self.peek_kind(), Some(TokenKind::Ident(word)) if word == keyword) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_syntax(&mut self) -> Result<(), ParseError> {
        self.pos += 1;
        self.expect_punct('=', "syntax")?;
        let token = self.next("syntax")?;
        match token.kind {
            TokenKind::Str(version) => {
                self.spec.syntax = Some(version);
                Ok(())
            }
            other => Err(ParseError::unexpected(token.line, "syntax version string", other.to_string())),
        }
    }

    fn parse_info(&mut self) -> Result<(), ParseError> {
        self.pos += 1;
        self.expect_punct('(', "info")?;
        loop {
            self.skip_newlines();
            if self.eat_punct(')') {
                return Ok(());
            }
            let (key, _) = self.expect_ident("info property name")?;
            self.expect_punct(':', "info property")?;
            let value = self.info_value()?;
            if self.spec.info_property(&key).is_some() {
                return Err(ParseError::duplicate("info property", key));
            }
            self.spec.info.push((key, value));
        }
    }

    /// Reads a quoted value, or the rest of the line for bare values.
    ///
    /// Bare values are taken verbatim from the source. A `)` closing the
    /// block on the same line is not part of the value.
    fn info_value(&mut self) -> Result<String, ParseError> {
        if let Some(TokenKind::Str(value)) = self.peek_kind() {
            let value = value.clone();
            self.pos += 1;
            return Ok(value);
        }

        let (start, line) = self
            .peek()
            .map(|t| (t.offset, t.line))
            .ok_or_else(|| ParseError::eof("info property value"))?;
        let mut end = self.source.len();
        let mut closing = None;
        while let Some(token) = self.peek() {
            match &token.kind {
                TokenKind::Newline => {
                    end = token.offset;
                    break;
                }
                // `url: http://host` keeps its `//`
                TokenKind::LineComment(_)
                    if self.source[..token.offset].ends_with(char::is_whitespace) =>
                {
                    end = token.offset;
                    break;
                }
                TokenKind::Punct(')') => closing = Some((self.pos, token.offset)),
                _ => closing = None,
            }
            self.pos += 1;
        }
        if let Some((pos, offset)) = closing {
            self.pos = pos;
            end = offset;
        }

        let value = self.source[start..end].trim();
        if value.is_empty() {
            return Err(ParseError::unexpected(line, "info property value", "end of line"));
        }
        Ok(value.to_string())
    }

    fn parse_import(&mut self) -> Result<(), ParseError> {
        self.pos += 1;
        if self.eat_punct('(') {
            loop {
                self.skip_newlines();
                if self.eat_punct(')') {
                    return Ok(());
                }
                let path = self.import_path()?;
                self.spec.imports.push(path);
            }
        }
        let path = self.import_path()?;
        self.spec.imports.push(path);
        Ok(())
    }

    fn import_path(&mut self) -> Result<String, ParseError> {
        let token = self.next("import path")?;
        match token.kind {
            TokenKind::Str(path) => Ok(path),
            other => Err(ParseError::unexpected(token.line, "import path string", other.to_string())),
        }
    }

    fn parse_type_decl(&mut self, docs: Vec<String>) -> Result<(), ParseError> {
        self.pos += 1;
        if self.eat_punct('(') {
            loop {
                let docs = self.leading_docs();
                if self.eat_punct(')') {
                    return Ok(());
                }
                self.parse_struct_def(docs)?;
            }
        }
        self.parse_struct_def(docs)
    }

    fn parse_struct_def(&mut self, docs: Vec<String>) -> Result<(), ParseError> {
        let (name, _) = self.expect_ident("type name")?;
        self.eat_keyword("struct");
        self.expect_punct('{', "type body")?;
        let members = self.parse_members()?;

        if self.spec.has_type(&name) {
            return Err(ParseError::duplicate("type", name));
        }
        tracing::trace!(name = %name, members = members.len(), "parsed type");
        self.spec.add_type(DefineStruct {
            name,
            members,
            docs,
        });
        Ok(())
    }

    /// Parses members up to and including the closing brace.
    fn parse_members(&mut self) -> Result<Vec<Member>, ParseError> {
        let mut members = Vec::new();
        loop {
            let docs = self.leading_docs();
            match self.peek_kind() {
                None => return Err(ParseError::eof("type body")),
                Some(TokenKind::Punct('}')) => {
                    self.pos += 1;
                    return Ok(members);
                }
                Some(_) => members.push(self.parse_member(docs)?),
            }
        }
    }

    fn parse_member(&mut self, docs: Vec<String>) -> Result<Member, ParseError> {
        let token = self.next("member")?;
        let line = token.line;
        let mut member = match token.kind {
            TokenKind::Punct('*') => {
                let (name, _) = self.expect_ident("embedded type name")?;
                Member::inline(Type::pointer(type_from_ident(&name)))
            }
            TokenKind::Ident(first) => {
                if self.at_member_end() {
                    Member::inline(type_from_ident(&first))
                } else {
                    let ty = self.parse_type()?;
                    Member::new(first, ty)
                }
            }
            other => return Err(ParseError::unexpected(line, "member", other.to_string())),
        };
        member.docs = docs;

        if let Some(TokenKind::RawStr(raw)) = self.peek_kind() {
            let raw = raw.clone();
            self.pos += 1;
            let tag = parse_tag(&raw).ok_or_else(|| ParseError::invalid_tag(line, &member.name, &raw))?;
            member.binding = tag.binding;
            member.property = tag.property;
            member.options = tag.options;
        }

        if let Some(TokenKind::LineComment(text)) = self.peek_kind() {
            member.comment = Some(text.clone());
            self.pos += 1;
        }

        match self.peek_kind() {
            None | Some(TokenKind::Newline | TokenKind::Punct('}')) => Ok(member),
            Some(other) => {
                let found = other.to_string();
                let line = self.peek().map_or(line, |t| t.line);
                Err(ParseError::unexpected(line, "end of member", found))
            }
        }
    }

    /// True when the current member line holds nothing but the type name.
    fn at_member_end(&self) -> bool {
        matches!(
            self.peek_kind(),
            None | Some(
                TokenKind::Newline
                    | TokenKind::LineComment(_)
                    | TokenKind::RawStr(_)
                    | TokenKind::Punct('}')
            )
        )
    }

    fn parse_type(&mut self) -> Result<Type, ParseError> {
        let token = self.next("type")?;
        match token.kind {
            TokenKind::Punct('*') => Ok(Type::pointer(self.parse_type()?)),
            TokenKind::Punct('[') => {
                if let Some(TokenKind::Number(_)) = self.peek_kind() {
                    self.pos += 1;
                }
                self.expect_punct(']', "array type")?;
                Ok(Type::array(self.parse_type()?))
            }
            TokenKind::Punct('{') => Ok(Type::Nested(self.parse_members()?)),
            TokenKind::Ident(word) if word == "struct" => {
                self.expect_punct('{', "struct type")?;
                Ok(Type::Nested(self.parse_members()?))
            }
            TokenKind::Ident(word) if word == "map" => {
                self.expect_punct('[', "map type")?;
                let key = self.parse_type()?;
                self.expect_punct(']', "map type")?;
                let value = self.parse_type()?;
                Ok(Type::map(key, value))
            }
            TokenKind::Ident(word) if word == "interface" => {
                self.expect_punct('{', "interface type")?;
                self.expect_punct('}', "interface type")?;
                Ok(Type::Interface)
            }
            TokenKind::Ident(name) => Ok(type_from_ident(&name)),
            other => Err(ParseError::unexpected(token.line, "type", other.to_string())),
        }
    }

    fn skip_service(&mut self) -> Result<(), ParseError> {
        loop {
            let token = self.next("service")?;
            if token.kind == TokenKind::Punct('{') {
                return self.skip_balanced('{', '}');
            }
        }
    }

    fn skip_annotation(&mut self) -> Result<(), ParseError> {
        self.pos += 1;
        self.expect_ident("annotation name")?;
        if self.eat_punct('(') {
            self.skip_balanced('(', ')')?;
        }
        Ok(())
    }

    /// Skips tokens until the delimiter opened just before is closed.
    fn skip_balanced(&mut self, open: char, close: char) -> Result<(), ParseError> {
        let mut depth = 1;
        while depth > 0 {
            let token = self.next("block")?;
            match token.kind {
                TokenKind::Punct(c) if c == open => depth += 1,
                TokenKind::Punct(c) if c == close => depth -= 1,
                _ => {}
            }
        }
        Ok(())
    }
}

fn type_from_ident(name: &str) -> Type {
    match PrimitiveKind::from_name(name) {
        Some(kind) => Type::Primitive(kind),
        None => Type::Named(name.to_string()),
    }
}

/// Parses a Go struct tag (`json:"id,optional" form:"id"`).
///
/// The first of the `json`, `form`, `path` and `header` keys decides the
/// binding. Returns `None` for malformed tags.
fn parse_tag(raw: &str) -> Option<TagInfo> {
    let mut rest = raw.trim();
    let mut info = TagInfo::default();
    let mut bound = false;

    while !rest.is_empty() {
        let colon = rest.find(':')?;
        let key = &rest[..colon];
        if key.is_empty() || key.contains(char::is_whitespace) {
            return None;
        }
        let after = rest[colon + 1..].strip_prefix('"')?;
        let end = after.find('"')?;
        let value = &after[..end];
        rest = after[end + 1..].trim_start();

        if bound {
            continue;
        }
        if let Some(binding) = Binding::from_tag_key(key) {
            bound = true;
            info.binding = binding;
            let mut items = split_tag_value(value).into_iter();
            info.property = items.next().filter(|name| !name.is_empty());
            for item in items {
                if let Some(options) = item.strip_prefix("options=") {
                    info.options = Some(split_options(options));
                }
            }
        }
    }

    Some(info)
}

/// Splits a tag value on commas outside brackets.
fn split_tag_value(value: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    for c in value.chars() {
        match c {
            '[' => {
                depth += 1;
                current.push(c);
            }
            ']' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 => items.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    items.push(current);
    items.into_iter().map(|item| item.trim().to_string()).collect()
}

/// Reads `a|b|c` or `[a,b,c]`.
fn split_options(options: &str) -> Vec<String> {
    let (inner, separator) = match options
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
    {
        Some(inner) => (inner, ','),
        None => (options, '|'),
    };
    inner
        .split(separator)
        .map(str::trim)
        .filter(|option| !option.is_empty())
        .map(str::to_string)
        .collect()
}
