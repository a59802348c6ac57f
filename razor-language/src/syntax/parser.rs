//! Hand-written template parser.
//!
//! Every construct the parser cares about starts with an ASCII `@`, so the
//! scanner works on bytes and only ever slices the text at ASCII positions.

use super::{Span, SyntaxKind, SyntaxNode};
use crate::{Diagnostic, ParserOptions, SourceDocument};

const PHASE: &str = "parse";

pub(super) struct Parser<'a> {
    source: &'a SourceDocument,
    options: &'a ParserOptions,
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    markup: String,
    markup_start: usize,
    nodes: Vec<SyntaxNode>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    pub(super) fn new(source: &'a SourceDocument, options: &'a ParserOptions) -> Self {
        Self {
            source,
            options,
            text: &source.text,
            bytes: source.text.as_bytes(),
            pos: 0,
            markup: String::new(),
            markup_start: 0,
            nodes: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub(super) fn parse(mut self) -> (Vec<SyntaxNode>, Vec<Diagnostic>) {
        while self.pos < self.bytes.len() {
            if self.bytes[self.pos] != b'@' {
                let next = self.find_byte(b'@', self.pos).unwrap_or(self.bytes.len());
                self.push_markup(self.pos, next);
                self.pos = next;
                continue;
            }

            // `user@example.com` is markup. `@*`, `@{`, `@(` and `@@` always transition.
            if self.pos > 0
                && self.bytes[self.pos - 1].is_ascii_alphanumeric()
                && self
                    .bytes
                    .get(self.pos + 1)
                    .is_some_and(|&c| is_identifier_start(c))
            {
                self.push_markup(self.pos, self.pos + 1);
                self.pos += 1;
                continue;
            }

            match self.bytes.get(self.pos + 1).copied() {
                Some(b'@') => {
                    self.push_markup(self.pos, self.pos + 1);
                    self.pos += 2;
                }
                Some(b'*') => self.parse_comment(),
                Some(b'{') => self.parse_code_block(),
                Some(b'(') => self.parse_explicit_expression(),
                Some(c) if is_identifier_start(c) => self.parse_identifier(),
                other => {
                    let message = match other {
                        None => "unexpected end of file after '@'".to_string(),
                        Some(c) if c.is_ascii_whitespace() => {
                            "unexpected whitespace after '@'".to_string()
                        }
                        Some(_) => {
                            let c = self.text[self.pos + 1..].chars().next().unwrap_or('?');
                            format!("unexpected character '{}' after '@'", c)
                        }
                    };
                    self.error("RZ1005", message, self.pos);
                    self.push_markup(self.pos, self.pos + 1);
                    self.pos += 1;
                }
            }
        }

        self.flush_markup();
        (self.nodes, self.diagnostics)
    }

    fn parse_comment(&mut self) {
        let start = self.pos;
        let body = start + 2;
        let (text, end) = match self.text[body..].find("*@") {
            Some(offset) => (&self.text[body..body + offset], body + offset + 2),
            None => {
                self.error("RZ1004", "the comment block is not terminated", start);
                (&self.text[body..], self.bytes.len())
            }
        };
        let text = text.to_string();
        self.push_node(SyntaxKind::Comment { text }, start, end);
    }

    fn parse_code_block(&mut self) {
        let start = self.pos;
        let body = start + 2;
        let (content, end) = match self.find_closing(b'{', b'}', body) {
            Some(close) => (&self.text[body..close], close + 1),
            None => {
                self.error(
                    "RZ1006",
                    "the code block is missing a closing '}' character",
                    start,
                );
                (&self.text[body..], self.bytes.len())
            }
        };
        let content = content.to_string();
        self.push_node(SyntaxKind::CodeBlock { content }, start, end);
    }

    fn parse_explicit_expression(&mut self) {
        let start = self.pos;
        let body = start + 2;
        let (content, end) = match self.find_closing(b'(', b')', body) {
            Some(close) => (&self.text[body..close], close + 1),
            None => {
                self.error(
                    "RZ1006",
                    "the explicit expression is missing a closing ')' character",
                    start,
                );
                (&self.text[body..], self.bytes.len())
            }
        };
        let content = content.to_string();
        self.push_node(
            SyntaxKind::Expression {
                content,
                explicit: true,
            },
            start,
            end,
        );
    }

    fn parse_identifier(&mut self) {
        let start = self.pos;
        let name_start = start + 1;
        let name_end = self.identifier_end(name_start);
        let name = &self.text[name_start..name_end];

        if self.options.is_directive(name) {
            self.parse_directive(start, name_end);
        } else {
            self.parse_implicit_expression(start, name_end);
        }
    }

    fn parse_directive(&mut self, start: usize, name_end: usize) {
        let name = self.text[start + 1..name_end].to_string();
        let eol = self.find_byte(b'\n', name_end).unwrap_or(self.bytes.len());
        let value = self.text[name_end..eol].trim();
        let value = (!value.is_empty()).then(|| value.to_string());
        let end = (eol + 1).min(self.bytes.len());
        self.push_node(SyntaxKind::Directive { name, value }, start, end);
    }

    fn parse_implicit_expression(&mut self, start: usize, name_end: usize) {
        let mut end = name_end;
        loop {
            match self.bytes.get(end).copied() {
                Some(b'.')
                    if self
                        .bytes
                        .get(end + 1)
                        .is_some_and(|&c| is_identifier_start(c)) =>
                {
                    end = self.identifier_end(end + 1);
                }
                Some(open @ (b'(' | b'[')) => {
                    let close = if open == b'(' { b')' } else { b']' };
                    match self.find_closing(open, close, end + 1) {
                        Some(position) => end = position + 1,
                        None => break,
                    }
                }
                _ => break,
            }
        }
        let content = self.text[start + 1..end].to_string();
        self.push_node(
            SyntaxKind::Expression {
                content,
                explicit: false,
            },
            start,
            end,
        );
    }

    fn identifier_end(&self, from: usize) -> usize {
        let mut end = from;
        while self
            .bytes
            .get(end)
            .is_some_and(|&c| c.is_ascii_alphanumeric() || c == b'_')
        {
            end += 1;
        }
        end
    }

    /// Position of the `close` byte matching an already-consumed `open`,
    /// skipping string literals.
    fn find_closing(&self, open: u8, close: u8, from: usize) -> Option<usize> {
        let mut depth = 1usize;
        let mut i = from;
        while i < self.bytes.len() {
            let c = self.bytes[i];
            if c == b'"' {
                let verbatim = i > 0 && self.bytes[i - 1] == b'@';
                i = self.skip_string(i + 1, verbatim);
                continue;
            }
            if c == open {
                depth += 1;
            } else if c == close {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            i += 1;
        }
        None
    }

    /// Index just past the closing quote of a string literal body starting at `from`.
    fn skip_string(&self, from: usize, verbatim: bool) -> usize {
        let mut i = from;
        while i < self.bytes.len() {
            match self.bytes[i] {
                b'\\' if !verbatim => i += 2,
                b'"' if verbatim && self.bytes.get(i + 1) == Some(&b'"') => i += 2,
                b'"' => return i + 1,
                b'\n' if !verbatim => return i,
                _ => i += 1,
            }
        }
        self.bytes.len()
    }

    fn find_byte(&self, needle: u8, from: usize) -> Option<usize> {
        self.bytes[from..]
            .iter()
            .position(|&c| c == needle)
            .map(|offset| from + offset)
    }

    fn push_markup(&mut self, start: usize, end: usize) {
        if self.markup.is_empty() {
            self.markup_start = start;
        }
        self.markup.push_str(&self.text[start..end]);
    }

    fn flush_markup(&mut self) {
        if self.markup.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.markup);
        self.nodes.push(SyntaxNode {
            kind: SyntaxKind::Markup { text },
            span: Span::new(self.markup_start, self.pos),
        });
    }

    fn push_node(&mut self, kind: SyntaxKind, start: usize, end: usize) {
        self.flush_markup();
        self.nodes.push(SyntaxNode {
            kind,
            span: Span::new(start, end),
        });
        self.pos = end;
    }

    fn error(&mut self, code: &str, message: impl Into<String>, offset: usize) {
        let (line, column) = self.source.line_column(offset);
        self.diagnostics.push(
            Diagnostic::error(PHASE, message)
                .with_code(code)
                .at(format!("{}:{}:{}", self.source.display_name(), line, column)),
        );
    }
}

fn is_identifier_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}
