//! Tolerant HTML tokenizer
//!
//! Turns markup into a flat stream of start tags, end tags, text and
//! comments. It never fails: anything it cannot make sense of is either
//! kept as text or dropped.
//!
//! All delimiters the tokenizer looks for are ASCII, so every slice boundary
//! it produces falls on a char boundary.

use crate::entities::decode_entities;
use crate::types::{is_escapable_raw_text_element, is_raw_text_element, Attribute, Attributes};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    StartTag {
        name: String,
        attributes: Attributes,
        self_closing: bool,
    },
    EndTag {
        name: String,
    },
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Data,
    /// Inside a raw text element, waiting for its end tag
    RawText { escapable: bool },
    Eof,
}

fn is_whitespace(b: u8) -> bool {
    matches!(b, b'\t' | b'\n' | b'\x0C' | b'\r' | b' ')
}

#[derive(Debug, Clone)]
pub struct Tokenizer<'input> {
    html: &'input str,
    pos: usize,
    state: State,
    /// Tag name of the raw text element currently open
    raw_text_tag: String,
}

impl<'input> Tokenizer<'input> {
    pub fn new(html: &'input str) -> Self {
        Self {
            html,
            pos: 0,
            state: State::Data,
            raw_text_tag: String::new(),
        }
    }

    fn bytes(&self) -> &'input [u8] {
        self.html.as_bytes()
    }

    fn peek_at(&self, at: usize) -> Option<u8> {
        self.bytes().get(at).copied()
    }

    fn starts_with_ignore_case(&self, at: usize, pattern: &str) -> bool {
        self.bytes()
            .get(at..at + pattern.len())
            .is_some_and(|slice| slice.eq_ignore_ascii_case(pattern.as_bytes()))
    }

    /// Does the `<` at `at` open something other than literal text?
    fn is_markup_start(&self, at: usize) -> bool {
        match self.peek_at(at + 1) {
            Some(b) if b.is_ascii_alphabetic() => true,
            Some(b'/') | Some(b'!') | Some(b'?') => true,
            _ => false,
        }
    }

    fn next_data_token(&mut self) -> Option<Token> {
        loop {
            if self.pos >= self.html.len() {
                self.state = State::Eof;
                return None;
            }

            if self.peek_at(self.pos) != Some(b'<') || !self.is_markup_start(self.pos) {
                return Some(self.consume_text());
            }

            let token = match self.peek_at(self.pos + 1) {
                Some(b'/') => self.consume_end_tag(),
                Some(b'!') => self.consume_markup_declaration(),
                Some(b'?') => {
                    self.skip_past(b'>');
                    None
                }
                _ => self.consume_start_tag(),
            };

            if let Some(token) = token {
                return Some(token);
            }
        }
    }

    /// Character data up to the next markup start, entity-decoded
    fn consume_text(&mut self) -> Token {
        let start = self.pos;
        let first_len = self.html[start..].chars().next().map_or(1, char::len_utf8);
        let mut cursor = start + first_len;

        while let Some(offset) = self.html[cursor..].find('<') {
            let at = cursor + offset;
            if self.is_markup_start(at) {
                cursor = at;
                break;
            }
            cursor = at + 1;
        }
        if !self.html[cursor..].starts_with('<') {
            cursor = self.html.len();
        }

        self.pos = cursor;
        Token::Text(decode_entities(&self.html[start..cursor]).into_owned())
    }

    fn consume_start_tag(&mut self) -> Option<Token> {
        let tag_start = self.pos;
        self.pos += 1; // '<'

        let name = self.consume_name(|b| is_whitespace(b) || b == b'/' || b == b'>');
        let mut attributes = Attributes::new();
        let mut self_closing = false;

        loop {
            self.skip_whitespace();
            match self.peek_at(self.pos) {
                None => {
                    tracing::trace!("[Tokenizer] Dropping tag cut off at byte {}", tag_start);
                    return None;
                }
                Some(b'>') => {
                    self.pos += 1;
                    break;
                }
                Some(b'/') => {
                    self.pos += 1;
                    if self.peek_at(self.pos) == Some(b'>') {
                        self.pos += 1;
                        self_closing = true;
                        break;
                    }
                }
                Some(_) => {
                    let Some(attribute) = self.consume_attribute() else {
                        tracing::trace!("[Tokenizer] Dropping tag cut off at byte {}", tag_start);
                        self.pos = self.html.len();
                        return None;
                    };
                    // First occurrence wins
                    if !attributes.iter().any(|a| a.name == attribute.name) {
                        attributes.push(attribute);
                    }
                }
            }
        }

        if is_raw_text_element(&name) {
            self.state = State::RawText {
                escapable: is_escapable_raw_text_element(&name),
            };
            self.raw_text_tag = name.clone();
        }

        Some(Token::StartTag {
            name,
            attributes,
            self_closing,
        })
    }

    /// One `name`, `name=value`, `name="value"` or `name='value'` attribute.
    /// Returns None when the input ends inside it.
    fn consume_attribute(&mut self) -> Option<Attribute> {
        // A leading '=' belongs to the name, as in browsers
        let start = self.pos;
        while let Some(b) = self.peek_at(self.pos) {
            if is_whitespace(b) || b == b'/' || b == b'>' || (b == b'=' && self.pos > start) {
                break;
            }
            self.pos += 1;
        }
        let name = self.html[start..self.pos].to_ascii_lowercase();

        self.skip_whitespace();
        if self.peek_at(self.pos) != Some(b'=') {
            return Some(Attribute::new(name, ""));
        }
        self.pos += 1;
        self.skip_whitespace();

        let raw = match self.peek_at(self.pos)? {
            quote @ (b'"' | b'\'') => {
                let value_start = self.pos + 1;
                let len = self.bytes()[value_start..]
                    .iter()
                    .position(|&b| b == quote)?;
                self.pos = value_start + len + 1;
                &self.html[value_start..value_start + len]
            }
            b'>' => "",
            _ => {
                let value_start = self.pos;
                while let Some(b) = self.peek_at(self.pos) {
                    if is_whitespace(b) || b == b'>' {
                        break;
                    }
                    self.pos += 1;
                }
                &self.html[value_start..self.pos]
            }
        };

        Some(Attribute::new(name, decode_entities(raw)))
    }

    fn consume_end_tag(&mut self) -> Option<Token> {
        match self.peek_at(self.pos + 2) {
            Some(b) if b.is_ascii_alphabetic() => {
                self.pos += 2; // '</'
                let name = self.consume_name(|b| is_whitespace(b) || b == b'/' || b == b'>');
                // Attributes on end tags are ignored
                if !self.skip_past(b'>') {
                    return None;
                }
                Some(Token::EndTag { name })
            }
            Some(b'>') => {
                self.pos += 3;
                None
            }
            None => {
                // A lone "</" at the end of input is text
                let text = self.html[self.pos..].to_string();
                self.pos = self.html.len();
                Some(Token::Text(text))
            }
            Some(_) => {
                self.skip_past(b'>');
                None
            }
        }
    }

    fn consume_markup_declaration(&mut self) -> Option<Token> {
        if self.starts_with_ignore_case(self.pos, "<!--") {
            return Some(self.consume_comment());
        }

        if self.html[self.pos..].starts_with("<![CDATA[") {
            let data_start = self.pos + "<![CDATA[".len();
            let (data_end, next) = match self.html[data_start..].find("]]>") {
                Some(offset) => (data_start + offset, data_start + offset + 3),
                None => (self.html.len(), self.html.len()),
            };
            self.pos = next;
            return Some(Token::Comment(self.html[data_start..data_end].to_string()));
        }

        // DOCTYPE and other declarations carry nothing we keep
        self.skip_past(b'>');
        None
    }

    fn consume_comment(&mut self) -> Token {
        let data_start = self.pos + 4;
        let rest = &self.html[data_start..];

        // "<!-->" and "<!--->" are empty comments
        if rest.starts_with('>') {
            self.pos = data_start + 1;
            return Token::Comment(String::new());
        }
        if rest.starts_with("->") {
            self.pos = data_start + 2;
            return Token::Comment(String::new());
        }

        let (data_end, next) = match (rest.find("-->"), rest.find("--!>")) {
            (Some(a), Some(b)) if b < a => (data_start + b, data_start + b + 4),
            (Some(a), _) => (data_start + a, data_start + a + 3),
            (None, Some(b)) => (data_start + b, data_start + b + 4),
            (None, None) => (self.html.len(), self.html.len()),
        };

        self.pos = next;
        Token::Comment(self.html[data_start..data_end].to_string())
    }

    /// Content of a raw text element up to its end tag
    fn next_raw_text_token(&mut self, escapable: bool) -> Option<Token> {
        self.state = State::Data;

        let start = self.pos;
        let end = self.find_raw_text_end(start).unwrap_or(self.html.len());
        self.pos = end;

        if end == start {
            return self.next_data_token();
        }

        let raw = &self.html[start..end];
        let text = if escapable {
            decode_entities(raw).into_owned()
        } else {
            raw.to_string()
        };
        Some(Token::Text(text))
    }

    /// Position of `</tag` closing the current raw text element
    fn find_raw_text_end(&self, from: usize) -> Option<usize> {
        let tag_len = self.raw_text_tag.len();
        let mut cursor = from;

        while let Some(offset) = self.html[cursor..].find("</") {
            let at = cursor + offset;
            let name_start = at + 2;
            let name_matches = self
                .bytes()
                .get(name_start..name_start + tag_len)
                .is_some_and(|name| name.eq_ignore_ascii_case(self.raw_text_tag.as_bytes()));
            let terminated = match self.peek_at(name_start + tag_len) {
                None => true,
                Some(b) => is_whitespace(b) || b == b'/' || b == b'>',
            };
            if name_matches && terminated {
                return Some(at);
            }
            cursor = at + 2;
        }

        None
    }

    /// ASCII-lowercased run of bytes up to (not including) a delimiter
    fn consume_name(&mut self, is_delimiter: impl Fn(u8) -> bool) -> String {
        let start = self.pos;
        while let Some(b) = self.peek_at(self.pos) {
            if is_delimiter(b) {
                break;
            }
            self.pos += 1;
        }
        self.html[start..self.pos].to_ascii_lowercase()
    }

    fn skip_whitespace(&mut self) {
        while self.peek_at(self.pos).is_some_and(is_whitespace) {
            self.pos += 1;
        }
    }

    /// Move past the next `delimiter`; returns false (and moves to the end)
    /// when there is none
    fn skip_past(&mut self, delimiter: u8) -> bool {
        match self.bytes()[self.pos..].iter().position(|&b| b == delimiter) {
            Some(offset) => {
                self.pos += offset + 1;
                true
            }
            None => {
                self.pos = self.html.len();
                false
            }
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        match self.state {
            State::Data => self.next_data_token(),
            State::RawText { escapable } => self.next_raw_text_token(escapable),
            State::Eof => None,
        }
    }
}
