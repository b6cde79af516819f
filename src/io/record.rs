//! Record tokenizer for line-oriented input decks.
//!
//! # Format
//! - One record per line. Blank lines and lines starting with `#` are
//!   skipped.
//! - Tokens are separated by whitespace. A `"quoted string"` is a single
//!   token and never matches a keyword.
//! - A record starts with its kind (`node`, `hangingnode`, `truss1d`, ...),
//!   usually followed by its number, then `keyword value` pairs.
//! - Array values are written as a count followed by that many entries:
//!   `nodes 3 1 2 3`.
//! - Keywords match case-insensitively.
//!
//! Every accessor that cannot find or parse a required field fails with
//! [`NodeCutError::MissingKeyword`], echoing the record and its line.

use crate::mesh_error::NodeCutError;
use std::str::FromStr;

/// One lexical token of a record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Word(String),
    Quoted(String),
}

impl Token {
    fn as_word(&self) -> Option<&str> {
        match self {
            Token::Word(w) => Some(w),
            Token::Quoted(_) => None,
        }
    }
}

fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '"' {
            chars.next();
            // an unterminated quote runs to the end of the line
            let s: String = chars.by_ref().take_while(|&c| c != '"').collect();
            tokens.push(Token::Quoted(s));
        } else {
            let mut s = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() || c == '"' {
                    break;
                }
                s.push(c);
                chars.next();
            }
            tokens.push(Token::Word(s));
        }
    }
    tokens
}

/// A tokenized input record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputRecord {
    line: usize,
    text: String,
    kind: String,
    tokens: Vec<Token>,
}

impl InputRecord {
    /// Tokenize `text`, read from 1-based line `line`.
    pub fn parse(line: usize, text: &str) -> Self {
        let tokens = tokenize(text);
        let kind = tokens
            .first()
            .and_then(Token::as_word)
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        Self {
            line,
            text: text.trim_end().to_string(),
            kind,
            tokens,
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    /// The raw record text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// First token, lowercased.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    fn missing(&self, keyword: &str) -> NodeCutError {
        NodeCutError::missing_keyword(keyword, format!("line {}: {}", self.line, self.text))
    }

    /// The record number (second token).
    pub fn number(&self) -> Result<u64, NodeCutError> {
        self.tokens
            .get(1)
            .and_then(Token::as_word)
            .and_then(|w| w.parse().ok())
            .ok_or_else(|| self.missing("record number"))
    }

    fn position(&self, keyword: &str) -> Option<usize> {
        self.tokens.iter().position(|t| {
            t.as_word()
                .is_some_and(|w| w.eq_ignore_ascii_case(keyword))
        })
    }

    /// Whether the record carries `keyword`.
    pub fn has(&self, keyword: &str) -> bool {
        self.position(keyword).is_some()
    }

    fn parse_at<T: FromStr>(&self, idx: usize, keyword: &str) -> Result<T, NodeCutError> {
        self.tokens
            .get(idx)
            .and_then(Token::as_word)
            .and_then(|w| w.parse().ok())
            .ok_or_else(|| self.missing(keyword))
    }

    /// Scalar value following `keyword`.
    pub fn value<T: FromStr>(&self, keyword: &str) -> Result<T, NodeCutError> {
        self.optional_value(keyword)?
            .ok_or_else(|| self.missing(keyword))
    }

    /// Scalar value following `keyword`; `None` if the keyword is absent.
    /// A present but malformed value is still an error.
    pub fn optional_value<T: FromStr>(&self, keyword: &str) -> Result<Option<T>, NodeCutError> {
        match self.position(keyword) {
            Some(i) => self.parse_at(i + 1, keyword).map(Some),
            None => Ok(None),
        }
    }

    /// Array following `keyword`: a count, then that many values.
    pub fn list<T: FromStr>(&self, keyword: &str) -> Result<Vec<T>, NodeCutError> {
        self.optional_list(keyword)?
            .ok_or_else(|| self.missing(keyword))
    }

    /// Array following `keyword`; `None` if the keyword is absent.
    pub fn optional_list<T: FromStr>(&self, keyword: &str) -> Result<Option<Vec<T>>, NodeCutError> {
        let Some(i) = self.position(keyword) else {
            return Ok(None);
        };
        let count: usize = self.parse_at(i + 1, keyword)?;
        (0..count)
            .map(|k| self.parse_at(i + 2 + k, keyword))
            .collect::<Result<Vec<T>, _>>()
            .map(Some)
    }
}

/// Significant records of `contents`, with 1-based line numbers.
pub fn records(contents: &str) -> impl Iterator<Item = InputRecord> + '_ {
    contents.lines().enumerate().filter_map(|(i, line)| {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            None
        } else {
            Some(InputRecord::parse(i + 1, line))
        }
    })
}
