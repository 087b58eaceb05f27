//! Tokenization of the query language.
//!
//! Queries are written in infix notation: `(a||b)&&~c=3`. [`tokenize`] scans
//! the text into [`Token`]s and rewrites them with the shunting-yard
//! algorithm into prefix (Polish) order, which [`crate::query::Query::parse`]
//! turns into an expression tree.
//!
//! Because the prefix stream is the reverse of a postfix build, the operands
//! of every binary operator follow it right subtree first, then left subtree.

use std::fmt;

use tracing::trace;

use crate::error::{GendersError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Space,
    LeftParen,
    RightParen,
    Complement,
    Intersection,
    Union,
    Difference,
    Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
    pub fn kind(&self) -> TokenKind {
        self.kind
    }
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

// ------------- Scanner -------------
// Reads two characters at a time and hands back either a two character
// operator or the first of the two characters.
struct Scanner<'q> {
    rest: &'q str,
}

impl<'q> Scanner<'q> {
    const OPERATORS: [&'static str; 3] = ["&&", "||", "--"];

    fn new(query: &'q str) -> Self {
        Self { rest: query }
    }
}

impl<'q> Iterator for Scanner<'q> {
    type Item = &'q str;
    fn next(&mut self) -> Option<&'q str> {
        let first = self.rest.chars().next()?;
        let width = Self::OPERATORS
            .iter()
            .find(|operator| self.rest.starts_with(*operator))
            .map_or(first.len_utf8(), |operator| operator.len());
        let (scanned, rest) = self.rest.split_at(width);
        self.rest = rest;
        Some(scanned)
    }
}

// ------------- Stack -------------
#[derive(Debug, Default)]
struct Stack {
    tokens: Vec<Token>,
}

impl Stack {
    fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }
    fn pop(&mut self) -> Option<Token> {
        self.tokens.pop()
    }
    fn top(&self) -> Option<&Token> {
        self.tokens.last()
    }
    fn top_is(&self, kind: TokenKind) -> bool {
        self.top().is_some_and(|token| token.kind == kind)
    }
}

/// Splits a query into tokens in infix order, without any spaces.
pub fn scan(query: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut buffer = String::new();
    for scanned in Scanner::new(query) {
        let kind = match scanned {
            s if s.chars().all(char::is_whitespace) => TokenKind::Space,
            "||" => TokenKind::Union,
            "&&" => TokenKind::Intersection,
            "--" => TokenKind::Difference,
            "~" => TokenKind::Complement,
            "(" => TokenKind::LeftParen,
            ")" => TokenKind::RightParen,
            _ => {
                buffer.push_str(scanned);
                continue;
            }
        };
        if !buffer.is_empty() {
            tokens.push(Token::new(TokenKind::Value, std::mem::take(&mut buffer)));
        }
        if kind != TokenKind::Space {
            tokens.push(Token::new(kind, scanned));
        }
    }
    if !buffer.is_empty() {
        tokens.push(Token::new(TokenKind::Value, buffer));
    }
    tokens
}

/// Tokenizes a query and rewrites it into prefix order.
pub fn tokenize(query: &str) -> Result<Vec<Token>> {
    let mismatched = || GendersError::MismatchedParentheses {
        query: query.to_string(),
    };
    let mut output = Vec::new();
    let mut operators = Stack::default();
    for token in scan(query) {
        match token.kind {
            TokenKind::Value => output.push(token),
            // resolved by a closing parenthesis or at the end of the stream
            TokenKind::Complement => operators.push(token),
            TokenKind::Union | TokenKind::Intersection | TokenKind::Difference => {
                // one precedence level, left associative
                while operators.top().is_some_and(|top| top.kind != TokenKind::LeftParen) {
                    output.extend(operators.pop());
                }
                operators.push(token);
            }
            TokenKind::LeftParen => operators.push(token),
            TokenKind::RightParen => {
                loop {
                    match operators.pop() {
                        Some(top) if top.kind == TokenKind::LeftParen => break,
                        Some(top) => output.push(top),
                        None => return Err(mismatched()),
                    }
                }
                // ~(...) applies to the whole group
                if operators.top_is(TokenKind::Complement) {
                    output.extend(operators.pop());
                }
            }
            TokenKind::Space => (),
        }
    }
    while let Some(top) = operators.pop() {
        if top.kind == TokenKind::LeftParen {
            return Err(mismatched());
        }
        output.push(top);
    }
    output.reverse();
    trace!(query, tokens = %render(&output), "tokenized query");
    Ok(output)
}

fn render(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::text)
        .collect::<Vec<_>>()
        .join(" ")
}
