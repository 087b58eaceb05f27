//! Query expressions and their evaluation against the inverted indices.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::error::Result;
use crate::record::{AttributeHasher, Record};
use crate::set::Set;
use crate::token::{Token, TokenKind, tokenize};

pub type Index = HashMap<String, Set, AttributeHasher>;

// ------------- Query -------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Value(String),
    Union(Box<Query>, Box<Query>),
    Intersection(Box<Query>, Box<Query>),
    Difference(Box<Query>, Box<Query>),
    Complement(Box<Query>),
}

impl Query {
    /// Builds an expression tree from a prefix ordered token stream, as
    /// produced by [`tokenize`]. A stream that runs out of tokens before the
    /// tree is complete yields `None`.
    pub fn parse(tokens: &[Token]) -> Option<Query> {
        let mut tokens = tokens.iter();
        parse_query(&mut tokens)
    }

    /// Reduces the expression to the set of matching node indices. A value
    /// is first looked up as `key=value`, then as a bare attribute key.
    pub fn evaluate(&self, attrs: &Index, attrvals: &Index, universe: &Set) -> Set {
        match self {
            Query::Value(expression) => attrvals
                .get(expression)
                .or_else(|| attrs.get(expression))
                .cloned()
                .unwrap_or_default(),
            Query::Union(left, right) => {
                let left = left.evaluate(attrs, attrvals, universe);
                let right = right.evaluate(attrs, attrvals, universe);
                left.union(&right)
            }
            Query::Intersection(left, right) => {
                let left = left.evaluate(attrs, attrvals, universe);
                let right = right.evaluate(attrs, attrvals, universe);
                left.intersection(&right)
            }
            Query::Difference(left, right) => {
                let left = left.evaluate(attrs, attrvals, universe);
                let right = right.evaluate(attrs, attrvals, universe);
                left.difference(&right)
            }
            Query::Complement(query) => {
                let query = query.evaluate(attrs, attrvals, universe);
                universe.difference(&query)
            }
        }
    }
}

fn parse_query<'t>(tokens: &mut impl Iterator<Item = &'t Token>) -> Option<Query> {
    let token = tokens.next()?;
    let query = match token.kind() {
        TokenKind::Value => Query::Value(token.text().to_string()),
        TokenKind::Complement => Query::Complement(Box::new(parse_query(tokens)?)),
        kind @ (TokenKind::Union | TokenKind::Intersection | TokenKind::Difference) => {
            // the right operand comes first in the stream
            let right = Box::new(parse_query(tokens)?);
            let left = Box::new(parse_query(tokens)?);
            match kind {
                TokenKind::Union => Query::Union(left, right),
                TokenKind::Intersection => Query::Intersection(left, right),
                _ => Query::Difference(left, right),
            }
        }
        TokenKind::Space | TokenKind::LeftParen | TokenKind::RightParen => return None,
    };
    Some(query)
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Query::Value(expression) => write!(f, "{}", expression),
            Query::Union(left, right) => write!(f, "({}||{})", left, right),
            Query::Intersection(left, right) => write!(f, "({}&&{})", left, right),
            Query::Difference(left, right) => write!(f, "({}--{})", left, right),
            Query::Complement(query) => write!(f, "~{}", query),
        }
    }
}

// ------------- QueryEngine -------------
/// The inverted indices over a list of unique records.
#[derive(Debug, Default)]
pub struct QueryEngine {
    attrs: Index,
    attrvals: Index,
    universe: Set,
}

impl QueryEngine {
    /// Indexes the records by position. Names are expected to be unique;
    /// merging duplicates is up to the caller.
    pub fn new(records: &[Record]) -> Self {
        let mut attrs = Index::default();
        let mut attrvals = Index::default();
        // walking in index order keeps every set ascending
        for (index, record) in records.iter().enumerate() {
            for (key, value) in record.attributes() {
                attrs.entry(key.clone()).or_default().push(index);
                if !value.is_empty() {
                    attrvals
                        .entry(format!("{}={}", key, value))
                        .or_default()
                        .push(index);
                }
            }
        }
        Self {
            attrs,
            attrvals,
            universe: Set::universe(records.len()),
        }
    }

    /// Runs a query, returning the ascending indices of the matching records.
    /// An empty query matches nothing.
    pub fn query(&self, query: &str) -> Result<Set> {
        let tokens = tokenize(query)?;
        let result = match Query::parse(&tokens) {
            Some(parsed) => parsed.evaluate(&self.attrs, &self.attrvals, &self.universe),
            None => Set::new(),
        };
        debug!(query, matches = result.len(), "evaluated query");
        Ok(result)
    }

    pub fn attrs(&self) -> &Index {
        &self.attrs
    }
    pub fn attrvals(&self) -> &Index {
        &self.attrvals
    }
    pub fn universe(&self) -> &Set {
        &self.universe
    }
}
