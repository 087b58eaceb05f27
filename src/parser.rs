//! Parsing of genders configuration lines into node records.
//!
//! A line has the shape `names [attributes] # comment` where
//! * `names` is a comma separated list of node names, each of which may
//!   carry one bracketed range, as in `node[1-4,7]-ib`.
//! * `attributes` is a comma separated list of `key` or `key=value` entries.
//!   Values may reference the node name through `%n`, and `%%` yields a
//!   literal percent sign.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{GendersError, Result};
use crate::record::{Attributes, Record};

const COMMENT: char = '#';
const SEPARATOR: char = ',';
// Upper bound on the names a single bracketed range may expand to.
pub const MAX_RANGE_SIZE: u64 = 1 << 20;

lazy_static! {
    // prefix[range]suffix, where the range holds no brackets of its own
    static ref RANGED_NAME: Regex = Regex::new(r"^([^\[\]]*)\[([^\[\]]*)\](.*)$").unwrap();
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Parser;

impl Parser {
    pub fn new() -> Self {
        Self
    }

    /// Parses one line into zero or more records, one per expanded node name.
    /// Every record gets its own copy of the attributes.
    pub fn parse(&self, line: &str) -> Result<Vec<Record>> {
        let line = match line.split_once(COMMENT) {
            Some((content, _comment)) => content,
            None => line,
        };
        let mut fields = line.split_whitespace();
        let names = match fields.next() {
            Some(field) => self.parse_names(field)?,
            None => return Ok(Vec::new()),
        };
        let attributes = fields
            .next()
            .map(|field| self.parse_attributes(field))
            .unwrap_or_default();

        let records = names
            .into_iter()
            .map(|name| {
                let attributes = substitute_attributes(&attributes, &name);
                Record::new(name, attributes)
            })
            .collect();
        Ok(records)
    }

    fn parse_attributes(&self, field: &str) -> Attributes {
        let mut attributes = Attributes::default();
        for attribute in field.split(SEPARATOR) {
            let (key, value) = attribute.split_once('=').unwrap_or((attribute, ""));
            attributes.insert(key.to_string(), value.to_string());
        }
        attributes
    }

    fn parse_names(&self, field: &str) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for segment in split_outside_brackets(field)? {
            names.extend(self.parse_name(segment)?);
        }
        Ok(names)
    }

    fn parse_name(&self, segment: &str) -> Result<Vec<String>> {
        let captures = match RANGED_NAME.captures(segment) {
            Some(captures) => captures,
            None => match segment.find(['[', ']']) {
                Some(bracket) => {
                    return Err(GendersError::Range {
                        field: segment.to_string(),
                        range: segment[bracket..].to_string(),
                    });
                }
                None => return Ok(vec![segment.to_string()]),
            },
        };
        let (prefix, range, suffix) = (&captures[1], &captures[2], &captures[3]);
        let indices = parse_range(range).ok_or_else(|| GendersError::Range {
            field: segment.to_string(),
            range: range.to_string(),
        })?;
        Ok(indices
            .into_iter()
            .map(|index| format!("{}{}{}", prefix, index, suffix))
            .collect())
    }
}

// Splits on commas that are not inside a bracketed range. Empty segments,
// as produced by `a,,b` or a trailing comma, are dropped. A bracket left
// open at the end of the field is an error.
fn split_outside_brackets(field: &str) -> Result<Vec<&str>> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut opened = 0;
    for (position, c) in field.char_indices() {
        match c {
            '[' => {
                if depth == 0 {
                    opened = position;
                }
                depth += 1;
            }
            ']' => depth = depth.saturating_sub(1),
            SEPARATOR if depth == 0 => {
                segments.push(&field[start..position]);
                start = position + c.len_utf8();
            }
            _ => (),
        }
    }
    if depth > 0 {
        return Err(GendersError::Range {
            field: field.to_string(),
            range: field[opened..].to_string(),
        });
    }
    segments.push(&field[start..]);
    segments.retain(|segment| !segment.is_empty());
    Ok(segments)
}

// Expands `1-3,7` into 1, 2, 3, 7. Leading zeros do not survive the round
// trip through an integer. A reversed span expands to nothing. Ranges
// expanding to more than MAX_RANGE_SIZE names are rejected.
fn parse_range(range: &str) -> Option<Vec<u64>> {
    let mut indices = Vec::new();
    for span in range.split(SEPARATOR) {
        match span.split_once('-') {
            Some((start, end)) => {
                let first = start.parse::<u64>().ok()?;
                let last = end.parse::<u64>().ok()?;
                let size = last.saturating_sub(first).saturating_add(1);
                if first <= last && indices.len() as u64 + size > MAX_RANGE_SIZE {
                    return None;
                }
                indices.extend(first..=last);
            }
            None => indices.push(span.parse::<u64>().ok()?),
        }
    }
    Some(indices)
}

fn substitute_attributes(attributes: &Attributes, name: &str) -> Attributes {
    attributes
        .iter()
        .map(|(key, value)| {
            let value = if value.contains('%') {
                substitute(value, name)
            } else {
                value.clone()
            };
            (key.clone(), value)
        })
        .collect()
}

/// Replaces `%n` with the node name and `%%` with `%`, scanning left to right.
pub fn substitute(value: &str, name: &str) -> String {
    let mut substituted = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '%' {
            match chars.peek() {
                Some('n') => {
                    chars.next();
                    substituted.push_str(name);
                    continue;
                }
                Some('%') => {
                    chars.next();
                    substituted.push('%');
                    continue;
                }
                _ => (),
            }
        }
        substituted.push(c);
    }
    substituted
}
