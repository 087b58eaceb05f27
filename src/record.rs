use core::hash::BuildHasherDefault;
use std::collections::HashMap;
use std::fmt;

use seahash::SeaHasher;
use serde::Serialize;

pub type AttributeHasher = BuildHasherDefault<SeaHasher>;

// An empty value marks a flag attribute: present, but without a value.
pub type Attributes = HashMap<String, String, AttributeHasher>;

// ------------- Record -------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    name: String,
    attributes: Attributes,
}

impl Record {
    pub fn new(name: String, attributes: Attributes) -> Self {
        Self { name, attributes }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
    pub fn into_parts(self) -> (String, Attributes) {
        (self.name, self.attributes)
    }
    // Later occurrences of a node win on key collision; keys only the
    // earlier occurrence carried are retained.
    pub(crate) fn merge(&mut self, attributes: Attributes) {
        self.attributes.extend(attributes);
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut pairs: Vec<String> = self
            .attributes
            .iter()
            .map(|(key, value)| {
                if value.is_empty() {
                    key.clone()
                } else {
                    format!("{}={}", key, value)
                }
            })
            .collect();
        pairs.sort_unstable();
        if pairs.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} {}", self.name, pairs.join(","))
        }
    }
}
