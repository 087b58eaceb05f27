use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{info, warn};

use crate::error::{GendersError, Result};
use crate::parser::Parser;
use crate::query::QueryEngine;
use crate::record::{AttributeHasher, Record};
use crate::set::{NodeIndex, Set};

pub const DEFAULT_GENDERS_PATH: &str = "/etc/genders";

// ------------- Database -------------
// Built once from a genders file, read-only afterwards. Queries only borrow
// the indices, so a database can be shared freely between threads.
#[derive(Debug, Default)]
pub struct Database {
    nodes: Vec<Record>,
    names: HashMap<String, NodeIndex, AttributeHasher>,
    engine: QueryEngine,
}

impl Database {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| GendersError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let database = Self::read(BufReader::new(file), path)?;
        info!(path = %path.display(), nodes = database.len(), "opened genders database");
        Ok(database)
    }

    pub fn from_reader(reader: impl BufRead) -> Result<Self> {
        Self::read(reader, Path::new("-"))
    }

    fn read(reader: impl BufRead, path: &Path) -> Result<Self> {
        let parser = Parser::new();
        let mut records = Vec::new();
        for (number, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| GendersError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            records.extend(parse_line(&parser, number + 1, &line)?);
        }
        Ok(Self::build(records))
    }

    pub fn from_lines<'l>(lines: impl IntoIterator<Item = &'l str>) -> Result<Self> {
        let parser = Parser::new();
        let mut records = Vec::new();
        for (number, line) in lines.into_iter().enumerate() {
            records.extend(parse_line(&parser, number + 1, line)?);
        }
        Ok(Self::build(records))
    }

    /// Assigns indices in order of first appearance, merging the attributes
    /// of records that share a name, then indexes the merged records.
    pub fn build(records: impl IntoIterator<Item = Record>) -> Self {
        let mut nodes: Vec<Record> = Vec::new();
        let mut names: HashMap<String, NodeIndex, AttributeHasher> = HashMap::default();
        for record in records {
            match names.get(record.name()).copied() {
                Some(index) => {
                    let (_, attributes) = record.into_parts();
                    nodes[index].merge(attributes);
                }
                None => {
                    names.insert(record.name().to_string(), nodes.len());
                    nodes.push(record);
                }
            }
        }
        let engine = QueryEngine::new(&nodes);
        info!(
            nodes = nodes.len(),
            attributes = engine.attrs().len(),
            values = engine.attrvals().len(),
            "built genders index"
        );
        Self { nodes, names, engine }
    }

    /// All nodes, in index order.
    pub fn nodes(&self) -> &[Record] {
        &self.nodes
    }
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    pub fn index_of(&self, name: &str) -> Option<NodeIndex> {
        self.names.get(name).copied()
    }
    pub fn node(&self, name: &str) -> Option<&Record> {
        self.index_of(name).map(|index| &self.nodes[index])
    }
    /// The value of an attribute on a node. A flag attribute has an empty
    /// value; an unknown node or key is `None`.
    pub fn node_attr(&self, name: &str, key: &str) -> Option<&str> {
        self.node(name).and_then(|node| node.attribute(key))
    }
    /// Every attribute key known to the database, sorted.
    pub fn attributes(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.engine.attrs().keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
    pub fn universe(&self) -> &Set {
        self.engine.universe()
    }

    pub fn query_indices(&self, query: &str) -> Result<Set> {
        self.engine.query(query)
    }
    /// The nodes matching a query, in index order.
    pub fn query(&self, query: &str) -> Result<Vec<&Record>> {
        let indices = self.engine.query(query)?;
        Ok(indices.iter().map(|&index| &self.nodes[index]).collect())
    }
}

fn parse_line(parser: &Parser, number: usize, line: &str) -> Result<Vec<Record>> {
    parser.parse(line).map_err(|e| {
        warn!(line = number, error = %e, "failed to parse genders line");
        GendersError::Line {
            line: number,
            source: Box::new(e),
        }
    })
}
