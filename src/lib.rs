//! Gendersdb – an in-memory attribute database for cluster nodes.
//!
//! A genders file names the nodes of a cluster and the attributes they carry:
//! ```text
//! # name(s)           attributes
//! mgmt0               mgmt,passwdhost
//! node[1-8]           compute,rack=a,console=%n-con
//! node[3,5]           gpu=a100
//! ```
//! Every line is parsed into one record per expanded node name. Records that
//! share a name are merged, later attribute values winning. The merged records
//! are indexed once, from attribute (`compute`) and attribute with value
//! (`rack=a`) to the ascending set of node positions carrying it.
//!
//! ## Modules
//! * [`set`] – Sorted node index sets and their union, intersection and difference.
//! * [`record`] – The [`record::Record`] type: a node name and its attributes.
//! * [`parser`] – Turns a genders line into records (ranges, escapes, comments).
//! * [`database`] – The [`database::Database`]: merging, indexing and lookups.
//! * [`token`] – Query tokenizer and infix to prefix rewrite.
//! * [`query`] – Query expression tree, its evaluation and the [`query::QueryEngine`].
//! * [`config`] – Layered settings for the binary.
//!
//! ## Query language
//! A value is an attribute (`compute`) or an attribute with a value
//! (`rack=a`). Values combine with `&&` (intersection), `||` (union) and
//! `--` (difference), all at one precedence level and evaluated left to
//! right. A leading `~` takes the complement of the value or parenthesized
//! group it precedes.
//!
//! ## Quick Start
//! ```
//! use gendersdb::Database;
//! let db = Database::from_lines([
//!     "node[1-4] compute,rack=a",
//!     "node[3-5] gpu",
//! ]).unwrap();
//! let names: Vec<&str> = db
//!     .query("compute&&~gpu")
//!     .unwrap()
//!     .into_iter()
//!     .map(|node| node.name())
//!     .collect();
//! assert_eq!(names, vec!["node1", "node2"]);
//! assert_eq!(db.node_attr("node5", "gpu"), Some(""));
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod parser;
pub mod query;
pub mod record;
pub mod set;
pub mod token;

pub use database::{DEFAULT_GENDERS_PATH, Database};
pub use error::{GendersError, Result};
pub use parser::Parser;
pub use query::{Query, QueryEngine};
pub use record::{Attributes, Record};
pub use set::{NodeIndex, Set};
