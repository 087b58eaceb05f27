//! Sorted integer sets and the linear merge algebra over them.
//!
//! A [`Set`] is an ascending, duplicate-free sequence of [`NodeIndex`] values.
//! The operators take both operands by reference and always allocate a fresh
//! result, so the per-attribute sets kept by the index can be shared between
//! any number of concurrently evaluated queries.

use std::fmt;
use std::slice::Iter;

// ------------- NodeIndex -------------
pub type NodeIndex = usize;

// ------------- Set -------------
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Set {
    indices: Vec<NodeIndex>,
}

impl Set {
    pub fn new() -> Self {
        Self { indices: Vec::new() }
    }
    /// The contiguous set `{0, 1, ..., n - 1}`.
    pub fn universe(n: usize) -> Self {
        Self {
            indices: (0..n).collect(),
        }
    }
    // Only callers that append in ascending order may use this, which is
    // what the index builder does when it walks records by index.
    pub(crate) fn push(&mut self, index: NodeIndex) {
        debug_assert!(self.indices.last().is_none_or(|last| *last < index));
        self.indices.push(index);
    }
    pub fn len(&self) -> usize {
        self.indices.len()
    }
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
    pub fn contains(&self, index: NodeIndex) -> bool {
        self.indices.binary_search(&index).is_ok()
    }
    pub fn iter(&self) -> Iter<'_, NodeIndex> {
        self.indices.iter()
    }
    pub fn as_slice(&self) -> &[NodeIndex] {
        &self.indices
    }
    pub fn into_vec(self) -> Vec<NodeIndex> {
        self.indices
    }

    /// Every index present in `self` or `other`, each once.
    pub fn union(&self, other: &Set) -> Set {
        union(&self.indices, &other.indices)
    }
    /// Every index present in both `self` and `other`.
    pub fn intersection(&self, other: &Set) -> Set {
        intersection(&self.indices, &other.indices)
    }
    /// Every index of `self` that is not in `other`.
    pub fn difference(&self, other: &Set) -> Set {
        difference(&self.indices, &other.indices)
    }
}

impl FromIterator<NodeIndex> for Set {
    fn from_iter<I: IntoIterator<Item = NodeIndex>>(iter: I) -> Self {
        let mut indices: Vec<NodeIndex> = iter.into_iter().collect();
        indices.sort_unstable();
        indices.dedup();
        Self { indices }
    }
}

impl From<Vec<NodeIndex>> for Set {
    fn from(indices: Vec<NodeIndex>) -> Self {
        indices.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a Set {
    type Item = &'a NodeIndex;
    type IntoIter = Iter<'a, NodeIndex>;
    fn into_iter(self) -> Self::IntoIter {
        self.indices.iter()
    }
}

impl fmt::Display for Set {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut s = String::new();
        for index in &self.indices {
            s += &(index.to_string() + ",");
        }
        s.pop();
        write!(f, "{{{}}}", s)
    }
}

// ------------- Merge algebra -------------
// All three functions expect strictly ascending input. `Set` guarantees
// that by construction, so no sorting happens on the query path.

pub fn union(a: &[NodeIndex], b: &[NodeIndex]) -> Set {
    if a.is_empty() {
        return Set { indices: b.to_vec() };
    }
    if b.is_empty() {
        return Set { indices: a.to_vec() };
    }
    let mut indices = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if a[i] == b[j] {
            indices.push(a[i]);
            i += 1;
            j += 1;
        } else if a[i] < b[j] {
            indices.push(a[i]);
            i += 1;
        } else {
            indices.push(b[j]);
            j += 1;
        }
    }
    indices.extend_from_slice(&a[i..]);
    indices.extend_from_slice(&b[j..]);
    Set { indices }
}

pub fn intersection(a: &[NodeIndex], b: &[NodeIndex]) -> Set {
    let mut indices = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if a[i] == b[j] {
            indices.push(a[i]);
            i += 1;
            j += 1;
        } else if a[i] < b[j] {
            i += 1;
        } else {
            j += 1;
        }
    }
    Set { indices }
}

pub fn difference(a: &[NodeIndex], b: &[NodeIndex]) -> Set {
    if b.is_empty() {
        return Set { indices: a.to_vec() };
    }
    let mut indices = Vec::with_capacity(a.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() {
        if j == b.len() {
            indices.extend_from_slice(&a[i..]);
            break;
        }
        if a[i] == b[j] {
            i += 1;
            j += 1;
        } else if a[i] < b[j] {
            indices.push(a[i]);
            i += 1;
        } else {
            j += 1;
        }
    }
    Set { indices }
}
