//! Ancestor context for value resolution
//!
//! Every `read`, `write` and `size` call receives the [`Scope`] of the struct
//! it belongs to: that struct's record (in progress while decoding, complete
//! while encoding) and a link to the scope of the enclosing struct. The chain
//! is an immutable linked list on the stack, so nothing is ever attached to
//! the records themselves, and decode and encode see the same shape.

use crate::error::{Result, StructError};
use crate::value::{Record, Value};

static EMPTY_RECORD: Record = Record::new();

/// A struct record plus the chain of enclosing struct records
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    record: &'a Record,
    parent: Option<&'a Scope<'a>>,
}

impl<'a> Scope<'a> {
    pub fn new(record: &'a Record, parent: Option<&'a Scope<'a>>) -> Self {
        Self { record, parent }
    }

    /// Top-level scope with no enclosing struct.
    pub fn root(record: &'a Record) -> Self {
        Self::new(record, None)
    }

    /// Scope for using a type on its own, outside any struct.
    pub fn empty() -> Scope<'static> {
        Scope::root(&EMPTY_RECORD)
    }

    pub fn record(&self) -> &'a Record {
        self.record
    }

    /// Scope of the enclosing struct.
    pub fn parent(&self) -> Result<&'a Scope<'a>> {
        self.parent.ok_or(StructError::NoParent)
    }

    /// Number of enclosing structs.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut scope = self;
        while let Some(parent) = scope.parent {
            depth += 1;
            scope = parent;
        }
        depth
    }

    /// Field of this struct's record.
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.record.get(name)
    }

    /// Resolve a `../`-prefixed, dot-separated path such as `"../header.len"`.
    pub fn lookup(&self, path: &str) -> Result<&'a Value> {
        crate::resolve::Path::parse(path).resolve(self)
    }

    /// Integer field of this struct's record, for computed parameters.
    pub fn int(&self, name: &str) -> Result<i64> {
        self.get(name)
            .ok_or_else(|| StructError::UnresolvedPath(name.to_string()))?
            .as_i64()
    }
}
