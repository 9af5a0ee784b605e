//! Dynamic parameters: literals, field paths and computed values
//!
//! Lengths and conditions of combinators are [`Param`]s. They are resolved
//! against the current [`Scope`] every time a `read`, `write` or `size` call
//! needs them; nothing is cached between calls.
//!
//! Path syntax: any number of leading `../` segments (each one moves to the
//! enclosing struct), followed by dot-separated keys descended from there.
//! Keys index records by field name and arrays by position.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::error::{Result, StructError};
use crate::scope::Scope;
use crate::value::Value;

const PARENT_PREFIX: &str = "../";

/// A parsed field path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    raw: String,
    ascend: usize,
    keys: Vec<String>,
}

impl Path {
    pub fn parse(path: &str) -> Self {
        let mut rest = path;
        let mut ascend = 0;
        while let Some(stripped) = rest.strip_prefix(PARENT_PREFIX) {
            rest = stripped;
            ascend += 1;
        }
        let keys = if rest.is_empty() {
            Vec::new()
        } else {
            rest.split('.').map(str::to_string).collect()
        };

        Self {
            raw: path.to_string(),
            ascend,
            keys,
        }
    }

    /// Number of `../` segments.
    pub fn ascend(&self) -> usize {
        self.ascend
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Walk up `ascend` levels, then descend the keys.
    pub fn resolve<'a>(&self, scope: &Scope<'a>) -> Result<&'a Value> {
        self.walk(scope)?.ok_or_else(|| self.unresolved())
    }

    /// Like [`Path::resolve`], but a missing last key is `None` rather than
    /// an error. Untaken conditionals and skipped fields are never stored,
    /// so this is how a condition sees them as absent.
    pub fn resolve_optional<'a>(&self, scope: &Scope<'a>) -> Result<Option<&'a Value>> {
        self.walk(scope)
    }

    fn walk<'a>(&self, scope: &Scope<'a>) -> Result<Option<&'a Value>> {
        let mut scope = *scope;
        for _ in 0..self.ascend {
            scope = *scope.parent()?;
        }

        let (last, init) = self.keys.split_last().ok_or_else(|| self.unresolved())?;

        let mut container: Option<&'a Value> = None;
        for key in init {
            let next = match container {
                None => scope.get(key),
                Some(value) => value.child(key),
            };
            container = Some(next.ok_or_else(|| self.unresolved())?);
        }
        Ok(match container {
            None => scope.get(last),
            Some(value) => value.child(last),
        })
    }

    fn unresolved(&self) -> StructError {
        StructError::UnresolvedPath(self.raw.clone())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

type ComputeFn = dyn Fn(&Scope<'_>) -> Result<Value> + Send + Sync;

/// A length or condition that may depend on already-decoded fields
#[derive(Clone)]
pub enum Param {
    /// Used unchanged
    Literal(Value),
    /// Looked up in the current struct or an ancestor
    Path(Path),
    /// Computed from the current scope
    Computed(Arc<ComputeFn>),
}

impl Param {
    /// Parameter computed from the scope of the struct being built.
    ///
    /// ```
    /// use awestruct::{Param, Value};
    ///
    /// let remaining = Param::computed(|s| Ok(Value::Int(s.int("len")? - s.int("len2")?)));
    /// # let _ = remaining;
    /// ```
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&Scope<'_>) -> Result<Value> + Send + Sync + 'static,
    {
        Param::Computed(Arc::new(f))
    }

    pub fn path(path: &str) -> Self {
        Param::Path(Path::parse(path))
    }

    pub fn resolve<'a>(&'a self, scope: &Scope<'a>) -> Result<Cow<'a, Value>> {
        match self {
            Param::Literal(v) => Ok(Cow::Borrowed(v)),
            Param::Path(path) => path.resolve(scope).map(Cow::Borrowed),
            Param::Computed(f) => f(scope).map(Cow::Owned),
        }
    }

    /// Resolve as a non-negative count.
    pub fn resolve_len(&self, scope: &Scope<'_>) -> Result<usize> {
        match self {
            Param::Literal(v) => v.as_len(),
            Param::Path(path) => path.resolve(scope)?.as_len(),
            Param::Computed(f) => f(scope)?.as_len(),
        }
    }

    /// Resolve as a condition, using [`Value::is_truthy`]. A path whose
    /// field is absent from the record reads as false.
    pub fn resolve_flag(&self, scope: &Scope<'_>) -> Result<bool> {
        match self {
            Param::Literal(v) => Ok(v.is_truthy()),
            Param::Path(path) => Ok(path
                .resolve_optional(scope)?
                .is_some_and(Value::is_truthy)),
            Param::Computed(f) => Ok(f(scope)?.is_truthy()),
        }
    }
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Literal(v) => f.debug_tuple("Literal").field(v).finish(),
            Param::Path(p) => f.debug_tuple("Path").field(&p.raw).finish(),
            Param::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<&str> for Param {
    fn from(path: &str) -> Self {
        Param::path(path)
    }
}

impl From<String> for Param {
    fn from(path: String) -> Self {
        Param::path(&path)
    }
}

impl From<Path> for Param {
    fn from(path: Path) -> Self {
        Param::Path(path)
    }
}

impl From<bool> for Param {
    fn from(b: bool) -> Self {
        Param::Literal(Value::Bool(b))
    }
}

impl From<Value> for Param {
    fn from(v: Value) -> Self {
        Param::Literal(v)
    }
}

macro_rules! param_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Param {
                fn from(n: $t) -> Self {
                    Param::Literal(Value::Int(n as i64))
                }
            }
        )*
    };
}

param_from_int!(i32, i64, u8, u16, u32, usize);
