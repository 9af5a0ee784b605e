//! Derived types: an existing type with its values mapped

use std::fmt;

use crate::cursor::{ReadCursor, WriteCursor};
use crate::error::Result;
use crate::scope::Scope;
use crate::types::{Type, TypeRef};
use crate::value::Value;

type DecodeFn = dyn Fn(Value) -> Result<Value> + Send + Sync;
type EncodeFn = dyn Fn(&Value) -> Result<Value> + Send + Sync;

/// A type wrapping another, mapping decoded values (and optionally
/// mapping values back before they are written).
///
/// The wrapped type is shared, never modified; deriving from a derived
/// type chains the mappings.
pub struct Derived {
    inner: TypeRef,
    decode: Box<DecodeFn>,
    encode: Option<Box<EncodeFn>>,
}

impl Derived {
    /// Read-side mapping only. Writes and sizes use the value as given.
    pub fn transform<D>(inner: TypeRef, decode: D) -> Self
    where
        D: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            inner,
            decode: Box::new(decode),
            encode: None,
        }
    }

    /// Mapping in both directions.
    pub fn invertible<D, E>(inner: TypeRef, decode: D, encode: E) -> Self
    where
        D: Fn(Value) -> Result<Value> + Send + Sync + 'static,
        E: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            inner,
            decode: Box::new(decode),
            encode: Some(Box::new(encode)),
        }
    }
}

impl Type for Derived {
    fn read(&self, cursor: &mut ReadCursor<'_>, scope: &Scope<'_>) -> Result<Value> {
        (self.decode)(self.inner.read(cursor, scope)?)
    }

    fn write(
        &self,
        cursor: &mut WriteCursor<'_>,
        value: &Value,
        scope: &Scope<'_>,
    ) -> Result<()> {
        match &self.encode {
            Some(encode) => self.inner.write(cursor, &encode(value)?, scope),
            None => self.inner.write(cursor, value, scope),
        }
    }

    fn size(&self, value: &Value, scope: &Scope<'_>) -> Result<usize> {
        match &self.encode {
            Some(encode) => self.inner.size(&encode(value)?, scope),
            None => self.inner.size(value, scope),
        }
    }
}

impl fmt::Debug for Derived {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Derived")
            .field("inner", &self.inner)
            .field("invertible", &self.encode.is_some())
            .finish()
    }
}
