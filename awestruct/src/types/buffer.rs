//! Raw byte ranges

use crate::cursor::{ReadCursor, WriteCursor};
use crate::error::{Result, StructError};
use crate::resolve::Param;
use crate::scope::Scope;
use crate::types::{Type, TypeRef};
use crate::value::Value;

/// `len` bytes copied out verbatim as [`Value::Bytes`].
#[derive(Debug, Clone)]
pub struct RawBytes {
    len: Param,
}

pub fn buffer(len: impl Into<Param>) -> TypeRef {
    RawBytes { len: len.into() }.into_ref()
}

impl Type for RawBytes {
    fn read(&self, cursor: &mut ReadCursor<'_>, scope: &Scope<'_>) -> Result<Value> {
        let len = cursor.config().check_len(self.len.resolve_len(scope)?)?;
        Ok(Value::Bytes(cursor.take(len)?.to_vec()))
    }

    fn write(
        &self,
        cursor: &mut WriteCursor<'_>,
        value: &Value,
        scope: &Scope<'_>,
    ) -> Result<()> {
        let expected = self.len.resolve_len(scope)?;
        let bytes = value.as_bytes()?;
        if bytes.len() != expected {
            return Err(StructError::BufferLengthMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        cursor.put(bytes)
    }

    fn size(&self, _value: &Value, scope: &Scope<'_>) -> Result<usize> {
        self.len.resolve_len(scope)
    }
}
