//! Fixed- or dynamic-length text

use crate::cursor::{ReadCursor, WriteCursor};
use crate::error::{Result, StructError};
use crate::resolve::Param;
use crate::scope::Scope;
use crate::types::{Encoding, Type, TypeRef};
use crate::value::Value;

/// Text occupying exactly `len` encoded bytes.
#[derive(Debug, Clone)]
pub struct Text {
    len: Param,
    encoding: Encoding,
}

/// UTF-8 string of `len` bytes.
pub fn string(len: impl Into<Param>) -> TypeRef {
    string_with(len, Encoding::Utf8)
}

/// String of `len` bytes in the given encoding.
pub fn string_with(len: impl Into<Param>, encoding: Encoding) -> TypeRef {
    Text::new(len, encoding).into_ref()
}

impl Text {
    pub fn new(len: impl Into<Param>, encoding: Encoding) -> Self {
        Self {
            len: len.into(),
            encoding,
        }
    }
}

impl Type for Text {
    fn read(&self, cursor: &mut ReadCursor<'_>, scope: &Scope<'_>) -> Result<Value> {
        let config = cursor.config();
        let len = config.check_len(self.len.resolve_len(scope)?)?;
        let bytes = cursor.take(len)?;
        self.encoding
            .decode(bytes, config.text.lossy)
            .map(Value::Text)
    }

    fn write(
        &self,
        cursor: &mut WriteCursor<'_>,
        value: &Value,
        scope: &Scope<'_>,
    ) -> Result<()> {
        let expected = self.len.resolve_len(scope)?;
        let bytes = self.encoding.encode(value.as_str()?)?;
        if bytes.len() != expected {
            return Err(StructError::StringLengthMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        cursor.put(&bytes)
    }

    fn size(&self, _value: &Value, scope: &Scope<'_>) -> Result<usize> {
        self.len.resolve_len(scope)
    }
}
