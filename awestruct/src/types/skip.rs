//! Padding

use crate::cursor::{ReadCursor, WriteCursor};
use crate::error::Result;
use crate::scope::Scope;
use crate::types::{Type, TypeRef};
use crate::value::Value;

/// A fixed number of bytes that carry no value. Encoding leaves them zeroed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skip {
    len: usize,
}

pub fn skip(len: usize) -> TypeRef {
    Skip { len }.into_ref()
}

impl Type for Skip {
    fn read(&self, cursor: &mut ReadCursor<'_>, _scope: &Scope<'_>) -> Result<Value> {
        cursor.skip(self.len)?;
        Ok(Value::Absent)
    }

    fn write(
        &self,
        cursor: &mut WriteCursor<'_>,
        _value: &Value,
        _scope: &Scope<'_>,
    ) -> Result<()> {
        cursor.skip(self.len)
    }

    fn size(&self, _value: &Value, _scope: &Scope<'_>) -> Result<usize> {
        Ok(self.len)
    }
}
