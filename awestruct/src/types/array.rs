//! Counted arrays of a single element type

use crate::cursor::{ReadCursor, WriteCursor};
use crate::error::{Result, StructError};
use crate::resolve::Param;
use crate::scope::Scope;
use crate::types::{Type, TypeRef};
use crate::value::Value;

/// `len` elements of `element`, back to back.
///
/// The count is resolved once per call. Elements share the enclosing
/// struct's scope, so a struct element sees that struct as its parent.
#[derive(Debug, Clone)]
pub struct Array {
    len: Param,
    element: TypeRef,
}

/// Array of `len` elements; `len` may be a literal, a path or computed.
pub fn array(len: impl Into<Param>, element: TypeRef) -> TypeRef {
    Array::new(len, element).into_ref()
}

impl Array {
    pub fn new(len: impl Into<Param>, element: TypeRef) -> Self {
        Self {
            len: len.into(),
            element,
        }
    }

    fn items<'v>(&self, value: &'v Value, scope: &Scope<'_>) -> Result<&'v [Value]> {
        let expected = self.len.resolve_len(scope)?;
        let items = value.as_array()?;
        if items.len() != expected {
            return Err(StructError::ArrayLengthMismatch {
                expected,
                actual: items.len(),
            });
        }
        Ok(items)
    }
}

impl Type for Array {
    fn read(&self, cursor: &mut ReadCursor<'_>, scope: &Scope<'_>) -> Result<Value> {
        let len = cursor.config().check_len(self.len.resolve_len(scope)?)?;
        let remaining = cursor.remaining();
        let mut items = Vec::with_capacity(len.min(remaining));
        for _ in 0..len {
            let start = cursor.offset();
            items.push(self.element.read(cursor, scope)?);
            // Zero-width elements never run out of input, so the count
            // alone would decide how much is allocated.
            if cursor.offset() == start && len > remaining {
                return Err(StructError::UnboundedArray { len, remaining });
            }
        }
        Ok(Value::Array(items))
    }

    fn write(
        &self,
        cursor: &mut WriteCursor<'_>,
        value: &Value,
        scope: &Scope<'_>,
    ) -> Result<()> {
        for item in self.items(value, scope)? {
            self.element.write(cursor, item, scope)?;
        }
        Ok(())
    }

    /// Sum of every element's own size.
    fn size(&self, value: &Value, scope: &Scope<'_>) -> Result<usize> {
        self.items(value, scope)?
            .iter()
            .map(|item| self.element.size(item, scope))
            .sum()
    }
}
