//! Conditional fields

use crate::cursor::{ReadCursor, WriteCursor};
use crate::error::Result;
use crate::resolve::Param;
use crate::scope::Scope;
use crate::types::{Type, TypeRef};
use crate::value::Value;

/// `then` when the condition holds, otherwise the `otherwise` type if one
/// was attached, otherwise nothing: no value and zero bytes.
#[derive(Debug, Clone)]
pub struct If {
    condition: Param,
    then: TypeRef,
    otherwise: Option<TypeRef>,
}

/// Conditional type. Attach an else branch with [`If::otherwise`].
pub fn cond(condition: impl Into<Param>, then: TypeRef) -> If {
    If {
        condition: condition.into(),
        then,
        otherwise: None,
    }
}

impl If {
    pub fn otherwise(mut self, ty: TypeRef) -> Self {
        self.otherwise = Some(ty);
        self
    }

    fn branch(&self, scope: &Scope<'_>) -> Result<Option<&TypeRef>> {
        if self.condition.resolve_flag(scope)? {
            Ok(Some(&self.then))
        } else {
            Ok(self.otherwise.as_ref())
        }
    }
}

impl Type for If {
    fn read(&self, cursor: &mut ReadCursor<'_>, scope: &Scope<'_>) -> Result<Value> {
        match self.branch(scope)? {
            Some(ty) => ty.read(cursor, scope),
            None => Ok(Value::Absent),
        }
    }

    fn write(
        &self,
        cursor: &mut WriteCursor<'_>,
        value: &Value,
        scope: &Scope<'_>,
    ) -> Result<()> {
        match self.branch(scope)? {
            Some(ty) => ty.write(cursor, value, scope),
            None => Ok(()),
        }
    }

    fn size(&self, value: &Value, scope: &Scope<'_>) -> Result<usize> {
        match self.branch(scope)? {
            Some(ty) => ty.size(value, scope),
            None => Ok(0),
        }
    }
}
