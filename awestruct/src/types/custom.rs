//! Types defined inline from closures

use std::fmt;

use crate::cursor::{ReadCursor, WriteCursor};
use crate::error::Result;
use crate::scope::Scope;
use crate::types::Type;
use crate::value::Value;

type ReadFn = dyn Fn(&mut ReadCursor<'_>, &Scope<'_>) -> Result<Value> + Send + Sync;
type WriteFn = dyn Fn(&mut WriteCursor<'_>, &Value, &Scope<'_>) -> Result<()> + Send + Sync;
type SizeFn = dyn Fn(&Value, &Scope<'_>) -> Result<usize> + Send + Sync;

/// A type assembled from three closures.
///
/// The closures must keep the contract of [`Type`]; a struct encode that
/// writes a different byte count than `size` reported fails with
/// [`StructError::SizeMismatch`](crate::StructError::SizeMismatch).
///
/// ```
/// use awestruct::{Custom, Type, TypeExt, Value};
///
/// let thousands = Custom::fixed(
///     1,
///     |cursor, _| Ok(Value::Int(i64::from(cursor.take(1)?[0] as i8) * 1000)),
///     |cursor, value, _| cursor.put(&[(value.as_i64()?.div_euclid(1000)) as i8 as u8]),
/// )
/// .into_ref();
///
/// assert_eq!(thousands.decode_value(&[5]).unwrap(), Value::Int(5000));
/// ```
pub struct Custom {
    read: Box<ReadFn>,
    write: Box<WriteFn>,
    size: Box<SizeFn>,
}

impl Custom {
    pub fn new<R, W, S>(read: R, write: W, size: S) -> Self
    where
        R: Fn(&mut ReadCursor<'_>, &Scope<'_>) -> Result<Value> + Send + Sync + 'static,
        W: Fn(&mut WriteCursor<'_>, &Value, &Scope<'_>) -> Result<()> + Send + Sync + 'static,
        S: Fn(&Value, &Scope<'_>) -> Result<usize> + Send + Sync + 'static,
    {
        Self {
            read: Box::new(read),
            write: Box::new(write),
            size: Box::new(size),
        }
    }

    /// Custom type that always occupies `width` bytes.
    pub fn fixed<R, W>(width: usize, read: R, write: W) -> Self
    where
        R: Fn(&mut ReadCursor<'_>, &Scope<'_>) -> Result<Value> + Send + Sync + 'static,
        W: Fn(&mut WriteCursor<'_>, &Value, &Scope<'_>) -> Result<()> + Send + Sync + 'static,
    {
        Self::new(read, write, move |_, _| Ok(width))
    }
}

impl Type for Custom {
    fn read(&self, cursor: &mut ReadCursor<'_>, scope: &Scope<'_>) -> Result<Value> {
        (self.read)(cursor, scope)
    }

    fn write(
        &self,
        cursor: &mut WriteCursor<'_>,
        value: &Value,
        scope: &Scope<'_>,
    ) -> Result<()> {
        (self.write)(cursor, value, scope)
    }

    fn size(&self, value: &Value, scope: &Scope<'_>) -> Result<usize> {
        (self.size)(value, scope)
    }
}

impl fmt::Debug for Custom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Custom")
    }
}
