//! The type contract and every built-in type
//!
//! Every field type implements [`Type`]: `read` decodes a value at the
//! cursor, `write` encodes one, and `size` reports how many bytes `write`
//! will consume for a value without touching any cursor. Types are shared
//! as [`TypeRef`] (`Arc<dyn Type>`), so one definition can appear in many
//! structs.
//!
//! # Modules
//!
//! - [`primitive`] - fixed-width numbers and `bool`
//! - `array`, `string`, `buffer`, `cond`, `skip` - combinators built from a
//!   simpler type plus a [`Param`](crate::Param)
//! - `derive` - `transform`/`map` derivations
//! - `custom` - types built from closures

use std::fmt;
use std::sync::Arc;

use crate::cursor::{ReadCursor, WriteCursor};
use crate::error::Result;
use crate::scope::Scope;
use crate::value::Value;

mod array;
mod buffer;
mod cond;
mod custom;
mod derive;
mod encoding;
pub mod primitive;
mod skip;
mod string;


pub use array::{Array, array};
pub use buffer::{RawBytes, buffer};
pub use cond::{If, cond};
pub use custom::Custom;
pub use derive::Derived;
pub use encoding::Encoding;
pub use primitive::{
    Bool, Endian, Number, NumberKind, boolean, double, doublebe, float, floatbe, int8, int16, int16be,
    int32, int32be, uint8, uint16, uint16be, uint32, uint32be,
};
pub use skip::{Skip, skip};
pub use string::{Text, string, string_with};

/// The `{read, write, size}` contract every field type satisfies.
///
/// - `read` must advance the cursor by exactly the bytes it consumes.
/// - `write` must advance the cursor by exactly `size(value)` bytes.
/// - `size` must not have side effects.
///
/// `scope` is the struct the field belongs to (see [`Scope`]).
pub trait Type: fmt::Debug + Send + Sync {
    fn read(&self, cursor: &mut ReadCursor<'_>, scope: &Scope<'_>) -> Result<Value>;

    fn write(&self, cursor: &mut WriteCursor<'_>, value: &Value, scope: &Scope<'_>)
    -> Result<()>;

    fn size(&self, value: &Value, scope: &Scope<'_>) -> Result<usize>;

    /// Box this type up as a shareable [`TypeRef`].
    fn into_ref(self) -> TypeRef
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }
}

/// Shared handle to a type
pub type TypeRef = Arc<dyn Type>;

/// Operations available on every [`TypeRef`].
pub trait TypeExt {
    /// New type whose decoded value is piped through `f`. Writes pass
    /// through to the original type unchanged.
    fn transform<F>(&self, f: F) -> TypeRef
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static;

    /// New type with a decode mapping and its inverse for write and size.
    fn map<D, E>(&self, decode: D, encode: E) -> TypeRef
    where
        D: Fn(Value) -> Result<Value> + Send + Sync + 'static,
        E: Fn(&Value) -> Result<Value> + Send + Sync + 'static;

    /// Read a single value from the start of `buf`, outside any struct.
    fn decode_value(&self, buf: &[u8]) -> Result<Value>;

    /// Encode a single value, outside any struct.
    fn encode_value(&self, value: &Value) -> Result<Vec<u8>>;
}

impl TypeExt for TypeRef {
    fn transform<F>(&self, f: F) -> TypeRef
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        Derived::transform(Arc::clone(self), f).into_ref()
    }

    fn map<D, E>(&self, decode: D, encode: E) -> TypeRef
    where
        D: Fn(Value) -> Result<Value> + Send + Sync + 'static,
        E: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        Derived::invertible(Arc::clone(self), decode, encode).into_ref()
    }

    fn decode_value(&self, buf: &[u8]) -> Result<Value> {
        self.read(&mut ReadCursor::new(buf), &Scope::empty())
    }

    fn encode_value(&self, value: &Value) -> Result<Vec<u8>> {
        let scope = Scope::empty();
        let mut buf = vec![0u8; self.size(value, &scope)?];
        self.write(&mut WriteCursor::new(&mut buf), value, &scope)?;
        Ok(buf)
    }
}
