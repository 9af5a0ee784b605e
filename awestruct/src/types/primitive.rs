//! Fixed-width primitive types
//!
//! Each primitive is a constant-size pass-through to a byte-order accessor
//! at the cursor offset. Integers decode to [`Value::Int`], floats to
//! [`Value::Float`].
//!
//! | Name | Width | Name (big-endian) |
//! |------|-------|-------------------|
//! | `int8` / `uint8` | 1 | - |
//! | `int16` / `uint16` | 2 | `int16be` / `uint16be` |
//! | `int32` / `uint32` | 4 | `int32be` / `uint32be` |
//! | `float` | 4 | `floatbe` |
//! | `double` | 8 | `doublebe` |
//! | `bool` | 1 | - |

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::cursor::{ReadCursor, WriteCursor};
use crate::error::{Result, StructError};
use crate::scope::Scope;
use crate::types::{Type, TypeRef};
use crate::value::Value;

/// Byte order of a multi-byte primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

/// Numeric primitive kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Float32,
    Float64,
}

impl NumberKind {
    pub const fn width(self) -> usize {
        match self {
            NumberKind::Int8 | NumberKind::UInt8 => 1,
            NumberKind::Int16 | NumberKind::UInt16 => 2,
            NumberKind::Int32 | NumberKind::UInt32 | NumberKind::Float32 => 4,
            NumberKind::Float64 => 8,
        }
    }

    /// Registry name (little-endian spelling)
    pub const fn name(self) -> &'static str {
        match self {
            NumberKind::Int8 => "int8",
            NumberKind::UInt8 => "uint8",
            NumberKind::Int16 => "int16",
            NumberKind::UInt16 => "uint16",
            NumberKind::Int32 => "int32",
            NumberKind::UInt32 => "uint32",
            NumberKind::Float32 => "float",
            NumberKind::Float64 => "double",
        }
    }
}

/// A fixed-width number in a given byte order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Number {
    kind: NumberKind,
    endian: Endian,
}

impl Number {
    pub const fn new(kind: NumberKind, endian: Endian) -> Self {
        Self { kind, endian }
    }

    pub const fn kind(&self) -> NumberKind {
        self.kind
    }

    pub const fn endian(&self) -> Endian {
        self.endian
    }
}

impl Type for Number {
    fn read(&self, cursor: &mut ReadCursor<'_>, _scope: &Scope<'_>) -> Result<Value> {
        let bytes = cursor.take(self.kind.width())?;
        Ok(match self.endian {
            Endian::Little => decode::<LittleEndian>(self.kind, bytes),
            Endian::Big => decode::<BigEndian>(self.kind, bytes),
        })
    }

    fn write(
        &self,
        cursor: &mut WriteCursor<'_>,
        value: &Value,
        _scope: &Scope<'_>,
    ) -> Result<()> {
        let mut bytes = [0u8; 8];
        let out = &mut bytes[..self.kind.width()];
        match self.endian {
            Endian::Little => encode::<LittleEndian>(self.kind, value, out)?,
            Endian::Big => encode::<BigEndian>(self.kind, value, out)?,
        }
        cursor.put(out)
    }

    fn size(&self, _value: &Value, _scope: &Scope<'_>) -> Result<usize> {
        Ok(self.kind.width())
    }
}

fn decode<B: ByteOrder>(kind: NumberKind, b: &[u8]) -> Value {
    match kind {
        NumberKind::Int8 => Value::Int(i64::from(b[0] as i8)),
        NumberKind::UInt8 => Value::Int(i64::from(b[0])),
        NumberKind::Int16 => Value::Int(i64::from(B::read_i16(b))),
        NumberKind::UInt16 => Value::Int(i64::from(B::read_u16(b))),
        NumberKind::Int32 => Value::Int(i64::from(B::read_i32(b))),
        NumberKind::UInt32 => Value::Int(i64::from(B::read_u32(b))),
        NumberKind::Float32 => Value::Float(f64::from(B::read_f32(b))),
        NumberKind::Float64 => Value::Float(B::read_f64(b)),
    }
}

fn encode<B: ByteOrder>(kind: NumberKind, value: &Value, out: &mut [u8]) -> Result<()> {
    match kind {
        NumberKind::Int8 => out[0] = int_in::<i8>(kind, value)? as u8,
        NumberKind::UInt8 => out[0] = int_in::<u8>(kind, value)?,
        NumberKind::Int16 => B::write_i16(out, int_in(kind, value)?),
        NumberKind::UInt16 => B::write_u16(out, int_in(kind, value)?),
        NumberKind::Int32 => B::write_i32(out, int_in(kind, value)?),
        NumberKind::UInt32 => B::write_u32(out, int_in(kind, value)?),
        NumberKind::Float32 => B::write_f32(out, value.as_f64()? as f32),
        NumberKind::Float64 => B::write_f64(out, value.as_f64()?),
    }
    Ok(())
}

fn int_in<T: TryFrom<i64>>(kind: NumberKind, value: &Value) -> Result<T> {
    let n = value.as_i64()?;
    T::try_from(n).map_err(|_| StructError::ValueOutOfRange {
        ty: kind.name(),
        value: n.to_string(),
    })
}

/// One byte; any non-zero byte decodes to `true`, writes 1 or 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bool;

impl Type for Bool {
    fn read(&self, cursor: &mut ReadCursor<'_>, _scope: &Scope<'_>) -> Result<Value> {
        Ok(Value::Bool(cursor.take(1)?[0] != 0))
    }

    fn write(
        &self,
        cursor: &mut WriteCursor<'_>,
        value: &Value,
        _scope: &Scope<'_>,
    ) -> Result<()> {
        cursor.put(&[u8::from(value.is_truthy())])
    }

    fn size(&self, _value: &Value, _scope: &Scope<'_>) -> Result<usize> {
        Ok(1)
    }
}

macro_rules! number_types {
    ($($fn_name:ident => ($kind:ident, $endian:ident)),* $(,)?) => {
        $(
            #[doc = concat!("The `", stringify!($fn_name), "` primitive")]
            pub fn $fn_name() -> TypeRef {
                Number::new(NumberKind::$kind, Endian::$endian).into_ref()
            }
        )*

        /// Every numeric primitive with its registry name.
        pub(crate) fn numbers() -> Vec<(&'static str, TypeRef)> {
            vec![$((stringify!($fn_name), $fn_name())),*]
        }
    };
}

number_types! {
    int8 => (Int8, Little),
    uint8 => (UInt8, Little),
    int16 => (Int16, Little),
    uint16 => (UInt16, Little),
    int32 => (Int32, Little),
    uint32 => (UInt32, Little),
    float => (Float32, Little),
    double => (Float64, Little),
    int16be => (Int16, Big),
    uint16be => (UInt16, Big),
    int32be => (Int32, Big),
    uint32be => (UInt32, Big),
    floatbe => (Float32, Big),
    doublebe => (Float64, Big),
}

/// The `bool` primitive
pub fn boolean() -> TypeRef {
    Bool.into_ref()
}

/// All primitives under their registry names.
pub(crate) fn builtins() -> Vec<(&'static str, TypeRef)> {
    let mut types = numbers();
    types.push(("bool", boolean()));
    types
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeExt;

    #[test]
    fn test_signed_little_endian() {
        assert_eq!(int8().decode_value(&[0xFF]).unwrap(), Value::Int(-1));
        assert_eq!(int16().decode_value(&[0x39, 0x05]).unwrap(), Value::Int(1337));
        assert_eq!(
            int32().decode_value(&[0x00, 0xCA, 0x9A, 0x3B]).unwrap(),
            Value::Int(1_000_000_000)
        );
    }

    #[test]
    fn test_big_endian_variants() {
        assert_eq!(uint16be().decode_value(&[0x05, 0x39]).unwrap(), Value::Int(1337));
        assert_eq!(
            uint32be().encode_value(&Value::Int(0x0102_0304)).unwrap(),
            vec![1, 2, 3, 4]
        );
        assert_eq!(
            uint32().encode_value(&Value::Int(0x0102_0304)).unwrap(),
            vec![4, 3, 2, 1]
        );
    }

    #[test]
    fn test_floats() {
        let bytes = floatbe().encode_value(&Value::Float(1.5)).unwrap();
        assert_eq!(bytes, 1.5f32.to_be_bytes());
        assert_eq!(floatbe().decode_value(&bytes).unwrap(), Value::Float(1.5));

        let bytes = double().encode_value(&Value::Int(2)).unwrap();
        assert_eq!(bytes.len(), 8);
        assert_eq!(double().decode_value(&bytes).unwrap(), Value::Float(2.0));
    }

    #[test]
    fn test_out_of_range_write() {
        assert_eq!(
            uint8().encode_value(&Value::Int(256)),
            Err(StructError::ValueOutOfRange {
                ty: "uint8",
                value: "256".to_string()
            })
        );
        assert!(int8().encode_value(&Value::Int(-128)).is_ok());
        assert!(matches!(
            int16().encode_value(&Value::from("x")),
            Err(StructError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_bool() {
        let ty = boolean();
        assert_eq!(ty.decode_value(&[0]).unwrap(), Value::Bool(false));
        assert_eq!(ty.decode_value(&[7]).unwrap(), Value::Bool(true));
        assert_eq!(ty.encode_value(&Value::Bool(true)).unwrap(), vec![1]);
        assert_eq!(ty.encode_value(&Value::Bool(false)).unwrap(), vec![0]);
    }

    #[test]
    fn test_short_buffer() {
        assert!(matches!(
            int32().decode_value(&[1, 2]),
            Err(StructError::OutOfBounds { needed: 4, .. })
        ));
    }

    #[test]
    fn test_builtin_names() {
        let names: Vec<_> = builtins().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names.len(), 15);
        assert!(names.contains(&"doublebe"));
        assert!(names.contains(&"bool"));
    }
}
