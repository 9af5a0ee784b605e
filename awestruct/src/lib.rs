//! Declarative binary record layouts
//!
//! Describe a binary layout once, as an ordered list of named fields, and
//! get both a decoder (bytes → [`Record`]) and an encoder
//! ([`Record`] → bytes) from it.
//!
//! # Features
//!
//! - Little- and big-endian integers and floats, plus `bool`
//! - Arrays, strings and raw buffers whose lengths come from literals,
//!   earlier fields, fields of enclosing structs (`"../len"`), or closures
//! - Conditional fields and padding
//! - Nested structs, derived types (`transform`/`map`) and closure-defined
//!   types
//! - Text encodings: UTF-8, UTF-16LE, Latin-1, ASCII and hex
//! - TOML-configurable defaults and registry aliases
//!
//! # Example
//!
//! ```
//! use awestruct::{Registry, array};
//!
//! let registry = Registry::new();
//! let point = registry
//!     .define()
//!     .field("len", "uint8")?
//!     .field("coords", array("len", registry.get("int16be")?))?
//!     .build();
//!
//! let record = point.decode(&[2, 0x00, 0x07, 0xFF, 0xFE])?;
//! assert_eq!(record.get("coords").unwrap().as_array()?.len(), 2);
//!
//! let bytes = point.encode(&record)?;
//! assert_eq!(bytes, [2, 0x00, 0x07, 0xFF, 0xFE]);
//! # Ok::<(), awestruct::StructError>(())
//! ```

pub mod config;
pub mod cursor;
pub mod error;
pub mod registry;
pub mod resolve;
pub mod scope;
pub mod structure;
pub mod types;
pub mod value;

pub use config::{CodecConfig, LimitConfig, TextConfig};
pub use cursor::{ReadCursor, WriteCursor};
pub use error::{Result, StructError};
pub use registry::{Registry, TypeSpec};
pub use resolve::{Param, Path};
pub use scope::Scope;
pub use structure::{Struct, StructBuilder};
pub use types::{
    Custom, Derived, Encoding, If, Type, TypeExt, TypeRef, array, boolean, buffer, cond, double,
    doublebe, float, floatbe, int8, int16, int16be, int32, int32be, skip, string, string_with,
    uint8, uint16, uint16be, uint32, uint32be,
};
pub use value::{Record, Value};
