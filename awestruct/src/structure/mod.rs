//! Struct definitions and the record codec
//!
//! A [`Struct`] is an ordered list of named fields. Decoding walks the
//! fields in order, building a [`Record`] as it goes, so later fields can
//! size themselves from earlier ones. Encoding sizes the whole record
//! first, then writes every field into one exactly-sized buffer.
//!
//! Nested structs see their enclosing struct through [`Scope::parent`],
//! in both directions.

mod builder;

#[cfg(test)]
mod tests;

pub use builder::StructBuilder;

use tracing::{debug, trace};

use crate::config::CodecConfig;
use crate::cursor::{ReadCursor, WriteCursor};
use crate::error::{Result, StructError};
use crate::registry::{Registry, TypeSpec};
use crate::scope::Scope;
use crate::types::{Type, TypeRef};
use crate::value::{Record, Value, mismatch};

static ABSENT: Value = Value::Absent;

#[derive(Debug, Clone)]
struct Field {
    name: String,
    ty: TypeRef,
}

/// Ordered, named fields with resolved types
#[derive(Debug, Clone, Default)]
pub struct Struct {
    fields: Vec<Field>,
}

impl Struct {
    /// Struct with no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a struct whose field types resolve against `registry`.
    pub fn builder(registry: &Registry) -> StructBuilder<'_> {
        StructBuilder::new(registry, Self::new())
    }

    /// Struct from `(name, type)` pairs, in order.
    pub fn from_fields<I, N, S>(registry: &Registry, fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: Into<TypeSpec>,
    {
        fields
            .into_iter()
            .try_fold(Self::builder(registry), |builder, (name, spec)| {
                builder.field(name, spec)
            })
            .map(StructBuilder::build)
    }

    /// Append a field whose type is already resolved.
    pub fn with_field(mut self, name: impl Into<String>, ty: TypeRef) -> Result<Self> {
        self.push(name.into(), ty)?;
        Ok(self)
    }

    /// Continue adding fields to this struct.
    pub fn extend(self, registry: &Registry) -> StructBuilder<'_> {
        StructBuilder::new(registry, self)
    }

    fn push(&mut self, name: String, ty: TypeRef) -> Result<()> {
        if self.fields.iter().any(|f| f.name == name) {
            return Err(StructError::DuplicateField(name));
        }
        self.fields.push(Field { name, ty });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn field_type(&self, name: &str) -> Option<&TypeRef> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.ty)
    }

    /// Decode a record from the start of `buf`. Trailing bytes are ignored.
    pub fn decode(&self, buf: &[u8]) -> Result<Record> {
        self.decode_with(buf, CodecConfig::default_ref())
    }

    pub fn decode_with(&self, buf: &[u8], config: &CodecConfig) -> Result<Record> {
        self.decode_from(&mut ReadCursor::with_config(buf, config))
    }

    /// Decode a record at the cursor, leaving it just past the last field.
    pub fn decode_from(&self, cursor: &mut ReadCursor<'_>) -> Result<Record> {
        let start = cursor.offset();
        let record = self.read_record(cursor, None)?;
        debug!(
            fields = record.len(),
            offset = start,
            bytes = cursor.offset() - start,
            "decoded struct"
        );
        Ok(record)
    }

    /// Encode `record` into a freshly allocated buffer of exactly
    /// [`Struct::encoded_size`] bytes.
    pub fn encode(&self, record: &Record) -> Result<Vec<u8>> {
        self.encode_with(record, CodecConfig::default_ref())
    }

    pub fn encode_with(&self, record: &Record, config: &CodecConfig) -> Result<Vec<u8>> {
        let size = self.record_size(record, None)?;
        let mut buf = vec![0u8; size];
        let mut cursor = WriteCursor::with_config(&mut buf, config);
        self.write_record(&mut cursor, record, None)?;

        let written = cursor.offset();
        if written != size {
            return Err(StructError::SizeMismatch {
                expected: size,
                actual: written,
            });
        }
        debug!(fields = self.fields.len(), bytes = size, "encoded struct");
        Ok(buf)
    }

    /// Number of bytes `encode` would produce for `record`.
    pub fn encoded_size(&self, record: &Record) -> Result<usize> {
        self.record_size(record, None)
    }

    fn read_record(&self, cursor: &mut ReadCursor<'_>, parent: Option<&Scope<'_>>) -> Result<Record> {
        let mut record = Record::with_capacity(self.fields.len());
        for field in &self.fields {
            let offset = cursor.offset();
            let value = field
                .ty
                .read(cursor, &Scope::new(&record, parent))
                .inspect_err(|e| debug!(field = %field.name, offset, error = %e, "field decode failed"))?;
            trace!(field = %field.name, offset, end = cursor.offset(), kind = value.kind(), "read field");
            if !value.is_absent() {
                record.insert(field.name.clone(), value);
            }
        }
        Ok(record)
    }

    fn write_record(
        &self,
        cursor: &mut WriteCursor<'_>,
        record: &Record,
        parent: Option<&Scope<'_>>,
    ) -> Result<()> {
        let scope = Scope::new(record, parent);
        for field in &self.fields {
            let offset = cursor.offset();
            let value = record.get(&field.name).unwrap_or(&ABSENT);
            field
                .ty
                .write(cursor, value, &scope)
                .inspect_err(|e| debug!(field = %field.name, offset, error = %e, "field encode failed"))?;
            trace!(field = %field.name, offset, end = cursor.offset(), "wrote field");
        }
        Ok(())
    }

    fn record_size(&self, record: &Record, parent: Option<&Scope<'_>>) -> Result<usize> {
        let scope = Scope::new(record, parent);
        self.fields.iter().try_fold(0usize, |total, field| {
            let value = record.get(&field.name).unwrap_or(&ABSENT);
            Ok(total + field.ty.size(value, &scope)?)
        })
    }
}

impl Type for Struct {
    fn read(&self, cursor: &mut ReadCursor<'_>, scope: &Scope<'_>) -> Result<Value> {
        Ok(Value::Record(self.read_record(cursor, Some(scope))?))
    }

    fn write(
        &self,
        cursor: &mut WriteCursor<'_>,
        value: &Value,
        scope: &Scope<'_>,
    ) -> Result<()> {
        match value {
            Value::Record(record) => self.write_record(cursor, record, Some(scope)),
            other => Err(mismatch("record", other)),
        }
    }

    fn size(&self, value: &Value, scope: &Scope<'_>) -> Result<usize> {
        match value {
            Value::Record(record) => self.record_size(record, Some(scope)),
            other => Err(mismatch("record", other)),
        }
    }
}
