use crate::error::Result;
use crate::registry::{Registry, TypeSpec};

use super::Struct;

/// Adds fields to a [`Struct`], resolving each type spec against a
/// registry as it goes.
///
/// ```
/// use awestruct::{Registry, array};
///
/// let registry = Registry::new();
/// let header = registry
///     .define()
///     .field("count", "uint8")?
///     .field("items", array("count", registry.get("uint16be")?))?
///     .build();
///
/// let record = header.decode(&[2, 0x00, 0x01, 0x00, 0x02])?;
/// assert_eq!(record.get("count").and_then(|v| v.as_i64().ok()), Some(2));
/// # Ok::<(), awestruct::StructError>(())
/// ```
#[derive(Debug)]
pub struct StructBuilder<'r> {
    registry: &'r Registry,
    building: Struct,
}

impl<'r> StructBuilder<'r> {
    pub(super) fn new(registry: &'r Registry, building: Struct) -> Self {
        Self { registry, building }
    }

    /// Append a field. Fails on a repeated name or an unknown type name.
    pub fn field(mut self, name: impl Into<String>, spec: impl Into<TypeSpec>) -> Result<Self> {
        let ty = self.registry.resolve(spec.into())?;
        self.building.push(name.into(), ty)?;
        Ok(self)
    }

    pub fn build(self) -> Struct {
        self.building
    }
}
