//! Named-type registry
//!
//! A [`Registry`] maps names such as `"uint16be"` to types. It is an
//! ordinary value handed to struct construction, not a process-wide
//! singleton: seed one with [`Registry::new`] (all primitives) or
//! [`Registry::from_config`], register extra names, and share it by
//! reference. Registration takes `&mut self`, so concurrent registration
//! needs whatever synchronization the host already uses for its own data.

use std::fmt;

use hashbrown::HashMap;
use tracing::{debug, warn};

use crate::config::CodecConfig;
use crate::error::{Result, StructError};
use crate::resolve::Param;
use crate::structure::{Struct, StructBuilder};
use crate::types::{self, If, Type, TypeRef};

type DeferredFn = dyn FnOnce(&Registry) -> Result<TypeRef>;

/// How a struct field names its type.
///
/// Specs are resolved once, when the field is added to a struct.
pub enum TypeSpec {
    /// Registry name
    Named(String),
    /// A type value (primitive, combinator, nested struct, custom type)
    Inline(TypeRef),
    /// Built from the registry at construction time, e.g. a combinator
    /// whose element type is a registry name
    Deferred(Box<DeferredFn>),
}

impl TypeSpec {
    pub fn deferred<F>(f: F) -> Self
    where
        F: FnOnce(&Registry) -> Result<TypeRef> + 'static,
    {
        TypeSpec::Deferred(Box::new(f))
    }
}

impl fmt::Debug for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSpec::Named(name) => f.debug_tuple("Named").field(name).finish(),
            TypeSpec::Inline(ty) => f.debug_tuple("Inline").field(ty).finish(),
            TypeSpec::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

impl From<&str> for TypeSpec {
    fn from(name: &str) -> Self {
        TypeSpec::Named(name.to_string())
    }
}

impl From<String> for TypeSpec {
    fn from(name: String) -> Self {
        TypeSpec::Named(name)
    }
}

impl From<TypeRef> for TypeSpec {
    fn from(ty: TypeRef) -> Self {
        TypeSpec::Inline(ty)
    }
}

impl From<Struct> for TypeSpec {
    fn from(s: Struct) -> Self {
        TypeSpec::Inline(s.into_ref())
    }
}

impl From<If> for TypeSpec {
    fn from(ty: If) -> Self {
        TypeSpec::Inline(ty.into_ref())
    }
}

/// Name → type table
#[derive(Clone)]
pub struct Registry {
    types: HashMap<String, TypeRef>,
    config: CodecConfig,
}

impl Registry {
    /// Registry with no names at all.
    pub fn empty() -> Self {
        Self {
            types: HashMap::new(),
            config: CodecConfig::default(),
        }
    }

    /// Registry seeded with every primitive.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for (name, ty) in types::primitive::builtins() {
            registry.types.insert(name.to_string(), ty);
        }
        registry
    }

    /// Primitives plus the aliases from `config`, which is kept for
    /// [`Registry::string`] and [`Registry::config`].
    ///
    /// Aliases may name other aliases in any order. A target that never
    /// becomes registered (unknown, or part of a cycle) is `NoSuchType`.
    pub fn from_config(config: CodecConfig) -> Result<Self> {
        let mut registry = Self::new();
        {
            let mut pending: Vec<(&str, &str)> = config
                .aliases
                .iter()
                .map(|(alias, target)| (alias.as_str(), target.as_str()))
                .collect();
            while let Some(&(_, target)) = pending.first() {
                let before = pending.len();
                pending.retain(|&(alias, target)| registry.alias(alias, target).is_err());
                if pending.len() == before {
                    return Err(StructError::NoSuchType(target.to_string()));
                }
            }
        }
        registry.config = config;
        Ok(registry)
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Register `ty` under `name`, returning the type it replaces.
    pub fn register(&mut self, name: impl Into<String>, ty: TypeRef) -> Option<TypeRef> {
        let name = name.into();
        debug!(name = %name, "registering type");
        let previous = self.types.insert(name, ty);
        if previous.is_some() {
            warn!("type registration replaced an existing type");
        }
        previous
    }

    /// Make `alias` another name for the already-registered `target`.
    pub fn alias(&mut self, alias: &str, target: &str) -> Result<()> {
        let ty = self.get(target)?;
        debug!(alias, target, "registering alias");
        self.register(alias, ty);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<TypeRef> {
        self.types
            .get(name)
            .cloned()
            .ok_or_else(|| StructError::NoSuchType(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn resolve(&self, spec: TypeSpec) -> Result<TypeRef> {
        match spec {
            TypeSpec::Named(name) => self.get(&name),
            TypeSpec::Inline(ty) => Ok(ty),
            TypeSpec::Deferred(f) => f(self),
        }
    }

    /// String in the configured default encoding.
    pub fn string(&self, len: impl Into<Param>) -> TypeRef {
        types::string_with(len, self.config.text.default_encoding)
    }

    /// Start a struct whose field types resolve against this registry.
    pub fn define(&self) -> StructBuilder<'_> {
        Struct::builder(self)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("names", &self.names())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Encoding, TypeExt, array};
    use crate::value::Value;

    #[test]
    fn test_seeded_with_primitives() {
        let registry = Registry::new();
        for name in [
            "int8", "uint8", "int16", "uint16", "int32", "uint32", "float", "double", "int16be",
            "uint16be", "int32be", "uint32be", "floatbe", "doublebe", "bool",
        ] {
            assert!(registry.contains(name), "missing {name}");
        }
        assert!(Registry::empty().names().is_empty());
    }

    #[test]
    fn test_unknown_name() {
        let err = Registry::new().get("int128").unwrap_err();
        assert_eq!(err, StructError::NoSuchType("int128".to_string()));
        assert_eq!(err.to_string(), "no such type: \"int128\"");
    }

    #[test]
    fn test_register_and_replace() {
        let mut registry = Registry::new();
        assert!(registry.register("byte", types::uint8()).is_none());
        assert!(registry.register("byte", types::int8()).is_some());

        let byte = registry.get("byte").unwrap();
        assert_eq!(byte.decode_value(&[0xFF]).unwrap(), Value::Int(-1));
    }

    #[test]
    fn test_from_config_aliases() {
        let config = CodecConfig::from_toml_str(
            "[text]\ndefault_encoding = \"hex\"\n[aliases]\nword = \"uint16be\"",
        )
        .unwrap();
        let registry = Registry::from_config(config).unwrap();

        let word = registry.get("word").unwrap();
        assert_eq!(word.decode_value(&[0x01, 0x02]).unwrap(), Value::Int(0x0102));
        assert_eq!(registry.config().text.default_encoding, Encoding::Hex);
        assert_eq!(
            registry.string(2).decode_value(&[0xAB, 0xCD]).unwrap(),
            Value::from("abcd")
        );
    }

    #[test]
    fn test_from_config_alias_chain_in_any_order() {
        let config = CodecConfig::from_toml_str(
            "[aliases]\nword = \"uint16be\"\nas_word = \"word\"\naa = \"as_word\"",
        )
        .unwrap();
        let registry = Registry::from_config(config).unwrap();

        for name in ["word", "as_word", "aa"] {
            let ty = registry.get(name).unwrap();
            assert_eq!(ty.decode_value(&[0x01, 0x02]).unwrap(), Value::Int(0x0102));
        }
    }

    #[test]
    fn test_from_config_alias_cycle() {
        let config =
            CodecConfig::from_toml_str("[aliases]\nping = \"pong\"\npong = \"ping\"").unwrap();
        assert!(matches!(
            Registry::from_config(config),
            Err(StructError::NoSuchType(_))
        ));
    }

    #[test]
    fn test_from_config_unknown_alias_target() {
        let mut config = CodecConfig::default();
        config.aliases.insert("word".to_string(), "uint128".to_string());
        assert_eq!(
            Registry::from_config(config).unwrap_err(),
            StructError::NoSuchType("uint128".to_string())
        );
    }

    #[test]
    fn test_resolve_specs() {
        let registry = Registry::new();

        assert!(registry.resolve(TypeSpec::from("int8")).is_ok());
        assert!(registry.resolve(TypeSpec::from(types::uint8())).is_ok());

        let deferred = TypeSpec::deferred(|reg| Ok(array(2, reg.get("uint8")?)));
        let ty = registry.resolve(deferred).unwrap();
        assert_eq!(
            ty.decode_value(&[4, 5]).unwrap(),
            Value::Array(vec![Value::Int(4), Value::Int(5)])
        );

        let missing = TypeSpec::deferred(|reg| reg.get("nope"));
        assert!(registry.resolve(missing).is_err());
    }
}
