//! Codec configuration (TOML)
//!
//! Controls text decoding, decode-time length limits and extra registry
//! aliases. Every field has a default, so an empty document is valid:
//!
//! ```toml
//! [text]
//! default_encoding = "latin1"
//! lossy = true
//!
//! [limits]
//! max_sequence_len = 65536
//!
//! [aliases]
//! word = "uint16be"
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StructError};
use crate::types::Encoding;

static DEFAULT_CONFIG: CodecConfig = CodecConfig::DEFAULT;

/// Codec configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CodecConfig {
    /// Text decoding settings
    #[serde(default)]
    pub text: TextConfig,
    /// Decode-time limits
    #[serde(default)]
    pub limits: LimitConfig,
    /// Extra registry names, `alias = "existing type"`
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

/// Text decoding configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TextConfig {
    /// Encoding used by [`Registry::string`](crate::Registry::string) (default: utf8)
    #[serde(default)]
    pub default_encoding: Encoding,
    /// Replace undecodable text instead of failing (default: false)
    #[serde(default)]
    pub lossy: bool,
}

/// Limits applied while decoding untrusted buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LimitConfig {
    /// Largest array/string/buffer length a decode may resolve (default: unbounded)
    #[serde(default)]
    pub max_sequence_len: Option<usize>,
}

impl CodecConfig {
    /// UTF-8 strict text, no limits, no aliases.
    pub const DEFAULT: CodecConfig = CodecConfig {
        text: TextConfig {
            default_encoding: Encoding::Utf8,
            lossy: false,
        },
        limits: LimitConfig {
            max_sequence_len: None,
        },
        aliases: BTreeMap::new(),
    };

    /// Shared `'static` instance of [`CodecConfig::DEFAULT`].
    pub fn default_ref() -> &'static CodecConfig {
        &DEFAULT_CONFIG
    }

    /// Parse a configuration document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| StructError::Config(e.to_string()))
    }

    /// Render this configuration as a TOML document.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| StructError::Config(e.to_string()))
    }

    /// Check a resolved sequence length against `limits.max_sequence_len`.
    pub fn check_len(&self, len: usize) -> Result<usize> {
        match self.limits.max_sequence_len {
            Some(max) if len > max => Err(StructError::LengthLimitExceeded { len, max }),
            _ => Ok(len),
        }
    }
}
