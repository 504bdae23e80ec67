//! Tiling configuration.
//!
//! Loaded from JSON; every field has a default, so `{}` is a valid
//! configuration.
//!
//! ```json
//! {
//!   "signature": "hyperbolic",
//!   "completion": { "max_steps": 1000000, "max_rules": 4096, "bailout_ms": 5000, "batch_steps": 256 },
//!   "exp_series_order": 24
//! }
//! ```

use crate::error::Result;
use crate::geometry::{Bivector, Isometry, Signature, EXP_SERIES_ORDER};
use crate::rewrite::CompletionConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_signature() -> Signature {
    Signature::Hyperbolic
}

fn default_exp_series_order() -> usize {
    EXP_SERIES_ORDER
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TilingConfig {
    /// Geometry every transform is built in.
    #[serde(default = "default_signature")]
    pub signature: Signature,
    #[serde(default)]
    pub completion: CompletionConfig,
    /// Series terms for bivector exponentials.
    #[serde(default = "default_exp_series_order")]
    pub exp_series_order: usize,
}

impl Default for TilingConfig {
    fn default() -> Self {
        Self {
            signature: default_signature(),
            completion: CompletionConfig::default(),
            exp_series_order: default_exp_series_order(),
        }
    }
}

impl TilingConfig {
    pub fn new(signature: Signature) -> Self {
        Self {
            signature,
            ..Self::default()
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// `exp(b)` in the configured geometry at the configured series order.
    pub fn motor(&self, b: &Bivector) -> Isometry {
        b.exp_with_order(self.signature, self.exp_series_order)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
