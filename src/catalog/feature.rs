//! Optional add-on features offered per model

use serde::{Deserialize, Serialize};

/// One purchasable feature
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSpec {
    /// Stable identifier (e.g., "brass_feet")
    pub id: String,
    /// Display name
    pub name: String,
    /// Flat price added when enabled
    pub price: u32,
}

impl FeatureSpec {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
        }
    }
}
