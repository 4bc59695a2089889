//! Configuration state and the derivations over it

pub mod bounded;
pub mod dimensions;
pub mod environment;
pub mod material;
pub mod pricing;
pub mod snapshot;
pub mod store;

pub use bounded::{AmbientIntensity, Bounds, Clamped, LightIntensity, ShadowOpacity, Unit};
pub use dimensions::{Axis, DimensionBounds, Dimensions};
pub use environment::{EnvironmentSettings, EnvironmentUpdate};
pub use material::MaterialConfig;
pub use pricing::{PriceBreakdown, CUSTOM_SIZE_SURCHARGE};
pub use snapshot::{ConfigurationSnapshot, MaterialSnapshot, CUSTOM_MATERIAL_NAME};
pub use store::ConfigurationStore;
