//! Atelier - furniture configurator core
//!
//! A configuration store that derives price and a saved snapshot from the
//! user's selections, and an asset cache that deduplicates concurrent loads.

pub mod core;
pub mod catalog;
pub mod configuration;
pub mod assets;
pub mod session;
