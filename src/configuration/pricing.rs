//! Price derivation

use serde::{Deserialize, Serialize};

use super::store::ConfigurationStore;

/// Flat multiplier applied once when any dimension is non-standard
pub const CUSTOM_SIZE_SURCHARGE: f64 = 1.10;

/// The steps that make up a price, in application order
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub base_price: u32,
    /// 1.0 when the primary color matches no catalog material
    pub material_multiplier: f64,
    /// Sum of the enabled features the model offers
    pub features_total: u32,
    pub custom_size: bool,
    /// Rounded final price
    pub total: u32,
}

impl ConfigurationStore {
    /// Work out the price of the current configuration.
    ///
    /// `round((base × multiplier + features) × surcharge)`, with no
    /// intermediate rounding. The surcharge applies once however many axes
    /// differ from the standard size.
    pub fn price_breakdown(&self) -> PriceBreakdown {
        let catalog = self.catalog();
        let model = self.selected_model();

        let base_price = catalog.base_price(model);
        let material_multiplier = catalog
            .material_by_color(self.material().primary_color)
            .map_or(1.0, |m| catalog.group_multiplier(m.group));
        let features_total = self
            .enabled_features()
            .iter()
            .filter_map(|id| catalog.feature(model, id))
            .fold(0u32, |total, f| total.saturating_add(f.price));
        let custom_size = self.is_custom_size();

        let mut price = base_price as f64 * material_multiplier;
        price += features_total as f64;
        if custom_size {
            price *= CUSTOM_SIZE_SURCHARGE;
        }

        PriceBreakdown {
            base_price,
            material_multiplier,
            features_total,
            custom_size,
            total: price.round() as u32,
        }
    }

    /// Total price; a pure function of the current state
    pub fn compute_price(&self) -> u32 {
        self.price_breakdown().total
    }
}
