//! Clamped real values with a fixed range
//!
//! UI sliders hand over integers; each range carries the divisor that maps a
//! slider position to the stored fraction.

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Range and slider scale of a [`Clamped`] value
pub trait Bounds: Copy + fmt::Debug + PartialEq {
    const MIN: f32;
    const MAX: f32;
    /// Slider integer = stored value × divisor
    const SLIDER_DIVISOR: f32;
}

/// A real that always lies in `[B::MIN, B::MAX]`
#[derive(Clone, Copy, PartialEq)]
pub struct Clamped<B: Bounds> {
    value: f32,
    _bounds: PhantomData<B>,
}

impl<B: Bounds> Clamped<B> {
    /// Clamp `value` into range. NaN maps to the minimum.
    pub fn new(value: f32) -> Self {
        let value = if value.is_nan() {
            B::MIN
        } else {
            value.clamp(B::MIN, B::MAX)
        };
        Self {
            value,
            _bounds: PhantomData,
        }
    }

    /// Descale a slider position (e.g. 70 on a 0..100 slider → 0.7)
    pub fn from_slider(position: u32) -> Self {
        Self::new(position as f32 / B::SLIDER_DIVISOR)
    }

    /// Slider position for this value
    pub fn to_slider(self) -> u32 {
        (self.value * B::SLIDER_DIVISOR).round() as u32
    }

    pub fn get(self) -> f32 {
        self.value
    }

    pub fn min() -> Self {
        Self::new(B::MIN)
    }

    pub fn max() -> Self {
        Self::new(B::MAX)
    }
}

impl<B: Bounds> fmt::Debug for Clamped<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.value)
    }
}

impl<B: Bounds> fmt::Display for Clamped<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.value)
    }
}

impl<B: Bounds> From<Clamped<B>> for f32 {
    fn from(v: Clamped<B>) -> Self {
        v.value
    }
}

impl<B: Bounds> Serialize for Clamped<B> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f32(self.value)
    }
}

impl<'de, B: Bounds> Deserialize<'de> for Clamped<B> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f32::deserialize(deserializer).map(Self::new)
    }
}

/// [0, 1] on a 0..100 slider (metalness, roughness)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitRange;

impl Bounds for UnitRange {
    const MIN: f32 = 0.0;
    const MAX: f32 = 1.0;
    const SLIDER_DIVISOR: f32 = 100.0;
}

/// [0, 3] on a 0..30 slider
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightRange;

impl Bounds for LightRange {
    const MIN: f32 = 0.0;
    const MAX: f32 = 3.0;
    const SLIDER_DIVISOR: f32 = 10.0;
}

/// [0, 2] on a 0..20 slider
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientRange;

impl Bounds for AmbientRange {
    const MIN: f32 = 0.0;
    const MAX: f32 = 2.0;
    const SLIDER_DIVISOR: f32 = 10.0;
}

/// [0, 1] on a 0..10 slider
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowRange;

impl Bounds for ShadowRange {
    const MIN: f32 = 0.0;
    const MAX: f32 = 1.0;
    const SLIDER_DIVISOR: f32 = 10.0;
}

pub type Unit = Clamped<UnitRange>;
pub type LightIntensity = Clamped<LightRange>;
pub type AmbientIntensity = Clamped<AmbientRange>;
pub type ShadowOpacity = Clamped<ShadowRange>;
