//! Furniture dimensions and the range each axis may be customized within

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Relative lower limit of a customized dimension
pub const MIN_SCALE: f32 = 0.7;

/// Relative upper limit of a customized dimension
pub const MAX_SCALE: f32 = 1.3;

/// One of the three measured axes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Width,
    Depth,
    Height,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::Width, Axis::Depth, Axis::Height];

    /// Absolute minimum in centimetres, regardless of the model
    pub fn floor(self) -> f32 {
        match self {
            Axis::Width => 50.0,
            Axis::Depth => 40.0,
            Axis::Height => 30.0,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::Width => "width",
            Axis::Depth => "depth",
            Axis::Height => "height",
        })
    }
}

impl FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "width" => Ok(Axis::Width),
            "depth" => Ok(Axis::Depth),
            "height" => Ok(Axis::Height),
            other => Err(format!("unknown axis '{}'", other)),
        }
    }
}

/// Width, depth and height in centimetres
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f32,
    pub depth: f32,
    pub height: f32,
}

impl Dimensions {
    pub const fn new(width: f32, depth: f32, height: f32) -> Self {
        Self { width, depth, height }
    }

    pub fn get(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Width => self.width,
            Axis::Depth => self.depth,
            Axis::Height => self.height,
        }
    }

    pub fn set(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::Width => self.width = value,
            Axis::Depth => self.depth = value,
            Axis::Height => self.height = value,
        }
    }
}

/// Inclusive range an axis may take
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DimensionBounds {
    pub min: f32,
    pub max: f32,
}

impl DimensionBounds {
    /// Bounds for `axis` of a model whose standard size is `standard`
    pub fn for_axis(standard: &Dimensions, axis: Axis) -> Self {
        let reference = standard.get(axis);
        let max = reference * MAX_SCALE;
        let min = (reference * MIN_SCALE).max(axis.floor()).min(max);
        Self { min, max }
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOFA: Dimensions = Dimensions::new(220.0, 95.0, 85.0);

    #[test]
    fn test_get_set() {
        let mut d = SOFA;
        d.set(Axis::Depth, 100.0);
        assert_eq!(d.get(Axis::Depth), 100.0);
        assert_eq!(d.get(Axis::Width), 220.0);
    }

    #[test]
    fn test_bounds_relative_to_standard() {
        let b = DimensionBounds::for_axis(&SOFA, Axis::Width);
        assert!((b.min - 154.0).abs() < 1e-3);
        assert!((b.max - 286.0).abs() < 1e-3);
        assert!(b.contains(200.0));
        assert!(!b.contains(300.0));
    }

    #[test]
    fn test_floor_applies_to_small_models() {
        let chair = Dimensions::new(50.0, 55.0, 80.0);
        let b = DimensionBounds::for_axis(&chair, Axis::Width);
        assert_eq!(b.min, 50.0);
        assert_eq!(b.clamp(20.0), 50.0);
    }

    #[test]
    fn test_floor_never_exceeds_max() {
        let tiny = Dimensions::new(10.0, 10.0, 10.0);
        let b = DimensionBounds::for_axis(&tiny, Axis::Height);
        assert!(b.min <= b.max);
        assert_eq!(b.clamp(100.0), b.max);
    }

    #[test]
    fn test_axis_parse() {
        for axis in Axis::ALL {
            assert_eq!(axis.to_string().parse::<Axis>(), Ok(axis));
        }
        assert!("length".parse::<Axis>().is_err());
    }
}
