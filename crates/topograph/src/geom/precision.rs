//! Precision models: the grid that computed coordinates are snapped onto.

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Shared precision model of a geometry factory (read-only during overlay).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum PrecisionModel {
    /// Full double precision; `make_precise` is the identity.
    #[default]
    Floating,
    /// Single precision; values are rounded through `f32`.
    FloatingSingle,
    /// Fixed grid of `1/scale` units.
    Fixed { scale: f64 },
}

impl PrecisionModel {
    pub fn fixed(scale: f64) -> Self {
        Self::Fixed { scale }
    }

    pub fn is_floating(&self) -> bool {
        !matches!(self, Self::Fixed { .. })
    }

    /// Round a single ordinate to this model.
    pub fn make_precise_value(&self, v: f64) -> f64 {
        if v.is_nan() {
            return v;
        }
        match *self {
            Self::Floating => v,
            Self::FloatingSingle => v as f32 as f64,
            // Round half up, matching the usual grid convention.
            Self::Fixed { scale } => (v * scale + 0.5).floor() / scale,
        }
    }

    /// Snap x/y of `c` onto the grid; z/m are untouched.
    pub fn make_precise(&self, c: &mut Coordinate) {
        if matches!(self, Self::Floating) {
            return;
        }
        c.x = self.make_precise_value(c.x);
        c.y = self.make_precise_value(c.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_rounds_half_up() {
        let pm = PrecisionModel::fixed(10.0);
        assert_eq!(pm.make_precise_value(1.25), 1.3);
        assert_eq!(pm.make_precise_value(-1.25), -1.2);
        let mut c = Coordinate::new(0.123, 4.56);
        pm.make_precise(&mut c);
        assert_eq!(c, Coordinate::new(0.1, 4.6));
    }

    #[test]
    fn floating_is_identity() {
        let mut c = Coordinate::new(0.1 + 0.2, 1.0 / 3.0);
        let before = c;
        PrecisionModel::Floating.make_precise(&mut c);
        assert_eq!(c, before);
        assert!(PrecisionModel::default().is_floating());
    }
}
