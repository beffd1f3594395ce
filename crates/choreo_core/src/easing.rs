// SPDX-License-Identifier: MIT OR Apache-2.0
//! Easing curves applied to normalized tween progress.

use crate::error::{ChoreoError, ChoreoResult};
use serde::{Deserialize, Serialize};

/// Shaping function mapping linear progress in `[0, 1]` to eased progress
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub enum Easing {
    /// Constant speed
    #[default]
    Linear,
    /// Cubic acceleration
    EaseIn,
    /// Cubic deceleration
    EaseOut,
    /// Cubic acceleration then deceleration
    EaseInOut,
    /// Quadratic acceleration
    QuadIn,
    /// Quadratic deceleration
    QuadOut,
    /// Quadratic acceleration then deceleration
    QuadInOut,
    /// CSS-style cubic bezier with control points `(x1, y1)` and `(x2, y2)`
    ///
    /// `x1` and `x2` outside `[0, 1]` are clamped when evaluated; use
    /// [`Easing::cubic_bezier`] to reject them instead.
    CubicBezier(f32, f32, f32, f32),
    /// Caller-supplied curve
    #[serde(skip)]
    Custom(fn(f32) -> f32),
}

impl Easing {
    /// CSS `ease`
    pub const EASE: Easing = Easing::CubicBezier(0.25, 0.1, 0.25, 1.0);

    /// Cubic bezier with checked control points
    ///
    /// `x1` and `x2` must lie in `[0, 1]` so that x grows with the curve
    /// parameter; `y1` and `y2` may overshoot but must be finite.
    pub fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32) -> ChoreoResult<Self> {
        for (name, x) in [("x1", x1), ("x2", x2)] {
            if !(0.0..=1.0).contains(&x) {
                return Err(ChoreoError::InvalidParameter { name, value: f64::from(x) });
            }
        }
        for (name, y) in [("y1", y1), ("y2", y2)] {
            if !y.is_finite() {
                return Err(ChoreoError::InvalidParameter { name, value: f64::from(y) });
            }
        }
        Ok(Easing::CubicBezier(x1, y1, x2, y2))
    }

    /// Evaluate the curve at `t`, clamped to `[0, 1]`
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => {
                let t1 = t - 1.0;
                t1 * t1 * t1 + 1.0
            }
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let t1 = 2.0 * t - 2.0;
                    0.5 * t1 * t1 * t1 + 1.0
                }
            }
            Easing::QuadIn => t * t,
            Easing::QuadOut => t * (2.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => {
                let s = solve_bezier_x(x1.clamp(0.0, 1.0), x2.clamp(0.0, 1.0), t);
                bezier(0.0, y1, y2, 1.0, s)
            }
            Easing::Custom(f) => f(t),
        }
    }
}

/// One-dimensional cubic bezier through `p0..p3`
fn bezier(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    let mt3 = mt2 * mt;

    p0 * mt3 + 3.0 * p1 * mt2 * t + 3.0 * p2 * mt * t2 + p3 * t3
}

/// Find the curve parameter whose x coordinate equals `x`
fn solve_bezier_x(x1: f32, x2: f32, x: f32) -> f32 {
    const EPSILON: f32 = 1e-6;

    // Newton-Raphson first, it converges in a few steps for sane control points
    let mut s = x;
    for _ in 0..8 {
        let err = bezier(0.0, x1, x2, 1.0, s) - x;
        if err.abs() < EPSILON {
            return s;
        }
        let mt = 1.0 - s;
        let slope = 3.0 * mt * mt * x1 + 6.0 * mt * s * (x2 - x1) + 3.0 * s * s * (1.0 - x2);
        if slope.abs() < EPSILON {
            break;
        }
        s -= err / slope;
    }

    // Bisection fallback for flat regions
    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    s = x;
    for _ in 0..32 {
        let value = bezier(0.0, x1, x2, 1.0, s);
        if (value - x).abs() < EPSILON {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = 0.5 * (lo + hi);
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 8] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::QuadIn,
        Easing::QuadOut,
        Easing::QuadInOut,
        Easing::EASE,
    ];

    #[test]
    fn test_endpoints() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-4, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-4, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_monotonic() {
        for easing in ALL {
            let mut prev = easing.apply(0.0);
            for i in 1..=100 {
                let value = easing.apply(i as f32 / 100.0);
                assert!(value + 1e-4 >= prev, "{easing:?} decreased at step {i}");
                prev = value;
            }
        }
    }

    #[test]
    fn test_shapes() {
        assert!((Easing::Linear.apply(0.25) - 0.25).abs() < f32::EPSILON);
        assert!(Easing::EaseIn.apply(0.5) < 0.5);
        assert!(Easing::EaseOut.apply(0.5) > 0.5);
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((Easing::QuadInOut.apply(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_linear_bezier_matches_linear() {
        let easing = Easing::CubicBezier(0.0, 0.0, 1.0, 1.0);
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!((easing.apply(t) - t).abs() < 1e-3);
        }
    }

    #[test]
    fn test_cubic_bezier_checks_x() {
        assert!(Easing::cubic_bezier(0.42, 0.0, 0.58, 1.0).is_ok());
        assert!(Easing::cubic_bezier(0.3, -0.5, 0.7, 1.6).is_ok());
        assert!(matches!(
            Easing::cubic_bezier(1.5, 0.0, 0.5, 1.0),
            Err(ChoreoError::InvalidParameter { name: "x1", .. })
        ));
        assert!(matches!(
            Easing::cubic_bezier(0.5, 0.0, -0.1, 1.0),
            Err(ChoreoError::InvalidParameter { name: "x2", .. })
        ));
        assert!(Easing::cubic_bezier(f32::NAN, 0.0, 0.5, 1.0).is_err());
        assert!(Easing::cubic_bezier(0.5, f32::INFINITY, 0.5, 1.0).is_err());
    }

    #[test]
    fn test_out_of_range_x_is_clamped() {
        let wild = Easing::CubicBezier(-2.0, 0.0, 3.0, 1.0);
        let clamped = Easing::CubicBezier(0.0, 0.0, 1.0, 1.0);
        let mut prev = wild.apply(0.0);
        for i in 0..=20 {
            let t = i as f32 / 20.0;
            let value = wild.apply(t);
            assert!((value - clamped.apply(t)).abs() < 1e-6);
            assert!(value + 1e-4 >= prev);
            prev = value;
        }
    }

    #[test]
    fn test_clamps_input() {
        assert_eq!(Easing::Linear.apply(-0.5), 0.0);
        assert_eq!(Easing::Linear.apply(1.5), 1.0);
    }

    #[test]
    fn test_custom() {
        let easing = Easing::Custom(|t| t * t);
        assert!((easing.apply(0.5) - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_serialization() {
        let ron_str = ron::to_string(&Easing::CubicBezier(0.42, 0.0, 0.58, 1.0)).unwrap();
        let loaded: Easing = ron::from_str(&ron_str).unwrap();
        assert!(matches!(loaded, Easing::CubicBezier(x1, _, _, _) if (x1 - 0.42).abs() < 1e-6));
        assert!(ron::to_string(&Easing::Custom(|t| t)).is_err());
    }
}
