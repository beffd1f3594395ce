// SPDX-License-Identifier: MIT OR Apache-2.0
//! Single-property tweens.

use crate::easing::Easing;
use crate::error::{ChoreoError, ChoreoResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tween
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TweenId(pub Uuid);

impl TweenId {
    /// Create a new random tween ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TweenId {
    fn default() -> Self {
        Self::new()
    }
}

/// Time-bounded interpolation of one numeric property
///
/// Before `delay_ms` the tween reports `from`, from `delay_ms + duration_ms`
/// onwards it reports `to`.
#[derive(Debug, Clone)]
pub struct Tween {
    id: TweenId,
    property: String,
    from: f32,
    to: f32,
    duration_ms: f64,
    delay_ms: f64,
    easing: Easing,
}

impl Tween {
    /// Create a linear tween with no delay
    pub fn new(property: impl Into<String>, from: f32, to: f32, duration_ms: f64) -> ChoreoResult<Self> {
        Ok(Self {
            id: TweenId::new(),
            property: property.into(),
            from,
            to,
            duration_ms: ChoreoError::check_millis("duration_ms", duration_ms)?,
            delay_ms: 0.0,
            easing: Easing::Linear,
        })
    }

    /// Set the start delay
    pub fn with_delay(mut self, delay_ms: f64) -> ChoreoResult<Self> {
        self.delay_ms = ChoreoError::check_millis("delay_ms", delay_ms)?;
        Ok(self)
    }

    /// Set the easing curve
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Tween ID
    pub fn id(&self) -> TweenId {
        self.id
    }

    /// Animated property name
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Start value
    pub fn from_value(&self) -> f32 {
        self.from
    }

    /// End value
    pub fn to_value(&self) -> f32 {
        self.to
    }

    /// Interpolation time, excluding the delay
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Time before interpolation begins
    pub fn delay_ms(&self) -> f64 {
        self.delay_ms
    }

    /// Easing curve
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Delay plus duration
    pub fn span_ms(&self) -> f64 {
        self.delay_ms + self.duration_ms
    }

    /// Value of the property `elapsed_ms` after the tween's parent started
    ///
    /// A NaN time counts as not started.
    pub fn value_at(&self, elapsed_ms: f64) -> f32 {
        if elapsed_ms.is_nan() || elapsed_ms < self.delay_ms {
            return self.from;
        }
        if elapsed_ms >= self.span_ms() {
            return self.to;
        }
        // Exactly at the start, regardless of what the curve does at 0
        if elapsed_ms == self.delay_ms {
            return self.from;
        }
        let t = ((elapsed_ms - self.delay_ms) / self.duration_ms) as f32;
        self.from + (self.to - self.from) * self.easing.apply(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_values() {
        let tween = Tween::new("opacity", 0.0, 1.0, 1000.0).unwrap();
        assert_eq!(tween.value_at(0.0), 0.0);
        assert!((tween.value_at(500.0) - 0.5).abs() < 1e-6);
        assert_eq!(tween.value_at(1000.0), 1.0);
        assert_eq!(tween.value_at(5000.0), 1.0);
        assert_eq!(tween.value_at(-10.0), 0.0);
    }

    #[test]
    fn test_delay() {
        let tween = Tween::new("textOpacity", 0.0, 1.0, 600.0)
            .unwrap()
            .with_delay(200.0)
            .unwrap();
        assert_eq!(tween.value_at(100.0), 0.0);
        assert_eq!(tween.value_at(200.0), 0.0);
        assert!((tween.value_at(500.0) - 0.5).abs() < 1e-6);
        assert_eq!(tween.value_at(800.0), 1.0);
        assert_eq!(tween.span_ms(), 800.0);
    }

    #[test]
    fn test_endpoints_ignore_easing() {
        let tween = Tween::new("x", 3.0, -7.0, 400.0)
            .unwrap()
            .with_delay(100.0)
            .unwrap()
            .with_easing(Easing::Custom(|_| 0.3));
        assert_eq!(tween.value_at(100.0), 3.0);
        assert_eq!(tween.value_at(500.0), -7.0);
    }

    #[test]
    fn test_zero_duration() {
        let tween = Tween::new("x", 0.0, 5.0, 0.0).unwrap().with_delay(50.0).unwrap();
        assert_eq!(tween.value_at(49.0), 0.0);
        assert_eq!(tween.value_at(50.0), 5.0);
    }

    #[test]
    fn test_monotonic_with_monotonic_easing() {
        let tween = Tween::new("width", 0.0, 0.8, 1000.0)
            .unwrap()
            .with_easing(Easing::EaseInOut);
        let mut prev = tween.value_at(0.0);
        for ms in (0..=1000).step_by(10) {
            let value = tween.value_at(ms as f64);
            assert!(value >= prev);
            prev = value;
        }
    }

    #[test]
    fn test_non_finite_time() {
        let tween = Tween::new("opacity", 0.2, 1.0, 300.0)
            .unwrap()
            .with_delay(100.0)
            .unwrap()
            .with_easing(Easing::EaseOut);
        assert_eq!(tween.value_at(f64::NAN), 0.2);
        assert_eq!(tween.value_at(f64::NEG_INFINITY), 0.2);
        assert_eq!(tween.value_at(f64::INFINITY), 1.0);
    }

    #[test]
    fn test_rejects_negative_parameters() {
        assert!(matches!(
            Tween::new("x", 0.0, 1.0, -1.0),
            Err(ChoreoError::InvalidParameter { name: "duration_ms", .. })
        ));
        assert!(matches!(
            Tween::new("x", 0.0, 1.0, 10.0).unwrap().with_delay(-5.0),
            Err(ChoreoError::InvalidParameter { name: "delay_ms", .. })
        ));
    }
}
