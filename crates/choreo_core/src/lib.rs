// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timed animation choreography.
//!
//! This crate plays declarative animation timelines:
//! - Tweens interpolating one numeric property
//! - Sequence and parallel groups with per-node delays
//! - Staggered entrances
//! - Frame-driven runs with tick, listener and completion callbacks
//!
//! ## Architecture
//!
//! Timelines are immutable trees built from three constructors
//! ([`TimelineNode::leaf`], [`TimelineNode::sequence`],
//! [`TimelineNode::parallel`]) and evaluated as pure functions of elapsed
//! time. A [`Choreographer`] owns the runs, turns frame times into elapsed
//! times and delivers the resulting values. The host supplies the clock and
//! applies values to whatever it renders.

pub mod choreographer;
pub mod clock;
pub mod config;
pub mod easing;
pub mod error;
pub mod presets;
pub mod timeline;
pub mod tween;

pub use choreographer::{
    Choreographer, CompleteCallback, ListenerId, PropertyListener, RunCallbacks, RunHandle,
    RunId, RunState, TickCallback,
};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::ChoreographerConfig;
pub use easing::Easing;
pub use error::{ChoreoError, ChoreoResult, ConfigError};
pub use presets::{AnimationPreset, PerformanceTier};
pub use timeline::{NodeKind, PropertyValues, TimelineNode};
pub use tween::{Tween, TweenId};
