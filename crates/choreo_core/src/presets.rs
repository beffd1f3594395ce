// SPDX-License-Identifier: MIT OR Apache-2.0
//! Ready-made choreographies for the splash, onboarding, roster and settings screens.

use crate::error::ChoreoResult;
use crate::timeline::TimelineNode;
use serde::{Deserialize, Serialize};

/// Highest performance rating
pub const MAX_SCORE: u8 = 5;

/// Logo opacity in the onboarding intro
pub const LOGO_OPACITY: &str = "logo.opacity";
/// Logo vertical offset in the onboarding intro
pub const LOGO_TRANSLATE_Y: &str = "logo.translateY";
/// Title opacity in the onboarding intro
pub const TITLE_OPACITY: &str = "title.opacity";
/// Next-button opacity in the onboarding intro
pub const BUTTON_OPACITY: &str = "button.opacity";

/// Distance entry presets slide in from
const ENTRY_OFFSET: f32 = 100.0;

/// Common entry/exit animations on `{prefix}.opacity` and a translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationPreset {
    /// Opacity 0 to 1
    FadeIn,
    /// Opacity 1 to 0
    FadeOut,
    /// Fade in while rising from below
    FadeInUp,
    /// Fade in while dropping from above
    FadeInDown,
    /// Fade in while sliding from the left
    FadeInLeft,
}

impl AnimationPreset {
    /// Build the preset for the element named `prefix`
    pub fn build(self, prefix: &str, duration_ms: f64) -> ChoreoResult<TimelineNode> {
        let opacity = format!("{prefix}.opacity");
        let mut children = match self {
            AnimationPreset::FadeOut => vec![TimelineNode::leaf(opacity, 1.0, 0.0, duration_ms)?],
            _ => vec![TimelineNode::leaf(opacity, 0.0, 1.0, duration_ms)?],
        };

        let slide = match self {
            AnimationPreset::FadeIn | AnimationPreset::FadeOut => None,
            AnimationPreset::FadeInUp => Some(("translateY", ENTRY_OFFSET)),
            AnimationPreset::FadeInDown => Some(("translateY", -ENTRY_OFFSET)),
            AnimationPreset::FadeInLeft => Some(("translateX", -ENTRY_OFFSET)),
        };
        if let Some((axis, offset)) = slide {
            children.push(TimelineNode::leaf(format!("{prefix}.{axis}"), offset, 0.0, duration_ms)?);
        }

        TimelineNode::parallel(children)
    }
}

/// Onboarding intro: logo fades in, holds, then moves up while the title
/// and next button fade in behind it
pub fn vendari_intro() -> ChoreoResult<TimelineNode> {
    Ok(TimelineNode::sequence(vec![
        TimelineNode::leaf(LOGO_OPACITY, 0.0, 1.0, 1000.0)?,
        TimelineNode::hold(3000.0)?,
        TimelineNode::parallel(vec![
            TimelineNode::leaf(LOGO_TRANSLATE_Y, 0.0, -20.0, 600.0)?,
            TimelineNode::leaf(TITLE_OPACITY, 0.0, 1.0, 600.0)?.with_delay(200.0)?,
            TimelineNode::leaf(BUTTON_OPACITY, 0.0, 1.0, 600.0)?.with_delay(400.0)?,
        ])?,
    ]))
}

/// Splash logo: fade in, stay, fade out on a single `opacity` property
pub fn splash_fade(fade_ms: f64, hold_ms: f64) -> ChoreoResult<TimelineNode> {
    Ok(TimelineNode::sequence(vec![
        TimelineNode::leaf("opacity", 0.0, 1.0, fade_ms)?,
        TimelineNode::hold(hold_ms)?,
        TimelineNode::leaf("opacity", 1.0, 0.0, fade_ms)?,
    ]))
}

/// Roster performance bars: `bar.{i}.width` fills to `score / 5`, one bar
/// every 200ms
pub fn performance_bars(scores: &[u8]) -> ChoreoResult<TimelineNode> {
    let bars = scores
        .iter()
        .enumerate()
        .map(|(i, &score)| TimelineNode::leaf(format!("bar.{i}.width"), 0.0, score_fraction(score), 1000.0))
        .collect::<ChoreoResult<Vec<_>>>()?;
    TimelineNode::stagger(bars, 200.0)
}

/// Employee detail meters, counted up together
pub fn profile_meters(performance: u8, targets: f32, attendance: f32, salary: f32) -> ChoreoResult<TimelineNode> {
    TimelineNode::parallel(vec![
        TimelineNode::leaf("performance", 0.0, score_fraction(performance), 1000.0)?,
        TimelineNode::leaf("targets", 0.0, targets, 1500.0)?,
        TimelineNode::leaf("attendance", 0.0, attendance, 1500.0)?,
        TimelineNode::leaf("salary", 0.0, salary, 1500.0)?,
    ])
}

/// Settings rows rising in one after another
pub fn settings_entries(count: usize) -> ChoreoResult<TimelineNode> {
    let rows = (0..count)
        .map(|i| AnimationPreset::FadeInUp.build(&format!("setting.{i}"), 800.0))
        .collect::<ChoreoResult<Vec<_>>>()?;
    TimelineNode::stagger(rows, 200.0)
}

/// Settings screen: profile header drops in and the title slides in while
/// the rows rise one after another
pub fn settings_screen(rows: usize) -> ChoreoResult<TimelineNode> {
    TimelineNode::parallel(vec![
        AnimationPreset::FadeInDown.build("profile", 1000.0)?,
        AnimationPreset::FadeInLeft.build("title", 1000.0)?,
        settings_entries(rows)?,
    ])
}

/// Fill fraction of a performance bar
pub fn score_fraction(score: u8) -> f32 {
    f32::from(score) / f32::from(MAX_SCORE)
}

/// Color band of a performance bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerformanceTier {
    /// Below 2
    Low,
    /// Exactly 3
    Average,
    /// Everything else
    High,
}

impl PerformanceTier {
    /// Classify a rating
    pub fn from_score(score: u8) -> Self {
        match score {
            0 | 1 => PerformanceTier::Low,
            3 => PerformanceTier::Average,
            _ => PerformanceTier::High,
        }
    }

    /// Two-stop gradient, start to end
    pub fn gradient(&self) -> [[u8; 3]; 2] {
        match self {
            PerformanceTier::Low => [[0xFF, 0x4E, 0x50], [0xFF, 0x00, 0x00]],
            PerformanceTier::Average => [[0xFF, 0xD7, 0x00], [0xFF, 0xA5, 0x00]],
            PerformanceTier::High => [[0x00, 0xF5, 0xA0], [0x00, 0xD9, 0xF5]],
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            PerformanceTier::Low => "Low",
            PerformanceTier::Average => "Average",
            PerformanceTier::High => "High",
        }
    }
}
