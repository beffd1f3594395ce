// SPDX-License-Identifier: MIT OR Apache-2.0
//! Headless playback of the screen choreographies.
//!
//! Stands in for the UI layer: it starts every scene on one choreographer,
//! advances a simulated frame clock and reports what a renderer would apply.

use crate::config::DemoConfig;
use choreo_core::presets::{self, PerformanceTier};
use choreo_core::{
    ChoreoError, Choreographer, Clock, ConfigError, ManualClock, PropertyValues, RunCallbacks,
    TimelineNode,
};
use indexmap::IndexMap;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

/// Settings rows on the settings screen
const SETTINGS_ROWS: usize = 5;

/// Error while running the demo
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A choreography could not be built or started
    #[error("Choreography error: {0}")]
    Choreo(#[from] ChoreoError),

    /// Frame rate of zero
    #[error("Frame rate must be positive")]
    InvalidFrameRate,
}

/// One changed frame, as printed in JSON mode
#[derive(Debug, Serialize)]
struct FrameRecord<'a> {
    run: &'a str,
    time_ms: f64,
    values: &'a PropertyValues,
}

/// Outcome of a playback session
#[derive(Debug, Clone, PartialEq)]
pub struct DemoSummary {
    /// Frames simulated until every run ended
    pub frames: u64,
    /// Run names in completion order
    pub completed: Vec<String>,
    /// Last values each run delivered, keyed by run name
    pub final_values: IndexMap<String, PropertyValues>,
    /// Simulated time at the last frame
    pub elapsed_ms: f64,
}

/// Drives the bundled scenes against a simulated clock
pub struct DemoHost {
    config: DemoConfig,
    clock: ManualClock,
    choreo: Choreographer,
    completed: Rc<RefCell<IndexMap<String, PropertyValues>>>,
}

impl DemoHost {
    /// Create a host with its clock at zero
    pub fn new(config: DemoConfig) -> Self {
        let clock = ManualClock::new(0.0);
        let choreo = Choreographer::new(clock.clone()).with_config(config.choreographer.clone());
        Self {
            config,
            clock,
            choreo,
            completed: Rc::new(RefCell::new(IndexMap::new())),
        }
    }

    /// Start every scene and play until all runs have ended
    pub fn run(mut self) -> Result<DemoSummary, DemoError> {
        let frame_ms = self
            .config
            .frame_interval_ms()
            .ok_or(DemoError::InvalidFrameRate)?;

        self.start_scenes()?;
        tracing::info!(runs = self.choreo.active_count(), frame_ms, "playing choreographies");

        let mut frames: u64 = 0;
        while self.choreo.active_count() > 0 {
            self.clock.advance(frame_ms);
            self.choreo.update();
            frames += 1;
        }

        let final_values = self.completed.take();
        tracing::info!(frames, elapsed_ms = self.clock_ms(), "all choreographies finished");
        Ok(DemoSummary {
            frames,
            completed: final_values.keys().cloned().collect(),
            final_values,
            elapsed_ms: self.clock_ms(),
        })
    }

    fn clock_ms(&self) -> f64 {
        self.choreo.now_ms()
    }

    fn start_scenes(&mut self) -> Result<(), DemoError> {
        self.start_scene("splash", presets::splash_fade(1000.0, 1000.0)?, || {
            tracing::info!("splash finished, navigating to Root");
        })?;

        self.start_scene("intro", presets::vendari_intro()?, || {
            tracing::info!("intro finished, next button visible");
        })?;

        let roster = self.config.roster.clone();
        self.start_scene("roster", presets::performance_bars(&roster)?, move || {
            for (i, &score) in roster.iter().enumerate() {
                let tier = PerformanceTier::from_score(score);
                let [from, to] = tier.gradient();
                tracing::info!(
                    bar = i,
                    score,
                    tier = tier.name(),
                    gradient = %format!("{}..{}", hex(from), hex(to)),
                    "performance bar filled"
                );
            }
        })?;

        self.start_scene("settings", presets::settings_screen(SETTINGS_ROWS)?, || {
            tracing::info!(rows = SETTINGS_ROWS, "settings rows in place");
        })?;

        let performance = self.config.roster.first().copied().unwrap_or(0);
        self.start_scene(
            "profile",
            presets::profile_meters(performance, 12.0, 96.0, 5200.0)?,
            || tracing::info!("profile meters settled"),
        )?;

        // Counters show whole numbers, so only report when the shown digit moves
        for counter in ["targets", "attendance", "salary"] {
            let mut shown = None;
            self.choreo.add_listener("profile", counter, move |property, value| {
                let whole = value.floor() as i64;
                if shown != Some(whole) {
                    shown = Some(whole);
                    tracing::debug!(property, value = whole, "counter");
                }
            })?;
        }

        Ok(())
    }

    fn start_scene(
        &mut self,
        name: &str,
        timeline: TimelineNode,
        on_finish: impl FnOnce() + 'static,
    ) -> Result<(), DemoError> {
        let last = Rc::new(RefCell::new(PropertyValues::new()));
        let json = self.config.emit_json.then(|| self.clock.clone());

        let callbacks = RunCallbacks::new()
            .on_tick({
                let last = Rc::clone(&last);
                let run = name.to_owned();
                move |values| {
                    if let Some(clock) = &json {
                        let record = FrameRecord {
                            run: &run,
                            time_ms: clock.now_ms(),
                            values,
                        };
                        match serde_json::to_string(&record) {
                            Ok(line) => println!("{line}"),
                            Err(e) => tracing::warn!("Failed to encode frame: {}", e),
                        }
                    }
                    last.borrow_mut().clone_from(values);
                }
            })
            .on_complete({
                let completed = Rc::clone(&self.completed);
                let name = name.to_owned();
                move || {
                    on_finish();
                    let values = last.take();
                    tracing::info!(run = %name, values = ?values, "choreography completed");
                    completed.borrow_mut().insert(name, values);
                }
            });

        self.choreo.start(name, timeline, callbacks)?;
        Ok(())
    }
}

/// `#RRGGBB` form of a color
fn hex([r, g, b]: [u8; 3]) -> String {
    format!("#{r:02X}{g:02X}{b:02X}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use choreo_core::ChoreographerConfig;

    #[test]
    fn test_default_session() {
        let summary = DemoHost::new(DemoConfig::default()).run().unwrap();
        assert_eq!(
            summary.completed,
            vec!["profile", "roster", "settings", "splash", "intro"]
        );
        assert!(summary.frames >= 300 && summary.frames <= 301);
        assert!(summary.elapsed_ms >= 5000.0);
    }

    #[test]
    fn test_final_values() {
        let summary = DemoHost::new(DemoConfig::default()).run().unwrap();

        let splash = &summary.final_values["splash"];
        assert_eq!(splash["opacity"], 0.0);

        let settings = &summary.final_values["settings"];
        assert_eq!(settings.len(), 4 + 2 * SETTINGS_ROWS);
        assert_eq!(settings["profile.translateY"], 0.0);
        assert_eq!(settings["title.translateX"], 0.0);
        assert_eq!(settings["setting.4.opacity"], 1.0);

        let roster = &summary.final_values["roster"];
        assert_eq!(roster["bar.1.width"], 1.0);
    }

    #[test]
    fn test_final_values_on_dispose() {
        let config = DemoConfig {
            choreographer: ChoreographerConfig {
                cancel_on_dispose: false,
                ..ChoreographerConfig::default()
            },
            ..DemoConfig::default()
        };
        let mut host = DemoHost::new(config);
        host.start_scenes().unwrap();
        host.clock.advance(100.0);
        host.choreo.update();
        host.choreo.dispose();

        let completed = host.completed.borrow();
        assert_eq!(completed.len(), 5);
        assert_eq!(completed["intro"][presets::BUTTON_OPACITY], 1.0);
    }

    #[test]
    fn test_coarse_frames() {
        let config = DemoConfig {
            frame_rate: 10,
            emit_json: true,
            ..DemoConfig::default()
        };
        let summary = DemoHost::new(config).run().unwrap();
        assert_eq!(summary.frames, 50);
        assert_eq!(summary.completed.len(), 5);
    }

    #[test]
    fn test_zero_frame_rate() {
        let config = DemoConfig {
            frame_rate: 0,
            ..DemoConfig::default()
        };
        assert!(matches!(
            DemoHost::new(config).run(),
            Err(DemoError::InvalidFrameRate)
        ));
    }

    #[test]
    fn test_hex() {
        assert_eq!(hex([0x00, 0xF5, 0xA0]), "#00F5A0");
    }
}
