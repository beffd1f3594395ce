// SPDX-License-Identifier: MIT OR Apache-2.0
//! Frame-driven playback of named timeline runs.
//!
//! The host calls [`Choreographer::tick`] (or [`Choreographer::update`]) once
//! per rendered frame. Each active run evaluates its timeline at the elapsed
//! time, reports changed values to its listeners and, once the timeline has
//! run to its end, fires its completion callback exactly once and leaves the
//! active set.
//!
//! A run that is never ticked again stays in the active set until it is
//! cancelled or the choreographer is disposed.

use crate::clock::{Clock, MonotonicClock};
use crate::config::ChoreographerConfig;
use crate::error::{ChoreoError, ChoreoResult};
use crate::timeline::{PropertyValues, TimelineNode};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use uuid::Uuid;

/// Unique identifier for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Create a new random run ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for a property listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub Uuid);

impl ListenerId {
    /// Create a new random listener ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ListenerId {
    fn default() -> Self {
        Self::new()
    }
}

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// Started, not ticked yet
    #[default]
    Pending,
    /// Ticked at least once
    Running,
    /// Reached the end of its timeline
    Finished,
    /// Removed before reaching the end
    Cancelled,
}

impl RunState {
    /// Finished or cancelled
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Finished | RunState::Cancelled)
    }
}

/// Called with every property value when a tick changed something
pub type TickCallback = Box<dyn FnMut(&PropertyValues)>;

/// Called once when a run finishes
pub type CompleteCallback = Box<dyn FnOnce()>;

/// Called with `(property, value)` when one property changed
pub type PropertyListener = Box<dyn FnMut(&str, f32)>;

/// Optional callbacks attached to a run at start
#[derive(Default)]
pub struct RunCallbacks {
    on_tick: Option<TickCallback>,
    on_complete: Option<CompleteCallback>,
}

impl RunCallbacks {
    /// No callbacks
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tick callback
    pub fn on_tick(mut self, callback: impl FnMut(&PropertyValues) + 'static) -> Self {
        self.on_tick = Some(Box::new(callback));
        self
    }

    /// Set the completion callback
    pub fn on_complete(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for RunCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunCallbacks")
            .field("on_tick", &self.on_tick.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// Caller's view of a started run
///
/// The state stays readable after the run has left the choreographer.
#[derive(Debug, Clone)]
pub struct RunHandle {
    id: RunId,
    name: String,
    state: Rc<Cell<RunState>>,
}

impl RunHandle {
    /// Run ID
    pub fn id(&self) -> RunId {
        self.id
    }

    /// Run name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current lifecycle state
    pub fn state(&self) -> RunState {
        self.state.get()
    }

    /// Finished or cancelled
    pub fn is_done(&self) -> bool {
        self.state.get().is_terminal()
    }
}

struct PropertyBinding {
    id: ListenerId,
    property: String,
    listener: PropertyListener,
}

/// One playback of a timeline
struct ChoreographyRun {
    id: RunId,
    name: String,
    root: Arc<TimelineNode>,
    start_time: f64,
    current_values: PropertyValues,
    /// Values from the previous emission after a tick swaps buffers
    previous_values: PropertyValues,
    emitted: bool,
    state: Rc<Cell<RunState>>,
    on_tick: Option<TickCallback>,
    on_complete: Option<CompleteCallback>,
    listeners: Vec<PropertyBinding>,
}

impl ChoreographyRun {
    /// Evaluate at `elapsed_ms` and notify; returns whether the run reached its end
    fn advance(&mut self, elapsed_ms: f64, notify_unchanged: bool) -> bool {
        let elapsed_ms = elapsed_ms.max(0.0);
        std::mem::swap(&mut self.current_values, &mut self.previous_values);
        self.root.values_into(elapsed_ms, &mut self.current_values);

        if self.state.get() == RunState::Pending {
            self.state.set(RunState::Running);
        }

        let first = !self.emitted;
        let changed = first || self.current_values != self.previous_values;
        if changed || notify_unchanged {
            tracing::trace!(run = %self.name, elapsed_ms, "emitting values");
            if let Some(on_tick) = self.on_tick.as_mut() {
                on_tick(&self.current_values);
            }
            for binding in &mut self.listeners {
                let Some(&value) = self.current_values.get(&binding.property) else {
                    continue;
                };
                let moved = first || self.previous_values.get(&binding.property) != Some(&value);
                if moved || notify_unchanged {
                    (binding.listener)(&binding.property, value);
                }
            }
            self.emitted = true;
        }

        self.root.is_finished(elapsed_ms)
    }

    fn finish(self) {
        self.state.set(RunState::Finished);
        tracing::debug!(run = %self.name, "run finished");
        if let Some(on_complete) = self.on_complete {
            on_complete();
        }
    }

    fn cancel(self) {
        self.state.set(RunState::Cancelled);
        tracing::debug!(run = %self.name, "run cancelled");
    }
}

/// Drives named timeline runs against a clock
pub struct Choreographer {
    config: ChoreographerConfig,
    clock: Box<dyn Clock>,
    runs: IndexMap<String, ChoreographyRun>,
}

impl Choreographer {
    /// Create a choreographer reading start times from `clock`
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            config: ChoreographerConfig::default(),
            clock: Box::new(clock),
            runs: IndexMap::new(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: ChoreographerConfig) -> Self {
        self.config = config;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &ChoreographerConfig {
        &self.config
    }

    /// Current clock time
    pub fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }

    /// Start playing `root` under `name`
    ///
    /// Fails with [`ChoreoError::DuplicateRunName`] while another run with
    /// the same name is active.
    pub fn start(
        &mut self,
        name: impl Into<String>,
        root: impl Into<Arc<TimelineNode>>,
        callbacks: RunCallbacks,
    ) -> ChoreoResult<RunHandle> {
        let name = name.into();
        if self.runs.contains_key(&name) {
            return Err(ChoreoError::DuplicateRunName(name));
        }

        let root = root.into();
        let id = RunId::new();
        let state = Rc::new(Cell::new(RunState::Pending));
        let start_time = self.clock.now_ms();
        tracing::debug!(run = %name, start_time, duration_ms = root.span_ms(), "run started");

        self.runs.insert(
            name.clone(),
            ChoreographyRun {
                id,
                name: name.clone(),
                root,
                start_time,
                current_values: PropertyValues::new(),
                previous_values: PropertyValues::new(),
                emitted: false,
                state: Rc::clone(&state),
                on_tick: callbacks.on_tick,
                on_complete: callbacks.on_complete,
                listeners: Vec::new(),
            },
        );

        Ok(RunHandle { id, name, state })
    }

    /// Advance every active run to `now_ms`
    pub fn tick(&mut self, now_ms: f64) {
        let notify_unchanged = self.config.notify_unchanged;
        let mut finished = Vec::new();
        for (name, run) in &mut self.runs {
            if run.advance(now_ms - run.start_time, notify_unchanged) {
                finished.push(name.clone());
            }
        }

        for name in finished {
            if let Some(run) = self.runs.shift_remove(&name) {
                run.finish();
            }
        }
    }

    /// Tick with the clock's current time
    pub fn update(&mut self) {
        let now = self.clock.now_ms();
        self.tick(now);
    }

    /// Stop a run without completing it; returns whether it was active
    pub fn cancel(&mut self, name: &str) -> bool {
        match self.runs.shift_remove(name) {
            Some(run) => {
                run.cancel();
                true
            }
            None => false,
        }
    }

    /// Cancel the run behind `handle`, if it is still the active run of that name
    pub fn cancel_handle(&mut self, handle: &RunHandle) -> bool {
        match self.runs.get(handle.name()) {
            Some(run) if run.id == handle.id() => self.cancel(handle.name()),
            _ => false,
        }
    }

    /// Attach a per-property listener to an active run
    pub fn add_listener(
        &mut self,
        name: &str,
        property: impl Into<String>,
        listener: impl FnMut(&str, f32) + 'static,
    ) -> ChoreoResult<ListenerId> {
        let run = self
            .runs
            .get_mut(name)
            .ok_or_else(|| ChoreoError::UnknownRun(name.to_owned()))?;
        let id = ListenerId::new();
        run.listeners.push(PropertyBinding {
            id,
            property: property.into(),
            listener: Box::new(listener),
        });
        Ok(id)
    }

    /// Detach a listener; returns whether it was attached
    pub fn remove_listener(&mut self, name: &str, id: ListenerId) -> bool {
        let Some(run) = self.runs.get_mut(name) else {
            return false;
        };
        let before = run.listeners.len();
        run.listeners.retain(|binding| binding.id != id);
        run.listeners.len() != before
    }

    /// End every active run
    ///
    /// Runs are cancelled silently, or fast-forwarded to their end and
    /// completed when `cancel_on_dispose` is off. No callback fires after
    /// this returns.
    pub fn dispose(&mut self) {
        if self.runs.is_empty() {
            return;
        }
        tracing::debug!(
            runs = self.runs.len(),
            cancel = self.config.cancel_on_dispose,
            "disposing choreographer"
        );

        let notify_unchanged = self.config.notify_unchanged;
        for (_, mut run) in std::mem::take(&mut self.runs) {
            if self.config.cancel_on_dispose {
                run.cancel();
            } else {
                let end = run.root.span_ms();
                run.advance(end, notify_unchanged);
                run.finish();
            }
        }
    }

    /// Whether a run with this name is active
    pub fn is_active(&self, name: &str) -> bool {
        self.runs.contains_key(name)
    }

    /// State of an active run
    pub fn state(&self, name: &str) -> Option<RunState> {
        self.runs.get(name).map(|run| run.state.get())
    }

    /// Values emitted by the last tick of an active run
    pub fn values(&self, name: &str) -> Option<&PropertyValues> {
        self.runs.get(name).map(|run| &run.current_values)
    }

    /// Names of active runs, in start order
    pub fn active_runs(&self) -> impl Iterator<Item = &str> {
        self.runs.keys().map(String::as_str)
    }

    /// Number of active runs
    pub fn active_count(&self) -> usize {
        self.runs.len()
    }
}

impl Default for Choreographer {
    fn default() -> Self {
        Self::new(MonotonicClock::new())
    }
}

impl Drop for Choreographer {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for Choreographer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Choreographer")
            .field("config", &self.config)
            .field("runs", &self.runs.keys().collect::<Vec<_>>())
            .finish()
    }
}
