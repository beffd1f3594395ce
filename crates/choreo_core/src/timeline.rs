// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline trees composed from tweens.
//!
//! A [`TimelineNode`] is either a single [`Tween`], a sequence whose children
//! run one after another, or a parallel group whose children run together.
//! Every node carries its own start delay relative to its parent. Trees are
//! immutable once built, so one tree can back any number of runs.

use crate::error::{ChoreoError, ChoreoResult};
use crate::tween::Tween;
use indexmap::{IndexMap, IndexSet};

/// Current value of every animated property, in declaration order
pub type PropertyValues = IndexMap<String, f32>;

/// Shape of a timeline node
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// A single tween
    Leaf(Tween),
    /// Children played in order
    Sequence(Vec<TimelineNode>),
    /// Children played together
    Parallel(Vec<TimelineNode>),
}

/// A node in a timeline tree
#[derive(Debug, Clone)]
pub struct TimelineNode {
    kind: NodeKind,
    /// Own delay for groups; leaves keep theirs on the tween
    delay_ms: f64,
    /// Cached duration, excluding the node's own delay
    duration_ms: f64,
}

impl TimelineNode {
    /// Linear tween of `property` from `from` to `to`
    pub fn leaf(property: impl Into<String>, from: f32, to: f32, duration_ms: f64) -> ChoreoResult<Self> {
        Ok(Self::from_tween(Tween::new(property, from, to, duration_ms)?))
    }

    /// Wrap a configured tween
    pub fn from_tween(tween: Tween) -> Self {
        let duration_ms = tween.duration_ms();
        Self {
            kind: NodeKind::Leaf(tween),
            delay_ms: 0.0,
            duration_ms,
        }
    }

    /// Children played one after another
    pub fn sequence(children: Vec<TimelineNode>) -> Self {
        let duration_ms = children.iter().map(TimelineNode::span_ms).sum();
        Self {
            kind: NodeKind::Sequence(children),
            delay_ms: 0.0,
            duration_ms,
        }
    }

    /// Children played together
    ///
    /// Fails with [`ChoreoError::DuplicateProperty`] when two children
    /// animate the same property.
    pub fn parallel(children: Vec<TimelineNode>) -> ChoreoResult<Self> {
        let mut seen = IndexSet::new();
        for child in &children {
            for property in child.properties() {
                if !seen.insert(property.clone()) {
                    return Err(ChoreoError::DuplicateProperty(property));
                }
            }
        }

        let duration_ms = children
            .iter()
            .map(TimelineNode::span_ms)
            .fold(0.0, f64::max);
        Ok(Self {
            kind: NodeKind::Parallel(children),
            delay_ms: 0.0,
            duration_ms,
        })
    }

    /// Parallel group where child `i` starts `i * interval_ms` later
    pub fn stagger(children: Vec<TimelineNode>, interval_ms: f64) -> ChoreoResult<Self> {
        let interval_ms = ChoreoError::check_millis("interval_ms", interval_ms)?;
        let children = children
            .into_iter()
            .enumerate()
            .map(|(i, child)| {
                let delay = child.delay_ms() + interval_ms * i as f64;
                child.with_delay(delay)
            })
            .collect::<ChoreoResult<Vec<_>>>()?;
        Self::parallel(children)
    }

    /// A pause of `duration_ms` that animates nothing
    pub fn hold(duration_ms: f64) -> ChoreoResult<Self> {
        Self::sequence(Vec::new()).with_delay(duration_ms)
    }

    /// Copy of this node with its own delay replaced
    pub fn with_delay(self, delay_ms: f64) -> ChoreoResult<Self> {
        let delay_ms = ChoreoError::check_millis("delay_ms", delay_ms)?;
        match self.kind {
            NodeKind::Leaf(tween) => Ok(Self::from_tween(tween.with_delay(delay_ms)?)),
            kind => Ok(Self {
                kind,
                delay_ms,
                duration_ms: self.duration_ms,
            }),
        }
    }

    /// Node shape
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Own start delay relative to the parent
    pub fn delay_ms(&self) -> f64 {
        match &self.kind {
            NodeKind::Leaf(tween) => tween.delay_ms(),
            _ => self.delay_ms,
        }
    }

    /// Duration, excluding the node's own delay
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Own delay plus duration
    pub fn span_ms(&self) -> f64 {
        self.delay_ms() + self.duration_ms
    }

    /// Whether the node has run to its end `elapsed_ms` after its parent started
    pub fn is_finished(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.span_ms()
    }

    /// Every property animated by this subtree, in declaration order
    pub fn properties(&self) -> Vec<String> {
        let mut out = IndexSet::new();
        self.collect_properties(&mut out);
        out.into_iter().collect()
    }

    fn collect_properties(&self, out: &mut IndexSet<String>) {
        match &self.kind {
            NodeKind::Leaf(tween) => {
                if !out.contains(tween.property()) {
                    out.insert(tween.property().to_owned());
                }
            }
            NodeKind::Sequence(children) | NodeKind::Parallel(children) => {
                for child in children {
                    child.collect_properties(out);
                }
            }
        }
    }

    /// Property values `elapsed_ms` after the parent started
    pub fn values_at(&self, elapsed_ms: f64) -> PropertyValues {
        let mut out = PropertyValues::new();
        self.values_into(elapsed_ms, &mut out);
        out
    }

    /// Like [`values_at`](Self::values_at), reusing `out`
    pub fn values_into(&self, elapsed_ms: f64, out: &mut PropertyValues) {
        out.clear();
        self.collect_values(elapsed_ms, true, out);
    }

    /// `active` is false inside sequence children that have not started yet;
    /// those only fill properties nothing earlier has written.
    fn collect_values(&self, elapsed_ms: f64, active: bool, out: &mut PropertyValues) {
        match &self.kind {
            NodeKind::Leaf(tween) => {
                let value = tween.value_at(elapsed_ms);
                match out.get_mut(tween.property()) {
                    Some(slot) if active => *slot = value,
                    Some(_) => {}
                    None => {
                        out.insert(tween.property().to_owned(), value);
                    }
                }
            }
            NodeKind::Sequence(children) => {
                let local = elapsed_ms - self.delay_ms;
                let mut offset = 0.0;
                for child in children {
                    let started = active && local >= offset;
                    child.collect_values(local - offset, started, out);
                    offset += child.span_ms();
                }
            }
            NodeKind::Parallel(children) => {
                let local = elapsed_ms - self.delay_ms;
                for child in children {
                    child.collect_values(local, active, out);
                }
            }
        }
    }
}

impl From<Tween> for TimelineNode {
    fn from(tween: Tween) -> Self {
        Self::from_tween(tween)
    }
}
