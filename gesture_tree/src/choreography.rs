//! Discrete tree state plus the continuous progress every group blends by.
//!
//! Confident `OPEN`/`CLOSED` samples pick the target state; everything else
//! leaves it alone.  Progress chases the target with
//! `p += (target − p) × min(1, k·dt)`, which never overshoots and never
//! snaps.

use tracing::info;

use crate::gesture::{GestureLabel, GestureSample};

/// Which layout the tree is heading for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TreeState {
    Chaos,
    Formed,
}

impl TreeState {
    /// Progress value this state converges to.
    pub fn target(self) -> f32 {
        match self {
            TreeState::Chaos  => 0.0,
            TreeState::Formed => 1.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TreeState::Chaos  => "CHAOS",
            TreeState::Formed => "FORMED",
        }
    }

    /// The state a gesture asks for, if any.
    pub fn for_label(label: GestureLabel) -> Option<Self> {
        match label {
            GestureLabel::Open   => Some(TreeState::Chaos),
            GestureLabel::Closed => Some(TreeState::Formed),
            GestureLabel::None   => None,
        }
    }
}

/// Snapshot read by every group and by the UI.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChoreographyState {
    pub state:    TreeState,
    pub progress: f32,
}

impl Default for ChoreographyState {
    fn default() -> Self {
        ChoreographyState { state: TreeState::Formed, progress: 1.0 }
    }
}

/// Tunables for [`StateMachine`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MachineSettings {
    /// Minimum confidence (inclusive) for a sample to count.
    pub threshold:       f32,
    /// Convergence rate `k`, per second.
    pub rate:            f32,
    /// Consecutive confident samples needed to switch target.
    pub debounce_frames: u32,
}

impl Default for MachineSettings {
    fn default() -> Self {
        MachineSettings { threshold: 0.6, rate: 2.0, debounce_frames: 1 }
    }
}

#[derive(Clone, Debug)]
pub struct StateMachine {
    current:  ChoreographyState,
    settings: MachineSettings,
    /// Candidate state and how many confident samples in a row asked for it.
    pending:  Option<(TreeState, u32)>,
}

impl StateMachine {
    pub fn new(settings: MachineSettings) -> Self {
        StateMachine { current: ChoreographyState::default(), settings, pending: None }
    }

    pub fn snapshot(&self) -> ChoreographyState { self.current }
    pub fn state(&self) -> TreeState { self.current.state }
    pub fn progress(&self) -> f32 { self.current.progress }
    pub fn settings(&self) -> &MachineSettings { &self.settings }

    /// Feed one sample.  Returns the new state when the target changes.
    ///
    /// A sample that is unconfident or asks for the current state breaks
    /// any debounce run in progress.
    pub fn observe(&mut self, sample: &GestureSample) -> Option<TreeState> {
        let wanted = TreeState::for_label(sample.label)
            .filter(|_| sample.confidence >= self.settings.threshold);

        let Some(wanted) = wanted.filter(|s| *s != self.current.state) else {
            self.pending = None;
            return None;
        };

        let run = match self.pending {
            Some((s, n)) if s == wanted => n + 1,
            _                           => 1,
        };
        if run >= self.settings.debounce_frames.max(1) {
            let from = self.current.state;
            self.current.state = wanted;
            self.pending = None;
            info!(
                from = from.name(),
                to = wanted.name(),
                label = sample.label.name(),
                confidence = sample.confidence,
                "tree state changed"
            );
            Some(wanted)
        } else {
            self.pending = Some((wanted, run));
            None
        }
    }

    /// Move progress toward the current target.  Non-positive or non-finite
    /// `dt` leaves it untouched.
    pub fn advance(&mut self, dt: f32) -> f32 {
        if dt.is_finite() && dt > 0.0 {
            let alpha  = (self.settings.rate * dt).min(1.0);
            let target = self.current.state.target();
            let p      = self.current.progress;
            self.current.progress = (p + (target - p) * alpha).clamp(0.0, 1.0);
        }
        self.current.progress
    }
}

impl Default for StateMachine {
    fn default() -> Self { StateMachine::new(MachineSettings::default()) }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
