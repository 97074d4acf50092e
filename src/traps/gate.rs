//! Traps domain: admission gate deciding whether a trap may fire.

/// Debounces trap activations.
///
/// A run may start only while no run is in progress, and either the gate is
/// repeatable or it has never fired. Rejections leave the state untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriggerGate {
    repeatable: bool,
    has_fired: bool,
    run_in_progress: bool,
}

impl TriggerGate {
    pub fn new(repeatable: bool) -> Self {
        Self {
            repeatable,
            has_fired: false,
            run_in_progress: false,
        }
    }

    pub fn one_shot() -> Self {
        Self::new(false)
    }

    pub fn repeatable() -> Self {
        Self::new(true)
    }

    pub fn has_fired(&self) -> bool {
        self.has_fired
    }

    pub fn run_in_progress(&self) -> bool {
        self.run_in_progress
    }

    pub fn can_admit(&self) -> bool {
        !self.run_in_progress && (self.repeatable || !self.has_fired)
    }

    /// Admit a new run if allowed. Returns false without side effects otherwise.
    pub fn try_admit(&mut self) -> bool {
        if !self.can_admit() {
            return false;
        }
        self.has_fired = true;
        self.run_in_progress = true;
        true
    }

    /// Record the end of the current run. A completed return leg also clears
    /// `has_fired` on a repeatable gate.
    pub fn on_run_complete(&mut self, returned: bool) {
        self.run_in_progress = false;
        if returned && self.repeatable {
            self.has_fired = false;
        }
    }

    /// Forget everything, as if the level had just been loaded.
    pub fn reset(&mut self) {
        self.has_fired = false;
        self.run_in_progress = false;
    }
}
