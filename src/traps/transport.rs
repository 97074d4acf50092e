//! Traps domain: timed transport of a group of objects toward their targets.

use std::fmt::Debug;

use bevy::log::debug;
use bevy::math::Vec2;

use crate::traps::error::TransportError;
use crate::traps::interpolate::position_at;
use crate::traps::io::PositionIo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Forward,
    Holding,
    Returning,
}

impl Phase {
    pub fn is_moving(self) -> bool {
        matches!(self, Phase::Forward | Phase::Returning)
    }
}

/// An object moved by a transport run, with the two positions it travels between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedObject<H> {
    pub handle: H,
    pub original_position: Vec2,
    pub target_position: Vec2,
}

impl<H> TrackedObject<H> {
    pub fn new(handle: H, original_position: Vec2, target_position: Vec2) -> Self {
        Self {
            handle,
            original_position,
            target_position,
        }
    }

    /// Object whose target is its original position shifted by `move_vector`.
    pub fn displaced(handle: H, original_position: Vec2, move_vector: Vec2) -> Self {
        Self::new(handle, original_position, original_position + move_vector)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransportSettings {
    /// Units per second of the farthest-travelling object.
    pub speed: f32,
    /// Seconds spent at the target before returning.
    pub hold: f32,
    /// Whether the objects travel back to their original positions.
    pub returns: bool,
}

impl TransportSettings {
    pub fn new(speed: f32, hold: f32, returns: bool) -> Self {
        Self {
            speed,
            hold,
            returns,
        }
    }

    /// Settings in the shape trap content uses: a return delay of zero means
    /// the objects stay where they end up.
    pub fn from_return_delay(speed: f32, return_delay: f32) -> Self {
        Self::new(speed, return_delay.max(0.0), return_delay > 0.0)
    }

    pub fn validate(&self) -> Result<(), TransportError> {
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(TransportError::invalid(format!(
                "speed must be positive, got {}",
                self.speed
            )));
        }
        if !self.hold.is_finite() || self.hold < 0.0 {
            return Err(TransportError::invalid(format!(
                "hold duration must be non-negative, got {}",
                self.hold
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunId(pub u64);

/// Reported once when a run concludes naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunCompletion {
    pub run: RunId,
    /// True when the return leg finished, false when the run ended at the target.
    pub returned: bool,
}

#[derive(Debug, Clone)]
struct RunEntry<H> {
    handle: H,
    original: Vec2,
    start: Vec2,
    target: Vec2,
    live: bool,
}

/// One active move operation.
#[derive(Debug, Clone)]
pub struct TransportRun<H> {
    id: RunId,
    entries: Vec<RunEntry<H>>,
    settings: TransportSettings,
    phase: Phase,
    elapsed: f32,
    total_duration: f32,
    hold_remaining: f32,
}

impl<H: Copy + PartialEq + Debug> TransportRun<H> {
    pub fn id(&self) -> RunId {
        self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn total_duration(&self) -> f32 {
        self.total_duration
    }

    pub fn hold_remaining(&self) -> f32 {
        self.hold_remaining
    }

    fn leg_duration(&self) -> f32 {
        let max_distance = self
            .entries
            .iter()
            .filter(|e| e.live)
            .map(|e| e.start.distance(e.target))
            .fold(0.0_f32, f32::max);
        max_distance / self.settings.speed
    }

    fn place(entry: &mut RunEntry<H>, position: Vec2, io: &mut impl PositionIo<H>) {
        if io.set_position(entry.handle, position).is_err() {
            debug!("[TRAP] Dropping stale tracked object {:?}", entry.handle);
            entry.live = false;
        }
    }

    /// Steps the current leg. Returns true once the leg has reached its end.
    fn step_leg(&mut self, dt: f32, io: &mut impl PositionIo<H>) -> bool {
        // NaN, infinite or non-positive durations complete immediately.
        if !self.total_duration.is_finite() || self.total_duration <= 0.0 {
            return true;
        }

        self.elapsed = (self.elapsed + dt).min(self.total_duration);
        if self.elapsed >= self.total_duration {
            return true;
        }

        let (elapsed, duration) = (self.elapsed, self.total_duration);
        for entry in self.entries.iter_mut().filter(|e| e.live) {
            let position = position_at(entry.start, entry.target, elapsed, duration);
            Self::place(entry, position, io);
        }
        false
    }

    fn snap_to_targets(&mut self, io: &mut impl PositionIo<H>) {
        for entry in self.entries.iter_mut().filter(|e| e.live) {
            let target = entry.target;
            Self::place(entry, target, io);
        }
    }

    fn begin_return(&mut self, io: &mut impl PositionIo<H>) {
        for entry in self.entries.iter_mut().filter(|e| e.live) {
            match io.position(entry.handle) {
                Some(current) => {
                    entry.start = current;
                    entry.target = entry.original;
                }
                None => {
                    debug!("[TRAP] Dropping stale tracked object {:?}", entry.handle);
                    entry.live = false;
                }
            }
        }
        self.phase = Phase::Returning;
        self.elapsed = 0.0;
        self.hold_remaining = 0.0;
        // Distances are re-derived from where the objects are now.
        self.total_duration = self.leg_duration();
    }

    /// Advances the run by `dt`. Returns `Some(returned)` when it concludes.
    fn step(&mut self, dt: f32, io: &mut impl PositionIo<H>) -> Option<bool> {
        match self.phase {
            Phase::Forward => {
                if self.step_leg(dt, io) {
                    self.snap_to_targets(io);
                    if !self.settings.returns {
                        self.phase = Phase::Idle;
                        return Some(false);
                    }
                    if self.settings.hold > 0.0 {
                        self.phase = Phase::Holding;
                        self.hold_remaining = self.settings.hold;
                    } else {
                        self.begin_return(io);
                    }
                }
                None
            }
            Phase::Holding => {
                self.hold_remaining -= dt;
                if self.hold_remaining <= 0.0 {
                    self.begin_return(io);
                }
                None
            }
            Phase::Returning => {
                if self.step_leg(dt, io) {
                    self.snap_to_targets(io);
                    self.phase = Phase::Idle;
                    return Some(true);
                }
                None
            }
            Phase::Idle => Some(false),
        }
    }
}

/// Drives at most one [`TransportRun`] at a time.
#[derive(Debug, Clone)]
pub struct TimedTransport<H> {
    run: Option<TransportRun<H>>,
    runs_started: u64,
}

impl<H> Default for TimedTransport<H> {
    fn default() -> Self {
        Self {
            run: None,
            runs_started: 0,
        }
    }
}

impl<H: Copy + PartialEq + Debug> TimedTransport<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.run.as_ref().map_or(Phase::Idle, TransportRun::phase)
    }

    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    pub fn run(&self) -> Option<&TransportRun<H>> {
        self.run.as_ref()
    }

    /// Number of runs ever started by this transport.
    pub fn runs_started(&self) -> u64 {
        self.runs_started
    }

    /// Starts moving `objects` from their current positions to their targets.
    ///
    /// Objects whose handle no longer resolves are left out; if none remain the
    /// run is refused with [`TransportError::NoTargets`].
    pub fn start(
        &mut self,
        objects: &[TrackedObject<H>],
        settings: TransportSettings,
        io: &impl PositionIo<H>,
    ) -> Result<RunId, TransportError> {
        if self.run.is_some() {
            return Err(TransportError::RunInProgress);
        }
        settings.validate()?;

        let entries: Vec<RunEntry<H>> = objects
            .iter()
            .filter_map(|object| {
                let current = io.position(object.handle)?;
                Some(RunEntry {
                    handle: object.handle,
                    original: object.original_position,
                    start: current,
                    target: object.target_position,
                    live: true,
                })
            })
            .collect();

        if entries.is_empty() {
            return Err(TransportError::NoTargets);
        }

        let id = RunId(self.runs_started);
        self.runs_started += 1;

        let mut run = TransportRun {
            id,
            entries,
            settings,
            phase: Phase::Forward,
            elapsed: 0.0,
            total_duration: 0.0,
            hold_remaining: 0.0,
        };
        run.total_duration = run.leg_duration();
        self.run = Some(run);

        Ok(id)
    }

    /// Advances the active run, if any, by `dt` seconds.
    ///
    /// Time left over once a phase ends is not carried into the next phase.
    pub fn advance(&mut self, dt: f32, io: &mut impl PositionIo<H>) -> Option<RunCompletion> {
        let run = self.run.as_mut()?;
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

        let returned = run.step(dt, io)?;
        let completion = RunCompletion {
            run: run.id,
            returned,
        };
        self.run = None;
        Some(completion)
    }

    /// Drops the active run where it stands. Returns its id if there was one.
    pub fn cancel(&mut self) -> Option<RunId> {
        self.run.take().map(|run| run.id)
    }
}
