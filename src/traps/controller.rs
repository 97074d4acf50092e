//! Traps domain: activation controller composing gate, transport and crush checks.

use std::fmt::Debug;

use bevy::log::{info, warn};

use crate::traps::crush::{CrushDetector, CrushEvent};
use crate::traps::error::TransportError;
use crate::traps::gate::TriggerGate;
use crate::traps::io::{ActorState, OverlapQuery, PositionIo};
use crate::traps::transport::{
    Phase, RunCompletion, RunId, TimedTransport, TrackedObject, TransportSettings,
};

/// Tag of the only actor allowed to set traps off.
pub const PLAYER_TAG: &str = "Player";

/// Outcome of a zone entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Activation {
    /// Something other than the player entered the zone.
    Ignored,
    /// The gate refused: a run is active, or a one-shot trap already fired.
    Rejected,
    Started(RunId),
    /// The gate admitted the entry but the transport refused to start.
    Failed(TransportError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControllerStep<H> {
    pub completion: Option<RunCompletion>,
    pub crushes: Vec<CrushEvent<H>>,
}

impl<H> Default for ControllerStep<H> {
    fn default() -> Self {
        Self {
            completion: None,
            crushes: Vec::new(),
        }
    }
}

/// A configured trap: which objects move where, how fast, and how often.
#[derive(Debug, Clone)]
pub struct ActivationController<H> {
    gate: TriggerGate,
    transport: TimedTransport<H>,
    objects: Vec<TrackedObject<H>>,
    settings: TransportSettings,
    crush: Option<CrushDetector<H>>,
}

impl<H: Copy + PartialEq + Debug> ActivationController<H> {
    pub fn new(objects: Vec<TrackedObject<H>>, settings: TransportSettings, repeatable: bool) -> Self {
        Self {
            gate: TriggerGate::new(repeatable),
            transport: TimedTransport::new(),
            objects,
            settings,
            crush: None,
        }
    }

    pub fn with_crush_detection(mut self, detector: CrushDetector<H>) -> Self {
        self.crush = Some(detector);
        self
    }

    pub fn gate(&self) -> &TriggerGate {
        &self.gate
    }

    pub fn transport(&self) -> &TimedTransport<H> {
        &self.transport
    }

    pub fn objects(&self) -> &[TrackedObject<H>] {
        &self.objects
    }

    pub fn settings(&self) -> TransportSettings {
        self.settings
    }

    pub fn phase(&self) -> Phase {
        self.transport.phase()
    }

    /// Reacts to an actor entering the trap's zone.
    pub fn on_zone_entered(&mut self, actor_tag: &str, io: &impl PositionIo<H>) -> Activation {
        if actor_tag != PLAYER_TAG {
            return Activation::Ignored;
        }
        if !self.gate.try_admit() {
            return Activation::Rejected;
        }

        match self.transport.start(&self.objects, self.settings, io) {
            Ok(run) => {
                if let Some(detector) = self.crush.as_mut() {
                    detector.reset();
                }
                Activation::Started(run)
            }
            Err(err) => {
                // Release the gate so a broken run does not wedge the trap.
                self.gate.on_run_complete(false);
                warn!("[TRAP] Transport refused to start: {}", err);
                Activation::Failed(err)
            }
        }
    }

    /// Advances the active run and, while the forward leg moves, samples for
    /// crushed actors.
    pub fn advance<P, W>(&mut self, dt: f32, io: &mut P, world: &mut W) -> ControllerStep<H>
    where
        P: PositionIo<H>,
        W: OverlapQuery<H> + ActorState<H>,
    {
        let was_forward = self.transport.phase() == Phase::Forward;

        let completion = self.transport.advance(dt, io);
        if let Some(done) = completion {
            self.gate.on_run_complete(done.returned);
        }

        let crushes = match self.crush.as_mut() {
            Some(detector) if was_forward => {
                // One last probe on the tick the walls arrive.
                let forward_done = self.transport.phase() != Phase::Forward;
                detector.tick(dt, forward_done, io, world)
            }
            _ => Vec::new(),
        };

        ControllerStep {
            completion,
            crushes,
        }
    }

    /// Forces the trap back to its loaded state: any run is dropped, the gate
    /// forgets it fired and every object goes back to its original position.
    pub fn reset(&mut self, io: &mut impl PositionIo<H>) {
        if let Some(run) = self.transport.cancel() {
            info!("[TRAP] Cancelled run {:?} on reset", run);
        }
        self.gate.reset();
        if let Some(detector) = self.crush.as_mut() {
            detector.reset();
        }
        for object in &self.objects {
            // Objects that are gone stay gone.
            let _ = io.set_position(object.handle, object.original_position);
        }
    }
}
