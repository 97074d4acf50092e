//! Hazards domain: falling platform sequence.
//!
//! Contact arms the platform once. It waits, shakes around its origin, then
//! drops `fall_distance` through the timed transport and vanishes after a
//! short delay.

use std::f32::consts::TAU;
use std::fmt::Debug;

use bevy::log::{debug, info};
use bevy::math::Vec2;
use rand::Rng;

use crate::traps::{PositionIo, TimedTransport, TrackedObject, TransportSettings, TriggerGate};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallSettings {
    pub delay_before_fall: f32,
    pub shake_duration: f32,
    pub shake_intensity: f32,
    pub fall_speed: f32,
    pub fall_distance: f32,
    pub despawn_delay: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FallStage {
    #[default]
    Armed,
    Waiting {
        remaining: f32,
    },
    Shaking {
        remaining: f32,
    },
    Falling,
    Vanishing {
        remaining: f32,
    },
    Gone,
}

/// What changed on a tick, for the system that owns the platform's body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallStep {
    Unchanged,
    /// The platform stopped being solid and started to drop.
    StartedFalling,
    /// The platform should no longer be drawn.
    Vanished,
}

#[derive(Debug, Clone)]
pub struct FallSequence<H> {
    handle: H,
    origin: Vec2,
    settings: FallSettings,
    stage: FallStage,
    gate: TriggerGate,
    transport: TimedTransport<H>,
}

impl<H: Copy + PartialEq + Debug> FallSequence<H> {
    pub fn new(handle: H, origin: Vec2, settings: FallSettings) -> Self {
        Self {
            handle,
            origin,
            settings,
            stage: FallStage::Armed,
            gate: TriggerGate::one_shot(),
            transport: TimedTransport::new(),
        }
    }

    pub fn stage(&self) -> FallStage {
        self.stage
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// The player touched the platform. Only the first contact counts.
    pub fn on_player_contact(&mut self) -> bool {
        if !self.gate.try_admit() {
            return false;
        }
        self.stage = FallStage::Waiting {
            remaining: self.settings.delay_before_fall,
        };
        info!("[HAZARD] Falling platform {:?} triggered", self.handle);
        true
    }

    pub fn advance<R: Rng>(&mut self, dt: f32, io: &mut impl PositionIo<H>, rng: &mut R) -> FallStep {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        match self.stage {
            FallStage::Armed | FallStage::Gone => FallStep::Unchanged,
            FallStage::Waiting { remaining } => {
                let remaining = remaining - dt;
                self.stage = if remaining <= 0.0 {
                    FallStage::Shaking {
                        remaining: self.settings.shake_duration,
                    }
                } else {
                    FallStage::Waiting { remaining }
                };
                FallStep::Unchanged
            }
            FallStage::Shaking { remaining } if remaining > 0.0 => {
                let offset = random_in_unit_circle(rng) * self.settings.shake_intensity;
                let _ = io.set_position(self.handle, self.origin + offset);
                self.stage = FallStage::Shaking {
                    remaining: remaining - dt,
                };
                FallStep::Unchanged
            }
            FallStage::Shaking { .. } => self.begin_fall(io),
            FallStage::Falling => {
                if self.transport.advance(dt, io).is_some() {
                    self.stage = FallStage::Vanishing {
                        remaining: self.settings.despawn_delay,
                    };
                }
                FallStep::Unchanged
            }
            FallStage::Vanishing { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.stage = FallStage::Gone;
                    debug!("[HAZARD] Falling platform {:?} gone", self.handle);
                    return FallStep::Vanished;
                }
                self.stage = FallStage::Vanishing { remaining };
                FallStep::Unchanged
            }
        }
    }

    fn begin_fall(&mut self, io: &mut impl PositionIo<H>) -> FallStep {
        let _ = io.set_position(self.handle, self.origin);
        let object = TrackedObject::displaced(
            self.handle,
            self.origin,
            Vec2::new(0.0, -self.settings.fall_distance),
        );
        let settings = TransportSettings::new(self.settings.fall_speed, 0.0, false);

        match self.transport.start(&[object], settings, io) {
            Ok(_) => {
                self.stage = FallStage::Falling;
            }
            Err(err) => {
                debug!("[HAZARD] Falling platform {:?} cannot fall: {}", self.handle, err);
                self.stage = FallStage::Vanishing {
                    remaining: self.settings.despawn_delay,
                };
            }
        }
        FallStep::StartedFalling
    }

    /// Back to the loaded state: armed, at the origin.
    pub fn reset(&mut self, io: &mut impl PositionIo<H>) {
        self.transport.cancel();
        self.gate.reset();
        self.stage = FallStage::Armed;
        let _ = io.set_position(self.handle, self.origin);
    }
}

fn random_in_unit_circle<R: Rng>(rng: &mut R) -> Vec2 {
    let angle = rng.random_range(0.0..TAU);
    let radius = rng.random::<f32>().sqrt();
    Vec2::from_angle(angle) * radius
}
