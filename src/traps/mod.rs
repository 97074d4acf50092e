//! Traps domain: debounced timed transport and the plugin that drives it.
//!
//! The core (`gate`, `interpolate`, `transport`, `crush`, `controller`) is
//! generic over the handle type and only reaches the world through the traits
//! in `io`. The remaining modules bind it to Bevy entities, avian2d sensors and
//! spatial queries.

mod adapter;
mod components;
mod controller;
mod crush;
mod error;
mod events;
mod gate;
mod interpolate;
mod io;
mod spawn;
mod systems;
#[cfg(test)]
mod tests;
mod transport;

pub use adapter::TransformIo;
pub use components::TrapZone;
pub use controller::{Activation, ActivationController, ControllerStep, PLAYER_TAG};
pub use crush::{CrushDetector, CrushEvent, CrushSettings, closing_wall_targets};
pub use error::TransportError;
pub use events::{PlayerCrushedEvent, TrapActivatedEvent, TrapCompletedEvent};
pub use gate::TriggerGate;
pub use interpolate::position_at;
pub use io::{ActorState, CrushRegion, OverlapQuery, PositionIo, StaleHandle};
pub(crate) use spawn::spawn_transport_trap;
pub use transport::{
    Phase, RunCompletion, RunId, TimedTransport, TrackedObject, TransportRun, TransportSettings,
};

use bevy::prelude::*;

use crate::core::GameState;
use crate::traps::systems::{advance_traps, detect_trap_zone_entries, reset_traps};

pub struct TrapsPlugin;

impl Plugin for TrapsPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<TrapActivatedEvent>()
            .add_message::<TrapCompletedEvent>()
            .add_message::<PlayerCrushedEvent>()
            .add_systems(
                Update,
                (detect_trap_zone_entries, advance_traps)
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(Update, reset_traps);
    }
}
