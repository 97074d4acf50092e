//! Hazards domain: falling platforms, acid rain, spikes, death barriers and
//! bounce pads.

mod components;
mod falling;
mod rain;
mod spawn;
mod systems;

pub use components::{
    AcidDrop, AcidRain, BouncePlatform, Cloud, FallingPlatform, FallingSpike, Hazard, SpikeTrap,
};
pub use falling::{FallSequence, FallSettings, FallStage, FallStep};
pub use rain::{RAIN_COOLDOWN, RainCycle, RainSettings, RainStage, RainStep};
pub(crate) use spawn::spawn_hazard;

use bevy::prelude::*;

use crate::core::GameState;
use crate::hazards::systems::{
    advance_acid_rain, advance_falling_platforms, detect_acid_rain_entries, detect_bounces,
    detect_falling_platform_contacts, detect_hazard_contacts, detect_spike_trap_entries,
    fade_bounce_tint, reset_hazards, update_acid_drops,
};

pub struct HazardsPlugin;

impl Plugin for HazardsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                detect_hazard_contacts,
                detect_falling_platform_contacts,
                detect_acid_rain_entries,
                detect_spike_trap_entries,
                detect_bounces,
            )
                .run_if(in_state(GameState::Playing)),
        )
        .add_systems(
            Update,
            (
                advance_falling_platforms,
                advance_acid_rain,
                update_acid_drops,
                fade_bounce_tint,
            )
                .run_if(in_state(GameState::Playing)),
        )
        .add_systems(Update, reset_hazards);
    }
}
