//! Traps domain: components attached to trap trigger zones.

use bevy::prelude::*;

use crate::traps::controller::ActivationController;

/// Sensor zone that sets a transport trap off when the player walks in.
#[derive(Component, Debug)]
pub struct TrapZone {
    pub trap_id: String,
    pub controller: ActivationController<Entity>,
}

impl TrapZone {
    pub fn new(trap_id: impl Into<String>, controller: ActivationController<Entity>) -> Self {
        Self {
            trap_id: trap_id.into(),
            controller,
        }
    }
}
