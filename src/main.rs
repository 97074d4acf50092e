mod content;
mod core;
#[cfg(feature = "dev-tools")]
mod debug;
mod hazards;
mod level;
mod movement;
mod traps;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::core::PIXELS_PER_UNIT;

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Trapworks".to_string(),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(PhysicsPlugins::default())
    .insert_resource(Gravity(Vec2::NEG_Y * 9.81 * PIXELS_PER_UNIT))
    .add_plugins((
        core::CorePlugin,
        content::ContentPlugin,
        movement::MovementPlugin,
        traps::TrapsPlugin,
        hazards::HazardsPlugin,
        level::LevelPlugin,
    ));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(debug::DebugPlugin);

    app.run();
}
