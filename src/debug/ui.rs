//! Debug domain: overlay widgets.

use bevy::prelude::*;

/// Marker for debug info overlay (position, trap states, etc.)
#[derive(Component, Debug)]
pub struct DebugInfoOverlay;

/// Marker for status message text
#[derive(Component, Debug)]
pub struct DebugStatusMessage;

/// Screen corner a debug text sits in.
#[derive(Debug, Clone, Copy)]
enum Corner {
    BottomLeft,
    BottomRight,
}

impl Corner {
    fn node(self, padding: f32) -> Node {
        let mut node = Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(20.0),
            padding: UiRect::all(Val::Px(padding)),
            ..default()
        };
        match self {
            Corner::BottomLeft => node.left = Val::Px(20.0),
            Corner::BottomRight => node.right = Val::Px(20.0),
        }
        node
    }
}

fn debug_text(
    text: &str,
    font_size: f32,
    color: Color,
    corner: Corner,
    padding: f32,
) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(color),
        corner.node(padding),
        ZIndex(500),
    )
}

pub(crate) fn spawn_debug_info_overlay(commands: &mut Commands) {
    commands.spawn((
        DebugInfoOverlay,
        debug_text(
            "Loading...",
            12.0,
            Color::srgb(0.8, 0.9, 0.8),
            Corner::BottomLeft,
            8.0,
        ),
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
    ));
}

pub(crate) fn spawn_status_message(commands: &mut Commands) {
    commands.spawn((
        DebugStatusMessage,
        debug_text("", 16.0, Color::srgb(0.9, 0.7, 0.3), Corner::BottomRight, 0.0),
    ));
}
