//! Core domain: in-level HUD showing coins, deaths and the level timer.

use bevy::prelude::*;

use crate::core::RunStats;

#[derive(Component, Debug)]
pub struct HudRoot;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudField {
    Level,
    Coins,
    Deaths,
    Time,
}

impl HudField {
    fn render(self, stats: &RunStats) -> String {
        match self {
            HudField::Level => format!("WORLD {}-{}", stats.world, stats.stage),
            HudField::Coins => format!("COINS: {:02}", stats.coins),
            HudField::Deaths => format!("DEATHS: {}", stats.death_count),
            HudField::Time => format!("TIME: {}", stats.formatted_time()),
        }
    }
}

pub(crate) fn spawn_hud(mut commands: Commands, stats: Res<RunStats>) {
    let text_color = Color::srgb(0.95, 0.95, 0.95);

    commands
        .spawn((
            HudRoot,
            Node {
                width: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                flex_direction: FlexDirection::Row,
                justify_content: JustifyContent::SpaceBetween,
                padding: UiRect::all(Val::Px(12.0)),
                ..default()
            },
            ZIndex(100),
        ))
        .with_children(|parent| {
            for field in [HudField::Level, HudField::Coins, HudField::Deaths, HudField::Time] {
                parent.spawn((
                    field,
                    Text::new(field.render(&stats)),
                    TextFont {
                        font_size: 20.0,
                        ..default()
                    },
                    TextColor(text_color),
                ));
            }
        });
}

pub(crate) fn update_hud(stats: Res<RunStats>, mut fields: Query<(&HudField, &mut Text)>) {
    if !stats.is_changed() {
        return;
    }
    for (field, mut text) in &mut fields {
        **text = field.render(&stats);
    }
}

pub(crate) fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}
