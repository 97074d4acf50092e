//! Core domain: level complete screen.

use bevy::prelude::*;

use crate::content::LevelLibrary;
use crate::core::RunStats;

/// Marker for level complete screen UI root
#[derive(Component, Debug)]
pub struct LevelCompleteUI;

pub(crate) fn spawn_level_complete_screen(
    mut commands: Commands,
    stats: Res<RunStats>,
    library: Option<Res<LevelLibrary>>,
) {
    let bg_color = Color::srgba(0.02, 0.05, 0.1, 0.9);
    let title_color = Color::srgb(0.95, 0.85, 0.3);
    let text_color = Color::srgb(0.9, 0.9, 0.9);
    let muted_text = Color::srgb(0.6, 0.6, 0.7);

    let has_next = library
        .as_ref()
        .is_some_and(|l| l.next_after(stats.world, stats.stage).is_some());
    let prompt = if has_next {
        "Press ENTER for the next level"
    } else {
        "Press ENTER to play again from the start"
    };

    commands
        .spawn((
            LevelCompleteUI,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(bg_color),
            ZIndex(200),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(format!("WORLD {}-{} CLEAR", stats.world, stats.stage)),
                TextFont {
                    font_size: 64.0,
                    ..default()
                },
                TextColor(title_color),
                Node {
                    margin: UiRect::bottom(Val::Px(30.0)),
                    ..default()
                },
            ));

            for line in [
                format!("Time: {}", stats.formatted_time()),
                format!("Coins: {:02}", stats.coins),
                format!("Deaths: {}", stats.death_count),
            ] {
                parent.spawn((
                    Text::new(line),
                    TextFont {
                        font_size: 22.0,
                        ..default()
                    },
                    TextColor(text_color),
                    Node {
                        margin: UiRect::bottom(Val::Px(10.0)),
                        ..default()
                    },
                ));
            }

            parent.spawn((
                Text::new(prompt),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(muted_text),
                Node {
                    margin: UiRect::top(Val::Px(30.0)),
                    ..default()
                },
            ));
        });
}

pub(crate) fn cleanup_level_complete_screen(
    mut commands: Commands,
    query: Query<Entity, With<LevelCompleteUI>>,
) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}
