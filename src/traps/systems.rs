//! Traps domain: systems feeding zone entries and frame time into trap controllers.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::core::{LevelResetEvent, PlayerHitEvent};
use crate::movement::{Dead, Player};
use crate::traps::adapter::{ActorProbe, LivePlayers, TransformIo};
use crate::traps::components::TrapZone;
use crate::traps::controller::{Activation, PLAYER_TAG};
use crate::traps::events::{PlayerCrushedEvent, TrapActivatedEvent, TrapCompletedEvent};

const UNTAGGED: &str = "Untagged";

/// Routes sensor overlaps with trap zones to their controllers.
pub(crate) fn detect_trap_zone_entries(
    mut collision_events: MessageReader<CollisionStart>,
    mut zones: Query<&mut TrapZone>,
    players: Query<(), (With<Player>, Without<Dead>)>,
    mut transforms: Query<&'static mut Transform>,
    mut activated: MessageWriter<TrapActivatedEvent>,
) {
    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];
        for (zone_entity, other) in pairs {
            let Ok(mut zone) = zones.get_mut(zone_entity) else {
                continue;
            };
            let tag = if players.contains(other) {
                PLAYER_TAG
            } else {
                UNTAGGED
            };

            let io = TransformIo::new(&mut transforms);
            match zone.controller.on_zone_entered(tag, &io) {
                Activation::Started(run) => {
                    let leg = zone
                        .controller
                        .transport()
                        .run()
                        .map_or(0.0, |active| active.total_duration());
                    info!(
                        "[TRAP] '{}' activated ({:?}): {} object(s), leg {:.2}s, hold {:.2}s",
                        zone.trap_id,
                        run,
                        zone.controller.objects().len(),
                        leg,
                        zone.controller.settings().hold
                    );
                    activated.write(TrapActivatedEvent {
                        trap: zone_entity,
                        trap_id: zone.trap_id.clone(),
                        run,
                    });
                }
                Activation::Rejected => match zone.controller.transport().run() {
                    Some(active) => debug!(
                        "[TRAP] '{}' ignored entry, {:?} at {:.2}/{:.2}s (hold {:.2}s left)",
                        zone.trap_id,
                        active.phase(),
                        active.elapsed(),
                        active.total_duration(),
                        active.hold_remaining()
                    ),
                    None => debug!(
                        "[TRAP] '{}' ignored entry (fired={}, running={})",
                        zone.trap_id,
                        zone.controller.gate().has_fired(),
                        zone.controller.gate().run_in_progress()
                    ),
                },
                Activation::Failed(err) => {
                    warn!("[TRAP] '{}' failed to activate: {}", zone.trap_id, err);
                }
                Activation::Ignored => {}
            }
        }
    }
}

/// Advances every trap by the frame time and publishes completions and crushes.
#[allow(clippy::too_many_arguments)]
pub(crate) fn advance_traps(
    time: Res<Time>,
    spatial_query: SpatialQuery,
    players: LivePlayers,
    mut zones: Query<(Entity, &mut TrapZone)>,
    mut transforms: Query<&'static mut Transform>,
    mut completed: MessageWriter<TrapCompletedEvent>,
    mut crushed: MessageWriter<PlayerCrushedEvent>,
    mut hits: MessageWriter<PlayerHitEvent>,
) {
    let dt = time.delta_secs();
    let mut probe = ActorProbe::new(&spatial_query, &players);

    for (entity, mut zone) in &mut zones {
        if !zone.controller.transport().is_running() {
            continue;
        }
        let mut io = TransformIo::new(&mut transforms);
        let step = zone.controller.advance(dt, &mut io, &mut probe);

        for crush in step.crushes {
            crushed.write(PlayerCrushedEvent {
                trap: entity,
                player: crush.actor,
                gap: crush.gap,
            });
        }
        if let Some(done) = step.completion {
            info!(
                "[TRAP] '{}' finished {:?} (returned={})",
                zone.trap_id, done.run, done.returned
            );
            completed.write(TrapCompletedEvent {
                trap: entity,
                trap_id: zone.trap_id.clone(),
                returned: done.returned,
            });
        }
    }

    for hit in probe.into_hits() {
        hits.write(hit);
    }
}

/// Re-arms every trap and puts its objects back when the level restarts.
pub(crate) fn reset_traps(
    mut resets: MessageReader<LevelResetEvent>,
    mut zones: Query<&mut TrapZone>,
    mut transforms: Query<&'static mut Transform>,
) {
    if resets.read().count() == 0 {
        return;
    }

    let mut count = 0;
    for mut zone in &mut zones {
        let mut io = TransformIo::new(&mut transforms);
        zone.controller.reset(&mut io);
        count += 1;
    }
    info!("[TRAP] Reset {} trap(s)", count);
}
