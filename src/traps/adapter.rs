//! Traps domain: Bevy-backed implementations of the transport capabilities.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::core::{HitSource, PlayerHitEvent};
use crate::movement::{Dead, GameLayer, Invulnerable, Player};
use crate::traps::io::{ActorState, CrushRegion, OverlapQuery, PositionIo, StaleHandle};

/// Reads and writes entity positions through their `Transform`.
pub struct TransformIo<'a, 'w, 's> {
    transforms: &'a mut Query<'w, 's, &'static mut Transform>,
}

impl<'a, 'w, 's> TransformIo<'a, 'w, 's> {
    pub fn new(transforms: &'a mut Query<'w, 's, &'static mut Transform>) -> Self {
        Self { transforms }
    }
}

impl PositionIo<Entity> for TransformIo<'_, '_, '_> {
    fn position(&self, handle: Entity) -> Option<Vec2> {
        self.transforms
            .get(handle)
            .ok()
            .map(|transform| transform.translation.truncate())
    }

    fn set_position(&mut self, handle: Entity, position: Vec2) -> Result<(), StaleHandle> {
        let mut transform = self.transforms.get_mut(handle).map_err(|_| StaleHandle)?;
        transform.translation.x = position.x;
        transform.translation.y = position.y;
        Ok(())
    }
}

pub(crate) type LivePlayers<'w, 's> =
    Query<'w, 's, Option<&'static Invulnerable>, (With<Player>, Without<Dead>)>;

/// Finds live players inside a crush region and turns accepted hits into
/// `PlayerHitEvent`s, collected until the caller flushes them.
pub(crate) struct ActorProbe<'a, 'w, 's> {
    spatial: &'a SpatialQuery<'w, 's>,
    players: &'a LivePlayers<'w, 's>,
    hits: Vec<PlayerHitEvent>,
}

impl<'a, 'w, 's> ActorProbe<'a, 'w, 's> {
    pub(crate) fn new(spatial: &'a SpatialQuery<'w, 's>, players: &'a LivePlayers<'w, 's>) -> Self {
        Self {
            spatial,
            players,
            hits: Vec::new(),
        }
    }

    pub(crate) fn into_hits(self) -> Vec<PlayerHitEvent> {
        self.hits
    }
}

impl OverlapQuery<Entity> for ActorProbe<'_, '_, '_> {
    fn query_overlap(&self, region: &CrushRegion) -> Vec<Entity> {
        let shape = Collider::rectangle(region.size.x, region.size.y);
        let filter = SpatialQueryFilter::from_mask(GameLayer::Player);
        self.spatial
            .shape_intersections(&shape, region.center, region.angle, &filter)
            .into_iter()
            .filter(|entity| self.players.contains(*entity))
            .collect()
    }
}

impl ActorState<Entity> for ActorProbe<'_, '_, '_> {
    fn is_invulnerable(&self, actor: Entity) -> bool {
        match self.players.get(actor) {
            Ok(invulnerable) => invulnerable.is_some_and(Invulnerable::is_active),
            // Not a live player: nothing to hurt.
            Err(_) => true,
        }
    }

    fn apply_damage(&mut self, actor: Entity) {
        self.hits.push(PlayerHitEvent {
            player: actor,
            lethal: false,
            source: HitSource::Crush,
        });
    }

    fn kill(&mut self, actor: Entity) {
        self.hits.push(PlayerHitEvent {
            player: actor,
            lethal: true,
            source: HitSource::Crush,
        });
    }
}
