//! Traps domain: capabilities the transport core uses to reach the scene.
//!
//! The core never owns the objects it moves. Hosts implement these traits over
//! whatever stores positions and actors (Bevy queries in the game, hash maps in
//! tests) and hand them in on every call.

use bevy::math::Vec2;
use thiserror::Error;

/// The handle no longer resolves to a live object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("tracked object is no longer resolvable")]
pub struct StaleHandle;

/// Position reads and writes for tracked objects and actors.
pub trait PositionIo<H> {
    fn position(&self, handle: H) -> Option<Vec2>;
    fn set_position(&mut self, handle: H, position: Vec2) -> Result<(), StaleHandle>;
}

/// Oriented rectangle probed by crush detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrushRegion {
    pub center: Vec2,
    /// Full extents: x runs along the wall axis, y across it.
    pub size: Vec2,
    /// Rotation of the wall axis from +X, in radians.
    pub angle: f32,
}

/// Spatial overlap lookup.
pub trait OverlapQuery<H> {
    fn query_overlap(&self, region: &CrushRegion) -> Vec<H>;
}

/// Actor state and the effects a trap can have on it.
pub trait ActorState<H> {
    fn is_invulnerable(&self, actor: H) -> bool;
    /// A survivable hit. Invulnerable actors are expected to shrug it off.
    fn apply_damage(&mut self, actor: H);
    /// An unconditional kill.
    fn kill(&mut self, actor: H);
}
