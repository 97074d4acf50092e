//! Traps domain: crush detection between two closing walls.

use std::fmt::Debug;

use bevy::log::info;
use bevy::math::Vec2;

use crate::traps::io::{ActorState, CrushRegion, OverlapQuery, PositionIo};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrushSettings {
    /// Final gap the walls close to.
    pub threshold: f32,
    /// Minimum time between two overlap probes.
    pub sample_interval: f32,
    /// The gap counts as crushing once it is within `threshold * margin_factor`.
    pub margin_factor: f32,
    /// Extra probe length beyond the live gap.
    pub probe_padding: f32,
    /// Probe extent across the wall axis.
    pub probe_height: f32,
    /// How far a crushed actor is pushed out along the perpendicular.
    pub nudge_distance: f32,
}

impl Default for CrushSettings {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            sample_interval: 0.1,
            margin_factor: 1.2,
            probe_padding: 0.2,
            probe_height: 2.0,
            nudge_distance: 1.0,
        }
    }
}

impl CrushSettings {
    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    pub fn crush_limit(&self) -> f32 {
        self.threshold * self.margin_factor
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrushEvent<H> {
    pub actor: H,
    /// Live gap between the walls when the crush was detected.
    pub gap: f32,
}

/// Samples the space between two walls and reports each actor once per
/// contiguous stretch of time it is found pinned there.
#[derive(Debug, Clone)]
pub struct CrushDetector<H> {
    first: H,
    second: H,
    settings: CrushSettings,
    since_sample: f32,
    pinned: Vec<H>,
}

impl<H: Copy + PartialEq + Debug> CrushDetector<H> {
    pub fn new(first: H, second: H, settings: CrushSettings) -> Self {
        Self {
            first,
            second,
            settings,
            since_sample: 0.0,
            pinned: Vec::new(),
        }
    }

    pub fn settings(&self) -> &CrushSettings {
        &self.settings
    }

    /// Actors currently inside an overlap interval.
    pub fn pinned(&self) -> &[H] {
        &self.pinned
    }

    /// Probe rectangle spanning the two wall positions.
    pub fn region_between(&self, first: Vec2, second: Vec2) -> CrushRegion {
        let axis = second - first;
        CrushRegion {
            center: (first + second) / 2.0,
            size: Vec2::new(
                axis.length() + self.settings.probe_padding,
                self.settings.probe_height,
            ),
            angle: axis.to_angle(),
        }
    }

    /// Accounts for `dt` of wall movement and samples when the interval has
    /// elapsed, or unconditionally when `force` is set.
    pub fn tick<P, W>(&mut self, dt: f32, force: bool, io: &mut P, world: &mut W) -> Vec<CrushEvent<H>>
    where
        P: PositionIo<H>,
        W: OverlapQuery<H> + ActorState<H>,
    {
        self.since_sample += dt.max(0.0);
        if !force && self.since_sample + f32::EPSILON < self.settings.sample_interval {
            return Vec::new();
        }
        self.since_sample = 0.0;
        self.sample(io, world)
    }

    /// Probes once, right now.
    pub fn sample<P, W>(&mut self, io: &mut P, world: &mut W) -> Vec<CrushEvent<H>>
    where
        P: PositionIo<H>,
        W: OverlapQuery<H> + ActorState<H>,
    {
        let (Some(first), Some(second)) = (io.position(self.first), io.position(self.second))
        else {
            self.pinned.clear();
            return Vec::new();
        };

        let gap = first.distance(second);
        if gap > self.settings.crush_limit() {
            self.pinned.clear();
            return Vec::new();
        }

        let region = self.region_between(first, second);
        let axis = (second - first).normalize_or_zero();
        let outward = if axis == Vec2::ZERO { Vec2::Y } else { axis.perp() };

        let mut events = Vec::new();
        let mut still_pinned = Vec::new();
        for actor in world.query_overlap(&region) {
            if actor == self.first || actor == self.second || world.is_invulnerable(actor) {
                continue;
            }
            still_pinned.push(actor);
            if self.pinned.contains(&actor) {
                continue;
            }

            info!("[CRUSH] Actor {:?} crushed, gap={:.2}", actor, gap);
            world.apply_damage(actor);
            if let Some(position) = io.position(actor) {
                // Push the actor out so it does not stay lodged between the walls.
                let _ = io.set_position(actor, position + outward * self.settings.nudge_distance);
            }
            events.push(CrushEvent { actor, gap });
        }
        self.pinned = still_pinned;

        events
    }

    pub fn reset(&mut self) {
        self.since_sample = 0.0;
        self.pinned.clear();
    }
}

/// Targets for two walls closing on each other until `final_gap` remains.
/// Each wall covers half of the distance to close.
pub fn closing_wall_targets(first: Vec2, second: Vec2, final_gap: f32) -> (Vec2, Vec2) {
    let distance = first.distance(second);
    let to_move = ((distance - final_gap) / 2.0).max(0.0);
    let direction = (second - first).normalize_or_zero();
    (first + direction * to_move, second - direction * to_move)
}
