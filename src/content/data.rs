//! Content domain: RON-backed definitions for levels and gameplay tuning.
//!
//! Positions and sizes are `(x, y)` tuples in world pixels. Boxes are
//! described by their center and full size.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub type Point = (f32, f32);

pub fn to_vec2(point: Point) -> Vec2 {
    Vec2::new(point.0, point.1)
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct BoxDef {
    pub position: Point,
    pub size: Point,
}

impl BoxDef {
    pub fn center(&self) -> Vec2 {
        to_vec2(self.position)
    }

    pub fn extents(&self) -> Vec2 {
        to_vec2(self.size)
    }

    pub fn has_area(&self) -> bool {
        self.size.0 > 0.0 && self.size.1 > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum SolidKind {
    Ground,
    Wall,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SolidDef {
    pub kind: SolidKind,
    pub area: BoxDef,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum MoveDirection {
    Left,
    Right,
    Up,
    Down,
}

impl MoveDirection {
    pub fn unit(self) -> Vec2 {
        match self {
            MoveDirection::Left => Vec2::NEG_X,
            MoveDirection::Right => Vec2::X,
            MoveDirection::Up => Vec2::Y,
            MoveDirection::Down => Vec2::NEG_Y,
        }
    }

    pub fn vector(self, distance: f32) -> Vec2 {
        self.unit() * distance
    }
}

fn default_fall_delay() -> f32 {
    0.2
}

fn default_shake_duration() -> f32 {
    0.2
}

fn default_shake_intensity() -> f32 {
    3.2
}

fn default_platform_fall_speed() -> f32 {
    288.0
}

fn default_fall_distance() -> f32 {
    640.0
}

fn default_despawn_delay() -> f32 {
    0.5
}

fn default_spike_fall_speed() -> f32 {
    15.0
}

/// One trap placed in a level. Every transport-backed trap is a zone plus the
/// objects it moves.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum TrapDef {
    CrushingWalls {
        id: String,
        zone: BoxDef,
        left_wall: BoxDef,
        right_wall: BoxDef,
        final_gap: f32,
        move_speed: f32,
        #[serde(default)]
        repeatable: bool,
        #[serde(default)]
        return_delay: f32,
    },
    MovingPlatforms {
        id: String,
        zone: BoxDef,
        platforms: Vec<BoxDef>,
        direction: MoveDirection,
        distance: f32,
        move_speed: f32,
        #[serde(default)]
        repeatable: bool,
        #[serde(default)]
        return_delay: f32,
    },
    FallingPlatform {
        id: String,
        platform: BoxDef,
        #[serde(default = "default_fall_delay")]
        delay_before_fall: f32,
        #[serde(default = "default_shake_duration")]
        shake_duration: f32,
        #[serde(default = "default_shake_intensity")]
        shake_intensity: f32,
        #[serde(default = "default_platform_fall_speed")]
        fall_speed: f32,
        #[serde(default = "default_fall_distance")]
        fall_distance: f32,
        #[serde(default = "default_despawn_delay")]
        despawn_delay: f32,
    },
    AcidRain {
        id: String,
        zone: BoxDef,
        clouds: Vec<BoxDef>,
        duration: f32,
        drop_frequency: f32,
        drop_speed: f32,
        #[serde(default)]
        repeatable: bool,
    },
    SpikeTrap {
        id: String,
        zone: BoxDef,
        spike: BoxDef,
        /// Fall speed in world units; converted to a gravity scale.
        #[serde(default = "default_spike_fall_speed")]
        fall_speed: f32,
    },
    SpikeBlock {
        id: String,
        block: BoxDef,
    },
    DeathBarrier {
        id: String,
        zone: BoxDef,
    },
    BouncePlatform {
        id: String,
        platform: BoxDef,
        bounce_force: f32,
    },
}

impl TrapDef {
    pub fn id(&self) -> &str {
        match self {
            TrapDef::CrushingWalls { id, .. }
            | TrapDef::MovingPlatforms { id, .. }
            | TrapDef::FallingPlatform { id, .. }
            | TrapDef::AcidRain { id, .. }
            | TrapDef::SpikeTrap { id, .. }
            | TrapDef::SpikeBlock { id, .. }
            | TrapDef::DeathBarrier { id, .. }
            | TrapDef::BouncePlatform { id, .. } => id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            TrapDef::CrushingWalls { .. } => "CrushingWalls",
            TrapDef::MovingPlatforms { .. } => "MovingPlatforms",
            TrapDef::FallingPlatform { .. } => "FallingPlatform",
            TrapDef::AcidRain { .. } => "AcidRain",
            TrapDef::SpikeTrap { .. } => "SpikeTrap",
            TrapDef::SpikeBlock { .. } => "SpikeBlock",
            TrapDef::DeathBarrier { .. } => "DeathBarrier",
            TrapDef::BouncePlatform { .. } => "BouncePlatform",
        }
    }

    /// Traps driven by the timed transport core.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            TrapDef::CrushingWalls { .. } | TrapDef::MovingPlatforms { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LevelDef {
    pub world: u32,
    pub stage: u32,
    pub name: String,
    pub player_spawn: Point,
    pub solids: Vec<SolidDef>,
    #[serde(default)]
    pub coins: Vec<Point>,
    #[serde(default)]
    pub goal: Option<BoxDef>,
    #[serde(default)]
    pub traps: Vec<TrapDef>,
}

impl LevelDef {
    pub fn key(&self) -> (u32, u32) {
        (self.world, self.stage)
    }

    pub fn label(&self) -> String {
        format!("{}-{} \"{}\"", self.world, self.stage, self.name)
    }
}

// ---------------------------------------------------------------------------
// Gameplay defaults
// ---------------------------------------------------------------------------

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GameplayDefaults {
    pub schema_version: u32,
    /// Level files in play order, relative to the data directory.
    pub levels: Vec<String>,
    pub movement: MovementDefaults,
    pub level_flow: LevelFlowDefaults,
    pub crush: CrushDefaults,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct MovementDefaults {
    pub move_speed: f32,
    /// Multiplier on `move_speed` giving the horizontal acceleration.
    pub transition_speed: f32,
    pub max_jump_height: f32,
    /// Seconds for a full jump, up and down.
    pub max_jump_time: f32,
    pub coyote_time: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct LevelFlowDefaults {
    pub start_world: u32,
    pub start_stage: u32,
    /// Seconds between a death and the level reset.
    pub reset_delay: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct CrushDefaults {
    pub sample_interval: f32,
    pub margin_factor: f32,
    pub probe_padding: f32,
    pub probe_height: f32,
    pub nudge_distance: f32,
}

impl Default for GameplayDefaults {
    fn default() -> Self {
        Self {
            schema_version: 1,
            levels: vec!["level_1_1.ron".to_string(), "level_1_2.ron".to_string()],
            movement: MovementDefaults {
                move_speed: 256.0,
                transition_speed: 5.0,
                max_jump_height: 160.0,
                max_jump_time: 1.0,
                coyote_time: 0.2,
            },
            level_flow: LevelFlowDefaults {
                start_world: 1,
                start_stage: 1,
                reset_delay: 1.0,
            },
            crush: CrushDefaults {
                sample_interval: 0.1,
                margin_factor: 1.2,
                probe_padding: 6.4,
                probe_height: 64.0,
                nudge_distance: 32.0,
            },
        }
    }
}
