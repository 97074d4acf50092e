//! Validation of level definitions before they are spawned.

use std::collections::HashSet;

use thiserror::Error;

use super::data::*;
use super::registry::LevelLibrary;

/// A validation error with context about what failed.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("level {level}: {subject}: {problem}")]
pub struct ValidationError {
    pub level: String,
    pub subject: String,
    pub problem: String,
}

struct Checker<'a> {
    level: String,
    subject: String,
    errors: &'a mut Vec<ValidationError>,
}

impl Checker<'_> {
    fn fail(&mut self, problem: String) {
        self.errors.push(ValidationError {
            level: self.level.clone(),
            subject: self.subject.clone(),
            problem,
        });
    }

    fn positive(&mut self, field: &str, value: f32) {
        if !value.is_finite() || value <= 0.0 {
            self.fail(format!("{} must be positive, got {}", field, value));
        }
    }

    fn non_negative(&mut self, field: &str, value: f32) {
        if !value.is_finite() || value < 0.0 {
            self.fail(format!("{} must be non-negative, got {}", field, value));
        }
    }

    fn area(&mut self, field: &str, area: &BoxDef) {
        if !area.has_area() {
            self.fail(format!("{} has no area: {:?}", field, area.size));
        }
    }
}

/// Problems with a single trap definition. A trap with any problem is not spawned.
pub fn validate_trap(level: &str, trap: &TrapDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut check = Checker {
        level: level.to_string(),
        subject: format!("{} '{}'", trap.kind(), trap.id()),
        errors: &mut errors,
    };

    match trap {
        TrapDef::CrushingWalls {
            zone,
            left_wall,
            right_wall,
            final_gap,
            move_speed,
            return_delay,
            ..
        } => {
            check.area("zone", zone);
            check.area("left_wall", left_wall);
            check.area("right_wall", right_wall);
            check.non_negative("final_gap", *final_gap);
            check.positive("move_speed", *move_speed);
            check.non_negative("return_delay", *return_delay);
        }
        TrapDef::MovingPlatforms {
            zone,
            platforms,
            distance,
            move_speed,
            return_delay,
            ..
        } => {
            check.area("zone", zone);
            if platforms.is_empty() {
                check.fail("needs at least one platform".to_string());
            }
            for platform in platforms {
                check.area("platform", platform);
            }
            check.positive("distance", *distance);
            check.positive("move_speed", *move_speed);
            check.non_negative("return_delay", *return_delay);
        }
        TrapDef::FallingPlatform {
            platform,
            delay_before_fall,
            shake_duration,
            shake_intensity,
            fall_speed,
            fall_distance,
            despawn_delay,
            ..
        } => {
            check.area("platform", platform);
            check.non_negative("delay_before_fall", *delay_before_fall);
            check.non_negative("shake_duration", *shake_duration);
            check.non_negative("shake_intensity", *shake_intensity);
            check.positive("fall_speed", *fall_speed);
            check.positive("fall_distance", *fall_distance);
            check.non_negative("despawn_delay", *despawn_delay);
        }
        TrapDef::AcidRain {
            zone,
            clouds,
            duration,
            drop_frequency,
            drop_speed,
            ..
        } => {
            check.area("zone", zone);
            if clouds.is_empty() {
                check.fail("needs at least one cloud".to_string());
            }
            for cloud in clouds {
                check.area("cloud", cloud);
            }
            check.positive("duration", *duration);
            check.positive("drop_frequency", *drop_frequency);
            check.positive("drop_speed", *drop_speed);
        }
        TrapDef::SpikeTrap {
            zone,
            spike,
            fall_speed,
            ..
        } => {
            check.area("zone", zone);
            check.area("spike", spike);
            check.positive("fall_speed", *fall_speed);
        }
        TrapDef::SpikeBlock { block, .. } => check.area("block", block),
        TrapDef::DeathBarrier { zone, .. } => check.area("zone", zone),
        TrapDef::BouncePlatform {
            platform,
            bounce_force,
            ..
        } => {
            check.area("platform", platform);
            check.positive("bounce_force", *bounce_force);
        }
    }

    errors
}

/// Validate one level: geometry, trap parameters and unique trap ids.
pub fn validate_level(level: &LevelDef) -> Vec<ValidationError> {
    let label = level.label();
    let mut errors = Vec::new();

    {
        let mut check = Checker {
            level: label.clone(),
            subject: "level".to_string(),
            errors: &mut errors,
        };
        if level.solids.is_empty() {
            check.fail("has no solid geometry".to_string());
        }
        for solid in &level.solids {
            check.area("solid", &solid.area);
        }
        if let Some(goal) = &level.goal {
            check.area("goal", goal);
        }
    }

    let mut seen = HashSet::new();
    for trap in &level.traps {
        if !seen.insert(trap.id()) {
            errors.push(ValidationError {
                level: label.clone(),
                subject: format!("{} '{}'", trap.kind(), trap.id()),
                problem: "duplicate trap id".to_string(),
            });
        }
        errors.extend(validate_trap(&label, trap));
    }

    errors
}

/// Validate every level in the library.
/// Returns a list of validation errors, empty if all levels are valid.
pub fn validate_library(library: &LevelLibrary) -> Vec<ValidationError> {
    library.levels().iter().flat_map(validate_level).collect()
}
