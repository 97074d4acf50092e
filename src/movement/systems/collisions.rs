//! Movement domain: ground detection.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{Dead, GameLayer, MovementState, MovementTuning, Player};

pub(crate) fn detect_ground(
    spatial_query: SpatialQuery,
    tuning: Res<MovementTuning>,
    mut query: Query<(&Transform, &Collider, &mut MovementState), (With<Player>, Without<Dead>)>,
) {
    // Platforms and trap walls live on the Ground layer; boundary walls count too
    let ground_filter = SpatialQueryFilter::from_mask([GameLayer::Ground, GameLayer::Wall]);

    for (transform, collider, mut state) in &mut query {
        let was_on_ground = state.on_ground;

        let player_half_height = match collider.shape_scaled().as_cuboid() {
            Some(c) => c.half_extents.y,
            None => 16.0,
        };

        let ray_origin = transform.translation.truncate() - Vec2::new(0.0, player_half_height);
        let hit = spatial_query.cast_ray(ray_origin, Dir2::NEG_Y, 4.0, true, &ground_filter);

        state.on_ground = hit.is_some();

        if state.on_ground || was_on_ground {
            // Grounded, or just walked off an edge: the coyote window restarts
            state.coyote_timer = tuning.coyote_time;
        }
        if state.on_ground && !was_on_ground {
            debug!("Landed");
        } else if !state.on_ground && was_on_ground {
            debug!("Left ground, coyote window {:.2}s", state.coyote_timer);
        }
    }
}
