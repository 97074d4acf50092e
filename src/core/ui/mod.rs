mod hud;
mod level_complete;

pub(crate) use hud::{cleanup_hud, spawn_hud, update_hud};
pub(crate) use level_complete::{cleanup_level_complete_screen, spawn_level_complete_screen};
