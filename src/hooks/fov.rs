//! Bow-draw FOV zoom
//!
//! While the player actively draws a bow-kind item, the outgoing camera FOV
//! shrinks quadratically with draw time, bottoming out at the configured
//! scale once the draw is complete.

use std::sync::Arc;

use crate::config::ZoomConfig;
use crate::engine::{EngineEvent, EventHandler};

/// Handler for FOV update events
pub fn fov_handler(config: &ZoomConfig) -> EventHandler {
    let config = config.clone();
    Arc::new(move |event, _services| {
        if let EngineEvent::FovUpdate { fov, new_fov, using } = event {
            if let Some(item) = using {
                if item.kind == config.bow_kind {
                    *new_fov = *fov * zoom_factor(item.use_ticks, &config);
                }
            }
        }
    })
}

/// Scale factor for a bow drawn for `ticks`: ramps quadratically over
/// `max_draw_ticks`, then holds at full zoom.
fn zoom_factor(ticks: u32, config: &ZoomConfig) -> f32 {
    let mut modifier = ticks as f32 / config.max_draw_ticks as f32;
    if modifier > 1.0 {
        modifier = 1.0;
    } else {
        modifier *= modifier;
    }
    1.0 - modifier * config.fov_scale
}
