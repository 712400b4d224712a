//! Trigger-block spin
//!
//! Rotates the local player a little every end-phase client tick spent
//! standing on the trigger block.

use std::sync::Arc;

use crate::config::SpinConfig;
use crate::engine::{EngineEvent, EventHandler, TickPhase};

/// Handler for client tick events
pub fn tick_handler(config: &SpinConfig) -> EventHandler {
    let config = config.clone();
    Arc::new(move |event, services| {
        if let EngineEvent::ClientTick { phase } = event {
            if *phase != TickPhase::End {
                return;
            }

            let below = services.avatar.position().below();
            if services.world.block_at(below) == config.trigger_block {
                services.avatar.turn(config.yaw_step, 0.0);
            }
        }
    })
}
