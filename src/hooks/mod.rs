//! The extension hooks
//!
//! Each hook is a named handler function registered against the engine event
//! bus. Hooks capture what they need from the configuration at registration
//! time and otherwise only touch the collaborators in `EngineServices`.

mod fov;
mod item_props;
mod loot;
mod spawn;
mod tick;

pub use fov::*;
pub use item_props::*;
pub use loot::*;
pub use spawn::*;
pub use tick::*;

use crate::config::ModConfig;
use crate::engine::{EventBus, EventKind, Side};

/// Register every hook in the pack against the bus
pub fn register_hooks(bus: &mut EventBus, config: &ModConfig) {
    bus.subscribe(
        "bow_zoom",
        Side::Client,
        EventKind::FovUpdate,
        fov::fov_handler(&config.zoom),
    );
    bus.subscribe(
        "trigger_spin",
        Side::Client,
        EventKind::ClientTick,
        tick::tick_handler(&config.spin),
    );
    bus.subscribe(
        "minecart_team",
        Side::Client,
        EventKind::EntityJoinWorld,
        spawn::spawn_handler(&config.team),
    );
    bus.subscribe(
        "loot_display",
        Side::Client,
        EventKind::PacketReceived,
        loot::loot_handler(&config.chat),
    );
}

#[cfg(test)]
pub(crate) mod testutil {
    use std::sync::Arc;

    use crate::engine::{
        BlockPos, EngineServices, InMemoryScoreboard, LocalAvatar, MainContext, PlayerHandle,
        RecordingChat, SparseWorld,
    };

    /// Services wired to in-memory fakes, plus the pieces tests assert on
    pub(crate) struct TestHarness {
        pub services: EngineServices,
        pub ctx: MainContext,
        pub world: Arc<SparseWorld>,
        pub scoreboard: Arc<InMemoryScoreboard>,
        pub chat: Arc<RecordingChat>,
        pub avatar: Arc<LocalAvatar>,
    }

    pub(crate) fn harness() -> TestHarness {
        let world = Arc::new(SparseWorld::default());
        let scoreboard = Arc::new(InMemoryScoreboard::default());
        let chat = Arc::new(RecordingChat::default());
        let avatar = Arc::new(LocalAvatar::new(BlockPos::new(0, 64, 0)));
        let ctx = MainContext::new();

        let services = EngineServices {
            world: world.clone(),
            scoreboard: scoreboard.clone(),
            chat: chat.clone(),
            player: PlayerHandle::new("tester"),
            avatar: avatar.clone(),
            main: ctx.handle(),
        };

        TestHarness {
            services,
            ctx,
            world,
            scoreboard,
            chat,
            avatar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_hooks_wires_everything() {
        let mut bus = EventBus::new();
        register_hooks(&mut bus, &ModConfig::default());
        assert_eq!(bus.len(), 4);
    }
}
