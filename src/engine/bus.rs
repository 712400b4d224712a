//! Engine event bus
//!
//! The host engine owns dispatch; this is the registration surface plus the
//! in-crate implementation used for wiring and tests. Handlers are plain
//! function values registered per side; dispatch invokes only handlers whose
//! side and event kind match, in registration order, on the calling thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use uuid::Uuid;

use super::EngineServices;

/// Client vs server execution context of the host engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Client,
    Server,
}

/// Tick phases as the engine reports them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickPhase {
    Start,
    End,
}

/// Entity kinds the hooks care about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Minecart,
    Other,
}

/// A live entity shared with the engine
#[derive(Debug)]
pub struct EntityHandle {
    /// The entity's unique id, as the engine tracks it
    pub id: Uuid,
    pub kind: EntityKind,
    glowing: AtomicBool,
}

impl EntityHandle {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            glowing: AtomicBool::new(false),
        }
    }

    pub fn set_glowing(&self, glowing: bool) {
        self.glowing.store(glowing, Ordering::SeqCst);
    }

    pub fn is_glowing(&self) -> bool {
        self.glowing.load(Ordering::SeqCst)
    }
}

/// Item-in-use state reported alongside an FOV update
#[derive(Debug, Clone)]
pub struct ItemUse {
    /// Kind identifier of the item being used
    pub kind: String,
    /// How many ticks the item has been in use
    pub use_ticks: u32,
}

/// Engine events the pack subscribes to
#[derive(Debug)]
pub enum EngineEvent {
    /// Camera FOV recomputation; handlers adjust `new_fov` in place
    FovUpdate {
        /// The FOV the engine computed before any handler ran
        fov: f32,
        /// The outgoing FOV, possibly already adjusted by earlier handlers
        new_fov: f32,
        /// Item currently in active use, if any
        using: Option<ItemUse>,
    },

    /// Client tick; fired with Start and End phases
    ClientTick { phase: TickPhase },

    /// An entity has been spawned into the world
    EntityJoinWorld { entity: Arc<EntityHandle> },

    /// Raw bytes arrived on a mod messaging channel
    PacketReceived { channel: String, payload: Bytes },
}

/// Discriminant used for subscription matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    FovUpdate,
    ClientTick,
    EntityJoinWorld,
    PacketReceived,
}

impl EngineEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            EngineEvent::FovUpdate { .. } => EventKind::FovUpdate,
            EngineEvent::ClientTick { .. } => EventKind::ClientTick,
            EngineEvent::EntityJoinWorld { .. } => EventKind::EntityJoinWorld,
            EngineEvent::PacketReceived { .. } => EventKind::PacketReceived,
        }
    }
}

/// Handler function value registered against the bus
pub type EventHandler = Arc<dyn Fn(&mut EngineEvent, &EngineServices) + Send + Sync>;

struct Registration {
    name: &'static str,
    side: Side,
    kind: EventKind,
    handler: EventHandler,
}

/// Registration surface plus dispatch, standing in for the host engine's bus
#[derive(Default)]
pub struct EventBus {
    handlers: Vec<Registration>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named handler for one event kind on one side
    pub fn subscribe(&mut self, name: &'static str, side: Side, kind: EventKind, handler: EventHandler) {
        tracing::debug!("registered handler '{}' for {:?} on {:?}", name, kind, side);
        self.handlers.push(Registration {
            name,
            side,
            kind,
            handler,
        });
    }

    /// Dispatch an event on the given side. Returns how many handlers ran.
    pub fn dispatch(&self, side: Side, event: &mut EngineEvent, services: &EngineServices) -> usize {
        let kind = event.kind();
        let mut ran = 0;

        for registration in &self.handlers {
            if registration.side == side && registration.kind == kind {
                tracing::trace!("dispatching {:?} to '{}'", kind, registration.name);
                (registration.handler)(event, services);
                ran += 1;
            }
        }

        ran
    }

    /// Number of registered handlers
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{
        BlockPos, ChatSink, InMemoryScoreboard, LocalAvatar, MainContext, PlayerHandle, SparseWorld,
    };
    use std::sync::atomic::AtomicUsize;

    struct NullChat;

    #[async_trait::async_trait]
    impl ChatSink for NullChat {
        async fn display_message(
            &self,
            _player: &PlayerHandle,
            _text: &str,
        ) -> crate::engine::EngineResult<()> {
            Ok(())
        }
    }

    fn services(ctx: &MainContext) -> EngineServices {
        EngineServices {
            world: Arc::new(SparseWorld::default()),
            scoreboard: Arc::new(InMemoryScoreboard::default()),
            chat: Arc::new(NullChat),
            player: PlayerHandle::new("tester"),
            avatar: Arc::new(LocalAvatar::new(BlockPos::new(0, 64, 0))),
            main: ctx.handle(),
        }
    }

    #[tokio::test]
    async fn test_dispatch_filters_by_side() {
        let ctx = MainContext::new();
        let services = services(&ctx);
        let calls = Arc::new(AtomicUsize::new(0));

        let mut bus = EventBus::new();
        let calls2 = calls.clone();
        bus.subscribe(
            "client_only",
            Side::Client,
            EventKind::ClientTick,
            Arc::new(move |_, _| {
                calls2.fetch_add(1, Ordering::SeqCst);
            }),
        );

        let mut event = EngineEvent::ClientTick {
            phase: TickPhase::End,
        };
        assert_eq!(bus.dispatch(Side::Server, &mut event, &services), 0);
        assert_eq!(bus.dispatch(Side::Client, &mut event, &services), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_dispatch_filters_by_kind() {
        let ctx = MainContext::new();
        let services = services(&ctx);

        let mut bus = EventBus::new();
        bus.subscribe(
            "fov_only",
            Side::Client,
            EventKind::FovUpdate,
            Arc::new(|_, _| panic!("should not run for a tick event")),
        );

        let mut event = EngineEvent::ClientTick {
            phase: TickPhase::Start,
        };
        assert_eq!(bus.dispatch(Side::Client, &mut event, &services), 0);
    }

    #[tokio::test]
    async fn test_handlers_can_mutate_the_event() {
        let ctx = MainContext::new();
        let services = services(&ctx);

        let mut bus = EventBus::new();
        bus.subscribe(
            "halve_fov",
            Side::Client,
            EventKind::FovUpdate,
            Arc::new(|event, _| {
                if let EngineEvent::FovUpdate { new_fov, .. } = event {
                    *new_fov *= 0.5;
                }
            }),
        );

        let mut event = EngineEvent::FovUpdate {
            fov: 70.0,
            new_fov: 70.0,
            using: None,
        };
        bus.dispatch(Side::Client, &mut event, &services);

        match event {
            EngineEvent::FovUpdate { new_fov, .. } => assert_eq!(new_fov, 35.0),
            _ => unreachable!(),
        }
    }
}
