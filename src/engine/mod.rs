//! Engine module - Narrow seams over the host engine
//!
//! The host engine owns rendering, entities, scoreboards, chat and the
//! transport. This module defines:
//! - The collaborator traits the hooks talk to
//! - The main-context executor for UI-safe scheduling
//! - The event bus registration surface the engine drives

mod bus;
mod chat;
mod executor;
mod scoreboard;
mod world;

pub use bus::*;
pub use chat::*;
pub use executor::*;
pub use scoreboard::*;
pub use world::*;

use std::sync::Arc;
use thiserror::Error;

/// Engine collaborator errors
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Main context is no longer running")]
    MainContextClosed,

    #[error("Display delivery failed: {0}")]
    DisplayFailed(String),

    #[error("No such team: {0}")]
    UnknownTeam(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Bundle of engine collaborators handed to every hook invocation.
///
/// Cheap to clone; everything inside is shared.
#[derive(Clone)]
pub struct EngineServices {
    /// Read-only world queries
    pub world: Arc<dyn WorldView>,
    /// Team membership and display
    pub scoreboard: Arc<dyn Scoreboard>,
    /// Chat/output delivery
    pub chat: Arc<dyn ChatSink>,
    /// The local player on this endpoint
    pub player: PlayerHandle,
    /// The local player's entity
    pub avatar: Arc<dyn PlayerAvatar>,
    /// Hand-off to the engine's designated main context
    pub main: MainContextHandle,
}
