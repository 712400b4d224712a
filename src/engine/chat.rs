//! Chat delivery collaborator

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use super::EngineResult;

/// The player a message is displayed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerHandle {
    pub id: Uuid,
    pub name: String,
}

impl PlayerHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// Engine-provided chat/output delivery.
///
/// Implementations must be safe to call from the main context only; the
/// hooks guarantee that by scheduling through `MainContextHandle`.
#[async_trait]
pub trait ChatSink: Send + Sync {
    async fn display_message(&self, player: &PlayerHandle, text: &str) -> EngineResult<()>;
}

/// Writes chat lines through the logger; used by the demo binary
pub struct ConsoleChat;

#[async_trait]
impl ChatSink for ConsoleChat {
    async fn display_message(&self, player: &PlayerHandle, text: &str) -> EngineResult<()> {
        tracing::info!("[chat -> {}] {}", player.name, text);
        println!("[{}] {}", player.name, text);
        Ok(())
    }
}

/// Records delivered messages for later assertions
#[derive(Default)]
pub struct RecordingChat {
    messages: Mutex<Vec<(String, String)>>,
}

impl RecordingChat {
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .map(|(_, text)| text.clone())
            .collect()
    }
}

#[async_trait]
impl ChatSink for RecordingChat {
    async fn display_message(&self, player: &PlayerHandle, text: &str) -> EngineResult<()> {
        self.messages
            .lock()
            .unwrap()
            .push((player.name.clone(), text.to_string()));
        Ok(())
    }
}
