//! Loot notification delivery
//!
//! Decodes the packet on whatever thread the engine delivered it, then hands
//! the chat-facing work to the main context: display happens strictly after
//! decode, on the UI-safe thread, in arrival order. A malformed packet is
//! logged and dropped whole; no partial notification is ever displayed.

use std::sync::Arc;

use crate::config::ChatConfig;
use crate::engine::{EngineEvent, EngineServices, EventHandler};
use crate::protocol::{self, ItemRecord, LootNotification, LOOT_CHANNEL};

/// Handler for packet receipt events on the loot channel
pub fn loot_handler(config: &ChatConfig) -> EventHandler {
    let config = config.clone();
    Arc::new(move |event, services| {
        if let EngineEvent::PacketReceived { channel, payload } = event {
            if channel.as_str() != LOOT_CHANNEL {
                return;
            }

            let mut bytes = payload.clone();
            let notification = match protocol::decode(&mut bytes) {
                Ok(notification) => notification,
                Err(e) => {
                    tracing::warn!("dropping malformed loot notification: {}", e);
                    return;
                }
            };

            deliver(&notification, &config, services);
        }
    })
}

/// Schedule the chat line for a decoded notification onto the main context
fn deliver(notification: &LootNotification, config: &ChatConfig, services: &EngineServices) {
    let text = format_notification(notification, config);
    let chat = services.chat.clone();
    let player = services.player.clone();

    let scheduled = services.main.schedule(async move {
        if let Err(e) = chat.display_message(&player, &text).await {
            // No retry: display failure is the host UI layer's concern
            tracing::warn!("chat delivery failed: {}", e);
        }
    });

    if let Err(e) = scheduled {
        tracing::warn!("loot notification dropped: {}", e);
    }
}

/// Build the chat line: items joined with ", ", wrapped in the base template
pub fn format_notification(notification: &LootNotification, config: &ChatConfig) -> String {
    let items = notification
        .items
        .iter()
        .map(|record| format_item(record, config))
        .collect::<Vec<_>>()
        .join(", ");

    config.base_template.replace("{items}", &items)
}

fn format_item(record: &ItemRecord, config: &ChatConfig) -> String {
    config
        .item_template
        .replace("{count}", &record.count.to_string())
        .replace("{name}", &record.display_name())
}
