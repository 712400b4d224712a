//! Protocol message definitions
//!
//! Defines the loot notification sent to a player after a loot roll.

/// A quantity of one inventory item kind plus engine-defined auxiliary data.
///
/// The record is treated as an atomic encode/decode unit; the auxiliary blob
/// is carried verbatim and never interpreted here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    /// Item kind identifier, optionally namespaced ("mymod:iron_block")
    pub kind: String,
    /// How many of the item the player received
    pub count: u32,
    /// Opaque engine-defined blob (damage, enchantments, ...)
    pub aux: Vec<u8>,
}

impl ItemRecord {
    pub fn new(kind: impl Into<String>, count: u32) -> Self {
        Self {
            kind: kind.into(),
            count,
            aux: Vec::new(),
        }
    }

    pub fn with_aux(mut self, aux: Vec<u8>) -> Self {
        self.aux = aux;
        self
    }

    /// Human-readable name derived from the kind identifier.
    ///
    /// Strips any namespace prefix and capitalizes each underscore-separated
    /// word: "stick" becomes "Stick", "mymod:iron_block" becomes "Iron Block".
    pub fn display_name(&self) -> String {
        let base = self
            .kind
            .rsplit_once(':')
            .map(|(_, name)| name)
            .unwrap_or(&self.kind);

        base.split('_')
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Notification of the loot a player just received.
///
/// One-shot and ephemeral: built on the sending endpoint, serialized once,
/// decoded once on the receiver, turned into a chat line and discarded.
/// Insertion order is display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LootNotification {
    /// The item records received by the player, in display order
    pub items: Vec<ItemRecord>,
}

impl LootNotification {
    pub fn new(items: Vec<ItemRecord>) -> Self {
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_single_word() {
        let record = ItemRecord::new("stick", 3);
        assert_eq!(record.display_name(), "Stick");
    }

    #[test]
    fn test_display_name_strips_namespace() {
        let record = ItemRecord::new("mymod:iron_block", 1);
        assert_eq!(record.display_name(), "Iron Block");
    }

    #[test]
    fn test_display_name_multi_word() {
        let record = ItemRecord::new("golden_apple", 2);
        assert_eq!(record.display_name(), "Golden Apple");
    }

    #[test]
    fn test_notification_preserves_order() {
        let notification = LootNotification::new(vec![
            ItemRecord::new("stick", 3),
            ItemRecord::new("bow", 1),
        ]);
        assert_eq!(notification.len(), 2);
        assert_eq!(notification.items[0].kind, "stick");
        assert_eq!(notification.items[1].kind, "bow");
    }
}
