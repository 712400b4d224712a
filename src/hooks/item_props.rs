//! Item property functions
//!
//! The engine resolves render-time item properties ("pull", "blocking", ...)
//! by name. The adapter-interface ceremony this needs elsewhere collapses in
//! Rust to a plain function value: anything matching the signature registers.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::ZoomConfig;
use crate::engine::{EntityHandle, WorldView};
use crate::protocol::ItemRecord;

/// A property getter: record, world and the holding entity in, value out
pub type ItemPropertyFn =
    Arc<dyn Fn(&ItemRecord, &dyn WorldView, Option<&EntityHandle>) -> f32 + Send + Sync>;

/// Property getters keyed by item kind and property name
#[derive(Default)]
pub struct ItemPropertyRegistry {
    properties: HashMap<(String, String), ItemPropertyFn>,
}

impl ItemPropertyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        item_kind: impl Into<String>,
        property: impl Into<String>,
        getter: ItemPropertyFn,
    ) {
        self.properties
            .insert((item_kind.into(), property.into()), getter);
    }

    pub fn lookup(&self, item_kind: &str, property: &str) -> Option<&ItemPropertyFn> {
        self.properties
            .get(&(item_kind.to_string(), property.to_string()))
    }

    /// Resolve a property for a record; `None` when nothing is registered
    pub fn resolve(
        &self,
        record: &ItemRecord,
        property: &str,
        world: &dyn WorldView,
        entity: Option<&EntityHandle>,
    ) -> Option<f32> {
        self.lookup(&record.kind, property)
            .map(|getter| getter(record, world, entity))
    }
}

/// Registry preloaded with the pack's properties.
///
/// Ships the bow "pull" property: draw progress in [0, 1], read from the
/// draw-tick counter the engine stores in the first auxiliary byte.
pub fn default_registry(zoom: &ZoomConfig) -> ItemPropertyRegistry {
    let mut registry = ItemPropertyRegistry::new();

    let max_draw_ticks = zoom.max_draw_ticks.max(1) as f32;
    registry.register(
        zoom.bow_kind.clone(),
        "pull",
        Arc::new(move |record, _world, _entity| {
            let ticks = record.aux.first().copied().unwrap_or(0) as f32;
            (ticks / max_draw_ticks).min(1.0)
        }),
    );

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SparseWorld;

    #[test]
    fn test_pull_property_ramps_and_clamps() {
        let registry = default_registry(&ZoomConfig::default());
        let world = SparseWorld::default();

        let relaxed = ItemRecord::new("bow", 1).with_aux(vec![0]);
        assert_eq!(registry.resolve(&relaxed, "pull", &world, None), Some(0.0));

        let half = ItemRecord::new("bow", 1).with_aux(vec![10]);
        assert_eq!(registry.resolve(&half, "pull", &world, None), Some(0.5));

        let overdrawn = ItemRecord::new("bow", 1).with_aux(vec![200]);
        assert_eq!(registry.resolve(&overdrawn, "pull", &world, None), Some(1.0));
    }

    #[test]
    fn test_unregistered_property_is_none() {
        let registry = default_registry(&ZoomConfig::default());
        let world = SparseWorld::default();

        let stick = ItemRecord::new("stick", 1);
        assert_eq!(registry.resolve(&stick, "pull", &world, None), None);

        let bow = ItemRecord::new("bow", 1);
        assert_eq!(registry.resolve(&bow, "blocking", &world, None), None);
    }

    #[test]
    fn test_closures_register_directly() {
        let mut registry = ItemPropertyRegistry::new();
        registry.register("shield", "blocking", Arc::new(|_, _, _| 1.0));

        let world = SparseWorld::default();
        let shield = ItemRecord::new("shield", 1);
        assert_eq!(registry.resolve(&shield, "blocking", &world, None), Some(1.0));
    }
}
