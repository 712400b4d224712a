//! Minecart team assignment
//!
//! When a minecart spawns on the client side it joins the configured
//! scoreboard team (created on first use) and is marked glowing so it shows
//! through walls in the team color.

use std::sync::Arc;

use crate::config::TeamConfig;
use crate::engine::{EngineEvent, EntityKind, EventHandler, TeamColor};

/// Handler for entity spawn events
pub fn spawn_handler(config: &TeamConfig) -> EventHandler {
    let config = config.clone();
    let color = TeamColor::parse(&config.color).unwrap_or_else(|| {
        tracing::warn!("unknown team color '{}', using default", config.color);
        TeamColor::default()
    });

    Arc::new(move |event, services| {
        if let EngineEvent::EntityJoinWorld { entity } = event {
            if entity.kind != EntityKind::Minecart {
                return;
            }

            if !services.scoreboard.team_exists(&config.name) {
                services.scoreboard.create_team(&config.name, color);
            }

            if let Err(e) = services.scoreboard.add_member(&config.name, &entity.id.to_string()) {
                tracing::warn!("could not add {} to team '{}': {}", entity.id, config.name, e);
                return;
            }

            entity.set_glowing(true);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EntityHandle, Scoreboard};
    use crate::hooks::testutil::harness;

    #[test]
    fn test_minecart_joins_team_and_glows() {
        let harness = harness();
        let handler = spawn_handler(&TeamConfig::default());

        let cart = Arc::new(EntityHandle::new(EntityKind::Minecart));
        let mut event = EngineEvent::EntityJoinWorld {
            entity: cart.clone(),
        };
        handler(&mut event, &harness.services);

        assert!(cart.is_glowing());
        assert_eq!(
            harness.scoreboard.members("lootlink"),
            vec![cart.id.to_string()]
        );
        assert_eq!(
            harness.scoreboard.team_color("lootlink"),
            Some(TeamColor::DarkAqua)
        );
    }

    #[test]
    fn test_team_created_once_for_many_carts() {
        let harness = harness();
        let handler = spawn_handler(&TeamConfig::default());

        for _ in 0..3 {
            let cart = Arc::new(EntityHandle::new(EntityKind::Minecart));
            let mut event = EngineEvent::EntityJoinWorld { entity: cart };
            handler(&mut event, &harness.services);
        }

        assert_eq!(harness.scoreboard.members("lootlink").len(), 3);
    }

    #[test]
    fn test_other_entities_left_alone() {
        let harness = harness();
        let handler = spawn_handler(&TeamConfig::default());

        let player = Arc::new(EntityHandle::new(EntityKind::Player));
        let mut event = EngineEvent::EntityJoinWorld {
            entity: player.clone(),
        };
        handler(&mut event, &harness.services);

        assert!(!player.is_glowing());
        assert!(!harness.scoreboard.team_exists("lootlink"));
    }
}
