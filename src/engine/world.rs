//! World collaborator traits
//!
//! Read-only world queries and the local player entity, as narrow seams the
//! hooks implement against. The in-memory implementations back the demo
//! binary and the tests.

use std::collections::HashMap;
use std::sync::Mutex;

/// Identifier for an empty/unloaded position
pub const AIR: &str = "air";

/// Integer block position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The position directly underneath this one
    pub fn below(self) -> Self {
        Self {
            y: self.y - 1,
            ..self
        }
    }
}

/// Read-only view of the world
pub trait WorldView: Send + Sync {
    /// Block kind identifier at the given position; `AIR` when nothing is there
    fn block_at(&self, pos: BlockPos) -> String;
}

/// The local player entity as the engine exposes it
pub trait PlayerAvatar: Send + Sync {
    fn position(&self) -> BlockPos;

    /// Rotate by the given yaw/pitch deltas in degrees
    fn turn(&self, yaw: f32, pitch: f32);
}

/// Sparse in-memory world: a map of positions to block kinds, air elsewhere
#[derive(Default)]
pub struct SparseWorld {
    blocks: Mutex<HashMap<BlockPos, String>>,
}

impl SparseWorld {
    pub fn set_block(&self, pos: BlockPos, kind: impl Into<String>) {
        self.blocks.lock().unwrap().insert(pos, kind.into());
    }
}

impl WorldView for SparseWorld {
    fn block_at(&self, pos: BlockPos) -> String {
        self.blocks
            .lock()
            .unwrap()
            .get(&pos)
            .cloned()
            .unwrap_or_else(|| AIR.to_string())
    }
}

/// In-memory avatar tracking position and accumulated rotation
pub struct LocalAvatar {
    position: Mutex<BlockPos>,
    yaw: Mutex<f32>,
    pitch: Mutex<f32>,
}

impl LocalAvatar {
    pub fn new(position: BlockPos) -> Self {
        Self {
            position: Mutex::new(position),
            yaw: Mutex::new(0.0),
            pitch: Mutex::new(0.0),
        }
    }

    pub fn set_position(&self, position: BlockPos) {
        *self.position.lock().unwrap() = position;
    }

    pub fn yaw(&self) -> f32 {
        *self.yaw.lock().unwrap()
    }

    pub fn pitch(&self) -> f32 {
        *self.pitch.lock().unwrap()
    }
}

impl PlayerAvatar for LocalAvatar {
    fn position(&self) -> BlockPos {
        *self.position.lock().unwrap()
    }

    fn turn(&self, yaw: f32, pitch: f32) {
        *self.yaw.lock().unwrap() += yaw;
        *self.pitch.lock().unwrap() += pitch;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below() {
        assert_eq!(BlockPos::new(1, 64, -3).below(), BlockPos::new(1, 63, -3));
    }

    #[test]
    fn test_sparse_world_defaults_to_air() {
        let world = SparseWorld::default();
        assert_eq!(world.block_at(BlockPos::new(0, 0, 0)), AIR);

        world.set_block(BlockPos::new(0, 0, 0), "iron_block");
        assert_eq!(world.block_at(BlockPos::new(0, 0, 0)), "iron_block");
    }

    #[test]
    fn test_avatar_accumulates_rotation() {
        let avatar = LocalAvatar::new(BlockPos::new(0, 64, 0));
        avatar.turn(5.0, 0.0);
        avatar.turn(5.0, -1.0);
        assert_eq!(avatar.yaw(), 10.0);
        assert_eq!(avatar.pitch(), -1.0);
    }
}
