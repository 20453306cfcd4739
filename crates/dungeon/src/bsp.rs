//! Binary-space-partition dungeon generation split into coherent submodules.

pub mod tree;

mod corridors;
mod generator;
mod rng;
mod rooms;
mod splitter;

pub use generator::DungeonGenerator;
pub use rng::derive_dungeon_seed;
pub use splitter::SplitAxis;
pub use tree::{DepthFirst, DungeonTree, NodeId, PartitionNode};

use crate::config::GenerationConfig;
use crate::types::GenerationError;

pub fn generate_dungeon(
    seed: u64,
    config: GenerationConfig,
) -> Result<DungeonTree, GenerationError> {
    DungeonGenerator::new(seed, config).generate()
}
