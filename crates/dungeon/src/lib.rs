pub mod bsp;
pub mod config;
pub mod event;
pub mod grid;
pub mod types;

pub use bsp::{
    DungeonGenerator, DungeonTree, NodeId, PartitionNode, SplitAxis, derive_dungeon_seed,
    generate_dungeon,
};
pub use config::{BendPolicy, ConfigError, GenerationConfig, MIN_LEAF_EXTENT};
pub use event::{Discard, EventSink, GenerationEvent};
pub use grid::TileGrid;
pub use types::*;
