//! Dungeon generation orchestration: partition, then furnish rooms and corridors.

use crate::config::GenerationConfig;
use crate::event::{Discard, EventSink, GenerationEvent};
use crate::types::{GenerationError, Rect};

use super::corridors::connect_children;
use super::rng::DungeonRng;
use super::rooms::carve_room;
use super::splitter::build_partitions;
use super::tree::{DungeonTree, NodeId};

pub struct DungeonGenerator {
    seed: u64,
    config: GenerationConfig,
}

impl DungeonGenerator {
    pub fn new(seed: u64, config: GenerationConfig) -> Self {
        Self { seed, config }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn generate(&self) -> Result<DungeonTree, GenerationError> {
        self.generate_with_events(&mut Discard)
    }

    /// Builds a complete tree, reporting every split, room and corridor to `events`.
    ///
    /// The configuration is validated up front; on error nothing is generated.
    pub fn generate_with_events(
        &self,
        events: &mut dyn EventSink,
    ) -> Result<DungeonTree, GenerationError> {
        self.config.validate()?;

        let mut rng = DungeonRng::new(self.seed);
        let mut tree = DungeonTree::with_root(Rect::new(
            0,
            0,
            self.config.board_width,
            self.config.board_height,
        ));
        let root = tree.root();

        build_partitions(&mut tree, root, &self.config, &mut rng, events);
        furnish(&mut tree, root, &self.config, &mut rng, events);
        Ok(tree)
    }
}

/// Post-order pass: both subtrees are furnished before their parent routes a corridor
/// between them, so every internal node sees resolved rooms below it.
fn furnish(
    tree: &mut DungeonTree,
    id: NodeId,
    config: &GenerationConfig,
    rng: &mut DungeonRng,
    events: &mut dyn EventSink,
) {
    let Some(node) = tree.node(id) else {
        return;
    };
    match node.children() {
        Some((left, right)) => {
            furnish(tree, left, config, rng, events);
            furnish(tree, right, config, rng, events);
            connect_children(tree, id, config.bend_policy, rng, events);
        }
        None => {
            let (debug_id, bounds) = (node.id(), node.bounds());
            let room = carve_room(bounds, rng);
            tree.set_room(id, room);
            events.record(GenerationEvent::RoomCarved { node: debug_id, bounds, room });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BendPolicy;

    #[test]
    fn invalid_configuration_fails_before_any_event() {
        let generator = DungeonGenerator::new(1, GenerationConfig::new(20, 20, 8, 4));
        let mut events: Vec<GenerationEvent> = Vec::new();
        let err = generator.generate_with_events(&mut events).expect_err("max below min");
        assert!(matches!(err, GenerationError::InvalidConfiguration { .. }));
        assert!(events.is_empty());
    }

    #[test]
    fn events_follow_split_then_furnish_order() {
        let generator = DungeonGenerator::new(42, GenerationConfig::new(20, 20, 4, 10));
        let mut events: Vec<GenerationEvent> = Vec::new();
        let tree = generator.generate_with_events(&mut events).expect("valid config");

        let first_furnish = events
            .iter()
            .position(|event| matches!(event, GenerationEvent::RoomCarved { .. }))
            .expect("at least one room");
        assert!(events[..first_furnish].iter().all(|event| matches!(
            event,
            GenerationEvent::SplitConsidered { .. }
                | GenerationEvent::Split { .. }
                | GenerationEvent::LeafStopped { .. }
        )));

        let carved = events
            .iter()
            .filter(|event| matches!(event, GenerationEvent::RoomCarved { .. }))
            .count();
        let routed = events
            .iter()
            .filter(|event| matches!(event, GenerationEvent::CorridorsRouted { .. }))
            .count();
        assert_eq!(carved, tree.leaf_count());
        assert_eq!(routed, tree.internal_nodes().count());
    }

    #[test]
    fn generator_keeps_its_seed_and_config() {
        let config =
            GenerationConfig::new(30, 20, 4, 9).with_bend_policy(BendPolicy::VerticalFirst);
        let generator = DungeonGenerator::new(613, config);
        assert_eq!(generator.seed(), 613);
        assert_eq!(generator.config(), &config);
    }

    #[test]
    fn extreme_but_valid_sizes_generate() {
        let huge_board =
            GenerationConfig::new(1_000_000_000, 1_000_000_000, 250_000_000, 250_000_000);
        let tree = DungeonGenerator::new(5, huge_board).generate().expect("valid config");
        assert!(tree.leaf_count() >= 3);
        assert!(tree.leaves().all(|(_, leaf)| leaf.room().is_some()));

        let huge_rooms = GenerationConfig::new(3, 3, i32::MAX, i32::MAX);
        let tree = DungeonGenerator::new(5, huge_rooms).generate().expect("valid config");
        assert!(tree.root_node().is_leaf());
        assert_eq!(tree.root_node().room(), Some(Rect::new(1, 1, 1, 1)));
    }

    #[test]
    fn every_leaf_has_a_room_and_every_internal_node_corridors() {
        let tree = DungeonGenerator::new(7, GenerationConfig::new(48, 32, 5, 12))
            .generate()
            .expect("valid config");
        for (_, node) in tree.nodes() {
            if node.is_leaf() {
                assert!(node.room().is_some());
                assert!(node.corridors().is_empty());
            } else {
                assert!(node.room().is_none());
                assert!(!node.corridors().is_empty());
            }
        }
    }

    #[test]
    fn bend_policy_changes_shapes_but_not_the_partition() {
        let config = GenerationConfig::new(60, 40, 5, 14);
        let randomized =
            DungeonGenerator::new(2_718, config.with_bend_policy(BendPolicy::Randomized))
                .generate()
                .expect("valid config");
        let vertical_first =
            DungeonGenerator::new(2_718, config.with_bend_policy(BendPolicy::VerticalFirst))
                .generate()
                .expect("valid config");

        let bounds = |tree: &DungeonTree| -> Vec<Rect> {
            tree.nodes().map(|(_, node)| node.bounds()).collect()
        };
        let strip_counts = |tree: &DungeonTree| -> Vec<usize> {
            tree.internal_nodes().map(|(_, node)| node.corridors().len()).collect()
        };
        assert_eq!(bounds(&randomized), bounds(&vertical_first));
        assert!(randomized.rooms().eq(vertical_first.rooms()));
        assert_eq!(strip_counts(&randomized), strip_counts(&vertical_first));
    }

    #[test]
    fn vertical_first_policy_always_opens_with_the_vertical_leg() {
        let config =
            GenerationConfig::new(60, 40, 5, 14).with_bend_policy(BendPolicy::VerticalFirst);
        for seed in 0..16 {
            let tree = DungeonGenerator::new(seed, config).generate().expect("valid config");
            for (_, node) in tree.internal_nodes() {
                let first = node.corridors()[0];
                assert_eq!(first.width, 1, "seed={seed}: first strip {first} is not vertical");
                assert!(first.height >= 0, "seed={seed}: vertical-first never lays downward");
            }
        }
    }
}
