//! Recursive splitting of sub-dungeons into two children.

use crate::config::GenerationConfig;
use crate::event::{EventSink, GenerationEvent};
use crate::types::Rect;

use super::rng::DungeonRng;
use super::tree::{DungeonTree, NodeId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SplitAxis {
    /// Children sit side by side along x.
    AlongWidth,
    /// Children are stacked along y.
    AlongHeight,
}

/// Chance that a region already small enough is split anyway.
const SMALL_REGION_SPLIT_CUTOFF: f64 = 0.25;

/// A region is "dominant" along an axis once it is 1.25 times longer than the other one.
fn choose_axis(bounds: Rect, rng: &mut DungeonRng) -> SplitAxis {
    let (width, height) = (i64::from(bounds.width), i64::from(bounds.height));
    if 4 * width >= 5 * height {
        SplitAxis::AlongWidth
    } else if 4 * height >= 5 * width {
        SplitAxis::AlongHeight
    } else if rng.unit() > 0.5 {
        SplitAxis::AlongHeight
    } else {
        SplitAxis::AlongWidth
    }
}

fn partition(bounds: Rect, axis: SplitAxis, offset: i32) -> (Rect, Rect) {
    match axis {
        SplitAxis::AlongWidth => (
            Rect::new(bounds.x, bounds.y, offset, bounds.height),
            Rect::new(bounds.x + offset, bounds.y, bounds.width - offset, bounds.height),
        ),
        SplitAxis::AlongHeight => (
            Rect::new(bounds.x, bounds.y, bounds.width, offset),
            Rect::new(bounds.x, bounds.y + offset, bounds.width, bounds.height - offset),
        ),
    }
}

/// Splits a leaf in two. Returns `false` for internal nodes and for leaves whose
/// shorter side is under twice `min_room_size`.
pub(super) fn split(
    tree: &mut DungeonTree,
    id: NodeId,
    min_room_size: i32,
    rng: &mut DungeonRng,
    events: &mut dyn EventSink,
) -> bool {
    let Some(node) = tree.node(id) else {
        return false;
    };
    if !node.is_leaf() {
        return false;
    }
    let (debug_id, bounds) = (node.id(), node.bounds());

    let axis = choose_axis(bounds, rng);
    if i64::from(bounds.width.min(bounds.height)) < 2 * i64::from(min_room_size) {
        events.record(GenerationEvent::LeafStopped { node: debug_id, bounds });
        return false;
    }

    let extent = match axis {
        SplitAxis::AlongWidth => bounds.width,
        SplitAxis::AlongHeight => bounds.height,
    };
    let offset = rng.range_exclusive(min_room_size, extent - min_room_size);
    let (left_bounds, right_bounds) = partition(bounds, axis, offset);
    let (left, right) = tree.attach_children(id, left_bounds, right_bounds);

    let debug_id_of = |child: NodeId| tree.node(child).map_or(0, |node| node.id());
    events.record(GenerationEvent::Split {
        node: debug_id,
        axis,
        left: (debug_id_of(left), left_bounds),
        right: (debug_id_of(right), right_bounds),
    });
    true
}

/// Top-down partitioning. Oversized regions always attempt a split; regions that
/// already fit `max_room_size` still attempt one three times out of four.
pub(super) fn build_partitions(
    tree: &mut DungeonTree,
    id: NodeId,
    config: &GenerationConfig,
    rng: &mut DungeonRng,
    events: &mut dyn EventSink,
) {
    let Some(node) = tree.node(id) else {
        return;
    };
    let bounds = node.bounds();
    events.record(GenerationEvent::SplitConsidered { node: node.id(), bounds });
    if !node.is_leaf() {
        return;
    }

    let oversized = bounds.width > config.max_room_size || bounds.height > config.max_room_size;
    if !oversized && rng.unit() <= SMALL_REGION_SPLIT_CUTOFF {
        return;
    }
    if !split(tree, id, config.effective_min_room_size(), rng, events) {
        return;
    }
    if let Some((left, right)) = tree.node(id).and_then(|node| node.children()) {
        build_partitions(tree, left, config, rng, events);
        build_partitions(tree, right, config, rng, events);
    }
}
