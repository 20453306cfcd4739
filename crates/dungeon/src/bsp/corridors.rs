//! Corridor routing between the rooms of two sibling subtrees.
//!
//! Each internal node joins one room from its left subtree to one room from its right
//! subtree with a straight strip, or with an L made of two strips when the anchor
//! points do not share a column. Strips are one cell wide and may carry a negative
//! height when they were laid downward from their anchor.

use crate::config::BendPolicy;
use crate::event::{EventSink, GenerationEvent};
use crate::types::{Pos, Rect};

use super::rng::DungeonRng;
use super::tree::{DungeonTree, NodeId};

/// A random interior cell of `room`, away from its first row and column when the
/// room is wide enough to allow it.
fn representative_point(room: Rect, rng: &mut DungeonRng) -> Pos {
    let x = rng.range_inclusive(room.x + 1, room.x_max() - 1).min(room.x_max() - 1);
    let y = rng.range_inclusive(room.y + 1, room.y_max() - 1).min(room.y_max() - 1);
    Pos { y, x }
}

/// Orders the anchors so the first one is never to the right of the second.
fn canonical_anchors(a: Pos, b: Pos) -> (Pos, Pos) {
    if a.x > b.x { (b, a) } else { (a, b) }
}

fn l_shaped(from: Pos, to: Pos, horizontal_first: bool) -> [Rect; 2] {
    let w = from.x - to.x;
    let h = from.y - to.y;
    if horizontal_first {
        let horizontal = Rect::new(from.x, from.y, w.abs() + 1, 1);
        let vertical = if h < 0 {
            Rect::new(to.x, from.y, 1, h.abs())
        } else {
            Rect::new(to.x, from.y, 1, -h.abs())
        };
        [horizontal, vertical]
    } else {
        let vertical = if h < 0 {
            Rect::new(from.x, from.y, 1, h.abs())
        } else {
            Rect::new(from.x, to.y, 1, h.abs())
        };
        [vertical, Rect::new(from.x, to.y, w.abs() + 1, 1)]
    }
}

fn straight(from: Pos, to: Pos) -> Rect {
    let h = from.y - to.y;
    if h < 0 { Rect::new(from.x, from.y, 1, h.abs()) } else { Rect::new(to.x, to.y, 1, h.abs()) }
}

/// Strips joining two anchors that already satisfy `from.x <= to.x`.
fn route(from: Pos, to: Pos, horizontal_first: Option<bool>) -> Vec<Rect> {
    debug_assert!(from.x <= to.x);
    match horizontal_first {
        Some(horizontal_first) if from.x != to.x => l_shaped(from, to, horizontal_first).to_vec(),
        _ => vec![straight(from, to)],
    }
}

/// Routes and stores the corridors of an internal node. Leaves, and subtrees that
/// hold no room yet, are left untouched.
pub(super) fn connect_children(
    tree: &mut DungeonTree,
    id: NodeId,
    bend_policy: BendPolicy,
    rng: &mut DungeonRng,
    events: &mut dyn EventSink,
) {
    let Some(node) = tree.node(id) else {
        return;
    };
    let Some((left, right)) = node.children() else {
        return;
    };
    let debug_id = node.id();
    let debug_id_of = |child: NodeId| tree.node(child).map_or(0, |node| node.id());
    let (left_debug_id, right_debug_id) = (debug_id_of(left), debug_id_of(right));

    let left_room = tree.get_room(left);
    let right_room = tree.get_room(right);
    let (Some(left_rect), Some(right_rect)) = (left_room, right_room) else {
        return;
    };

    let left_point = representative_point(left_rect, rng);
    let right_point = representative_point(right_rect, rng);
    let (from, to) = canonical_anchors(left_point, right_point);

    let horizontal_first = if from.x != to.x {
        let coin = rng.bit();
        Some(match bend_policy {
            BendPolicy::Randomized => coin == 1,
            BendPolicy::VerticalFirst => false,
        })
    } else {
        None
    };
    let corridors = route(from, to, horizontal_first);
    tree.append_corridors(id, &corridors);

    events.record(GenerationEvent::CorridorsRouted {
        node: debug_id,
        left: (left_debug_id, left_room),
        right: (right_debug_id, right_room),
        from,
        to,
        corridors,
    });
}
