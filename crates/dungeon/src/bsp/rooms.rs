//! Room placement inside leaf regions.

use crate::config::MIN_LEAF_EXTENT;
use crate::types::Rect;

use super::rng::DungeonRng;

/// Picks a room covering at least half of `bounds` along each axis, with a free
/// cell between the room and every edge. Coordinates are absolute.
pub(super) fn carve_room(bounds: Rect, rng: &mut DungeonRng) -> Rect {
    debug_assert!(bounds.width >= MIN_LEAF_EXTENT && bounds.height >= MIN_LEAF_EXTENT);
    let room_width = rng.range_inclusive(bounds.width / 2, bounds.width - 2).max(1);
    let room_height = rng.range_inclusive(bounds.height / 2, bounds.height - 2).max(1);
    let room_x = rng.range_inclusive(1, bounds.width - room_width - 1);
    let room_y = rng.range_inclusive(1, bounds.height - room_height - 1);

    Rect::new(bounds.x + room_x, bounds.y + room_y, room_width, room_height)
}
