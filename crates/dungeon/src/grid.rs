//! Tile-space rasterization of a finished dungeon tree.
//!
//! Rooms are drawn first; corridors only claim cells that are still empty, so a
//! corridor crossing a room never turns its floor into corridor tiles.

use std::collections::VecDeque;
use std::fmt;

use crate::bsp::DungeonTree;
use crate::types::{Pos, Rect, TileKind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<TileKind>,
}

impl TileGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, tiles: vec![TileKind::Empty; width * height] }
    }

    pub fn from_tree(tree: &DungeonTree) -> Self {
        let bounds = tree.bounds();
        let mut grid = Self::new(bounds.width.max(0) as usize, bounds.height.max(0) as usize);
        for room in tree.rooms() {
            grid.paint(room, |_| true, TileKind::Floor);
        }
        for corridor in tree.corridors() {
            grid.paint(corridor, |tile| tile == TileKind::Empty, TileKind::Corridor);
        }
        grid
    }

    fn paint(&mut self, rect: Rect, can_overwrite: impl Fn(TileKind) -> bool, kind: TileKind) {
        if rect.is_empty() {
            return;
        }
        for pos in rect.cells() {
            if let Some(index) = self.index(pos)
                && can_overwrite(self.tiles[index])
            {
                self.tiles[index] = kind;
            }
        }
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cells outside the board read as empty.
    pub fn tile_at(&self, pos: Pos) -> TileKind {
        self.index(pos).map_or(TileKind::Empty, |index| self.tiles[index])
    }

    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|&&tile| tile == kind).count()
    }

    /// True when every walkable cell can reach every other through 4-neighbour steps.
    pub fn walkable_cells_connected(&self) -> bool {
        let walkable = self.count(TileKind::Floor) + self.count(TileKind::Corridor);
        let Some(start) = self.tiles.iter().position(|tile| tile.is_walkable()) else {
            return true;
        };

        let mut seen = vec![false; self.tiles.len()];
        seen[start] = true;
        let mut open = VecDeque::from([start]);
        let mut reached = 1usize;
        while let Some(index) = open.pop_front() {
            let pos = Pos { y: (index / self.width) as i32, x: (index % self.width) as i32 };
            for next in [
                Pos { y: pos.y - 1, x: pos.x },
                Pos { y: pos.y, x: pos.x + 1 },
                Pos { y: pos.y + 1, x: pos.x },
                Pos { y: pos.y, x: pos.x - 1 },
            ] {
                let Some(next_index) = self.index(next) else {
                    continue;
                };
                if seen[next_index] || !self.tiles[next_index].is_walkable() {
                    continue;
                }
                seen[next_index] = true;
                reached += 1;
                open.push_back(next_index);
            }
        }

        reached == walkable
    }
}

impl fmt::Display for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(self.width.max(1)) {
            for tile in row {
                let glyph = match tile {
                    TileKind::Empty => ' ',
                    TileKind::Floor => '.',
                    TileKind::Corridor => '#',
                };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
