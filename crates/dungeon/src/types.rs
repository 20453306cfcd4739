use std::error::Error;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

/// Axis-aligned rectangle on the board grid.
///
/// Extents are signed: a corridor may carry a negative `height`, meaning it spans
/// from `y + height` up to `y`. Call [`Rect::normalized`] before iterating cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub const fn x_max(self) -> i32 {
        self.x + self.width
    }

    pub const fn y_max(self) -> i32 {
        self.y + self.height
    }

    /// Same cells, with non-negative width and height.
    pub fn normalized(self) -> Self {
        let x = self.x.min(self.x_max());
        let y = self.y.min(self.y_max());
        Self { x, y, width: self.width.abs(), height: self.height.abs() }
    }

    pub fn area(self) -> i64 {
        let rect = self.normalized();
        i64::from(rect.width) * i64::from(rect.height)
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(self, pos: Pos) -> bool {
        let rect = self.normalized();
        pos.x >= rect.x && pos.x < rect.x_max() && pos.y >= rect.y && pos.y < rect.y_max()
    }

    /// True when every cell of `inner` sits inside `self` at least `margin` cells
    /// away from each edge.
    pub fn contains_with_margin(self, inner: Rect, margin: i32) -> bool {
        let outer = self.normalized();
        let inner = inner.normalized();
        inner.x >= outer.x + margin
            && inner.y >= outer.y + margin
            && inner.x_max() <= outer.x_max() - margin
            && inner.y_max() <= outer.y_max() - margin
    }

    /// Row-major iteration over every cell covered by the normalized rectangle.
    pub fn cells(self) -> impl Iterator<Item = Pos> {
        let rect = self.normalized();
        (rect.y..rect.y_max()).flat_map(move |y| (rect.x..rect.x_max()).map(move |x| Pos { y, x }))
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(x:{}, y:{}, width:{}, height:{})", self.x, self.y, self.width, self.height)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TileKind {
    #[default]
    Empty,
    Floor,
    Corridor,
}

impl TileKind {
    pub fn is_walkable(self) -> bool {
        matches!(self, Self::Floor | Self::Corridor)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerationError {
    /// The board cannot hold a valid split or a room with its margin.
    InvalidConfiguration { reason: String },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration { reason } => {
                write!(f, "invalid generation configuration: {reason}")
            }
        }
    }
}

impl Error for GenerationError {}
