//! Structured diagnostics emitted while a dungeon is generated.

use crate::bsp::SplitAxis;
use crate::types::{Pos, Rect};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerationEvent {
    SplitConsidered { node: u32, bounds: Rect },
    /// The node is too small to split again and stays a leaf. Informational only.
    LeafStopped { node: u32, bounds: Rect },
    Split { node: u32, axis: SplitAxis, left: (u32, Rect), right: (u32, Rect) },
    RoomCarved { node: u32, bounds: Rect, room: Rect },
    CorridorsRouted {
        node: u32,
        left: (u32, Option<Rect>),
        right: (u32, Option<Rect>),
        from: Pos,
        to: Pos,
        corridors: Vec<Rect>,
    },
}

pub trait EventSink {
    fn record(&mut self, event: GenerationEvent);
}

impl EventSink for Vec<GenerationEvent> {
    fn record(&mut self, event: GenerationEvent) {
        self.push(event);
    }
}

/// Drops every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct Discard;

impl EventSink for Discard {
    fn record(&mut self, _event: GenerationEvent) {}
}
