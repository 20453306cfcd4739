//! Arena-backed partition tree and its read-only traversals.

use slotmap::{SlotMap, new_key_type};
use xxhash_rust::xxh3::xxh3_64;

use crate::types::Rect;

new_key_type! {
    pub struct NodeId;
}

/// A sub-dungeon: a region of the board that is either split in two or holds a room.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartitionNode {
    id: u32,
    bounds: Rect,
    children: Option<(NodeId, NodeId)>,
    room: Option<Rect>,
    corridors: Vec<Rect>,
}

impl PartitionNode {
    fn new(id: u32, bounds: Rect) -> Self {
        Self { id, bounds, children: None, room: None, corridors: Vec::new() }
    }

    /// Creation-order counter. Diagnostic only.
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn left(&self) -> Option<NodeId> {
        self.children.map(|(left, _)| left)
    }

    pub fn right(&self) -> Option<NodeId> {
        self.children.map(|(_, right)| right)
    }

    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        self.children
    }

    /// The carved room. Always `None` on internal nodes.
    pub fn room(&self) -> Option<Rect> {
        self.room
    }

    /// Corridors joining the two subtrees, in the order they were routed.
    pub fn corridors(&self) -> &[Rect] {
        &self.corridors
    }
}

#[derive(Clone, Debug)]
pub struct DungeonTree {
    nodes: SlotMap<NodeId, PartitionNode>,
    root: NodeId,
    next_debug_id: u32,
}

impl DungeonTree {
    pub(crate) fn with_root(bounds: Rect) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(PartitionNode::new(0, bounds));
        Self { nodes, root, next_debug_id: 1 }
    }

    pub(crate) fn attach_children(
        &mut self,
        parent: NodeId,
        left_bounds: Rect,
        right_bounds: Rect,
    ) -> (NodeId, NodeId) {
        debug_assert!(self.nodes[parent].is_leaf(), "children are attached once");
        let left = self.insert(left_bounds);
        let right = self.insert(right_bounds);
        self.nodes[parent].children = Some((left, right));
        (left, right)
    }

    pub(crate) fn set_room(&mut self, id: NodeId, room: Rect) {
        self.nodes[id].room = Some(room);
    }

    pub(crate) fn append_corridors(&mut self, id: NodeId, corridors: &[Rect]) {
        self.nodes[id].corridors.extend_from_slice(corridors);
    }

    fn insert(&mut self, bounds: Rect) -> NodeId {
        let id = self.next_debug_id;
        self.next_debug_id += 1;
        self.nodes.insert(PartitionNode::new(id, bounds))
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_node(&self) -> &PartitionNode {
        &self.nodes[self.root]
    }

    pub fn bounds(&self) -> Rect {
        self.root_node().bounds
    }

    pub fn node(&self, id: NodeId) -> Option<&PartitionNode> {
        self.nodes.get(id)
    }

    pub fn left(&self, id: NodeId) -> Option<&PartitionNode> {
        self.node(id)?.left().and_then(|left| self.node(left))
    }

    pub fn right(&self, id: NodeId) -> Option<&PartitionNode> {
        self.node(id)?.right().and_then(|right| self.node(right))
    }

    /// First room found depth-first under `id`, preferring the left subtree.
    pub fn get_room(&self, id: NodeId) -> Option<Rect> {
        let node = self.node(id)?;
        match node.children {
            None => node.room,
            Some((left, right)) => self.get_room(left).or_else(|| self.get_room(right)),
        }
    }

    /// Lazy pre-order walk, left subtree before right.
    pub fn nodes(&self) -> DepthFirst<'_> {
        DepthFirst { tree: self, stack: vec![self.root] }
    }

    pub fn leaves(&self) -> impl Iterator<Item = (NodeId, &PartitionNode)> {
        self.nodes().filter(|(_, node)| node.is_leaf())
    }

    pub fn internal_nodes(&self) -> impl Iterator<Item = (NodeId, &PartitionNode)> {
        self.nodes().filter(|(_, node)| !node.is_leaf())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    pub fn rooms(&self) -> impl Iterator<Item = Rect> {
        self.leaves().filter_map(|(_, node)| node.room)
    }

    pub fn corridors(&self) -> impl Iterator<Item = Rect> {
        self.nodes().flat_map(|(_, node)| node.corridors.iter().copied())
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        for (_, node) in self.nodes() {
            bytes.extend(node.id.to_le_bytes());
            bytes.push(u8::from(node.is_leaf()));
            push_rect(&mut bytes, node.bounds);
            match node.room {
                None => bytes.push(0),
                Some(room) => {
                    bytes.push(1);
                    push_rect(&mut bytes, room);
                }
            }
            bytes.extend((node.corridors.len() as u32).to_le_bytes());
            for &corridor in &node.corridors {
                push_rect(&mut bytes, corridor);
            }
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

impl PartialEq for DungeonTree {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.nodes().map(|(_, node)| node).eq(other.nodes().map(|(_, node)| node))
    }
}

impl Eq for DungeonTree {}

fn push_rect(bytes: &mut Vec<u8>, rect: Rect) {
    bytes.extend(rect.x.to_le_bytes());
    bytes.extend(rect.y.to_le_bytes());
    bytes.extend(rect.width.to_le_bytes());
    bytes.extend(rect.height.to_le_bytes());
}

pub struct DepthFirst<'a> {
    tree: &'a DungeonTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = (NodeId, &'a PartitionNode);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = &self.tree.nodes[id];
        if let Some((left, right)) = node.children {
            self.stack.push(right);
            self.stack.push(left);
        }
        Some((id, node))
    }
}
