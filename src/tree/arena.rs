//! Arena storage for the entity tree.
//!
//! The arena owns every node and tracks parent links, so re-parenting is
//! an explicit detach-then-attach and a card can never end up in two
//! areas at once. Structural misuse (attaching to a leaf, attaching an
//! already-attached node, duplicate card ids) is a programming error and
//! panics.

use rustc_hash::FxHashMap;

use crate::data::ObjectId;
use crate::tree::layout::{AreaLayout, Point};
use crate::tree::node::{AreaNode, CardNode, NodeId, NodeKind};

#[derive(Clone, Debug)]
struct Entry {
    parent: Option<NodeId>,
    position: Point,
    kind: NodeKind,
}

/// The entity tree arena.
///
/// Holds any number of detached roots; the board in `sync` keeps one root
/// per visual area (hand, played rows, deck, discard).
#[derive(Clone, Debug, Default)]
pub struct CardTree {
    nodes: FxHashMap<NodeId, Entry>,

    /// Card id -> node handle, for O(1) identity lookup.
    by_card: FxHashMap<ObjectId, NodeId>,

    next: u32,
}

impl CardTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        self.nodes.insert(
            id,
            Entry {
                parent: None,
                position: Point::ZERO,
                kind,
            },
        );
        id
    }

    fn entry(&self, node: NodeId) -> &Entry {
        match self.nodes.get(&node) {
            Some(entry) => entry,
            None => panic!("unknown node {node}"),
        }
    }

    fn entry_mut(&mut self, node: NodeId) -> &mut Entry {
        match self.nodes.get_mut(&node) {
            Some(entry) => entry,
            None => panic!("unknown node {node}"),
        }
    }

    /// Insert a detached area node.
    pub fn insert_area(&mut self, layout: AreaLayout) -> NodeId {
        self.allocate(NodeKind::Area(AreaNode::new(layout)))
    }

    /// Insert a detached card node.
    ///
    /// Panics if the card id already has a node in this tree - object
    /// identity is one node per card id.
    pub fn insert_card(&mut self, card_id: ObjectId) -> NodeId {
        if self.by_card.contains_key(&card_id) {
            panic!("card {card_id} already has a node in this tree");
        }

        let node = self.allocate(NodeKind::Card(CardNode::new(card_id.clone())));
        self.by_card.insert(card_id, node);
        node
    }

    /// Append a child to an area.
    ///
    /// Panics if the parent is a card node or the child is already
    /// attached somewhere - detach first.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        if self.entry(child).parent.is_some() {
            panic!("{child} is already attached; detach it first");
        }

        match &mut self.entry_mut(parent).kind {
            NodeKind::Area(area) => area.children.push(child),
            NodeKind::Card(_) => panic!("{parent} is a card node and cannot take children"),
        }

        self.entry_mut(child).parent = Some(parent);
    }

    /// Detach a node from its parent, leaving it as a root.
    ///
    /// Returns the old parent, or `None` if the node was already a root.
    pub fn detach(&mut self, node: NodeId) -> Option<NodeId> {
        let parent = self.entry_mut(node).parent.take()?;

        if let NodeKind::Area(area) = &mut self.entry_mut(parent).kind {
            area.children.retain(|&c| c != node);
        }

        Some(parent)
    }

    /// Detach a node and drop it together with its whole subtree.
    pub fn remove(&mut self, node: NodeId) {
        self.detach(node);

        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            let Some(entry) = self.nodes.remove(&current) else {
                continue;
            };
            match entry.kind {
                NodeKind::Card(card) => {
                    self.by_card.remove(&card.card_id);
                }
                NodeKind::Area(area) => stack.extend(area.children),
            }
        }
    }

    /// Remove a card from a subtree by id.
    ///
    /// Returns `false` if the card is not under `root`.
    pub fn remove_card(&mut self, root: NodeId, card_id: &ObjectId) -> bool {
        match self.find_card(root, card_id) {
            Some(node) => {
                self.remove(node);
                true
            }
            None => false,
        }
    }

    /// The node's current parent.
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.entry(node).parent
    }

    /// Ordered children of an area. Panics on a card node.
    #[must_use]
    pub fn children(&self, area: NodeId) -> &[NodeId] {
        match &self.entry(area).kind {
            NodeKind::Area(a) => &a.children,
            NodeKind::Card(_) => panic!("{area} is a card node and has no children"),
        }
    }

    /// The area's layout strategy. Panics on a card node.
    #[must_use]
    pub fn layout(&self, area: NodeId) -> &AreaLayout {
        match &self.entry(area).kind {
            NodeKind::Area(a) => &a.layout,
            NodeKind::Card(_) => panic!("{area} is a card node and has no layout"),
        }
    }

    /// Whether the node is an offset-pile area.
    #[must_use]
    pub fn is_offset(&self, node: NodeId) -> bool {
        matches!(
            &self.entry(node).kind,
            NodeKind::Area(a) if a.layout.is_offset()
        )
    }

    /// Whether the node is a terminal card.
    #[must_use]
    pub fn is_card(&self, node: NodeId) -> bool {
        self.entry(node).kind.is_leaf()
    }

    /// The card state of a leaf node. Panics on an area node.
    #[must_use]
    pub fn card(&self, node: NodeId) -> &CardNode {
        match &self.entry(node).kind {
            NodeKind::Card(c) => c,
            NodeKind::Area(_) => panic!("{node} is an area node, not a card"),
        }
    }

    /// Mutable card state of a leaf node. Panics on an area node.
    pub fn card_mut(&mut self, node: NodeId) -> &mut CardNode {
        match &mut self.entry_mut(node).kind {
            NodeKind::Card(c) => c,
            NodeKind::Area(_) => panic!("{node} is an area node, not a card"),
        }
    }

    /// The node's arranged position.
    #[must_use]
    pub fn position(&self, node: NodeId) -> Point {
        self.entry(node).position
    }

    /// Set the node's arranged position.
    pub fn set_position(&mut self, node: NodeId, position: Point) {
        self.entry_mut(node).position = position;
    }

    /// Find a card's node anywhere in the arena.
    #[must_use]
    pub fn locate(&self, card_id: &ObjectId) -> Option<NodeId> {
        self.by_card.get(card_id).copied()
    }

    /// Find a card's node within the subtree rooted at `root`.
    #[must_use]
    pub fn find_card(&self, root: NodeId, card_id: &ObjectId) -> Option<NodeId> {
        let node = self.locate(card_id)?;

        // Containment check by walking the parent chain.
        let mut current = Some(node);
        while let Some(c) = current {
            if c == root {
                return Some(node);
            }
            current = self.parent(c);
        }
        None
    }

    /// Lazily enumerate the card leaves under `root`, depth-first in
    /// child order.
    #[must_use]
    pub fn cards(&self, root: NodeId) -> Cards<'_> {
        Cards {
            tree: self,
            stack: vec![root],
        }
    }

    /// Count the card leaves under `root`.
    #[must_use]
    pub fn count_cards(&self, root: NodeId) -> usize {
        self.cards(root).count()
    }

    /// Total number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the handle refers to a live node.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }
}

/// Lazy depth-first iterator over the card leaves of a subtree.
pub struct Cards<'a> {
    tree: &'a CardTree,
    stack: Vec<NodeId>,
}

impl Iterator for Cards<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match &self.tree.entry(node).kind {
                NodeKind::Card(_) => return Some(node),
                NodeKind::Area(area) => {
                    // Reverse so the leftmost child is visited first.
                    self.stack.extend(area.children.iter().rev().copied());
                }
            }
        }
        None
    }
}
