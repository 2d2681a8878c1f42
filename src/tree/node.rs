//! Tree node variants.

use crate::data::ObjectId;
use crate::tree::layout::AreaLayout;

/// Opaque handle to a node in a `CardTree`.
///
/// Handles are never reused within one tree, so a stale handle fails
/// loudly instead of silently addressing a new node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Get the raw handle value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

/// A node is either a terminal card or an area with ordered children.
#[derive(Clone, Debug)]
pub enum NodeKind {
    Card(CardNode),
    Area(AreaNode),
}

impl NodeKind {
    /// Whether this node is a terminal card.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Card(_))
    }
}

/// Visual state for one card.
///
/// The card's data lives in the authoritative mirror; the node carries
/// the id correlating the two plus the accumulated visual state that must
/// survive snapshot merges.
#[derive(Clone, Debug)]
pub struct CardNode {
    /// Id of the mirrored `Card` this node renders.
    pub card_id: ObjectId,

    /// An "Activated" effect is present (rendered as a 90-degree turn).
    pub activated: bool,

    /// Exactly one pending choice targets this card.
    pub indicator: bool,
}

impl CardNode {
    /// Create a fresh node for a card id.
    #[must_use]
    pub fn new(card_id: ObjectId) -> Self {
        Self {
            card_id,
            activated: false,
            indicator: false,
        }
    }
}

/// A container of cards and nested sub-areas.
///
/// Areas have no persistent id; they are located by handle or by
/// structural predicate (their parent and children).
#[derive(Clone, Debug)]
pub struct AreaNode {
    /// Geometry strategy for arranging children.
    pub layout: AreaLayout,

    /// Ordered children (cards or nested areas).
    pub children: Vec<NodeId>,
}

impl AreaNode {
    /// Create an empty area with the given layout.
    #[must_use]
    pub fn new(layout: AreaLayout) -> Self {
        Self {
            layout,
            children: Vec::new(),
        }
    }
}
