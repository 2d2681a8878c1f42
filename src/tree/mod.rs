//! The client-side entity tree.
//!
//! A polymorphic ownership tree of card leaves and card areas mirroring
//! (not identical to) the authoritative lists: the hand row, the three
//! played rows, and the offset piles grouping related cards. Nodes are
//! owned by an arena and linked by handles, so detach/attach is O(1) in
//! the parent link and safe against dangling references.
//!
//! ## Key Types
//!
//! - `NodeId`: Opaque node handle
//! - `CardTree`: The arena - insertion, traversal, re-parenting
//! - `CardNode` / `AreaNode`: The two node variants
//! - `AreaLayout`: Geometry strategy of an area (horizontal/stack/offset)

pub mod arena;
pub mod layout;
pub mod node;

pub use arena::{CardTree, Cards};
pub use layout::{arrange, extent, AreaLayout, Extent, Point};
pub use node::{AreaNode, CardNode, NodeId, NodeKind};
