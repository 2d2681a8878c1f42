//! Area layout strategies.
//!
//! Geometry only: the reconciliation engine decides *which* area a card
//! belongs to, the layout decides *where* inside it the card sits. Three
//! variants exist - a centered horizontal row, a depth stack, and a
//! diagonal offset pile for grouped/held cards. Units are table units;
//! a card is 400 x 600 x 2.

use crate::tree::arena::CardTree;
use crate::tree::node::NodeId;

pub const CARD_WIDTH: f32 = 400.0;
pub const CARD_HEIGHT: f32 = 600.0;
pub const CARD_DEPTH: f32 = 2.0;

/// Spacing between cards in the hand row.
pub const HAND_SPACING: f32 = 100.0;
/// Spacing between cards/piles in the played rows.
pub const ROW_SPACING: f32 = 300.0;
/// Diagonal step inside an offset pile.
pub const PILE_SPACING: f32 = 150.0;

/// A point in table space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
}

/// Bounding extent of a node, used when measuring siblings in a row.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

/// Geometry strategy of an area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AreaLayout {
    /// Children side by side, centered, spaced by their own widths.
    Horizontal { spacing: f32 },
    /// Children piled front to back (deck, discard).
    Stack { spacing: f32 },
    /// Children fanned diagonally (holding/grouped piles).
    Offset { spacing: f32 },
}

impl AreaLayout {
    #[must_use]
    pub const fn horizontal(spacing: f32) -> Self {
        Self::Horizontal { spacing }
    }

    #[must_use]
    pub const fn stack(spacing: f32) -> Self {
        Self::Stack { spacing }
    }

    #[must_use]
    pub const fn offset(spacing: f32) -> Self {
        Self::Offset { spacing }
    }

    /// Whether this is an offset pile.
    #[must_use]
    pub const fn is_offset(&self) -> bool {
        matches!(self, Self::Offset { .. })
    }
}

/// Measure a node: a card's fixed dimensions, or an area's extent from
/// its current children.
#[must_use]
pub fn extent(tree: &CardTree, node: NodeId) -> Extent {
    if tree.is_card(node) {
        return Extent {
            width: CARD_WIDTH,
            height: CARD_HEIGHT,
            depth: CARD_DEPTH,
        };
    }

    let children = tree.children(node);
    let n = children.len();
    if n == 0 {
        return Extent::default();
    }

    match *tree.layout(node) {
        AreaLayout::Horizontal { spacing } => {
            let unspaced: f32 = children.iter().map(|&c| extent(tree, c).width).sum();
            Extent {
                width: unspaced + spacing * (n as f32 - 1.0),
                height: CARD_HEIGHT,
                depth: CARD_DEPTH,
            }
        }
        AreaLayout::Stack { spacing } => Extent {
            width: CARD_WIDTH,
            height: CARD_HEIGHT,
            depth: CARD_DEPTH * n as f32 + spacing * (n as f32 - 1.0),
        },
        AreaLayout::Offset { spacing } => Extent {
            width: spacing * (n as f32 - 1.0) + CARD_WIDTH,
            height: spacing * (n as f32 - 1.0) + CARD_HEIGHT,
            depth: CARD_DEPTH,
        },
    }
}

/// Position every child of `area`, recursing into nested areas.
///
/// Positions are relative to the area's own origin; the excluded render
/// layer composes them with the board transform.
pub fn arrange(tree: &mut CardTree, area: NodeId) {
    let children: Vec<NodeId> = tree.children(area).to_vec();
    if children.is_empty() {
        return;
    }

    match *tree.layout(area) {
        AreaLayout::Horizontal { spacing } => {
            let total = extent(tree, area).width;
            let mut cumulative = -spacing;

            for &child in &children {
                let width = extent(tree, child).width;
                let x = total / 2.0 - (cumulative + spacing + width / 2.0);
                tree.set_position(child, Point { x, y: 0.0, z: 0.0 });
                cumulative += width + spacing;
            }
        }
        AreaLayout::Stack { spacing } => {
            let mut cumulative = -spacing;

            for &child in &children {
                let z = cumulative + spacing + CARD_DEPTH;
                tree.set_position(child, Point { x: 0.0, y: 0.0, z });
                cumulative += spacing + CARD_DEPTH;
            }
        }
        AreaLayout::Offset { spacing } => {
            let total = extent(tree, area);

            for (index, &child) in children.iter().enumerate() {
                let step = index as f32 * spacing;
                tree.set_position(
                    child,
                    Point {
                        x: -step - CARD_WIDTH / 2.0 + total.width / 2.0,
                        y: -step - CARD_HEIGHT / 2.0 + total.height / 2.0,
                        z: 0.0,
                    },
                );
            }
        }
    }

    for child in children {
        if !tree.is_card(child) {
            arrange(tree, child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ObjectId;

    fn cards(tree: &mut CardTree, area: NodeId, n: usize) -> Vec<NodeId> {
        (0..n)
            .map(|i| {
                let card = tree.insert_card(ObjectId::new(format!("c{i}")));
                tree.attach(area, card);
                card
            })
            .collect()
    }

    #[test]
    fn test_horizontal_row_is_centered() {
        let mut tree = CardTree::new();
        let area = tree.insert_area(AreaLayout::horizontal(100.0));
        let ids = cards(&mut tree, area, 2);

        arrange(&mut tree, area);

        // Total width: 400 + 100 + 400 = 900; children sit at +/-250.
        assert_eq!(extent(&tree, area).width, 900.0);
        assert_eq!(tree.position(ids[0]).x, 250.0);
        assert_eq!(tree.position(ids[1]).x, -250.0);
    }

    #[test]
    fn test_horizontal_measures_nested_pile_width() {
        let mut tree = CardTree::new();
        let area = tree.insert_area(AreaLayout::horizontal(100.0));
        let pile = tree.insert_area(AreaLayout::offset(150.0));
        tree.attach(area, pile);

        let c1 = tree.insert_card(ObjectId::from("c1"));
        let c2 = tree.insert_card(ObjectId::from("c2"));
        tree.attach(pile, c1);
        tree.attach(pile, c2);

        // Pile of two: 150 + 400 wide.
        assert_eq!(extent(&tree, pile).width, 550.0);
        assert_eq!(extent(&tree, area).width, 550.0);
    }

    #[test]
    fn test_stack_accumulates_depth() {
        let mut tree = CardTree::new();
        let area = tree.insert_area(AreaLayout::stack(10.0));
        let ids = cards(&mut tree, area, 3);

        arrange(&mut tree, area);

        assert_eq!(tree.position(ids[0]).z, 2.0);
        assert_eq!(tree.position(ids[1]).z, 14.0);
        assert_eq!(tree.position(ids[2]).z, 26.0);
        assert_eq!(extent(&tree, area).depth, 26.0);
    }

    #[test]
    fn test_offset_fans_diagonally() {
        let mut tree = CardTree::new();
        let area = tree.insert_area(AreaLayout::offset(150.0));
        let ids = cards(&mut tree, area, 2);

        arrange(&mut tree, area);

        let first = tree.position(ids[0]);
        let second = tree.position(ids[1]);
        assert_eq!(first.x - second.x, 150.0);
        assert_eq!(first.y - second.y, 150.0);
    }

    #[test]
    fn test_empty_area_measures_zero() {
        let mut tree = CardTree::new();
        let area = tree.insert_area(AreaLayout::horizontal(100.0));

        assert_eq!(extent(&tree, area), Extent::default());
        arrange(&mut tree, area);
    }
}
