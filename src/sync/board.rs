//! Per-player visual board.
//!
//! Each player owns one `CardTree` with six root areas: deck, hand, the
//! three played rows, and discard. The board diffs the mirrored card
//! lists into the tree only when a cardinality mismatch (or a forced
//! resync) says the structure drifted, then re-derives the offset-pile
//! decomposition of the played rows from card type and relation data.
//!
//! Row assignment is fixed the first time a card is seen: Process cards
//! go to row 3, Beings to row 2, everything else to row 1. Only the
//! holding/grouping moves below relocate a card afterwards.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::data::{Card, ObjectId, Player};
use crate::tree::layout::{HAND_SPACING, PILE_SPACING, ROW_SPACING};
use crate::tree::{arrange, AreaLayout, CardTree, NodeId};

/// The visual board for one seated player.
#[derive(Clone, Debug)]
pub struct PlayerBoard {
    player_id: ObjectId,
    tree: CardTree,

    deck: NodeId,
    hand: NodeId,
    row_items: NodeId,
    row_beings: NodeId,
    row_processes: NodeId,
    discard: NodeId,

    /// Force a full diff on the next update, count match or not.
    resync: bool,
}

impl PlayerBoard {
    /// Create an empty board for a player.
    #[must_use]
    pub fn new(player: &Player) -> Self {
        let mut tree = CardTree::new();

        let deck = tree.insert_area(AreaLayout::stack(0.0));
        let hand = tree.insert_area(AreaLayout::horizontal(HAND_SPACING));
        let row_items = tree.insert_area(AreaLayout::horizontal(ROW_SPACING));
        let row_beings = tree.insert_area(AreaLayout::horizontal(ROW_SPACING));
        let row_processes = tree.insert_area(AreaLayout::horizontal(ROW_SPACING));
        let discard = tree.insert_area(AreaLayout::stack(0.0));

        Self {
            player_id: player.id().clone(),
            tree,
            deck,
            hand,
            row_items,
            row_beings,
            row_processes,
            discard,
            resync: false,
        }
    }

    /// The player this board belongs to.
    #[must_use]
    pub fn player_id(&self) -> &ObjectId {
        &self.player_id
    }

    /// The entity tree backing this board.
    #[must_use]
    pub fn tree(&self) -> &CardTree {
        &self.tree
    }

    #[must_use]
    pub fn deck_area(&self) -> NodeId {
        self.deck
    }

    #[must_use]
    pub fn hand_area(&self) -> NodeId {
        self.hand
    }

    /// Played row 1 (items and other non-being, non-process cards).
    #[must_use]
    pub fn item_row(&self) -> NodeId {
        self.row_items
    }

    /// Played row 2 (beings and their piles).
    #[must_use]
    pub fn being_row(&self) -> NodeId {
        self.row_beings
    }

    /// Played row 3 (processes).
    #[must_use]
    pub fn process_row(&self) -> NodeId {
        self.row_processes
    }

    #[must_use]
    pub fn discard_area(&self) -> NodeId {
        self.discard
    }

    /// Request a full diff on the next update.
    pub fn mark_resync(&mut self) {
        self.resync = true;
    }

    /// Find a card's node in the hand or any played row.
    #[must_use]
    pub fn find_card(&self, card_id: &ObjectId) -> Option<NodeId> {
        self.tree
            .find_card(self.hand, card_id)
            .or_else(|| self.tree.find_card(self.row_items, card_id))
            .or_else(|| self.tree.find_card(self.row_beings, card_id))
            .or_else(|| self.tree.find_card(self.row_processes, card_id))
    }

    /// Number of card nodes currently in the played rows.
    #[must_use]
    pub fn cards_in_play(&self) -> usize {
        self.tree.count_cards(self.row_items)
            + self.tree.count_cards(self.row_beings)
            + self.tree.count_cards(self.row_processes)
    }

    /// One per-frame pass: structural sync on cardinality mismatch, card
    /// state refresh, geometry. Returns whether a structural sync ran.
    pub fn update(&mut self, player: &Player) -> bool {
        debug_assert_eq!(&self.player_id, player.id());
        let mut synced = false;

        if self.resync || player.hand.len() != self.tree.count_cards(self.hand) {
            debug!(player = %player.name, "updating cards in hand");
            self.sync_hand(&player.hand);
            synced = true;
        }

        if self.resync || player.played.len() != self.cards_in_play() {
            debug!(player = %player.name, "updating cards in play");
            self.sync_played(&player.played);
            self.restructure(&player.played);
            synced = true;
        }

        self.refresh_cards(player);

        for area in [self.hand, self.row_items, self.row_beings, self.row_processes] {
            arrange(&mut self.tree, area);
        }

        self.resync = false;
        synced
    }

    /// Diff the hand area against the authoritative hand list.
    fn sync_hand(&mut self, hand: &[Card]) {
        let mut present: Vec<ObjectId> = Vec::with_capacity(hand.len());

        for card in hand {
            if self.tree.find_card(self.hand, card.id()).is_none() {
                let node = match self.tree.locate(card.id()) {
                    // The card moved here from another area; keep its node.
                    Some(node) => {
                        self.tree.detach(node);
                        node
                    }
                    None => self.tree.insert_card(card.id().clone()),
                };
                self.tree.attach(self.hand, node);
            }
            present.push(card.id().clone());
        }

        self.remove_absent(self.hand, &present);
    }

    /// Diff the three played rows against the authoritative played list.
    fn sync_played(&mut self, played: &[Card]) {
        let mut present: Vec<ObjectId> = Vec::with_capacity(played.len());

        for card in played {
            let found = self.find_in_rows(card.id());

            if found.is_none() {
                let node = match self.tree.locate(card.id()) {
                    Some(node) => {
                        self.tree.detach(node);
                        node
                    }
                    None => self.tree.insert_card(card.id().clone()),
                };

                // Row assignment is fixed at first sight.
                let row = if card.is_process() {
                    self.row_processes
                } else if card.is_being() {
                    self.row_beings
                } else {
                    self.row_items
                };
                self.tree.attach(row, node);
            }

            present.push(card.id().clone());
        }

        for row in [self.row_items, self.row_beings, self.row_processes] {
            self.remove_absent(row, &present);
        }
    }

    fn find_in_rows(&self, card_id: &ObjectId) -> Option<NodeId> {
        self.tree
            .find_card(self.row_items, card_id)
            .or_else(|| self.tree.find_card(self.row_beings, card_id))
            .or_else(|| self.tree.find_card(self.row_processes, card_id))
    }

    /// Deletion half of the diff: runs after all inserts so a card that
    /// moved areas in the same pass is never spuriously dropped.
    fn remove_absent(&mut self, area: NodeId, present: &[ObjectId]) {
        for node in self.tree.cards(area).collect::<Vec<_>>() {
            let id = self.tree.card(node).card_id.clone();
            if !present.contains(&id) {
                debug!(card = %id, "removing card no longer in the snapshot");
                self.tree.remove(node);
            }
        }
    }

    /// Re-derive the offset-pile decomposition of the played rows.
    ///
    /// A pure function of current card type/relation state; existing
    /// piles are reused where still valid to avoid visual churn.
    fn restructure(&mut self, played: &[Card]) {
        let lookup: FxHashMap<&ObjectId, &Card> = played.iter().map(|c| (c.id(), c)).collect();

        let order: Vec<ObjectId> = self
            .tree
            .cards(self.row_beings)
            .chain(self.tree.cards(self.row_items))
            .map(|n| self.tree.card(n).card_id.clone())
            .collect();

        let mut being_groups: Vec<(String, Vec<ObjectId>)> = Vec::new();
        let mut item_groups: Vec<(String, Vec<ObjectId>)> = Vec::new();

        for id in &order {
            let Some(card) = lookup.get(id).copied() else {
                continue;
            };
            let is_holding = card.is_being() && card.holding().next().is_some();
            let is_held = !card.is_being() && card.held_by().is_some();

            if is_holding {
                debug!(card = %card.name, "restructuring around a holding being");
                self.restructure_for_holding_being(card, &lookup);
            } else if card.is_being() {
                push_group(&mut being_groups, &card.name, id);
            } else if card.is_item() && !is_held {
                push_group(&mut item_groups, &card.name, id);
            }
        }

        self.restructure_for_being_grouping(&being_groups);
        self.restructure_for_item_grouping(&item_groups);
        self.prune_empty_piles();
    }

    /// Pull a holding being and exactly the cards it holds into one
    /// offset pile.
    fn restructure_for_holding_being(&mut self, card: &Card, lookup: &FxHashMap<&ObjectId, &Card>) {
        let Some(node) = self.tree.locate(card.id()) else {
            panic!("card {} vanished from the played rows mid-restructure", card.id());
        };

        let current_pile = self.tree.parent(node).filter(|&p| self.tree.is_offset(p));

        let mut being_count = 0;
        if let Some(pile) = current_pile {
            for other in self.tree.cards(pile).collect::<Vec<_>>() {
                let other_id = &self.tree.card(other).card_id;
                if lookup.get(other_id).is_some_and(|c| c.is_being()) {
                    being_count += 1;
                }
            }
        }

        if current_pile.is_some() {
            self.tree.detach(node);
        }

        let pile = match current_pile {
            Some(pile) if being_count <= 1 => pile,
            // Holding piles are exclusive: two co-located holders force a
            // fresh pile.
            _ => {
                self.tree.detach(node);
                let fresh = self.tree.insert_area(AreaLayout::offset(PILE_SPACING));
                self.tree.attach(self.row_beings, fresh);
                fresh
            }
        };

        for held_id in card.holding() {
            let in_beings = self.tree.find_card(self.row_beings, held_id);
            let in_items = self.tree.find_card(self.row_items, held_id);

            if let Some(held) = in_beings {
                // The held card changed hands from a different pile.
                if self.tree.parent(held) != Some(pile) {
                    self.tree.detach(held);
                }
            } else if let Some(held) = in_items {
                // The held card was sitting in the item row.
                self.tree.detach(held);
            }

            if let Some(held) = in_beings.or(in_items) {
                if self.tree.parent(held) != Some(pile) {
                    debug!(held = %held_id, holder = %card.name, "moving held card into the holder's pile");
                    self.tree.attach(pile, held);
                }
            }
        }

        self.tree.attach(pile, node);
    }

    /// Group non-holding beings of the same name into one shared pile.
    fn restructure_for_being_grouping(&mut self, groups: &[(String, Vec<ObjectId>)]) {
        for (name, ids) in groups {
            let pile = self.regroup(ids, self.row_beings);
            debug!(name = %name, count = ids.len(), pile = %pile, "grouped beings by name");
        }
    }

    /// Group non-held items of the same name into one shared pile in the
    /// item row.
    fn restructure_for_item_grouping(&mut self, groups: &[(String, Vec<ObjectId>)]) {
        for (name, ids) in groups {
            let pile = self.regroup(ids, self.row_items);
            debug!(name = %name, count = ids.len(), pile = %pile, "grouped items by name");
        }
    }

    /// Shared cosmetic-grouping pass: reuse one valid existing pile in
    /// the target row, detach everything else, and gather the group.
    fn regroup(&mut self, ids: &[ObjectId], row: NodeId) -> NodeId {
        let mut pile: Option<NodeId> = None;

        for id in ids {
            let Some(node) = self.tree.locate(id) else {
                continue;
            };
            match self.tree.parent(node) {
                Some(parent)
                    if self.tree.is_offset(parent)
                        && self.tree.find_card(row, id).is_some() =>
                {
                    pile = Some(parent);
                }
                _ => {
                    self.tree.detach(node);
                }
            }
        }

        let pile = match pile {
            Some(pile) => pile,
            None => {
                let fresh = self.tree.insert_area(AreaLayout::offset(PILE_SPACING));
                self.tree.attach(row, fresh);
                fresh
            }
        };

        for id in ids {
            let Some(node) = self.tree.locate(id) else {
                continue;
            };
            if self.tree.parent(node) != Some(pile) {
                self.tree.detach(node);
                self.tree.attach(pile, node);
            }
        }

        pile
    }

    /// Drop offset piles left without children by the passes above.
    fn prune_empty_piles(&mut self) {
        for row in [self.row_items, self.row_beings, self.row_processes] {
            loop {
                let empty: Vec<NodeId> = self
                    .areas_under(row)
                    .into_iter()
                    .filter(|&a| self.tree.is_offset(a) && self.tree.children(a).is_empty())
                    .collect();
                if empty.is_empty() {
                    break;
                }
                for area in empty {
                    self.tree.remove(area);
                }
            }
        }
    }

    fn areas_under(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.tree.children(root).to_vec();

        while let Some(node) = stack.pop() {
            if !self.tree.is_card(node) {
                out.push(node);
                stack.extend_from_slice(self.tree.children(node));
            }
        }
        out
    }

    /// Refresh per-card visual flags from the mirror.
    fn refresh_cards(&mut self, player: &Player) {
        for card in player.hand.iter().chain(player.played.iter()) {
            let Some(node) = self.tree.locate(card.id()) else {
                continue;
            };
            let activated = card.is_activated();
            let state = self.tree.card_mut(node);

            if activated != state.activated {
                debug!(card = %card.name, activated, "card activation changed");
                state.activated = activated;
            }
            state.indicator = card.choices.len() == 1;
        }
    }
}

fn push_group(groups: &mut Vec<(String, Vec<ObjectId>)>, name: &str, id: &ObjectId) {
    match groups.iter_mut().find(|(n, _)| n == name) {
        Some((_, ids)) => ids.push(id.clone()),
        None => groups.push((name.to_owned(), vec![id.clone()])),
    }
}
