//! Player snapshot records.

use serde::{Deserialize, Serialize};

use super::card::Card;
use super::id::ObjectId;

/// One player as the server reports them.
///
/// `hand` and `played` are the structurally reconciled lists. Deck
/// contents never cross the wire - only `deck_size` - and `discard` is
/// mirrored as data but not diffed into the visual tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub session_object_id: ObjectId,
    pub name: String,

    #[serde(default)]
    pub deck_size: u32,

    #[serde(default)]
    pub hand: Vec<Card>,

    #[serde(default)]
    pub played: Vec<Card>,

    #[serde(default)]
    pub discard: Vec<Card>,
}

impl Player {
    /// Create an empty player record.
    #[must_use]
    pub fn new(id: impl Into<ObjectId>, name: impl Into<String>) -> Self {
        Self {
            session_object_id: id.into(),
            name: name.into(),
            deck_size: 0,
            hand: Vec::new(),
            played: Vec::new(),
            discard: Vec::new(),
        }
    }

    /// The player's session-unique id.
    #[must_use]
    pub fn id(&self) -> &ObjectId {
        &self.session_object_id
    }

    /// Mutable view over every card in hand and in play.
    pub fn cards_mut(&mut self) -> impl Iterator<Item = &mut Card> {
        self.hand.iter_mut().chain(self.played.iter_mut())
    }
}
