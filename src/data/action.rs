//! Actions, choices, and the per-card choice map.
//!
//! An `Action` is one executable move tied to a card and an actor; a
//! `Choice` bundles a prompt, the candidate actions, and the player the
//! choice is presented to. `ChoiceMap` regroups a choice's actions by
//! card id so reconciliation can attach them to the right visual nodes,
//! and carries the single-card-multi-option focus shortcut.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::card::Card;
use super::id::ObjectId;
use super::player::Player;

/// One executable move.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub session_object_id: ObjectId,
    pub name: String,

    /// Action discriminator ("play", "activate", ...). Opaque to the
    /// client; only logged and echoed back.
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub state: String,

    /// The card this action operates on, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,

    /// The actor, if the server attached one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<Player>,
}

impl Action {
    /// Create an action targeting a card.
    #[must_use]
    pub fn on_card(id: impl Into<ObjectId>, name: impl Into<String>, card: Card) -> Self {
        Self {
            session_object_id: id.into(),
            name: name.into(),
            kind: String::new(),
            state: String::new(),
            card: Some(card),
            player: None,
        }
    }

    /// The action's session-unique id.
    #[must_use]
    pub fn id(&self) -> &ObjectId {
        &self.session_object_id
    }
}

/// A pending choice presented to one player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub prompt: String,
    pub actions: Vec<Action>,
    pub player: Player,
}

impl Choice {
    /// Group this choice's actions by the card they operate on.
    ///
    /// Actions without an attached card (player-level options) are not
    /// part of the per-card grouping.
    #[must_use]
    pub fn choice_map(&self) -> ChoiceMap {
        let mut by_card: FxHashMap<ObjectId, Vec<Action>> = FxHashMap::default();

        for action in &self.actions {
            if let Some(card) = &action.card {
                by_card
                    .entry(card.session_object_id.clone())
                    .or_default()
                    .push(action.clone());
            }
        }

        // Single-card-multi-option shortcut: when exactly one card is the
        // subject of several actions, that card gets focus this frame.
        let focus = if by_card.len() == 1 {
            by_card
                .iter()
                .next()
                .filter(|(_, actions)| actions.len() > 1)
                .map(|(id, _)| id.clone())
        } else {
            None
        };

        ChoiceMap { by_card, focus }
    }
}

/// A choice's candidate actions, regrouped by card id.
#[derive(Clone, Debug, Default)]
pub struct ChoiceMap {
    by_card: FxHashMap<ObjectId, Vec<Action>>,
    focus: Option<ObjectId>,
}

impl ChoiceMap {
    /// Actions targeting the given card.
    #[must_use]
    pub fn get(&self, card_id: &ObjectId) -> Option<&[Action]> {
        self.by_card.get(card_id).map(Vec::as_slice)
    }

    /// Whether any action targets the given card.
    #[must_use]
    pub fn contains(&self, card_id: &ObjectId) -> bool {
        self.by_card.contains_key(card_id)
    }

    /// The card to focus this frame, when one card owns every option.
    #[must_use]
    pub fn focus_card(&self) -> Option<&ObjectId> {
        self.focus.as_ref()
    }

    /// Number of distinct cards with pending actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_card.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_card.is_empty()
    }
}

/// Context attached to an `action_executed` notification.
///
/// Informational only: the structural consequences of the action arrive
/// via the next snapshot event, not through this record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionContext {
    pub action: Action,

    #[serde(default)]
    pub ready: Vec<Action>,

    #[serde(default)]
    pub choices: Vec<Action>,

    #[serde(default)]
    pub players: Vec<Action>,
}
