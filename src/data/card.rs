//! Cards and the effects attached to them.
//!
//! A `Card` is the snapshot-side record of one card in play or in hand.
//! Its `types` decide which played row the visual node is created in, and
//! its `effects` carry the *holds* relation that drives offset-pile
//! restructuring: a "Holding" effect on card A naming card B corresponds
//! to a "Held" effect on B naming A.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::Action;
use super::id::ObjectId;

/// Card type vocabulary.
///
/// The server's vocabulary is open-ended; the three types below are the
/// ones layout cares about. Anything else round-trips through `Other`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Being,
    Item,
    Process,
    #[serde(untagged)]
    Other(String),
}

/// An active effect on a card.
///
/// Effects are tags with an optional relational payload: a "Holding"
/// effect names the held card via `held_id`, a "Held" effect names the
/// holder via `holding_id`. The relation is many-to-one held-to-holder,
/// but one holder may hold several cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    pub name: String,

    /// Effect discriminator ("Activated", "Holding", "Held", ...).
    #[serde(rename = "type")]
    pub kind: String,

    /// Card held by the owner of this effect (on "Holding" effects).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub held_id: Option<ObjectId>,

    /// Card holding the owner of this effect (on "Held" effects).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holding_id: Option<ObjectId>,
}

impl Effect {
    pub const ACTIVATED: &'static str = "Activated";
    pub const HOLDING: &'static str = "Holding";
    pub const HELD: &'static str = "Held";

    /// Create an "Activated" effect.
    #[must_use]
    pub fn activated() -> Self {
        Self {
            name: Self::ACTIVATED.to_owned(),
            kind: Self::ACTIVATED.to_owned(),
            held_id: None,
            holding_id: None,
        }
    }

    /// Create a "Holding" effect naming the held card.
    #[must_use]
    pub fn holding(held: ObjectId) -> Self {
        Self {
            name: Self::HOLDING.to_owned(),
            kind: Self::HOLDING.to_owned(),
            held_id: Some(held),
            holding_id: None,
        }
    }

    /// Create a "Held" effect naming the holder.
    #[must_use]
    pub fn held(holder: ObjectId) -> Self {
        Self {
            name: Self::HELD.to_owned(),
            kind: Self::HELD.to_owned(),
            held_id: None,
            holding_id: Some(holder),
        }
    }
}

/// Snapshot record of a single card.
///
/// `prompt` and `choices` are non-empty exactly when this card is the
/// subject of the pending game-level choice.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub session_object_id: ObjectId,
    pub name: String,

    #[serde(default)]
    pub types: Vec<CardType>,

    /// Active effects. Rarely more than two per card.
    #[serde(default)]
    pub effects: SmallVec<[Effect; 2]>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Action>,
}

impl Card {
    /// Create a card with a name and types and nothing else.
    #[must_use]
    pub fn new(id: impl Into<ObjectId>, name: impl Into<String>, types: Vec<CardType>) -> Self {
        Self {
            session_object_id: id.into(),
            name: name.into(),
            types,
            effects: SmallVec::new(),
            prompt: None,
            choices: Vec::new(),
        }
    }

    /// The card's session-unique id.
    #[must_use]
    pub fn id(&self) -> &ObjectId {
        &self.session_object_id
    }

    #[must_use]
    pub fn is_being(&self) -> bool {
        self.types.contains(&CardType::Being)
    }

    #[must_use]
    pub fn is_item(&self) -> bool {
        self.types.contains(&CardType::Item)
    }

    #[must_use]
    pub fn is_process(&self) -> bool {
        self.types.contains(&CardType::Process)
    }

    /// Ids of the cards this card is currently holding.
    pub fn holding(&self) -> impl Iterator<Item = &ObjectId> {
        self.effects
            .iter()
            .filter(|e| e.kind == Effect::HOLDING)
            .filter_map(|e| e.held_id.as_ref())
    }

    /// Id of the card holding this one, if any.
    #[must_use]
    pub fn held_by(&self) -> Option<&ObjectId> {
        self.effects
            .iter()
            .find(|e| e.kind == Effect::HELD)
            .and_then(|e| e.holding_id.as_ref())
    }

    /// Whether an "Activated" effect is present.
    #[must_use]
    pub fn is_activated(&self) -> bool {
        self.effects.iter().any(|e| e.name == Effect::ACTIVATED)
    }
}

impl From<ObjectId> for Card {
    fn from(id: ObjectId) -> Self {
        Self::new(id, "", Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn being(id: &str) -> Card {
        Card::new(ObjectId::from(id), id, vec![CardType::Being])
    }

    #[test]
    fn test_type_predicates() {
        let card = Card::new(
            ObjectId::from("c1"),
            "Forager",
            vec![CardType::Being, CardType::Other("Token".to_owned())],
        );

        assert!(card.is_being());
        assert!(!card.is_item());
        assert!(!card.is_process());
    }

    #[test]
    fn test_holding_relation() {
        let mut holder = being("holder");
        holder.effects.push(Effect::holding(ObjectId::from("axe")));
        holder.effects.push(Effect::holding(ObjectId::from("rope")));

        let held: Vec<_> = holder.holding().map(ObjectId::as_str).collect();
        assert_eq!(held, vec!["axe", "rope"]);
        assert_eq!(holder.held_by(), None);
    }

    #[test]
    fn test_held_relation() {
        let mut item = Card::new(ObjectId::from("axe"), "Axe", vec![CardType::Item]);
        item.effects.push(Effect::held(ObjectId::from("holder")));

        assert_eq!(item.held_by(), Some(&ObjectId::from("holder")));
        assert_eq!(item.holding().count(), 0);
    }

    #[test]
    fn test_activation() {
        let mut card = being("c1");
        assert!(!card.is_activated());

        card.effects.push(Effect::activated());
        assert!(card.is_activated());
    }

    #[test]
    fn test_card_type_serialization() {
        let types = vec![
            CardType::Being,
            CardType::Other("Token".to_owned()),
        ];
        let json = serde_json::to_string(&types).unwrap();
        assert_eq!(json, "[\"Being\",\"Token\"]");

        let back: Vec<CardType> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, types);
    }

    #[test]
    fn test_effect_wire_field_names() {
        let effect = Effect::holding(ObjectId::from("axe"));
        let json = serde_json::to_value(&effect).unwrap();

        // The server sends the discriminator as "type".
        assert_eq!(json["type"], "Holding");
        assert_eq!(json["held_id"], "axe");
        assert!(json.get("holding_id").is_none());
    }

    #[test]
    fn test_card_round_trip() {
        let mut card = being("c1");
        card.effects.push(Effect::activated());

        let json = serde_json::to_string(&card).unwrap();
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(back, card);
    }
}
