//! Snapshot merge into the persistent mirror.
//!
//! Fresh snapshot records merge into existing mirrored copies by id -
//! never recreated from scratch when an id match exists, so the visual
//! nodes correlated to the mirror keep their identity across snapshots.
//! Removals run after all inserts/updates; a card that moved between
//! lists in the same pass is therefore never spuriously dropped.

use tracing::debug;

use crate::data::{Card, ChoiceMap, ObjectId, Player};

/// Merge one authoritative card list into its mirror.
///
/// Per snapshot card: an id match updates the mutable fields (effects,
/// plus prompt/choices when the card appears in the attached choice map);
/// a miss appends a fresh copy. Mirror entries absent from the snapshot
/// are removed afterwards. Returns `(added, removed)`.
pub fn merge_card_list(
    mirror: &mut Vec<Card>,
    snapshot: &[Card],
    prompt: Option<&str>,
    choices: Option<&ChoiceMap>,
) -> (usize, usize) {
    let mut seen: Vec<ObjectId> = Vec::with_capacity(snapshot.len());
    let mut added = 0;

    for card in snapshot {
        let index = match mirror
            .iter()
            .position(|c| c.session_object_id == card.session_object_id)
        {
            Some(i) => {
                mirror[i].effects = card.effects.clone();
                i
            }
            None => {
                mirror.push(card.clone());
                added += 1;
                mirror.len() - 1
            }
        };

        let merged = &mut mirror[index];
        seen.push(merged.session_object_id.clone());

        if let Some(map) = choices {
            if map.contains(&merged.session_object_id) {
                merged.prompt = prompt.map(str::to_owned);
                merged.choices = map
                    .get(&merged.session_object_id)
                    .map(<[_]>::to_vec)
                    .unwrap_or_default();
            }
        }
    }

    let before = mirror.len();
    mirror.retain(|c| seen.contains(&c.session_object_id));
    (added, before - mirror.len())
}

/// Merge one player snapshot into its mirror.
///
/// Hand and played are structurally diffed; the deck is only a count.
pub fn merge_player(
    mirror: &mut Player,
    snapshot: &Player,
    prompt: Option<&str>,
    choices: Option<&ChoiceMap>,
) {
    debug_assert_eq!(mirror.session_object_id, snapshot.session_object_id);

    let (hand_added, hand_removed) =
        merge_card_list(&mut mirror.hand, &snapshot.hand, prompt, choices);
    let (played_added, played_removed) =
        merge_card_list(&mut mirror.played, &snapshot.played, prompt, choices);
    mirror.deck_size = snapshot.deck_size;

    debug!(
        player = %mirror.name,
        hand_added,
        hand_removed,
        played_added,
        played_removed,
        "merged player snapshot"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Action, CardType, Choice, Effect};

    fn card(id: &str) -> Card {
        Card::new(ObjectId::from(id), id, vec![CardType::Being])
    }

    #[test]
    fn test_new_cards_are_appended() {
        let mut mirror = Vec::new();
        let snapshot = vec![card("a"), card("b")];

        let (added, removed) = merge_card_list(&mut mirror, &snapshot, None, None);

        assert_eq!((added, removed), (2, 0));
        assert_eq!(mirror, snapshot);
    }

    #[test]
    fn test_effects_merge_into_the_existing_entry() {
        let mut mirror = vec![card("a")];
        mirror[0].prompt = Some("stale but local".to_owned());

        let mut snapshot = card("a");
        snapshot.effects.push(Effect::activated());

        let (added, removed) = merge_card_list(&mut mirror, &[snapshot], None, None);

        assert_eq!((added, removed), (0, 0));
        assert_eq!(mirror.len(), 1);
        assert!(mirror[0].is_activated());
        // Only the effects merged; other local fields survive.
        assert_eq!(mirror[0].prompt.as_deref(), Some("stale but local"));
    }

    #[test]
    fn test_absent_cards_are_removed() {
        let mut mirror = vec![card("a"), card("b"), card("c")];

        let (added, removed) = merge_card_list(&mut mirror, &[card("b")], None, None);

        assert_eq!((added, removed), (0, 2));
        assert_eq!(mirror.len(), 1);
        assert_eq!(mirror[0].session_object_id, ObjectId::from("b"));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let mut mirror = Vec::new();
        let snapshot = vec![card("a"), card("b")];

        merge_card_list(&mut mirror, &snapshot, None, None);
        let first = mirror.clone();

        let (added, removed) = merge_card_list(&mut mirror, &snapshot, None, None);
        assert_eq!((added, removed), (0, 0));
        assert_eq!(mirror, first);
    }

    #[test]
    fn test_choice_map_attaches_prompt_and_choices() {
        let mut mirror = vec![card("a"), card("b")];

        let choice = Choice {
            prompt: "Pick.".to_owned(),
            actions: vec![
                Action::on_card("act1", "Play", card("a")),
                Action::on_card("act2", "Activate", card("a")),
            ],
            player: Player::new("p1", "Ada"),
        };
        let map = choice.choice_map();

        merge_card_list(
            &mut mirror,
            &[card("a"), card("b")],
            Some("Pick."),
            Some(&map),
        );

        assert_eq!(mirror[0].prompt.as_deref(), Some("Pick."));
        assert_eq!(mirror[0].choices.len(), 2);
        assert!(mirror[1].prompt.is_none());
        assert!(mirror[1].choices.is_empty());
    }

    #[test]
    fn test_merge_player_updates_deck_count() {
        let mut mirror = Player::new("p1", "Ada");
        let mut snapshot = Player::new("p1", "Ada");
        snapshot.deck_size = 7;
        snapshot.hand.push(card("a"));

        merge_player(&mut mirror, &snapshot, None, None);

        assert_eq!(mirror.deck_size, 7);
        assert_eq!(mirror.hand.len(), 1);
    }
}
