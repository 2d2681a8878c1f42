//! Offset-pile restructuring of the played rows, driven through
//! `PlayerBoard` with authoritative snapshots.

use cardtable::{Card, CardType, Effect, ObjectId, Player, PlayerBoard};

fn being(id: &str, name: &str) -> Card {
    Card::new(id, name, vec![CardType::Being])
}

fn item(id: &str, name: &str) -> Card {
    Card::new(id, name, vec![CardType::Item])
}

fn holder(id: &str, name: &str, held: &[&str]) -> Card {
    let mut card = being(id, name);
    for h in held {
        card.effects.push(Effect::holding(ObjectId::from(*h)));
    }
    card
}

fn held_item(id: &str, name: &str, by: &str) -> Card {
    let mut card = item(id, name);
    card.effects.push(Effect::held(ObjectId::from(by)));
    card
}

fn board_with(played: Vec<Card>) -> (PlayerBoard, Player) {
    let mut player = Player::new("p1", "Ada");
    player.played = played;
    let mut board = PlayerBoard::new(&player);
    board.update(&player);
    (board, player)
}

fn pile_of(board: &PlayerBoard, id: &str) -> Option<cardtable::NodeId> {
    board
        .find_card(&ObjectId::from(id))
        .and_then(|n| board.tree().parent(n))
        .filter(|&p| board.tree().is_offset(p))
}

#[test]
fn test_holder_and_held_share_an_exclusive_pile() {
    let (board, _) = board_with(vec![
        holder("b1", "Forager", &["i1"]),
        held_item("i1", "Axe", "b1"),
        item("i2", "Rope"),
    ]);

    let pile = pile_of(&board, "b1").unwrap();
    assert_eq!(pile_of(&board, "i1"), Some(pile));
    assert_eq!(board.tree().parent(pile), Some(board.being_row()));

    // The unrelated item stays in the item row, in its own group pile.
    let loose = pile_of(&board, "i2").unwrap();
    assert_ne!(loose, pile);
    assert_eq!(board.tree().parent(loose), Some(board.item_row()));
}

#[test]
fn test_two_holders_never_share_a_pile() {
    // Same-named holders would cosmetically group; holding must override
    // that and keep each holder in its own pile.
    let (board, _) = board_with(vec![
        holder("b1", "Forager", &["i1"]),
        holder("b2", "Forager", &["i2"]),
        held_item("i1", "Axe", "b1"),
        held_item("i2", "Axe", "b2"),
    ]);

    let p1 = pile_of(&board, "b1").unwrap();
    let p2 = pile_of(&board, "b2").unwrap();
    assert_ne!(p1, p2);
    assert_eq!(pile_of(&board, "i1"), Some(p1));
    assert_eq!(pile_of(&board, "i2"), Some(p2));
}

#[test]
fn test_held_item_changes_hands() {
    let (mut board, mut player) = board_with(vec![
        holder("b1", "Forager", &["i1"]),
        being("b2", "Scout"),
        held_item("i1", "Axe", "b1"),
    ]);
    let first_pile = pile_of(&board, "i1").unwrap();

    // The next snapshot transfers the axe to the scout.
    player.played = vec![
        being("b1", "Forager"),
        holder("b2", "Scout", &["i1"]),
        held_item("i1", "Axe", "b2"),
    ];
    board.mark_resync();
    board.update(&player);

    let new_pile = pile_of(&board, "i1").unwrap();
    assert_ne!(new_pile, first_pile);
    assert_eq!(pile_of(&board, "b2"), Some(new_pile));
}

#[test]
fn test_dropping_an_item_returns_it_nowhere_special() {
    let (mut board, mut player) = board_with(vec![
        holder("b1", "Forager", &["i1"]),
        held_item("i1", "Axe", "b1"),
    ]);
    assert!(pile_of(&board, "i1").is_some());

    // Relation removed in the next snapshot: the axe is loose again and
    // regroups in the item row.
    player.played = vec![being("b1", "Forager"), item("i1", "Axe")];
    board.mark_resync();
    board.update(&player);

    let node = board.find_card(&ObjectId::from("i1")).unwrap();
    let parent = board.tree().parent(node).unwrap();
    assert_ne!(
        board.tree().find_card(board.being_row(), &ObjectId::from("i1")),
        Some(node)
    );
    assert!(board.tree().find_card(board.item_row(), &ObjectId::from("i1")).is_some());
    // A lone item sits in its own single-card group pile.
    assert!(board.tree().is_offset(parent));
}

#[test]
fn test_groups_absorb_newcomers_without_churn() {
    let (mut board, mut player) =
        board_with(vec![being("b1", "Forager"), being("b2", "Forager")]);
    let pile = pile_of(&board, "b1").unwrap();

    player.played.push(being("b3", "Forager"));
    board.mark_resync();
    board.update(&player);

    // The existing pile was reused, not rebuilt.
    assert_eq!(pile_of(&board, "b1"), Some(pile));
    assert_eq!(pile_of(&board, "b3"), Some(pile));
    assert_eq!(board.tree().count_cards(pile), 3);
}

#[test]
fn test_distinct_names_get_distinct_piles() {
    let (board, _) = board_with(vec![
        item("i1", "Axe"),
        item("i2", "Axe"),
        item("i3", "Rope"),
        item("i4", "Rope"),
    ]);

    let axes = pile_of(&board, "i1").unwrap();
    let ropes = pile_of(&board, "i3").unwrap();
    assert_ne!(axes, ropes);
    assert_eq!(pile_of(&board, "i2"), Some(axes));
    assert_eq!(pile_of(&board, "i4"), Some(ropes));
}

#[test]
fn test_departed_cards_leave_no_empty_piles() {
    let (mut board, mut player) = board_with(vec![
        holder("b1", "Forager", &["i1"]),
        held_item("i1", "Axe", "b1"),
        being("b2", "Scout"),
    ]);

    player.played = vec![being("b2", "Scout")];
    board.mark_resync();
    board.update(&player);

    assert_eq!(board.cards_in_play(), 1);
    // Only the scout's own group pile remains anywhere in the rows.
    let survivor = board.find_card(&ObjectId::from("b2")).unwrap();
    let pile = board.tree().parent(survivor).unwrap();
    for row in [board.item_row(), board.being_row(), board.process_row()] {
        for child in board.tree().children(row) {
            assert!(*child == pile || board.tree().is_card(*child));
        }
    }
    assert_eq!(board.tree().children(board.item_row()).len(), 0);
}

#[test]
fn test_restructure_converges_in_one_pass() {
    let snapshot = vec![
        holder("b1", "Forager", &["i1", "i2"]),
        held_item("i1", "Axe", "b1"),
        held_item("i2", "Rope", "b1"),
        being("b2", "Scout"),
        being("b3", "Scout"),
        item("i3", "Net"),
    ];
    let (mut board, player) = board_with(snapshot);

    let positions: Vec<_> = ["b1", "i1", "i2", "b2", "b3", "i3"]
        .iter()
        .map(|id| {
            let node = board.find_card(&ObjectId::from(*id)).unwrap();
            (node, board.tree().parent(node))
        })
        .collect();

    board.mark_resync();
    board.update(&player);

    for (node, parent) in positions {
        assert_eq!(board.tree().parent(node), parent);
    }
}

#[test]
fn test_process_row_is_untouched_by_grouping() {
    let (board, _) = board_with(vec![
        Card::new("pr1", "Harvest", vec![CardType::Process]),
        Card::new("pr2", "Harvest", vec![CardType::Process]),
    ]);

    // Processes sit directly in their row, never grouped by name.
    for id in ["pr1", "pr2"] {
        let node = board.find_card(&ObjectId::from(id)).unwrap();
        assert_eq!(board.tree().parent(node), Some(board.process_row()));
    }
}

#[test]
fn test_layout_runs_after_restructuring() {
    let (board, _) = board_with(vec![
        holder("b1", "Forager", &["i1"]),
        held_item("i1", "Axe", "b1"),
    ]);

    let held = board.find_card(&ObjectId::from("i1")).unwrap();
    let holder = board.find_card(&ObjectId::from("b1")).unwrap();

    // Inside the pile the diagonal step separates the two cards.
    let a = board.tree().position(held);
    let b = board.tree().position(holder);
    assert_eq!((a.x - b.x).abs(), 150.0);
    assert_eq!((a.y - b.y).abs(), 150.0);
}
