//! Game snapshot records.

use serde::{Deserialize, Serialize};

use super::id::{ObjectId, SessionId};
use super::player::Player;

/// One game session as the server reports it.
///
/// Player order is connection order and is semantically significant:
/// it is the seating/turn order and is never reshuffled client-side.
/// `prompt` is non-empty exactly while a choice is pending at the game
/// level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub session_id: SessionId,

    #[serde(default)]
    pub players: Vec<Player>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

impl Game {
    /// Create a game with no players and no pending prompt.
    #[must_use]
    pub fn new(session_id: impl Into<SessionId>) -> Self {
        Self {
            session_id: session_id.into(),
            players: Vec::new(),
            prompt: None,
        }
    }

    /// Look up a player by id.
    #[must_use]
    pub fn player(&self, id: &ObjectId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    /// Look up a player by id, mutably.
    pub fn player_mut(&mut self, id: &ObjectId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id() == id)
    }

    /// Whether a game-level choice is pending.
    #[must_use]
    pub fn has_prompt(&self) -> bool {
        self.prompt.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_lookup() {
        let mut game = Game::new("s1");
        game.players.push(Player::new("p1", "Ada"));
        game.players.push(Player::new("p2", "Ben"));

        assert_eq!(game.player(&ObjectId::from("p2")).map(|p| p.name.as_str()), Some("Ben"));
        assert!(game.player(&ObjectId::from("p3")).is_none());
    }

    #[test]
    fn test_prompt_flag() {
        let mut game = Game::new("s1");
        assert!(!game.has_prompt());

        game.prompt = Some("Choose a card to play.".to_owned());
        assert!(game.has_prompt());
    }
}
