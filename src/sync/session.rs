//! Session phase machine.
//!
//! A session moves through three coarse phases:
//!
//! - **Uninitiated**: nothing adopted yet; no game context exists.
//! - **Initiated**: the server handed us a `Game`; we know who we are.
//! - **Started**: an active player is established and at least one
//!   prompt cycle has occurred.
//!
//! Phase-specific context lives inside the variant that guarantees it,
//! so code cannot read an active player before one exists. Invoking a
//! phase-gated operation too early is a programming error and panics -
//! silent continuation would desynchronize the visual tree from the
//! authoritative state with no detection mechanism.

use crate::data::{Game, ObjectId};

/// Coarse phase discriminant, for reporting and gating checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Uninitiated,
    Initiated,
    Started,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Uninitiated => "uninitiated",
            Self::Initiated => "initiated",
            Self::Started => "started",
        })
    }
}

/// Context available from the Initiated phase on: the one authoritative
/// game mirror, and our own player id (always the first listed player of
/// the adopting snapshot).
#[derive(Clone, Debug)]
pub struct MatchState {
    pub game: Game,
    pub self_id: ObjectId,
}

impl MatchState {
    /// Clear the pending prompt everywhere: the game level and every
    /// mirrored card that carried it.
    pub fn clear_prompts(&mut self) {
        self.game.prompt = None;

        for player in &mut self.game.players {
            for card in player.cards_mut() {
                if card.prompt.is_some() {
                    card.prompt = None;
                    card.choices.clear();
                }
            }
        }
    }
}

/// The session phase with its phase-specific context.
#[derive(Clone, Debug, Default)]
pub enum Session {
    #[default]
    Uninitiated,
    Initiated(MatchState),
    /// Started carries the active player's id.
    Started(MatchState, ObjectId),
}

impl Session {
    /// The current phase discriminant.
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self {
            Self::Uninitiated => Phase::Uninitiated,
            Self::Initiated(_) => Phase::Initiated,
            Self::Started(..) => Phase::Started,
        }
    }

    /// Match context, if the session has been initiated.
    #[must_use]
    pub fn state(&self) -> Option<&MatchState> {
        match self {
            Self::Uninitiated => None,
            Self::Initiated(state) | Self::Started(state, _) => Some(state),
        }
    }

    /// Mutable match context, if the session has been initiated.
    pub fn state_mut(&mut self) -> Option<&mut MatchState> {
        match self {
            Self::Uninitiated => None,
            Self::Initiated(state) | Self::Started(state, _) => Some(state),
        }
    }

    /// The active player, once the session has started.
    #[must_use]
    pub fn active_player(&self) -> Option<&ObjectId> {
        match self {
            Self::Started(_, active) => Some(active),
            _ => None,
        }
    }

    /// Match context, panicking before the Initiated phase.
    #[must_use]
    pub fn expect_state(&self) -> &MatchState {
        match self.state() {
            Some(state) => state,
            None => panic!("phase violation: the match has not been initiated"),
        }
    }

    /// Mutable match context, panicking before the Initiated phase.
    pub fn expect_state_mut(&mut self) -> &mut MatchState {
        match self {
            Self::Uninitiated => panic!("phase violation: the match has not been initiated"),
            Self::Initiated(state) | Self::Started(state, _) => state,
        }
    }

    /// Match context and active player, panicking before Started.
    #[must_use]
    pub fn expect_started(&self) -> (&MatchState, &ObjectId) {
        match self {
            Self::Started(state, active) => (state, active),
            _ => panic!("phase violation: the match has not started"),
        }
    }

    /// Mutable match context and active player, panicking before Started.
    pub fn expect_started_mut(&mut self) -> (&mut MatchState, &ObjectId) {
        match self {
            Self::Started(state, active) => (state, active),
            _ => panic!("phase violation: the match has not started"),
        }
    }

    /// Adopt the server's game as authoritative and record who we are.
    pub fn initiate(&mut self, game: Game, self_id: ObjectId) {
        *self = Self::Initiated(MatchState { game, self_id });
    }

    /// Establish (or replace) the active player, entering Started.
    ///
    /// Panics before the Initiated phase.
    pub fn start(&mut self, active: ObjectId) {
        *self = match std::mem::take(self) {
            Self::Uninitiated => {
                panic!("phase violation: cannot start a match that was never initiated")
            }
            Self::Initiated(state) | Self::Started(state, _) => Self::Started(state, active),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Card, CardType, Player};

    fn initiated() -> Session {
        let mut game = Game::new("s1");
        game.players.push(Player::new("p1", "Ada"));

        let mut session = Session::default();
        session.initiate(game, ObjectId::from("p1"));
        session
    }

    #[test]
    fn test_phase_progression() {
        let mut session = Session::default();
        assert_eq!(session.phase(), Phase::Uninitiated);
        assert!(session.state().is_none());

        session.initiate(Game::new("s1"), ObjectId::from("p1"));
        assert_eq!(session.phase(), Phase::Initiated);
        assert!(session.active_player().is_none());

        session.start(ObjectId::from("p1"));
        assert_eq!(session.phase(), Phase::Started);
        assert_eq!(session.active_player(), Some(&ObjectId::from("p1")));
    }

    #[test]
    fn test_start_replaces_the_active_player() {
        let mut session = initiated();
        session.start(ObjectId::from("p1"));
        session.start(ObjectId::from("p2"));

        assert_eq!(session.active_player(), Some(&ObjectId::from("p2")));
    }

    #[test]
    #[should_panic(expected = "has not been initiated")]
    fn test_expect_state_before_initiation_panics() {
        Session::default().expect_state();
    }

    #[test]
    #[should_panic(expected = "has not started")]
    fn test_expect_started_before_start_panics() {
        initiated().expect_started();
    }

    #[test]
    #[should_panic(expected = "never initiated")]
    fn test_start_before_initiation_panics() {
        Session::default().start(ObjectId::from("p1"));
    }

    #[test]
    fn test_clear_prompts_sweeps_every_card() {
        let mut session = initiated();
        let state = session.expect_state_mut();
        state.game.prompt = Some("Pick.".to_owned());

        let mut card = Card::new("c1", "One", vec![CardType::Being]);
        card.prompt = Some("Pick.".to_owned());
        state.game.players[0].played.push(card);

        state.clear_prompts();

        assert!(!state.game.has_prompt());
        let card = &state.game.players[0].played[0];
        assert!(card.prompt.is_none());
        assert!(card.choices.is_empty());
    }
}
