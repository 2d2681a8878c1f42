//! The per-frame reconciliation engine.
//!
//! One `update` call drains at most one event of each relevant kind
//! from the mailbox, folds snapshots into the authoritative game
//! mirror, creates boards for newly seated players, and re-syncs every
//! board against the mirror. Events behind an unrelated head stay
//! queued for a later frame.
//!
//! Connection-class events are consumed from anywhere in the queue;
//! game-class events only from the head, preserving their relative
//! order.

use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::data::{Choice, ChoiceMap, Game, ObjectId, Player};
use crate::event::{ClientEvent, EventQueue, ServerEvent, ServerEventKind};
use crate::sync::board::PlayerBoard;
use crate::sync::merge::merge_player;
use crate::sync::session::{Phase, Session};

/// What one `update` pass did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// Events consumed from the mailbox this frame.
    pub handled: usize,
    /// Boards created for newly seated players.
    pub boards_created: usize,
    /// Card holding the focus shortcut, if a single card owns every
    /// pending option.
    pub focus_card: Option<ObjectId>,
}

/// The client-side match driver.
///
/// Owns the session phase machine, the seating order, one board per
/// seated player, and the outbox of requests for the transport to send.
#[derive(Debug, Default)]
pub struct MatchEngine {
    session: Session,
    seating: Vec<ObjectId>,
    boards: FxHashMap<ObjectId, PlayerBoard>,
    outbox: Vec<ClientEvent>,
    perspective: Option<ObjectId>,
    focus_card: Option<ObjectId>,
}

impl MatchEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one frame: consume events, reconcile, lay out boards.
    pub fn update(&mut self, events: &mut EventQueue) -> FrameReport {
        let mut report = FrameReport::default();

        report.handled += self.check_connection_events(events);
        report.boards_created = self.create_boards();
        report.handled += self.check_game_events(events);
        self.sync_boards();

        report.focus_card = self.focus_card.clone();
        report
    }

    /// The session phase machine.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The current phase discriminant.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    /// Seated player ids, in join order (host first).
    #[must_use]
    pub fn seating(&self) -> &[ObjectId] {
        &self.seating
    }

    /// The board of a seated player, once created.
    #[must_use]
    pub fn board(&self, player_id: &ObjectId) -> Option<&PlayerBoard> {
        self.boards.get(player_id)
    }

    /// The player whose board the camera faces.
    #[must_use]
    pub fn perspective(&self) -> Option<&ObjectId> {
        self.perspective.as_ref()
    }

    /// The currently focused card, while a single-card choice is pending.
    #[must_use]
    pub fn focus_card(&self) -> Option<&ObjectId> {
        self.focus_card.as_ref()
    }

    /// Requests queued for the transport, oldest first.
    #[must_use]
    pub fn outbox(&self) -> &[ClientEvent] {
        &self.outbox
    }

    /// Take the queued requests, leaving the outbox empty.
    pub fn drain_outbox(&mut self) -> Vec<ClientEvent> {
        std::mem::take(&mut self.outbox)
    }

    /// Confirm the chosen action for the pending choice.
    ///
    /// Queues the confirmation and optimistically clears every prompt so
    /// the same choice cannot be answered twice. Panics before the
    /// Started phase.
    pub fn confirm_choice(&mut self, action_id: &ObjectId) {
        let (state, _) = self.session.expect_started_mut();

        debug!(action = %action_id, "confirming choice");
        self.outbox.push(ClientEvent::ChoiceConfirmed {
            session_id: state.game.session_id.clone(),
            action_id: action_id.clone(),
        });

        state.clear_prompts();
        self.focus_card = None;
    }

    /// Face a specific seated player's board.
    ///
    /// Panics before initiation, or for a player not in the game.
    pub fn set_perspective(&mut self, player_id: &ObjectId) {
        let state = self.session.expect_state();
        if state.game.player(player_id).is_none() {
            panic!("cannot face unknown player {player_id}");
        }
        self.perspective = Some(player_id.clone());
    }

    /// Face the next seat to the left (wrapping). Panics before Started.
    ///
    /// Left walks forward through the seating order; right walks
    /// backward.
    pub fn move_left(&mut self) {
        self.shift_perspective(1);
    }

    /// Face the next seat to the right (wrapping). Panics before Started.
    pub fn move_right(&mut self) {
        self.shift_perspective(-1);
    }

    fn shift_perspective(&mut self, step: isize) {
        self.session.expect_started();

        let current = self
            .perspective
            .as_ref()
            .and_then(|p| self.seating.iter().position(|s| s == p))
            .unwrap_or(0) as isize;
        let next = (current + step).rem_euclid(self.seating.len() as isize) as usize;

        self.perspective = Some(self.seating[next].clone());
    }

    /// Consume connection-class events wherever they sit in the queue,
    /// at most one per kind per frame.
    fn check_connection_events(&mut self, events: &mut EventQueue) -> usize {
        let mut handled = 0;

        if events.next(ServerEventKind::Connection, true).is_some() {
            info!("transport connected; requesting a hosted game");
            // The server assigns the real player id with host_connected.
            self.outbox.push(ClientEvent::HostConnect {
                player_id: ObjectId::new(""),
            });
            handled += 1;
        }

        if let Some(ServerEvent::HostConnected { game }) =
            events.next(ServerEventKind::HostConnected, true)
        {
            let self_id = match game.players.first() {
                Some(player) => player.id().clone(),
                None => panic!("host_connected carried a game with no players"),
            };
            self.adopt_game(game, self_id);
            handled += 1;
        }

        if let Some(ServerEvent::ClientConnected { game }) =
            events.next(ServerEventKind::ClientConnected, true)
        {
            // As a guest we are the most recently appended player.
            let self_id = match game.players.last() {
                Some(player) => player.id().clone(),
                None => panic!("client_connected carried a game with no players"),
            };
            self.adopt_game(game, self_id);
            handled += 1;
        }

        if let Some(ServerEvent::PlayerConnected { player }) =
            events.next(ServerEventKind::PlayerConnected, true)
        {
            info!(player = %player.name, "player joined the session");
            let id = player.id().clone();
            self.session.expect_state_mut().game.players.push(player);
            self.seating.push(id);
            handled += 1;
        }

        if let Some(ServerEvent::GameStarted { game }) =
            events.next(ServerEventKind::GameStarted, true)
        {
            info!(session = %game.session_id, "game started");
            for player in &game.players {
                self.update_player(player, None, None);
            }
            handled += 1;
        }

        handled
    }

    /// Consume game-class events from the head of the queue only, at
    /// most one per kind per frame.
    fn check_game_events(&mut self, events: &mut EventQueue) -> usize {
        let mut handled = 0;

        if let Some(ServerEvent::ActionExecuted { context }) =
            events.pop(ServerEventKind::ActionExecuted)
        {
            debug!(
                action = %context.action.name,
                kind = %context.action.kind,
                "action resolved server-side"
            );
            handled += 1;
        }

        if self.session.state().is_some() {
            if let Some(ServerEvent::ChoiceRequested { choice }) =
                events.pop(ServerEventKind::ChoiceRequested)
            {
                handled += 1;

                // One prompt on screen at a time; a request arriving
                // while one is pending is consumed and discarded.
                if self.session.expect_state().game.has_prompt() {
                    debug!(prompt = %choice.prompt, "discarding choice while one is pending");
                } else {
                    self.handle_choice(choice);
                }
            }
        }

        handled
    }

    /// Adopt the server's game as the authoritative mirror and seat its
    /// players in order.
    fn adopt_game(&mut self, game: Game, self_id: ObjectId) {
        info!(session = %game.session_id, self_player = %self_id, "adopting game");
        self.seating = game.players.iter().map(|p| p.id().clone()).collect();
        self.session.initiate(game, self_id);
    }

    /// Adopt a pending choice: prompt up, snapshot merged with the choice
    /// map attached, chooser becomes the active player.
    fn handle_choice(&mut self, choice: Choice) {
        let map = choice.choice_map();
        debug!(
            prompt = %choice.prompt,
            cards = map.len(),
            player = %choice.player.name,
            "choice requested"
        );

        self.session.expect_state_mut().game.prompt = Some(choice.prompt.clone());
        self.update_player(&choice.player, Some(&choice.prompt), Some(&map));

        let active = choice.player.id().clone();
        self.session.start(active.clone());

        // Choice attachment mutates cards without changing counts; the
        // board must diff regardless.
        if let Some(board) = self.boards.get_mut(&active) {
            board.mark_resync();
        }
        self.focus_card = map.focus_card().cloned();
    }

    /// Merge one player snapshot into the mirror and face that player.
    fn update_player(
        &mut self,
        snapshot: &Player,
        prompt: Option<&str>,
        choices: Option<&ChoiceMap>,
    ) {
        let state = self.session.expect_state_mut();
        let Some(mirror) = state.game.player_mut(snapshot.id()) else {
            panic!("snapshot for unknown player {}", snapshot.id());
        };

        merge_player(mirror, snapshot, prompt, choices);
        self.perspective = Some(snapshot.id().clone());
    }

    /// Create boards for seated players that lack one.
    ///
    /// Only runs between initiation and start; once the match is under
    /// way the seating is final.
    fn create_boards(&mut self) -> usize {
        if self.session.phase() != Phase::Initiated {
            return 0;
        }
        let Some(state) = self.session.state() else {
            return 0;
        };

        let mut created = 0;
        for id in &self.seating {
            if self.boards.contains_key(id) {
                continue;
            }
            let Some(player) = state.game.player(id) else {
                panic!("seated player {id} is missing from the game mirror");
            };

            debug!(player = %player.name, "creating board");
            self.boards.insert(id.clone(), PlayerBoard::new(player));
            created += 1;
        }

        if self.seating.len() == 1 {
            // Alone at the table: face our own board.
            self.perspective = Some(state.self_id.clone());
        } else if created > 0 && self.seating.len() == 2 {
            info!("both seats filled; requesting game start");
            self.outbox.push(ClientEvent::GameStart {
                session_id: state.game.session_id.clone(),
            });
        }

        created
    }

    /// Diff every board against its mirrored player.
    fn sync_boards(&mut self) {
        let Some(state) = self.session.state() else {
            return;
        };

        for player in &state.game.players {
            if let Some(board) = self.boards.get_mut(player.id()) {
                board.update(player);
            }
        }
    }
}
