//! The set of typed messages exchanged with the server.
//!
//! Two disjoint families: `ServerEvent` (inbound snapshots and
//! notifications) and `ClientEvent` (outbound requests). An event's
//! identity is its wire name; payload shape is fixed per name. Copying a
//! payload between events of different kinds is a protocol error, never
//! silently tolerated.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::data::{ActionContext, Choice, Game, ObjectId, Player, SessionId};

/// Protocol-level event errors.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EventError {
    /// A payload copy was attempted across two different event kinds.
    #[error("cannot copy a `{found}` event into a `{expected}` template")]
    KindMismatch {
        expected: ServerEventKind,
        found: ServerEventKind,
    },
}

/// Inbound event: something the server told us.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Transport-level connection established. No payload.
    Connection,
    /// We are the host; the server created a fresh game for us.
    HostConnected { game: Game },
    /// We joined an existing game as a guest.
    ClientConnected { game: Game },
    /// Another player joined the game we are in.
    PlayerConnected { player: Player },
    /// The game began; full player snapshots attached.
    GameStarted { game: Game },
    /// Informational notice that an action resolved server-side.
    ActionExecuted { context: ActionContext },
    /// The server is waiting on a player to choose an action.
    ChoiceRequested { choice: Choice },
}

impl ServerEvent {
    /// The event's kind discriminant.
    #[must_use]
    pub const fn kind(&self) -> ServerEventKind {
        match self {
            Self::Connection => ServerEventKind::Connection,
            Self::HostConnected { .. } => ServerEventKind::HostConnected,
            Self::ClientConnected { .. } => ServerEventKind::ClientConnected,
            Self::PlayerConnected { .. } => ServerEventKind::PlayerConnected,
            Self::GameStarted { .. } => ServerEventKind::GameStarted,
            Self::ActionExecuted { .. } => ServerEventKind::ActionExecuted,
            Self::ChoiceRequested { .. } => ServerEventKind::ChoiceRequested,
        }
    }

    /// The event's wire name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Copy another event's payload into this one.
    ///
    /// Fails if the kinds differ - the guard against accidental
    /// cross-type copies.
    pub fn copy_from(&mut self, other: &ServerEvent) -> Result<(), EventError> {
        if self.kind() != other.kind() {
            return Err(EventError::KindMismatch {
                expected: self.kind(),
                found: other.kind(),
            });
        }

        *self = other.clone();
        Ok(())
    }
}

/// Kind discriminant for `ServerEvent`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ServerEventKind {
    Connection,
    HostConnected,
    ClientConnected,
    PlayerConnected,
    GameStarted,
    ActionExecuted,
    ChoiceRequested,
}

impl ServerEventKind {
    /// The wire name for this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Connection => "connection",
            Self::HostConnected => "host_connected",
            Self::ClientConnected => "client_connected",
            Self::PlayerConnected => "player_connected",
            Self::GameStarted => "game_started",
            Self::ActionExecuted => "action_executed",
            Self::ChoiceRequested => "choice_requested",
        }
    }
}

impl std::fmt::Display for ServerEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Outbound event: a request we send to the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Ask the server to create a game with us as host.
    HostConnect { player_id: ObjectId },
    /// Join an existing session as a guest.
    ClientConnect {
        session_id: SessionId,
        player_id: ObjectId,
    },
    /// Ask the server to start the game.
    GameStart { session_id: SessionId },
    /// Confirm the chosen action for the pending choice.
    ChoiceConfirmed {
        session_id: SessionId,
        action_id: ObjectId,
    },
}

impl ClientEvent {
    /// The event's kind discriminant.
    #[must_use]
    pub const fn kind(&self) -> ClientEventKind {
        match self {
            Self::HostConnect { .. } => ClientEventKind::HostConnect,
            Self::ClientConnect { .. } => ClientEventKind::ClientConnect,
            Self::GameStart { .. } => ClientEventKind::GameStart,
            Self::ChoiceConfirmed { .. } => ClientEventKind::ChoiceConfirmed,
        }
    }

    /// The event's wire name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Positional argument projection for wire transmission.
    ///
    /// The transport sends `(name, ...args)`; this returns the args as a
    /// JSON array in protocol order.
    #[must_use]
    pub fn args(&self) -> Value {
        match self {
            Self::HostConnect { player_id } => json!([player_id]),
            Self::ClientConnect {
                session_id,
                player_id,
            } => json!([session_id, player_id]),
            Self::GameStart { session_id } => json!([session_id]),
            Self::ChoiceConfirmed {
                session_id,
                action_id,
            } => json!([session_id, action_id]),
        }
    }
}

/// Kind discriminant for `ClientEvent`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClientEventKind {
    HostConnect,
    ClientConnect,
    GameStart,
    ChoiceConfirmed,
}

impl ClientEventKind {
    /// The wire name for this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::HostConnect => "host_connect",
            Self::ClientConnect => "client_connect",
            Self::GameStart => "game_start",
            Self::ChoiceConfirmed => "choice_confirmed",
        }
    }
}

impl std::fmt::Display for ClientEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
