//! Authoritative snapshot data model.
//!
//! These types mirror the wire shapes the server pushes: a `Game` holding
//! `Player`s, each holding ordered `Card` lists, plus the `Action`/`Choice`
//! types that describe pending decisions. They are pure data - the
//! reconciliation engine in `sync` owns the one persistent mirror and
//! merges fresh snapshots into it by id.

pub mod action;
pub mod card;
pub mod game;
pub mod id;
pub mod player;

pub use action::{Action, ActionContext, Choice, ChoiceMap};
pub use card::{Card, CardType, Effect};
pub use game::Game;
pub use id::{ObjectId, SessionId};
pub use player::Player;
