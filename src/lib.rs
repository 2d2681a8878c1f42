//! # cardtable
//!
//! The client-side synchronization core of a networked trading card
//! game. The server owns the rules; this crate owns everything a table
//! client needs between the socket and the renderer.
//!
//! ## Architecture
//!
//! Inbound messages become typed [`event::ServerEvent`]s in an
//! [`event::EventQueue`] mailbox. Once per frame,
//! [`sync::MatchEngine::update`] drains what it can: connection events
//! from anywhere in the queue, game events from the head only. Snapshots
//! merge by id into the authoritative mirror ([`data::Game`]) so local
//! state survives, and each player's [`sync::PlayerBoard`] diffs its
//! [`tree::CardTree`] against the mirror, regrouping played cards into
//! offset piles and laying everything out in table coordinates.
//!
//! ## Modules
//!
//! - `data`: Wire-shaped domain records (cards, players, actions, ids)
//! - `event`: Typed server/client events and the mailbox queue
//! - `tree`: The visual entity tree and its layout geometry
//! - `sync`: Session phases, snapshot merging, and the match engine

pub mod data;
pub mod event;
pub mod sync;
pub mod tree;

pub use crate::data::{
    Action, ActionContext, Card, CardType, Choice, ChoiceMap, Effect, Game, ObjectId, Player,
    SessionId,
};

pub use crate::event::{
    ClientEvent, ClientEventKind, EventError, EventQueue, ServerEvent, ServerEventKind,
};

pub use crate::tree::{arrange, extent, AreaLayout, CardTree, NodeId, Point};

pub use crate::sync::{FrameReport, MatchEngine, Phase, PlayerBoard, Session};
