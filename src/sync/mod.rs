//! Client-side match synchronization.
//!
//! The server is authoritative; this module keeps a local mirror of the
//! game and a visual entity tree per player consistent with the event
//! stream. `MatchEngine` is the entry point: feed it an `EventQueue`
//! once per frame and drain its outbox into the transport.

pub mod board;
pub mod engine;
pub mod merge;
pub mod session;

pub use board::PlayerBoard;
pub use engine::{FrameReport, MatchEngine};
pub use merge::{merge_card_list, merge_player};
pub use session::{MatchState, Phase, Session};
