//! Typed message catalog and the ordered event mailbox.
//!
//! The transport collaborator (not part of this crate) pushes decoded
//! `ServerEvent`s into an `EventQueue`; the reconciliation engine drains
//! it once per frame. Outbound `ClientEvent`s carry an `args()` wire
//! projection for the transport to serialize.

pub mod catalog;
pub mod queue;

pub use catalog::{ClientEvent, ClientEventKind, EventError, ServerEvent, ServerEventKind};
pub use queue::EventQueue;
