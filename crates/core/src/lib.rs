//! Functional core of the emotes service.
//!
//! Everything in this crate is free of network I/O: the structured logger and
//! its error normalizer, the emote domain model, and the storage-facing types
//! shared by every store backend.

pub mod emote;
pub mod logging;
pub mod storage;
