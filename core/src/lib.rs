//! Core definitions for Chirp: tweets, their entities, and the messages rendered from them.
#![allow(clippy::module_name_repetitions)]
#![deny(missing_docs)]

#[cfg(feature = "egg-mode")]
pub mod egg;
pub mod error;
pub mod message;
pub mod models;
