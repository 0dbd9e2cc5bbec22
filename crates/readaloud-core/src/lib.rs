#![cfg_attr(not(test), no_std)]

//! Speech/text synchronization and scrubbing engine.
//!
//! The crate owns the word-position model shared by spoken playback, drag
//! scrubbing and on-screen highlighting. Speech synthesis, text rendering,
//! gestures and haptics are reached only through the traits in [`speech`],
//! [`canvas`], [`input`] and [`haptics`].

extern crate alloc;

pub mod app;
pub mod canvas;
pub mod document;
mod error;
pub mod haptics;
pub mod highlight;
pub mod input;
pub mod playback;
pub mod scrub;
pub mod speech;

#[cfg(test)]
mod testing;

pub use error::Error;
