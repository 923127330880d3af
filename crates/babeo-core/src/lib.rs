//! Core of the BabeoLife client: site content, the catalog filter, the
//! simulated player, the chat assistant and navigation state.
//!
//! Every controller here owns its state outright; front-ends hold them and
//! pass them by reference to whatever renders them.

pub mod catalog;
pub mod chart;
pub mod chat;
pub mod config;
pub mod content;
pub mod navigation;
pub mod platform;
pub mod playback;
