//! Action enum: every user-initiated intent.

use babeo_core::catalog::Filter;
use babeo_core::navigation::Route;

/// All actions that can flow through the system.
/// Components (and the HTTP API) produce Actions; the App applies them.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ── Navigation ───────────────────────────────────────────────────────────
    Navigate(Route),
    ToggleMenu,
    CloseMenu,
    Scroll(i32),

    // ── Catalog ──────────────────────────────────────────────────────────────
    SetFilter(Filter),
    NextFilter,
    PrevFilter,

    // ── Playback ─────────────────────────────────────────────────────────────
    SelectEpisode(String), // episode id
    TogglePlayPause,
    ClosePlayer,

    // ── Chat ─────────────────────────────────────────────────────────────────
    OpenChat,
    CloseChat,
    ChatInputChanged(String),
    SubmitChat,

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
}
