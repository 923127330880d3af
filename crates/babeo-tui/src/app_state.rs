//! AppState: the controllers, passed read-only to components during
//! render/event handling. The App event-loop is the only thing that writes
//! to it.

use std::sync::Arc;

use babeo_core::catalog::CatalogView;
use babeo_core::chat::ChatSession;
use babeo_core::content::{Category, ContentStore, Episode};
use babeo_core::navigation::NavigationShell;
use babeo_core::playback::{PlaybackShell, PlaybackTick};
use tokio::sync::mpsc;

pub struct AppState {
    pub store: Arc<ContentStore>,
    pub catalog: CatalogView,
    pub playback: PlaybackShell,
    pub chat: ChatSession,
    pub nav: NavigationShell,
    /// False when the chat assistant has no API key.
    pub chat_configured: bool,
    /// Advances on every ui tick; drives the chat "typing" animation.
    pub spinner_frame: usize,
}

impl AppState {
    pub fn new(
        store: Arc<ContentStore>,
        tick_tx: mpsc::Sender<PlaybackTick>,
        chat_configured: bool,
    ) -> Self {
        Self {
            catalog: CatalogView::new(store.clone()),
            store,
            playback: PlaybackShell::new(tick_tx),
            chat: ChatSession::new(),
            nav: NavigationShell::new(),
            chat_configured,
            spinner_frame: 0,
        }
    }

    pub fn category_of(&self, episode: &Episode) -> Option<&Category> {
        self.store.category(episode.category)
    }

    /// Whether `episode` is the one loaded in the player and playing.
    pub fn is_playing_episode(&self, episode: &Episode) -> bool {
        self.playback.is_playing()
            && self
                .playback
                .current()
                .is_some_and(|current| current.id == episode.id)
    }
}
