use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use babeo_core::chat::{ChatGateway, ChatReply, PendingReply};
use babeo_core::content::ContentStore;
use babeo_core::navigation::Route;
use babeo_core::playback::PlaybackTick;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    components::{
        chat_panel::ChatPanel, episode_detail::EpisodeDetail, header::Header, home::HomePage,
        info::InfoPage, player_bar, player_bar::PlayerBar, podcast::PodcastPage,
        resources::ResourcesPage,
    },
    http::SharedViewHandle,
    theme::{C_MUTED, C_TERRACOTTA},
};

const KEY_POLL: Duration = Duration::from_millis(100);

/// Messages flowing into the App event loop.
#[derive(Debug)]
pub enum AppMessage {
    Event(Event),
    ChatReply(ChatReply),
    /// Forwarded from the HTTP API.
    Command(Action),
}

/// One component per routed page.
struct Pages {
    home: HomePage,
    podcast: PodcastPage,
    detail: EpisodeDetail,
    resources: ResourcesPage,
    info: InfoPage,
}

impl Pages {
    fn new() -> Self {
        Self {
            home: HomePage::new(),
            podcast: PodcastPage::new(),
            detail: EpisodeDetail::new(),
            resources: ResourcesPage::new(),
            info: InfoPage::new(),
        }
    }

    fn for_route(&mut self, route: &Route) -> &mut dyn Component {
        match route {
            Route::Home => &mut self.home,
            Route::Podcast => &mut self.podcast,
            Route::Episode(_) => &mut self.detail,
            Route::Resources => &mut self.resources,
            Route::About | Route::Subscribe => &mut self.info,
        }
    }

    fn all_mut(&mut self) -> [&mut dyn Component; 5] {
        [
            &mut self.home,
            &mut self.podcast,
            &mut self.detail,
            &mut self.resources,
            &mut self.info,
        ]
    }
}

pub struct App {
    state: AppState,
    gateway: ChatGateway,
    shared: SharedViewHandle,
    tx: mpsc::Sender<AppMessage>,

    header: Header,
    pages: Pages,
    player_bar: PlayerBar,
    chat_panel: ChatPanel,

    should_quit: bool,
}

impl App {
    pub fn new(
        store: Arc<ContentStore>,
        gateway: ChatGateway,
        shared: SharedViewHandle,
        tx: mpsc::Sender<AppMessage>,
        tick_tx: mpsc::Sender<PlaybackTick>,
    ) -> Self {
        let chat_configured = gateway.is_configured();
        Self {
            state: AppState::new(store, tick_tx, chat_configured),
            gateway,
            shared,
            tx,
            header: Header::new(),
            pages: Pages::new(),
            player_bar: PlayerBar::new(),
            chat_panel: ChatPanel::new(),
            should_quit: false,
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(
        mut self,
        mut rx: mpsc::Receiver<AppMessage>,
        mut tick_rx: mpsc::Receiver<PlaybackTick>,
    ) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        // ── Background task: keyboard events ──────────────────────────────────
        let stop_keys = Arc::new(AtomicBool::new(false));
        let key_reader = spawn_key_reader(self.tx.clone(), stop_keys.clone());

        self.publish().await;

        let mut ui_tick = tokio::time::interval(Duration::from_millis(150));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            tokio::select! {
                Some(msg) = rx.recv() => {
                    needs_redraw = self.handle_message(msg).await;
                }

                Some(tick) = tick_rx.recv() => {
                    if self.state.playback.on_tick(tick) {
                        self.publish().await;
                        needs_redraw = true;
                    }
                }

                _ = ui_tick.tick() => {
                    if self.state.chat.is_loading() && self.state.chat.is_open() {
                        self.state.spinner_frame = self.state.spinner_frame.wrapping_add(1);
                        needs_redraw = true;
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        stop_keys.store(true, Ordering::Relaxed);
        if let Err(e) = key_reader.await {
            warn!("key reader ended abnormally: {}", e);
        }
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        info!("babeo exiting");

        Ok(())
    }

    /// Returns true when the screen needs a redraw.
    async fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(Event::Key(key)) => {
                for action in self.handle_key(key) {
                    self.dispatch(action).await;
                }
                true
            }
            AppMessage::Event(Event::Resize(_, _)) => true,
            AppMessage::Event(_) => false,
            AppMessage::ChatReply(reply) => {
                let landed = self.state.chat.complete(reply);
                if landed {
                    self.publish().await;
                }
                landed
            }
            AppMessage::Command(action) => {
                self.dispatch(action).await;
                true
            }
        }
    }

    // ── Key routing ───────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.kind != KeyEventKind::Press {
            return vec![];
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return vec![Action::Quit];
        }

        // Overlays own the keyboard while open.
        if self.state.chat.is_open() {
            return self.chat_panel.handle_key(key, &self.state);
        }
        if self.state.nav.is_menu_open() {
            return self.header.handle_key(key, &self.state);
        }

        match key.code {
            KeyCode::Char('q') => vec![Action::Quit],
            KeyCode::Char(c @ '1'..='5') => {
                let idx = c as usize - '1' as usize;
                vec![Action::Navigate(Route::MENU[idx].clone())]
            }
            KeyCode::Char('m') => vec![Action::ToggleMenu],
            KeyCode::Char('c') => vec![Action::OpenChat],
            KeyCode::Char(' ') => vec![Action::TogglePlayPause],
            KeyCode::Char('x') => vec![Action::ClosePlayer],
            _ => self
                .pages
                .for_route(self.state.nav.route())
                .handle_key(key, &self.state),
        }
    }

    // ── Action dispatch ───────────────────────────────────────────────────────

    async fn dispatch(&mut self, action: Action) {
        self.apply_action(action.clone());

        // Components observe the action against the updated state.
        let s = &self.state;
        self.header.on_action(&action, s);
        for page in self.pages.all_mut() {
            page.on_action(&action, s);
        }
        self.chat_panel.on_action(&action, s);

        self.publish().await;
    }

    fn apply_action(&mut self, action: Action) {
        match &action {
            Action::Scroll(_) | Action::ChatInputChanged(_) => {}
            _ => debug!("apply_action: {:?}", action),
        }
        match action {
            // ── Navigation ────────────────────────────────────────────────────
            Action::Navigate(route) => self.state.nav.navigate(route),
            Action::ToggleMenu => self.state.nav.toggle_mobile_menu(),
            Action::CloseMenu => self.state.nav.close_mobile_menu(),
            Action::Scroll(delta) => self.state.nav.scroll_by(delta),

            // ── Catalog ───────────────────────────────────────────────────────
            Action::SetFilter(filter) => {
                if let Err(e) = self.state.catalog.set(filter) {
                    warn!("filter rejected: {}", e);
                }
            }
            Action::NextFilter => {
                self.state.catalog.next_filter();
            }
            Action::PrevFilter => {
                self.state.catalog.prev_filter();
            }

            // ── Playback ──────────────────────────────────────────────────────
            Action::SelectEpisode(id) => match self.state.store.episode(&id) {
                Some(episode) => self.state.playback.select_episode(episode),
                None => warn!("select: unknown episode {}", id),
            },
            Action::TogglePlayPause => self.state.playback.toggle_play_pause(),
            Action::ClosePlayer => self.state.playback.close(),

            // ── Chat ──────────────────────────────────────────────────────────
            Action::OpenChat => self.state.chat.open(),
            Action::CloseChat => self.state.chat.close(),
            Action::ChatInputChanged(text) => self.state.chat.set_input(text),
            Action::SubmitChat => {
                if let Some(pending) = self.state.chat.submit_input() {
                    self.spawn_reply(pending);
                }
            }

            Action::Quit => self.should_quit = true,
        }
    }

    fn spawn_reply(&self, pending: PendingReply) {
        let gateway = self.gateway.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let reply = pending.resolve(&gateway).await;
            if tx.send(AppMessage::ChatReply(reply)).await.is_err() {
                debug!("app loop gone; dropping chat reply");
            }
        });
    }

    /// Republish player and chat state for the HTTP API.
    async fn publish(&self) {
        let mut view = self.shared.write().await;
        view.player = self.state.playback.snapshot();
        view.transcript = self.state.chat.transcript().to_vec();
        view.loading = self.state.chat.is_loading();
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let player_h = if self.state.playback.current().is_some() {
            player_bar::HEIGHT
        } else {
            0
        };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(player_h),
                Constraint::Length(1),
            ])
            .split(area);

        let overlay_open = self.state.chat.is_open() || self.state.nav.is_menu_open();
        let s = &self.state;

        self.header.draw(frame, chunks[0], false, s);
        self.pages
            .for_route(s.nav.route())
            .draw(frame, chunks[1], !overlay_open, s);
        if player_h > 0 {
            self.player_bar.draw(frame, chunks[2], false, s);
        }
        draw_status(frame, chunks[3], s);

        if s.nav.is_menu_open() {
            self.header.draw_menu(frame, chunks[1], s);
        }
        if s.chat.is_open() {
            self.chat_panel.draw(frame, chunks[1], true, s);
        }
    }
}

/// Forward terminal events until `stop` is set or the loop hangs up. Polls
/// with a short timeout so the blocking thread notices `stop` without
/// waiting for another key.
fn spawn_key_reader(
    tx: mpsc::Sender<AppMessage>,
    stop: Arc<AtomicBool>,
) -> tokio::task::JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        while !stop.load(Ordering::Relaxed) {
            match event::poll(KEY_POLL) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => {
                    warn!("key reader: poll failed: {}", e);
                    break;
                }
            }
            match event::read() {
                Ok(ev) => {
                    if tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("key reader: read failed: {}", e);
                    break;
                }
            }
        }
        debug!("key reader stopped");
    })
}

fn draw_status(frame: &mut Frame, area: Rect, state: &AppState) {
    let hints = if state.chat.is_open() {
        "enter send · esc close chat"
    } else if state.nav.is_menu_open() {
        "j/k move · enter open · esc close"
    } else {
        "1-5 pages · m menu · j/k move · enter play · o open · q quit"
    };
    let mut spans = vec![Span::styled(format!(" {}", hints), Style::default().fg(C_MUTED))];
    if !state.chat.is_open() {
        let used = hints.len() + 1;
        let fab = " 💬 c ask Babeo ";
        let pad = (area.width as usize).saturating_sub(used + fab.len());
        spans.push(Span::raw(" ".repeat(pad)));
        spans.push(Span::styled(fab, Style::default().fg(C_TERRACOTTA)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use babeo_core::catalog::Filter;
    use babeo_core::chat::gateway::RESTING_REPLY;
    use babeo_core::content::CategoryId;
    use babeo_core::playback::PlaybackStatus;

    fn app() -> (App, mpsc::Receiver<AppMessage>) {
        let (tx, rx) = mpsc::channel(16);
        let (tick_tx, _tick_rx) = mpsc::channel(16);
        let app = App::new(
            Arc::new(ContentStore::builtin().unwrap()),
            ChatGateway::default(),
            SharedViewHandle::default(),
            tx,
            tick_tx,
        );
        (app, rx)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn press(app: &mut App, code: KeyCode) {
        app.handle_message(AppMessage::Event(Event::Key(key(code))))
            .await;
    }

    #[tokio::test]
    async fn key_reader_exits_once_stopped() {
        let (tx, _rx) = mpsc::channel(1);
        let stop = Arc::new(AtomicBool::new(true));
        let reader = spawn_key_reader(tx, stop);
        tokio::time::timeout(Duration::from_secs(1), reader)
            .await
            .expect("key reader kept the runtime busy")
            .unwrap();
    }

    #[tokio::test]
    async fn digit_keys_navigate_and_reset_scroll() {
        let (mut app, _rx) = app();
        press(&mut app, KeyCode::Char('4')).await;
        assert_eq!(app.state.nav.route(), &Route::About);
        press(&mut app, KeyCode::Char('j')).await;
        press(&mut app, KeyCode::Char('j')).await;
        assert_eq!(app.state.nav.scroll(), 2);
        press(&mut app, KeyCode::Char('3')).await;
        assert_eq!(app.state.nav.route(), &Route::Resources);
        assert_eq!(app.state.nav.scroll(), 0);
    }

    #[tokio::test]
    async fn menu_captures_keys_and_closes_on_navigate() {
        let (mut app, _rx) = app();
        press(&mut app, KeyCode::Char('m')).await;
        assert!(app.state.nav.is_menu_open());
        // Cursor starts on Home; two down lands on Resources.
        press(&mut app, KeyCode::Down).await;
        press(&mut app, KeyCode::Down).await;
        press(&mut app, KeyCode::Enter).await;
        assert!(!app.state.nav.is_menu_open());
        assert_eq!(app.state.nav.route(), &Route::Resources);
    }

    #[tokio::test]
    async fn podcast_page_cycles_filters_and_plays() {
        let (mut app, _rx) = app();
        press(&mut app, KeyCode::Char('2')).await;
        press(&mut app, KeyCode::Right).await;
        assert_eq!(app.state.catalog.active(), Filter::Category(CategoryId::Pregnancy));
        press(&mut app, KeyCode::Enter).await;
        assert_eq!(
            app.state.playback.current().map(|e| e.id.as_str()),
            Some("ep-104")
        );
        assert!(app.state.playback.is_playing());

        press(&mut app, KeyCode::Char(' ')).await;
        assert_eq!(app.state.playback.status(), PlaybackStatus::Paused);
        assert_eq!(app.shared.read().await.player.status, PlaybackStatus::Paused);

        press(&mut app, KeyCode::Char('x')).await;
        assert_eq!(app.state.playback.status(), PlaybackStatus::Idle);
    }

    #[tokio::test]
    async fn home_topic_opens_filtered_podcast_page() {
        let (mut app, _rx) = app();
        // Three latest episodes, then topics in store order: Pregnancy, Newborn, Sleep.
        for _ in 0..5 {
            press(&mut app, KeyCode::Char('j')).await;
        }
        press(&mut app, KeyCode::Enter).await;
        assert_eq!(app.state.nav.route(), &Route::Podcast);
        assert_eq!(app.state.catalog.active(), Filter::Category(CategoryId::Sleep));
    }

    #[tokio::test]
    async fn chat_round_trip_through_the_loop() {
        let (mut app, mut rx) = app();
        press(&mut app, KeyCode::Char('c')).await;
        assert!(app.state.chat.is_open());

        for ch in "naps?".chars() {
            press(&mut app, KeyCode::Char(ch)).await;
        }
        assert_eq!(app.state.chat.input(), "naps?");
        press(&mut app, KeyCode::Enter).await;
        assert!(app.state.chat.is_loading());
        assert_eq!(app.state.chat.transcript().len(), 2);
        assert!(app.shared.read().await.loading);

        let msg = rx.recv().await.unwrap();
        assert!(app.handle_message(msg).await);
        assert!(!app.state.chat.is_loading());
        let transcript = app.state.chat.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[2].text, RESTING_REPLY);

        press(&mut app, KeyCode::Esc).await;
        assert!(!app.state.chat.is_open());
    }

    #[tokio::test]
    async fn http_navigate_command_resets_scroll() {
        let (mut app, _rx) = app();
        app.state.nav.scroll_by(4);
        app.handle_message(AppMessage::Command(Action::Navigate(
            Route::parse("/podcast/ep-102").unwrap(),
        )))
        .await;
        assert_eq!(app.state.nav.route(), &Route::Episode("ep-102".into()));
        assert_eq!(app.state.nav.scroll(), 0);
    }

    #[tokio::test]
    async fn http_commands_drive_the_player() {
        let (mut app, _rx) = app();
        app.handle_message(AppMessage::Command(Action::SelectEpisode("ep-103".into())))
            .await;
        assert_eq!(app.state.playback.status(), PlaybackStatus::Playing);
        let published = app.shared.read().await.player.clone();
        assert_eq!(published.episode_id.as_deref(), Some("ep-103"));
    }
}
