//! Navigation shell: current route, mobile menu and page scroll.

use std::fmt;

use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(into = "String")]
pub enum Route {
    #[default]
    Home,
    Podcast,
    Episode(String),
    Resources,
    About,
    Subscribe,
}

impl Route {
    /// Top-level routes in menu order.
    pub const MENU: [Route; 5] = [
        Route::Home,
        Route::Podcast,
        Route::Resources,
        Route::About,
        Route::Subscribe,
    ];

    pub fn parse(path: &str) -> Option<Self> {
        let path = path.trim().trim_end_matches('/');
        match path {
            "" => Some(Self::Home),
            "/podcast" => Some(Self::Podcast),
            "/resources" => Some(Self::Resources),
            "/about" => Some(Self::About),
            "/subscribe" => Some(Self::Subscribe),
            _ => path
                .strip_prefix("/podcast/")
                .filter(|id| !id.is_empty() && !id.contains('/'))
                .map(|id| Self::Episode(id.to_string())),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Podcast => "/podcast".to_string(),
            Self::Episode(id) => format!("/podcast/{id}"),
            Self::Resources => "/resources".to_string(),
            Self::About => "/about".to_string(),
            Self::Subscribe => "/subscribe".to_string(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Podcast | Self::Episode(_) => "Podcast",
            Self::Resources => "Resources",
            Self::About => "About",
            Self::Subscribe => "Subscribe",
        }
    }

    /// The menu entry this route belongs to (episode pages sit under Podcast).
    pub fn section(&self) -> Route {
        match self {
            Self::Episode(_) => Self::Podcast,
            other => other.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl From<Route> for String {
    fn from(route: Route) -> Self {
        route.path()
    }
}

#[derive(Debug, Default)]
pub struct NavigationShell {
    route: Route,
    menu_open: bool,
    scroll: u16,
}

impl NavigationShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn toggle_mobile_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_mobile_menu(&mut self) {
        self.menu_open = false;
    }

    /// Follow a link: the menu closes, and a change of path resets scroll.
    pub fn navigate(&mut self, route: Route) {
        self.close_mobile_menu();
        if route != self.route {
            self.route = route;
            self.on_route_change();
        }
    }

    /// Side effect of landing on a new path.
    pub fn on_route_change(&mut self) {
        info!("route → {}", self.route);
        self.scroll = 0;
    }

    pub fn scroll_by(&mut self, delta: i32) {
        self.scroll = i32::from(self.scroll)
            .saturating_add(delta)
            .clamp(0, i32::from(u16::MAX)) as u16;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_paths() {
        assert_eq!(Route::parse("/"), Some(Route::Home));
        assert_eq!(Route::parse("/podcast/"), Some(Route::Podcast));
        assert_eq!(
            Route::parse("/podcast/ep-102"),
            Some(Route::Episode("ep-102".into()))
        );
        assert_eq!(Route::parse("/resources"), Some(Route::Resources));
        assert_eq!(Route::parse("/shop"), None);
        assert_eq!(Route::parse("/podcast/a/b"), None);
    }

    #[test]
    fn paths_round_trip() {
        for route in Route::MENU.into_iter().chain([Route::Episode("ep-1".into())]) {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }

    #[test]
    fn navigating_closes_menu_and_resets_scroll() {
        let mut nav = NavigationShell::new();
        nav.toggle_mobile_menu();
        nav.scroll_by(12);
        assert!(nav.is_menu_open());

        nav.navigate(Route::Podcast);
        assert!(!nav.is_menu_open());
        assert_eq!(nav.scroll(), 0);
        assert_eq!(nav.route(), &Route::Podcast);
    }

    #[test]
    fn same_route_keeps_scroll() {
        let mut nav = NavigationShell::new();
        nav.scroll_by(5);
        nav.toggle_mobile_menu();
        nav.navigate(Route::Home);
        assert!(!nav.is_menu_open());
        assert_eq!(nav.scroll(), 5);
    }

    #[test]
    fn scroll_never_goes_negative() {
        let mut nav = NavigationShell::new();
        nav.scroll_by(-3);
        assert_eq!(nav.scroll(), 0);
    }

    #[test]
    fn extreme_scroll_deltas_saturate() {
        let mut nav = NavigationShell::new();
        nav.scroll_by(10);
        nav.scroll_by(i32::MAX);
        assert_eq!(nav.scroll(), u16::MAX);
        nav.scroll_by(i32::MIN);
        assert_eq!(nav.scroll(), 0);
    }

    #[test]
    fn episode_pages_belong_to_podcast_section() {
        assert_eq!(Route::Episode("x".into()).section(), Route::Podcast);
        assert_eq!(Route::About.section(), Route::About);
    }
}
