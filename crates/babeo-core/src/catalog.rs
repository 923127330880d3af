//! Catalog view-model: the active category filter and the episodes it shows.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;

use crate::content::{CategoryId, ContentStore, Episode};

/// Either every episode or a single category. There is no free-text filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(into = "String")]
pub enum Filter {
    #[default]
    All,
    Category(CategoryId),
}

impl Filter {
    pub fn matches(self, episode: &Episode) -> bool {
        match self {
            Self::All => true,
            Self::Category(id) => episode.category == id,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Category(id) => write!(f, "{id}"),
        }
    }
}

impl From<Filter> for String {
    fn from(filter: Filter) -> Self {
        filter.to_string()
    }
}

impl FromStr for Filter {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<CategoryId>()
            .map(Self::Category)
            .map_err(|_| CatalogError::InvalidFilter(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid filter {0:?}: expected \"all\" or a category id")]
    InvalidFilter(String),
}

/// One entry of the filter chip row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterChip {
    pub filter: Filter,
    pub label: String,
}

pub struct CatalogView {
    store: Arc<ContentStore>,
    active: Filter,
}

impl CatalogView {
    pub fn new(store: Arc<ContentStore>) -> Self {
        Self {
            store,
            active: Filter::All,
        }
    }

    pub fn active(&self) -> Filter {
        self.active
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    /// Replace the active filter. The filter must be `All` or a category the
    /// store actually lists.
    pub fn set(&mut self, filter: Filter) -> Result<(), CatalogError> {
        if let Filter::Category(id) = filter {
            if !self.store.has_category(id) {
                return Err(CatalogError::InvalidFilter(id.to_string()));
            }
        }
        self.active = filter;
        Ok(())
    }

    /// Parse and apply a filter id (`"all"` or a category id). On error the
    /// active filter is left untouched.
    pub fn set_filter(&mut self, id: &str) -> Result<(), CatalogError> {
        let filter = id.parse::<Filter>()?;
        self.set(filter)
    }

    /// Episodes matching the active filter, in store order. Recomputed on
    /// every call.
    pub fn visible_episodes(&self) -> Vec<&Episode> {
        self.store
            .episodes()
            .iter()
            .filter(|e| self.active.matches(e))
            .collect()
    }

    /// `All` followed by every store category, in store order.
    pub fn filters(&self) -> Vec<FilterChip> {
        let mut chips = Vec::with_capacity(self.store.categories().len() + 1);
        chips.push(FilterChip {
            filter: Filter::All,
            label: "All Topics".to_string(),
        });
        chips.extend(self.store.categories().iter().map(|c| FilterChip {
            filter: Filter::Category(c.id),
            label: c.label.clone(),
        }));
        chips
    }

    pub fn next_filter(&mut self) -> Filter {
        self.step(1)
    }

    pub fn prev_filter(&mut self) -> Filter {
        self.step(-1)
    }

    fn step(&mut self, delta: isize) -> Filter {
        let ring: Vec<Filter> = self.filters().into_iter().map(|c| c.filter).collect();
        let pos = ring.iter().position(|f| *f == self.active).unwrap_or(0) as isize;
        let len = ring.len() as isize;
        self.active = ring[(pos + delta).rem_euclid(len) as usize];
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> CatalogView {
        CatalogView::new(Arc::new(ContentStore::builtin().unwrap()))
    }

    #[test]
    fn all_shows_every_episode_in_order() {
        let view = view();
        let ids: Vec<&str> = view.visible_episodes().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["ep-101", "ep-102", "ep-103", "ep-104"]);
    }

    #[test]
    fn each_category_filter_yields_exact_ordered_subset() {
        let mut view = view();
        for id in CategoryId::ALL {
            view.set(Filter::Category(id)).unwrap();
            let expected: Vec<&str> = view
                .store()
                .episodes()
                .iter()
                .filter(|e| e.category == id)
                .map(|e| e.id.as_str())
                .collect();
            let got: Vec<&str> = view.visible_episodes().iter().map(|e| e.id.as_str()).collect();
            assert_eq!(got, expected, "filter {id}");
        }
    }

    #[test]
    fn category_without_episodes_is_empty() {
        let mut view = view();
        view.set_filter("Feeding").unwrap();
        assert!(view.visible_episodes().is_empty());
    }

    #[test]
    fn set_filter_accepts_all_sentinel() {
        let mut view = view();
        view.set_filter("sleep").unwrap();
        assert_eq!(view.active(), Filter::Category(CategoryId::Sleep));
        view.set_filter("ALL").unwrap();
        assert_eq!(view.active(), Filter::All);
    }

    #[test]
    fn invalid_filter_is_rejected_and_keeps_previous() {
        let mut view = view();
        view.set_filter("Newborn").unwrap();
        let err = view.set_filter("Toddlers").unwrap_err();
        assert_eq!(err, CatalogError::InvalidFilter("Toddlers".into()));
        assert_eq!(view.active(), Filter::Category(CategoryId::Newborn));
    }

    #[test]
    fn filter_cycle_wraps_both_ways() {
        let mut view = view();
        assert_eq!(view.prev_filter(), Filter::Category(CategoryId::Mindset));
        assert_eq!(view.next_filter(), Filter::All);
        assert_eq!(view.next_filter(), Filter::Category(CategoryId::Pregnancy));
    }

    #[test]
    fn chips_start_with_all_topics() {
        let chips = view().filters();
        assert_eq!(chips.len(), 7);
        assert_eq!(chips[0].label, "All Topics");
        assert_eq!(chips[3].label, "Sleep & Routines");
    }

    #[test]
    fn filter_display_round_trips_through_parse() {
        assert_eq!(Filter::All.to_string(), "all");
        assert_eq!(
            "Postpartum".parse::<Filter>().unwrap().to_string(),
            "Postpartum"
        );
    }
}
