//! Site content: episodes, articles, testimonials and the category table.
//!
//! Content is loaded once at startup through a [`ContentProvider`] and frozen
//! into a [`ContentStore`]. The store validates the category invariant at load
//! time, so everything downstream can assume every item's category exists.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ContentConfig;

/// Fixture content compiled into the binary.
pub const BUILTIN_CONTENT: &str = include_str!("../data/content.toml");

/// The closed set of topics used to tag episodes and articles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryId {
    Pregnancy,
    Newborn,
    Sleep,
    Feeding,
    Postpartum,
    Mindset,
}

impl CategoryId {
    pub const ALL: [CategoryId; 6] = [
        CategoryId::Pregnancy,
        CategoryId::Newborn,
        CategoryId::Sleep,
        CategoryId::Feeding,
        CategoryId::Postpartum,
        CategoryId::Mindset,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pregnancy => "Pregnancy",
            Self::Newborn => "Newborn",
            Self::Sleep => "Sleep",
            Self::Feeding => "Feeding",
            Self::Postpartum => "Postpartum",
            Self::Mindset => "Mindset",
        }
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryId {
    type Err = UnknownCategory;

    /// Case-insensitive match against the category identifiers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category {0:?}")]
pub struct UnknownCategory(pub String);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub label: String,
    /// Palette key used by front-ends to colour the category chip.
    pub style: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub duration: String,
    pub category: CategoryId,
    pub cover_image: String,
    pub publish_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    pub show_notes: String,
    #[serde(default)]
    pub takeaways: Vec<String>,
}

impl Episode {
    /// Parse the publish label (`Oct 12, 2023`). `None` when the label is
    /// free-form text.
    pub fn published_on(&self) -> Option<chrono::NaiveDate> {
        chrono::NaiveDate::parse_from_str(self.publish_date.trim(), "%b %d, %Y").ok()
    }

    /// Display form of the publish date (`Nov 2, 2023`); free-form labels
    /// pass through untouched.
    pub fn date_label(&self) -> String {
        match self.published_on() {
            Some(date) => date.format("%b %-d, %Y").to_string(),
            None => self.publish_date.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub category: CategoryId,
    pub read_time: String,
    pub image_url: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: String,
    pub name: String,
    pub role: String,
    pub quote: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to read content file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse content: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("category {0} is listed more than once")]
    DuplicateCategory(CategoryId),
    #[error("episode id {0:?} is used more than once")]
    DuplicateEpisode(String),
    #[error("{kind} {id:?} uses category {category}, which is not in the category list")]
    UnknownCategory {
        kind: &'static str,
        id: String,
        category: CategoryId,
    },
    #[error("episode {0:?} has an empty title")]
    EmptyTitle(String),
}

/// Source of site content. The builtin fixtures and on-disk TOML files are
/// the two shipped implementations; a networked backend would be a third.
pub trait ContentProvider {
    fn categories(&self) -> Vec<Category>;
    fn episodes(&self) -> Vec<Episode>;

    fn articles(&self) -> Vec<Article> {
        Vec::new()
    }

    fn testimonials(&self) -> Vec<Testimonial> {
        Vec::new()
    }
}

// ── TOML provider ─────────────────────────────────────────────────────────────

/// Matches the `[[category]]` / `[[episode]]` / ... tables of a content file.
#[derive(Debug, Deserialize)]
struct ContentFile {
    #[serde(default)]
    category: Vec<Category>,
    #[serde(default)]
    episode: Vec<Episode>,
    #[serde(default)]
    article: Vec<Article>,
    #[serde(default)]
    testimonial: Vec<Testimonial>,
}

pub struct TomlContent {
    file: ContentFile,
}

impl TomlContent {
    pub fn parse(content: &str) -> Result<Self, ContentError> {
        let file: ContentFile = toml::from_str(content)?;
        Ok(Self { file })
    }

    pub fn from_path(path: &Path) -> Result<Self, ContentError> {
        let content = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn builtin() -> Result<Self, ContentError> {
        Self::parse(BUILTIN_CONTENT)
    }
}

impl ContentProvider for TomlContent {
    fn categories(&self) -> Vec<Category> {
        self.file.category.clone()
    }

    fn episodes(&self) -> Vec<Episode> {
        self.file.episode.clone()
    }

    fn articles(&self) -> Vec<Article> {
        self.file.article.clone()
    }

    fn testimonials(&self) -> Vec<Testimonial> {
        self.file.testimonial.clone()
    }
}

// ── Store ─────────────────────────────────────────────────────────────────────

/// Validated, read-only content. Shared as `Arc<ContentStore>`.
#[derive(Debug, Clone)]
pub struct ContentStore {
    categories: Vec<Category>,
    episodes: Vec<Episode>,
    articles: Vec<Article>,
    testimonials: Vec<Testimonial>,
}

impl ContentStore {
    pub fn from_provider(provider: &dyn ContentProvider) -> Result<Self, ContentError> {
        let store = Self {
            categories: provider.categories(),
            episodes: provider.episodes(),
            articles: provider.articles(),
            testimonials: provider.testimonials(),
        };
        store.validate()?;
        Ok(store)
    }

    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_provider(&TomlContent::builtin()?)
    }

    /// Use the configured content file when it exists, the builtin fixtures
    /// otherwise.
    pub fn load(config: &ContentConfig) -> Result<Self, ContentError> {
        if config.content_toml.exists() {
            tracing::info!("loading content from {}", config.content_toml.display());
            Self::from_provider(&TomlContent::from_path(&config.content_toml)?)
        } else {
            tracing::debug!(
                "{} not found, using builtin content",
                config.content_toml.display()
            );
            Self::builtin()
        }
    }

    fn validate(&self) -> Result<(), ContentError> {
        let mut known = HashSet::new();
        for category in &self.categories {
            if !known.insert(category.id) {
                return Err(ContentError::DuplicateCategory(category.id));
            }
        }

        let mut ids = HashSet::new();
        for episode in &self.episodes {
            if !ids.insert(episode.id.as_str()) {
                return Err(ContentError::DuplicateEpisode(episode.id.clone()));
            }
            if episode.title.trim().is_empty() {
                return Err(ContentError::EmptyTitle(episode.id.clone()));
            }
            if !known.contains(&episode.category) {
                return Err(ContentError::UnknownCategory {
                    kind: "episode",
                    id: episode.id.clone(),
                    category: episode.category,
                });
            }
        }

        for article in &self.articles {
            if !known.contains(&article.category) {
                return Err(ContentError::UnknownCategory {
                    kind: "article",
                    id: article.id.clone(),
                    category: article.category,
                });
            }
        }
        Ok(())
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn testimonials(&self) -> &[Testimonial] {
        &self.testimonials
    }

    pub fn episode(&self, id: &str) -> Option<&Episode> {
        self.episodes.iter().find(|e| e.id == id)
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn has_category(&self, id: CategoryId) -> bool {
        self.category(id).is_some()
    }

    /// The first `n` episodes in store order (home page "Latest Episodes").
    pub fn latest(&self, n: usize) -> &[Episode] {
        &self.episodes[..n.min(self.episodes.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [[category]]
        id = "Sleep"
        label = "Sleep & Routines"
        style = "indigo"

        [[episode]]
        id = "ep-1"
        title = "Naps"
        summary = "s"
        duration = "10 min"
        category = "Sleep"
        cover_image = "x"
        publish_date = "Jan 05, 2024"
        show_notes = "n"
    "#;

    #[test]
    fn builtin_content_is_valid() {
        let store = ContentStore::builtin().unwrap();
        assert_eq!(store.categories().len(), 6);
        assert_eq!(store.episodes().len(), 4);
        assert_eq!(store.articles().len(), 2);
        assert_eq!(store.testimonials().len(), 3);
        assert_eq!(store.episodes()[0].id, "ep-101");
        assert_eq!(store.episodes()[0].takeaways.len(), 3);
    }

    #[test]
    fn every_builtin_category_id_is_present() {
        let store = ContentStore::builtin().unwrap();
        for id in CategoryId::ALL {
            assert!(store.has_category(id), "missing {id}");
        }
    }

    #[test]
    fn rejects_episode_with_unlisted_category() {
        let toml = MINIMAL.replace("category = \"Sleep\"", "category = \"Feeding\"");
        let provider = TomlContent::parse(&toml).unwrap();
        let err = ContentStore::from_provider(&provider).unwrap_err();
        assert!(matches!(
            err,
            ContentError::UnknownCategory {
                kind: "episode",
                category: CategoryId::Feeding,
                ..
            }
        ));
    }

    #[test]
    fn rejects_duplicate_episode_ids() {
        let doubled = format!(
            "{MINIMAL}\n{}",
            &MINIMAL[MINIMAL.find("[[episode]]").unwrap()..]
        );
        let provider = TomlContent::parse(&doubled).unwrap();
        let err = ContentStore::from_provider(&provider).unwrap_err();
        assert!(matches!(err, ContentError::DuplicateEpisode(id) if id == "ep-1"));
    }

    #[test]
    fn rejects_duplicate_categories() {
        let doubled = format!(
            "{}\n{MINIMAL}",
            &MINIMAL[..MINIMAL.find("[[episode]]").unwrap()]
        );
        let provider = TomlContent::parse(&doubled).unwrap();
        let err = ContentStore::from_provider(&provider).unwrap_err();
        assert!(matches!(err, ContentError::DuplicateCategory(CategoryId::Sleep)));
    }

    #[test]
    fn unknown_category_name_is_a_parse_error() {
        let toml = MINIMAL.replace("category = \"Sleep\"", "category = \"Toddler\"");
        assert!(matches!(
            TomlContent::parse(&toml),
            Err(ContentError::Parse(_))
        ));
    }

    #[test]
    fn category_id_parses_case_insensitively() {
        assert_eq!("sleep".parse::<CategoryId>(), Ok(CategoryId::Sleep));
        assert_eq!(" Mindset ".parse::<CategoryId>(), Ok(CategoryId::Mindset));
        assert!("All".parse::<CategoryId>().is_err());
    }

    #[test]
    fn publish_label_parses_to_date() {
        let store = ContentStore::builtin().unwrap();
        let ep = store.episode("ep-104").unwrap();
        assert_eq!(
            ep.published_on(),
            chrono::NaiveDate::from_ymd_opt(2023, 11, 2)
        );
    }

    #[test]
    fn date_label_normalises_parsed_dates() {
        let store = ContentStore::builtin().unwrap();
        assert_eq!(store.episode("ep-104").unwrap().date_label(), "Nov 2, 2023");
        assert_eq!(store.episode("ep-101").unwrap().date_label(), "Oct 12, 2023");

        let mut ep = store.episode("ep-101").unwrap().clone();
        ep.publish_date = "Coming soon".into();
        assert_eq!(ep.published_on(), None);
        assert_eq!(ep.date_label(), "Coming soon");
    }

    #[test]
    fn latest_is_clamped_to_store_size() {
        let store = ContentStore::builtin().unwrap();
        assert_eq!(store.latest(2).len(), 2);
        assert_eq!(store.latest(10).len(), 4);
    }
}
