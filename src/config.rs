use std::path::PathBuf;

pub const BASE_ENV: &str = "LESSONBOOK_BASE";
pub const CHAPTERS_ENV: &str = "LESSONBOOK_CHAPTERS";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteConfig {
    pub base: String,
    pub chapters: Option<PathBuf>,
}

impl SiteConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base = lookup(BASE_ENV).unwrap_or_default();
        let chapters = lookup(CHAPTERS_ENV)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        Self { base, chapters }
    }

    /// Command-line values win over the environment.
    pub fn with_overrides(mut self, base: Option<String>, chapters: Option<String>) -> Self {
        if let Some(base) = base {
            self.base = base;
        }
        if let Some(chapters) = chapters {
            self.chapters = Some(PathBuf::from(chapters));
        }
        self
    }
}
