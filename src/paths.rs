/// Builds internal links under the site's deployment base path (e.g. `/astro-demo`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SitePaths {
    base: String,
}

impl SitePaths {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_owned(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    pub fn lesson_url(&self, slug: &str) -> String {
        self.url(&format!("/lessons/{slug}/"))
    }
}
