use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context as _;
use serde::Deserialize;

use crate::formats::ChapterDescriptor;
use crate::validate::{MAX_CHAPTER, MIN_CHAPTER};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("chapter {0} is outside 1..=5")]
    OutOfRange(i64),
    #[error("chapter {0} is defined more than once")]
    Duplicate(u8),
    #[error("chapter {0} has an empty title")]
    EmptyTitle(u8),
}

/// Static chapter metadata, independent of which lessons exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterRegistry {
    chapters: BTreeMap<u8, ChapterDescriptor>,
}

const BUILTIN: [(u8, &str, &str); 5] = [
    (
        1,
        "Foundations",
        "Understand what Astro is, how it differs from React, and learn the core project structure.",
    ),
    (
        2,
        "Styling",
        "Master Astro's scoped styles, CSS architecture, and Tailwind CSS integration.",
    ),
    (
        3,
        "Content & Data",
        "Work with content collections, type-safe schemas, and MDX for rich interactive content.",
    ),
    (
        4,
        "Islands Architecture",
        "Learn partial hydration, integrate React components, and control when JavaScript loads.",
    ),
    (
        5,
        "Advanced Features",
        "Add view transitions, build API endpoints, and prepare for production deployment.",
    ),
];

#[derive(Debug, Deserialize)]
struct ChapterEntry {
    number: i64,
    title: String,
    #[serde(default)]
    description: String,
}

impl ChapterRegistry {
    pub fn builtin() -> Self {
        let chapters = BUILTIN
            .iter()
            .map(|(number, title, description)| {
                (
                    *number,
                    ChapterDescriptor {
                        number: *number,
                        title: (*title).to_owned(),
                        description: (*description).to_owned(),
                    },
                )
            })
            .collect();
        Self { chapters }
    }

    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = ChapterDescriptor>,
    ) -> Result<Self, RegistryError> {
        let mut chapters = BTreeMap::new();
        for descriptor in descriptors {
            if !(MIN_CHAPTER..=MAX_CHAPTER).contains(&descriptor.number) {
                return Err(RegistryError::OutOfRange(descriptor.number.into()));
            }
            if descriptor.title.trim().is_empty() {
                return Err(RegistryError::EmptyTitle(descriptor.number));
            }
            let number = descriptor.number;
            if chapters.insert(number, descriptor).is_some() {
                return Err(RegistryError::Duplicate(number));
            }
        }
        Ok(Self { chapters })
    }

    /// Parses a YAML list of `{number, title, description}` entries.
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let entries: Vec<ChapterEntry> =
            serde_yaml::from_str(yaml).context("deserialize chapter registry")?;
        let descriptors = entries
            .into_iter()
            .map(|entry| {
                let number = u8::try_from(entry.number)
                    .map_err(|_| RegistryError::OutOfRange(entry.number))?;
                Ok(ChapterDescriptor {
                    number,
                    title: entry.title,
                    description: entry.description,
                })
            })
            .collect::<Result<Vec<_>, RegistryError>>()?;
        Ok(Self::from_descriptors(descriptors)?)
    }

    pub fn from_yaml_file(path: &Path) -> anyhow::Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("read chapter registry: {}", path.display()))?;
        Self::from_yaml_str(&yaml)
            .with_context(|| format!("parse chapter registry: {}", path.display()))
    }

    pub fn describe(&self, chapter: u8) -> Option<&ChapterDescriptor> {
        self.chapters.get(&chapter)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChapterDescriptor> {
        self.chapters.values()
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }
}

impl Default for ChapterRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
