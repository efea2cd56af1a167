use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// File suffixes recognised as lesson documents.
pub const DOCUMENT_EXTENSIONS: &[&str] = &["mdx", "md"];

/// A record as it comes out of the loader: a stable id plus untyped front matter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub id: String,
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl RawRecord {
    pub fn new(id: impl Into<String>, fields: serde_json::Map<String, serde_json::Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub const NAMES: [&'static str; 3] = [
        Difficulty::Beginner.as_str(),
        Difficulty::Intermediate.as_str(),
        Difficulty::Advanced.as_str(),
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| format!("unknown difficulty: {s}"))
    }
}

/// A validated lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonDocument {
    pub id: String,
    pub title: String,
    pub description: String,
    pub chapter: u8,
    pub order: u32,
    pub difficulty: Difficulty,
    pub objectives: Vec<String>,
    pub duration: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl LessonDocument {
    pub fn slug(&self) -> &str {
        slug(&self.id)
    }
}

/// Strips a trailing document suffix (`.mdx`, `.md`) from a lesson id.
pub fn slug(id: &str) -> &str {
    for ext in DOCUMENT_EXTENSIONS {
        if let Some(stem) = id.strip_suffix(ext)
            && let Some(stem) = stem.strip_suffix('.')
        {
            return stem;
        }
    }
    id
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavRef {
    pub slug: String,
    pub title: String,
}

impl NavRef {
    pub fn from_lesson(lesson: &LessonDocument) -> Self {
        Self {
            slug: lesson.slug().to_owned(),
            title: lesson.title.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigation {
    pub prev: Option<NavRef>,
    pub next: Option<NavRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterDescriptor {
    pub number: u8,
    pub title: String,
    pub description: String,
}
