use std::collections::{BTreeMap, HashMap};

use crate::formats::{LessonDocument, RawRecord};
use crate::validate::{ValidationError, validate};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("duplicate lesson id: {0}")]
    DuplicateId(String),
    #[error("lessons {first} and {second} share slug {slug}")]
    DuplicateSlug {
        slug: String,
        first: String,
        second: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid lesson {id}")]
    Validation {
        id: String,
        #[source]
        source: ValidationError,
    },
    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Immutable, sorted view over a validated lesson set.
///
/// Lessons are ordered by `(chapter, order)`. The sort is stable, so lessons sharing
/// both keys keep their input order. Each chapter occupies a contiguous range of the
/// sorted sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogIndex {
    lessons: Vec<LessonDocument>,
    positions: HashMap<String, usize>,
    slugs: HashMap<String, usize>,
    chapter_ranges: BTreeMap<u8, (usize, usize)>,
}

impl CatalogIndex {
    pub fn build(documents: Vec<LessonDocument>) -> Result<Self, BuildError> {
        let mut lessons = documents;
        lessons.sort_by_key(|lesson| (lesson.chapter, lesson.order));

        let mut positions = HashMap::with_capacity(lessons.len());
        let mut slugs = HashMap::with_capacity(lessons.len());
        for (idx, lesson) in lessons.iter().enumerate() {
            if positions.insert(lesson.id.clone(), idx).is_some() {
                return Err(BuildError::DuplicateId(lesson.id.clone()));
            }
            // `intro.md` and `intro.mdx` are distinct ids but one URL.
            if let Some(prev) = slugs.insert(lesson.slug().to_owned(), idx) {
                return Err(BuildError::DuplicateSlug {
                    slug: lesson.slug().to_owned(),
                    first: lessons[prev].id.clone(),
                    second: lesson.id.clone(),
                });
            }
        }

        let mut chapter_ranges: BTreeMap<u8, (usize, usize)> = BTreeMap::new();
        for (idx, lesson) in lessons.iter().enumerate() {
            chapter_ranges
                .entry(lesson.chapter)
                .and_modify(|(_, end)| *end = idx + 1)
                .or_insert((idx, idx + 1));
        }

        for pair in lessons.windows(2) {
            let [a, b] = pair else { continue };
            if a.chapter == b.chapter && a.order == b.order {
                tracing::warn!(
                    chapter = a.chapter,
                    order = a.order,
                    first = %a.id,
                    second = %b.id,
                    "lessons share an order within a chapter; keeping input order"
                );
            }
        }

        tracing::debug!(
            lessons = lessons.len(),
            chapters = chapter_ranges.len(),
            "built lesson catalog"
        );

        Ok(Self {
            lessons,
            positions,
            slugs,
            chapter_ranges,
        })
    }

    /// Validates every record and builds the index. Nothing is returned unless all
    /// records are valid and both ids and slugs are unique.
    pub fn from_records(records: &[RawRecord]) -> Result<Self, CatalogError> {
        let documents = records
            .iter()
            .map(|record| {
                validate(record).map_err(|source| CatalogError::Validation {
                    id: record.id.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::build(documents)?)
    }

    pub fn all(&self) -> &[LessonDocument] {
        &self.lessons
    }

    /// Lessons grouped by chapter. Chapters without lessons are absent.
    pub fn by_chapter(&self) -> BTreeMap<u8, &[LessonDocument]> {
        self.chapter_ranges
            .iter()
            .map(|(chapter, (start, end))| (*chapter, &self.lessons[*start..*end]))
            .collect()
    }

    pub fn chapter(&self, chapter: u8) -> &[LessonDocument] {
        match self.chapter_ranges.get(&chapter) {
            Some((start, end)) => &self.lessons[*start..*end],
            None => &[],
        }
    }

    pub fn chapters(&self) -> impl Iterator<Item = u8> + '_ {
        self.chapter_ranges.keys().copied()
    }

    /// Number of lessons in `chapter`; zero for empty or unknown chapters.
    pub fn count_in_chapter(&self, chapter: i64) -> usize {
        u8::try_from(chapter)
            .map(|chapter| self.chapter(chapter).len())
            .unwrap_or(0)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&LessonDocument> {
        self.position(id).map(|idx| &self.lessons[idx])
    }

    pub fn find_by_slug(&self, slug: &str) -> Option<&LessonDocument> {
        self.slugs.get(slug).map(|idx| &self.lessons[*idx])
    }

    pub(crate) fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub(crate) fn get(&self, idx: usize) -> Option<&LessonDocument> {
        self.lessons.get(idx)
    }

    pub fn first(&self) -> Option<&LessonDocument> {
        self.lessons.first()
    }

    pub fn last(&self) -> Option<&LessonDocument> {
        self.lessons.last()
    }

    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::formats::Difficulty;

    use super::*;

    pub(crate) fn lesson(id: &str, chapter: u8, order: u32, title: &str) -> LessonDocument {
        LessonDocument {
            id: id.to_owned(),
            title: title.to_owned(),
            description: format!("About {title}"),
            chapter,
            order,
            difficulty: Difficulty::Beginner,
            objectives: Vec::new(),
            duration: "10 min".to_owned(),
            tags: Vec::new(),
        }
    }

    pub(crate) fn sample() -> Vec<LessonDocument> {
        vec![
            lesson("a", 1, 2, "A"),
            lesson("b", 1, 1, "B"),
            lesson("c", 2, 1, "C"),
        ]
    }

    fn ids(lessons: &[LessonDocument]) -> Vec<&str> {
        lessons.iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn all_is_sorted_by_chapter_then_order() -> anyhow::Result<()> {
        let catalog = CatalogIndex::build(sample())?;
        assert_eq!(ids(catalog.all()), vec!["b", "a", "c"]);

        for pair in catalog.all().windows(2) {
            let (x, y) = (&pair[0], &pair[1]);
            assert!(x.chapter < y.chapter || (x.chapter == y.chapter && x.order <= y.order));
        }
        Ok(())
    }

    #[test]
    fn by_chapter_matches_global_order() -> anyhow::Result<()> {
        let catalog = CatalogIndex::build(vec![
            lesson("4-1", 4, 1, "Islands"),
            lesson("1-3", 1, 3, "Structure"),
            lesson("4-0", 4, 0, "Zero"),
            lesson("1-1", 1, 1, "Welcome"),
            lesson("2-1", 2, 1, "Scoped"),
        ])?;

        let grouped = catalog.by_chapter();
        assert_eq!(grouped.keys().copied().collect::<Vec<_>>(), vec![1, 2, 4]);
        for (chapter, lessons) in &grouped {
            let expected = catalog
                .all()
                .iter()
                .filter(|l| l.chapter == *chapter)
                .cloned()
                .collect::<Vec<_>>();
            assert_eq!(*lessons, expected.as_slice());
        }
        assert_eq!(ids(grouped[&4]), vec!["4-0", "4-1"]);
        Ok(())
    }

    #[test]
    fn empty_chapters_are_absent_from_grouping() -> anyhow::Result<()> {
        let catalog = CatalogIndex::build(sample())?;
        let grouped = catalog.by_chapter();
        assert!(!grouped.contains_key(&3));
        assert!(catalog.chapter(3).is_empty());
        assert_eq!(catalog.chapters().collect::<Vec<_>>(), vec![1, 2]);
        Ok(())
    }

    #[test]
    fn count_in_chapter_never_fails() -> anyhow::Result<()> {
        let catalog = CatalogIndex::build(sample())?;
        assert_eq!(catalog.count_in_chapter(1), 2);
        assert_eq!(catalog.count_in_chapter(2), 1);
        assert_eq!(catalog.count_in_chapter(3), 0);
        assert_eq!(catalog.count_in_chapter(0), 0);
        assert_eq!(catalog.count_in_chapter(-1), 0);
        assert_eq!(catalog.count_in_chapter(1000), 0);
        Ok(())
    }

    #[test]
    fn find_by_id_returns_every_input_document() -> anyhow::Result<()> {
        let input = sample();
        let catalog = CatalogIndex::build(input.clone())?;
        for doc in &input {
            assert_eq!(catalog.find_by_id(&doc.id), Some(doc));
        }
        assert!(catalog.find_by_id("missing").is_none());
        Ok(())
    }

    #[test]
    fn find_by_slug_strips_extension() -> anyhow::Result<()> {
        let catalog = CatalogIndex::build(vec![lesson("1-foundations/1-welcome.mdx", 1, 1, "W")])?;
        let found = catalog.find_by_slug("1-foundations/1-welcome");
        assert_eq!(found.map(|l| l.title.as_str()), Some("W"));
        assert!(catalog.find_by_slug("1-foundations/1-welcome.mdx").is_none());
        Ok(())
    }

    #[test]
    fn duplicate_id_rejects_whole_build() {
        let mut input = sample();
        input.push(lesson("a", 3, 1, "Another A"));
        let err = CatalogIndex::build(input).unwrap_err();
        assert_eq!(err, BuildError::DuplicateId("a".to_owned()));
    }

    #[test]
    fn extension_variants_of_one_slug_reject_build() {
        let err = CatalogIndex::build(vec![
            lesson("intro.md", 1, 1, "Markdown Intro"),
            lesson("intro.mdx", 1, 2, "MDX Intro"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            BuildError::DuplicateSlug {
                slug: "intro".to_owned(),
                first: "intro.md".to_owned(),
                second: "intro.mdx".to_owned(),
            }
        );
    }

    #[test]
    fn equal_order_keeps_input_order() -> anyhow::Result<()> {
        let catalog = CatalogIndex::build(vec![
            lesson("second-listed", 2, 1, "X"),
            lesson("tie-first", 1, 1, "Y"),
            lesson("tie-second", 1, 1, "Z"),
        ])?;
        assert_eq!(
            ids(catalog.all()),
            vec!["tie-first", "tie-second", "second-listed"]
        );
        Ok(())
    }

    #[test]
    fn rebuilding_same_input_is_query_equivalent() -> anyhow::Result<()> {
        let first = CatalogIndex::build(sample())?;
        let second = CatalogIndex::build(sample())?;
        assert_eq!(first.all(), second.all());
        assert_eq!(first.by_chapter(), second.by_chapter());
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn from_records_stops_on_invalid_record() {
        let mut fields = serde_json::Map::new();
        fields.insert("title".to_owned(), serde_json::json!("Bad"));
        fields.insert("chapter".to_owned(), serde_json::json!(7));
        let err = CatalogIndex::from_records(&[RawRecord::new("bad.mdx", fields)]).unwrap_err();
        match err {
            CatalogError::Validation { id, source } => {
                assert_eq!(id, "bad.mdx");
                assert_eq!(source.field, "description");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_catalog_answers_queries() -> anyhow::Result<()> {
        let catalog = CatalogIndex::build(Vec::new())?;
        assert!(catalog.is_empty());
        assert!(catalog.by_chapter().is_empty());
        assert!(catalog.first().is_none());
        Ok(())
    }
}
