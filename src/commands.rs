use std::io::Write;
use std::path::PathBuf;

use anyhow::Context as _;
use serde::Serialize;

use crate::catalog::CatalogIndex;
use crate::chapters::ChapterRegistry;
use crate::cli::{ChaptersArgs, CheckArgs, ListArgs, NavArgs};
use crate::config::SiteConfig;
use crate::formats::{Difficulty, LessonDocument, NavRef};
use crate::loader::load_dir;
use crate::nav::resolve;
use crate::paths::SitePaths;
use crate::validate::validate_all;

/// Shared state every read command works from.
pub struct Site {
    pub catalog: CatalogIndex,
    pub registry: ChapterRegistry,
    pub paths: SitePaths,
}

impl Site {
    pub fn load(lessons: &str, config: &SiteConfig) -> anyhow::Result<Self> {
        let registry = match &config.chapters {
            Some(path) => ChapterRegistry::from_yaml_file(path)?,
            None => ChapterRegistry::builtin(),
        };
        let records = load_dir(&PathBuf::from(lessons)).context("load lessons")?;
        let catalog = CatalogIndex::from_records(&records).context("build catalog")?;
        Ok(Self {
            catalog,
            registry,
            paths: SitePaths::new(&config.base),
        })
    }

    fn chapter_title(&self, chapter: u8) -> String {
        self.registry
            .describe(chapter)
            .map(|c| c.title.clone())
            .unwrap_or_else(|| format!("Chapter {chapter}"))
    }
}

pub fn check(args: CheckArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let records = load_dir(&PathBuf::from(&args.lessons)).context("load lessons")?;
    let documents = match validate_all(&records) {
        Ok(documents) => documents,
        Err(failures) => {
            let mut message = format!("{} invalid lesson(s)", failures.len());
            for (id, err) in &failures {
                message.push_str(&format!("\n  {id}: {err}"));
            }
            anyhow::bail!(message);
        }
    };
    let catalog = CatalogIndex::build(documents).context("build catalog")?;
    writeln!(
        out,
        "ok: {} lessons in {} chapters",
        catalog.len(),
        catalog.chapters().count()
    )?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct ChapterListing<'a> {
    chapter: u8,
    title: String,
    lessons: Vec<LessonListing<'a>>,
}

#[derive(Debug, Serialize)]
struct LessonListing<'a> {
    id: &'a str,
    slug: &'a str,
    url: String,
    title: &'a str,
    order: u32,
    difficulty: Difficulty,
    duration: &'a str,
    tags: &'a [String],
}

pub fn list(args: ListArgs, config: &SiteConfig, out: &mut impl Write) -> anyhow::Result<()> {
    let site = Site::load(&args.lessons, config)?;
    let listing = site
        .catalog
        .by_chapter()
        .into_iter()
        .map(|(chapter, lessons)| ChapterListing {
            chapter,
            title: site.chapter_title(chapter),
            lessons: lessons
                .iter()
                .map(|lesson| lesson_listing(&site.paths, lesson))
                .collect(),
        })
        .collect::<Vec<_>>();

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &listing).context("serialize listing")?;
        writeln!(out)?;
        return Ok(());
    }

    for chapter in &listing {
        writeln!(out, "Chapter {}: {}", chapter.chapter, chapter.title)?;
        for lesson in &chapter.lessons {
            writeln!(
                out,
                "  {}. {} ({}) [{}, {}]",
                lesson.order, lesson.title, lesson.url, lesson.difficulty, lesson.duration
            )?;
        }
    }
    Ok(())
}

fn lesson_listing<'a>(paths: &SitePaths, lesson: &'a LessonDocument) -> LessonListing<'a> {
    LessonListing {
        id: &lesson.id,
        slug: lesson.slug(),
        url: paths.lesson_url(lesson.slug()),
        title: &lesson.title,
        order: lesson.order,
        difficulty: lesson.difficulty,
        duration: &lesson.duration,
        tags: &lesson.tags,
    }
}

#[derive(Debug, Serialize)]
struct NavLink {
    slug: String,
    title: String,
    url: String,
}

#[derive(Debug, Serialize)]
struct NavOutput {
    prev: Option<NavLink>,
    next: Option<NavLink>,
}

pub fn nav(args: NavArgs, config: &SiteConfig, out: &mut impl Write) -> anyhow::Result<()> {
    let site = Site::load(&args.lessons, config)?;
    let navigation = resolve(&site.catalog, &args.id)
        .ok_or_else(|| anyhow::anyhow!("lesson not found: {}", args.id))?;

    let link = |nav_ref: NavRef| NavLink {
        url: site.paths.lesson_url(&nav_ref.slug),
        slug: nav_ref.slug,
        title: nav_ref.title,
    };
    let output = NavOutput {
        prev: navigation.prev.map(link),
        next: navigation.next.map(link),
    };

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &output).context("serialize navigation")?;
        writeln!(out)?;
        return Ok(());
    }

    for (label, entry) in [("prev", &output.prev), ("next", &output.next)] {
        match entry {
            Some(link) => writeln!(out, "{label}: {} ({})", link.title, link.url)?,
            None => writeln!(out, "{label}: -")?,
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct ChapterSummary<'a> {
    chapter: u8,
    title: &'a str,
    description: &'a str,
    lessons: usize,
}

pub fn chapters(args: ChaptersArgs, config: &SiteConfig, out: &mut impl Write) -> anyhow::Result<()> {
    let site = Site::load(&args.lessons, config)?;

    for chapter in site.catalog.chapters() {
        if site.registry.describe(chapter).is_none() {
            tracing::warn!(chapter, "lessons reference a chapter missing from the registry");
        }
    }

    // Listing walks the registry, so chapters without lessons still show up.
    let summaries = site
        .registry
        .iter()
        .map(|c| ChapterSummary {
            chapter: c.number,
            title: &c.title,
            description: &c.description,
            lessons: site.catalog.count_in_chapter(c.number.into()),
        })
        .collect::<Vec<_>>();

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &summaries).context("serialize chapters")?;
        writeln!(out)?;
        return Ok(());
    }

    for summary in &summaries {
        let noun = if summary.lessons == 1 { "lesson" } else { "lessons" };
        writeln!(
            out,
            "{}. {} ({} {noun})",
            summary.chapter, summary.title, summary.lessons
        )?;
        if !summary.description.is_empty() {
            writeln!(out, "   {}", summary.description)?;
        }
    }
    Ok(())
}
