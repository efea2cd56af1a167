use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Site base path prefixed to lesson URLs (default: $LESSONBOOK_BASE).
    #[arg(long, global = true)]
    pub base: Option<String>,

    /// YAML chapter registry overriding the built-in chapters (default: $LESSONBOOK_CHAPTERS).
    #[arg(long, global = true)]
    pub chapters: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate every lesson and build the catalog.
    Check(CheckArgs),
    /// Print the sorted catalog grouped by chapter.
    List(ListArgs),
    /// Print previous/next links for one lesson.
    Nav(NavArgs),
    /// Print every registered chapter with its lesson count.
    Chapters(ChaptersArgs),
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Lessons directory (searched recursively for .mdx/.md files).
    #[arg(long)]
    pub lessons: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Lessons directory (searched recursively for .mdx/.md files).
    #[arg(long)]
    pub lessons: String,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct NavArgs {
    /// Lessons directory (searched recursively for .mdx/.md files).
    #[arg(long)]
    pub lessons: String,

    /// Lesson id (path relative to the lessons directory, extension included).
    #[arg(long)]
    pub id: String,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ChaptersArgs {
    /// Lessons directory (searched recursively for .mdx/.md files).
    #[arg(long)]
    pub lessons: String,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}
