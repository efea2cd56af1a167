use std::path::Path;

use anyhow::Context as _;
use walkdir::WalkDir;

use crate::formats::{DOCUMENT_EXTENSIONS, RawRecord};

/// Reads every lesson file under `root` into a raw record.
///
/// Files are visited in sorted path order. Each record id is the path relative to
/// `root`, `/`-separated, extension included.
pub fn load_dir(root: &Path) -> anyhow::Result<Vec<RawRecord>> {
    if !root.is_dir() {
        anyhow::bail!("lessons directory does not exist: {}", root.display());
    }

    let mut records = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry =
            entry.with_context(|| format!("walk lessons dir: {}", root.display()))?;
        if !entry.file_type().is_file() || !is_lesson_file(entry.path()) {
            continue;
        }

        let path = entry.path();
        let id = record_id(root, path)?;
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("read lesson: {}", path.display()))?;
        let fields = parse_front_matter(&contents)
            .with_context(|| format!("parse front matter: {}", path.display()))?;
        records.push(RawRecord::new(id, fields));
    }

    tracing::info!(root = %root.display(), lessons = records.len(), "loaded lesson records");
    Ok(records)
}

/// Extracts the leading `---` YAML block of a lesson as a JSON object.
pub fn parse_front_matter(
    contents: &str,
) -> anyhow::Result<serde_json::Map<String, serde_json::Value>> {
    let contents = contents.trim_start_matches('\u{feff}');
    let mut lines = contents.lines();
    let first = lines
        .next()
        .ok_or_else(|| anyhow::anyhow!("lesson file is empty"))?;
    if first.trim_end() != "---" {
        anyhow::bail!("lesson must start with YAML front matter ('---')");
    }

    let mut yaml_lines = Vec::new();
    let mut closed = false;
    for line in lines {
        if line.trim_end() == "---" {
            closed = true;
            break;
        }
        yaml_lines.push(line);
    }
    if !closed {
        anyhow::bail!("front matter is not closed ('---')");
    }

    let yaml = yaml_lines.join("\n");
    let value: serde_yaml::Value =
        serde_yaml::from_str(&yaml).context("deserialize front matter yaml")?;
    let value = match value {
        serde_yaml::Value::Null => return Ok(serde_json::Map::new()),
        value => serde_json::to_value(value).context("convert front matter to json")?,
    };
    match value {
        serde_json::Value::Object(map) => Ok(map),
        _ => anyhow::bail!("front matter must be a mapping"),
    }
}

fn is_lesson_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| DOCUMENT_EXTENSIONS.contains(&ext))
}

fn record_id(root: &Path, path: &Path) -> anyhow::Result<String> {
    let rel = path
        .strip_prefix(root)
        .with_context(|| format!("lesson outside lessons dir: {}", path.display()))?;
    let segments = rel
        .components()
        .map(|c| {
            c.as_os_str()
                .to_str()
                .map(str::to_owned)
                .ok_or_else(|| anyhow::anyhow!("lesson path is not UTF-8: {}", path.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_front_matter_mapping() -> anyhow::Result<()> {
        let fields = parse_front_matter(
            "---\ntitle: Welcome\nchapter: 1\nobjectives:\n  - one\n---\n\n# Welcome\n",
        )?;
        assert_eq!(fields["title"], serde_json::json!("Welcome"));
        assert_eq!(fields["chapter"], serde_json::json!(1));
        assert_eq!(fields["objectives"], serde_json::json!(["one"]));
        Ok(())
    }

    #[test]
    fn tolerates_byte_order_mark() -> anyhow::Result<()> {
        let fields = parse_front_matter("\u{feff}---\ntitle: T\n---\n")?;
        assert_eq!(fields["title"], serde_json::json!("T"));
        Ok(())
    }

    #[test]
    fn empty_front_matter_is_an_empty_mapping() -> anyhow::Result<()> {
        assert!(parse_front_matter("---\n---\nbody\n")?.is_empty());
        Ok(())
    }

    #[test]
    fn rejects_missing_or_unclosed_front_matter() {
        assert!(parse_front_matter("# No front matter\n").is_err());
        assert!(parse_front_matter("---\ntitle: T\n").is_err());
        assert!(parse_front_matter("").is_err());
    }

    #[test]
    fn rejects_non_mapping_front_matter() {
        let err = parse_front_matter("---\n- a\n- b\n---\n").unwrap_err();
        assert!(format!("{err:#}").contains("mapping"));
    }
}
