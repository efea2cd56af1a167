use std::fs;
use std::path::Path;

pub fn write_lesson(
    root: &Path,
    rel: &str,
    title: &str,
    chapter: u32,
    order: u32,
) -> anyhow::Result<()> {
    let front_matter = format!(
        "title: {title}\n\
description: About {title}\n\
chapter: {chapter}\n\
order: {order}\n\
difficulty: beginner\n\
objectives:\n  - Learn {title}\n\
duration: 10 min\n"
    );
    write_raw(root, rel, &front_matter)
}

pub fn write_raw(root: &Path, rel: &str, front_matter: &str) -> anyhow::Result<()> {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, format!("---\n{front_matter}---\n\n# Body\n"))?;
    Ok(())
}

/// Three lessons across chapters 1 and 2, written out of order.
pub fn course(root: &Path) -> anyhow::Result<()> {
    write_lesson(root, "2-styling/1-scoped.mdx", "Scoped Styles", 2, 1)?;
    write_lesson(root, "1-foundations/2-structure.mdx", "Project Structure", 1, 2)?;
    write_lesson(root, "1-foundations/1-welcome.mdx", "Welcome", 1, 1)?;
    fs::write(root.join("1-foundations").join("notes.txt"), "not a lesson")?;
    Ok(())
}
