//! Blog post files.

use crate::error::Result;
use std::path::{Path, PathBuf};

/// File name for the blog post about `topic`: `blog_<topic>.md`.
///
/// Whitespace runs and path separators become `_` so the name stays a
/// single path component.
pub fn blog_filename(topic: &str) -> String {
    let slug = topic
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .replace(['/', '\\'], "_");
    let slug = if slug.is_empty() || slug == "." || slug == ".." {
        "untitled".to_owned()
    } else {
        slug
    };
    format!("blog_{slug}.md")
}

/// Write `post` to `dir/blog_<topic>.md`, creating `dir` if needed.
///
/// Returns the path written.
///
/// # Errors
///
/// Returns an I/O error if the directory or file cannot be written.
pub fn save_blog(dir: &Path, topic: &str, post: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(blog_filename(topic));
    std::fs::write(&path, post)?;
    tracing::info!(path = %path.display(), bytes = post.len(), "blog post saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaces_become_underscores() {
        assert_eq!(
            blog_filename("graph neural networks"),
            "blog_graph_neural_networks.md"
        );
    }

    #[test]
    fn whitespace_runs_collapse() {
        assert_eq!(blog_filename("  deep \t learning "), "blog_deep_learning.md");
    }

    #[test]
    fn path_separators_are_replaced() {
        assert_eq!(blog_filename("../etc/passwd"), "blog_.._etc_passwd.md");
        assert_eq!(blog_filename("a\\b"), "blog_a_b.md");
    }

    #[test]
    fn blank_topic_gets_placeholder() {
        assert_eq!(blog_filename("   "), "blog_untitled.md");
    }

    #[test]
    fn save_blog_creates_directory_and_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("posts");
        let path = save_blog(&out, "machine learning", "# Hello\n").expect("save");
        assert_eq!(path, out.join("blog_machine_learning.md"));
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "# Hello\n");
    }
}
