//! Validate local post documents

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::content::FrontMatter;
use crate::Site;

/// Check every local post document and report malformed ones.
///
/// Exits non-zero (via the returned error) when any document is invalid,
/// so this can gate a deploy.
pub fn run(site: &Site) -> Result<()> {
    let (checked, failed) = check_documents(&site.posts_dir)?;

    println!("Checked {} document(s), {} invalid.", checked, failed);

    if failed > 0 {
        anyhow::bail!("{} invalid post document(s)", failed);
    }
    Ok(())
}

/// Walk the posts root and validate each document.
/// Returns (checked, failed); a failure on one document never stops the run.
fn check_documents(posts_dir: &Path) -> Result<(usize, usize)> {
    let entries = fs::read_dir(posts_dir)?;

    let mut checked = 0usize;
    let mut failed = 0usize;

    for entry in entries.filter_map(|e| e.ok()) {
        let dir = entry.path();
        if !dir.is_dir() {
            continue;
        }

        let doc = dir.join("post.md");
        if !doc.exists() {
            println!("  skip {:?} (no post.md)", entry.file_name());
            continue;
        }

        checked += 1;
        match check_document(&doc) {
            Ok(title) => {
                println!("  ok   {:?} - {}", entry.file_name(), title);
            }
            Err(e) => {
                failed += 1;
                println!("  FAIL {:?} - {:#}", entry.file_name(), e);
            }
        }
    }

    Ok((checked, failed))
}

/// Validate one document, returning its title
fn check_document(doc: &Path) -> Result<String> {
    let raw = fs::read_to_string(doc)?;
    let (fm, _) = FrontMatter::parse(&raw)?;
    Ok(fm.title.unwrap_or_else(|| "<untitled>".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreadable_document_is_a_fail_not_an_abort() {
        let tmp = tempfile::tempdir().unwrap();

        let good = tmp.path().join("good");
        fs::create_dir_all(&good).unwrap();
        fs::write(good.join("post.md"), "---\ntitle: Good\n---\nBody.\n").unwrap();

        let bad = tmp.path().join("bad");
        fs::create_dir_all(&bad).unwrap();
        fs::write(bad.join("post.md"), "no delimiter\n").unwrap();

        // post.md as a directory makes the read itself fail
        let unreadable = tmp.path().join("unreadable");
        fs::create_dir_all(unreadable.join("post.md")).unwrap();

        let (checked, failed) = check_documents(tmp.path()).unwrap();
        assert_eq!(checked, 3);
        assert_eq!(failed, 2);
    }

    #[test]
    fn test_all_valid_documents_pass() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("only");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("post.md"), "---\ntitle: Only\n---\nBody.\n").unwrap();

        let (checked, failed) = check_documents(tmp.path()).unwrap();
        assert_eq!(checked, 1);
        assert_eq!(failed, 0);
    }
}
