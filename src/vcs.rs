//! Version control of generated projects

use git2::{IndexAddOption, Repository, Signature, Status, StatusOptions};
use log::debug;
use std::collections::BTreeSet;
use std::path::Path;

use crate::error::Result;

/// Author used for commits when git has no configured identity.
const FALLBACK_NAME: &str = "babelize";
const FALLBACK_EMAIL: &str = "babelize@localhost";

/// Initializes a git repository. Re-initializing an existing repository is harmless.
pub fn init(path: &Path) -> Result<()> {
    debug!("Initializing git repository in '{}'", path.display());
    Repository::init(path)?;
    Ok(())
}

/// Stages every file of the working tree and commits it.
///
/// # Returns
/// * `Result<String>` - Id of the new commit
pub fn commit_all(path: &Path, message: &str) -> Result<String> {
    let repo = Repository::open(path)?;

    let mut index = repo.index()?;
    index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
    index.write()?;
    let tree = repo.find_tree(index.write_tree()?)?;

    let signature =
        repo.signature().or_else(|_| Signature::now(FALLBACK_NAME, FALLBACK_EMAIL))?;
    let parent = match repo.head() {
        Ok(head) => Some(head.peel_to_commit()?),
        Err(_) => None,
    };
    let parents: Vec<_> = parent.iter().collect();

    let oid = repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;
    debug!("Created commit {oid} in '{}'", path.display());
    Ok(oid.to_string())
}

/// Files of the working tree that git knows about: everything in the index plus
/// untracked files that are not ignored. Paths are relative and `/` separated.
pub fn list_files(path: &Path) -> Result<BTreeSet<String>> {
    let repo = Repository::open(path)?;

    let mut files: BTreeSet<String> = repo
        .index()?
        .iter()
        .map(|entry| String::from_utf8_lossy(&entry.path).to_string())
        .collect();

    let mut options = StatusOptions::new();
    options.include_untracked(true).recurse_untracked_dirs(true).include_ignored(false);
    for entry in repo.statuses(Some(&mut options))?.iter() {
        if entry.status().contains(Status::WT_NEW) {
            if let Some(name) = entry.path() {
                files.insert(name.to_string());
            }
        }
    }
    Ok(files)
}
