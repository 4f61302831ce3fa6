//! Template file lookup restricted to an allow-list of directories.
//!
//! Names are logical identifiers, not paths: an absolute name or a name whose
//! `..` segments would land outside every configured directory resolves to
//! nothing. Both cases are reported as [`Error::TemplateNotFound`], identical
//! to a plainly missing file, so a probing caller learns nothing about the
//! filesystem layout. Files are read fresh on every call; there is no cache.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// Resolve a template name against the ordered directory list.
///
/// Directories are checked in order and the first matching file wins. A file
/// that exists but cannot be read is an [`Error::Io`], distinct from
/// [`Error::TemplateNotFound`].
pub fn resolve(name: &str, dirs: &[PathBuf]) -> Result<String> {
    if Path::new(name).is_absolute() {
        debug!(name, "rejected absolute template name");
        return Err(Error::not_found(name));
    }

    for dir in dirs {
        let Some(path) = contained_path(dir, name) else {
            continue;
        };
        if !path.is_file() {
            continue;
        }
        debug!(name, path = %path.display(), "resolved template");
        return fs::read_to_string(&path).map_err(|e| Error::read(path, e));
    }

    debug!(name, "no template found in any configured directory");
    Err(Error::not_found(name))
}

/// Join `name` onto `dir` and verify the result stays inside `dir`.
///
/// Both sides are canonicalized first, so symlinks are resolved before the
/// containment check: a link pointing outside the base directory is rejected
/// the same way a `..` escape is. Canonicalization fails for paths that do
/// not exist, which simply means "no match in this directory".
fn contained_path(dir: &Path, name: &str) -> Option<PathBuf> {
    let base = dir.canonicalize().ok()?;
    let candidate = dir.join(name).canonicalize().ok()?;
    if candidate.starts_with(&base) {
        Some(candidate)
    } else {
        debug!(
            name,
            dir = %dir.display(),
            "rejected template name escaping its base directory"
        );
        None
    }
}
