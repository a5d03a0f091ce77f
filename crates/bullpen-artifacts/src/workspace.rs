//! Confined filesystem writes under the run's output root.
//!
//! Everything the crew produces lands under one directory chosen at
//! launch. Model output decides some of the target paths, so every
//! write is checked before it happens: the path is walked component by
//! component and any route that would leave the root (a leading `/`, a
//! `..` that climbs past the top) is refused outright. Refused writes
//! are errors, never redirected or truncated to something "safe".

use std::path::{Component, Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::error::ArtifactError;

/// How [`Workspace::write`] treats an existing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Truncate and replace the file's contents.
    Create,
    /// Add to the end, creating the file when absent.
    Append,
}

/// A writer confined to one output root.
///
/// Missing intermediate directories are created on demand; the root
/// itself must already exist.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Confine a writer to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory all writes stay under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `content` to `relative` under the root.
    ///
    /// Returns the full path that was written.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::PathEscape`] when `relative` is absolute
    /// or climbs out of the root, and [`ArtifactError::Io`] when the
    /// filesystem refuses the write.
    pub async fn write(
        &self,
        relative: &Path,
        content: &str,
        mode: WriteMode,
    ) -> Result<PathBuf, ArtifactError> {
        let path = self.resolve(relative)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ArtifactError::io(parent, e))?;
        }

        match mode {
            WriteMode::Create => {
                tokio::fs::write(&path, content)
                    .await
                    .map_err(|e| ArtifactError::io(&path, e))?;
            }
            WriteMode::Append => {
                let mut file = tokio::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&path)
                    .await
                    .map_err(|e| ArtifactError::io(&path, e))?;
                file.write_all(content.as_bytes())
                    .await
                    .map_err(|e| ArtifactError::io(&path, e))?;
            }
        }

        Ok(path)
    }

    /// Join `relative` onto the root after checking it cannot escape.
    ///
    /// Walks the components keeping a running depth; `..` below depth
    /// zero, an absolute path, or a drive prefix is an escape. The check
    /// is purely lexical, so it holds whether or not the target exists
    /// yet.
    fn resolve(&self, relative: &Path) -> Result<PathBuf, ArtifactError> {
        let mut depth: usize = 0;
        for component in relative.components() {
            match component {
                Component::Normal(_) => depth = depth.saturating_add(1),
                Component::CurDir => {}
                Component::ParentDir => {
                    depth = depth.checked_sub(1).ok_or_else(|| self.escape(relative))?;
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(self.escape(relative));
                }
            }
        }
        Ok(self.root.join(relative))
    }

    fn escape(&self, relative: &Path) -> ArtifactError {
        ArtifactError::PathEscape {
            path: relative.to_path_buf(),
            root: self.root.clone(),
        }
    }
}
