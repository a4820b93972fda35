//! # File Resolver — Contents for `file:` Expressions
//!
//! A fixture may embed the bytes of another file (typically compiled contract
//! code) with `file:<path>`. Paths are relative to the directory of the
//! fixture being parsed, which the caller sets once per document through
//! [`FileResolver::set_context`].

use std::io;
use std::path::{Path, PathBuf};

/// Resolves `file:` expressions to file contents.
pub trait FileResolver: Send + Sync {
    /// Sets the directory the current document lives in.
    fn set_context(&mut self, context_path: &Path);

    /// Yields the absolute path a `file:` value refers to.
    fn resolve_absolute_path(&self, value: &str) -> PathBuf;

    /// Reads the contents of the file a `file:` value refers to.
    fn resolve_file_value(&self, value: &str) -> io::Result<Vec<u8>>;
}

/// Filesystem resolver rooted at the document's directory.
///
/// Absolute paths are used as-is. Relative paths are joined onto the
/// context directory, or onto the process working directory while no
/// context has been set.
#[derive(Debug, Clone, Default)]
pub struct DefaultFileResolver {
    context: PathBuf,
}

impl DefaultFileResolver {
    /// Create a resolver with no context directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver rooted at `context`.
    pub fn with_context(context: impl Into<PathBuf>) -> Self {
        Self {
            context: context.into(),
        }
    }

    /// Returns the current context directory.
    pub fn context(&self) -> &Path {
        &self.context
    }
}

impl FileResolver for DefaultFileResolver {
    fn set_context(&mut self, context_path: &Path) {
        tracing::debug!(context = %context_path.display(), "file resolver context set");
        self.context = context_path.to_path_buf();
    }

    fn resolve_absolute_path(&self, value: &str) -> PathBuf {
        let path = Path::new(value);
        if path.is_absolute() {
            return path.to_path_buf();
        }
        self.context.join(path)
    }

    fn resolve_file_value(&self, value: &str) -> io::Result<Vec<u8>> {
        let path = self.resolve_absolute_path(value);
        tracing::debug!(path = %path.display(), "reading file value");
        std::fs::read(&path)
    }
}
