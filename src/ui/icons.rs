// Icon lookup with a per-build-pass cache
//
// Icons are requested by symbolic name (`icon_settings`). Two file naming
// conventions are tried in order:
// 1. primary:  `settings-icon-2x.png` (prefix dropped, `_` -> `-`, `-icon-2x` suffix)
// 2. legacy:   `icon_settings.png`
//
// Only hits are cached. A miss is retried on the next request because the
// asset may appear later in the same process.

use crate::scene::ImageHandle;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Where icon files come from
pub trait IconSource {
    /// Whether a file exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Load the image at `path`
    fn load(&self, path: &Path) -> Option<ImageHandle>;
}

/// Icon source backed by the local filesystem
#[derive(Debug, Clone, Default)]
pub struct FsIconSource;

impl IconSource for FsIconSource {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn load(&self, path: &Path) -> Option<ImageHandle> {
        if path.is_file() {
            Some(ImageHandle::new(path))
        } else {
            None
        }
    }
}

/// Primary file name for a symbolic icon name
pub fn primary_file_name(symbolic: &str) -> String {
    let stem = symbolic.strip_prefix("icon_").unwrap_or(symbolic);
    format!("{}-icon-2x.png", stem.replace('_', "-"))
}

/// Legacy file name for a symbolic icon name
pub fn legacy_file_name(symbolic: &str) -> String {
    format!("{}.png", symbolic)
}

/// Memoized symbolic-name -> image lookup
pub struct IconCache {
    dir: PathBuf,
    source: Box<dyn IconSource>,
    cache: HashMap<String, ImageHandle>,
}

impl IconCache {
    pub fn new(dir: impl Into<PathBuf>, source: Box<dyn IconSource>) -> Self {
        Self {
            dir: dir.into(),
            source,
            cache: HashMap::new(),
        }
    }

    /// Filesystem-backed cache rooted at `dir`
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(dir, Box::new(FsIconSource))
    }

    /// Resolve a symbolic icon name; `None` (with a warning) when missing
    pub fn resolve(&mut self, symbolic: &str) -> Option<ImageHandle> {
        if let Some(hit) = self.cache.get(symbolic) {
            return Some(hit.clone());
        }

        let primary = self.dir.join(primary_file_name(symbolic));
        let path = if self.source.exists(&primary) {
            primary
        } else {
            self.dir.join(legacy_file_name(symbolic))
        };

        match self.source.load(&path) {
            Some(image) => {
                debug!(icon = symbolic, path = %path.display(), "Loaded icon");
                self.cache.insert(symbolic.to_string(), image.clone());
                Some(image)
            }
            None => {
                warn!(icon = symbolic, path = %path.display(), "Could not load icon");
                None
            }
        }
    }

    /// Forget every cached icon (start of a build pass)
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}
