use crate::AssetError;
use std::path::{Component, Path, PathBuf};

/// Top-level content directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Shader,
    Texture,
}

impl AssetKind {
    pub fn dir(self) -> &'static str {
        match self {
            Self::Shader => "shaders",
            Self::Texture => "textures",
        }
    }
}

/// A validated path inside the virtual filesystem, e.g. `textures/container.jpg`.
///
/// Always relative, never contains `..`, so it cannot escape a mounted root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetPath(String);

impl AssetPath {
    pub fn new(path: impl Into<String>) -> Result<Self, AssetError> {
        let path = path.into();
        let normalized = path.replace('\\', "/");
        let trimmed = normalized.trim_start_matches('/');
        if trimmed.is_empty() {
            return Err(AssetError::InvalidPath(path));
        }
        let escapes = Path::new(trimmed)
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(AssetError::InvalidPath(path));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn of_kind(kind: AssetKind, name: &str) -> Result<Self, AssetError> {
        Self::new(format!("{}/{}", kind.dir(), name))
    }

    pub fn shader(name: &str) -> Result<Self, AssetError> {
        Self::of_kind(AssetKind::Shader, name)
    }

    pub fn texture(name: &str) -> Result<Self, AssetError> {
        Self::of_kind(AssetKind::Texture, name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/{}", self.0)
    }
}

/// Read-only virtual filesystem over a stack of mounted directories.
///
/// Lookups search the most recently mounted root first.
#[derive(Debug, Clone, Default)]
pub struct AssetFs {
    roots: Vec<PathBuf>,
}

impl AssetFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount `root` at the top of the search order.
    pub fn mount(&mut self, root: impl AsRef<Path>) -> Result<(), AssetError> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(AssetError::MountMissing(root.to_path_buf()));
        }
        tracing::debug!("mounted content root '{}'", root.display());
        self.roots.insert(0, root.to_path_buf());
        Ok(())
    }

    /// Remove a previously mounted root. Returns whether it was mounted.
    pub fn unmount(&mut self, root: impl AsRef<Path>) -> bool {
        let before = self.roots.len();
        self.roots.retain(|r| r != root.as_ref());
        before != self.roots.len()
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Build a filesystem from an explicit root, or the first existing of
    /// `<exe dir>/contents` and `./contents`. With no candidate the
    /// filesystem is returned empty and every lookup reports `NotFound`.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, AssetError> {
        let mut fs = Self::new();
        if let Some(root) = explicit {
            fs.mount(root)?;
            return Ok(fs);
        }

        let mut candidates = Vec::new();
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                candidates.push(dir.join("contents"));
            }
        }
        candidates.push(PathBuf::from("contents"));

        match candidates.iter().find(|c| c.is_dir()) {
            Some(root) => fs.mount(root)?,
            None => tracing::warn!(
                "no content root found (tried {}); built-in fallbacks will be used",
                candidates
                    .iter()
                    .map(|c| c.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
        Ok(fs)
    }

    /// Host path of `path` in the first root that contains it.
    pub fn resolve(&self, path: &AssetPath) -> Result<PathBuf, AssetError> {
        self.roots
            .iter()
            .map(|root| root.join(path.as_str()))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| AssetError::NotFound(path.to_string()))
    }

    pub fn exists(&self, path: &AssetPath) -> bool {
        self.resolve(path).is_ok()
    }

    pub fn read_bytes(&self, path: &AssetPath) -> Result<Vec<u8>, AssetError> {
        let host = self.resolve(path)?;
        let bytes = std::fs::read(&host)?;
        tracing::debug!("read {} ({} bytes)", path, bytes.len());
        Ok(bytes)
    }

    pub fn read_string(&self, path: &AssetPath) -> Result<String, AssetError> {
        let host = self.resolve(path)?;
        Ok(std::fs::read_to_string(host)?)
    }
}
