//! # Path Resolution Module
//!
//! Centralizza la logica di calcolo dei path: espansione di `~`, risoluzione
//! delle directory e path di destinazione (stesso nome file nella cartella di output).

use anyhow::Result;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Utility per calcolare i path in modo centralizzato
pub struct PathResolver;

impl PathResolver {
    /// Replace a leading `~` with the user's home directory
    pub fn expand_home(path: &Path) -> PathBuf {
        let mut components = path.components();
        match components.next() {
            Some(Component::Normal(first)) if first == "~" => match dirs::home_dir() {
                Some(home) => home.join(components.as_path()),
                None => path.to_path_buf(),
            },
            _ => path.to_path_buf(),
        }
    }

    /// Expand `~` and make the path absolute, canonicalizing when it exists
    pub fn resolve(path: &Path) -> PathBuf {
        let expanded = Self::expand_home(path);
        expanded
            .canonicalize()
            .or_else(|_| std::path::absolute(&expanded))
            .unwrap_or(expanded)
    }

    /// Destination for `source`: same file name inside `output_dir`
    pub fn destination_for(source: &Path, output_dir: &Path) -> Result<PathBuf> {
        let file_name = source
            .file_name()
            .ok_or_else(|| anyhow::anyhow!("Invalid file name: {}", source.display()))?;
        Ok(output_dir.join(file_name))
    }

    /// Create `dir` and its parents if needed, returning the resolved path
    pub async fn ensure_dir(dir: &Path) -> Result<PathBuf> {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create output directory {}: {}", dir.display(), e))?;

        let resolved = tokio::fs::canonicalize(dir).await?;
        debug!("Output directory: {}", resolved.display());
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_expand_home() {
        let plain = Path::new("/tmp/photos");
        assert_eq!(PathResolver::expand_home(plain), plain);

        let relative = Path::new("photos/~");
        assert_eq!(PathResolver::expand_home(relative), relative);

        if let Some(home) = dirs::home_dir() {
            assert_eq!(PathResolver::expand_home(Path::new("~/pics")), home.join("pics"));
            assert_eq!(PathResolver::expand_home(Path::new("~")), home);
        }
    }

    #[test]
    fn test_resolve_is_absolute() {
        assert!(PathResolver::resolve(Path::new("does/not/exist")).is_absolute());

        let temp_dir = TempDir::new().unwrap();
        let resolved = PathResolver::resolve(temp_dir.path());
        assert_eq!(resolved, temp_dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_destination_preserves_name_and_case() {
        let dest = PathResolver::destination_for(Path::new("/in/Photo.JPG"), Path::new("/out")).unwrap();
        assert_eq!(dest, PathBuf::from("/out/Photo.JPG"));

        assert!(PathResolver::destination_for(Path::new("/"), Path::new("/out")).is_err());
    }

    #[tokio::test]
    async fn test_ensure_dir_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b").join("c");

        let resolved = PathResolver::ensure_dir(&nested).await.unwrap();

        assert!(nested.is_dir());
        assert_eq!(resolved, nested.canonicalize().unwrap());
        // Idempotent
        assert!(PathResolver::ensure_dir(&nested).await.is_ok());
    }
}
