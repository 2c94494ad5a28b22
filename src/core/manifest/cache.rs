// ─── Pack list cache ───
// `<pack list>.cache` is the pack list with every identified query replaced
// by its Modrinth project id. When present it is read instead of the pack
// list, so later runs skip fuzzy search.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::error::{FetchError, FetchResult};

pub const CACHE_SUFFIX: &str = ".cache";

/// `packlist.txt` -> `packlist.txt.cache`
pub fn cache_path(manifest: &Path) -> PathBuf {
    let mut name: OsString = manifest.as_os_str().to_owned();
    name.push(CACHE_SUFFIX);
    PathBuf::from(name)
}

/// Where this run reads its pack list from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackSource {
    pub path: PathBuf,
    pub from_cache: bool,
    pub cache_path: PathBuf,
}

impl PackSource {
    /// Prefer the cache file; fall back to the pack list itself.
    pub fn locate(manifest: &Path) -> FetchResult<Self> {
        let cache = cache_path(manifest);
        if cache.is_file() {
            return Ok(Self {
                path: cache.clone(),
                from_cache: true,
                cache_path: cache,
            });
        }
        if manifest.is_file() {
            return Ok(Self {
                path: manifest.to_path_buf(),
                from_cache: false,
                cache_path: cache,
            });
        }
        Err(FetchError::ManifestMissing(manifest.to_path_buf()))
    }

    pub async fn read(&self) -> FetchResult<String> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FetchError::Io {
                path: self.path.clone(),
                source: e,
            })
    }

    pub async fn write_cache(&self, contents: &str) -> FetchResult<()> {
        tokio::fs::write(&self.cache_path, contents)
            .await
            .map_err(|e| FetchError::Io {
                path: self.cache_path.clone(),
                source: e,
            })?;
        debug!("Wrote cache {:?}", self.cache_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_path_appends_suffix() {
        assert_eq!(
            cache_path(Path::new("lists/packlist.txt")),
            PathBuf::from("lists/packlist.txt.cache")
        );
    }

    #[test]
    fn locate_prefers_cache() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("packlist.txt");
        std::fs::write(&manifest, "[paper]\nVault\n").unwrap();

        let source = PackSource::locate(&manifest).unwrap();
        assert!(!source.from_cache);
        assert_eq!(source.path, manifest);

        std::fs::write(cache_path(&manifest), "[paper]\nhXiWTbCL\n").unwrap();
        let source = PackSource::locate(&manifest).unwrap();
        assert!(source.from_cache);
        assert_eq!(source.path, cache_path(&manifest));
    }

    #[test]
    fn cache_alone_is_enough() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("packlist.txt");
        std::fs::write(cache_path(&manifest), "[paper]\n").unwrap();
        assert!(PackSource::locate(&manifest).unwrap().from_cache);
    }

    #[test]
    fn missing_everything_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("nope.txt");
        assert!(matches!(
            PackSource::locate(&manifest),
            Err(FetchError::ManifestMissing(_))
        ));
    }

    #[tokio::test]
    async fn read_and_write_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("packlist.txt");
        std::fs::write(&manifest, "[paper]\nVault\n").unwrap();

        let source = PackSource::locate(&manifest).unwrap();
        assert_eq!(source.read().await.unwrap(), "[paper]\nVault\n");

        source.write_cache("[paper]\nhXiWTbCL\n").await.unwrap();
        assert_eq!(
            std::fs::read_to_string(cache_path(&manifest)).unwrap(),
            "[paper]\nhXiWTbCL\n"
        );
    }
}
