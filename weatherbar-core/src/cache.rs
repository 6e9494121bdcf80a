//! On-disk cache: the verbatim per-provider forecast plus the single shared
//! summary file the status-bar widget reads.

use directories::ProjectDirs;
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{RawForecast, Summary};
use crate::provider::ProviderId;

/// Handle to the cache directory. Construction is the one place the
/// directory gets created; every other method assumes it exists.
#[derive(Debug, Clone)]
pub struct Cache {
    dir: PathBuf,
}

impl Cache {
    /// Open the user-scoped cache directory, creating it if needed.
    pub fn open() -> Result<Self> {
        let dirs = ProjectDirs::from("dev", "weatherbar", "weatherbar").ok_or_else(|| {
            Error::Config("could not determine platform cache directory".to_string())
        })?;

        Self::at(dirs.cache_dir())
    }

    /// Open a cache rooted at an explicit directory, creating it if needed.
    pub fn at(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Path of the raw cache file for a provider.
    pub fn raw_path(&self, id: ProviderId) -> PathBuf {
        self.dir.join(format!("weather-{id}.json"))
    }

    /// Path of the shared summary file.
    pub fn summary_path(&self) -> PathBuf {
        self.dir.join("weather.json")
    }

    /// Persist a provider's response verbatim, replacing any previous one.
    pub fn store_raw(&self, id: ProviderId, raw: &RawForecast) -> Result<PathBuf> {
        let path = self.raw_path(id);
        write_json(&path, raw)?;
        debug!(provider = %id, path = %path.display(), "stored raw forecast");
        Ok(path)
    }

    /// Read back the cached response for a provider.
    pub fn load_raw(&self, id: ProviderId) -> Result<RawForecast> {
        let path = self.raw_path(id);

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::CacheMiss(path));
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&contents).map_err(|e| {
            Error::Parse(format!("cached forecast at {} is malformed: {e}", path.display()))
        })
    }

    /// Write the summary record, replacing any previous one.
    pub fn store_summary(&self, summary: &Summary) -> Result<PathBuf> {
        let path = self.summary_path();
        write_json(&path, summary)?;
        debug!(path = %path.display(), days = summary.days.len(), "stored summary");
        Ok(path)
    }
}

/// Write to a sibling temp file and rename, so the widget never reads a
/// partial document.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)
        .map_err(|e| Error::Parse(format!("failed to serialize {}: {e}", path.display())))?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;

    Ok(())
}
