//! Local preference persistence.
//!
//! One JSON file with two independent slots: the signed-in user profile
//! and the gallery layout. Saves are total replacements written
//! atomically (temp file + rename), last-write-wins. Both slots are
//! exposed as watch channels so front-ends observe the current value
//! immediately and every subsequent change.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::{watch, Mutex};

use crate::models::{LayoutMode, UserProfile};
use crate::Result;

const PREFS_FILE_NAME: &str = "preferences.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct PrefsFile {
    #[serde(default)]
    profile: UserProfile,
    #[serde(default)]
    layout: LayoutMode,
}

/// File-backed store for the user profile and layout preference
pub struct PreferenceStore {
    path: PathBuf,
    write_lock: Mutex<()>,
    profile_tx: watch::Sender<UserProfile>,
    layout_tx: watch::Sender<LayoutMode>,
}

impl PreferenceStore {
    /// Open the store at the platform default location.
    pub fn open_default() -> Result<Self> {
        Self::open(default_prefs_path())
    }

    /// Open a store backed by the given file path.
    ///
    /// A missing file yields defaults; the file is created on first save.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let initial = load_prefs_file(&path)?;
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
            profile_tx: watch::channel(initial.profile).0,
            layout_tx: watch::channel(initial.layout).0,
        })
    }

    /// Current profile snapshot.
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        self.profile_tx.borrow().clone()
    }

    /// Observe the profile: yields the current value immediately and
    /// notifies on every subsequent save.
    #[must_use]
    pub fn watch_profile(&self) -> watch::Receiver<UserProfile> {
        self.profile_tx.subscribe()
    }

    /// Replace the stored profile and notify observers once the write
    /// has landed on disk.
    pub async fn save_profile(&self, profile: UserProfile) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.persist(&PrefsFile {
            profile: profile.clone(),
            layout: *self.layout_tx.borrow(),
        })?;
        self.profile_tx.send_replace(profile);
        Ok(())
    }

    /// Sign out: replace the profile with the all-empty default.
    pub async fn clear_profile(&self) -> Result<()> {
        self.save_profile(UserProfile::default()).await
    }

    /// Current layout snapshot.
    #[must_use]
    pub fn layout(&self) -> LayoutMode {
        *self.layout_tx.borrow()
    }

    /// Observe the layout preference, same contract as [`watch_profile`].
    ///
    /// [`watch_profile`]: Self::watch_profile
    #[must_use]
    pub fn watch_layout(&self) -> watch::Receiver<LayoutMode> {
        self.layout_tx.subscribe()
    }

    /// Replace the stored layout preference and notify observers.
    pub async fn save_layout(&self, layout: LayoutMode) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.persist(&PrefsFile {
            profile: self.profile_tx.borrow().clone(),
            layout,
        })?;
        self.layout_tx.send_replace(layout);
        Ok(())
    }

    fn persist(&self, contents: &PrefsFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let serialized = serde_json::to_string_pretty(contents)?;
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, serialized)?;
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

fn load_prefs_file(path: &Path) -> Result<PrefsFile> {
    if !path.exists() {
        return Ok(PrefsFile::default());
    }
    let raw = std::fs::read_to_string(path)?;
    match serde_json::from_str(&raw) {
        Ok(parsed) => Ok(parsed),
        Err(error) => {
            tracing::warn!(
                "Ignoring unreadable preferences file {}: {error}",
                path.display()
            );
            Ok(PrefsFile::default())
        }
    }
}

/// Platform default preferences path.
#[must_use]
pub fn default_prefs_path() -> PathBuf {
    dirs::config_dir()
        .or_else(dirs::data_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("paddock")
        .join(PREFS_FILE_NAME)
}
