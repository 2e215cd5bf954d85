//! Draft storage keys and draft-guarded navigation.
//!
//! A stage form caches its unsubmitted state under
//! `progress-form-stage-<n>` and raises `progress-form-stage-<n>-unsaved`
//! to `"1"` while edits are pending. [`DraftGuard`] checks those keys
//! before leaving a page: the host first gets a cancelable
//! [`UNSAVED_NAVIGATION_EVENT`] so an in-page dialog can take over, and
//! otherwise a blocking confirmation decides.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use log::warn;
use serde::Serialize;

use crate::error::{ProgressError, Result};

/// Prefix shared by every draft key.
pub const DRAFT_KEY_PREFIX: &str = "progress-form-stage-";

/// Suffix of the unsaved-changes flag key.
pub const UNSAVED_SUFFIX: &str = "-unsaved";

/// Value of a raised unsaved flag.
pub const UNSAVED_FLAG: &str = "1";

/// Cancelable event dispatched before leaving a page with unsaved state.
pub const UNSAVED_NAVIGATION_EVENT: &str = "progress-draft:unsaved-navigation";

/// Confirmation shown when no listener takes over.
pub const DEFAULT_LEAVE_MESSAGE: &str =
    "You have unsaved progress on this form. Leave the page and discard it?";

/// Storage key of the draft payload for a stage.
pub fn draft_key(stage: u32) -> String {
    format!("{DRAFT_KEY_PREFIX}{stage}")
}

/// Storage key of the unsaved flag for a stage.
pub fn unsaved_key(stage: u32) -> String {
    format!("{DRAFT_KEY_PREFIX}{stage}{UNSAVED_SUFFIX}")
}

/// Stage number encoded in a draft payload key, if `key` is one.
pub fn stage_of_draft_key(key: &str) -> Option<u32> {
    key.strip_prefix(DRAFT_KEY_PREFIX)?.parse().ok()
}

/// Key/value storage holding drafts.
pub trait DraftStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
    fn keys(&self) -> Vec<String>;
}

/// In-memory storage, one per test or session.
#[derive(Debug, Clone, Default)]
pub struct MemoryDraftStorage {
    entries: BTreeMap<String, String>,
}

impl DraftStorage for MemoryDraftStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

/// Storage persisted as a JSON object in a single file.
#[derive(Debug, Clone)]
pub struct FileDraftStorage {
    path: PathBuf,
}

impl FileDraftStorage {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(ProgressError::FileSystem {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let text = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, text).map_err(|e| ProgressError::FileSystem {
            path: self.path.clone(),
            source: e,
        })
    }

    fn load_or_warn(&self) -> BTreeMap<String, String> {
        self.load().unwrap_or_else(|e| {
            warn!("Ignoring unreadable draft file {}: {e}", self.path.display());
            BTreeMap::new()
        })
    }
}

impl DraftStorage for FileDraftStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.load_or_warn().remove(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.load_or_warn().into_keys().collect()
    }
}

/// Payload of [`UNSAVED_NAVIGATION_EVENT`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnsavedNavigation {
    pub href: String,
    pub message: String,
}

/// Whether an in-page listener let the event through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Continue,
    /// A listener called `preventDefault` and handles the navigation itself
    Vetoed,
}

/// The page environment a guarded navigation runs in.
pub trait NavigationHost {
    /// Dispatches the cancelable unsaved-navigation event.
    fn dispatch(&mut self, event: &UnsavedNavigation) -> EventOutcome;

    /// Blocking yes/no confirmation.
    fn confirm(&mut self, message: &str) -> bool;

    /// Performs the navigation.
    fn navigate(&mut self, href: &str);
}

/// Result of a guarded navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    Navigated,
    /// An event listener took over
    Vetoed,
    /// The user declined the confirmation
    Declined,
}

/// Navigation wrapper that checks for unsaved drafts first.
#[derive(Debug, Clone)]
pub struct DraftGuard {
    pub unsaved_flag_key: Option<String>,
    pub draft_storage_key: Option<String>,
    pub message: String,
}

impl DraftGuard {
    /// Guard watching both keys of a stage form.
    pub fn for_stage(stage: u32) -> Self {
        Self {
            unsaved_flag_key: Some(unsaved_key(stage)),
            draft_storage_key: Some(draft_key(stage)),
            message: DEFAULT_LEAVE_MESSAGE.to_string(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// True if the flag is raised or a non-empty draft payload exists.
    pub fn has_unsaved<S: DraftStorage + ?Sized>(&self, storage: &S) -> bool {
        let flagged = self
            .unsaved_flag_key
            .as_deref()
            .and_then(|key| storage.get(key))
            .is_some_and(|value| value == UNSAVED_FLAG);

        let drafted = self
            .draft_storage_key
            .as_deref()
            .and_then(|key| storage.get(key))
            .is_some_and(|value| !value.trim().is_empty());

        flagged || drafted
    }

    /// Removes the watched keys from `storage`.
    pub fn discard<S: DraftStorage + ?Sized>(&self, storage: &mut S) -> Result<()> {
        for key in [&self.unsaved_flag_key, &self.draft_storage_key]
            .into_iter()
            .flatten()
        {
            storage.remove(key)?;
        }
        Ok(())
    }

    /// Navigates to `href`, asking first when unsaved state exists.
    pub fn navigate<S, H>(&self, href: &str, storage: &S, host: &mut H) -> NavigationOutcome
    where
        S: DraftStorage + ?Sized,
        H: NavigationHost + ?Sized,
    {
        if self.has_unsaved(storage) {
            let event = UnsavedNavigation {
                href: href.to_string(),
                message: self.message.clone(),
            };
            if host.dispatch(&event) == EventOutcome::Vetoed {
                return NavigationOutcome::Vetoed;
            }
            if !host.confirm(&self.message) {
                return NavigationOutcome::Declined;
            }
        }

        host.navigate(href);
        NavigationOutcome::Navigated
    }
}
