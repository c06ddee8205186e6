//! Locale load sequencing.
//!
//! One `LocaleLoad` tracks one Host locale request:
//! `Idle -> BaseLoading -> BaseLoaded -> OverlayApplied -> HostNotified`.
//!
//! # Invariants
//! - Overlay entries are written only inside `complete`, which the Host calls
//!   after merging its base dictionary.
//! - `complete` consumes the load, so the Host callback runs at most once.
//! - Without an overlay, `BaseLoaded` goes straight to `HostNotified`.

use crate::host::{LocaleCallback, LocaleDictionary};
use crate::i18n::overlay::LocaleOverlay;
use log::{debug, info};
use std::cell::Cell;
use std::fmt::{Display, Formatter};
use std::rc::Rc;
use std::sync::Arc;

/// Stage of one locale request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    BaseLoading,
    BaseLoaded,
    OverlayApplied,
    HostNotified,
}

impl LoadState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::BaseLoading => "base_loading",
            Self::BaseLoaded => "base_loaded",
            Self::OverlayApplied => "overlay_applied",
            Self::HostNotified => "host_notified",
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Self::HostNotified
    }
}

impl Display for LoadState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only view of a locale request, shared with the pending load.
#[derive(Debug, Clone)]
pub struct LoadStatus {
    locale: Rc<str>,
    state: Rc<Cell<LoadState>>,
    overlay_writes: Rc<Cell<usize>>,
}

impl LoadStatus {
    fn new(locale: &str) -> Self {
        Self {
            locale: Rc::from(locale),
            state: Rc::new(Cell::new(LoadState::Idle)),
            overlay_writes: Rc::new(Cell::new(0)),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn state(&self) -> LoadState {
        self.state.get()
    }

    /// Entries written into the Host dictionary by this request.
    pub fn overlay_writes(&self) -> usize {
        self.overlay_writes.get()
    }

    fn advance(&self, next: LoadState) {
        debug!(
            "event=locale_load_transition module=i18n status=ok locale={} from={} to={}",
            self.locale,
            self.state.get(),
            next
        );
        self.state.set(next);
    }
}

/// Pending locale request waiting for the Host base dictionary.
#[derive(Debug)]
pub struct LocaleLoad {
    overlay: Option<Arc<LocaleOverlay>>,
    status: LoadStatus,
}

impl LocaleLoad {
    /// Starts tracking a request the Host has just begun loading.
    pub fn begin(locale: &str, overlay: Option<Arc<LocaleOverlay>>) -> Self {
        let status = LoadStatus::new(locale);
        status.advance(LoadState::BaseLoading);
        Self { overlay, status }
    }

    pub fn status(&self) -> LoadStatus {
        self.status.clone()
    }

    /// Runs once the Host has merged its base dictionary for this locale.
    ///
    /// Applies the overlay, then hands `dictionary` to the Host's own callback.
    pub fn complete(self, dictionary: &mut dyn LocaleDictionary, host_callback: LocaleCallback) {
        self.status.advance(LoadState::BaseLoaded);

        if let Some(overlay) = &self.overlay {
            let written = overlay.apply(&mut *dictionary);
            self.status.overlay_writes.set(written);
            self.status.advance(LoadState::OverlayApplied);
        }

        host_callback(&mut *dictionary);
        self.status.advance(LoadState::HostNotified);
        info!(
            "event=locale_load module=i18n status=ok locale={} overlay_writes={}",
            self.status.locale,
            self.status.overlay_writes()
        );
    }
}
