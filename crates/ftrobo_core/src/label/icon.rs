//! Icon images decoded in the background.
//!
//! # Invariants
//! - `widget()` never blocks and always returns a usable widget.
//! - The image is published at most once; later completions are ignored.

use crate::label::widget::{IconImage, IconWidget};
use log::{debug, warn};
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Shared slot for one asynchronously decoded icon.
///
/// Clones share the same slot, so a factory closure holding a clone sees the
/// image as soon as the decoder publishes it.
#[derive(Debug, Clone)]
pub struct IconResource {
    name: Arc<str>,
    image: Arc<OnceCell<IconImage>>,
}

impl IconResource {
    pub fn new(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            image: Arc::new(OnceCell::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_loaded(&self) -> bool {
        self.image.get().is_some()
    }

    /// Publishes the decoded image. Returns `false` if one was already set.
    pub fn complete(&self, image: IconImage) -> bool {
        match self.image.set(image) {
            Ok(()) => {
                debug!(
                    "event=icon_loaded module=label status=ok name={}",
                    self.name
                );
                true
            }
            Err(_) => {
                warn!(
                    "event=icon_loaded module=label status=error reason=already_loaded name={}",
                    self.name
                );
                false
            }
        }
    }

    /// Current widget: text placeholder until the image is decoded.
    pub fn widget(&self) -> IconWidget {
        IconWidget {
            name: self.name.to_string(),
            image: self.image.get().cloned(),
        }
    }
}
