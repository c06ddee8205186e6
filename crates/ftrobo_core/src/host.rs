//! Host editor collaborator contracts and their wrappers.
//!
//! # Responsibility
//! - Declare the Host surfaces this extension consumes.
//! - Wrap each Host surface once so the Host original keeps working and the
//!   extension only augments its results.
//!
//! # Invariants
//! - Wrappers call through to the Host; they never replace Host behavior for
//!   blocks, tokens or locales the extension does not own.

use crate::blocks::registry::BlockRegistry;
use crate::i18n::load::{LoadStatus, LocaleLoad};
use crate::i18n::overlay::{locale_from_file_name, OverlayError, TranslationOverlay};
use crate::label::factory::{LabelPartFactory, ResolvedPart};
use crate::label::widget::{MultiSlot, WidgetHandle};
use crate::model::block::{BlockImplementation, Category, RenderSpec};
use log::{debug, trace, warn};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

/// Selector-keyed implementation table of one Host execution context.
pub trait DispatchTable {
    fn bind(&mut self, selector: String, implementation: BlockImplementation);
}

impl DispatchTable for BTreeMap<String, BlockImplementation> {
    fn bind(&mut self, selector: String, implementation: BlockImplementation) {
        self.insert(selector, implementation);
    }
}

impl DispatchTable for HashMap<String, BlockImplementation> {
    fn bind(&mut self, selector: String, implementation: BlockImplementation) {
        self.insert(selector, implementation);
    }
}

/// Live Host translation dictionary for one locale.
pub trait LocaleDictionary {
    fn entry(&self, key: &str) -> Option<&str>;
    fn set_entry(&mut self, key: &str, value: &str);
}

impl LocaleDictionary for BTreeMap<String, String> {
    fn entry(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }

    fn set_entry(&mut self, key: &str, value: &str) {
        self.insert(key.to_string(), value.to_string());
    }
}

impl LocaleDictionary for HashMap<String, String> {
    fn entry(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }

    fn set_entry(&mut self, key: &str, value: &str) {
        self.insert(key.to_string(), value.to_string());
    }
}

/// Completion callback the Host registers for a locale file.
///
/// Receives the Host dictionary for the locale after the base file merged.
pub type LocaleCallback = Box<dyn FnOnce(&mut dyn LocaleDictionary)>;

/// Host asynchronous locale file loader.
pub trait HostLocaleLoader {
    /// Starts loading `file_name`; `on_loaded` runs once the file has merged.
    fn load(&mut self, file_name: &str, on_loaded: LocaleCallback);
}

/// Locale loader that chains overlay application in front of Host callbacks.
pub struct OverlayLoader<L> {
    inner: L,
    overlays: Arc<TranslationOverlay>,
}

impl<L: HostLocaleLoader> OverlayLoader<L> {
    pub fn new(inner: L, overlays: Arc<TranslationOverlay>) -> Self {
        Self { inner, overlays }
    }

    /// Forwards the request to the Host with a re-chained completion callback.
    ///
    /// # Errors
    /// - Returns an error when `file_name` carries no two-letter locale code.
    ///   The Host still loads the file with its own callback, untouched.
    pub fn load(
        &mut self,
        file_name: &str,
        on_loaded: LocaleCallback,
    ) -> Result<LoadStatus, OverlayError> {
        let locale = match locale_from_file_name(file_name) {
            Ok(locale) => locale,
            Err(err) => {
                warn!(
                    "event=locale_load_begin module=host status=error reason=no_locale_code file={}",
                    file_name
                );
                self.inner.load(file_name, on_loaded);
                return Err(err);
            }
        };
        let load = LocaleLoad::begin(&locale, self.overlays.get(&locale));
        let status = load.status();
        debug!(
            "event=locale_load_begin module=host status=ok locale={} file={}",
            locale, file_name
        );
        self.inner.load(
            file_name,
            Box::new(move |dictionary: &mut dyn LocaleDictionary| {
                load.complete(dictionary, on_loaded)
            }),
        );
        Ok(status)
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut L {
        &mut self.inner
    }

    pub fn into_inner(self) -> L {
        self.inner
    }
}

/// Entry of a palette column.
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteItem<B> {
    Block(B),
    Separator,
}

/// Host per-category palette builder.
pub trait HostPalette {
    type Block;

    /// Host native palette entries for `category`.
    fn native_blocks(&self, category: Category) -> Vec<PaletteItem<Self::Block>>;

    /// Builds a visual block from a contributed render spec.
    fn instantiate(&self, spec: &RenderSpec) -> Self::Block;

    /// Host suppression policy for a selector.
    fn is_hidden(&self, selector: &str) -> bool;
}

/// Palette builder that appends extension blocks after the Host's own.
pub struct ComposedPalette<'a, H> {
    host: H,
    registry: &'a BlockRegistry,
    hidden: &'a BTreeSet<String>,
}

impl<'a, H: HostPalette> ComposedPalette<'a, H> {
    /// `hidden` holds selectors the extension suppresses on top of the Host policy.
    pub fn new(host: H, registry: &'a BlockRegistry, hidden: &'a BTreeSet<String>) -> Self {
        Self {
            host,
            registry,
            hidden,
        }
    }

    /// Host blocks, then a separator and the visible contributions.
    pub fn blocks_for(&self, category: Category) -> Vec<PaletteItem<H::Block>> {
        let mut items = self.host.native_blocks(category);
        let contributions = self.registry.contributions_for(category, |selector| {
            self.hidden.contains(selector) || self.host.is_hidden(selector)
        });
        if contributions.is_empty() {
            return items;
        }

        trace!(
            "event=palette_build module=host status=ok category={} contributed={}",
            category,
            contributions.len()
        );
        items.push(PaletteItem::Separator);
        items.extend(
            contributions
                .iter()
                .map(|spec| PaletteItem::Block(self.host.instantiate(spec))),
        );
        items
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}

/// Host generic parameter widget resolver.
pub trait HostLabelParts {
    type Part: From<WidgetHandle>;

    fn label_part(&self, token: &str) -> Option<Self::Part>;
}

/// Widget resolver that serves extension tokens and defers the rest.
pub struct ComposedLabelParts<'a, H> {
    host: H,
    factory: &'a LabelPartFactory,
}

impl<'a, H: HostLabelParts> ComposedLabelParts<'a, H> {
    pub fn new(host: H, factory: &'a LabelPartFactory) -> Self {
        Self { host, factory }
    }

    pub fn label_part(&self, token: &str) -> Option<H::Part> {
        match self.factory.resolve(token) {
            ResolvedPart::Alias(target) => self.host.label_part(&target),
            ResolvedPart::Widget(build) => Some(H::Part::from(build())),
            ResolvedPart::Unhandled => self.host.label_part(token),
        }
    }

    /// Parts for the initial slots of a multi-slot widget.
    pub fn slot_parts(&self, slots: &MultiSlot) -> Vec<Option<H::Part>> {
        (0..slots.initial_slots)
            .map(|_| self.label_part(&slots.slot_token))
            .collect()
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}

/// Host execution context owning a dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionContext {
    Sprite,
    Stage,
}

impl ExecutionContext {
    pub const ALL: [ExecutionContext; 2] = [Self::Sprite, Self::Stage];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sprite => "sprite",
            Self::Stage => "stage",
        }
    }
}

/// Host editor surfaces touched during bootstrap.
pub trait HostEditor {
    type Dispatch: DispatchTable;

    fn dispatch_table(&mut self, context: ExecutionContext) -> &mut Self::Dispatch;

    /// Starts the Host event loop.
    fn start_run_loop(&mut self);
}
