//! One-time extension initialization and Host bootstrap.
//!
//! # Responsibility
//! - Build the block registry, label part table and translation overlays
//!   from configuration exactly once.
//! - Wire the extension into the Host before its first palette build.
//!
//! # Invariants
//! - The extension is immutable after `initialize`.
//! - Every `%` placeholder of every block is resolvable by the Host or by
//!   the label part table.
//! - Process-wide initialization is idempotent for the same configuration and
//!   rejects a different one.

use crate::blocks::catalog::builtin_blocks;
use crate::blocks::registry::{BlockRegistry, RegistryError};
use crate::blocks::template::{is_host_standard_token, placeholders};
use crate::config::{ConfigError, ExtensionConfig};
use crate::host::{
    ComposedLabelParts, ComposedPalette, DispatchTable, ExecutionContext, HostEditor,
    HostLabelParts, HostLocaleLoader, HostPalette, OverlayLoader,
};
use crate::i18n::catalog::builtin_overlays;
use crate::i18n::overlay::{LocaleOverlay, OverlayError, TranslationOverlay};
use crate::label::catalog::builtin_label_parts;
use crate::label::factory::{LabelPartError, LabelPartFactory, LabelPartKind, LabelPartRule};
use crate::label::icon::IconResource;
use crate::label::widget::WidgetHandle;
use crate::model::block::BlockDescriptor;
use log::{error, info};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

static EXTENSION: OnceCell<Extension> = OnceCell::new();

/// Fully configured extension.
pub struct Extension {
    config: ExtensionConfig,
    blocks: BlockRegistry,
    label_parts: LabelPartFactory,
    overlays: Arc<TranslationOverlay>,
    logo: IconResource,
}

impl Extension {
    /// Builds the extension with the built-in block set, tokens and overlays.
    pub fn initialize(config: ExtensionConfig) -> Result<Self, ExtensionError> {
        config.validate()?;
        let logo = IconResource::new(&config.short_name);
        let rules = builtin_label_parts(&config.marker_prefix, &logo);
        let overlays = builtin_overlays(&config.marker_prefix)?;
        Self::assemble(config, builtin_blocks(), rules, overlays, logo)
    }

    /// Builds the extension from caller-provided parts.
    pub fn from_parts(
        config: ExtensionConfig,
        blocks: Vec<BlockDescriptor>,
        rules: Vec<LabelPartRule>,
        overlays: Vec<LocaleOverlay>,
    ) -> Result<Self, ExtensionError> {
        config.validate()?;
        let logo = IconResource::new(&config.short_name);
        Self::assemble(config, blocks, rules, overlays, logo)
    }

    fn assemble(
        config: ExtensionConfig,
        blocks: Vec<BlockDescriptor>,
        rules: Vec<LabelPartRule>,
        overlays: Vec<LocaleOverlay>,
        logo: IconResource,
    ) -> Result<Self, ExtensionError> {
        let mut label_parts = LabelPartFactory::new();
        label_parts.register_all(rules)?;

        let mut registry = BlockRegistry::new(&config.short_name, &config.marker_prefix);
        registry.register_all(blocks)?;
        check_tokens(&registry, &label_parts)?;

        let mut translations = TranslationOverlay::new();
        for overlay in overlays {
            translations.register(overlay);
        }

        info!(
            "event=extension_init module=extension status=ok namespace={} blocks={} tokens={} locales={}",
            config.short_name,
            registry.len(),
            label_parts.len(),
            translations.locales().join(",")
        );
        Ok(Self {
            config,
            blocks: registry,
            label_parts,
            overlays: Arc::new(translations),
            logo,
        })
    }

    pub fn config(&self) -> &ExtensionConfig {
        &self.config
    }

    pub fn blocks(&self) -> &BlockRegistry {
        &self.blocks
    }

    pub fn label_parts(&self) -> &LabelPartFactory {
        &self.label_parts
    }

    pub fn overlays(&self) -> &TranslationOverlay {
        &self.overlays
    }

    /// Logo resource; the embedding app publishes the decoded image here.
    pub fn logo(&self) -> &IconResource {
        &self.logo
    }

    /// Wraps the Host palette builder.
    pub fn palette<H: HostPalette>(&self, host: H) -> ComposedPalette<'_, H> {
        ComposedPalette::new(host, &self.blocks, &self.config.hidden_selectors)
    }

    /// Wraps the Host parameter widget resolver.
    pub fn label_part_resolver<H: HostLabelParts>(&self, host: H) -> ComposedLabelParts<'_, H> {
        ComposedLabelParts::new(host, &self.label_parts)
    }

    /// Wraps the Host locale loader.
    pub fn locale_loader<L: HostLocaleLoader>(&self, host: L) -> OverlayLoader<L> {
        OverlayLoader::new(host, self.overlays.clone())
    }

    pub fn bind_implementations(&self, sink: &mut impl DispatchTable) {
        self.blocks.bind_implementations(sink);
    }
}

fn check_tokens(
    registry: &BlockRegistry,
    label_parts: &LabelPartFactory,
) -> Result<(), ExtensionError> {
    for descriptor in registry.descriptors() {
        let unresolved = placeholders(&descriptor.spec_template)
            .into_iter()
            .find(|token| !is_host_standard_token(token) && !label_parts.contains(token));
        if let Some(token) = unresolved {
            return Err(ExtensionError::UnresolvedToken {
                block_id: descriptor.id.clone(),
                token: token.to_string(),
            });
        }
    }
    for (token, part) in label_parts.rules() {
        let LabelPartKind::WidgetFactory(build) = part else {
            continue;
        };
        if let WidgetHandle::MultiSlot(slots) = build() {
            let slot_token = slots.slot_token.as_str();
            if !is_host_standard_token(slot_token) && !label_parts.contains(slot_token) {
                return Err(ExtensionError::UnresolvedToken {
                    block_id: token.to_string(),
                    token: slots.slot_token,
                });
            }
        }
    }
    if !label_parts.contains(registry.marker_prefix()) {
        return Err(ExtensionError::MissingMarkerSymbol(
            registry.marker_prefix().to_string(),
        ));
    }
    Ok(())
}

/// Initializes the process-wide extension once.
///
/// # Invariants
/// - Repeated calls with an equal configuration return the same instance.
/// - A different configuration after initialization is rejected.
pub fn init_extension(config: ExtensionConfig) -> Result<&'static Extension, ExtensionError> {
    if let Some(existing) = EXTENSION.get() {
        if existing.config == config {
            return Ok(existing);
        }
        error!("event=extension_init module=extension status=error reason=already_initialized");
        return Err(ExtensionError::AlreadyInitialized);
    }

    let extension = EXTENSION.get_or_try_init(|| Extension::initialize(config.clone()))?;
    if extension.config != config {
        return Err(ExtensionError::AlreadyInitialized);
    }
    Ok(extension)
}

/// Returns the process-wide extension, if initialized.
pub fn extension() -> Option<&'static Extension> {
    EXTENSION.get()
}

/// Binds implementations into every Host execution context, then starts the
/// Host run loop.
pub fn bootstrap<H: HostEditor>(extension: &Extension, host: &mut H) {
    for context in ExecutionContext::ALL {
        extension.bind_implementations(host.dispatch_table(context));
        info!(
            "event=dispatch_bind module=extension status=ok context={}",
            context.as_str()
        );
    }
    host.start_run_loop();
}

/// Initialization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionError {
    Config(ConfigError),
    Registry(RegistryError),
    LabelPart(LabelPartError),
    Overlay(OverlayError),
    /// A token neither the Host nor the label part table renders. `block_id`
    /// names the block, or the multi-slot token, that references it.
    UnresolvedToken { block_id: String, token: String },
    MissingMarkerSymbol(String),
    AlreadyInitialized,
}

impl Display for ExtensionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid extension config: {err}"),
            Self::Registry(err) => write!(f, "block registration failed: {err}"),
            Self::LabelPart(err) => write!(f, "label part registration failed: {err}"),
            Self::Overlay(err) => write!(f, "translation overlay failed: {err}"),
            Self::UnresolvedToken { block_id, token } => {
                write!(f, "block {block_id} uses unresolved token {token}")
            }
            Self::MissingMarkerSymbol(token) => {
                write!(f, "marker symbol {token} has no label part")
            }
            Self::AlreadyInitialized => {
                write!(f, "extension already initialized with a different config")
            }
        }
    }
}

impl Error for ExtensionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Registry(err) => Some(err),
            Self::LabelPart(err) => Some(err),
            Self::Overlay(err) => Some(err),
            Self::UnresolvedToken { .. }
            | Self::MissingMarkerSymbol(_)
            | Self::AlreadyInitialized => None,
        }
    }
}

impl From<ConfigError> for ExtensionError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<RegistryError> for ExtensionError {
    fn from(value: RegistryError) -> Self {
        Self::Registry(value)
    }
}

impl From<LabelPartError> for ExtensionError {
    fn from(value: LabelPartError) -> Self {
        Self::LabelPart(value)
    }
}

impl From<OverlayError> for ExtensionError {
    fn from(value: OverlayError) -> Self {
        Self::Overlay(value)
    }
}
