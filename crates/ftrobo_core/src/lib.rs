//! Robotics TXT block extension for a visual block editor Host.
//! This crate owns block registration, custom parameter widgets and
//! translation overlays; the Host owns rendering, execution and locale files.

pub mod blocks;
pub mod config;
pub mod extension;
pub mod host;
pub mod i18n;
pub mod label;
pub mod logging;
pub mod model;

pub use blocks::registry::{BlockRegistry, RegistryError};
pub use config::{ConfigError, ExtensionConfig};
pub use extension::{bootstrap, extension, init_extension, Extension, ExtensionError};
pub use host::{
    ComposedLabelParts, ComposedPalette, DispatchTable, ExecutionContext, HostEditor,
    HostLabelParts, HostLocaleLoader, HostPalette, LocaleCallback, LocaleDictionary,
    OverlayLoader, PaletteItem,
};
pub use i18n::load::{LoadState, LoadStatus, LocaleLoad};
pub use i18n::overlay::{locale_from_file_name, LocaleOverlay, OverlayError, TranslationOverlay};
pub use label::factory::{
    LabelPartError, LabelPartFactory, LabelPartKind, LabelPartRule, ResolvedPart, WidgetFactory,
};
pub use label::icon::IconResource;
pub use label::widget::{
    ChoiceValue, ChoiceWidget, IconImage, IconWidget, MultiSlot, NumericInput, WidgetHandle,
};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::block::{
    not_implemented, BlockCall, BlockDescriptor, BlockError, BlockImplementation, BlockKind,
    BlockValue, Category, ParamValue, RenderSpec,
};

/// Returns the extension crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
