//! Block descriptor domain model.
//!
//! # Responsibility
//! - Define the declarative record for one contributed block.
//! - Define the render projection handed to the Host palette builder.
//!
//! # Invariants
//! - `id` is local to this extension; it is namespaced before any Host exposure.
//! - `default_parameter_values` is positionally aligned to template placeholders.
//! - Descriptors are immutable after registration.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

/// Shape of a contributed block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// Statement block with no value.
    Command,
    /// Boolean reporter.
    Predicate,
    /// Value reporter.
    Reporter,
}

impl BlockKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Command => "command",
            Self::Predicate => "predicate",
            Self::Reporter => "reporter",
        }
    }
}

/// Host palette categories. The set is fixed by the Host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Motion,
    Looks,
    Sound,
    Pen,
    Control,
    Sensing,
    Operators,
    Variables,
    Lists,
    Other,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Self::Motion,
        Self::Looks,
        Self::Sound,
        Self::Pen,
        Self::Control,
        Self::Sensing,
        Self::Operators,
        Self::Variables,
        Self::Lists,
        Self::Other,
    ];

    /// Stable lowercase name used by the Host.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Motion => "motion",
            Self::Looks => "looks",
            Self::Sound => "sound",
            Self::Pen => "pen",
            Self::Control => "control",
            Self::Sensing => "sensing",
            Self::Operators => "operators",
            Self::Variables => "variables",
            Self::Lists => "lists",
            Self::Other => "other",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default value for one parameter slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Text(String),
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Value produced by a reporter or predicate implementation.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockValue {
    Nothing,
    Bool(bool),
    Number(f64),
    Text(String),
}

/// Execution failure raised by a block implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockError {
    /// Device control is not wired up for this selector.
    NotImplemented(String),
}

impl Display for BlockError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotImplemented(selector) => write!(f, "{selector}: not yet implemented"),
        }
    }
}

impl Error for BlockError {}

/// Arguments handed to an implementation by the Host scheduler.
#[derive(Debug, Clone, Copy)]
pub struct BlockCall<'a> {
    /// Namespaced selector the Host dispatched on.
    pub selector: &'a str,
    pub args: &'a [ParamValue],
}

/// Callable bound into the Host dispatch tables.
pub type BlockImplementation =
    Arc<dyn Fn(BlockCall<'_>) -> Result<BlockValue, BlockError> + Send + Sync>;

/// Declarative record for one contributed block.
#[derive(Clone)]
pub struct BlockDescriptor {
    /// Local id, unique within this extension.
    pub id: String,
    pub kind: BlockKind,
    pub category: Category,
    /// Palette bucket override; `None` means `category`.
    pub palette: Option<Category>,
    /// Literal text plus `%token` placeholders.
    pub spec_template: String,
    pub default_parameter_values: Vec<Option<ParamValue>>,
    pub implementation: BlockImplementation,
}

impl BlockDescriptor {
    pub fn new(
        id: impl Into<String>,
        kind: BlockKind,
        category: Category,
        spec_template: impl Into<String>,
        implementation: BlockImplementation,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            category,
            palette: None,
            spec_template: spec_template.into(),
            default_parameter_values: Vec::new(),
            implementation,
        }
    }

    pub fn with_palette(mut self, palette: Category) -> Self {
        self.palette = Some(palette);
        self
    }

    pub fn with_defaults(mut self, defaults: Vec<Option<ParamValue>>) -> Self {
        self.default_parameter_values = defaults;
        self
    }

    /// Palette bucket the block is shown in.
    pub fn effective_palette(&self) -> Category {
        self.palette.unwrap_or(self.category)
    }
}

impl Debug for BlockDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockDescriptor")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("category", &self.category)
            .field("palette", &self.palette)
            .field("spec_template", &self.spec_template)
            .field("default_parameter_values", &self.default_parameter_values)
            .finish_non_exhaustive()
    }
}

/// Host-facing projection of one descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSpec {
    /// Namespaced selector.
    pub selector: String,
    /// Serialized as `type` to match the Host block table schema.
    #[serde(rename = "type")]
    pub kind: BlockKind,
    /// Marker prefix followed by the descriptor template.
    #[serde(rename = "spec")]
    pub spec_template: String,
    pub defaults: Vec<Option<ParamValue>>,
    pub category: Category,
}

/// Implementation that reports the selector as not yet wired to a device.
pub fn not_implemented() -> BlockImplementation {
    Arc::new(|call: BlockCall<'_>| Err(BlockError::NotImplemented(call.selector.to_string())))
}
