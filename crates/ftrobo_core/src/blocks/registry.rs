//! Block definition registry.
//!
//! # Responsibility
//! - Hold contributed block descriptors in registration order.
//! - Project descriptors into namespaced render specs and palette contributions.
//! - Bind implementations into Host dispatch tables.
//!
//! # Invariants
//! - Local ids are unique; duplicates are rejected at registration.
//! - Every id leaving this registry is passed through `namespaced_id`.
//! - Per-palette order equals registration order.

use crate::blocks::template::placeholders;
use crate::host::DispatchTable;
use crate::model::block::{BlockDescriptor, Category, RenderSpec};
use indexmap::IndexMap;
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default namespace prefix applied to every block id.
pub const DEFAULT_NAMESPACE: &str = "ftrobo";
/// Default symbol prepended to every contributed block spec.
pub const DEFAULT_MARKER_PREFIX: &str = "$ftrobo";

/// In-process registry of contributed blocks.
#[derive(Debug)]
pub struct BlockRegistry {
    namespace: String,
    marker_prefix: String,
    descriptors: Vec<BlockDescriptor>,
    index: BTreeMap<String, usize>,
    palettes: IndexMap<Category, Vec<usize>>,
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE, DEFAULT_MARKER_PREFIX)
    }
}

impl BlockRegistry {
    pub fn new(namespace: impl Into<String>, marker_prefix: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            marker_prefix: marker_prefix.into(),
            descriptors: Vec::new(),
            index: BTreeMap::new(),
            palettes: IndexMap::new(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn marker_prefix(&self) -> &str {
        &self.marker_prefix
    }

    /// Registers one descriptor and appends it to its palette bucket.
    pub fn register(&mut self, descriptor: BlockDescriptor) -> Result<(), RegistryError> {
        if !is_valid_block_id(&descriptor.id) {
            return Err(RegistryError::InvalidBlockId(descriptor.id));
        }
        if self.index.contains_key(descriptor.id.as_str()) {
            warn!(
                "event=block_register module=blocks status=error reason=duplicate id={}",
                descriptor.id
            );
            return Err(RegistryError::DuplicateBlockId(descriptor.id));
        }

        let slots = placeholders(&descriptor.spec_template).len();
        if descriptor.default_parameter_values.len() > slots {
            return Err(RegistryError::MisalignedDefaults {
                id: descriptor.id,
                defaults: descriptor.default_parameter_values.len(),
                placeholders: slots,
            });
        }

        let position = self.descriptors.len();
        let palette = descriptor.effective_palette();
        debug!(
            "event=block_register module=blocks status=ok id={} palette={} kind={}",
            descriptor.id,
            palette,
            descriptor.kind.as_str()
        );
        self.index.insert(descriptor.id.clone(), position);
        self.palettes.entry(palette).or_default().push(position);
        self.descriptors.push(descriptor);
        Ok(())
    }

    /// Registers descriptors in iteration order, stopping at the first failure.
    pub fn register_all(
        &mut self,
        descriptors: impl IntoIterator<Item = BlockDescriptor>,
    ) -> Result<(), RegistryError> {
        descriptors
            .into_iter()
            .try_for_each(|descriptor| self.register(descriptor))
    }

    /// Maps a local id to the selector exposed to the Host.
    pub fn namespaced_id(&self, id: &str) -> String {
        format!("{}{}", self.namespace, id)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&BlockDescriptor> {
        self.index.get(id).map(|position| &self.descriptors[*position])
    }

    /// Descriptors in registration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &BlockDescriptor> {
        self.descriptors.iter()
    }

    /// Palettes holding at least one contribution, in first-use order.
    pub fn palettes(&self) -> Vec<Category> {
        self.palettes.keys().copied().collect()
    }

    /// Returns the Host-facing projection of one descriptor.
    pub fn render_spec(&self, id: &str) -> Result<RenderSpec, RegistryError> {
        self.get(id)
            .map(|descriptor| self.project(descriptor))
            .ok_or_else(|| RegistryError::BlockNotFound(id.to_string()))
    }

    /// Returns visible contributions for `palette` in registration order.
    ///
    /// `is_hidden` receives namespaced selectors and carries the Host's
    /// suppression policy; hidden blocks are dropped, never reported as errors.
    pub fn contributions_for(
        &self,
        palette: Category,
        is_hidden: impl Fn(&str) -> bool,
    ) -> Vec<RenderSpec> {
        let Some(positions) = self.palettes.get(&palette) else {
            return vec![];
        };
        positions
            .iter()
            .map(|position| self.project(&self.descriptors[*position]))
            .filter(|spec| !is_hidden(&spec.selector))
            .collect()
    }

    /// Writes every implementation into `sink`, keyed by namespaced selector.
    ///
    /// Repeated calls overwrite the same keys with the same callables.
    pub fn bind_implementations(&self, sink: &mut impl DispatchTable) {
        for descriptor in &self.descriptors {
            sink.bind(
                self.namespaced_id(&descriptor.id),
                descriptor.implementation.clone(),
            );
        }
        info!(
            "event=implementations_bind module=blocks status=ok count={}",
            self.descriptors.len()
        );
    }

    fn project(&self, descriptor: &BlockDescriptor) -> RenderSpec {
        RenderSpec {
            selector: self.namespaced_id(&descriptor.id),
            kind: descriptor.kind,
            spec_template: format!("{} {}", self.marker_prefix, descriptor.spec_template),
            defaults: descriptor.default_parameter_values.clone(),
            category: descriptor.category,
        }
    }
}

fn is_valid_block_id(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Block registration and lookup errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    InvalidBlockId(String),
    DuplicateBlockId(String),
    BlockNotFound(String),
    MisalignedDefaults {
        id: String,
        defaults: usize,
        placeholders: usize,
    },
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBlockId(value) => write!(f, "block id is invalid: {value:?}"),
            Self::DuplicateBlockId(value) => write!(f, "block id already registered: {value}"),
            Self::BlockNotFound(value) => write!(f, "block not found: {value}"),
            Self::MisalignedDefaults {
                id,
                defaults,
                placeholders,
            } => write!(
                f,
                "block {id} declares {defaults} default values for {placeholders} placeholders"
            ),
        }
    }
}

impl Error for RegistryError {}
