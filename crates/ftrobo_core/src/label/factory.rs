//! Custom parameter token resolution.
//!
//! # Responsibility
//! - Map custom tokens to aliases or widget factories.
//! - Leave every other token to the Host's own resolver.
//!
//! # Invariants
//! - The token table is fixed after configuration.
//! - Lookup is exact-match and case-sensitive.
//! - `resolve` is total and read-only.

use crate::label::widget::WidgetHandle;
use log::debug;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

/// Zero-argument widget constructor.
///
/// Must return immediately; may return a richer widget on later calls once
/// backing resources are loaded.
pub type WidgetFactory = Arc<dyn Fn() -> WidgetHandle + Send + Sync>;

/// How one custom token is rendered.
#[derive(Clone)]
pub enum LabelPartKind {
    /// Rewrite to a Host-standard token and let the Host render it.
    StaticAlias(String),
    WidgetFactory(WidgetFactory),
}

impl Debug for LabelPartKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StaticAlias(target) => f.debug_tuple("StaticAlias").field(target).finish(),
            Self::WidgetFactory(_) => f.write_str("WidgetFactory(..)"),
        }
    }
}

/// One configured custom token.
#[derive(Debug, Clone)]
pub struct LabelPartRule {
    pub token: String,
    pub kind: LabelPartKind,
}

impl LabelPartRule {
    pub fn alias(token: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            kind: LabelPartKind::StaticAlias(target.into()),
        }
    }

    pub fn widget<F>(token: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> WidgetHandle + Send + Sync + 'static,
    {
        Self {
            token: token.into(),
            kind: LabelPartKind::WidgetFactory(Arc::new(factory)),
        }
    }
}

/// Outcome of resolving one token.
#[derive(Clone)]
pub enum ResolvedPart {
    /// Re-resolve on the Host with this token.
    Alias(String),
    /// Build the widget directly.
    Widget(WidgetFactory),
    /// Not a custom token; the Host resolves the original token.
    Unhandled,
}

impl ResolvedPart {
    pub fn is_unhandled(&self) -> bool {
        matches!(self, Self::Unhandled)
    }
}

impl Debug for ResolvedPart {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Alias(target) => f.debug_tuple("Alias").field(target).finish(),
            Self::Widget(_) => f.write_str("Widget(..)"),
            Self::Unhandled => f.write_str("Unhandled"),
        }
    }
}

/// Fixed table of custom parameter tokens.
#[derive(Debug, Default, Clone)]
pub struct LabelPartFactory {
    rules: BTreeMap<String, LabelPartKind>,
}

impl LabelPartFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one rule. Only used while configuring.
    pub fn register(&mut self, rule: LabelPartRule) -> Result<(), LabelPartError> {
        if !is_valid_token(&rule.token) {
            return Err(LabelPartError::InvalidToken(rule.token));
        }
        if self.rules.contains_key(rule.token.as_str()) {
            return Err(LabelPartError::DuplicateToken(rule.token));
        }
        debug!(
            "event=label_part_register module=label status=ok token={}",
            rule.token
        );
        self.rules.insert(rule.token, rule.kind);
        Ok(())
    }

    pub fn register_all(
        &mut self,
        rules: impl IntoIterator<Item = LabelPartRule>,
    ) -> Result<(), LabelPartError> {
        rules.into_iter().try_for_each(|rule| self.register(rule))
    }

    pub fn resolve(&self, token: &str) -> ResolvedPart {
        match self.rules.get(token) {
            Some(LabelPartKind::StaticAlias(target)) => ResolvedPart::Alias(target.clone()),
            Some(LabelPartKind::WidgetFactory(factory)) => ResolvedPart::Widget(factory.clone()),
            None => ResolvedPart::Unhandled,
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.rules.contains_key(token)
    }

    /// Configured rules in token order.
    pub fn rules(&self) -> impl Iterator<Item = (&str, &LabelPartKind)> {
        self.rules.iter().map(|(token, kind)| (token.as_str(), kind))
    }

    /// Sorted custom tokens.
    pub fn tokens(&self) -> Vec<&str> {
        self.rules.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn is_valid_token(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some('%') | Some('$') => {}
        _ => return false,
    }
    let rest = chars.as_str();
    !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Label part configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelPartError {
    InvalidToken(String),
    DuplicateToken(String),
}

impl Display for LabelPartError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidToken(value) => write!(f, "label part token is invalid: {value:?}"),
            Self::DuplicateToken(value) => {
                write!(f, "label part token already registered: {value}")
            }
        }
    }
}

impl Error for LabelPartError {}
