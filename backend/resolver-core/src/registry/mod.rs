//! Handler registry.
//!
//! Built once at startup through [`HandlerRegistryBuilder`], then frozen
//! behind an `Arc` and shared read-only by every resolution. There is no
//! mutation after [`HandlerRegistryBuilder::build`].

pub mod builder;

pub use builder::HandlerRegistryBuilder;

use crate::error_model::HandlerFn;
use crate::exception::ExceptionKind;
use crate::report::signals::ResolutionObserver;

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

pub struct HandlerRegistry {
    default_kinds: Vec<String>,
    special_kinds: Vec<String>,
    handlers: HashMap<String, HandlerFn>,
    observers: BTreeMap<String, Arc<dyn ResolutionObserver>>,
}

impl HandlerRegistry {
    /// Builder seeded with the predefined default and special kinds.
    pub fn builder() -> HandlerRegistryBuilder {
        HandlerRegistryBuilder::new()
    }

    /// Registry with only the predefined kinds and no user handlers.
    pub fn standard() -> Arc<Self> {
        Self::builder().build()
    }

    /// User handler registered for exactly this kind name.
    pub fn handler_for(&self, kind: &ExceptionKind) -> Option<&HandlerFn> {
        self.handlers.get(kind.name())
    }

    pub fn has_handler(&self, kind: &ExceptionKind) -> bool {
        self.handlers.contains_key(kind.name())
    }

    pub fn is_default_kind(&self, kind: &ExceptionKind) -> bool {
        self.default_kinds.iter().any(|name| name == kind.name())
    }

    pub fn is_special_kind(&self, kind: &ExceptionKind) -> bool {
        self.special_kinds.iter().any(|name| name == kind.name())
    }

    pub fn default_kinds(&self) -> &[String] {
        &self.default_kinds
    }

    pub fn special_kinds(&self) -> &[String] {
        &self.special_kinds
    }

    pub fn observer(&self, id: &str) -> Option<&Arc<dyn ResolutionObserver>> {
        self.observers.get(id)
    }

    pub fn has_observer(&self, id: &str) -> bool {
        self.observers.contains_key(id)
    }

    pub fn handled_kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("default_kinds", &self.default_kinds)
            .field("special_kinds", &self.special_kinds)
            .field("handlers", &self.handled_kinds())
            .field("observers", &self.observers.keys().collect::<Vec<_>>())
            .finish()
    }
}
