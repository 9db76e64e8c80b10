//! Name to provider lookup with lazy construction and alias resolution.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::OnceCell;

use newswire_types::NewswireError;

use crate::provider::ContentProvider;

/// Constructor invoked on the first resolve of a provider name.
pub type ProviderFactory =
    Arc<dyn Fn() -> Result<Arc<dyn ContentProvider>, NewswireError> + Send + Sync>;

struct Slot {
    factory: ProviderFactory,
    instance: OnceCell<Arc<dyn ContentProvider>>,
}

enum Entry {
    Canonical(Slot),
    Alias(String),
}

/// Explicit provider registry shared by the router, the cascade and the manager.
///
/// Each canonical name owns one lazily built instance that lives as long as the
/// registry. Aliases are pure indirections to a canonical name, so resolving an
/// alias yields the very same instance.
#[derive(Default)]
pub struct ProviderRegistry {
    entries: HashMap<String, Entry>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` with a factory. Re-registering replaces the factory and
    /// drops any instance built from the previous one.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> Result<Arc<dyn ContentProvider>, NewswireError> + Send + Sync + 'static,
    {
        self.entries.insert(
            name.into(),
            Entry::Canonical(Slot {
                factory: Arc::new(factory),
                instance: OnceCell::new(),
            }),
        );
        self
    }

    /// Register an already constructed provider under `name`.
    pub fn register_instance(
        &mut self,
        name: impl Into<String>,
        provider: Arc<dyn ContentProvider>,
    ) -> &mut Self {
        self.register(name, move || Ok(Arc::clone(&provider)))
    }

    /// Register `alias` as another name for `canonical`.
    ///
    /// Aliases of aliases are collapsed onto the final canonical name.
    ///
    /// # Errors
    /// Returns `ProviderNotRegistered` when `canonical` is unknown, or
    /// `InvalidArg` when `alias` already names a provider.
    pub fn register_alias(
        &mut self,
        alias: impl Into<String>,
        canonical: &str,
    ) -> Result<&mut Self, NewswireError> {
        let alias = alias.into();
        let target = self
            .canonical_name(canonical)
            .ok_or_else(|| NewswireError::not_registered(canonical))?
            .to_string();
        if matches!(self.entries.get(&alias), Some(Entry::Canonical(_))) {
            return Err(NewswireError::InvalidArg(format!(
                "alias {alias} collides with a registered provider"
            )));
        }
        self.entries.insert(alias, Entry::Alias(target));
        Ok(self)
    }

    /// Canonical name behind `name`, or `None` if unknown.
    #[must_use]
    pub fn canonical_name<'a>(&'a self, name: &'a str) -> Option<&'a str> {
        match self.entries.get(name)? {
            Entry::Canonical(_) => Some(name),
            Entry::Alias(target) => Some(target.as_str()),
        }
    }

    /// Returns true if `name` is a registered provider or alias.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns true when no provider is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All registered names, aliases included, sorted.
    #[must_use]
    pub fn list_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }

    /// Canonical provider names only, sorted.
    #[must_use]
    pub fn canonical_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, e)| matches!(e, Entry::Canonical(_)))
            .map(|(n, _)| n.clone())
            .collect();
        names.sort();
        names
    }

    /// Whether the provider behind `name` has been constructed yet.
    #[must_use]
    pub fn is_resolved(&self, name: &str) -> bool {
        self.slot(name)
            .is_some_and(|slot| slot.instance.initialized())
    }

    /// Resolve `name` (or an alias) to its provider, constructing it on first use.
    ///
    /// # Errors
    /// Returns `ProviderNotRegistered` for unknown names, or the factory's error.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "newswire_core::registry::resolve", skip(self))
    )]
    pub async fn resolve(&self, name: &str) -> Result<Arc<dyn ContentProvider>, NewswireError> {
        let slot = self
            .slot(name)
            .ok_or_else(|| NewswireError::not_registered(name))?;
        let provider = slot
            .instance
            .get_or_try_init(|| async {
                #[cfg(feature = "tracing")]
                tracing::debug!(provider = name, "constructing provider");
                (slot.factory)()
            })
            .await?;
        Ok(Arc::clone(provider))
    }

    fn slot(&self, name: &str) -> Option<&Slot> {
        let canonical = self.canonical_name(name)?;
        match self.entries.get(canonical)? {
            Entry::Canonical(slot) => Some(slot),
            Entry::Alias(_) => None,
        }
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("names", &self.list_names())
            .finish()
    }
}
