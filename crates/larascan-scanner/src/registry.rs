//! Category-grouped collection of checks, built once per process.

use std::collections::BTreeMap;
use std::sync::Arc;

use larascan_client::{DnsResolver, HttpTransport, TransportConfig};
use larascan_core::{Category, Check, Result};

use crate::checks::recon::{
    FrameworkDetection, HostHeaderInjection, LaravelVersion, Livewire, PhpVersion,
    SubdomainEnumeration,
};
use crate::checks::vulnerabilities::{CsrfToken, DebugMode, SensitiveFiles, ToolsDetection};

/// Immutable mapping from category to the checks run under it.
///
/// Within a category, checks keep their registration order. There is no
/// mutation API: build a new registry to change the set of checks.
#[derive(Clone, Default)]
pub struct Registry {
    checks: BTreeMap<Category, Vec<Arc<dyn Check>>>,
}

impl Registry {
    /// Start building a registry
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// The built-in Laravel checks.
    ///
    /// Every check gets its own transport built from `config`.
    pub fn builtin(config: &TransportConfig) -> Result<Self> {
        let http = || HttpTransport::from_config(config);

        Ok(Self::builder()
            .register(Category::Recon, FrameworkDetection::new(http()?))
            .register(Category::Recon, LaravelVersion::new(http()?))
            .register(Category::Recon, Livewire::new(http()?))
            .register(Category::Recon, PhpVersion::new(http()?))
            .register(Category::Recon, SubdomainEnumeration::new(DnsResolver::new()))
            .register(Category::Recon, HostHeaderInjection::new(http()?))
            .register(Category::Vulnerabilities, CsrfToken::new(http()?))
            .register(Category::Vulnerabilities, DebugMode::new(http()?))
            .register(Category::Vulnerabilities, SensitiveFiles::new(http()?))
            .register(Category::Vulnerabilities, ToolsDetection::new(http()?))
            .build())
    }

    /// Every (category, check) pair
    pub fn iter(&self) -> impl Iterator<Item = (Category, &Arc<dyn Check>)> {
        self.checks
            .iter()
            .flat_map(|(category, checks)| checks.iter().map(move |check| (*category, check)))
    }

    /// Total number of checks
    #[must_use]
    pub fn len(&self) -> usize {
        self.checks.values().map(Vec::len).sum()
    }

    /// Returns true if no checks are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Categories with at least one check
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.checks
            .iter()
            .filter(|(_, checks)| !checks.is_empty())
            .map(|(category, _)| *category)
    }

    /// Checks registered under `category`
    #[must_use]
    pub fn checks(&self, category: Category) -> &[Arc<dyn Check>] {
        self.checks
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// A registry holding only the given categories.
    ///
    /// Checks are shared with `self`, not rebuilt.
    #[must_use]
    pub fn only(&self, categories: &[Category]) -> Self {
        let checks = self
            .checks
            .iter()
            .filter(|(category, _)| categories.contains(category))
            .map(|(category, checks)| (*category, checks.clone()))
            .collect();
        Self { checks }
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (category, checks) in &self.checks {
            let names: Vec<&str> = checks.iter().map(|c| c.name()).collect();
            map.entry(category, &names);
        }
        map.finish()
    }
}

/// Builder for a [`Registry`]
#[derive(Default)]
pub struct RegistryBuilder {
    checks: BTreeMap<Category, Vec<Arc<dyn Check>>>,
}

impl RegistryBuilder {
    /// Add a check under `category`
    #[must_use]
    pub fn register(self, category: Category, check: impl Check + 'static) -> Self {
        self.register_shared(category, Arc::new(check))
    }

    /// Add an already shared check under `category`
    #[must_use]
    pub fn register_shared(mut self, category: Category, check: Arc<dyn Check>) -> Self {
        self.checks.entry(category).or_default().push(check);
        self
    }

    /// Freeze the registry
    #[must_use]
    pub fn build(self) -> Registry {
        Registry {
            checks: self.checks,
        }
    }
}
