//! Builtin handler registry.
//!
//! The registry maps a [`RegistryKey`] to the [`Handler`] that lowers it. It is populated once through a
//! [`RegistryBuilder`] and is immutable afterwards, so a single [`Registry`] behind an `Arc` can serve any number of
//! concurrent compilations.
//!
//! Keys live in two namespaces:
//! - names: stable strings such as `len`, `math.sqrt`, `mlir.helper_funcs.exp` or `$number.float32`
//! - host callables: the identity of a host-language builtin, indexed as an alias of a name

use std::collections::HashMap;
use std::fmt;

use numjit_core::lang::builtins::{self, BuiltinFnId};
use numjit_core::lang::math::{self, HelperFnId, MathFnId};

use super::handlers::{self, Handler};

/// Identity of a host-language builtin callable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HostCallable {
    /// A global builtin such as `len` or `min`.
    Builtin(BuiltinFnId),
    /// A function of the host `math` module.
    Math(MathFnId),
    /// One of the helper functions (`helper_funcs.exp`, `helper_funcs.sqrt`).
    Helper(HelperFnId),
}

impl HostCallable {
    /// Parse the host spelling of a callable: `len`, `math.sqrt`, `helper_funcs.exp`.
    pub fn from_spelling(spelling: &str) -> Option<Self> {
        builtins::from_str(spelling)
            .map(HostCallable::Builtin)
            .or_else(|| math::fn_from_key(spelling).map(HostCallable::Math))
            .or_else(|| math::helper_from_spelling(spelling).map(HostCallable::Helper))
    }
}

impl fmt::Display for HostCallable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostCallable::Builtin(id) => f.write_str(builtins::as_str(*id)),
            HostCallable::Math(id) => f.write_str(&math::fn_key(*id)),
            HostCallable::Helper(id) => f.write_str(&math::helper_spelling(*id)),
        }
    }
}

/// A resolved builtin identity, as supplied by the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RegistryKey {
    Name(String),
    Host(HostCallable),
}

impl From<&str> for RegistryKey {
    fn from(name: &str) -> Self {
        RegistryKey::Name(name.to_string())
    }
}

impl From<String> for RegistryKey {
    fn from(name: String) -> Self {
        RegistryKey::Name(name)
    }
}

impl From<HostCallable> for RegistryKey {
    fn from(callable: HostCallable) -> Self {
        RegistryKey::Host(callable)
    }
}

impl fmt::Display for RegistryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryKey::Name(name) => f.write_str(name),
            RegistryKey::Host(callable) => write!(f, "<host {callable}>"),
        }
    }
}

/// Which handler groups a registry is built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Index handlers by host callable in addition to their name
    pub host_aliases: bool,
    /// Register the `$number.<type>` casts
    pub number_casts: bool,
    /// Register the transcendental table under `math.<name>`
    pub math_functions: bool,
    /// Register the `mlir.helper_funcs.exp` / `mlir.helper_funcs.sqrt` helpers
    pub helper_functions: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            host_aliases: true,
            number_casts: true,
            math_functions: true,
            helper_functions: true,
        }
    }
}

impl RegistryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host_aliases(mut self, enabled: bool) -> Self {
        self.host_aliases = enabled;
        self
    }

    pub fn with_number_casts(mut self, enabled: bool) -> Self {
        self.number_casts = enabled;
        self
    }

    pub fn with_math_functions(mut self, enabled: bool) -> Self {
        self.math_functions = enabled;
        self
    }

    pub fn with_helper_functions(mut self, enabled: bool) -> Self {
        self.helper_functions = enabled;
        self
    }

    /// `Some(callable)` when host aliases are enabled.
    pub(crate) fn host_alias(&self, callable: HostCallable) -> Option<HostCallable> {
        self.host_aliases.then_some(callable)
    }
}

/// Mutable registration phase of a [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    handlers: HashMap<String, Handler>,
    aliases: HashMap<HostCallable, String>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `handler` under `name`, and also under `alias` when given.
    ///
    /// Registering an existing name or alias replaces the previous entry.
    pub fn register(&mut self, name: impl Into<String>, handler: Handler, alias: Option<HostCallable>) -> &mut Self {
        let name = name.into();
        tracing::trace!(%name, %handler, "register builtin");
        if let Some(previous) = self.handlers.insert(name.clone(), handler) {
            tracing::debug!(%name, %previous, %handler, "builtin handler replaced");
        }
        if let Some(alias) = alias {
            if let Some(previous) = self.aliases.insert(alias, name.clone()) {
                tracing::debug!(%alias, %previous, %name, "host alias rebound");
            }
        }
        self
    }

    /// Freeze the registrations.
    pub fn finish(self) -> Registry {
        tracing::debug!(
            handlers = self.handlers.len(),
            aliases = self.aliases.len(),
            "builtin registry ready"
        );
        Registry {
            handlers: self.handlers,
            aliases: self.aliases,
        }
    }
}

/// Immutable map from builtin identity to lowering handler.
#[derive(Debug, Clone)]
pub struct Registry {
    handlers: HashMap<String, Handler>,
    aliases: HashMap<HostCallable, String>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Every standard handler, indexed by name and host callable.
    pub fn standard() -> Self {
        Self::with_config(&RegistryConfig::default())
    }

    pub fn with_config(config: &RegistryConfig) -> Self {
        let mut builder = RegistryBuilder::new();
        handlers::install_standard(&mut builder, config);
        builder.finish()
    }

    /// Resolve `key` to its canonical name and handler.
    pub fn resolve(&self, key: &RegistryKey) -> Option<(&str, Handler)> {
        let name = match key {
            RegistryKey::Name(name) => name.as_str(),
            RegistryKey::Host(callable) => self.aliases.get(callable)?.as_str(),
        };
        self.handlers
            .get_key_value(name)
            .map(|(name, handler)| (name.as_str(), *handler))
    }

    pub fn lookup(&self, key: &RegistryKey) -> Option<Handler> {
        self.resolve(key).map(|(_, handler)| handler)
    }

    pub fn lookup_name(&self, name: &str) -> Option<Handler> {
        self.handlers.get(name).copied()
    }

    /// Registered names, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Host callables indexed to `name`, sorted.
    pub fn aliases_of(&self, name: &str) -> Vec<HostCallable> {
        let mut aliases: Vec<HostCallable> = self
            .aliases
            .iter()
            .filter(|(_, target)| target.as_str() == name)
            .map(|(alias, _)| *alias)
            .collect();
        aliases.sort_unstable();
        aliases
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
