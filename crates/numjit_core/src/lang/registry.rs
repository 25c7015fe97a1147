//! Shareable metadata for `numjit_core::lang` registries.
//!
//! Every vocabulary table (builtins, numeric types, math functions) reuses the small, dependency-free metadata types
//! defined here.
//!
//! ## Notes
//! - These types are lightweight and `Copy` so registries can live in `const` tables.

/// Identify the compiler version a vocabulary item is available since (e.g. `"0.1.0"`).
pub type SinceVersion = &'static str;

/// Describe the lifecycle status of a vocabulary item.
///
/// ## Examples
/// ```rust
/// use numjit_core::lang::registry::Stability;
///
/// let s = Stability::Stable;
/// assert_eq!(format!("{s:?}"), "Stable");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stability {
    Stable,
    Draft,
    Deprecated,
}

/// Shared metadata shape for “registry-first” vocabulary items.
///
/// - stable identity (`id`)
/// - accepted spellings (`canonical` + `aliases`)
/// - documentation (`description`)
/// - provenance (`since_version`, `stability`)
///
/// Registries that need extra per-item data (e.g. math function arity) wrap this struct in an extension type.
#[derive(Debug, Clone, Copy)]
pub struct LangItemInfo<Id> {
    pub id: Id,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub since_version: Option<SinceVersion>,
    pub stability: Stability,
}

/// Build a stable, first-release vocabulary entry.
pub(crate) const fn stable<Id>(
    id: Id,
    canonical: &'static str,
    aliases: &'static [&'static str],
    description: &'static str,
) -> LangItemInfo<Id> {
    LangItemInfo {
        id,
        canonical,
        aliases,
        description,
        since_version: Some("0.1.0"),
        stability: Stability::Stable,
    }
}

/// Resolve a spelling against a table: canonical spellings win over aliases.
pub(crate) fn resolve<Id: Copy>(table: &[LangItemInfo<Id>], name: &str) -> Option<Id> {
    if let Some(item) = table.iter().find(|item| item.canonical == name) {
        return Some(item.id);
    }
    table
        .iter()
        .find(|item| {
            let aliases: &[&str] = item.aliases;
            aliases.contains(&name)
        })
        .map(|item| item.id)
}
