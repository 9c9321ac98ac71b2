//! Unique-name registries.
//!
//! Names collide often when blocks are created from the same template, so a
//! collision is resolved by suffixing rather than reported: `foo`, `foo_2`,
//! `foo_3`, ...
//!
//! Generated identifiers are case-insensitive, so `G` and `g` collide. The
//! spelling a name was registered with is the spelling handed back.

use std::collections::HashSet;

/// A set of names in use, with helpers that always hand out unused ones.
#[derive(Debug, Clone, Default)]
pub struct NameRegistry {
    /// Registered names, ASCII-lowercased.
    taken: HashSet<String>,
}

fn fold(name: &str) -> String {
    name.to_ascii_lowercase()
}

impl NameRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `name`, in any letter case, is currently registered.
    pub fn contains(&self, name: &str) -> bool {
        self.taken.contains(&fold(name))
    }

    /// Returns the number of registered names.
    pub fn len(&self) -> usize {
        self.taken.len()
    }

    /// Returns `true` if no names are registered.
    pub fn is_empty(&self) -> bool {
        self.taken.is_empty()
    }

    /// Registers and returns the first free name of the form `<prefix><n>`,
    /// counting from zero.
    pub fn fresh(&mut self, prefix: &str) -> String {
        let name = (0u64..)
            .map(|i| format!("{prefix}{i}"))
            .find(|candidate| !self.contains(candidate))
            .unwrap_or_else(|| prefix.to_string());
        self.taken.insert(fold(&name));
        name
    }

    /// Registers `base` if free, otherwise the first free `<base>_<n>` with
    /// `n` counting from 2. Returns the registered name.
    pub fn claim(&mut self, base: &str) -> String {
        let name = if self.contains(base) {
            (2u64..)
                .map(|i| format!("{base}_{i}"))
                .find(|candidate| !self.contains(candidate))
                .unwrap_or_else(|| base.to_string())
        } else {
            base.to_string()
        };
        self.taken.insert(fold(&name));
        name
    }

    /// Removes `name` from the registry. Returns `true` if it was present.
    pub fn release(&mut self, name: &str) -> bool {
        self.taken.remove(&fold(name))
    }
}
