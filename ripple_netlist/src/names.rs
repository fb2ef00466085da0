//! The naming registry: the set of live variable names and the monotonic
//! counter used to mint fresh ones.
//!
//! All name allocation and renaming routes through [`NameTable`] so that no
//! two live variables ever share a name. The counter is generation-scoped:
//! `clear` starts a fresh generation with nothing carried over.

use indexmap::IndexSet;

use crate::error::NetlistError;

/// Owns the assigned-name set and the fresh-name counter for one build
/// generation.
#[derive(Debug, Default)]
pub(crate) struct NameTable {
    used: IndexSet<String>,
    counter: u64,
}

impl NameTable {
    /// Return the current counter value and advance it.
    pub(crate) fn next_counter(&mut self) -> u64 {
        let value = self.counter;
        self.counter += 1;
        value
    }

    /// Whether `name` is currently assigned to a live variable.
    #[must_use]
    pub(crate) fn contains(&self, name: &str) -> bool {
        self.used.contains(name)
    }

    /// Mint a fresh `{prefix}_{n}` name, register it and return it.
    ///
    /// Counter values already taken by explicitly registered names are
    /// skipped; each attempt consumes one counter value.
    pub(crate) fn allocate_fresh(&mut self, prefix: &str) -> String {
        loop {
            let candidate = format!("{prefix}_{}", self.next_counter());
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    /// Register an explicitly chosen name.
    pub(crate) fn register(&mut self, name: &str) -> Result<(), NetlistError> {
        if self.used.contains(name) {
            return Err(NetlistError::name_collision(name));
        }
        self.used.insert(name.to_owned());
        Ok(())
    }

    /// Atomically move a variable from `old` to `new`.
    ///
    /// The caller guarantees `old` is registered; `new` being taken is the
    /// caller's collision to report.
    pub(crate) fn rename(&mut self, old: &str, new: &str) -> Result<(), NetlistError> {
        if self.used.contains(new) {
            return Err(NetlistError::name_collision(new));
        }
        self.used.swap_remove(old);
        self.used.insert(new.to_owned());
        Ok(())
    }

    /// Drop every name and rewind the counter, starting a new generation.
    pub(crate) fn clear(&mut self) {
        self.used.clear();
        self.counter = 0;
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use quickcheck::quickcheck;

    quickcheck! {
        fn prop_fresh_names_never_collide(prefixes: Vec<String>) -> bool {
            let mut table = NameTable::default();
            let mut seen = std::collections::HashSet::new();
            prefixes
                .iter()
                .all(|prefix| seen.insert(table.allocate_fresh(prefix)))
        }

        fn prop_fresh_name_skips_registered(n: u8) -> bool {
            let mut table = NameTable::default();
            for i in 0..=u64::from(n) {
                if table.register(&format!("_l_{i}")).is_err() {
                    return false;
                }
            }
            let minted = table.allocate_fresh("_l");
            minted == format!("_l_{}", u64::from(n) + 1)
        }

        fn prop_register_is_exclusive(name: String) -> bool {
            let mut table = NameTable::default();
            table.register(&name).is_ok() && table.register(&name).is_err()
        }
    }

    #[test]
    fn rename_frees_the_old_name() {
        let mut table = NameTable::default();
        table.register("a").unwrap();
        table.rename("a", "b").unwrap();
        assert!(!table.contains("a"));
        assert!(table.contains("b"));
        table.register("a").unwrap();
    }

    #[test]
    fn clear_rewinds_the_counter() {
        let mut table = NameTable::default();
        assert_eq!(table.allocate_fresh("_l"), "_l_0");
        assert_eq!(table.allocate_fresh("_l"), "_l_1");
        table.clear();
        assert_eq!(table.allocate_fresh("_l"), "_l_0");
    }
}
