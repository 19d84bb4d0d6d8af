//! Memoised Outputs
//! A rendered output is recomputed only when the inputs it depends on change.

use crate::data::{FilterMode, Species, SpeciesSelection};

/// Identifies one filtered view of the dataset.
///
/// In passthrough mode the species selection never reaches the data, so it is
/// left out of the key and toggling checkboxes does not recompute anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewKey {
    pub mode: FilterMode,
    pub species: Vec<Species>,
}

impl ViewKey {
    pub fn new(mode: FilterMode, selection: &SpeciesSelection) -> Self {
        let species = match mode {
            FilterMode::Passthrough => Vec::new(),
            FilterMode::Species => selection.iter().collect(),
        };
        Self { mode, species }
    }
}

/// Caches one value together with the inputs it was computed from.
pub struct Memo<K, V> {
    entry: Option<(K, V)>,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self { entry: None }
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    /// Return the cached value for `key`, computing it first if the key changed.
    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce(&K) -> V) -> &V {
        if self.entry.as_ref().is_some_and(|(k, _)| *k != key) {
            self.entry = None;
        }
        let (_, value) = self.entry.get_or_insert_with(|| {
            let value = compute(&key);
            (key, value)
        });
        value
    }

    /// The most recently computed value, if any.
    pub fn current(&self) -> Option<&V> {
        self.entry.as_ref().map(|(_, v)| v)
    }

    /// The inputs of the cached value.
    pub fn key(&self) -> Option<&K> {
        self.entry.as_ref().map(|(k, _)| k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn passthrough_key_ignores_selection() {
        let a = ViewKey::new(FilterMode::Passthrough, &SpeciesSelection::default());
        let b = ViewKey::new(FilterMode::Passthrough, &SpeciesSelection::all());

        assert_eq!(a, b);
    }

    #[test]
    fn species_key_follows_selection() {
        let a = ViewKey::new(FilterMode::Species, &SpeciesSelection::new([Species::Gentoo]));
        let b = ViewKey::new(FilterMode::Species, &SpeciesSelection::all());

        assert_ne!(a, b);
        assert_eq!(a.species, vec![Species::Gentoo]);
    }

    #[test]
    fn recomputes_only_on_key_change() {
        let mut memo: Memo<u32, u32> = Memo::default();
        let mut calls = 0;

        for key in [1, 1, 2, 2, 1] {
            memo.get_or_compute(key, |k| {
                calls += 1;
                k * 10
            });
        }

        assert_eq!(calls, 3);
        assert_eq!(*memo.get_or_compute(1, |_| unreachable!()), 10);
    }

    #[test]
    fn current_tracks_latest_entry() {
        let mut memo: Memo<&str, usize> = Memo::default();
        assert_eq!(memo.current(), None);
        assert_eq!(memo.key(), None);

        memo.get_or_compute("a", |k| k.len());
        let value = *memo.get_or_compute("abc", |k| k.len());

        assert_eq!(value, 3);
        assert_eq!(memo.current(), Some(&3));
        assert_eq!(memo.key(), Some(&"abc"));
    }
}
