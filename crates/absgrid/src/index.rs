//! Dense display index: where each item goes without reordering the items themselves.
//!
//! Hosts keep rendering items in their own order so element identity is stable; the
//! index only says which grid slot each one occupies. Gaps and duplicates in the
//! sort values collapse into a contiguous `0..len`.

use absgrid_core::alloc::HashMap;

use crate::item::{GridItem, ItemKey};

/// True when `item` falls inside the half-open `[min, max)` sort range.
/// No range means every item passes.
pub fn in_sort_range<T: GridItem>(item: &T, range: Option<(f64, f64)>) -> bool {
    match range {
        Some((min, max)) => {
            let sort = item.sort();
            sort >= min && sort < max
        }
        None => true,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredIndex {
    positions: HashMap<ItemKey, usize>,
    /// Keys in slot order.
    slots: Vec<ItemKey>,
}

impl FilteredIndex {
    /// Index the items inside `range` that are not filtered, ordered by sort value.
    ///
    /// Ties keep their input order.
    pub fn build<T: GridItem>(items: &[T], range: Option<(f64, f64)>) -> Self {
        let mut ranked: Vec<&T> = items
            .iter()
            .filter(|item| in_sort_range(*item, range) && !item.is_filtered())
            .collect();
        ranked.sort_by(|a, b| a.sort().total_cmp(&b.sort()));

        let slots: Vec<ItemKey> = ranked.into_iter().map(GridItem::key).collect();
        let positions = slots
            .iter()
            .enumerate()
            .map(|(index, key)| (key.clone(), index))
            .collect();

        Self { positions, slots }
    }

    pub fn index_of(&self, key: &ItemKey) -> Option<usize> {
        self.positions.get(key).copied()
    }

    pub fn key_at(&self, index: usize) -> Option<&ItemKey> {
        self.slots.get(index)
    }

    /// Keys in slot order.
    pub fn slots(&self) -> &[ItemKey] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;

    #[test]
    fn test_duplicates_and_filtered_collapse() {
        let items = vec![
            Item::new("first-five", 5.0),
            Item::new("second-five", 5.0),
            Item::new("one", 1.0),
            Item::new("hidden", 0.0).filtered(true),
        ];
        let index = FilteredIndex::build(&items, Some((0.0, 9999.0)));

        assert_eq!(index.len(), 3);
        assert_eq!(index.index_of(&"one".into()), Some(0));
        assert_eq!(index.index_of(&"first-five".into()), Some(1));
        assert_eq!(index.index_of(&"second-five".into()), Some(2));
        assert_eq!(index.index_of(&"hidden".into()), None);
    }

    #[test]
    fn test_sort_range_is_half_open() {
        let items = vec![
            Item::new("low", -1.0),
            Item::new("min", 0.0),
            Item::new("mid", 50.0),
            Item::new("max", 100.0),
        ];
        let index = FilteredIndex::build(&items, Some((0.0, 100.0)));
        let keys: Vec<String> = index.slots().iter().map(ToString::to_string).collect();
        assert_eq!(keys, vec!["min", "mid"]);
    }

    #[test]
    fn test_no_range_keeps_everything() {
        let items = vec![Item::new(1, -50.0), Item::new(2, 1e9)];
        let index = FilteredIndex::build(&items, None);
        assert_eq!(index.len(), 2);
        assert_eq!(index.key_at(0), Some(&ItemKey::from(1)));
    }

    #[test]
    fn test_gaps_in_sort_values() {
        let items = vec![Item::new("c", 900.0), Item::new("a", 3.0), Item::new("b", 40.0)];
        let index = FilteredIndex::build(&items, None);
        assert_eq!(index.index_of(&"a".into()), Some(0));
        assert_eq!(index.index_of(&"b".into()), Some(1));
        assert_eq!(index.index_of(&"c".into()), Some(2));
    }
}
