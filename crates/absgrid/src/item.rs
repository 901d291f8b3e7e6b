//! Item model: what the grid reads from the caller's records.

use std::fmt;

/// Stable identity of an item across render passes.
///
/// Used as the render key, as the drop-target key found by hit-testing, and in
/// reorder notifications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemKey {
    Int(i64),
    Str(String),
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKey::Int(n) => write!(f, "{}", n),
            ItemKey::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ItemKey {
    fn from(n: i64) -> Self {
        ItemKey::Int(n)
    }
}

impl From<i32> for ItemKey {
    fn from(n: i32) -> Self {
        ItemKey::Int(n.into())
    }
}

impl From<u32> for ItemKey {
    fn from(n: u32) -> Self {
        ItemKey::Int(n.into())
    }
}

impl From<&str> for ItemKey {
    fn from(s: &str) -> Self {
        ItemKey::Str(s.to_owned())
    }
}

impl From<String> for ItemKey {
    fn from(s: String) -> Self {
        ItemKey::Str(s)
    }
}

/// Read-only view of a caller-owned item.
///
/// The grid never mutates items; reordering is reported to the caller, who updates
/// the sort values and renders again.
pub trait GridItem {
    fn key(&self) -> ItemKey;

    /// Display order. Values need not be contiguous or unique.
    fn sort(&self) -> f64;

    /// Filtered items keep a hidden slot in the render output but take no grid cell.
    fn is_filtered(&self) -> bool {
        false
    }

    /// Disabled items cannot be dragged and render hidden.
    fn is_disabled(&self) -> bool {
        false
    }
}

/// Ready-made item record with an attached payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Item<D = ()> {
    pub key: ItemKey,
    pub sort: f64,
    pub filtered: bool,
    pub disabled: bool,
    pub data: D,
}

impl Item<()> {
    pub fn new(key: impl Into<ItemKey>, sort: f64) -> Self {
        Self::with_data(key, sort, ())
    }
}

impl<D> Item<D> {
    pub fn with_data(key: impl Into<ItemKey>, sort: f64, data: D) -> Self {
        Self {
            key: key.into(),
            sort,
            filtered: false,
            disabled: false,
            data,
        }
    }

    pub fn filtered(mut self, filtered: bool) -> Self {
        self.filtered = filtered;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

impl<D> GridItem for Item<D> {
    fn key(&self) -> ItemKey {
        self.key.clone()
    }

    fn sort(&self) -> f64 {
        self.sort
    }

    fn is_filtered(&self) -> bool {
        self.filtered
    }

    fn is_disabled(&self) -> bool {
        self.disabled
    }
}

impl<I: GridItem + ?Sized> GridItem for &I {
    fn key(&self) -> ItemKey {
        (**self).key()
    }

    fn sort(&self) -> f64 {
        (**self).sort()
    }

    fn is_filtered(&self) -> bool {
        (**self).is_filtered()
    }

    fn is_disabled(&self) -> bool {
        (**self).is_disabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_display() {
        assert_eq!(ItemKey::from(42).to_string(), "42");
        assert_eq!(ItemKey::from("tile-7").to_string(), "tile-7");
    }

    #[test]
    fn test_numeric_and_string_keys_differ() {
        assert_ne!(ItemKey::from(3), ItemKey::from("3"));
    }

    #[test]
    fn test_item_builder() {
        let item = Item::new("a", 2.0).filtered(true).disabled(true);
        assert_eq!(item.key(), ItemKey::from("a"));
        assert_eq!(GridItem::sort(&item), 2.0);
        assert!(item.is_filtered());
        assert!(item.is_disabled());
    }
}
