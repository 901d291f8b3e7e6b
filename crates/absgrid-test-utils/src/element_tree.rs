//! In-memory element tree for hit-testing.

use absgrid::{ElementTree, ItemKey, LayoutManager};
use absgrid_core::geometry::Rect;
use absgrid_core::math::Vec2;
use parking_lot::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub struct MockElement {
    /// Bounds in client coordinates.
    pub rect: Rect<f32>,
    pub parent: Option<usize>,
    pub drop_key: Option<ItemKey>,
    pub pointer_events: bool,
}

/// Elements are stacked in insertion order: the last one added is on top.
#[derive(Debug, Default)]
pub struct MockElementTree {
    elements: Vec<MockElement>,
    queries: Mutex<usize>,
}

impl MockElementTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree mirroring a laid-out grid: one container element at `origin`
    /// with a child per slot carrying that slot's key.
    pub fn from_layout(layout: &LayoutManager, origin: Vec2, slots: &[ItemKey]) -> Self {
        let mut tree = Self::new();
        let height = layout.total_height(slots.len());
        let container = tree.push(MockElement {
            rect: Rect::new(origin.x, origin.y, layout.container_width(), height),
            parent: None,
            drop_key: None,
            pointer_events: true,
        });
        for (index, key) in slots.iter().enumerate() {
            let slot = tree.push(MockElement {
                rect: layout.slot_rect(index, origin),
                parent: Some(container),
                drop_key: Some(key.clone()),
                pointer_events: true,
            });
            // inner content element without a key, as a rendered item body would be
            let rect = layout.slot_rect(index, origin);
            tree.push(MockElement {
                rect,
                parent: Some(slot),
                drop_key: None,
                pointer_events: true,
            });
        }
        tree
    }

    /// Add an element on top and return its id.
    pub fn push(&mut self, element: MockElement) -> usize {
        self.elements.push(element);
        self.elements.len() - 1
    }

    pub fn get(&self, id: usize) -> Option<&MockElement> {
        self.elements.get(id)
    }

    pub fn get_mut(&mut self, id: usize) -> Option<&mut MockElement> {
        self.elements.get_mut(id)
    }

    /// Id of the element carrying `key`.
    pub fn find(&self, key: &ItemKey) -> Option<usize> {
        self.elements
            .iter()
            .position(|element| element.drop_key.as_ref() == Some(key))
    }

    /// Disable pointer events on an element and its descendants.
    pub fn set_pointer_events(&mut self, id: usize, enabled: bool) {
        for index in 0..self.elements.len() {
            if self.is_within(index, id) {
                self.elements[index].pointer_events = enabled;
            }
        }
    }

    /// Number of `element_at` lookups performed.
    pub fn query_count(&self) -> usize {
        *self.queries.lock()
    }

    fn is_within(&self, mut index: usize, ancestor: usize) -> bool {
        loop {
            if index == ancestor {
                return true;
            }
            match self.elements.get(index).and_then(|element| element.parent) {
                Some(parent) => index = parent,
                None => return false,
            }
        }
    }
}

impl ElementTree for MockElementTree {
    type Element = usize;

    fn element_at(&self, point: Vec2) -> Option<usize> {
        *self.queries.lock() += 1;
        self.elements
            .iter()
            .enumerate()
            .rev()
            .find(|(_, element)| element.pointer_events && element.rect.contains(point))
            .map(|(id, _)| id)
    }

    fn parent(&self, element: usize) -> Option<usize> {
        self.elements.get(element).and_then(|element| element.parent)
    }

    fn drop_key(&self, element: usize) -> Option<ItemKey> {
        self.elements
            .get(element)
            .and_then(|element| element.drop_key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use absgrid::{ElementWalker, HitTest, LayoutOptions};

    fn tree() -> MockElementTree {
        let layout = LayoutManager::new(
            &LayoutOptions {
                item_width: 100.0,
                item_height: 100.0,
                vertical_margin: Some(10.0),
                zoom: 1.0,
            },
            400.0,
            false,
        );
        let slots = [ItemKey::from("a"), ItemKey::from("b")];
        MockElementTree::from_layout(&layout, Vec2::ZERO, &slots)
    }

    #[test]
    fn test_walks_up_to_keyed_element() {
        let tree = tree();
        let walker = ElementWalker(&tree);
        assert_eq!(walker.drop_target_at(Vec2::new(150.0, 50.0)), Some(ItemKey::from("b")));
        assert_eq!(tree.query_count(), 1);
    }

    #[test]
    fn test_container_has_no_key() {
        let tree = tree();
        let walker = ElementWalker(&tree);
        assert_eq!(walker.drop_target_at(Vec2::new(350.0, 50.0)), None);
        assert_eq!(walker.drop_target_at(Vec2::new(-5.0, 50.0)), None);
    }

    #[test]
    fn test_pointer_events_disabled_is_transparent() {
        let mut tree = tree();
        let b = tree.find(&ItemKey::from("b")).unwrap();
        tree.set_pointer_events(b, false);
        let walker = ElementWalker(&tree);
        assert_eq!(walker.drop_target_at(Vec2::new(150.0, 50.0)), None);
        assert_eq!(walker.drop_target_at(Vec2::new(50.0, 50.0)), Some(ItemKey::from("a")));
    }
}
