//! The player's carried elements: at most two, no duplicates, oldest out first.

use crate::types::Element;

pub const MAX_ELEMENTS: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pickup {
    Added,
    Replaced { dropped: Element },
    AlreadyHeld,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementInventory {
    slots: Vec<Element>,
}

impl ElementInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Oldest first.
    pub fn elements(&self) -> &[Element] {
        &self.slots
    }

    pub fn contains(&self, element: Element) -> bool {
        self.slots.contains(&element)
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= MAX_ELEMENTS
    }

    /// A full inventory drops its oldest element to make room.
    pub fn try_pick_up(&mut self, element: Element) -> Pickup {
        if self.contains(element) {
            return Pickup::AlreadyHeld;
        }
        let dropped = if self.is_full() { Some(self.slots.remove(0)) } else { None };
        self.slots.push(element);
        match dropped {
            Some(dropped) => Pickup::Replaced { dropped },
            None => Pickup::Added,
        }
    }

    /// Removes the most recently picked up element.
    pub fn discard_last(&mut self) -> Option<Element> {
        self.slots.pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elements_fill_both_slots_in_pickup_order() {
        let mut inventory = ElementInventory::new();
        assert_eq!(inventory.try_pick_up(Element::Fire), Pickup::Added);
        assert_eq!(inventory.try_pick_up(Element::Water), Pickup::Added);
        assert_eq!(inventory.elements(), &[Element::Fire, Element::Water]);
        assert!(inventory.is_full());
    }

    #[test]
    fn a_held_element_is_refused() {
        let mut inventory = ElementInventory::new();
        inventory.try_pick_up(Element::Earth);
        assert_eq!(inventory.try_pick_up(Element::Earth), Pickup::AlreadyHeld);
        assert_eq!(inventory.elements(), &[Element::Earth]);

        inventory.try_pick_up(Element::Air);
        assert_eq!(inventory.try_pick_up(Element::Air), Pickup::AlreadyHeld);
        assert_eq!(inventory.elements(), &[Element::Earth, Element::Air]);
    }

    #[test]
    fn a_full_inventory_drops_its_oldest_element() {
        let mut inventory = ElementInventory::new();
        inventory.try_pick_up(Element::Fire);
        inventory.try_pick_up(Element::Water);
        assert_eq!(inventory.try_pick_up(Element::Air), Pickup::Replaced { dropped: Element::Fire });
        assert_eq!(inventory.elements(), &[Element::Water, Element::Air]);

        assert_eq!(inventory.try_pick_up(Element::Fire), Pickup::Replaced { dropped: Element::Water });
        assert_eq!(inventory.elements(), &[Element::Air, Element::Fire]);
    }

    #[test]
    fn discard_removes_the_newest_element() {
        let mut inventory = ElementInventory::new();
        assert_eq!(inventory.discard_last(), None);

        inventory.try_pick_up(Element::Fire);
        inventory.try_pick_up(Element::Earth);
        assert_eq!(inventory.discard_last(), Some(Element::Earth));
        assert_eq!(inventory.elements(), &[Element::Fire]);
        assert_eq!(inventory.discard_last(), Some(Element::Fire));
        assert_eq!(inventory.discard_last(), None);
        assert!(inventory.elements().is_empty());
    }
}
