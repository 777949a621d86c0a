//! Item inventory sorted by the hybrid engine, with a line per item display.

use std::fmt;
use std::num::NonZeroUsize;

use crate::config::SortConfig;
use crate::direction::Direction;
use crate::hybrid::HybridSort;

/// Run size for inventories, they are small and a run of two keeps the merge passes busy.
pub const INVENTORY_RUN_SIZE: NonZeroUsize = match NonZeroUsize::new(2) {
    Some(run_size) => run_size,
    None => panic!("run size must be at least 1"),
};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Item {
    pub name: String,
    pub value: u32,
}

impl Item {
    pub fn new(name: impl Into<String>, value: u32) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    pub items: Vec<Item>,
}

impl Inventory {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// The starting equipment: a sword, a potion, a shield, a bow and a helmet.
    pub fn sample() -> Self {
        Self::new(vec![
            Item::new("Sword", 150),
            Item::new("Potion", 50),
            Item::new("Shield", 100),
            Item::new("Bow", 120),
            Item::new("Helmet", 80),
        ])
    }

    pub fn sort_by_name(&mut self, direction: Direction) {
        engine(direction).sort_by(&mut self.items, |a, b| a.name.cmp(&b.name));
    }

    pub fn sort_by_value(&mut self, direction: Direction) {
        engine(direction).sort_by_key(&mut self.items, |item| item.value);
    }
}

fn engine(direction: Direction) -> HybridSort {
    HybridSort::new(SortConfig::from_run_size(INVENTORY_RUN_SIZE).with_direction(direction))
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            writeln!(f, "{item}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(inventory: &Inventory) -> Vec<(&str, u32)> {
        inventory
            .items
            .iter()
            .map(|item| (item.name.as_str(), item.value))
            .collect()
    }

    #[test]
    fn by_value_ascending() {
        let mut inventory = Inventory::sample();
        inventory.sort_by_value(Direction::Ascending);
        assert_eq!(
            pairs(&inventory),
            [
                ("Potion", 50),
                ("Helmet", 80),
                ("Shield", 100),
                ("Bow", 120),
                ("Sword", 150)
            ]
        );
    }

    #[test]
    fn by_name_descending() {
        let mut inventory = Inventory::sample();
        inventory.sort_by_name(Direction::Descending);
        assert_eq!(
            pairs(&inventory),
            [
                ("Sword", 150),
                ("Shield", 100),
                ("Potion", 50),
                ("Helmet", 80),
                ("Bow", 120)
            ]
        );
    }

    #[test]
    fn resorting_chain() {
        let mut inventory = Inventory::sample();
        inventory.sort_by_name(Direction::Ascending);
        assert_eq!(inventory.items[0].name, "Bow");

        inventory.sort_by_value(Direction::Descending);
        assert_eq!(inventory.items[0], Item::new("Sword", 150));

        inventory.sort_by_value(Direction::Ascending);
        assert_eq!(inventory.items[4], Item::new("Sword", 150));
    }

    #[test]
    fn display() {
        assert_eq!(Item::new("Bow", 120).to_string(), "Bow: 120");

        let mut inventory = Inventory::sample();
        inventory.sort_by_value(Direction::Ascending);
        assert_eq!(
            inventory.to_string(),
            "Potion: 50\nHelmet: 80\nShield: 100\nBow: 120\nSword: 150\n"
        );
        assert_eq!(Inventory::default().to_string(), "");
    }
}
