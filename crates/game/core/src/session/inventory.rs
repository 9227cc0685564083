use std::collections::BTreeMap;
use std::fmt;

/// Items carried by the player, keyed by name.
///
/// Counts stack, but game rules only ask whether an item is held.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Inventory {
    items: BTreeMap<String, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: impl Into<String>) {
        *self.items.entry(item.into()).or_insert(0) += 1;
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items.contains_key(item)
    }

    /// Case-insensitive lookup, returning the stored name.
    pub fn find(&self, item: &str) -> Option<&str> {
        let lowered = item.to_lowercase();
        self.items
            .keys()
            .find(|name| name.to_lowercase() == lowered)
            .map(String::as_str)
    }

    pub fn count(&self, item: &str) -> u32 {
        self.items.get(item).copied().unwrap_or(0)
    }

    pub fn contains_all<'a>(&self, items: impl IntoIterator<Item = &'a String>) -> bool {
        items.into_iter().all(|item| self.contains(item))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.items.iter().map(|(name, count)| (name.as_str(), *count))
    }

    /// Number of distinct items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (index, (name, count)) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            f.write_str(name)?;
            if count > 1 {
                write!(f, " x{count}")?;
            }
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stacking_and_lookup() {
        let mut inventory = Inventory::new();
        inventory.add("Head Of Exodia");
        inventory.add("Head Of Exodia");
        inventory.add("Keep Key");

        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory.count("Head Of Exodia"), 2);
        assert_eq!(inventory.find("head of exodia"), Some("Head Of Exodia"));
        assert!(!inventory.contains("head of exodia"));
        assert_eq!(inventory.to_string(), "[Head Of Exodia x2, Keep Key]");
    }

    #[test]
    fn contains_all_checks_every_item() {
        let mut inventory = Inventory::new();
        inventory.add("A");
        let required = vec!["A".to_string(), "B".to_string()];
        assert!(!inventory.contains_all(&required));
        inventory.add("B");
        assert!(inventory.contains_all(&required));
        assert!(Inventory::new().contains_all(&Vec::new()));
    }

    #[test]
    fn empty_inventory_displays_brackets() {
        assert_eq!(Inventory::new().to_string(), "[]");
    }
}
