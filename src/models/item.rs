use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt::Display, str::FromStr};

/// Catalog item identifier as issued by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub i64);

impl Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for ItemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ItemId)
    }
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        ItemId(id)
    }
}

/// A selectable movie from the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    #[serde(default)]
    pub genres: Option<String>,
    #[serde(default)]
    pub avg_rating: Option<f64>,
}

impl Item {
    #[cfg(test)]
    pub(crate) fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id: ItemId(id),
            title: title.into(),
            genres: None,
            avg_rating: None,
        }
    }
}

/// The items loaded for a session, in server order
///
/// Built once from the catalog response and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate ids since identity is the id
    pub fn new(items: Vec<Item>) -> Result<Self, ItemId> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id) {
                return Err(item.id);
            }
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_deserialization_with_optional_fields() {
        let json = r#"{"id": 1, "title": "Toy Story (1995)", "genres": "Animation|Childrens|Comedy", "avgRating": 3.88}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, ItemId(1));
        assert_eq!(item.title, "Toy Story (1995)");
        assert_eq!(item.genres.as_deref(), Some("Animation|Childrens|Comedy"));
        assert_eq!(item.avg_rating, Some(3.88));
    }

    #[test]
    fn test_item_deserialization_without_optional_fields() {
        let item: Item = serde_json::from_str(r#"{"id": 7, "title": "Heat"}"#).unwrap();
        assert_eq!(item, Item::new(7, "Heat"));
    }

    #[test]
    fn test_item_without_title_is_rejected() {
        let result = serde_json::from_str::<Item>(r#"{"id": 7}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_item_with_string_id_is_rejected() {
        let result = serde_json::from_str::<Item>(r#"{"id": "7", "title": "Heat"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_catalog_preserves_order() {
        let catalog = Catalog::new(vec![Item::new(3, "C"), Item::new(1, "A")]).unwrap();
        let ids: Vec<ItemId> = catalog.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![ItemId(3), ItemId(1)]);
        assert_eq!(catalog.get(ItemId(1)).map(|i| i.title.as_str()), Some("A"));
        assert!(!catalog.contains(ItemId(2)));
    }

    #[test]
    fn test_catalog_rejects_duplicate_ids() {
        let result = Catalog::new(vec![Item::new(1, "A"), Item::new(1, "A again")]);
        assert_eq!(result, Err(ItemId(1)));
    }

    #[test]
    fn test_item_id_parse() {
        assert_eq!(" 42 ".parse::<ItemId>(), Ok(ItemId(42)));
        assert!("abc".parse::<ItemId>().is_err());
    }
}
