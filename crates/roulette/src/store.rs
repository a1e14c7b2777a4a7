use spindle::{Item, ItemId};

/// Ordered list of wheel items with stable, unique ids.
///
/// Edits replace the item value under its id rather than mutating fields in
/// place. Operations referencing an unknown id are no-ops surfaced to the
/// log, so the engine only ever sees fully-formed item lists.
#[derive(Default)]
pub struct ItemStore {
    items: Vec<Item>,
    next_id: u64,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new item with a random hue. Returns its id, or `None` when
    /// the trimmed title is empty.
    pub fn add(&mut self, title: &str) -> Option<ItemId> {
        self.add_with_hue(title, rand::random_range(0.0..1.0))
    }

    pub fn add_with_hue(&mut self, title: &str, hue: f64) -> Option<ItemId> {
        match Item::new(ItemId::from(self.next_id), title, hue) {
            Ok(item) => {
                let id = item.id();
                self.next_id += 1;
                self.items.push(item);
                Some(id)
            }
            Err(e) => {
                log::warn!("refusing to add item: {e}");
                None
            }
        }
    }

    /// Replace-by-id: installs a new item value with the same id and hue.
    pub fn rename(&mut self, id: ItemId, title: &str) -> bool {
        let Some(slot) = self.items.iter_mut().find(|item| item.id() == id) else {
            log::warn!("rename for unknown item id {id}");
            return false;
        };
        match slot.with_title(title) {
            Ok(item) => {
                *slot = item;
                true
            }
            Err(e) => {
                log::warn!("refusing to rename item {id}: {e}");
                false
            }
        }
    }

    pub fn remove(&mut self, id: ItemId) -> bool {
        let Some(position) = self.items.iter().position(|item| item.id() == id) else {
            log::warn!("remove for unknown item id {id}");
            return false;
        };
        self.items.remove(position);
        true
    }

    /// Drops every item and reseeds the wheel; blank titles are skipped.
    pub fn replace_all<I, S>(&mut self, titles: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.items.clear();
        for title in titles {
            self.add(title.as_ref());
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn snapshot(&self) -> Vec<Item> {
        self.items.clone()
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
    fn ids_are_stable_and_unique() {
        let mut store = ItemStore::new();
        let a = store.add("a").unwrap();
        let b = store.add("b").unwrap();
        assert_ne!(a, b);

        store.remove(a);
        let c = store.add("c").unwrap();
        // removed ids are never reused
        assert_ne!(c, a);
        assert_ne!(c, b);
    }

    #[test]
    fn add_trims_and_refuses_blank_titles() {
        let mut store = ItemStore::new();
        assert!(store.add("  padded  ").is_some());
        assert_eq!(store.items()[0].title().as_str(), "padded");
        assert!(store.add("   ").is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn rename_replaces_under_the_same_id() {
        let mut store = ItemStore::new();
        let id = store.add_with_hue("before", 0.5).unwrap();
        assert!(store.rename(id, "after"));
        assert_eq!(store.items()[0].id(), id);
        assert_eq!(store.items()[0].title().as_str(), "after");
        assert_eq!(store.items()[0].hue(), 0.5);
    }

    #[test]
    fn unknown_ids_are_no_ops() {
        let mut store = ItemStore::new();
        store.add("only");
        let before = store.snapshot();
        assert!(!store.rename(ItemId::from(99), "x"));
        assert!(!store.remove(ItemId::from(99)));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn rename_to_blank_is_refused() {
        let mut store = ItemStore::new();
        let id = store.add("keep").unwrap();
        assert!(!store.rename(id, "  "));
        assert_eq!(store.items()[0].title().as_str(), "keep");
    }

    #[test]
    fn replace_all_reseeds_in_order() {
        let mut store = ItemStore::new();
        store.add("old");
        store.replace_all(["x", "y", "  ", "z"]);
        let titles: Vec<&str> = store.items().iter().map(|i| i.title().as_str()).collect();
        assert_eq!(titles, ["x", "y", "z"]);
    }
}
