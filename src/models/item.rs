use serde::Serialize;
use serde_json::Value;

/// In-memory store for the generic items resource. Ids are slot indices;
/// removing an item vacates its slot, so ids stay stable and are never
/// reused.
#[derive(Debug, Default)]
pub struct ItemStore {
    slots: Vec<Option<Value>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoredItem {
    pub id: usize,
    pub item: Value,
}

impl ItemStore {
    pub fn insert(&mut self, item: Value) -> usize {
        self.slots.push(Some(item));
        self.slots.len() - 1
    }

    pub fn list(&self) -> Vec<StoredItem> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| {
                slot.as_ref().map(|item| StoredItem {
                    id,
                    item: item.clone(),
                })
            })
            .collect()
    }

    /// Replaces an existing item. Returns false when the id was never
    /// assigned or has been removed.
    pub fn replace(&mut self, id: usize, item: Value) -> bool {
        match self.slots.get_mut(id) {
            Some(slot) if slot.is_some() => {
                *slot = Some(item);
                true
            }
            _ => false,
        }
    }

    pub fn remove(&mut self, id: usize) -> bool {
        match self.slots.get_mut(id) {
            Some(slot) if slot.is_some() => {
                *slot = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn insert_assigns_sequential_ids() {
        let mut store = ItemStore::default();
        assert_eq!(store.insert(json!({"name": "first"})), 0);
        assert_eq!(store.insert(json!({"name": "second"})), 1);
        assert_eq!(store.list().len(), 2);
    }

    #[test]
    fn replace_updates_only_live_slots() {
        let mut store = ItemStore::default();
        let id = store.insert(json!({"name": "draft"}));

        assert!(store.replace(id, json!({"name": "final"})));
        assert_eq!(store.list()[0].item["name"], "final");

        assert!(!store.replace(99, json!({"name": "nowhere"})));
    }

    #[test]
    fn remove_keeps_later_ids_stable() {
        let mut store = ItemStore::default();
        let first = store.insert(json!(1));
        let second = store.insert(json!(2));

        assert!(store.remove(first));
        assert!(!store.remove(first), "removing twice should fail");

        let listed = store.list();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, second);

        // New inserts must not reuse the vacated slot
        assert_eq!(store.insert(json!(3)), 2);
    }
}
