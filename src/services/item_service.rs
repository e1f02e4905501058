use std::collections::hash_map::Entry;
use std::fmt::Write;

use crate::errors::StoreError;
use crate::state::item::{read_lock, write_lock, Item, ItemStore};

pub const EMPTY_MESSAGE: &str = "Database is empty.";

/// Insert a new item. Fails if the name is already taken.
pub fn create(store: &ItemStore, name: String, price: f64) -> Result<(), StoreError> {
    let mut map = write_lock(store);

    match map.entry(name) {
        Entry::Occupied(_) => Err(StoreError::AlreadyExists),
        Entry::Vacant(slot) => {
            tracing::debug!("Creating item {:?} at {:.2}", slot.key(), price);
            let name = slot.key().clone();
            slot.insert(Item { name, price });
            Ok(())
        }
    }
}

/// Return a copy of the item stored under `name`.
pub fn read(store: &ItemStore, name: &str) -> Result<Item, StoreError> {
    let map = read_lock(store);
    map.get(name).cloned().ok_or(StoreError::NotFound)
}

/// Replace the price of an existing item.
pub fn update(store: &ItemStore, name: &str, price: f64) -> Result<(), StoreError> {
    let mut map = write_lock(store);

    let item = map.get_mut(name).ok_or(StoreError::NotFound)?;
    tracing::debug!("Updating item {:?}: {:.2} -> {:.2}", name, item.price, price);
    *item = Item {
        name: name.to_string(),
        price,
    };
    Ok(())
}

/// Remove an item.
pub fn delete(store: &ItemStore, name: &str) -> Result<(), StoreError> {
    let mut map = write_lock(store);

    match map.remove(name) {
        Some(_) => {
            tracing::debug!("Deleted item {:?} ({} remaining)", name, map.len());
            Ok(())
        }
        None => Err(StoreError::NotFound),
    }
}

/// Number of stored items.
pub fn count(store: &ItemStore) -> usize {
    read_lock(store).len()
}

/// Human-readable listing of every item, in no particular order.
pub fn visualize(store: &ItemStore) -> String {
    let map = read_lock(store);

    if map.is_empty() {
        return EMPTY_MESSAGE.to_string();
    }

    let mut out = String::from("Database Contents:\n------------------\n");
    for (name, item) in map.iter() {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "Item: {}, Price: ${:.2}", name, item.price);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::item::new_store;
    use std::sync::Arc;
    use std::thread;

    fn item_lines(dump: &str) -> Vec<&str> {
        dump.lines().filter(|l| l.starts_with("Item: ")).collect()
    }

    #[test]
    fn create_then_read_returns_the_item() {
        let store = new_store();
        create(&store, "widget".into(), 9.5).unwrap();

        let item = read(&store, "widget").unwrap();
        assert_eq!(
            item,
            Item {
                name: "widget".into(),
                price: 9.5
            }
        );
    }

    #[test]
    fn second_create_fails_regardless_of_price() {
        let store = new_store();
        create(&store, "widget".into(), 1.0).unwrap();

        assert_eq!(
            create(&store, "widget".into(), 1.0),
            Err(StoreError::AlreadyExists)
        );
        assert_eq!(
            create(&store, "widget".into(), 42.0),
            Err(StoreError::AlreadyExists)
        );
        assert_eq!(read(&store, "widget").unwrap().price, 1.0);
    }

    #[test]
    fn read_missing_is_not_found() {
        let store = new_store();
        assert_eq!(read(&store, "ghost"), Err(StoreError::NotFound));
    }

    #[test]
    fn update_missing_is_not_found() {
        let store = new_store();
        assert_eq!(update(&store, "ghost", 3.0), Err(StoreError::NotFound));
        assert_eq!(read(&store, "ghost"), Err(StoreError::NotFound));
    }

    #[test]
    fn update_replaces_price_and_keeps_name() {
        let store = new_store();
        create(&store, "widget".into(), 9.5).unwrap();
        update(&store, "widget", 12.0).unwrap();

        let item = read(&store, "widget").unwrap();
        assert_eq!(item.name, "widget");
        assert_eq!(item.price, 12.0);
    }

    #[test]
    fn delete_removes_and_second_delete_fails() {
        let store = new_store();
        create(&store, "widget".into(), 9.5).unwrap();

        delete(&store, "widget").unwrap();
        assert_eq!(read(&store, "widget"), Err(StoreError::NotFound));
        assert_eq!(delete(&store, "widget"), Err(StoreError::NotFound));
    }

    #[test]
    fn delete_never_created_is_not_found() {
        let store = new_store();
        assert_eq!(delete(&store, "ghost"), Err(StoreError::NotFound));
    }

    #[test]
    fn negative_price_and_empty_name_are_accepted() {
        let store = new_store();
        create(&store, String::new(), -1.25).unwrap();
        assert_eq!(read(&store, "").unwrap().price, -1.25);
    }

    #[test]
    fn keys_match_item_names() {
        let store = new_store();
        create(&store, "a".into(), 1.0).unwrap();
        create(&store, "b".into(), 2.0).unwrap();
        update(&store, "b", 3.0).unwrap();

        let map = read_lock(&store);
        assert!(map.iter().all(|(k, v)| *k == v.name));
    }

    #[test]
    fn visualize_empty_store() {
        let store = new_store();
        assert_eq!(visualize(&store), EMPTY_MESSAGE);
    }

    #[test]
    fn visualize_lists_every_item_with_two_decimals() {
        let store = new_store();
        create(&store, "widget".into(), 9.5).unwrap();
        create(&store, "gadget".into(), 3.0).unwrap();
        create(&store, "gizmo".into(), 0.127).unwrap();

        let dump = visualize(&store);
        assert!(dump.starts_with("Database Contents:\n------------------\n"));

        let mut lines = item_lines(&dump);
        lines.sort_unstable();
        assert_eq!(
            lines,
            vec![
                "Item: gadget, Price: $3.00",
                "Item: gizmo, Price: $0.13",
                "Item: widget, Price: $9.50",
            ]
        );
    }

    #[test]
    fn concurrent_creates_lose_nothing() {
        let store = new_store();
        let threads = 16;
        let per_thread = 50;

        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..per_thread {
                        create(&store, format!("item-{t}-{i}"), i as f64).unwrap();
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(count(&store), threads * per_thread);
        assert_eq!(item_lines(&visualize(&store)).len(), threads * per_thread);
    }

    #[test]
    fn concurrent_duplicate_creates_admit_exactly_one() {
        let store = new_store();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || create(&store, "contested".into(), i as f64).is_ok())
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();

        assert_eq!(winners, 1);
    }
}
