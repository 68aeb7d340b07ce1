//! Subcommand implementations over the cart store.

use minicart_core::{ItemId, NewItem, PriceValue};
use minicart_store::{CartEvent, CartStore, PersistenceAdapter};

/// Add a product and print the resulting notification.
#[allow(clippy::print_stdout)]
pub fn add<P: PersistenceAdapter>(
    store: &mut CartStore<P>,
    name: Option<String>,
    price: Option<String>,
    id: Option<String>,
    image: Option<String>,
    qty: Option<u32>,
) {
    let incoming = NewItem {
        id: id.map(ItemId::new),
        name,
        price: price.map(PriceValue::from),
        image,
        quantity: qty,
    };
    let landed = store.add(incoming);
    for event in store.take_events() {
        if let CartEvent::Notify { message, .. } = event {
            println!("Added \"{message}\" to cart (id {landed})");
        }
    }
}

/// Remove a line; unknown ids are silent no-ops, matching the widget.
pub fn remove<P: PersistenceAdapter>(store: &mut CartStore<P>, id: &str) {
    store.remove(&ItemId::new(id));
    store.take_events();
}

/// Set an absolute quantity; zero or below removes the line.
pub fn set_qty<P: PersistenceAdapter>(store: &mut CartStore<P>, id: &str, qty: i64) {
    store.update_quantity(&ItemId::new(id), qty);
    store.take_events();
}

/// Empty the cart.
pub fn clear<P: PersistenceAdapter>(store: &mut CartStore<P>) {
    store.clear();
    store.take_events();
}

/// Print the cart lines, unit count, and total.
#[allow(clippy::print_stdout)]
pub fn show<P: PersistenceAdapter>(store: &CartStore<P>) {
    let items = store.snapshot();
    if items.is_empty() {
        println!("Cart is empty");
        return;
    }
    for line in &items {
        println!(
            "{:<24} {:>4} x {:>10}  = {:>10}  [{}]",
            line.name,
            line.quantity,
            line.price.to_string(),
            line.line_total().to_string(),
            line.id
        );
    }
    println!("{} item(s), total {}", store.count(), store.total());
}

#[cfg(test)]
mod tests {
    use super::*;
    use minicart_store::{MemoryStorage, SnapshotStore, WidgetConfig};
    use rust_decimal::dec;

    fn empty_store() -> CartStore<SnapshotStore<MemoryStorage>> {
        let config = WidgetConfig::default();
        CartStore::open(SnapshotStore::new(MemoryStorage::new(), &config), config)
    }

    #[test]
    fn test_add_builds_the_incoming_item_from_flags() {
        let mut store = empty_store();
        add(
            &mut store,
            Some("Mug".to_owned()),
            Some("$9.50".to_owned()),
            Some("mug-01".to_owned()),
            None,
            Some(2),
        );

        let items = store.snapshot();
        assert_eq!(items.len(), 1);
        let line = items.first().unwrap();
        assert_eq!(line.id, ItemId::new("mug-01"));
        assert_eq!(line.price.amount(), dec!(9.50));
        assert_eq!(line.quantity, 2);
        // The notification printout path drained the event queue
        assert_eq!(store.take_events(), Vec::new());
    }

    #[test]
    fn test_add_by_id_only_merges_with_the_resident_line() {
        let mut store = empty_store();
        add(
            &mut store,
            Some("Mug".to_owned()),
            Some("$9.50".to_owned()),
            Some("mug-01".to_owned()),
            None,
            None,
        );
        add(&mut store, None, None, Some("mug-01".to_owned()), None, None);

        let items = store.snapshot();
        assert_eq!(items.len(), 1);
        assert_eq!(items.first().unwrap().quantity, 2);
        assert_eq!(store.total(), dec!(19.00));
    }

    #[test]
    fn test_set_qty_zero_removes_the_line() {
        let mut store = empty_store();
        add(
            &mut store,
            Some("Mug".to_owned()),
            Some("$9.50".to_owned()),
            Some("mug-01".to_owned()),
            None,
            None,
        );
        set_qty(&mut store, "mug-01", 4);
        assert_eq!(store.snapshot().first().unwrap().quantity, 4);

        set_qty(&mut store, "mug-01", 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_unknown_id_is_a_silent_no_op() {
        let mut store = empty_store();
        add(
            &mut store,
            Some("Mug".to_owned()),
            Some("$9.50".to_owned()),
            Some("mug-01".to_owned()),
            None,
            None,
        );
        remove(&mut store, "ghost");
        assert_eq!(store.snapshot().len(), 1);

        remove(&mut store, "mug-01");
        assert!(store.is_empty());
    }

    #[test]
    fn test_clear_and_show_handle_empty_and_populated_carts() {
        let mut store = empty_store();
        show(&store);

        add(
            &mut store,
            Some("Teapot".to_owned()),
            Some("24".to_owned()),
            None,
            Some("https://cdn.example/teapot.png".to_owned()),
            Some(2),
        );
        show(&store);
        assert_eq!(store.count(), 2);

        clear(&mut store);
        assert!(store.is_empty());
        assert_eq!(store.take_events(), Vec::new());
    }
}
