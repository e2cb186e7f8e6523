use chrono::NaiveDate;

use crate::store::{Money, NewClient, NewOrder, OrderStatus, Store};

/// Five clients, client 3 and 4 without orders, client 5 spent 1234.50.
pub(super) fn sample_store() -> Store {
    let store = Store::default();
    let registered = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
    let ordered = NaiveDate::from_ymd_opt(2026, 3, 1)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap();

    for (first, last) in [
        ("Anna", "Nowak"),
        ("Piotr", "Wiśniewski"),
        ("Maria", "Mazur"),
        ("Tomasz", "Kowalczyk"),
        ("Jan", "Kowalski"),
    ] {
        store.insert_client(NewClient {
            first_name: first.to_owned(),
            last_name: last.to_owned(),
            email: format!("{first}.{last}@email.pl").to_lowercase(),
            phone: "+48500100200".to_owned(),
            registration_date: registered,
        });
    }

    for (client_id, product, quantity, grosze, status) in [
        (5, "Laptop", 1, 100_000, OrderStatus::Delivered),
        (5, "Mysz", 2, 11_725, OrderStatus::Shipped),
        (1, "Laptop", 1, 204_900, OrderStatus::New),
        (2, "Router", 3, 5_000, OrderStatus::New),
        (1, "Monitor", 1, 80_000, OrderStatus::Cancelled),
    ] {
        store
            .insert_order(NewOrder {
                product_name: product.to_owned(),
                quantity,
                price: Money::from_grosze(grosze),
                order_date: ordered,
                status,
                client_id,
            })
            .unwrap();
    }
    store
}
