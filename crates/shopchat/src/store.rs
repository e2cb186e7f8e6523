//! The in-memory shop database.

mod model;

use parking_lot::RwLock;

pub use model::{
    Client, Money, NewClient, NewOrder, Order, OrderStatus, ParseStatusError,
};

/// Errors returned by [`Store`] writes.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The order references a client that doesn't exist.
    #[error("client not found with ID: {0}")]
    ClientNotFound(u64),
}

/// A consistent copy of all tables.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    /// All clients, by ascending ID.
    pub clients: Vec<Client>,
    /// All orders, by ascending ID.
    pub orders: Vec<Order>,
}

impl Snapshot {
    /// Returns the client with the given ID.
    #[inline]
    pub fn client(&self, id: u64) -> Option<&Client> {
        lookup(&self.clients, id)
    }
}

/// Clients and their orders, shared by the tools and the HTTP handlers.
///
/// Rows are never deleted, so an ID is its 1-based position in its table.
/// Readers get owned copies and never hold the lock across an await.
#[derive(Debug, Default)]
pub struct Store {
    tables: RwLock<Snapshot>,
}

impl Store {
    /// Stores a new client and returns it with its ID.
    pub fn insert_client(&self, client: NewClient) -> Client {
        let mut tables = self.tables.write();
        let client = Client {
            id: next_id(tables.clients.len()),
            first_name: client.first_name,
            last_name: client.last_name,
            email: client.email,
            phone: client.phone,
            registration_date: client.registration_date,
        };
        tables.clients.push(client.clone());
        debug!("inserted client {}", client.id);
        client
    }

    /// Stores a new order and returns it with its ID.
    pub fn insert_order(&self, order: NewOrder) -> Result<Order, StoreError> {
        let mut tables = self.tables.write();
        if lookup(&tables.clients, order.client_id).is_none() {
            return Err(StoreError::ClientNotFound(order.client_id));
        }
        let order = Order {
            id: next_id(tables.orders.len()),
            product_name: order.product_name,
            quantity: order.quantity,
            price: order.price,
            order_date: order.order_date,
            status: order.status,
            client_id: order.client_id,
        };
        tables.orders.push(order.clone());
        debug!("inserted order {} for client {}", order.id, order.client_id);
        Ok(order)
    }

    /// Returns a copy of both tables taken under one lock.
    pub fn snapshot(&self) -> Snapshot {
        self.tables.read().clone()
    }

    // ------------------------------
    // Clients

    /// Returns all clients.
    pub fn clients(&self) -> Vec<Client> {
        self.tables.read().clients.clone()
    }

    /// Returns the client with the given ID.
    pub fn client(&self, id: u64) -> Option<Client> {
        lookup(&self.tables.read().clients, id).cloned()
    }

    /// Returns the client with exactly this email address.
    pub fn client_by_email(&self, email: &str) -> Option<Client> {
        let tables = self.tables.read();
        tables.clients.iter().find(|c| c.email == email).cloned()
    }

    /// Returns clients whose first or last name contains `name`, ignoring
    /// case.
    pub fn search_clients_by_name(&self, name: &str) -> Vec<Client> {
        let needle = name.to_lowercase();
        let tables = self.tables.read();
        tables
            .clients
            .iter()
            .filter(|c| {
                c.first_name.to_lowercase().contains(&needle)
                    || c.last_name.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    /// Returns the number of clients.
    pub fn client_count(&self) -> usize {
        self.tables.read().clients.len()
    }

    // ------------------------------
    // Orders

    /// Returns all orders.
    pub fn orders(&self) -> Vec<Order> {
        self.tables.read().orders.clone()
    }

    /// Returns the order with the given ID.
    pub fn order(&self, id: u64) -> Option<Order> {
        lookup(&self.tables.read().orders, id).cloned()
    }

    /// Returns the orders placed by a client.
    pub fn orders_for_client(&self, client_id: u64) -> Vec<Order> {
        self.filter_orders(|o| o.client_id == client_id)
    }

    /// Returns the orders in the given status.
    pub fn orders_by_status(&self, status: OrderStatus) -> Vec<Order> {
        self.filter_orders(|o| o.status == status)
    }

    /// Returns orders whose product name contains `product`, ignoring case.
    pub fn search_orders_by_product(&self, product: &str) -> Vec<Order> {
        let needle = product.to_lowercase();
        self.filter_orders(|o| o.product_name.to_lowercase().contains(&needle))
    }

    /// Returns the number of orders.
    pub fn order_count(&self) -> usize {
        self.tables.read().orders.len()
    }

    /// Returns the value of all orders of a client, or `None` if the client
    /// has no orders.
    pub fn total_spent_by_client(&self, client_id: u64) -> Option<Money> {
        let tables = self.tables.read();
        let mut orders = tables
            .orders
            .iter()
            .filter(|o| o.client_id == client_id)
            .peekable();
        orders.peek()?;
        Some(orders.map(Order::value).sum())
    }

    /// Returns the number of orders of a client.
    pub fn order_count_for_client(&self, client_id: u64) -> usize {
        let tables = self.tables.read();
        tables
            .orders
            .iter()
            .filter(|o| o.client_id == client_id)
            .count()
    }

    fn filter_orders(&self, pred: impl Fn(&Order) -> bool) -> Vec<Order> {
        let tables = self.tables.read();
        tables.orders.iter().filter(|o| pred(o)).cloned().collect()
    }
}

#[inline]
fn next_id(len: usize) -> u64 {
    len as u64 + 1
}

trait Row {
    fn id(&self) -> u64;
}

impl Row for Client {
    #[inline]
    fn id(&self) -> u64 {
        self.id
    }
}

impl Row for Order {
    #[inline]
    fn id(&self) -> u64 {
        self.id
    }
}

fn lookup<R: Row>(rows: &[R], id: u64) -> Option<&R> {
    let idx = usize::try_from(id.checked_sub(1)?).ok()?;
    rows.get(idx).filter(|row| row.id() == id)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    fn now() -> NaiveDateTime {
        day().and_hms_opt(12, 0, 0).unwrap()
    }

    fn new_client(first: &str, last: &str) -> NewClient {
        NewClient {
            first_name: first.to_owned(),
            last_name: last.to_owned(),
            email: format!("{}.{}@email.pl", first, last).to_lowercase(),
            phone: "+48123456789".to_owned(),
            registration_date: day(),
        }
    }

    fn new_order(client_id: u64, product: &str, qty: u32, pln: u64) -> NewOrder {
        NewOrder {
            product_name: product.to_owned(),
            quantity: qty,
            price: Money::from_pln(pln),
            order_date: now(),
            status: OrderStatus::New,
            client_id,
        }
    }

    #[test]
    fn test_ids_are_sequential() {
        let store = Store::default();
        assert_eq!(store.insert_client(new_client("Jan", "Nowak")).id, 1);
        assert_eq!(store.insert_client(new_client("Anna", "Mazur")).id, 2);
        assert_eq!(store.insert_order(new_order(2, "Laptop", 1, 100)).unwrap().id, 1);
        assert_eq!(store.insert_order(new_order(1, "Mysz", 1, 60)).unwrap().id, 2);

        assert_eq!(store.client(2).unwrap().first_name, "Anna");
        assert_eq!(store.client(0), None);
        assert_eq!(store.client(3), None);
        assert_eq!(store.order(2).unwrap().product_name, "Mysz");
        assert_eq!(store.client_count(), 2);
        assert_eq!(store.order_count(), 2);
    }

    #[test]
    fn test_snapshot_client_lookup() {
        let store = Store::default();
        store.insert_client(new_client("Jan", "Nowak"));
        store.insert_client(new_client("Anna", "Mazur"));

        let snapshot = store.snapshot();
        assert_eq!(snapshot.client(2).unwrap().last_name, "Mazur");
        assert!(snapshot.client(0).is_none());
        assert!(snapshot.client(3).is_none());
    }

    #[test]
    fn test_order_requires_client() {
        let store = Store::default();
        let err = store.insert_order(new_order(7, "Laptop", 1, 100)).unwrap_err();
        assert_eq!(err, StoreError::ClientNotFound(7));
        assert_eq!(store.order_count(), 0);
    }

    #[test]
    fn test_searches() {
        let store = Store::default();
        store.insert_client(new_client("Jan", "Kowalski"));
        store.insert_client(new_client("Anna", "Kowalczyk"));
        store.insert_client(new_client("Piotr", "Nowak"));
        store.insert_order(new_order(1, "Dysk SSD", 1, 300)).unwrap();
        store.insert_order(new_order(2, "Laptop", 1, 2000)).unwrap();

        let names: Vec<_> = store
            .search_clients_by_name("KOWAL")
            .into_iter()
            .map(|c| c.first_name)
            .collect();
        assert_eq!(names, ["Jan", "Anna"]);
        assert!(store.search_clients_by_name("zz").is_empty());

        assert_eq!(
            store.client_by_email("piotr.nowak@email.pl").map(|c| c.id),
            Some(3)
        );
        assert_eq!(store.client_by_email("PIOTR.NOWAK@email.pl"), None);

        let orders = store.search_orders_by_product("ssd");
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].client_id, 1);
        assert_eq!(store.orders_by_status(OrderStatus::New).len(), 2);
        assert!(store.orders_by_status(OrderStatus::Shipped).is_empty());
    }

    #[test]
    fn test_totals() {
        let store = Store::default();
        store.insert_client(new_client("Jan", "Kowalski"));
        store.insert_client(new_client("Anna", "Mazur"));
        store.insert_order(new_order(1, "Laptop", 2, 500)).unwrap();
        store
            .insert_order(NewOrder {
                price: Money::from_grosze(23450),
                ..new_order(1, "Mysz", 1, 0)
            })
            .unwrap();

        assert_eq!(
            store.total_spent_by_client(1),
            Some(Money::from_grosze(123450))
        );
        assert_eq!(store.total_spent_by_client(2), None);
        assert_eq!(store.order_count_for_client(1), 2);
        assert_eq!(store.orders_for_client(2), vec![]);
    }
}
