//! Random sample data for trying the assistant out.

use std::sync::Arc;

use chrono::{Local, TimeDelta};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::store::{
    Client, Money, NewClient, NewOrder, Order, OrderStatus, Store, StoreError,
};

const FIRST_NAMES: &[&str] = &[
    "Jan", "Anna", "Piotr", "Maria", "Krzysztof", "Katarzyna", "Andrzej",
    "Małgorzata", "Tomasz", "Agnieszka", "Marcin", "Barbara", "Paweł", "Ewa",
    "Michał", "Joanna",
];

const LAST_NAMES: &[&str] = &[
    "Nowak", "Kowalski", "Wiśniewski", "Wójcik", "Kowalczyk", "Kamiński",
    "Lewandowski", "Zieliński", "Szymański", "Woźniak", "Dąbrowski",
    "Kozłowski", "Jankowski", "Mazur",
];

const PRODUCTS: &[&str] = &[
    "Laptop", "Smartfon", "Tablet", "Słuchawki", "Klawiatura", "Mysz",
    "Monitor", "Drukarka", "Kamera", "Głośniki", "Powerbank", "Pendrive",
    "Dysk SSD", "Router",
];

/// Fills a [`Store`] with random clients and orders.
pub struct Generator<R = StdRng> {
    store: Arc<Store>,
    rng: Mutex<R>,
}

impl Generator<StdRng> {
    /// Creates a generator seeded from the OS.
    pub fn new(store: Arc<Store>) -> Self {
        Self::with_rng(store, StdRng::from_entropy())
    }

    /// Creates a generator that always produces the same sequence.
    pub fn with_seed(store: Arc<Store>, seed: u64) -> Self {
        Self::with_rng(store, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Generator<R> {
    /// Creates a generator drawing from `rng`.
    pub fn with_rng(store: Arc<Store>, rng: R) -> Self {
        Self {
            store,
            rng: Mutex::new(rng),
        }
    }

    /// Returns the store this generator writes to.
    #[inline]
    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    /// Stores a random client.
    pub fn generate_client(&self) -> Client {
        let client = {
            let mut rng = self.rng.lock();
            let first_name = pick(&mut *rng, FIRST_NAMES);
            let last_name = pick(&mut *rng, LAST_NAMES);
            let email = format!(
                "{}.{}{}@email.pl",
                first_name.to_lowercase(),
                last_name.to_lowercase(),
                rng.gen_range(0..1000)
            );
            let phone = format!("+48{}", rng.gen_range(100_000_000..1_000_000_000));
            let days_ago = rng.gen_range(0..365);
            NewClient {
                first_name: first_name.to_owned(),
                last_name: last_name.to_owned(),
                email,
                phone,
                registration_date: Local::now().date_naive()
                    - TimeDelta::days(days_ago),
            }
        };
        self.store.insert_client(client)
    }

    /// Stores a random order of a random client, creating a client first if
    /// there is none.
    pub fn generate_order(&self) -> Result<Order, StoreError> {
        let mut clients = self.store.clients();
        if clients.is_empty() {
            clients.push(self.generate_client());
        }

        let order = {
            let mut rng = self.rng.lock();
            let client_id = clients.choose(&mut *rng).map_or(1, |c| c.id);
            let status = OrderStatus::ALL
                .choose(&mut *rng)
                .copied()
                .unwrap_or(OrderStatus::New);
            NewOrder {
                product_name: pick(&mut *rng, PRODUCTS).to_owned(),
                quantity: rng.gen_range(1..=5),
                price: Money::from_pln(rng.gen_range(50..2050)),
                order_date: Local::now().naive_local(),
                status,
                client_id,
            }
        };
        self.store.insert_order(order)
    }

    /// Generates `clients` clients, then `orders` orders.
    pub fn populate(
        &self,
        clients: usize,
        orders: usize,
    ) -> Result<(), StoreError> {
        for _ in 0..clients {
            self.generate_client();
        }
        for _ in 0..orders {
            self.generate_order()?;
        }
        if clients + orders > 0 {
            info!("generated {clients} client(s) and {orders} order(s)");
        }
        Ok(())
    }
}

fn pick<R: Rng>(rng: &mut R, pool: &[&'static str]) -> &'static str {
    pool.choose(rng).copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_client() {
        let generator = Generator::with_seed(Arc::new(Store::default()), 7);
        let today = Local::now().date_naive();

        for expected_id in 1..=20 {
            let client = generator.generate_client();
            assert_eq!(client.id, expected_id);
            assert!(FIRST_NAMES.contains(&client.first_name.as_str()));
            assert!(LAST_NAMES.contains(&client.last_name.as_str()));

            let prefix = format!(
                "{}.{}",
                client.first_name.to_lowercase(),
                client.last_name.to_lowercase()
            );
            assert!(client.email.starts_with(&prefix), "{}", client.email);
            assert!(client.email.ends_with("@email.pl"));

            let digits = client.phone.strip_prefix("+48").unwrap();
            assert_eq!(digits.len(), 9);
            assert!(digits.chars().all(|c| c.is_ascii_digit()));
            assert_ne!(digits.chars().next(), Some('0'));

            assert!(client.registration_date <= today);
            assert!(client.registration_date > today - TimeDelta::days(366));
        }
    }

    #[test]
    fn test_generate_order_creates_client() {
        let store = Arc::new(Store::default());
        let generator = Generator::with_seed(Arc::clone(&store), 1);

        let order = generator.generate_order().unwrap();
        assert_eq!(store.client_count(), 1);
        assert_eq!(order.client_id, 1);
        assert!((1..=5).contains(&order.quantity));
        assert!(order.price >= Money::from_pln(50));
        assert!(order.price <= Money::from_pln(2049));
        assert_eq!(order.price.grosze() % 100, 0);
        assert!(PRODUCTS.contains(&order.product_name.as_str()));
    }

    #[test]
    fn test_same_seed_same_data() {
        let a = Generator::with_seed(Arc::new(Store::default()), 42);
        let b = Generator::with_seed(Arc::new(Store::default()), 42);
        a.populate(3, 5).unwrap();
        b.populate(3, 5).unwrap();

        let (a, b) = (a.store().snapshot(), b.store().snapshot());
        let emails = |s: &crate::store::Snapshot| {
            s.clients.iter().map(|c| c.email.clone()).collect::<Vec<_>>()
        };
        assert_eq!(emails(&a), emails(&b));
        assert_eq!(a.orders.len(), 5);
        for (x, y) in a.orders.iter().zip(&b.orders) {
            assert_eq!(
                (&x.product_name, x.quantity, x.price, x.status, x.client_id),
                (&y.product_name, y.quantity, y.price, y.status, y.client_id)
            );
        }
    }
}
