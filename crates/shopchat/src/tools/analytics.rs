use std::cmp::Reverse;
use std::collections::BTreeMap;

use super::format::{self, NO_CLIENT_ORDERS, NO_CLIENTS, NO_ORDERS};
use super::{NoArguments, Query};
use crate::store::{Client, Money, Order, Snapshot, Store};

struct ClientStats<'a> {
    client: &'a Client,
    order_count: usize,
    spent: Money,
}

fn client_stats(snapshot: &Snapshot) -> Vec<ClientStats<'_>> {
    snapshot
        .clients
        .iter()
        .map(|client| {
            let orders = || {
                snapshot.orders.iter().filter(move |o| o.client_id == client.id)
            };
            ClientStats {
                client,
                order_count: orders().count(),
                spent: orders().map(Order::value).sum(),
            }
        })
        .collect()
}

/// `getDatabaseSummary`
pub struct GetDatabaseSummary;

impl Query for GetDatabaseSummary {
    const NAME: &'static str = "getDatabaseSummary";
    const DESCRIPTION: &'static str = "Returns a database summary: the number \
        of clients, the number of orders and the total value of all orders.";
    type Input = NoArguments;

    fn run(store: &Store, _input: NoArguments) -> String {
        let snapshot = store.snapshot();
        let total: Money = snapshot.orders.iter().map(Order::value).sum();
        format!(
            "Database summary:\n\
             - Number of clients: {}\n\
             - Number of orders: {}\n\
             - Total value of orders: {total} PLN",
            snapshot.clients.len(),
            snapshot.orders.len(),
        )
    }
}

/// `getClientsRankedByOrderCount`
pub struct GetClientsRankedByOrderCount;

impl Query for GetClientsRankedByOrderCount {
    const NAME: &'static str = "getClientsRankedByOrderCount";
    const DESCRIPTION: &'static str = "Ranks clients by the number of orders, \
        the client with the most orders first.";
    type Input = NoArguments;

    fn run(store: &Store, _input: NoArguments) -> String {
        let snapshot = store.snapshot();
        if snapshot.clients.is_empty() {
            return NO_CLIENTS.to_owned();
        }
        let mut stats = client_stats(&snapshot);
        stats.sort_by_key(|s| Reverse(s.order_count));
        format::ranking(
            "Clients ranked by number of orders:",
            stats.iter().map(|s| {
                format!(
                    "{} - {} order(s), spent in total: {} PLN",
                    s.client.full_name(),
                    s.order_count,
                    s.spent
                )
            }),
        )
    }
}

/// `getClientsRankedBySpending`
pub struct GetClientsRankedBySpending;

impl Query for GetClientsRankedBySpending {
    const NAME: &'static str = "getClientsRankedBySpending";
    const DESCRIPTION: &'static str = "Ranks clients by the amount spent, \
        the client who spent the most first.";
    type Input = NoArguments;

    fn run(store: &Store, _input: NoArguments) -> String {
        let snapshot = store.snapshot();
        if snapshot.clients.is_empty() {
            return NO_CLIENTS.to_owned();
        }
        let mut stats = client_stats(&snapshot);
        stats.sort_by_key(|s| Reverse(s.spent));
        format::ranking(
            "Clients ranked by money spent:",
            stats.iter().map(|s| {
                format!(
                    "{} - spent {} PLN ({} order(s))",
                    s.client.full_name(),
                    s.spent,
                    s.order_count
                )
            }),
        )
    }
}

/// `getMostPopularProducts`
pub struct GetMostPopularProducts;

impl Query for GetMostPopularProducts {
    const NAME: &'static str = "getMostPopularProducts";
    const DESCRIPTION: &'static str =
        "Returns the most popular products by number of orders.";
    type Input = NoArguments;

    fn run(store: &Store, _input: NoArguments) -> String {
        let orders = store.orders();
        if orders.is_empty() {
            return NO_ORDERS.to_owned();
        }

        // (orders, items, value) per product
        let mut products: BTreeMap<&str, (usize, u64, Money)> = BTreeMap::new();
        for order in &orders {
            let entry = products
                .entry(order.product_name.as_str())
                .or_insert((0, 0, Money::ZERO));
            entry.0 += 1;
            entry.1 += u64::from(order.quantity);
            entry.2 = entry.2 + order.value();
        }

        let mut ranked: Vec<_> = products.into_iter().collect();
        ranked.sort_by_key(|(_, (count, ..))| Reverse(*count));
        format::ranking(
            "Most popular products:",
            ranked.into_iter().map(|(product, (count, items, value))| {
                format!(
                    "{product} - {count} order(s), {items} item(s), value: {value} PLN"
                )
            }),
        )
    }
}

/// `getTopClientByOrderCount`
pub struct GetTopClientByOrderCount;

impl Query for GetTopClientByOrderCount {
    const NAME: &'static str = "getTopClientByOrderCount";
    const DESCRIPTION: &'static str =
        "Returns the client with the most orders.";
    type Input = NoArguments;

    fn run(store: &Store, _input: NoArguments) -> String {
        let snapshot = store.snapshot();
        if snapshot.clients.is_empty() {
            return NO_CLIENTS.to_owned();
        }
        // The earliest registered client wins a tie.
        let top = client_stats(&snapshot)
            .into_iter()
            .filter(|s| s.order_count > 0)
            .reduce(|best, s| if s.order_count > best.order_count { s } else { best });
        match top {
            Some(s) => format!(
                "Client with the most orders: {}\n\
                 - Number of orders: {}\n\
                 - Spent in total: {} PLN",
                s.client.full_name(),
                s.order_count,
                s.spent
            ),
            None => NO_CLIENT_ORDERS.to_owned(),
        }
    }
}

/// `getTopClientBySpending`
pub struct GetTopClientBySpending;

impl Query for GetTopClientBySpending {
    const NAME: &'static str = "getTopClientBySpending";
    const DESCRIPTION: &'static str =
        "Returns the client who spent the most money.";
    type Input = NoArguments;

    fn run(store: &Store, _input: NoArguments) -> String {
        let snapshot = store.snapshot();
        if snapshot.clients.is_empty() {
            return NO_CLIENTS.to_owned();
        }
        let top = client_stats(&snapshot)
            .into_iter()
            .filter(|s| s.spent > Money::ZERO)
            .reduce(|best, s| if s.spent > best.spent { s } else { best });
        match top {
            Some(s) => format!(
                "Client who spent the most: {}\n\
                 - Spent in total: {} PLN\n\
                 - Number of orders: {}",
                s.client.full_name(),
                s.spent,
                s.order_count
            ),
            None => NO_CLIENT_ORDERS.to_owned(),
        }
    }
}
