use std::fmt::Write as _;

use crate::store::{Client, Order};

pub(super) const NO_CLIENTS: &str = "No clients in the database.";
pub(super) const NO_ORDERS: &str = "No orders in the database.";
pub(super) const NO_CLIENT_ORDERS: &str = "No client has any orders.";

pub(super) fn client_not_found(id: i64) -> String {
    format!("Client not found with ID: {id}")
}

pub(super) fn client_has_no_orders(client: &Client) -> String {
    format!(
        "Client {} {} has no orders.",
        client.first_name, client.last_name
    )
}

pub(super) fn client_line(c: &Client) -> String {
    format!(
        "ID: {}, First name: {}, Last name: {}, Email: {}, Phone: {}",
        c.id, c.first_name, c.last_name, c.email, c.phone
    )
}

pub(super) fn client_with_registration(c: &Client) -> String {
    format!(
        "{}, Registration date: {}",
        client_line(c),
        c.registration_date
    )
}

pub(super) fn client_match_line(c: &Client) -> String {
    format!(
        "ID: {}, First name: {}, Last name: {}, Email: {}",
        c.id, c.first_name, c.last_name, c.email
    )
}

pub(super) fn order_line(o: &Order) -> String {
    format!(
        "ID: {}, Product: {}, Quantity: {}, Price: {} PLN, Status: {}, Client ID: {}",
        o.id, o.product_name, o.quantity, o.price, o.status, o.client_id
    )
}

pub(super) fn order_with_date(o: &Order) -> String {
    format!(
        "{}, Date: {}",
        order_line(o),
        o.order_date.format("%Y-%m-%dT%H:%M:%S")
    )
}

/// Joins lines under a header, each indented by two spaces.
pub(super) fn listing<I>(header: &str, lines: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut out = String::from(header);
    for line in lines {
        let _ = write!(out, "\n  {line}");
    }
    out
}

/// Joins lines under a header, numbered from 1.
pub(super) fn ranking<I>(header: &str, lines: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut out = String::from(header);
    for (pos, line) in lines.into_iter().enumerate() {
        let _ = write!(out, "\n{}. {line}", pos + 1);
    }
    out
}
