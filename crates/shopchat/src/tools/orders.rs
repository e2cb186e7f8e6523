use schemars::JsonSchema;
use serde::Deserialize;

use super::format::{self, NO_ORDERS};
use super::{ClientIdArgument, IdArgument, NoArguments, Query, row_id};
use crate::store::{OrderStatus, Store};

/// `listAllOrders`
pub struct ListAllOrders;

impl Query for ListAllOrders {
    const NAME: &'static str = "listAllOrders";
    const DESCRIPTION: &'static str =
        "Returns the list of all orders in the database.";
    type Input = NoArguments;

    fn run(store: &Store, _input: NoArguments) -> String {
        let orders = store.orders();
        if orders.is_empty() {
            return NO_ORDERS.to_owned();
        }
        orders
            .iter()
            .map(format::order_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// `getOrderById`
pub struct GetOrderById;

impl Query for GetOrderById {
    const NAME: &'static str = "getOrderById";
    const DESCRIPTION: &'static str = "Returns the order with the given ID.";
    type Input = IdArgument;

    fn run(store: &Store, input: IdArgument) -> String {
        match row_id(input.id).and_then(|id| store.order(id)) {
            Some(order) => format::order_with_date(&order),
            None => format!("Order not found with ID: {}", input.id),
        }
    }
}

/// `getOrdersForClient`
pub struct GetOrdersForClient;

impl Query for GetOrdersForClient {
    const NAME: &'static str = "getOrdersForClient";
    const DESCRIPTION: &'static str =
        "Returns all orders placed by the given client.";
    type Input = ClientIdArgument;

    fn run(store: &Store, input: ClientIdArgument) -> String {
        let Some(client) = row_id(input.client_id).and_then(|id| store.client(id))
        else {
            return format::client_not_found(input.client_id);
        };
        let orders = store.orders_for_client(client.id);
        if orders.is_empty() {
            return format::client_has_no_orders(&client);
        }
        format::listing(
            &format!("Orders of client {}:", client.full_name()),
            orders.iter().map(|o| {
                format!(
                    "ID: {}, Product: {}, Quantity: {}, Price: {} PLN, Status: {}",
                    o.id, o.product_name, o.quantity, o.price, o.status
                )
            }),
        )
    }
}

/// `getOrderCount`
pub struct GetOrderCount;

impl Query for GetOrderCount {
    const NAME: &'static str = "getOrderCount";
    const DESCRIPTION: &'static str =
        "Returns the number of orders in the database.";
    type Input = NoArguments;

    fn run(store: &Store, _input: NoArguments) -> String {
        format!("Number of orders in the database: {}", store.order_count())
    }
}

/// Input of [`GetOrdersByStatus`].
#[derive(Debug, Deserialize, JsonSchema)]
pub struct StatusArgument {
    #[schemars(
        description = "Order status: NEW, PROCESSING, SHIPPED, DELIVERED or CANCELLED."
    )]
    status: String,
}

/// `getOrdersByStatus`
pub struct GetOrdersByStatus;

impl Query for GetOrdersByStatus {
    const NAME: &'static str = "getOrdersByStatus";
    const DESCRIPTION: &'static str = "Returns orders in the given status: \
        NEW, PROCESSING, SHIPPED, DELIVERED, CANCELLED.";
    type Input = StatusArgument;

    fn run(store: &Store, input: StatusArgument) -> String {
        let Ok(status) = input.status.parse::<OrderStatus>() else {
            let valid: Vec<_> =
                OrderStatus::ALL.iter().map(|s| s.as_str()).collect();
            return format!(
                "Invalid status. Valid statuses: {}",
                valid.join(", ")
            );
        };
        let orders = store.orders_by_status(status);
        if orders.is_empty() {
            return format!("No orders with status: {}", input.status);
        }
        format::listing(
            &format!("Orders with status {}:", input.status),
            orders.iter().map(|o| {
                format!(
                    "ID: {}, Product: {}, Client ID: {}",
                    o.id, o.product_name, o.client_id
                )
            }),
        )
    }
}

/// `getTotalSpentByClient`
pub struct GetTotalSpentByClient;

impl Query for GetTotalSpentByClient {
    const NAME: &'static str = "getTotalSpentByClient";
    const DESCRIPTION: &'static str =
        "Calculates how much the given client has spent on all orders.";
    type Input = ClientIdArgument;

    fn run(store: &Store, input: ClientIdArgument) -> String {
        let Some(client) = row_id(input.client_id).and_then(|id| store.client(id))
        else {
            return format::client_not_found(input.client_id);
        };
        match store.total_spent_by_client(client.id) {
            Some(total) => format!(
                "Client {} {} spent in total: {total}",
                client.first_name, client.last_name
            ),
            None => format::client_has_no_orders(&client),
        }
    }
}

/// Input of [`SearchOrdersByProduct`].
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductArgument {
    #[schemars(description = "Product name, or a part of it.")]
    product_name: String,
}

/// `searchOrdersByProduct`
pub struct SearchOrdersByProduct;

impl Query for SearchOrdersByProduct {
    const NAME: &'static str = "searchOrdersByProduct";
    const DESCRIPTION: &'static str = "Finds orders by product name.";
    type Input = ProductArgument;

    fn run(store: &Store, input: ProductArgument) -> String {
        let orders = store.search_orders_by_product(&input.product_name);
        if orders.is_empty() {
            return format!(
                "No orders found for product: {}",
                input.product_name
            );
        }
        format::listing(
            &format!("Orders for product '{}':", input.product_name),
            orders.iter().map(|o| {
                let client = store
                    .client(o.client_id)
                    .map(|c| c.full_name())
                    .unwrap_or_default();
                format!(
                    "ID: {}, Product: {}, Quantity: {}, Price: {} PLN, Client: {client}",
                    o.id, o.product_name, o.quantity, o.price
                )
            }),
        )
    }
}
