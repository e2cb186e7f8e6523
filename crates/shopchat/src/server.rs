//! The HTTP API.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use shopchat_core::{ERROR_PREFIX, Orchestrator};
use tokio::net::TcpListener;
use tokio_util::task::AbortOnDropHandle;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

use crate::generator::Generator;
use crate::store::{Client, Money, Order, OrderStatus, Store};

/// Maximum accepted request body, in bytes.
pub const MAX_BODY_SIZE: usize = 64 * 1024;

/// Upper bound for a whole request, which may span two model round-trips.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(150);

/// Shared state of all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Answers chat messages.
    pub orchestrator: Orchestrator,
    /// Creates sample data, and owns the store.
    pub generator: Arc<Generator>,
}

impl AppState {
    #[inline]
    fn store(&self) -> &Store {
        self.generator.store()
    }
}

/// Body of `POST /api/chat`.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    /// The user message. Missing or `null` means an empty message.
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of `POST /api/chat`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The assistant's answer.
    pub response: String,
}

/// An order together with the name of its client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    /// Order ID.
    pub id: u64,
    /// Product name.
    pub product_name: String,
    /// Number of items.
    pub quantity: u32,
    /// Unit price in PLN.
    pub price: Money,
    /// Current status.
    pub status: OrderStatus,
    /// When the order was placed.
    pub order_date: NaiveDateTime,
    /// The client who placed the order.
    pub client_id: u64,
    /// `"<first name> <last name>"` of the client.
    pub client_name: String,
}

impl OrderView {
    fn new(order: Order, client: Option<&Client>) -> Self {
        Self {
            id: order.id,
            product_name: order.product_name,
            quantity: order.quantity,
            price: order.price,
            status: order.status,
            order_date: order.order_date,
            client_id: order.client_id,
            client_name: client.map(Client::full_name).unwrap_or_default(),
        }
    }
}

/// Builds the router with all routes and middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/api/chat", post(handle_chat))
        .route("/api/add-client", post(handle_add_client))
        .route("/api/add-order", post(handle_add_order))
        .route("/api/clients", get(handle_clients))
        .route("/api/orders", get(handle_orders))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ))
}

/// Serves the API until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("listening on http://{addr}");
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

// ------------------------------
// Handlers

/// GET /health
async fn handle_health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// POST /api/chat
///
/// Always answers 200, failures are reported in the response text.
async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let message = req.message.unwrap_or_default();
    let orchestrator = state.orchestrator.clone();

    // Panics in the task don't take the connection down, and dropping the
    // handler (e.g. on request timeout) aborts the chat.
    let task = AbortOnDropHandle::new(tokio::spawn(async move {
        orchestrator.chat(&message).await
    }));
    let response = match task.await {
        Ok(response) => response,
        Err(err) => {
            error!("chat task failed: {err}");
            format!("{ERROR_PREFIX}{err}")
        }
    };
    Json(ChatResponse { response })
}

/// POST /api/add-client
async fn handle_add_client(State(state): State<AppState>) -> Json<Client> {
    Json(state.generator.generate_client())
}

/// POST /api/add-order
async fn handle_add_order(
    State(state): State<AppState>,
) -> Result<Json<OrderView>, (StatusCode, Json<Value>)> {
    let order = state.generator.generate_order().map_err(|err| {
        error!("failed to generate an order: {err}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": err.to_string() })),
        )
    })?;
    let client = state.store().client(order.client_id);
    Ok(Json(OrderView::new(order, client.as_ref())))
}

/// GET /api/clients
async fn handle_clients(State(state): State<AppState>) -> Json<Vec<Client>> {
    Json(state.store().clients())
}

/// GET /api/orders
async fn handle_orders(State(state): State<AppState>) -> Json<Vec<OrderView>> {
    let mut snapshot = state.store().snapshot();
    let orders = std::mem::take(&mut snapshot.orders)
        .into_iter()
        .map(|order| {
            let client = snapshot.client(order.client_id);
            OrderView::new(order, client)
        })
        .collect();
    Json(orders)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, header};
    use http_body_util::BodyExt;
    use shopchat_core::OrchestratorBuilder;
    use shopchat_core::tool::{Tool, ToolResult};
    use shopchat_model::ToolCallRequest;
    use shopchat_test_model::{PresetEvent, PresetResponse, TestModelProvider};
    use tower::ServiceExt;

    use super::*;
    use crate::AssistantBuilder;

    fn state_with(provider: TestModelProvider) -> AppState {
        let store = Arc::new(Store::default());
        AppState {
            orchestrator: AssistantBuilder::with_model_provider(
                provider,
                Arc::clone(&store),
            )
            .build(),
            generator: Arc::new(Generator::with_seed(store, 3)),
        }
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = router(state_with(TestModelProvider::default()));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_chat() {
        let mut provider = TestModelProvider::default();
        provider.add_response(PresetResponse::with_text("Hello!"));
        provider.add_response(PresetResponse::with_text("Empty?"));
        let app = router(state_with(provider.clone()));

        let response = app
            .clone()
            .oneshot(post_json("/api/chat", r#"{"message":"Hi"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "response": "Hello!" }));

        let response = app.oneshot(post_json("/api/chat", "{}")).await.unwrap();
        assert_eq!(body_json(response).await["response"], "Empty?");

        let requests = provider.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[1].messages,
            [shopchat_model::ModelMessage::User(String::new())]
        );
    }

    #[tokio::test]
    async fn test_chat_body_limit() {
        let app = router(state_with(TestModelProvider::default()));
        let message = "x".repeat(MAX_BODY_SIZE + 1);
        let body = serde_json::to_string(&json!({ "message": message })).unwrap();
        let response = app.oneshot(post_json("/api/chat", &body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    struct PanickingTool;

    impl Tool for PanickingTool {
        type Input = Value;

        fn name(&self) -> &str {
            "explode"
        }

        fn description(&self) -> &str {
            "Always panics"
        }

        fn parameter_schema(&self) -> &Value {
            static SCHEMA: Value = Value::Null;
            &SCHEMA
        }

        fn execute(
            &self,
            input: Value,
        ) -> impl Future<Output = ToolResult> + Send + 'static {
            async move {
                if input.is_object() {
                    panic!("tool exploded");
                }
                Ok(input.to_string())
            }
        }
    }

    #[tokio::test]
    async fn test_chat_survives_panicking_tool() {
        let mut provider = TestModelProvider::default();
        provider.add_response(PresetResponse::with_events([
            PresetEvent::ToolCall(ToolCallRequest::new("explode", None)),
        ]));
        provider.add_response(PresetResponse::with_text("The tool broke."));
        let store = Arc::new(Store::default());
        let state = AppState {
            orchestrator: OrchestratorBuilder::with_model_provider(
                provider.clone(),
            )
                .with_tool(PanickingTool)
                .build(),
            generator: Arc::new(Generator::with_seed(store, 1)),
        };

        let Json(resp) = handle_chat(
            State(state),
            Json(ChatRequest {
                message: Some("boom".to_owned()),
            }),
        )
        .await;
        assert_eq!(resp.response, "The tool broke.");
        assert_eq!(provider.requests().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_chat_is_aborted() {
        let mut provider = TestModelProvider::default();
        provider.set_delay(Duration::from_secs(10));
        provider.add_response(PresetResponse::with_events([
            PresetEvent::ToolCall(ToolCallRequest::new("getClientCount", None)),
        ]));
        provider.add_response(PresetResponse::with_text("No clients yet."));
        let state = state_with(provider.clone());

        let chat = handle_chat(
            State(state),
            Json(ChatRequest {
                message: Some("how many clients?".to_owned()),
            }),
        );
        let result = tokio::time::timeout(Duration::from_secs(1), chat).await;
        assert!(result.is_err());

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(provider.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_generate_and_list() {
        let state = state_with(TestModelProvider::default());

        let Json(client) = handle_add_client(State(state.clone())).await;
        assert_eq!(client.id, 1);

        let Json(order) = handle_add_order(State(state.clone())).await.unwrap();
        assert_eq!(order.id, 1);
        assert_eq!(order.client_id, 1);
        assert_eq!(order.client_name, client.full_name());

        let Json(clients) = handle_clients(State(state.clone())).await;
        assert_eq!(clients.len(), 1);

        let Json(orders) = handle_orders(State(state)).await;
        assert_eq!(orders.len(), 1);
        let json = serde_json::to_value(&orders[0]).unwrap();
        for key in [
            "id",
            "productName",
            "quantity",
            "price",
            "status",
            "orderDate",
            "clientId",
            "clientName",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }
}
