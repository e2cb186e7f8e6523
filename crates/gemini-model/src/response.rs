use shopchat_model::{ErrorKind, ModelResponse, ToolCallRequest};

use crate::Error;
use crate::proto::GenerateContentResponse;

/// Interprets a raw `generateContent` body.
///
/// Only the first candidate is inspected. The tool call is the first part
/// carrying a `functionCall`, the text is the text of the leading part.
/// A body that doesn't decode into the expected shape is an error of kind
/// [`ErrorKind::MalformedResponse`]; a body that decodes but has nothing
/// usable yields an empty [`ModelResponse`].
pub fn parse_response(body: &str) -> Result<ModelResponse, Error> {
    let response = serde_json::from_str::<GenerateContentResponse>(body)
        .map_err(|err| {
            Error::new(
                format!("unexpected response body: {err}"),
                ErrorKind::MalformedResponse,
            )
        })?;

    let parts = response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts)
        .unwrap_or_default();

    let text = parts.first().and_then(|part| part.text.clone());
    let tool_call = parts
        .into_iter()
        .find_map(|part| part.function_call)
        .map(|call| ToolCallRequest::new(call.name, call.args));

    Ok(ModelResponse { tool_call, text })
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use shopchat_model::ModelProviderError;

    use super::*;

    #[test]
    fn test_text_response() {
        let body = r#"{
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": "There are 12 clients." }]
                },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "totalTokenCount": 42 }
        }"#;
        let resp = parse_response(body).unwrap();
        assert_eq!(resp, ModelResponse::with_text("There are 12 clients."));
    }

    #[test]
    fn test_first_function_call_wins() {
        let body = r#"{
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "Let me check." },
                        { "functionCall": { "name": "getClientCount", "args": {} } },
                        { "functionCall": { "name": "getOrderCount", "args": {} } }
                    ]
                }
            }]
        }"#;
        let resp = parse_response(body).unwrap();
        let call = resp.tool_call.unwrap();
        assert_eq!(call.name, "getClientCount");
        assert_eq!(resp.text.as_deref(), Some("Let me check."));
    }

    #[test]
    fn test_function_call_arguments() {
        let body = r#"{
            "candidates": [{
                "content": {
                    "parts": [{
                        "functionCall": {
                            "name": "getTotalSpentByClient",
                            "args": { "clientId": 5 }
                        }
                    }]
                }
            }]
        }"#;
        let resp = parse_response(body).unwrap();
        assert_eq!(
            resp.tool_call,
            Some(ToolCallRequest::new(
                "getTotalSpentByClient",
                Some(json!({ "clientId": 5 }))
            ))
        );
        assert!(resp.text.is_none());

        let body = r#"{
            "candidates": [{
                "content": { "parts": [{ "functionCall": { "name": "listAllClients" } }] }
            }]
        }"#;
        let call = parse_response(body).unwrap().tool_call.unwrap();
        assert_eq!(call.arguments, json!({}));
    }

    #[test]
    fn test_only_first_candidate_is_inspected() {
        let body = r#"{
            "candidates": [
                { "content": { "parts": [{ "text": "first" }] } },
                { "content": { "parts": [{ "functionCall": { "name": "x" } }] } }
            ]
        }"#;
        let resp = parse_response(body).unwrap();
        assert_eq!(resp, ModelResponse::with_text("first"));
    }

    #[test]
    fn test_missing_pieces_yield_empty_response() {
        for body in [
            "{}",
            r#"{ "candidates": [] }"#,
            r#"{ "candidates": [{}] }"#,
            r#"{ "candidates": [{ "content": {} }] }"#,
            r#"{ "candidates": [{ "content": { "parts": [] } }] }"#,
            r#"{ "candidates": [{ "content": { "parts": [{}] } }] }"#,
        ] {
            assert_eq!(parse_response(body).unwrap(), ModelResponse::default());
        }
    }

    #[test]
    fn test_shape_mismatch_is_malformed() {
        for body in [
            "",
            "<html>oops</html>",
            r#"{ "candidates": "none" }"#,
            r#"{ "candidates": [{ "content": { "parts": [{ "text": 1 }] } }] }"#,
        ] {
            let err = parse_response(body).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MalformedResponse);
        }
    }
}
