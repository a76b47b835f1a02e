// PostgREST record store gateway
//
// Thin wrapper over the hosted backend's REST interface. Every operation is
// one awaited round trip; no local cache is kept, and callers re-list after
// mutation. Remote failures are classified into the StoreError taxonomy
// here and nowhere else.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error};
use url::Url;
use uuid::Uuid;

use campushub_core::error::{Result, StoreError};
use campushub_core::traits::{ListQuery, RecordStore, SessionProvider};

use crate::config::StoreConfig;

/// Media type asking PostgREST for a single object instead of an array.
/// Zero matching rows then come back as a `PGRST116` error.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Gateway to the hosted record store.
#[derive(Clone)]
pub struct RestClient {
    http: Client,
    config: StoreConfig,
    sessions: Arc<dyn SessionProvider>,
}

impl RestClient {
    pub fn new(config: StoreConfig, sessions: Arc<dyn SessionProvider>) -> Self {
        Self {
            http: Client::new(),
            config,
            sessions,
        }
    }

    /// Bearer token for gated operations; fails before any network traffic
    /// when no session is held.
    async fn bearer(&self) -> Result<String> {
        let session = self
            .sessions
            .current()
            .await
            .ok_or(StoreError::Unauthenticated)?;
        Ok(session.access_token)
    }

    fn request(&self, method: Method, url: Url, token: Option<&str>) -> RequestBuilder {
        let mut request = self
            .http
            .request(method, url)
            .header("apikey", &self.config.anon_key);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request
    }

    /// Send a request and classify a non-success response.
    async fn run(&self, request: RequestBuilder, collection: &str) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            StoreError::remote(format!("request to {collection} failed: {e}"))
        })?;
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let err = classify(collection, status, &body);
        match &err {
            // surfaced to the update retry; logged there if it sticks
            StoreError::UndefinedColumn { .. } => {
                debug!(collection, %status, "remote rejected a column")
            }
            _ => error!(collection, %status, "remote store call failed: {err}"),
        }
        Err(err)
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        response: Response,
        collection: &str,
    ) -> Result<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| StoreError::decode(collection, e))
    }

    async fn patch(
        &self,
        collection: &str,
        id: Uuid,
        token: &str,
        fields: &Value,
    ) -> Result<Value> {
        let mut url = self.config.endpoint(collection)?;
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));
        let request = self
            .request(Method::PATCH, url, Some(token))
            .header("Prefer", "return=representation")
            .header(header::ACCEPT, SINGLE_OBJECT)
            .json(fields);
        let response = self.run(request, collection).await?;
        Self::read_json(response, collection).await
    }
}

#[async_trait]
impl RecordStore for RestClient {
    async fn list(&self, collection: &str, query: ListQuery) -> Result<Vec<Value>> {
        let token = self.bearer().await?;
        let mut url = self.config.endpoint(collection)?;
        url.query_pairs_mut().append_pair("select", &query.select);
        if query.newest_first {
            url.query_pairs_mut().append_pair("order", "created_at.desc");
        }
        let response = self.run(self.request(Method::GET, url, Some(&token)), collection).await?;
        Self::read_json(response, collection).await
    }

    async fn create(&self, collection: &str, fields: Value) -> Result<Value> {
        let token = self.bearer().await?;
        let url = self.config.endpoint(collection)?;
        let request = self
            .request(Method::POST, url, Some(&token))
            .header("Prefer", "return=representation")
            .header(header::ACCEPT, SINGLE_OBJECT)
            .json(&fields);
        let response = self.run(request, collection).await?;
        Self::read_json(response, collection).await
    }

    async fn update(&self, collection: &str, id: Uuid, fields: Value) -> Result<Value> {
        let token = self.bearer().await?;
        // Try stamping a modification time first; not every collection has
        // the column, and those reject with 42703.
        let stamped = with_updated_at(&fields);
        match self.patch(collection, id, &token, &stamped).await {
            Err(StoreError::UndefinedColumn { .. }) => {
                debug!(collection, %id, "no updated_at column, retrying without the stamp");
                self.patch(collection, id, &token, &fields).await
            }
            other => other,
        }
    }

    async fn delete(&self, collection: &str, id: Uuid) -> Result<()> {
        // Requires only the identity; the token is attached when held.
        let token = self.sessions.current().await.map(|s| s.access_token);
        let mut url = self.config.endpoint(collection)?;
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));
        let response = self
            .request(Method::DELETE, url, token.as_deref())
            .send()
            .await
            .map_err(|e| StoreError::remote(format!("delete from {collection} failed: {e}")))?;
        if response.status().is_success() {
            return Ok(());
        }
        // delete failures surface verbatim, not classified
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = remote_message(status, &body);
        error!(collection, %status, "delete failed: {message}");
        Err(StoreError::remote(message))
    }

    async fn count(&self, collection: &str) -> Result<u64> {
        let token = self.bearer().await?;
        let mut url = self.config.endpoint(collection)?;
        url.query_pairs_mut().append_pair("select", "*");
        let request = self
            .request(Method::HEAD, url, Some(&token))
            .header("Prefer", "count=exact");
        let response = self.run(request, collection).await?;
        let range = response
            .headers()
            .get(header::CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                StoreError::decode(collection, "count response missing Content-Range header")
            })?;
        parse_count(range)
            .ok_or_else(|| StoreError::decode(collection, format!("unparseable Content-Range {range:?}")))
    }

    async fn find_by(
        &self,
        collection: &str,
        column: &str,
        value: &str,
    ) -> Result<Option<Value>> {
        let token = self.bearer().await?;
        let mut url = self.config.endpoint(collection)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("select", "*");
            pairs.append_pair(column, &format!("eq.{value}"));
            pairs.append_pair("limit", "1");
        }
        let response = self.run(self.request(Method::GET, url, Some(&token)), collection).await?;
        let rows: Vec<Value> = Self::read_json(response, collection).await?;
        Ok(rows.into_iter().next())
    }
}

fn with_updated_at(fields: &Value) -> Value {
    let mut stamped = fields.clone();
    if let Value::Object(map) = &mut stamped {
        map.insert("updated_at".to_string(), json!(Utc::now()));
    }
    stamped
}

/// Total from a `Content-Range` header such as `0-24/357` or `*/0`.
fn parse_count(range: &str) -> Option<u64> {
    range.rsplit('/').next()?.parse().ok()
}

#[derive(Debug, Default, Deserialize)]
struct RemoteErrorBody {
    code: Option<String>,
    message: Option<String>,
}

fn remote_message(status: StatusCode, body: &str) -> String {
    let parsed: RemoteErrorBody = serde_json::from_str(body).unwrap_or_default();
    parsed
        .message
        .unwrap_or_else(|| format!("remote store returned {status}"))
}

/// Map a remote failure onto the error taxonomy. Constraint codes come from
/// the underlying database; `PGRST*` codes from the REST layer.
fn classify(collection: &str, status: StatusCode, body: &str) -> StoreError {
    let parsed: RemoteErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .message
        .unwrap_or_else(|| format!("remote store returned {status}"));
    match parsed.code.as_deref() {
        Some("23505") => StoreError::DuplicateKey,
        Some("23503") => StoreError::InvalidReference,
        Some("23502") => StoreError::MissingRequiredField,
        Some("42703") => StoreError::UndefinedColumn { message },
        Some("PGRST116") => StoreError::RecordNotFound,
        Some("PGRST301") => StoreError::access_denied(collection),
        _ if message.contains("permission denied") || message.contains("policy") => {
            StoreError::access_denied(collection)
        }
        _ if message.contains("violates check constraint") => StoreError::ConstraintViolation,
        _ if message.contains("column \"updated_at\"") => StoreError::UndefinedColumn { message },
        _ if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN => {
            StoreError::access_denied(collection)
        }
        _ => StoreError::Remote { message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(code: &str, message: &str) -> String {
        json!({ "code": code, "message": message }).to_string()
    }

    #[test]
    fn constraint_codes_map_to_semantic_kinds() {
        let cases = [
            ("23505", "duplicate key value violates unique constraint"),
            ("23503", "insert or update violates foreign key constraint"),
            ("23502", "null value in column \"name\""),
        ];
        assert!(matches!(
            classify("events", StatusCode::CONFLICT, &body(cases[0].0, cases[0].1)),
            StoreError::DuplicateKey
        ));
        assert!(matches!(
            classify("events", StatusCode::CONFLICT, &body(cases[1].0, cases[1].1)),
            StoreError::InvalidReference
        ));
        assert!(matches!(
            classify("events", StatusCode::BAD_REQUEST, &body(cases[2].0, cases[2].1)),
            StoreError::MissingRequiredField
        ));
    }

    #[test]
    fn permission_failures_name_the_collection() {
        let err = classify(
            "signups",
            StatusCode::UNAUTHORIZED,
            &body("PGRST301", "JWT expired"),
        );
        match err {
            StoreError::AccessDenied { collection } => assert_eq!(collection, "signups"),
            other => panic!("expected AccessDenied, got {other:?}"),
        }

        assert!(matches!(
            classify(
                "signups",
                StatusCode::FORBIDDEN,
                &body("42501", "permission denied for table signups"),
            ),
            StoreError::AccessDenied { .. }
        ));
    }

    #[test]
    fn undefined_column_is_detected_by_code_or_message() {
        assert!(matches!(
            classify(
                "partner_events",
                StatusCode::BAD_REQUEST,
                &body("42703", "column \"updated_at\" of relation \"partner_events\" does not exist"),
            ),
            StoreError::UndefinedColumn { .. }
        ));
        let no_code = json!({ "message": "column \"updated_at\" does not exist" }).to_string();
        assert!(matches!(
            classify("partner_events", StatusCode::BAD_REQUEST, &no_code),
            StoreError::UndefinedColumn { .. }
        ));
    }

    #[test]
    fn check_constraint_and_missing_row_map_cleanly() {
        let check = json!({ "message": "new row violates check constraint \"events_format_check\"" })
            .to_string();
        assert!(matches!(
            classify("events", StatusCode::BAD_REQUEST, &check),
            StoreError::ConstraintViolation
        ));
        assert!(matches!(
            classify(
                "events",
                StatusCode::NOT_ACCEPTABLE,
                &body("PGRST116", "JSON object requested, multiple (or no) rows returned"),
            ),
            StoreError::RecordNotFound
        ));
    }

    #[test]
    fn unknown_failures_keep_the_remote_message() {
        let err = classify(
            "events",
            StatusCode::INTERNAL_SERVER_ERROR,
            &json!({ "message": "terminating connection due to administrator command" }).to_string(),
        );
        match err {
            StoreError::Remote { message } => {
                assert!(message.contains("administrator command"))
            }
            other => panic!("expected Remote, got {other:?}"),
        }
    }

    #[test]
    fn unparseable_bodies_fall_back_to_the_status() {
        let err = classify("events", StatusCode::BAD_GATEWAY, "<html>upstream down</html>");
        match err {
            StoreError::Remote { message } => assert!(message.contains("502")),
            other => panic!("expected Remote, got {other:?}"),
        }
    }

    #[test]
    fn content_range_totals() {
        assert_eq!(parse_count("0-24/357"), Some(357));
        assert_eq!(parse_count("*/0"), Some(0));
        assert_eq!(parse_count("*/*"), None);
    }
}
