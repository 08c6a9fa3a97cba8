// src/handler.rs

//! Cast query handler.
//!
//! Turns an API Gateway HTTP event into at most two store reads and one JSON
//! response:
//! 1. Validates the query string (`movieId`, `facts`, `roleName`/`actorName`)
//! 2. Queries the cast table by movie id with an optional prefix filter
//! 3. If `facts=true`, looks up the movie record and attaches its facts
//!
//! Reads run sequentially; the movie lookup only starts once the cast query
//! has succeeded. Any failure fails the whole request.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, instrument};

use crate::error::{AppError, Result};
use crate::models::{CastQuery, CastResponse, MovieFacts, QueryParams};
use crate::storage::CastStore;

/// The part of an API Gateway HTTP event the handler reads.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ApiGatewayRequest {
    #[serde(rename = "queryStringParameters", default)]
    pub query_string_parameters: Option<QueryParams>,
}

/// API Gateway proxy response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ApiGatewayResponse {
    fn json(status_code: u16, body: String) -> Self {
        Self {
            status_code,
            headers: BTreeMap::from([("content-type".to_string(), "application/json".to_string())]),
            body,
        }
    }

    fn from_error(err: &AppError) -> Self {
        Self::json(err.status_code(), err.to_body().to_string())
    }

    /// Parse the body back into JSON.
    pub fn body_json(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Handle a raw API Gateway event.
#[instrument(skip(store, event))]
pub async fn handle_event(store: &dyn CastStore, event: Value) -> ApiGatewayResponse {
    info!(event = %event, "Received event");

    let result = match serde_json::from_value::<ApiGatewayRequest>(event) {
        Ok(request) => handle(store, request.query_string_parameters.as_ref()).await,
        Err(e) => Err(AppError::from(e)),
    };

    let response = result.and_then(|response| {
        info!(
            cast = response.cast_count(),
            movie = response.movie.is_some(),
            "Cast query succeeded"
        );
        Ok(serde_json::to_string(&response)?)
    });

    match response {
        Ok(body) => ApiGatewayResponse::json(200, body),
        Err(e) if e.is_request_error() => {
            info!("Rejected request: {}", e);
            ApiGatewayResponse::from_error(&e)
        }
        Err(e) => {
            error!(error = ?e, "Cast query failed: {}", e);
            ApiGatewayResponse::from_error(&e)
        }
    }
}

/// Validate query string parameters and run the lookup.
pub async fn handle(store: &dyn CastStore, params: Option<&QueryParams>) -> Result<CastResponse> {
    let query = CastQuery::from_params(params)?;
    run_query(store, &query).await
}

/// Run a validated query: cast first, then movie facts if requested.
pub async fn run_query(store: &dyn CastStore, query: &CastQuery) -> Result<CastResponse> {
    let cast = store.query_cast(query).await?;

    let movie = if query.include_facts {
        store
            .get_movie(query.movie_id)
            .await?
            .map(|item| MovieFacts::from_item(&item))
    } else {
        None
    };

    Ok(CastResponse::new(cast).with_movie(movie))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::models::{Item, NameField, NameFilter};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Query(CastQuery),
        GetMovie(i64),
    }

    #[derive(Default)]
    struct RecordingStore {
        cast: Option<Vec<Item>>,
        movie: Option<Item>,
        fail_query: bool,
        fail_movie: bool,
        calls: Mutex<Vec<Call>>,
    }

    impl RecordingStore {
        fn with_cast(cast: Value) -> Self {
            Self {
                cast: serde_json::from_value(cast).ok(),
                ..Default::default()
            }
        }

        fn with_movie(mut self, movie: Value) -> Self {
            self.movie = serde_json::from_value(movie).ok();
            self
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().expect("poisoned mutex").clone()
        }

        fn record(&self, call: Call) {
            self.calls.lock().expect("poisoned mutex").push(call);
        }
    }

    #[async_trait]
    impl CastStore for RecordingStore {
        async fn query_cast(&self, query: &CastQuery) -> Result<Option<Vec<Item>>> {
            self.record(Call::Query(query.clone()));
            if self.fail_query {
                return Err(AppError::store("ProvisionedThroughputExceededException"));
            }
            Ok(self.cast.clone())
        }

        async fn get_movie(&self, movie_id: i64) -> Result<Option<Item>> {
            self.record(Call::GetMovie(movie_id));
            if self.fail_movie {
                return Err(AppError::store("AccessDeniedException"));
            }
            Ok(self.movie.clone())
        }
    }

    fn cast_items() -> Value {
        json!([
            {"movieId": 550, "roleName": "Tyler Durden", "actorName": "Brad Pitt"},
            {"movieId": 550, "roleName": "The Narrator", "actorName": "Edward Norton"}
        ])
    }

    fn event(params: Value) -> Value {
        json!({
            "rawPath": "/cast",
            "queryStringParameters": params,
        })
    }

    #[tokio::test]
    async fn missing_query_parameters() {
        let store = RecordingStore::default();
        let response = handle_event(&store, json!({"rawPath": "/cast"})).await;

        assert_eq!(response.status_code, 500);
        assert_eq!(response.headers["content-type"], "application/json");
        assert_eq!(
            response.body_json().unwrap(),
            json!({"message": "Missing query parameters"})
        );
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn null_query_parameters_count_as_missing() {
        let store = RecordingStore::default();
        let response = handle_event(&store, event(Value::Null)).await;

        assert_eq!(
            response.body_json().unwrap(),
            json!({"message": "Missing query parameters"})
        );
    }

    #[tokio::test]
    async fn missing_movie_id() {
        let store = RecordingStore::default();
        let response = handle_event(&store, event(json!({"facts": "true"}))).await;

        assert_eq!(response.status_code, 500);
        assert_eq!(
            response.body_json().unwrap(),
            json!({"message": "Missing movie Id parameter"})
        );
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn non_numeric_movie_id_never_reaches_the_store() {
        let store = RecordingStore::default();
        let response = handle_event(&store, event(json!({"movieId": "abc"}))).await;

        assert_eq!(response.status_code, 500);
        assert_eq!(
            response.body_json().unwrap(),
            json!({"message": "Invalid movie Id parameter"})
        );
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn plain_query_returns_cast_only() {
        let store = RecordingStore::with_cast(cast_items());
        let response = handle_event(&store, event(json!({"movieId": "550"}))).await;

        assert_eq!(response.status_code, 200);
        assert_eq!(store.calls(), vec![Call::Query(CastQuery::new(550))]);
        assert_eq!(response.body_json().unwrap(), json!({"cast": cast_items()}));
    }

    #[tokio::test]
    async fn facts_projects_movie_fields() {
        let store = RecordingStore::with_cast(cast_items()).with_movie(json!({
            "id": 550,
            "title": "Fight Club",
            "genre_ids": [18],
            "overview": "...",
            "extraField": "x",
        }));
        let response =
            handle_event(&store, event(json!({"movieId": "550", "facts": "true"}))).await;

        assert_eq!(response.status_code, 200);
        assert_eq!(
            store.calls(),
            vec![
                Call::Query(CastQuery::new(550).with_facts(true)),
                Call::GetMovie(550),
            ]
        );
        let body = response.body_json().unwrap();
        assert_eq!(
            body["movie"],
            json!({"title": "Fight Club", "genre_ids": [18], "overview": "..."})
        );
        assert_eq!(body["cast"], cast_items());
    }

    #[tokio::test]
    async fn role_name_filter_wins_over_actor_name() {
        let store = RecordingStore::with_cast(json!([]));
        handle_event(
            &store,
            event(json!({"movieId": "550", "roleName": "Brad", "actorName": "Edward"})),
        )
        .await;

        let expected = CastQuery::new(550).with_filter(NameFilter::new(NameField::RoleName, "Brad"));
        assert_eq!(store.calls(), vec![Call::Query(expected)]);
    }

    #[tokio::test]
    async fn missing_movie_record_omits_movie_key() {
        let store = RecordingStore::with_cast(cast_items());
        let response =
            handle_event(&store, event(json!({"movieId": "550", "facts": "true"}))).await;

        assert_eq!(response.status_code, 200);
        let body = response.body_json().unwrap();
        assert_eq!(body, json!({"cast": cast_items()}));
        assert!(body.get("movie").is_none());
    }

    #[tokio::test]
    async fn mistyped_movie_fields_still_succeed() {
        let store = RecordingStore::with_cast(cast_items()).with_movie(json!({
            "id": 550,
            "title": 1999,
            "genre_ids": [18.0],
            "overview": null,
        }));
        let response =
            handle_event(&store, event(json!({"movieId": "550", "facts": "true"}))).await;

        assert_eq!(response.status_code, 200);
        assert_eq!(
            response.body_json().unwrap()["movie"],
            json!({"title": 1999, "genre_ids": [18.0], "overview": null})
        );
    }

    #[tokio::test]
    async fn facts_other_than_true_skip_movie_lookup() {
        let store = RecordingStore::with_cast(cast_items()).with_movie(json!({"id": 550}));
        handle_event(&store, event(json!({"movieId": "550", "facts": "yes"}))).await;

        assert_eq!(store.calls(), vec![Call::Query(CastQuery::new(550))]);
    }

    #[tokio::test]
    async fn cast_query_failure_is_an_error_response() {
        let store = RecordingStore {
            fail_query: true,
            ..Default::default()
        };
        let response =
            handle_event(&store, event(json!({"movieId": "550", "facts": "true"}))).await;

        assert_eq!(response.status_code, 500);
        let body = response.body_json().unwrap();
        assert_eq!(body["error"]["name"], "StoreFailure");
        assert_eq!(store.calls().len(), 1);
    }

    #[tokio::test]
    async fn movie_lookup_failure_discards_cast() {
        let store = RecordingStore {
            fail_movie: true,
            ..RecordingStore::with_cast(cast_items())
        };
        let response =
            handle_event(&store, event(json!({"movieId": "550", "facts": "true"}))).await;

        assert_eq!(response.status_code, 500);
        let body = response.body_json().unwrap();
        assert!(body.get("error").is_some());
        assert!(body.get("cast").is_none());
    }

    #[tokio::test]
    async fn store_without_items_field_passes_through() {
        let store = RecordingStore::default();
        let response = handle_event(&store, event(json!({"movieId": "550"}))).await;

        assert_eq!(response.status_code, 200);
        assert_eq!(response.body_json().unwrap(), json!({}));
    }

    #[tokio::test]
    async fn malformed_event_is_an_error_response() {
        let store = RecordingStore::default();
        let response = handle_event(&store, json!({"queryStringParameters": "movieId=550"})).await;

        assert_eq!(response.status_code, 500);
        assert_eq!(response.body_json().unwrap()["error"]["name"], "JsonError");
        assert!(store.calls().is_empty());
    }
}
