// client.rs
use crate::domain::PropertyRecord;
use crate::search::SearchError;
use reqwest::blocking::Client;
use serde_json::{json, Value};
use std::time::Duration;
use url::Url;

/// Anything that can answer a one-shot property query.
pub trait PropertySearch {
    fn search(&self, query: &str) -> Result<Vec<PropertyRecord>, SearchError>;
}

/// Blocking client for the agent backend's request/response search endpoint.
pub struct SearchClient {
    client: Client,
    endpoint: Url,
}

impl SearchClient {
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SearchError::Config(e.to_string()))?;

        Ok(Self { client, endpoint })
    }
}

impl PropertySearch for SearchClient {
    /// `POST {"query": ...}`. Not retried.
    fn search(&self, query: &str) -> Result<Vec<PropertyRecord>, SearchError> {
        let started = std::time::Instant::now();

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&json!({ "query": query }))
            .send()
            .map_err(|e| SearchError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| SearchError::Network(e.to_string()))?;

        tracing::info!(
            endpoint = %self.endpoint,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "property search finished"
        );

        decode_search_response(status.as_u16(), &body)
    }
}

/// Turns a raw endpoint response into normalized records.
///
/// Non-2xx statuses carry the body text through to the user. A 2xx body
/// without a `properties` array is treated as "nothing found".
pub fn decode_search_response(status: u16, body: &str) -> Result<Vec<PropertyRecord>, SearchError> {
    if !(200..300).contains(&status) {
        return Err(SearchError::Http {
            status,
            body: body.to_string(),
        });
    }

    let data: Value = serde_json::from_str(body).map_err(|e| SearchError::Decode(e.to_string()))?;

    match data.get("properties").and_then(Value::as_array) {
        Some(entries) => Ok(entries.iter().filter_map(PropertyRecord::from_value).collect()),
        None => {
            tracing::warn!("search response has no properties array");
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_properties() {
        let body = r#"{"properties":[{"address":"1 Main St","price":500000,"bedrooms":3}]}"#;

        let records = decode_search_response(200, body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].address, "1 Main St");
        assert_eq!(records[0].formatted_price(), "$500,000");
    }

    #[test]
    fn non_success_carries_body() {
        let err = decode_search_response(500, "server error").unwrap_err();

        assert_eq!(
            err,
            SearchError::Http {
                status: 500,
                body: "server error".into()
            }
        );
        assert_eq!(
            err.to_string(),
            "Network response was not ok. Status: 500. Message: server error"
        );
    }

    #[test]
    fn missing_array_means_nothing_found() {
        assert!(decode_search_response(200, r#"{"message":"hi"}"#).unwrap().is_empty());
    }

    #[test]
    fn invalid_json_is_a_decode_error() {
        assert!(matches!(
            decode_search_response(200, "<html>"),
            Err(SearchError::Decode(_))
        ));
    }
}
