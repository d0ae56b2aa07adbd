// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP lookup adapter

use super::{Lookup, LookupError, QueryKind, Record, SearchQuery, MAX_BATCH};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct GetItemsRequest<'a> {
    #[serde(rename = "ItemIds")]
    item_ids: &'a [String],
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    #[serde(rename = "Title", skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(rename = "Keywords", skip_serializing_if = "Option::is_none")]
    keywords: Option<&'a str>,
    #[serde(rename = "MaxPrice", skip_serializing_if = "Option::is_none")]
    max_price: Option<f64>,
}

#[derive(Deserialize)]
struct ItemsResponse {
    #[serde(rename = "Items", default)]
    items: Vec<Record>,
}

/// Lookup adapter backed by the upstream catalog HTTP API
#[derive(Clone)]
pub struct HttpLookup {
    agent: ureq::Agent,
    endpoint: String,
}

impl HttpLookup {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
            endpoint: endpoint.into(),
        }
    }

    fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Vec<Record>, LookupError> {
        let url = format!("{}/{path}", self.endpoint.trim_end_matches('/'));
        let mut response = self
            .agent
            .post(&url)
            .send_json(body)
            .map_err(map_transport_error)?;
        let text = response
            .body_mut()
            .read_to_string()
            .map_err(map_transport_error)?;
        let parsed: ItemsResponse =
            serde_json::from_str(&text).map_err(|e| LookupError::SchemaMismatch(e.to_string()))?;
        Ok(parsed.items)
    }
}

impl Lookup for HttpLookup {
    fn get_items(&self, asins: &[String]) -> Result<Vec<Record>, LookupError> {
        if asins.is_empty() {
            return Ok(Vec::new());
        }
        if asins.len() > MAX_BATCH {
            return Err(LookupError::MalformedRequest(format!(
                "batch of {} exceeds upstream limit of {MAX_BATCH}",
                asins.len()
            )));
        }
        tracing::debug!(count = asins.len(), "batch lookup");
        self.post("items", &GetItemsRequest { item_ids: asins })
    }

    fn search(&self, query: &SearchQuery) -> Result<Vec<Record>, LookupError> {
        tracing::debug!(value = %query.value, "search lookup");
        let (title, keywords) = match query.kind {
            QueryKind::Title => (Some(query.value.as_str()), None),
            QueryKind::Keywords => (None, Some(query.value.as_str())),
        };
        self.post(
            "search",
            &SearchRequest {
                title,
                keywords,
                max_price: query.max_price,
            },
        )
    }
}

fn map_transport_error(err: ureq::Error) -> LookupError {
    match err {
        ureq::Error::StatusCode(429) => LookupError::RateLimited,
        ureq::Error::StatusCode(404) => LookupError::NotFound("upstream returned 404".to_string()),
        ureq::Error::StatusCode(code) if (400..500).contains(&code) => {
            LookupError::MalformedRequest(format!("upstream returned {code}"))
        }
        ureq::Error::Io(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
            LookupError::Truncated
        }
        other => LookupError::Transport(other.to_string()),
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
