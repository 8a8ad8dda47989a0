//! Inventory Fetcher
//!
//! Queries ZStack inventories with server-side conditions and pagination.

use super::registry::wire_field_name;
use crate::zstack::client::ZStackClient;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;

/// Page size used when auto-paginating
pub const PAGE_LIMIT: usize = 100;

/// Comparison operator of a query condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOp {
    Eq,
    NotEq,
    Like,
}

impl QueryOp {
    fn as_str(self) -> &'static str {
        match self {
            QueryOp::Eq => "=",
            QueryOp::NotEq => "!=",
            QueryOp::Like => "~=",
        }
    }
}

/// Server-side query condition, sent as a `q=` parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryCondition {
    /// API field name
    pub field: String,
    pub op: QueryOp,
    pub value: String,
}

impl QueryCondition {
    pub fn new(field: &str, op: QueryOp, value: &str) -> Self {
        Self {
            field: field.to_string(),
            op,
            value: value.to_string(),
        }
    }

    pub fn eq(field: &str, value: &str) -> Self {
        Self::new(field, QueryOp::Eq, value)
    }

    /// Render as `field<op>value`
    pub fn to_query_string(&self) -> String {
        format!("{}{}{}", self.field, self.op.as_str(), self.value)
    }
}

/// Build equality conditions from logical attribute names
pub fn conditions_from_logical(
    category: &str,
    query: &BTreeMap<String, String>,
) -> Vec<QueryCondition> {
    query
        .iter()
        .map(|(name, value)| QueryCondition::eq(wire_field_name(category, name), value))
        .collect()
}

/// Result of paginated fetch
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    /// Total matching inventories reported by the server
    pub total: Option<usize>,
}

/// Build a query URL for one page
pub fn query_url(
    client: &ZStackClient,
    api_path: &str,
    conditions: &[QueryCondition],
    start: usize,
    limit: usize,
) -> String {
    let mut query_parts: Vec<String> = conditions
        .iter()
        .map(|c| format!("q={}", urlencoding::encode(&c.to_query_string())))
        .collect();

    query_parts.push(format!("start={}", start));
    query_parts.push(format!("limit={}", limit));
    query_parts.push("replyWithCount=true".to_string());

    format!("{}?{}", client.api_url(api_path), query_parts.join("&"))
}

/// Fetch all inventories (auto-paginate)
pub async fn fetch_inventories<T: DeserializeOwned>(
    client: &ZStackClient,
    api_path: &str,
    conditions: &[QueryCondition],
) -> Result<Vec<T>> {
    let mut all_items = Vec::new();

    loop {
        let page =
            fetch_inventories_paginated(client, api_path, conditions, all_items.len()).await?;
        let page_len = page.items.len();
        all_items.extend(page.items);

        let reached_total = page.total.is_some_and(|total| all_items.len() >= total);
        if reached_total || page_len < PAGE_LIMIT {
            break;
        }
    }

    tracing::debug!("Fetched {} inventories from {}", all_items.len(), api_path);
    Ok(all_items)
}

/// Fetch one page of inventories
pub async fn fetch_inventories_paginated<T: DeserializeOwned>(
    client: &ZStackClient,
    api_path: &str,
    conditions: &[QueryCondition],
    start: usize,
) -> Result<PaginatedResult<T>> {
    let url = query_url(client, api_path, conditions, start, PAGE_LIMIT);
    let response = client.get(&url).await?;

    let total = response
        .get("total")
        .and_then(|v| v.as_u64())
        .map(|n| n as usize);

    let items = match response.get("inventories") {
        Some(Value::Array(arr)) => arr
            .iter()
            .map(|item| serde_json::from_value(item.clone()))
            .collect::<Result<Vec<T>, _>>()
            .with_context(|| format!("Failed to decode inventories from {}", api_path))?,
        _ => Vec::new(),
    };

    Ok(PaginatedResult { items, total })
}
