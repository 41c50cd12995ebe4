use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, Result};

// ============ Pagination ============

/// Page size used by every admin list unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Query for one page of a resource collection.
///
/// Pages are 1-indexed. Serializes to the backend's query string keys
/// (`page`, `limit`, and `search` only when a term is present).
///
/// # Default
///
/// The default is `page = 1, page_size = 10`, with no search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Page number (1-indexed).
    pub page: u32,
    /// Number of items per page. Fixed for the lifetime of a list view.
    pub page_size: u32,
    /// Optional search term, never blank.
    pub search: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search: None,
        }
    }
}

impl ListQuery {
    /// Build a query, clamping `page` and `page_size` to `>= 1` and dropping a
    /// blank search term.
    pub fn new(page: u32, page_size: u32, search: Option<&str>) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
            search: normalize_search(search),
        }
    }

    /// First page of the given size, no search.
    pub fn first_page(page_size: u32) -> Self {
        Self::new(1, page_size, None)
    }

    /// Same size and search, different page.
    #[must_use]
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    /// Query-string pairs sent with the `GET`.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.page_size.to_string()),
        ];
        if let Some(ref search) = self.search {
            pairs.push(("search", search.clone()));
        }
        pairs
    }
}

/// Trim a search term; blank becomes `None`.
pub fn normalize_search(term: Option<&str>) -> Option<String> {
    term.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// One page of records plus the collection-wide count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResult<T> {
    /// Items of the requested page, in server order.
    pub items: Vec<T>,
    /// Number of records across all pages.
    pub total_count: u64,
}

impl<T> ListResult<T> {
    pub fn new(items: Vec<T>, total_count: u64) -> Self {
        Self { items, total_count }
    }

    /// `max(1, ceil(total_count / page_size))`.
    pub fn total_pages(&self, page_size: u32) -> u32 {
        total_pages(self.total_count, page_size)
    }
}

/// `max(1, ceil(total / page_size))`, saturating at `u32::MAX`.
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    let size = u64::from(page_size.max(1));
    let pages = total.div_ceil(size).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

// ============ Response envelope ============

/// Wrapper the backend puts around every successful response body:
/// `{ statusCode, success, message, data }`.
///
/// `data` is kept as raw JSON; each endpoint decodes it with its own schema.
/// A body without `data` (e.g. logout) yields `Value::Null`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Value,
}

/// Error body of a non-2xx response. Only the message is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<MessageField>,
}

/// `message` is a string, or an array of strings for validation failures.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum MessageField {
    One(String),
    Many(Vec<String>),
}

impl MessageField {
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::One(s) => Some(s),
            Self::Many(v) if v.is_empty() => None,
            Self::Many(v) => Some(v.join("; ")),
        }
    }
}

/// Decode a list payload strictly.
///
/// `data` must be an object holding `items_key` (an array of `T`) and
/// `total` (a non-negative integer). No alternative shapes are tried.
pub fn decode_list_payload<T: DeserializeOwned>(
    endpoint: &str,
    items_key: &str,
    data: Value,
) -> Result<ListResult<T>> {
    let parse_error = |detail: String| ApiError::Parse {
        endpoint: endpoint.to_string(),
        detail,
    };

    let Value::Object(mut map) = data else {
        return Err(parse_error(format!(
            "expected an object with '{items_key}' and 'total'"
        )));
    };

    let items_value = map
        .remove(items_key)
        .ok_or_else(|| parse_error(format!("missing '{items_key}' array")))?;
    if !items_value.is_array() {
        return Err(parse_error(format!("'{items_key}' is not an array")));
    }
    let items: Vec<T> = serde_json::from_value(items_value)
        .map_err(|e| parse_error(format!("invalid '{items_key}' item: {e}")))?;

    let total_count = map
        .get("total")
        .ok_or_else(|| parse_error("missing 'total' count".to_string()))?
        .as_u64()
        .ok_or_else(|| parse_error("'total' is not a non-negative integer".to_string()))?;

    Ok(ListResult::new(items, total_count))
}
