//! Pagination over Bitbucket collection endpoints
//!
//! Bitbucket pages carry either an absolute `next` link or a `page`/`pagelen`
//! pair from which the following page URL is rebuilt. [`fetch_all`] walks
//! every page from a starting URL and returns the projected items in
//! visitation order.
//!
//! There is no depth bound: a server that keeps returning continuation
//! signals is followed indefinitely.

use async_trait::async_trait;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::{ApiError, Result};

/// Name of the query parameter carrying the page number.
const PAGE_PARAM: &str = "page";

/// Transport used by the paginator to fetch a single page.
///
/// Implementations return the raw body of a 2xx response and map any other
/// status to [`ApiError::Endpoint`].
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn get_page(&self, url: &Url) -> Result<String>;
}

/// One decoded page of a collection.
///
/// Fields are read one by one; a field with an unexpected type counts as
/// absent without affecting the others.
#[derive(Debug, Default)]
pub struct Page {
    pub values: Vec<Value>,

    /// Absolute URL of the next page
    pub next: Option<String>,

    pub page: Option<u64>,

    pub pagelen: Option<u64>,
}

impl Page {
    /// Decode a response body.
    ///
    /// A bare JSON array is a single page without continuation. Anything
    /// that is not JSON, or not an object/array, is reported as
    /// [`ApiError::MalformedResponse`].
    pub fn parse(url: &Url, body: &str) -> std::result::Result<Self, ApiError> {
        let malformed = |reason: String| ApiError::MalformedResponse {
            url: url.to_string(),
            reason,
        };

        match serde_json::from_str::<Value>(body).map_err(|e| malformed(e.to_string()))? {
            Value::Array(values) => Ok(Page {
                values,
                ..Page::default()
            }),
            Value::Object(mut fields) => Ok(Page {
                values: match fields.remove("values") {
                    Some(Value::Array(values)) => values,
                    _ => Vec::new(),
                },
                next: fields.get("next").and_then(Value::as_str).map(str::to_string),
                page: fields.get("page").and_then(Value::as_u64),
                pagelen: fields.get("pagelen").and_then(Value::as_u64),
            }),
            other => Err(malformed(format!(
                "expected a JSON object or array, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// URL of the page that follows this one, if any.
    ///
    /// `next` wins when present. Otherwise, when both `page` and `pagelen`
    /// are given and `page < pagelen`, the current URL is rebuilt with
    /// `page + 1`.
    // NOTE: `pagelen` is a page size, not a page count, so this comparison
    // is suspect. Callers rely on it stopping at `page == pagelen`.
    pub fn continuation(&self, current: &Url) -> Result<Option<Url>> {
        if let Some(next) = &self.next {
            let url = Url::parse(next).map_err(|e| {
                ApiError::InvalidResponse(format!("invalid next link '{}': {}", next, e))
            })?;
            return Ok(Some(url));
        }

        match (self.page, self.pagelen) {
            (Some(page), Some(pagelen)) if page < pagelen => {
                Ok(Some(with_page_number(current, page + 1)))
            }
            _ => Ok(None),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Rebuild `url` with its `page` query parameter set to `page`.
///
/// An existing `page` parameter is overwritten in place (later duplicates
/// are dropped); otherwise it is appended. Every other part of the URL is
/// left untouched.
pub fn with_page_number(url: &Url, page: u64) -> Url {
    let page = page.to_string();
    let mut replaced = false;

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter_map(|(key, value)| {
            if key == PAGE_PARAM {
                if replaced {
                    return None;
                }
                replaced = true;
                Some((key.into_owned(), page.clone()))
            } else {
                Some((key.into_owned(), value.into_owned()))
            }
        })
        .collect();

    let mut next = url.clone();
    {
        let mut query = next.query_pairs_mut();
        query.clear();
        query.extend_pairs(pairs);
        if !replaced {
            query.append_pair(PAGE_PARAM, &page);
        }
    }
    next
}

/// Walk every page starting at `start` and return all projected items.
///
/// - A non-2xx page aborts the walk; items collected so far are dropped.
/// - A body that cannot be decoded is logged and counts as an empty page
///   with no continuation.
/// - A single element that does not decode as `R` is logged and skipped.
pub async fn fetch_all<S, R, T, F>(source: &S, start: Url, project: F) -> Result<Vec<T>>
where
    S: PageSource + ?Sized,
    R: DeserializeOwned,
    F: Fn(R) -> T,
{
    let mut items = Vec::new();
    let mut current = Some(start);

    while let Some(url) = current.take() {
        let body = source.get_page(&url).await?;

        let mut page = match Page::parse(&url, &body) {
            Ok(page) => page,
            Err(e) => {
                warn!("{}", e);
                Page::default()
            }
        };

        let mut accepted = 0usize;
        for value in page.values.drain(..) {
            match serde_json::from_value::<R>(value) {
                Ok(raw) => {
                    items.push(project(raw));
                    accepted += 1;
                }
                Err(e) => warn!("Skipping unreadable item from {}: {}", url, e),
            }
        }
        debug!(
            "Fetched page {} ({} items, {} total)",
            url,
            accepted,
            items.len()
        );

        current = page.continuation(&url)?;
    }

    Ok(items)
}
