//! Pagination aggregator
//!
//! Walks every page of a paged call and folds the results into one document
//! shaped like a single-page response.
//!
//! ```text
//! Start -> Fetching(1) -> More -> Fetching(2) -> ... -> Done -> Finished
//! ```
//!
//! The total page count is only known once page 1 has been decoded, so
//! pages are fetched strictly one after another. Any failure aborts the run
//! and the pages collected so far are dropped.

use std::future::Future;

use ebay_trading_domain::{Result, TradingError};
use serde_json::{Map, Value};
use tracing::debug;

use super::calls::PageSpec;
use super::envelope::Pagination;

/// Outcome of absorbing one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    More,
    Done,
}

/// Mutable state of one aggregation run.
#[derive(Debug)]
struct PageState {
    page_number: u32,
    entries_per_page: u32,
    total_pages: Option<u32>,
    entries: Vec<Value>,
    first_page: Option<Value>,
    list_seen: bool,
}

impl PageState {
    fn new(entries_per_page: u32) -> Self {
        Self {
            page_number: 1,
            entries_per_page,
            total_pages: None,
            entries: Vec::new(),
            first_page: None,
            list_seen: false,
        }
    }

    fn cursor(&self) -> Pagination {
        Pagination { entries_per_page: self.entries_per_page, page_number: self.page_number }
    }

    fn absorb(&mut self, mut document: Value, root: &str, list_path: &[&str]) -> Step {
        if let Some(list) = value_at_mut(&mut document, root, list_path) {
            self.list_seen = true;
            match list.take() {
                Value::Array(items) => self.entries.extend(items),
                Value::Null => {}
                single => self.entries.push(single),
            }
        }

        if self.first_page.is_none() {
            self.total_pages = total_pages(&document, root);
            self.first_page = Some(document);
        }

        match self.total_pages {
            Some(total) if total > self.page_number => {
                self.page_number += 1;
                Step::More
            }
            _ => Step::Done,
        }
    }

    fn finish(self, root: &str, list_path: &[&str]) -> Result<Value> {
        let Some(mut document) = self.first_page else {
            return Err(TradingError::Internal(format!(
                "{root} aggregation finished without a page"
            )));
        };

        if self.list_seen || !self.entries.is_empty() {
            set_value_at(&mut document, root, list_path, Value::Array(self.entries));
        }
        Ok(document)
    }
}

/// Fetch every page of a paged call and merge the list entries.
///
/// `fetch` performs one build → send → parse cycle for the given cursor and
/// returns the decoded document. The returned document is the first page with
/// the collection at `page.list_path` replaced by the entries of all pages,
/// in page order then in-page order.
///
/// # Errors
/// Propagates the first error returned by `fetch`.
pub async fn run_paged<F, Fut>(call_name: &str, page: PageSpec, mut fetch: F) -> Result<Value>
where
    F: FnMut(Pagination) -> Fut,
    Fut: Future<Output = Result<Value>>,
{
    let root = format!("{call_name}Response");
    let list_path: Vec<&str> = page.list_path.split('.').collect();
    let mut state = PageState::new(page.entries_per_page);

    loop {
        let cursor = state.cursor();
        debug!(call = call_name, page = cursor.page_number, "fetching page");

        let document = fetch(cursor).await?;
        let step = state.absorb(document, &root, &list_path);

        debug!(
            call = call_name,
            page = cursor.page_number,
            total_pages = ?state.total_pages,
            collected = state.entries.len(),
            "page absorbed"
        );

        if step == Step::Done {
            break;
        }
    }

    state.finish(&root, &list_path)
}

fn total_pages(document: &Value, root: &str) -> Option<u32> {
    let value = document.get(root)?.get("PaginationResult")?.get("TotalNumberOfPages")?;
    match value {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        _ => None,
    }
}

fn value_at_mut<'a>(document: &'a mut Value, root: &str, path: &[&str]) -> Option<&'a mut Value> {
    let mut current = document.get_mut(root)?;
    for segment in path {
        current = current.get_mut(*segment)?;
    }
    Some(current)
}

fn set_value_at(document: &mut Value, root: &str, path: &[&str], value: Value) {
    let mut current = document;
    for segment in std::iter::once(root).chain(path.iter().copied()) {
        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        let Value::Object(fields) = current else {
            return;
        };
        current = fields.entry(segment.to_string()).or_insert(Value::Null);
    }
    *current = value;
}
