//! Decoded response documents and result shapes.

use serde_json::Value;

/// A decoded JSON document from the API.
///
/// Wraps the message envelope (`status`, `message-type`, `message-version`,
/// `message`) and exposes accessors for the pagination metadata the client
/// itself consumes. The underlying value is never modified after a call
/// returns; take it apart with [`Document::into_inner`] or index into it
/// with [`Document::as_value`].
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    raw: Value,
}

impl Document {
    pub(crate) fn new(raw: Value) -> Self {
        Self { raw }
    }

    /// The raw decoded document.
    pub fn as_value(&self) -> &Value {
        &self.raw
    }

    /// Unwrap into the raw decoded document.
    pub fn into_inner(self) -> Value {
        self.raw
    }

    /// Top-level `status` field, e.g. `"ok"`.
    pub fn status(&self) -> Option<&str> {
        self.raw.get("status").and_then(Value::as_str)
    }

    /// Top-level `message-type` field, e.g. `"work-list"`.
    pub fn message_type(&self) -> Option<&str> {
        self.raw.get("message-type").and_then(Value::as_str)
    }

    /// Top-level `message-version` field.
    pub fn message_version(&self) -> Option<&str> {
        self.raw.get("message-version").and_then(Value::as_str)
    }

    /// The `message` payload.
    pub fn message(&self) -> Option<&Value> {
        self.raw.get("message")
    }

    /// Total matching count known to the server.
    pub fn total_results(&self) -> Option<u64> {
        self.message()?.get("total-results")?.as_u64()
    }

    /// Page size reported by the server.
    pub fn items_per_page(&self) -> Option<u64> {
        self.message()?.get("items-per-page")?.as_u64()
    }

    /// Items on this page. Empty for singleton documents (e.g. one work
    /// fetched by DOI), which carry their payload directly in `message`.
    pub fn items(&self) -> &[Value] {
        self.message()
            .and_then(|m| m.get("items"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn item_count(&self) -> usize {
        self.items().len()
    }

    /// Deep-paging cursor for the next page. `None` (or JSON null) means
    /// the sequence is exhausted.
    pub fn next_cursor(&self) -> Option<&str> {
        self.message()?.get("next-cursor")?.as_str()
    }
}

/// The result of one logical API call.
///
/// The shape mirrors what was asked for: a plain query yields one
/// [`Document`]; cursor paging yields the fetched pages in order; an
/// identifier batch yields one outcome per identifier, in input order,
/// with [`ApiResult::Missing`] holding the place of identifiers that
/// failed under [`crate::ErrorPolicy::CollectWarnings`]. A batch of
/// exactly one identifier unwraps to its bare outcome rather than a
/// one-element batch; that asymmetry is part of the public contract.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult {
    /// One decoded document.
    Document(Document),
    /// Cursor-paged documents, in fetch order.
    Pages(Vec<Document>),
    /// One outcome per identifier, in input order.
    Batch(Vec<ApiResult>),
    /// Placeholder for an identifier whose request failed while warnings
    /// were being collected.
    Missing,
}

impl ApiResult {
    /// The single document, if this is a [`ApiResult::Document`].
    pub fn as_document(&self) -> Option<&Document> {
        match self {
            ApiResult::Document(doc) => Some(doc),
            _ => None,
        }
    }

    /// The page list, if this is a [`ApiResult::Pages`].
    pub fn as_pages(&self) -> Option<&[Document]> {
        match self {
            ApiResult::Pages(pages) => Some(pages),
            _ => None,
        }
    }

    /// The per-identifier outcomes, if this is a [`ApiResult::Batch`].
    pub fn as_batch(&self) -> Option<&[ApiResult]> {
        match self {
            ApiResult::Batch(outcomes) => Some(outcomes),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, ApiResult::Missing)
    }

    /// All documents reachable from this result, in order, skipping
    /// missing placeholders.
    pub fn documents(&self) -> Vec<&Document> {
        match self {
            ApiResult::Document(doc) => vec![doc],
            ApiResult::Pages(pages) => pages.iter().collect(),
            ApiResult::Batch(outcomes) => outcomes.iter().flat_map(|o| o.documents()).collect(),
            ApiResult::Missing => Vec::new(),
        }
    }

    /// Total number of items across all reachable documents.
    pub fn item_count(&self) -> usize {
        self.documents().iter().map(|d| d.item_count()).sum()
    }
}
