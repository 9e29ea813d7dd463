//! Query specification for the search routes.
//!
//! A [`SearchQuery`] bundles everything one logical call needs: query
//! string, filters, paging, sort, facets, field selection, field queries,
//! deep-paging cursor and ceiling, identifiers and the error policy.
//!
//! # Example
//!
//! ```
//! use crossref_client::{ErrorPolicy, SearchQuery};
//!
//! let query = SearchQuery::new()
//!     .query("ecology")
//!     .filter("has_full_text", true)
//!     .field_query("author", "carl boettiger")
//!     .limit(100);
//!
//! let batch = SearchQuery::new()
//!     .ids(["10.1371/journal.pone.0033693", "10.1371/journal.pone.0033694"])
//!     .on_error(ErrorPolicy::CollectWarnings);
//! ```

use crate::dispatch::{ErrorPolicy, Ids};
use crate::error::{CrossrefError, Result};
use crate::filters::{FilterValue, Filters, RenameTable};

/// Sort order for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    pub fn as_str(&self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }
}

/// Parameters for one logical call against a search route.
///
/// Built with consuming setters and passed to the route methods on
/// [`crate::CrossrefClient`]. Offset/sample paging and cursor paging are
/// mutually exclusive; mixing them fails with a validation error before
/// any request is sent. Zero is a meaningful value for `offset` and
/// `limit` and is sent on the wire like any other value.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub(crate) query: Option<String>,
    pub(crate) filters: Filters,
    pub(crate) offset: Option<u64>,
    pub(crate) limit: Option<u64>,
    pub(crate) sample: Option<u64>,
    pub(crate) sort: Option<String>,
    pub(crate) order: Option<Order>,
    pub(crate) facet: Option<String>,
    pub(crate) select: Vec<String>,
    pub(crate) field_queries: Vec<(String, String)>,
    pub(crate) cursor: Option<String>,
    pub(crate) cursor_max: u64,
    pub(crate) ids: Option<Ids>,
    pub(crate) works: bool,
    pub(crate) policy: ErrorPolicy,
    pub(crate) progress: bool,
}

/// Default ceiling on items fetched by one deep-paging call.
pub const DEFAULT_CURSOR_MAX: u64 = 5000;

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            query: None,
            filters: Filters::new(),
            offset: None,
            limit: None,
            sample: None,
            sort: None,
            order: None,
            facet: None,
            select: Vec::new(),
            field_queries: Vec::new(),
            cursor: None,
            cursor_max: DEFAULT_CURSOR_MAX,
            ids: None,
            works: false,
            policy: ErrorPolicy::FailFast,
            progress: false,
        }
    }
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Free-text query string.
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Set one filter by snake_case name. See [`Filters`].
    pub fn filter(mut self, name: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filters = self.filters.set(name, value);
        self
    }

    /// Replace the whole filter set.
    pub fn filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }

    /// Record to start at. Zero is legal and is sent on the wire.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Results per page (the API's `rows` parameter). Max 1000.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Number of random results to return instead of a paged listing.
    pub fn sample(mut self, sample: u64) -> Self {
        self.sample = Some(sample);
        self
    }

    /// Field to sort on, e.g. `"deposited"` or `"is-referenced-by-count"`.
    pub fn sort(mut self, field: impl Into<String>) -> Self {
        self.sort = Some(field.into());
        self
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    /// Facet specification, e.g. `"type-name:*"` or `"true"`.
    pub fn facet(mut self, facet: impl Into<String>) -> Self {
        self.facet = Some(facet.into());
        self
    }

    /// Restrict returned metadata to the named fields.
    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Add a field query, a search constrained to one metadata field.
    ///
    /// Use the snake_case field name: `field_query("funder_name", "NSF")`
    /// goes on the wire as `query.funder-name=NSF`.
    pub fn field_query(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.field_queries.push((field.into(), value.into()));
        self
    }

    /// Start or continue deep paging. Pass `"*"` to start a sequence.
    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// Ceiling on the total number of items fetched across a deep-paging
    /// sequence. Default: [`DEFAULT_CURSOR_MAX`]. The last page may
    /// overshoot the ceiling by up to one page size.
    pub fn cursor_max(mut self, cursor_max: u64) -> Self {
        self.cursor_max = cursor_max;
        self
    }

    /// Identifiers (DOIs, member ids, ISSNs, ...) to fetch one by one.
    ///
    /// Accepts a single identifier, a whitespace-delimited string of
    /// identifiers, or an explicit sequence.
    pub fn ids(mut self, ids: impl Into<Ids>) -> Self {
        self.ids = Some(ids.into());
        self
    }

    /// With identifiers, fetch each identifier's nested works collection
    /// (e.g. `/members/{id}/works`) instead of the identifier itself.
    pub fn works(mut self, works: bool) -> Self {
        self.works = works;
        self
    }

    /// What to do when one identifier in a batch fails. See [`ErrorPolicy`].
    pub fn on_error(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Show a progress bar while deep paging.
    pub fn progress_bar(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Local preconditions, checked before any network call.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.cursor.is_some() && (self.offset.is_some() || self.sample.is_some()) {
            return Err(CrossrefError::Validation(
                "cursor paging cannot be combined with offset or sample".to_string(),
            ));
        }
        Ok(())
    }

    /// Assemble the outgoing query parameters.
    ///
    /// A parameter is emitted exactly when it was set; values are never
    /// dropped for being zero or empty.
    pub(crate) fn to_params(&self, renames: &RenameTable) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = Vec::new();
        if let Some(query) = &self.query {
            params.push(("query".to_string(), query.clone()));
        }
        if let Some(filter) = self.filters.to_wire(renames) {
            params.push(("filter".to_string(), filter));
        }
        if let Some(offset) = self.offset {
            params.push(("offset".to_string(), offset.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("rows".to_string(), limit.to_string()));
        }
        if let Some(sample) = self.sample {
            params.push(("sample".to_string(), sample.to_string()));
        }
        if let Some(sort) = &self.sort {
            params.push(("sort".to_string(), sort.clone()));
        }
        if let Some(order) = self.order {
            params.push(("order".to_string(), order.as_str().to_string()));
        }
        if let Some(facet) = &self.facet {
            params.push(("facet".to_string(), facet.clone()));
        }
        if !self.select.is_empty() {
            params.push(("select".to_string(), self.select.join(",")));
        }
        if let Some(cursor) = &self.cursor {
            params.push(("cursor".to_string(), cursor.clone()));
        }
        for (field, value) in &self.field_queries {
            params.push((field_query_key(field), value.clone()));
        }
        params
    }

    /// Page size used to estimate deep-paging progress.
    pub(crate) fn page_size(&self) -> u64 {
        match self.limit {
            Some(0) | None => 20,
            Some(n) => n,
        }
    }
}

/// Wire form of a field-query key: `funder_name` -> `query.funder-name`.
fn field_query_key(field: &str) -> String {
    format!("query.{}", field.replace('_', "-"))
}
