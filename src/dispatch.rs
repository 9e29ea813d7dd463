//! Fan-out of one logical call across multiple identifiers.
//!
//! Requests are issued sequentially, in the order identifiers were
//! supplied; output order is input order by construction.

use crate::client::CrossrefClient;
use crate::error::{CrossrefError, Result};
use crate::query::SearchQuery;
use crate::response::ApiResult;

/// Identifier set for a route call.
///
/// Normalizes the accepted input forms — a single identifier, a
/// whitespace-delimited string of identifiers, or an explicit sequence —
/// into one ordered list.
///
/// # Example
///
/// ```
/// use crossref_client::Ids;
///
/// let a = Ids::from("10.1371/journal.pone.0033693");
/// assert_eq!(a.len(), 1);
///
/// let b = Ids::from("10.1007/12080.1874-1746 10.1007/10452.1573-5125");
/// assert_eq!(b.len(), 2);
///
/// let c = Ids::from(vec!["98", "340"]);
/// assert_eq!(c.as_slice(), &["98", "340"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ids(Vec<String>);

impl Ids {
    /// A single identifier.
    pub fn one(id: impl Into<String>) -> Self {
        Ids(vec![id.into()])
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Ids {
    fn from(s: &str) -> Self {
        Ids(s.split_whitespace().map(str::to_string).collect())
    }
}

impl From<String> for Ids {
    fn from(s: String) -> Self {
        Ids::from(s.as_str())
    }
}

impl From<u64> for Ids {
    fn from(id: u64) -> Self {
        Ids::one(id.to_string())
    }
}

impl From<Vec<String>> for Ids {
    fn from(ids: Vec<String>) -> Self {
        Ids(ids)
    }
}

impl From<Vec<&str>> for Ids {
    fn from(ids: Vec<&str>) -> Self {
        Ids(ids.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Ids {
    fn from(ids: &[&str]) -> Self {
        Ids(ids.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Ids {
    fn from(ids: [&str; N]) -> Self {
        Ids(ids.iter().map(|s| s.to_string()).collect())
    }
}

/// What to do when a request in an identifier batch fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// The first failure aborts the whole call.
    #[default]
    FailFast,
    /// Log a warning for the failed identifier and leave a
    /// [`ApiResult::Missing`] placeholder in its position, so that one bad
    /// identifier does not abort the batch. Validation errors are never
    /// downgraded.
    CollectWarnings,
}

/// Sub-collection appended to an identifier endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Subpath {
    None,
    Works,
    Agency,
}

impl CrossrefClient {
    /// Run one logical call: a plain route fetch, or one request per
    /// identifier.
    pub(crate) async fn dispatch(
        &self,
        route: &str,
        query: &SearchQuery,
        subpath: Subpath,
    ) -> Result<ApiResult> {
        query.validate()?;
        let params = query.to_params(&self.renames);

        let Some(ids) = &query.ids else {
            let url = self.endpoint(route);
            return match self.fetch_route(&url, query, &params).await {
                Err(err) if downgrade(&err, query.policy) => {
                    tracing::warn!("request failed: {}", err);
                    Ok(ApiResult::Missing)
                }
                other => other,
            };
        };

        if ids.is_empty() {
            return Err(CrossrefError::Validation(
                "at least one identifier is required".to_string(),
            ));
        }

        let mut outcomes = Vec::with_capacity(ids.len());
        for id in ids.as_slice() {
            let base = self.endpoint(route);
            let url = match subpath {
                Subpath::None => format!("{}/{}", base, id),
                Subpath::Works => format!("{}/{}/works", base, id),
                Subpath::Agency => format!("{}/{}/agency", base, id),
            };
            let fetched = if subpath == Subpath::Works && query.cursor.is_some() {
                self.fetch_route(&url, query, &params).await
            } else {
                self.fetch_page(&url, &params).await.map(ApiResult::Document)
            };
            match fetched {
                Ok(outcome) => outcomes.push(outcome),
                Err(err) if downgrade(&err, query.policy) => {
                    tracing::warn!(identifier = %id, "request failed: {}", err);
                    outcomes.push(ApiResult::Missing);
                }
                Err(err) => return Err(err),
            }
        }

        if outcomes.len() == 1 {
            // One identifier unwraps to its bare outcome.
            return Ok(outcomes.remove(0));
        }
        Ok(ApiResult::Batch(outcomes))
    }

    /// Fetch a URL once, then follow the cursor if deep paging was asked
    /// for.
    pub(crate) async fn fetch_route(
        &self,
        url: &str,
        query: &SearchQuery,
        params: &[(String, String)],
    ) -> Result<ApiResult> {
        let first = self.fetch_page(url, params).await?;
        if query.cursor.is_some() {
            return self.page_through(url, params.to_vec(), first, query).await;
        }
        Ok(ApiResult::Document(first))
    }
}

fn downgrade(err: &CrossrefError, policy: ErrorPolicy) -> bool {
    policy == ErrorPolicy::CollectWarnings && !err.is_validation()
}
