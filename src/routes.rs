//! Route methods for the Crossref API collections.
//!
//! Covers: works, members, funders, journals, types, licenses, prefixes,
//! plus the registration-agency and random-DOIs conveniences. Each method
//! forwards a [`SearchQuery`] into the shared request machinery.

use crate::client::CrossrefClient;
use crate::dispatch::{Ids, Subpath};
use crate::error::{CrossrefError, Result};
use crate::query::SearchQuery;
use crate::response::ApiResult;

impl CrossrefClient {
    /// Search the `/works` route.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> crossref_client::Result<()> {
    /// use crossref_client::{CrossrefClient, SearchQuery};
    ///
    /// let client = CrossrefClient::new();
    ///
    /// // free search
    /// let res = client.works(SearchQuery::new().query("ecology")).await?;
    ///
    /// // by DOI
    /// let res = client
    ///     .works(SearchQuery::new().ids("10.1371/journal.pone.0033693"))
    ///     .await?;
    ///
    /// // deep paging
    /// let res = client
    ///     .works(SearchQuery::new().query("widget").cursor("*").cursor_max(500))
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn works(&self, query: SearchQuery) -> Result<ApiResult> {
        self.dispatch("works", &query, Subpath::None).await
    }

    /// Search the `/members` route.
    ///
    /// With identifiers, `works(true)` fetches each member's works
    /// collection (`/members/{id}/works`) instead of the member record.
    pub async fn members(&self, query: SearchQuery) -> Result<ApiResult> {
        self.dispatch("members", &query, nested(&query)).await
    }

    /// Search the `/funders` route.
    pub async fn funders(&self, query: SearchQuery) -> Result<ApiResult> {
        self.dispatch("funders", &query, nested(&query)).await
    }

    /// Search the `/journals` route. Identifiers are ISSNs.
    pub async fn journals(&self, query: SearchQuery) -> Result<ApiResult> {
        self.dispatch("journals", &query, nested(&query)).await
    }

    /// Search the `/types` route.
    pub async fn types(&self, query: SearchQuery) -> Result<ApiResult> {
        self.dispatch("types", &query, nested(&query)).await
    }

    /// Search the `/licenses` route.
    ///
    /// The route accepts no identifiers and no filters; passing either is
    /// a validation error.
    pub async fn licenses(&self, query: SearchQuery) -> Result<ApiResult> {
        if query.ids.is_some() || !query.filters.is_empty() || query.works {
            return Err(CrossrefError::Validation(
                "the licenses route accepts neither ids, filters, nor the works flag".to_string(),
            ));
        }
        self.dispatch("licenses", &query, Subpath::None).await
    }

    /// Look up DOI prefixes on the `/prefixes` route.
    ///
    /// The route has no listing form, so at least one prefix is required.
    pub async fn prefixes(&self, query: SearchQuery) -> Result<ApiResult> {
        match &query.ids {
            Some(ids) if !ids.is_empty() => self.dispatch("prefixes", &query, nested(&query)).await,
            _ => Err(CrossrefError::Validation(
                "the prefixes route requires at least one DOI prefix".to_string(),
            )),
        }
    }

    /// Determine the registration agency for each DOI.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> crossref_client::Result<()> {
    /// let client = crossref_client::CrossrefClient::new();
    /// let agencies = client
    ///     .registration_agency("10.1371/journal.pone.0033693")
    ///     .await?;
    /// assert_eq!(agencies, vec!["Crossref".to_string()]);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn registration_agency(&self, ids: impl Into<Ids>) -> Result<Vec<String>> {
        let query = SearchQuery::new().ids(ids);
        let res = self.dispatch("works", &query, Subpath::Agency).await?;
        let labels = res
            .documents()
            .into_iter()
            .filter_map(|doc| {
                doc.message()
                    .and_then(|m| m.get("agency"))
                    .and_then(|a| a.get("label"))
                    .and_then(|l| l.as_str())
                    .map(str::to_string)
            })
            .collect();
        Ok(labels)
    }

    /// Fetch a random set of DOIs. `sample` max: 100.
    pub async fn random_dois(&self, sample: u64) -> Result<Vec<String>> {
        let res = self.works(SearchQuery::new().sample(sample)).await?;
        let dois = res
            .documents()
            .into_iter()
            .flat_map(|doc| doc.items())
            .filter_map(|item| item.get("DOI").and_then(|d| d.as_str()).map(str::to_string))
            .collect();
        Ok(dois)
    }
}

fn nested(query: &SearchQuery) -> Subpath {
    if query.works {
        Subpath::Works
    } else {
        Subpath::None
    }
}
