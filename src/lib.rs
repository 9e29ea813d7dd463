//! # crossref-client
//!
//! A Rust client for the Crossref REST API.
//!
//! Provides:
//! - **Route methods** for `/works`, `/members`, `/funders`, `/journals`,
//!   `/types`, `/licenses` and `/prefixes`
//! - **Deep paging** over server-issued cursors, with an item ceiling and
//!   an optional progress bar
//! - **Filter normalization** from snake_case names to the API's wire
//!   format
//! - **Identifier batches** with a warn-instead-of-fail policy, so one bad
//!   DOI does not abort a batch
//!
//! ## Quick Start
//!
//! ```no_run
//! # async fn example() -> crossref_client::Result<()> {
//! use crossref_client::{CrossrefClient, SearchQuery};
//!
//! // A mailto routes requests to the API's polite pool.
//! let client = CrossrefClient::new().with_mailto("name@example.com");
//!
//! // Search works
//! let res = client
//!     .works(SearchQuery::new().query("ecology").limit(20))
//!     .await?;
//! for doc in res.documents() {
//!     for item in doc.items() {
//!         println!("{}", item["DOI"]);
//!     }
//! }
//!
//! // Deep paging with a ceiling
//! let res = client
//!     .works(SearchQuery::new().query("widget").cursor("*").cursor_max(200))
//!     .await?;
//! println!("{} items", res.item_count());
//! # Ok(())
//! # }
//! ```
//!
//! ## Filters
//!
//! ```
//! use crossref_client::SearchQuery;
//!
//! // repeated filter names take a list value
//! let query = SearchQuery::new()
//!     .filter("has_full_text", true)
//!     .filter("award_funder", vec!["10.13039/100004440", "10.13039/100000861"]);
//! ```

pub mod client;
pub mod dispatch;
pub mod error;
pub mod filters;
pub mod pager;
pub mod query;
pub mod response;
pub mod routes;
pub mod ua;

// Re-export key types at the crate root.
pub use client::CrossrefClient;
pub use dispatch::{ErrorPolicy, Ids};
pub use error::{CrossrefError, Result};
pub use filters::{FilterValue, Filters, RenameTable};
pub use query::{Order, SearchQuery, DEFAULT_CURSOR_MAX};
pub use response::{ApiResult, Document};
