//! Cursor-based deep paging.
//!
//! The API hands out an opaque cursor with each page of a deep-paging
//! sequence; requests are strictly sequential because each page's cursor
//! comes from the previous response.

use crate::client::CrossrefClient;
use crate::query::SearchQuery;
use crate::error::Result;
use crate::response::{ApiResult, Document};
use indicatif::{ProgressBar, ProgressStyle};

impl CrossrefClient {
    /// Follow a server-issued cursor until the caller's ceiling, the
    /// server-reported total, or the cursor itself is exhausted.
    ///
    /// `first` is the already-fetched first page. If it carries no cursor,
    /// or the ceiling does not allow a second page, the bare document is
    /// returned so that simple queries keep their non-paged shape.
    pub(crate) async fn page_through(
        &self,
        url: &str,
        mut params: Vec<(String, String)>,
        first: Document,
        query: &SearchQuery,
    ) -> Result<ApiResult> {
        let cursor_max = query.cursor_max;
        let mut total = first.item_count() as u64;

        let Some(mut cursor) = first.next_cursor().map(str::to_string) else {
            return Ok(ApiResult::Document(first));
        };
        if cursor_max <= total {
            return Ok(ApiResult::Document(first));
        }

        // Fixed from the first page; the server does not change it
        // mid-sequence.
        let max_avail = first.total_results().unwrap_or(0);

        let bar = query.progress.then(|| {
            progress_bar(estimated_requests(cursor_max, max_avail, query.page_size()))
        });

        let mut pages = vec![first];
        while total < cursor_max && total < max_avail {
            set_param(&mut params, "cursor", &cursor);
            let page = self.fetch_page(url, &params).await?;
            total += page.item_count() as u64;
            let next = page.next_cursor().map(str::to_string);
            pages.push(page);
            if let Some(bar) = &bar {
                bar.inc(1);
            }
            match next {
                Some(next) => cursor = next,
                None => break,
            }
        }
        if let Some(bar) = &bar {
            bar.finish_and_clear();
        }

        Ok(ApiResult::Pages(pages))
    }
}

/// Number of follow-up requests a full sequence is expected to take.
fn estimated_requests(cursor_max: u64, max_avail: u64, page_size: u64) -> u64 {
    let target = cursor_max.min(max_avail);
    let runs = target.div_ceil(page_size);
    runs.saturating_sub(1)
}

fn progress_bar(len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::with_template("{pos}/{len} {wide_bar} {eta}")
            .expect("valid progress template")
            .progress_chars("=>-"),
    );
    bar
}

fn set_param(params: &mut Vec<(String, String)>, key: &str, value: &str) {
    if let Some(entry) = params.iter_mut().find(|(k, _)| k == key) {
        entry.1 = value.to_string();
    } else {
        params.push((key.to_string(), value.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimated_requests_uses_smaller_bound() {
        // ceiling 100, total 1000, pages of 20 -> 5 runs, 4 follow-ups
        assert_eq!(estimated_requests(100, 1000, 20), 4);
        // total smaller than ceiling
        assert_eq!(estimated_requests(5000, 60, 20), 2);
    }

    #[test]
    fn test_estimated_requests_rounds_up() {
        assert_eq!(estimated_requests(50, 1000, 20), 2);
    }

    #[test]
    fn test_set_param_replaces_and_inserts() {
        let mut params = vec![("cursor".to_string(), "*".to_string())];
        set_param(&mut params, "cursor", "AAA");
        assert_eq!(params, vec![("cursor".to_string(), "AAA".to_string())]);

        let mut params = Vec::new();
        set_param(&mut params, "cursor", "BBB");
        assert_eq!(params, vec![("cursor".to_string(), "BBB".to_string())]);
    }
}
