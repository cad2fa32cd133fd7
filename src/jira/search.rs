use log::info;

use super::client::JiraClient;
use super::types::{SearchIssue, SearchResponse};
use crate::error::{PrbtimeError, Result};

/// Number of pages needed for a result set: total divided by page
/// size, plus one when there is a remainder.
fn count_pages(per_page: usize, total: usize) -> usize {
    total / per_page + usize::from(total % per_page > 0)
}

impl JiraClient {
    /// Runs a search and returns every matching issue, in result
    /// order, across as many pages as the total demands.
    ///
    /// A zero-result probe request reads the match count first; one
    /// request per page follows with an explicit `startAt` offset.
    pub async fn search_all(
        &self,
        jql: &str,
        fields: &[&str],
        page_size: usize,
    ) -> Result<Vec<SearchIssue>> {
        if page_size == 0 {
            return Err(PrbtimeError::Config(
                "Page size must be at least 1".to_string(),
            ));
        }

        let url = self.endpoint_url("search")?;

        let probe: SearchResponse = self
            .get_json(url.clone(), &[("jql", jql), ("maxResults", "0")])
            .await?;
        let total = probe.total;

        let pages = count_pages(page_size, total);
        info!("Search matched {total} issues across {pages} pages");

        let fields = fields.join(",");
        let max_results = page_size.to_string();

        let mut issues = Vec::with_capacity(total);
        for page in 0..pages {
            let start_at = (page_size * page).to_string();
            let response: SearchResponse = self
                .get_json(
                    url.clone(),
                    &[
                        ("jql", jql),
                        ("fields", &fields),
                        ("maxResults", &max_results),
                        ("startAt", &start_at),
                    ],
                )
                .await?;

            issues.extend(response.issues);
        }

        Ok(issues)
    }
}
