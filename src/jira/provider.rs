use chrono::Utc;
use log::{info, warn};

use super::client::JiraClient;
use super::issue::{enrich_issue, FieldConfig};
use crate::error::Result;
use crate::report::IncidentReport;

pub struct ReportOptions {
    pub parent: String,
    pub jql: String,
    pub page_size: usize,
    pub fields: FieldConfig,
}

pub struct JiraProvider {
    pub client: JiraClient,
    pub options: ReportOptions,
}

impl JiraProvider {
    pub fn new(client: JiraClient, options: ReportOptions) -> Self {
        Self { client, options }
    }

    /// Runs the incident search, enriches every match one request at a
    /// time, and accumulates the two duration totals.
    pub async fn collect_report(&self) -> Result<IncidentReport> {
        info!(
            "Searching incidents linked to {} ...",
            self.options.parent
        );

        let matches = self
            .client
            .search_all(&self.options.jql, &["key"], self.options.page_size)
            .await?;

        if matches.is_empty() {
            warn!("No incidents matched for parent {}", self.options.parent);
        } else {
            info!("Enriching {} incidents...", matches.len());
        }

        let mut incidents = Vec::with_capacity(matches.len());
        let mut total_impact_seconds = 0;
        let mut total_ops_seconds = 0;

        for issue in &matches {
            let detail = self.client.fetch_issue(&issue.key).await?;
            let incident = enrich_issue(&detail, &self.options.fields)?;

            total_impact_seconds += incident.impact.total_seconds;
            total_ops_seconds += incident.ops.total_seconds;
            incidents.push(incident);
        }

        Ok(IncidentReport {
            parent: self.options.parent.clone(),
            collected_at: Utc::now(),
            total_incidents: incidents.len(),
            incidents,
            total_impact_seconds,
            total_ops_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jira::client::TlsOptions;
    use crate::jira::jql::incident_jql;
    use mockito::Matcher;

    fn provider(server: &mockito::Server) -> JiraProvider {
        let client = JiraClient::new(&server.url(), &TlsOptions::default()).unwrap();
        let options = ReportOptions {
            parent: "PRB-1966".to_string(),
            jql: incident_jql("OPS", "PRB-1966", "Technologies at Fault"),
            page_size: 100,
            fields: FieldConfig::default(),
        };
        JiraProvider::new(client, options)
    }

    fn issue_body(technologies: &str, impact: (&str, &str), ops: (&str, &str)) -> String {
        format!(
            r#"{{
                "key": "ignored",
                "fields": {{
                    "customfield_16303": {technologies},
                    "customfield_10052": "{}",
                    "customfield_10053": "{}",
                    "created": "{}",
                    "resolutiondate": "{}"
                }}
            }}"#,
            impact.0, impact.1, ops.0, ops.1
        )
    }

    #[tokio::test]
    async fn test_collect_report_totals_and_rendering() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("GET", "/rest/api/2/search")
            .match_query(Matcher::UrlEncoded("maxResults".into(), "0".into()))
            .with_header("content-type", "application/json")
            .with_body(r#"{"total": 2, "issues": []}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/rest/api/2/search")
            .match_query(Matcher::UrlEncoded("startAt".into(), "0".into()))
            .with_header("content-type", "application/json")
            .with_body(r#"{"total": 2, "issues": [{"key": "OPS-1"}, {"key": "OPS-2"}]}"#)
            .create_async()
            .await;

        // OPS-1: impact 2h30m (9000s), ops 5h (18000s)
        let body = issue_body(
            r#"[{"fields": {"summary": "DNS"}}, {"fields": {"summary": "CDN"}}]"#,
            ("2024-01-01T10:00:00.000+0000", "2024-01-01T12:30:00.000+0000"),
            ("2024-01-01T09:00:00.000+0000", "2024-01-01T14:00:00.000+0000"),
        );
        let body = body.replace("\"ignored\"", "\"OPS-1\"");
        server
            .mock("GET", "/rest/api/2/issue/OPS-1")
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        // OPS-2: impact 45m (2700s), ops 1h15m (4500s), no technologies
        let body = issue_body(
            "null",
            ("2024-02-01T08:00:00.000+0000", "2024-02-01T08:45:00.000+0000"),
            ("2024-02-01T07:30:00.000+0000", "2024-02-01T08:45:00.000+0000"),
        );
        let body = body.replace("\"ignored\"", "\"OPS-2\"");
        server
            .mock("GET", "/rest/api/2/issue/OPS-2")
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let report = provider(&server).collect_report().await.unwrap();

        assert_eq!(report.total_incidents, 2);
        assert_eq!(report.total_impact_seconds, 9000 + 2700);
        assert_eq!(report.total_ops_seconds, 18_000 + 4500);

        let text = report.render_text().unwrap();
        assert!(text.starts_with("Incidents: OPS-1, OPS-2\n"));
        assert!(text.contains("||Key||Technology at fault||Incident duration||Ops time||\n"));
        assert!(text.contains("| OPS-1 | DNS CDN | 2 hours, 30 minutes | 5 hours, 0 minutes |\n"));
        assert!(text.contains("| OPS-2 |  | 0 hours, 45 minutes | 1 hours, 15 minutes |\n"));
        assert!(text.contains("Total impact: 3 hours, 15 minutes\n"));
        assert!(text.ends_with("Total ops time: 6 hours, 15 minutes\n"));
    }

    #[tokio::test]
    async fn test_collect_report_no_matches() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("GET", "/rest/api/2/search")
            .match_query(Matcher::UrlEncoded("maxResults".into(), "0".into()))
            .with_header("content-type", "application/json")
            .with_body(r#"{"total": 0, "issues": []}"#)
            .create_async()
            .await;
        let detail_calls = server
            .mock("GET", Matcher::Regex("^/rest/api/2/issue/".to_string()))
            .expect(0)
            .create_async()
            .await;

        let report = provider(&server).collect_report().await.unwrap();

        assert_eq!(report.total_incidents, 0);
        assert_eq!(report.total_impact_seconds, 0);
        assert_eq!(report.total_ops_seconds, 0);
        detail_calls.assert_async().await;
    }

    #[tokio::test]
    async fn test_collect_report_enrich_failure_names_issue() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("GET", "/rest/api/2/search")
            .match_query(Matcher::UrlEncoded("maxResults".into(), "0".into()))
            .with_header("content-type", "application/json")
            .with_body(r#"{"total": 1, "issues": []}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/rest/api/2/search")
            .match_query(Matcher::UrlEncoded("startAt".into(), "0".into()))
            .with_header("content-type", "application/json")
            .with_body(r#"{"total": 1, "issues": [{"key": "OPS-7"}]}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/rest/api/2/issue/OPS-7")
            .with_header("content-type", "application/json")
            .with_body(r#"{"key": "OPS-7", "fields": {"resolutiondate": null}}"#)
            .create_async()
            .await;

        let err = provider(&server).collect_report().await.unwrap_err();

        assert!(err.to_string().contains("OPS-7"));
    }
}
