use serde_json::Value;

use super::client::JiraClient;
use super::types::IssueDetail;
use crate::duration::{parse_timestamp, DurationBreakdown};
use crate::error::{PrbtimeError, Result};
use crate::report::Incident;

/// Field ids holding the fault-technology links and the two time
/// windows. These are instance-specific, so they arrive as
/// configuration rather than as compile-time struct fields.
#[derive(Debug, Clone)]
pub struct FieldConfig {
    pub technologies: String,
    pub impact_start: String,
    pub impact_end: String,
    pub ops_start: String,
    pub ops_end: String,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            technologies: "customfield_16303".to_string(),
            impact_start: "customfield_10052".to_string(),
            impact_end: "customfield_10053".to_string(),
            ops_start: "created".to_string(),
            ops_end: "resolutiondate".to_string(),
        }
    }
}

impl JiraClient {
    pub async fn fetch_issue(&self, key: &str) -> Result<IssueDetail> {
        let url = self.endpoint_url(&format!("issue/{key}"))?;
        self.get_json(url, &[]).await
    }
}

/// Builds an incident record from a fetched issue: the linked
/// fault-technology summaries plus the customer-impact and handling
/// windows.
pub fn enrich_issue(detail: &IssueDetail, fields: &FieldConfig) -> Result<Incident> {
    let technologies = linked_summaries(detail, &fields.technologies);

    let impact = DurationBreakdown::between(
        timestamp_field(detail, &fields.impact_start)?,
        timestamp_field(detail, &fields.impact_end)?,
    );
    let ops = DurationBreakdown::between(
        timestamp_field(detail, &fields.ops_start)?,
        timestamp_field(detail, &fields.ops_end)?,
    );

    Ok(Incident {
        key: detail.key.clone(),
        technologies,
        impact,
        ops,
    })
}

/// Summaries of the tickets linked through a multi-valued field. A
/// null, missing or non-array value reads as no linked tickets.
fn linked_summaries(detail: &IssueDetail, field: &str) -> Vec<String> {
    let Some(Value::Array(links)) = detail.fields.get(field) else {
        return Vec::new();
    };

    links
        .iter()
        .filter_map(|link| link.pointer("/fields/summary"))
        .filter_map(Value::as_str)
        .map(str::to_owned)
        .collect()
}

fn timestamp_field(
    detail: &IssueDetail,
    field: &str,
) -> Result<chrono::DateTime<chrono::FixedOffset>> {
    let value = detail
        .fields
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| PrbtimeError::MissingField {
            issue: detail.key.clone(),
            field: field.to_string(),
        })?;

    parse_timestamp(value).ok_or_else(|| PrbtimeError::Timestamp {
        issue: detail.key.clone(),
        field: field.to_string(),
        value: value.to_string(),
    })
}
