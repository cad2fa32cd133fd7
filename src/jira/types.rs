use serde::Deserialize;
use serde_json::{Map, Value};

/// Envelope returned by the search endpoint. The count probe returns
/// the same shape with an empty `issues` array.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub total: usize,
    #[serde(default)]
    pub issues: Vec<SearchIssue>,
}

#[derive(Debug, Deserialize)]
pub struct SearchIssue {
    pub key: String,
}

/// Full issue resource. Fields stay dynamic because the interesting
/// ones are numbered custom fields configured at runtime.
#[derive(Debug, Deserialize)]
pub struct IssueDetail {
    pub key: String,
    pub fields: Map<String, Value>,
}
