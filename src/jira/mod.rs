mod client;
mod issue;
mod jql;
mod provider;
mod search;
mod types;

pub use client::{JiraClient, TlsOptions};
pub use issue::FieldConfig;
pub use jql::incident_jql;
pub use provider::{JiraProvider, ReportOptions};
