use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use crate::jira::{
    incident_jql, FieldConfig, JiraClient, JiraProvider, ReportOptions, TlsOptions,
};

#[derive(Parser)]
#[command(name = "prbtime")]
#[command(author, version, about = "Incident Duration Reporting Tool", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output file path (defaults to stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Emit the report as JSON instead of tracker markup
    #[arg(short, long, global = true, default_value_t = false)]
    json: bool,

    /// Pretty print JSON output
    #[arg(short, long, global = true, default_value_t = false)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Report incident durations linked to a parent problem ticket
    Report {
        /// Tracker instance URL
        #[arg(short, long, env = "JIRA_URL")]
        url: String,

        /// Parent problem ticket key (e.g. "PRB-1966")
        #[arg(short = 'P', long)]
        parent: String,

        /// Project key the incident search is scoped to
        #[arg(long, default_value = "OPS")]
        project: String,

        /// Full JQL override; replaces the built linked-incident query
        #[arg(long)]
        jql: Option<String>,

        /// Client certificate bundle in PEM form used to authenticate
        #[arg(short, long, env = "JIRA_CLIENT_CERT")]
        cert: Option<PathBuf>,

        /// Extra trusted root certificate in PEM form
        #[arg(long, env = "JIRA_CA_CERT")]
        ca_cert: Option<PathBuf>,

        /// Skip TLS server certificate verification
        #[arg(long, default_value_t = false)]
        insecure: bool,

        /// Results fetched per search page
        #[arg(long, default_value_t = 100)]
        page_size: usize,

        /// Display name of the fault-technology field, used in the query
        #[arg(long, default_value = "Technologies at Fault")]
        technologies_name: String,

        /// Field id holding the linked fault-technology tickets
        #[arg(long, default_value = "customfield_16303")]
        technologies_field: String,

        /// Field id holding the customer-impact window start
        #[arg(long, default_value = "customfield_10052")]
        impact_start_field: String,

        /// Field id holding the customer-impact window end
        #[arg(long, default_value = "customfield_10053")]
        impact_end_field: String,

        /// Field id holding the handling window start
        #[arg(long, default_value = "created")]
        ops_start_field: String,

        /// Field id holding the handling window end
        #[arg(long, default_value = "resolutiondate")]
        ops_end_field: String,
    },
}

impl Cli {
    pub async fn execute(&self) -> Result<()> {
        match &self.command {
            Commands::Report {
                url,
                parent,
                project,
                jql,
                cert,
                ca_cert,
                insecure,
                page_size,
                technologies_name,
                technologies_field,
                impact_start_field,
                impact_end_field,
                ops_start_field,
                ops_end_field,
            } => {
                info!("Collecting incident durations for parent: {}", parent);

                let tls = TlsOptions {
                    identity_pem: cert.clone(),
                    ca_bundle: ca_cert.clone(),
                    accept_invalid_certs: *insecure,
                };
                let client = JiraClient::new(url, &tls)?;

                let options = ReportOptions {
                    parent: parent.clone(),
                    jql: jql.clone().unwrap_or_else(|| {
                        incident_jql(project, parent, technologies_name)
                    }),
                    page_size: *page_size,
                    fields: FieldConfig {
                        technologies: technologies_field.clone(),
                        impact_start: impact_start_field.clone(),
                        impact_end: impact_end_field.clone(),
                        ops_start: ops_start_field.clone(),
                        ops_end: ops_end_field.clone(),
                    },
                };

                let report = JiraProvider::new(client, options).collect_report().await?;

                let rendered = if self.json {
                    if self.pretty {
                        serde_json::to_string_pretty(&report)?
                    } else {
                        serde_json::to_string(&report)?
                    }
                } else {
                    report.render_text()?
                };

                // Write to output
                if let Some(output_path) = &self.output {
                    std::fs::write(output_path, rendered)?;
                    info!("Report written to: {}", output_path.display());
                } else {
                    print!("{}", rendered);
                }

                Ok(())
            }
        }
    }
}
