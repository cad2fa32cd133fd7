use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::duration::{format_total, DurationBreakdown};
use crate::error::Result;
use crate::table::{self, Record};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Incident {
    pub key: String,
    pub technologies: Vec<String>,
    pub impact: DurationBreakdown,
    pub ops: DurationBreakdown,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IncidentReport {
    pub parent: String,
    pub collected_at: DateTime<Utc>,
    pub total_incidents: usize,
    pub incidents: Vec<Incident>,
    pub total_impact_seconds: i64,
    pub total_ops_seconds: i64,
}

impl IncidentReport {
    /// Renders the report as text: the matched keys, the incident
    /// table in tracker markup, and the two aggregate totals.
    pub fn render_text(&self) -> Result<String> {
        let keys: Vec<&str> = self.incidents.iter().map(|i| i.key.as_str()).collect();

        let records: Vec<Record> = self.incidents.iter().map(incident_record).collect();

        let mut out = String::new();
        out.push_str(&format!("Incidents: {}\n", keys.join(", ")));
        out.push_str(&table::render(&records)?);
        out.push_str(&format!(
            "Total impact: {}\n",
            format_total(self.total_impact_seconds)
        ));
        out.push_str(&format!(
            "Total ops time: {}\n",
            format_total(self.total_ops_seconds)
        ));

        Ok(out)
    }
}

fn incident_record(incident: &Incident) -> Record {
    let mut record = Record::new();
    record.insert("Key".to_string(), incident.key.clone());
    record.insert(
        "Technology at fault".to_string(),
        incident.technologies.join(" "),
    );
    record.insert(
        "Incident duration".to_string(),
        incident.impact.format_hm(),
    );
    record.insert("Ops time".to_string(), incident.ops.format_hm());
    record
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakdown(hours: i64, minutes: i64) -> DurationBreakdown {
        DurationBreakdown {
            hours,
            minutes,
            total_seconds: hours * 3600 + minutes * 60,
        }
    }

    fn sample_report() -> IncidentReport {
        let incidents = vec![
            Incident {
                key: "OPS-1".to_string(),
                technologies: vec!["DNS".to_string(), "CDN".to_string()],
                impact: breakdown(2, 30),
                ops: breakdown(4, 0),
            },
            Incident {
                key: "OPS-2".to_string(),
                technologies: vec![],
                impact: breakdown(0, 45),
                ops: breakdown(1, 15),
            },
        ];

        IncidentReport {
            parent: "PRB-1966".to_string(),
            collected_at: Utc::now(),
            total_incidents: incidents.len(),
            total_impact_seconds: incidents.iter().map(|i| i.impact.total_seconds).sum(),
            total_ops_seconds: incidents.iter().map(|i| i.ops.total_seconds).sum(),
            incidents,
        }
    }

    #[test]
    fn test_render_text_full_report() {
        let text = sample_report().render_text().unwrap();

        let expected = "Incidents: OPS-1, OPS-2\n\
            ||Key||Technology at fault||Incident duration||Ops time||\n\
            | OPS-1 | DNS CDN | 2 hours, 30 minutes | 4 hours, 0 minutes |\n\
            | OPS-2 |  | 0 hours, 45 minutes | 1 hours, 15 minutes |\n\
            Total impact: 3 hours, 15 minutes\n\
            Total ops time: 5 hours, 15 minutes\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_text_empty_report() {
        let report = IncidentReport {
            parent: "PRB-1966".to_string(),
            collected_at: Utc::now(),
            total_incidents: 0,
            incidents: vec![],
            total_impact_seconds: 0,
            total_ops_seconds: 0,
        };

        let text = report.render_text().unwrap();

        assert_eq!(
            text,
            "Incidents: \n\
             Total impact: 0 hours, 0 minutes\n\
             Total ops time: 0 hours, 0 minutes\n"
        );
    }
}
