/// Builds the query matching closed incidents linked to a parent
/// problem ticket that carry a fault-technology value.
///
/// `technologies_field` is the field's display name, which is what the
/// query language filters on (extraction uses the numeric id instead).
pub fn incident_jql(project: &str, parent: &str, technologies_field: &str) -> String {
    format!(
        "project = {project} and issueFunction in linkedIssuesOf('key = {parent}') \
         AND '{technologies_field}' is not EMPTY AND status = Closed"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incident_jql() {
        let jql = incident_jql("OPS", "PRB-1966", "Technologies at Fault");

        assert_eq!(
            jql,
            "project = OPS and issueFunction in linkedIssuesOf('key = PRB-1966') \
             AND 'Technologies at Fault' is not EMPTY AND status = Closed"
        );
    }
}
