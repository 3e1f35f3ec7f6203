//! Parse oracle responses into per-agent goal directives
//!
//! The oracle may wrap its JSON in commentary, so parsing starts by cutting
//! the first brace-delimited object out of the raw text. A response with no
//! locatable or parseable object discards the whole round; a well-formed
//! object with bad entries only loses those entries.

use crate::agent::goal::Goal;
use crate::core::error::{Result, SimError};
use serde_json::Value;

/// One validated goal recommendation for one agent
///
/// The agent id is unvalidated text from the oracle; application resolves
/// it against the world and drops unknown ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalDirective {
    pub agent_id: String,
    pub goal: Goal,
}

/// Extract the outermost brace-delimited object from a response
fn extract_json(response: &str) -> Result<&str> {
    let start = response
        .find('{')
        .ok_or_else(|| SimError::OracleError("no JSON object in response".into()))?;
    let end = response
        .rfind('}')
        .ok_or_else(|| SimError::OracleError("no closing brace in response".into()))?;
    Ok(&response[start..=end])
}

/// Parse a raw oracle response into goal directives
///
/// Entries with unrecognized goal strings are dropped, as are explicit
/// `idle` goals - the oracle never actively idles an agent.
pub fn parse_directives(response: &str) -> Result<Vec<GoalDirective>> {
    let json = extract_json(response)?;
    let data: Value = serde_json::from_str(json)?;

    let Value::Object(entries) = data else {
        return Err(SimError::OracleError(
            "response JSON is not an object".into(),
        ));
    };

    let mut directives = Vec::new();
    for (agent_id, entry) in entries {
        let Some(raw_goal) = entry.get("goal").and_then(Value::as_str) else {
            continue;
        };
        let Some(goal) = Goal::parse(raw_goal) else {
            continue;
        };
        if goal == Goal::Idle {
            continue;
        }
        directives.push(GoalDirective { agent_id, goal });
    }

    Ok(directives)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_simple() {
        let response = r#"{"A": {"goal": "go_cafe"}}"#;
        assert_eq!(extract_json(response).unwrap(), response);
    }

    #[test]
    fn test_extract_json_with_surrounding_text() {
        let response = "Sure, here is my decision:\n{\"A\":{\"goal\":\"go_cafe\"}}\nHope that helps.";
        let json = extract_json(response).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.ends_with('}'));
        assert!(json.contains("go_cafe"));
    }

    #[test]
    fn test_extract_json_no_json() {
        assert!(extract_json("I cannot help").is_err());
    }

    #[test]
    fn test_parse_single_directive() {
        let directives = parse_directives(r#"{"A":{"goal":"go_cafe"}}"#).unwrap();
        assert_eq!(
            directives,
            vec![GoalDirective {
                agent_id: "A".into(),
                goal: Goal::GoCafe,
            }]
        );
    }

    #[test]
    fn test_parse_embedded_in_commentary() {
        let directives =
            parse_directives("blah {\"A\":{\"goal\":\"go_cafe\"}} blah").unwrap();
        assert_eq!(directives.len(), 1);
        assert_eq!(directives[0].goal, Goal::GoCafe);
    }

    #[test]
    fn test_parse_invalid_json_is_error() {
        assert!(parse_directives("{not valid json}").is_err());
    }

    #[test]
    fn test_parse_skips_idle_and_unknown_goals() {
        let directives = parse_directives(
            r#"{"A":{"goal":"idle"},"B":{"goal":"go_fishing"},"C":{"goal":"GO_PARK"}}"#,
        )
        .unwrap();
        assert_eq!(
            directives,
            vec![GoalDirective {
                agent_id: "C".into(),
                goal: Goal::GoPark,
            }]
        );
    }

    #[test]
    fn test_parse_skips_malformed_entries() {
        let directives = parse_directives(
            r#"{"A":"go_cafe","B":{"action":"go_cafe"},"C":{"goal":"go_work"}}"#,
        )
        .unwrap();
        assert_eq!(directives.len(), 1);
        assert_eq!(directives[0].agent_id, "C");
        assert_eq!(directives[0].goal, Goal::GoWork);
    }
}
