use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic role assigned to a diarized speaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeakerRole {
    #[serde(rename = "AGENT")]
    Agent,
    #[serde(rename = "CUSTOMER")]
    Customer,
    #[serde(rename = "unknown")]
    Unknown,
}

impl fmt::Display for SpeakerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SpeakerRole::Agent => "AGENT",
            SpeakerRole::Customer => "CUSTOMER",
            SpeakerRole::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// One speaker's role assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub speaker: String,
    pub role: SpeakerRole,
}

/// Role assignments covering every diarized speaker exactly once, in the
/// same order the diarization source emitted the speakers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleMap {
    assignments: Vec<RoleAssignment>,
}

impl RoleMap {
    pub fn assignments(&self) -> &[RoleAssignment] {
        &self.assignments
    }

    /// Role for a speaker label; `Unknown` for labels that were never mapped.
    pub fn role_of(&self, speaker: &str) -> SpeakerRole {
        self.assignments
            .iter()
            .find(|a| a.speaker == speaker)
            .map(|a| a.role)
            .unwrap_or(SpeakerRole::Unknown)
    }
}

/// Assign AGENT/CUSTOMER roles to speaker labels.
///
/// The first label in the sequence becomes the AGENT and every other
/// label a CUSTOMER; an empty sequence yields a single
/// `unknown -> unknown` sentinel entry. "First" here is the diarization
/// source's emission order, not necessarily the first speaker to talk,
/// so the assignment is a heuristic that can misattribute roles when
/// the source orders labels differently.
pub fn assign_roles<'a>(labels: impl IntoIterator<Item = &'a str>) -> RoleMap {
    let mut assignments = Vec::new();

    for (index, label) in labels.into_iter().enumerate() {
        let role = if index == 0 {
            SpeakerRole::Agent
        } else {
            SpeakerRole::Customer
        };
        assignments.push(RoleAssignment {
            speaker: label.to_string(),
            role,
        });
    }

    if assignments.is_empty() {
        assignments.push(RoleAssignment {
            speaker: "unknown".to_string(),
            role: SpeakerRole::Unknown,
        });
    }

    RoleMap { assignments }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_speakers_yields_sentinel() {
        let map = assign_roles([]);
        assert_eq!(map.assignments().len(), 1);
        assert_eq!(map.assignments()[0].speaker, "unknown");
        assert_eq!(map.assignments()[0].role, SpeakerRole::Unknown);
    }

    #[test]
    fn test_single_speaker_is_agent() {
        let map = assign_roles(["s1"]);
        assert_eq!(map.role_of("s1"), SpeakerRole::Agent);
    }

    #[test]
    fn test_first_speaker_agent_rest_customers() {
        let map = assign_roles(["s1", "s2", "s3"]);
        assert_eq!(map.role_of("s1"), SpeakerRole::Agent);
        assert_eq!(map.role_of("s2"), SpeakerRole::Customer);
        assert_eq!(map.role_of("s3"), SpeakerRole::Customer);
    }

    #[test]
    fn test_unmapped_label_is_unknown() {
        let map = assign_roles(["s1"]);
        assert_eq!(map.role_of("s9"), SpeakerRole::Unknown);
    }

    #[test]
    fn test_role_serde_names() {
        assert_eq!(
            serde_json::to_string(&SpeakerRole::Agent).unwrap(),
            "\"AGENT\""
        );
        assert_eq!(
            serde_json::to_string(&SpeakerRole::Unknown).unwrap(),
            "\"unknown\""
        );
    }
}
