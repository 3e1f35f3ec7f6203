//! Agent intentions and their mapping to zone types

use crate::world::zone::ZoneType;
use serde::{Deserialize, Serialize};

/// What an agent is currently trying to do
///
/// `Idle` is never assigned by the decision oracle; it arises when an agent
/// finishes a path or is explicitly cleared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    #[default]
    Idle,
    GoHome,
    GoWork,
    GoCafe,
    GoPark,
}

impl Goal {
    pub fn as_str(self) -> &'static str {
        match self {
            Goal::Idle => "idle",
            Goal::GoHome => "go_home",
            Goal::GoWork => "go_work",
            Goal::GoCafe => "go_cafe",
            Goal::GoPark => "go_park",
        }
    }

    /// The zone type this goal travels toward, `None` for `Idle`
    pub fn zone_type(self) -> Option<ZoneType> {
        match self {
            Goal::Idle => None,
            Goal::GoHome => Some(ZoneType::Home),
            Goal::GoWork => Some(ZoneType::Work),
            Goal::GoCafe => Some(ZoneType::Cafe),
            Goal::GoPark => Some(ZoneType::Park),
        }
    }

    /// Normalize and parse an oracle goal string
    ///
    /// Trims whitespace and lowercases before matching; anything outside
    /// the five known goals is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "idle" => Some(Goal::Idle),
            "go_home" => Some(Goal::GoHome),
            "go_work" => Some(Goal::GoWork),
            "go_cafe" => Some(Goal::GoCafe),
            "go_park" => Some(Goal::GoPark),
            _ => None,
        }
    }
}

impl std::fmt::Display for Goal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        assert_eq!(Goal::parse("  GO_CAFE \n"), Some(Goal::GoCafe));
        assert_eq!(Goal::parse("Idle"), Some(Goal::Idle));
        assert_eq!(Goal::parse("go_park"), Some(Goal::GoPark));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(Goal::parse("go_moon"), None);
        assert_eq!(Goal::parse(""), None);
        assert_eq!(Goal::parse("go cafe"), None);
    }

    #[test]
    fn test_zone_type_mapping() {
        assert_eq!(Goal::Idle.zone_type(), None);
        assert_eq!(Goal::GoHome.zone_type(), Some(ZoneType::Home));
        assert_eq!(Goal::GoWork.zone_type(), Some(ZoneType::Work));
        assert_eq!(Goal::GoCafe.zone_type(), Some(ZoneType::Cafe));
        assert_eq!(Goal::GoPark.zone_type(), Some(ZoneType::Park));
    }
}
