//! Named map zones and their per-tick need effects

use crate::agent::needs::NeedKind;
use crate::core::types::{Color, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Functional category of a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneType {
    Home,
    Work,
    Cafe,
    Park,
    Road,
}

impl ZoneType {
    pub fn as_str(self) -> &'static str {
        match self {
            ZoneType::Home => "home",
            ZoneType::Work => "work",
            ZoneType::Cafe => "cafe",
            ZoneType::Park => "park",
            ZoneType::Road => "road",
        }
    }

    /// Per-tick need boosts granted to agents standing in a zone of this type
    ///
    /// Roads are pure transit and restore nothing.
    pub fn effects(self) -> &'static [(NeedKind, f32)] {
        match self {
            ZoneType::Home => &[(NeedKind::Energy, 0.12)],
            ZoneType::Work => &[(NeedKind::Work, 0.15)],
            ZoneType::Cafe => &[(NeedKind::Hunger, 0.18), (NeedKind::Social, 0.08)],
            ZoneType::Park => &[(NeedKind::Energy, 0.06), (NeedKind::Social, 0.10)],
            ZoneType::Road => &[],
        }
    }
}

impl std::fmt::Display for ZoneType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named rectangular region of the map
///
/// Immutable after creation; the world hands out references and agents keep
/// an owned copy of their home zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub name: String,
    pub kind: ZoneType,
    pub rect: Rect,
    pub color: Color,
}

impl Zone {
    pub fn new(name: impl Into<String>, kind: ZoneType, rect: Rect, color: Color) -> Self {
        Self {
            name: name.into(),
            kind,
            rect,
            color,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    pub fn contains(&self, p: Vec2) -> bool {
        self.rect.contains(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_center_and_contains() {
        let zone = Zone::new(
            "cafe",
            ZoneType::Cafe,
            Rect::new(400.0, 70.0, 170.0, 150.0),
            (75, 55, 45),
        );
        assert_eq!(zone.center(), Vec2::new(485.0, 145.0));
        assert!(zone.contains(zone.center()));
        assert!(!zone.contains(Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn test_road_has_no_effects() {
        assert!(ZoneType::Road.effects().is_empty());
    }

    #[test]
    fn test_cafe_restores_hunger_and_social() {
        let effects = ZoneType::Cafe.effects();
        assert!(effects.contains(&(NeedKind::Hunger, 0.18)));
        assert!(effects.contains(&(NeedKind::Social, 0.08)));
    }
}
