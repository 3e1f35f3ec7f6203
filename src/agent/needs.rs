//! Decaying physiological needs that drive agent survival

use crate::agent::goal::Goal;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Upper bound for every need; the floor is 0.0
pub const NEED_MAX: f32 = 10.0;

/// The four needs every agent tracks
///
/// Declaration order is load-bearing: it is the iteration order of
/// [`Needs::iter`] and therefore the tie-break when two needs share the
/// minimum value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeedKind {
    Hunger,
    Energy,
    Social,
    Work,
}

impl NeedKind {
    pub const ALL: [NeedKind; 4] = [
        NeedKind::Hunger,
        NeedKind::Energy,
        NeedKind::Social,
        NeedKind::Work,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NeedKind::Hunger => "hunger",
            NeedKind::Energy => "energy",
            NeedKind::Social => "social",
            NeedKind::Work => "work",
        }
    }

    /// The goal that restores this need
    pub fn remedial_goal(self) -> Goal {
        match self {
            NeedKind::Hunger => Goal::GoCafe,
            NeedKind::Energy => Goal::GoHome,
            NeedKind::Social => Goal::GoPark,
            NeedKind::Work => Goal::GoWork,
        }
    }
}

impl std::fmt::Display for NeedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current need levels for one agent, each in `[0, NEED_MAX]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Needs {
    pub hunger: f32,
    pub energy: f32,
    pub social: f32,
    pub work: f32,
}

impl Needs {
    /// Roll starting levels for a freshly spawned agent
    ///
    /// Ranges leave every need comfortably above the LOW band so the first
    /// oracle rounds see healthy agents.
    pub fn roll(rng: &mut impl Rng) -> Self {
        Self {
            hunger: rng.gen_range(5.0..7.0),
            energy: rng.gen_range(5.5..7.5),
            social: rng.gen_range(4.5..7.0),
            work: rng.gen_range(4.0..6.0),
        }
    }

    pub fn get(&self, kind: NeedKind) -> f32 {
        match kind {
            NeedKind::Hunger => self.hunger,
            NeedKind::Energy => self.energy,
            NeedKind::Social => self.social,
            NeedKind::Work => self.work,
        }
    }

    pub fn set(&mut self, kind: NeedKind, value: f32) {
        let slot = match kind {
            NeedKind::Hunger => &mut self.hunger,
            NeedKind::Energy => &mut self.energy,
            NeedKind::Social => &mut self.social,
            NeedKind::Work => &mut self.work,
        };
        *slot = value.clamp(0.0, NEED_MAX);
    }

    /// Iterate needs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (NeedKind, f32)> + '_ {
        NeedKind::ALL.into_iter().map(|k| (k, self.get(k)))
    }

    /// Drop every need by `rate`, floored at zero
    pub fn decay(&mut self, rate: f32) {
        for kind in NeedKind::ALL {
            self.set(kind, (self.get(kind) - rate).max(0.0));
        }
    }

    /// Raise one need by `amount`, capped at [`NEED_MAX`]
    pub fn boost(&mut self, kind: NeedKind, amount: f32) {
        self.set(kind, (self.get(kind) + amount).min(NEED_MAX));
    }

    /// The weakest need and its level
    ///
    /// Ties resolve to the first need in declaration order.
    pub fn lowest(&self) -> (NeedKind, f32) {
        let mut worst = (NeedKind::Hunger, self.hunger);
        for (kind, value) in self.iter().skip(1) {
            if value < worst.1 {
                worst = (kind, value);
            }
        }
        worst
    }

    /// How many needs sit below `threshold`
    pub fn count_below(&self, threshold: f32) -> usize {
        self.iter().filter(|(_, v)| *v < threshold).count()
    }
}
