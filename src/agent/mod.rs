//! The agent state machine: needs decay, health, movement, death
//!
//! An agent owns its position, path-following and goal; the world drives it
//! once per tick and the oracle layer steers it through [`Agent::assign`].
//! Death is a terminal flag, not removal - a dead agent stays in the world
//! as an inert entity.

pub mod goal;
pub mod needs;

use crate::core::config::SimConfig;
use crate::core::types::{AgentId, Color, Vec2};
use crate::world::graph::ZoneGraph;
use crate::world::zone::Zone;
use goal::Goal;
use needs::{NeedKind, Needs};

#[derive(Debug, Clone)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub color: Color,
    /// The agent's own home zone, fixed at creation
    pub home: Zone,

    pub pos: Vec2,
    /// Index into the world's zone list, `None` while between zones
    pub zone_idx: Option<usize>,
    pub health: f32,
    pub alive: bool,
    /// The need that was lowest at the moment of death, set once
    pub death_reason: Option<NeedKind>,
    /// Display string written by the oracle layer, read by rendering
    pub thought: String,

    pub needs: Needs,
    pub goal: Goal,
    /// Name of the zone the current goal travels toward
    pub target: Option<String>,
    pub path: Vec<Vec2>,
    pub path_i: usize,
    /// Ticks spent idle since the last goal completed
    pub wait: u64,
}

impl Agent {
    /// Create an agent standing at the center of its home zone
    ///
    /// `home_idx` is the home's index in the world zone list the agent will
    /// be ticked against.
    pub fn new(
        id: AgentId,
        name: impl Into<String>,
        color: Color,
        home: Zone,
        home_idx: usize,
        needs: Needs,
    ) -> Self {
        let pos = home.center();
        Self {
            id,
            name: name.into(),
            color,
            home,
            pos,
            zone_idx: Some(home_idx),
            health: 100.0,
            alive: true,
            death_reason: None,
            thought: "...".into(),
            needs,
            goal: Goal::Idle,
            target: None,
            path: Vec::new(),
            path_i: 0,
            wait: 0,
        }
    }

    /// Steer the agent toward a goal
    ///
    /// Dead agents reject all assignments. An `Idle` assignment always
    /// clears goal, target and path. Otherwise the call is a no-op when the
    /// agent already stands inside the target zone, or when the same
    /// (goal, target) pair is already in progress with a path; any other
    /// assignment recomputes the route from the current zone (home when
    /// between zones).
    pub fn assign(&mut self, goal: Goal, target: Option<&Zone>, graph: &ZoneGraph, zones: &[Zone]) {
        if !self.alive {
            return;
        }

        if goal == Goal::Idle {
            self.goal = Goal::Idle;
            self.target = None;
            self.path.clear();
            self.path_i = 0;
            return;
        }

        if let (Some(idx), Some(target)) = (self.zone_idx, target) {
            if zones[idx].name == target.name {
                return;
            }
        }

        if self.goal == goal
            && self.target.as_deref() == target.map(|t| t.name.as_str())
            && !self.path.is_empty()
        {
            return;
        }

        self.goal = goal;
        self.target = target.map(|t| t.name.clone());
        self.wait = 0;

        if let Some(target) = target {
            let start = self
                .zone_idx
                .map(|i| zones[i].name.as_str())
                .unwrap_or(self.home.name.as_str());
            self.path = graph.find(start, &target.name);
            self.path_i = 0;
            tracing::info!("{}: {} -> {}", self.name, goal, target.name);
        }
    }

    /// Advance the agent one simulation tick
    ///
    /// Order matters: decay, zone effect, health evaluation, movement, zone
    /// re-detection. Dead agents do nothing.
    pub fn tick(&mut self, zones: &[Zone], config: &SimConfig) {
        if !self.alive {
            return;
        }

        self.needs.decay(config.need_decay);
        self.apply_zone_effect(zones);
        self.update_health(config);
        self.advance_along_path(config);
        self.detect_zone(zones);

        if self.goal == Goal::Idle {
            self.wait += 1;
        }
    }

    fn apply_zone_effect(&mut self, zones: &[Zone]) {
        let Some(idx) = self.zone_idx else {
            return;
        };
        for &(kind, amount) in zones[idx].kind.effects() {
            self.needs.boost(kind, amount);
        }
    }

    fn update_health(&mut self, config: &SimConfig) {
        let critical = self.needs.count_below(config.critical_threshold);

        if critical > 0 {
            self.health -= config.health_drain_per_critical * critical as f32;
        } else {
            self.health = (self.health + config.health_regen).min(config.max_health);
        }

        if self.health <= 0.0 {
            self.alive = false;
            self.health = 0.0;
            let (worst, _) = self.needs.lowest();
            self.death_reason = Some(worst);
            self.path.clear();
            self.path_i = 0;
            tracing::warn!("{} died: {}", self.name, worst);
        }
    }

    fn advance_along_path(&mut self, config: &SimConfig) {
        let Some(&next) = self.path.get(self.path_i) else {
            return;
        };

        let delta = next - self.pos;
        let dist = delta.length();

        if dist < config.move_speed {
            self.pos = next;
            self.path_i += 1;
            if self.path_i >= self.path.len() {
                self.path.clear();
                self.path_i = 0;
                self.goal = Goal::Idle;
                self.wait = 0;
            }
        } else {
            self.pos = self.pos + delta.normalize() * config.move_speed;
        }
    }

    fn detect_zone(&mut self, zones: &[Zone]) {
        self.zone_idx = zones.iter().position(|z| z.contains(self.pos));
    }

    /// The zone the agent currently stands in
    pub fn zone<'a>(&self, zones: &'a [Zone]) -> Option<&'a Zone> {
        self.zone_idx.and_then(|i| zones.get(i))
    }

    /// One-line state snapshot for the decision oracle
    ///
    /// This is the only channel through which the oracle observes an agent.
    pub fn state_for_ai(&self, zones: &[Zone], config: &SimConfig) -> String {
        let (low_kind, low_value) = self.needs.lowest();

        let (status, fix) = if low_value < config.critical_threshold {
            ("DYING", low_kind.remedial_goal().as_str())
        } else if low_value < config.low_threshold {
            ("LOW", low_kind.remedial_goal().as_str())
        } else {
            ("OK", "any")
        };

        let needs_str = self
            .needs
            .iter()
            .map(|(kind, value)| format!("{}:{:.1}", kind, value))
            .collect::<Vec<_>>()
            .join(", ");

        let zone_now = self
            .zone(zones)
            .map(|z| z.kind.as_str())
            .unwrap_or("?");

        format!(
            "{}: hp={:.0}, zone={}, needs=[{}], worst={}:{:.1}, status={}, fix={}",
            self.id, self.health, zone_now, needs_str, low_kind, low_value, status, fix
        )
    }
}
