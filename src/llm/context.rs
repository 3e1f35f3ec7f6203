//! Build decision prompts from world state
//!
//! The prompt is a fixed template: a rules preamble, the need-to-goal fix
//! table, one status line per living agent, and the reply shape. Dead agents
//! are excluded - the oracle only reasons about agents it can still steer.

use crate::world::World;

/// Snapshot of the world taken at dispatch time
///
/// Captured eagerly so the spawned request task carries no reference back
/// into world state.
pub struct DecisionContext {
    agent_ids: Vec<String>,
    agent_lines: Vec<String>,
    critical_threshold: f32,
    low_threshold: f32,
}

impl DecisionContext {
    /// Snapshot all living agents
    pub fn from_world(world: &World) -> Self {
        let living: Vec<_> = world.living().collect();
        Self {
            agent_ids: living.iter().map(|a| a.id.to_string()).collect(),
            agent_lines: living
                .iter()
                .map(|a| a.state_for_ai(&world.zones, &world.config))
                .collect(),
            critical_threshold: world.config.critical_threshold,
            low_threshold: world.config.low_threshold,
        }
    }

    pub fn agent_count(&self) -> usize {
        self.agent_ids.len()
    }

    /// Render the full prompt text
    pub fn render_prompt(&self) -> String {
        let reply_shape = self
            .agent_ids
            .iter()
            .map(|id| format!("{:?}:{{\"goal\":\"...\"}}", id))
            .collect::<Vec<_>>()
            .join(",");

        format!(
            r#"You control agents. Each has 4 needs: hunger, energy, social, work.
If ANY need drops below {crit:.1}, agent LOSES HEALTH and will DIE.

HOW TO FIX EACH NEED:
- hunger < {low:.1} -> go_cafe (cafe restores hunger)
- energy < {low:.1} -> go_home (home restores energy)
- social < {low:.1} -> go_park (park restores social)
- work < {low:.1} -> go_work (office restores work)

CRITICAL RULE: If status=DYING, agent MUST go to the zone shown in "fix=" field!

AGENTS NOW:
{agents}

AVAILABLE GOALS: idle, go_home, go_cafe, go_park, go_work

Reply ONLY JSON:
{{{reply_shape}}}"#,
            crit = self.critical_threshold,
            low = self.low_threshold,
            agents = self.agent_lines.join("\n"),
            reply_shape = reply_shape,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimConfig;

    #[test]
    fn test_prompt_lists_living_agents_only() {
        let mut world = World::new(SimConfig::default()).unwrap();
        if let Some(agent) = world.agent_mut("B") {
            agent.alive = false;
        }

        let context = DecisionContext::from_world(&world);
        assert_eq!(context.agent_count(), 2);

        let prompt = context.render_prompt();
        assert!(prompt.contains("A: hp="));
        assert!(prompt.contains("C: hp="));
        assert!(!prompt.contains("B: hp="));
    }

    #[test]
    fn test_prompt_embeds_thresholds_and_reply_shape() {
        let world = World::new(SimConfig::default()).unwrap();
        let prompt = DecisionContext::from_world(&world).render_prompt();

        assert!(prompt.contains("drops below 2.5"));
        assert!(prompt.contains("hunger < 4.0 -> go_cafe"));
        assert!(prompt.contains(r#"{"A":{"goal":"..."},"B":{"goal":"..."},"C":{"goal":"..."}}"#));
    }
}
