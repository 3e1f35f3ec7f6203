//! Decision oracle: asynchronous goal assignment for the whole population
//!
//! Two states: IDLE (no request in flight) and BUSY. The world tick loop
//! calls `decide` at a fixed interval and `poll` every tick; the actual HTTP
//! request runs as a spawned task and hands its result back over a channel,
//! so a slow or dead oracle never stalls the simulation clock. All agent
//! mutation stays on the tick path.

use crate::agent::goal::Goal;
use crate::llm::client::CompletionClient;
use crate::llm::context::DecisionContext;
use crate::llm::parser::{parse_directives, GoalDirective};
use crate::world::World;
use tokio::sync::mpsc;

/// Result of one decision round, delivered back to the tick loop
///
/// The request task always sends exactly one outcome - error text stands in
/// for the raw response on failure - which is what guarantees the oracle
/// returns to IDLE after every round.
#[derive(Debug)]
pub struct DecisionOutcome {
    pub raw: String,
    pub directives: Vec<GoalDirective>,
}

/// The oracle state machine
pub struct DecisionOracle {
    client: CompletionClient,
    outcome_tx: mpsc::UnboundedSender<DecisionOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<DecisionOutcome>,
    busy: bool,
    last_response: String,
}

impl DecisionOracle {
    pub fn new(client: CompletionClient) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            client,
            outcome_tx,
            outcome_rx,
            busy: false,
            last_response: String::new(),
        }
    }

    /// Whether a decision request is currently in flight
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Raw text of the last completed round, for diagnostic display
    pub fn last_response(&self) -> &str {
        &self.last_response
    }

    /// Start a decision round
    ///
    /// Returns whether a request was dispatched: a call while BUSY is
    /// skipped, which caps outstanding requests at one. There is no
    /// mid-flight cancellation.
    pub fn decide(&mut self, world: &World) -> bool {
        if self.busy {
            return false;
        }

        let context = DecisionContext::from_world(world);
        if context.agent_count() == 0 {
            return false;
        }
        self.busy = true;

        let prompt = context.render_prompt();
        let client = self.client.clone();
        let tx = self.outcome_tx.clone();

        tokio::spawn(async move {
            let outcome = match client.complete(&prompt).await {
                Ok(raw) => match parse_directives(&raw) {
                    Ok(directives) => DecisionOutcome { raw, directives },
                    Err(e) => {
                        tracing::error!("oracle response discarded: {}", e);
                        DecisionOutcome {
                            raw,
                            directives: Vec::new(),
                        }
                    }
                },
                Err(e) => {
                    tracing::error!("oracle request failed: {}", e);
                    DecisionOutcome {
                        raw: e.to_string(),
                        directives: Vec::new(),
                    }
                }
            };
            // Send only fails when the oracle itself is gone.
            let _ = tx.send(outcome);
        });

        true
    }

    /// Apply any completed round to the world
    ///
    /// Called every tick from the loop that owns world mutation; does
    /// nothing while the request is still in flight.
    pub fn poll(&mut self, world: &mut World) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.busy = false;
            apply_directives(world, &outcome.directives);
            self.last_response = outcome.raw;
        }
    }
}

/// Apply parsed directives to the world, one entry at a time
///
/// Semantic errors are per-entry skips: unknown agent ids, dead agents,
/// and unresolvable target zones drop that entry without touching the
/// rest. `go_home` resolves to the agent's own home zone; every other goal
/// resolves to the first zone of its mapped type.
pub fn apply_directives(world: &mut World, directives: &[GoalDirective]) {
    for directive in directives {
        let target = {
            let Some(agent) = world.agent(&directive.agent_id) else {
                continue;
            };
            if !agent.alive {
                continue;
            }
            if directive.goal == Goal::GoHome {
                Some(agent.home.clone())
            } else {
                directive
                    .goal
                    .zone_type()
                    .and_then(|kind| world.zone_by_type(kind))
                    .cloned()
            }
        };
        let Some(target) = target else {
            continue;
        };

        let World {
            zones,
            graph,
            agents,
            ..
        } = &mut *world;
        if let Some(agent) = agents
            .iter_mut()
            .find(|a| a.id.as_str() == directive.agent_id)
        {
            agent.assign(directive.goal, Some(&target), graph, zones);
            agent.thought = directive.goal.as_str().into();
        }
    }
}
