//! Vivarium - Entry Point
//!
//! Sets up logging and the async runtime, builds the standard world, and
//! drives the fixed-cadence tick loop. The decision oracle is queried every
//! `think_interval` ticks and its completed rounds are folded back in
//! between ticks; the loop itself never waits on the network.

use vivarium::core::config::SimConfig;
use vivarium::core::error::{Result, SimError};
use vivarium::llm::client::CompletionClient;
use vivarium::llm::oracle::DecisionOracle;
use vivarium::world::World;

use std::time::Duration;
use tokio::runtime::Runtime;

/// Ticks between status summaries on the log
const STATUS_INTERVAL: u64 = 300;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("vivarium=info")
        .init();

    tracing::info!("Vivarium starting...");

    let config = SimConfig::default();
    config.validate().map_err(SimError::ConfigError)?;

    let rt = Runtime::new()?;
    rt.block_on(run(config))
}

async fn run(config: SimConfig) -> Result<()> {
    let mut world = World::new(config)?;

    let client = CompletionClient::from_env()?;
    tracing::info!("decision oracle at {}", client.url());
    let mut oracle = DecisionOracle::new(client);

    let mut ticker =
        tokio::time::interval(Duration::from_millis(world.config.tick_interval_ms));

    loop {
        ticker.tick().await;
        world.update();

        if world.tick_count % world.config.think_interval == 0 && oracle.decide(&world) {
            tracing::debug!("decision round dispatched at tick {}", world.tick_count);
        }
        oracle.poll(&mut world);

        if world.tick_count % STATUS_INTERVAL == 0 {
            display_status(&world, &oracle);
        }

        if world.living_count() == 0 {
            tracing::info!("all agents dead after {} ticks", world.tick_count);
            break;
        }
    }

    display_status(&world, &oracle);
    Ok(())
}

/// Print a brief status summary
fn display_status(world: &World, oracle: &DecisionOracle) {
    println!();
    println!(
        "--- Tick {} | Living: {}/{} | Oracle: {} ---",
        world.tick_count,
        world.living_count(),
        world.agents.len(),
        if oracle.is_busy() { "..." } else { "OK" }
    );

    for agent in &world.agents {
        if !agent.alive {
            let reason = agent
                .death_reason
                .map(|r| r.as_str())
                .unwrap_or("unknown");
            println!("  {} - DEAD ({})", agent.name, reason);
            continue;
        }

        let zone = agent
            .zone(&world.zones)
            .map(|z| z.name.as_str())
            .unwrap_or("-");
        let (worst, level) = agent.needs.lowest();
        println!(
            "  {} - HP {:.0}%, zone {}, goal {}, worst need {} ({:.1})",
            agent.name, agent.health, zone, agent.goal, worst, level
        );
    }

    let raw = oracle.last_response();
    if !raw.is_empty() {
        let preview: String = raw.chars().take(120).collect();
        println!("  LLM: {}", preview);
    }
    println!();
}
