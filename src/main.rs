use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::io::Read;
use tracing::info;

use try_wp::config::Config;
use try_wp::wp::{project, translate, PrecomputedModel, ProjectionReport};
use try_wp::RawObservation;

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    config.validate()?;

    let raw = read_observation(&config.observation)?;
    let (observation, json_margin) = raw.into_parts()?;

    let base_margin = config.resolve_base_margin(json_margin)?;

    info!(
        "Q{} with {}s left, leader up {:+} before the try",
        observation.quarter, observation.seconds_remaining_in_game, base_margin
    );

    let states = project(&observation, base_margin)?;

    match config.offense_wp {
        None => emit(&ProjectionReport::new(&states), config.pretty),
        Some(offense_wp) => {
            let model = PrecomputedModel::new(offense_wp);
            let result = translate(&states, &model)?;
            info!(
                "Leader WP: fail {:.4}, xp_good {:.4}, 2pt_good {:.4}",
                result.fail, result.xp_good, result.two_pt_good
            );
            emit(&result, config.pretty)
        }
    }
}

fn read_observation(path: &str) -> Result<RawObservation> {
    let text = if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading observation from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading observation {}", path))?
    };
    serde_json::from_str(&text).context("observation is not a JSON object")
}

fn emit<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}
