use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use xmap::config::Config;
use xmap::models::character::{BagItem, CharacterSnapshot};
use xmap::models::types::{ItemTemplateId, MapId, Planet};
use xmap::Registry;

// cargo run --bin route-plan -- --from 21 --to 159 --power 60000000000 --item 193

#[derive(Debug, Parser)]
#[command(name = "route-plan", version, about = "Plan a route between two maps without connecting")]
struct Args {
    /// Map the character stands on
    #[arg(long)]
    from: MapId,

    /// Destination map
    #[arg(long)]
    to: MapId,

    /// Home planet (earth, namek, saiyan)
    #[arg(long, default_value = "earth")]
    planet: Planet,

    #[arg(long, default_value_t = 0)]
    power: u64,

    /// Main quest index
    #[arg(long, default_value_t = 0)]
    quest: u32,

    /// Clan id, if the character is in one
    #[arg(long)]
    clan: Option<i32>,

    /// Item template in the bag; repeat for more items (193 is the capsule)
    #[arg(long = "item")]
    items: Vec<i32>,

    /// TOML config file (if omitted, use env)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the route as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct HopView {
    from: MapId,
    to: MapId,
    kind: String,
}

#[derive(Debug, Serialize)]
struct RouteView {
    from: MapId,
    to: MapId,
    path: Vec<MapId>,
    cost: Option<u32>,
    hops: Vec<HopView>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let cfg = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::from_env()?,
    };
    let registry = Registry::new(Arc::new(cfg)).context("loading world data")?;

    let snapshot = CharacterSnapshot {
        planet: args.planet,
        power: args.power,
        quest_index: args.quest,
        clan_id: args.clan,
        bag: args
            .items
            .iter()
            .enumerate()
            .map(|(i, t)| BagItem {
                index: u8::try_from(i).unwrap_or(u8::MAX),
                template: ItemTemplateId(*t),
                quantity: 1,
            })
            .collect(),
    };

    let Some(path) = registry.planner.plan_route(args.from, args.to, &snapshot) else {
        match registry.access.denial(args.to, &snapshot) {
            Some(gate) => anyhow::bail!("map {} is closed: {gate}", args.to),
            None => anyhow::bail!("no route from map {} to map {}", args.from, args.to),
        }
    };

    let mut hops = Vec::with_capacity(path.len().saturating_sub(1));
    let mut last_capsule = None;
    for pair in path.windows(2) {
        let hop = registry
            .planner
            .resolve_hop(pair[0], pair[1], &snapshot, last_capsule)
            .with_context(|| format!("resolving hop {} -> {}", pair[0], pair[1]))?;
        if hop.kind() == xmap::models::edge::EdgeKind::ConsumableItem {
            last_capsule = Some(hop.to);
        }
        hops.push(HopView {
            from: pair[0],
            to: pair[1],
            kind: hop.kind().to_string(),
        });
    }

    let view = RouteView {
        from: args.from,
        to: args.to,
        cost: registry.planner.path_cost(&path, &snapshot),
        path,
        hops,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("Route {} -> {} ({} hops)", view.from, view.to, view.hops.len());
    for hop in &view.hops {
        println!("  {:>4} -> {:<4} {}", hop.from, hop.to, hop.kind);
    }
    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, prelude::*};

    // a second install only fails when something already installed a hook
    let _ = color_eyre::install();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_timer(tracing_subscriber::fmt::time::uptime()),
        )
        .with(tracing_error::ErrorLayer::default())
        .init();
}
