//! Aurora Outpost - Entry Point
//!
//! Founds a settlement from a plan, attaches a late-arriving building
//! through the perimeter scan, and walks a route between two interior
//! positions to show what the path finder produces.

use aurora_outpost::connection::{found_settlement, ConnectorGraph, GraphBuilder};
use aurora_outpost::core::error::Result;
use aurora_outpost::routing::{BuildingLocation, InteriorPath, PathFinder, Waypoint};
use aurora_outpost::settlement::{BuildingKind, BuildingTemplate, Settlement, SettlementPlan};

use clap::Parser;
use glam::DVec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;

/// Demo driver for settlement founding and interior routing
#[derive(Parser, Debug)]
#[command(name = "aurora-outpost")]
#[command(about = "Found a settlement plan and route between its buildings")]
struct Args {
    /// Settlement plan JSON; the built-in demo plan is used when omitted
    #[arg(long)]
    plan: Option<PathBuf>,

    /// Random seed for the interior positions
    #[arg(long, default_value_t = 7)]
    seed: u64,
}

const DEMO_PLAN: &str = r#"{
    "name": "Aurora Base",
    "buildings": [
        {
            "id": "hab_one", "name": "Habitat One", "kind": "habitat",
            "width": 9.0, "length": 9.0, "position": [0.0, 0.0],
            "connections": [
                { "target": "corridor_north", "anchor": { "face": "north" } },
                { "target": "greenhouse", "anchor": { "offset": [-4.5, 0.0] } }
            ]
        },
        {
            "id": "corridor_north", "name": "North Corridor", "kind": "corridor",
            "width": 2.0, "length": 6.0, "position": [0.0, 7.5],
            "connections": [
                { "target": "hab_one", "anchor": { "face": "south" } },
                { "target": "hab_two", "anchor": { "face": "north" } }
            ]
        },
        {
            "id": "hab_two", "name": "Habitat Two", "kind": "habitat",
            "width": 9.0, "length": 9.0, "position": [0.0, 15.0],
            "connections": [
                { "target": "corridor_north", "anchor": { "face": "south" } }
            ]
        },
        {
            "id": "greenhouse", "name": "Greenhouse", "kind": "greenhouse",
            "width": 6.0, "length": 9.0, "position": [-10.5, 0.0],
            "connections": [
                { "target": "hab_one", "anchor": { "offset": [3.0, 0.0] } }
            ]
        },
        {
            "id": "depot", "name": "Cold Storage", "kind": "depot",
            "width": 6.0, "length": 6.0, "position": [12.0, 0.0]
        }
    ]
}"#;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("aurora_outpost=debug")
        .init();

    let args = Args::parse();

    let plan = match &args.plan {
        Some(path) => SettlementPlan::from_json(&std::fs::read_to_string(path)?)?,
        None => SettlementPlan::from_json(DEMO_PLAN)?,
    };

    let (mut settlement, mut graph) = found_settlement(&plan)?;

    println!("\n=== AURORA OUTPOST ===");
    println!("Settlement '{}' founded.", settlement.name);
    println!();
    println!("Buildings:");
    for building in settlement.iter() {
        println!(
            "  [{}] {} ({:?}) at {}",
            building.id.0, building.name, building.kind, building.footprint.position
        );
    }
    println!();
    println!("Connectors after founding:");
    print_connectors(&settlement, &graph);

    // The demo plan gets a workshop delivered after founding; the scan has
    // to find its neighbors on its own.
    if args.plan.is_none() {
        let workshop = BuildingTemplate {
            id: "workshop".to_string(),
            name: "Workshop".to_string(),
            kind: BuildingKind::Workshop,
            width: 7.0,
            length: 7.0,
            position: DVec2::new(8.3, 15.0),
            facing: 0.0,
            connections: Vec::new(),
        };
        let workshop_id = settlement.add_building(&workshop)?;
        let attached = GraphBuilder::new(&settlement).attach(&mut graph, workshop_id)?;
        println!();
        println!("Workshop delivered; scan attached it: {attached}");
        print_connectors(&settlement, &graph);
    }

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let (Some(first), Some(last)) =
        (settlement.pressurized().next(), settlement.pressurized().last())
    else {
        println!("Nothing pressurized to route between.");
        return Ok(());
    };
    let origin =
        BuildingLocation::new(first.id, first.footprint.random_interior_position(&mut rng));
    let goal = BuildingLocation::new(last.id, last.footprint.random_interior_position(&mut rng));

    let finder = PathFinder::new(&settlement, &graph);
    match finder.shortest_path(origin, goal)? {
        Some(path) => {
            println!();
            println!(
                "Route from '{}' to '{}' ({:.1} m):",
                first.name,
                last.name,
                path.total_length()
            );
            for waypoint in path.waypoints() {
                match waypoint {
                    Waypoint::Inside(location) => {
                        println!("  inside [{}] at {}", location.building.0, location.position);
                    }
                    Waypoint::Hatch { hatch, .. } => {
                        println!("  hatch  [{}] at {}", hatch.building.0, hatch.position);
                    }
                    Waypoint::ConnectorCenter { connector, position } => {
                        println!("  joint  [{}] at {}", connector.0, position);
                    }
                }
            }
            walk(path);
        }
        None => println!("No interior route from '{}' to '{}'.", first.name, last.name),
    }

    if let Some(depot) = settlement.iter().find(|b| !b.kind.is_pressurized()) {
        println!();
        println!(
            "Depot '{}' reachable on foot: {}",
            depot.name,
            finder.has_valid_path(first.id, depot.id)
        );
    }

    Ok(())
}

/// Print every live connector with its crossing position.
fn print_connectors(settlement: &Settlement, graph: &ConnectorGraph) {
    for (id, connector) in graph.iter() {
        let [a, b] = connector.buildings();
        let names = |id| {
            settlement
                .get(id)
                .map(|building| building.name.clone())
                .unwrap_or_else(|| format!("{id:?}"))
        };
        let kind = if connector.is_split() { "split" } else { "flush" };
        println!(
            "  [{}] {} <-> {} ({kind} at {})",
            id.0,
            names(a),
            names(b),
            connector.position()
        );
    }
}

/// Step the cursor through the path, leg by leg.
fn walk(mut path: InteriorPath) {
    println!();
    println!("Walking:");
    let mut leg = 1;
    while let Some(stop) = path.next_stop().copied() {
        println!("  leg {:>2}: heading for {}", leg, stop.position());
        if path.at_end() {
            break;
        }
        path.advance();
        leg += 1;
    }
    println!("Arrived.");
}
