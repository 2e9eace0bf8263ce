//! Offline visibility report for the built-in fixtures
//!
//! Runs the occlusion engine on each requested fixture and prints the
//! character grid followed by a CSV dump, or a JSON summary with `--json`.

use env_logger::Env;
use log::{debug, error};
use std::env;
use std::process;
use visioncone::report::{ascii_grid, csv_grid, Fixture, Report};

fn usage(program: &str) {
    eprintln!("Usage: {} [case1|case2|all] [--json]", program);
    eprintln!("Prints the visibility map of a fixture (default: all)");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("cone_report");

    let mut json = false;
    let mut selection = "all";
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            "-h" | "--help" => {
                usage(program);
                return Ok(());
            }
            other => selection = other,
        }
    }

    let fixtures: Vec<Fixture> = if selection == "all" {
        Fixture::NAMES.iter().filter_map(|name| Fixture::by_name(name)).collect()
    } else {
        match Fixture::by_name(selection) {
            Some(fixture) => vec![fixture],
            None => {
                error!("Unknown fixture '{}'", selection);
                usage(program);
                process::exit(1);
            }
        }
    };

    let mut reports = Vec::new();
    for fixture in &fixtures {
        let vis = fixture.compute();
        debug!(
            "{}: {} visible, {} shadow segments",
            fixture.name,
            vis.visible_count(),
            vis.shadows().len()
        );

        if json {
            reports.push(Report::new(fixture.name, &fixture.grid, &fixture.cone, &vis, fixture.cell_size));
            continue;
        }

        println!("=== {} ===", fixture.name);
        println!("Visible tiles: {}\n", vis.visible_count());
        print!("{}", ascii_grid(&fixture.grid, &fixture.cone, &vis, fixture.cell_size));
        println!();
        print!("{}", csv_grid(&fixture.grid, &fixture.cone, &vis, fixture.cell_size));
        println!();
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    Ok(())
}
