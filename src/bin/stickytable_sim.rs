//! CLI tool for stickytable - replays a scroll scenario and outputs JSON
//!
//! Usage:
//!   stickytable_sim <scenario.json>              # Output JSON to stdout
//!   stickytable_sim <scenario.json> -o out.json  # Output JSON to file
//!   stickytable_sim -v <scenario.json>           # Log decisions to stderr

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use stickytable::Scenario;

fn main() {
    let mut args: Vec<String> = env::args().collect();

    let verbose = args.iter().any(|a| a == "-v");
    args.retain(|a| a != "-v");
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    if args.len() < 2 {
        eprintln!("Usage: stickytable_sim [-v] <scenario.json> [-o output.json]");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let output_path = if args.len() > 3 && args[2] == "-o" {
        Some(&args[3])
    } else {
        None
    };

    // Read input file
    let data = match fs::read_to_string(input_path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    // Parse scenario
    let scenario = match Scenario::from_json(&data) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error parsing scenario: {}", e);
            std::process::exit(1);
        }
    };

    let frames = scenario.run();
    for frame in &frames {
        log::debug!(
            "scroll_top={} header={:?} footer={:?}",
            frame.scroll_top,
            frame.header,
            frame.footer
        );
    }

    // Serialize to JSON
    let json = match serde_json::to_string_pretty(&frames) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}
