// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! typelayout-inspect - Print layout reports for a catalogue of types
//!
//! Shows size, plain-data eligibility and copy strategy as a serializer
//! would see them.

use clap::Parser;
use colored::*;
use std::time::{Duration, SystemTime};
use typelayout::{CopyStrategy, LayoutConfig, LayoutInspector, Reflect, TypeDescriptor, TypeLayout};

/// Print type layout reports
#[derive(Parser, Debug)]
#[command(name = "typelayout-inspect")]
#[command(version = "0.3.0")]
#[command(about = "Print size, plain-data eligibility and canonical names of known types")]
struct Args {
    /// Output format: pretty, json
    #[arg(short, long, default_value = "pretty")]
    format: OutputFormat,

    /// Largest accepted type size in bytes (defaults to TYPELAYOUT_MAX_TYPE_SIZE or i32::MAX)
    #[arg(long)]
    max_type_size: Option<usize>,

    /// Only show types whose canonical name contains this text
    #[arg(short = 't', long)]
    filter: Option<String>,

    /// Print statistics after the report
    #[arg(long)]
    stats: bool,
}

#[derive(Clone, Debug)]
enum OutputFormat {
    Pretty,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "p" => Ok(OutputFormat::Pretty),
            "json" | "j" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

#[allow(dead_code)] // Fields exist only for their layout
#[derive(Reflect)]
struct SensorSample {
    stamp: chrono::DateTime<chrono::Utc>,
    sensor: uuid::Uuid,
    readings: [f32; 6],
    status: u8,
}

#[allow(dead_code)]
#[derive(Reflect)]
struct LogRecord {
    level: u8,
    message: String,
}

fn catalogue() -> Vec<TypeDescriptor> {
    vec![
        TypeDescriptor::of::<bool>(),
        TypeDescriptor::of::<char>(),
        TypeDescriptor::of::<u8>(),
        TypeDescriptor::of::<i16>(),
        TypeDescriptor::of::<i32>(),
        TypeDescriptor::of::<u64>(),
        TypeDescriptor::of::<i128>(),
        TypeDescriptor::of::<f32>(),
        TypeDescriptor::of::<f64>(),
        TypeDescriptor::of::<usize>(),
        TypeDescriptor::of::<uuid::Uuid>(),
        TypeDescriptor::of::<Duration>(),
        TypeDescriptor::of::<SystemTime>(),
        TypeDescriptor::of::<chrono::DateTime<chrono::Utc>>(),
        TypeDescriptor::of::<chrono::DateTime<chrono::FixedOffset>>(),
        TypeDescriptor::of::<Option<i32>>(),
        TypeDescriptor::of::<[u8; 16]>(),
        TypeDescriptor::of::<(u32, f32)>(),
        TypeDescriptor::of::<String>(),
        TypeDescriptor::of::<Vec<u8>>(),
        TypeDescriptor::of::<Box<u64>>(),
        SensorSample::descriptor(),
        LogRecord::descriptor(),
    ]
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = LayoutConfig::default();
    if let Some(max) = args.max_type_size {
        config = config.with_max_type_size(max);
    }
    log::debug!("[inspect] config: {:?}", config);

    let inspector = LayoutInspector::with_config(config);

    let mut layouts = Vec::new();
    for ty in catalogue() {
        let layout = inspector.layout(ty)?;
        if let Some(ref filter) = args.filter {
            if !layout.name.contains(filter.as_str()) {
                continue;
            }
        }
        layouts.push(layout);
    }

    match args.format {
        OutputFormat::Pretty => print_pretty(&layouts),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&layouts)?),
    }

    if args.stats {
        let stats = inspector.stats();
        match args.format {
            OutputFormat::Pretty => {
                println!("{}", "--- Stats ---".dimmed());
                println!(
                    "  Primitive hits: {}  Cache hits: {}  Measurements: {}  Pins: {}  Cached: {}",
                    stats.primitive_hits,
                    stats.cache_hits,
                    stats.measurements,
                    stats.pin_probes,
                    stats.cached_types
                );
            }
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        }
    }

    Ok(())
}

fn print_pretty(layouts: &[TypeLayout]) {
    println!(
        "{:<28} {:>6}  {:<20} {}",
        "Type".cyan().bold(),
        "Bytes".cyan().bold(),
        "Eligibility".cyan().bold(),
        "Strategy".cyan().bold()
    );

    for layout in layouts {
        let strategy = match layout.strategy {
            CopyStrategy::RawBytes { size } => format!("raw copy ({} B)", size).green(),
            CopyStrategy::FieldWalk => "field walk".yellow(),
        };
        println!(
            "{:<28} {:>6}  {:<20} {}",
            layout.name,
            layout.size,
            format!("{:?}", layout.eligibility),
            strategy
        );
        log::trace!("[inspect] {} = {}", layout.name, layout.type_name);
    }

    println!();
    println!("{} {} type(s)", "Total:".white(), layouts.len());
}
