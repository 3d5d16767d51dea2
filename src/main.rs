use std::{
    path::{Path, PathBuf},
    process::exit,
};

use clap::{arg, command, value_parser};
use log::{error, info, warn, LevelFilter};
use lut_visualizer::{
    html, png,
    raster::Canvas,
    report::{self, Stats, DEGENERATE_HINT},
    table::{LookupTable, TableFormat},
};

const DEFAULT_INPUT: &str = "res/ai_lut.bin";
const DEFAULT_PNG: &str = "ai_lut_visualization.png";
const DEFAULT_HTML: &str = "ai_lut_visualization.html";

fn main() {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .format_timestamp(None)
        .format_target(false)
        .init();
    let matches = command!()
        .subcommands([
            command!("png").alias("p").about("Render the lookup table as a PNG image").args([
                arg!([INPUT] "The binary lookup table file")
                    .value_parser(value_parser!(PathBuf))
                    .default_value(DEFAULT_INPUT),
                arg!([OUTPUT] "The image file to write")
                    .value_parser(value_parser!(PathBuf))
                    .default_value(DEFAULT_PNG),
                arg!(--packed "Decode the packed v3 layout (four 2-bit decisions per byte)"),
            ]),
            command!("html").alias("h").about("Render the lookup table as an interactive HTML page").args([
                arg!([INPUT] "The binary lookup table file")
                    .value_parser(value_parser!(PathBuf))
                    .default_value(DEFAULT_INPUT),
                arg!([OUTPUT] "The HTML file to write")
                    .value_parser(value_parser!(PathBuf))
                    .default_value(DEFAULT_HTML),
                arg!(--packed "Decode the packed v3 layout (four 2-bit decisions per byte)"),
            ]),
        ])
        .subcommand_required(true)
        .get_matches();
    let (name, args) = matches.subcommand().expect("subcommand is required");
    let input = args.get_one::<PathBuf>("INPUT").unwrap();
    let output = args.get_one::<PathBuf>("OUTPUT").unwrap();
    let format = if args.get_flag("packed") {
        TableFormat::PackedV3
    } else {
        TableFormat::Raw
    };

    let table = load_table(input, format);
    info!("Loaded {} AI decisions", table.len());
    let canvas = Canvas::render(&table);
    let stats = Stats::collect(&table);
    info!(
        "Rendering {side}x{side} visualization",
        side = canvas.side()
    );

    let result = match name {
        "png" => png::write_png(&canvas, output),
        "html" => std::fs::write(output, html::render_document(&table, &canvas, &stats))
            .map_err(Into::into),
        _ => unreachable!(),
    };
    if let Err(err) = result {
        error!("Could not write {}: {err}", output.display());
        exit(1);
    }
    info!("Saved {}", output.display());

    println!("{}", report::summary(&stats, canvas.side()));
    if stats.is_degenerate() {
        warn!("{DEGENERATE_HINT}");
    }
}

/// Reads and validates the table file. Every failure here is fatal and
/// happens before any output path is touched.
fn load_table(path: &Path, format: TableFormat) -> LookupTable {
    if !path.exists() || !path.is_file() {
        error!("Lookup table not found at {}", path.display());
        error!("Run the table generator first to produce it");
        exit(1);
    }
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            error!("Could not read {}: {err}", path.display());
            exit(1);
        }
    };
    match LookupTable::from_bytes(format, &bytes) {
        Ok(table) => table,
        Err(err) => {
            // Carries expected vs. actual byte counts.
            error!("{err}");
            exit(1);
        }
    }
}
