use clap::{Parser, Subcommand};

mod commands;
mod output;
mod tty;

use commands::{config, replace, segment};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "markswap")]
#[command(version = VERSION)]
#[command(about = "Search and replace in document titles and markup bodies without touching tags")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace text in a document's title and body
    Replace(replace::ReplaceArgs),
    /// Show how markup splits into tag and text segments
    Segment(segment::SegmentArgs),
    /// Manage markswap.json defaults
    Config(config::ConfigArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let (json_result, mut exit_code) = commands::run_json(cli.command);
    if let Err(err) = output::print_result(json_result) {
        eprintln!("markswap: {}: {}", err.message, err.details);
        exit_code = exit_code.max(1);
    }

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
