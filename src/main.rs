use std::process::ExitCode;
use std::time::Instant;

use chess_movegen::{Position, perft, perft_divide};
use log::{LevelFilter, Log, Metadata, Record};

const USAGE: &str = "Usage: perft [--divide] <depth> [FEN]";

/// Writes log records to stderr, filtered by the level from `CHESS_LOG`.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging() {
    let level = std::env::var("CHESS_LOG")
        .ok()
        .and_then(|value| value.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Warn);

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

struct Args {
    depth: u32,
    fen: Option<String>,
    divide: bool,
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut divide = false;
    let mut positional = Vec::new();
    for arg in args {
        if arg == "--divide" {
            divide = true;
        } else {
            positional.push(arg);
        }
    }

    let mut positional = positional.into_iter();
    let depth = positional
        .next()
        .ok_or_else(|| USAGE.to_string())?;
    let depth = depth
        .parse()
        .map_err(|_| format!("invalid depth '{depth}'\n{USAGE}"))?;

    // FEN fields arrive as separate arguments unless quoted.
    let rest: Vec<String> = positional.collect();
    let fen = (!rest.is_empty()).then(|| rest.join(" "));

    Ok(Args { depth, fen, divide })
}

fn main() -> ExitCode {
    init_logging();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    let position = match args.fen.as_deref() {
        None => Position::starting(),
        Some(fen) => match fen.parse::<Position>() {
            Ok(position) => position,
            Err(e) => {
                eprintln!("Invalid FEN: {e}");
                return ExitCode::FAILURE;
            }
        },
    };
    log::info!("perft {} on {position}", args.depth);

    let started = Instant::now();
    let nodes = if args.divide {
        let divided = perft_divide(&position, args.depth);
        for (mv, count) in &divided {
            println!("{mv}: {count}");
        }
        println!();
        divided.iter().map(|(_, count)| count).sum::<u64>()
    } else {
        perft(&position, args.depth)
    };

    println!("Nodes searched: {nodes}");
    log::info!("finished in {:.3}s", started.elapsed().as_secs_f64());
    ExitCode::SUCCESS
}
