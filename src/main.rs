use std::path::PathBuf;
use std::process::exit;

use anyhow::Context;
use clap::Parser;
use log::{info, LevelFilter};
use zpipe::io::{open_input, open_output};
use zpipe::{compress, decompress, Algorithm, Discard, PumpConfig, Transfer, DEFAULT_LEVEL};

/// Compress or decompress a stream of bytes
#[derive(Parser)]
#[command(version, args_override_self = true)]
struct Config {
    /// Compress the input (default)
    #[arg(short, long, overrides_with_all = ["decompress", "test"])]
    compress: bool,

    /// Decompress the input
    #[arg(short, long, overrides_with_all = ["compress", "test"])]
    decompress: bool,

    /// Decompress the input and discard the result, only checking that it decodes
    #[arg(short, long, overrides_with_all = ["compress", "decompress"])]
    test: bool,

    /// Input file path; standard input if not given
    #[arg(short, long = "in")]
    input: Option<PathBuf>,

    /// Output file path; standard output if not given
    #[arg(short, long = "out", conflicts_with = "test")]
    output: Option<PathBuf>,

    /// Truncate an existing output file instead of overwriting it in place
    #[arg(long, conflicts_with = "test")]
    truncate: bool,

    /// Compression algorithm
    #[arg(long, short = 'a', default_value = "zstd")]
    algorithm: Algorithm,

    /// Compression level
    #[arg(long, short = 'l', default_value_t = DEFAULT_LEVEL, allow_hyphen_values = true)]
    level: i32,

    /// Input buffer size in bytes. Defaults to the size preferred by the codec.
    #[arg(long)]
    in_buffer: Option<usize>,

    /// Output buffer size in bytes. Defaults to the size preferred by the codec.
    #[arg(long)]
    out_buffer: Option<usize>,

    /// Log more; repeat for even more
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mode {
    Compress,
    Decompress,
    Test,
}

impl Config {
    fn mode(&self) -> Mode {
        if self.decompress {
            Mode::Decompress
        } else if self.test {
            Mode::Test
        } else {
            Mode::Compress
        }
    }

    fn pump_config(&self) -> PumpConfig {
        PumpConfig {
            input_capacity: self.in_buffer,
            output_capacity: self.out_buffer,
        }
    }
}

fn main() {
    let cfg = Config::parse();
    init_logging(cfg.verbose);
    if let Err(e) = run(cfg) {
        eprintln!("error: {:#}", e);
        exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cfg: Config) -> anyhow::Result<()> {
    let pump_cfg = cfg.pump_config();
    let input = open_input(cfg.input.as_deref())?;
    match cfg.mode() {
        Mode::Compress => {
            let output = open_output(cfg.output.as_deref(), cfg.truncate)?;
            let result = compress(input, output, cfg.algorithm, cfg.level, &pump_cfg)
                .context("compression failed")?;
            report(&result, result.input_throughput());
        }
        Mode::Decompress => {
            let output = open_output(cfg.output.as_deref(), cfg.truncate)?;
            let result = decompress(input, output, cfg.algorithm, &pump_cfg)
                .context("decompression failed")?;
            report(&result, result.output_throughput());
        }
        Mode::Test => {
            let mut sink = Discard::default();
            let result = decompress(input, &mut sink, cfg.algorithm, &pump_cfg)
                .context("integrity check failed")?;
            report(&result, result.output_throughput());
            info!("stream is intact, {} bytes decoded", sink.len());
        }
    }
    Ok(())
}

fn report(result: &Transfer, throughput: f64) {
    info!(
        "{}, {:.1} MB/s",
        result.format_compression(),
        throughput / 1_000_000.0
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_mode_flag_wins() {
        let cfg = Config::parse_from(["zpipe", "-d", "-c"]);
        assert_eq!(cfg.mode(), Mode::Compress);
        let cfg = Config::parse_from(["zpipe", "-c", "-d"]);
        assert_eq!(cfg.mode(), Mode::Decompress);
        let cfg = Config::parse_from(["zpipe", "-d", "-t"]);
        assert_eq!(cfg.mode(), Mode::Test);
    }

    #[test]
    fn defaults_to_compressing_stdin_to_stdout() {
        let cfg = Config::parse_from(["zpipe"]);
        assert_eq!(cfg.mode(), Mode::Compress);
        assert!(cfg.input.is_none());
        assert!(cfg.output.is_none());
        assert_eq!(cfg.level, 1);
        assert_eq!(cfg.algorithm, Algorithm::Zstd);
        assert!(!cfg.truncate);
    }

    #[test]
    fn negative_levels_are_accepted() {
        let cfg = Config::parse_from(["zpipe", "-l", "-5", "-i", "a", "-o", "b"]);
        assert_eq!(cfg.level, -5);
        assert_eq!(cfg.input, Some(PathBuf::from("a")));
        assert_eq!(cfg.output, Some(PathBuf::from("b")));
    }

    #[test]
    fn test_mode_takes_no_output() {
        assert!(Config::try_parse_from(["zpipe", "-t", "-o", "out"]).is_err());
        assert!(Config::try_parse_from(["zpipe", "-t", "--truncate"]).is_err());
        let cfg = Config::try_parse_from(["zpipe", "-t", "-d", "-o", "out"]).unwrap();
        assert_eq!(cfg.mode(), Mode::Decompress);
    }

    #[test]
    fn cli_is_well_formed() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
