use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use faktura_core::{LocationTable, Locale, Markers};
use faktura_ingest::{StatementParser, DEFAULT_SPLIT_WIDTH};
use faktura_report::{export_csv, export_json, write_report};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod state;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("FAKTURA_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(name = "faktura", version = VERSION, about = "AMEX invoice text parser")]
struct Cli {
    /// Only log warnings and errors (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse invoice text (pdftotext -layout output) and print a per-card report
    Parse {
        /// Extracted invoice text
        input: PathBuf,

        /// CSV filename to write to
        #[arg(short, long)]
        outfile: Option<PathBuf>,

        /// File to populate the location table from
        #[arg(short, long)]
        location_file: Option<PathBuf>,

        /// Line split width between the two page columns (default: 80)
        #[arg(short, long)]
        split_width: Option<usize>,

        /// Marker language preset, overrides [markers] from the config file
        #[arg(long, value_enum)]
        locale: Option<LocaleArg>,

        /// Also dump the parsed statement as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Write a default ~/.faktura/config.toml
    InitConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LocaleArg {
    Sv,
    En,
}

impl From<LocaleArg> for Locale {
    fn from(arg: LocaleArg) -> Self {
        match arg {
            LocaleArg::Sv => Locale::Sv,
            LocaleArg::En => Locale::En,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    match cli.command {
        Command::Parse {
            input,
            outfile,
            location_file,
            split_width,
            locale,
            json,
        } => {
            let cfg = config::load_config()?;
            let split_width = split_width.unwrap_or(cfg.parse.split_width);
            let markers = match locale {
                Some(l) => Markers::for_locale(l.into()),
                None => cfg.markers,
            };

            // Validate options before touching any input
            let parser = StatementParser::new(split_width, markers).context("invalid options")?;
            info!(
                "using {}line split width of {split_width}",
                if split_width == DEFAULT_SPLIT_WIDTH { "default " } else { "" }
            );

            let locations = load_locations(location_file.as_deref(), cfg.parse.location_file.as_deref())?;

            let text = fs::read_to_string(&input)
                .with_context(|| format!("read {}", input.display()))?;
            let doc = parser
                .parse(&text, &locations)
                .with_context(|| format!("could not parse input file {}", input.display()))?;

            write_report(&doc, &mut io::stdout().lock())?;

            let s = doc.stats;
            info!(
                "{} line(s): {} transaction(s), {} marker(s), {} location line(s), {} skipped",
                s.total_lines, s.transaction_count, s.marker_lines, s.claimed_lines, s.skipped_lines
            );
            if s.orphaned_transactions > 0 {
                warn!("{} transaction line(s) outside a card session were dropped", s.orphaned_transactions);
            }

            if let Some(out) = outfile {
                export_csv(&doc, &out).context("could not dump to CSV")?;
            }
            if let Some(out) = json {
                export_json(&doc, &out).context("could not dump to JSON")?;
            }
        }

        Command::InitConfig => config::init_config()?,
    }

    Ok(())
}

fn init_tracing(quiet: bool) {
    let directives = log_directives(quiet, std::env::var(EnvFilter::DEFAULT_ENV).ok());
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// `--quiet` beats `RUST_LOG`, which beats the `info` default.
fn log_directives(quiet: bool, env: Option<String>) -> String {
    match env {
        _ if quiet => "warn".to_string(),
        Some(env) if !env.trim().is_empty() => env,
        _ => "info".to_string(),
    }
}

/// An explicit `--location-file` must exist; the one from the config file is
/// optional.
fn load_locations(explicit: Option<&Path>, configured: Option<&Path>) -> Result<LocationTable> {
    let path = match (explicit, configured) {
        (Some(p), _) => p,
        (None, Some(p)) if p.exists() => p,
        (None, Some(p)) => {
            warn!("location file {} not found, continuing without locations", p.display());
            return Ok(LocationTable::new());
        }
        (None, None) => return Ok(LocationTable::new()),
    };

    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let table = LocationTable::parse(&text)
        .with_context(|| format!("could not parse location file {}", path.display()))?;
    info!("added {} location entries from '{}'", table.len(), path.display());
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "faktura", "parse", "-o", "out.csv", "-l", "loc.txt", "-s", "96", "--locale", "en", "in.txt",
        ])
        .unwrap();

        match cli.command {
            Command::Parse {
                input,
                outfile,
                location_file,
                split_width,
                locale,
                json,
            } => {
                assert_eq!(input, PathBuf::from("in.txt"));
                assert_eq!(outfile, Some(PathBuf::from("out.csv")));
                assert_eq!(location_file, Some(PathBuf::from("loc.txt")));
                assert_eq!(split_width, Some(96));
                assert_eq!(locale, Some(LocaleArg::En));
                assert_eq!(json, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_quiet_overrides_rust_log() {
        assert_eq!(log_directives(true, Some("debug".into())), "warn");
        assert_eq!(log_directives(true, None), "warn");
        assert_eq!(log_directives(false, Some("faktura_ingest=debug".into())), "faktura_ingest=debug");
        assert_eq!(log_directives(false, Some("  ".into())), "info");
        assert_eq!(log_directives(false, None), "info");

        let cli = Cli::try_parse_from(["faktura", "init-config", "-q"]).unwrap();
        assert!(cli.quiet);
    }

    #[test]
    fn test_input_is_required() {
        assert!(Cli::try_parse_from(["faktura", "parse"]).is_err());
        assert!(Cli::try_parse_from(["faktura", "parse", "-s", "wide", "in.txt"]).is_err());
    }

    #[test]
    fn test_explicit_location_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        assert!(load_locations(Some(&missing), None).is_err());
        assert!(load_locations(None, Some(&missing)).unwrap().is_empty());
        assert!(load_locations(None, None).unwrap().is_empty());
    }

    #[test]
    fn test_location_file_errors_carry_path() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("locations.txt");
        fs::write(&p, "SOLNA\nNEW YORK\n").unwrap();

        let err = load_locations(Some(&p), None).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("could not parse location file"), "{msg}");
        assert!(msg.contains("L2: invalid location `NEW YORK`"), "{msg}");

        fs::write(&p, "SOLNA\nSTHLM->STOCKHOLM\n").unwrap();
        let table = load_locations(None, Some(&p)).unwrap();
        assert_eq!(table.resolve("STHLM"), Some("STOCKHOLM"));
    }
}
