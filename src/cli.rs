// File: ./src/cli.rs
//! Command-line handling for the engine binary.
use anyhow::{Result, bail};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    pub root: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub verbose: bool,
    pub help: bool,
}

impl CliArgs {
    /// Parses arguments, excluding the program name.
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parsed = CliArgs::default();
        let mut iter = args.into_iter().map(Into::into);

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-h" | "--help" | "help" => parsed.help = true,
                "-v" | "--verbose" => parsed.verbose = true,
                "-r" | "--root" => match iter.next() {
                    Some(path) => parsed.root = Some(PathBuf::from(path)),
                    None => bail!("--root requires a path"),
                },
                "-c" | "--config" => match iter.next() {
                    Some(path) => parsed.config = Some(PathBuf::from(path)),
                    None => bail!("--config requires a path"),
                },
                other => bail!("Unknown argument: {}", other),
            }
        }
        Ok(parsed)
    }
}

pub fn print_help(binary_name: &str) {
    println!(
        "Calengine v{} - Calendar event processing engine",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>] [--config <file>] [--verbose]", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and logs.");
    println!("    -c, --config <file>   Read configuration from this TOML file.");
    println!("    -v, --verbose         Log at debug level.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("PROTOCOL:");
    println!("    One JSON request per stdin line, one JSON message per stdout line.");
    println!("    {{\"id\": \"1\", \"type\": \"SEARCH_EVENTS\", \"payload\": {{...}}}}");
    println!();
    println!("REQUEST TYPES:");
    println!("    PROCESS_EVENTS        Normalize, sort and deduplicate events");
    println!("    CALCULATE_OVERLAPS    Pairwise overlaps inside a date range");
    println!("    GENERATE_RECURRING    Expand a recurring event over a date range");
    println!("    SEARCH_EVENTS         Substring search over event fields");
    println!("    OPTIMIZE_LAYOUT       Column layout for concurrent events");
}
