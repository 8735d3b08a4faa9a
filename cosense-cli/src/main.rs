// Command-line interface for cosense
//
// This binary converts Scrapbox/Cosense pages (plain .txt exports) to
// Markdown using the cosense-babel converter registry.
//
// Configuration is layered: embedded defaults, then an optional config file
// (--config), then the --tag-handling flag as a final override.
//
// Usage:
//  cosense <input.txt> [--output <file>]     - Convert a page to Markdown
//  cosense <input.txt> --json                - Emit {title, markdown} as JSON
//  cosense --list-converters                 - List registered converters

use clap::{Arg, ArgAction, Command, ValueHint};
use cosense_babel::{register_converters, ConverterRegistry, StreamInfo, TagHandling};
use cosense_config::{CosenseConfig, Loader};
use std::fs;
use std::path::Path;

fn build_cli() -> Command {
    Command::new("cosense")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Scrapbox/Cosense notation to Markdown")
        .long_about(
            "cosense converts pages written in Scrapbox/Cosense wiki notation\n\
            into standard Markdown.\n\n\
            Examples:\n  \
            cosense page.txt                        # Convert to Markdown on stdout\n  \
            cosense page.txt -o page.md             # Convert to a file\n  \
            cosense page.txt --tag-handling hashtag # Rewrite [tag] as #tag\n  \
            cosense page.txt --json                 # Emit the result as JSON",
        )
        .arg_required_else_help(true)
        .arg(
            Arg::new("input")
                .help("Input file (.txt)")
                .value_hint(ValueHint::FilePath)
                .required_unless_present("list-converters"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Write Markdown to a file instead of stdout")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a cosense.toml configuration file")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("tag-handling")
                .long("tag-handling")
                .value_name("MODE")
                .help("How to rewrite [tag] notation: keep, hashtag, link, comment, code, remove"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Emit the conversion result as JSON")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-converters")
                .long("list-converters")
                .help("List registered converters")
                .action(ArgAction::SetTrue),
        )
}

fn load_config(matches: &clap::ArgMatches) -> Result<CosenseConfig, String> {
    let mut loader = Loader::new();

    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }

    if let Some(mode) = matches.get_one::<String>("tag-handling") {
        loader = loader
            .set_override("convert.tag_handling", mode.as_str())
            .map_err(|e| format!("Failed to apply --tag-handling: {e}"))?;
    }

    loader
        .build()
        .map_err(|e| format!("Failed to load configuration: {e}"))
}

fn build_registry(config: &CosenseConfig) -> Result<ConverterRegistry, String> {
    let mode: TagHandling = config.convert.tag_handling.into();
    let mut registry = ConverterRegistry::new();
    register_converters(&mut registry, mode.as_str())
        .map_err(|e| format!("Failed to register converters: {e}"))?;
    Ok(registry)
}

/// Declared extension for StreamInfo, with the leading dot (e.g., ".txt").
fn declared_extension(input: &str) -> Option<String> {
    Path::new(input)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
}

fn run(matches: &clap::ArgMatches) -> Result<(), String> {
    let config = load_config(matches)?;
    let registry = build_registry(&config)?;

    if matches.get_flag("list-converters") {
        for name in registry.list_converters() {
            println!("{name}");
        }
        return Ok(());
    }

    // required_unless_present guarantees input is set past this point
    let input = matches
        .get_one::<String>("input")
        .ok_or("No input file given")?;

    let mut stream =
        fs::File::open(input).map_err(|e| format!("Failed to open '{input}': {e}"))?;
    let info = StreamInfo {
        extension: declared_extension(input),
        charset: None,
    };

    let result = registry
        .convert(&mut stream, &info)
        .map_err(|e| e.to_string())?;

    let rendered = if matches.get_flag("json") {
        serde_json::to_string_pretty(&result)
            .map_err(|e| format!("Failed to serialize result: {e}"))?
    } else {
        result.markdown
    };

    match matches.get_one::<String>("output") {
        Some(path) => fs::write(path, rendered)
            .map_err(|e| format!("Failed to write '{path}': {e}"))?,
        None => println!("{rendered}"),
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let matches = build_cli().get_matches();
    if let Err(message) = run(&matches) {
        eprintln!("Error: {message}");
        std::process::exit(1);
    }
}
