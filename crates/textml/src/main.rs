//! textml CLI - markup converter.
//!
//! Reads markup from standard input, converts it with the selected
//! generator and writes the result to standard output. A conversion
//! failure prints a message with the input line and exits with the
//! error's numeric code.

mod output;

use std::io::{Read as _, Write as _};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use output::Output;
use textml_core::{ErrorKind, GeneratorKind, Result, convert};

/// Converts line-oriented markup into HTML or TeX.
#[derive(Parser)]
#[command(name = "textml", version, about)]
struct Cli {
    /// Output format: "html" or "tex".
    #[arg(short, long)]
    generator: String,

    /// Log conversion progress to stderr.
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = run(&cli) {
        let location = err
            .line()
            .map(|line| format!(" at line {line}"))
            .unwrap_or_default();
        output.error(&format!("Error: {err}{location}."));
        std::process::exit(err.code());
    }
}

fn run(cli: &Cli) -> Result<()> {
    let kind: GeneratorKind = cli.generator.parse()?;

    let mut bytes = Vec::new();
    std::io::stdin()
        .read_to_end(&mut bytes)
        .map_err(|_| ErrorKind::InputConversionNotSupported)?;
    let input = String::from_utf8(bytes).map_err(|_| ErrorKind::CharacterNotDecodable)?;

    tracing::info!(lines = input.lines().count(), "converting input");
    let rendered = convert(&input, kind)?;
    tracing::info!(bytes = rendered.len(), "writing output");

    std::io::stdout()
        .write_all(rendered.as_bytes())
        .map_err(|_| ErrorKind::OutputConversionNotSupported)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generator_flag_is_required() {
        assert!(Cli::try_parse_from(["textml"]).is_err());
    }

    #[test]
    fn parses_generator_and_verbose() {
        let cli = Cli::try_parse_from(["textml", "-g", "tex", "--verbose"]).unwrap();
        assert_eq!(cli.generator, "tex");
        assert!(cli.verbose);
    }
}
