//! CLI tool that builds the "Agentic AI Testing Architecture" presentation.

use anyhow::{bail, Context, Result};
use clap::Parser;
use deck_core::{agentic_testing_deck, Deck, DocumentProperties, OutlineFormatter, DEFAULT_FILE_NAME};
use deck_pptx::{PptxReader, PptxWriter};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

/// Build the Agentic AI Testing Architecture slide deck.
#[derive(Parser, Debug)]
#[command(name = "deck-build")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output .pptx file
    #[arg(short, long, default_value = DEFAULT_FILE_NAME)]
    output: PathBuf,

    /// Document title (core properties)
    #[arg(long)]
    title: Option<String>,

    /// Document author (core properties)
    #[arg(long)]
    author: Option<String>,

    /// Print the text outline of every slide to stdout
    #[arg(long)]
    outline: bool,

    /// With --outline, print each shape's text on one line
    #[arg(long, requires = "outline")]
    flat: bool,

    /// Print the deck model as JSON to stdout instead of writing a file
    #[arg(long)]
    json: bool,

    /// Re-open the written file and check it against the model
    #[arg(long)]
    verify: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&args, &mut out)?;
    out.flush()?;

    Ok(())
}

/// Build the deck and write it, printing to `out` whatever the flags ask for.
fn run(args: &Args, out: &mut impl Write) -> Result<()> {
    let deck = agentic_testing_deck(document_properties(args))
        .map_err(|e| anyhow::anyhow!("{}", e))
        .context("Failed to build the deck")?;

    if args.json {
        let json = serde_json::to_string_pretty(&deck).context("Failed to serialize the deck")?;
        writeln!(out, "{}", json)?;
        return Ok(());
    }

    if args.outline {
        let formatter = if args.flat {
            OutlineFormatter::new().flattened()
        } else {
            OutlineFormatter::new()
        };
        write!(out, "{}", formatter.format_with_newline(&deck.outline()))?;
    }

    write_deck(&deck, &args.output)?;

    if args.verify {
        verify_deck(&deck, &args.output)?;
        log::info!("Verified: {}", args.output.display());
    }

    writeln!(out, "[OK] Saved: {}", args.output.display())?;
    writeln!(out, "     {} slides, clean white theme", deck.slide_count())?;

    Ok(())
}

/// Core document properties from the command line, with defaults for
/// anything not given.
fn document_properties(args: &Args) -> DocumentProperties {
    let defaults = DocumentProperties::default();
    DocumentProperties::new(
        args.title.clone().unwrap_or(defaults.title),
        args.author.clone().unwrap_or(defaults.author),
    )
}

/// Write the deck, creating the parent directory if needed.
fn write_deck(deck: &Deck, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    log::debug!("Writing {}", path.display());
    PptxWriter::new()
        .save(deck, path)
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}

/// Read the written file back and compare it with the model.
fn verify_deck(deck: &Deck, path: &Path) -> Result<()> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let outline = PptxReader::new()
        .read(BufReader::new(file))
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| format!("Failed to read back {}", path.display()))?;

    if outline.slide_count() != deck.slide_count() {
        bail!(
            "{} has {} slides, expected {}",
            path.display(),
            outline.slide_count(),
            deck.slide_count()
        );
    }

    deck.outline()
        .verify(&outline)
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_arguments() {
        let args = Args::try_parse_from(["deck-build"]).unwrap();
        assert_eq!(args.output, PathBuf::from(DEFAULT_FILE_NAME));
        assert!(!args.outline && !args.json && !args.verify);

        let props = document_properties(&args);
        assert_eq!(props.title, "Agentic AI Testing Architecture");
    }

    #[test]
    fn test_overridden_properties() {
        let args = Args::try_parse_from([
            "deck-build",
            "-o",
            "out/deck.pptx",
            "--title",
            "Architecture Review",
            "--author",
            "QA Guild",
        ])
        .unwrap();
        let props = document_properties(&args);
        assert_eq!(props.title, "Architecture Review");
        assert_eq!(props.author, "QA Guild");
        assert_eq!(args.output, PathBuf::from("out/deck.pptx"));
    }

    #[test]
    fn test_write_and_verify() {
        let dir = std::env::temp_dir().join(format!("deck-cli-{}", std::process::id()));
        let path = dir.join("nested").join("deck.pptx");
        let deck = agentic_testing_deck(DocumentProperties::default()).unwrap();

        write_deck(&deck, &path).unwrap();
        verify_deck(&deck, &path).unwrap();

        std::fs::remove_dir_all(&dir).unwrap();
    }

    fn run_to_string(args: &Args) -> String {
        let mut out = Vec::new();
        run(args, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_json_prints_model_without_writing() {
        let dir = std::env::temp_dir().join(format!("deck-cli-json-{}", std::process::id()));
        let path = dir.join("deck.pptx");
        let args = Args::try_parse_from([
            "deck-build",
            "--json",
            "-o",
            path.to_str().unwrap(),
        ])
        .unwrap();

        let printed = run_to_string(&args);
        let value: serde_json::Value = serde_json::from_str(&printed).unwrap();
        assert_eq!(value["slides"].as_array().unwrap().len(), 17);
        assert_eq!(value["properties"]["title"], "Agentic AI Testing Architecture");
        assert!(!printed.contains("[OK]"));
        assert!(!path.exists());
    }

    #[test]
    fn test_outline_and_saved_lines() {
        let dir = std::env::temp_dir().join(format!("deck-cli-outline-{}", std::process::id()));
        let path = dir.join("deck.pptx");
        let args = Args::try_parse_from([
            "deck-build",
            "--outline",
            "--verify",
            "-o",
            path.to_str().unwrap(),
        ])
        .unwrap();

        let printed = run_to_string(&args);
        for n in 1..=17 {
            assert!(printed.contains(&format!("Slide {}\n", n)), "missing Slide {}", n);
        }
        assert!(printed.contains("Slide 1\nAgentic AI Testing Architecture\n"));
        assert!(printed.ends_with(&format!(
            "[OK] Saved: {}\n     17 slides, clean white theme\n",
            path.display()
        )));
        assert!(path.exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_flat_outline_joins_lines() {
        let dir = std::env::temp_dir().join(format!("deck-cli-flat-{}", std::process::id()));
        let path = dir.join("deck.pptx");
        let plain = Args::try_parse_from([
            "deck-build",
            "--outline",
            "-o",
            path.to_str().unwrap(),
        ])
        .unwrap();
        let flat = Args::try_parse_from([
            "deck-build",
            "--outline",
            "--flat",
            "-o",
            path.to_str().unwrap(),
        ])
        .unwrap();

        let plain = run_to_string(&plain);
        let flat = run_to_string(&flat);
        assert!(flat.contains(" / "));
        assert!(flat.lines().count() < plain.lines().count());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_flat_requires_outline() {
        assert!(Args::try_parse_from(["deck-build", "--flat"]).is_err());
    }
}
