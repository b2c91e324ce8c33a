use std::error::Error;

use clap::Parser;
use exif_fields::{ExifImage, JsonTagDump, MetadataExtractor, NormalizeOptions, RationalText};
use tracing_subscriber::EnvFilter;

/// Print the normalized metadata fields of JSON tag dumps.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    files: Vec<String>,

    /// Dump the tables as JSON
    #[arg(short, long)]
    json: bool,

    /// Also list standard fields the image doesn't carry
    #[arg(short, long)]
    all: bool,

    /// Render rational fields as decimals (f5.6 instead of f56/10)
    #[arg(short, long)]
    decimal: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut options = NormalizeOptions::default();
    if cli.decimal {
        options = options.rational_text(RationalText::Decimal);
    }
    let extractor = MetadataExtractor::with_options(options);

    for file in cli.files.iter() {
        let img = match ExifImage::load_with(file, &JsonTagDump, &extractor) {
            Ok(img) => img,
            Err(e) => {
                eprintln!("{file}: {e}");
                continue;
            }
        };

        let exif = match img.exif() {
            Ok(exif) => exif,
            Err(e) => {
                println!("{}: {e}", img.name());
                continue;
            }
        };

        if cli.json {
            println!("{}", serde_json::to_string_pretty(exif)?);
            continue;
        }

        println!("== {} ({})", img.name(), img.full_path().display());
        let mut entries = exif
            .standard()
            .iter()
            .filter(|(_, e)| cli.all || e.has_value())
            .map(|(tag, e)| {
                let value = e.processed().map(|v| v.to_string()).unwrap_or_default();
                format!("{:<32}=> {}", tag.to_string(), value)
            })
            .collect::<Vec<_>>();
        entries.sort();
        entries.iter().for_each(|x| {
            println!("{x}");
        });

        for (code, e) in exif.user_defined().iter() {
            let value = e.processed().map(|v| v.to_string()).unwrap_or_default();
            println!("{:<32}=> {}", format!("0x{code:04x}"), value);
        }

        for (tag, err) in exif.standard().errors() {
            eprintln!("{tag}: {err}");
        }
    }

    Ok(())
}
