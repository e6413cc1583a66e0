use clap::{Parser, Subcommand};
use mintdata::anchor::{self, AnchorBackend, LedgerFile};
use mintdata::{MetadataExtractor, batch, config, output};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "mintdata")]
#[command(about = "Fingerprint image files and anchor their metadata")]
#[command(long_about = "\
Fingerprint image files and anchor their metadata

For each image, mintdata records the file name, pixel dimensions, encoding
format (detected from content, not extension), byte size, and the SHA-256
checksum of the file's bytes. The record is written as JSON and can be
submitted to a ledger.

Supported formats: PNG, JPEG, GIF, BMP, WebP.

Run 'mintdata gen-config' to generate a documented mintdata.toml.")]
#[command(version)]
struct Cli {
    /// Config file (missing file = stock defaults)
    #[arg(long, default_value = config::CONFIG_FILENAME, global = true)]
    config: PathBuf,

    /// Directory the metadata artifact is written to
    #[arg(long, default_value = ".", global = true)]
    out: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract metadata from an image and write the artifact
    Extract {
        /// Image file
        file: PathBuf,
    },
    /// Extract, write the artifact, and submit the record to the ledger
    Anchor {
        /// Image file
        file: PathBuf,
        /// Submitter identity (overrides anchor.identity)
        #[arg(long)]
        identity: Option<String>,
    },
    /// List every record in the ledger
    List,
    /// Extract metadata for every file under a directory
    Scan {
        /// Directory to walk
        dir: PathBuf,
    },
    /// Print a stock mintdata.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;
    let extractor = MetadataExtractor::with_defaults();
    let ledger = LedgerFile::new(&cfg.anchor.ledger);

    match cli.command {
        Command::Extract { file } => {
            extract_and_write(&extractor, &file, &cli.out, &cfg)?;
        }
        Command::Anchor { file, identity } => {
            let metadata = extract_and_write(&extractor, &file, &cli.out, &cfg)?;
            let identity = identity.unwrap_or_else(|| cfg.anchor.identity.clone());
            let receipt = anchor::anchor_metadata(&ledger, &identity, &metadata)?;
            println!();
            output::print_receipt(&receipt);
            println!();
            output::print_records(&ledger.list_records()?);
        }
        Command::List => {
            output::print_records(&ledger.list_records()?);
        }
        Command::Scan { dir } => {
            let report = batch::extract_dir(&dir, &extractor)?;
            output::print_batch(&report, &dir);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Extract `file`, print the record, and write the artifact into `out`.
fn extract_and_write(
    extractor: &MetadataExtractor,
    file: &Path,
    out: &Path,
    cfg: &config::Config,
) -> Result<mintdata::Metadata, Box<dyn std::error::Error>> {
    let metadata = extractor.extract(file)?;
    output::print_metadata(&metadata);

    std::fs::create_dir_all(out)?;
    let artifact = metadata.write_artifact(out, &cfg.output.artifact, cfg.output.pretty)?;
    println!("Wrote {}", artifact.display());
    Ok(metadata)
}
