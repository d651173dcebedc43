use clap::Parser;
use gofontweb::pipeline::DEFAULT_OUT_DIR;
use gofontweb::{PipelineConfig, PipelineError, Woff2Compress, run_pipeline};
use std::path::PathBuf;
use std::process::ExitCode;

/// Converts the Go fonts to WOFF2 and writes the embeddable asset directory.
#[derive(Parser)]
#[command(name = "gofontweb-gen")]
#[command(about = "Generate go.css, LICENSE.txt and WOFF2 fonts for the embedded bundle")]
struct Cli {
    /// Directory containing Go-Regular.ttf, Go-Mono-Bold-Italic.ttf, ...
    #[arg(long, env = "GOFONTWEB_SOURCE")]
    source: PathBuf,

    /// Output directory (the crate embeds `assets/`)
    #[arg(long, default_value = DEFAULT_OUT_DIR, env = "GOFONTWEB_OUT")]
    out: PathBuf,

    /// woff2_compress executable, a name on PATH or a path
    #[arg(long, default_value = "woff2_compress", env = "GOFONTWEB_TOOL")]
    tool: PathBuf,

    /// Convert only these variants (default: all twelve Go fonts)
    #[arg(long = "variant", value_name = "NAME")]
    variants: Vec<String>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), PipelineError> {
    let mut config = PipelineConfig::new(cli.source)
        .with_out_dir(cli.out)
        .with_tool(&cli.tool);
    if !cli.variants.is_empty() {
        config = config.with_variants(cli.variants);
    }

    let compressor = Woff2Compress::new(cli.tool);
    let output = run_pipeline(&config, &compressor)?;

    println!(
        "Generated {} assets in {}",
        output.bundle.len(),
        config.out_dir.display()
    );
    println!("Rebuild the crate to embed them.");
    Ok(())
}
