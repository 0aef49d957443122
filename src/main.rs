use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use fftcmp::{
    BenchConfig, Catalog, Harness, Overrides, Reporter, RunRecord, SystemInfo, TransformKind,
};

/// Compare forward FFT performance across the compiled-in library bindings.
#[derive(Parser)]
#[command(author, version)]
struct Args {
    /// Comma separated kernel sizes, e.g. `128,1024,4096`
    #[arg(long, value_delimiter = ',', conflicts_with = "powers")]
    sizes: Option<Vec<usize>>,

    /// Comma separated powers of two, e.g. `7,10` for 128 and 1024
    #[arg(long, value_delimiter = ',')]
    powers: Option<Vec<u32>>,

    /// Minimum measurement window per library and size, in milliseconds
    #[arg(long)]
    min_duration_ms: Option<u64>,

    /// Transform kinds to run, in order. Repeat to select several
    #[arg(long, value_enum)]
    kind: Vec<TransformKind>,

    /// Also write the results as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// List the compiled-in libraries and exit
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    let catalog = Catalog::builtin();

    if args.list {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for (i, entry) in catalog.entries().iter().enumerate() {
            let marker = if i == 0 { " (baseline)" } else { "" };
            writeln!(
                out,
                "{:<16} {}{}",
                entry.id(),
                entry.description(),
                marker
            )?;
        }
        return Ok(());
    }

    let config = BenchConfig::resolve(Overrides {
        sizes: args.sizes,
        powers: args.powers,
        min_duration_ms: args.min_duration_ms,
        kinds: args.kind,
    })
    .context("resolving benchmark configuration")?;
    info!(
        "sizes {:?}, min duration {:?}, kinds {:?}",
        config.sizes, config.min_duration, config.kinds
    );

    let env = SystemInfo::probe();
    let stdout = io::stdout();
    let mut reporter = Reporter::new(stdout.lock(), &catalog);
    let summary = Harness::new(&catalog, &config)
        .run(&env, &mut reporter)
        .context("benchmark run failed")?;
    drop(reporter);

    if let Some(path) = args.json {
        RunRecord::new(&catalog, &config, &env, &summary)
            .write(&path)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("wrote {}", path.display());
    }
    Ok(())
}
