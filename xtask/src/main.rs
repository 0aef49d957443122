use clap::{Parser, Subcommand};
#[cfg(not(test))]
use xtask::*;

#[derive(Parser)]
#[command(author, version, about = "Development tasks for fftcmp")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Build,
    Test,
    Clippy,
    Fmt,
    Analyze,
    /// Run the comparison in release mode with host RUSTFLAGS
    Compare {
        /// Arguments forwarded to `fftcmp`
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Run the criterion bench target
    Bench,
}

#[cfg(not(test))]
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = detect_config();

    let status = match cli.command {
        Commands::Build => build_command(&cfg).status(),
        Commands::Test => test_command(&cfg).status(),
        Commands::Clippy => clippy_command().status(),
        Commands::Fmt => fmt_command().status(),
        Commands::Analyze => {
            let fmt = fmt_command().status()?;
            if !fmt.success() {
                Ok(fmt)
            } else {
                clippy_command().status()
            }
        }
        Commands::Compare { args } => compare_command(&cfg, &args).status(),
        Commands::Bench => bench_command(&cfg).status(),
    }?;

    std::process::exit(status.code().unwrap_or(1));
}
