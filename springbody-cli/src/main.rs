mod viewer;

use clap::{Parser, Subcommand};
use springbody_core::{run_scenario, BodyConfig, RunOptions};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "springbody")]
#[command(about = "springbody - a damped spring-and-gravity body simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Step a scenario without a window and print its trajectory as CSV
    Run {
        /// Path to a TOML scenario; built-in defaults when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Number of steps to take
        #[arg(long, default_value_t = 300)]
        steps: usize,
        /// Seconds per step, clamped to the scenario's max_timestep
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f32,
        /// Print a row every this many steps
        #[arg(long, default_value_t = 1)]
        every: usize,
    },
    /// Open the interactive viewer
    View {
        /// Path to a TOML scenario, reloaded when it changes on disk
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    let _ = tracing_subscriber::fmt::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .try_init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            config,
            steps,
            dt,
            every,
        } => run_file(
            config.as_deref(),
            RunOptions {
                steps,
                dt,
                sample_every: every,
            },
        ),
        Commands::View { config } => {
            load_config(config.as_deref()).and_then(|scenario| viewer::run(config, scenario))
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<BodyConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(BodyConfig::load(path)?),
        None => Ok(BodyConfig::default()),
    }
}

fn run_file(path: Option<&Path>, options: RunOptions) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(path)?;
    let result = run_scenario(&config, options)?;

    println!("step,time,x,y,vx,vy");
    for sample in &result.samples {
        println!(
            "{},{},{},{},{},{}",
            sample.step,
            sample.time,
            sample.position.x,
            sample.position.y,
            sample.velocity.x,
            sample.velocity.y
        );
    }

    if result.recoveries > 0 {
        tracing::warn!(recoveries = result.recoveries, "body was reset after diverging");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_path_uses_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config, BodyConfig::default());
    }

    #[test]
    fn test_unreadable_config_is_an_error() {
        assert!(load_config(Some(Path::new("does/not/exist.toml"))).is_err());
    }
}
