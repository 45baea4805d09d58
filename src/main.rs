use std::error::Error;
use std::fs::File;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use isomap::RenderConfig;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, TermLogger, TerminalMode,
    WriteLogger,
};

#[derive(Parser, Debug)]
#[command(name = "isomap", version, about = "Isometric voxel map renderer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a chunk grid to a PNG tile
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Render config (TOML); defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output PNG, overriding `render.output`
    #[arg(long)]
    out: Option<PathBuf>,
    /// Draw grass and leaves without biome colors
    #[arg(long, default_value_t = false)]
    no_biomes: bool,
    /// Worker threads (0 = one per core)
    #[arg(long)]
    threads: Option<usize>,
    /// Also write the log to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<(), Box<dyn Error>> {
    match log_file {
        None => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .init();
        }
        Some(path) => {
            let config = ConfigBuilder::new().build();
            CombinedLogger::init(vec![
                TermLogger::new(
                    LevelFilter::Info,
                    config.clone(),
                    TerminalMode::Mixed,
                    ColorChoice::Auto,
                ),
                WriteLogger::new(LevelFilter::Debug, config, File::create(path)?),
            ])?;
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    match cli.command {
        Command::Render(args) => {
            init_logging(args.log_file.as_ref())?;
            let mut cfg = match args.config.as_deref() {
                Some(path) => RenderConfig::load_from_path(path)?,
                None => RenderConfig::default(),
            };
            if args.no_biomes {
                cfg.render.biomes = false;
            }
            if let Some(n) = args.threads {
                cfg.render.threads = n;
            }
            if let Some(out) = args.out {
                cfg.render.output = out;
            }
            cfg.validate()?;

            let tile = isomap::render_world(&cfg)?;
            tile.save(&cfg.render.output)?;
            log::info!("wrote {}", cfg.render.output.display());
        }
    }
    Ok(())
}
