use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use term_snake::game::{GameConfig, SpeedRamp};
use term_snake::logging::init_logging;
use term_snake::modes::HumanMode;

#[derive(Parser)]
#[command(name = "term_snake")]
#[command(version, about = "Classic Snake in the terminal")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Milliseconds between steps at the start of a game
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Speed up a little every time the snake eats
    #[arg(long)]
    ramp: bool,

    /// Milliseconds taken off the tick per food (implies --ramp)
    #[arg(long)]
    ramp_step_ms: Option<u64>,

    /// Fastest tick the ramp may reach, in milliseconds (implies --ramp)
    #[arg(long)]
    ramp_floor_ms: Option<u64>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Ring the terminal bell on eating and on game over
    #[arg(long)]
    bell: bool,
}

impl Cli {
    /// Defaults, then the config file, then flags
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.initial_tick = Duration::from_millis(tick_ms);
        }

        if self.ramp || self.ramp_step_ms.is_some() || self.ramp_floor_ms.is_some() {
            // Flags tweak the file's ramp, or the classic one if it had none
            let base = match config.speed_ramp {
                SpeedRamp::None => SpeedRamp::classic(),
                ramp => ramp,
            };
            if let SpeedRamp::Linear { step_ms, floor_ms } = base {
                config.speed_ramp = SpeedRamp::Linear {
                    step_ms: self.ramp_step_ms.unwrap_or(step_ms),
                    floor_ms: self.ramp_floor_ms.unwrap_or(floor_ms),
                };
            }
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_file.as_deref())?;

    let config = cli.game_config()?;
    tracing::info!(?config, "starting");

    let mut human_mode = HumanMode::new(config, cli.bell)?;
    human_mode.run().await?;

    Ok(())
}
