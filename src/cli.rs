//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use log::info;

use crate::error::ConfigError;
use crate::params::{ChoreographyParams, RenderConfig};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "retrodesk")]
#[command(about = "Scroll-driven 3D room that zooms into a retro desktop", long_about = None)]
pub struct Args {
    /// Choreography tunables as JSON (missing fields keep defaults)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Scroll progress per pixel of wheel delta
    #[arg(long, value_name = "RATE")]
    pub scroll_speed: Option<f32>,

    /// Camera smoothing rate (fraction per second)
    #[arg(long, value_name = "RATE")]
    pub animation_speed: Option<f32>,

    /// Smoothed progress above which the desktop takes over (0-2)
    #[arg(long, value_name = "PROGRESS")]
    pub phase_threshold: Option<f32>,

    /// Skip the wide intro blend
    #[arg(long)]
    pub no_intro: bool,

    /// Run the guided tour without a window for this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub headless: Option<f32>,

    /// Fixed frame rate for headless mode
    #[arg(long, value_name = "FPS", default_value = "60")]
    pub fps: u32,

    /// Window width (pixels)
    #[arg(long, value_name = "PIXELS", default_value = "1280")]
    pub width: u32,

    /// Window height (pixels)
    #[arg(long, value_name = "PIXELS", default_value = "720")]
    pub height: u32,
}

impl Args {
    /// Choreography params: file (if any), then flag overrides, validated
    pub fn build_params(&self) -> Result<ChoreographyParams, ConfigError> {
        let mut params = match &self.config {
            Some(path) => {
                info!("loading choreography config from {}", path.display());
                ChoreographyParams::from_json_file(path)?
            }
            None => ChoreographyParams::default(),
        };

        if let Some(speed) = self.scroll_speed {
            params.scroll_speed = speed;
        }
        if let Some(speed) = self.animation_speed {
            params.animation_speed = speed;
        }
        if let Some(threshold) = self.phase_threshold {
            params.phase_threshold = threshold;
        }
        if self.no_intro {
            params.intro_enabled = false;
        }

        params.validate()?;
        Ok(params)
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            window_width: self.width,
            window_height: self.height,
            ..Default::default()
        }
    }
}
