use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Sampling grid for the near-field figure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_grid_points")]
    pub points: usize,
    #[serde(default = "default_half_extent")]
    pub half_extent: f64,
}

fn default_grid_points() -> usize {
    64
}

fn default_half_extent() -> f64 {
    2.0
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            points: default_grid_points(),
            half_extent: default_half_extent(),
        }
    }
}

impl GridConfig {
    fn validate(&self) -> Result<()> {
        if self.points < 2 {
            return Err(anyhow!(
                "Grid needs at least 2 points per side, got {}",
                self.points
            ));
        }
        if self.half_extent <= 0.0 {
            return Err(anyhow!(
                "Grid half_extent must be positive, got {}",
                self.half_extent
            ));
        }
        Ok(())
    }
}

/// Near-field figure surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearFieldConfig {
    #[serde(default = "default_near_width")]
    pub width: u32,
    #[serde(default = "default_near_height")]
    pub height: u32,
    #[serde(default = "default_near_output")]
    pub output: String,
}

fn default_near_width() -> u32 {
    1200
}

fn default_near_height() -> u32 {
    1000
}

fn default_near_output() -> String {
    "field.png".to_string()
}

impl Default for NearFieldConfig {
    fn default() -> Self {
        Self {
            width: default_near_width(),
            height: default_near_height(),
            output: default_near_output(),
        }
    }
}

/// Far-field figure surface and angular sampling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarFieldConfig {
    #[serde(default = "default_far_width")]
    pub width: u32,
    #[serde(default = "default_far_height")]
    pub height: u32,
    #[serde(default = "default_far_output")]
    pub output: String,
    #[serde(default = "default_far_samples")]
    pub samples: usize,
}

fn default_far_width() -> u32 {
    900
}

fn default_far_height() -> u32 {
    800
}

fn default_far_output() -> String {
    "far_field.png".to_string()
}

fn default_far_samples() -> usize {
    361
}

impl Default for FarFieldConfig {
    fn default() -> Self {
        Self {
            width: default_far_width(),
            height: default_far_height(),
            output: default_far_output(),
            samples: default_far_samples(),
        }
    }
}

/// Render settings, all optional and defaulted so the command line works
/// without any file present. Problem parameters never live here; they stay
/// on the command line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlotConfig {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub near_field: NearFieldConfig,
    #[serde(default)]
    pub far_field: FarFieldConfig,
}

impl PlotConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file '{}': {}", path, e))?;
        let config: PlotConfig =
            toml::from_str(&content).map_err(|e| anyhow!("Failed to parse TOML config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Use the file when it exists, built-in defaults otherwise.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.grid.validate()?;
        for (name, width, height) in [
            ("near_field", self.near_field.width, self.near_field.height),
            ("far_field", self.far_field.width, self.far_field.height),
        ] {
            if width == 0 || height == 0 {
                return Err(anyhow!(
                    "{} image dimensions must be positive (width={}, height={})",
                    name,
                    width,
                    height
                ));
            }
        }
        if self.near_field.output.is_empty() || self.far_field.output.is_empty() {
            return Err(anyhow!("Output paths must not be empty"));
        }
        // the segment window needs three samples
        if self.far_field.samples < 3 {
            return Err(anyhow!(
                "far_field.samples must be at least 3, got {}",
                self.far_field.samples
            ));
        }
        Ok(())
    }
}
