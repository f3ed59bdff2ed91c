use std::path::Path;
use std::time::Duration;

use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{CellSize, Coordinate, GridBounds, Preset, StepStrategy};
use crate::error::{LifeError, LifeResult};

/// Prefix for environment overrides, e.g. `LIFE__STEP_INTERVAL_MS=120`
const ENV_PREFIX: &str = "LIFE";

/// A preset supplied by configuration as literal pixel coordinates
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetConfig {
    pub name: String,
    pub cells: Vec<[i32; 2]>,
}

impl From<&PresetConfig> for Preset {
    fn from(cfg: &PresetConfig) -> Self {
        Preset::new(cfg.name.clone(), cfg.cells.iter().copied().map(Coordinate::from).collect())
    }
}

/// Tunables for the simulation and its driver
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeConfig {
    /// Interval changes below this floor are declined
    pub min_step_interval_ms: u64,
    /// Interval between automatic steps
    pub step_interval_ms: u64,
    pub cell_width: i32,
    pub cell_height: i32,
    pub grid_width_px: i32,
    pub grid_height_px: i32,
    pub step_strategy: StepStrategy,
    /// Probability of a cell being filled by `randomize`
    pub random_density: f64,
    /// Appended after the built-in presets
    pub presets: Vec<PresetConfig>,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            min_step_interval_ms: 30,
            step_interval_ms: 500,
            cell_width: 15,
            cell_height: 15,
            grid_width_px: 900,
            grid_height_px: 600,
            step_strategy: StepStrategy::default(),
            random_density: 0.3,
            presets: Vec::new(),
        }
    }
}

impl LifeConfig {
    /// Defaults, then the TOML file at `path` if it exists, then `LIFE__*`
    /// environment variables.
    pub fn load(path: Option<&Path>) -> LifeResult<Self> {
        Self::load_from(path, Environment::with_prefix(ENV_PREFIX))
    }

    /// Same layering as [`LifeConfig::load`] with the environment source
    /// supplied by the caller, so overrides can come from a fixed map.
    pub fn load_from(path: Option<&Path>, env: Environment) -> LifeResult<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Some(path) = path {
            info!("Loading configuration from {}", path.display());
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        let cfg: Self = builder
            .add_source(env.separator("__").try_parsing(true))
            .build()?
            .try_deserialize()?;

        cfg.validate()?;
        debug!(?cfg, "Configuration loaded");
        Ok(cfg)
    }

    /// Defaults overlaid with an inline TOML document
    pub fn from_toml_str(toml: &str) -> LifeResult<Self> {
        let cfg: Self = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> LifeResult<()> {
        if self.cell_width <= 0 || self.cell_height <= 0 {
            return Err(LifeError::InvalidConfig(format!(
                "cell size must be positive, got {}x{}",
                self.cell_width, self.cell_height
            )));
        }
        if self.grid_width_px < 0 || self.grid_height_px < 0 {
            return Err(LifeError::InvalidConfig(format!(
                "grid bounds must not be negative, got {}x{}",
                self.grid_width_px, self.grid_height_px
            )));
        }
        if self.min_step_interval_ms == 0 {
            return Err(LifeError::InvalidConfig("minimum step interval must be positive".into()));
        }
        if self.step_interval_ms < self.min_step_interval_ms {
            return Err(LifeError::InvalidConfig(format!(
                "step interval {}ms is below the minimum of {}ms",
                self.step_interval_ms, self.min_step_interval_ms
            )));
        }
        if !(0.0..=1.0).contains(&self.random_density) {
            return Err(LifeError::InvalidDensity(self.random_density));
        }
        Ok(())
    }

    pub const fn cell_size(&self) -> CellSize {
        CellSize::new(self.cell_width, self.cell_height)
    }

    pub const fn bounds(&self) -> GridBounds {
        GridBounds::new(self.grid_width_px, self.grid_height_px)
    }

    pub const fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }

    pub const fn min_step_interval(&self) -> Duration {
        Duration::from_millis(self.min_step_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let cfg = LifeConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.min_step_interval(), Duration::from_millis(30));
        assert_eq!(cfg.cell_size(), CellSize::square(15));
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let cfg = LifeConfig::from_toml_str(
            r#"
            step_interval_ms = 80
            cell_width = 10
            step_strategy = "serial"

            [[presets]]
            name = "Pair"
            cells = [[0, 0], [-10, 20]]
            "#,
        )
        .unwrap();

        assert_eq!(cfg.step_interval(), Duration::from_millis(80));
        assert_eq!(cfg.cell_size(), CellSize::new(10, 15));
        assert_eq!(cfg.step_strategy, StepStrategy::Serial);
        assert_eq!(cfg.min_step_interval_ms, 30);

        let preset = Preset::from(&cfg.presets[0]);
        assert_eq!(preset.name, "Pair");
        assert_eq!(preset.cells, vec![Coordinate::new(0, 0), Coordinate::new(-10, 20)]);
    }

    #[test]
    fn test_rejects_interval_below_floor() {
        let err = LifeConfig::from_toml_str("step_interval_ms = 10").unwrap_err();
        assert!(matches!(err, LifeError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_zero_cell_size() {
        let err = LifeConfig::from_toml_str("cell_height = 0").unwrap_err();
        assert!(matches!(err, LifeError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_bad_density() {
        let err = LifeConfig::from_toml_str("random_density = 1.5").unwrap_err();
        assert!(matches!(err, LifeError::InvalidDensity(_)));
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = LifeConfig::from_toml_str("step_interval_ms = ").unwrap_err();
        assert!(matches!(err, LifeError::Config(_)));
    }

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: ::config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let cfg = LifeConfig::load_from(Some(Path::new("does/not/exist.toml")), env(&[])).unwrap();
        assert_eq!(cfg, LifeConfig::default());
    }

    #[test]
    fn test_env_overrides_defaults() {
        let vars = [("LIFE__STEP_INTERVAL_MS", "120"), ("LIFE__STEP_STRATEGY", "serial")];
        let cfg = LifeConfig::load_from(None, env(&vars)).unwrap();
        assert_eq!(cfg.step_interval(), Duration::from_millis(120));
        assert_eq!(cfg.step_strategy, StepStrategy::Serial);
        assert_eq!(cfg.cell_size(), CellSize::square(15));
    }

    #[test]
    fn test_env_override_is_validated() {
        let err = LifeConfig::load_from(None, env(&[("LIFE__STEP_INTERVAL_MS", "5")])).unwrap_err();
        assert!(matches!(err, LifeError::InvalidConfig(_)));
    }
}
