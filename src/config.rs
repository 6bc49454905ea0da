use crate::engine::Params;
use crate::model::GROWTH_CEILING;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, fs, ops::RangeBounds, path::Path};

const MAX_DIST: i64 = 1_000;
const MAX_HOUS: i64 = 1_000_000;
const MAX_CELLS: usize = 250_000;
const MIN_TICK_STEP: f64 = 0.01;

/// Heatmap configuration.
///
/// Loaded from a TOML file and validated before use.
/// See [`Config::from_file`] for loading.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub model: ModelConfig,
    pub axes: AxesConfig,
    #[serde(default)]
    pub figure: FigureConfig,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    /// Capacity contributed by one district (depends on the planet type).
    pub pop_mult: i64,
    /// Current number of pops.
    pub n_pops: i64,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AxesConfig {
    /// Inclusive maximum number of free districts.
    pub max_dist: i64,
    /// Inclusive maximum amount of extra housing.
    pub max_hous: i64,
}

/// Presentation settings handed to the figure writer.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FigureConfig {
    /// Annotate every cell with its capacity.
    pub show_capacity: bool,
    /// Colors spread evenly from the lowest to the highest growth rate.
    pub palette: Vec<String>,
    /// Spacing of the colorbar ticks.
    pub tick_step: f64,

    pub font_color: String,
    pub bg_color: String,
    pub grid_color: String,
}

impl Default for FigureConfig {
    fn default() -> Self {
        let palette = [
            "#8B0000", "#B22222", "#CD5C5C", "#F08080", "#FFA500", "#FFD700", "#FFFF00",
            "#ADFF2F", "#32CD32", "#228B22", "#006400",
        ];
        Self {
            show_capacity: false,
            palette: palette.iter().map(|color| color.to_string()).collect(),
            tick_step: 0.5,
            font_color: "#ffffff".to_string(),
            bg_color: "#2a2a2a".to_string(),
            grid_color: "#444444".to_string(),
        }
    }
}

impl Config {
    /// Load a [`Config`] from a file.
    ///
    /// The file must be TOML-encoded and contain a serialized [`Config`].
    /// Performs validation on all parameters before returning.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let config_str =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;

        let config: Config = toml::from_str(&config_str).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    /// Model parameters of the grid evaluation.
    pub fn params(&self) -> Params {
        Params {
            pop_mult: self.model.pop_mult,
            n_pops: self.model.n_pops,
            max_dist: self.axes.max_dist,
            max_hous: self.axes.max_hous,
        }
    }

    fn validate(&self) -> Result<()> {
        check_num(self.model.pop_mult, 0..=1_000_000).context("invalid population multiplier")?;
        check_num(self.model.n_pops, 1..=1_000_000_000).context("invalid number of pops")?;

        check_num(self.axes.max_dist, ..=MAX_DIST).context("invalid maximum number of districts")?;
        check_num(self.axes.max_hous, ..=MAX_HOUS).context("invalid maximum extra housing")?;
        let (n_rows, n_cols) = self.params().dim();
        check_num(n_rows * n_cols, ..=MAX_CELLS).context("invalid number of grid cells")?;

        let n_colors = self.figure.palette.len();
        if n_colors < 2 {
            bail!("palette must have at least 2 colors, but has {n_colors}");
        }
        check_num(self.figure.tick_step, MIN_TICK_STEP..=GROWTH_CEILING)
            .context("invalid tick step")?;

        Ok(())
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}
