use crate::config::Config;
use crate::engine::Grid;
use crate::figure::figure;
use crate::stats::GrowthReport;
use anyhow::{Context, Result, bail};
use rmp_serde::{decode, encode};
use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

pub struct Manager {
    map_dir: PathBuf,
    cfg: Config,
}

impl Manager {
    pub fn new<P: AsRef<Path>>(map_dir: P) -> Result<Self> {
        let map_dir = map_dir.as_ref().to_path_buf();

        let cfg = Config::from_file(map_dir.join("config.toml")).context("failed to construct cfg")?;
        log::info!("{cfg:#?}");

        Ok(Self { map_dir, cfg })
    }

    /// Evaluate the grid and write it along with its figure.
    ///
    /// `show_capacity` annotates the figure even if the config does not.
    pub fn create_map(&self, show_capacity: bool) -> Result<()> {
        let params = self.cfg.params();
        let grid = Grid::evaluate(params);

        let (n_rows, n_cols) = grid.dim();
        if n_rows == 0 || n_cols == 0 {
            log::warn!("grid is empty ({n_rows} x {n_cols}), check the axis maxima");
        }
        log::info!("evaluated {n_rows} x {n_cols} grid");

        let grid_file = self.grid_file();
        save_grid(&grid, &grid_file).with_context(|| format!("failed to save {grid_file:?}"))?;
        log::info!("created {grid_file:?}");

        let figure_file = self.figure_file();
        let mut figure_cfg = self.cfg.figure.clone();
        figure_cfg.show_capacity |= show_capacity;
        let figure = figure(&grid, &figure_cfg);
        save_json(&figure, &figure_file)
            .with_context(|| format!("failed to save {figure_file:?}"))?;
        log::info!("created {figure_file:?}");

        Ok(())
    }

    pub fn analyze_map(&self) -> Result<()> {
        let grid_file = self.grid_file();
        let grid = load_grid(&grid_file).with_context(|| format!("failed to load {grid_file:?}"))?;
        if grid.params != self.cfg.params() {
            bail!("stored grid params differ from the current config");
        }
        log::info!("loaded {grid_file:?}");

        let report = GrowthReport::new(&grid);
        log::info!("{report:#?}");

        let results_file = self.results_file();
        save_json(&report, &results_file)
            .with_context(|| format!("failed to save {results_file:?}"))?;
        log::info!("created {results_file:?}");

        Ok(())
    }

    pub fn clean_map(&self) -> Result<()> {
        for file in [self.grid_file(), self.figure_file(), self.results_file()] {
            if !file.exists() {
                continue;
            }
            fs::remove_file(&file).with_context(|| format!("failed to remove {file:?}"))?;
            log::info!("removed {file:?}");
        }

        Ok(())
    }

    fn grid_file(&self) -> PathBuf {
        self.map_dir.join("grid.msgpack")
    }

    fn figure_file(&self) -> PathBuf {
        self.map_dir.join("heatmap.json")
    }

    fn results_file(&self) -> PathBuf {
        self.map_dir.join("results.json")
    }
}

fn save_grid(grid: &Grid, file: &Path) -> Result<()> {
    let file = File::create(file).context("failed to create file")?;
    let mut writer = BufWriter::new(file);
    encode::write(&mut writer, grid).context("failed to serialize grid")?;
    writer.flush().context("failed to flush writer stream")?;
    Ok(())
}

fn load_grid(file: &Path) -> Result<Grid> {
    let file = File::open(file).context("failed to open file")?;
    let mut reader = BufReader::new(file);
    let grid = decode::from_read(&mut reader).context("failed to deserialize grid")?;
    Ok(grid)
}

fn save_json<T: serde::Serialize>(value: &T, file: &Path) -> Result<()> {
    let file = File::create(file).context("failed to create file")?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).context("failed to serialize value")?;
    writer.flush().context("failed to flush writer stream")?;
    Ok(())
}
