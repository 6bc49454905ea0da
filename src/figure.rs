//! Heatmap figure description.
//!
//! Produces a Plotly-compatible JSON figure; drawing is left to the viewer.

use crate::config::FigureConfig;
use crate::engine::Grid;
use crate::model::{GROWTH_CEILING, GROWTH_FLOOR};
use serde_json::{Value, json};

const HOVER_TEMPLATE: &str = "<b>Free Districts:</b> %{x}<br>\
    <b>Extra Housing:</b> %{y}<br>\
    <b>Capacity:</b> %{text}<br>\
    <b>Growth:</b> %{z:.2f}<extra></extra>";

/// Build the figure (`data` and `layout`) of a grid.
pub fn figure(grid: &Grid, cfg: &FigureConfig) -> Value {
    json!({
        "data": [trace(grid, cfg)],
        "layout": layout(grid, cfg),
    })
}

fn trace(grid: &Grid, cfg: &FigureConfig) -> Value {
    let tick_vals = tick_vals(cfg.tick_step);
    let tick_text: Vec<_> = tick_vals.iter().map(|val| format!("{val:.1}")).collect();

    json!({
        "type": "heatmap",
        "z": grid.growth,
        "x": grid.dist_axis,
        "y": grid.hous_axis,
        "text": grid.capacity_text,
        "colorscale": colorscale(&cfg.palette),
        "zmin": GROWTH_FLOOR,
        "zmax": GROWTH_CEILING,
        "showscale": true,
        "xgap": 1,
        "ygap": 1,
        "hovertemplate": HOVER_TEMPLATE,
        "colorbar": {
            "title": { "text": "Growth", "font": { "color": cfg.font_color } },
            "tickfont": { "color": cfg.font_color },
            "tickvals": tick_vals,
            "ticktext": tick_text,
        },
    })
}

fn layout(grid: &Grid, cfg: &FigureConfig) -> Value {
    let axis = |title: &str| {
        json!({
            "title": { "text": title, "font": { "color": cfg.font_color } },
            "tickfont": { "color": cfg.font_color },
            "gridcolor": cfg.grid_color,
        })
    };

    json!({
        "title": {
            "text": format!("<b>Population: {}</b>", grid.params.n_pops),
            "font": { "color": cfg.font_color, "size": 18 },
        },
        "xaxis": axis("Free Districts"),
        "yaxis": axis("Extra Housing"),
        "paper_bgcolor": cfg.bg_color,
        "plot_bgcolor": cfg.bg_color,
        "margin": { "t": 50, "r": 100, "b": 60, "l": 80 },
        "annotations": annotations(grid, cfg),
    })
}

fn annotations(grid: &Grid, cfg: &FigureConfig) -> Vec<Value> {
    if !cfg.show_capacity {
        return Vec::new();
    }

    let mut annotations = Vec::with_capacity(grid.hous_axis.len() * grid.dist_axis.len());
    for (hous, text_row) in grid.hous_axis.iter().zip(&grid.capacity_text) {
        for (dist, text) in grid.dist_axis.iter().zip(text_row) {
            annotations.push(json!({
                "x": dist,
                "y": hous,
                "text": text,
                "font": { "size": 9, "color": cfg.font_color },
                "showarrow": false,
            }));
        }
    }
    annotations
}

/// Evenly spaced color stops from 0.0 to 1.0.
fn colorscale(palette: &[String]) -> Vec<(f64, &str)> {
    let n_stops = palette.len().max(2) - 1;
    palette
        .iter()
        .enumerate()
        .map(|(i_color, color)| (i_color as f64 / n_stops as f64, color.as_str()))
        .collect()
}

/// Multiples of `tick_step` up to the growth ceiling.
fn tick_vals(tick_step: f64) -> Vec<f64> {
    let n_ticks = (GROWTH_CEILING / tick_step + 1e-9).floor() as usize;
    (1..=n_ticks).map(|i_tick| i_tick as f64 * tick_step).collect()
}
