use serde::Serialize;

use crate::config::ChartConfig;
use crate::dataset::{MONTH_NAMES, TemperatureSeries};
use crate::error::Result;
use crate::scale::{QuantileScale, TimeScale, jan1, year_ticks};
use crate::theme::Theme;

/// One grid rectangle for a single (year, month) reading, fully positioned
/// and colored.
#[derive(Debug, Clone, Serialize)]
pub struct CellLayout {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: String,
    pub year: i32,
    pub month: u32,
    pub variance: f32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthLabel {
    pub name: &'static str,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct AxisTick {
    pub year: i32,
    pub x: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegendSwatch {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeatmapLayout {
    pub width: f32,
    pub height: f32,
    pub base_temperature: f32,
    pub min_year: i32,
    pub max_year: i32,
    pub rect_width: f32,
    pub rect_height: f32,
    pub cells: Vec<CellLayout>,
    pub month_labels: Vec<MonthLabel>,
    pub axis_y: f32,
    pub axis_x0: f32,
    pub axis_x1: f32,
    pub ticks: Vec<AxisTick>,
    pub x_axis_title: String,
    pub x_axis_title_x: f32,
    pub x_axis_title_y: f32,
    pub y_axis_title: String,
    /// Position along the rotated (-90°) axis.
    pub y_axis_title_x: f32,
    pub y_axis_title_y: f32,
    pub legend: Vec<LegendSwatch>,
    pub legend_label_y: f32,
}

impl HeatmapLayout {
    /// Point-in-rect hit test in chart coordinates; the tooltip controller
    /// resolves pointer positions through this.
    pub fn cell_at(&self, x: f32, y: f32) -> Option<&CellLayout> {
        self.cells.iter().find(|cell| {
            x >= cell.x && x < cell.x + cell.width && y >= cell.y && y < cell.y + cell.height
        })
    }
}

pub fn compute_layout(
    series: &TemperatureSeries,
    theme: &Theme,
    config: &ChartConfig,
) -> Result<HeatmapLayout> {
    config.validate()?;
    let (min_year, max_year) = series.year_range()?;
    let year_count = (max_year - min_year + 1) as f32;
    let rect_height = config.inner_height() / MONTH_NAMES.len() as f32;
    let rect_width = config.inner_width() / year_count;

    let time_scale = TimeScale::new(
        (jan1(min_year), jan1(max_year)),
        (config.margin.left, config.width - config.margin.right),
    );
    let colors = QuantileScale::from_samples(&series.temperatures(), &theme.palette)?;

    let cells = series
        .monthly_variance
        .iter()
        .map(|reading| {
            let temperature = series.temperature(reading);
            CellLayout {
                x: time_scale.year_position(reading.year),
                y: reading.month.saturating_sub(1) as f32 * rect_height + config.margin.top,
                width: rect_width,
                height: rect_height,
                color: colors.color(temperature).to_string(),
                year: reading.year,
                month: reading.month,
                variance: reading.variance,
                temperature,
            }
        })
        .collect();

    let month_labels = MONTH_NAMES
        .iter()
        .enumerate()
        .map(|(row, &name)| MonthLabel {
            name,
            x: config.margin.left,
            y: config.margin.top + row as f32 * rect_height + rect_height / 2.0,
        })
        .collect();

    let ticks = year_ticks(min_year, max_year, config.axis_tick_target)
        .into_iter()
        .map(|year| AxisTick {
            year,
            x: time_scale.year_position(year),
        })
        .collect();

    let (domain_lo, _) = series.temperature_domain()?;
    let legend = legend_swatches(&colors, domain_lo, rect_height, config);
    let legend_label_y = config.height - config.margin.bottom / 2.0 + rect_height;

    Ok(HeatmapLayout {
        width: config.width,
        height: config.height,
        base_temperature: series.base_temperature,
        min_year,
        max_year,
        rect_width,
        rect_height,
        cells,
        month_labels,
        axis_y: config.height - config.margin.bottom,
        axis_x0: config.margin.left,
        axis_x1: config.width - config.margin.right,
        ticks,
        x_axis_title: "Years".to_string(),
        x_axis_title_x: config.width / 2.0,
        x_axis_title_y: config.height - config.margin.bottom / 1.5,
        y_axis_title: "Months".to_string(),
        y_axis_title_x: -((config.height - config.margin.bottom) / 2.0),
        y_axis_title_y: config.margin.left / 2.0,
        legend,
        legend_label_y,
    })
}

/// One swatch per palette color, left-to-right ending at the right margin.
/// The first label is the lower bound of the color domain; the rest are the
/// quantile boundaries.
fn legend_swatches(
    scale: &QuantileScale,
    domain_lo: f32,
    rect_height: f32,
    config: &ChartConfig,
) -> Vec<LegendSwatch> {
    let palette = scale.palette();
    let origin = config.width - config.legend_swatch * palette.len() as f32 - config.margin.right;
    let y = config.height - config.margin.bottom / 2.0;

    let mut bounds = Vec::with_capacity(palette.len());
    bounds.push(domain_lo);
    bounds.extend_from_slice(scale.quantiles());

    palette
        .iter()
        .zip(&bounds)
        .enumerate()
        .map(|(i, (color, bound))| LegendSwatch {
            x: origin + config.legend_swatch * i as f32,
            y,
            width: config.legend_swatch,
            height: rect_height / 2.0,
            color: color.clone(),
            label: format_boundary(*bound),
        })
        .collect()
}

/// Boundary labels truncate toward negative infinity to one decimal place.
pub fn format_boundary(value: f32) -> String {
    format!("{}", (value * 10.0).floor() / 10.0)
}
