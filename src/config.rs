use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    pub width: f32,
    pub height: f32,
    pub margin: Margins,
    /// Width of one legend swatch.
    pub legend_swatch: f32,
    /// Rough tick count the bottom axis aims for.
    pub axis_tick_target: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 550.0,
            margin: Margins {
                top: 30.0,
                right: 50.0,
                bottom: 120.0,
                left: 80.0,
            },
            legend_swatch: 35.0,
            axis_tick_target: 10,
        }
    }
}

impl ChartConfig {
    pub fn inner_width(&self) -> f32 {
        self.width - self.margin.left - self.margin.right
    }

    pub fn inner_height(&self) -> f32 {
        self.height - self.margin.top - self.margin.bottom
    }

    /// Geometry preconditions are checked here, at configuration time, so
    /// layout arithmetic never has to re-check them.
    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.height.is_finite()) {
            return Err(Error::InvalidConfig(
                "chart dimensions must be finite".to_string(),
            ));
        }
        if self.inner_width() <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "margins {} + {} leave no horizontal room in width {}",
                self.margin.left, self.margin.right, self.width
            )));
        }
        if self.inner_height() <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "margins {} + {} leave no vertical room in height {}",
                self.margin.top, self.margin.bottom, self.height
            )));
        }
        if self.legend_swatch <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "legend swatch width {} must be positive",
                self.legend_swatch
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub chart: ChartConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    chart: Option<ChartOverrides>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    text_color: Option<String>,
    background: Option<String>,
    palette: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartOverrides {
    width: Option<f32>,
    height: Option<f32>,
    margin_top: Option<f32>,
    margin_right: Option<f32>,
    margin_bottom: Option<f32>,
    margin_left: Option<f32>,
    legend_swatch: Option<f32>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "coolwarm" || theme_name == "cool-warm" {
            config.theme = Theme::cool_warm();
        } else if theme_name == "spectral" || theme_name == "default" {
            config.theme = Theme::spectral();
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
        if let Some(v) = vars.palette {
            config.theme.palette = v;
        }
    }

    if let Some(chart) = parsed.chart {
        if let Some(v) = chart.width {
            config.chart.width = v;
        }
        if let Some(v) = chart.height {
            config.chart.height = v;
        }
        if let Some(v) = chart.margin_top {
            config.chart.margin.top = v;
        }
        if let Some(v) = chart.margin_right {
            config.chart.margin.right = v;
        }
        if let Some(v) = chart.margin_bottom {
            config.chart.margin.bottom = v;
        }
        if let Some(v) = chart.margin_left {
            config.chart.margin.left = v;
        }
        if let Some(v) = chart.legend_swatch {
            config.chart.legend_swatch = v;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_geometry_matches_reference_chart() {
        let chart = ChartConfig::default();
        assert_eq!(chart.inner_width(), 770.0);
        assert_eq!(chart.inner_height(), 400.0);
        chart.validate().expect("default config must be valid");
    }

    #[test]
    fn oversized_margins_fail_validation() {
        let chart = ChartConfig {
            width: 100.0,
            ..ChartConfig::default()
        };
        assert!(matches!(chart.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn config_file_overrides_merge_over_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r##"{{
                "theme": "coolwarm",
                "themeVariables": {{"fontSize": 14.0, "textColor": "#222222"}},
                "chart": {{"width": 1200.0, "marginLeft": 100.0}}
            }}"##
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.theme.font_size, 14.0);
        assert_eq!(config.theme.text_color, "#222222");
        assert_eq!(config.theme.palette[0], "#313695");
        assert_eq!(config.chart.width, 1200.0);
        assert_eq!(config.chart.margin.left, 100.0);
        assert_eq!(config.chart.height, 550.0);
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.chart.width, 900.0);
        assert_eq!(config.theme.palette.len(), 11);
    }
}
