#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod fetch;
pub mod layout;
pub mod layout_dump;
pub mod render;
pub mod scale;
pub mod theme;
pub mod tooltip;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{ChartConfig, Config};
pub use dataset::{MonthlyReading, TemperatureSeries};
pub use error::{Error, Result};
pub use layout::{HeatmapLayout, compute_layout};
pub use render::{render_html, render_svg};
pub use theme::Theme;
