use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::config::load_config;
use crate::dataset::TemperatureSeries;
use crate::fetch::{DEFAULT_DATASET_URL, fetch_series};
use crate::layout::compute_layout;
use crate::layout_dump::write_layout_dump;
use crate::render::{render_error_svg, render_html, render_svg, write_output_text};

#[derive(Parser, Debug)]
#[command(
    name = "thermomap",
    version,
    about = "Temperature-anomaly heatmap renderer"
)]
pub struct Args {
    /// Input dataset JSON file or '-' for stdin. Fetched from --url when omitted.
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Dataset URL used when no input file is given
    #[arg(long = "url", default_value = DEFAULT_DATASET_URL)]
    pub url: String,

    /// Output file (svg/html/png). Defaults to stdout for svg/html if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme variables and chart geometry)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Page title for HTML output
    #[arg(long = "title", default_value = "Monthly Global Land-Surface Temperature")]
    pub title: String,

    /// Chart width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Chart height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Write the computed layout as JSON for debugging
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Html,
    Png,
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.chart.width = width;
    }
    if let Some(height) = args.height {
        config.chart.height = height;
    }
    config.chart.validate()?;

    let series = match load_series(args.input.as_deref(), &args.url) {
        Ok(series) => series,
        Err(err) => {
            // A failed load still produces a visible artifact when an output
            // path was requested.
            if let Some(path) = args.output.as_deref() {
                let card = render_error_svg(&err.to_string(), &config.chart, &config.theme);
                if let Err(write_err) = std::fs::write(path, card) {
                    tracing::warn!(error = %write_err, "failed to write error card");
                }
            }
            return Err(err.into());
        }
    };
    tracing::info!(
        readings = series.monthly_variance.len(),
        base = %series.base_temperature,
        "dataset loaded"
    );

    let layout = compute_layout(&series, &config.theme, &config.chart)?;
    if let Some(path) = args.dump_layout.as_deref() {
        write_layout_dump(path, &layout)?;
    }

    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(&layout, &config.theme);
            write_output_text(&svg, args.output.as_deref())?;
        }
        OutputFormat::Html => {
            let html = render_html(&layout, &config.theme, &args.title);
            write_output_text(&html, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            #[cfg(feature = "png")]
            {
                let svg = render_svg(&layout, &config.theme);
                let output = ensure_output(&args.output)?;
                crate::render::write_output_png(&svg, &output, &config.chart)?;
            }
            #[cfg(not(feature = "png"))]
            return Err(anyhow::anyhow!(
                "png output requires building with the 'png' feature"
            ));
        }
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .try_init();
}

fn load_series(input: Option<&Path>, url: &str) -> crate::error::Result<TemperatureSeries> {
    match input {
        Some(path) if path == Path::new("-") => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            TemperatureSeries::from_json(&buf)
        }
        Some(path) => {
            let contents = std::fs::read_to_string(path)?;
            TemperatureSeries::from_json(&contents)
        }
        None => fetch_series(url),
    }
}

#[cfg(feature = "png")]
fn ensure_output(output: &Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for png output"))
}
