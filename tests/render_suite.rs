use std::path::Path;

use heatmap_renderer::{ChartConfig, TemperatureSeries, Theme, compute_layout, render_html,
    render_svg};

fn fixture_series() -> TemperatureSeries {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("global-temperature.json");
    let input = std::fs::read_to_string(path).expect("fixture read failed");
    TemperatureSeries::from_json(&input).expect("fixture parse failed")
}

fn assert_valid_svg(svg: &str) {
    assert!(svg.contains("<svg"), "missing <svg tag");
    assert!(svg.contains("</svg>"), "missing </svg tag");
}

#[test]
fn renders_fixture_to_svg() {
    let series = fixture_series();
    let theme = Theme::spectral();
    let config = ChartConfig::default();

    let layout = compute_layout(&series, &theme, &config).expect("layout failed");
    assert_eq!(layout.min_year, 1753);
    assert_eq!(layout.max_year, 2015);
    assert_eq!(layout.cells.len(), 60);
    assert_eq!(layout.legend.len(), theme.palette.len());

    let svg = render_svg(&layout, &theme);
    assert_valid_svg(&svg);
    assert_eq!(svg.matches("class=\"cell\"").count(), 60);
}

#[test]
fn fixture_scale_endpoints_hit_the_margins() {
    let series = fixture_series();
    let config = ChartConfig::default();
    let layout = compute_layout(&series, &Theme::spectral(), &config).expect("layout failed");

    let first_year_cells: Vec<_> = layout.cells.iter().filter(|c| c.year == 1753).collect();
    let last_year_cells: Vec<_> = layout.cells.iter().filter(|c| c.year == 2015).collect();
    assert!(first_year_cells.iter().all(|c| c.x == config.margin.left));
    assert!(
        last_year_cells
            .iter()
            .all(|c| c.x == config.width - config.margin.right)
    );
}

#[test]
fn fixture_extremes_take_the_palette_ends() {
    let series = fixture_series();
    let theme = Theme::spectral();
    let layout = compute_layout(&series, &theme, &ChartConfig::default()).expect("layout failed");

    // coldest reading: 1753 February, warmest: 2015 December
    let coldest = layout
        .cells
        .iter()
        .find(|c| c.year == 1753 && c.month == 2)
        .unwrap();
    let warmest = layout
        .cells
        .iter()
        .find(|c| c.year == 2015 && c.month == 12)
        .unwrap();
    assert_eq!(coldest.color, theme.palette[0]);
    assert_eq!(warmest.color, theme.palette[theme.palette.len() - 1]);
}

#[test]
fn renders_fixture_to_html_page() {
    let series = fixture_series();
    let theme = Theme::spectral();
    let layout = compute_layout(&series, &theme, &ChartConfig::default()).expect("layout failed");

    let html = render_html(&layout, &theme, "Monthly Global Land-Surface Temperature");
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("1753 - 2015"));
    assert!(html.contains("8.66"));
    assert!(html.contains("id=\"tooltip\""));
    assert!(html.contains("mousemove"));
}

#[test]
fn rendering_twice_is_identical() {
    let series = fixture_series();
    let theme = Theme::spectral();
    let config = ChartConfig::default();

    let first = render_svg(&compute_layout(&series, &theme, &config).unwrap(), &theme);
    let second = render_svg(&compute_layout(&series, &theme, &config).unwrap(), &theme);
    assert_eq!(first, second);
}

#[test]
fn cool_warm_theme_renders_its_own_palette() {
    let series = fixture_series();
    let theme = Theme::cool_warm();
    let layout = compute_layout(&series, &theme, &ChartConfig::default()).expect("layout failed");
    let svg = render_svg(&layout, &theme);
    assert_valid_svg(&svg);
    assert!(svg.contains("#313695"));
    assert!(!svg.contains("#5e4fa2"));
}
