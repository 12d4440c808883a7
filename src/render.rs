use anyhow::Result;
use std::path::Path;

use crate::config::ChartConfig;
use crate::layout::HeatmapLayout;
use crate::theme::Theme;
use crate::tooltip::{self, POINTER_OFFSET_X, VISIBLE_OPACITY};

pub fn render_svg(layout: &HeatmapLayout, theme: &Theme) -> String {
    let mut svg = String::new();
    let width = layout.width;
    let height = layout.height;

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    svg.push_str(&cells_svg(layout));
    svg.push_str(&month_labels_svg(layout, theme));
    svg.push_str(&axis_svg(layout, theme));
    svg.push_str(&axis_titles_svg(layout, theme));
    svg.push_str(&legend_svg(layout, theme));

    svg.push_str("</svg>");
    svg
}

fn cells_svg(layout: &HeatmapLayout) -> String {
    let mut out = String::new();
    for cell in &layout.cells {
        out.push_str(&format!(
            "<rect class=\"cell\" x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\" data-label=\"{}\" data-temp=\"{}\" data-variance=\"{}\"/>",
            cell.x,
            cell.y,
            cell.width,
            cell.height,
            cell.color,
            escape_xml(&tooltip::cell_title(cell)),
            cell.temperature,
            cell.variance
        ));
    }
    out
}

fn month_labels_svg(layout: &HeatmapLayout, theme: &Theme) -> String {
    let mut out = String::new();
    for label in &layout.month_labels {
        out.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"end\" dominant-baseline=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            label.x,
            label.y,
            theme.font_family,
            theme.font_size,
            theme.text_color,
            escape_xml(label.name)
        ));
    }
    out
}

fn axis_svg(layout: &HeatmapLayout, theme: &Theme) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"1\"/>",
        layout.axis_x0, layout.axis_y, layout.axis_x1, layout.axis_y, theme.axis_color
    ));
    for tick in &layout.ticks {
        out.push_str(&format!(
            "<line x1=\"{x:.2}\" y1=\"{y0:.2}\" x2=\"{x:.2}\" y2=\"{y1:.2}\" stroke=\"{}\" stroke-width=\"1\"/>",
            theme.axis_color,
            x = tick.x,
            y0 = layout.axis_y,
            y1 = layout.axis_y + 6.0
        ));
        out.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            tick.x,
            layout.axis_y + 20.0,
            theme.font_family,
            theme.font_size,
            theme.text_color,
            tick.year
        ));
    }
    out
}

fn axis_titles_svg(layout: &HeatmapLayout, theme: &Theme) -> String {
    let title_size = theme.font_size * 1.25;
    let mut out = String::new();
    out.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        layout.x_axis_title_x,
        layout.x_axis_title_y,
        theme.font_family,
        title_size,
        theme.text_color,
        escape_xml(&layout.x_axis_title)
    ));
    out.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" transform=\"rotate(-90)\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        layout.y_axis_title_x,
        layout.y_axis_title_y,
        theme.font_family,
        title_size,
        theme.text_color,
        escape_xml(&layout.y_axis_title)
    ));
    out
}

fn legend_svg(layout: &HeatmapLayout, theme: &Theme) -> String {
    let mut out = String::new();
    for swatch in &layout.legend {
        out.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"/>",
            swatch.x, swatch.y, swatch.width, swatch.height, swatch.color
        ));
        out.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            swatch.x + 10.0,
            layout.legend_label_y,
            theme.font_family,
            theme.font_size,
            theme.text_color,
            escape_xml(&swatch.label)
        ));
    }
    out
}

/// Standalone page: header card, embedded chart, floating tooltip element
/// and the hover script driving it from the cells' data attributes.
pub fn render_html(layout: &HeatmapLayout, theme: &Theme, title: &str) -> String {
    let svg = render_svg(layout, theme);
    let css = page_css(theme);
    let js = tooltip_js();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
    <div class="card">
        <div class="title">{title}</div>
        <div class="subtitle">{min_year} - {max_year}</div>
        <div class="details">Temperatures are in Celsius and reported as anomalies relative to the Jan 1951-Dec 1980 average.</div>
        <div class="details">Estimated Jan 1951-Dec 1980 absolute temperature &#8451;: {base}</div>
        <div class="chart">
{svg}
        </div>
    </div>
    <div id="tooltip" class="tooltip"></div>
    <script>
{js}
    </script>
</body>
</html>"#,
        title = escape_xml(title),
        min_year = layout.min_year,
        max_year = layout.max_year,
        base = layout.base_temperature,
        css = css,
        svg = svg,
        js = js,
    )
}

fn page_css(theme: &Theme) -> String {
    format!(
        r#"        body {{
            margin: 0;
            font-family: {font};
            background: {background};
            color: {text};
        }}
        .card {{
            width: fit-content;
            margin: 24px auto;
            text-align: center;
        }}
        .title {{
            font-size: 24px;
            font-weight: 600;
        }}
        .subtitle {{
            font-size: 18px;
            margin-bottom: 8px;
        }}
        .details {{
            font-size: 12px;
            color: #666666;
        }}
        .chart {{
            margin-top: 12px;
        }}
        .tooltip {{
            position: fixed;
            background: {tooltip_bg};
            color: {tooltip_text};
            padding: 8px 10px;
            border-radius: 4px;
            font-size: 12px;
            pointer-events: none;
            opacity: 0;
            transition: opacity 0.2s;
        }}
        .tooltip.visible {{
            opacity: {opacity};
        }}"#,
        font = theme.font_family,
        background = theme.background,
        text = theme.text_color,
        tooltip_bg = theme.tooltip_background,
        tooltip_text = theme.tooltip_text_color,
        opacity = VISIBLE_OPACITY,
    )
}

/// Mirrors TooltipController: enter shows, move re-anchors at the explicit
/// pointer coordinates, leave hides.
fn tooltip_js() -> String {
    format!(
        r#"        const tooltip = document.getElementById('tooltip');

        document.querySelectorAll('.cell').forEach(cell => {{
            cell.addEventListener('mouseenter', () => {{
                tooltip.innerHTML = `<strong>${{cell.dataset.label}}<br>${{cell.dataset.temp}}&#176;C</strong><br>${{cell.dataset.variance}}&#176;C`;
                tooltip.classList.add('visible');
            }});

            cell.addEventListener('mousemove', (event) => {{
                tooltip.style.left = (event.clientX + {offset}) + 'px';
                tooltip.style.top = event.clientY + 'px';
            }});

            cell.addEventListener('mouseleave', () => {{
                tooltip.classList.remove('visible');
            }});
        }});"#,
        offset = POINTER_OFFSET_X,
    )
}

/// Small stand-in chart naming the failure; written to the requested output
/// when the dataset never made it to the layout stage.
pub fn render_error_svg(message: &str, config: &ChartConfig, theme: &Theme) -> String {
    let width = config.width.max(200.0);
    let height = config.height.max(200.0);
    let center_x = width / 2.0;
    let center_y = height / 2.0;
    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));
    svg.push_str(&format!(
        "<text x=\"{center_x:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">Unable to render heatmap</text>",
        center_y - theme.font_size,
        theme.font_family,
        theme.font_size * 1.5,
        theme.text_color
    ));
    svg.push_str(&format!(
        "<text x=\"{center_x:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        center_y + theme.font_size,
        theme.font_family,
        theme.font_size,
        theme.text_color,
        escape_xml(message)
    ));
    svg.push_str("</svg>");
    svg
}

pub fn write_output_text(contents: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, contents)?;
        }
        None => {
            print!("{}", contents);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, config: &ChartConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.default_size = usvg::Size::from_wh(config.width, config.height)
        .unwrap_or(usvg::Size::from_wh(900.0, 550.0).unwrap());

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartConfig;
    use crate::dataset::{MonthlyReading, TemperatureSeries};
    use crate::layout::compute_layout;

    fn series() -> TemperatureSeries {
        TemperatureSeries {
            base_temperature: 8.66,
            monthly_variance: vec![
                MonthlyReading {
                    year: 1900,
                    month: 1,
                    variance: -0.5,
                },
                MonthlyReading {
                    year: 2000,
                    month: 6,
                    variance: 1.2,
                },
            ],
        }
    }

    #[test]
    fn render_svg_basic() {
        let theme = Theme::spectral();
        let layout = compute_layout(&series(), &theme, &ChartConfig::default()).unwrap();
        let svg = render_svg(&layout, &theme);
        assert!(svg.contains("<svg"));
        assert!(svg.contains("class=\"cell\""));
        assert!(svg.contains("data-label=\"1900 - January\""));
        assert!(svg.contains("data-temp=\"8.16\""));
        assert!(svg.contains("data-variance=\"-0.5\""));
        assert!(svg.contains(">January<"));
        assert!(svg.contains(">Years<"));
        assert!(svg.contains(">Months<"));
    }

    #[test]
    fn render_svg_legend_swatches() {
        let theme = Theme::spectral();
        let layout = compute_layout(&series(), &theme, &ChartConfig::default()).unwrap();
        let svg = render_svg(&layout, &theme);
        for color in &theme.palette {
            assert!(svg.contains(color.as_str()), "missing swatch {color}");
        }
    }

    #[test]
    fn render_svg_is_deterministic() {
        let theme = Theme::spectral();
        let layout = compute_layout(&series(), &theme, &ChartConfig::default()).unwrap();
        assert_eq!(render_svg(&layout, &theme), render_svg(&layout, &theme));
    }

    #[test]
    fn render_html_page() {
        let theme = Theme::spectral();
        let layout = compute_layout(&series(), &theme, &ChartConfig::default()).unwrap();
        let html = render_html(&layout, &theme, "Monthly Global Land-Surface Temperature");
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("Monthly Global Land-Surface Temperature"));
        assert!(html.contains("1900 - 2000"));
        assert!(html.contains("id=\"tooltip\""));
        assert!(html.contains("mouseenter"));
        assert!(html.contains("mouseleave"));
        assert!(html.contains("<svg"));
    }

    #[test]
    fn error_card_names_the_failure() {
        let svg = render_error_svg(
            "dataset contains no monthly readings",
            &ChartConfig::default(),
            &Theme::spectral(),
        );
        assert!(svg.contains("Unable to render heatmap"));
        assert!(svg.contains("dataset contains no monthly readings"));
    }

    #[test]
    fn escapes_markup_in_text() {
        assert_eq!(escape_xml("a<b&c"), "a&lt;b&amp;c");
    }

    #[test]
    fn write_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        write_output_text("<svg/>", Some(&path)).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<svg/>");
    }
}
