use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub text_color: String,
    pub axis_color: String,
    pub tooltip_background: String,
    pub tooltip_text_color: String,
    /// Diverging cell palette, cool (low) to warm (high). Bucket count of
    /// the color scale follows its length.
    pub palette: Vec<String>,
}

impl Theme {
    pub fn spectral() -> Self {
        Self {
            font_family: "\"Helvetica Neue\", Arial, sans-serif".to_string(),
            font_size: 12.0,
            background: "#FFFFFF".to_string(),
            text_color: "#333333".to_string(),
            axis_color: "#333333".to_string(),
            tooltip_background: "#333333".to_string(),
            tooltip_text_color: "#FFFFFF".to_string(),
            palette: vec![
                "#5e4fa2".to_string(),
                "#3288bd".to_string(),
                "#66c2a5".to_string(),
                "#abdda4".to_string(),
                "#e6f598".to_string(),
                "#ffffbf".to_string(),
                "#fee08b".to_string(),
                "#fdae61".to_string(),
                "#f46d43".to_string(),
                "#d53e4f".to_string(),
                "#9e0142".to_string(),
            ],
        }
    }

    pub fn cool_warm() -> Self {
        Self {
            palette: vec![
                "#313695".to_string(),
                "#4575b4".to_string(),
                "#74add1".to_string(),
                "#abd9e9".to_string(),
                "#e0f3f8".to_string(),
                "#ffffbf".to_string(),
                "#fee090".to_string(),
                "#fdae61".to_string(),
                "#f46d43".to_string(),
                "#d73027".to_string(),
                "#a50026".to_string(),
            ],
            ..Self::spectral()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::spectral()
    }
}
