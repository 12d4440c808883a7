use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::layout::HeatmapLayout;

/// Serialized snapshot of a computed layout for debugging and diffing.
#[derive(Debug, Serialize)]
pub struct LayoutDump<'a> {
    pub cell_count: usize,
    pub year_span: i32,
    #[serde(flatten)]
    pub layout: &'a HeatmapLayout,
}

impl<'a> LayoutDump<'a> {
    pub fn from_layout(layout: &'a HeatmapLayout) -> Self {
        Self {
            cell_count: layout.cells.len(),
            year_span: layout.max_year - layout.min_year + 1,
            layout,
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &HeatmapLayout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &LayoutDump::from_layout(layout))?;
    Ok(())
}
