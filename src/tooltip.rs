use crate::dataset::month_name;
use crate::layout::CellLayout;

pub const VISIBLE_OPACITY: f32 = 0.9;
pub const HIDDEN_OPACITY: f32 = 0.0;

/// Horizontal gap between the pointer and the tooltip box.
pub const POINTER_OFFSET_X: f32 = 12.0;

/// First tooltip line, shared with the HTML renderer's cell labels.
pub fn cell_title(cell: &CellLayout) -> String {
    format!("{} - {}", cell.year, month_name(cell.month))
}

/// Full tooltip text: title, absolute temperature, variance.
pub fn cell_text(cell: &CellLayout) -> String {
    format!(
        "{}\n{}°C\n{}°C",
        cell_title(cell),
        cell.temperature,
        cell.variance
    )
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum TooltipState {
    #[default]
    Hidden,
    Visible { x: f32, y: f32, text: String },
}

/// The single floating annotation element. Two states, no queuing; rapid
/// enter/leave across adjacent cells simply rewrites the state.
#[derive(Debug, Default)]
pub struct TooltipController {
    state: TooltipState,
}

impl TooltipController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer entered a cell; coordinates are passed explicitly by the
    /// event source.
    pub fn pointer_enter(&mut self, cell: &CellLayout, pointer_x: f32, pointer_y: f32) {
        self.state = TooltipState::Visible {
            x: pointer_x + POINTER_OFFSET_X,
            y: pointer_y,
            text: cell_text(cell),
        };
    }

    /// Pointer moved while over a cell; only the anchor follows.
    pub fn pointer_move(&mut self, pointer_x: f32, pointer_y: f32) {
        if let TooltipState::Visible { x, y, .. } = &mut self.state {
            *x = pointer_x + POINTER_OFFSET_X;
            *y = pointer_y;
        }
    }

    pub fn pointer_leave(&mut self) {
        self.state = TooltipState::Hidden;
    }

    pub fn state(&self) -> &TooltipState {
        &self.state
    }

    pub fn opacity(&self) -> f32 {
        match self.state {
            TooltipState::Hidden => HIDDEN_OPACITY,
            TooltipState::Visible { .. } => VISIBLE_OPACITY,
        }
    }
}
