/// Card width in pixels
pub const CARD_WIDTH: f32 = 300.0;
/// Card height in pixels
pub const CARD_HEIGHT: f32 = 160.0;
/// Cards per row
pub const ITEMS_PER_ROW: usize = 3;
/// Horizontal distance between card origins
pub const COLUMN_PITCH: f32 = 320.0;
/// Vertical distance between card origins
pub const ROW_PITCH: f32 = 180.0;
/// Left margin of the grid
pub const MARGIN_X: f32 = 40.0;
/// Top of the "Your Library" grid
pub const LIBRARY_TOP: f32 = 150.0;
/// Gap between the library grid and the store grid
pub const SECTION_GAP: f32 = 50.0;

/// Point in window coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pos {
    pub x: f32,
    pub y: f32,
}

impl Pos {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Half-open containment, matching pixel hit-testing
    pub fn contains(&self, pos: Pos) -> bool {
        pos.x >= self.x
            && pos.x < self.x + self.width
            && pos.y >= self.y
            && pos.y < self.y + self.height
    }
}

/// Rectangle of the `index`-th card in a grid starting at `top`
pub fn card_rect(top: f32, index: usize) -> Rect {
    let column = index % ITEMS_PER_ROW;
    let row = index / ITEMS_PER_ROW;
    Rect {
        x: MARGIN_X + column as f32 * COLUMN_PITCH,
        y: top + row as f32 * ROW_PITCH,
        width: CARD_WIDTH,
        height: CARD_HEIGHT,
    }
}

/// Number of grid rows needed for `count` cards
pub fn rows_for(count: usize) -> usize {
    (count + ITEMS_PER_ROW - 1) / ITEMS_PER_ROW
}

/// Top of the store grid, below however many library rows there are
pub fn store_top(installed_count: usize) -> f32 {
    LIBRARY_TOP + rows_for(installed_count) as f32 * ROW_PITCH + SECTION_GAP
}
