// Grid layout domain model

/// Number of columns on the dashboard canvas.
pub const GRID_COLUMNS: u32 = 24;

/// A panel's rectangle on the canvas, in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPos {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl GridPos {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Describes why the rectangle does not fit the canvas, if it doesn't.
    pub fn check_bounds(&self) -> Result<(), String> {
        if self.w == 0 {
            return Err("width must be at least 1".to_string());
        }
        if self.w > GRID_COLUMNS {
            return Err(format!("width {} exceeds {} columns", self.w, GRID_COLUMNS));
        }
        if self.h == 0 {
            return Err("height must be at least 1".to_string());
        }
        // u64 so a huge x cannot wrap
        if u64::from(self.x) + u64::from(self.w) > u64::from(GRID_COLUMNS) {
            return Err(format!(
                "x {} + width {} exceeds {} columns",
                self.x, self.w, GRID_COLUMNS
            ));
        }
        Ok(())
    }

    pub fn overlaps(&self, other: &GridPos) -> bool {
        let (ax2, ay2) = (u64::from(self.x) + u64::from(self.w), u64::from(self.y) + u64::from(self.h));
        let (bx2, by2) = (u64::from(other.x) + u64::from(other.w), u64::from(other.y) + u64::from(other.h));

        u64::from(self.x) < bx2
            && u64::from(other.x) < ax2
            && u64::from(self.y) < by2
            && u64::from(other.y) < ay2
    }
}
