use crate::table::{Decision, LookupTable};

/// An opaque RGB triple with a hex projection. The palette below is the only
/// place colors are defined; the PNG and HTML outputs both derive from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub [u8; 3]);

impl Color {
    pub fn hex(self) -> String {
        let [r, g, b] = self.0;
        format!("#{r:02X}{g:02X}{b:02X}")
    }
}

pub const UP_COLOR: Color = Color([255, 255, 255]);
pub const STAY_COLOR: Color = Color([128, 128, 128]);
pub const DOWN_COLOR: Color = Color([0, 0, 0]);
pub const INVALID_COLOR: Color = Color([255, 0, 255]);
pub const PADDING_COLOR: Color = Color([64, 64, 64]);

pub fn decision_color(decision: Decision) -> Color {
    match decision {
        Decision::Up => UP_COLOR,
        Decision::Stay => STAY_COLOR,
        Decision::Down => DOWN_COLOR,
        Decision::Invalid(_) => INVALID_COLOR,
    }
}

/// Square raster of side `ceil(sqrt(entries))`. Pixel `i` (row-major) holds
/// table entry `i`; pixels past the last entry are padding.
pub struct Canvas {
    side: usize,
    entries: usize,
    rgb: Vec<u8>,
}

impl Canvas {
    pub fn render(table: &LookupTable) -> Self {
        let entries = table.len();
        let side = side_for(entries);
        let mut rgb = Vec::with_capacity(side * side * 3);
        for decision in table.decisions() {
            rgb.extend_from_slice(&decision_color(decision).0);
        }
        for _ in entries..side * side {
            rgb.extend_from_slice(&PADDING_COLOR.0);
        }
        assert_eq!(rgb.len(), side * side * 3);
        Self { side, entries, rgb }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    /// Entry count, i.e. the number of non-padding pixels.
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Flat row-major RGB buffer, 3 bytes per pixel.
    pub fn rgb(&self) -> &[u8] {
        &self.rgb
    }

    pub fn pixel(&self, index: usize) -> Color {
        let at = index * 3;
        Color([self.rgb[at], self.rgb[at + 1], self.rgb[at + 2]])
    }

    /// The same raster as `#RRGGBB` strings, one per pixel, derived from the
    /// RGB buffer so the two output modes cannot drift apart.
    pub fn hex_pixels(&self) -> impl Iterator<Item = String> + '_ {
        self.rgb.chunks_exact(3).map(|p| Color([p[0], p[1], p[2]]).hex())
    }
}

/// Smallest `s` with `s * s >= entries`. Float sqrt is only a starting
/// guess; the loop makes the result exact.
fn side_for(entries: usize) -> usize {
    let mut side = (entries as f64).sqrt() as usize;
    while side * side < entries {
        side += 1;
    }
    side
}
