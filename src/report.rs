use std::fmt::Write;

use crate::table::{Decision, LookupTable};

/// Per-class decision counts over the table entries. Padding pixels never
/// enter these numbers; the four counts always sum to the entry count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub up: usize,
    pub stay: usize,
    pub down: usize,
    pub invalid: usize,
    pub total: usize,
}

impl Stats {
    pub fn collect(table: &LookupTable) -> Self {
        let mut stats = Self {
            up: 0,
            stay: 0,
            down: 0,
            invalid: 0,
            total: table.len(),
        };
        for decision in table.decisions() {
            match decision {
                Decision::Up => stats.up += 1,
                Decision::Stay => stats.stay += 1,
                Decision::Down => stats.down += 1,
                Decision::Invalid(_) => stats.invalid += 1,
            }
        }
        stats
    }

    /// Share of the total as a percentage, one decimal.
    pub fn percent(&self, count: usize) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (count as f64 / self.total as f64 * 1000.0).round() / 10.0
    }

    /// Every single entry is "stay". Usually means the generator fed the
    /// model inputs normalized differently than during training.
    pub fn is_degenerate(&self) -> bool {
        self.total > 0 && self.stay == self.total
    }
}

pub const DEGENERATE_HINT: &str = "every decision in the table is \"stay\"; \
the generator's input normalization likely does not match the model it \
queried. Retrain the model or regenerate the table upstream.";

/// Human-readable statistics block, written to stdout on success and
/// embedded in the HTML output.
pub fn summary(stats: &Stats, side: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "AI decision statistics:");
    let _ = writeln!(
        out,
        "  up (white):   {:>9} ({:.1}%)",
        stats.up,
        stats.percent(stats.up)
    );
    let _ = writeln!(
        out,
        "  stay (gray):  {:>9} ({:.1}%)",
        stats.stay,
        stats.percent(stats.stay)
    );
    let _ = writeln!(
        out,
        "  down (black): {:>9} ({:.1}%)",
        stats.down,
        stats.percent(stats.down)
    );
    if stats.invalid > 0 {
        let _ = writeln!(
            out,
            "  invalid (magenta): {:>4} ({:.1}%)",
            stats.invalid,
            stats.percent(stats.invalid)
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Legend:");
    let _ = writeln!(out, "  white     = move paddle up");
    let _ = writeln!(out, "  gray      = stay in place");
    let _ = writeln!(out, "  black     = move paddle down");
    let _ = writeln!(out, "  magenta   = invalid table entry");
    let _ = writeln!(out, "  dark gray = unused space (padding)");
    let _ = writeln!(out);
    let total_pixels = side * side;
    let _ = write!(
        out,
        "Image: {side}x{side} pixels, {}/{} covered ({:.1}%)",
        stats.total,
        total_pixels,
        stats.total as f64 / total_pixels as f64 * 100.0
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{LookupTable, TableFormat, RAW_DIMS};

    fn raw_table(bytes: Vec<u8>) -> LookupTable {
        LookupTable::from_bytes(TableFormat::Raw, &bytes).unwrap()
    }

    #[test]
    fn counts_sum_to_entry_count() {
        let n = RAW_DIMS.entries();
        let bytes: Vec<u8> = (0..n).map(|i| (i % 5) as u8).collect();
        let stats = Stats::collect(&raw_table(bytes));
        assert_eq!(stats.up + stats.stay + stats.down + stats.invalid, n);
        assert!(stats.invalid > 0);
    }

    #[test]
    fn all_stay_table_is_degenerate() {
        let n = RAW_DIMS.entries();
        let stats = Stats::collect(&raw_table(vec![1; n]));
        assert_eq!(stats.stay, n);
        assert_eq!(stats.up, 0);
        assert_eq!(stats.down, 0);
        assert!(stats.is_degenerate());
        assert_eq!(stats.percent(stats.stay), 100.0);
    }

    #[test]
    fn cyclic_table_splits_into_thirds() {
        let n = RAW_DIMS.entries();
        let bytes: Vec<u8> = (0..n).map(|i| (i % 3) as u8).collect();
        let stats = Stats::collect(&raw_table(bytes));
        let floor = n / 3;
        for count in [stats.up, stats.stay, stats.down] {
            assert!(count == floor || count == floor + 1);
        }
        assert_eq!(stats.up + stats.stay + stats.down, n);
        assert_eq!(stats.invalid, 0);
        assert!(!stats.is_degenerate());
    }

    #[test]
    fn nearly_uniform_table_is_not_degenerate() {
        use crate::raster::{Canvas, DOWN_COLOR, STAY_COLOR, UP_COLOR};
        // First three entries 0,1,2 then all 1s: one short of degenerate.
        let n = RAW_DIMS.entries();
        let mut bytes = vec![1u8; n];
        bytes[0] = 0;
        bytes[1] = 1;
        bytes[2] = 2;
        let table = raw_table(bytes);
        let stats = Stats::collect(&table);
        assert_eq!(stats.stay, 2_540_158);
        assert_eq!(stats.up, 1);
        assert_eq!(stats.down, 1);
        assert!(!stats.is_degenerate());
        let canvas = Canvas::render(&table);
        assert_eq!(canvas.side(), 1594);
        assert_eq!(canvas.pixel(0), UP_COLOR);
        assert_eq!(canvas.pixel(1), STAY_COLOR);
        assert_eq!(canvas.pixel(2), DOWN_COLOR);
    }

    #[test]
    fn summary_reports_counts_and_legend() {
        let n = RAW_DIMS.entries();
        let mut bytes = vec![1u8; n];
        bytes[0] = 0;
        bytes[2] = 2;
        let stats = Stats::collect(&raw_table(bytes));
        let text = summary(&stats, 1594);
        assert!(text.contains("2540158 (100.0%)"));
        assert!(text.contains("1 (0.0%)"));
        assert!(text.contains("dark gray = unused space (padding)"));
        assert!(text.contains("1594x1594"));
        assert!(!text.contains("invalid (magenta)"));
    }
}
