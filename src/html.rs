use crate::raster::Canvas;
use crate::report::Stats;
use crate::table::{Decision, LookupTable};

const STYLE: &str = "\
body { font-family: 'Courier New', monospace; margin: 20px; background: #f0f0f0; }
.container { max-width: 1200px; margin: 0 auto; background: white; padding: 20px; border-radius: 8px; }
h1 { color: #333; text-align: center; margin-bottom: 10px; }
.subtitle { text-align: center; color: #666; margin-bottom: 30px; }
#lut { border: 2px solid #333; display: block; margin: 20px auto; cursor: crosshair; }
.stats { display: flex; justify-content: space-around; margin: 20px 0; font-weight: bold; }
.stat-item { text-align: center; padding: 10px; border-radius: 5px; min-width: 120px; }
.up { background: #ffffff; border: 2px solid #ccc; }
.stay { background: #808080; color: white; }
.down { background: #000000; color: white; }
.invalid { background: #ff00ff; color: white; }
.info { background: #e8f4f8; padding: 15px; border-radius: 5px; margin: 20px 0; }
.warning { background: #fff3cd; border: 1px solid #ffeaa7; padding: 15px; border-radius: 5px; margin: 20px 0; }
.controls { text-align: center; margin: 20px 0; }
button { padding: 10px 20px; margin: 0 10px; border: none; border-radius: 5px; cursor: pointer; font-weight: bold; }
.btn-primary { background: #007bff; color: white; }
.btn-secondary { background: #6c757d; color: white; }
#mouseInfo { text-align: center; margin: 10px 0; background: #f8f9fa; padding: 10px; border-radius: 5px; }
#swatch { display: inline-block; width: 14px; height: 14px; border: 1px solid #333; vertical-align: middle; margin-left: 6px; }
";

// Placeholders are substituted below; the drawing is per-pixel fillRect with
// image smoothing disabled, so zoom never resamples.
const SCRIPT: &str = "\
const canvas = document.getElementById('lut');
const ctx = canvas.getContext('2d');
const mouseInfo = document.getElementById('mouseInfo');
const swatch = document.getElementById('swatch');
const side = __SIDE__;
const dims = __DIMS__;
const pixels = __PIXELS__;
const values = __VALUES__;
const names = __NAMES__;
const fitScale = Math.max(1, Math.min(800 / side, 600 / side));
let scale = fitScale;

function draw() {
    canvas.width = Math.ceil(side * scale);
    canvas.height = Math.ceil(side * scale);
    ctx.imageSmoothingEnabled = false;
    for (let y = 0; y < side; y++) {
        for (let x = 0; x < side; x++) {
            ctx.fillStyle = pixels[y * side + x];
            ctx.fillRect(x * scale, y * scale, scale, scale);
        }
    }
}

function zoomIn() { scale *= 1.5; draw(); }
function zoomOut() { scale /= 1.5; if (scale < 1) scale = 1; draw(); }
function resetZoom() { scale = fitScale; draw(); }

function savePng() {
    const link = document.createElement('a');
    link.download = 'ai_lut_visualization.png';
    link.href = canvas.toDataURL('image/png');
    link.click();
}

function coords(index) {
    const ay = index % dims[4]; index = Math.floor(index / dims[4]);
    const vy = index % dims[3]; index = Math.floor(index / dims[3]);
    const vx = index % dims[2]; index = Math.floor(index / dims[2]);
    const by = index % dims[1]; index = Math.floor(index / dims[1]);
    return [index, by, vx, vy, ay];
}

canvas.addEventListener('mousemove', (e) => {
    const rect = canvas.getBoundingClientRect();
    const x = Math.floor((e.clientX - rect.left) / scale);
    const y = Math.floor((e.clientY - rect.top) / scale);
    if (x < 0 || x >= side || y < 0 || y >= side) return;
    const index = y * side + x;
    swatch.style.background = pixels[index];
    if (index >= values.length) {
        mouseInfo.firstChild.textContent = 'Pixel (' + x + ', ' + y + ') = padding ' + pixels[index];
        return;
    }
    const value = values[index];
    const action = names[value] || 'INVALID';
    const state = coords(index);
    mouseInfo.firstChild.textContent = 'Pixel (' + x + ', ' + y + ') = ' + action
        + ' (' + value + ') ' + pixels[index]
        + ' | bx ' + state[0] + ', by ' + state[1] + ', vx ' + state[2]
        + ', vy ' + state[3] + ', ay ' + state[4];
});

draw();
";

/// Emits the whole interactive page as one self-contained document: pixel
/// colors and raw values inline, canvas drawing, zoom/reset/hover/save
/// controls, and the statistics and legend blocks.
pub fn render_document(table: &LookupTable, canvas: &Canvas, stats: &Stats) -> String {
    let side = canvas.side();
    let dims = table.dims();
    // Pixel array dominates the document; size the buffer for it up front.
    let mut doc = String::with_capacity(side * side * 10 + table.len() * 2 + 8192);

    doc.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    doc.push_str("<meta charset=\"UTF-8\">\n");
    doc.push_str("<title>AI Lookup Table Visualization</title>\n<style>\n");
    doc.push_str(STYLE);
    doc.push_str("</style>\n</head>\n<body>\n<div class=\"container\">\n");
    doc.push_str("<h1>AI Lookup Table Visualization</h1>\n");
    doc.push_str(&format!(
        "<div class=\"subtitle\">Pong neural network decision map<br>{side}&times;{side} pixels ({} AI decisions)</div>\n",
        stats.total
    ));
    doc.push_str(&format!(
        "<canvas id=\"lut\" width=\"{side}\" height=\"{side}\"></canvas>\n"
    ));
    doc.push_str(
        "<div id=\"mouseInfo\">Hover over the image to see coordinates and AI decision<span id=\"swatch\"></span></div>\n",
    );
    doc.push_str("<div class=\"controls\">\n");
    doc.push_str("<button class=\"btn-primary\" onclick=\"zoomIn()\">Zoom In</button>\n");
    doc.push_str("<button class=\"btn-primary\" onclick=\"zoomOut()\">Zoom Out</button>\n");
    doc.push_str("<button class=\"btn-secondary\" onclick=\"resetZoom()\">Reset</button>\n");
    doc.push_str("<button class=\"btn-secondary\" onclick=\"savePng()\">Save PNG</button>\n");
    doc.push_str("</div>\n");

    doc.push_str("<div class=\"stats\">\n");
    push_stat(&mut doc, stats, "up", "UP", stats.up);
    push_stat(&mut doc, stats, "stay", "STAY", stats.stay);
    push_stat(&mut doc, stats, "down", "DOWN", stats.down);
    if stats.invalid > 0 {
        push_stat(&mut doc, stats, "invalid", "INVALID", stats.invalid);
    }
    doc.push_str("</div>\n");

    doc.push_str("<div class=\"info\"><strong>How to read this visualization:</strong><br>\n");
    doc.push_str("White pixels = AI wants to move the paddle UP<br>\n");
    doc.push_str("Gray pixels = AI wants to STAY in place<br>\n");
    doc.push_str("Black pixels = AI wants to move the paddle DOWN<br>\n");
    doc.push_str("Magenta pixels = invalid table entries<br>\n");
    doc.push_str("Dark gray = unused space (padding)<br><br>\n");
    doc.push_str(
        "Each pixel is one combination of ball position (x, y), ball velocity (vx, vy) and AI paddle position.</div>\n",
    );

    if stats.is_degenerate() {
        doc.push_str("<div class=\"warning\"><strong>WARNING:</strong> all decisions are \"stay\" (gray)!<br>\n");
        doc.push_str(
            "The neural network input normalization probably does not match the training data. \
Consider retraining the model or regenerating the table.</div>\n",
        );
    }

    doc.push_str("</div>\n<script>\n");
    let names = format!(
        "['{}', '{}', '{}']",
        Decision::Up.name(),
        Decision::Stay.name(),
        Decision::Down.name()
    );
    let script = SCRIPT
        .replace("__SIDE__", &side.to_string())
        .replace("__NAMES__", &names)
        .replace(
            "__DIMS__",
            &format!(
                "[{}, {}, {}, {}, {}]",
                dims.ball_x, dims.ball_y, dims.vel_x, dims.vel_y, dims.paddle_y
            ),
        )
        .replace("__PIXELS__", &pixel_array(canvas))
        .replace("__VALUES__", &value_array(table));
    doc.push_str(&script);
    doc.push_str("</script>\n</body>\n</html>\n");
    doc
}

fn push_stat(doc: &mut String, stats: &Stats, class: &str, label: &str, count: usize) {
    doc.push_str(&format!(
        "<div class=\"stat-item {class}\"><div>{label}</div><div>{count}</div><div>{:.1}%</div></div>\n",
        stats.percent(count)
    ));
}

/// All `S * S` pixel colors as a JS string array literal.
fn pixel_array(canvas: &Canvas) -> String {
    let mut out = String::with_capacity(canvas.side() * canvas.side() * 10 + 2);
    out.push('[');
    for (i, hex) in canvas.hex_pixels().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push('"');
        out.push_str(&hex);
        out.push('"');
    }
    out.push(']');
    out
}

/// The raw decision bytes as a JS number array literal, for the hover readout.
fn value_array(table: &LookupTable) -> String {
    let mut out = String::with_capacity(table.len() * 2 + 2);
    out.push('[');
    for (i, &byte) in table.bytes().iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_decimal(&mut out, byte);
    }
    out.push(']');
    out
}

// Decimal digits without a per-entry allocation; the array has millions of them.
fn push_decimal(out: &mut String, byte: u8) {
    if byte >= 100 {
        out.push((b'0' + byte / 100) as char);
    }
    if byte >= 10 {
        out.push((b'0' + byte / 10 % 10) as char);
    }
    out.push((b'0' + byte % 10) as char);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Canvas;
    use crate::report::Stats;
    use crate::table::{LookupTable, TableFormat};

    fn packed_table(fill: u8) -> LookupTable {
        let bytes = vec![fill; TableFormat::PackedV3.expected_bytes()];
        LookupTable::from_bytes(TableFormat::PackedV3, &bytes).unwrap()
    }

    fn render(table: &LookupTable) -> String {
        let canvas = Canvas::render(table);
        let stats = Stats::collect(table);
        render_document(table, &canvas, &stats)
    }

    #[test]
    fn document_embeds_canvas_and_pixels() {
        // 0b00011011 unpacks to up, stay, down, invalid(3).
        let mut bytes = vec![0u8; TableFormat::PackedV3.expected_bytes()];
        bytes[0] = 0b0001_1011;
        let table = LookupTable::from_bytes(TableFormat::PackedV3, &bytes).unwrap();
        let doc = render(&table);
        assert!(doc.contains("<canvas id=\"lut\" width=\"330\" height=\"330\">"));
        assert!(doc.contains("const side = 330;"));
        assert!(doc.contains("const dims = [7, 18, 4, 9, 24];"));
        assert!(doc.contains("[\"#FFFFFF\",\"#808080\",\"#000000\",\"#FF00FF\",\"#FFFFFF\""));
        assert!(doc.contains("const values = [0,1,2,3,0"));
        assert!(doc.contains("imageSmoothingEnabled = false"));
        // Padding colors appear at the tail of the pixel array.
        assert!(doc.contains("\"#404040\"]"));
    }

    #[test]
    fn document_contains_controls_and_stats() {
        let table = packed_table(0);
        let doc = render(&table);
        for needle in ["zoomIn()", "zoomOut()", "resetZoom()", "savePng()"] {
            assert!(doc.contains(needle), "missing {needle}");
        }
        assert!(doc.contains("108864")); // all-up count
        assert!(doc.contains("100.0%"));
        assert!(!doc.contains("class=\"warning\""));
    }

    #[test]
    fn degenerate_table_gets_a_warning_block() {
        let doc = render(&packed_table(0b0101_0101));
        assert!(doc.contains("class=\"warning\""));
        assert!(doc.contains("retraining"));
    }
}
