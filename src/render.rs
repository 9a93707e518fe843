use crate::core_types::Assignment;
use crate::error::{PackForgeError, PfResult};
use crate::graph::CellRecord;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::info;

pub const CELL_DIAMETER_MM: f64 = 21.0;
pub const NESTLING_FACTOR: f64 = 0.134;

pub const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Drawing size in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvgSize {
    pub width: f64,
    pub height: f64,
}

/// Fill color of a group; the palette repeats past ten groups.
pub fn group_color(group: usize) -> Option<&'static str> {
    if group == 0 {
        return None;
    }
    Some(PALETTE[(group - 1) % PALETTE.len()])
}

/// Renders the pack at 1:1 scale. Cells without a group in `assignment`
/// are drawn as empty outlines.
pub fn render_svg(cells: &[CellRecord], assignment: &Assignment) -> PfResult<(String, SvgSize)> {
    let first = cells
        .first()
        .ok_or_else(|| PackForgeError::MalformedInput("no cells to render".into()))?;

    let r = CELL_DIAMETER_MM / 2.0;
    let row_pitch = r - 8.0 * NESTLING_FACTOR;

    let (mut x_min, mut x_max, mut y_min, mut y_max) = (first.x, first.x, first.y, first.y);
    for c in cells {
        x_min = x_min.min(c.x);
        x_max = x_max.max(c.x);
        y_min = y_min.min(c.y);
        y_max = y_max.max(c.y);
    }

    let size = SvgSize {
        width: (x_max - x_min) * r + CELL_DIAMETER_MM,
        height: (y_max - y_min) * row_pitch + CELL_DIAMETER_MM,
    };

    // Writing to a String cannot fail.
    let mut svg = String::new();
    let _ = writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#);
    let _ = writeln!(
        svg,
        r#"<svg width="{w}mm" height="{h}mm" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg">"#,
        w = size.width,
        h = size.height
    );
    let _ = writeln!(svg, "<title>Battery Cell Arrangement (1:1 scale)</title>");
    let _ = writeln!(svg, "<g>");

    for c in cells {
        let x = (c.x - x_min) * r + r;
        let y = (c.y - y_min) * row_pitch + r;

        let color = assignment
            .get(&c.n.to_string())
            .and_then(|g| g.trim().parse::<usize>().ok())
            .and_then(group_color);
        let (fill, opacity) = match color {
            Some(color) => (color, "0.3"),
            None => ("none", "0"),
        };

        let _ = writeln!(
            svg,
            r#"  <circle cx="{x}" cy="{y}" r="{r}" fill="{fill}" fill-opacity="{opacity}" stroke="black" stroke-width="0.5"/>"#
        );
        let _ = writeln!(
            svg,
            r#"  <text x="{x}" y="{y}" font-size="4" text-anchor="middle" dy=".3em">{}</text>"#,
            c.n
        );
    }

    let _ = writeln!(svg, "</g>");
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="{}" font-size="8" text-anchor="middle">{:.1} mm</text>"#,
        size.width / 2.0,
        size.height - 5.0,
        size.width
    );
    let _ = writeln!(
        svg,
        r#"<text x="5" y="{hy}" font-size="8" text-anchor="middle" transform="rotate(-90,5,{hy})">{:.1} mm</text>"#,
        size.height,
        hy = size.height / 2.0
    );
    svg.push_str("</svg>\n");

    Ok((svg, size))
}

pub fn write_svg<P: AsRef<Path>>(
    path: P,
    cells: &[CellRecord],
    assignment: &Assignment,
) -> PfResult<SvgSize> {
    let (svg, size) = render_svg(cells, assignment)?;
    fs::write(path.as_ref(), svg)?;
    info!(
        path = %path.as_ref().display(),
        width_mm = size.width,
        height_mm = size.height,
        "SVG saved"
    );
    Ok(size)
}
