//! SVG connectivity map renderer.
//!
//! Consumes parsed summary lines rather than the live sector tree, so a
//! map can be redrawn from any sector text on disk. Routes come from
//! the routing engine; everything else is glyph placement around each
//! hex center.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::geometry::{HexCoord, FACTOR, SIDE};
use crate::routing;
use crate::sector::{COLUMNS, ROWS};

use super::ascii::VolumeSummary;
use super::ExportError;

// Deterministic scatter for belt glyphs, in side-fractions around the
// hex center.
const BELT_SCATTER: [(f64, f64); 7] = [
    (-0.22, -0.10),
    (-0.05, 0.18),
    (0.12, -0.20),
    (0.25, 0.05),
    (-0.15, 0.08),
    (0.03, -0.04),
    (0.18, 0.22),
];

fn map_width() -> i64 {
    (SIDE * (COLUMNS as f64 * 1.5 + 0.5)).ceil() as i64
}

fn map_height() -> i64 {
    (SIDE * FACTOR * (ROWS as f64 + 0.5)).ceil() as i64
}

fn header(name: &str) -> String {
    let width = map_width();
    let height = map_height();
    format!(
        r##"<?xml version="1.0" standalone="no"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN"
  "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<svg width="{width}px" height="{height}px" version="1.1" xmlns="http://www.w3.org/2000/svg">
  <desc>Sector map: {name}</desc>
  <style>
    svg {{ fill: #FFF; }}
    text {{ text-anchor: middle; fill: #567; font: 8px sans-serif; }}
    text.namestamp {{ text-anchor: start; font-size: 13px; }}
    text.symbol {{ font-size: 14px; fill: #222; }}
    g.grid text {{ fill: #DDD; }}
    polygon.hex {{ fill: none; stroke: #DDD; stroke-width: 1; }}
    polyline.frame {{ fill: none; stroke: #DDD; stroke-width: 1; }}
    line {{ opacity: 0.5; }}
    line.line1 {{ stroke: #666; stroke-width: 4; }}
    line.line2 {{ stroke: #66C; stroke-width: 3; }}
    line.line3 {{ stroke: #C60; stroke-width: 2; }}
    circle {{ fill: #222; stroke: #FFF; stroke-width: 1; }}
    g.gas-giant circle {{ fill: #034; stroke: #034; }}
    g.gas-giant ellipse {{ fill: none; stroke: #034; stroke-width: 1; }}
    path.zone {{ fill: none; stroke: #B90; stroke-width: 3; stroke-dasharray: 3,6; }}
  </style>
  <rect width='{width}' height='{height}' />
"##
    )
}

fn hex_outline(coord: HexCoord) -> String {
    let (cx, cy) = coord.center();
    let half = SIDE / 2.0;
    let rise = SIDE * FACTOR / 2.0;
    let corners = [
        (cx - SIDE, cy),
        (cx - half, cy - rise),
        (cx + half, cy - rise),
        (cx + SIDE, cy),
        (cx + half, cy + rise),
        (cx - half, cy + rise),
    ];
    let points: Vec<String> = corners
        .iter()
        .map(|(x, y)| format!("{:.0},{:.0}", x, y))
        .collect();
    format!("    <polygon class='hex' points='{}' />", points.join(" "))
}

fn grid() -> String {
    let mut out = vec!["  <g class='grid'>".to_string()];
    for row in 1..=ROWS {
        for column in 1..=COLUMNS {
            let coord = HexCoord::new(column, row);
            let (cx, cy) = coord.center();
            out.push(hex_outline(coord));
            out.push(format!(
                "    <text x='{:.0}' y='{:.0}'>{}</text>",
                cx,
                cy - SIDE * FACTOR / 2.0 + 0.2 * SIDE,
                coord
            ));
        }
    }
    out.push("  </g>".to_string());
    out.join("\n")
}

fn route_lines(summaries: &[VolumeSummary]) -> String {
    let occupied: HashSet<HexCoord> = summaries.iter().map(|s| s.coord).collect();
    routing::sector_routes(&occupied)
        .iter()
        .map(|route| {
            let a = route.from.center();
            let b = route.to.center();
            format!(
                "  <!-- {} > {} --><line class='line{}' x1='{:.0}' y1='{:.0}' x2='{:.0}' y2='{:.0}' />",
                route.from,
                route.to,
                route.distance.floor() as i64,
                a.0,
                a.1,
                b.0,
                b.1,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn belt_glyph(center: (f64, f64)) -> String {
    let mut out = vec!["    <g class='belt'>".to_string()];
    for (dx, dy) in BELT_SCATTER {
        out.push(format!(
            "      <circle cx='{:.0}' cy='{:.0}' r='{:.1}' />",
            center.0 + dx * SIDE,
            center.1 + dy * SIDE,
            SIDE / 15.0,
        ));
    }
    out.push("    </g>".to_string());
    out.join("\n")
}

fn gas_giant_glyph(center: (f64, f64)) -> String {
    let x = center.0 + SIDE / 1.8;
    let y = center.1 + SIDE / 3.0;
    format!(
        "    <g class='gas-giant'><ellipse cx='{x:.0}' cy='{y:.0}' rx='{rx:.1}' ry='{ry:.1}' /><circle cx='{x:.0}' cy='{y:.0}' r='{r:.1}' /></g>",
        rx = SIDE / 6.5,
        ry = SIDE / 13.0 * 0.4,
        r = SIDE / 15.6,
    )
}

fn base_glyphs(summary: &VolumeSummary, center: (f64, f64)) -> String {
    let (cx, cy) = center;
    let mut out = Vec::new();
    let symbol = |x: f64, y: f64, glyph: char| {
        format!("    <text class='symbol' x='{x:.0}' y='{y:.0}'>{glyph}</text>")
    };
    if summary.bases.contains('N') {
        out.push(symbol(cx - SIDE / 1.8, cy - SIDE / 6.0, '\u{2693}'));
    }
    if summary.bases.contains('S') {
        out.push(symbol(cx - SIDE / 1.8, cy + SIDE / 2.4, '\u{269C}'));
    }
    if summary.bases.contains('G') {
        out.push(gas_giant_glyph(center));
    }
    if summary.bases.contains('C') {
        out.push(symbol(cx - SIDE / 1.5, cy + SIDE / 7.0, '\u{2691}'));
    }
    if summary.bases.contains('P') {
        out.push(symbol(cx - SIDE / 3.1, cy + SIDE / 7.0, '\u{2620}'));
    }
    out.join("\n")
}

fn world_glyphs(summary: &VolumeSummary) -> String {
    let center = summary.coord.center();
    let (cx, cy) = center;
    // Unknown profile characters draw the generic planet style.
    let size = summary.uwp.chars().nth(1).unwrap_or('.');
    let starport = summary.uwp.chars().next().unwrap_or('.');

    let mut out = vec![format!(
        "  <!-- Volume {} {} {} -->",
        summary.coord, summary.uwp, summary.name
    )];
    if size == '0' {
        out.push(belt_glyph(center));
    } else {
        out.push(format!(
            "    <circle class='planet' cx='{:.0}' cy='{:.0}' r='{:.1}' />",
            cx,
            cy,
            SIDE / 7.0,
        ));
    }
    out.push(format!(
        "    <text class='spaceport' x='{:.0}' y='{:.0}'>{}</text>",
        cx,
        cy + SIDE / 2.0,
        starport,
    ));
    out.push(format!(
        "    <text x='{:.0}' y='{:.0}'>{}</text>",
        cx,
        cy + SIDE / 1.3,
        summary.uwp,
    ));
    out.push(format!(
        "    <text x='{:.0}' y='{:.0}'>{}</text>",
        cx,
        cy - SIDE / 2.1,
        summary.name,
    ));

    if summary.travel_zone != ".." {
        let curve = SIDE / 2.0;
        out.push(format!(
            "    <path class='zone' d='M {:.0} {:.0} a {curve:.0} {curve:.0} 0 1 0 20 0' />",
            cx - curve / 2.0,
            cy - curve / 1.4,
        ));
    }

    let glyphs = base_glyphs(summary, center);
    if !glyphs.is_empty() {
        out.push(glyphs);
    }

    let mut x = cx + SIDE / 1.8 + 2.0;
    let mut y = cy - SIDE / 3.0 + 3.0;
    for star in &summary.stars {
        let label: String = star.chars().take(2).collect();
        out.push(format!("    <text x='{x:.0}' y='{y:.0}'>{label}</text>"));
        x += 3.0;
        y += 7.0;
    }
    out.join("\n")
}

fn frame() -> String {
    let w = map_width();
    let h = map_height();
    format!("  <polyline class='frame' points='0,0 {w},0 {w},{h} 0,{h} 0,0' />")
}

/// Renders a full sector map from parsed summary lines.
pub fn render_map(summaries: &[VolumeSummary], name: &str) -> String {
    let mut parts = vec![header(name)];
    parts.push(grid());
    parts.push(route_lines(summaries));
    for summary in summaries {
        parts.push(world_glyphs(summary));
    }
    parts.push(format!(
        "  <text class='namestamp' x='10' y='{}'>{}</text>",
        map_height() - 10,
        name,
    ));
    parts.push(frame());
    parts.push("</svg>".to_string());
    parts.join("\n")
}

/// Writes the rendered map to `path`.
pub fn write_map(summaries: &[VolumeSummary], name: &str, path: &Path) -> Result<(), ExportError> {
    fs::write(path, render_map(summaries, name))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(line: &str) -> VolumeSummary {
        line.parse().expect("test summary")
    }

    #[test]
    fn test_map_has_svg_scaffolding() {
        let map = render_map(&[], "Empty Reach");
        assert!(map.starts_with("<?xml"));
        assert!(map.contains("<svg"));
        assert!(map.ends_with("</svg>"));
        assert!(map.contains("Empty Reach"));
        assert!(map.contains("polygon class='hex'"));
    }

    #[test]
    fn test_neighbours_get_route_lines() {
        let summaries = vec![
            summary("0505 A867945-8 T N.G.. ..\tAg\tO\tG2V\tHaven"),
            summary("0506 C550420-5 C ..... ..\tPo\tF\tK5V\tQuarry"),
        ];
        let map = render_map(&summaries, "Pair");
        assert!(map.contains("class='line1'"));
        assert!(map.contains("0505 > 0506"));
    }

    #[test]
    fn test_belts_and_planets_draw_differently() {
        let belt = summary("0101 X000000-0 F ..... AZ\tAs,Va\t\tM2V\tBarrens");
        let planet = summary("0303 B867740-7 T ..... ..\tAg\tO\tG0V\tMeridian");
        let map = render_map(&[belt, planet], "Mixed");
        assert!(map.contains("<g class='belt'>"));
        assert!(map.contains("class='planet'"));
    }

    #[test]
    fn test_base_flags_place_symbols() {
        let with_bases = summary("0404 A867945-8 T NSGCP ..\tAg\tO\tG2V\tHearth");
        let map = render_map(&[with_bases], "Bases");
        assert!(map.contains('\u{2693}'));
        assert!(map.contains('\u{269C}'));
        assert!(map.contains('\u{2691}'));
        assert!(map.contains('\u{2620}'));
        assert!(map.contains("class='gas-giant'"));
    }

    #[test]
    fn test_amber_zone_draws_arc() {
        let amber = summary("0707 C867A45-8 R ..... AZ\tFl\tO\tG2V\tEmber");
        let map = render_map(&[amber], "Amber");
        assert!(map.contains("class='zone'"));
    }
}
