use palette::Srgb;

use crate::color::generate_palette;

// ---------------------------------------------------------------------------
// Line styles and markers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    DashDot,
    Dashed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    TriangleDown,
    Circle,
    Star,
    Square,
    Cross,
    TriangleUp,
    Plus,
}

pub const LINE_STYLES: [LineStyle; 3] = [LineStyle::Solid, LineStyle::DashDot, LineStyle::Dashed];

pub const MARKERS: [Marker; 7] = [
    Marker::TriangleDown,
    Marker::Circle,
    Marker::Star,
    Marker::Square,
    Marker::Cross,
    Marker::TriangleUp,
    Marker::Plus,
];

/// Visual identity of one plotted series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStyle {
    pub color: Srgb<u8>,
    pub line: LineStyle,
    pub marker: Marker,
}

// ---------------------------------------------------------------------------
// Assignment
// ---------------------------------------------------------------------------

/// Cycle through line style × marker (markers vary fastest), take `n`
/// entries and reverse them: series 0 gets the *last* pair of the prefix.
pub fn line_marker_cycle(n: usize) -> Vec<(LineStyle, Marker)> {
    let mut pairs: Vec<(LineStyle, Marker)> = LINE_STYLES
        .iter()
        .flat_map(|&line| MARKERS.iter().map(move |&marker| (line, marker)))
        .cycle()
        .take(n)
        .collect();
    pairs.reverse();
    pairs
}

/// Styles for `n` series in input order. Same `n`, same styles, every run.
pub fn assign_styles(n: usize) -> Vec<SeriesStyle> {
    generate_palette(n)
        .into_iter()
        .zip(line_marker_cycle(n))
        .map(|(color, (line, marker))| SeriesStyle {
            color,
            line,
            marker,
        })
        .collect()
}
