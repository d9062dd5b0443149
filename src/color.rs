use palette::Srgb;

// ---------------------------------------------------------------------------
// nipy_spectral colormap
// ---------------------------------------------------------------------------

/// Control points of matplotlib's `nipy_spectral` map: (position, r, g, b).
const NIPY_SPECTRAL: [(f32, f32, f32, f32); 21] = [
    (0.00, 0.0000, 0.0000, 0.0000),
    (0.05, 0.4667, 0.0000, 0.5333),
    (0.10, 0.5333, 0.0000, 0.6000),
    (0.15, 0.0000, 0.0000, 0.6667),
    (0.20, 0.0000, 0.0000, 0.8667),
    (0.25, 0.0000, 0.4667, 0.8667),
    (0.30, 0.0000, 0.6000, 0.8667),
    (0.35, 0.0000, 0.6667, 0.6667),
    (0.40, 0.0000, 0.6667, 0.5333),
    (0.45, 0.0000, 0.6000, 0.0000),
    (0.50, 0.0000, 0.7333, 0.0000),
    (0.55, 0.0000, 0.8667, 0.0000),
    (0.60, 0.0000, 1.0000, 0.0000),
    (0.65, 0.7333, 1.0000, 0.0000),
    (0.70, 0.9333, 0.9333, 0.0000),
    (0.75, 1.0000, 0.8000, 0.0000),
    (0.80, 1.0000, 0.6000, 0.0000),
    (0.85, 1.0000, 0.0000, 0.0000),
    (0.90, 0.8667, 0.0000, 0.0000),
    (0.95, 0.8000, 0.0000, 0.0000),
    (1.00, 0.8000, 0.8000, 0.8000),
];

/// Sample the colormap at `t` in `[0, 1]` (clamped).
pub fn nipy_spectral(t: f32) -> Srgb<u8> {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

    let upper = NIPY_SPECTRAL
        .iter()
        .position(|&(pos, ..)| pos >= t)
        .unwrap_or(NIPY_SPECTRAL.len() - 1);
    let (p1, r1, g1, b1) = NIPY_SPECTRAL[upper];
    if upper == 0 || p1 == t {
        return Srgb::new(r1, g1, b1).into_format();
    }

    let (p0, r0, g0, b0) = NIPY_SPECTRAL[upper - 1];
    let factor = (t - p0) / (p1 - p0);
    let lerp = |a: f32, b: f32| a + (b - a) * factor;
    Srgb::new(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1)).into_format()
}

/// `n` colours sampled evenly at `i / n`, as series `i` of `n` receives.
pub fn generate_palette(n: usize) -> Vec<Srgb<u8>> {
    (0..n)
        .map(|i| nipy_spectral(i as f32 / n as f32))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_match_control_points() {
        assert_eq!(nipy_spectral(0.0), Srgb::new(0u8, 0, 0));
        assert_eq!(nipy_spectral(1.0), Srgb::new(204u8, 204, 204));
        assert_eq!(nipy_spectral(0.6), Srgb::new(0u8, 255, 0));
    }

    #[test]
    fn interpolates_between_control_points() {
        // halfway between (0.55: 0, .8667, 0) and (0.60: 0, 1, 0)
        let c = nipy_spectral(0.575);
        assert_eq!((c.red, c.blue), (0, 0));
        assert!(c.green > 221 && c.green < 255);
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(nipy_spectral(-1.0), nipy_spectral(0.0));
        assert_eq!(nipy_spectral(3.0), nipy_spectral(1.0));
    }

    #[test]
    fn palette_is_deterministic_and_starts_black() {
        let a = generate_palette(4);
        assert_eq!(a, generate_palette(4));
        assert_eq!(a.len(), 4);
        assert_eq!(a[0], Srgb::new(0u8, 0, 0));
        assert!(generate_palette(0).is_empty());
    }
}
