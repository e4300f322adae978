/// Piecewise-linear interpolation of `x` from `[x0, x1]` onto `[y0, y1]`,
/// clamped to the endpoints outside the input range.
///
/// A degenerate input range (`x1 <= x0`) maps everything at or below `x0`
/// to `y0` and everything above to `y1`.
pub fn interp(x: f32, (x0, x1): (f32, f32), (y0, y1): (f32, f32)) -> f32 {
    if x <= x0 { return y0; }
    if x >= x1 { return y1; }
    y0 + (x - x0) * (y1 - y0) / (x1 - x0)
}
