// patterns.rs - Stampable patterns, stored as offsets from a centre cell

/// (row, col) offsets of a glider heading down and to the right.
pub const GLIDER: &[(i32, i32)] = &[(-1, 0), (0, 1), (1, -1), (1, 0), (1, 1)];

/// Resolve offsets centred on (row, col) into absolute cells, wrapping at the edges.
pub fn place(offsets: &[(i32, i32)], row: u32, col: u32, width: u32, height: u32) -> Vec<(u32, u32)> {
    offsets
        .iter()
        .map(|&(dr, dc)| {
            let r = (row as i64 + dr as i64).rem_euclid(height as i64) as u32;
            let c = (col as i64 + dc as i64).rem_euclid(width as i64) as u32;
            (r, c)
        })
        .collect()
}
