//! Parabolic paper curl.
//!
//! The sheet bulges along Z, most in the middle row and not at all at the
//! top and bottom edges.

use std::f32::consts::PI;

/// Z offset of a vertex at height `y` for a sheet spanning `±half_height`.
pub fn curl_offset(y: f32, half_height: f32, amount: f32) -> f32 {
    if half_height <= 0.0 {
        return 0.0;
    }
    let t = y / half_height;
    (1.0 - t * t) * amount
}

/// Writes `rest + curl(y) * amount` into `live`.
///
/// `rest` is only read. Both buffers must have the same length.
pub fn apply_curvature(rest: &[[f32; 3]], live: &mut [[f32; 3]], half_height: f32, amount: f32) {
    debug_assert_eq!(rest.len(), live.len());
    for (out, &[x, y, z]) in live.iter_mut().zip(rest) {
        *out = [x, y, z + curl_offset(y, half_height, amount)];
    }
}

/// Bend of a flipping page at eased progress `eased`.
///
/// Exactly zero at both ends of the flip.
pub fn flip_bend(eased: f32, peak: f32) -> f32 {
    if eased <= 0.0 || eased >= 1.0 {
        0.0
    } else {
        (eased * PI).sin() * peak
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curl_vanishes_at_the_edges() {
        assert_eq!(curl_offset(1.075, 1.075, 0.028), 0.0);
        assert_eq!(curl_offset(-1.075, 1.075, 0.028), 0.0);
    }

    #[test]
    fn curl_peaks_in_the_middle() {
        assert_eq!(curl_offset(0.0, 1.075, 0.028), 0.028);

        let quarter = curl_offset(0.5375, 1.075, 0.028);
        assert!((quarter - 0.021).abs() < 1e-6);
        assert!(quarter < curl_offset(0.0, 1.075, 0.028));
    }

    #[test]
    fn curl_is_symmetric() {
        for y in [0.1, 0.4, 0.9] {
            assert_eq!(curl_offset(y, 1.0, 0.085), curl_offset(-y, 1.0, 0.085));
        }
    }

    #[test]
    fn apply_leaves_x_and_y_alone() {
        let rest = [[0.5, 0.0, 0.01], [-0.5, 1.0, -0.01]];
        let mut live = [[0.0; 3]; 2];

        apply_curvature(&rest, &mut live, 1.0, 0.1);

        assert_eq!(live[0], [0.5, 0.0, 0.01 + 0.1]);
        assert_eq!(live[1], [-0.5, 1.0, -0.01]);
    }

    #[test]
    fn apply_with_zero_amount_restores_rest() {
        let rest = [[0.2, 0.3, 0.04]];
        let mut live = [[9.0; 3]];

        apply_curvature(&rest, &mut live, 1.0, 0.0);

        assert_eq!(live, rest);
    }

    #[test]
    fn flip_bend_is_zero_at_both_ends() {
        assert_eq!(flip_bend(0.0, 0.085), 0.0);
        assert_eq!(flip_bend(1.0, 0.085), 0.0);
        assert!((flip_bend(0.5, 0.085) - 0.085).abs() < 1e-6);
    }
}
