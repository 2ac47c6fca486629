//! Wheel angle math
//!
//! Wheel-local angles are measured at zero rotation, segment `i` spanning
//! `[i * segment, (i + 1) * segment)`. A wheel rotated by `angle` shows local
//! angle `phi` at screen angle `phi + angle`, so the segment under the pointer
//! is the one containing `POINTER_ANGLE - angle`.

use std::f64::consts::TAU;

use glam::DVec2;

use crate::consts::POINTER_ANGLE;
use crate::{normalize_angle, polar_to_cartesian};

/// Angular width of one segment
#[inline]
pub fn segment_angle(segment_count: usize) -> f64 {
    TAU / segment_count.max(1) as f64
}

/// Wheel-local angle of the middle of segment `index`
#[inline]
pub fn prize_center_angle(index: usize, segment_count: usize) -> f64 {
    let segment = segment_angle(segment_count);
    index as f64 * segment + segment / 2.0
}

/// Rotation in [0, 2π) that puts segment `index` under the pointer
pub fn landing_offset(index: usize, segment_count: usize) -> f64 {
    normalize_angle(POINTER_ANGLE - prize_center_angle(index, segment_count) + TAU)
}

/// Absolute rotation to stop at so that segment `index` rests under the pointer
///
/// Always strictly ahead of `current_angle`.
pub fn target_angle(
    current_angle: f64,
    index: usize,
    segment_count: usize,
    extra_rotations: u32,
) -> f64 {
    let current_mod = normalize_angle(current_angle);
    let mut target = current_angle - current_mod
        + landing_offset(index, segment_count)
        + extra_rotations as f64 * TAU;
    if target <= current_angle {
        target += TAU;
    }
    target
}

/// Index of the segment currently under the pointer
pub fn pointed_index(angle: f64, segment_count: usize) -> usize {
    if segment_count == 0 {
        return 0;
    }
    let local = normalize_angle(POINTER_ANGLE - angle);
    ((local / segment_angle(segment_count)) as usize).min(segment_count - 1)
}

/// Where to anchor a segment's label, relative to the wheel center
///
/// `radius_fraction` is the distance from center as a share of `radius`.
pub fn label_anchor(
    index: usize,
    segment_count: usize,
    angle: f64,
    radius: f64,
    radius_fraction: f64,
) -> DVec2 {
    polar_to_cartesian(
        radius * radius_fraction,
        prize_center_angle(index, segment_count) + angle,
    )
}

/// Tip of the pointer, relative to the wheel center
pub fn pointer_tip(radius: f64) -> DVec2 {
    polar_to_cartesian(radius, POINTER_ANGLE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_segment_angles() {
        assert!((segment_angle(6) - PI / 3.0).abs() < 1e-12);
        assert!((prize_center_angle(0, 4) - PI / 4.0).abs() < 1e-12);
        assert!((prize_center_angle(3, 4) - 7.0 * PI / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_landing_offset_in_range() {
        for n in 1..=9 {
            for i in 0..n {
                let d = landing_offset(i, n);
                assert!((0.0..TAU).contains(&d), "n={n} i={i} d={d}");
            }
        }
    }

    #[test]
    fn test_target_lands_under_pointer() {
        for n in 1..=9 {
            for i in 0..n {
                for &current in &[0.0, 1.3, 17.9, 250.0] {
                    let target = target_angle(current, i, n, 4);
                    assert!(target > current);
                    assert_eq!(pointed_index(target, n), i, "n={n} i={i} current={current}");
                }
            }
        }
    }

    #[test]
    fn test_target_includes_extra_rotations() {
        let target = target_angle(0.0, 0, 6, 4);
        assert!(target >= 4.0 * TAU);
        assert!(target < 5.0 * TAU);
    }

    #[test]
    fn test_target_ahead_without_extra_rotations() {
        // Sitting exactly on the landing offset must still move a full turn
        let current = landing_offset(2, 6);
        let target = target_angle(current, 2, 6, 0);
        assert!(target > current);
        assert!((target - current - TAU).abs() < 1e-9);
    }

    #[test]
    fn test_pointed_index_at_rest() {
        // Unrotated, the top of the wheel is local angle 3π/2
        assert_eq!(pointed_index(0.0, 4), 3);
        // Quarter turn clockwise brings segment 2 to the top
        assert_eq!(pointed_index(PI / 2.0, 4), 2);
        assert_eq!(pointed_index(1.0, 0), 0);
    }

    #[test]
    fn test_label_anchor_follows_rotation() {
        let anchor = label_anchor(0, 4, -PI / 4.0, 100.0, 0.65);
        assert!((anchor.x - 65.0).abs() < 1e-9);
        assert!(anchor.y.abs() < 1e-9);
        let tip = pointer_tip(100.0);
        assert!((tip.y + 100.0).abs() < 1e-9);
    }
}
