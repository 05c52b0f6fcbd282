pub const MIN_ALLOCATION: f32 = 0.10;
pub const MAX_ALLOCATION: f32 = 0.50;
/// Share of the total that a drag across the full drawing width can move.
pub const DRAG_SENSITIVITY: f32 = 0.2;

pub fn allocation_delta(pixel_delta: f32, drawing_width: f32) -> f32 {
    pixel_delta / drawing_width * DRAG_SENSITIVITY
}

/// Moves `delta` from phase `boundary + 1` to phase `boundary`, clamping both
/// to the allowed range. The result is not normalized.
pub fn shift_boundary(allocations: &[f32], boundary: usize, delta: f32) -> Option<Vec<f32>> {
    let next = boundary.checked_add(1)?;
    if next >= allocations.len() {
        return None;
    }

    let mut shifted = allocations.to_vec();
    shifted[boundary] = (allocations[boundary] + delta).clamp(MIN_ALLOCATION, MAX_ALLOCATION);
    shifted[next] = (allocations[next] - delta).clamp(MIN_ALLOCATION, MAX_ALLOCATION);
    Some(shifted)
}

/// Applies a boundary drag of `pixel_delta` and renormalizes the list.
/// Returns `None` when the drag cannot change anything.
pub fn adjust_boundary(
    allocations: &[f32],
    boundary: usize,
    pixel_delta: f32,
    drawing_width: f32,
) -> Option<Vec<f32>> {
    if drawing_width.is_nan() || drawing_width <= 0.0 || !pixel_delta.is_finite() {
        return None;
    }

    let delta = allocation_delta(pixel_delta, drawing_width);
    let mut adjusted = shift_boundary(allocations, boundary, delta)?;
    normalize_allocations(&mut adjusted);
    Some(adjusted)
}

/// Divides every entry by the total. An all-zero list becomes an even split.
pub fn normalize_allocations(allocations: &mut [f32]) {
    if allocations.is_empty() {
        return;
    }

    let sum = allocations.iter().sum::<f32>();
    if !sum.is_finite() || sum <= 0.0 {
        let even = 1.0 / allocations.len() as f32;
        allocations.iter_mut().for_each(|value| *value = even);
        return;
    }

    allocations.iter_mut().for_each(|value| *value /= sum);
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn sum(values: &[f32]) -> f32 {
        values.iter().sum()
    }

    #[test]
    fn drag_right_grows_left_phase() {
        let adjusted = adjust_boundary(&[0.25; 4], 1, 100.0, 1000.0).expect("boundary exists");
        assert!((adjusted[1] - 0.27).abs() < 1e-5);
        assert!((adjusted[2] - 0.23).abs() < 1e-5);
        assert!((adjusted[0] - 0.25).abs() < 1e-5);
        assert!((sum(&adjusted) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn large_left_drag_clamps_to_minimum_then_renormalizes() {
        let shifted = shift_boundary(&[0.25; 4], 0, allocation_delta(-5000.0, 800.0))
            .expect("boundary exists");
        assert_eq!(shifted[0], MIN_ALLOCATION);
        assert_eq!(shifted[1], MAX_ALLOCATION);

        let adjusted = adjust_boundary(&[0.25; 4], 0, -5000.0, 800.0).expect("boundary exists");
        assert!((sum(&adjusted) - 1.0).abs() < 1e-5);
        assert!((adjusted[0] - MIN_ALLOCATION / 1.1).abs() < 1e-5);
        assert!((adjusted[0] / adjusted[1] - 0.2).abs() < 1e-4);
    }

    #[test]
    fn non_adjacent_phases_keep_their_ratio() {
        let adjusted = adjust_boundary(&[0.4, 0.3, 0.2, 0.1], 1, 200.0, 400.0).expect("boundary exists");
        assert!((adjusted[0] / adjusted[3] - 4.0).abs() < 1e-4);
    }

    #[test]
    fn last_boundary_is_a_no_op() {
        assert_eq!(adjust_boundary(&[0.5, 0.5], 1, 30.0, 400.0), None);
        assert_eq!(adjust_boundary(&[], 0, 30.0, 400.0), None);
        assert_eq!(adjust_boundary(&[0.5, 0.5], usize::MAX, 30.0, 400.0), None);
    }

    #[test]
    fn zero_width_is_a_no_op() {
        assert_eq!(adjust_boundary(&[0.5, 0.5], 0, 30.0, 0.0), None);
    }

    #[test]
    fn all_zero_list_normalizes_to_even_split() {
        let mut values = [0.0; 4];
        normalize_allocations(&mut values);
        assert_eq!(values, [0.25; 4]);
    }

    proptest! {
        #[test]
        fn adjustment_always_sums_to_one(
            weights in prop::collection::vec(0.1f32..0.5, 2..8),
            boundary in 0usize..7,
            pixels in -2000.0f32..2000.0,
        ) {
            let mut allocations = weights;
            normalize_allocations(&mut allocations);
            match adjust_boundary(&allocations, boundary, pixels, 640.0) {
                Some(adjusted) => {
                    prop_assert_eq!(adjusted.len(), allocations.len());
                    prop_assert!((sum(&adjusted) - 1.0).abs() < 1e-4);
                }
                None => prop_assert!(boundary + 1 >= allocations.len()),
            }
        }
    }
}
