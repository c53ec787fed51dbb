//! Partial selection (quickselect) over `f32` values.
//!
//! Used by the top-N selector to find the `k` smallest values of an array
//! without sorting it. Values are compared with `f32::total_cmp`.

use std::cmp::Ordering;

/// Partially reorders `values` so its `k` smallest entries occupy `values[..k]`.
///
/// `indexes[..values.len()]` is overwritten with the original position of each
/// reordered value, so `indexes[..k]` names the selected entries. Order inside
/// `values[..k]` is unspecified, and equal values at the boundary are picked
/// depending on how partitioning unfolds.
///
/// Expected cost is linear in `values.len()`.
///
/// # Panics
/// Panics if `indexes` is shorter than `values`.
pub(crate) fn select_smallest(values: &mut [f32], k: usize, indexes: &mut [usize]) {
    let n = values.len();
    let indexes = &mut indexes[..n];
    for (i, slot) in indexes.iter_mut().enumerate() {
        *slot = i;
    }
    if k == 0 || k >= n {
        return;
    }

    let target = k - 1;
    let mut lo = 0usize;
    let mut hi = n - 1;
    loop {
        let (lt, gt) = partition3(values, indexes, lo, hi);
        if target < lt {
            hi = lt - 1;
        } else if target > gt {
            lo = gt + 1;
        } else {
            return;
        }
    }
}

/// Three-way partition of `values[lo..=hi]` around a median-of-three pivot.
///
/// Returns `(lt, gt)` such that `values[lo..lt] < pivot`,
/// `values[lt..=gt] == pivot` and `values[gt + 1..=hi] > pivot`.
fn partition3(values: &mut [f32], indexes: &mut [usize], lo: usize, hi: usize) -> (usize, usize) {
    let pivot = median_of_three(values[lo], values[lo + (hi - lo) / 2], values[hi]);

    let mut lt = lo;
    let mut i = lo;
    let mut gt = hi;
    // The pivot value is present in the range, so `gt` never drops below `lt`.
    while i <= gt {
        match values[i].total_cmp(&pivot) {
            Ordering::Less => {
                values.swap(lt, i);
                indexes.swap(lt, i);
                lt += 1;
                i += 1;
            }
            Ordering::Greater => {
                values.swap(i, gt);
                indexes.swap(i, gt);
                gt -= 1;
            }
            Ordering::Equal => i += 1,
        }
    }
    (lt, gt)
}

fn median_of_three(a: f32, b: f32, c: f32) -> f32 {
    let (lo, hi) = if a.total_cmp(&b) == Ordering::Greater {
        (b, a)
    } else {
        (a, b)
    };
    if c.total_cmp(&lo) == Ordering::Less {
        lo
    } else if c.total_cmp(&hi) == Ordering::Greater {
        hi
    } else {
        c
    }
}

#[cfg(test)]
mod tests {
    use super::{median_of_three, select_smallest};

    fn check_selection(original: &[f32], k: usize) {
        let mut values = original.to_vec();
        let mut indexes = vec![0usize; values.len()];
        select_smallest(&mut values, k, &mut indexes);

        let mut sorted = original.to_vec();
        sorted.sort_by(f32::total_cmp);
        let mut picked: Vec<f32> = indexes[..k].iter().map(|&i| original[i]).collect();
        picked.sort_by(f32::total_cmp);
        assert_eq!(picked, sorted[..k].to_vec(), "k = {k}");

        for (value, &idx) in values.iter().zip(indexes.iter()) {
            assert_eq!(value.to_bits(), original[idx].to_bits());
        }
    }

    #[test]
    fn median_of_three_picks_middle() {
        assert_eq!(median_of_three(1.0, 2.0, 3.0), 2.0);
        assert_eq!(median_of_three(3.0, 1.0, 2.0), 2.0);
        assert_eq!(median_of_three(2.0, 3.0, 1.0), 2.0);
        assert_eq!(median_of_three(5.0, 5.0, 1.0), 5.0);
    }

    #[test]
    fn selects_smallest_values() {
        let original = [9.0, -1.0, 4.0, 7.5, 0.0, 3.0, 12.0, -6.0, 2.0, 8.0];
        for k in 0..=original.len() {
            check_selection(&original, k);
        }
    }

    #[test]
    fn handles_many_duplicates() {
        let original: Vec<f32> = (0..200).map(|i| (i % 3) as f32).collect();
        for k in [1, 50, 67, 68, 133, 150, 199] {
            check_selection(&original, k);
        }
    }

    #[test]
    fn constant_input_terminates() {
        let original = vec![4.0f32; 64];
        check_selection(&original, 10);
    }

    #[test]
    fn identity_indexes_when_k_covers_input() {
        let mut values = vec![3.0f32, 1.0, 2.0];
        let mut indexes = vec![usize::MAX; 5];
        select_smallest(&mut values, 3, &mut indexes);
        assert_eq!(&indexes[..3], &[0, 1, 2]);
        assert_eq!(values, vec![3.0, 1.0, 2.0]);
        assert_eq!(indexes[3], usize::MAX);
    }
}
