//! Post-processing of raw partitioner output

/// Sort index intervals and merge neighbours closer than `merge_distance`
///
/// An interval starting at most `merge_distance` past the end of the
/// previously kept interval extends it; overlapping intervals always merge.
///
/// # Examples
///
/// ```rust
/// use unidip_cluster::merge_intervals;
///
/// let raw = vec![(12, 20), (0, 5), (6, 10)];
/// assert_eq!(merge_intervals(raw.clone(), 1), vec![(0, 10), (12, 20)]);
/// assert_eq!(merge_intervals(raw, 0), vec![(0, 5), (6, 10), (12, 20)]);
/// ```
pub fn merge_intervals(
    mut intervals: Vec<(usize, usize)>,
    merge_distance: usize,
) -> Vec<(usize, usize)> {
    intervals.sort_unstable();

    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(intervals.len());
    for (start, end) in intervals {
        match merged.last_mut() {
            Some(last) if start.saturating_sub(last.1) <= merge_distance => {
                last.1 = last.1.max(end);
            }
            _ => merged.push((start, end)),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_single() {
        assert!(merge_intervals(Vec::new(), 1).is_empty());
        assert_eq!(merge_intervals(vec![(3, 4)], 10), vec![(3, 4)]);
    }

    #[test]
    fn test_overlap_and_containment_merge() {
        assert_eq!(merge_intervals(vec![(0, 10), (2, 4)], 0), vec![(0, 10)]);
        assert_eq!(merge_intervals(vec![(5, 9), (0, 6)], 0), vec![(0, 9)]);
    }

    #[test]
    fn test_chain_merges_through_extended_end() {
        let merged = merge_intervals(vec![(0, 2), (4, 6), (8, 9), (20, 21)], 2);
        assert_eq!(merged, vec![(0, 9), (20, 21)]);
    }
}
