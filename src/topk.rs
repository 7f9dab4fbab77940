//! Top-K selection over scored items
//!
//! Picking the 3 best (or worst) performers out of N experiments does not
//! need a full O(N log N) sort; a bounded heap finds the K extremes in
//! O(N log K) with O(K) space. The recommendation generator leans on this
//! for its top/bottom performer selection.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::Error;

/// Sort order for Top-K selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending order (smallest K values)
    Ascending,
    /// Descending order (largest K values)
    Descending,
}

/// Select the indices of the top K items by an f64 key.
///
/// Returns indices into `items`, ordered best-first for the requested
/// order. Items whose key is NaN are skipped and never selected. When
/// `k >= items.len()` this degrades to a full sort of the finite-keyed
/// items.
///
/// # Errors
/// Returns [`Error::InvalidInput`] when `k` is zero.
///
/// # Examples
///
/// ```rust
/// use campaign_insights::topk::{top_k_indices_by, SortOrder};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let scores = [12.0, 88.0, 47.0, 93.0];
/// let top2 = top_k_indices_by(&scores, 2, SortOrder::Descending, |s| *s)?;
/// assert_eq!(top2, vec![3, 1]);
/// # Ok(())
/// # }
/// ```
pub fn top_k_indices_by<T, F>(
    items: &[T],
    k: usize,
    order: SortOrder,
    key: F,
) -> crate::Result<Vec<usize>>
where
    F: Fn(&T) -> f64,
{
    if k == 0 {
        return Err(Error::InvalidInput("k must be greater than 0".to_string()));
    }

    if k >= items.len() {
        return Ok(sort_all_indices(items, order, key));
    }

    match order {
        SortOrder::Descending => {
            // Min-heap keeps the smallest of the current K at the top, so
            // the largest K survive the scan.
            let mut heap: BinaryHeap<MinHeapItem> = BinaryHeap::with_capacity(k);
            for (index, item) in items.iter().enumerate() {
                let value = key(item);
                if value.is_nan() {
                    continue;
                }
                if heap.len() < k {
                    heap.push(MinHeapItem { value, index });
                } else if let Some(top) = heap.peek() {
                    if value > top.value {
                        heap.pop();
                        heap.push(MinHeapItem { value, index });
                    }
                }
            }
            let mut result: Vec<_> = heap.into_vec();
            result.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
            Ok(result.into_iter().map(|item| item.index).collect())
        }
        SortOrder::Ascending => {
            // Max-heap keeps the largest of the current K at the top, so
            // the smallest K survive the scan.
            let mut heap: BinaryHeap<MaxHeapItem> = BinaryHeap::with_capacity(k);
            for (index, item) in items.iter().enumerate() {
                let value = key(item);
                if value.is_nan() {
                    continue;
                }
                if heap.len() < k {
                    heap.push(MaxHeapItem { value, index });
                } else if let Some(top) = heap.peek() {
                    if value < top.value {
                        heap.pop();
                        heap.push(MaxHeapItem { value, index });
                    }
                }
            }
            let mut result: Vec<_> = heap.into_vec();
            result.sort_by(|a, b| a.value.partial_cmp(&b.value).unwrap_or(Ordering::Equal));
            Ok(result.into_iter().map(|item| item.index).collect())
        }
    }
}

/// Fallback: sort every finite-keyed index when k covers the whole slice.
fn sort_all_indices<T, F>(items: &[T], order: SortOrder, key: F) -> Vec<usize>
where
    F: Fn(&T) -> f64,
{
    let mut indexed: Vec<(usize, f64)> = items
        .iter()
        .enumerate()
        .map(|(index, item)| (index, key(item)))
        .filter(|(_, value)| !value.is_nan())
        .collect();

    indexed.sort_by(|a, b| {
        let ordering = a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal);
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });

    indexed.into_iter().map(|(index, _)| index).collect()
}

// Heap item for descending order (min-heap: smallest of the kept K at top)
#[derive(Debug)]
struct MinHeapItem {
    value: f64,
    index: usize,
}

impl PartialEq for MinHeapItem {
    fn eq(&self, other: &Self) -> bool {
        self.value.partial_cmp(&other.value) == Some(Ordering::Equal)
    }
}

impl Eq for MinHeapItem {}

impl Ord for MinHeapItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse comparison for min-heap behavior.
        other
            .value
            .partial_cmp(&self.value)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for MinHeapItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Heap item for ascending order (max-heap: largest of the kept K at top)
#[derive(Debug)]
struct MaxHeapItem {
    value: f64,
    index: usize,
}

impl PartialEq for MaxHeapItem {
    fn eq(&self, other: &Self) -> bool {
        self.value.partial_cmp(&other.value) == Some(Ordering::Equal)
    }
}

impl Eq for MaxHeapItem {}

impl Ord for MaxHeapItem {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .partial_cmp(&other.value)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for MaxHeapItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_k_descending_basic() {
        let values = [1.0, 5.0, 3.0, 9.0, 2.0];
        let result = top_k_indices_by(&values, 3, SortOrder::Descending, |v| *v).unwrap();
        assert_eq!(result, vec![3, 1, 2]);
    }

    #[test]
    fn test_top_k_ascending_basic() {
        let values = [1.0, 5.0, 3.0, 9.0, 2.0];
        let result = top_k_indices_by(&values, 3, SortOrder::Ascending, |v| *v).unwrap();
        assert_eq!(result, vec![0, 4, 2]);
    }

    #[test]
    fn test_top_k_k_equals_length() {
        let values = [3.0, 1.0, 2.0];
        let result = top_k_indices_by(&values, 3, SortOrder::Descending, |v| *v).unwrap();
        assert_eq!(result, vec![0, 2, 1]);
    }

    #[test]
    fn test_top_k_k_greater_than_length() {
        let values = [3.0, 1.0, 2.0];
        let result = top_k_indices_by(&values, 10, SortOrder::Descending, |v| *v).unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(result[0], 0);
    }

    #[test]
    fn test_top_k_k_zero_fails() {
        let values = [1.0, 2.0];
        let result = top_k_indices_by(&values, 0, SortOrder::Descending, |v| *v);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("must be greater than 0"));
    }

    #[test]
    fn test_top_k_skips_nan_keys() {
        let values = [1.0, f64::NAN, 3.0, f64::NAN, 2.0];
        let result = top_k_indices_by(&values, 2, SortOrder::Descending, |v| *v).unwrap();
        assert_eq!(result, vec![2, 4]);
    }

    #[test]
    fn test_top_k_with_struct_key() {
        struct Scored {
            id: &'static str,
            score: f64,
        }
        let items = [
            Scored { id: "a", score: 40.0 },
            Scored { id: "b", score: 90.0 },
            Scored { id: "c", score: 75.0 },
        ];
        let result = top_k_indices_by(&items, 2, SortOrder::Descending, |s| s.score).unwrap();
        assert_eq!(items[result[0]].id, "b");
        assert_eq!(items[result[1]].id, "c");
    }

    #[test]
    fn test_top_k_empty_slice() {
        let values: [f64; 0] = [];
        let result = top_k_indices_by(&values, 3, SortOrder::Descending, |v| *v).unwrap();
        assert!(result.is_empty());
    }
}
