//! Reorder Engine
//!
//! Pure stable move within a sequence: remove the element at `from`,
//! reinsert it at `to`, shifting the elements between them by one place.
//! Out-of-range indices are rejected before any mutation; there is no
//! clamping and no wraparound.

use crate::domain::{DomainError, DomainResult};

/// Move the element at `from` so it ends up at `to`.
///
/// `from == to` leaves the sequence untouched. A single move followed by
/// the inverse move (`to`, `from`) restores the original order.
pub fn reorder<T>(items: &mut Vec<T>, from: usize, to: usize) -> DomainResult<()> {
    let len = items.len();
    if from >= len {
        return Err(DomainError::IndexOutOfRange { index: from, len });
    }
    if to >= len {
        return Err(DomainError::IndexOutOfRange { index: to, len });
    }
    if from == to {
        return Ok(());
    }
    let moved = items.remove(from);
    items.insert(to, moved);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn seq(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_forward_move() {
        let mut s = seq(&["A", "B", "C", "D"]);
        reorder(&mut s, 0, 2).unwrap();
        assert_eq!(s, seq(&["B", "C", "A", "D"]));
    }

    #[test]
    fn test_backward_move() {
        let mut s = seq(&["A", "B", "C", "D"]);
        reorder(&mut s, 3, 1).unwrap();
        assert_eq!(s, seq(&["A", "D", "B", "C"]));
    }

    #[test]
    fn test_same_index_is_identity() {
        let mut s = seq(&["A", "B", "C"]);
        reorder(&mut s, 1, 1).unwrap();
        assert_eq!(s, seq(&["A", "B", "C"]));
    }

    #[test]
    fn test_out_of_range_rejected_without_mutation() {
        let mut s = seq(&["A", "B"]);
        assert_eq!(
            reorder(&mut s, 2, 0),
            Err(DomainError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(
            reorder(&mut s, 0, 5),
            Err(DomainError::IndexOutOfRange { index: 5, len: 2 })
        );
        assert_eq!(s, seq(&["A", "B"]));
    }

    #[test]
    fn test_empty_sequence_rejects_any_index() {
        let mut s: Vec<String> = Vec::new();
        assert!(reorder(&mut s, 0, 0).is_err());
    }

    proptest! {
        #[test]
        fn prop_preserves_ids_and_length(
            len in 1usize..24,
            from_seed in 0usize..24,
            to_seed in 0usize..24,
        ) {
            let original: Vec<String> = (0..len).map(|i| format!("id-{}", i)).collect();
            let (from, to) = (from_seed % len, to_seed % len);
            let mut moved = original.clone();
            reorder(&mut moved, from, to).unwrap();

            prop_assert_eq!(moved.len(), original.len());
            let mut a = moved.clone();
            let mut b = original.clone();
            a.sort();
            b.sort();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_move_lands_at_target(
            len in 1usize..24,
            from_seed in 0usize..24,
            to_seed in 0usize..24,
        ) {
            let original: Vec<String> = (0..len).map(|i| format!("id-{}", i)).collect();
            let (from, to) = (from_seed % len, to_seed % len);
            let mut moved = original.clone();
            reorder(&mut moved, from, to).unwrap();
            prop_assert_eq!(&moved[to], &original[from]);
        }

        #[test]
        fn prop_move_then_inverse_restores(
            len in 2usize..24,
            from_seed in 0usize..24,
            to_seed in 0usize..24,
        ) {
            let original: Vec<String> = (0..len).map(|i| format!("id-{}", i)).collect();
            let (from, to) = (from_seed % len, to_seed % len);
            let mut s = original.clone();
            reorder(&mut s, from, to).unwrap();
            reorder(&mut s, to, from).unwrap();
            prop_assert_eq!(s, original);
        }

        #[test]
        fn prop_unmoved_elements_keep_relative_order(
            len in 3usize..24,
            from_seed in 0usize..24,
            to_seed in 0usize..24,
        ) {
            let original: Vec<String> = (0..len).map(|i| format!("id-{}", i)).collect();
            let (from, to) = (from_seed % len, to_seed % len);
            let moved_id = original[from].clone();
            let mut s = original.clone();
            reorder(&mut s, from, to).unwrap();

            let rest_before: Vec<&String> =
                original.iter().filter(|id| **id != moved_id).collect();
            let rest_after: Vec<&String> =
                s.iter().filter(|id| **id != moved_id).collect();
            prop_assert_eq!(rest_before, rest_after);
        }
    }
}
