//! Batching of document units for model review

use super::unit::DocumentUnit;

/// Units submitted together in one model call
pub const DEFAULT_BATCH_SIZE: usize = 2;

/// A consecutive slice of a document's units
#[derive(Debug, Clone, Copy)]
pub struct Batch<'a> {
    /// 1-based batch number within the document
    pub number: usize,
    pub units: &'a [DocumentUnit],
}

impl Batch<'_> {
    /// Clause numbers covered by this batch
    pub fn clause_numbers(&self) -> impl Iterator<Item = usize> + '_ {
        self.units.iter().map(|u| u.index)
    }
}

/// Partition units into consecutive batches of at most `size` units.
///
/// Batches are exhaustive, non-overlapping and follow document order.
/// A `size` of zero is treated as one.
pub fn batches(units: &[DocumentUnit], size: usize) -> Vec<Batch<'_>> {
    units
        .chunks(size.max(1))
        .enumerate()
        .map(|(i, units)| Batch {
            number: i + 1,
            units,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::unit::segment;

    fn units(n: usize) -> Vec<DocumentUnit> {
        let paragraphs: Vec<String> = (0..n)
            .map(|i| format!("Clause text number {} with enough length", i))
            .collect();
        segment(&paragraphs, 20)
    }

    #[test]
    fn test_batches_are_exhaustive_and_ordered() {
        for n in 0..9 {
            let units = units(n);
            for size in 1..5 {
                let batches = batches(&units, size);
                let indices: Vec<usize> = batches.iter().flat_map(|b| b.clause_numbers()).collect();
                assert_eq!(indices, (1..=n).collect::<Vec<_>>());
                assert_eq!(batches.len(), n.div_ceil(size));
                assert!(batches.iter().all(|b| b.units.len() <= size && !b.units.is_empty()));
            }
        }
    }

    #[test]
    fn test_odd_unit_count_leaves_short_last_batch() {
        let units = units(5);
        let batches = batches(&units, DEFAULT_BATCH_SIZE);
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[2].number, 3);
        assert_eq!(batches[2].clause_numbers().collect::<Vec<_>>(), vec![5]);
    }

    #[test]
    fn test_zero_size_behaves_as_one() {
        let units = units(3);
        assert_eq!(batches(&units, 0).len(), 3);
    }
}
