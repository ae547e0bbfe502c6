/// Bidirectional sparse table between per-sample allele indices and merged
/// allele indices.
///
/// Grounded on the teacher's habit of keeping a reusable scratch structure
/// whose backing storage survives a `reset()` across many sites rather
/// than being reallocated each time, the same shape of optimization as
/// `GenotypeLikelihoodCalculator` reusing its own per-thread scratch
/// buffers across calls instead of rebuilding them. This is a
/// row-of-rows layout: each sample's row grows independently, so growing
/// one sample's merged-axis capacity never moves or invalidates another
/// sample's entries.
#[derive(Debug, Clone, Default)]
pub struct AlleleMap {
    /// input_to_merged[sample][input_idx] = Some(merged_idx) or None (missing).
    input_to_merged: Vec<Vec<Option<usize>>>,
    /// merged_to_input[sample][merged_idx] = Some(input_idx) or None (missing).
    merged_to_input: Vec<Vec<Option<usize>>>,
}

impl AlleleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears every row's entries in place, keeping each row `Vec`'s
    /// allocation (and the outer `Vec`'s) intact for the next site to
    /// reuse. Reuse across calls is a throughput optimization, not a
    /// correctness requirement, but when an implementation does reuse, it
    /// should truncate rather than drop and reallocate.
    pub fn reset(&mut self) {
        for row in self.input_to_merged.iter_mut() {
            row.clear();
        }
        for row in self.merged_to_input.iter_mut() {
            row.clear();
        }
    }

    /// Grows the map to cover at least `n_samples` rows, each with room for
    /// at least `n_merged_alleles` merged-axis entries. Never shrinks and
    /// never invalidates existing entries.
    pub fn ensure_capacity(&mut self, n_samples: usize, n_merged_alleles: usize) {
        if self.input_to_merged.len() < n_samples {
            self.input_to_merged.resize_with(n_samples, Vec::new);
        }
        if self.merged_to_input.len() < n_samples {
            self.merged_to_input.resize_with(n_samples, Vec::new);
        }
        for row in self.merged_to_input.iter_mut() {
            if row.len() < n_merged_alleles {
                row.resize(n_merged_alleles, None);
            }
        }
    }

    fn ensure_input_row(&mut self, sample: usize, input_idx: usize) {
        if self.input_to_merged.len() <= sample {
            self.input_to_merged.resize_with(sample + 1, Vec::new);
        }
        let row = &mut self.input_to_merged[sample];
        if row.len() <= input_idx {
            row.resize(input_idx + 1, None);
        }
    }

    fn ensure_merged_row(&mut self, sample: usize, merged_idx: usize) {
        if self.merged_to_input.len() <= sample {
            self.merged_to_input.resize_with(sample + 1, Vec::new);
        }
        let row = &mut self.merged_to_input[sample];
        if row.len() <= merged_idx {
            row.resize(merged_idx + 1, None);
        }
    }

    /// Records both directions of one mapping for `sample`.
    pub fn set(&mut self, sample: usize, input_idx: usize, merged_idx: usize) {
        self.ensure_input_row(sample, input_idx);
        self.ensure_merged_row(sample, merged_idx);
        self.input_to_merged[sample][input_idx] = Some(merged_idx);
        self.merged_to_input[sample][merged_idx] = Some(input_idx);
    }

    pub fn merged_of(&self, sample: usize, input_idx: usize) -> Option<usize> {
        self.input_to_merged
            .get(sample)
            .and_then(|row| row.get(input_idx).copied().flatten())
    }

    pub fn input_of(&self, sample: usize, merged_idx: usize) -> Option<usize> {
        self.merged_to_input
            .get(sample)
            .and_then(|row| row.get(merged_idx).copied().flatten())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_is_symmetric() {
        let mut map = AlleleMap::new();
        map.set(0, 1, 2);
        assert_eq!(map.merged_of(0, 1), Some(2));
        assert_eq!(map.input_of(0, 2), Some(1));
    }

    #[test]
    fn growth_does_not_invalidate_earlier_entries() {
        let mut map = AlleleMap::new();
        map.set(0, 0, 0);
        map.set(0, 1, 1);
        map.ensure_capacity(2, 5);
        assert_eq!(map.merged_of(0, 0), Some(0));
        assert_eq!(map.merged_of(0, 1), Some(1));
        map.set(1, 0, 0);
        assert_eq!(map.merged_of(0, 0), Some(0));
    }

    #[test]
    fn missing_lookup_is_none() {
        let map = AlleleMap::new();
        assert_eq!(map.merged_of(0, 0), None);
        assert_eq!(map.input_of(3, 3), None);
    }

    #[test]
    fn reset_clears_entries_but_keeps_row_capacity() {
        let mut map = AlleleMap::new();
        map.set(0, 0, 0);
        map.set(0, 5, 2);
        let input_cap_before = map.input_to_merged[0].capacity();
        let merged_cap_before = map.merged_to_input[0].capacity();

        map.reset();

        assert_eq!(map.merged_of(0, 0), None);
        assert_eq!(map.input_to_merged.len(), 1);
        assert_eq!(map.input_to_merged[0].len(), 0);
        assert_eq!(map.input_to_merged[0].capacity(), input_cap_before);
        assert_eq!(map.merged_to_input[0].len(), 0);
        assert_eq!(map.merged_to_input[0].capacity(), merged_cap_before);
    }
}
