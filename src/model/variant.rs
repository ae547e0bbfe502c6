use crate::model::variant_call::VariantCall;

/// All per-sample calls at one site.
///
/// `call_idx_in_variant` is stable but not contiguous over *valid* calls:
/// an invalid call still occupies its slot in `calls`, it is simply
/// skipped by `iter_valid`.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    pub column_begin: i64,
    calls: Vec<VariantCall>,
}

impl Variant {
    pub fn new(column_begin: i64, calls: Vec<VariantCall>) -> Self {
        Self { column_begin, calls }
    }

    pub fn column_begin(&self) -> i64 {
        self.column_begin
    }

    pub fn num_calls(&self) -> usize {
        self.calls.len()
    }

    /// Number of calls that pass `is_valid` -- a convenience the teacher's
    /// own containers tend to expose alongside the raw count (e.g.
    /// `GenotypesContext::size` vs. its ploidy-filtering accessors).
    pub fn num_valid_calls(&self) -> usize {
        self.calls.iter().filter(|c| c.is_valid()).count()
    }

    pub fn call(&self, call_idx: usize) -> &VariantCall {
        &self.calls[call_idx]
    }

    pub fn call_mut(&mut self, call_idx: usize) -> &mut VariantCall {
        &mut self.calls[call_idx]
    }

    pub fn calls(&self) -> &[VariantCall] {
        &self.calls
    }

    pub fn calls_mut(&mut self) -> &mut [VariantCall] {
        &mut self.calls
    }

    /// Ascending `call_idx_in_variant` order, valid calls only: merged ALT
    /// order is first-seen order under this exact iteration order.
    pub fn iter_valid(&self) -> impl Iterator<Item = (usize, &VariantCall)> {
        self.calls
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_valid())
    }

    pub fn iter_valid_mut(&mut self) -> impl Iterator<Item = (usize, &mut VariantCall)> {
        self.calls
            .iter_mut()
            .enumerate()
            .filter(|(_, c)| c.is_valid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iter_valid_skips_invalid_calls_but_keeps_index() {
        let calls = vec![
            VariantCall::new(100),
            VariantCall::invalid(100),
            VariantCall::new(100),
        ];
        let variant = Variant::new(100, calls);
        let indices: Vec<usize> = variant.iter_valid().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![0, 2]);
        assert_eq!(variant.num_calls(), 3);
        assert_eq!(variant.num_valid_calls(), 2);
    }
}
