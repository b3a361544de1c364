//! Range membership checks for CEPs.

use crate::error::Result;
use crate::source::CepRangeSource;
use crate::store::RangeEntry;
use brids_ids::{cep, CepKey};

/// Answers whether a CEP falls inside the ranges known for a state or location.
///
/// The validator owns its source, so the source's cache lives as long as the
/// validator does. Pass `&mut source` to keep ownership on the caller's side.
#[derive(Debug)]
pub struct CepRangeValidator<S: CepRangeSource> {
    source: S,
}

impl<S: CepRangeSource> CepRangeValidator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    /// Whether `cep` lies in one of the ranges of `location` in `state`.
    ///
    /// A CEP that fails the structural check yields `Ok(false)` and the
    /// source is not consulted. Unknown states and locations, as well as
    /// upstream failures, are returned as errors.
    pub fn is_valid_by_location(&mut self, cep: &str, state: &str, location: &str) -> Result<bool> {
        let Some(key) = structural_key(cep) else {
            return Ok(false);
        };

        let ranges = self.source.ranges_by_location(state, location)?;
        Ok(any_contains(&ranges, &key))
    }

    /// Whether `cep` lies in any range of `state`.
    pub fn is_valid_by_state(&mut self, cep: &str, state: &str) -> Result<bool> {
        let Some(key) = structural_key(cep) else {
            return Ok(false);
        };

        let ranges = self.source.ranges_by_state(state)?;
        Ok(any_contains(&ranges, &key))
    }
}

fn structural_key(raw: &str) -> Option<CepKey> {
    if !cep::is_valid(raw) {
        tracing::debug!("CEP {:?} fails the structural check", raw);
        return None;
    }
    cep::parse(raw).ok()
}

fn any_contains(ranges: &[RangeEntry], key: &CepKey) -> bool {
    ranges.iter().any(|range| range.contains(key))
}
