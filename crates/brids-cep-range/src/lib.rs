//! brids-cep-range - CEP range lookup against the Correios website.
//!
//! The Correios "busca faixa de CEP" service has no API: it is a form that
//! posts a state code and answers with paginated HTML tables. This crate
//! drives that form, extracts the municipality-level ranges, caches them per
//! state and answers point-in-range questions for CEPs.
//!
//! # Features
//!
//! - Lazy loading: the state list and each state's ranges are fetched on first use
//! - Pagination through the "Proxima" continuation form until exhausted
//! - Per-state cache owned by the source, never refreshed
//! - Pluggable [`Transport`] so the protocol can run against scripted pages
//! - Inclusive range checks ordered by CEP prefixes
//!
//! # Example
//!
//! ```rust,no_run
//! use brids_cep_range::{CepRangeValidator, CorreiosRangeSource};
//!
//! # fn main() -> brids_cep_range::Result<()> {
//! let source = CorreiosRangeSource::new()?;
//! let mut validator = CepRangeValidator::new(source);
//!
//! assert!(validator.is_valid_by_location("71000-000", "DF", "Brasília")?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

#[allow(missing_docs)]
pub mod error;
pub mod pagination;
#[allow(missing_docs)]
pub mod parser;
pub mod source;
#[allow(missing_docs)]
pub mod store;
pub mod transport;
#[allow(missing_docs)]
pub mod validator;

// Re-export commonly used types
pub use error::{ErrorKind, RangeError, Result};
pub use pagination::PaginationCursor;
pub use parser::{parse_range_page, parse_states, RangePage};
pub use source::{CepRangeSource, CorreiosRangeSource};
pub use store::{LocationRanges, RangeEntry, RangeStore};
pub use transport::{HttpTransport, Transport};
pub use validator::CepRangeValidator;
