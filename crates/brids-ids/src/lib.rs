//! brids-ids - Brazilian identifier checksums.
//!
//! Parsing, validation, formatting and generation of:
//!
//! - [`cep`] - postal codes, parsed into an ordered [`CepKey`]
//! - [`cpf`] - individual taxpayer numbers
//! - [`pis_pasep`] - worker registration numbers
//! - [`municipio`] - IBGE county codes
//! - [`nupj`] - unified lawsuit numbers
//!
//! Every function accepts raw digits or the usual punctuated notation.
//!
//! # Example
//!
//! ```rust
//! use brids_ids::{cep, cpf};
//!
//! assert!(cpf::is_valid("529.982.247-25"));
//! assert_eq!(cep::format("1310200").unwrap(), "01310-200");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod cep;
pub mod cpf;
#[allow(missing_docs)]
pub mod error;
pub mod municipio;
#[allow(missing_docs)]
pub mod nupj;
pub mod pis_pasep;

// Re-export commonly used types
pub use cep::CepKey;
pub use cpf::Cpf;
pub use error::{IdError, IdKind, Result};
pub use nupj::Nupj;
