//! CPF ("Cadastro de Pessoas Físicas") validation, formatting and generation.

use crate::error::{IdError, IdKind, Result};
use brids_core::digits::{clean, to_digits, weighted_sum, zero_pad};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Complete CPFs are 11 digits long.
pub const LENGTH: usize = 11;

const WEIGHTS: [u32; 9] = [1, 2, 3, 4, 5, 6, 7, 8, 9];

/// Check whether a CPF is valid, left-padding short input with zeros.
#[must_use]
pub fn is_valid(cpf: &str) -> bool {
    is_valid_with(cpf, true)
}

/// Check whether a CPF is valid.
///
/// With `autopad` disabled, input shorter than 11 digits is rejected instead
/// of being zero-padded.
#[must_use]
pub fn is_valid_with(cpf: &str, autopad: bool) -> bool {
    let cpf = clean(cpf);

    if cpf.is_empty() || cpf.len() > LENGTH {
        return false;
    }
    if cpf.len() < LENGTH && !autopad {
        return false;
    }

    let cpf = zero_pad(&cpf, LENGTH);
    if cpf.bytes().all(|b| b == b'0') {
        return false;
    }

    match verification_digits(&cpf) {
        Ok((first, second)) => {
            let digits = cpf.as_bytes();
            u32::from(digits[9] - b'0') == first && u32::from(digits[10] - b'0') == second
        }
        Err(_) => false,
    }
}

/// Find the two check digits that make a CPF valid.
///
/// Only the first nine digits are considered.
///
/// # Errors
/// Returns `IdError::InvalidLength` with fewer than nine digits.
pub fn verification_digits(cpf: &str) -> Result<(u32, u32)> {
    let cpf = clean(cpf);

    if cpf.len() < 9 {
        return Err(IdError::length(IdKind::Cpf, &cpf, "at least 9"));
    }

    let mut digits = to_digits(&cpf[..9]).unwrap_or_default();
    let first = weighted_sum(&digits, &WEIGHTS) % 11 % 10;
    digits.push(first);
    let second = weighted_sum(&digits[1..], &WEIGHTS) % 11 % 10;

    Ok((first, second))
}

/// Left-pad a CPF with zeros, failing if the padded result is invalid.
pub fn pad(cpf: &str) -> Result<String> {
    let digits = clean(cpf);

    if digits.is_empty() || digits.len() > LENGTH {
        return Err(IdError::length(IdKind::Cpf, &digits, "1 to 11"));
    }

    let padded = zero_pad(&digits, LENGTH);
    if !is_valid_with(&padded, false) {
        return Err(IdError::checksum(IdKind::Cpf, cpf));
    }
    Ok(padded)
}

fn render(cpf: &str) -> String {
    format!("{}.{}.{}-{}", &cpf[..3], &cpf[3..6], &cpf[6..9], &cpf[9..])
}

/// Applies the typical `000.000.000-00` formatting.
pub fn format(cpf: &str) -> Result<String> {
    pad(cpf).map(|cpf| render(&cpf))
}

/// Create a random, valid CPF.
#[must_use]
pub fn random(formatted: bool) -> String {
    random_with(&mut rand::thread_rng(), formatted)
}

/// Create a random, valid CPF using the given generator.
pub fn random_with<R: Rng>(rng: &mut R, formatted: bool) -> String {
    let stem = rng.gen_range(100_000_000_u32..=999_999_999).to_string();
    let (first, second) = verification_digits(&stem).unwrap_or_default();
    let cpf = format!("{stem}{first}{second}");

    if formatted {
        render(&cpf)
    } else {
        cpf
    }
}

/// A validated CPF, stored as its 11 digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cpf(String);

impl Cpf {
    /// Parse and validate a CPF in any common notation.
    pub fn parse(cpf: &str) -> Result<Self> {
        pad(cpf).map(Self)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The two trailing check digits.
    #[must_use]
    pub fn check_digits(&self) -> &str {
        &self.0[9..]
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(&self.0))
    }
}
