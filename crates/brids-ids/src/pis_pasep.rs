//! PIS/PASEP worker registration numbers.

use crate::error::{IdError, IdKind, Result};
use brids_core::digits::{clean, to_digits, weighted_sum, zero_pad};
use rand::Rng;

/// Complete PIS/PASEP numbers are 11 digits long.
pub const LENGTH: usize = 11;

const WEIGHTS: [u32; 10] = [3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Check whether a PIS/PASEP is valid, left-padding short input with zeros.
#[must_use]
pub fn is_valid(pis_pasep: &str) -> bool {
    is_valid_with(pis_pasep, true)
}

/// Check whether a PIS/PASEP is valid, optionally padding short input.
#[must_use]
pub fn is_valid_with(pis_pasep: &str, autopad: bool) -> bool {
    let pis_pasep = clean(pis_pasep);

    if pis_pasep.is_empty() || pis_pasep.len() > LENGTH {
        return false;
    }
    if pis_pasep.len() < LENGTH && !autopad {
        return false;
    }

    let pis_pasep = zero_pad(&pis_pasep, LENGTH);
    if pis_pasep.bytes().all(|b| b == b'0') {
        return false;
    }

    verification_digit(&pis_pasep)
        .is_ok_and(|digit| u32::from(pis_pasep.as_bytes()[10] - b'0') == digit)
}

/// Calculate the trailing digit that makes a PIS/PASEP valid.
///
/// # Errors
/// Returns `IdError::InvalidLength` with fewer than ten digits.
pub fn verification_digit(pis_pasep: &str) -> Result<u32> {
    let pis_pasep = clean(pis_pasep);

    if pis_pasep.len() < 10 {
        return Err(IdError::length(
            IdKind::PisPasep,
            &pis_pasep,
            "10 (without the verification digit)",
        ));
    }

    let digits = to_digits(&pis_pasep[..10]).unwrap_or_default();
    let remainder = weighted_sum(&digits, &WEIGHTS) % 11;

    Ok(if remainder < 2 { 0 } else { 11 - remainder })
}

/// Left-pad a PIS/PASEP with zeros. The checksum is not verified.
pub fn pad(pis_pasep: &str) -> Result<String> {
    let digits = clean(pis_pasep);

    if digits.is_empty() || digits.len() > LENGTH {
        return Err(IdError::length(IdKind::PisPasep, &digits, "1 to 11"));
    }
    Ok(zero_pad(&digits, LENGTH))
}

/// Like [`pad`], failing if the padded number is not valid.
pub fn pad_validated(pis_pasep: &str) -> Result<String> {
    let padded = pad(pis_pasep)?;
    if is_valid_with(&padded, false) {
        Ok(padded)
    } else {
        Err(IdError::checksum(IdKind::PisPasep, &padded))
    }
}

fn render(pis_pasep: &str) -> String {
    format!(
        "{}.{}.{}-{}",
        &pis_pasep[..3],
        &pis_pasep[3..7],
        &pis_pasep[7..10],
        &pis_pasep[10..]
    )
}

/// Applies the format `000.0000.000-0`.
pub fn format(pis_pasep: &str) -> Result<String> {
    pad(pis_pasep).map(|p| render(&p))
}

/// Create a random, valid PIS/PASEP.
#[must_use]
pub fn random(formatted: bool) -> String {
    random_with(&mut rand::thread_rng(), formatted)
}

/// Create a random, valid PIS/PASEP using the given generator.
pub fn random_with<R: Rng>(rng: &mut R, formatted: bool) -> String {
    let stem = rng.gen_range(1_000_000_000_u64..=9_999_999_999).to_string();
    let digit = verification_digit(&stem).unwrap_or_default();
    let pis_pasep = format!("{stem}{digit}");

    if formatted {
        render(&pis_pasep)
    } else {
        pis_pasep
    }
}
