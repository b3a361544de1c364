//! IBGE município (county) codes.
//!
//! Although the município code carries a verification digit, nine official
//! codes have digits that do not follow the rule (see SEFAZ/AL technical
//! note NT2008.004). Those are listed in [`EXCEPTIONS`] and accepted as-is.

use crate::error::{IdError, IdKind, Result};
use brids_core::digits::{clean, to_digits};

/// Complete município codes have 7 digits.
pub const LENGTH: usize = 7;

/// Digits before the verification digit.
pub const LENGTH_WITHOUT_VERIFICATION: usize = 6;

/// Official codes whose verification digit breaks the checksum rule.
pub const EXCEPTIONS: [(&str, u32); 9] = [
    ("2201919", 9), // Bom Princípio do Piauí, PI
    ("2201988", 8), // Brejo do Piauí, PI
    ("2202251", 1), // Canavieira, PI
    ("2611533", 3), // Quixaba, PE
    ("3117836", 6), // Cônego Marinho, MG
    ("3152131", 1), // Ponto Chique, MG
    ("4305871", 1), // Coronel Barros, RS
    ("5203939", 9), // Buriti de Goiás, GO
    ("5203962", 2), // Buritinópolis, GO
];

const WEIGHTS: [u32; 6] = [1, 2, 1, 2, 1, 2];

/// Check whether a município code is valid.
#[must_use]
pub fn is_valid(municipio: &str) -> bool {
    let municipio = clean(municipio);

    if municipio.len() != LENGTH || municipio.starts_with('0') {
        return false;
    }

    let expected = u32::from(municipio.as_bytes()[6] - b'0');
    verification_digit(&municipio[..LENGTH_WITHOUT_VERIFICATION])
        .is_ok_and(|digit| digit == expected)
}

/// Calculate the verification digit for the first six digits of a code.
///
/// Codes in [`EXCEPTIONS`] yield their official digit.
///
/// # Errors
/// Returns `IdError::InvalidLength` with fewer than six digits.
pub fn verification_digit(municipio: &str) -> Result<u32> {
    let municipio = clean(municipio);

    if municipio.len() < LENGTH_WITHOUT_VERIFICATION {
        return Err(IdError::length(IdKind::Municipio, &municipio, "at least 6"));
    }

    let stem = &municipio[..LENGTH_WITHOUT_VERIFICATION];
    if let Some((_, digit)) = EXCEPTIONS.iter().find(|(code, _)| code.starts_with(stem)) {
        return Ok(*digit);
    }

    let digits = to_digits(stem).unwrap_or_default();
    let sum: u32 = digits
        .iter()
        .zip(WEIGHTS)
        .map(|(d, w)| {
            let n = d * w;
            if n < 10 {
                n
            } else {
                1 + n % 10
            }
        })
        .sum();

    Ok((10 - sum % 10) % 10)
}
