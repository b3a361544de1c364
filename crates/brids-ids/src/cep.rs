//! CEP ("Código de Endereçamento Postal") parsing and formatting.
//!
//! A CEP is `NNNNN-NNN`: five geographic digits (region, sub-region, sector,
//! sub-sector, division) followed by a three-digit suffix. Short forms are
//! accepted: 4 or 5 digits name only the geographic part, 7 or 8 digits the
//! full code with leading zeros dropped.

use crate::error::{IdError, IdKind, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Payload lengths accepted after separators are removed.
pub const VALID_LENGTHS: [usize; 4] = [4, 5, 7, 8];

fn strip_separators(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != '-' && *c != '.' && !c.is_whitespace())
        .collect()
}

fn normalize(raw: &str) -> Result<String> {
    let cep = strip_separators(raw);

    if !VALID_LENGTHS.contains(&cep.len()) {
        return Err(IdError::length(IdKind::Cep, &cep, "4, 5, 7 or 8"));
    }
    if !cep.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IdError::InvalidFormat {
            kind: IdKind::Cep,
            value: raw.to_string(),
            reason: "only digits and '-' or '.' separators are allowed".to_string(),
        });
    }

    let padded = if cep.len() <= 5 {
        format!("{cep:0>5}000")
    } else {
        format!("{cep:0>8}")
    };
    Ok(padded)
}

/// Structural check: digits only, with a payload of 4, 5, 7 or 8 digits.
#[must_use]
pub fn is_valid(raw: &str) -> bool {
    normalize(raw).is_ok()
}

/// Applies the canonical `00000-000` formatting, zero-padding short forms.
pub fn format(raw: &str) -> Result<String> {
    let cep = normalize(raw)?;
    Ok(format!("{}-{}", &cep[..5], &cep[5..]))
}

/// Split a CEP into its geographic prefixes and suffix.
pub fn parse(raw: &str) -> Result<CepKey> {
    CepKey::parse(raw)
}

/// A parsed CEP.
///
/// The geographic fields are the successive leading prefixes of the
/// five-digit code: for `38184-999`, `region` is 3, `sub_region` 38,
/// `sector` 381, `sub_sector` 3818 and `division` 38184.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CepKey {
    formatted: String,
    region: u32,
    sub_region: u32,
    sector: u32,
    sub_sector: u32,
    division: u32,
    suffix: String,
}

impl CepKey {
    /// Parse a raw or formatted CEP.
    ///
    /// # Errors
    /// Returns `IdError::InvalidLength` or `IdError::InvalidFormat` when the
    /// input is not reducible to 4, 5, 7 or 8 digits.
    pub fn parse(raw: &str) -> Result<Self> {
        let cep = normalize(raw)?;
        let prefix = |len: usize| -> u32 {
            // normalize() guarantees five leading ASCII digits
            cep[..len].parse().unwrap_or_default()
        };

        Ok(Self {
            formatted: format!("{}-{}", &cep[..5], &cep[5..]),
            region: prefix(1),
            sub_region: prefix(2),
            sector: prefix(3),
            sub_sector: prefix(4),
            division: prefix(5),
            suffix: cep[5..].to_string(),
        })
    }

    /// Canonical `NNNNN-NNN` rendering.
    #[must_use]
    pub fn formatted(&self) -> &str {
        &self.formatted
    }

    #[must_use]
    pub fn region(&self) -> u32 {
        self.region
    }

    #[must_use]
    pub fn sub_region(&self) -> u32 {
        self.sub_region
    }

    #[must_use]
    pub fn sector(&self) -> u32 {
        self.sector
    }

    #[must_use]
    pub fn sub_sector(&self) -> u32 {
        self.sub_sector
    }

    #[must_use]
    pub fn division(&self) -> u32 {
        self.division
    }

    /// The trailing three digits.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    fn suffix_value(&self) -> u32 {
        self.suffix.parse().unwrap_or_default()
    }

    /// Whether `self` lies in the inclusive range `[low, high]`.
    #[must_use]
    pub fn is_between(&self, low: &CepKey, high: &CepKey) -> bool {
        self >= low && self <= high
    }
}

impl Ord for CepKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.region
            .cmp(&other.region)
            .then(self.sub_region.cmp(&other.sub_region))
            .then(self.sector.cmp(&other.sector))
            .then(self.sub_sector.cmp(&other.sub_sector))
            .then(self.division.cmp(&other.division))
            .then_with(|| self.suffix_value().cmp(&other.suffix_value()))
    }
}

impl PartialOrd for CepKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CepKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted)
    }
}

impl FromStr for CepKey {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CepKey {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<CepKey> for String {
    fn from(value: CepKey) -> Self {
        value.formatted
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Raw CEPs in every accepted length.
    fn raw_cep() -> impl Strategy<Value = String> {
        "[0-9]{4}|[0-9]{5}|[0-9]{7}|[0-9]{8}"
    }

    /// Pairs of eight-digit CEPs sharing a prefix of random length, so ties
    /// on the leading fields (and full equality) come up often.
    fn related_pair() -> impl Strategy<Value = (String, String)> {
        ("[0-9]{8}", 0usize..=8, "[0-9]{8}")
            .prop_map(|(a, shared, tail)| {
                let b = format!("{}{}", &a[..shared], &tail[shared..]);
                (a, b)
            })
    }

    fn fields(key: &CepKey) -> (u32, u32, u32, u32, u32, &str) {
        (
            key.region(),
            key.sub_region(),
            key.sector(),
            key.sub_sector(),
            key.division(),
            key.suffix(),
        )
    }

    /// Ordering that walks region, sub-region, sub-sector and division, then
    /// the numeric suffix. The sector is not consulted.
    fn sectorless(key: &CepKey, other: &CepKey, accept: fn(Ordering) -> bool) -> bool {
        let sequence = [
            (key.region(), other.region()),
            (key.sub_region(), other.sub_region()),
            (key.sub_sector(), other.sub_sector()),
            (key.division(), other.division()),
        ];
        for (a, b) in sequence {
            let ord = a.cmp(&b);
            if ord != Ordering::Equal {
                return accept(ord);
            }
        }
        accept(key.suffix_value().cmp(&other.suffix_value()))
    }

    proptest! {
        /// Parsing the canonical form gives the same key as parsing the input.
        #[test]
        fn format_then_parse_is_stable(raw in raw_cep()) {
            let formatted = format(&raw).unwrap();
            prop_assert_eq!(parse(&formatted).unwrap(), parse(&raw).unwrap());
            prop_assert_eq!(format(&formatted).unwrap(), formatted);
        }

        /// `a <= b && b <= a` holds exactly when every field is equal.
        #[test]
        fn mutual_le_iff_fields_equal((a, b) in related_pair()) {
            let a = parse(&a).unwrap();
            let b = parse(&b).unwrap();
            prop_assert_eq!(a <= b && b <= a, fields(&a) == fields(&b));
            prop_assert_eq!(a <= b && b <= a, a == b);
        }

        /// Including the sector never changes the outcome of a comparison.
        #[test]
        fn order_matches_sectorless_comparison((a, b) in related_pair()) {
            let a = parse(&a).unwrap();
            let b = parse(&b).unwrap();
            prop_assert_eq!(a <= b, sectorless(&a, &b, Ordering::is_le));
            prop_assert_eq!(a >= b, sectorless(&a, &b, Ordering::is_ge));
        }

        /// Every key lies within the range it bounds on both sides.
        #[test]
        fn key_is_between_itself(raw in raw_cep()) {
            let key = parse(&raw).unwrap();
            prop_assert!(key.is_between(&key, &key));
        }
    }
}
