//! NUPJ ("Numeração Única de Processo Judicial"), the lawsuit numbering
//! standard of the Conselho Nacional de Justiça (CNJ Resolution 65/2008).
//!
//! Layout: `NNNNNNN-DD.AAAA.J.TR.OOOO` where `N` is the lawsuit sequence, `DD`
//! the check digits, `AAAA` the filing year, `J` the justice segment, `TR`
//! the court and `OOOO` the originating unit.
//!
//! The superior courts of the labor, electoral and military segments have no
//! documented court id; they use `00`, as do the councils' `90`. Both are
//! accepted for any segment during validation.

use crate::error::{IdError, IdKind, Result};
use brids_core::digits::{clean, zero_pad};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Complete NUPJs have 20 digits.
pub const LENGTH: usize = 20;

/// First year the numbering standard applies to.
pub const FIRST_YEAR: u16 = 2008;

const DIVISOR: u32 = 97;

/// Justice segments, indexed by the `J` digit. Index 0 is unused.
pub const SEGMENTS: [Option<&str>; 10] = [
    None,
    Some("Supremo Tribunal Federal"),
    Some("Conselho Nacional de Justiça"),
    Some("Superior Tribunal de Justiça"),
    Some("Justiça Federal"),
    Some("Justiça do Trabalho"),
    Some("Justiça Eleitoral"),
    Some("Justiça Militar da União"),
    Some("Justiça dos Estados e do Distrito Federal e Territórios"),
    Some("Justiça Militar Estadual"),
];

const FEDERAL_COURTS: [&str; 6] = [
    "TRIBUNAL REGIONAL FEDERAL DA 1ª REGIÃO",
    "TRIBUNAL REGIONAL FEDERAL DA 2ª REGIÃO",
    "TRIBUNAL REGIONAL FEDERAL DA 3ª REGIÃO",
    "TRIBUNAL REGIONAL FEDERAL DA 4ª REGIÃO",
    "TRIBUNAL REGIONAL FEDERAL DA 5ª REGIÃO",
    "TRIBUNAL REGIONAL FEDERAL DA 6ª REGIÃO",
];

const LABOR_COURTS: [&str; 24] = [
    "TRIBUNAL REGIONAL DO TRABALHO DA 1ª REGIÃO - RIO DE JANEIRO",
    "TRIBUNAL REGIONAL DO TRABALHO DA 2ª REGIÃO - SÃO PAULO",
    "TRIBUNAL REGIONAL DO TRABALHO DA 3ª REGIÃO - BELO HORIZONTE",
    "TRIBUNAL REGIONAL DO TRABALHO DA 4ª REGIÃO - PORTO ALEGRE",
    "TRIBUNAL REGIONAL DO TRABALHO DA 5ª REGIÃO - SALVADOR",
    "TRIBUNAL REGIONAL DO TRABALHO DA 6ª REGIÃO - RECIFE",
    "TRIBUNAL REGIONAL DO TRABALHO DA 7ª REGIÃO - FORTALEZA",
    "TRIBUNAL REGIONAL DO TRABALHO DA 8ª REGIÃO - BELÉM",
    "TRIBUNAL REGIONAL DO TRABALHO DA 9ª REGIÃO - CURITIBA",
    "TRIBUNAL REGIONAL DO TRABALHO DA 10ª REGIÃO - BRASÍLIA",
    "TRIBUNAL REGIONAL DO TRABALHO DA 11ª REGIÃO - MANAUS",
    "TRIBUNAL REGIONAL DO TRABALHO DA 12ª REGIÃO - FLORIANÓPOLIS",
    "TRIBUNAL REGIONAL DO TRABALHO DA 13ª REGIÃO - JOÃO PESSOA",
    "TRIBUNAL REGIONAL DO TRABALHO DA 14ª REGIÃO - PORTO VELHO",
    "TRIBUNAL REGIONAL DO TRABALHO DA 15ª REGIÃO - CAMPINAS",
    "TRIBUNAL REGIONAL DO TRABALHO DA 16ª REGIÃO - SÃO LUÍS",
    "TRIBUNAL REGIONAL DO TRABALHO DA 17ª REGIÃO - VITÓRIA",
    "TRIBUNAL REGIONAL DO TRABALHO DA 18ª REGIÃO - GOIÂNIA",
    "TRIBUNAL REGIONAL DO TRABALHO DA 19ª REGIÃO - MACEIÓ",
    "TRIBUNAL REGIONAL DO TRABALHO DA 20ª REGIÃO - ARACAJU",
    "TRIBUNAL REGIONAL DO TRABALHO DA 21ª REGIÃO - NATAL",
    "TRIBUNAL REGIONAL DO TRABALHO DA 22ª REGIÃO - TERESINA",
    "TRIBUNAL REGIONAL DO TRABALHO DA 23ª REGIÃO - CUIABÁ",
    "TRIBUNAL REGIONAL DO TRABALHO DA 24ª REGIÃO - CAMPO GRANDE",
];

const MILITARY_CIRCUITS: [&str; 12] = [
    "Circunscrição Judiciária Militar do Estado de São Paulo (1ª Região)",
    "Circunscrição Judiciária Militar do Estado do Rio de Janeiro (2ª Região)",
    "Circunscrição Judiciária Militar do Estado de Minas Gerais (3ª Região)",
    "Circunscrição Judiciária Militar do Estado do Rio Grande do Sul (4ª Região)",
    "Circunscrição Judiciária Militar do Estado de Pernambuco (5ª Região)",
    "Circunscrição Judiciária Militar do Estado do Pará (6ª Região)",
    "Circunscrição Judiciária Militar do Estado da Bahia (7ª Região)",
    "Circunscrição Judiciária Militar do Estado do Espírito Santo (8ª Região)",
    "Circunscrição Judiciária Militar do Estado do Ceará (9ª Região)",
    "Circunscrição Judiciária Militar do Estado do Maranhão (10ª Região)",
    "Circunscrição Judiciária Militar do Estado do Mato Grosso (11ª Região)",
    "Circunscrição Judiciária Militar do Estado de Goiás (12ª Região)",
];

/// States in `TR` order for the electoral and state segments.
const STATES: [&str; 27] = [
    "Acre",
    "Alagoas",
    "Amapá",
    "Amazonas",
    "Bahia",
    "Ceará",
    "Distrito Federal e Territórios",
    "Espírito Santo",
    "Goiás",
    "Maranhão",
    "Mato Grosso",
    "Mato Grosso do Sul",
    "Minas Gerais",
    "Pará",
    "Paraíba",
    "Paraná",
    "Pernambuco",
    "Piauí",
    "Rio de Janeiro",
    "Rio Grande do Norte",
    "Rio Grande do Sul",
    "Rondônia",
    "Roraima",
    "Santa Catarina",
    "Sergipe",
    "São Paulo",
    "Tocantins",
];

/// Name of the justice segment for the `J` digit.
#[must_use]
pub fn segment_name(segment: u8) -> Option<&'static str> {
    SEGMENTS.get(usize::from(segment)).copied().flatten()
}

/// Whether `court_id` is a regular court of `segment`.
fn is_listed_court(segment: u8, court_id: &str) -> bool {
    let Ok(court) = court_id.parse::<usize>() else {
        return false;
    };
    match segment {
        1..=3 => court == 0,
        4 => (1..=FEDERAL_COURTS.len()).contains(&court),
        5 => (1..=LABOR_COURTS.len()).contains(&court),
        6 | 8 => (1..=STATES.len()).contains(&court),
        7 => (1..=MILITARY_CIRCUITS.len()).contains(&court),
        9 => matches!(court, 13 | 21 | 26),
        _ => false,
    }
}

/// Describe the court identified by `segment` and `court_id`.
///
/// # Errors
/// Returns `IdError::InvalidCourt` when the pair is not known.
pub fn court_name(segment: u8, court_id: &str) -> Result<String> {
    let invalid = || IdError::InvalidCourt {
        segment,
        court_id: court_id.to_string(),
    };
    let court = court_id.parse::<usize>().map_err(|_| invalid())?;

    let name = match (segment, court) {
        (1..=3, 0) => segment_name(segment).map(str::to_string),
        (4, 90) => Some("Conselho da Justiça Federal".to_string()),
        (5, 0) => Some("Tribunal Superior do Trabalho".to_string()),
        (5, 90) => Some("Conselho Superior da Justiça do Trabalho".to_string()),
        (6, 0) => Some("Tribunal Superior Eleitoral".to_string()),
        (7, 0) => Some("Superior Tribunal Militar".to_string()),
        (4, n) => FEDERAL_COURTS.get(n.wrapping_sub(1)).map(|s| (*s).to_string()),
        (5, n) => LABOR_COURTS.get(n.wrapping_sub(1)).map(|s| (*s).to_string()),
        (6, n) => STATES
            .get(n.wrapping_sub(1))
            .map(|s| format!("Tribunal Regional Eleitoral - {s}")),
        (7, n) => MILITARY_CIRCUITS.get(n.wrapping_sub(1)).map(|s| (*s).to_string()),
        (8, n) => STATES
            .get(n.wrapping_sub(1))
            .map(|s| format!("Tribunal de Justiça - {s}")),
        (9, 13) => Some("Tribunal de Justiça Militar de Minas Gerais".to_string()),
        (9, 21) => Some("Tribunal de Justiça Militar do Rio Grande do Sul".to_string()),
        (9, 26) => Some("Tribunal de Justiça Militar de São Paulo".to_string()),
        _ => None,
    };

    name.ok_or_else(invalid)
}

/// The fields of a NUPJ.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Nupj {
    pub lawsuit_id: String,
    pub first_digit: u8,
    pub second_digit: u8,
    pub year: u16,
    pub segment: u8,
    pub court_id: String,
    pub lawsuit_city: String,
}

impl Nupj {
    /// Both check digits, as written in the number.
    #[must_use]
    pub fn digits(&self) -> String {
        format!("{}{}", self.first_digit, self.second_digit)
    }

    /// Name of the justice segment, if the segment digit is assigned.
    #[must_use]
    pub fn segment_name(&self) -> Option<&'static str> {
        segment_name(self.segment)
    }

    /// Name of the court, see [`court_name`].
    pub fn court_name(&self) -> Result<String> {
        court_name(self.segment, &self.court_id)
    }

    /// The 20 digits without punctuation.
    #[must_use]
    pub fn raw(&self) -> String {
        format!(
            "{}{}{:04}{}{}{}",
            self.lawsuit_id,
            self.digits(),
            self.year,
            self.segment,
            self.court_id,
            self.lawsuit_city
        )
    }
}

impl fmt::Display for Nupj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}.{:04}.{}.{}.{}",
            self.lawsuit_id,
            self.digits(),
            self.year,
            self.segment,
            self.court_id,
            self.lawsuit_city
        )
    }
}

/// Left-pad a NUPJ with zeros up to 20 digits.
///
/// # Errors
/// Returns an error when there are no digits at all, or more than 20.
pub fn pad(nupj: &str) -> Result<String> {
    let digits = clean(nupj);

    if digits.is_empty() {
        return Err(IdError::InvalidFormat {
            kind: IdKind::Nupj,
            value: nupj.to_string(),
            reason: "no digits found".to_string(),
        });
    }
    if digits.len() > LENGTH {
        return Err(IdError::length(IdKind::Nupj, &digits, "at most 20"));
    }
    Ok(zero_pad(&digits, LENGTH))
}

/// Split a NUPJ into its fields, padding short input.
pub fn parse(nupj: &str) -> Result<Nupj> {
    let padded = pad(nupj)?;
    let digit = |i: usize| padded.as_bytes()[i] - b'0';

    Ok(Nupj {
        lawsuit_id: padded[..7].to_string(),
        first_digit: digit(7),
        second_digit: digit(8),
        year: padded[9..13].parse().unwrap_or_default(),
        segment: digit(13),
        court_id: padded[14..16].to_string(),
        lawsuit_city: padded[16..20].to_string(),
    })
}

/// Applies the `NNNNNNN-DD.AAAA.J.TR.OOOO` formatting.
pub fn format(nupj: &str) -> Result<String> {
    parse(nupj).map(|parsed| parsed.to_string())
}

fn mod97(digits: &str) -> u32 {
    digits
        .bytes()
        .fold(0, |acc, b| (acc * 10 + u32::from(b - b'0')) % DIVISOR)
}

fn checked_body(parsed: &Nupj) -> String {
    format!(
        "{}{:04}{}{}{}",
        parsed.lawsuit_id, parsed.year, parsed.segment, parsed.court_id, parsed.lawsuit_city
    )
}

/// Compute the two check digits for a NUPJ.
///
/// The `DD` positions of the input are ignored.
pub fn verification_digits(nupj: &str) -> Result<(u8, u8)> {
    let parsed = parse(nupj)?;
    let body = format!("{}00", checked_body(&parsed));
    let check = DIVISOR + 1 - mod97(&body);
    // check is in 2..=98
    let check = u8::try_from(check).unwrap_or_default();
    Ok((check / 10, check % 10))
}

/// Determine whether a NUPJ is valid.
///
/// Checks the year, the segment digit, the court for that segment and the
/// mod-97 check digits.
#[must_use]
pub fn is_valid(nupj: &str) -> bool {
    let Ok(parsed) = parse(nupj) else {
        return false;
    };

    if parsed.year < FIRST_YEAR {
        return false;
    }
    if segment_name(parsed.segment).is_none() {
        return false;
    }
    if parsed.court_id != "90"
        && parsed.court_id != "00"
        && !is_listed_court(parsed.segment, &parsed.court_id)
    {
        return false;
    }

    let full = format!("{}{}", checked_body(&parsed), parsed.digits());
    mod97(&full) == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid() {
        assert!(is_valid("62367378320244025398"));
        assert!(is_valid("7666699020243004820"));
    }

    #[test]
    fn test_is_valid_formatted() {
        assert!(is_valid("6236737-83.2024.4.02.5398"));
        assert!(is_valid("766669-90.2024.3.00.4820"));
    }

    #[test]
    fn test_invalid_check_digits() {
        assert!(!is_valid("6236737-84.2024.4.02.5398"));
    }

    #[test]
    fn test_invalid_year_segment_court() {
        // year before the standard
        assert!(!is_valid("6236737-83.2007.4.02.5398"));
        // segment 0 is unassigned
        assert!(!is_valid("6236737-83.2024.0.02.5398"));
        // federal segment has six regional courts
        assert!(!is_valid("6236737-83.2024.4.07.5398"));
        assert!(!is_valid(""));
    }

    #[test]
    fn test_pad() {
        assert_eq!(
            pad("766669-90.2024.3.00.4820").unwrap(),
            "07666699020243004820"
        );
        assert!(pad("").is_err());
        assert!(pad("123456789012345678901").is_err());
    }

    #[test]
    fn test_parse() {
        let parsed = parse("6236737-83.2024.4.02.5398").unwrap();
        assert_eq!(
            parsed,
            Nupj {
                lawsuit_id: "6236737".to_string(),
                first_digit: 8,
                second_digit: 3,
                year: 2024,
                segment: 4,
                court_id: "02".to_string(),
                lawsuit_city: "5398".to_string(),
            }
        );

        let parsed = parse("766669-90.2024.3.00.4820").unwrap();
        assert_eq!(parsed.lawsuit_id, "0766669");
        assert_eq!(parsed.digits(), "90");
        assert_eq!(parsed.court_id, "00");
        assert_eq!(parsed.raw(), "07666699020243004820");
    }

    #[test]
    fn test_format() {
        assert_eq!(
            format("62367378320244025398").unwrap(),
            "6236737-83.2024.4.02.5398"
        );
    }

    #[test]
    fn test_verification_digits() {
        assert_eq!(verification_digits("6236737-00.2024.4.02.5398").unwrap(), (8, 3));
        assert_eq!(verification_digits("0001234-00.2024.5.01.0001").unwrap(), (2, 5));
        assert!(is_valid("0001234-25.2024.5.01.0001"));
    }

    #[test]
    fn test_segment_and_court_names() {
        assert_eq!(segment_name(5), Some("Justiça do Trabalho"));
        assert_eq!(segment_name(0), None);
        assert_eq!(segment_name(12), None);

        assert_eq!(
            court_name(4, "02").unwrap(),
            "TRIBUNAL REGIONAL FEDERAL DA 2ª REGIÃO"
        );
        assert_eq!(court_name(8, "26").unwrap(), "Tribunal de Justiça - São Paulo");
        assert_eq!(court_name(5, "00").unwrap(), "Tribunal Superior do Trabalho");
        assert!(matches!(
            court_name(4, "00"),
            Err(IdError::InvalidCourt { .. })
        ));
        assert!(court_name(9, "14").is_err());
    }
}
