use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IdError>;

/// Identifier schemes handled by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdKind {
    Cep,
    Cpf,
    PisPasep,
    Municipio,
    Nupj,
}

impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Cep => "CEP",
            Self::Cpf => "CPF",
            Self::PisPasep => "PIS/PASEP",
            Self::Municipio => "município",
            Self::Nupj => "NUPJ",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("invalid {kind} '{value}': {reason}")]
    InvalidFormat {
        kind: IdKind,
        value: String,
        reason: String,
    },

    #[error("invalid {kind} '{value}': expected {expected}, got {actual} digits")]
    InvalidLength {
        kind: IdKind,
        value: String,
        expected: String,
        actual: usize,
    },

    #[error("the {kind} '{value}' is invalid")]
    InvalidChecksum { kind: IdKind, value: String },

    #[error("court {court_id} is not known for justice segment {segment}")]
    InvalidCourt { segment: u8, court_id: String },
}

impl IdError {
    pub(crate) fn length(kind: IdKind, value: &str, expected: impl Into<String>) -> Self {
        Self::InvalidLength {
            kind,
            value: value.to_string(),
            expected: expected.into(),
            actual: value.len(),
        }
    }

    pub(crate) fn checksum(kind: IdKind, value: &str) -> Self {
        Self::InvalidChecksum {
            kind,
            value: value.to_string(),
        }
    }

    /// The identifier scheme the error refers to.
    #[must_use]
    pub fn kind(&self) -> IdKind {
        match self {
            Self::InvalidFormat { kind, .. }
            | Self::InvalidLength { kind, .. }
            | Self::InvalidChecksum { kind, .. } => *kind,
            Self::InvalidCourt { .. } => IdKind::Nupj,
        }
    }
}
