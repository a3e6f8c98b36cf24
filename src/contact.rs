//! Canonical contact record produced from one vCard block.

use std::path::PathBuf;
use time::Date;

/// One entry of a multi-valued field (EMAIL, TEL).
/// `kind` is the uppercased type (HOME, WORK, CELL, ...) or empty when the source had none.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypedValue {
    pub value: String,
    pub kind: String,
}

impl TypedValue {
    pub fn new(value: impl Into<String>, kind: impl Into<String>) -> Self {
        Self { value: value.into(), kind: kind.into() }
    }

    pub fn has_kind(&self) -> bool {
        !self.kind.is_empty()
    }
}

/// Canonical record. Built once per card block and never mutated afterwards by the
/// library; filters and sorts only reorder or drop whole records.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Contact {
    pub name: String, // FN, may be empty

    // N components; empty components stay None
    pub family_name: Option<String>,
    pub given_name: Option<String>,
    pub middle_name: Option<String>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,

    pub emails: Vec<TypedValue>,
    pub phones: Vec<TypedValue>,
    pub organization: String,
    pub note: String,
    pub address: String,
    pub birthday: Option<Date>,

    pub source_file: PathBuf,
}

impl Contact {
    pub fn new(source_file: impl Into<PathBuf>) -> Self {
        Self { source_file: source_file.into(), ..Default::default() }
    }

    /// True when neither FN nor any N component carries a value.
    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
            && [&self.family_name, &self.given_name, &self.middle_name, &self.prefix, &self.suffix]
                .iter()
                .all(|c| c.is_none())
    }

    pub fn has_birthday(&self) -> bool {
        self.birthday.is_some()
    }
}
