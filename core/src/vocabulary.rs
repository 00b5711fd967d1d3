//! UI ↔ wire vocabulary.
//!
//! Every user-facing value has exactly one row in a table below; parsing and
//! translation go through the tables, so a value can never reach the wire
//! untranslated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RedactionScope {
    FullPii,
    PartialPii,
    Custom,
}

/// (variant, ui label, wire term)
const SCOPE_TABLE: &[(RedactionScope, &str, &str)] = &[
    (RedactionScope::FullPii, "full-pii", "full"),
    (RedactionScope::PartialPii, "partial-pii", "partial"),
    (RedactionScope::Custom, "custom", "custom"),
];

impl RedactionScope {
    pub const ALL: [RedactionScope; 3] = [Self::FullPii, Self::PartialPii, Self::Custom];

    fn row(self) -> &'static (RedactionScope, &'static str, &'static str) {
        SCOPE_TABLE
            .iter()
            .find(|(s, _, _)| *s == self)
            .unwrap_or(&SCOPE_TABLE[0])
    }

    pub fn ui_label(self) -> &'static str {
        self.row().1
    }

    pub fn wire(self) -> &'static str {
        self.row().2
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::FullPii => "Full PII Redaction",
            Self::PartialPii => "Partial PII Redaction",
            Self::Custom => "Custom Entities",
        }
    }

    pub fn from_ui(label: &str) -> Option<Self> {
        let label = label.trim();
        SCOPE_TABLE
            .iter()
            .find(|(_, ui, _)| ui.eq_ignore_ascii_case(label))
            .map(|(s, _, _)| *s)
    }

    pub fn from_wire(term: &str) -> Option<Self> {
        let term = term.trim();
        SCOPE_TABLE
            .iter()
            .find(|(_, _, wire)| wire.eq_ignore_ascii_case(term))
            .map(|(s, _, _)| *s)
    }
}

impl fmt::Display for RedactionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ui_label())
    }
}

impl FromStr for RedactionScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_ui(s).ok_or_else(|| {
            format!(
                "unknown redaction scope '{s}' (expected one of: {})",
                SCOPE_TABLE
                    .iter()
                    .map(|(_, ui, _)| *ui)
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsentTier {
    Full,
    Limited,
    None,
}

/// (variant, ui label, wire term)
const CONSENT_TABLE: &[(ConsentTier, &str, &str)] = &[
    (ConsentTier::Full, "full", "full"),
    (ConsentTier::Limited, "limited", "limited"),
    (ConsentTier::None, "none", "none"),
];

/// Older UI labels that still resolve to a tier.
const CONSENT_ALIASES: &[(&str, ConsentTier)] = &[
    ("basic", ConsentTier::Limited),
    ("anonymized", ConsentTier::None),
];

impl ConsentTier {
    pub const ALL: [ConsentTier; 3] = [Self::Full, Self::Limited, Self::None];

    fn row(self) -> &'static (ConsentTier, &'static str, &'static str) {
        CONSENT_TABLE
            .iter()
            .find(|(t, _, _)| *t == self)
            .unwrap_or(&CONSENT_TABLE[0])
    }

    pub fn ui_label(self) -> &'static str {
        self.row().1
    }

    pub fn wire(self) -> &'static str {
        self.row().2
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Full => "Full Consent",
            Self::Limited => "Limited Consent",
            Self::None => "No Consent (Anonymized)",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Full => "Patient has given full permission for data sharing.",
            Self::Limited => "Partial permission with restrictions.",
            Self::None => "Fully anonymized data only.",
        }
    }

    pub fn from_ui(label: &str) -> Option<Self> {
        let label = label.trim();
        CONSENT_TABLE
            .iter()
            .find(|(_, ui, _)| ui.eq_ignore_ascii_case(label))
            .map(|(t, _, _)| *t)
            .or_else(|| {
                CONSENT_ALIASES
                    .iter()
                    .find(|(alias, _)| alias.eq_ignore_ascii_case(label))
                    .map(|(_, t)| *t)
            })
    }

    pub fn from_wire(term: &str) -> Option<Self> {
        let term = term.trim();
        CONSENT_TABLE
            .iter()
            .find(|(_, _, wire)| wire.eq_ignore_ascii_case(term))
            .map(|(t, _, _)| *t)
    }
}

impl fmt::Display for ConsentTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ui_label())
    }
}

impl FromStr for ConsentTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_ui(s).ok_or_else(|| {
            format!("unknown consent tier '{s}' (expected one of: full, limited, none)")
        })
    }
}

/// Named class of sensitive information, only used when scope is custom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityCategory {
    Person,
    Gpe,
    Org,
    Date,
    Cardinal,
    Loc,
    Norp,
    Fac,
    Event,
    Product,
    Language,
}

const ENTITY_TABLE: &[(EntityCategory, &str)] = &[
    (EntityCategory::Person, "PERSON"),
    (EntityCategory::Gpe, "GPE"),
    (EntityCategory::Org, "ORG"),
    (EntityCategory::Date, "DATE"),
    (EntityCategory::Cardinal, "CARDINAL"),
    (EntityCategory::Loc, "LOC"),
    (EntityCategory::Norp, "NORP"),
    (EntityCategory::Fac, "FAC"),
    (EntityCategory::Event, "EVENT"),
    (EntityCategory::Product, "PRODUCT"),
    (EntityCategory::Language, "LANGUAGE"),
];

impl EntityCategory {
    pub const ALL: [EntityCategory; 11] = [
        Self::Person,
        Self::Gpe,
        Self::Org,
        Self::Date,
        Self::Cardinal,
        Self::Loc,
        Self::Norp,
        Self::Fac,
        Self::Event,
        Self::Product,
        Self::Language,
    ];

    pub fn tag(self) -> &'static str {
        ENTITY_TABLE
            .iter()
            .find(|(e, _)| *e == self)
            .map(|(_, t)| *t)
            .unwrap_or("PERSON")
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        ENTITY_TABLE
            .iter()
            .find(|(_, t)| t.eq_ignore_ascii_case(tag))
            .map(|(e, _)| *e)
    }
}

impl fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for EntityCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| {
            format!(
                "unknown entity category '{s}' (expected one of: {})",
                ENTITY_TABLE
                    .iter()
                    .map(|(_, t)| *t)
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })
    }
}
