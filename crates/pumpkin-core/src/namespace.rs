//! Ontology namespaces used to restrict MICA candidates.
//!
//! Membership is decided by curie prefix. `UPHENO:` grouping terms span
//! species and belong to every namespace.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PumpkinError;

const UPHENO_PREFIX: &str = "UPHENO";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    /// Human Phenotype Ontology.
    Hp,
    /// Mammalian Phenotype Ontology.
    Mp,
    /// Zebrafish Phenotype Ontology.
    Zp,
    /// FlyBase controlled vocabulary.
    Fbcv,
    /// C. elegans phenotype ontology.
    WbPhenotype,
}

impl Namespace {
    pub const ALL: [Self; 5] = [Self::Hp, Self::Mp, Self::Zp, Self::Fbcv, Self::WbPhenotype];

    /// Curie prefix (without the trailing colon).
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Hp => "HP",
            Self::Mp => "MP",
            Self::Zp => "ZP",
            Self::Fbcv => "FBcv",
            Self::WbPhenotype => "WBPhenotype",
        }
    }

    #[must_use]
    pub fn contains(self, term: &str) -> bool {
        has_prefix(term, self.prefix()) || has_prefix(term, UPHENO_PREFIX)
    }
}

fn has_prefix(term: &str, prefix: &str) -> bool {
    term.strip_prefix(prefix)
        .is_some_and(|rest| rest.starts_with(':'))
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

impl FromStr for Namespace {
    type Err = PumpkinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|ns| ns.prefix().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PumpkinError::UnknownNamespace(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_membership() {
        assert!(Namespace::Hp.contains("HP:0000118"));
        assert!(!Namespace::Hp.contains("MP:0000001"));
        assert!(Namespace::Mp.contains("MP:0003631"));
        assert!(Namespace::WbPhenotype.contains("WBPhenotype:0000886"));
        assert!(Namespace::Fbcv.contains("FBcv:0000347"));
    }

    #[test]
    fn prefix_requires_colon_boundary() {
        assert!(!Namespace::Hp.contains("HPO:0000118"));
        assert!(!Namespace::Mp.contains("MP"));
    }

    #[test]
    fn upheno_terms_belong_everywhere() {
        for ns in Namespace::ALL {
            assert!(ns.contains("UPHENO:0001001"), "{ns}");
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("hp".parse::<Namespace>().ok(), Some(Namespace::Hp));
        assert_eq!("FBCV".parse::<Namespace>().ok(), Some(Namespace::Fbcv));
        assert_eq!(
            "wbphenotype".parse::<Namespace>().ok(),
            Some(Namespace::WbPhenotype)
        );
        assert!(matches!(
            "GO".parse::<Namespace>(),
            Err(PumpkinError::UnknownNamespace(name)) if name == "GO"
        ));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for ns in Namespace::ALL {
            assert_eq!(ns.to_string().parse::<Namespace>().ok(), Some(ns));
        }
    }
}
