//! Attribute catalog
//!
//! The service scores text along named dimensions. The set below is closed,
//! but the service may return names that are not in it; those are still
//! stored and reachable by name on [`ScoreResult`](super::ScoreResult).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A moderation dimension known to this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Attribute {
    Toxicity,
    SevereToxicity,
    IdentityAttack,
    Insult,
    Profanity,
    Threat,
    SexuallyExplicit,
    Flirtation,
}

impl Attribute {
    /// Every known attribute, in catalog order.
    pub const ALL: [Self; 8] = [
        Self::Toxicity,
        Self::SevereToxicity,
        Self::IdentityAttack,
        Self::Insult,
        Self::Profanity,
        Self::Threat,
        Self::SexuallyExplicit,
        Self::Flirtation,
    ];

    /// Canonical name as used on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Toxicity => "TOXICITY",
            Self::SevereToxicity => "SEVERE_TOXICITY",
            Self::IdentityAttack => "IDENTITY_ATTACK",
            Self::Insult => "INSULT",
            Self::Profanity => "PROFANITY",
            Self::Threat => "THREAT",
            Self::SexuallyExplicit => "SEXUALLY_EXPLICIT",
            Self::Flirtation => "FLIRTATION",
        }
    }

    /// Case-insensitive lookup by name.
    ///
    /// Returns `None` for empty, unknown or experimental names; this never
    /// fails.
    pub fn lookup(name: &str) -> Option<Self> {
        if name.is_empty() {
            return None;
        }
        let upper = name.to_uppercase();
        Self::ALL.into_iter().find(|attr| attr.as_str() == upper)
    }
}

impl AsRef<str> for Attribute {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(Attribute::lookup("toxicity"), Some(Attribute::Toxicity));
        assert_eq!(Attribute::lookup("TOXICITY"), Some(Attribute::Toxicity));
        assert_eq!(Attribute::lookup("ToXiCiTy"), Some(Attribute::Toxicity));
        assert_eq!(
            Attribute::lookup("severe_toxicity"),
            Some(Attribute::SevereToxicity)
        );
    }

    #[test]
    fn lookup_unknown_is_none() {
        assert_eq!(Attribute::lookup("totally_unknown_tag"), None);
        assert_eq!(Attribute::lookup(""), None);
        assert_eq!(Attribute::lookup(" TOXICITY"), None);
        assert_eq!(Attribute::lookup("ATTACK_ON_AUTHOR"), None);
    }

    #[test]
    fn every_canonical_name_round_trips() {
        for attr in Attribute::ALL {
            assert_eq!(Attribute::lookup(attr.as_str()), Some(attr));
            assert_eq!(attr.to_string(), attr.as_str());
        }
    }

    #[test]
    fn serde_uses_canonical_names() {
        let json = serde_json::to_string(&Attribute::IdentityAttack).unwrap();
        assert_eq!(json, "\"IDENTITY_ATTACK\"");
        let back: Attribute = serde_json::from_str("\"SEXUALLY_EXPLICIT\"").unwrap();
        assert_eq!(back, Attribute::SexuallyExplicit);
    }
}
