//! Which side of the integration is at fault.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A decided side. Final diagnoses always carry one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Backend,
    Frontend,
    Both,
}

impl Side {
    pub const ALL: [Side; 3] = [Side::Backend, Side::Frontend, Side::Both];

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Backend => "backend",
            Side::Frontend => "frontend",
            Side::Both => "both",
        }
    }

    /// Whether a backend snippet belongs in a diagnosis for this side.
    pub fn allows_backend_code(&self) -> bool {
        matches!(self, Side::Backend | Side::Both)
    }

    /// Whether a frontend snippet belongs in a diagnosis for this side.
    pub fn allows_frontend_code(&self) -> bool {
        matches!(self, Side::Frontend | Side::Both)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = ();

    /// Accepts surrounding whitespace and any letter case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "backend" => Ok(Side::Backend),
            "frontend" => Ok(Side::Frontend),
            "both" => Ok(Side::Both),
            _ => Err(()),
        }
    }
}

/// Output of the rule classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleVerdict {
    Backend,
    Frontend,
    Both,
    Uncertain,
}

impl RuleVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleVerdict::Backend => "backend",
            RuleVerdict::Frontend => "frontend",
            RuleVerdict::Both => "both",
            RuleVerdict::Uncertain => "uncertain",
        }
    }

    /// The side this verdict fixes, or `None` when the rules were inconclusive.
    pub fn decisive(&self) -> Option<Side> {
        match self {
            RuleVerdict::Backend => Some(Side::Backend),
            RuleVerdict::Frontend => Some(Side::Frontend),
            RuleVerdict::Both => Some(Side::Both),
            RuleVerdict::Uncertain => None,
        }
    }

    pub fn is_decisive(&self) -> bool {
        self.decisive().is_some()
    }
}

impl From<Side> for RuleVerdict {
    fn from(side: Side) -> Self {
        match side {
            Side::Backend => RuleVerdict::Backend,
            Side::Frontend => RuleVerdict::Frontend,
            Side::Both => RuleVerdict::Both,
        }
    }
}

impl fmt::Display for RuleVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_parsing_is_lenient() {
        assert_eq!(" Backend ".parse::<Side>(), Ok(Side::Backend));
        assert_eq!("FRONTEND".parse::<Side>(), Ok(Side::Frontend));
        assert_eq!("both".parse::<Side>(), Ok(Side::Both));
        assert!("uncertain".parse::<Side>().is_err());
        assert!("server".parse::<Side>().is_err());
    }

    #[test]
    fn test_decisive() {
        assert_eq!(RuleVerdict::Both.decisive(), Some(Side::Both));
        assert_eq!(RuleVerdict::Uncertain.decisive(), None);
        for side in Side::ALL {
            assert_eq!(RuleVerdict::from(side).decisive(), Some(side));
        }
    }

    #[test]
    fn test_code_gating() {
        assert!(Side::Backend.allows_backend_code());
        assert!(!Side::Backend.allows_frontend_code());
        assert!(!Side::Frontend.allows_backend_code());
        assert!(Side::Both.allows_backend_code() && Side::Both.allows_frontend_code());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&RuleVerdict::Uncertain).unwrap(),
            "\"uncertain\""
        );
        assert_eq!(serde_json::to_string(&Side::Frontend).unwrap(), "\"frontend\"");
    }
}
