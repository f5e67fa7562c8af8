//! Keyword pre-classifier.
//!
//! Guesses the faulty side from the error text alone before the model is
//! asked. Every rule is checked against the whole message; a message that
//! trips a backend rule and a frontend rule is `both`.

use serde::Serialize;

use crate::report::IssueReport;
use crate::verdict::{RuleVerdict, Side};

#[derive(Debug, Clone, Copy)]
enum Matcher {
    /// Any of the needles is present
    Any(&'static [&'static str]),
    /// Every needle is present
    All(&'static [&'static str]),
}

impl Matcher {
    fn matches(&self, haystack: &str) -> bool {
        match self {
            Matcher::Any(needles) => needles.iter().any(|n| haystack.contains(n)),
            Matcher::All(needles) => needles.iter().all(|n| haystack.contains(n)),
        }
    }
}

/// A named keyword rule pointing at one side.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub side: Side,
    matcher: Matcher,
}

impl Rule {
    /// `haystack` must already be lowercased.
    fn fires(&self, haystack: &str) -> bool {
        self.matcher.matches(haystack)
    }
}

/// Needles are lowercase. "failed to fetch" is deliberately absent: without
/// "cors" it says nothing about which side broke.
pub const RULES: &[Rule] = &[
    Rule {
        name: "cors",
        side: Side::Backend,
        matcher: Matcher::Any(&["cors", "access-control-allow-origin", "cross origin"]),
    },
    Rule {
        name: "mixed-content",
        side: Side::Backend,
        matcher: Matcher::Any(&["mixed content"]),
    },
    Rule {
        name: "server-error",
        side: Side::Backend,
        matcher: Matcher::Any(&["500", "502", "503"]),
    },
    Rule {
        name: "unreachable-host",
        side: Side::Backend,
        matcher: Matcher::Any(&["enotfound", "dns", "econnrefused"]),
    },
    Rule {
        name: "route-not-found",
        side: Side::Frontend,
        matcher: Matcher::All(&["404", "not found"]),
    },
    Rule {
        name: "method-not-allowed",
        side: Side::Frontend,
        matcher: Matcher::Any(&["405", "method not allowed"]),
    },
];

/// Verdict plus the rules that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub verdict: RuleVerdict,
    pub backend_rules: Vec<&'static str>,
    pub frontend_rules: Vec<&'static str>,
}

/// Classify an error message. Never fails; no rule firing means `uncertain`.
pub fn classify(error_message: &str) -> RuleVerdict {
    explain(error_message).verdict
}

/// Classify and report which rules fired.
pub fn explain(error_message: &str) -> Classification {
    let haystack = error_message.to_lowercase();

    let mut backend_rules = Vec::new();
    let mut frontend_rules = Vec::new();
    for rule in RULES.iter().filter(|r| r.fires(&haystack)) {
        match rule.side {
            Side::Backend => backend_rules.push(rule.name),
            Side::Frontend => frontend_rules.push(rule.name),
            Side::Both => {
                backend_rules.push(rule.name);
                frontend_rules.push(rule.name);
            }
        }
    }

    let verdict = match (!backend_rules.is_empty(), !frontend_rules.is_empty()) {
        (true, true) => RuleVerdict::Both,
        (true, false) => RuleVerdict::Backend,
        (false, true) => RuleVerdict::Frontend,
        (false, false) => RuleVerdict::Uncertain,
    };

    Classification {
        verdict,
        backend_rules,
        frontend_rules,
    }
}

/// Report-level entry point.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleClassifier;

impl RuleClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Only the error text is matched; the URLs are not consulted yet.
    pub fn classify(&self, report: &IssueReport) -> RuleVerdict {
        classify(&report.error_message)
    }
}
