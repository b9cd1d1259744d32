use crate::WeightBreakdown;

use format_num::format_num;
use serde::{Serialize, Deserialize};

use std::fmt;

// Severity {{{1
#[derive(PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Clone, Copy, Debug)]
pub enum Severity {
    /// The unit is not a legal construction.
    Error,
    /// Legal, but worth a look.
    Warning,
    /// Informational.
    Notice,
}

impl fmt::Display for Severity { // {{{2
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Self::Error   => "ERROR",
            Self::Warning => "WARNING",
            Self::Notice  => "NOTICE",
        })
    }
}

// FindingCode {{{1
/// What kind of rule a finding is about.
///
#[derive(PartialEq, Eq, Serialize, Deserialize, Clone, Copy, Debug)]
pub enum FindingCode {
    Overweight,
    Underweight,
    EngineInvalid,
    SlotsExceeded,
    ArmorExceeded,
    TonnageExceeded,
    MotiveIncompatible,
    InvalidLocation,
    IllegalCombination,
    IllegalTechLevel,
    IntroYear,
    FailedEquipment,
    Unallocated,
    Criticals,
    InfantryOrganization,
    NotImplemented,
}

impl fmt::Display for FindingCode { // {{{2
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Self::Overweight           => "Overweight",
            Self::Underweight          => "Underweight",
            Self::EngineInvalid        => "Engine",
            Self::SlotsExceeded        => "Slots",
            Self::ArmorExceeded        => "Armor",
            Self::TonnageExceeded      => "Tonnage",
            Self::MotiveIncompatible   => "Motive",
            Self::InvalidLocation      => "Location",
            Self::IllegalCombination   => "Combination",
            Self::IllegalTechLevel     => "Tech Level",
            Self::IntroYear            => "Intro Year",
            Self::FailedEquipment      => "Failed Equipment",
            Self::Unallocated          => "Unallocated",
            Self::Criticals            => "Criticals",
            Self::InfantryOrganization => "Organization",
            Self::NotImplemented       => "Not Implemented",
        })
    }
}

// Finding {{{1
/// A single diagnostic produced while verifying a unit.
///
#[derive(PartialEq, Serialize, Deserialize, Clone, Debug)]
pub struct Finding {
    pub code: FindingCode,
    pub severity: Severity,
    pub message: String,
}

impl Finding { // {{{2
    pub fn new(code: FindingCode, severity: Severity, message: impl Into<String>) -> Self {
        Self { code, severity, message: message.into() }
    }

    // error {{{3
    pub fn error(code: FindingCode, message: impl Into<String>) -> Self {
        Self::new(code, Severity::Error, message)
    }

    // warning {{{3
    pub fn warning(code: FindingCode, message: impl Into<String>) -> Self {
        Self::new(code, Severity::Warning, message)
    }

    // notice {{{3
    pub fn notice(code: FindingCode, message: impl Into<String>) -> Self {
        Self::new(code, Severity::Notice, message)
    }

    // is_error {{{3
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Finding { // {{{2
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.code, self.message)
    }
}

// Outcome {{{1
#[derive(PartialEq, Eq, Serialize, Deserialize, Clone, Copy, Debug)]
pub enum Outcome {
    Pass,
    Fail,
    /// The rules for this kind of unit are not checked.
    Unchecked,
}

impl fmt::Display for Outcome { // {{{2
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Self::Pass      => "PASS",
            Self::Fail      => "FAIL",
            Self::Unchecked => "UNCHECKED",
        })
    }
}

// Verdict {{{1
/// Result of verifying one unit.
///
#[derive(PartialEq, Serialize, Deserialize, Clone, Debug)]
pub struct Verdict {
    pub outcome: Outcome,
    /// Findings in the order the rules were checked.
    pub findings: Vec<Finding>,
    pub breakdown: WeightBreakdown,
    /// Computed total weight.
    pub total: f64,
    /// Declared tonnage.
    pub declared: f64,
}

impl Verdict { // {{{2
    // new {{{3
    /// Build a verdict whose outcome follows from the findings: any error
    /// fails the unit.
    ///
    pub fn new(findings: Vec<Finding>, breakdown: WeightBreakdown, declared: f64) -> Self {
        let outcome = if findings.iter().any(Finding::is_error) {
            Outcome::Fail
        } else {
            Outcome::Pass
        };

        Self { outcome, findings, breakdown, total: breakdown.total(), declared }
    }

    // unchecked {{{3
    /// Build a verdict for a unit whose rules are not checked.
    ///
    pub fn unchecked(findings: Vec<Finding>, breakdown: WeightBreakdown, declared: f64) -> Self {
        Self { outcome: Outcome::Unchecked, findings, breakdown, total: breakdown.total(), declared }
    }

    // is_failure {{{3
    pub fn is_failure(&self) -> bool {
        self.outcome == Outcome::Fail
    }

    // errors {{{3
    /// Findings of error severity.
    ///
    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.is_error())
    }

    // report {{{3
    /// Human readable summary.
    ///
    pub fn report(&self, name: &str) -> String {
        let mut report: Vec<String> = Vec::new();

        report.push(format!("{}: {}", name, self.outcome));
        report.push(format!("Weight: {} / {} tons",
            format_num!(",.3f", self.total),
            format_num!(",.3f", self.declared),
        ));

        if ! self.findings.is_empty() {
            report.push("".to_string());
            for finding in self.findings.iter() {
                report.push(finding.to_string());
            }
        }

        report.join("\n")
    }
}

// Testing {{{1
#[cfg(test)]
mod verdict {
    use super::*;

    // Test outcome {{{2
    macro_rules! test_outcome {
        ($($name:ident: $value:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    let (expected, findings) = $value;

                    let verdict = Verdict::new(findings, WeightBreakdown::default(), 0.0);

                    assert_eq!(expected, verdict.outcome);
                }
            )*
        }
    }
    test_outcome! {
        // name:           (outcome, findings)
        outcome_empty:     (Outcome::Pass, vec![]),
        outcome_warning:   (Outcome::Pass, vec![Finding::warning(FindingCode::IntroYear, "early")]),
        outcome_notice:    (Outcome::Pass, vec![Finding::notice(FindingCode::Underweight, "light")]),
        outcome_error:     (Outcome::Fail, vec![
            Finding::warning(FindingCode::IntroYear, "early"),
            Finding::error(FindingCode::Overweight, "heavy"),
        ]),
    }

    // Test report {{{2
    #[test]
    fn report_lists_findings_in_order() {
        let verdict = Verdict::new(
            vec![
                Finding::error(FindingCode::Overweight, "first"),
                Finding::warning(FindingCode::IntroYear, "second"),
            ],
            WeightBreakdown { structure: 1234.5, ..Default::default() },
            1000.0,
        );

        let report = verdict.report("Test");

        assert!(report.starts_with("Test: FAIL"));
        assert!(report.contains("1,234.500"));
        assert!(report.find("first") < report.find("second"));
    }

    #[test]
    fn unchecked_is_not_a_failure() {
        let verdict = Verdict::unchecked(
            vec![Finding::error(FindingCode::NotImplemented, "no rules")],
            WeightBreakdown::default(),
            0.0,
        );

        assert_eq!(Outcome::Unchecked, verdict.outcome);
        assert!(! verdict.is_failure());
        assert_eq!(1, verdict.errors().count());
    }
}
