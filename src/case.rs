//! Case selector understood by `uqsim` and the outputs each case produces.

use std::fmt;

use serde::Serialize;

use crate::error::{Result, UqError};

/// Output families the simulation can compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    /// Uncertain subsystem realizations y(a,e,t).
    Y,
    /// Integrated system realizations z1(a,e,theta,t) and z2(a,e,theta,t).
    Z,
    /// Requirements vector g(a,e,theta). Not a time series.
    G,
}

/// A time-series output written by the simulation into the working directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Output {
    Y,
    Z1,
    Z2,
}

impl Output {
    pub fn file_name(self) -> &'static str {
        match self {
            Output::Y => "yout",
            Output::Z1 => "z1out",
            Output::Z2 => "z2out",
        }
    }

    pub fn ylabel(self) -> &'static str {
        match self {
            Output::Y => "Predicted y(t)",
            Output::Z1 => "Predicted z_1(t)",
            Output::Z2 => "Predicted z_2(t)",
        }
    }
}

/// File holding the shared time vector.
pub const TIME_FILE: &str = "tout";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseNumber(u8);

impl CaseNumber {
    pub const ALL: [CaseNumber; 7] = [
        CaseNumber(1),
        CaseNumber(2),
        CaseNumber(3),
        CaseNumber(4),
        CaseNumber(5),
        CaseNumber(6),
        CaseNumber(7),
    ];

    pub fn new(value: i64) -> Result<Self> {
        match value {
            1..=7 => Ok(Self(value as u8)),
            other => Err(UqError::InvalidCase(other)),
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn families(self) -> &'static [Family] {
        match self.0 {
            1 => &[Family::Y],
            2 => &[Family::Z],
            3 => &[Family::G],
            4 => &[Family::Y, Family::Z],
            5 => &[Family::Y, Family::G],
            6 => &[Family::Z, Family::G],
            _ => &[Family::Y, Family::Z, Family::G],
        }
    }

    pub fn computes(self, family: Family) -> bool {
        self.families().contains(&family)
    }

    /// Time-series files this case leaves in the working directory, in plot order.
    pub fn outputs(self) -> Vec<Output> {
        let mut out = Vec::new();
        if self.computes(Family::Y) {
            out.push(Output::Y);
        }
        if self.computes(Family::Z) {
            out.push(Output::Z1);
            out.push(Output::Z2);
        }
        out
    }

    pub fn describe(self) -> &'static str {
        match self.0 {
            1 => "realizations of the uncertain subsystem y(a,e,t)",
            2 => "realizations of the integrated system z1, z2(a,e,theta,t)",
            3 => "requirements vector g(a,e,theta)",
            4 => "subsystem y and integrated system z in one call",
            5 => "subsystem y and requirements vector g in one call",
            6 => "integrated system z and requirements vector g in one call",
            _ => "y, z and g in one call",
        }
    }
}

impl Default for CaseNumber {
    fn default() -> Self {
        Self(7)
    }
}

impl fmt::Display for CaseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range() {
        assert!(matches!(CaseNumber::new(0), Err(UqError::InvalidCase(0))));
        assert!(matches!(CaseNumber::new(8), Err(UqError::InvalidCase(8))));
        assert!(CaseNumber::new(-3).is_err());
    }

    #[test]
    fn case_seven_produces_every_series() {
        let case = CaseNumber::default();
        assert_eq!(case.get(), 7);
        assert_eq!(case.outputs(), vec![Output::Y, Output::Z1, Output::Z2]);
        assert!(case.computes(Family::G));
    }

    #[test]
    fn outputs_follow_families() {
        let outputs = |n| CaseNumber::new(n).unwrap().outputs();
        assert_eq!(outputs(1), vec![Output::Y]);
        assert_eq!(outputs(2), vec![Output::Z1, Output::Z2]);
        assert!(outputs(3).is_empty());
        assert_eq!(outputs(5), vec![Output::Y]);
        assert_eq!(outputs(6), vec![Output::Z1, Output::Z2]);
    }

    #[test]
    fn output_files_and_labels() {
        assert_eq!(Output::Z1.file_name(), "z1out");
        assert_eq!(Output::Z2.ylabel(), "Predicted z_2(t)");
    }
}
