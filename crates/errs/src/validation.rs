use std::fmt;

use crate::Parameter;

/// A single failed check on one input parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub param: Parameter,
    pub message: String,
}

/// Aggregate of input validation failures.
///
/// Passed as a cause, it is stored verbatim: each entry already names its
/// parameter, and a single captured stack says little about several failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, param: impl Into<Parameter>, message: impl Into<String>) {
        self.violations.push(FieldViolation {
            param: param.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldViolation> {
        self.violations.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", v.param, v.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl<P, M> FromIterator<(P, M)> for ValidationErrors
where
    P: Into<Parameter>,
    M: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (P, M)>>(iter: I) -> Self {
        let mut errs = Self::new();
        for (param, message) in iter {
            errs.push(param, message);
        }
        errs
    }
}
