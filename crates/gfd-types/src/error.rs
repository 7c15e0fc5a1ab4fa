//! The two error families of the system.
//!
//! [`FigureError`] is raised by a construction function when its
//! geometric precondition fails, always before any unsafe algebra runs.
//! [`ScriptError`] is raised by the evaluator, either for a structural
//! problem in the script itself or by wrapping a `FigureError` with the
//! position of the offending statement. All errors are fatal to the run.

use crate::object::ObjKind;
use thiserror::Error;

/// Construction-domain error: a geometric precondition did not hold.
///
/// Object names are captured at raise time so the message survives the
/// hop through the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FigureError {
    #[error("lines {0} and {1} are parallel")]
    ParallelLines(String, String),

    #[error("point {0} is not outside circle {1}")]
    PointNotOutside(String, String),

    #[error("point {0} is not on circle {1}")]
    PointNotOnCircle(String, String),

    #[error("point {0} is not on line {1}")]
    PointNotOnLine(String, String),

    #[error("point {0} lies on line {1}")]
    PointOnLine(String, String),

    #[error("point {0} is the center of circle {1}")]
    PointIsCenter(String, String),

    #[error("line {0} passes through the center of circle {1}")]
    LineThroughCenter(String, String),

    #[error("line {0} does not intersect circle {1}")]
    LineMissesCircle(String, String),

    #[error("line {0} is not tangent to circle {1}")]
    LineNotTangent(String, String),

    #[error("circles {0} and {1} do not intersect")]
    CirclesDisjoint(String, String),

    #[error("circles {0} and {1} are not tangent")]
    CirclesNotTangent(String, String),

    #[error("circles {0} and {1} have equal radii")]
    EqualRadii(String, String),
}

/// What went wrong in a script, independent of position.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScriptErrorKind {
    #[error("construction statement has no '='")]
    MissingEquals,

    #[error("{names} name(s) on the left, {results} result(s) on the right")]
    ArityMismatch { names: usize, results: usize },

    #[error("undefined name '{0}'")]
    UnknownName(String),

    #[error("'{function}' expects a {expected} as argument {index}, got a {found}")]
    WrongOperandKind {
        function: String,
        index: usize,
        expected: String,
        found: ObjKind,
    },

    #[error("'{function}' expects an object as argument {index}, got a boolean")]
    BooleanOperand { function: String, index: usize },

    #[error("not enough operands on the stack for '{0}'")]
    StackUnderflow(String),

    #[error("name '{0}' is already bound")]
    Redefinition(String),

    #[error("cannot bind a boolean result to '{0}'")]
    BooleanBinding(String),

    #[error("malformed macro definition: {0}")]
    MalformedMacro(String),

    #[error("macro placeholder '{0}' is out of range")]
    BadPlaceholder(String),

    #[error("malformed import: {0}")]
    MalformedImport(String),

    #[error("file '{0}' imported more than once")]
    DuplicateImport(String),

    #[error("cannot load '{file}': {reason}")]
    LoadFailed { file: String, reason: String },

    #[error("'?' expects a boolean result")]
    NonBooleanQuery,

    #[error(transparent)]
    Figure(#[from] FigureError),
}

/// A script error pinned to the line that caused it.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Error in line {line} of {file}: {kind}")]
pub struct ScriptError {
    pub file: String,
    pub line: u32,
    pub kind: ScriptErrorKind,
}

impl ScriptError {
    pub fn new(file: impl Into<String>, line: u32, kind: ScriptErrorKind) -> Self {
        Self {
            file: file.into(),
            line,
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_error_message_format() {
        let err = ScriptError::new(
            "figure.gfd",
            12,
            ScriptErrorKind::UnknownName("Q".to_string()),
        );
        assert_eq!(
            err.to_string(),
            "Error in line 12 of figure.gfd: undefined name 'Q'"
        );
    }

    #[test]
    fn test_figure_error_is_transparent() {
        let err = ScriptError::new(
            "t.gfd",
            3,
            FigureError::ParallelLines("u".into(), "v".into()).into(),
        );
        assert_eq!(
            err.to_string(),
            "Error in line 3 of t.gfd: lines u and v are parallel"
        );
    }
}
