use crate::value::TypeTag;
use thiserror::Error;

/// Errors detected by the executor itself while walking a pipeline.
///
/// Failures returned by a callable are not represented here; they pass
/// through to the caller unmodified as the run's result. Callers that need
/// to tell the two apart can `downcast_ref::<PipelineError>()` on the
/// returned error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    /// A callable was expected at this position but a plain value was found.
    /// Includes the malformed case of a pipeline that starts with a value.
    #[error("invalid sequence: expected a callable at position {position}, found a {found} value")]
    Sequence { position: usize, found: TypeTag },

    /// Fewer values follow the callable than its fixed parameters require.
    /// A callable occupying a fixed slot counts as a shortage as well: fixed
    /// slots can only be satisfied by values.
    #[error("not enough arguments for {callable}: expected {expected}, got {supplied}")]
    Arity {
        callable: String,
        expected: usize,
        supplied: usize,
    },

    /// A following value is not assignable to the declared parameter type.
    #[error("invalid argument type for {callable} parameter {slot}: expected {expected}, got {actual}")]
    TypeMismatch {
        callable: String,
        slot: usize,
        expected: TypeTag,
        actual: TypeTag,
    },

    /// The cancellation token fired before the step at this position began.
    #[error("pipeline cancelled before step at position {position}")]
    Cancelled { position: usize },
}
