use crate::callable::{Item, Signature};
use crate::error::PipelineError;
use crate::value::Value;
use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use uuid::Uuid;

/// An ordered sequence of [`Item`]s submitted to a single execution.
///
/// By convention the sequence alternates between a callable and the zero or
/// more values it consumes; the first item of a non-empty pipeline must be a
/// callable. The pipeline owns no state across runs — each call to
/// [`Pipeline::run`] walks the items with its own cursor and argument
/// buffers.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    items: Vec<Item>,
}

impl Pipeline {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Run the pipeline to completion with no cancellation capability.
    ///
    /// Equivalent to [`Pipeline::run_with_cancellation`] with a token that
    /// never fires.
    pub async fn run(&self) -> Result<()> {
        self.run_with_cancellation(&CancellationToken::new()).await
    }

    /// Run the pipeline, checking the caller-owned token once at the top of
    /// each step.
    ///
    /// Cancellation is cooperative: a callable that is already executing is
    /// never preempted, but no further callable starts once the token has
    /// fired. Returns the first error encountered — an executor-detected
    /// [`PipelineError`] or a callable's own failure, passed through
    /// verbatim.
    pub async fn run_with_cancellation(&self, token: &CancellationToken) -> Result<()> {
        let run_id = Uuid::new_v4();
        debug!(%run_id, items = self.items.len(), "starting pipeline run");

        let mut cursor = 0;
        while cursor < self.items.len() {
            if token.is_cancelled() {
                debug!(%run_id, position = cursor, "pipeline cancelled");
                return Err(PipelineError::Cancelled { position: cursor }.into());
            }

            let callable = match &self.items[cursor] {
                Item::Call(callable) => callable,
                Item::Value(value) => {
                    return Err(PipelineError::Sequence {
                        position: cursor,
                        found: value.type_tag(),
                    }
                    .into());
                }
            };

            let (args, consumed) =
                bind_arguments(callable.signature(), &self.items[cursor + 1..])?;
            debug!(
                %run_id,
                step = callable.signature().name(),
                position = cursor,
                args = args.len(),
                "invoking callable"
            );

            // The sole source of domain-level stoppage: a callable failure
            // ends the walk and is the run's result.
            callable.invoke(args).await?;

            cursor += 1 + consumed;
        }

        debug!(%run_id, "pipeline run completed");
        Ok(())
    }
}

impl FromIterator<Item> for Pipeline {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

/// Match the items following a callable against its signature.
///
/// Fixed slots are filled first, one following value each, type-checked
/// individually. A variadic slot then consumes greedily: every further value
/// whose tag equals the element tag is appended, and consumption stops
/// without consuming at the first callable, the first non-assignable value,
/// or the end of the pipeline. Non-variadic signatures never consume beyond
/// their fixed count.
///
/// Returns the bound argument list and the number of items consumed.
fn bind_arguments(signature: &Signature, rest: &[Item]) -> Result<(Vec<Value>, usize), PipelineError> {
    let mut args = Vec::with_capacity(signature.fixed_count());
    let mut consumed = 0;

    for (slot, expected) in signature.fixed_params().iter().enumerate() {
        // A fixed slot can only be satisfied by a value; running into the
        // next callable or the end of the pipeline is a shortage.
        let value = match rest.get(consumed) {
            Some(Item::Value(value)) => value,
            Some(Item::Call(_)) | None => {
                return Err(PipelineError::Arity {
                    callable: signature.name().to_string(),
                    expected: signature.fixed_count(),
                    supplied: args.len(),
                });
            }
        };

        if value.type_tag() != *expected {
            return Err(PipelineError::TypeMismatch {
                callable: signature.name().to_string(),
                slot,
                expected: *expected,
                actual: value.type_tag(),
            });
        }

        args.push(value.clone());
        consumed += 1;
    }

    if let Some(elem) = signature.variadic_elem() {
        while let Some(Item::Value(value)) = rest.get(consumed) {
            if value.type_tag() != elem {
                break;
            }
            args.push(value.clone());
            consumed += 1;
        }
    }

    Ok((args, consumed))
}
