use crate::value::{TypeTag, Value};
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::sync::Arc;

/// Declared calling convention of a callable: its fixed parameter type tags
/// and, optionally, the element type of a trailing variadic slot.
///
/// The walker never inspects the callable's implementation; everything the
/// argument binder needs to know is carried here. A callable with two fixed
/// string parameters and a variadic int tail is declared as:
///
/// ```
/// use stepline::{Signature, TypeTag};
///
/// let sig = Signature::new("example")
///     .param(TypeTag::Text)
///     .param(TypeTag::Text)
///     .variadic(TypeTag::Int);
/// assert_eq!(sig.fixed_count(), 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signature {
    name: String,
    params: Vec<TypeTag>,
    variadic: Option<TypeTag>,
}

impl Signature {
    /// A signature with no parameters. The name appears only in logs and
    /// error messages.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            variadic: None,
        }
    }

    /// Append one fixed parameter slot.
    pub fn param(mut self, tag: TypeTag) -> Self {
        self.params.push(tag);
        self
    }

    /// Append several fixed parameter slots at once.
    pub fn params(mut self, tags: impl IntoIterator<Item = TypeTag>) -> Self {
        self.params.extend(tags);
        self
    }

    /// Declare a trailing variadic slot accepting zero or more values of the
    /// given element type.
    pub fn variadic(mut self, elem: TypeTag) -> Self {
        self.variadic = Some(elem);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of fixed (non-variadic) parameter slots.
    pub fn fixed_count(&self) -> usize {
        self.params.len()
    }

    pub fn fixed_params(&self) -> &[TypeTag] {
        &self.params
    }

    /// Element type of the variadic slot, if one is declared.
    pub fn variadic_elem(&self) -> Option<TypeTag> {
        self.variadic
    }
}

/// Invocation side of a callable: receives the bound argument list and
/// returns the failure indicator.
///
/// `Ok(())` means success; `Err` stops the pipeline walk and is surfaced to
/// the caller verbatim.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn invoke(&self, args: Vec<Value>) -> Result<()>;
}

struct FnHandler<F>(F);

#[async_trait]
impl<F> Handler for FnHandler<F>
where
    F: Fn(Vec<Value>) -> Result<()> + Send + Sync,
{
    async fn invoke(&self, args: Vec<Value>) -> Result<()> {
        (self.0)(args)
    }
}

/// A pipeline operation: a [`Signature`] describing what it consumes plus the
/// [`Handler`] that runs it.
#[derive(Clone)]
pub struct Callable {
    signature: Signature,
    handler: Arc<dyn Handler>,
}

impl Callable {
    pub fn new(signature: Signature, handler: Arc<dyn Handler>) -> Self {
        Self { signature, handler }
    }

    /// Wrap a plain synchronous closure as a callable, sparing callers a
    /// hand-written [`Handler`] impl.
    pub fn from_fn<F>(signature: Signature, f: F) -> Self
    where
        F: Fn(Vec<Value>) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            signature,
            handler: Arc::new(FnHandler(f)),
        }
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub async fn invoke(&self, args: Vec<Value>) -> Result<()> {
        self.handler.invoke(args).await
    }
}

impl Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// One position in a pipeline: either an operation or a data item.
#[derive(Debug, Clone)]
pub enum Item {
    Call(Callable),
    Value(Value),
}

impl Item {
    /// Shorthand for wrapping a payload as a value item.
    pub fn value(v: impl Into<Value>) -> Self {
        Item::Value(v.into())
    }
}

impl From<Callable> for Item {
    fn from(c: Callable) -> Self {
        Item::Call(c)
    }
}

impl From<Value> for Item {
    fn from(v: Value) -> Self {
        Item::Value(v)
    }
}
