//! Sequential pipeline executor.
//!
//! A [`Pipeline`] is a flat, ordered sequence of items where some items are
//! callable operations and the rest are plain values. Running the pipeline
//! walks the items left to right: each callable's declared [`Signature`]
//! (fixed parameter tags plus an optional variadic tail) determines how many
//! of the immediately-following values are bound as its arguments, the
//! callable is invoked, and the walk continues from the first unconsumed
//! item. The first failure — a malformed sequence, an argument shortage or
//! type mismatch, a fired cancellation token, or an error returned by a
//! callable itself — ends the walk and is returned to the caller.
//!
//! ```
//! use anyhow::Result;
//! use stepline::{Callable, Item, Pipeline, Signature, TypeTag};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<()> {
//! let greet = Callable::from_fn(
//!     Signature::new("greet").param(TypeTag::Text),
//!     |args| {
//!         println!("hello, {}", args[0]);
//!         Ok(())
//!     },
//! );
//!
//! let pipeline = Pipeline::new(vec![greet.into(), Item::value("world")]);
//! pipeline.run().await
//! # }
//! ```

#[cfg(test)]
pub mod tests_common;

pub mod callable;
pub mod error;
pub mod executor;
pub mod value;

pub use callable::{Callable, Handler, Item, Signature};
pub use error::PipelineError;
pub use executor::Pipeline;
pub use value::{TypeTag, Value};
