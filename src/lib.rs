//! Chainable handles over one or many DOM elements.
//!
//! A `Handle` wraps either a single element (`Dom::one`, the `$` of
//! jQuery-style libraries) or a collection (`Dom::all`, `$$`). Every method
//! works the same way on both: it is applied to the single element, or to
//! each element of the collection in order, and returns the handle again so
//! calls can be chained.
//!
//! ## Example
//!
//! ```no_run
//! use domchain::{Dom, Listener, Options, Position};
//!
//! # fn main() -> Result<(), domchain::Error> {
//! let dom = Dom::new()?;
//!
//! let items = dom.all("#todo li")?;
//! items
//!     .add_class("todo-item")?
//!     .data("state", "open")?
//!     .on("click", &Listener::new(|event| {
//!         web_sys::console::log_1(&event.type_().into());
//!     }))?;
//!
//! dom.one("#todo")?
//!     .append(vec!["<li>Write the docs</li>"])?
//!     .find("li:last-child")?
//!     .clone_to("#done", Options { position: Position::Inside, ..Options::default() })?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Chaining and execution
//!
//! Operations are handed to the handle's chain. With `Execution::Immediate`
//! (the default) they run at once, except after `wait` or `animate`: those
//! suspend the chain, and later operations run in order once the timer or
//! animation completes. With `Execution::Deferred`, operations are queued
//! until `Handle::flush` is awaited.
//!
//! ## Errors
//!
//! Failures are reported as an `Error` carrying the method name and the
//! handle's selector, and are passed to the `ErrorHandler` from the `Config`.
//! The default handler, `Propagate`, returns them to the caller;
//! `LogAndContinue` logs them and lets the chain carry on.

// Re-export the host binding crates.
pub use js_sys;
pub use web_sys;

mod config;
mod dom;
mod error;
mod events;
mod form;
mod handle;
mod insert;
mod logging;
mod queue;
mod resolve;
mod sanitize;
mod style;
mod targets;

// Re-export items at the top level.
pub use self::config::Config;
pub use self::dom::Dom;
pub use self::error::{Context, Error, ErrorHandler, ErrorKind, LogAndContinue, Propagate};
pub use self::events::Listener;
pub use self::form::Value;
pub use self::handle::Handle;
pub use self::insert::{Mode, Options, Position};
pub use self::queue::Execution;
pub use self::resolve::{looks_like_markup, Source};
pub use self::targets::{Cardinality, Targets};
