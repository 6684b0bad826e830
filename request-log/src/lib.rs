//! Request lifecycle logging for tower HTTP services.
//!
//! # Overview
//!
//! [`RequestLogLayer`] wraps a service and emits exactly one line per
//! request, after the response has been fully transmitted:
//!
//! ```text
//! ✅ GET /posts?page=1&limit=10 200 12ms
//! ❌ GET /posts/999 404 1ms
//! ```
//!
//! `✅` marks statuses below 400 and `❌` the rest. The target is the
//! original path plus query string, and the duration runs from request
//! arrival to the last body byte, so slow streams show their true cost.
//!
//! # Design
//!
//! - Completion, not response-return: the response body is wrapped in a
//!   [`LogBody`] which fires when the stream ends, errors, or is
//!   dropped. A handler that fails after the headers go out still
//!   produces its line, exactly once.
//! - Lines go to a [`LogSink`]; [`StdoutSink`] is the default via
//!   [`RequestLogLayer::stdout`]. Sink failures are swallowed, never
//!   surfaced to the request pipeline.
//! - The layer is transparent: status, headers and body bytes reach the
//!   client unchanged.

mod body;
mod layer;
mod sink;

pub use body::LogBody;
pub use layer::{RequestLogLayer, RequestLogService};
pub use sink::{LogSink, StdoutSink};
