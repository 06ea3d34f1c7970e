//! Error types for the lookup cache
//!
//! Provides the coalescing layer's error taxonomy using thiserror.
//!
//! Upstream failures are fanned out to every waiter as owned clones and are
//! never cached, so the next resolve for the same key starts a fresh cycle.
//! Invalid configuration is normalized to defaults at construction time
//! rather than surfaced here, and internal invariant violations are guarded
//! by debug assertions instead of runtime variants.

use thiserror::Error;

// == Resolve Error Enum ==
/// Outcome of a failed [`resolve`](crate::Coalescer::resolve) call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError<E> {
    /// The upstream fetch settled with an error; propagated verbatim to
    /// every waiter of the pending request.
    #[error("upstream lookup failed: {0}")]
    Upstream(E),

    /// The in-flight fetch was dropped before it settled. The pending
    /// request has been discarded; a new resolve will start a fresh fetch.
    #[error("in-flight lookup was abandoned before it settled")]
    Abandoned,
}
