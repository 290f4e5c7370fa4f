/// Classification for retry policy.
///
/// Used by callers (and by the batch quote operation) to decide what to do
/// after a failed provider call.
///
/// # Behavior Summary
///
/// | Class | Retry? | Batch behavior |
/// |-------|--------|----------------|
/// | `Never` | No | Record the error and continue |
/// | `AfterCooldown` | After the rate-limit window resets | Pause for the cooldown, then continue |
/// | `WithBackoff` | Yes, with caller-chosen backoff | Record the error and continue |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Never retry - bad symbol, explicit provider error, or bad configuration.
    /// The request is fundamentally invalid and retrying won't help.
    Never,

    /// The provider signalled its request quota is exhausted.
    ///
    /// Retrying before the provider's limit window resets will fail again,
    /// so the caller should wait out a cooldown first.
    AfterCooldown,

    /// Transient transport failure (timeout, connection reset).
    /// A retry with backoff may succeed.
    WithBackoff,
}
