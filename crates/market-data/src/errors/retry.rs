/// Classification of a lookup failure.
///
/// Every failure ends in synthetic fallback at the client; the class only
/// decides whether the circuit breaker records it.
///
/// | Class | Serve fallback? | Record circuit breaker failure? |
/// |-------|-----------------|--------------------------------|
/// | `Penalize` | Yes | Yes |
/// | `FallbackOnly` | Yes | No |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FailureClass {
    /// Upstream looks unhealthy (unreachable, timed out, 5xx, 429).
    ///
    /// Enough of these in a row open the circuit for the lookup.
    Penalize,

    /// The failure is specific to this request, or the request was never sent.
    FallbackOnly,
}
