/// Source of monotonic milliseconds since an arbitrary epoch (usually boot).
///
/// Every deadline in the protocol core is expressed against this scale;
/// wall-clock time is never consulted.
pub trait TimeProvider {
    fn uptime_ms(&self) -> u64;
}
