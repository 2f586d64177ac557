use serde::{Deserialize, Serialize};

/// Monotonic timestamp in milliseconds, supplied by the host event loop.
///
/// The engine never reads a wall clock itself; callers pass the current time
/// so scheduling stays deterministic and replayable.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millis(pub u64);

impl Millis {
    pub fn after(self, delta_ms: u64) -> Self {
        Millis(self.0.saturating_add(delta_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::Millis;

    #[test]
    fn arithmetic_saturates() {
        assert_eq!(Millis(u64::MAX).after(5), Millis(u64::MAX));
        assert_eq!(Millis(3).after(7), Millis(10));
    }
}
