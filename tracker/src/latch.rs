/// One-shot flag raised by the first position fix.
///
/// Goes from unset to set exactly once and is never reset.
#[derive(Debug, Default)]
pub struct FirstFixLatch {
    fired: bool,
}

impl FirstFixLatch {
    pub fn new() -> Self {
        Self { fired: false }
    }

    /// Sets the latch. Returns `true` only for the call that set it.
    pub fn fire(&mut self) -> bool {
        !std::mem::replace(&mut self.fired, true)
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}
