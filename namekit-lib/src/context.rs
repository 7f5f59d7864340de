use crate::{Address, Amount};

/// Envelope of a single entrypoint call.
///
/// `value` is the native amount attached to the call and `now` the clock
/// reading used for every time comparison inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallContext {
    pub caller: Address,
    pub value: Amount,
    pub now: i64,
}

impl CallContext {
    pub fn new(caller: Address, now: i64) -> Self {
        Self {
            caller,
            value: Amount::zero(),
            now,
        }
    }

    /// Attach native value to the call.
    pub fn with_value(mut self, value: Amount) -> Self {
        self.value = value;
        self
    }
}
