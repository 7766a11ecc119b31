// The single "destroyed" marker shared by every continuation of one controller.

use crate::error::EffectError;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Debug, Default)]
pub struct Lifecycle {
    destroyed: Rc<Cell<bool>>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the owner destroyed. Returns `true` only for the first call.
    pub fn destroy(&self) -> bool {
        !self.destroyed.replace(true)
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed.get()
    }

    /// Checked after every suspension point, before any side effect.
    #[inline]
    pub fn ensure_live(&self) -> Result<(), EffectError> {
        if self.is_destroyed() {
            Err(EffectError::Cancelled)
        } else {
            Ok(())
        }
    }
}
