use std::collections::HashMap;

use trellis_common::types::WindowId;

/// Unmap notifications we caused ourselves and must not treat as the
/// client withdrawing.
#[derive(Debug, Default)]
pub struct PendingUnmaps {
    counts: HashMap<WindowId, u32>,
}

impl PendingUnmaps {
    pub fn expect(&mut self, window: WindowId) {
        *self.counts.entry(window).or_insert(0) += 1;
    }

    /// Consume one expected unmap of `window`. Returns `false` when none
    /// was pending.
    pub fn take(&mut self, window: WindowId) -> bool {
        let Some(count) = self.counts.get_mut(&window) else {
            return false;
        };
        *count -= 1;
        if *count == 0 {
            self.counts.remove(&window);
        }
        true
    }

    pub fn forget(&mut self, window: WindowId) {
        self.counts.remove(&window);
    }
}
