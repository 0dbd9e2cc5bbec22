use log::info;

use readaloud_core::haptics::{HapticFeedback, PulseKind};

/// Haptic stand-in that logs every pulse.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogHaptics {
    pressure: bool,
    pulses: usize,
}

impl LogHaptics {
    pub const fn new(pressure: bool) -> Self {
        Self {
            pressure,
            pulses: 0,
        }
    }

    pub fn pulses(&self) -> usize {
        self.pulses
    }
}

impl HapticFeedback for LogHaptics {
    fn supports_pressure(&self) -> bool {
        self.pressure
    }

    fn pulse(&mut self, kind: PulseKind) {
        self.pulses = self.pulses.saturating_add(1);
        info!("haptics: {:?} #{}", kind, self.pulses);
    }
}
