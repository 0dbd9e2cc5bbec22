//! Tactile feedback contract.

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PulseKind {
    /// Short, crisp pulse on pressure-sensitive hardware.
    Peek,
    /// Generic vibration everywhere else.
    Vibrate,
}

pub trait HapticFeedback {
    fn supports_pressure(&self) -> bool;

    fn pulse(&mut self, kind: PulseKind);

    /// Pulse kind matching this device's capability.
    fn step_pulse(&mut self) {
        let kind = if self.supports_pressure() {
            PulseKind::Peek
        } else {
            PulseKind::Vibrate
        };
        self.pulse(kind);
    }
}
