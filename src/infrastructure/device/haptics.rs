/// Discrete, fire-and-forget haptic pulses
pub trait HapticSink: Send + Sync {
    fn light(&self);
    fn medium(&self);
    fn heavy(&self);
    fn success(&self);
    fn warning(&self);
    fn error(&self);
}

/// Logs every pulse at trace level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingHaptics;

impl HapticSink for TracingHaptics {
    fn light(&self) {
        tracing::trace!(pulse = "light", "Haptic");
    }

    fn medium(&self) {
        tracing::trace!(pulse = "medium", "Haptic");
    }

    fn heavy(&self) {
        tracing::trace!(pulse = "heavy", "Haptic");
    }

    fn success(&self) {
        tracing::trace!(pulse = "success", "Haptic");
    }

    fn warning(&self) {
        tracing::trace!(pulse = "warning", "Haptic");
    }

    fn error(&self) {
        tracing::trace!(pulse = "error", "Haptic");
    }
}
