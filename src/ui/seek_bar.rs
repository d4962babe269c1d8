/// Seek control state mirrored from the engine.
///
/// While the user holds the control, engine position updates are not applied so the handle
/// does not jump back under the pointer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeekBar {
    value: i64,
    max: i64,
    held: bool,
}

impl SeekBar {
    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn press(&mut self) {
        self.held = true;
    }

    pub fn release(&mut self) {
        self.held = false;
    }

    /// Sets the range to `[0, duration]`. Negative durations count as unknown.
    pub fn set_duration(&mut self, duration: i64) {
        self.max = duration.max(0);
        self.value = self.value.min(self.max);
    }

    /// Applies an engine position. Returns false when the control is held and the value was kept.
    pub fn sync_position(&mut self, position: i64) -> bool {
        if self.held {
            return false;
        }

        self.value = position.clamp(0, self.max);
        true
    }

    /// Takes a user move and returns the position to hand to the engine.
    pub fn user_moved(&mut self, value: i64) -> i64 {
        self.value = value.clamp(0, self.max);
        self.value
    }
}
