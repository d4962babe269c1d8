/// Inclusive integer range backing a slider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Range {
    pub min: i64,
    pub max: i64,
    pub default: i64,
}

impl Range {
    pub const fn new_with_default(min: i64, max: i64, default: i64) -> Self {
        Range { min, max, default }
    }

    pub fn distance(&self) -> i64 {
        self.max - self.min
    }

    pub fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.min, self.max.max(self.min))
    }

    /// Where `value` sits in the range, in `[0.0, 1.0]`. Out of range values are clamped first.
    pub fn fraction_from_value(&self, value: i64) -> f64 {
        if self.distance() <= 0 {
            return 0.0;
        }

        (self.clamp(value) - self.min) as f64 / self.distance() as f64
    }
}
