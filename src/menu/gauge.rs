/// Model behind the radial storage meter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageGauge {
    pub used: u64,
    pub limit: u64,
}

impl StorageGauge {
    pub fn new(used: u64, limit: u64) -> Self {
        Self { used, limit }
    }

    /// Filled portion of the ring, clamped to `0.0..=1.0`
    pub fn fraction(&self) -> f32 {
        if self.limit == 0 {
            return 1.0;
        }
        (self.used as f32 / self.limit as f32).clamp(0.0, 1.0)
    }

    /// Text shown in the middle of the ring
    pub fn label(&self) -> String {
        format!("{}/{}", self.used, self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_and_label() {
        let gauge = StorageGauge::new(50, 200);
        assert_eq!(gauge.fraction(), 0.25);
        assert_eq!(gauge.label(), "50/200");
    }

    #[test]
    fn fraction_is_clamped() {
        assert_eq!(StorageGauge::new(300, 200).fraction(), 1.0);
        assert_eq!(StorageGauge::new(0, 0).fraction(), 1.0);
    }
}
