//! Tiered multiplier tables for recency and radius decay.

/// Ordered `(threshold, multiplier)` tiers, scanned smallest threshold
/// first. The first tier whose threshold is greater than or equal to the
/// input wins; a `None` threshold is the unconditional catch-all and must
/// be the last tier.
#[derive(Debug, Clone)]
pub struct DecayTable {
    tiers: Vec<(Option<f64>, f64)>,
}

const HOUR: f64 = 3600.0;
const DAY: f64 = 86_400.0;

impl DecayTable {
    /// Recency tiers, thresholds in seconds of item age.
    ///
    /// Fresh items get a 10x boost that falls off steeply after the first
    /// day, so the feed reliably surfaces new content.
    pub fn recency() -> Self {
        Self {
            tiers: vec![
                (Some(HOUR), 10.0),
                (Some(6.0 * HOUR), 6.0),
                (Some(24.0 * HOUR), 3.0),
                (Some(3.0 * DAY), 1.5),
                (Some(7.0 * DAY), 0.5),
                (None, 0.1),
            ],
        }
    }

    /// Radius tiers, thresholds in kilometers.
    ///
    /// The multipliers are far enough apart that distance tiers do not
    /// overlap in practice: a 5 km item outranks a 50 km item regardless of
    /// recency or engagement. Unknown distance is the caller's branch, not
    /// a tier.
    pub fn radius() -> Self {
        Self {
            tiers: vec![
                (Some(5.0), 100.0),
                (Some(20.0), 50.0),
                (Some(50.0), 20.0),
                (Some(100.0), 5.0),
                (None, 1.0),
            ],
        }
    }

    pub fn multiplier_for(&self, value: f64) -> f64 {
        for (threshold, multiplier) in &self.tiers {
            match threshold {
                None => return *multiplier,
                Some(t) if value <= *t => return *multiplier,
                Some(_) => continue,
            }
        }
        // Unreachable with a catch-all tier, but keep a sane floor.
        self.tiers.last().map(|(_, m)| *m).unwrap_or(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recency_tier_boundaries() {
        let table = DecayTable::recency();
        assert_eq!(table.multiplier_for(0.0), 10.0);
        assert_eq!(table.multiplier_for(30.0 * 60.0), 10.0);
        assert_eq!(table.multiplier_for(2.0 * HOUR), 6.0);
        assert_eq!(table.multiplier_for(12.0 * HOUR), 3.0);
        assert_eq!(table.multiplier_for(2.0 * DAY), 1.5);
        assert_eq!(table.multiplier_for(5.0 * DAY), 0.5);
        assert_eq!(table.multiplier_for(30.0 * DAY), 0.1);
    }

    #[test]
    fn radius_tier_boundaries() {
        let table = DecayTable::radius();
        assert_eq!(table.multiplier_for(3.0), 100.0);
        assert_eq!(table.multiplier_for(5.0), 100.0);
        assert_eq!(table.multiplier_for(12.0), 50.0);
        assert_eq!(table.multiplier_for(35.0), 20.0);
        assert_eq!(table.multiplier_for(80.0), 5.0);
        assert_eq!(table.multiplier_for(500.0), 1.0);
    }

    #[test]
    fn multipliers_are_monotone_non_increasing() {
        for table in [DecayTable::recency(), DecayTable::radius()] {
            let mut prev = f64::INFINITY;
            for step in 0..20_000 {
                let value = step as f64 * 50.0;
                let m = table.multiplier_for(value);
                assert!(
                    m <= prev,
                    "multiplier increased at value {value}: {m} > {prev}"
                );
                prev = m;
            }
        }
    }
}
