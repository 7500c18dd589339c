//! Peak sliding-window rates from per-second bins.

use chrono::NaiveDateTime;
use hashbrown::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BurstFamily {
    DamageDealt,
    DamageTaken,
    HealingDealt,
    HealingTaken,
}

const FAMILIES: usize = 4;

impl BurstFamily {
    fn slot(self) -> usize {
        match self {
            BurstFamily::DamageDealt => 0,
            BurstFamily::DamageTaken => 1,
            BurstFamily::HealingDealt => 2,
            BurstFamily::HealingTaken => 3,
        }
    }
}

/// Highest sliding-window mean per family, per second.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BurstValues {
    pub damage: f64,
    pub damage_taken: f64,
    pub healing: f64,
    pub healing_taken: f64,
}

type Bins = HashMap<i64, Vec<f64>>;
type Peaks = HashMap<i64, f64>;

#[derive(Debug, Clone, Default)]
pub struct BurstTracker {
    bins: [Bins; FAMILIES],
    peaks: [Peaks; FAMILIES],
    last_refresh: Option<NaiveDateTime>,
    participants_at_refresh: usize,
}

impl BurstTracker {
    /// Add `amount` to the bin `second` (seconds since combat start).
    pub fn add(&mut self, family: BurstFamily, entity: i64, second: usize, amount: f64) {
        let bins = self.bins[family.slot()].entry(entity).or_default();
        if bins.len() <= second {
            bins.resize(second + 1, 0.0);
        }
        bins[second] += amount;
    }

    /// Refresh peaks when enough combat time passed or the roster changed.
    pub fn maybe_refresh(
        &mut self,
        now: NaiveDateTime,
        participants: usize,
        window_secs: usize,
        refresh_secs: i64,
    ) -> bool {
        let due = self
            .last_refresh
            .is_none_or(|last| (now - last).num_seconds() >= refresh_secs);
        if due || participants != self.participants_at_refresh {
            self.refresh(window_secs);
            self.last_refresh = Some(now);
            self.participants_at_refresh = participants;
            return true;
        }
        false
    }

    /// Recompute every peak from the bins.
    pub fn refresh(&mut self, window_secs: usize) {
        let [dd, dt, hd, ht] = &self.bins;
        let ((a, b), (c, d)) = rayon::join(
            || {
                rayon::join(
                    || family_peaks(dd, window_secs),
                    || family_peaks(dt, window_secs),
                )
            },
            || {
                rayon::join(
                    || family_peaks(hd, window_secs),
                    || family_peaks(ht, window_secs),
                )
            },
        );
        self.peaks = [a, b, c, d];
    }

    pub fn values(&self, entity: i64) -> BurstValues {
        let peak = |family: BurstFamily| {
            self.peaks[family.slot()]
                .get(&entity)
                .copied()
                .unwrap_or_default()
        };
        BurstValues {
            damage: peak(BurstFamily::DamageDealt),
            damage_taken: peak(BurstFamily::DamageTaken),
            healing: peak(BurstFamily::HealingDealt),
            healing_taken: peak(BurstFamily::HealingTaken),
        }
    }
}

fn family_peaks(bins: &Bins, window_secs: usize) -> Peaks {
    bins.iter()
        .map(|(entity, series)| (*entity, max_window_mean(series, window_secs)))
        .collect()
}

/// Largest mean over any `window` consecutive bins. Shorter series average over their length.
pub fn max_window_mean(series: &[f64], window: usize) -> f64 {
    if series.is_empty() || window == 0 {
        return 0.0;
    }
    let window = window.min(series.len());
    let mut sum: f64 = series[..window].iter().sum();
    let mut best = sum;
    for i in window..series.len() {
        sum += series[i] - series[i - window];
        best = best.max(sum);
    }
    best / window as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ts;

    #[test]
    fn window_mean_finds_the_hottest_stretch() {
        let series = [0.0, 10.0, 10.0, 0.0, 0.0];
        assert_eq!(max_window_mean(&series, 2), 10.0);
        assert_eq!(max_window_mean(&series, 10), 4.0);
        assert_eq!(max_window_mean(&[], 20), 0.0);
    }

    #[test]
    fn refresh_waits_for_time_or_roster_change() {
        let mut tracker = BurstTracker::default();
        tracker.add(BurstFamily::DamageDealt, 1, 0, 100.0);
        assert!(tracker.maybe_refresh(ts("20:00:00.000"), 2, 20, 50));
        assert_eq!(tracker.values(1).damage, 100.0);

        tracker.add(BurstFamily::DamageDealt, 1, 0, 100.0);
        assert!(!tracker.maybe_refresh(ts("20:00:10.000"), 2, 20, 50));
        assert_eq!(tracker.values(1).damage, 100.0);

        assert!(tracker.maybe_refresh(ts("20:00:11.000"), 3, 20, 50));
        assert_eq!(tracker.values(1).damage, 200.0);
    }
}
