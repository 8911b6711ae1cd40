use crate::cache::model::Outcome;

/// Hit/miss/eviction accumulators for one simulation session. Counters only
/// ever grow; `evictions <= misses` and `hits + misses` equals the number of
/// sub-accesses processed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimStats {
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl SimStats {
    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    pub fn accesses(&self) -> u64 {
        self.hits.saturating_add(self.misses)
    }

    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Hit => self.hits = self.hits.saturating_add(1),
            Outcome::Miss => self.misses = self.misses.saturating_add(1),
            Outcome::MissEvict => {
                self.misses = self.misses.saturating_add(1);
                self.evictions = self.evictions.saturating_add(1);
            }
        }
    }

    /// End-of-run summary line in the classic cache-lab format.
    pub fn summary(&self) -> String {
        format!(
            "hits:{} misses:{} evictions:{}",
            self.hits, self.misses, self.evictions
        )
    }
}

#[cfg(test)]
mod tests {
    use super::SimStats;
    use crate::cache::model::Outcome;

    #[test]
    fn miss_evict_bumps_both_counters() {
        let mut stats = SimStats::default();
        stats.record(Outcome::Hit);
        stats.record(Outcome::Miss);
        stats.record(Outcome::MissEvict);
        assert_eq!(stats.hits(), 1);
        assert_eq!(stats.misses(), 2);
        assert_eq!(stats.evictions(), 1);
        assert_eq!(stats.accesses(), 3);
    }

    #[test]
    fn summary_has_cachelab_format() {
        let mut stats = SimStats::default();
        stats.record(Outcome::Miss);
        assert_eq!(stats.summary(), "hits:0 misses:1 evictions:0");
    }
}
