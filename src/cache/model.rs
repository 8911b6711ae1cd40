/// Classification of a single access against the tag array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Hit,
    /// Miss filled into an empty line.
    Miss,
    /// Miss that displaced the LRU line of a full set.
    MissEvict,
}

/// One storage slot within a set. `tag == None` is the invalid state; `age`
/// only carries meaning relative to sibling lines in the same set.
#[derive(Debug, Clone, Copy, Default)]
struct CacheLine {
    tag: Option<u64>,
    age: u64,
}

/// Set-associative tag array with LRU replacement. No data is stored, only
/// the tag/recency bookkeeping needed to classify accesses.
///
/// Recency uses an age counter per line: every touch of a line bumps the age
/// of its valid siblings and zeroes its own, so the least recently touched
/// line always holds the largest age in its set.
#[derive(Debug)]
pub struct Cache {
    lines_per_set: usize,
    sets: Vec<Vec<CacheLine>>,
}

impl Cache {
    pub fn new(num_sets: usize, lines_per_set: usize) -> Self {
        let num_sets = num_sets.max(1);
        let lines_per_set = lines_per_set.max(1);
        Self {
            lines_per_set,
            sets: vec![vec![CacheLine::default(); lines_per_set]; num_sets],
        }
    }

    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }

    pub fn lines_per_set(&self) -> usize {
        self.lines_per_set
    }

    /// Looks up `tag` in set `set_idx` and updates the tag array: a hit
    /// refreshes the line's recency, a miss installs the tag into an empty
    /// line or, with the set full, into the LRU victim.
    ///
    /// Panics if `set_idx` is out of range; the caller decodes set indices
    /// from a geometry that matches this cache, so that is a programming
    /// error rather than a runtime condition.
    pub fn access(&mut self, tag: u64, set_idx: usize) -> Outcome {
        let set = &self.sets[set_idx];
        if let Some(way) = set.iter().position(|line| line.tag == Some(tag)) {
            self.touch(set_idx, way);
            return Outcome::Hit;
        }

        if let Some(way) = set.iter().position(|line| line.tag.is_none()) {
            self.fill(set_idx, way, tag);
            Outcome::Miss
        } else {
            let way = self.lru_victim(set_idx);
            self.fill(set_idx, way, tag);
            Outcome::MissEvict
        }
    }

    fn fill(&mut self, set_idx: usize, way: usize, tag: u64) {
        self.sets[set_idx][way].tag = Some(tag);
        self.touch(set_idx, way);
    }

    /// Marks `way` most recently used: ages every other valid line in the
    /// set by one, then zeroes the touched line's age.
    fn touch(&mut self, set_idx: usize, way: usize) {
        for (i, line) in self.sets[set_idx].iter_mut().enumerate() {
            if i != way && line.tag.is_some() {
                line.age += 1;
            }
        }
        self.sets[set_idx][way].age = 0;
    }

    /// Picks the valid line with the largest age; the lowest way index wins
    /// ties. The strict `>` scan from way 0 keeps eviction choices identical
    /// to reference traces on inputs where ages collide.
    fn lru_victim(&self, set_idx: usize) -> usize {
        let mut victim = 0;
        let mut max_age = 0;
        for (i, line) in self.sets[set_idx].iter().enumerate() {
            if line.tag.is_some() && line.age > max_age {
                max_age = line.age;
                victim = i;
            }
        }
        victim
    }
}

#[cfg(test)]
mod tests {
    use super::{Cache, Outcome};

    #[test]
    fn geometry_is_fixed_at_construction() {
        let mut cache = Cache::new(8, 2);
        assert_eq!(cache.num_sets(), 8);
        assert_eq!(cache.lines_per_set(), 2);
        for tag in 0..100 {
            let _ = cache.access(tag, (tag % 8) as usize);
        }
        assert_eq!(cache.num_sets(), 8);
        assert!(cache.sets.iter().all(|set| set.len() == 2));
    }

    #[test]
    fn immediate_reaccess_misses_then_hits() {
        let mut cache = Cache::new(4, 2);
        assert_eq!(cache.access(7, 1), Outcome::Miss);
        assert_eq!(cache.access(7, 1), Outcome::Hit);
    }

    #[test]
    fn same_tag_in_different_sets_does_not_hit() {
        let mut cache = Cache::new(4, 1);
        assert_eq!(cache.access(7, 0), Outcome::Miss);
        assert_eq!(cache.access(7, 1), Outcome::Miss);
    }

    #[test]
    fn lru_evicts_least_recently_touched_line() {
        // E=2, tags A B A C: B is stale, so C must displace B and leave A.
        let mut cache = Cache::new(1, 2);
        assert_eq!(cache.access(0xa, 0), Outcome::Miss);
        assert_eq!(cache.access(0xb, 0), Outcome::Miss);
        assert_eq!(cache.access(0xa, 0), Outcome::Hit);
        assert_eq!(cache.access(0xc, 0), Outcome::MissEvict);
        assert_eq!(cache.access(0xa, 0), Outcome::Hit);
        assert_eq!(cache.access(0xb, 0), Outcome::MissEvict);
    }

    #[test]
    fn no_eviction_until_set_is_full() {
        let ways = 4;
        let mut cache = Cache::new(2, ways);
        for tag in 0..ways as u64 {
            assert_eq!(cache.access(tag, 0), Outcome::Miss);
        }
        // (E+1)-th distinct tag is the first to evict.
        assert_eq!(cache.access(ways as u64, 0), Outcome::MissEvict);
    }

    #[test]
    fn direct_mapped_set_thrashes() {
        let mut cache = Cache::new(2, 1);
        assert_eq!(cache.access(1, 0), Outcome::Miss);
        assert_eq!(cache.access(2, 0), Outcome::MissEvict);
        assert_eq!(cache.access(1, 0), Outcome::MissEvict);
    }

    #[test]
    fn victim_tie_breaks_to_lowest_way() {
        let mut cache = Cache::new(1, 3);
        for way in 0..3 {
            cache.sets[0][way].tag = Some(way as u64);
            cache.sets[0][way].age = 5;
        }
        assert_eq!(cache.lru_victim(0), 0);
    }

    #[test]
    fn touch_ages_only_valid_siblings() {
        let mut cache = Cache::new(1, 3);
        let _ = cache.access(1, 0);
        let _ = cache.access(2, 0);
        assert_eq!(cache.sets[0][0].age, 1);
        assert_eq!(cache.sets[0][1].age, 0);
        // way 2 was never filled and must stay untouched
        assert!(cache.sets[0][2].tag.is_none());
        assert_eq!(cache.sets[0][2].age, 0);
    }
}
