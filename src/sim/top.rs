use crate::cache::addr::decode;
use crate::cache::model::{Cache, Outcome};
use crate::cache::stats::SimStats;
use crate::sim::config::CacheGeometry;
use crate::sim::trace::{AccessKind, AccessRecord};

use log::debug;

/// One simulation session: the cache, its counters, and the fixed geometry
/// used to decode every address. Stats live here rather than in globals so
/// independent sessions never share state.
pub struct Sim {
    geometry: CacheGeometry,
    cache: Cache,
    stats: SimStats,
    verbose: bool,
}

impl Sim {
    pub fn new(geometry: CacheGeometry, verbose: bool) -> Sim {
        Sim {
            geometry,
            cache: Cache::new(geometry.num_sets(), geometry.lines_per_set),
            stats: SimStats::default(),
            verbose,
        }
    }

    /// Folds every record into the cache, strictly in input order.
    pub fn run(&mut self, records: impl Iterator<Item = AccessRecord>) {
        for record in records {
            self.process(record);
        }
    }

    /// Applies one trace record: decode once, then a single access for a load
    /// or store, two for a modify. The modify's store sub-access always hits
    /// since the load sub-access just installed or refreshed that tag.
    pub fn process(&mut self, record: AccessRecord) {
        let (tag, set_idx) = decode(record.addr, self.geometry.set_bits, self.geometry.block_bits);
        debug!(
            "{:?} addr {:#x} -> tag {:#x} set {}",
            record.kind, record.addr, tag, set_idx
        );

        let label = match record.kind {
            AccessKind::Load | AccessKind::Store => self.access_once(tag, set_idx).to_string(),
            AccessKind::Modify => {
                let load = self.access_once(tag, set_idx);
                let store = self.access_once(tag, set_idx);
                format!("{} {}", load, store)
            }
        };
        if self.verbose {
            let kind_char = match record.kind {
                AccessKind::Load => 'L',
                AccessKind::Store => 'S',
                AccessKind::Modify => 'M',
            };
            println!("{} {:x},{} {}", kind_char, record.addr, record.size, label);
        }
    }

    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    fn access_once(&mut self, tag: u64, set_idx: usize) -> &'static str {
        let outcome = self.cache.access(tag, set_idx);
        self.stats.record(outcome);
        match outcome {
            Outcome::Hit => "hit",
            Outcome::Miss => "miss",
            Outcome::MissEvict => "miss eviction",
        }
    }
}
