//! Trace-driven simulator for a set-associative cache with LRU replacement.
//! Replays a valgrind-style memory trace against a configurable geometry
//! (set index bits, associativity, block offset bits) and counts hits,
//! misses, and evictions. Only tag and recency state is modeled; no data
//! moves anywhere.

pub mod cache;
pub mod sim;
