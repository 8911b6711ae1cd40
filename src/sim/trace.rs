use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    Load,
    Store,
    /// Load followed by a store to the same address.
    Modify,
}

/// One parsed trace record. `size` is carried through from the trace text but
/// never affects classification; only whole blocks matter to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessRecord {
    pub kind: AccessKind,
    pub addr: u64,
    pub size: u32,
}

/// Parses one valgrind-style trace line, `<kind> <hexaddr>,<size>` with
/// optional leading whitespace. Returns `None` for anything else, including
/// instruction-fetch (`I`) lines, which the data cache ignores.
pub fn parse_line(line: &str) -> Option<AccessRecord> {
    let (kind_str, rest) = line.trim_start().split_once(' ')?;
    let kind = match kind_str {
        "L" => AccessKind::Load,
        "S" => AccessKind::Store,
        "M" => AccessKind::Modify,
        _ => return None,
    };
    let (addr_str, size_str) = rest.trim().split_once(',')?;
    let addr = u64::from_str_radix(addr_str.trim(), 16).ok()?;
    let size = size_str.trim().parse().ok()?;
    Some(AccessRecord { kind, addr, size })
}

/// Streams `AccessRecord`s out of a trace file, skipping lines that do not
/// parse. Skips are diagnostic-only; they are never counted as accesses.
pub struct TraceReader {
    lines: Lines<BufReader<File>>,
}

impl TraceReader {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("cannot open trace file {}", path.display()))?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
        })
    }
}

impl Iterator for TraceReader {
    type Item = AccessRecord;

    fn next(&mut self) -> Option<AccessRecord> {
        loop {
            match self.lines.next()? {
                Ok(line) => {
                    if let Some(record) = parse_line(&line) {
                        return Some(record);
                    }
                    debug!("skipping non-record trace line: {:?}", line.trim_end());
                }
                Err(err) => {
                    warn!("trace read failed mid-stream: {}", err);
                    return None;
                }
            }
        }
    }
}
