//! Buckets, polarity markers and net lookup.
//!
//! Terminals are bucketed by their grouping attribute, each bucket gets its
//! own pin assignment, and every assigned terminal contributes a high and a
//! low marker. A net is the set of markers in one bucket that sit on the same
//! pin: hovering any of them highlights all of them.

use indexmap::IndexMap;

use crate::assign::AssignmentSet;
use crate::domain::{Terminal, TerminalGroup};

/// Terminals sharing a grouping attribute, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub id: String,
    pub terminals: Vec<String>,
}

impl Bucket {
    pub fn group(&self) -> TerminalGroup {
        TerminalGroup::new(self.id.clone(), self.terminals.len())
    }
}

/// Group terminals by attribute; buckets come out in first-seen order.
pub fn bucket_terminals(terminals: &[Terminal]) -> Vec<Bucket> {
    let mut buckets: IndexMap<&str, Vec<String>> = IndexMap::new();
    for t in terminals {
        buckets.entry(t.group.as_str()).or_default().push(t.id.clone());
    }
    buckets
        .into_iter()
        .map(|(id, terminals)| Bucket {
            id: id.to_string(),
            terminals,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    High,
    Low,
}

impl Polarity {
    pub fn sign(self) -> char {
        match self {
            Polarity::High => '+',
            Polarity::Low => '-',
        }
    }

    pub fn flip(self) -> Self {
        match self {
            Polarity::High => Polarity::Low,
            Polarity::Low => Polarity::High,
        }
    }
}

/// One polarity marker drawn next to a terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub terminal: String,
    pub bucket: String,
    pub polarity: Polarity,
    pub pin: usize,
}

impl Marker {
    pub fn net_key(&self) -> NetKey {
        NetKey {
            bucket: self.bucket.clone(),
            pin: self.pin,
        }
    }
}

/// Identifies a net: a pin index within one bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NetKey {
    pub bucket: String,
    pub pin: usize,
}

impl NetKey {
    /// Parse `BUCKET:PIN`; the bucket part may itself contain colons.
    pub fn parse(s: &str) -> Option<Self> {
        let (bucket, pin) = s.rsplit_once(':')?;
        let pin = pin.trim().parse().ok()?;
        let bucket = bucket.trim();
        if bucket.is_empty() {
            return None;
        }
        Some(Self {
            bucket: bucket.to_string(),
            pin,
        })
    }
}

impl std::fmt::Display for NetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.bucket, self.pin)
    }
}

/// All markers of a run, high then low per terminal, buckets in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overlay {
    markers: Vec<Marker>,
}

impl Overlay {
    /// Pair each bucket's terminals with its assignment. Failed buckets are skipped.
    pub fn build(buckets: &[Bucket], assignments: &AssignmentSet) -> Self {
        let mut markers = Vec::new();
        for bucket in buckets {
            let Some(assignment) = assignments.get(&bucket.id) else {
                continue;
            };
            for (terminal, pair) in bucket.terminals.iter().zip(&assignment.pairs) {
                markers.push(Marker {
                    terminal: terminal.clone(),
                    bucket: bucket.id.clone(),
                    polarity: Polarity::High,
                    pin: pair.high,
                });
                markers.push(Marker {
                    terminal: terminal.clone(),
                    bucket: bucket.id.clone(),
                    polarity: Polarity::Low,
                    pin: pair.low,
                });
            }
        }
        Self { markers }
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// The marker for `terminal` with the given polarity.
    pub fn marker(&self, terminal: &str, polarity: Polarity) -> Option<&Marker> {
        self.markers
            .iter()
            .find(|m| m.terminal == terminal && m.polarity == polarity)
    }

    /// Every marker on `key`, both polarities.
    pub fn net(&self, key: &NetKey) -> Vec<&Marker> {
        self.markers
            .iter()
            .filter(|m| m.pin == key.pin && m.bucket == key.bucket)
            .collect()
    }

    /// Everything highlighted when hovering `marker`.
    pub fn net_of(&self, marker: &Marker) -> Vec<&Marker> {
        self.net(&marker.net_key())
    }

    /// Nets in a bucket with their marker counts, ordered by pin.
    pub fn nets_in_bucket(&self, bucket: &str) -> Vec<(usize, usize)> {
        let mut counts: IndexMap<usize, usize> = IndexMap::new();
        for m in self.markers.iter().filter(|m| m.bucket == bucket) {
            *counts.entry(m.pin).or_default() += 1;
        }
        counts.sort_keys();
        counts.into_iter().collect()
    }
}
