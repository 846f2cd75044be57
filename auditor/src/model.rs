//! Snapshot records produced by the collector
//!
//! Sizes are decimal gigabytes (divisor `1e9`) rounded to two places;
//! percentages come from the host's own accounting and are never
//! recomputed from the rounded sizes.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Marker stored for a mount point that does not resolve to a filesystem
pub const MISSING_MOUNT: &str = "mount not found";

const BYTES_PER_GB: f64 = 1e9;

/// Round `value` to `places` decimal places
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Convert a byte count to decimal gigabytes, rounded to two places
pub fn bytes_to_gb(bytes: u64) -> f64 {
    round_to(bytes as f64 / BYTES_PER_GB, 2)
}

/// Memory and swap usage at audit time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemorySnapshot {
    pub mem_total_gb: f64,
    pub mem_used_gb: f64,
    pub mem_used_pct: f64,
    pub swap_total_gb: f64,
    pub swap_used_pct: f64,
}

impl MemorySnapshot {
    /// Scalar metrics in report order, as `(name, value)` pairs
    pub fn metrics(&self) -> [(&'static str, f64); 5] {
        [
            ("mem_total_gb", self.mem_total_gb),
            ("mem_used_gb", self.mem_used_gb),
            ("mem_used_pct", self.mem_used_pct),
            ("swap_total_gb", self.swap_total_gb),
            ("swap_used_pct", self.swap_used_pct),
        ]
    }
}

/// Usage of one mounted filesystem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskUsage {
    pub total_gb: f64,
    pub used_gb: f64,
    pub used_pct: f64,
}

/// Per-mount result: either usage figures or the missing-mount marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DiskEntry {
    Usage(DiskUsage),
    Missing { error: String },
}

impl DiskEntry {
    pub fn missing() -> Self {
        DiskEntry::Missing {
            error: MISSING_MOUNT.to_string(),
        }
    }

    pub fn usage(&self) -> Option<&DiskUsage> {
        match self {
            DiskEntry::Usage(usage) => Some(usage),
            DiskEntry::Missing { .. } => None,
        }
    }
}

/// String-keyed map that keeps insertion order
///
/// Serialized as a JSON object whose key order is the insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V>(Vec<(String, V)>);

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        OrderedMap(Vec::new())
    }
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` under `key`, replacing an earlier value in place
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<V> FromIterator<(String, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedMapVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map keyed by string")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = OrderedMap::new();
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

/// Disk results keyed by mount point, in collection order
pub type DiskSnapshot = OrderedMap<DiskEntry>;

impl OrderedMap<DiskEntry> {
    /// Used percentage of `mount`, `None` if absent or missing
    pub fn used_pct(&self, mount: &str) -> Option<f64> {
        self.get(mount).and_then(DiskEntry::usage).map(|u| u.used_pct)
    }

    /// Mounts that resolved to a filesystem, skipping missing-mount markers
    pub fn usages(&self) -> impl Iterator<Item = (&str, &DiskUsage)> {
        self.iter()
            .filter_map(|(mount, entry)| entry.usage().map(|usage| (mount, usage)))
    }
}
