//! Risk classification
//!
//! Tags are kept as an enum internally and rendered to their string form
//! (`RAM_CRITICAL`, `SWAP_CRITICAL`, `DISK_CRITICAL:<mount>`, `OK`) only
//! when serialized or displayed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::Thresholds;
use crate::model::{DiskSnapshot, MemorySnapshot};

const DISK_PREFIX: &str = "DISK_CRITICAL:";

/// One over-threshold condition, or the all-clear sentinel
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RiskTag {
    RamCritical,
    SwapCritical,
    DiskCritical(String),
    Ok,
}

impl RiskTag {
    pub fn is_critical(&self) -> bool {
        !matches!(self, RiskTag::Ok)
    }
}

impl fmt::Display for RiskTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskTag::RamCritical => f.write_str("RAM_CRITICAL"),
            RiskTag::SwapCritical => f.write_str("SWAP_CRITICAL"),
            RiskTag::DiskCritical(mount) => write!(f, "{DISK_PREFIX}{mount}"),
            RiskTag::Ok => f.write_str("OK"),
        }
    }
}

impl FromStr for RiskTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RAM_CRITICAL" => Ok(RiskTag::RamCritical),
            "SWAP_CRITICAL" => Ok(RiskTag::SwapCritical),
            "OK" => Ok(RiskTag::Ok),
            _ => match s.strip_prefix(DISK_PREFIX) {
                Some(mount) if !mount.is_empty() => Ok(RiskTag::DiskCritical(mount.to_string())),
                _ => Err(format!("Unknown risk tag: {s}")),
            },
        }
    }
}

impl Serialize for RiskTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RiskTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Ordered, never-empty list of risk tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RiskTags(Vec<RiskTag>);

impl RiskTags {
    /// Build from classifier output, substituting `OK` when nothing fired.
    ///
    /// `OK` entries among critical tags are dropped, so `OK` only ever
    /// appears alone.
    pub fn from_alerts(mut alerts: Vec<RiskTag>) -> Self {
        alerts.retain(RiskTag::is_critical);
        if alerts.is_empty() {
            RiskTags(vec![RiskTag::Ok])
        } else {
            RiskTags(alerts)
        }
    }

    pub fn contains(&self, tag: &RiskTag) -> bool {
        self.0.contains(tag)
    }

    pub fn is_ok(&self) -> bool {
        self.0 == [RiskTag::Ok]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RiskTag> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// String form joined by `sep`, as stored in the history table
    pub fn join(&self, sep: &str) -> String {
        self.0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(sep)
    }
}

impl<'de> Deserialize<'de> for RiskTags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tags = Vec::<RiskTag>::deserialize(deserializer)?;
        if tags.is_empty() {
            return Err(serde::de::Error::custom("risk tag list must not be empty"));
        }
        if tags.len() > 1 && tags.contains(&RiskTag::Ok) {
            return Err(serde::de::Error::custom("OK cannot be combined with other risk tags"));
        }
        Ok(RiskTags(tags))
    }
}

impl<'a> IntoIterator for &'a RiskTags {
    type Item = &'a RiskTag;
    type IntoIter = std::slice::Iter<'a, RiskTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Compare memory, swap and each disk against the classifier thresholds.
///
/// Order is RAM, swap, then disks in snapshot order. Missing mounts never
/// produce a tag.
pub fn classify_risk(mem: &MemorySnapshot, disks: &DiskSnapshot, thresholds: &Thresholds) -> RiskTags {
    let mut alerts = Vec::new();

    if mem.mem_used_pct >= thresholds.mem_used_pct {
        alerts.push(RiskTag::RamCritical);
    }

    if mem.swap_used_pct >= thresholds.swap_used_pct {
        alerts.push(RiskTag::SwapCritical);
    }

    for (mount, usage) in disks.usages() {
        if usage.used_pct >= thresholds.disk_used_pct {
            alerts.push(RiskTag::DiskCritical(mount.to_string()));
        }
    }

    RiskTags::from_alerts(alerts)
}
