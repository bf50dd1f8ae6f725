//! Value objects for Hook Ordering

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Index of a node inside a `NodeGraph` arena.
///
/// Ids follow handler insertion order, which doubles as the stable
/// tie-break key for every ordering decision.
pub type NodeId = usize;

/// Non-binding hint for placing a handler relative to unrelated handlers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulingPreference {
    /// Prefer running before unrelated handlers
    Early,
    /// Prefer running after unrelated handlers
    #[default]
    Late,
}

impl fmt::Display for SchedulingPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulingPreference::Early => write!(f, "early"),
            SchedulingPreference::Late => write!(f, "late"),
        }
    }
}

impl FromStr for SchedulingPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "early" => Ok(SchedulingPreference::Early),
            "late" => Ok(SchedulingPreference::Late),
            other => Err(format!("unknown scheduling preference '{}'", other)),
        }
    }
}

/// Merge bucket of a cluster, keyed by the preferences of its
/// earliest and last unconstrained nodes.
///
/// Declaration order is merge priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClusterBucket {
    EarlyEarly,
    EarlyLate,
    LateEarly,
    LateLate,
}

impl ClusterBucket {
    pub fn classify(entry: SchedulingPreference, exit: SchedulingPreference) -> Self {
        match (entry, exit) {
            (SchedulingPreference::Early, SchedulingPreference::Early) => ClusterBucket::EarlyEarly,
            (SchedulingPreference::Early, SchedulingPreference::Late) => ClusterBucket::EarlyLate,
            (SchedulingPreference::Late, SchedulingPreference::Early) => ClusterBucket::LateEarly,
            (SchedulingPreference::Late, SchedulingPreference::Late) => ClusterBucket::LateLate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preference_is_late() {
        assert_eq!(SchedulingPreference::default(), SchedulingPreference::Late);
    }

    #[test]
    fn test_preference_parse() {
        assert_eq!("EARLY".parse::<SchedulingPreference>(), Ok(SchedulingPreference::Early));
        assert_eq!(" late ".parse::<SchedulingPreference>(), Ok(SchedulingPreference::Late));
        assert!("soon".parse::<SchedulingPreference>().is_err());
    }

    #[test]
    fn test_preference_display() {
        assert_eq!(SchedulingPreference::Early.to_string(), "early");
        assert_eq!(SchedulingPreference::Late.to_string(), "late");
    }

    #[test]
    fn test_bucket_priority() {
        use SchedulingPreference::{Early, Late};

        let mut buckets = vec![
            ClusterBucket::classify(Late, Late),
            ClusterBucket::classify(Late, Early),
            ClusterBucket::classify(Early, Late),
            ClusterBucket::classify(Early, Early),
        ];
        buckets.sort();

        assert_eq!(
            buckets,
            vec![
                ClusterBucket::EarlyEarly,
                ClusterBucket::EarlyLate,
                ClusterBucket::LateEarly,
                ClusterBucket::LateLate,
            ]
        );
    }
}
