use serde::{Deserialize, Serialize};

/// Topology archetypes the engine can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutStrategy {
    Bus,
    Ring,
    Star,
    ExtendedStar,
    Hierarchical,
    Mesh,
    Grid,
    Circular,
    ForceDirected,
}

impl LayoutStrategy {
    pub const ALL: [LayoutStrategy; 9] = [
        Self::Bus,
        Self::Ring,
        Self::Star,
        Self::ExtendedStar,
        Self::Hierarchical,
        Self::Mesh,
        Self::Grid,
        Self::Circular,
        Self::ForceDirected,
    ];

    /// Parse a strategy name. Case and `_`/`-` separators are ignored, so
    /// `extended_star` and `Extended-Star` both resolve.
    pub fn from_str(s: &str) -> Option<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "bus" => Some(Self::Bus),
            "ring" => Some(Self::Ring),
            "star" => Some(Self::Star),
            "extended-star" => Some(Self::ExtendedStar),
            "hierarchical" => Some(Self::Hierarchical),
            "mesh" => Some(Self::Mesh),
            "grid" => Some(Self::Grid),
            "circular" => Some(Self::Circular),
            "force-directed" | "force" => Some(Self::ForceDirected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bus => "bus",
            Self::Ring => "ring",
            Self::Star => "star",
            Self::ExtendedStar => "extended-star",
            Self::Hierarchical => "hierarchical",
            Self::Mesh => "mesh",
            Self::Grid => "grid",
            Self::Circular => "circular",
            Self::ForceDirected => "force-directed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for strategy in LayoutStrategy::ALL {
            assert_eq!(LayoutStrategy::from_str(strategy.as_str()), Some(strategy));
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!(
            LayoutStrategy::from_str("extended_star"),
            Some(LayoutStrategy::ExtendedStar)
        );
        assert_eq!(LayoutStrategy::from_str(" RING "), Some(LayoutStrategy::Ring));
        assert_eq!(
            LayoutStrategy::from_str("force"),
            Some(LayoutStrategy::ForceDirected)
        );
        assert_eq!(LayoutStrategy::from_str("spiral"), None);
    }

    #[test]
    fn test_serde_names() {
        let s: LayoutStrategy = serde_json::from_str("\"extended-star\"").unwrap();
        assert_eq!(s, LayoutStrategy::ExtendedStar);
        assert_eq!(
            serde_json::to_string(&LayoutStrategy::ForceDirected).unwrap(),
            "\"force-directed\""
        );
    }
}
