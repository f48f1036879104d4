//! Result layers understood by Photon.
//!
//! A layer is the classification tier of a result. Queries may ask the
//! service to prefer one or more layers.
//!
//! # Examples
//! ```
//! use photon_core::Layer;
//!
//! assert_eq!(Layer::Street.as_str(), "street");
//! assert_eq!("HOUSE".parse::<Layer>(), Ok(Layer::House));
//! ```

/// A classification tier of a Photon result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Layer {
    /// Individual buildings with a house number.
    House,
    /// Streets and other named ways.
    Street,
    /// Named localities below district level.
    Locality,
    /// City districts and suburbs.
    District,
    /// Cities, towns and villages.
    City,
    /// Counties.
    County,
    /// States and provinces.
    State,
    /// Countries.
    Country,
}

impl Layer {
    /// Every layer, from the most to the least specific.
    pub const ALL: [Self; 8] = [
        Self::House,
        Self::Street,
        Self::Locality,
        Self::District,
        Self::City,
        Self::County,
        Self::State,
        Self::Country,
    ];

    /// Return the layer as the lowercase name Photon expects.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::House => "house",
            Self::Street => "street",
            Self::Locality => "locality",
            Self::District => "district",
            Self::City => "city",
            Self::County => "county",
            Self::State => "state",
            Self::Country => "country",
        }
    }
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Layer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|layer| layer.as_str() == wanted)
            .ok_or_else(|| format!("unknown layer '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn display_matches_as_str() {
        for layer in Layer::ALL {
            assert_eq!(layer.to_string(), layer.as_str());
        }
    }

    #[test]
    fn parsing_round_trips_every_layer() {
        for layer in Layer::ALL {
            assert_eq!(Layer::from_str(layer.as_str()), Ok(layer));
        }
    }

    #[test]
    fn every_layer_parses_case_insensitively() {
        for layer in Layer::ALL {
            assert_eq!(Layer::from_str(&layer.as_str().to_uppercase()), Ok(layer));
        }
    }

    #[test]
    fn parsing_rejects_unknown() {
        let err = Layer::from_str("planet").unwrap_err();
        assert!(err.contains("unknown layer"));
    }
}
