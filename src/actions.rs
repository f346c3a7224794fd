use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::{Result, TramError};

/// A move available at every position. Variant order is the action order used for
/// tie-breaking by the solvers.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Action {
    /// Advance one position.
    Walk,
    /// Try to double the position; may fail and stay put.
    Tram,
}

impl Action {
    /// Parse an action by name, rejecting anything other than `walk` or `tram`.
    pub fn parse(name: &str) -> Result<Self> {
        Action::from_str(name).map_err(|_| TramError::InvalidAction(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_action_order() {
        let actions: Vec<Action> = Action::iter().collect();
        assert_eq!(actions, vec![Action::Walk, Action::Tram]);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Action::parse("walk").unwrap(), Action::Walk);
        assert_eq!(Action::parse("tram").unwrap(), Action::Tram);
        assert_eq!(Action::Tram.to_string(), "tram");
    }

    #[test]
    fn test_parse_invalid() {
        let err = Action::parse("bus").unwrap_err();
        assert!(matches!(err, TramError::InvalidAction(ref name) if name == "bus"));
        assert!(Action::parse("Walk").is_err());
    }

    #[test]
    fn test_action_serialization_json() {
        let serialized = serde_json::to_string(&Action::Walk).unwrap();
        assert_eq!(serialized, "\"walk\"");
        let deserialized: Action = serde_json::from_str("\"tram\"").unwrap();
        assert_eq!(deserialized, Action::Tram);
    }
}
