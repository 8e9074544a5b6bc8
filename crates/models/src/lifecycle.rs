use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// Which side of the soft-delete line a listing should show
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Rows still in use, the default view
    #[default]
    Active,
    /// Rows that have been soft deleted
    Eliminated,
}

impl Visibility {
    /// The value the `active` column must hold for a row to be visible
    pub fn active_flag(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl Display for Visibility {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Active => write!(f, "active"),
            Self::Eliminated => write!(f, "eliminated"),
        }
    }
}

impl FromStr for Visibility {
    type Err = ParseLifecycleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "eliminated" | "inactive" => Ok(Self::Eliminated),
            _ => Err(ParseLifecycleError(s.to_owned())),
        }
    }
}

/// How a delete request removes a row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeleteMode {
    /// Flip the `active` flag, keeping the row addressable
    #[default]
    Soft,
    /// Physically remove the row along with the rows it owns
    Hard,
}

impl Display for DeleteMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Soft => write!(f, "soft"),
            Self::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for DeleteMode {
    type Err = ParseLifecycleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "soft" => Ok(Self::Soft),
            "hard" => Ok(Self::Hard),
            _ => Err(ParseLifecycleError(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLifecycleError(pub String);

impl Display for ParseLifecycleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "Unrecognized lifecycle value: {}", self.0)
    }
}

impl std::error::Error for ParseLifecycleError {}

#[cfg(test)]
mod test {
    use crate::lifecycle::{DeleteMode, Visibility};
    use std::str::FromStr;

    #[test]
    fn test_visibility_from_str() {
        assert_eq!(Visibility::from_str("active").unwrap(), Visibility::Active);
        assert_eq!(
            Visibility::from_str(" Eliminated ").unwrap(),
            Visibility::Eliminated
        );
        assert_eq!(
            Visibility::from_str("inactive").unwrap(),
            Visibility::Eliminated
        );
        assert!(Visibility::from_str("archived").is_err());
    }

    #[test]
    fn test_visibility_active_flag() {
        assert!(Visibility::Active.active_flag());
        assert!(!Visibility::Eliminated.active_flag());
        assert_eq!(Visibility::default(), Visibility::Active);
    }

    #[test]
    fn test_delete_mode_parse_and_display() {
        assert_eq!(DeleteMode::from_str("HARD").unwrap(), DeleteMode::Hard);
        assert_eq!(DeleteMode::default(), DeleteMode::Soft);
        assert_eq!(DeleteMode::Hard.to_string(), "hard");

        let err = DeleteMode::from_str("purge").unwrap_err();
        assert_eq!(err.to_string(), "Unrecognized lifecycle value: purge");
    }

    #[test]
    fn test_lifecycle_serde_is_lowercase() {
        let json = serde_json::to_string(&Visibility::Eliminated).unwrap();
        assert_eq!(json, "\"eliminated\"");

        let mode: DeleteMode = serde_json::from_str("\"hard\"").unwrap();
        assert_eq!(mode, DeleteMode::Hard);
    }
}
