use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What drives the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Primary clicks place the cursor
    #[default]
    Click,
    /// Timer and clicks step through the preset table
    Auto,
    /// Timer moves the cursor to random positions
    Random,
}

impl Mode {
    /// Modes that keep a repeating timer armed
    pub fn is_timed(&self) -> bool {
        matches!(self, Mode::Auto | Mode::Random)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Click => write!(f, "click"),
            Mode::Auto => write!(f, "auto"),
            Mode::Random => write!(f, "random"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "click" => Ok(Mode::Click),
            "auto" => Ok(Mode::Auto),
            "random" => Ok(Mode::Random),
            other => Err(format!("unknown mode '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display_agree() {
        for mode in [Mode::Click, Mode::Auto, Mode::Random] {
            assert_eq!(mode.to_string().parse::<Mode>().unwrap(), mode);
        }
        assert_eq!("AUTO".parse::<Mode>().unwrap(), Mode::Auto);
        assert!("sweep".parse::<Mode>().is_err());
    }

    #[test]
    fn test_default_is_click() {
        assert_eq!(Mode::default(), Mode::Click);
        assert!(!Mode::Click.is_timed());
        assert!(Mode::Auto.is_timed());
        assert!(Mode::Random.is_timed());
    }
}
