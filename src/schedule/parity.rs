// Week parity type
// Numerator and denominator weeks alternate; each has its own schedule file

use std::fmt;
use std::str::FromStr;

use super::error::ScheduleError;

/// Which of the two alternating weekly schedules is meant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WeekParity {
    Numerator,
    Denominator,
}

impl WeekParity {
    /// Both parities, in file order
    pub const ALL: [Self; 2] = [Self::Numerator, Self::Denominator];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Numerator => "numerator",
            Self::Denominator => "denominator",
        }
    }

    /// File name of the backing document, e.g. `schedule_numerator.json`
    pub fn file_name(self) -> String {
        format!("schedule_{}.json", self.as_str())
    }
}

impl fmt::Display for WeekParity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeekParity {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "numerator" => Ok(Self::Numerator),
            "denominator" => Ok(Self::Denominator),
            other => Err(ScheduleError::InvalidParity(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_parities() {
        assert_eq!("numerator".parse::<WeekParity>().ok(), Some(WeekParity::Numerator));
        assert_eq!(
            "denominator".parse::<WeekParity>().ok(),
            Some(WeekParity::Denominator)
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        for input in ["spring", "", "Numerator", " numerator", "denominator/"] {
            let err = input.parse::<WeekParity>().unwrap_err();
            assert!(
                matches!(err, ScheduleError::InvalidParity(ref p) if p == input),
                "unexpected error for {input:?}: {err}"
            );
        }
    }

    #[test]
    fn test_file_name() {
        assert_eq!(WeekParity::Numerator.file_name(), "schedule_numerator.json");
        assert_eq!(WeekParity::Denominator.file_name(), "schedule_denominator.json");
    }

    #[test]
    fn test_display_matches_parse() {
        for parity in WeekParity::ALL {
            assert_eq!(parity.to_string().parse::<WeekParity>().ok(), Some(parity));
        }
    }
}
