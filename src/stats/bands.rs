use std::fmt;

use serde::{Serialize, Serializer};

/// Fixed age bands used by the summary report, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgeBand {
    UpTo10,
    From11To15,
    From16To21,
    From22To30,
    From31To40,
    From41To50,
    From51To70,
    Over70,
}

impl AgeBand {
    pub const ALL: [AgeBand; 8] = [
        AgeBand::UpTo10,
        AgeBand::From11To15,
        AgeBand::From16To21,
        AgeBand::From22To30,
        AgeBand::From31To40,
        AgeBand::From41To50,
        AgeBand::From51To70,
        AgeBand::Over70,
    ];

    /// Inclusive upper bound; `None` for the open-ended top band.
    pub fn upper_bound(self) -> Option<i64> {
        match self {
            AgeBand::UpTo10 => Some(10),
            AgeBand::From11To15 => Some(15),
            AgeBand::From16To21 => Some(21),
            AgeBand::From22To30 => Some(30),
            AgeBand::From31To40 => Some(40),
            AgeBand::From41To50 => Some(50),
            AgeBand::From51To70 => Some(70),
            AgeBand::Over70 => None,
        }
    }

    /// First band whose upper bound covers `age`.
    ///
    /// Negative ages land in `0-10` and anything past 70 in `71+`.
    pub fn for_age(age: i64) -> Self {
        Self::ALL
            .into_iter()
            .find(|band| band.upper_bound().map_or(true, |max| age <= max))
            .unwrap_or(AgeBand::Over70)
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeBand::UpTo10 => "0-10",
            AgeBand::From11To15 => "11-15",
            AgeBand::From16To21 => "16-21",
            AgeBand::From22To30 => "22-30",
            AgeBand::From31To40 => "31-40",
            AgeBand::From41To50 => "41-50",
            AgeBand::From51To70 => "51-70",
            AgeBand::Over70 => "71+",
        }
    }
}

impl fmt::Display for AgeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for AgeBand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
