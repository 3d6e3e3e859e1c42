use serde::{Deserialize, Serialize};

/// How often a recurring obligation falls due.
///
/// Serialized with the labels the UI shows ("Monthly", "Quarterly",
/// "Semi-Annual", "Annual"). Any label outside that set, including a
/// missing one, reads back as `Monthly`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Frequency {
    #[default]
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
}

impl Frequency {
    /// Every frequency, in the order forms list them.
    pub const ALL: [Frequency; 4] = [
        Frequency::Monthly,
        Frequency::Quarterly,
        Frequency::SemiAnnual,
        Frequency::Annual,
    ];

    /// Length of one payment cycle in calendar months.
    pub fn period_months(self) -> u32 {
        match self {
            Frequency::Monthly => 1,
            Frequency::Quarterly => 3,
            Frequency::SemiAnnual => 6,
            Frequency::Annual => 12,
        }
    }

    /// Whether obligations with this frequency need money set aside ahead of time.
    pub fn accrues(self) -> bool {
        self != Frequency::Monthly
    }

    pub fn label(self) -> &'static str {
        match self {
            Frequency::Monthly => "Monthly",
            Frequency::Quarterly => "Quarterly",
            Frequency::SemiAnnual => "Semi-Annual",
            Frequency::Annual => "Annual",
        }
    }

    /// Strict parse used by form validation. Unlike deserialization,
    /// an unknown label is an error here.
    pub fn parse(label: &str) -> Option<Self> {
        let normalized = label.trim().to_ascii_lowercase().replace([' ', '_'], "-");
        match normalized.as_str() {
            "monthly" => Some(Frequency::Monthly),
            "quarterly" => Some(Frequency::Quarterly),
            "semi-annual" | "semiannual" => Some(Frequency::SemiAnnual),
            "annual" | "yearly" => Some(Frequency::Annual),
            _ => None,
        }
    }
}

impl From<String> for Frequency {
    fn from(label: String) -> Self {
        Frequency::parse(&label).unwrap_or_default()
    }
}

impl From<Frequency> for String {
    fn from(frequency: Frequency) -> Self {
        frequency.label().to_string()
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
