//! Subject catalog offered by the enrollment form.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One entry of the fixed subject catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Subject {
    Mathematics,
    Physics,
    Chemistry,
    Biology,
    #[serde(rename = "Computer Science")]
    ComputerScience,
    English,
    History,
}

impl Subject {
    /// Catalog in form display order.
    pub const CATALOG: [Subject; 7] = [
        Subject::Mathematics,
        Subject::Physics,
        Subject::Chemistry,
        Subject::Biology,
        Subject::ComputerScience,
        Subject::English,
        Subject::History,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Subject::Mathematics => "Mathematics",
            Subject::Physics => "Physics",
            Subject::Chemistry => "Chemistry",
            Subject::Biology => "Biology",
            Subject::ComputerScience => "Computer Science",
            Subject::English => "English",
            Subject::History => "History",
        }
    }

    /// Case-insensitive lookup by catalog name.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::CATALOG
            .into_iter()
            .find(|subject| subject.name().eq_ignore_ascii_case(trimmed))
    }
}

impl Display for Subject {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}
