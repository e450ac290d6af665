//! Optimization criterion for path search.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What a path search minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    /// Total travel time in seconds.
    #[default]
    Time,
    /// Total fare.
    Cost,
    /// Number of edges traversed.
    ///
    /// Every edge weighs 1, so this minimizes hops rather than line changes.
    Transfers,
}

impl Criterion {
    /// Parse a criterion name.
    ///
    /// Accepts English names and their Spanish equivalents (`tiempo`,
    /// `costo`, `transbordos`). Anything unrecognized falls back to
    /// [`Criterion::Time`].
    ///
    /// ```
    /// use metro_router::domain::Criterion;
    ///
    /// assert_eq!(Criterion::from_name("cost"), Criterion::Cost);
    /// assert_eq!(Criterion::from_name("transbordos"), Criterion::Transfers);
    /// assert_eq!(Criterion::from_name("scenic"), Criterion::Time);
    /// ```
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "time" | "tiempo" => Criterion::Time,
            "cost" | "costo" => Criterion::Cost,
            "transfers" | "transbordos" => Criterion::Transfers,
            _ => Criterion::Time,
        }
    }

    /// Returns the canonical name.
    pub fn as_str(self) -> &'static str {
        match self {
            Criterion::Time => "time",
            Criterion::Cost => "cost",
            Criterion::Transfers => "transfers",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
