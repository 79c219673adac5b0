//! Towns and the routes between them.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// Distance of a route or a sequence of routes.
pub type Weight = u64;

/// A town, identified by its label.
///
/// Two towns with the same label are the same town.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Town(String);

impl Town {
    pub fn new(label: impl Into<String>) -> Self {
        Town(label.into())
    }

    /// Get the label of the town.
    pub fn label(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Town {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Town {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Town {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Town {
    fn from(label: &str) -> Self {
        Town::new(label)
    }
}

impl From<String> for Town {
    fn from(label: String) -> Self {
        Town(label)
    }
}

impl From<char> for Town {
    fn from(label: char) -> Self {
        Town(label.to_string())
    }
}

/// A one-way route between two towns.
///
/// The textual form of a route is an edge token: the single-letter
/// labels of the origin and destination, followed by the distance,
/// e.g. `AB5` for a route from `A` to `B` of length 5.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Route {
    from: Town,
    to: Town,
    weight: Weight,
}

impl Route {
    /// Construct a new route.
    pub fn new(from: impl Into<Town>, to: impl Into<Town>, weight: Weight) -> Self {
        Route {
            from: from.into(),
            to: to.into(),
            weight,
        }
    }

    /// Get the origin of the route.
    pub fn origin(&self) -> &Town {
        &self.from
    }

    /// Get the destination of the route.
    pub fn destination(&self) -> &Town {
        &self.to
    }

    /// Get the length of the route.
    pub fn weight(&self) -> Weight {
        self.weight
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}{}", self.from, self.to, self.weight)
    }
}

impl FromStr for Route {
    type Err = GraphError;

    /// Parse an edge token such as `AB5`.
    ///
    /// The token must consist of exactly two uppercase ASCII letters
    /// followed by a positive decimal distance.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let format_error = || GraphError::Format {
            token: token.to_owned(),
        };

        let mut chars = token.chars();
        let from = chars
            .next()
            .filter(char::is_ascii_uppercase)
            .ok_or_else(format_error)?;
        let to = chars
            .next()
            .filter(char::is_ascii_uppercase)
            .ok_or_else(format_error)?;

        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format_error());
        }

        // Distance-bounded walks only terminate with positive distances.
        let weight = digits
            .parse::<Weight>()
            .ok()
            .filter(|&weight| weight > 0)
            .ok_or_else(format_error)?;

        Ok(Route::new(from, to, weight))
    }
}

/// Parse a dash-separated path such as `A-B-C` into towns.
///
/// Labels are trimmed and uppercased, empty segments are skipped.
pub fn parse_path(path: &str) -> Vec<Town> {
    path.split('-')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(|label| Town::new(label.to_uppercase()))
        .collect()
}
