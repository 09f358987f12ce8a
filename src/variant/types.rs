use crate::utils::DEPRECATED_MARKER;
use std::fmt;

/// A single supported tool/runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    /// Canonical display name, e.g. `Gradle-jdk17`
    pub identifier: String,
    pub deprecated: bool,
}

impl Variant {
    pub fn active(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            deprecated: false,
        }
    }

    pub fn deprecated(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            deprecated: true,
        }
    }

    /// Parse one store line. Blank lines yield `None`.
    ///
    /// The marker only counts as the trailing token of a line with at least
    /// two tokens, so a bare `DEPRECATED` line is an identifier.
    pub fn parse_line(line: &str) -> Option<Self> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.split_last() {
            None => None,
            Some((last, rest)) if *last == DEPRECATED_MARKER && !rest.is_empty() => {
                Some(Self::deprecated(rest.join(" ")))
            }
            Some(_) => Some(Self::active(tokens.join(" "))),
        }
    }

    /// Lowercase directory name the generated action lives in
    pub fn dirname(&self) -> String {
        self.identifier.to_lowercase()
    }

    /// Split into the ecosystem name and the optional suffix after the first `-`
    pub fn name_and_ident(&self) -> (&str, &str) {
        match self.identifier.split_once('-') {
            Some((name, ident)) => (name, ident),
            None => (&self.identifier, ""),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.deprecated {
            write!(f, "{} {}", self.identifier, DEPRECATED_MARKER)
        } else {
            write!(f, "{}", self.identifier)
        }
    }
}
