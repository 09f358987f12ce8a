//! Translation of upstream image names into local display names.
//!
//! Upstream lists images in lowercase (`golang`, `python-3.11`); the local
//! store uses the ecosystem's own capitalisation (`Golang`, `Python-3.11`).

use once_cell::sync::Lazy;
use regex::Regex;

/// Ecosystems whose display name is not plain title case
const LITERAL_NAMES: [(&str, &str); 10] = [
    ("cocoapods", "CocoaPods"),
    ("dotnet", "dotNET"),
    ("golang", "Golang"),
    ("node", "Node"),
    ("php", "PHP"),
    ("python", "Python"),
    ("ruby", "Ruby"),
    ("scala", "Scala"),
    ("maven", "Maven"),
    ("gradle", "Gradle"),
];

/// Suffixed variants whose suffix is kept verbatim
static SUFFIXED: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        ("elixir", "Elixir"),
        ("gradle", "Gradle"),
        ("maven", "Maven"),
        ("python", "Python"),
    ]
    .into_iter()
    .map(|(prefix, display)| {
        let pattern = format!(r"(?i)^{prefix}-(.+)$");
        (Regex::new(&pattern).expect("suffix pattern is valid"), display)
    })
    .collect()
});

static SBT_SCALA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^sbt(.+?)-scala(.+)$").expect("sbt pattern is valid"));

/// Map an upstream image name to the display name used in the store
pub fn display_name(upstream: &str) -> String {
    let upstream = upstream.trim();
    let lower = upstream.to_lowercase();

    if let Some((_, display)) = LITERAL_NAMES.iter().find(|(name, _)| *name == lower) {
        return (*display).to_string();
    }

    for (pattern, display) in SUFFIXED.iter() {
        if let Some(caps) = pattern.captures(upstream) {
            return format!("{}-{}", display, &caps[1]);
        }
    }

    if let Some(caps) = SBT_SCALA.captures(upstream) {
        return format!("SBT{}-Scala{}", &caps[1], &caps[2]);
    }

    upstream
        .split('-')
        .map(title_case)
        .collect::<Vec<_>>()
        .join("-")
}

fn title_case(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_overrides() {
        assert_eq!(display_name("golang"), "Golang");
        assert_eq!(display_name("dotnet"), "dotNET");
        assert_eq!(display_name("cocoapods"), "CocoaPods");
        assert_eq!(display_name("php"), "PHP");
        assert_eq!(display_name("PHP"), "PHP");
    }

    #[test]
    fn test_suffixed_variants_keep_suffix() {
        assert_eq!(display_name("python-3.11"), "Python-3.11");
        assert_eq!(display_name("gradle-jdk17"), "Gradle-jdk17");
        assert_eq!(display_name("maven-3-jdk-11"), "Maven-3-jdk-11");
        assert_eq!(display_name("elixir-1.13"), "Elixir-1.13");
    }

    #[test]
    fn test_sbt_scala_composite() {
        assert_eq!(display_name("sbt1.10.0-scala3.4.2"), "SBT1.10.0-Scala3.4.2");
        assert_eq!(display_name("SBT1.9-Scala2.13"), "SBT1.9-Scala2.13");
    }

    #[test]
    fn test_fallback_title_cases_segments() {
        assert_eq!(display_name("swift"), "Swift");
        assert_eq!(display_name("node-lts"), "Node-Lts");
        assert_eq!(display_name("RUST-nightly"), "Rust-Nightly");
    }

    #[test]
    fn test_empty_segments_survive() {
        assert_eq!(display_name("a--b"), "A--B");
    }
}
