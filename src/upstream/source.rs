use crate::utils::DEPRECATED_MARKER;
use regex::RegexBuilder;
use std::collections::BTreeSet;

/// What the upstream feeds say about supported images
#[derive(Debug, Clone, Default)]
pub struct SourceOfTruth {
    /// Every feed line, deprecated or not, joined by newlines
    pub raw_content: String,
    /// Lowercase names of images explicitly marked deprecated
    pub deprecated: BTreeSet<String>,
    /// Names of images still supported, in first-seen order
    pub supported: Vec<String>,
}

impl SourceOfTruth {
    /// Build a source of truth from raw feed contents
    pub fn from_feeds<'a>(feeds: impl IntoIterator<Item = &'a str>) -> Self {
        let mut source = Self::default();
        for feed in feeds {
            source.add_feed(feed);
        }
        source
    }

    pub(crate) fn add_feed(&mut self, content: &str) {
        for line in content.lines() {
            self.raw_content.push_str(line);
            self.raw_content.push('\n');

            let tokens: Vec<&str> = line.split_whitespace().collect();
            let Some(name) = tokens.get(1) else {
                continue;
            };

            if tokens.iter().skip(2).any(|t| *t == DEPRECATED_MARKER) {
                self.deprecated.insert(name.to_lowercase());
            } else if !self.supported.iter().any(|s| s.eq_ignore_ascii_case(name)) {
                self.supported.push((*name).to_string());
            }
        }
    }

    /// Whether `name` appears in the feeds as a whole word, ignoring case.
    ///
    /// A word boundary is the start or end of the text or any character that
    /// is not alphanumeric or `_`, so `go` never matches inside `golang`.
    /// A name too large to compile into a pattern is an error, never a miss.
    pub fn contains_word(&self, name: &str) -> Result<bool, regex::Error> {
        if name.is_empty() {
            return Ok(false);
        }

        let pattern = format!(r"(?:^|\W){}(?:\W|$)", regex::escape(name));
        let re = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .multi_line(true)
            .build()?;
        Ok(re.is_match(&self.raw_content))
    }

    /// Whether upstream explicitly marks `name` deprecated, ignoring case
    pub fn is_deprecated(&self, name: &str) -> bool {
        self.deprecated.contains(&name.to_lowercase())
    }
}
