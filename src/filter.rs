//! Source file filtering for scan packaging
//!
//! Filter patterns use shell-glob syntax (`*`, `?`, `[...]`) and are matched
//! against base file names, not paths. A pattern prefixed with `!` excludes
//! instead of including.

use glob::Pattern;
use log::warn;

/// Verdict for a single file name against a filter set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    /// File name matched an inclusion pattern (or no inclusions exist)
    pub included: bool,
    /// File name matched at least one exclusion pattern
    pub excluded: bool,
}

impl Verdict {
    /// A file is kept only when included and not excluded
    pub fn keep(&self) -> bool {
        self.included && !self.excluded
    }
}

/// An ordered set of inclusion and exclusion patterns.
///
/// Patterns that fail to compile stay in the set but match nothing, so a
/// malformed pattern never aborts a packaging run.
#[derive(Debug, Default)]
pub struct FilterSet {
    inclusions: Vec<Option<Pattern>>,
    exclusions: Vec<Option<Pattern>>,
}

impl FilterSet {
    /// Parse a list of raw patterns, splitting on the `!` exclusion marker
    pub fn parse<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = FilterSet::default();
        for raw in patterns {
            let raw = raw.as_ref();
            if let Some(stripped) = raw.strip_prefix('!') {
                set.exclusions.push(compile(stripped));
            } else {
                set.inclusions.push(compile(raw));
            }
        }
        set
    }

    /// Build a filter set from the CLI's comma-separated flag values.
    ///
    /// Exclusion flag values carry no marker of their own; each segment is
    /// re-prefixed with `!` before parsing. Empty segments are dropped.
    pub fn from_flags(filter: Option<&str>, exclusions: Option<&str>) -> Self {
        let mut patterns: Vec<String> = Vec::new();
        if let Some(filter) = filter {
            patterns.extend(split_segments(filter).map(str::to_string));
        }
        if let Some(exclusions) = exclusions {
            patterns.extend(split_segments(exclusions).map(|p| format!("!{p}")));
        }
        FilterSet::parse(patterns)
    }

    /// True when neither inclusions nor exclusions are present
    pub fn is_empty(&self) -> bool {
        self.inclusions.is_empty() && self.exclusions.is_empty()
    }

    /// Evaluate a base file name against the set.
    ///
    /// With no inclusion patterns every file counts as included. Otherwise a
    /// file is included when it matches at least one inclusion. A single
    /// exclusion match is enough to exclude, regardless of inclusions.
    pub fn verdict(&self, file_name: &str) -> Verdict {
        let included = self.inclusions.is_empty()
            || self
                .inclusions
                .iter()
                .any(|p| p.as_ref().is_some_and(|p| p.matches(file_name)));

        let excluded = self
            .exclusions
            .iter()
            .any(|p| p.as_ref().is_some_and(|p| p.matches(file_name)));

        Verdict { included, excluded }
    }

    /// Convenience wrapper over [`FilterSet::verdict`]
    pub fn keeps(&self, file_name: &str) -> bool {
        self.verdict(file_name).keep()
    }
}

fn compile(raw: &str) -> Option<Pattern> {
    match Pattern::new(raw) {
        Ok(pattern) => Some(pattern),
        Err(err) => {
            warn!("ignoring malformed filter pattern {raw:?}: {err}");
            None
        }
    }
}

fn split_segments(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}
