use crate::models::error::SError;
use semver::Prerelease;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A version string reduced to its numeric fields and optional pre-release,
/// with any `+build` metadata dropped.
#[derive(Debug, Clone)]
pub struct ParsedVersion {
    components: Vec<u64>,
    pre: Prerelease,
}

impl ParsedVersion {
    pub fn components(&self) -> &[u64] {
        &self.components
    }

    pub fn is_prerelease(&self) -> bool {
        !self.pre.is_empty()
    }
}

/// Parses a version string such as `0.3.2+1.17` or `1.0-beta.2`.
pub fn parse(raw: &str) -> Result<ParsedVersion, SError> {
    let malformed = || SError::MalformedVersion(raw.to_string());

    // Everything after the first '+' is build metadata.
    let core = raw.trim().split('+').next().unwrap_or_default();
    let (numeric, pre) = match core.split_once('-') {
        Some((numeric, pre)) => (numeric, Some(pre)),
        None => (core, None),
    };

    let components = numeric
        .split('.')
        .map(|field| {
            if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            field.parse::<u64>().map_err(|_| malformed())
        })
        .collect::<Result<Vec<_>, _>>()?;

    let pre = match pre {
        Some("") => return Err(malformed()),
        Some(tag) => Prerelease::new(tag).map_err(|_| malformed())?,
        None => Prerelease::EMPTY,
    };

    Ok(ParsedVersion { components, pre })
}

/// Orders two versions field by field; missing trailing fields count as 0
/// and a pre-release sorts below its release.
pub fn compare(a: &ParsedVersion, b: &ParsedVersion) -> Ordering {
    let len = a.components.len().max(b.components.len());
    let field = |v: &ParsedVersion, i: usize| v.components.get(i).copied().unwrap_or(0);

    (0..len)
        .map(|i| field(a, i).cmp(&field(b, i)))
        .find(|o| o.is_ne())
        .unwrap_or_else(|| match (a.pre.is_empty(), b.pre.is_empty()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => a.pre.cmp(&b.pre),
        })
}

impl FromStr for ParsedVersion {
    type Err = SError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl Ord for ParsedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self, other)
    }
}

impl PartialOrd for ParsedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ParsedVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ParsedVersion {}

impl fmt::Display for ParsedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let numeric: Vec<String> = self.components.iter().map(u64::to_string).collect();
        write!(f, "{}", numeric.join("."))?;
        if !self.pre.is_empty() {
            write!(f, "-{}", self.pre)?;
        }
        Ok(())
    }
}
