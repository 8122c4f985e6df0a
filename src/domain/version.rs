//! Release version model with PEP 440 ordering.
//!
//! Covers the subset release tooling needs: dotted release numbers, an
//! optional pre-release (`a`, `b`, `rc`), an optional post-release and an
//! optional dev marker, plus the rarely used epoch (`1!2.0`) and local
//! label (`2.1.0+ubuntu.1`).

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, UpdateVersionsError};

static VERSION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ix)
        ^\s*v?
        (?:(?P<epoch>[0-9]+)!)?
        (?P<release>[0-9]+(?:\.[0-9]+)*)
        (?:[-_.]?(?P<pre_l>alpha|a|beta|b|preview|pre|c|rc)[-_.]?(?P<pre_n>[0-9]+)?)?
        (?:-(?P<post_n1>[0-9]+)|[-_.]?(?P<post_l>post|rev|r)[-_.]?(?P<post_n2>[0-9]+)?)?
        (?:[-_.]?(?P<dev_l>dev)[-_.]?(?P<dev_n>[0-9]+)?)?
        (?:\+(?P<local>[a-z0-9]+(?:[-_.][a-z0-9]+)*))?
        \s*$",
    )
    .expect("version regex is valid")
});

/// Pre-release phase, ordered alpha < beta < release candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PreKind {
    Alpha,
    Beta,
    ReleaseCandidate,
}

impl PreKind {
    fn from_label(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "a" | "alpha" => PreKind::Alpha,
            "b" | "beta" => PreKind::Beta,
            _ => PreKind::ReleaseCandidate,
        }
    }
}

impl fmt::Display for PreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreKind::Alpha => write!(f, "a"),
            PreKind::Beta => write!(f, "b"),
            PreKind::ReleaseCandidate => write!(f, "rc"),
        }
    }
}

// Variant order is the sort order of the pre-release slot.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum PreKey {
    DevOnly,
    Pre(PreKind, u64),
    Final,
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum DevKey {
    Dev(u64),
    Final,
}

// Numeric local segments sort after alphanumeric ones.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum LocalSegment {
    Text(String),
    Number(u64),
}

impl fmt::Display for LocalSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalSegment::Text(s) => write!(f, "{}", s),
            LocalSegment::Number(n) => write!(f, "{}", n),
        }
    }
}

/// A parsed release version such as `2.1.0`, `2.1.0rc0` or `2.1.0.dev0`
#[derive(Debug, Clone)]
pub struct Version {
    epoch: u64,
    release: Vec<u64>,
    pre: Option<(PreKind, u64)>,
    post: Option<u64>,
    dev: Option<u64>,
    local: Option<Vec<LocalSegment>>,
}

impl Version {
    /// Create a final release version `major.minor.micro`
    pub fn new(major: u64, minor: u64, micro: u64) -> Self {
        Version {
            epoch: 0,
            release: vec![major, minor, micro],
            pre: None,
            post: None,
            dev: None,
            local: None,
        }
    }

    /// Parse a version string
    ///
    /// # Examples
    /// ```ignore
    /// let v = Version::parse("2.1.0rc1")?;
    /// assert!(!v.is_devrelease());
    /// assert_eq!(v.to_string(), "2.1.0rc1");
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let caps = VERSION_RE
            .captures(s)
            .ok_or_else(|| UpdateVersionsError::version(format!("Invalid version: '{}'", s)))?;

        let epoch = optional_number(caps.name("epoch"), s)?;

        let release = caps["release"]
            .split('.')
            .map(|part| parse_number(part, s))
            .collect::<Result<Vec<u64>>>()?;

        let pre = match caps.name("pre_l") {
            Some(label) => Some((
                PreKind::from_label(label.as_str()),
                optional_number(caps.name("pre_n"), s)?,
            )),
            None => None,
        };

        let post = if let Some(n) = caps.name("post_n1") {
            Some(parse_number(n.as_str(), s)?)
        } else if caps.name("post_l").is_some() {
            Some(optional_number(caps.name("post_n2"), s)?)
        } else {
            None
        };

        let dev = match caps.name("dev_l") {
            Some(_) => Some(optional_number(caps.name("dev_n"), s)?),
            None => None,
        };

        let local = match caps.name("local") {
            Some(label) => Some(
                label
                    .as_str()
                    .split(|c: char| matches!(c, '-' | '_' | '.'))
                    .map(|segment| parse_local_segment(segment, s))
                    .collect::<Result<Vec<LocalSegment>>>()?,
            ),
            None => None,
        };

        Ok(Version {
            epoch,
            release,
            pre,
            post,
            dev,
            local,
        })
    }

    pub fn major(&self) -> u64 {
        self.release_component(0)
    }

    pub fn minor(&self) -> u64 {
        self.release_component(1)
    }

    pub fn micro(&self) -> u64 {
        self.release_component(2)
    }

    /// True when the version carries a `.devN` marker
    pub fn is_devrelease(&self) -> bool {
        self.dev.is_some()
    }

    /// The next patch release as a dev build, e.g. `2.1.0` -> `2.1.1.dev0`
    ///
    /// Fails when the patch number is already `u64::MAX`.
    pub fn next_patch_dev(&self) -> Result<Self> {
        let micro = self.micro().checked_add(1).ok_or_else(|| {
            UpdateVersionsError::version(format!("Patch number of {} cannot be incremented", self))
        })?;
        let mut next = Version::new(self.major(), self.minor(), micro);
        next.epoch = self.epoch;
        next.dev = Some(0);
        Ok(next)
    }

    fn release_component(&self, index: usize) -> u64 {
        self.release.get(index).copied().unwrap_or(0)
    }

    fn trimmed_release(&self) -> &[u64] {
        let len = self
            .release
            .iter()
            .rposition(|&n| n != 0)
            .map_or(0, |i| i + 1);
        &self.release[..len]
    }

    fn pre_key(&self) -> PreKey {
        match (self.pre, self.post, self.dev) {
            (None, None, Some(_)) => PreKey::DevOnly,
            (Some((kind, n)), _, _) => PreKey::Pre(kind, n),
            _ => PreKey::Final,
        }
    }

    fn dev_key(&self) -> DevKey {
        self.dev.map_or(DevKey::Final, DevKey::Dev)
    }
}

fn parse_local_segment(segment: &str, version: &str) -> Result<LocalSegment> {
    if segment.bytes().all(|b| b.is_ascii_digit()) {
        parse_number(segment, version).map(LocalSegment::Number)
    } else {
        Ok(LocalSegment::Text(segment.to_ascii_lowercase()))
    }
}

fn parse_number(text: &str, version: &str) -> Result<u64> {
    text.parse::<u64>().map_err(|_| {
        UpdateVersionsError::version(format!("Number '{}' out of range in '{}'", text, version))
    })
}

fn optional_number(m: Option<regex::Match<'_>>, version: &str) -> Result<u64> {
    m.map_or(Ok(0), |m| parse_number(m.as_str(), version))
}

impl FromStr for Version {
    type Err = UpdateVersionsError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| self.trimmed_release().cmp(other.trimmed_release()))
            .then_with(|| self.pre_key().cmp(&other.pre_key()))
            .then_with(|| self.post.cmp(&other.post))
            .then_with(|| self.dev_key().cmp(&other.dev_key()))
            .then_with(|| self.local.cmp(&other.local))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.epoch != 0 {
            write!(f, "{}!", self.epoch)?;
        }
        let release: Vec<String> = self.release.iter().map(u64::to_string).collect();
        write!(f, "{}", release.join("."))?;
        if let Some((kind, n)) = self.pre {
            write!(f, "{}{}", kind, n)?;
        }
        if let Some(n) = self.post {
            write!(f, ".post{}", n)?;
        }
        if let Some(n) = self.dev {
            write!(f, ".dev{}", n)?;
        }
        if let Some(local) = &self.local {
            let segments: Vec<String> = local.iter().map(LocalSegment::to_string).collect();
            write!(f, "+{}", segments.join("."))?;
        }
        Ok(())
    }
}
