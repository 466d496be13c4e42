//! Deployment profiles gating component eligibility.
//!
//! The active profile set comes from a single environment variable holding a
//! comma separated, case-insensitive list, e.g. `FERROUS_PROFILES=prod,eu`.
//! It is read once per process; a container may be given an explicit set
//! instead through [`ComponentCollection::with_active_profiles`].
//!
//! [`ComponentCollection::with_active_profiles`]: crate::ComponentCollection::with_active_profiles

use std::collections::BTreeSet;
use std::env;
use std::fmt;

use once_cell::sync::Lazy;

/// Environment variable holding the active profiles.
pub const PROFILES_ENV: &str = "FERROUS_PROFILES";

static PROCESS_PROFILES: Lazy<ActiveProfiles> = Lazy::new(|| {
    let profiles = ActiveProfiles::from_env_var(PROFILES_ENV);
    tracing::debug!(profiles = %profiles, "active profiles loaded from environment");
    profiles
});

/// A normalized set of profile names.
///
/// Tokens are trimmed and lower-cased; empty tokens are dropped.
///
/// # Examples
///
/// ```rust
/// use ferrous_inject::ActiveProfiles;
///
/// let active = ActiveProfiles::parse(" Prod, ,EU ");
/// assert!(active.contains("prod"));
/// assert!(active.contains("eu"));
/// assert_eq!(active.len(), 2);
///
/// assert!(ActiveProfiles::parse("").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ActiveProfiles {
    names: BTreeSet<String>,
}

impl ActiveProfiles {
    /// An empty set: only components without a profile requirement are eligible.
    pub fn none() -> Self {
        Self::default()
    }

    /// Parses a comma separated list.
    pub fn parse(raw: &str) -> Self {
        Self::from_names(raw.split(','))
    }

    /// Builds a set from individual names, normalizing each one.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: normalize(names),
        }
    }

    /// Reads and parses `var`; unset or non-unicode values yield an empty set.
    pub fn from_env_var(var: &str) -> Self {
        match env::var(var) {
            Ok(raw) => Self::parse(&raw),
            Err(_) => Self::none(),
        }
    }

    /// The process wide set read from [`PROFILES_ENV`] on first use.
    pub fn process() -> &'static ActiveProfiles {
        &PROCESS_PROFILES
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Whether a component requiring `required` may be resolved under this set.
    ///
    /// An empty requirement is always satisfied; otherwise at least one
    /// required profile must be active.
    pub fn admits(&self, required: &BTreeSet<String>) -> bool {
        required.is_empty() || required.iter().any(|p| self.names.contains(p))
    }
}

impl fmt::Display for ActiveProfiles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.iter().collect();
        write!(f, "{{{}}}", joined.join(","))
    }
}

/// Trims, lower-cases and de-duplicates profile names.
pub(crate) fn normalize<I, S>(names: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|n| n.as_ref().trim().to_lowercase())
        .filter(|n| !n.is_empty())
        .collect()
}
