//! Property-test run profile read from the environment.
//!
//! CI raises case counts and enables forking through environment variables;
//! every property suite reads them through [`ProptestRunProfile::load`].

use std::env;
use std::fmt;

/// Environment variable controlling proptest case counts.
pub const PROGTEST_CASES_ENV_KEY: &str = "PROGTEST_CASES";
/// Environment variable controlling proptest process forking.
pub const ARBORIST_PBT_FORK_ENV_KEY: &str = "ARBORIST_PBT_FORK";

/// Runtime profile for property-test execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Loads a profile, falling back to the given defaults for variables
    /// that are unset or malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use arborist_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: override_or(PROGTEST_CASES_ENV_KEY, default_cases, parse_cases),
            fork: override_or(ARBORIST_PBT_FORK_ENV_KEY, default_fork, parse_flag),
        }
    }

    /// Number of cases to run per property.
    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether cases run in forked subprocesses.
    #[must_use]
    pub fn fork(&self) -> bool {
        self.fork
    }
}

/// Reason an override was ignored.
#[derive(Debug, PartialEq, Eq)]
enum Rejected {
    NotANumber,
    Zero,
    NotAFlag,
}

impl fmt::Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotANumber => "expected a positive integer",
            Self::Zero => "cases must be > 0",
            Self::NotAFlag => "expected one of: true/false/1/0/yes/no/on/off",
        })
    }
}

fn override_or<T: Copy>(key: &'static str, default: T, parse: fn(&str) -> Result<T, Rejected>) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parse(&raw).unwrap_or_else(|reason| {
        tracing::warn!(env = key, raw = %raw, %reason, "ignoring property-test override");
        default
    })
}

fn parse_cases(raw: &str) -> Result<u32, Rejected> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err(Rejected::Zero),
        Ok(cases) => Ok(cases),
        Err(_) => Err(Rejected::NotANumber),
    }
}

fn parse_flag(raw: &str) -> Result<bool, Rejected> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Rejected::NotAFlag),
    }
}
