//! Property-test run profile parsing for CI and local overrides.
//!
//! Every property suite in the workspace reads its case count and fork mode
//! through this module so one pair of environment variables tunes them all.

use std::env;

use thiserror::Error;

/// Environment variable controlling proptest case counts.
pub const EDGEWALK_PBT_CASES_ENV_KEY: &str = "EDGEWALK_PBT_CASES";
/// Environment variable controlling proptest process forking.
pub const EDGEWALK_PBT_FORK_ENV_KEY: &str = "EDGEWALK_PBT_FORK";

/// Reasons an override is discarded in favour of the default.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OverrideError {
    /// The case count did not parse as an unsigned integer.
    #[error("expected an unsigned integer, got {raw:?}")]
    NotACount {
        /// The rejected text.
        raw: String,
    },
    /// A case count of zero would skip the property entirely.
    #[error("cases must be greater than zero")]
    ZeroCases,
    /// The fork flag was not a recognised boolean spelling.
    #[error("expected one of true/false/1/0/yes/no/on/off, got {raw:?}")]
    NotABool {
        /// The rejected text.
        raw: String,
    },
}

/// Runtime profile for property-test execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Load a profile from environment variables with provided defaults.
    ///
    /// Invalid overrides are logged with `warn!` and ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use edgewalk_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: read_override(EDGEWALK_PBT_CASES_ENV_KEY, parse_cases).unwrap_or(default_cases),
            fork: read_override(EDGEWALK_PBT_FORK_ENV_KEY, parse_bool).unwrap_or(default_fork),
        }
    }

    /// Number of cases to run per property.
    #[must_use]
    #[rustfmt::skip]
    pub fn cases(&self) -> u32 { self.cases }

    /// Whether to run proptest cases in forked subprocesses.
    #[must_use]
    #[rustfmt::skip]
    pub fn fork(&self) -> bool { self.fork }
}

fn read_override<T>(key: &'static str, parser: fn(&str) -> Result<T, OverrideError>) -> Option<T> {
    let raw = env::var(key).ok()?;
    parser(&raw)
        .inspect_err(|reason| {
            tracing::warn!(
                env = key,
                raw = %raw,
                reason = %reason,
                "invalid property-test profile override; using default",
            );
        })
        .ok()
}

fn parse_cases(raw: &str) -> Result<u32, OverrideError> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err(OverrideError::ZeroCases),
        Ok(cases) => Ok(cases),
        Err(_) => Err(OverrideError::NotACount {
            raw: raw.to_owned(),
        }),
    }
}

fn parse_bool(raw: &str) -> Result<bool, OverrideError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(OverrideError::NotABool {
            raw: raw.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    use crate::env::{EnvGuard, lock_env};

    #[test]
    fn load_defaults_when_no_overrides_exist() {
        let _lock = lock_env();
        let _cases = EnvGuard::unset(EDGEWALK_PBT_CASES_ENV_KEY);
        let _fork = EnvGuard::unset(EDGEWALK_PBT_FORK_ENV_KEY);

        let profile = ProptestRunProfile::load(64, false);
        assert_eq!(profile.cases(), 64);
        assert!(!profile.fork());
    }

    #[rstest]
    #[case("1", 1)]
    #[case(" 250 ", 250)]
    #[case("25000", 25_000)]
    fn load_accepts_valid_case_overrides(#[case] raw: &str, #[case] expected: u32) {
        let _lock = lock_env();
        let _cases = EnvGuard::set(EDGEWALK_PBT_CASES_ENV_KEY, raw);
        let _fork = EnvGuard::unset(EDGEWALK_PBT_FORK_ENV_KEY);

        assert_eq!(ProptestRunProfile::load(64, false).cases(), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("-1")]
    #[case("abc")]
    fn load_rejects_invalid_case_overrides(#[case] raw: &str) {
        let _lock = lock_env();
        let _cases = EnvGuard::set(EDGEWALK_PBT_CASES_ENV_KEY, raw);
        let _fork = EnvGuard::unset(EDGEWALK_PBT_FORK_ENV_KEY);

        assert_eq!(ProptestRunProfile::load(64, false).cases(), 64);
    }

    #[rstest]
    #[case("true", true)]
    #[case("TRUE", true)]
    #[case("1", true)]
    #[case("on", true)]
    #[case("false", false)]
    #[case("0", false)]
    #[case("No", false)]
    fn load_accepts_valid_fork_overrides(#[case] raw: &str, #[case] expected: bool) {
        let _lock = lock_env();
        let _cases = EnvGuard::unset(EDGEWALK_PBT_CASES_ENV_KEY);
        let _fork = EnvGuard::set(EDGEWALK_PBT_FORK_ENV_KEY, raw);

        assert_eq!(ProptestRunProfile::load(64, false).fork(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("maybe")]
    #[case("2")]
    fn load_rejects_invalid_fork_overrides(#[case] raw: &str) {
        let _lock = lock_env();
        let _cases = EnvGuard::unset(EDGEWALK_PBT_CASES_ENV_KEY);
        let _fork = EnvGuard::set(EDGEWALK_PBT_FORK_ENV_KEY, raw);

        assert!(ProptestRunProfile::load(64, true).fork());
    }

    #[rstest]
    #[case("0", Err(OverrideError::ZeroCases))]
    #[case("x", Err(OverrideError::NotACount { raw: "x".to_owned() }))]
    #[case("12", Ok(12))]
    fn parse_cases_reports_reasons(#[case] raw: &str, #[case] expected: Result<u32, OverrideError>) {
        assert_eq!(parse_cases(raw), expected);
    }
}
