//! # Environment Variables
//!
//! Utilities for reading and parsing environment variables.

use std::env;
use std::str::FromStr;

/// Get an environment variable by name.
pub fn get_env(name: &'static str) -> Result<String, Error> {
    env::var(name).map_err(|_| Error::MissingEnv(name))
}

/// Get and parse an environment variable.
pub fn get_env_parse<T: FromStr>(name: &'static str) -> Result<T, Error> {
    let val = get_env(name)?;
    val.trim().parse::<T>().map_err(|_| Error::WrongFormat(name))
}

/// Get an optional environment variable. Unset and blank both read as `None`.
pub fn get_env_opt(name: &'static str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Get and parse an optional environment variable.
///
/// Unset is `Ok(None)`; set but unparseable is an error rather than a silent default.
pub fn get_env_parse_opt<T: FromStr>(name: &'static str) -> Result<Option<T>, Error> {
    match get_env_opt(name) {
        Some(val) => val
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| Error::WrongFormat(name)),
        None => Ok(None),
    }
}

// region:    --- Error
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    MissingEnv(&'static str),
    WrongFormat(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_env() {
        assert_eq!(
            get_env("LIB_UTILS_TEST_SURELY_UNSET"),
            Err(Error::MissingEnv("LIB_UTILS_TEST_SURELY_UNSET"))
        );
        assert_eq!(get_env_opt("LIB_UTILS_TEST_SURELY_UNSET"), None);
        assert_eq!(get_env_parse_opt::<u64>("LIB_UTILS_TEST_SURELY_UNSET"), Ok(None));
    }

    #[test]
    fn test_parse_env() {
        env::set_var("LIB_UTILS_TEST_NUMBER", " 4201 ");
        assert_eq!(get_env_parse::<u64>("LIB_UTILS_TEST_NUMBER"), Ok(4201));
        assert_eq!(get_env_parse_opt::<u64>("LIB_UTILS_TEST_NUMBER"), Ok(Some(4201)));

        env::set_var("LIB_UTILS_TEST_BAD_NUMBER", "forty-two");
        assert_eq!(
            get_env_parse_opt::<u64>("LIB_UTILS_TEST_BAD_NUMBER"),
            Err(Error::WrongFormat("LIB_UTILS_TEST_BAD_NUMBER"))
        );
    }
}
