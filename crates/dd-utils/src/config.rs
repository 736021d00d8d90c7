//! Environment lookups shared by the binaries

use std::str::FromStr;

/// Read an environment variable, falling back to `default` when unset or not unicode
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read and parse an environment variable
///
/// Returns `default` when the variable is unset or does not parse.
pub fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_default() {
        assert_eq!(env_or("DD_UTILS_TEST_SURELY_UNSET", "fallback"), "fallback");
    }

    #[test]
    fn test_env_parse_default() {
        assert_eq!(env_parse("DD_UTILS_TEST_SURELY_UNSET_PORT", 8000_u16), 8000);
    }

    #[test]
    fn test_env_reads_existing_variable() {
        // PATH is present in every test environment
        let path = env_or("PATH", "");
        assert!(!path.is_empty());
    }
}
