// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;

use crate::errors::FailureStrategy;

/// Engine-wide behavior switches.
///
/// # Fields
/// * `failure_strategy` - What a parent does when a child fails (defaults to FailFast)
/// * `inherit_parent_type` - Whether entries without a locator are built from
///   their parent's component type (defaults to true) or the resolver's fallback
///
/// # Example
/// ```yaml
/// failure_strategy: continue_on_error
/// inherit_parent_type: false
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    pub failure_strategy: FailureStrategy,
    pub inherit_parent_type: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            failure_strategy: FailureStrategy::FailFast,
            inherit_parent_type: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_options_from_yaml_table_driven() {
        struct TestCase {
            name: &'static str,
            yaml: &'static str,
            expected: EngineOptions,
        }

        let test_cases = vec![
            TestCase {
                name: "empty document uses defaults",
                yaml: "{}",
                expected: EngineOptions::default(),
            },
            TestCase {
                name: "continue on error",
                yaml: "failure_strategy: continue_on_error",
                expected: EngineOptions {
                    failure_strategy: FailureStrategy::ContinueOnError,
                    inherit_parent_type: true,
                },
            },
            TestCase {
                name: "fallback type for bare entries",
                yaml: "failure_strategy: fail_fast\ninherit_parent_type: false",
                expected: EngineOptions {
                    failure_strategy: FailureStrategy::FailFast,
                    inherit_parent_type: false,
                },
            },
        ];

        for test_case in test_cases {
            let options: EngineOptions = serde_yaml::from_str(test_case.yaml)
                .unwrap_or_else(|e| panic!("Failed to parse {}: {}", test_case.name, e));
            assert_eq!(options, test_case.expected, "Failed for test case: {}", test_case.name);
        }
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        let result: Result<EngineOptions, _> = serde_yaml::from_str("failure_strategy: retry_forever");
        assert!(result.is_err());
    }
}
