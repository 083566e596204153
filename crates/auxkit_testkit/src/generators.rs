//! Property-based test generators using proptest.
//!
//! Provides strategies for generating random test data
//! that maintains required invariants.

use auxkit_hash::{Key, KEY_SIZE};
use proptest::prelude::*;

/// Strategy for generating valid hash keys.
pub fn key_strategy() -> impl Strategy<Value = Key> {
    prop::array::uniform16(any::<u8>()).prop_map(Key::from)
}

/// Strategy for generating key material of any length except 16 bytes.
pub fn invalid_key_bytes_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..64).prop_filter("Key length must not be 16", |bytes| {
        bytes.len() != KEY_SIZE
    })
}

/// Strategy for generating hash input (arbitrary bytes).
pub fn input_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..1024)
}

/// Strategy for generating valid control table names.
pub fn table_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z_][a-zA-Z0-9_]{0,31}").expect("Invalid regex")
}

/// Strategy for generating simple SQL statements without `;` or line breaks.
pub fn statement_strategy() -> impl Strategy<Value = String> {
    (
        prop::string::string_regex("[a-z]{1,12}").expect("Invalid regex"),
        any::<i32>(),
    )
        .prop_map(|(name, value)| format!("INSERT INTO {name} VALUES ({value})"))
}

/// Strategy for generating a migration file body and its statements.
///
/// Statements are joined with `;` plus a randomly chosen line ending, so the
/// body splits back into exactly the generated statements.
pub fn migration_script_strategy() -> impl Strategy<Value = (String, Vec<String>)> {
    prop::collection::vec(
        (statement_strategy(), prop_oneof![Just(";\n"), Just(";\r\n"), Just(";  \n")]),
        1..8,
    )
    .prop_map(|parts| {
        let body = parts
            .iter()
            .map(|(statement, end)| format!("{statement}{end}"))
            .collect::<String>();
        let statements = parts.into_iter().map(|(statement, _)| statement).collect();
        (body, statements)
    })
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for thorough tests.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
