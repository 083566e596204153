//! Property tests for runner configuration.

use auxkit_migrate::{MigrationConfig, MigrationError, MigrationRunner};
use auxkit_testkit::{table_name_strategy, PropTestConfig};
use proptest::prelude::*;

proptest! {
    #![proptest_config(PropTestConfig::quick().to_proptest_config())]

    #[test]
    fn identifier_table_names_are_accepted(name in table_name_strategy()) {
        let runner = MigrationRunner::new(MigrationConfig::new().table_name(name.clone()));
        let runner = runner.unwrap();
        prop_assert_eq!(runner.config().table_name.as_str(), name.as_str());
    }

    #[test]
    fn names_with_punctuation_are_rejected(
        name in table_name_strategy(),
        bad in prop::sample::select(vec![' ', ';', '\'', '"', '-', '.']),
    ) {
        let config = MigrationConfig::new().table_name(format!("{name}{bad}x"));
        let rejected = matches!(
            MigrationRunner::new(config),
            Err(MigrationError::InvalidTableName { .. })
        );
        prop_assert!(rejected);
    }
}
