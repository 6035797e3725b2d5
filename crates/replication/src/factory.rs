//! Strategy factory and configuration validation.

use std::sync::Arc;

use corelib::{Endpoint, Snitch};

use crate::error::ConfigurationError;
use crate::locator::ReplicaLocator;
use crate::options::ConfigOptions;
use crate::strategy::{
    LocalStrategy, NetworkTopologyStrategy, ReplicationStrategy, SimpleStrategy,
};

/// Resolve `strategy_name` to a concrete strategy and bind it to a keyspace
/// and snitch.
///
/// `local` is this node's own address; only `LocalStrategy` places replicas
/// on it. Unknown names fail with [`ConfigurationError::UnknownStrategy`].
pub fn create_replication_strategy(
    keyspace: &str,
    strategy_name: &str,
    local: Endpoint,
    snitch: Arc<dyn Snitch>,
    options: &ConfigOptions,
) -> Result<ReplicaLocator, ConfigurationError> {
    let strategy: Box<dyn ReplicationStrategy> = match strategy_name {
        "SimpleStrategy" => Box::new(SimpleStrategy::from_options(options)?),
        "NetworkTopologyStrategy" => Box::new(NetworkTopologyStrategy::from_options(options)?),
        "LocalStrategy" => Box::new(LocalStrategy::new(local)),
        _ => {
            return Err(ConfigurationError::UnknownStrategy {
                name: strategy_name.to_string(),
            })
        }
    };
    Ok(ReplicaLocator::new(keyspace, strategy, snitch))
}

/// Construct the strategy, run its self-validation, then reject any option
/// key outside its recognized set (when it declares one).
pub fn validate_replication_strategy(
    keyspace: &str,
    strategy_name: &str,
    local: Endpoint,
    snitch: Arc<dyn Snitch>,
    options: &ConfigOptions,
) -> Result<(), ConfigurationError> {
    let locator = create_replication_strategy(keyspace, strategy_name, local, snitch, options)?;
    let strategy = locator.strategy();
    strategy.validate_options()?;
    if let Some(recognized) = strategy.recognized_options() {
        for key in options.keys() {
            if !recognized.contains(&key.as_str()) {
                return Err(ConfigurationError::UnrecognizedOption {
                    key: key.clone(),
                    strategy: strategy_name.to_string(),
                    keyspace: keyspace.to_string(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use corelib::SimpleSnitch;

    fn local() -> Endpoint {
        Endpoint::from([127, 0, 0, 1])
    }

    fn snitch() -> Arc<dyn Snitch> {
        Arc::new(SimpleSnitch::new())
    }

    fn simple_options(rf: &str) -> ConfigOptions {
        let mut options = ConfigOptions::new();
        options.insert("replication_factor".to_string(), rf.to_string());
        options
    }

    #[test]
    fn resolves_known_strategies_by_name() {
        let locator = create_replication_strategy(
            "ks",
            "SimpleStrategy",
            local(),
            snitch(),
            &simple_options("3"),
        )
        .unwrap();
        assert_eq!(locator.strategy().name(), "SimpleStrategy");
        assert_eq!(locator.keyspace(), "ks");

        let locator = create_replication_strategy(
            "system",
            "LocalStrategy",
            local(),
            snitch(),
            &ConfigOptions::new(),
        )
        .unwrap();
        assert_eq!(locator.strategy().name(), "LocalStrategy");
    }

    #[test]
    fn unknown_strategy_name_is_a_configuration_error() {
        let err = create_replication_strategy(
            "ks",
            "NoSuchStrategy",
            local(),
            snitch(),
            &ConfigOptions::new(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnknownStrategy {
                name: "NoSuchStrategy".to_string()
            }
        );
    }

    #[test]
    fn unrecognized_option_names_key_strategy_and_keyspace() {
        let mut options = simple_options("3");
        options.insert("replication_factory".to_string(), "3".to_string());
        let err =
            validate_replication_strategy("ks", "SimpleStrategy", local(), snitch(), &options)
                .unwrap_err();
        match err {
            ConfigurationError::UnrecognizedOption {
                key,
                strategy,
                keyspace,
            } => {
                assert_eq!(key, "replication_factory");
                assert_eq!(strategy, "SimpleStrategy");
                assert_eq!(keyspace, "ks");
            }
            other => panic!("expected UnrecognizedOption, got {:?}", other),
        }
    }

    #[test]
    fn local_strategy_rejects_any_option() {
        let err = validate_replication_strategy(
            "system",
            "LocalStrategy",
            local(),
            snitch(),
            &simple_options("1"),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigurationError::UnrecognizedOption { .. }));
    }

    #[test]
    fn network_topology_accepts_arbitrary_datacenter_keys() {
        let mut options = ConfigOptions::new();
        options.insert("dc-east".to_string(), "3".to_string());
        options.insert("dc-west".to_string(), "2".to_string());
        validate_replication_strategy("ks", "NetworkTopologyStrategy", local(), snitch(), &options)
            .unwrap();
    }

    #[test]
    fn bad_replication_factor_fails_at_construction() {
        let err = create_replication_strategy(
            "ks",
            "SimpleStrategy",
            local(),
            snitch(),
            &simple_options("-1"),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::InvalidReplicationFactor { .. }
        ));
    }
}
