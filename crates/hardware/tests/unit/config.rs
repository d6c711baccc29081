//! # Configuration Tests
//!
//! Defaults, JSON deserialization and validation.

use o3sim_core::{Config, ConfigError, SimError};
use pretty_assertions::assert_eq;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.rob_size, 64);
    assert_eq!(config.iq_size, 16);
    assert_eq!(config.width, 1);
    assert_eq!(config.issue_width, 1);
    assert_eq!(config.arch_regs, 67);
    assert_eq!(config.max_idle_cycles, 10_000);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_new_keeps_other_defaults() {
    let config = Config::new(32, 8, 4);
    assert_eq!(config.rob_size, 32);
    assert_eq!(config.iq_size, 8);
    assert_eq!(config.width, 4);
    assert_eq!(config.issue_width, 1);
    assert_eq!(config.arch_regs, 67);
}

#[test]
fn test_config_from_partial_json() {
    let config = Config::from_json(r#"{ "rob_size": 128, "issue_width": 2 }"#).unwrap();
    assert_eq!(config.rob_size, 128);
    assert_eq!(config.issue_width, 2);
    assert_eq!(config.iq_size, 16);
    assert_eq!(config.width, 1);
}

#[test]
fn test_config_from_empty_json() {
    assert_eq!(Config::from_json("{}").unwrap(), Config::default());
}

#[test]
fn test_config_malformed_json() {
    let err = Config::from_json(r#"{ "rob_size": "big" }"#).unwrap_err();
    assert!(matches!(err, SimError::Json(_)));
}

#[test]
fn test_validate_rejects_zero_sizes() {
    let cases = [
        (Config::new(0, 4, 1), "rob_size"),
        (Config::new(4, 0, 1), "iq_size"),
        (Config::new(4, 4, 0), "width"),
    ];
    for (config, field) in cases {
        assert_eq!(config.validate(), Err(ConfigError::ZeroSize { field }));
    }

    let config = Config {
        arch_regs: 0,
        ..Config::default()
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::ZeroSize { field: "arch_regs" })
    );

    let config = Config {
        max_idle_cycles: 0,
        ..Config::default()
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::ZeroSize {
            field: "max_idle_cycles"
        })
    );
}

#[test]
fn test_validate_rejects_width_over_capacity() {
    assert_eq!(
        Config::new(2, 8, 4).validate(),
        Err(ConfigError::WidthExceedsRob {
            width: 4,
            rob_size: 2
        })
    );
    assert_eq!(
        Config::new(8, 3, 4).validate(),
        Err(ConfigError::WidthExceedsIq {
            width: 4,
            iq_size: 3
        })
    );
    assert!(Config::new(4, 4, 4).validate().is_ok());
}

#[test]
fn test_config_serializes_round_trip() {
    let config = Config::new(60, 15, 3);
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(Config::from_json(&json).unwrap(), config);
}
