// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Configuration validation for load test runs.
//!
//! Every check runs and every problem is reported, so a user fixing a config
//! file sees all of its mistakes at once rather than one per attempt.
//!
//! # Checks
//!
//! 1. **Run settings**: host scheme, spawn rate, transaction flush size
//! 2. **User classes**: at least one, unique IDs, known kinds, buildable
//!    options, non-zero weights
//! 3. **Wait times**: non-negative, finite, `min <= max`
//!
//! # Example
//! ```rust
//! use swarmer::config::{validate_config, Config};
//!
//! let config: Config = serde_yaml::from_str(r#"
//! host: "http://localhost:8080"
//! user_classes:
//!   - id: hello
//!     kind: simple_http
//! "#).unwrap();
//!
//! assert!(validate_config(&config).is_ok());
//! ```

use crate::config::{Config, UserClassConfig, WaitTimeConfig};
use crate::errors::ValidationError;
use crate::observability::messages::validation::ConfigValidationFailed;
use crate::observability::messages::StructuredLog;
use crate::plugins::BuiltinPlugins;
use crate::users::UserFactory;
use std::collections::HashSet;

/// Validate a run configuration, returning every problem found.
pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !(config.host.starts_with("http://") || config.host.starts_with("https://")) {
        errors.push(ValidationError::InvalidHost {
            host: config.host.clone(),
        });
    }

    if !config.spawn_rate.is_finite() || config.spawn_rate <= 0.0 {
        errors.push(ValidationError::InvalidSpawnRate {
            spawn_rate: config.spawn_rate,
        });
    }

    if config.transactions.get_flush_size() == 0 {
        errors.push(ValidationError::ZeroFlushSize);
    }

    errors.extend(validate_user_classes(
        &config.user_classes,
        &BuiltinPlugins::from_config(config),
    ));

    if errors.is_empty() {
        Ok(())
    } else {
        ConfigValidationFailed {
            error_count: errors.len(),
        }
        .log();
        Err(errors)
    }
}

fn validate_user_classes(
    classes: &[UserClassConfig],
    plugins: &BuiltinPlugins,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if classes.is_empty() {
        errors.push(ValidationError::NoUserClasses);
        return errors;
    }

    let mut seen = HashSet::new();
    for class in classes {
        if !seen.insert(class.id.as_str()) {
            errors.push(ValidationError::DuplicateUserClassId {
                class_id: class.id.clone(),
            });
        }

        if !UserFactory::is_kind_available(&class.kind) {
            errors.push(ValidationError::UnknownUserKind {
                class_id: class.id.clone(),
                kind: class.kind.clone(),
            });
        } else if let Err(reason) = UserFactory::create(class, plugins) {
            // Options are only parsed at spawn time; build one user now.
            errors.push(ValidationError::InvalidUserOptions {
                class_id: class.id.clone(),
                reason,
            });
        }

        if class.weight == 0 {
            errors.push(ValidationError::ZeroWeight {
                class_id: class.id.clone(),
            });
        }

        if let Some(wait_time) = &class.wait_time {
            if let Err(reason) = check_wait_time(wait_time) {
                errors.push(ValidationError::InvalidWaitTime {
                    class_id: class.id.clone(),
                    reason,
                });
            }
        }
    }

    errors
}

fn check_wait_time(wait_time: &WaitTimeConfig) -> Result<(), String> {
    match *wait_time {
        WaitTimeConfig::Constant { seconds } => {
            if !seconds.is_finite() || seconds < 0.0 {
                return Err(format!("constant wait of {} seconds", seconds));
            }
        }
        WaitTimeConfig::Between {
            min_seconds,
            max_seconds,
        } => {
            if !min_seconds.is_finite() || !max_seconds.is_finite() || min_seconds < 0.0 {
                return Err(format!(
                    "between {} and {} seconds",
                    min_seconds, max_seconds
                ));
            }
            if min_seconds > max_seconds {
                return Err(format!(
                    "minimum {} is greater than maximum {}",
                    min_seconds, max_seconds
                ));
            }
        }
    }
    Ok(())
}
