// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::str::FromStr;

use crate::config::UserClassConfig;
use crate::plugins::BuiltinPlugins;
use crate::traits::User;

use super::custom_event::EventFiringUser;
use super::page_check::{PageCheckSettings, PageCheckUser};
use super::simple::SimpleHttpUser;
use super::transactional::TransactionalUser;
use super::widget::{WidgetMaker, WidgetMakerUser};

/// Factory for creating virtual users from their class configuration
pub struct UserFactory;

impl UserFactory {
    /// Create a fresh user for one slot in the run.
    ///
    /// The `kind` field selects the implementation:
    /// - "simple_http" -> SimpleHttpUser (`path`, default `/`)
    /// - "event_firing" -> EventFiringUser (`path`, default `/`)
    /// - "widget_maker" -> WidgetMakerUser (`min_delay_seconds`, `max_delay_seconds`, `good_ratio`)
    /// - "page_check" -> PageCheckUser (`page_path`, `expected_title`, `search_path`, `search_term`)
    /// - "transactional" -> TransactionalUser (`transaction`, `paths`)
    pub fn create(
        config: &UserClassConfig,
        plugins: &BuiltinPlugins,
    ) -> Result<Box<dyn User>, String> {
        match config.kind.as_str() {
            "simple_http" => Ok(Box::new(SimpleHttpUser::new(path_option(config)))),
            "event_firing" => Ok(Box::new(EventFiringUser::new(
                path_option(config),
                plugins.event_logger.hook(),
            ))),
            "widget_maker" => {
                let defaults = WidgetMaker::default();
                Ok(Box::new(WidgetMakerUser::new(WidgetMaker {
                    min_delay_seconds: parse_option(
                        config,
                        "min_delay_seconds",
                        defaults.min_delay_seconds,
                    )?,
                    max_delay_seconds: parse_option(
                        config,
                        "max_delay_seconds",
                        defaults.max_delay_seconds,
                    )?,
                    good_ratio: ratio_option(config, "good_ratio", defaults.good_ratio)?,
                })))
            }
            "page_check" => {
                let defaults = PageCheckSettings::default();
                Ok(Box::new(PageCheckUser::new(PageCheckSettings {
                    page_path: config.option_str("page_path").unwrap_or(defaults.page_path),
                    expected_title: config
                        .option_str("expected_title")
                        .unwrap_or(defaults.expected_title),
                    search_path: config
                        .option_str("search_path")
                        .unwrap_or(defaults.search_path),
                    search_term: config
                        .option_str("search_term")
                        .unwrap_or(defaults.search_term),
                })))
            }
            "transactional" => {
                let paths = paths_option(config)?;
                Ok(Box::new(TransactionalUser::new(
                    config
                        .option_str("transaction")
                        .unwrap_or_else(|| config.id.clone()),
                    paths,
                    plugins.transactions.clone(),
                )))
            }
            other => Err(format!(
                "Unknown user kind '{}' for user class '{}'",
                other, config.id
            )),
        }
    }

    /// List all available user kinds
    pub fn list_available_kinds() -> Vec<&'static str> {
        vec![
            "simple_http",
            "event_firing",
            "widget_maker",
            "page_check",
            "transactional",
        ]
    }

    /// Check if a user kind is available
    pub fn is_kind_available(kind: &str) -> bool {
        Self::list_available_kinds().contains(&kind)
    }
}

fn path_option(config: &UserClassConfig) -> String {
    config.option_str("path").unwrap_or_else(|| "/".to_string())
}

fn parse_option<T: FromStr>(config: &UserClassConfig, key: &str, default: T) -> Result<T, String> {
    match config.option_str(key) {
        Some(raw) => raw.parse().map_err(|_| {
            format!(
                "User class '{}' has an invalid '{}' option: '{}'",
                config.id, key, raw
            )
        }),
        None => Ok(default),
    }
}

/// A probability in `[0, 1]`.
fn ratio_option(config: &UserClassConfig, key: &str, default: f64) -> Result<f64, String> {
    let ratio = parse_option(config, key, default)?;
    if (0.0..=1.0).contains(&ratio) {
        Ok(ratio)
    } else {
        Err(format!(
            "User class '{}' option '{}' must be between 0 and 1, got {}",
            config.id, key, ratio
        ))
    }
}

/// `paths` as a YAML list or a comma-separated string.
fn paths_option(config: &UserClassConfig) -> Result<Vec<String>, String> {
    let paths: Vec<String> = match config.options.get("paths") {
        Some(serde_yaml::Value::Sequence(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        Some(serde_yaml::Value::String(joined)) => joined
            .split(',')
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .map(str::to_string)
            .collect(),
        _ => vec!["/".to_string()],
    };

    if paths.is_empty() {
        return Err(format!("User class '{}' has no paths", config.id));
    }
    Ok(paths)
}
