// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::config::Config;
use crate::engine::{Environment, LocalRunner, Runtime, UserClass, WaitTime};
use crate::errors::RunnerError;
use crate::plugins::BuiltinPlugins;
use crate::users::UserFactory;

/// Load test runtime builder - wires environment, plugins, user classes and
/// runner together from configuration.
///
/// # Examples
///
/// ```
/// use swarmer::config::{Config, RuntimeBuilder};
///
/// let config: Config = serde_yaml::from_str(r#"
/// host: "http://localhost:8080"
/// users: 4
/// web:
///   enabled: false
/// user_classes:
///   - id: hello
///     kind: simple_http
/// "#).unwrap();
///
/// let runtime = RuntimeBuilder::from_config(&config).unwrap();
/// assert!(runtime.web_bind.is_none());
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Build a runtime ready to `run`.
    ///
    /// Each user class gets a spawner that asks `UserFactory` for a fresh
    /// user, so every virtual user owns its own state.
    pub fn from_config(cfg: &Config) -> Result<Runtime, RunnerError> {
        let environment = Arc::new(Environment::new(cfg.host.clone(), cfg.web.enabled));
        let plugins = BuiltinPlugins::from_config(cfg);

        let classes = cfg
            .user_classes
            .iter()
            .map(|class_cfg| {
                let spawn_cfg = class_cfg.clone();
                let spawn_plugins = plugins.clone();
                UserClass::new(
                    class_cfg.id.clone(),
                    class_cfg.weight,
                    class_cfg.wait_time.as_ref().map(WaitTime::from),
                    Arc::new(move || UserFactory::create(&spawn_cfg, &spawn_plugins)),
                )
            })
            .collect();

        let runner = LocalRunner::new(
            environment,
            classes,
            plugins.all(),
            cfg.users,
            cfg.spawn_rate,
        )?;

        Ok(Runtime {
            runner,
            plugins,
            run_time: cfg.run_time(),
            web_bind: cfg.web.enabled.then(|| cfg.web.bind_addr().to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::consts::DEFAULT_WEB_BIND;
    use std::time::Duration;

    fn config(yaml: &str) -> Config {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_runtime_from_config() {
        let cfg = config(
            r#"
host: "http://localhost:8080"
users: 3
spawn_rate: 3
run_time_seconds: 5
user_classes:
  - id: hello
    kind: simple_http
"#,
        );
        let runtime = RuntimeBuilder::from_config(&cfg).unwrap();

        assert_eq!(runtime.run_time, Some(Duration::from_secs(5)));
        assert_eq!(runtime.web_bind.as_deref(), Some(DEFAULT_WEB_BIND));
        assert_eq!(runtime.runner.environment().host, "http://localhost:8080");
        assert!(runtime.runner.environment().web_ui);
    }

    #[test]
    fn test_headless_runtime_has_no_web_bind() {
        let cfg = config(
            r#"
host: "http://localhost:8080"
web:
  enabled: false
  bind: "0.0.0.0:9000"
user_classes:
  - id: hello
    kind: simple_http
"#,
        );
        let runtime = RuntimeBuilder::from_config(&cfg).unwrap();
        assert!(runtime.web_bind.is_none());
        assert!(!runtime.runner.environment().web_ui);
    }

    #[tokio::test]
    async fn test_unknown_kind_fails_at_spawn() {
        let cfg = config(
            r#"
host: "http://127.0.0.1:9"
users: 1
spawn_rate: 100
web:
  enabled: false
user_classes:
  - id: mystery
    kind: browser
"#,
        );
        let runtime = RuntimeBuilder::from_config(&cfg).unwrap();
        let result = runtime
            .run(tokio_util::sync::CancellationToken::new())
            .await;
        assert!(matches!(
            result,
            Err(RunnerError::UserCreation { class_id, .. }) if class_id == "mystery"
        ));
    }
}
