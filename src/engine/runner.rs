// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Local runner: spawns virtual users at a fixed rate and drives their task loops.
//!
//! # Lifecycle
//!
//! 1. Every plugin's `on_init` runs against the shared `Environment`.
//! 2. Users are spawned one at a time, `1 / spawn_rate` seconds apart, cycling
//!    through the user classes in proportion to their weights.
//! 3. The run lasts until the run time elapses or the shutdown token is
//!    cancelled, whichever comes first.
//! 4. Users are stopped (in-flight tasks are dropped at their next await),
//!    `on_stop` runs for each, the `quitting` hook fires and every plugin's
//!    `on_quitting` runs.
//!
//! Each user is its own tokio task; the live count is kept in the
//! environment's `UserCount` so plugins can snapshot it.

use crate::engine::client::HttpClient;
use crate::engine::environment::{Environment, UserCount};
use crate::engine::stats::RequestStats;
use crate::engine::wait_time::WaitTime;
use crate::errors::RunnerError;
use crate::observability::messages::runner::{
    PluginHookFailed, RunCompleted, RunStarted, RunStopping, SpawningCompleted,
};
use crate::observability::messages::user::{UserPanicked, UserStarted, UserStopped, UserTaskFailed};
use crate::observability::messages::StructuredLog;
use crate::traits::{Plugin, User, UserContext};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

/// Builds a fresh user instance for each spawn.
pub type UserSpawner = Arc<dyn Fn() -> Result<Box<dyn User>, String> + Send + Sync>;

/// A weighted user behaviour in the spawn mix.
#[derive(Clone)]
pub struct UserClass {
    pub id: String,
    pub weight: u32,
    /// Overrides the user's own `default_wait_time` when set
    pub wait_time: Option<WaitTime>,
    spawner: UserSpawner,
}

impl UserClass {
    pub fn new(
        id: impl Into<String>,
        weight: u32,
        wait_time: Option<WaitTime>,
        spawner: UserSpawner,
    ) -> Self {
        Self {
            id: id.into(),
            weight,
            wait_time,
            spawner,
        }
    }

    fn spawn_user(&self) -> Result<Box<dyn User>, RunnerError> {
        (self.spawner)().map_err(|reason| RunnerError::UserCreation {
            class_id: self.id.clone(),
            reason,
        })
    }
}

impl std::fmt::Debug for UserClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserClass")
            .field("id", &self.id)
            .field("weight", &self.weight)
            .field("wait_time", &self.wait_time)
            .finish()
    }
}

/// Outcome of a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub users_spawned: usize,
    pub request_count: u64,
    pub failure_count: u64,
    pub duration: Duration,
}

pub struct LocalRunner {
    environment: Arc<Environment>,
    classes: Vec<UserClass>,
    plugins: Vec<Arc<dyn Plugin>>,
    users: usize,
    spawn_rate: f64,
    client: HttpClient,
    stats: Arc<RequestStats>,
}

impl LocalRunner {
    pub fn new(
        environment: Arc<Environment>,
        classes: Vec<UserClass>,
        plugins: Vec<Arc<dyn Plugin>>,
        users: usize,
        spawn_rate: f64,
    ) -> Result<Self, RunnerError> {
        let client = HttpClient::new(environment.host.clone(), environment.events.clone())?;
        let stats = RequestStats::attach(&environment.events);
        Ok(Self {
            environment,
            classes,
            plugins,
            users,
            spawn_rate,
            client,
            stats,
        })
    }

    pub fn environment(&self) -> &Arc<Environment> {
        &self.environment
    }

    pub fn stats(&self) -> &Arc<RequestStats> {
        &self.stats
    }

    /// Class index for each of the first `slots` spawn slots, weights
    /// interleaved.
    ///
    /// Weights `a: 2, b: 1` give `[a, b, a]`, so small user counts still see
    /// every class early. Later users reuse the schedule cyclically.
    fn spawn_schedule(&self, slots: usize) -> Vec<usize> {
        let mut schedule = Vec::new();
        let mut round = 0u32;
        while schedule.len() < slots {
            let before = schedule.len();
            for (index, class) in self.classes.iter().enumerate() {
                if schedule.len() == slots {
                    break;
                }
                if class.weight > round {
                    schedule.push(index);
                }
            }
            if schedule.len() == before {
                break;
            }
            round += 1;
        }
        schedule
    }

    fn spawn_interval(&self) -> Duration {
        if self.spawn_rate > 0.0 && self.spawn_rate.is_finite() {
            Duration::from_secs_f64(1.0 / self.spawn_rate)
        } else {
            Duration::ZERO
        }
    }

    /// Run until `run_time` elapses or `shutdown` is cancelled.
    pub async fn run(
        &self,
        run_time: Option<Duration>,
        shutdown: CancellationToken,
    ) -> Result<RunSummary, RunnerError> {
        let started = Instant::now();
        RunStarted {
            users: self.users,
            spawn_rate: self.spawn_rate,
            run_time,
        }
        .log();

        for plugin in &self.plugins {
            plugin
                .on_init(&self.environment)
                .map_err(|source| RunnerError::Plugin {
                    plugin: plugin.name(),
                    source,
                })?;
        }

        let stop = shutdown.child_token();
        let timer = run_time.map(|run_time| {
            let stop = stop.clone();
            tokio::spawn(async move {
                tokio::select! {
                    _ = stop.cancelled() => {}
                    _ = tokio::time::sleep(run_time) => {
                        RunStopping { reason: "run time elapsed" }.log();
                        stop.cancel();
                    }
                }
            })
        });

        let mut users = JoinSet::new();
        let spawn_result = self.spawn_users(&mut users, &stop).await;
        match &spawn_result {
            Ok(spawned) => {
                SpawningCompleted {
                    user_count: *spawned,
                    duration: started.elapsed(),
                }
                .log();
                stop.cancelled().await;
            }
            Err(_) => stop.cancel(),
        }

        join_users(&mut users).await;
        if let Some(timer) = timer {
            let _ = timer.await;
        }
        self.quit();

        let spawned = spawn_result?;
        let (request_count, failure_count) = self.stats.totals();
        let summary = RunSummary {
            users_spawned: spawned,
            request_count,
            failure_count,
            duration: started.elapsed(),
        };
        self.stats.log_summary();
        RunCompleted {
            duration: summary.duration,
            request_count,
            failure_count,
        }
        .log();

        Ok(summary)
    }

    /// Fire `quitting` and give every plugin its `on_quitting`.
    fn quit(&self) {
        self.environment.events.quitting.fire(&());
        for plugin in &self.plugins {
            if let Err(error) = plugin.on_quitting() {
                PluginHookFailed {
                    plugin: plugin.name(),
                    hook: "on_quitting",
                    error: &error,
                }
                .log();
            }
        }
    }

    async fn spawn_users(
        &self,
        users: &mut JoinSet<()>,
        stop: &CancellationToken,
    ) -> Result<usize, RunnerError> {
        let schedule = self.spawn_schedule(self.users);
        if schedule.is_empty() {
            return Ok(0);
        }
        let interval = self.spawn_interval();

        let mut spawned = 0;
        for user_id in 0..self.users {
            if stop.is_cancelled() {
                break;
            }

            let class = &self.classes[schedule[user_id % schedule.len()]];
            let user = class.spawn_user()?;
            let wait_time = class.wait_time.unwrap_or_else(|| user.default_wait_time());
            let ctx = UserContext {
                user_id,
                class_id: class.id.clone(),
                environment: Arc::clone(&self.environment),
                client: self.client.clone(),
            };

            let live = LiveUser::enter(self.environment.user_count_handle());
            let span = UserStarted {
                user_id,
                class_id: &class.id,
            }
            .span("user_loop");
            users.spawn(run_user(user, ctx, wait_time, stop.clone(), live).instrument(span));
            spawned += 1;

            if spawned < self.users && !interval.is_zero() {
                tokio::select! {
                    _ = stop.cancelled() => break,
                    _ = tokio::time::sleep(interval) => {}
                }
            }
        }
        Ok(spawned)
    }
}

/// Counts a user as live until dropped, including when its task panics.
struct LiveUser(UserCount);

impl LiveUser {
    fn enter(user_count: UserCount) -> Self {
        user_count.increment();
        Self(user_count)
    }
}

impl Drop for LiveUser {
    fn drop(&mut self) {
        self.0.decrement();
    }
}

async fn join_users(users: &mut JoinSet<()>) {
    while let Some(result) = users.join_next().await {
        if let Err(error) = result {
            UserPanicked { error: &error }.log();
        }
    }
}

async fn run_user(
    mut user: Box<dyn User>,
    ctx: UserContext,
    wait_time: WaitTime,
    stop: CancellationToken,
    live: LiveUser,
) {
    let mut tasks_run = 0u64;

    match user.on_start(&ctx).await {
        Ok(()) => {
            UserStarted {
                user_id: ctx.user_id,
                class_id: &ctx.class_id,
            }
            .log();

            loop {
                let result = tokio::select! {
                    biased;
                    _ = stop.cancelled() => break,
                    result = user.task(&ctx) => result,
                };
                tasks_run += 1;
                if let Err(error) = result {
                    UserTaskFailed {
                        user_id: ctx.user_id,
                        class_id: &ctx.class_id,
                        error: &error,
                    }
                    .log();
                }

                tokio::select! {
                    _ = stop.cancelled() => break,
                    _ = tokio::time::sleep(wait_time.next()) => {}
                }
            }

            user.on_stop(&ctx).await;
        }
        Err(error) => {
            UserTaskFailed {
                user_id: ctx.user_id,
                class_id: &ctx.class_id,
                error: &error,
            }
            .log();
        }
    }

    drop(live);
    UserStopped {
        user_id: ctx.user_id,
        class_id: &ctx.class_id,
        tasks_run,
    }
    .log();
}
