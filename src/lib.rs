// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod config;     // config + runtime builder
pub mod engine;     // runner, client, stats
pub mod errors;     // error handling
pub mod events;     // event hooks
pub mod observability;
pub mod plugins;    // transactions, event logger
pub mod traits;     // User + Plugin abstractions
pub mod users;      // virtual user behaviours
pub mod web;        // plugin route server
