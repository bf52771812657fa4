// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod plugin;
pub mod user;

pub use plugin::Plugin;
pub use user::{User, UserContext};
