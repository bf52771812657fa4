// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Virtual user behaviours, selected per user class by `kind`.

pub mod custom_event;
pub mod factory;
pub mod page_check;
pub mod simple;
pub mod transactional;
pub mod widget;

#[cfg(test)]
mod test_support;

pub use factory::UserFactory;
