// Copyright 2025 the Raypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters to integrate with other Raypoint crates.
//!
//! Enabled via feature flags so the core carries no scene dependency.

#[cfg(feature = "scene_adapter")]
pub mod scene;
