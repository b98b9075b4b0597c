// SPDX-FileCopyrightText: 2026 Luxechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base trait shared by all adapters.

use async_trait::async_trait;

use crate::error::LuxeError;
use crate::types::HealthStatus;

/// Identity and lifecycle surface common to every adapter.
#[async_trait]
pub trait Adapter: Send + Sync {
    /// Short identifier of the concrete implementation (e.g. "sqlite", "groq").
    fn name(&self) -> &str;

    /// Implementation version.
    fn version(&self) -> semver::Version;

    /// Probes the backing resource.
    async fn health_check(&self) -> Result<HealthStatus, LuxeError>;
}
