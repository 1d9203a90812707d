//! Per-client rate limiting using the token bucket algorithm.

use anyhow::{Context, Result};
use axum::Router;
use axum::body::Body;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::config::RateLimitConfig;

/// Wraps `router` in a per-IP rate limiter.
///
/// # Limits
///
/// One request is replenished every `replenish_ms` milliseconds, with up to
/// `burst` requests allowed at once. Requests exceeding the limit receive
/// `429 Too Many Requests`.
///
/// # Key Extraction
///
/// - Direct deployments key on the socket peer address
/// - With `behind_proxy`, the client IP is read from `X-Forwarded-For` /
///   `X-Real-IP` / `Forwarded` first; enable only behind a trusted proxy
///
/// The server must be started with connect info for peer-address keys.
///
/// # Errors
///
/// Returns an error if `replenish_ms` or `burst` is zero.
pub fn apply(router: Router, settings: &RateLimitConfig) -> Result<Router> {
    if settings.behind_proxy {
        let conf = GovernorConfigBuilder::default()
            .per_millisecond(settings.replenish_ms)
            .burst_size(settings.burst)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .context("Invalid rate limit configuration")?;

        let layer: GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, Body> =
            GovernorLayer::new(Arc::new(conf));

        Ok(router.layer(layer))
    } else {
        let conf = GovernorConfigBuilder::default()
            .per_millisecond(settings.replenish_ms)
            .burst_size(settings.burst)
            .finish()
            .context("Invalid rate limit configuration")?;

        let layer: GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, Body> =
            GovernorLayer::new(Arc::new(conf));

        Ok(router.layer(layer))
    }
}
