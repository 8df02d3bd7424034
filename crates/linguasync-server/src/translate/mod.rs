//! Translation gateway client.
//!
//! The gateway is an opaque, possibly-slow, possibly-failing external
//! service. The relay router talks to it through the [`Translator`] trait so
//! fan-out logic can be exercised without a live backend.

pub mod http;

use std::collections::HashMap;

use async_trait::async_trait;

use linguasync_core::error::Result;

#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from `source_lang` into each of `target_langs`.
    ///
    /// A missing key in the returned mapping is a valid, non-error outcome
    /// meaning "no translation available for that language"; the caller
    /// substitutes the original text.
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_langs: &[String],
    ) -> Result<HashMap<String, String>>;

    /// Reachability check. The server refuses to boot when this fails.
    async fn probe(&self) -> Result<()>;
}
