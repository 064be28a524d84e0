// # IP Source Trait
//
// Defines the interface for discovering the caller's public address.
//
// ## Implementations
//
// - HTTP IP-echo: `ddns-ip-http` crate
//
// ## Usage
//
// ```rust,ignore
// use ddns_core::IpSource;
//
// #[tokio::main(flavor = "current_thread")]
// async fn main() -> anyhow::Result<()> {
//     let source = /* IpSource implementation */;
//     let current_ip = source.current().await?;
//     println!("{}", current_ip);
//     Ok(())
// }
// ```

use async_trait::async_trait;

/// Trait for IP source implementations
///
/// A source performs exactly one lookup per call. It does not cache,
/// retry, or watch for changes; the external scheduler that invokes the
/// updater owns the cadence.
///
/// The returned text is the trimmed service response. Implementations
/// only reject it when explicitly configured to validate it, so callers
/// must not assume it parses as an address.
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Fetch the current public address
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The address text, surrounding whitespace removed
    /// - `Err(Error)`: Network failure, undecodable body, or failed validation
    async fn current(&self) -> Result<String, crate::Error>;

    /// Get the source name (for logging/debugging)
    fn source_name(&self) -> &'static str;
}

/// Strip leading and trailing ASCII whitespace from an echo response
///
/// The set is space, `\t`, `\n`, `\x0b`, `\x0c` and `\r`. Vertical tab is
/// included, unlike [`u8::is_ascii_whitespace`].
pub fn trim_response(body: &[u8]) -> &[u8] {
    let is_space = |b: &u8| b.is_ascii_whitespace() || *b == 0x0b;

    let start = body.iter().position(|b| !is_space(b)).unwrap_or(body.len());
    let end = body.iter().rposition(|b| !is_space(b)).map_or(start, |i| i + 1);
    &body[start..end]
}
