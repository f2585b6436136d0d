use std::{future::Future, time::Duration};

use crate::logger;

/// Runs `op` up to `attempts` times with a constant delay between attempts.
///
/// The backoff is deliberately constant, not exponential: the callers retry
/// short RPC submissions where a fixed pause is enough to ride out transient
/// nonce or connectivity hiccups.
pub async fn retry<T, F, Fut>(
    description: &str,
    attempts: usize,
    delay: Duration,
    mut op: F,
) -> anyhow::Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    let mut last_err = None;
    for attempt in 1..=attempts {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempt < attempts {
                    logger::warn(format!(
                        "{description}: attempt {attempt}/{attempts} failed: {err:#}"
                    ));
                    tokio::time::sleep(delay).await;
                }
                last_err = Some(err);
            }
        }
    }
    Err(last_err
        .unwrap_or_else(|| anyhow::anyhow!("{description}: retried zero times"))
        .context(format!("{description}: all {attempts} attempts failed")))
}
