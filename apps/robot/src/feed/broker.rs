//! Redis pub/sub transport for table change notifications.

use std::time::Duration;

use rand::random;
use redis::aio::{ConnectionManager, PubSub};
use redis::{AsyncCommands, Client};
use tokio::sync::{mpsc, Mutex};
use tokio::time::sleep;
use tokio_stream::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::feed::{ChangeEnvelope, ChangeNotification, ChangePublisher};

// Subscriber retry configuration (background task)
const INITIAL_RETRY_DELAY_SECS: u64 = 1;
const MAX_RETRY_DELAY_SECS: u64 = 60;
const RETRY_DELAY_MULTIPLIER: f64 = 2.0;
const JITTER_PERCENT: f64 = 0.2;

// Publisher retry configuration (write path)
const PUBLISHER_MAX_ATTEMPTS: u32 = 3;
const PUBLISHER_INITIAL_RETRY_DELAY_MS: u64 = 50;
const PUBLISHER_MAX_RETRY_DELAY_MS: u64 = 200;

fn open_client(redis_url: &str) -> Result<Client, AppError> {
    Client::open(redis_url).map_err(|err| AppError::config(format!("Invalid REDIS_URL: {err}")))
}

/// Publishes change envelopes on a single channel.
pub struct RedisChangePublisher {
    channel: String,
    publisher: Mutex<ConnectionManager>,
}

impl RedisChangePublisher {
    pub async fn connect(redis_url: &str, channel: impl Into<String>) -> Result<Self, AppError> {
        let client = open_client(redis_url)?;
        let manager = ConnectionManager::new(client).await.map_err(|err| {
            AppError::internal(
                ErrorCode::FeedError,
                format!("Unable to initialize Redis connection manager: {err}"),
            )
        })?;

        Ok(Self {
            channel: channel.into(),
            publisher: Mutex::new(manager),
        })
    }
}

#[async_trait::async_trait]
impl ChangePublisher for RedisChangePublisher {
    async fn publish(&self, change: &ChangeNotification) -> Result<(), AppError> {
        let encoded = serde_json::to_string(&ChangeEnvelope::from(change.clone()))?;

        let mut attempt = 0u32;
        loop {
            attempt += 1;

            let publish_res = {
                let mut publisher = self.publisher.lock().await;
                publisher
                    .publish::<_, _, ()>(self.channel.as_str(), encoded.as_str())
                    .await
            };

            match publish_res {
                Ok(()) => return Ok(()),
                Err(err) => {
                    let app_err = AppError::from(err);
                    if attempt >= PUBLISHER_MAX_ATTEMPTS || !is_transient_error(&app_err) {
                        return Err(app_err);
                    }

                    let delay = publish_retry_delay(attempt);
                    warn!(
                        error = %app_err,
                        attempt,
                        retry_delay_ms = delay.as_millis() as u64,
                        "Redis publish failed, retrying"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

/// Subscription side of the feed: decoded notifications are forwarded to an
/// mpsc channel until the receiver goes away or the token is cancelled.
pub struct RedisChangeFeed {
    redis_url: String,
    channel: String,
}

impl RedisChangeFeed {
    pub fn new(redis_url: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            redis_url: redis_url.into(),
            channel: channel.into(),
        }
    }

    /// Spawns the subscription loop and returns the receiving end.
    pub fn spawn(
        self,
        buffer: usize,
        shutdown: CancellationToken,
    ) -> mpsc::Receiver<ChangeNotification> {
        let (tx, rx) = mpsc::channel(buffer);
        tokio::spawn(async move {
            self.run_with_retry(tx, shutdown).await;
        });
        rx
    }

    async fn run_with_retry(&self, tx: mpsc::Sender<ChangeNotification>, shutdown: CancellationToken) {
        let mut attempt = 0u32;

        loop {
            attempt += 1;

            let loop_res = tokio::select! {
                _ = shutdown.cancelled() => Ok(()),
                res = self.run_once(&tx) => res,
            };
            match loop_res {
                Ok(()) => {
                    info!(channel = %self.channel, "Redis subscription loop completed normally");
                    break;
                }
                Err(err) => {
                    if !is_transient_error(&err) {
                        error!(
                            error = %err,
                            attempt,
                            "Redis subscription failed with permanent error, exiting"
                        );
                        break;
                    }

                    let delay = subscribe_retry_delay(attempt);
                    warn!(
                        error = %err,
                        attempt,
                        retry_delay_secs = delay.as_secs_f64(),
                        "Redis subscription failed, retrying"
                    );
                    tokio::select! {
                        _ = shutdown.cancelled() => break,
                        _ = sleep(delay) => {}
                    }

                    if attempt >= 20 {
                        attempt = 10;
                    }
                }
            }
        }
    }

    async fn run_once(&self, tx: &mpsc::Sender<ChangeNotification>) -> Result<(), AppError> {
        let client = open_client(&self.redis_url)?;
        let conn_info = client.get_connection_info();

        let addr = match conn_info.addr().clone() {
            redis::ConnectionAddr::Tcp(host, port) => (host, port),
            _ => {
                return Err(AppError::config(
                    "Only TCP protocol is supported for pubsub",
                ))
            }
        };

        info!(host = %addr.0, port = addr.1, "Connecting to Redis for subscription");

        let stream = tokio::net::TcpStream::connect(addr).await.map_err(|err| {
            AppError::internal(
                ErrorCode::FeedError,
                format!("Failed to connect to Redis for subscription: {err}"),
            )
        })?;

        let mut pubsub = PubSub::new(conn_info.redis_settings(), stream).await?;
        pubsub.subscribe(self.channel.as_str()).await?;

        info!(channel = %self.channel, "Redis subscription established, processing messages");

        let mut messages = pubsub.into_on_message();
        while let Some(msg) = messages.next().await {
            let Ok(payload) = msg.get_payload::<String>() else {
                continue;
            };

            match decode_notification(&payload) {
                Ok(change) => {
                    debug!(table_id = %change.table_id, "Change notification received");
                    if tx.send(change).await.is_err() {
                        // Nobody is listening anymore.
                        return Ok(());
                    }
                }
                Err(err) => {
                    error!(
                        error = %err,
                        channel = %self.channel,
                        "Failed to decode change notification"
                    );
                }
            }
        }

        warn!("Redis subscription stream ended, connection lost");
        Err(AppError::internal(
            ErrorCode::FeedError,
            "Redis subscription stream ended unexpectedly",
        ))
    }
}

pub fn decode_notification(payload: &str) -> Result<ChangeNotification, AppError> {
    let envelope: ChangeEnvelope = serde_json::from_str(payload)?;
    Ok(envelope.into())
}

fn is_transient_error(err: &AppError) -> bool {
    if let AppError::Config { .. } = err {
        return false;
    }

    let error_msg = err.to_string().to_lowercase();

    if error_msg.contains("authentication failed")
        || error_msg.contains("unsupported")
        || error_msg.contains("json error")
    {
        return false;
    }

    true
}

fn publish_retry_delay(attempt: u32) -> Duration {
    let delay_ms = PUBLISHER_INITIAL_RETRY_DELAY_MS
        .saturating_mul(2_u64.pow(attempt.saturating_sub(1)))
        .min(PUBLISHER_MAX_RETRY_DELAY_MS);
    Duration::from_millis(delay_ms)
}

fn subscribe_retry_delay(attempt: u32) -> Duration {
    let base_delay =
        INITIAL_RETRY_DELAY_SECS as f64 * RETRY_DELAY_MULTIPLIER.powi(attempt as i32 - 1);
    let capped_delay = base_delay.min(MAX_RETRY_DELAY_SECS as f64);

    let jitter_range = capped_delay * JITTER_PERCENT;
    let jitter = (random::<f64>() * 2.0 - 1.0) * jitter_range;
    let final_delay = (capped_delay + jitter).max(0.1);

    Duration::from_secs_f64(final_delay)
}
