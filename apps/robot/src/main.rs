use std::sync::Arc;

use robot::config::db::DbProfile;
use robot::config::robot::RobotConfig;
use robot::feed::broker::{RedisChangeFeed, RedisChangePublisher};
use robot::infra::db::{connect_db, migrate_up};
use robot::robot::TriggerDispatcher;
use robot::store::SeaTableStore;
use robot::worker;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, Instrument};

mod telemetry;

const FEED_BUFFER: usize = 1024;

#[tokio::main]
async fn main() {
    let service = telemetry::init_tracing();
    run().instrument(service).await;
}

async fn run() {
    // Environment variables must be set by the runtime environment.
    let config = match RobotConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid robot configuration");
            std::process::exit(1);
        }
    };

    let db = match connect_db(DbProfile::Prod).await {
        Ok(db) => db,
        Err(e) => {
            error!(error = %e, "Failed to connect to database");
            std::process::exit(1);
        }
    };

    if config.run_migrations {
        if let Err(e) = migrate_up(&db).await {
            error!(error = %e, "Migrations failed");
            std::process::exit(1);
        }
    }

    let publisher = match RedisChangePublisher::connect(&config.redis_url, &config.channel).await {
        Ok(publisher) => Arc::new(publisher),
        Err(e) => {
            error!(error = %e, "Failed to connect to Redis");
            std::process::exit(1);
        }
    };

    let store = Arc::new(SeaTableStore::new(db).with_publisher(publisher));
    let dispatcher =
        TriggerDispatcher::new(store).with_committer(config.commit_policy.committer());

    let shutdown = CancellationToken::new();
    let notifications = RedisChangeFeed::new(&config.redis_url, &config.channel)
        .spawn(FEED_BUFFER, shutdown.clone());

    let ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received");
        }
        ctrl_c.cancel();
    });

    info!(
        channel = %config.channel,
        policy = config.commit_policy.as_str(),
        mode = config.dispatch_mode.as_str(),
        "Robot ready"
    );

    worker::run::<_, robot::domain::BridgeHand, _>(
        dispatcher,
        config.dispatch_mode,
        ReceiverStream::new(notifications),
        shutdown,
    )
    .await;
}
