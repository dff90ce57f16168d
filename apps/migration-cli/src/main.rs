use std::sync::Arc;

use clap::{Parser, ValueEnum};
use migration::{migrate, MigrationCommand};
use robot::adapters::tables_sea::TableCreate;
use robot::config::db::{db_url, redact_db_url, DbProfile};
use robot::config::robot::RobotConfig;
use robot::domain::{deal, BridgeHand, HandAggregate};
use robot::feed::broker::RedisChangePublisher;
use robot::store::SeaTableStore;
use sea_orm::Database;

#[derive(Clone, Copy, ValueEnum)]
enum Command {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
    /// Insert a freshly dealt table (requires --table-id)
    Seed,
}

#[derive(Clone, Copy, ValueEnum)]
enum Env {
    Prod,
    Test,
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Table robot database migration tool")]
struct Args {
    /// Migration command to run
    #[arg(value_enum)]
    command: Command,

    /// Runtime environment
    #[arg(short, long, value_enum, default_value = "test")]
    env: Env,

    /// Id of the table created by `seed`
    #[arg(long)]
    table_id: Option<String>,

    /// Player labels for `seed`, comma separated
    #[arg(long, value_delimiter = ',', default_value = "Robot,Robot,Robot,Robot")]
    players: Vec<String>,

    /// Shuffle seed for `seed`
    #[arg(long, default_value_t = 0)]
    deal_seed: u64,

    /// Dealer seat for `seed`
    #[arg(long, default_value_t = 0)]
    dealer: u8,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let profile = match args.env {
        Env::Prod => DbProfile::Prod,
        Env::Test => DbProfile::Test,
    };

    let url = match db_url(profile) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    let db = match Database::connect(&url).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Failed to connect to {}: {e}", redact_db_url(&url));
            std::process::exit(1);
        }
    };

    let command = match args.command {
        Command::Up => MigrationCommand::Up,
        Command::Down => MigrationCommand::Down,
        Command::Fresh => MigrationCommand::Fresh,
        Command::Reset => MigrationCommand::Reset,
        Command::Refresh => MigrationCommand::Refresh,
        Command::Status => MigrationCommand::Status,
        Command::Seed => {
            let Some(table_id) = args.table_id else {
                eprintln!("seed requires --table-id");
                std::process::exit(2);
            };
            let hand = BridgeHand::new(args.dealer, deal(args.deal_seed))
                .and_then(|hand| hand.to_document());
            let hand = match hand {
                Ok(hand) => hand,
                Err(e) => {
                    eprintln!("Failed to deal: {e}");
                    std::process::exit(2);
                }
            };
            let mut store = SeaTableStore::new(db);
            match RobotConfig::from_env() {
                Ok(config) => {
                    match RedisChangePublisher::connect(&config.redis_url, &config.channel).await {
                        Ok(publisher) => store = store.with_publisher(Arc::new(publisher)),
                        Err(e) => {
                            eprintln!("Failed to connect to Redis: {e}");
                            std::process::exit(1);
                        }
                    }
                }
                Err(e) => eprintln!("Seeded table will not be announced: {e}"),
            }
            let dto = TableCreate::new(table_id)
                .with_players(args.players)
                .with_hand(hand);
            if let Err(e) = store.create_table(dto).await {
                eprintln!("Seeding failed: {e}");
                std::process::exit(1);
            }
            return;
        }
    };

    if let Err(e) = migrate(&db, command).await {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
}
