use std::time::Duration;

use clap::Parser;
use client::poller::RosterPoller;
use client::transport::{Transport, DEFAULT_ORIGIN};
use log::{error, info};
use shared::format_seconds;
use url::Url;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Origin of the monitoring service
    #[arg(short = 'o', long, default_value = DEFAULT_ORIGIN)]
    origin: Url,

    /// Poll period in milliseconds
    #[arg(short = 'p', long, default_value = "1000")]
    period_ms: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();

    info!("Starting roster monitor...");
    info!("Watching {} every {}ms", args.origin, args.period_ms);

    let transport = Transport::new(args.origin);
    let poller = RosterPoller::with_period(transport, Duration::from_millis(args.period_ms));
    let mut subscription = poller.subscribe();

    loop {
        tokio::select! {
            alive = subscription.changed() => {
                if !alive {
                    error!("Roster subscription closed");
                    break;
                }

                let roster = subscription.roster();
                info!("{} players on the server", roster.len());
                for player in roster.iter() {
                    info!(
                        "  {} [{:?}] ping {}ms, connected {}, {} marks",
                        player.name,
                        player.team,
                        player.ping,
                        format_seconds(player.connected),
                        player.matches.len(),
                    );
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down gracefully...");
                break;
            }
        }
    }

    subscription.stop();

    Ok(())
}
