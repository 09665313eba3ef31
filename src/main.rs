use tracing_subscriber::util::SubscriberInitExt;

pub(crate) mod config;
pub(crate) mod db;
pub(crate) mod extract;
pub(crate) mod fetch;
pub(crate) mod mailer;

pub(crate) static CLIENT: std::sync::LazyLock<reqwest::Client> =
    std::sync::LazyLock::new(reqwest::Client::new);

const POLL_INTERVAL: std::time::Duration = std::time::Duration::from_secs(5 * 60);
// On a failed iteration we wait a bit longer before trying again.
const ERROR_RETRY_INTERVAL: std::time::Duration = std::time::Duration::from_secs(10 * 60);

#[derive(Debug, Clone, clap::Parser)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "false")]
    #[arg(help = "Run a single poll and exit instead of looping")]
    once: bool,

    #[arg(short, long, default_value = "false")]
    #[arg(help = "Reset the database")]
    reset: bool,

    #[arg(short, long, default_value = "false")]
    #[arg(help = "Log to console")]
    log_to_console: bool,
}

/// One scraped tour announcement. Uniqueness is the exact trimmed triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Event {
    pub(crate) band: String,
    pub(crate) city: String,
    pub(crate) date: String,
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, {}", self.band, self.city, self.date)
    }
}

/// Returns true if the event was not seen before and has now been stored.
fn check_and_store(db: &rusqlite::Connection, event: &Event) -> anyhow::Result<bool> {
    if db::exists(db, event)? {
        return Ok(false);
    }
    db::insert_event(db, event)?;
    Ok(true)
}

async fn poll(db: &rusqlite::Connection) -> anyhow::Result<()> {
    let html = fetch::fetch_page().await?;

    let Some(event) = extract::extract(&html)? else {
        tracing::info!("No upcoming tours listed");
        return Ok(());
    };

    if !check_and_store(db, &event)? {
        tracing::info!(event = %event, "Event already recorded, skipping");
        return Ok(());
    }

    tracing::info!(event = %event, "New event stored");
    mailer::send_new_event(&event).await?;

    Ok(())
}

#[tokio::main]
async fn main() {
    use tracing_subscriber::layer::Layer;
    use tracing_subscriber::layer::SubscriberExt;

    use clap::Parser;
    let args = Args::parse();

    let file_appender = tracing_appender::rolling::daily("./log", "tourwatch.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer();
    let file_layer = file_layer
        .with_writer(non_blocking)
        .json()
        .with_filter(tracing::level_filters::LevelFilter::INFO)
        .boxed();

    let pretty_layer = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stdout)
        .with_filter(tracing::level_filters::LevelFilter::INFO)
        .boxed();

    let registry = tracing_subscriber::registry().with(file_layer);

    if args.log_to_console {
        registry.with(pretty_layer).init();
    } else {
        registry.init();
    };

    tracing::info!(args =? args, "Starting tourwatch");

    let db = match db::open_db(args.reset) {
        Ok(db) => db,
        Err(e) => {
            tracing::error!(error =? e, "Failed to open database");
            std::process::exit(1);
        }
    };

    loop {
        match poll(&db).await {
            Ok(()) => {
                if args.once {
                    tracing::info!("Single poll finished");
                    break;
                }
                tokio::time::sleep(POLL_INTERVAL).await;
            }
            Err(e) => {
                tracing::error!(error =? e, "Poll failed");
                if args.once {
                    std::process::exit(1);
                }
                tokio::time::sleep(ERROR_RETRY_INTERVAL).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(tours: &str) -> String {
        format!("<html><body><div id=\"tours\">{tours}</div></body></html>")
    }

    #[test]
    fn first_sighting_is_stored_duplicates_are_not() {
        let db = db::open_in_memory().unwrap();

        let event = extract::extract(&page("Metallica, Berlin, 2025-05-01"))
            .unwrap()
            .unwrap();
        assert!(check_and_store(&db, &event).unwrap());

        // Identical page on the next poll must not store again.
        let event = extract::extract(&page("Metallica, Berlin, 2025-05-01"))
            .unwrap()
            .unwrap();
        assert!(!check_and_store(&db, &event).unwrap());

        // A changed date makes it a different event.
        let event = extract::extract(&page("Metallica, Berlin, 2025-06-01"))
            .unwrap()
            .unwrap();
        assert!(check_and_store(&db, &event).unwrap());
    }

    #[test]
    fn sentinel_page_yields_no_event() {
        let extracted = extract::extract(&page("No upcoming tours")).unwrap();
        assert!(extracted.is_none());
    }

    #[test]
    fn event_displays_as_comma_joined_triple() {
        let event = Event {
            band: "Metallica".to_string(),
            city: "Berlin".to_string(),
            date: "2025-05-01".to_string(),
        };
        assert_eq!(event.to_string(), "Metallica, Berlin, 2025-05-01");
    }
}
