//! gatekeeper - fetch one item through the validated read pipeline, persist
//! it through the storage codec, and read it back.

use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};

use gatekeeper::adapters::{FileStorage, HttpFetchPort, StateSlot, TracingFailureReporter};
use gatekeeper::application::{AsyncStoredValue, FetchAndCommitHandler};
use gatekeeper::config::AppConfig;
use gatekeeper::domain::codec::Codec;
use gatekeeper::domain::hacker_news::{to_item, HackerNewsItem, HackerNewsWire};
use gatekeeper::domain::{ReadOutcome, ValidatedTransition};
use gatekeeper::logging;
use gatekeeper::ports::FetchParams;

const ITEM_KEY: &str = "hacker-news-item";

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load_validated() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("gatekeeper: {}", e);
            return ExitCode::FAILURE;
        }
    };
    logging::init(&config.logging);

    let fetch = match HttpFetchPort::new(config.fetch.http_config()) {
        Ok(fetch) => fetch,
        Err(e) => {
            error!(error = %e, "could not build fetch port");
            return ExitCode::FAILURE;
        }
    };

    let slot = StateSlot::new();
    let handler = FetchAndCommitHandler::new(
        Arc::new(fetch),
        ValidatedTransition::new(
            HackerNewsWire::schema(),
            to_item as fn(HackerNewsWire) -> HackerNewsItem,
        ),
        Arc::new(slot.clone()),
        Arc::new(TracingFailureReporter::new()),
    );

    // Failures were already reported; only the exit code is left to decide.
    if handler.handle(FetchParams::new()).await.is_err() {
        return ExitCode::FAILURE;
    }
    let Some(item) = slot.current().await else {
        error!("pipeline succeeded without committing");
        return ExitCode::FAILURE;
    };
    info!(id = item.id, url = %item.url, "item committed");

    let stored = AsyncStoredValue::new(
        Arc::new(FileStorage::new(config.storage.data_path())),
        ITEM_KEY,
        Codec::new(HackerNewsItem::schema(), config.storage.format),
    );

    if let Err(e) = stored.save(&item).await {
        error!(error = %e, key = ITEM_KEY, "failed to persist item");
        return ExitCode::FAILURE;
    }

    match stored.load().await {
        ReadOutcome::Present(reloaded) => {
            info!(id = reloaded.id, unchanged = (reloaded == item), "item read back");
            ExitCode::SUCCESS
        }
        ReadOutcome::Absent => {
            error!(key = ITEM_KEY, "item missing right after save");
            ExitCode::FAILURE
        }
        ReadOutcome::Failed(e) => {
            error!(error = %e, key = ITEM_KEY, "failed to read item back");
            ExitCode::FAILURE
        }
    }
}
