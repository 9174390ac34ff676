use anyhow::Context;
use mdpub_config::{AppConfig, FileStorage, Storage};
use mdpub_store::cli::{self, Command, HELP};
use mdpub_store::listing::{DirectoryLister, FsDirectoryLister};
use mdpub_store::thunks::fetch_listing_by_path;
use mdpub_store::{AppContext, DispatchOutcome, SliceName};
use std::sync::Arc;
use strum::IntoEnumIterator;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let log_file = mdpub_store::logger::init()?;
    log::info!("Starting mdpub, logging to {:?}", log_file);

    let config = AppConfig::load();
    let storage_dir = config.storage_dir()?;
    log::info!("Persisted slices live in {:?}", storage_dir);
    let storage: Arc<dyn Storage> = Arc::new(FileStorage::new(storage_dir));

    let content_root = match &config.content.root {
        Some(root) => root.clone(),
        None => std::env::current_dir().context("Failed to resolve working directory")?,
    };
    let lister: Arc<dyn DirectoryLister> = Arc::new(FsDirectoryLister::new(content_root));

    let ctx = AppContext::build(config, storage, lister);
    let subscription = ctx.store.subscribe(|next, prev| {
        for slice in next.changed_slices(prev) {
            log::trace!("Slice '{}' changed", slice);
        }
        Ok(())
    });

    let result = run(&ctx).await;

    subscription.unsubscribe();
    ctx.shutdown();
    log::info!("Exiting mdpub");
    result
}

async fn run(ctx: &AppContext) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let command = match cli::parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("error: {}", e);
                continue;
            }
        };

        match command {
            Command::Dispatch(action) => match ctx.store.dispatch(action) {
                Ok(DispatchOutcome::Changed(slices)) => println!("changed: {:?}", slices),
                Ok(DispatchOutcome::Unchanged) => println!("unchanged"),
                Err(e) => eprintln!("error: {}", e),
            },
            Command::State(slice) => {
                let state = ctx.store.state();
                let json = match slice {
                    Some(slice) => state.slice_json(slice)?,
                    None => {
                        let mut tree = serde_json::Map::new();
                        for slice in SliceName::iter() {
                            tree.insert(slice.to_string(), state.slice_json(slice)?);
                        }
                        serde_json::Value::Object(tree)
                    }
                };
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
            Command::List {
                pathname,
                is_directory,
            } => {
                let thunk = fetch_listing_by_path(pathname, is_directory, Arc::clone(&ctx.lister));
                match ctx.store.dispatch_thunk(thunk).await {
                    Ok(listing) => {
                        println!("{}/", listing.pathname);
                        for dir in &listing.dirs {
                            println!("  {}/", dir);
                        }
                        for file in &listing.files {
                            println!("  {}", file);
                        }
                    }
                    Err(e) => eprintln!("error: {:#}", e),
                }
            }
            Command::Log(keyword) => {
                let state = ctx.store.state();
                let filter = cli::log_filter(&state.log.filter, keyword);
                for entry in state.log.filtered(&filter) {
                    println!(
                        "{} {:?} [{}] {}",
                        entry.timestamp.format("%H:%M:%S"),
                        entry.level,
                        entry.entry_type,
                        entry.message
                    );
                }
            }
            Command::Stats => match ctx.devtools_stats() {
                Some(stats) => {
                    println!("actions: {} in {:?}", stats.actions, stats.total_time);
                    for slow in &stats.slow_actions {
                        println!("  slow: {} {:?}", slow.action_type, slow.elapsed);
                    }
                }
                None => println!("devtools disabled"),
            },
            Command::Flush => {
                if ctx.flush() {
                    println!("flushed");
                }
            }
            Command::Help => println!("{}", HELP),
            Command::Quit => break,
        }
    }

    Ok(())
}
