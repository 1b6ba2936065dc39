mod cli;
mod config;
mod table;

use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::Parser;
use dashboard_core::{
    resources, BulkOutcome, BulkStatus, ControllerEvent, DebouncedSearch, FetchOutcome,
    HttpResourceApi, ListController, Record, ResourceApi, ResourceConfig,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::{
    cli::{Cli, Command, QueryArgs, ResourceKind},
    config::{load_settings, normalize_api_url, Settings},
    table::render_table,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings(cli.config.as_deref())?;
    if let Some(api_url) = &cli.api_url {
        settings.api_base_url = normalize_api_url(api_url)?;
    }
    info!(api = %settings.api_base_url, "admin cli starting");

    let api: Arc<dyn ResourceApi> = Arc::new(HttpResourceApi::with_timeout(
        settings.api_base_url.clone(),
        settings.request_timeout(),
    )?);

    let resource = match &cli.command {
        Command::List { resource, .. }
        | Command::Export { resource, .. }
        | Command::Bulk { resource, .. }
        | Command::Delete { resource, .. }
        | Command::Watch { resource, .. } => *resource,
    };
    match resource {
        ResourceKind::Members => run(resources::members(), api, &settings, cli.command).await,
        ResourceKind::Artworks => run(resources::artworks(), api, &settings, cli.command).await,
        ResourceKind::Events => run(resources::events(), api, &settings, cli.command).await,
        ResourceKind::Projects => run(resources::projects(), api, &settings, cli.command).await,
        ResourceKind::Notifications => {
            run(resources::notifications(), api, &settings, cli.command).await
        }
    }
}

async fn run<T>(
    config: ResourceConfig<T>,
    api: Arc<dyn ResourceApi>,
    settings: &Settings,
    command: Command,
) -> Result<()>
where
    T: Record,
    T::Id: From<i64>,
{
    match command {
        Command::List { query, .. } => {
            let controller = load(config, api, &query).await?;
            print_page(&controller).await;
        }
        Command::Export { query, out, .. } => {
            let controller = load(config, api, &query).await?;
            let export = controller.export_csv(Local::now().date_naive()).await?;
            let dir = out.unwrap_or_else(|| settings.export_dir.clone());
            let path = write_export(&dir, &export.file_name, &export.contents).await?;
            println!("Wrote {}", path.display());
        }
        Command::Bulk {
            action,
            ids,
            feedback,
            query,
            ..
        } => {
            let controller = load(config, api, &query).await?;
            select_ids(&controller, &ids).await;
            let outcome = controller
                .run_bulk_action(&action, feedback.as_deref())
                .await?;
            report_bulk(&outcome)?;
        }
        Command::Delete { ids, query, .. } => {
            let controller = load(config, api, &query).await?;
            select_ids(&controller, &ids).await;
            let outcome = controller.bulk_delete().await;
            report_bulk(&outcome)?;
        }
        Command::Watch { query, .. } => {
            let controller = load(config, api, &query).await?;
            print_page(&controller).await;
            watch_search(controller, settings).await?;
        }
    }
    Ok(())
}

async fn load<T: Record>(
    config: ResourceConfig<T>,
    api: Arc<dyn ResourceApi>,
    args: &QueryArgs,
) -> Result<Arc<ListController<T>>> {
    let controller = ListController::with_query(config, api, args.to_list_query());
    match controller.refresh().await {
        FetchOutcome::Failed(err) => {
            if err.requires_reauth() {
                warn!("the API rejected the request; check credentials");
            }
            Err(err).with_context(|| format!("failed to load {}", controller.config().name))
        }
        _ => Ok(controller),
    }
}

async fn select_ids<T>(controller: &ListController<T>, ids: &[i64])
where
    T: Record,
    T::Id: From<i64>,
{
    for &raw in ids {
        let id = T::Id::from(raw);
        if controller.is_selected(id).await {
            continue;
        }
        if !controller.toggle(id).await {
            warn!(
                resource = controller.config().name,
                id = raw,
                "id is not on the loaded page; skipped"
            );
        }
    }
}

async fn print_page<T: Record>(controller: &ListController<T>) {
    let snapshot = controller.snapshot().await;
    let columns = &controller.config().columns;
    print!("{}", render_table(columns, &snapshot.rows));
    println!(
        "page {} | {} of {} {} | prev: {} | next: {}",
        snapshot.pagination.page,
        snapshot.rows.len(),
        snapshot.total_count,
        controller.config().name,
        if snapshot.pagination.can_prev() { "yes" } else { "no" },
        if snapshot.pagination.can_next() { "yes" } else { "no" },
    );
}

fn report_bulk<Id: std::fmt::Display + Ord>(outcome: &BulkOutcome<Id>) -> Result<()> {
    match outcome.status() {
        BulkStatus::NoOp => bail!("none of the given ids are on the loaded page"),
        BulkStatus::Succeeded => {
            println!("{} succeeded", outcome.succeeded);
            Ok(())
        }
        BulkStatus::Partial | BulkStatus::Failed => {
            let failed = outcome
                .failed_ids
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            bail!(
                "{} of {} failed (ids {failed}): {}",
                outcome.failed_ids.len(),
                outcome.attempted,
                outcome.last_error.as_deref().unwrap_or("unknown error")
            )
        }
    }
}

async fn write_export(dir: &std::path::Path, file_name: &str, contents: &str) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("failed to create export dir '{}'", dir.display()))?;
    let path = dir.join(file_name);
    tokio::fs::write(&path, contents)
        .await
        .with_context(|| format!("failed to write '{}'", path.display()))?;
    Ok(path)
}

async fn watch_search<T: Record>(
    controller: Arc<ListController<T>>,
    settings: &Settings,
) -> Result<()> {
    let mut events = controller.subscribe();
    let mut search = DebouncedSearch::attach(controller.clone(), settings.debounce());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(text) => search.input(text),
                None => break,
            },
            event = events.recv() => {
                if let Ok(ControllerEvent::PageLoaded { .. }) = event {
                    print_page(&controller).await;
                }
            }
        }
    }

    // A burst typed right before EOF still gets its page.
    if search.is_pending() {
        let settle = settings.debounce() + settings.request_timeout();
        let _ = tokio::time::timeout(settle, async {
            while let Ok(event) = events.recv().await {
                match event {
                    ControllerEvent::PageLoaded { .. } => {
                        print_page(&controller).await;
                        break;
                    }
                    ControllerEvent::Notice(_) => break,
                    _ => {}
                }
            }
        })
        .await;
    }
    Ok(())
}
