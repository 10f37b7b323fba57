//! `clinic-admin`: prints one page of a management table.

use std::env;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;

use clinic_admin::controller::{FetchOutcome, ListController};
use clinic_admin::domain::page::{FilterValue, Filters};
use clinic_admin::domain::resource::{JsonRow, ResourceKind};
use clinic_admin::dto::list::{EMPTY_STATE_MESSAGE, ListView};
use clinic_admin::export::write_csv;
use clinic_admin::models::config::load_config;
use clinic_admin::remote::credentials::{BearerToken, CredentialStore};
use clinic_admin::remote::http::HttpCollection;

#[derive(Parser)]
#[command(name = "clinic-admin")]
#[command(about = "List a page of a clinic admin resource")]
struct Cli {
    /// clinics, doctors, faqs, blogs, specialties, partners, transactions,
    /// reviews, appointments or patients
    resource: ResourceKind,
    #[arg(long, default_value_t = 1)]
    page: usize,
    #[arg(long)]
    limit: Option<usize>,
    /// Print rows as CSV instead of JSON lines.
    #[arg(long, default_value_t = false)]
    csv: bool,
    /// Filters forwarded to the list endpoint, e.g. `status=paid`.
    #[arg(value_parser = parse_filter)]
    filters: Vec<(String, FilterValue)>,
}

fn parse_filter(raw: &str) -> Result<(String, FilterValue), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing filter name in `{raw}`"));
    }
    Ok((key.to_string(), FilterValue::parse_loose(value)))
}

fn print_view(view: &ListView<JsonRow>, as_csv: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if view.rows.is_empty() {
        eprintln!("{}", view.label);
        writeln!(out, "{EMPTY_STATE_MESSAGE}")?;
        return Ok(());
    }

    if as_csv {
        eprintln!("{}", view.label);
        write_csv(&view.rows, &mut out).map_err(io::Error::other)?;
    } else {
        writeln!(out, "{}", view.label)?;
        for row in &view.rows {
            writeln!(out, "{}", serde_json::to_string(row)?)?;
        }
    }
    out.flush()
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let config = match load_config(Path::new("config"), &app_env) {
        Ok(config) => config,
        Err(err) => {
            log::error!("Error loading config: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut options = match config.controller_options() {
        Ok(options) => options,
        Err(err) => {
            log::error!("Error loading config: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(limit) = cli.limit {
        let Some(limit) = options.page_sizes.iter().find(|size| size.get() == limit) else {
            log::error!("Page size {limit} is not one of {:?}", config.page_sizes);
            return ExitCode::FAILURE;
        };
        options.default_limit = *limit;
    }

    let credentials = CredentialStore::new(config.token.clone().and_then(BearerToken::new));
    let collection = match HttpCollection::new(
        &config.api_base_url,
        config.request_timeout(),
        credentials,
    ) {
        Ok(collection) => Arc::new(collection),
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let controller: ListController<JsonRow, _> =
        ListController::new(cli.resource.spec(), collection, options);

    let filters: Filters = cli.filters.into_iter().collect();
    let mut outcome = if filters.is_empty() {
        controller.refetch().await
    } else {
        controller.set_filters(filters).await
    };
    if outcome == FetchOutcome::Applied && cli.page != 1 {
        outcome = controller.set_page(cli.page).await;
    }

    let view = controller.view();
    match outcome {
        FetchOutcome::Applied => {}
        FetchOutcome::Failed(info) => {
            log::error!("Could not load {}: {}", cli.resource, info.message);
            return ExitCode::FAILURE;
        }
        FetchOutcome::Rejected => {
            log::error!(
                "Page {} is out of range, {} has {} page(s)",
                cli.page,
                cli.resource,
                view.window.total_pages
            );
            return ExitCode::FAILURE;
        }
        FetchOutcome::Stale | FetchOutcome::Abandoned => return ExitCode::FAILURE,
    }

    if let Err(err) = print_view(&view, cli.csv) {
        log::error!("Failed to write output: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
