//! CLI entry point for the route insights tool.
//!
//! Loads a bus network dataset from a file or URL, applies the requested
//! filters and reports KPIs, rollups, rankings and route tables.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use route_insights::analyzers::{
    bottom_by_field, group_stats, top_by_field, unique_values, value_counts,
};
use route_insights::config::ReportConfig;
use route_insights::fetch::{BasicClient, load_source};
use route_insights::output::{
    RouteRow, append_records, print_json, print_pretty, write_gzip_records, write_json,
};
use route_insights::parser::parse_dataset;
use route_insights::report::Report;
use route_insights::table::{SortDirection, TableSort, paginate, sort_routes};
use route_insights::{DashboardState, FilterCriteria, RouteField};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "route_insights")]
#[command(about = "Analytics over a bus route network dataset", long_about = None)]
struct Cli {
    /// JSON file with report thresholds and limits
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(flatten)]
    filters: FilterArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Filter flags shared by every subcommand.
#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Keep routes run by this carrier (repeatable)
    #[arg(long = "carrier", global = true)]
    carriers: Vec<String>,

    /// Keep routes in this region (repeatable)
    #[arg(long = "region", global = true)]
    regions: Vec<String>,

    /// Keep routes with this number (repeatable)
    #[arg(long = "route", global = true)]
    route_numbers: Vec<String>,

    /// Keep routes with this payment type (repeatable)
    #[arg(long = "payment-type", global = true)]
    payment_types: Vec<String>,

    /// Minimum average speed, km/h
    #[arg(long, global = true)]
    min_speed: Option<f64>,

    /// Maximum average speed, km/h
    #[arg(long, global = true)]
    max_speed: Option<f64>,

    /// Minimum route length, km
    #[arg(long, global = true)]
    min_length: Option<f64>,

    /// Maximum route length, km
    #[arg(long, global = true)]
    max_length: Option<f64>,
}

impl From<FilterArgs> for FilterCriteria {
    fn from(args: FilterArgs) -> Self {
        FilterCriteria::new()
            .carriers(args.carriers)
            .regions(args.regions)
            .route_numbers(args.route_numbers)
            .payment_types(args.payment_types)
            .speed_range(args.min_speed, args.max_speed)
            .length_range(args.min_length, args.max_length)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// KPIs, insights and distributions for the network and the filtered view
    Summary {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Write the full report as JSON to this path
        #[arg(long)]
        json: Option<String>,
    },
    /// Per-carrier rollup
    Carriers {
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// CSV file to append results to
        #[arg(short, long)]
        output: Option<String>,

        /// Only keep the N largest carriers
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Rollup by any category (region, payment type, working zone...)
    Groups {
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        #[arg(short, long, value_enum)]
        field: RouteField,

        /// CSV file to append results to
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Number of routes per distinct value of a field
    Counts {
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        #[arg(short, long, value_enum)]
        field: RouteField,
    },
    /// Routes ranked by a numeric field
    Top {
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        #[arg(short, long, value_enum, default_value = "avg-speed")]
        field: RouteField,

        #[arg(short, long)]
        limit: Option<usize>,

        /// Rank lowest first
        #[arg(long, default_value_t = false)]
        ascending: bool,
    },
    /// Distinct values of a text or category field across the whole network
    /// (filter flags do not apply)
    Values {
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        #[arg(short, long, value_enum)]
        field: RouteField,
    },
    /// One page of the sorted route table
    Table {
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        #[arg(short, long, value_enum, default_value = "number")]
        sort: RouteField,

        #[arg(short, long, value_enum, default_value = "asc")]
        direction: SortDirection,

        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Write the filtered routes as CSV rows
    Export {
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        #[arg(short, long, default_value = "routes.csv")]
        output: String,

        /// Gzip the CSV (replaces the file instead of appending)
        #[arg(long, default_value_t = false)]
        gzip: bool,

        #[arg(short, long, value_enum, default_value = "number")]
        sort: RouteField,

        #[arg(short, long, value_enum, default_value = "asc")]
        direction: SortDirection,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/route_insights.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("route_insights.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let config = ReportConfig::resolve(cli.config.as_deref())?;
    let filters = FilterCriteria::from(cli.filters);

    match cli.command {
        Commands::Summary { source, json } => {
            let state = load_state(&source, filters).await?;
            let report = Report::build(&state, &config);
            print_pretty(&report.filters);

            if let Some(network) = &report.network {
                print_json(&network.display())?;
            }
            match &report.view_display {
                Some(kpis) => print_json(kpis)?,
                None => info!("No routes match the current filters"),
            }
            print_json(&report.insights)?;
            print_json(&report.speed_distribution)?;
            print_json(&report.length_distribution)?;

            if let Some(path) = json {
                write_json(&path, &report)?;
            }
        }
        Commands::Carriers {
            source,
            output,
            limit,
        } => {
            let state = load_state(&source, filters).await?;
            let mut stats = group_stats(&state.filtered_routes(), RouteField::Carrier);
            stats.truncate(limit.unwrap_or(config.top_limit));

            for s in &stats {
                info!(
                    carrier = %s.name,
                    routes = s.route_count,
                    distance_km = s.total_distance,
                    avg_speed = s.avg_speed,
                    "Carrier"
                );
            }
            if let Some(path) = output {
                append_records(&path, &stats)?;
            }
        }
        Commands::Groups {
            source,
            field,
            output,
        } => {
            let state = load_state(&source, filters).await?;
            let stats = group_stats(&state.filtered_routes(), field);

            print_json(&stats)?;
            if let Some(path) = output {
                append_records(&path, &stats)?;
            }
        }
        Commands::Counts { source, field } => {
            let state = load_state(&source, filters).await?;
            print_json(&value_counts(&state.filtered_routes(), field))?;
        }
        Commands::Top {
            source,
            field,
            limit,
            ascending,
        } => {
            let state = load_state(&source, filters).await?;
            let view = state.filtered_routes();
            let limit = limit.unwrap_or(config.top_limit);

            let ranked = if ascending {
                bottom_by_field(&view, field, limit)
            } else {
                top_by_field(&view, field, limit)
            };

            for (rank, r) in ranked.iter().enumerate() {
                info!(
                    rank = rank + 1,
                    number = %r.route.number,
                    carrier = %r.route.carrier,
                    value = field.numeric_value(r).unwrap_or(0.0),
                    field = field.label(),
                    "Ranked route"
                );
            }
        }
        Commands::Values { source, field } => {
            warn_ignored_filters(&filters, "values");
            let state = load_state(&source, filters).await?;
            print_json(&unique_values(state.routes(), field))?;
        }
        Commands::Table {
            source,
            sort,
            direction,
            page,
        } => {
            let state = load_state(&source, filters).await?;
            let view = state.filtered_routes();
            let sorted = sort_routes(&view, TableSort { field: sort, direction });
            let rows: Vec<RouteRow> = sorted.into_iter().map(RouteRow::from).collect();

            let page = paginate(&rows, page, config.page_size);
            info!(
                page = page.page,
                total_pages = page.total_pages,
                total_routes = page.total_items,
                "Route table"
            );
            print_json(&page.items)?;
        }
        Commands::Export {
            source,
            output,
            gzip,
            sort,
            direction,
        } => {
            let state = load_state(&source, filters).await?;
            let view = state.filtered_routes();
            let sorted = sort_routes(&view, TableSort { field: sort, direction });
            let rows: Vec<RouteRow> = sorted.into_iter().map(RouteRow::from).collect();

            if gzip {
                write_gzip_records(&output, &rows)?;
            } else {
                append_records(&output, &rows)?;
            }
            info!(output, rows = rows.len(), "Export complete");
        }
    }

    Ok(())
}

/// Warns when filter flags were given to a command that reads the whole
/// network. Returns whether a warning was logged.
fn warn_ignored_filters(filters: &FilterCriteria, command: &str) -> bool {
    if filters.is_empty() {
        return false;
    }
    warn!(command, "Filter flags are ignored by this command");
    true
}

/// Loads, parses and enriches the dataset, then applies `filters`.
#[tracing::instrument(skip(filters))]
async fn load_state(source: &str, filters: FilterCriteria) -> Result<DashboardState> {
    let client = BasicClient::new();
    let bytes = load_source(&client, source).await?;
    let raw = parse_dataset(&bytes).with_context(|| format!("parsing {}", source))?;

    let raw_count = raw.len();
    let state = DashboardState::load(raw).with_filters(filters);

    info!(
        raw_routes = raw_count,
        routes = state.routes().len(),
        shown = state.filtered_routes().len(),
        "Dataset loaded"
    );
    Ok(state)
}
