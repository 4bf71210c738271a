use std::process::ExitCode;

use route_table::cache::{CacheConfig, MemoizedPipeline};
use route_table::pipeline::{DistanceMode, Pipeline, PipelineOutput};
use route_table::schedule::{Clock, FixedClock, SystemClock};
use route_table::settings::Settings;
use route_table::source::RowFile;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "route_table=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let rows = match RowFile::new(&settings.rows_path).load() {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!("failed to load rows: {e}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(rows = rows.len(), path = %settings.rows_path.display(), "loaded route table");

    let clock: Box<dyn Clock> = match settings.date {
        Some(date) => Box::new(FixedClock(date)),
        None => Box::new(SystemClock),
    };

    let pipeline = MemoizedPipeline::new(Pipeline::new(settings.pipeline), &CacheConfig::default());
    let output = pipeline.run_at(&rows, &settings.filters, clock.as_ref());

    print_table(&output);
    println!();
    println!(
        "{} of {} rows, {} active filters, {}",
        output.rows.len(),
        rows.len(),
        settings.filters.active_filter_count(),
        clock.today()
    );
    if let Some(total) = output.total_kilometers() {
        println!("Route length: {total:.2} km");
    }
    if !output.delivery_facets.is_empty() {
        println!("Delivery types: {}", output.delivery_facets.join(", "));
    }
    if !output.route_facets.is_empty() {
        println!("Routes: {}", output.route_facets.join(", "));
    }

    ExitCode::SUCCESS
}

fn print_table(output: &PipelineOutput) {
    let heading = match output.mode {
        DistanceMode::Direct => "From origin",
        DistanceMode::Cumulative => "Along route",
    };
    println!(
        "{:<8} {:<28} {:<12} {:<12} {:<9} {:>12}",
        "ID", "Location", "Route", "Delivery", "Schedule", heading
    );
    for annotated in &output.rows {
        let row = &annotated.row;
        println!(
            "{:<8} {:<28} {:<12} {:<12} {:<9} {:>12}",
            row.id.as_str(),
            row.location,
            row.route,
            row.delivery,
            row.alternation().as_str(),
            annotated.kilometer.to_string()
        );
    }
}
