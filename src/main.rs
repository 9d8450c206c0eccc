use std::process::ExitCode;

use anyhow::Context;
use reqres_suite::{Suite, config, telemetry};

#[actix_web::main]
async fn main() -> ExitCode {
    telemetry::init();

    let (suite, output) = match prepare() {
        Ok(prepared) => prepared,
        Err(e) => {
            ::tracing::error!("{:#}", e);

            return ExitCode::from(2);
        }
    };

    let report = suite.run().await;

    println!("{report}");

    if let Some(path) = output {
        match report.write_json(&path) {
            Ok(()) => ::tracing::info!("Report written to {}", path),
            Err(e) => ::tracing::error!("{}", e),
        }
    }

    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn prepare() -> anyhow::Result<(Suite, Option<String>)> {
    let config = config::load().context("failed to load configuration")?;
    let output = config.report.output.clone();
    let suite = Suite::from_config(config).context("failed to prepare the suite")?;

    Ok((suite, output))
}
