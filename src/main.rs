use clap::Parser;
use soap_tempconvert::app::session::ConversionSession;
use soap_tempconvert::config::LogFormat;
use soap_tempconvert::utils::logger;
use soap_tempconvert::{
    CliConfig, ConversionGateway, ConvertTemperatureOperation, SoapConversionClient,
    TemperaturePresenter,
};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.severity().exit_code());
        }
    };

    // 初始化日誌
    match config.logging.format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }
    tracing::info!("Starting tempconvert");
    tracing::debug!("Resolved config: {:?}", config);

    // 組裝 client -> gateway -> operation -> presenter
    let client = SoapConversionClient::new().timeout(config.transport.timeout());
    let operation = ConvertTemperatureOperation::new(ConversionGateway::new(client));
    let presenter = TemperaturePresenter::new(operation);
    let mut session = ConversionSession::new(&presenter, std::io::stdout(), config.display.json);

    let run = async {
        if cli.values.is_empty() {
            session.run_lines(BufReader::new(tokio::io::stdin())).await
        } else {
            session.run_values(&cli.values).await
        }
    };

    let outcome = tokio::select! {
        result = run => result,
        _ = tokio::signal::ctrl_c() => {
            presenter.close();
            tracing::warn!("Interrupted, pending conversion discarded");
            std::process::exit(130);
        }
    };

    match outcome {
        Ok(summary) if summary.failed == 0 => {
            tracing::info!(
                "✅ {} conversion(s) completed, {} skipped",
                summary.converted,
                summary.skipped
            );
        }
        Ok(summary) => {
            tracing::error!(
                "❌ {} conversion(s) failed (Worst severity: {:?})",
                summary.failed,
                summary.worst
            );
            std::process::exit(summary.exit_code());
        }
        Err(e) => {
            tracing::error!("❌ {} (Category: {:?})", e, e.category());
            tracing::error!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.severity().exit_code());
        }
    }

    Ok(())
}
