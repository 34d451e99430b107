use crate::config::AppConfig;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "tempconvert")]
#[command(about = "Convert Fahrenheit to Celsius through the public TempConvert SOAP service")]
#[command(allow_negative_numbers = true)]
pub struct CliConfig {
    /// Fahrenheit values; one per stdin line when omitted
    pub values: Vec<String>,

    #[arg(long, help = "TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Transport timeout in seconds")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Print each state as a JSON line")]
    pub json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// File settings first, command line flags on top.
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };
        if let Some(timeout) = self.timeout_seconds {
            config.transport.timeout_seconds = timeout;
        }
        if self.json {
            config.display.json = true;
        }
        config.validate()?;
        Ok(config)
    }
}
