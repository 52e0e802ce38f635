use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tp_sensor::{
    AcquisitionSource, JsonLinesReporter, LineSource, Reporter, Scheduler, SensorConfig,
    SystemTimer, TextReporter,
};

#[derive(Parser)]
#[command(name = "tp-cli")]
#[command(about = "ThermoProbe - Grove NTC thermistor bench monitor", long_about = None)]
struct Cli {
    /// Device or file streaming one raw digitizer code per line ("-" for stdin)
    input: Option<PathBuf>,
    /// Emit JSON lines instead of status text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Failed to open input: {path}")]
    OpenInput {
        path: PathBuf,
        source: io::Error,
    },

    #[error("Invalid sensor constants: {0}")]
    Model(#[from] tp_core::TpError),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    // Logs on stderr; stdout carries only report lines
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();

    let source = open_source(cli.input)?;
    let reporter: Box<dyn Reporter> = if cli.json {
        Box::new(JsonLinesReporter::new(io::stdout()))
    } else {
        Box::new(TextReporter::new(io::stdout()))
    };
    let model = SensorConfig::GROVE_V1_2.thermistor()?;

    Scheduler::new(source, reporter, SystemTimer)
        .with_model(model)
        .run_forever()
}

fn open_source(input: Option<PathBuf>) -> CliResult<Box<dyn AcquisitionSource>> {
    match input {
        Some(path) if path.as_os_str() != "-" => {
            let file = File::open(&path).map_err(|source| CliError::OpenInput {
                path: path.clone(),
                source,
            })?;
            tracing::info!(input = %path.display(), "reading raw samples");
            Ok(Box::new(LineSource::new(BufReader::new(file))))
        }
        _ => {
            tracing::info!(input = "stdin", "reading raw samples");
            Ok(Box::new(LineSource::new(io::stdin().lock())))
        }
    }
}
