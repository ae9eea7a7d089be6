use anyhow::Result;
use clap::Parser;
use fxconv::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Amount to convert, denominated in the input currency
    #[arg(short, long, value_name = "AMOUNT")]
    amount: f64,

    /// Input currency (symbol or 3-letter ISO code)
    #[arg(short, long, value_name = "ISO_CODE|SYMBOL")]
    input_currency: String,

    /// Output currency (symbol or 3-letter ISO code); may be repeated.
    /// Converts to all known currencies when omitted
    #[arg(short, long, value_name = "ISO_CODE|SYMBOL")]
    output_currency: Vec<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long)]
    config_path: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let request = fxconv::ConvertRequest {
        amount: cli.amount,
        input_currency: cli.input_currency,
        output_currencies: cli.output_currency,
    };

    let result = fxconv::run(&request, cli.config_path.as_deref()).await;

    match result {
        Ok(report) => {
            println!("{report}");
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "Conversion failed");
            Err(e)
        }
    }
}
