use std::error::Error;
use std::net::{IpAddr, SocketAddr};

use chrono::Local;
use clap::{Parser, Subcommand};
use fna::api::{ReportArgs, build_inputs, build_report_response, run_http_server};
use fna::core::{SummaryDocument, run_projection};

#[derive(Parser, Debug)]
#[command(
    name = "fna",
    about = "Financial needs analysis: budget split, insurance gaps, education and retirement funds"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the JSON and summary-document API over HTTP
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
        #[arg(long, default_value = "0.0.0.0")]
        bind: IpAddr,
    },
    /// Compute one report and print it
    Report {
        #[command(flatten)]
        args: ReportArgs,
        #[arg(long, help = "Print the API response body instead of the summary document")]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        log::error!("{e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Command::Serve { port, bind } => {
            run_http_server(SocketAddr::new(bind, port)).await?;
        }
        Command::Report { args, json } => {
            let inputs = build_inputs(&args)?;
            let output = run_projection(&inputs)?;
            if json {
                let response = build_report_response(args.name, output);
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                let document =
                    SummaryDocument::new(&args.name, Local::now().date_naive(), &output.report);
                print!("{}", document.render());
            }
        }
    }
    Ok(())
}
