use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use commute_api::pricing::{CommuteOption, RoutesResponse};

#[derive(Parser)]
#[command(name = "commute-cli")]
#[command(about = "Command-line client for the commute options API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check server liveness
    Health,
    /// Price the commute between two places
    Routes {
        /// Origin place name
        #[arg(long)]
        from: String,
        /// Destination place name
        #[arg(long)]
        to: String,
        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Health => {
            let res = client.get(format!("{}/health", cli.url)).send().await?;
            print_json(res).await?;
        }
        Commands::Routes { from, to, json } => {
            let res = client
                .post(format!("{}/api/get-routes", cli.url))
                .json(&json!({ "fromLoc": from, "toLoc": to }))
                .send()
                .await?;
            if json || !res.status().is_success() {
                print_json(res).await?;
            } else {
                let body: RoutesResponse = res.json().await?;
                for option in &body.routes {
                    print_option(option);
                }
            }
        }
    }

    Ok(())
}

fn print_option(option: &CommuteOption) {
    println!("{:<12} {:>8}  {}", option.label, option.cost, option.duration);
    for step in &option.steps {
        let booking = if step.is_booking == Some(true) { "  [book]" } else { "" };
        println!("    {:>5}  {} ({}){}", step.time, step.text, step.sub, booking);
    }
}

async fn print_json(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
