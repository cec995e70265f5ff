use clap::{Parser, Subcommand};
use serde_json::Value;

use spa_shell::config::RouterConfig;
use spa_shell::routing::{Mode, Resolution, RouteParams, Router};

#[derive(Parser)]
#[command(name = "shell-cli")]
#[command(about = "Inspect the application routes and a running shell server", long_about = None)]
struct Cli {
    /// Shell server used by `ping` and `routes`.
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// API prefix of the shell server.
    #[arg(long, default_value = "/api")]
    api_prefix: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a location against the compiled-in route table
    Resolve {
        location: String,
        #[arg(long, default_value = "history")]
        mode: Mode,
        #[arg(long, default_value = "/")]
        base: String,
    },
    /// Print the href of a named route
    Href {
        name: String,
        /// Route parameter as key=value (repeatable)
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
        #[arg(long, default_value = "history")]
        mode: Mode,
        #[arg(long, default_value = "/")]
        base: String,
    },
    /// Check that the shell server answers
    Ping,
    /// List the routes a running shell server knows
    Routes,
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))
}

fn router(mode: Mode, base: String) -> Result<Router, Box<dyn std::error::Error>> {
    Ok(Router::with_builtin_routes(&RouterConfig { mode, base })?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Resolve { location, mode, base } => {
            let router = router(mode, base)?;
            match router.resolve(&location) {
                Resolution::Matched(m) => {
                    println!("{} -> {} ({})", m.key, m.route.name(), m.route.component());
                }
                Resolution::NotFound => {
                    println!("{} -> not found", location);
                    std::process::exit(1);
                }
            }
        }
        Commands::Href { name, params, mode, base } => {
            let router = router(mode, base)?;
            let params: RouteParams = params.into_iter().collect();
            println!("{}", router.href_for(&name, &params)?);
        }
        Commands::Ping => {
            let res = client
                .get(format!("{}{}/ping", cli.url, cli.api_prefix))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Routes => {
            let res = client
                .get(format!("{}{}/routes", cli.url, cli.api_prefix))
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: shell server returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
