use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "address-cli")]
#[command(about = "Command-line client for the address service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[arg(short, long, env = "API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the service accepts the token
    Ping,
    /// List every stored address
    List,
    /// Create an address
    Create {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        address1: String,
        #[arg(long)]
        address2: Option<String>,
        #[arg(long)]
        city: String,
        #[arg(long)]
        state: String,
        #[arg(long)]
        zip: String,
    },
    /// Delete an address by id
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let mut headers = HeaderMap::new();
    if let Some(token) = &cli.token {
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token))?,
        );
    }

    let res = match cli.command {
        Commands::Ping => client.get(format!("{}/", base)).headers(headers).send().await?,
        Commands::List => client.get(format!("{}/address", base)).send().await?,
        Commands::Create {
            first_name,
            last_name,
            address1,
            address2,
            city,
            state,
            zip,
        } => {
            let body = json!({
                "firstName": first_name,
                "lastName": last_name,
                "address1": address1,
                "address2": address2,
                "city": city,
                "state": state,
                "zip": zip,
            });
            client
                .post(format!("{}/address", base))
                .headers(headers)
                .json(&body)
                .send()
                .await?
        }
        Commands::Delete { id } => {
            client
                .delete(format!("{}/address/{}", base, id))
                .headers(headers)
                .send()
                .await?
        }
    };

    if !print_response(res).await? {
        std::process::exit(1);
    }
    Ok(())
}

/// Print a response body; returns whether the status was a success.
async fn print_response(res: reqwest::Response) -> Result<bool, Box<dyn std::error::Error>> {
    let status = res.status();
    let location = res
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let is_json = res
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("application/json"))
        .unwrap_or(false);
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if !text.is_empty() {
            eprintln!("Response: {}", text);
        }
        return Ok(false);
    }

    if let Some(location) = location {
        println!("Location: {}", location);
    }
    if is_json {
        let json: Value = serde_json::from_str(&text)?;
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else if !text.is_empty() {
        println!("{}", text);
    } else {
        println!("{}", status);
    }
    Ok(true)
}
