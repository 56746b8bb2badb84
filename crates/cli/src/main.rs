use std::io::{self, Write};

use clap::Parser;
use reqwest::Client;
use serde_json::Value;

use ventokv_common::{DEFAULT_HOST, DEFAULT_PORT};
use ventokv_protocol::{CommandRequest, tokenize};

#[derive(Parser, Debug)]
#[command(name = "ventokv-cli", about = "VentoKV CLI client")]
struct Args {
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,
    #[arg(long, short, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Comando para executar diretamente (modo não interativo)
    #[arg(trailing_var_arg = true)]
    command: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let url = format!("http://{}:{}/command", args.host, args.port);
    let client = Client::new();

    // Modo comando único (via argumentos)
    if !args.command.is_empty() {
        let line = join_args(&args.command);
        execute_request(&client, &url, &line).await?;
        return Ok(());
    }

    println!("Conectado a {}:{}", args.host, args.port);

    let stdin = io::stdin();
    let mut input = String::new();

    loop {
        print!("ventokv> ");
        io::stdout().flush()?;

        input.clear();
        if stdin.read_line(&mut input)? == 0 {
            break; // EOF
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }

        // Erros de aspas são pegos aqui, sem ida ao servidor
        if let Err(e) = tokenize(line) {
            println!("(error) {e}");
            continue;
        }

        if let Err(e) = execute_request(&client, &url, line).await {
            println!("(error) {e}");
        }
    }

    Ok(())
}

async fn execute_request(client: &Client, url: &str, line: &str) -> anyhow::Result<()> {
    let request = CommandRequest {
        command: line.to_string(),
    };
    let response = client.post(url).json(&request).send().await?;
    let body = response.json::<Value>().await?;
    println!("{}", format_response(&body));
    Ok(())
}

/// Reconstrói a linha a partir dos argumentos, re-aplicando aspas onde preciso.
fn join_args(args: &[String]) -> String {
    args.iter()
        .map(|a| {
            if a.is_empty() || a.chars().any(|c| c.is_whitespace() || c == '"' || c == '\'') {
                format!("\"{}\"", a.replace('\\', "\\\\").replace('"', "\\\""))
            } else {
                a.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Formata a resposta JSON para exibição humana.
fn format_response(body: &Value) -> String {
    if let Some(err) = body.get("error").and_then(Value::as_str) {
        return format!("(error) {err}");
    }
    if let Some(value) = body.get("value").and_then(Value::as_str) {
        return format!("\"{value}\"");
    }
    if let Some(n) = body.get("length").and_then(Value::as_u64) {
        return format!("(integer) {n}");
    }
    if let Some(status) = body.get("status").and_then(Value::as_str) {
        return status.to_string();
    }
    body.to_string()
}
