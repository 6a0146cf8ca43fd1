//! Fetch a URL and print the status line and body.
//!
//! Run with: cargo run --example fetch -- <url> [--insecure] [--accept <type>]

use anyhow::{bail, Context};
use simple_rest_client::{ClientConfig, RestClient};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let mut url = None;
    let mut accept = None;
    let mut insecure = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--insecure" => insecure = true,
            "--accept" => accept = Some(args.next().context("--accept needs a value")?),
            _ if url.is_none() => url = Some(arg),
            other => bail!("unexpected argument: {}", other),
        }
    }
    let url = url.context("usage: fetch <url> [--insecure] [--accept <type>]")?;

    let config = if insecure {
        ClientConfig::insecure()
    } else {
        ClientConfig::default()
    };
    let client = RestClient::with_config(config)?;

    let mut request = client.request_to(&url)?;
    if let Some(accept) = accept {
        request = request.accept(accept);
    }

    let response = request.get()?;
    println!("{} {}", response.status_code(), response.message());
    println!("Content-Type: {}", response.content_type());

    let status = response.status_code();
    let body = response
        .as_string(&[status])
        .with_context(|| format!("reading body of {}", url))?;
    println!();
    println!("{}", body);
    Ok(())
}
