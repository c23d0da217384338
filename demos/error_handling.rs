//! Shows how the different error kinds surface.
//!
//! This example shows how to:
//! - Tell classified API errors apart from transport failures
//! - Read the rate limit snapshot off a successful response
//! - Inspect errors carried inside the `meta` object
//!
//! Run with: `cargo run --example error_handling`

use instagram_client::{Client, Error, User};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("instagram_client=info")
        .init();

    // No access token: Instagram answers with an OAuth error.
    let client = Client::new()?;

    println!("=== Example 1: Classified API errors ===");
    match client.get::<User>("users/self").await {
        Ok(response) => {
            println!("Unexpected success: {:?}", response.data());
            if let Some(error) = response.error() {
                println!("  ...but meta reports: {}", error);
            }
            match response.rate_limit() {
                Ok(rate_limit) => println!(
                    "  Quota: {}/{} remaining",
                    rate_limit.remaining, rate_limit.limit
                ),
                Err(e) => println!("  No quota headers: {}", e),
            }
        }
        Err(Error::Upstream { status, error }) => {
            println!("Instagram rejected the call");
            println!("  HTTP status: {}", status);
            println!("  Error type: {}", error.error_type);
            println!("  Code: {}", error.code);
            println!("  Message: {}", error.error_message);
        }
        Err(e) => println!("Other error: {}", e),
    }
    println!();

    println!("=== Example 2: Transport failures ===");
    let unreachable = Client::builder()
        .base_url("http://127.0.0.1:9/v1/")?
        .build()?;
    match unreachable.get::<User>("users/self").await {
        Err(Error::Transport(e)) => println!("Network error: {}", e),
        other => println!("Unexpected result: {:?}", other.map(|r| r.status)),
    }
    println!();

    println!("=== Example 3: Malformed paths ===");
    match client.new_request(http::Method::GET, "http://[::1", None) {
        Err(Error::MalformedUrl(e)) => println!("Rejected before sending: {}", e),
        other => println!("Unexpected result: {:?}", other.map(|r| r.url().clone())),
    }

    Ok(())
}
