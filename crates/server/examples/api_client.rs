//! Walk through the Folio Server API against a running instance.
//!
//! Start the server with a seeded catalog first:
//!
//! ```text
//! FOLIO_SERVER__CATALOG_PATH=seed.json cargo run -p folio-server
//! ```

use reqwest::Client;
use serde_json::{json, Value};

const SERVER_URL: &str = "http://localhost:8080";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = Client::new();
    let mut args = std::env::args().skip(1);
    let image_id = args
        .next()
        .unwrap_or_else(|| "000000000000000000000001".to_string());
    let other_id = args.next();

    println!("1. Health Check:");
    let resp = client.get(format!("{SERVER_URL}/health")).send().await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    println!("2. Readiness:");
    let resp = client.get(format!("{SERVER_URL}/ready")).send().await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    println!("3. Similar images (default limit):");
    let resp = client
        .get(format!("{SERVER_URL}/api/v1/images/{image_id}/similar"))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    let body: Value = resp.json().await?;
    println!("Body: {}", serde_json::to_string_pretty(&body)?);
    println!();

    println!("4. Similar images (limit=10):");
    let resp = client
        .get(format!("{SERVER_URL}/api/v1/images/{image_id}/similar"))
        .query(&[("limit", "10")])
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    if let Some(other_id) = other_id {
        println!("5. Compare two images:");
        let resp = client
            .post(format!("{SERVER_URL}/api/v1/compare"))
            .json(&json!({ "left_id": image_id, "right_id": other_id }))
            .send()
            .await?;
        println!("Status: {}", resp.status());
        println!("Body: {}", resp.text().await?);
        println!();
    }

    println!("6. Malformed id:");
    let resp = client
        .get(format!("{SERVER_URL}/api/v1/images/not-an-id/similar"))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);

    Ok(())
}
