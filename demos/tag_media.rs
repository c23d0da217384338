//! Fetches recent media for a tag and walks a few pages.
//!
//! Run with: `INSTAGRAM_ACCESS_TOKEN=... cargo run --example tag_media -- nature`

use instagram_client::{Client, Error, Parameters};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("instagram_client=debug,tag_media=info")
        .init();

    let tag = std::env::args().nth(1).unwrap_or_else(|| "nature".to_string());
    let token = std::env::var("INSTAGRAM_ACCESS_TOKEN").unwrap_or_default();

    let client = Client::builder().access_token(token).build()?;

    let tag_info = client.tags().get(&tag).await?;
    println!("#{} has {} posts", tag_info.name, tag_info.media_count);

    let mut params = Parameters::new().count(10);
    for page in 1..=3 {
        let (media, pagination) = client.tags().recent_media(&tag, Some(&params)).await?;
        println!("Page {}: {} posts", page, media.len());
        for item in &media {
            println!("  {} {} ({} likes)", item.kind, item.link, item.likes.count);
        }

        if pagination.next_max_id.is_empty() {
            break;
        }
        params = params.max_id(pagination.next_max_id);
    }

    Ok(())
}
