//! Analyze Example
//!
//! Scores the text given on the command line against a handful of attributes
//! and prints every score and flagged span.
//!
//! Run with:
//! ```bash
//! export PERSPECTIVE_API_KEY="your-api-key"
//! RUST_LOG=perspective_client=debug cargo run --example analyze -- "you are a fool"
//! ```

use perspective_client::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let text = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let text = if text.is_empty() {
        "What kind of idiot name is foo?".to_string()
    } else {
        text
    };

    // The key comes from PERSPECTIVE_API_KEY.
    let client = PerspectiveClient::builder().http_debug(true).build()?;

    let attributes = [
        Attribute::Toxicity,
        Attribute::Insult,
        Attribute::Profanity,
        Attribute::Threat,
    ];
    let options = AnalyzeOptions::new().span_annotations(true);
    let result = client.analyze(&text, &attributes, Some(options)).await?;

    println!("{result}");
    for (name, score) in result.scores() {
        if score.is_nan() {
            println!("  {name:<20} n/a");
        } else {
            println!("  {name:<20} {score:.3}");
        }
    }
    for span in result.span_annotations() {
        match span.fragment(&text) {
            Some(fragment) => println!("  {span} {fragment:?}"),
            None => println!("  {span} (out of range)"),
        }
    }
    if result.is_toxic(0.8) {
        println!("flagged as toxic");
    }
    Ok(())
}
