//! Basic objmeta Example
//!
//! Decodes a typed record from labels and annotations, changes it, and
//! encodes it back.
//!
//! # Running the Example
//!
//! ```bash
//! RUST_LOG=objmeta=trace cargo run --example basic
//! ```
//!
//! # Configuration
//!
//! The prefix and commit strategy are read from `.objmeta.toml` or the
//! `OBJMETA_PREFIX` / `OBJMETA_COMMIT` environment variables:
//!
//! ```toml
//! [metadata]
//! prefix = "example.com"
//! commit = "atomic"
//! ```

use chrono::TimeDelta;
use objmeta::{Codec, CodecConfig, ObjectMeta, Record};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, Record)]
struct Deployment {
    #[meta(annotation = "owner")]
    owner: String,
    #[meta(label = "replicas")]
    replicas: u32,
    #[meta(label = "canary")]
    canary: bool,
    #[meta(annotation = "drain-timeout")]
    drain_timeout: TimeDelta,
    #[meta(annotation = "regions")]
    regions: Vec<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .init();

    println!("=== objmeta Basic Example ===\n");

    let mut config = CodecConfig::load()?;
    if config.prefix.is_empty() {
        config.prefix = "example.com".to_string();
    }
    println!("1. Codec configuration:");
    println!("   - Prefix: {}", config.prefix);
    println!("   - Commit: {}", config.commit);
    let codec = Codec::from(config);

    let prefix = codec.prefix().to_string();
    let meta = ObjectMeta::new()
        .with_annotation(format!("{prefix}/owner"), "platform-team")
        .with_annotation(format!("{prefix}/drain-timeout"), "1m30s")
        .with_annotation(format!("{prefix}/regions"), "eu-west-1,us-east-2")
        .with_label(format!("{prefix}/replicas"), "3")
        .with_label(format!("{prefix}/canary"), "false")
        .with_label("app", "web");

    println!("\n2. Decoding:");
    let mut deployment = Deployment::default();
    codec.decode(&meta, &mut deployment)?;
    println!("   {deployment:#?}");

    println!("\n3. Encoding after a scale-up:");
    deployment.replicas = 5;
    deployment.canary = true;
    deployment.regions.push("ap-south-1".to_string());

    let mut out = meta.clone();
    codec.encode(&deployment, &mut out)?;
    for (key, value) in out.labels.iter().flatten() {
        println!("   label      {key} = {value}");
    }
    for (key, value) in out.annotations.iter().flatten() {
        println!("   annotation {key} = {value}");
    }

    println!("\n4. Missing values are reported by key:");
    let broken = ObjectMeta::new().with_label(format!("{prefix}/replicas"), "3");
    if let Err(err) = codec.decode(&broken, &mut Deployment::default()) {
        println!("   Error: {err}");
    }

    Ok(())
}
