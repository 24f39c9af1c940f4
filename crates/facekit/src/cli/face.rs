//! Face commands: detect, attributes, face, search, compare.

use clap::Args;
use facekit_core::FaceProvider;

use super::{extras, parse_extra, print_json, resolve_image};

/// Arguments for commands that take a single image.
#[derive(Args, Debug)]
pub struct ImageArgs {
    /// Image URL, base64 string or local file path
    pub image: String,
}

/// Arguments for the `face` command.
#[derive(Args, Debug)]
pub struct FaceArgs {
    /// Face token
    pub face_id: String,
}

/// Arguments for the `search` command.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Image URL, base64 string or local file path
    pub image: String,

    /// Album to search in
    #[arg(long)]
    pub album: String,

    /// Extra provider parameters (repeatable)
    #[arg(long = "extra", value_name = "KEY=VALUE", value_parser = parse_extra)]
    pub extras: Vec<(String, String)>,
}

/// Arguments for the `compare` command.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// First image (URL, base64 string or local file path)
    pub first: String,

    /// Second image (URL, base64 string or local file path)
    pub second: String,
}

pub async fn detect(provider: &dyn FaceProvider, args: ImageArgs) -> anyhow::Result<()> {
    let faces = provider.detect(&resolve_image(&args.image)?).await?;
    tracing::info!("Detected {} face(s)", faces.len());
    print_json(&faces.to_value())
}

pub async fn attributes(provider: &dyn FaceProvider, args: ImageArgs) -> anyhow::Result<()> {
    let faces = provider.attributes(&resolve_image(&args.image)?).await?;
    print_json(&faces.to_value())
}

pub async fn show(provider: &dyn FaceProvider, args: FaceArgs) -> anyhow::Result<()> {
    let face = provider.get_face(&args.face_id).await?;
    print_json(&face.to_value())
}

pub async fn search(provider: &dyn FaceProvider, args: SearchArgs) -> anyhow::Result<()> {
    let image = resolve_image(&args.image)?;
    let result = provider
        .search(&image, Some(args.album.as_str()), &extras(args.extras))
        .await?;
    tracing::info!("{} match(es) in album {}", result.total(), args.album);
    print_json(&result.to_value())
}

pub async fn compare(provider: &dyn FaceProvider, args: CompareArgs) -> anyhow::Result<()> {
    let first = resolve_image(&args.first)?;
    let second = resolve_image(&args.second)?;
    let comparison = provider.compare(&first, &second).await?;
    match comparison.confidence() {
        Some(confidence) => tracing::info!("Confidence {confidence:.2}"),
        None => tracing::warn!("No face found in at least one image"),
    }
    print_json(&comparison.to_value())
}
