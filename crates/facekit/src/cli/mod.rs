//! Command handlers for the facekit CLI.

pub mod album;
pub mod config;
pub mod face;

use anyhow::Context;
use base64::Engine;
use clap::Subcommand;
use facekit_core::{Config, FaceProvider, Params};
use std::path::{Path, PathBuf};

/// Commands that talk to the face provider.
#[derive(Subcommand, Debug)]
pub enum ProviderCommand {
    /// Detect faces in an image (URL, base64 or local file)
    Detect(face::ImageArgs),

    /// Detect faces with attributes (gender, age, smile, ...)
    Attributes(face::ImageArgs),

    /// Show a single face by token
    Face(face::FaceArgs),

    /// Search an album for faces similar to the one in an image
    Search(face::SearchArgs),

    /// List albums, optionally one page at a time or filtered by tags
    Albums(album::ListArgs),

    /// Show a single album
    Album(album::AlbumArgs),

    /// Create an album
    CreateAlbum(album::CreateArgs),

    /// Rename or update an album
    UpdateAlbum(album::UpdateArgs),

    /// Delete an album
    RemoveAlbum(album::AlbumArgs),

    /// Add face tokens to an album
    AddFaces(album::FacesArgs),

    /// Remove face tokens from an album
    RemoveFaces(album::FacesArgs),

    /// Score whether two images show the same person
    Compare(face::CompareArgs),
}

/// Dispatch a provider command.
pub async fn run(provider: &dyn FaceProvider, command: ProviderCommand) -> anyhow::Result<()> {
    match command {
        ProviderCommand::Detect(args) => face::detect(provider, args).await,
        ProviderCommand::Attributes(args) => face::attributes(provider, args).await,
        ProviderCommand::Face(args) => face::show(provider, args).await,
        ProviderCommand::Search(args) => face::search(provider, args).await,
        ProviderCommand::Albums(args) => album::list(provider, args).await,
        ProviderCommand::Album(args) => album::show(provider, args).await,
        ProviderCommand::CreateAlbum(args) => album::create(provider, args).await,
        ProviderCommand::UpdateAlbum(args) => album::update(provider, args).await,
        ProviderCommand::RemoveAlbum(args) => album::remove(provider, args).await,
        ProviderCommand::AddFaces(args) => album::add_faces(provider, args).await,
        ProviderCommand::RemoveFaces(args) => album::remove_faces(provider, args).await,
        ProviderCommand::Compare(args) => face::compare(provider, args).await,
    }
}

/// Load the config from `path`, or from the default location.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load()?,
    };
    Ok(config)
}

/// Turn an image argument into what the provider expects.
///
/// A path to an existing local file (with `~` expanded) is read and sent as
/// base64; anything else (URLs, base64 strings) is passed through unchanged.
pub fn resolve_image(image: &str) -> anyhow::Result<String> {
    let path = PathBuf::from(shellexpand::tilde(image).into_owned());
    if !image.starts_with("http") && path.is_file() {
        let bytes = std::fs::read(&path)
            .with_context(|| format!("Failed to read image {}", path.display()))?;
        tracing::debug!("Encoding {} ({} bytes) as base64", path.display(), bytes.len());
        return Ok(base64::engine::general_purpose::STANDARD.encode(bytes));
    }
    Ok(image.to_string())
}

/// Parse a `key=value` pair for `--extra`.
pub fn parse_extra(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

pub fn extras(pairs: Vec<(String, String)>) -> Params {
    pairs.into_iter().collect()
}

/// Pretty-print a JSON value to stdout.
pub fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_extra() {
        assert_eq!(
            parse_extra("return_result_count=3").unwrap(),
            ("return_result_count".to_string(), "3".to_string())
        );
        assert_eq!(parse_extra("tags=a=b").unwrap().1, "a=b");
        assert!(parse_extra("novalue").is_err());
        assert!(parse_extra("=x").is_err());
    }

    #[test]
    fn test_resolve_image_passes_through_urls_and_base64() {
        assert_eq!(
            resolve_image("https://example.com/me.jpg").unwrap(),
            "https://example.com/me.jpg"
        );
        assert_eq!(resolve_image("aGVsbG8=").unwrap(), "aGVsbG8=");
    }

    #[test]
    fn test_resolve_image_encodes_local_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"hello").unwrap();
        let encoded = resolve_image(file.path().to_str().unwrap()).unwrap();
        assert_eq!(encoded, "aGVsbG8=");
    }

    #[test]
    fn test_load_config_from_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[providers.face_plus_plus]\napi_key = \"k\"\napi_secret = \"s\"").unwrap();
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.default_provider, "face_plus_plus");
    }
}
