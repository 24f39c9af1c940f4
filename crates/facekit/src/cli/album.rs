//! Album commands.

use clap::Args;
use facekit_core::{AlbumPage, FaceProvider, Outcome};
use serde_json::json;

use super::{extras, parse_extra, print_json};

/// Arguments for commands that address one album.
#[derive(Args, Debug)]
pub struct AlbumArgs {
    /// Album id (faceset token)
    pub album_id: String,
}

/// Arguments for the `albums` command.
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// 1-based offset of the first album to list
    #[arg(long)]
    pub start: Option<u32>,

    /// Only albums carrying these comma-separated tags
    #[arg(long)]
    pub tags: Option<String>,
}

impl ListArgs {
    /// The page to request, or `None` for the provider's default listing.
    fn page(&self) -> Option<AlbumPage> {
        if self.start.is_none() && self.tags.is_none() {
            return None;
        }
        let page = AlbumPage::starting_at(self.start.unwrap_or(1));
        Some(match &self.tags {
            Some(tags) => page.tagged(tags.as_str()),
            None => page,
        })
    }
}

/// Arguments for the `create-album` command.
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Album display name
    pub name: String,

    /// Face tokens to seed the album with (repeatable)
    #[arg(long = "face", value_name = "FACE_TOKEN")]
    pub faces: Vec<String>,

    /// Extra provider parameters (repeatable)
    #[arg(long = "extra", value_name = "KEY=VALUE", value_parser = parse_extra)]
    pub extras: Vec<(String, String)>,
}

/// Arguments for the `update-album` command.
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Album id (faceset token)
    pub album_id: String,

    /// New display name
    pub name: String,

    /// Extra provider parameters (repeatable)
    #[arg(long = "extra", value_name = "KEY=VALUE", value_parser = parse_extra)]
    pub extras: Vec<(String, String)>,
}

/// Arguments for adding or removing faces.
#[derive(Args, Debug)]
pub struct FacesArgs {
    /// Album id (faceset token)
    pub album_id: String,

    /// Face tokens
    #[arg(required = true)]
    pub faces: Vec<String>,
}

pub async fn list(provider: &dyn FaceProvider, args: ListArgs) -> anyhow::Result<()> {
    let albums = match args.page() {
        Some(page) => provider.albums_page(&page).await?,
        None => provider.albums().await?,
    };
    print_json(&albums.to_value())
}

pub async fn show(provider: &dyn FaceProvider, args: AlbumArgs) -> anyhow::Result<()> {
    let album = provider.album(&args.album_id).await?;
    print_json(&album.to_value())
}

pub async fn create(provider: &dyn FaceProvider, args: CreateArgs) -> anyhow::Result<()> {
    match provider
        .create_album(&args.name, &args.faces, &extras(args.extras))
        .await?
    {
        Some(album) => print_json(&album.to_value()),
        None => anyhow::bail!("Provider did not create album '{}'", args.name),
    }
}

pub async fn update(provider: &dyn FaceProvider, args: UpdateArgs) -> anyhow::Result<()> {
    let album = provider
        .update_album(&args.album_id, &args.name, &extras(args.extras))
        .await?;
    print_json(&album.to_value())
}

pub async fn remove(provider: &dyn FaceProvider, args: AlbumArgs) -> anyhow::Result<()> {
    let outcome = provider.remove_album(&args.album_id).await?;
    report(outcome)
}

pub async fn add_faces(provider: &dyn FaceProvider, args: FacesArgs) -> anyhow::Result<()> {
    let outcome = provider
        .add_into_album(&args.album_id, args.faces.into())
        .await?;
    report(outcome)
}

pub async fn remove_faces(provider: &dyn FaceProvider, args: FacesArgs) -> anyhow::Result<()> {
    let outcome = provider
        .remove_face_from_album(&args.album_id, args.faces.into())
        .await?;
    report(outcome)
}

/// Print an outcome; a rejection is a non-zero exit.
fn report(outcome: Outcome) -> anyhow::Result<()> {
    match outcome {
        Outcome::Applied => print_json(&json!({ "ok": true })),
        Outcome::Rejected(rejection) => {
            print_json(&json!({
                "ok": false,
                "status": rejection.status,
                "message": rejection.message,
            }))?;
            anyhow::bail!("Provider rejected the request: {}", rejection.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_without_flags_uses_default_listing() {
        assert_eq!(ListArgs::default().page(), None);
    }

    #[test]
    fn test_list_flags_build_page() {
        let args = ListArgs {
            start: Some(5),
            tags: None,
        };
        assert_eq!(args.page(), Some(AlbumPage::starting_at(5)));

        let args = ListArgs {
            start: None,
            tags: Some("team".to_string()),
        };
        let page = args.page().unwrap();
        assert_eq!(page.start, 1);
        assert_eq!(page.tags.as_deref(), Some("team"));
    }
}
