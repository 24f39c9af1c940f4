use serde::Serialize;
use serde_json::Value;

/// A server-side album (faceset) of face tokens.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FaceAlbum {
    id: Option<String>,
    name: Option<String>,
    tags: Option<String>,
    faces: Vec<String>,
    #[serde(skip)]
    raw: Value,
}

/// Named fields a provider may assign when mapping a record into a [`FaceAlbum`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlbumFields {
    pub id: Option<String>,
    pub name: Option<String>,
    /// Provider-defined tag list, kept as the provider sends it
    pub tags: Option<String>,
    pub faces: Vec<String>,
}

impl FaceAlbum {
    pub fn from_raw(raw: Value) -> Self {
        Self {
            raw,
            ..Self::default()
        }
    }

    /// Assign the mapped fields. Name and tags of `""` or `"0"` are stored as absent.
    pub fn map(mut self, fields: AlbumFields) -> Self {
        self.id = fields.id;
        self.name = super::present(fields.name);
        self.tags = super::present(fields.tags);
        self.faces = fields.faces;
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn tags(&self) -> Option<&str> {
        self.tags.as_deref()
    }

    /// Face tokens in this album; empty when the provider sent none.
    pub fn faces(&self) -> &[String] {
        &self.faces
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "id": self.id,
            "name": self.name,
            "tags": self.tags,
            "faces": self.faces,
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.to_value())
    }
}
