//! Ordered collections of provider models.

use serde::Serialize;

use crate::models::{Face, FaceAlbum};

/// Detected or fetched faces, in provider order.
pub type FaceCollection = Collection<Face>;

/// Albums, in provider order.
pub type AlbumCollection = Collection<FaceAlbum>;

/// An ordered sequence of models. Insertion order is kept and nothing is deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Collection<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    /// Map every element through `f`, producing a collection of the same kind.
    pub fn transform<F>(self, f: F) -> Self
    where
        F: FnMut(T) -> T,
    {
        Self {
            items: self.items.into_iter().map(f).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl Collection<Face> {
    /// Projection of every face, see [`Face::to_value`].
    pub fn to_value(&self) -> serde_json::Value {
        self.items.iter().map(Face::to_value).collect()
    }
}

impl Collection<FaceAlbum> {
    /// Projection of every album, see [`FaceAlbum::to_value`].
    pub fn to_value(&self) -> serde_json::Value {
        self.items.iter().map(FaceAlbum::to_value).collect()
    }
}

impl<T> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FaceFields;
    use serde_json::json;

    fn face(id: &str) -> Face {
        Face::from_raw(json!({ "face_token": id })).map(FaceFields {
            id: Some(id.to_string()),
            ..FaceFields::default()
        })
    }

    #[test]
    fn test_keeps_order_and_duplicates() {
        let faces: FaceCollection = vec![face("b"), face("a"), face("b")].into_iter().collect();
        let ids: Vec<_> = faces.iter().filter_map(Face::id).collect();
        assert_eq!(ids, ["b", "a", "b"]);
    }

    #[test]
    fn test_transform_maps_every_element() {
        let faces = FaceCollection::new(vec![face("a"), face("b")]);
        let mapped = faces.transform(|f| {
            let id = f.id().map(|id| id.to_uppercase());
            f.map(FaceFields {
                id,
                ..FaceFields::default()
            })
        });
        assert_eq!(mapped.len(), 2);
        assert_eq!(mapped.first().and_then(Face::id), Some("A"));
        assert_eq!(mapped.get(1).and_then(Face::id), Some("B"));
    }

    #[test]
    fn test_empty_collection() {
        let albums = AlbumCollection::default();
        assert!(albums.is_empty());
        assert!(albums.first().is_none());
        assert_eq!(albums.to_value(), json!([]));
    }

    #[test]
    fn test_serializes_as_array() {
        let faces = FaceCollection::new(vec![face("a")]);
        let encoded = serde_json::to_value(&faces).unwrap();
        assert_eq!(encoded[0]["id"], "a");
        assert!(encoded[0]["user_id"].is_null());
    }
}
