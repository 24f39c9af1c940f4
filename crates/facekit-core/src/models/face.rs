use serde::Serialize;
use serde_json::Value;

/// A face detected by a provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Face {
    id: Option<String>,
    attributes: Option<Value>,
    reference: Option<Value>,
    user_id: Option<String>,
    #[serde(skip)]
    raw: Value,
}

/// Named fields a provider may assign when mapping a record into a [`Face`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceFields {
    /// Face token
    pub id: Option<String>,
    /// Opaque trait name -> value mapping
    pub attributes: Option<Value>,
    /// Bounding box / position descriptor
    pub reference: Option<Value>,
    /// Caller-assigned user identifier
    pub user_id: Option<String>,
}

impl Face {
    /// An unmapped face that only carries its provider record.
    pub fn from_raw(raw: Value) -> Self {
        Self {
            raw,
            ..Self::default()
        }
    }

    /// Assign the mapped fields. A user id of `""` or `"0"` is stored as absent.
    pub fn map(mut self, fields: FaceFields) -> Self {
        self.id = fields.id;
        self.attributes = fields.attributes;
        self.reference = fields.reference;
        self.user_id = super::present(fields.user_id);
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn attributes(&self) -> Option<&Value> {
        self.attributes.as_ref()
    }

    pub fn reference(&self) -> Option<&Value> {
        self.reference.as_ref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// The provider record this face was built from.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Projection with `id`, `attributes`, `reference` and `user_id` always present.
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "id": self.id,
            "attributes": self.attributes,
            "reference": self.reference,
            "user_id": self.user_id,
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.to_value())
    }
}
