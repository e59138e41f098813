//! Serialized document schema.
//!
//! A document is `{"version", "objects": [...], "background"?, "clipPath"?}`
//! where `objects` is the back-to-front object list. The page rectangle is one
//! of those objects, tagged with `"name": "workspace"`.

use crate::model::SceneObject;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Schema version written into every document.
pub const SCHEMA_VERSION: &str = "6.0.0";

/// Every key an object may carry in a serialized document. The serializer
/// drops anything else.
pub const PERSISTED_KEYS: &[&str] = &[
    // common
    "type",
    "name",
    "left",
    "top",
    "scaleX",
    "scaleY",
    "angle",
    "fill",
    "stroke",
    "strokeWidth",
    "strokeDashArray",
    "opacity",
    "selectable",
    "hasControls",
    "shadow",
    // geometry
    "width",
    "height",
    "rx",
    "ry",
    "radius",
    "points",
    "path",
    // text
    "text",
    "fontFamily",
    "fontSize",
    "fontWeight",
    "fontStyle",
    "underline",
    "linethrough",
    "textAlign",
    // image
    "src",
    "filters",
];

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid document JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("document has no workspace")]
    MissingWorkspace,
    #[error("document has {0} workspaces, expected exactly one")]
    MultipleWorkspaces(usize),
}

/// The serialized scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDocument {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub objects: Vec<SceneObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip_path: Option<SceneObject>,
}

fn default_version() -> String {
    SCHEMA_VERSION.to_string()
}

impl SceneDocument {
    pub fn new(objects: Vec<SceneObject>) -> Self {
        Self {
            version: default_version(),
            objects,
            background: None,
            clip_path: None,
        }
    }

    /// Parse and validate: the object list must hold exactly one workspace.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let doc: SceneDocument = serde_json::from_str(json)?;
        match doc.objects.iter().filter(|o| o.is_workspace()).count() {
            0 => Err(DocumentError::MissingWorkspace),
            1 => Ok(doc),
            n => Err(DocumentError::MultipleWorkspaces(n)),
        }
    }

    /// The document as a JSON value, objects restricted to
    /// [`PERSISTED_KEYS`].
    pub fn to_value(&self) -> Result<Value, DocumentError> {
        let mut value = serde_json::to_value(self)?;
        if let Some(objects) = value.get_mut("objects").and_then(Value::as_array_mut) {
            objects.iter_mut().for_each(retain_persisted);
        }
        if let Some(clip) = value.get_mut("clipPath") {
            retain_persisted(clip);
        }
        Ok(value)
    }

    /// Compact JSON, used for history snapshots and persistence.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string(&self.to_value()?)?)
    }

    /// Tab-indented JSON, used for file exports.
    pub fn to_pretty_json(&self) -> Result<String, DocumentError> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.to_value()?.serialize(&mut ser)?;
        // serde_json only ever writes UTF-8.
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    pub fn workspace(&self) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.is_workspace())
    }
}

fn retain_persisted(object: &mut Value) {
    if let Some(fields) = object.as_object_mut() {
        fields.retain(|key, _| PERSISTED_KEYS.contains(&key.as_str()));
    }
}

/// A persisted document as the backend stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub name: String,
    pub json: String,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Document {
    /// Parse the stored scene.
    pub fn scene(&self) -> Result<SceneDocument, DocumentError> {
        SceneDocument::from_json(&self.json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Shape;
    use pretty_assertions::assert_eq;

    const MINIMAL: &str = r#"{
        "version": "6.0.0",
        "objects": [
            {"type":"rect","name":"workspace","width":900,"height":1200,"fill":"white","selectable":false,"hasControls":false},
            {"type":"circle","radius":10,"left":5,"top":5,"fill":"red"}
        ]
    }"#;

    #[test]
    fn parse_valid_document() {
        let doc = SceneDocument::from_json(MINIMAL).unwrap();
        assert_eq!(doc.objects.len(), 2);
        let ws = doc.workspace().unwrap();
        assert_eq!(ws.shape.size().width, 900.0);
        assert!(matches!(doc.objects[1].shape, Shape::Circle { .. }));
    }

    #[test]
    fn reject_missing_workspace() {
        let json = r#"{"objects":[{"type":"circle","radius":1}]}"#;
        assert!(matches!(
            SceneDocument::from_json(json),
            Err(DocumentError::MissingWorkspace)
        ));
    }

    #[test]
    fn reject_two_workspaces() {
        let json = r#"{"objects":[
            {"type":"rect","name":"workspace","width":1,"height":1},
            {"type":"rect","name":"workspace","width":1,"height":1}
        ]}"#;
        assert!(matches!(
            SceneDocument::from_json(json),
            Err(DocumentError::MultipleWorkspaces(2))
        ));
    }

    #[test]
    fn reject_garbage() {
        assert!(matches!(
            SceneDocument::from_json("not json"),
            Err(DocumentError::Parse(_))
        ));
    }

    #[test]
    fn only_persisted_keys_are_written() {
        let doc = SceneDocument::from_json(MINIMAL).unwrap();
        let value: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
        for obj in value["objects"].as_array().unwrap() {
            for key in obj.as_object().unwrap().keys() {
                assert!(PERSISTED_KEYS.contains(&key.as_str()), "unexpected key {key}");
            }
        }
    }

    #[test]
    fn unknown_keys_are_dropped() {
        let mut object = serde_json::json!({"type": "rect", "width": 4, "id": "rect_1"});
        retain_persisted(&mut object);
        assert_eq!(object, serde_json::json!({"type": "rect", "width": 4}));
    }

    #[test]
    fn pretty_json_uses_tabs() {
        let doc = SceneDocument::from_json(MINIMAL).unwrap();
        let pretty = doc.to_pretty_json().unwrap();
        assert!(pretty.contains("\n\t\"version\""));
    }
}
