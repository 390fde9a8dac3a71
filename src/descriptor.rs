//! Static capability descriptor.
//!
//! Describes the render as a node for workflow hosts: its name, the inputs
//! it takes with their defaults and bounds, and the single image it returns.
//! Nothing in the render path reads it; `contact-sheet describe` prints it
//! as JSON.

use serde::Serialize;

/// Value type of an input or output socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SocketType {
    String,
    Int,
    Boolean,
    Image,
}

/// Default value of an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Str(&'static str),
    Int(i64),
    Bool(bool),
}

/// One input parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InputSpec {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: SocketType,
    pub default: DefaultValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<i64>,
}

impl InputSpec {
    const fn text(name: &'static str, default: &'static str) -> Self {
        Self {
            name,
            kind: SocketType::String,
            default: DefaultValue::Str(default),
            min: None,
            max: None,
            step: None,
        }
    }
}

/// One output of the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OutputSpec {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: SocketType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapabilityDescriptor {
    pub name: &'static str,
    pub display_name: &'static str,
    pub category: &'static str,
    pub function: &'static str,
    pub inputs: &'static [InputSpec],
    pub outputs: &'static [OutputSpec],
}

pub const DESCRIPTOR: CapabilityDescriptor = CapabilityDescriptor {
    name: "FolderImagesPreview",
    display_name: "Folder Images Preview",
    category: "Folder Images Preview",
    function: "generate_preview",
    inputs: &[
        InputSpec::text("folder_path", ""),
        InputSpec {
            name: "images_per_row",
            kind: SocketType::Int,
            default: DefaultValue::Int(5),
            min: Some(1),
            max: Some(20),
            step: Some(1),
        },
        InputSpec {
            name: "include_subfolders",
            kind: SocketType::Boolean,
            default: DefaultValue::Bool(false),
            min: None,
            max: None,
            step: None,
        },
        InputSpec::text("background_color", "#FFFFFF"),
        InputSpec::text("text_color", "#000000"),
    ],
    outputs: &[OutputSpec {
        name: "image",
        kind: SocketType::Image,
    }],
};

/// Pretty-printed JSON of [`DESCRIPTOR`].
pub fn descriptor_json() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&DESCRIPTOR)
}
