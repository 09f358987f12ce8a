use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActionsManifest {
    pub schema_version: u32,
    pub generator_version: String,
    pub created_at: String,
    pub updated_at: String,
    pub generated_files: Vec<GeneratedFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedFile {
    /// Path relative to the generation root, `/`-separated
    pub path: String,
    pub hash: String,
    /// Variant the file belongs to, `None` for shared files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
}
