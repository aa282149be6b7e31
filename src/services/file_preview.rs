//! Temporary references for previewing uploaded files

use crate::model::FileHandle;

/// Produces something a renderer can display for a file handle
pub trait FilePreview {
    fn preview_url(&self, file: &FileHandle) -> String;
}

/// Hands out `blob:` style references, fresh on every call
#[derive(Debug, Clone)]
pub struct BlobUrlPreview {
    origin: String,
}

impl BlobUrlPreview {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
        }
    }
}

impl Default for BlobUrlPreview {
    fn default() -> Self {
        Self::new("dynform")
    }
}

impl FilePreview for BlobUrlPreview {
    fn preview_url(&self, _file: &FileHandle) -> String {
        format!("blob:{}/{}", self.origin, uuid::Uuid::new_v4())
    }
}
