use crate::utils::error::Result;
use std::sync::Arc;

pub const DOCUMENT_PREVIEW_CLASS: &str = "document-preview";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size,
        }
    }
}

/// Browser `FileReader`.
pub trait FileReader: Send + Sync {
    fn read_as_data_url(&self, file: &SelectedFile) -> Result<String>;
}

/// `#photo-preview` image
pub trait PhotoPreview: Send + Sync {
    fn set_source(&self, src: &str);
    fn show(&self);
}

/// `#photo` input together with its `#photo-preview`; wired only when both exist.
#[derive(Clone)]
pub struct PhotoInput {
    pub reader: Arc<dyn FileReader>,
    pub preview: Arc<dyn PhotoPreview>,
}

impl PhotoInput {
    pub fn on_selected(&self, files: &[SelectedFile]) -> Result<bool> {
        on_photo_selected(files, &*self.reader, &*self.preview)
    }
}

/// `#photo` 選擇檔案後顯示預覽；只看第一個檔案
pub fn on_photo_selected<R, P>(files: &[SelectedFile], reader: &R, preview: &P) -> Result<bool>
where
    R: FileReader + ?Sized,
    P: PhotoPreview + ?Sized,
{
    let Some(file) = files.first() else {
        return Ok(false);
    };

    let data_url = reader.read_as_data_url(file)?;
    preview.set_source(&data_url);
    preview.show();
    tracing::debug!("🖼️ Previewing photo '{}' ({} bytes)", file.name, file.size);
    Ok(true)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPreview {
    pub class_name: &'static str,
    pub label: String,
}

/// `#document-previews` container
pub trait PreviewContainer: Send + Sync {
    fn clear(&self);
    fn append(&self, preview: DocumentPreview);
}

pub fn document_previews(files: &[SelectedFile]) -> Vec<DocumentPreview> {
    files
        .iter()
        .map(|file| DocumentPreview {
            class_name: DOCUMENT_PREVIEW_CLASS,
            label: file.name.clone(),
        })
        .collect()
}

/// 重建文件清單，依選取順序
pub fn on_documents_selected<C: PreviewContainer + ?Sized>(files: &[SelectedFile], container: &C) {
    container.clear();
    for preview in document_previews(files) {
        container.append(preview);
    }
}
