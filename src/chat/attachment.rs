//! Turning a local file into a message attachment

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PortalError;
use crate::models::Attachment;

/// A file picked by the user, before it becomes an [`Attachment`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    pub name: String,
    pub media_type: String,
    pub size_bytes: u64,
    pub path: PathBuf,
}

impl FileSource {
    /// Inspect a file on disk
    ///
    /// The media type is guessed from the extension; the size comes from the
    /// file's metadata. Directories are rejected.
    pub fn from_path(path: &Path) -> Result<Self, PortalError> {
        let io_err = |source| PortalError::Attachment {
            path: path.to_path_buf(),
            source,
        };

        let path = fs::canonicalize(path).map_err(io_err)?;
        let metadata = fs::metadata(&path).map_err(io_err)?;
        if !metadata.is_file() {
            return Err(io_err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "not a regular file",
            )));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            name,
            media_type: media_type_for(&path).to_string(),
            size_bytes: metadata.len(),
            path,
        })
    }
}

/// Build the attachment for `file`
///
/// `image/*` media types become images, everything else a document.
pub fn attach(file: &FileSource) -> Attachment {
    let name = file.name.clone();
    let source = format!("file://{}", file.path.display());
    let size_label = Some(size_label(file.size_bytes));

    if file.media_type.starts_with("image/") {
        Attachment::Image {
            name,
            source,
            size_label,
        }
    } else {
        Attachment::Document {
            name,
            source,
            size_label,
        }
    }
}

/// Binary megabytes with two decimals, e.g. "1.50 MB"
pub fn size_label(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

pub fn media_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("xls") => "application/vnd.ms-excel",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("ppt") => "application/vnd.ms-powerpoint",
        Some("pptx") => {
            "application/vnd.openxmlformats-officedocument.presentationml.presentation"
        }
        Some("txt") => "text/plain",
        Some("csv") => "text/csv",
        Some("zip") => "application/zip",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttachmentKind;

    fn file(name: &str, media_type: &str, size_bytes: u64) -> FileSource {
        FileSource {
            name: name.to_string(),
            media_type: media_type.to_string(),
            size_bytes,
            path: PathBuf::from("/home/ana").join(name),
        }
    }

    #[test]
    fn test_classification_by_media_type() {
        let image = attach(&file("foto.png", "image/png", 2048));
        assert_eq!(image.kind(), AttachmentKind::Image);

        let pdf = attach(&file("plano.pdf", "application/pdf", 2048));
        assert_eq!(pdf.kind(), AttachmentKind::Document);
        assert_eq!(pdf.source(), "file:///home/ana/plano.pdf");
    }

    #[test]
    fn test_size_label() {
        assert_eq!(size_label(1_572_864), "1.50 MB");
        assert_eq!(size_label(0), "0.00 MB");
        assert_eq!(size_label(1024 * 1024), "1.00 MB");
        assert_eq!(
            attach(&file("a.txt", "text/plain", 1_572_864)).size_label(),
            Some("1.50 MB")
        );
    }

    #[test]
    fn test_media_type_table() {
        assert_eq!(media_type_for(Path::new("x.PNG")), "image/png");
        assert_eq!(media_type_for(Path::new("x.jpeg")), "image/jpeg");
        assert_eq!(media_type_for(Path::new("x.pdf")), "application/pdf");
        assert_eq!(media_type_for(Path::new("x")), "application/octet-stream");
        assert_eq!(media_type_for(Path::new("x.tar.gz")), "application/octet-stream");
    }

    #[test]
    fn test_from_path_reads_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notas.txt");
        fs::write(&path, vec![b'a'; 4096]).unwrap();

        let source = FileSource::from_path(&path).unwrap();
        assert_eq!(source.name, "notas.txt");
        assert_eq!(source.media_type, "text/plain");
        assert_eq!(source.size_bytes, 4096);
        assert!(source.path.is_absolute());
    }

    #[test]
    fn test_from_path_rejects_missing_and_directories() {
        let dir = tempfile::tempdir().unwrap();

        let missing = FileSource::from_path(&dir.path().join("nope.pdf"));
        assert!(matches!(missing, Err(PortalError::Attachment { .. })));

        let directory = FileSource::from_path(dir.path());
        assert!(matches!(directory, Err(PortalError::Attachment { .. })));
    }
}
