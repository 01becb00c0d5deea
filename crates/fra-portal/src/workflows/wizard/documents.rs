use mime::Mime;

use super::domain::DocumentReference;

/// Allow-list applied to uploads before a reference is recorded on the draft.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    accepted: Vec<Mime>,
}

impl UploadPolicy {
    /// PDF, JPEG and PNG, with the non-standard `image/jpg` some browsers send.
    pub fn standard() -> Self {
        let jpg: Mime = "image/jpg".parse().unwrap_or(mime::IMAGE_JPEG);
        Self {
            accepted: vec![mime::APPLICATION_PDF, mime::IMAGE_JPEG, jpg, mime::IMAGE_PNG],
        }
    }

    pub fn accepts(&self, content_type: &Mime) -> bool {
        self.accepted.iter().any(|allowed| {
            allowed.type_() == content_type.type_() && allowed.subtype() == content_type.subtype()
        })
    }

    /// Validate an upload, guessing the type from the file extension when the
    /// client did not declare one.
    pub fn check(
        &self,
        file_name: &str,
        declared_type: Option<&str>,
    ) -> Result<DocumentReference, UploadRejected> {
        let file_name = file_name.trim();
        if file_name.is_empty() {
            return Err(UploadRejected::MissingFileName);
        }

        let content_type = match declared_type.map(str::trim).filter(|raw| !raw.is_empty()) {
            Some(raw) => raw
                .parse::<Mime>()
                .map_err(|_| UploadRejected::UnsupportedType {
                    content_type: raw.to_string(),
                })?,
            None => mime_guess::from_path(file_name)
                .first()
                .ok_or_else(|| UploadRejected::UnknownType {
                    file_name: file_name.to_string(),
                })?,
        };

        if !self.accepts(&content_type) {
            return Err(UploadRejected::UnsupportedType {
                content_type: content_type.essence_str().to_string(),
            });
        }

        Ok(DocumentReference {
            file_name: file_name.to_string(),
            content_type: content_type.essence_str().to_string(),
        })
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadRejected {
    #[error("a file name is required")]
    MissingFileName,
    #[error("cannot determine the type of '{file_name}'; upload PDF, JPG, or PNG files only")]
    UnknownType { file_name: String },
    #[error("'{content_type}' is not accepted; upload PDF, JPG, or PNG files only")]
    UnsupportedType { content_type: String },
}
