pub mod aggregate;
pub mod upload;

pub use aggregate::{
    CreateDocumentRequest, Document, DocumentCategory, DocumentResponse, ProcessingStatus,
    UpdateDocumentRequest, VectorStoreInfo,
};
pub use upload::{UploadDocumentRequest, UploadDocumentResponse, UploadedFile};
