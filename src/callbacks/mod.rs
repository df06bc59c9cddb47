//! Callback handlers for the certificate mailer window.
//!
//! - `drawing` - name box drawing on the certificate image
//! - `file_ops` - image and roster uploads, layout export
//! - `compose` - email draft and preview
//! - `dispatch` - sending the batch and progress

pub mod compose;
pub mod dispatch;
pub mod drawing;
pub mod file_ops;
