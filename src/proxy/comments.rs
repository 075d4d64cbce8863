//! Comment sink shared between the proxy console and recording filters

use std::fmt;
use std::sync::Mutex;

/// Collects user comments to be interleaved with recorded output.
pub trait CommentSource: Send + Sync + fmt::Debug {
    fn add_comment(&self, comment: &str);

    /// Drain the comments collected so far, oldest first.
    fn take_comments(&self) -> Vec<String>;
}

/// In-memory [`CommentSource`]
#[derive(Debug, Default)]
pub struct CommentLog {
    comments: Mutex<Vec<String>>,
}

impl CommentLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CommentSource for CommentLog {
    fn add_comment(&self, comment: &str) {
        // A poisoned lock still holds a usable vector.
        let mut comments = self
            .comments
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        comments.push(comment.to_string());
    }

    fn take_comments(&self) -> Vec<String> {
        let mut comments = self
            .comments
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        std::mem::take(&mut *comments)
    }
}
