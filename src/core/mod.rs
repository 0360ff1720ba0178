pub mod article;
pub mod error;

pub use article::{Article, ArticleDraft, ArticleUpdate};
pub use error::{Result, StoreError};
