use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{required, FieldErrors};

#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct PostForm {
    #[serde(default)]
    #[validate(custom(function = "required"))]
    pub content: String,
}

impl PostForm {
    /// Trimmed content ready to store.
    pub fn clean(&self) -> Result<String, FieldErrors> {
        self.validate().map_err(FieldErrors::from)?;
        Ok(self.content.trim().to_string())
    }
}

#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct CommentForm {
    #[serde(default)]
    #[validate(custom(function = "required"))]
    pub content: String,
}

impl CommentForm {
    pub fn clean(&self) -> Result<String, FieldErrors> {
        self.validate().map_err(FieldErrors::from)?;
        Ok(self.content.trim().to_string())
    }
}
