//! Required-field gate run before any work of a save attempt starts.
//!
//! Only presence is checked here. Whether price and offer parse as numbers is decided later
//! by [`crate::assembler::assemble`], after the photos have been uploaded.

use std::borrow::Cow;

use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::ProductDraft;

/// Rejects values that are empty once surrounding whitespace is removed.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some(Cow::Borrowed("must not be blank"));
        return Err(error);
    }
    Ok(())
}

/// Form validator
///
/// A draft passes when it has at least one photo and non-blank name, category and price.
pub struct FormValidator;

impl FormValidator {
    pub fn validate(draft: &ProductDraft) -> bool {
        Self::check(draft).is_ok()
    }

    /// Same rules as [`FormValidator::validate`], reporting every failing field.
    pub fn check(draft: &ProductDraft) -> Result<(), ValidationErrors> {
        draft.validate()
    }
}
