//! Form inputs for the public write paths and their validation rules.
//!
//! Values are trimmed on construction; whitespace-only counts as empty.

use std::borrow::Cow;

use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::{DomainError, FieldErrors};

const REQUIRED: &str = "required";

fn required(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new(REQUIRED)
            .with_message(Cow::Borrowed("This field is required.")));
    }
    Ok(())
}

/// A reader's comment as submitted through the post detail form.
#[derive(Debug, Clone, Validate)]
pub struct CommentInput {
    #[validate(
        custom(function = "required"),
        length(max = 80, message = "Ensure this value has at most 80 characters.")
    )]
    pub name: String,
    #[validate(
        custom(function = "required"),
        length(max = 254, message = "Ensure this value has at most 254 characters."),
        email(message = "Enter a valid email address.")
    )]
    pub email: String,
    #[validate(custom(function = "required"))]
    pub body: String,
}

impl CommentInput {
    pub fn new(name: &str, email: &str, body: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            body: body.trim().to_string(),
        }
    }

    pub fn check(&self) -> Result<(), DomainError> {
        self.validate()
            .map_err(|e| DomainError::Validation(e.into()))
    }
}

/// A message for the site owner as submitted through the contact form.
#[derive(Debug, Clone, Validate)]
pub struct ContactInput {
    #[validate(
        custom(function = "required"),
        length(max = 100, message = "Ensure this value has at most 100 characters.")
    )]
    pub name: String,
    #[validate(
        custom(function = "required"),
        length(max = 254, message = "Ensure this value has at most 254 characters."),
        email(message = "Enter a valid email address.")
    )]
    pub email: String,
    #[validate(
        custom(function = "required"),
        length(max = 200, message = "Ensure this value has at most 200 characters.")
    )]
    pub subject: String,
    #[validate(custom(function = "required"))]
    pub body: String,
}

impl ContactInput {
    pub fn new(name: &str, email: &str, subject: &str, body: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            subject: subject.trim().to_string(),
            body: body.trim().to_string(),
        }
    }

    pub fn check(&self) -> Result<(), DomainError> {
        self.validate()
            .map_err(|e| DomainError::Validation(e.into()))
    }
}

impl From<ValidationErrors> for FieldErrors {
    /// A missing value reports only "required"; other rules on that field
    /// would just repeat the same problem.
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            let field = field.to_string();
            match errs.iter().find(|e| e.code == REQUIRED) {
                Some(err) => out.add(field, message_of(err)),
                None => {
                    for err in errs.iter() {
                        out.add(field.clone(), message_of(err));
                    }
                }
            }
        }
        out
    }
}

fn message_of(err: &ValidationError) -> String {
    err.message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| err.code.to_string())
}

/// Mask the local part of an address for logging: `j***@example.com`.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) if local.chars().count() > 1 => format!("{first}***@{domain}"),
            _ => format!("***@{domain}"),
        },
        None => "***".to_string(),
    }
}
