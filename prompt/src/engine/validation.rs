// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::{Debug, Formatter};

/// A failed validation. Its [`Display`](std::fmt::Display) is the message that the
/// prompt shows to the user, below the input.
///
/// All the ways a validator might want to report a problem convert into this, so there
/// is exactly one contract: return `Err(..)` to reject the value, `Ok(())` to accept it.
///
/// ```
/// use r3bl_prompt::ValidationError;
///
/// let from_str: ValidationError = "required".into();
/// let from_string: ValidationError = format!("at most {} chars", 8).into();
/// let from_report: ValidationError = miette::miette!("not a number").into();
/// let from_io: ValidationError = ValidationError::from_error(std::io::Error::other("nope"));
///
/// assert_eq!(from_str.to_string(), "required");
/// assert_eq!(from_report.message(), "not a number");
/// assert_eq!(from_io.message(), "nope");
/// ```
#[derive(Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
#[error("{message}")]
#[diagnostic(code(r3bl_prompt::validation))]
pub struct ValidationError {
    message: String,
}

impl Debug for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ValidationError({:?})", self.message)
    }
}

impl ValidationError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Use the error's `Display` output as the message.
    #[must_use]
    pub fn from_error(error: impl std::error::Error) -> Self { Self::new(error.to_string()) }

    #[must_use]
    pub fn message(&self) -> &str { &self.message }
}

impl From<&str> for ValidationError {
    fn from(message: &str) -> Self { Self::new(message) }
}

impl From<String> for ValidationError {
    fn from(message: String) -> Self { Self::new(message) }
}

impl From<miette::Report> for ValidationError {
    fn from(report: miette::Report) -> Self { Self::new(report.to_string()) }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for ValidationError {
    fn from(error: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Self::new(error.to_string())
    }
}

/// The result every validator returns.
pub type ValidationResult = Result<(), ValidationError>;

/// Validators see the prompt's current value, which is `None` when nothing has been
/// entered or selected yet.
pub type Validator<V> = Box<dyn Fn(Option<&V>) -> ValidationResult + Send + Sync>;

/// Box a closure as a [`Validator`]. Passing the closure through this function lets the
/// compiler infer its argument type, so there is no need to annotate it.
///
/// ```
/// use r3bl_prompt::{Validator, validator};
///
/// let required: Validator<String> = validator::<String>(|value| match value {
///     Some(it) if !it.is_empty() => Ok(()),
///     _ => Err("required".into()),
/// });
/// assert!(required(None).is_err());
/// ```
pub fn validator<V>(
    validate: impl Fn(Option<&V>) -> ValidationResult + Send + Sync + 'static,
) -> Validator<V> {
    Box::new(validate)
}
