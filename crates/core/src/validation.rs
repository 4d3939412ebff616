//! Declarative credential validation.
//!
//! Form validation is a flat list of `(field, predicate, message)` rules
//! evaluated by a pure function. Each rule set matches one form: the login
//! form only requires fields to be present and the email to be well formed,
//! while the signup form also enforces password strength and confirmation.
//!
//! Errors are field-scoped: the first failing rule per field wins, and the
//! result maps each field to at most one message. No side effects; callers
//! re-run the rules on every submission.

use crate::types::Email;

/// A form field the validator can report errors against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The email input.
    Email,
    /// The password input.
    Password,
    /// The password-confirmation input (signup only).
    ConfirmPassword,
}

/// Raw field values as submitted.
///
/// `confirm_password` is `None` for forms without a confirmation input.
#[derive(Debug, Clone, Copy)]
pub struct CredentialInput<'a> {
    /// Submitted email value.
    pub email: &'a str,
    /// Submitted password value.
    pub password: &'a str,
    /// Submitted confirmation value, if the form has one.
    pub confirm_password: Option<&'a str>,
}

/// Predicate over the whole input; returns `true` when the rule passes.
type Check = fn(&CredentialInput<'_>) -> bool;

/// A single validation rule: a field, a predicate, and the message shown
/// when the predicate fails.
pub struct Rule {
    /// Field the error is attributed to.
    pub field: Field,
    /// Message displayed inline next to the field.
    pub message: &'static str,
    check: Check,
}

impl Rule {
    const fn new(field: Field, message: &'static str, check: Check) -> Self {
        Self {
            field,
            message,
            check,
        }
    }
}

/// Field-scoped validation errors; empty when the input is valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldErrors {
    /// Error for the email field, if any.
    pub email: Option<&'static str>,
    /// Error for the password field, if any.
    pub password: Option<&'static str>,
    /// Error for the confirmation field, if any.
    pub confirm_password: Option<&'static str>,
}

impl FieldErrors {
    /// Whether the input passed every rule.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none() && self.confirm_password.is_none()
    }

    fn slot(&mut self, field: Field) -> &mut Option<&'static str> {
        match field {
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
            Field::ConfirmPassword => &mut self.confirm_password,
        }
    }
}

/// Evaluate a rule set against raw input.
///
/// Pure function of its inputs; the first failing rule per field wins.
#[must_use]
pub fn validate(rules: &[Rule], input: &CredentialInput<'_>) -> FieldErrors {
    let mut errors = FieldErrors::default();
    for rule in rules {
        let slot = errors.slot(rule.field);
        if slot.is_none() && !(rule.check)(input) {
            *slot = Some(rule.message);
        }
    }
    errors
}

// =============================================================================
// Predicates
// =============================================================================

fn email_present(input: &CredentialInput<'_>) -> bool {
    !input.email.trim().is_empty()
}

fn email_well_formed(input: &CredentialInput<'_>) -> bool {
    Email::parse(input.email.trim()).is_ok()
}

fn password_present(input: &CredentialInput<'_>) -> bool {
    !input.password.is_empty()
}

fn password_strong(input: &CredentialInput<'_>) -> bool {
    let password = input.password;
    // Characters, not bytes: multibyte input still counts toward the minimum
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

fn confirm_present(input: &CredentialInput<'_>) -> bool {
    input.confirm_password.is_some_and(|c| !c.is_empty())
}

fn confirm_matches(input: &CredentialInput<'_>) -> bool {
    input
        .confirm_password
        .is_none_or(|c| c == input.password)
}

// =============================================================================
// Rule sets
// =============================================================================

/// Rules for the login form.
///
/// The login and signup forms word their email-format errors differently.
pub const LOGIN_RULES: &[Rule] = &[
    Rule::new(Field::Email, "Email is required", email_present),
    Rule::new(Field::Email, "Email not valid", email_well_formed),
    Rule::new(Field::Password, "Password is required", password_present),
];

/// Rules for the signup form.
pub const SIGNUP_RULES: &[Rule] = &[
    Rule::new(Field::Email, "Email is required", email_present),
    Rule::new(Field::Email, "Invalid email", email_well_formed),
    Rule::new(Field::Password, "Password is required", password_present),
    Rule::new(
        Field::Password,
        "Password must be at least 8 characters and contain an uppercase letter, a lowercase letter, and a digit",
        password_strong,
    ),
    Rule::new(
        Field::ConfirmPassword,
        "Confirm password is required",
        confirm_present,
    ),
    Rule::new(
        Field::ConfirmPassword,
        "Passwords do not match",
        confirm_matches,
    ),
];
