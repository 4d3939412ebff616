//! Authentication route handlers.
//!
//! Login and signup forms validate fields locally with the declarative rule
//! sets from `greenmart-core`, then dispatch to the commerce backend.
//! Validation errors render inline next to their field and are recomputed
//! on every submission; a backend failure renders as a single message,
//! verbatim. Authenticated visitors are sent back to the home page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use greenmart_core::types::Email;
use greenmart_core::validation::{
    CredentialInput, FieldErrors, LOGIN_RULES, SIGNUP_RULES, validate,
};

use crate::filters;
use crate::middleware::{OptionalAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::state::AppState;
use crate::store::{CommerceStore, NewUser, Role};

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    /// Submitted email, echoed back into the form.
    pub email: String,
    /// Field-scoped validation errors.
    pub errors: FieldErrors,
    /// Error from the commerce backend, displayed verbatim.
    pub remote_error: Option<String>,
}

impl LoginTemplate {
    fn blank() -> Self {
        Self {
            email: String::new(),
            errors: FieldErrors::default(),
            remote_error: None,
        }
    }
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    /// Submitted email, echoed back into the form.
    pub email: String,
    /// Field-scoped validation errors.
    pub errors: FieldErrors,
    /// Error from the commerce backend, displayed verbatim.
    pub remote_error: Option<String>,
}

impl RegisterTemplate {
    fn blank() -> Self {
        Self {
            email: String::new(),
            errors: FieldErrors::default(),
            remote_error: None,
        }
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
///
/// Already-authenticated visitors are redirected home.
pub async fn login_page(OptionalAuth(user): OptionalAuth) -> Response {
    if user.is_some() {
        return Redirect::to("/").into_response();
    }
    LoginTemplate::blank().into_response()
}

/// Handle login form submission.
pub async fn login<S: CommerceStore>(
    State(state): State<AppState<S>>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let input = CredentialInput {
        email: &form.email,
        password: &form.password,
        confirm_password: None,
    };
    let errors = validate(LOGIN_RULES, &input);
    if !errors.is_empty() {
        return LoginTemplate {
            email: form.email,
            errors,
            remote_error: None,
        }
        .into_response();
    }

    // The rules above include well-formedness, so this parse succeeds for
    // any input that got this far.
    let Ok(email) = Email::parse(form.email.trim()) else {
        return LoginTemplate {
            email: form.email,
            errors: FieldErrors {
                email: Some("Email not valid"),
                ..FieldErrors::default()
            },
            remote_error: None,
        }
        .into_response();
    };

    match state.store().authenticate(&email, &form.password).await {
        Ok(user) => {
            let current_user = CurrentUser {
                id: user.id,
                email: user.email,
            };
            if let Err(e) = set_current_user(&session, &current_user).await {
                tracing::error!("Failed to set session: {e}");
                return LoginTemplate {
                    email: form.email,
                    errors: FieldErrors::default(),
                    remote_error: Some("Something went wrong, please try again".to_string()),
                }
                .into_response();
            }
            Redirect::to("/").into_response()
        }
        Err(e) => {
            tracing::warn!("Login failed: {e}");
            LoginTemplate {
                email: form.email,
                errors: FieldErrors::default(),
                remote_error: Some(e.to_string()),
            }
            .into_response()
        }
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
///
/// Already-authenticated visitors are redirected home.
pub async fn register_page(OptionalAuth(user): OptionalAuth) -> Response {
    if user.is_some() {
        return Redirect::to("/").into_response();
    }
    RegisterTemplate::blank().into_response()
}

/// Handle registration form submission.
///
/// A successful registration logs the new user in immediately.
pub async fn register<S: CommerceStore>(
    State(state): State<AppState<S>>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    let input = CredentialInput {
        email: &form.email,
        password: &form.password,
        confirm_password: Some(&form.confirm_password),
    };
    let errors = validate(SIGNUP_RULES, &input);
    if !errors.is_empty() {
        return RegisterTemplate {
            email: form.email,
            errors,
            remote_error: None,
        }
        .into_response();
    }

    let Ok(email) = Email::parse(form.email.trim()) else {
        return RegisterTemplate {
            email: form.email,
            errors: FieldErrors {
                email: Some("Invalid email"),
                ..FieldErrors::default()
            },
            remote_error: None,
        }
        .into_response();
    };

    let new_user = NewUser {
        email,
        password: form.password,
        role: Role::User,
        addresses: Vec::new(),
    };

    match state.store().register(&new_user).await {
        Ok(user) => {
            let current_user = CurrentUser {
                id: user.id,
                email: user.email,
            };
            if let Err(e) = set_current_user(&session, &current_user).await {
                tracing::error!("Failed to set session after registration: {e}");
                return Redirect::to("/auth/login").into_response();
            }
            Redirect::to("/").into_response()
        }
        Err(e) => {
            tracing::warn!("Registration failed: {e}");
            RegisterTemplate {
                email: form.email,
                errors: FieldErrors::default(),
                remote_error: Some(e.to_string()),
            }
            .into_response()
        }
    }
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout.
///
/// Clears the current user and destroys the session.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {e}");
    }

    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {e}");
    }

    Redirect::to("/").into_response()
}
