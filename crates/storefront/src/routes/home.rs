//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;

use crate::filters;
use crate::middleware::OptionalAuth;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    /// Email of the logged-in user, if any.
    pub email: Option<String>,
}

/// Display the home page.
pub async fn home(OptionalAuth(user): OptionalAuth) -> HomeTemplate {
    HomeTemplate {
        email: user.map(|u| u.email.to_string()),
    }
}
