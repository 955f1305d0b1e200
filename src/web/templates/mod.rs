use askama::Template;
use axum::{
    response::{Html, IntoResponse, Response},
    http::StatusCode,
};

#[derive(Template)]
#[template(path = "announcements.html")]
pub struct AnnouncementsPageTemplate {
    pub audience: String,
    /// Pre-rendered announcement markup.
    pub announcements: String,
}

#[derive(Template)]
#[template(path = "unavailable.html")]
pub struct UnavailableTemplate;

// Make askama templates work with axum
pub struct HtmlTemplate<T>(pub T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template: {}", err),
            ).into_response(),
        }
    }
}
