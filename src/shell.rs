use handlebars::{Handlebars, RenderError};
use serde::Serialize;

const SHELL_TEMPLATE: &str = include_str!("./static/shell.html");

/// Prebuilt frontend bundle that renders the component JSON
pub const BUNDLE_URL: &str = "https://cdn.jsdelivr.net/npm/@pydantic/fastui-prebuilt@0.0.26/dist";

/// Path prefix the frontend fetches page JSON from
pub const API_ROOT_URL: &str = "/api";

#[derive(Serialize)]
struct ShellContext<'a> {
    title: &'a str,
    api_root_url: &'a str,
    bundle_url: &'a str,
}

/// Render the HTML page that boots the frontend
///
/// The title is HTML-escaped. Rendered once at startup and served for every
/// path no other route claims.
///
/// # Arguments
/// * `title` - Document title
///
/// # Returns
/// * `Result<String, RenderError>` - The HTML document or a template error
pub fn render_shell(title: &str) -> Result<String, RenderError> {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);

    handlebars.render_template(
        SHELL_TEMPLATE,
        &ShellContext {
            title,
            api_root_url: API_ROOT_URL,
            bundle_url: BUNDLE_URL,
        },
    )
}
