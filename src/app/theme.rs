//! Theme/plugin provider.

use askama::Template;

use crate::config::schema::ThemeConfig;

/// Styling capabilities injected into the application root.
///
/// The root only needs to construct and hold a provider; what a provider
/// contributes to the page is up to the implementation.
pub trait ThemeProvider: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &str;

    /// Markup placed into the host document `<head>`.
    fn head_markup(&self) -> askama::Result<String>;

    /// CSS classes applied to the root container.
    fn root_classes(&self) -> Vec<String>;
}

#[derive(Template)]
#[template(path = "shell/stylesheets.html")]
struct StylesheetLinks<'a> {
    stylesheets: &'a [String],
}

/// Provider that links a fixed set of stylesheets.
#[derive(Debug, Clone)]
pub struct StylesheetTheme {
    name: String,
    stylesheets: Vec<String>,
    dark: bool,
}

impl StylesheetTheme {
    pub fn new(name: impl Into<String>, stylesheets: Vec<String>, dark: bool) -> Self {
        Self {
            name: name.into(),
            stylesheets,
            dark,
        }
    }

    pub fn from_config(config: &ThemeConfig) -> Self {
        Self::new(&config.name, config.stylesheets.clone(), config.dark)
    }
}

impl ThemeProvider for StylesheetTheme {
    fn name(&self) -> &str {
        &self.name
    }

    fn head_markup(&self) -> askama::Result<String> {
        StylesheetLinks {
            stylesheets: &self.stylesheets,
        }
        .render()
    }

    fn root_classes(&self) -> Vec<String> {
        let variant = if self.dark { "dark" } else { "light" };
        vec![format!("theme--{}", self.name), format!("theme--{}", variant)]
    }
}
