//! Server-side HTML rendering.
//!
//! Templates are embedded at compile time and rendered with minijinja. Names
//! ending in `.html` are autoescaped.

use std::sync::LazyLock;

use core_types::Severity;
use minijinja::Environment;
use serde::Serialize;

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("form_fields.html", include_str!("../templates/form_fields.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("register.html", include_str!("../templates/register.html")),
    ("update.html", include_str!("../templates/update.html")),
    ("view.html", include_str!("../templates/view.html")),
    ("error.html", include_str!("../templates/error.html")),
];

static VIEWS: LazyLock<Views> = LazyLock::new(Views::new);

/// Returns the shared template set.
pub fn views() -> &'static Views {
    &VIEWS
}

/// A message shown at the top of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub text: String,
    pub severity: Severity,
}

impl Message {
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }
}

/// Template engine wrapper around minijinja.
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    fn new() -> Self {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)
                .expect("embedded templates should be valid");
        }
        Self { env }
    }

    /// Renders `name` with the given context.
    pub fn render<S: Serialize>(&self, name: &str, context: S) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(context)
    }
}
