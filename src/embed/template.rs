//! Page templates with typed placeholder substitution.
//!
//! Placeholders are `__NAME__` markers in the embedded HTML. Each template is
//! paired with a vars type that knows which markers it fills.

use std::marker::PhantomData;

/// A set of values for one template's placeholders.
pub trait TemplateVars {
    /// Substitute this set's placeholders in `content`.
    fn apply(&self, content: &str) -> String;
}

/// Embedded template, renderable only with its own vars type.
#[derive(Debug, Clone, Copy)]
pub struct Template<V> {
    content: &'static str,
    _marker: PhantomData<V>,
}

impl<V> Template<V> {
    pub const fn new(content: &'static str) -> Self {
        Self {
            content,
            _marker: PhantomData,
        }
    }

    /// Placeholder names in order of appearance (`__TITLE__` -> `TITLE`).
    pub fn placeholders(&self) -> Vec<&'static str> {
        self.content
            .split("__")
            .skip(1)
            .step_by(2)
            .filter(|name| {
                !name.is_empty() && name.bytes().all(|b| b.is_ascii_uppercase() || b == b'_')
            })
            .collect()
    }
}

impl<V: TemplateVars> Template<V> {
    pub fn render(&self, vars: &V) -> String {
        vars.apply(self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Greeting<'a>(&'a str);

    impl TemplateVars for Greeting<'_> {
        fn apply(&self, content: &str) -> String {
            content.replace("__NAME__", self.0)
        }
    }

    const GREETING: Template<Greeting<'static>> = Template::new("<p>Hi __NAME__, see __SITE_TITLE__</p>");

    #[test]
    fn test_placeholders() {
        assert_eq!(GREETING.placeholders(), ["NAME", "SITE_TITLE"]);
    }

    #[test]
    fn test_render() {
        assert_eq!(
            GREETING.render(&Greeting("Ada")),
            "<p>Hi Ada, see __SITE_TITLE__</p>"
        );
    }

    #[test]
    fn test_render_borrowed_vars() {
        fn greet(name: &str) -> String {
            GREETING.render(&Greeting(name))
        }
        let name = String::from("Grace");
        assert_eq!(greet(&name), "<p>Hi Grace, see __SITE_TITLE__</p>");
    }
}
