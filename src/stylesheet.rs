//! `go.css` generation.
//!
//! Each variant becomes one `@font-face` rule. Rules are rendered through a
//! strict-mode Handlebars template, so a field missing from the render context
//! is an error rather than silently empty output.

use handlebars::Handlebars;
use serde::Serialize;

use crate::error::PipelineError;
use crate::variant::{FaceAttributes, FontVariant, asset_name};
pub use crate::manifest::STYLESHEET_NAME;

/// First line of the stylesheet.
pub const LICENSE_COMMENT: &str = "/* see LICENSE.txt for Copyright details */\n";

const FONT_FACE_TEMPLATE_NAME: &str = "font-face";

const FONT_FACE_TEMPLATE: &str = r#"@font-face {font-family:{{family}};
src:local({{local_font}}),url({{file_name}}) format("woff2");
font-style:{{style}};font-weight:{{weight}};}
"#;

/// Render context for one `@font-face` declaration.
///
/// `family` and `local_font` hold already quoted CSS strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FontFaceRule {
    pub family: String,
    pub local_font: String,
    pub file_name: String,
    pub style: String,
    pub weight: String,
}

impl FontFaceRule {
    /// Builds the rule for a variant name from its derived attributes.
    pub fn for_variant(name: &str) -> Self {
        let attributes = FaceAttributes::derive(name);
        Self {
            family: css_quote(attributes.family),
            local_font: css_quote(&attributes.local_name),
            file_name: asset_name(name),
            style: attributes.style.as_css().to_string(),
            weight: attributes.weight.as_css().to_string(),
        }
    }

    /// Rejects rules with an empty required field.
    ///
    /// Quoted fields count as empty when nothing is between the quotes.
    pub fn check_complete(&self, font: &str) -> Result<(), PipelineError> {
        let fields = [
            ("font-family", self.family.as_str()),
            ("local", self.local_font.as_str()),
            ("url", self.file_name.as_str()),
            ("font-style", self.style.as_str()),
            ("font-weight", self.weight.as_str()),
        ];
        for (field, value) in fields {
            if value.is_empty() || value == "\"\"" {
                return Err(PipelineError::IncompleteRule {
                    font: font.to_string(),
                    field,
                });
            }
        }
        Ok(())
    }
}

/// Quotes a value as a CSS string literal.
pub fn css_quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\a "),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Accumulates one rule per variant into the aggregate stylesheet.
pub struct StylesheetGenerator {
    registry: Handlebars<'static>,
    buffer: String,
    rules: usize,
}

impl StylesheetGenerator {
    pub fn new() -> Result<Self, PipelineError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        registry
            .register_template_string(FONT_FACE_TEMPLATE_NAME, FONT_FACE_TEMPLATE)
            .map_err(Box::new)?;

        Ok(Self {
            registry,
            buffer: String::from(LICENSE_COMMENT),
            rules: 0,
        })
    }

    /// Appends the rule for `variant`.
    pub fn push(&mut self, variant: &FontVariant) -> Result<(), PipelineError> {
        self.push_name(variant.name())
    }

    /// Appends the rule for a variant known only by name.
    pub fn push_name(&mut self, name: &str) -> Result<(), PipelineError> {
        let rule = FontFaceRule::for_variant(name);
        rule.check_complete(name)?;
        self.push_rule(&rule)
    }

    pub fn push_rule(&mut self, rule: &FontFaceRule) -> Result<(), PipelineError> {
        let rendered = self.registry.render(FONT_FACE_TEMPLATE_NAME, rule)?;
        self.buffer.push_str(&rendered);
        self.rules += 1;
        Ok(())
    }

    pub fn rule_count(&self) -> usize {
        self.rules
    }

    pub fn finish(self) -> String {
        self.buffer
    }
}

/// Renders the complete stylesheet for `names`, in order.
pub fn render_stylesheet<I, S>(names: I) -> Result<String, PipelineError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut generator = StylesheetGenerator::new()?;
    for name in names {
        generator.push_name(name.as_ref())?;
    }
    Ok(generator.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::GO_VARIANTS;

    #[test]
    fn test_single_rule_exact_output() {
        let css = render_stylesheet(["Go-Mono-Bold-Italic"]).unwrap();
        assert_eq!(
            css,
            concat!(
                "/* see LICENSE.txt for Copyright details */\n",
                "@font-face {font-family:\"Go Mono\";\n",
                "src:local(\"Go Mono Bold Italic\"),url(Go-Mono-Bold-Italic.woff2) format(\"woff2\");\n",
                "font-style:italic;font-weight:600;}\n",
            )
        );
    }

    #[test]
    fn test_regular_rule_uses_normal_keywords() {
        let css = render_stylesheet(["Go-Regular"]).unwrap();
        assert!(css.contains("font-family:\"Go\";"));
        assert!(css.contains("font-style:normal;font-weight:normal;}"));
    }

    #[test]
    fn test_one_rule_per_variant_in_order() {
        let css = render_stylesheet(GO_VARIANTS).unwrap();
        assert_eq!(css.matches("@font-face").count(), GO_VARIANTS.len());

        let positions: Vec<usize> = GO_VARIANTS
            .iter()
            .map(|name| css.find(&format!("url({name}.woff2)")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_output_is_deterministic() {
        let first = render_stylesheet(GO_VARIANTS).unwrap();
        let second = render_stylesheet(GO_VARIANTS).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input_has_only_the_header() {
        let css = render_stylesheet(Vec::<&str>::new()).unwrap();
        assert_eq!(css, LICENSE_COMMENT);
    }

    #[test]
    fn test_incomplete_rule_is_rejected() {
        let mut rule = FontFaceRule::for_variant("Go-Regular");
        rule.weight.clear();
        assert!(matches!(
            rule.check_complete("Go-Regular"),
            Err(PipelineError::IncompleteRule { field: "font-weight", .. })
        ));

        let mut rule = FontFaceRule::for_variant("Go-Regular");
        rule.family = css_quote("");
        assert!(matches!(
            rule.check_complete("Go-Regular"),
            Err(PipelineError::IncompleteRule { field: "font-family", .. })
        ));
    }

    #[test]
    fn test_generator_counts_rules() {
        let mut generator = StylesheetGenerator::new().unwrap();
        generator.push_name("Go-Bold").unwrap();
        generator.push_name("Go-Italic").unwrap();
        assert_eq!(generator.rule_count(), 2);
    }

    #[test]
    fn test_css_quote_escapes() {
        assert_eq!(css_quote("Go Mono"), "\"Go Mono\"");
        assert_eq!(css_quote("a\"b\\c"), "\"a\\\"b\\\\c\"");
    }
}
