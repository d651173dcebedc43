//! Font variants and the name-based derivation of their `@font-face` attributes.
//!
//! Every variant is identified by a canonical name such as
//! `Go-Mono-Bold-Italic`. Family, weight and style are never stored; they are
//! derived from markers in the name through two ordered tables:
//!
//! - [`FAMILY_RULES`]: the first matching row picks the family (and may set a
//!   weight).
//! - [`TRAIT_RULES`]: every matching row applies in order, later rows
//!   overwriting earlier values. `Bold` therefore wins over the `500` weight
//!   that `Medium` sets.

use std::fmt;
use std::path::Path;

use crate::error::PipelineError;
pub use crate::manifest::WOFF2_EXTENSION;

/// Canonical names of the Go font variants, in stylesheet order.
pub const GO_VARIANTS: [&str; 12] = [
    "Go-Regular",
    "Go-Italic",
    "Go-Medium",
    "Go-Medium-Italic",
    "Go-Bold",
    "Go-Bold-Italic",
    "Go-Smallcaps",
    "Go-Smallcaps-Italic",
    "Go-Mono",
    "Go-Mono-Italic",
    "Go-Mono-Bold",
    "Go-Mono-Bold-Italic",
];

const DEFAULT_FAMILY: &str = "Go";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

impl FontStyle {
    pub fn as_css(self) -> &'static str {
        match self {
            FontStyle::Normal => "normal",
            FontStyle::Italic => "italic",
        }
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_css())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FontWeight {
    #[default]
    Normal,
    /// CSS weight `500`.
    Medium,
    /// CSS weight `600`.
    SemiBold,
}

impl FontWeight {
    pub fn as_css(self) -> &'static str {
        match self {
            FontWeight::Normal => "normal",
            FontWeight::Medium => "500",
            FontWeight::SemiBold => "600",
        }
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_css())
    }
}

/// A row of the family table.
#[derive(Debug)]
pub struct FamilyRule {
    pub marker: &'static str,
    pub family: &'static str,
    pub weight: Option<FontWeight>,
}

/// A row of the trait table.
#[derive(Debug)]
pub struct TraitRule {
    pub marker: &'static str,
    pub weight: Option<FontWeight>,
    pub style: Option<FontStyle>,
}

/// First match wins.
pub static FAMILY_RULES: &[FamilyRule] = &[
    FamilyRule {
        marker: "Smallcaps",
        family: "Go Smallcaps",
        weight: None,
    },
    FamilyRule {
        marker: "Medium",
        family: "Go Medium",
        weight: Some(FontWeight::Medium),
    },
    FamilyRule {
        marker: "Mono",
        family: "Go Mono",
        weight: None,
    },
];

/// All matches apply, last write wins.
pub static TRAIT_RULES: &[TraitRule] = &[
    TraitRule {
        marker: "Bold",
        weight: Some(FontWeight::SemiBold),
        style: None,
    },
    TraitRule {
        marker: "Italic",
        weight: None,
        style: Some(FontStyle::Italic),
    },
];

/// Display attributes derived from a variant name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceAttributes {
    pub family: &'static str,
    pub style: FontStyle,
    pub weight: FontWeight,
    /// Name hint for `local()`: the canonical name with `-` replaced by spaces.
    pub local_name: String,
}

impl FaceAttributes {
    pub fn derive(name: &str) -> Self {
        let mut attributes = Self {
            family: DEFAULT_FAMILY,
            style: FontStyle::Normal,
            weight: FontWeight::Normal,
            local_name: name.replace('-', " "),
        };

        if let Some(rule) = FAMILY_RULES.iter().find(|rule| name.contains(rule.marker)) {
            attributes.family = rule.family;
            if let Some(weight) = rule.weight {
                attributes.weight = weight;
            }
        }

        for rule in TRAIT_RULES.iter().filter(|rule| name.contains(rule.marker)) {
            if let Some(weight) = rule.weight {
                attributes.weight = weight;
            }
            if let Some(style) = rule.style {
                attributes.style = style;
            }
        }

        attributes
    }
}

/// One font face to convert and publish.
#[derive(Debug, Clone)]
pub struct FontVariant {
    name: String,
    ttf: Vec<u8>,
}

impl FontVariant {
    /// # Errors
    ///
    /// Returns `PipelineError::InvalidVariantName` if the name is empty or not
    /// a plain file stem, and `PipelineError::InvalidFont` if the bytes are
    /// empty.
    pub fn new(name: impl Into<String>, ttf: Vec<u8>) -> Result<Self, PipelineError> {
        let name = name.into();
        validate_name(&name)?;
        if ttf.is_empty() {
            return Err(PipelineError::InvalidFont {
                font: name,
                reason: "font data is empty".to_string(),
            });
        }
        Ok(Self { name, ttf })
    }

    /// Reads `<dir>/<name>.ttf` and checks that it looks like a TrueType font.
    pub fn load(dir: &Path, name: &str) -> Result<Self, PipelineError> {
        validate_name(name)?;
        let path = dir.join(format!("{name}.ttf"));
        let ttf = std::fs::read(&path).map_err(|source| PipelineError::Read {
            path: path.clone(),
            source,
        })?;
        let variant = Self::new(name, ttf)?;
        variant.validate()?;
        Ok(variant)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ttf(&self) -> &[u8] {
        &self.ttf
    }

    pub fn attributes(&self) -> FaceAttributes {
        FaceAttributes::derive(&self.name)
    }

    /// Name of the compressed asset, e.g. `Go-Bold.woff2`.
    pub fn asset_name(&self) -> String {
        asset_name(&self.name)
    }

    /// Checks the sfnt table directory and the presence of a `head` table.
    pub fn validate(&self) -> Result<(), PipelineError> {
        let invalid = |reason: String| PipelineError::InvalidFont {
            font: self.name.clone(),
            reason,
        };
        let face = ttf_parser::RawFace::parse(&self.ttf, 0).map_err(|e| invalid(e.to_string()))?;
        if face.table(ttf_parser::Tag::from_bytes(b"head")).is_none() {
            return Err(invalid("missing 'head' table".to_string()));
        }
        Ok(())
    }
}

pub fn asset_name(variant: &str) -> String {
    format!("{variant}.{WOFF2_EXTENSION}")
}

fn validate_name(name: &str) -> Result<(), PipelineError> {
    let usable = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0']);
    if usable {
        Ok(())
    } else {
        Err(PipelineError::InvalidVariantName(name.to_string()))
    }
}
