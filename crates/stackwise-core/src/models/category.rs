use std::fmt;

use serde::{Deserialize, Serialize};

/// Product category.
///
/// The app only offers the fixed set below, but rows created by other clients
/// may carry free text (`"SEO"`, `"Funnel Builder"`); those are kept verbatim
/// in [`Category::Custom`] so that reading and re-writing a row is lossless.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Course,
    Software,
    Ebook,
    Membership,
    Coaching,
    PhysicalProduct,
    Service,
    Template,
    Plugin,
    Other,
    Custom(String),
}

impl Category {
    /// All selectable categories, in display order.
    pub fn all() -> &'static [Category] {
        &[
            Self::Course,
            Self::Software,
            Self::Ebook,
            Self::Membership,
            Self::Coaching,
            Self::PhysicalProduct,
            Self::Service,
            Self::Template,
            Self::Plugin,
            Self::Other,
        ]
    }

    /// Stored value, e.g. `"physical_product"`.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Course => "course",
            Self::Software => "software",
            Self::Ebook => "ebook",
            Self::Membership => "membership",
            Self::Coaching => "coaching",
            Self::PhysicalProduct => "physical_product",
            Self::Service => "service",
            Self::Template => "template",
            Self::Plugin => "plugin",
            Self::Other => "other",
            Self::Custom(value) => value,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Course => "Course",
            Self::Software => "Software",
            Self::Ebook => "E-Book",
            Self::Membership => "Membership",
            Self::Coaching => "Coaching",
            Self::PhysicalProduct => "Physical Product",
            Self::Service => "Service",
            Self::Template => "Template",
            Self::Plugin => "Plugin/Extension",
            Self::Other => "Other",
            Self::Custom(value) => value,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Course => "Educational content with structured lessons",
            Self::Software => "Applications, tools, or platforms",
            Self::Ebook => "Digital books or guides",
            Self::Membership => "Recurring access to content or community",
            Self::Coaching => "Personal guidance or mentorship",
            Self::PhysicalProduct => "Tangible items shipped to customers",
            Self::Service => "Done-for-you work or assistance",
            Self::Template => "Pre-designed files or frameworks",
            Self::Plugin => "Add-ons for existing platforms",
            Self::Other => "Other types of products",
            Self::Custom(_) => "Uncategorized product",
        }
    }

    /// Whether this is one of the selectable categories.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Self::all()
            .iter()
            .find(|c| c.as_str() == value)
            .cloned()
            .unwrap_or(Self::Custom(value))
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Custom(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
