//! Element locator strategies and their wire-protocol translation

use std::fmt;

use serde::{Deserialize, Serialize};

/// How to find an element on the page.
///
/// Serializes as a `{ by, value }` pair so selectors can live in the config
/// file verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", content = "value")]
pub enum By {
    #[serde(rename = "id")]
    Id(String),
    #[serde(rename = "name")]
    Name(String),
    #[serde(rename = "class-name")]
    ClassName(String),
    #[serde(rename = "tag-name")]
    TagName(String),
    #[serde(rename = "xpath")]
    XPath(String),
}

impl By {
    pub fn id(value: impl Into<String>) -> Self {
        By::Id(value.into())
    }

    pub fn name(value: impl Into<String>) -> Self {
        By::Name(value.into())
    }

    pub fn class_name(value: impl Into<String>) -> Self {
        By::ClassName(value.into())
    }

    pub fn tag_name(value: impl Into<String>) -> Self {
        By::TagName(value.into())
    }

    pub fn xpath(value: impl Into<String>) -> Self {
        By::XPath(value.into())
    }

    /// Wire-protocol `(using, value)` pair.
    ///
    /// `Id`, `Name` and `ClassName` have no native W3C strategy and are
    /// translated to CSS selectors.
    pub fn strategy(&self) -> (&'static str, String) {
        match self {
            By::Id(id) => ("css selector", format!("[id=\"{}\"]", css_escape(id))),
            By::Name(name) => ("css selector", format!("[name=\"{}\"]", css_escape(name))),
            By::ClassName(class) => ("css selector", format!(".{}", class)),
            By::TagName(tag) => ("tag name", tag.clone()),
            By::XPath(expr) => ("xpath", expr.clone()),
        }
    }
}

impl fmt::Display for By {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            By::Id(v) => write!(f, "id={}", v),
            By::Name(v) => write!(f, "name={}", v),
            By::ClassName(v) => write!(f, "class={}", v),
            By::TagName(v) => write!(f, "tag={}", v),
            By::XPath(v) => write!(f, "xpath={}", v),
        }
    }
}

/// Escape a value for use inside a double-quoted CSS attribute selector
fn css_escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
