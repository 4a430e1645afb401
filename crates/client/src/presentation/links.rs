use serde::{Deserialize, Serialize};

/// One entry of a link group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkItem {
    pub name: String,
    pub link: String,
    /// Opens outside the app
    #[serde(default)]
    pub outer: bool,
}

impl LinkItem {
    pub fn route(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            link: path.into(),
            outer: false,
        }
    }

    pub fn external(name: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            link: href.into(),
            outer: true,
        }
    }

    pub fn target(&self) -> LinkTarget<'_> {
        if self.outer {
            LinkTarget::External(&self.link)
        } else {
            LinkTarget::Route(&self.link)
        }
    }
}

/// Where a link leads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget<'a> {
    /// In-app navigation
    Route(&'a str),
    /// Plain anchor
    External(&'a str),
}

/// Titled list of links
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkGroup {
    pub title: String,
    pub links: Vec<LinkItem>,
}

impl LinkGroup {
    pub fn new(title: impl Into<String>, links: Vec<LinkItem>) -> Self {
        Self {
            title: title.into(),
            links,
        }
    }

    /// Links in display order with their targets
    pub fn entries(&self) -> impl Iterator<Item = (&str, LinkTarget<'_>)> {
        self.links
            .iter()
            .map(|item| (item.name.as_str(), item.target()))
    }
}
