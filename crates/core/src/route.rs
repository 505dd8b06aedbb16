//! Fragment-based view routing.
//!
//! The page address fragment (`#our-story`, `#shop`, ...) is the only
//! addressable state. It selects one of two views; the other fragments name
//! in-page anchors on the home view.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Fragment for the "Our Story" page.
pub const OUR_STORY: &str = "our-story";
/// Fragment for the top of the home page.
pub const HOME: &str = "home";
/// Fragment for the full product collection.
pub const SHOP: &str = "shop";
/// Fragment for the contact form.
pub const CONTACT: &str = "contact";

/// A URL fragment identifier, without the leading `#`.
///
/// The empty fragment stands for "no fragment".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fragment(String);

impl Fragment {
    /// Parse a raw fragment as reported by the browser.
    ///
    /// A single leading `#` is stripped; `None` and `""` both yield the
    /// empty fragment.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        let raw = raw.unwrap_or_default().trim();
        Self(raw.strip_prefix('#').unwrap_or(raw).to_owned())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The view this fragment selects.
    #[must_use]
    pub fn view(&self) -> View {
        resolve_view(Some(self.as_str()))
    }

    /// How the viewport should move when this fragment becomes current.
    #[must_use]
    pub fn scroll_effect(&self) -> ScrollEffect {
        match self.as_str() {
            "" | HOME | OUR_STORY => ScrollEffect::Top,
            anchor => ScrollEffect::Anchor(anchor.to_owned()),
        }
    }
}

impl From<&str> for Fragment {
    fn from(raw: &str) -> Self {
        Self::parse(Some(raw))
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Top-level views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    /// The scrollable home page: hero, featured, collection, contact.
    #[default]
    Home,
    /// The "Our Story" page.
    OurStory,
}

impl View {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Home => HOME,
            Self::OurStory => OUR_STORY,
        }
    }
}

/// Viewport movement after a fragment change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScrollEffect {
    /// Reset scroll to the top of the page.
    Top,
    /// Leave scrolling to the browser, which jumps to this in-page anchor.
    Anchor(String),
}

/// Map a fragment to a view.
///
/// Only `our-story` selects [`View::OurStory`]; everything else (including
/// no fragment) is [`View::Home`]. A leading `#` is accepted.
///
/// ```
/// use fabu_core::{View, resolve_view};
///
/// assert_eq!(resolve_view(Some("#our-story")), View::OurStory);
/// assert_eq!(resolve_view(Some("shop")), View::Home);
/// assert_eq!(resolve_view(None), View::Home);
/// ```
#[must_use]
pub fn resolve_view(fragment: Option<&str>) -> View {
    let fragment = fragment.unwrap_or_default();
    match fragment.strip_prefix('#').unwrap_or(fragment) {
        OUR_STORY => View::OurStory,
        _ => View::Home,
    }
}

/// A header navigation link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
}

/// Header navigation, in display order.
pub const NAVIGATION_LINKS: &[NavItem] = &[
    NavItem {
        label: "Home",
        href: "#home",
    },
    NavItem {
        label: "Shop",
        href: "#shop",
    },
    NavItem {
        label: "Our Story",
        href: "#our-story",
    },
    NavItem {
        label: "Contact",
        href: "#contact",
    },
];
