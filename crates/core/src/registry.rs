//! Component registry: the closed catalog of wireframe component types.
//!
//! Adding a variant to [`ComponentType`] forces matching updates in
//! [`meta`], [`crate::props::ComponentProps`], [`crate::schema::fields_for`]
//! and the render dispatch, because every one of those is an exhaustive
//! `match`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::props::ComponentProps;
use crate::schema::{self, FieldSchema};
use crate::types::PropsBag;

// ---------------------------------------------------------------------------
// Component types
// ---------------------------------------------------------------------------

/// Every component type that can be placed on a page.
///
/// Declaration order is the catalog order (showcase, registry listing).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    Hero,
    RichText,
    Breadcrumbs,
    CallToAction,
    Accordion,
    Signposts,
    Stats,
    FeaturedPromo,
    Tabs,
    ContactForm,
    ImageGallery,
    Quote,
    NewsListing,
    VideoEmbed,
}

impl ComponentType {
    /// All registered types in catalog order.
    pub const ALL: [ComponentType; 14] = [
        Self::Hero,
        Self::RichText,
        Self::Breadcrumbs,
        Self::CallToAction,
        Self::Accordion,
        Self::Signposts,
        Self::Stats,
        Self::FeaturedPromo,
        Self::Tabs,
        Self::ContactForm,
        Self::ImageGallery,
        Self::Quote,
        Self::NewsListing,
        Self::VideoEmbed,
    ];

    /// Stable wire name, as stored in `PlacedComponent.type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::RichText => "rich_text",
            Self::Breadcrumbs => "breadcrumbs",
            Self::CallToAction => "call_to_action",
            Self::Accordion => "accordion",
            Self::Signposts => "signposts",
            Self::Stats => "stats",
            Self::FeaturedPromo => "featured_promo",
            Self::Tabs => "tabs",
            Self::ContactForm => "contact_form",
            Self::ImageGallery => "image_gallery",
            Self::Quote => "quote",
            Self::NewsListing => "news_listing",
            Self::VideoEmbed => "video_embed",
        }
    }

    /// Parse a wire name. Unknown names yield `None`, never an error.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == name)
    }

    /// Whether this type is always available regardless of a project's
    /// allow-list.
    pub fn is_always_active(&self) -> bool {
        ALWAYS_ACTIVE.contains(self)
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Types that can never be excluded from a project.
pub const ALWAYS_ACTIVE: &[ComponentType] = &[
    ComponentType::Hero,
    ComponentType::RichText,
    ComponentType::Breadcrumbs,
];

// ---------------------------------------------------------------------------
// Stored kind (known or unknown)
// ---------------------------------------------------------------------------

/// The `type` field of a stored component.
///
/// Stored documents may carry type names this build does not know (data
/// written by a newer version, or hand-edited JSON). Those are kept verbatim
/// so they survive a load/save cycle and render as a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComponentKind {
    Known(ComponentType),
    Unknown(String),
}

impl ComponentKind {
    pub fn known(&self) -> Option<ComponentType> {
        match self {
            Self::Known(t) => Some(*t),
            Self::Unknown(_) => None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Known(t) => t.as_str(),
            Self::Unknown(name) => name,
        }
    }
}

impl From<String> for ComponentKind {
    fn from(name: String) -> Self {
        match ComponentType::parse(&name) {
            Some(t) => Self::Known(t),
            None => Self::Unknown(name),
        }
    }
}

impl From<ComponentKind> for String {
    fn from(kind: ComponentKind) -> Self {
        match kind {
            ComponentKind::Known(t) => t.as_str().to_string(),
            ComponentKind::Unknown(name) => name,
        }
    }
}

impl From<ComponentType> for ComponentKind {
    fn from(t: ComponentType) -> Self {
        Self::Known(t)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// Palette grouping shown in the builder sidebar and the showcase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Heroes,
    Content,
    Navigation,
    Interactive,
    Forms,
    Media,
    Listings,
    Promotional,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Heroes => "Heroes",
            Self::Content => "Content",
            Self::Navigation => "Navigation",
            Self::Interactive => "Interactive",
            Self::Forms => "Forms",
            Self::Media => "Media",
            Self::Listings => "Listings",
            Self::Promotional => "Promotional",
        }
    }
}

/// Static descriptive metadata for a component type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMeta {
    pub label: &'static str,
    pub description: &'static str,
    pub category: Category,
    /// Shown in the info popover when a placed component has no help text.
    pub default_help_text: &'static str,
}

/// Metadata for a component type.
pub fn meta(component_type: ComponentType) -> ComponentMeta {
    use ComponentType as T;
    match component_type {
        T::Hero => ComponentMeta {
            label: "Hero",
            description: "Large page-opening banner with heading, intro and call to action.",
            category: Category::Heroes,
            default_help_text: "The hero introduces the page. Keep the heading short and the intro to one or two sentences.",
        },
        T::RichText => ComponentMeta {
            label: "Rich text",
            description: "Free-form formatted body copy.",
            category: Category::Content,
            default_help_text: "General body content. Use headings to break up long passages.",
        },
        T::Breadcrumbs => ComponentMeta {
            label: "Breadcrumbs",
            description: "Trail showing where the page sits in the site structure.",
            category: Category::Navigation,
            default_help_text: "Breadcrumbs help visitors understand where they are and move up a level.",
        },
        T::CallToAction => ComponentMeta {
            label: "Call to action",
            description: "Up to three prominent action panels with buttons.",
            category: Category::Promotional,
            default_help_text: "Calls to action point visitors at the next step. Each panel should have one clear action.",
        },
        T::Accordion => ComponentMeta {
            label: "Accordion",
            description: "Expandable list of questions or sections.",
            category: Category::Interactive,
            default_help_text: "Accordions hide detail until it is asked for. Good for FAQs and long reference content.",
        },
        T::Signposts => ComponentMeta {
            label: "Signposts",
            description: "Grid of cards linking onward to other pages.",
            category: Category::Navigation,
            default_help_text: "Signposts route visitors to the main sections below this page.",
        },
        T::Stats => ComponentMeta {
            label: "Statistics",
            description: "Row of headline figures with short labels.",
            category: Category::Content,
            default_help_text: "Headline figures give quick evidence. Keep labels to a few words.",
        },
        T::FeaturedPromo => ComponentMeta {
            label: "Featured promo",
            description: "Highlighted content promotion in single, split or grid layouts.",
            category: Category::Promotional,
            default_help_text: "Featured promos spotlight priority content such as campaigns or events.",
        },
        T::Tabs => ComponentMeta {
            label: "Tabs",
            description: "Tabbed panels for related content that shares a space.",
            category: Category::Interactive,
            default_help_text: "Tabs group related content. Visitors see one panel at a time.",
        },
        T::ContactForm => ComponentMeta {
            label: "Contact form",
            description: "Enquiry form with configurable fields.",
            category: Category::Forms,
            default_help_text: "The contact form collects enquiries. Only ask for what you will use.",
        },
        T::ImageGallery => ComponentMeta {
            label: "Image gallery",
            description: "Grid or carousel of captioned image placeholders.",
            category: Category::Media,
            default_help_text: "Galleries show a set of related images. Captions should describe the image.",
        },
        T::Quote => ComponentMeta {
            label: "Quote",
            description: "Pull quote or testimonial with attribution.",
            category: Category::Content,
            default_help_text: "Quotes add a human voice. Always attribute them.",
        },
        T::NewsListing => ComponentMeta {
            label: "News listing",
            description: "List of article teasers with optional category filters.",
            category: Category::Listings,
            default_help_text: "The listing shows the latest articles. Filters let visitors narrow by category.",
        },
        T::VideoEmbed => ComponentMeta {
            label: "Video",
            description: "Embedded video placeholder with caption.",
            category: Category::Media,
            default_help_text: "Videos should have a caption and a transcript link.",
        },
    }
}

/// Default property values inserted when a component is first placed.
pub fn default_props(component_type: ComponentType) -> PropsBag {
    ComponentProps::default_for(component_type).to_bag()
}

/// Look up a component type by wire name.
pub fn lookup(name: &str) -> Option<ComponentType> {
    ComponentType::parse(name)
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// One registry entry as served to the builder UI.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    #[serde(flatten)]
    pub meta: ComponentMeta,
    pub always_active: bool,
    pub default_props: PropsBag,
    pub fields: Vec<FieldSchema>,
}

/// The whole registry in catalog order.
pub fn catalog() -> Vec<CatalogEntry> {
    ComponentType::ALL
        .iter()
        .map(|&t| CatalogEntry {
            component_type: t,
            meta: meta(t),
            always_active: t.is_always_active(),
            default_props: default_props(t),
            fields: schema::fields_for(t),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
