//! Statically typed property shapes, one per [`ComponentType`].
//!
//! Components are stored with a loose [`PropsBag`]; this module is the single
//! place where a bag is decoded into a typed shape. Every struct uses
//! `#[serde(default)]` so missing keys fall back to the type's defaults, while
//! a key holding the wrong JSON type is a decode error.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::registry::ComponentType;
use crate::types::PropsBag;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum PropsError {
    #[error("invalid props for {component_type}: {source}")]
    Decode {
        component_type: ComponentType,
        #[source]
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Shared enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromoVariant {
    #[default]
    Single,
    Split,
    Grid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabStyle {
    #[default]
    Tabs,
    Buttons,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GalleryLayout {
    #[default]
    Grid,
    Carousel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "16:9")]
    Widescreen,
    #[serde(rename = "4:3")]
    Standard,
}

// ---------------------------------------------------------------------------
// Per-type props
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroProps {
    pub heading: String,
    pub subheading: String,
    pub button_text: String,
    pub button_link: String,
    pub show_image: bool,
    pub alignment: Alignment,
}

impl Default for HeroProps {
    fn default() -> Self {
        Self {
            heading: "Page heading".to_string(),
            subheading: "A short introduction to what this page offers.".to_string(),
            button_text: "Find out more".to_string(),
            button_link: "#".to_string(),
            show_image: true,
            alignment: Alignment::Left,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RichTextProps {
    /// User-authored HTML; sanitized at render time.
    pub content: String,
}

impl Default for RichTextProps {
    fn default() -> Self {
        Self {
            content: "<h2>Section heading</h2><p>Body copy goes here. Replace with real content once it has been agreed.</p>".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BreadcrumbsProps {
    pub show_home: bool,
    pub parent_label: String,
    pub parent_link: String,
    pub current_label: String,
}

impl Default for BreadcrumbsProps {
    fn default() -> Self {
        Self {
            show_home: true,
            parent_label: "Section".to_string(),
            parent_link: "/section".to_string(),
            current_label: "Current page".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CtaItem {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CallToActionProps {
    pub heading: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ctas: Option<Vec<CtaItem>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccordionItem {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccordionProps {
    pub heading: String,
    pub allow_multiple: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<AccordionItem>>,
}

impl Default for AccordionProps {
    fn default() -> Self {
        Self {
            heading: "Frequently asked questions".to_string(),
            allow_multiple: false,
            items: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignpostItem {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SignpostsProps {
    pub heading: String,
    pub columns: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<SignpostItem>>,
}

impl Default for SignpostsProps {
    fn default() -> Self {
        Self {
            heading: "Explore this section".to_string(),
            columns: 3,
            items: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatItem {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatsProps {
    pub heading: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<Vec<StatItem>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoItem {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_alt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeaturedPromoProps {
    pub variant: PromoVariant,
    pub heading: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promos: Option<Vec<PromoItem>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabItem {
    pub label: String,
    #[serde(default)]
    pub content: String,
}

/// Tabs are authored as numbered flat keys (`tab1Label`, ...); the renderer
/// adapter builds `tabs` from them before decoding.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TabsProps {
    pub heading: String,
    pub style: TabStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tabs: Option<Vec<TabItem>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactFormProps {
    pub heading: String,
    pub intro: String,
    pub show_phone: bool,
    pub show_company: bool,
    pub show_message: bool,
    pub submit_label: String,
}

impl Default for ContactFormProps {
    fn default() -> Self {
        Self {
            heading: "Get in touch".to_string(),
            intro: "Fill in the form and we will get back to you.".to_string(),
            show_phone: true,
            show_company: false,
            show_message: true,
            submit_label: "Send enquiry".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub caption: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// Galleries are authored as numbered flat keys (`image1Caption`, ...),
/// converted into `images` by the renderer adapter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageGalleryProps {
    pub heading: String,
    pub layout: GalleryLayout,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<GalleryImage>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuoteProps {
    pub quote: String,
    pub attribution: String,
    pub role: String,
}

impl Default for QuoteProps {
    fn default() -> Self {
        Self {
            quote: "Working with the team transformed how we talk to our customers.".to_string(),
            attribution: "Alex Morgan".to_string(),
            role: "Head of Marketing".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewsListingProps {
    pub heading: String,
    pub item_count: u32,
    pub show_filters: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}

impl Default for NewsListingProps {
    fn default() -> Self {
        Self {
            heading: "Latest news".to_string(),
            item_count: 6,
            show_filters: true,
            categories: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoEmbedProps {
    pub title: String,
    pub caption: String,
    pub aspect_ratio: AspectRatio,
}

impl Default for VideoEmbedProps {
    fn default() -> Self {
        Self {
            title: "Introductory video".to_string(),
            caption: "A two minute overview.".to_string(),
            aspect_ratio: AspectRatio::Widescreen,
        }
    }
}

// ---------------------------------------------------------------------------
// Tagged union
// ---------------------------------------------------------------------------

/// Typed props for any registered component type.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentProps {
    Hero(HeroProps),
    RichText(RichTextProps),
    Breadcrumbs(BreadcrumbsProps),
    CallToAction(CallToActionProps),
    Accordion(AccordionProps),
    Signposts(SignpostsProps),
    Stats(StatsProps),
    FeaturedPromo(FeaturedPromoProps),
    Tabs(TabsProps),
    ContactForm(ContactFormProps),
    ImageGallery(ImageGalleryProps),
    Quote(QuoteProps),
    NewsListing(NewsListingProps),
    VideoEmbed(VideoEmbedProps),
}

fn decode_as<T: DeserializeOwned>(
    component_type: ComponentType,
    bag: &PropsBag,
) -> Result<T, PropsError> {
    serde_json::from_value(serde_json::Value::Object(bag.clone())).map_err(|source| {
        PropsError::Decode {
            component_type,
            source,
        }
    })
}

fn encode<T: Serialize>(value: &T) -> PropsBag {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::Object(map)) => map,
        _ => PropsBag::new(),
    }
}

impl ComponentProps {
    /// Decode a stored property bag into the typed shape for `component_type`.
    pub fn decode(component_type: ComponentType, bag: &PropsBag) -> Result<Self, PropsError> {
        use ComponentType as T;
        Ok(match component_type {
            T::Hero => Self::Hero(decode_as(component_type, bag)?),
            T::RichText => Self::RichText(decode_as(component_type, bag)?),
            T::Breadcrumbs => Self::Breadcrumbs(decode_as(component_type, bag)?),
            T::CallToAction => Self::CallToAction(decode_as(component_type, bag)?),
            T::Accordion => Self::Accordion(decode_as(component_type, bag)?),
            T::Signposts => Self::Signposts(decode_as(component_type, bag)?),
            T::Stats => Self::Stats(decode_as(component_type, bag)?),
            T::FeaturedPromo => Self::FeaturedPromo(decode_as(component_type, bag)?),
            T::Tabs => Self::Tabs(decode_as(component_type, bag)?),
            T::ContactForm => Self::ContactForm(decode_as(component_type, bag)?),
            T::ImageGallery => Self::ImageGallery(decode_as(component_type, bag)?),
            T::Quote => Self::Quote(decode_as(component_type, bag)?),
            T::NewsListing => Self::NewsListing(decode_as(component_type, bag)?),
            T::VideoEmbed => Self::VideoEmbed(decode_as(component_type, bag)?),
        })
    }

    /// Default props for a freshly placed component.
    pub fn default_for(component_type: ComponentType) -> Self {
        use ComponentType as T;
        match component_type {
            T::Hero => Self::Hero(HeroProps::default()),
            T::RichText => Self::RichText(RichTextProps::default()),
            T::Breadcrumbs => Self::Breadcrumbs(BreadcrumbsProps::default()),
            T::CallToAction => Self::CallToAction(CallToActionProps {
                heading: "Ready to take the next step?".to_string(),
                ctas: None,
            }),
            T::Accordion => Self::Accordion(AccordionProps::default()),
            T::Signposts => Self::Signposts(SignpostsProps::default()),
            T::Stats => Self::Stats(StatsProps {
                heading: "At a glance".to_string(),
                stats: None,
            }),
            T::FeaturedPromo => Self::FeaturedPromo(FeaturedPromoProps {
                variant: PromoVariant::Single,
                heading: "Featured".to_string(),
                promos: None,
            }),
            T::Tabs => Self::Tabs(TabsProps {
                heading: "More information".to_string(),
                style: TabStyle::Tabs,
                tabs: None,
            }),
            T::ContactForm => Self::ContactForm(ContactFormProps::default()),
            T::ImageGallery => Self::ImageGallery(ImageGalleryProps {
                heading: "Gallery".to_string(),
                layout: GalleryLayout::Grid,
                images: None,
            }),
            T::Quote => Self::Quote(QuoteProps::default()),
            T::NewsListing => Self::NewsListing(NewsListingProps::default()),
            T::VideoEmbed => Self::VideoEmbed(VideoEmbedProps::default()),
        }
    }

    pub fn component_type(&self) -> ComponentType {
        match self {
            Self::Hero(_) => ComponentType::Hero,
            Self::RichText(_) => ComponentType::RichText,
            Self::Breadcrumbs(_) => ComponentType::Breadcrumbs,
            Self::CallToAction(_) => ComponentType::CallToAction,
            Self::Accordion(_) => ComponentType::Accordion,
            Self::Signposts(_) => ComponentType::Signposts,
            Self::Stats(_) => ComponentType::Stats,
            Self::FeaturedPromo(_) => ComponentType::FeaturedPromo,
            Self::Tabs(_) => ComponentType::Tabs,
            Self::ContactForm(_) => ComponentType::ContactForm,
            Self::ImageGallery(_) => ComponentType::ImageGallery,
            Self::Quote(_) => ComponentType::Quote,
            Self::NewsListing(_) => ComponentType::NewsListing,
            Self::VideoEmbed(_) => ComponentType::VideoEmbed,
        }
    }

    /// Encode back into the loose storage shape.
    pub fn to_bag(&self) -> PropsBag {
        match self {
            Self::Hero(p) => encode(p),
            Self::RichText(p) => encode(p),
            Self::Breadcrumbs(p) => encode(p),
            Self::CallToAction(p) => encode(p),
            Self::Accordion(p) => encode(p),
            Self::Signposts(p) => encode(p),
            Self::Stats(p) => encode(p),
            Self::FeaturedPromo(p) => encode(p),
            Self::Tabs(p) => encode(p),
            Self::ContactForm(p) => encode(p),
            Self::ImageGallery(p) => encode(p),
            Self::Quote(p) => encode(p),
            Self::NewsListing(p) => encode(p),
            Self::VideoEmbed(p) => encode(p),
        }
    }
}

/// Treat `Some(vec![])` the same as `None`: fall back to built-in defaults.
pub fn non_empty<T>(items: &Option<Vec<T>>) -> Option<&[T]> {
    items.as_deref().filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn bag(value: serde_json::Value) -> PropsBag {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn missing_keys_use_defaults() {
        let props = ComponentProps::decode(ComponentType::Hero, &PropsBag::new()).unwrap();
        assert_eq!(props, ComponentProps::Hero(HeroProps::default()));
    }

    #[test]
    fn partial_bag_overrides_only_given_keys() {
        let props = ComponentProps::decode(
            ComponentType::Hero,
            &bag(json!({ "heading": "Welcome", "alignment": "center" })),
        )
        .unwrap();
        let ComponentProps::Hero(hero) = props else {
            panic!("expected hero props");
        };
        assert_eq!(hero.heading, "Welcome");
        assert_eq!(hero.alignment, Alignment::Center);
        assert_eq!(hero.button_text, HeroProps::default().button_text);
    }

    #[test]
    fn wrong_json_type_is_a_decode_error() {
        let result = ComponentProps::decode(
            ComponentType::Signposts,
            &bag(json!({ "items": "first|second" })),
        );
        assert_matches!(
            result,
            Err(PropsError::Decode {
                component_type: ComponentType::Signposts,
                ..
            })
        );
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let result = ComponentProps::decode(
            ComponentType::Quote,
            &bag(json!({ "quote": "Hi", "item0Title": "stray" })),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn to_bag_omits_absent_lists() {
        let bag = ComponentProps::default_for(ComponentType::Accordion).to_bag();
        assert!(!bag.contains_key("items"));
        assert_eq!(bag["heading"], "Frequently asked questions");
    }

    #[test]
    fn aspect_ratio_uses_ratio_strings() {
        let bag = ComponentProps::VideoEmbed(VideoEmbedProps {
            aspect_ratio: AspectRatio::Standard,
            ..Default::default()
        })
        .to_bag();
        assert_eq!(bag["aspectRatio"], "4:3");
    }

    #[test]
    fn component_type_matches_variant() {
        for t in ComponentType::ALL {
            assert_eq!(ComponentProps::default_for(t).component_type(), t);
        }
    }

    #[test]
    fn non_empty_treats_empty_vec_as_absent() {
        let empty: Option<Vec<u8>> = Some(vec![]);
        assert!(non_empty(&empty).is_none());
        assert_eq!(non_empty(&Some(vec![1u8])), Some(&[1u8][..]));
    }
}
