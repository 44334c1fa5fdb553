//! Render functions, one per component type.
//!
//! Each function is pure: typed props in, [`RenderNode`] out. Interactive
//! behaviour is expressed only through classes, ARIA attributes and `data-*`
//! hooks so the same markup works in the live builder and in the static
//! export (where `interactivity.js` attaches the listeners).

use crate::props::{
    non_empty, AccordionItem, AccordionProps, Alignment, AspectRatio, BreadcrumbsProps,
    CallToActionProps, ComponentProps, ContactFormProps, CtaItem, FeaturedPromoProps,
    GalleryImage, GalleryLayout, HeroProps, ImageGalleryProps, NewsListingProps, PromoItem,
    PromoVariant, QuoteProps, RichTextProps, SignpostItem, SignpostsProps, StatItem, StatsProps,
    TabItem, TabStyle, TabsProps, VideoEmbedProps,
};
use crate::render::node::RenderNode;

/// Dispatch typed props to the matching render function.
pub fn render_props(props: &ComponentProps) -> RenderNode {
    match props {
        ComponentProps::Hero(p) => hero(p),
        ComponentProps::RichText(p) => rich_text(p),
        ComponentProps::Breadcrumbs(p) => breadcrumbs(p),
        ComponentProps::CallToAction(p) => call_to_action(p),
        ComponentProps::Accordion(p) => accordion(p),
        ComponentProps::Signposts(p) => signposts(p),
        ComponentProps::Stats(p) => stats(p),
        ComponentProps::FeaturedPromo(p) => featured_promo(p),
        ComponentProps::Tabs(p) => tabs(p),
        ComponentProps::ContactForm(p) => contact_form(p),
        ComponentProps::ImageGallery(p) => image_gallery(p),
        ComponentProps::Quote(p) => quote(p),
        ComponentProps::NewsListing(p) => news_listing(p),
        ComponentProps::VideoEmbed(p) => video_embed(p),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn heading(level: u8, text: &str) -> Option<RenderNode> {
    let text = text.trim();
    (!text.is_empty()).then(|| RenderNode::element(format!("h{level}")).with_text(text))
}

fn paragraph(class: &str, text: Option<&str>) -> Option<RenderNode> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| RenderNode::element("p").with_class(class).with_text(t))
}

fn link_or_hash(link: Option<&str>) -> String {
    link.map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or("#")
        .to_string()
}

fn placeholder_image(label: &str) -> RenderNode {
    RenderNode::element("div")
        .with_class("wf-placeholder-image")
        .with_attr("role", "img")
        .with_attr("aria-label", label)
}

fn tag_label(tag: Option<&str>) -> Option<RenderNode> {
    tag.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| RenderNode::element("span").with_class("wf-tag").with_text(t))
}

fn section(class: &str) -> RenderNode {
    RenderNode::element("section").with_class(class)
}

// ---------------------------------------------------------------------------
// Heroes & content
// ---------------------------------------------------------------------------

fn hero(p: &HeroProps) -> RenderNode {
    let alignment = match p.alignment {
        Alignment::Left => "wf-hero--left",
        Alignment::Center => "wf-hero--center",
    };

    let button = (!p.button_text.trim().is_empty()).then(|| {
        RenderNode::element("a")
            .with_class("wf-button")
            .with_attr("href", link_or_hash(Some(p.button_link.as_str())))
            .with_text(p.button_text.trim())
    });

    let content = RenderNode::element("div")
        .with_class("wf-hero__content")
        .with_children(heading(1, &p.heading))
        .with_children(paragraph("wf-hero__intro", Some(p.subheading.as_str())))
        .with_children(button);

    section("wf-hero")
        .with_class(alignment)
        .with_child(content)
        .with_children(
            p.show_image
                .then(|| placeholder_image("Hero image placeholder").with_class("wf-hero__image")),
        )
}

fn rich_text(p: &RichTextProps) -> RenderNode {
    RenderNode::element("div")
        .with_class("wf-rich-text")
        .with_child(RenderNode::rich_text(&p.content))
}

fn breadcrumbs(p: &BreadcrumbsProps) -> RenderNode {
    let crumb = |label: &str, href: &str| {
        RenderNode::element("li").with_child(
            RenderNode::element("a")
                .with_attr("href", href)
                .with_text(label),
        )
    };

    let mut list = RenderNode::element("ol");
    if p.show_home {
        list = list.with_child(crumb("Home", "/"));
    }
    if !p.parent_label.trim().is_empty() {
        list = list.with_child(crumb(
            p.parent_label.trim(),
            &link_or_hash(Some(p.parent_link.as_str())),
        ));
    }
    list = list.with_child(
        RenderNode::element("li")
            .with_attr("aria-current", "page")
            .with_text(p.current_label.trim()),
    );

    RenderNode::element("nav")
        .with_class("wf-breadcrumbs")
        .with_attr("aria-label", "Breadcrumb")
        .with_child(list)
}

fn stats(p: &StatsProps) -> RenderNode {
    let defaults = [
        StatItem { value: "120+".into(), label: Some("Clients supported".into()) },
        StatItem { value: "98%".into(), label: Some("Would recommend us".into()) },
        StatItem { value: "15".into(), label: Some("Years of experience".into()) },
    ];
    let items = non_empty(&p.stats).unwrap_or(&defaults);

    let list = RenderNode::element("dl").with_class("wf-stats__list").with_children(
        items.iter().map(|s| {
            RenderNode::element("div")
                .with_class("wf-stat")
                .with_child(
                    RenderNode::element("dt")
                        .with_class("wf-stat__value")
                        .with_text(s.value.trim()),
                )
                .with_children(s.label.as_deref().map(|label| {
                    RenderNode::element("dd")
                        .with_class("wf-stat__label")
                        .with_text(label)
                }))
        }),
    );

    section("wf-stats")
        .with_children(heading(2, &p.heading))
        .with_child(list)
}

fn quote(p: &QuoteProps) -> RenderNode {
    let mut caption = RenderNode::element("figcaption").with_child(
        RenderNode::element("span")
            .with_class("wf-quote__name")
            .with_text(p.attribution.trim()),
    );
    if !p.role.trim().is_empty() {
        caption = caption.with_text(", ").with_child(
            RenderNode::element("span")
                .with_class("wf-quote__role")
                .with_text(p.role.trim()),
        );
    }

    RenderNode::element("figure")
        .with_class("wf-quote")
        .with_child(
            RenderNode::element("blockquote")
                .with_child(RenderNode::element("p").with_text(p.quote.trim())),
        )
        .with_child(caption)
}

// ---------------------------------------------------------------------------
// Promotional & navigation
// ---------------------------------------------------------------------------

fn call_to_action(p: &CallToActionProps) -> RenderNode {
    let defaults = [
        CtaItem {
            title: "Talk to us".into(),
            description: Some("Book a call with the team to discuss your needs.".into()),
            button_text: Some("Contact us".into()),
            button_link: Some("/contact".into()),
        },
        CtaItem {
            title: "Download the brochure".into(),
            description: Some("Everything you need to know in one place.".into()),
            button_text: Some("Download".into()),
            button_link: None,
        },
    ];
    let items = non_empty(&p.ctas).unwrap_or(&defaults);

    let panels = RenderNode::element("div")
        .with_class("wf-cta__panels")
        .with_children(items.iter().map(|cta| {
            RenderNode::element("div")
                .with_class("wf-cta__panel")
                .with_children(heading(3, &cta.title))
                .with_children(paragraph("wf-cta__description", cta.description.as_deref()))
                .with_child(
                    RenderNode::element("a")
                        .with_class("wf-button")
                        .with_attr("href", link_or_hash(cta.button_link.as_deref()))
                        .with_text(
                            cta.button_text
                                .as_deref()
                                .map(str::trim)
                                .filter(|t| !t.is_empty())
                                .unwrap_or("Find out more"),
                        ),
                )
        }));

    section("wf-cta")
        .with_children(heading(2, &p.heading))
        .with_child(panels)
}

fn signposts(p: &SignpostsProps) -> RenderNode {
    let defaults: Vec<SignpostItem> = (1..=3)
        .map(|n| SignpostItem {
            title: format!("Signpost {n}"),
            subtitle: Some("A short description of where this link goes.".into()),
            tag: None,
            link: None,
        })
        .collect();
    let items = non_empty(&p.items).unwrap_or(&defaults);
    let columns = p.columns.clamp(2, 4);

    let grid = RenderNode::element("div")
        .with_class("wf-card-grid")
        .with_children(items.iter().map(|item| {
            RenderNode::element("a")
                .with_class("wf-card")
                .with_attr("href", link_or_hash(item.link.as_deref()))
                .with_children(tag_label(item.tag.as_deref()))
                .with_children(heading(3, &item.title))
                .with_children(paragraph("wf-card__subtitle", item.subtitle.as_deref()))
        }));

    section("wf-signposts")
        .with_class(&format!("wf-signposts--cols-{columns}"))
        .with_children(heading(2, &p.heading))
        .with_child(grid)
}

fn featured_promo(p: &FeaturedPromoProps) -> RenderNode {
    let (variant_class, shown) = match p.variant {
        PromoVariant::Single => ("wf-promo--single", 1),
        PromoVariant::Split => ("wf-promo--split", 2),
        PromoVariant::Grid => ("wf-promo--grid", 3),
    };
    let defaults: Vec<PromoItem> = (1..=3)
        .map(|n| PromoItem {
            title: format!("Featured item {n}"),
            subtitle: Some("Supporting copy for the featured item.".into()),
            tag: Some("Featured".into()),
            image_alt: None,
        })
        .collect();
    let items = non_empty(&p.promos).unwrap_or(&defaults);

    section("wf-promo")
        .with_class(variant_class)
        .with_children(heading(2, &p.heading))
        .with_children(items.iter().take(shown).map(|item| {
            let alt = item
                .image_alt
                .as_deref()
                .filter(|a| !a.trim().is_empty())
                .unwrap_or(&item.title);
            RenderNode::element("article")
                .with_class("wf-promo__item")
                .with_child(placeholder_image(alt))
                .with_child(
                    RenderNode::element("div")
                        .with_class("wf-promo__body")
                        .with_children(tag_label(item.tag.as_deref()))
                        .with_children(heading(3, &item.title))
                        .with_children(paragraph("wf-promo__subtitle", item.subtitle.as_deref())),
                )
        }))
}

// ---------------------------------------------------------------------------
// Interactive
// ---------------------------------------------------------------------------

fn accordion(p: &AccordionProps) -> RenderNode {
    let defaults: Vec<AccordionItem> = (1..=3)
        .map(|n| AccordionItem {
            title: format!("Question {n}"),
            content: Some("<p>The answer to this question.</p>".into()),
        })
        .collect();
    let items = non_empty(&p.items).unwrap_or(&defaults);

    section("wf-accordion")
        .with_attr("data-accordion", "")
        .with_flag("data-accordion-multiple", p.allow_multiple)
        .with_children(heading(2, &p.heading))
        .with_children(items.iter().map(|item| {
            RenderNode::element("div")
                .with_class("wf-accordion__item")
                .with_child(
                    RenderNode::element("button")
                        .with_class("wf-accordion__trigger")
                        .with_attr("type", "button")
                        .with_attr("aria-expanded", "false")
                        .with_attr("data-accordion-trigger", "")
                        .with_text(item.title.trim()),
                )
                .with_child(
                    RenderNode::element("div")
                        .with_class("wf-accordion__panel")
                        .with_flag("hidden", true)
                        .with_child(RenderNode::rich_text(
                            item.content.as_deref().unwrap_or_default(),
                        )),
                )
        }))
}

fn tabs(p: &TabsProps) -> RenderNode {
    let defaults: Vec<TabItem> = (1..=3)
        .map(|n| TabItem {
            label: format!("Tab {n}"),
            content: format!("<p>Content for tab {n}.</p>"),
        })
        .collect();
    let items = non_empty(&p.tabs).unwrap_or(&defaults);

    let body = match p.style {
        TabStyle::Tabs => {
            let list = RenderNode::element("div")
                .with_class("wf-tabs__list")
                .with_attr("role", "tablist")
                .with_children(items.iter().enumerate().map(|(i, tab)| {
                    RenderNode::element("button")
                        .with_class("wf-tabs__tab")
                        .with_attr("type", "button")
                        .with_attr("role", "tab")
                        .with_attr("data-tab-index", i.to_string())
                        .with_attr("aria-selected", if i == 0 { "true" } else { "false" })
                        .with_attr("tabindex", if i == 0 { "0" } else { "-1" })
                        .with_text(tab.label.trim())
                }));
            let panels = items.iter().enumerate().map(|(i, tab)| {
                RenderNode::element("div")
                    .with_class("wf-tabs__panel")
                    .with_attr("role", "tabpanel")
                    .with_attr("data-tab-index", i.to_string())
                    .with_flag("hidden", i != 0)
                    .with_child(RenderNode::rich_text(&tab.content))
            });
            RenderNode::element("div")
                .with_class("wf-tabs")
                .with_attr("data-tabs", "")
                .with_child(list)
                .with_children(panels)
        }
        TabStyle::Buttons => {
            let group = RenderNode::element("div")
                .with_class("wf-button-group")
                .with_attr("role", "group")
                .with_children(items.iter().enumerate().map(|(i, tab)| {
                    let button = RenderNode::element("button")
                        .with_class("wf-button-group__button")
                        .with_attr("type", "button")
                        .with_attr("data-tab-target", i.to_string())
                        .with_attr("aria-pressed", if i == 0 { "true" } else { "false" })
                        .with_text(tab.label.trim());
                    if i == 0 {
                        button.with_class("is-active")
                    } else {
                        button
                    }
                }));
            let panels = items.iter().enumerate().map(|(i, tab)| {
                RenderNode::element("div")
                    .with_class("wf-button-group__panel")
                    .with_attr("data-tab-content", i.to_string())
                    .with_flag("hidden", i != 0)
                    .with_child(RenderNode::rich_text(&tab.content))
            });
            RenderNode::element("div")
                .with_class("wf-button-tabs")
                .with_attr("data-button-group", "")
                .with_child(group)
                .with_children(panels)
        }
    };

    section("wf-tabs-section")
        .with_children(heading(2, &p.heading))
        .with_child(body)
}

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

fn form_field(id: &str, label: &str, input_type: &str, required: bool) -> RenderNode {
    let control = if input_type == "textarea" {
        RenderNode::element("textarea")
            .with_attr("id", id)
            .with_attr("name", id)
            .with_attr("rows", "5")
    } else {
        RenderNode::element("input")
            .with_attr("id", id)
            .with_attr("name", id)
            .with_attr("type", input_type)
    };

    RenderNode::element("div")
        .with_class("wf-form__field")
        .with_child(
            RenderNode::element("label")
                .with_attr("for", id)
                .with_text(if required {
                    format!("{label} (required)")
                } else {
                    label.to_string()
                }),
        )
        .with_child(control.with_flag("required", required))
}

fn contact_form(p: &ContactFormProps) -> RenderNode {
    let mut form = RenderNode::element("form")
        .with_class("wf-form")
        .with_attr("action", "#")
        .with_attr("method", "post")
        .with_attr("data-static-form", "")
        .with_child(form_field("name", "Name", "text", true))
        .with_child(form_field("email", "Email", "email", true));

    if p.show_phone {
        form = form.with_child(form_field("phone", "Phone", "tel", false));
    }
    if p.show_company {
        form = form.with_child(form_field("company", "Company", "text", false));
    }
    if p.show_message {
        form = form.with_child(form_field("message", "Message", "textarea", false));
    }

    let submit = if p.submit_label.trim().is_empty() {
        "Submit"
    } else {
        p.submit_label.trim()
    };
    form = form.with_child(
        RenderNode::element("button")
            .with_class("wf-button")
            .with_attr("type", "submit")
            .with_text(submit),
    );

    section("wf-contact-form")
        .with_children(heading(2, &p.heading))
        .with_children(paragraph("wf-contact-form__intro", Some(p.intro.as_str())))
        .with_child(form)
}

// ---------------------------------------------------------------------------
// Media & listings
// ---------------------------------------------------------------------------

fn image_gallery(p: &ImageGalleryProps) -> RenderNode {
    let defaults: Vec<GalleryImage> = (1..=6)
        .map(|n| GalleryImage {
            caption: format!("Image {n}"),
            alt: None,
        })
        .collect();
    let images = non_empty(&p.images).unwrap_or(&defaults);

    let figures = images.iter().map(|image| {
        let alt = image
            .alt
            .as_deref()
            .filter(|a| !a.trim().is_empty())
            .unwrap_or(&image.caption);
        RenderNode::element("li").with_class("wf-gallery__item").with_child(
            RenderNode::element("figure")
                .with_child(placeholder_image(alt))
                .with_child(RenderNode::element("figcaption").with_text(image.caption.trim())),
        )
    });
    let list = RenderNode::element("ul")
        .with_class("wf-gallery__list")
        .with_children(figures);

    let body = match p.layout {
        GalleryLayout::Grid => list,
        GalleryLayout::Carousel => RenderNode::element("div")
            .with_class("wf-carousel")
            .with_attr("data-carousel", "")
            .with_child(
                RenderNode::element("button")
                    .with_class("wf-carousel__prev")
                    .with_attr("type", "button")
                    .with_attr("data-carousel-prev", "")
                    .with_attr("aria-label", "Previous image")
                    .with_text("‹"),
            )
            .with_child(list)
            .with_child(
                RenderNode::element("button")
                    .with_class("wf-carousel__next")
                    .with_attr("type", "button")
                    .with_attr("data-carousel-next", "")
                    .with_attr("aria-label", "Next image")
                    .with_text("›"),
            ),
    };

    let layout_class = match p.layout {
        GalleryLayout::Grid => "wf-gallery--grid",
        GalleryLayout::Carousel => "wf-gallery--carousel",
    };

    section("wf-gallery")
        .with_class(layout_class)
        .with_children(heading(2, &p.heading))
        .with_child(body)
}

fn category_slug(category: &str) -> String {
    category.trim().to_lowercase().split_whitespace().collect::<Vec<_>>().join("-")
}

fn news_listing(p: &NewsListingProps) -> RenderNode {
    let default_categories = ["News".to_string(), "Events".to_string(), "Insights".to_string()];
    let categories = non_empty(&p.categories).unwrap_or(&default_categories);
    let count = p.item_count.clamp(1, 12) as usize;

    let filters = p.show_filters.then(|| {
        let all = RenderNode::element("button")
            .with_class("wf-filter")
            .with_class("is-active")
            .with_attr("type", "button")
            .with_attr("data-filter", "all")
            .with_attr("aria-pressed", "true")
            .with_text("All");
        RenderNode::element("div")
            .with_class("wf-filter-group")
            .with_attr("role", "group")
            .with_attr("aria-label", "Filter by category")
            .with_attr("data-filter-group", "")
            .with_child(all)
            .with_children(categories.iter().map(|c| {
                RenderNode::element("button")
                    .with_class("wf-filter")
                    .with_attr("type", "button")
                    .with_attr("data-filter", category_slug(c))
                    .with_attr("aria-pressed", "false")
                    .with_text(c.trim())
            }))
    });

    let items = (0..count).map(|i| {
        let category = &categories[i % categories.len()];
        RenderNode::element("li")
            .with_class("wf-news-item")
            .with_attr("data-category", category_slug(category))
            .with_child(placeholder_image("Article image placeholder"))
            .with_children(tag_label(Some(category.as_str())))
            .with_child(
                RenderNode::element("h3").with_child(
                    RenderNode::element("a")
                        .with_attr("href", "#")
                        .with_text(format!("Article headline {}", i + 1)),
                ),
            )
            .with_child(
                RenderNode::element("p")
                    .with_class("wf-meta")
                    .with_text("Publication date"),
            )
            .with_child(
                RenderNode::element("p")
                    .with_text("A one or two sentence teaser summarising the article."),
            )
    });

    section("wf-news-listing")
        .with_children(heading(2, &p.heading))
        .with_children(filters)
        .with_child(
            RenderNode::element("ul")
                .with_class("wf-news-list")
                .with_children(items),
        )
}

fn video_embed(p: &VideoEmbedProps) -> RenderNode {
    let ratio = match p.aspect_ratio {
        AspectRatio::Widescreen => "wf-ratio-16-9",
        AspectRatio::Standard => "wf-ratio-4-3",
    };

    let mut caption = RenderNode::element("figcaption");
    if !p.title.trim().is_empty() {
        caption = caption.with_child(RenderNode::element("strong").with_text(p.title.trim()));
    }
    if !p.caption.trim().is_empty() {
        caption = caption.with_text(format!(" {}", p.caption.trim()));
    }

    RenderNode::element("figure")
        .with_class("wf-video")
        .with_child(
            RenderNode::element("div")
                .with_class("wf-video__frame")
                .with_class(ratio)
                .with_attr("role", "img")
                .with_attr("aria-label", format!("Video placeholder: {}", p.title.trim()))
                .with_child(
                    RenderNode::element("span")
                        .with_class("wf-video__play")
                        .with_attr("aria-hidden", "true")
                        .with_text("▶"),
                ),
        )
        .with_child(caption)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ComponentType;

    #[test]
    fn every_type_renders_with_defaults() {
        for t in ComponentType::ALL {
            let html = render_props(&ComponentProps::default_for(t)).to_html();
            assert!(!html.is_empty(), "{t}");
        }
    }

    #[test]
    fn accordion_items_start_collapsed() {
        let html = accordion(&AccordionProps {
            items: Some(vec![AccordionItem {
                title: "Q".into(),
                content: Some("<p>A</p>".into()),
            }]),
            ..Default::default()
        })
        .to_html();
        assert!(html.contains(r#"aria-expanded="false""#));
        assert!(html.contains(r#"<div class="wf-accordion__panel" hidden><p>A</p></div>"#));
        assert!(html.contains("data-accordion"));
    }

    #[test]
    fn tabs_use_aria_tablist_and_show_first_panel() {
        let html = tabs(&TabsProps::default()).to_html();
        assert!(html.contains(r#"role="tablist""#));
        assert_eq!(html.matches(r#"role="tab""#).count(), 3);
        assert!(html.contains(
            r#"<div class="wf-tabs__panel" role="tabpanel" data-tab-index="0"><p>"#
        ));
        assert!(html.contains(r#"data-tab-index="1" hidden>"#));
    }

    #[test]
    fn tabs_button_style_uses_button_group() {
        let html = tabs(&TabsProps {
            style: TabStyle::Buttons,
            ..Default::default()
        })
        .to_html();
        assert!(html.contains("data-button-group"));
        assert!(html.contains(r#"data-tab-target="2""#));
        assert!(!html.contains(r#"role="tablist""#));
    }

    #[test]
    fn promo_variant_limits_items() {
        let props = FeaturedPromoProps {
            variant: PromoVariant::Split,
            ..Default::default()
        };
        let html = featured_promo(&props).to_html();
        assert_eq!(html.matches("wf-promo__item").count(), 2);
    }

    #[test]
    fn signpost_columns_are_clamped() {
        let html = signposts(&SignpostsProps {
            columns: 9,
            ..Default::default()
        })
        .to_html();
        assert!(html.contains("wf-signposts--cols-4"));
    }

    #[test]
    fn contact_form_toggles_fields() {
        let html = contact_form(&ContactFormProps {
            show_phone: false,
            show_company: true,
            ..Default::default()
        })
        .to_html();
        assert!(!html.contains(r#"name="phone""#));
        assert!(html.contains(r#"name="company""#));
        assert!(html.contains("<textarea"));
    }

    #[test]
    fn news_listing_clamps_item_count() {
        let html = news_listing(&NewsListingProps {
            item_count: 40,
            ..Default::default()
        })
        .to_html();
        assert_eq!(html.matches("<li class=\"wf-news-item\"").count(), 12);
    }

    #[test]
    fn hero_without_button_text_omits_button() {
        let html = hero(&HeroProps {
            button_text: "  ".into(),
            ..Default::default()
        })
        .to_html();
        assert!(!html.contains("wf-button"));
    }
}
