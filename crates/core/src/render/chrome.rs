//! Site chrome wrapped around every content page: header navigation and footer.

use crate::model::config::{FooterConfig, LinkColumn, NavItem, NavLink, NavigationConfig};
use crate::render::node::RenderNode;

fn link(item: &NavLink) -> RenderNode {
    RenderNode::element("a")
        .with_attr("href", &item.href)
        .with_text(&item.label)
}

fn link_list(links: &[NavLink]) -> RenderNode {
    RenderNode::element("ul").with_children(
        links
            .iter()
            .map(|l| RenderNode::element("li").with_child(link(l))),
    )
}

fn link_column(column: &LinkColumn) -> RenderNode {
    RenderNode::element("div")
        .with_class("wf-link-column")
        .with_child(RenderNode::element("h3").with_text(&column.heading))
        .with_child(link_list(&column.links))
}

fn nav_item(config: &NavigationConfig, index: usize, item: &NavItem) -> RenderNode {
    let has_panel = item.dropdown.is_some() || item.mega_menu_index.is_some();
    let mut li = RenderNode::element("li")
        .with_class("wf-nav__item")
        .with_attr("data-nav-item", index.to_string());

    if !has_panel {
        return li.with_child(link(&NavLink {
            label: item.label.clone(),
            href: item.href.clone(),
        }));
    }

    li = li.with_child(
        RenderNode::element("button")
            .with_class("wf-nav__trigger")
            .with_attr("type", "button")
            .with_attr("aria-expanded", "false")
            .with_attr("aria-haspopup", "true")
            .with_text(&item.label),
    );

    if let Some(dropdown) = &item.dropdown {
        li = li.with_child(
            RenderNode::element("div")
                .with_class("wf-nav__dropdown")
                .with_attr("data-dropdown-panel", index.to_string())
                .with_flag("hidden", true)
                .with_child(link_list(dropdown)),
        );
    }

    if let Some(mega_index) = item.mega_menu_index {
        li = li.with_attr("data-mega-menu-index", mega_index.to_string());
        if let Some(menu) = config.mega_menus.get(mega_index) {
            li = li.with_child(
                RenderNode::element("div")
                    .with_class("wf-nav__mega")
                    .with_attr("data-mega-menu-panel", mega_index.to_string())
                    .with_flag("hidden", true)
                    .with_children(menu.columns.iter().map(link_column)),
            );
        }
    }

    li
}

/// Site header with primary navigation, dropdowns and mega menus.
pub fn navigation(config: &NavigationConfig) -> RenderNode {
    let brand = RenderNode::element("a")
        .with_class("wf-site-header__brand")
        .with_attr("href", "/")
        .with_text(&config.site_name);

    let toggle = RenderNode::element("button")
        .with_class("wf-site-header__toggle")
        .with_attr("type", "button")
        .with_attr("aria-expanded", "false")
        .with_attr("aria-label", "Open menu")
        .with_attr("data-mobile-menu-toggle", "")
        .with_text("Menu");

    let items = RenderNode::element("ul")
        .with_class("wf-nav__list")
        .with_children(
            config
                .items
                .iter()
                .enumerate()
                .map(|(i, item)| nav_item(config, i, item)),
        );

    let search = config.show_search.then(|| {
        RenderNode::element("form")
            .with_class("wf-site-header__search")
            .with_attr("role", "search")
            .with_attr("data-static-form", "")
            .with_child(
                RenderNode::element("input")
                    .with_attr("type", "search")
                    .with_attr("placeholder", "Search")
                    .with_attr("aria-label", "Search"),
            )
    });

    RenderNode::element("header")
        .with_class("wf-site-header")
        .with_child(brand)
        .with_child(toggle)
        .with_child(
            RenderNode::element("nav")
                .with_class("wf-nav")
                .with_attr("aria-label", "Main")
                .with_attr("data-mobile-menu", "")
                .with_child(items)
                .with_children(search),
        )
}

/// Site footer. `{year}` in the copyright text becomes `year`.
pub fn footer(config: &FooterConfig, year: i32) -> RenderNode {
    let copyright = config.copyright_text.replace("{year}", &year.to_string());

    let social = config.show_social_links.then(|| {
        RenderNode::element("ul")
            .with_class("wf-site-footer__social")
            .with_attr("aria-label", "Social links")
            .with_children(["LinkedIn", "Instagram", "YouTube"].into_iter().map(|name| {
                RenderNode::element("li").with_child(
                    RenderNode::element("a")
                        .with_attr("href", "#")
                        .with_text(name),
                )
            }))
    });

    RenderNode::element("footer")
        .with_class("wf-site-footer")
        .with_child(
            RenderNode::element("div")
                .with_class("wf-site-footer__columns")
                .with_children(config.columns.iter().map(link_column)),
        )
        .with_children(social)
        .with_child(
            RenderNode::element("p")
                .with_class("wf-site-footer__copyright")
                .with_attr("data-copyright", "")
                .with_text(copyright),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_navigation_has_dropdown_and_mega_menu() {
        let html = navigation(&NavigationConfig::default()).to_html();
        assert!(html.contains("data-mobile-menu-toggle"));
        assert!(html.contains(r#"data-dropdown-panel="1""#));
        assert!(html.contains(r#"data-mega-menu-index="0""#));
        assert!(html.contains(r#"data-mega-menu-panel="0""#));
        assert!(html.contains(r#"<a href="/contact">Contact</a>"#));
    }

    #[test]
    fn missing_mega_menu_panel_is_skipped() {
        let mut config = NavigationConfig::default();
        config.mega_menus.clear();
        let html = navigation(&config).to_html();
        assert!(!html.contains("data-mega-menu-panel"));
    }

    #[test]
    fn footer_substitutes_year() {
        let html = footer(&FooterConfig::default(), 2031).to_html();
        assert!(html.contains("© 2031 Site name"));
        assert!(html.contains("wf-site-footer__social"));
    }

    #[test]
    fn search_hidden_when_disabled() {
        let config = NavigationConfig {
            show_search: false,
            ..Default::default()
        };
        assert!(!navigation(&config).to_html().contains(r#"role="search""#));
    }
}
