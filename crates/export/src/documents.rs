//! Standalone HTML documents: welcome, showcase, one per page, and the
//! error document that replaces a page which could not be built.

use wirekit_core::active::resolve_active_components;
use wirekit_core::model::{Page, PlacedComponent, Project};
use wirekit_core::registry::{self, ComponentKind, ComponentType};
use wirekit_core::render::{self, chrome, RenderNode};
use wirekit_core::types::EntityId;

use crate::links::SHOWCASE_FILE;
use crate::script::SCRIPT_FILE_NAME;

/// A component that fell back to an error placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentFailure {
    pub component_id: EntityId,
    pub component_type: String,
    pub message: String,
}

/// Serialized page plus the components that failed on it.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub html: String,
    pub failures: Vec<ComponentFailure>,
}

/// A page entry on the welcome document.
#[derive(Debug, Clone)]
pub struct PageLink<'a> {
    pub name: &'a str,
    pub file_name: &'a str,
}

/// Wrap `body` in a complete HTML document with inlined CSS.
pub fn html_document(title: &str, css: &str, body: Vec<RenderNode>) -> String {
    let head = RenderNode::element("head")
        .with_child(RenderNode::element("meta").with_attr("charset", "utf-8"))
        .with_child(
            RenderNode::element("meta")
                .with_attr("name", "viewport")
                .with_attr("content", "width=device-width, initial-scale=1"),
        )
        .with_child(RenderNode::element("title").with_text(title))
        .with_child(RenderNode::element("style").with_child(RenderNode::trusted_html(css)));

    let body = RenderNode::element("body")
        .with_children(body)
        .with_child(info_modal())
        .with_child(RenderNode::element("script").with_attr("src", SCRIPT_FILE_NAME));

    let html = RenderNode::element("html")
        .with_attr("lang", "en")
        .with_child(head)
        .with_child(body);

    let mut out = String::from("<!DOCTYPE html>\n");
    html.write_html(&mut out);
    out.push('\n');
    out
}

fn info_modal() -> RenderNode {
    RenderNode::element("div")
        .with_attr("id", "wf-info-modal")
        .with_class("wf-modal")
        .with_attr("role", "dialog")
        .with_attr("aria-modal", "true")
        .with_attr("aria-labelledby", "wf-info-title")
        .with_flag("hidden", true)
        .with_child(
            RenderNode::element("div")
                .with_class("wf-modal__dialog")
                .with_child(
                    RenderNode::element("h2")
                        .with_attr("id", "wf-info-title")
                        .with_attr("data-info-title", ""),
                )
                .with_child(RenderNode::element("p").with_attr("data-info-body", ""))
                .with_child(
                    RenderNode::element("button")
                        .with_class("wf-button")
                        .with_attr("type", "button")
                        .with_attr("data-info-close", "")
                        .with_text("Close"),
                ),
        )
}

/// Label and category shown for a component kind.
fn describe(kind: &ComponentKind) -> (String, &'static str) {
    match kind.known() {
        Some(t) => {
            let meta = registry::meta(t);
            (meta.label.to_string(), meta.category.label())
        }
        None => (kind.name().to_string(), "Unknown"),
    }
}

/// Wrap rendered markup with the data attributes read by the info modal.
pub fn component_wrapper(
    id: &str,
    kind: &ComponentKind,
    help_text: Option<&str>,
    inner: RenderNode,
) -> RenderNode {
    let (label, category) = describe(kind);
    let mut wrapper = RenderNode::element("div")
        .with_class("wf-component")
        .with_attr("data-component-id", id)
        .with_attr("data-component-type", kind.name())
        .with_attr("data-component-label", &label)
        .with_attr("data-component-category", category);
    if let Some(text) = help_text.filter(|t| !t.trim().is_empty()) {
        wrapper = wrapper.with_attr("data-help-text", text);
    }

    wrapper
        .with_child(
            RenderNode::element("div").with_class("wf-info").with_child(
                RenderNode::element("button")
                    .with_class("wf-info__button")
                    .with_attr("type", "button")
                    .with_attr("data-info-button", "")
                    .with_attr("aria-label", format!("About this component: {label}"))
                    .with_text("i"),
            ),
        )
        .with_child(inner)
}

fn render_component(component: &PlacedComponent, failures: &mut Vec<ComponentFailure>) -> RenderNode {
    let inner = match render::render(&component.kind, &component.props) {
        Ok(node) => node,
        Err(e) => {
            tracing::warn!(
                component_id = %component.id,
                component_type = %component.kind,
                error = %e,
                "Component failed to render during export",
            );
            let message = e.to_string();
            let placeholder = render::error_placeholder(component.kind.name(), &message);
            failures.push(ComponentFailure {
                component_id: component.id.clone(),
                component_type: component.kind.name().to_string(),
                message,
            });
            placeholder
        }
    };
    component_wrapper(
        &component.id,
        &component.kind,
        component.effective_help_text(),
        inner,
    )
}

/// One content page wrapped in the project's navigation and footer.
pub fn page_document(project: &Project, page: &Page, year: i32, css: &str) -> RenderedDocument {
    let mut failures = Vec::new();
    let components: Vec<RenderNode> = page
        .sorted_components()
        .into_iter()
        .map(|c| render_component(c, &mut failures))
        .collect();

    let main = RenderNode::element("main")
        .with_attr("id", "top-of-site")
        .with_attr("data-page-id", &page.id)
        .with_children(components);

    let html = html_document(
        &format!("{} | {}", page.name, project.name),
        css,
        vec![
            chrome::navigation(&project.navigation()),
            main,
            chrome::footer(&project.footer(), year),
        ],
    );
    RenderedDocument { html, failures }
}

/// Landing document listing every page.
pub fn welcome_document(
    project: &Project,
    client_name: &str,
    pages: &[PageLink<'_>],
    css: &str,
) -> String {
    let welcome = project.welcome();

    let list = if pages.is_empty() {
        RenderNode::element("p").with_text("This project has no pages yet.")
    } else {
        RenderNode::element("ul")
            .with_class("wf-index__pages")
            .with_children(pages.iter().map(|p| {
                RenderNode::element("li").with_child(
                    RenderNode::element("a")
                        .with_attr("href", p.file_name)
                        .with_text(p.name),
                )
            }))
    };

    let showcase = welcome.show_showcase_link.then(|| {
        RenderNode::element("p").with_child(
            RenderNode::element("a")
                .with_class("wf-button")
                .with_attr("href", SHOWCASE_FILE)
                .with_text("View component showcase"),
        )
    });

    let main = RenderNode::element("main").with_attr("id", "top-of-site").with_child(
        RenderNode::element("section")
            .with_class("wf-index")
            .with_child(
                RenderNode::element("p")
                    .with_class("wf-meta")
                    .with_text(format!("{client_name} · {}", project.name)),
            )
            .with_child(RenderNode::element("h1").with_text(&welcome.title))
            .with_child(RenderNode::element("p").with_text(&welcome.intro_text))
            .with_child(RenderNode::element("h2").with_text("Pages"))
            .with_child(list)
            .with_children(showcase),
    );

    html_document(&format!("{} | {}", welcome.title, project.name), css, vec![main])
}

/// Every registered component with default props, marked active or inactive
/// for this project.
pub fn showcase_document(project: &Project, css: &str) -> RenderedDocument {
    let active = resolve_active_components(project.active_components.as_deref());
    let mut failures = Vec::new();

    let entries = ComponentType::ALL.iter().map(|&t| {
        let is_active = active.contains(&t);
        let meta = registry::meta(t);
        let kind = ComponentKind::from(t);
        let component = PlacedComponent {
            id: format!("showcase-{}", t.as_str()),
            kind,
            props: registry::default_props(t),
            order: 0,
            help_text: Some(meta.description.to_string()),
        };

        RenderNode::element("section")
            .with_class("wf-showcase__entry")
            .with_class(if is_active {
                "wf-showcase__entry--active"
            } else {
                "wf-showcase__entry--inactive"
            })
            .with_attr("data-active", if is_active { "true" } else { "false" })
            .with_child(
                RenderNode::element("header")
                    .with_child(RenderNode::element("h2").with_text(meta.label))
                    .with_child(
                        RenderNode::element("span")
                            .with_class("wf-showcase__badge")
                            .with_text(format!(
                                "{} · {}",
                                meta.category.label(),
                                if is_active { "Active" } else { "Inactive" }
                            )),
                    ),
            )
            .with_child(render_component(&component, &mut failures))
    });

    let main = RenderNode::element("main")
        .with_attr("id", "top-of-site")
        .with_child(
            RenderNode::element("section")
                .with_class("wf-showcase")
                .with_child(RenderNode::element("h1").with_text("Component showcase"))
                .with_child(
                    RenderNode::element("p")
                        .with_child(RenderNode::element("a").with_attr("href", "/").with_text("Back to pages")),
                ),
        )
        .with_children(entries.collect::<Vec<_>>());

    let html = html_document(
        &format!("Component showcase | {}", project.name),
        css,
        vec![main],
    );
    RenderedDocument { html, failures }
}

/// Stand-in for a page that could not be built.
pub fn error_document(page_name: &str, message: &str, css: &str) -> String {
    let main = RenderNode::element("main").with_attr("id", "top-of-site").with_child(
        render::error_placeholder(page_name, message),
    );
    html_document(
        &format!("{page_name} | Export error"),
        css,
        vec![
            main,
            RenderNode::element("p")
                .with_child(RenderNode::element("a").with_attr("href", "/").with_text("Back to pages")),
        ],
    )
}

