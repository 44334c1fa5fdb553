//! Site-wide configuration attached to a project.
//!
//! Each config is optional on the project and falls back to its `Default`.
//! Hand-edited JSON passes through the `parse_*` validators before it is
//! accepted; a rejected document leaves the stored config untouched.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed {config}: {source}")]
    Malformed {
        config: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {config}: {message}")]
    Invalid {
        config: &'static str,
        message: String,
    },
}

fn invalid(config: &'static str, message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        config,
        message: message.into(),
    }
}

// ---------------------------------------------------------------------------
// Shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

impl NavLink {
    fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub label: String,
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropdown: Option<Vec<NavLink>>,
    /// Index into [`NavigationConfig::mega_menus`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mega_menu_index: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkColumn {
    pub heading: String,
    pub links: Vec<NavLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MegaMenu {
    pub columns: Vec<LinkColumn>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationConfig {
    pub site_name: String,
    pub items: Vec<NavItem>,
    #[serde(default)]
    pub mega_menus: Vec<MegaMenu>,
    #[serde(default)]
    pub show_search: bool,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            site_name: "Site name".to_string(),
            items: vec![
                NavItem {
                    label: "Home".to_string(),
                    href: "/".to_string(),
                    dropdown: None,
                    mega_menu_index: None,
                },
                NavItem {
                    label: "About".to_string(),
                    href: "/about".to_string(),
                    dropdown: Some(vec![
                        NavLink::new("Our team", "/our-team"),
                        NavLink::new("Our history", "/our-history"),
                    ]),
                    mega_menu_index: None,
                },
                NavItem {
                    label: "Services".to_string(),
                    href: "/services".to_string(),
                    dropdown: None,
                    mega_menu_index: Some(0),
                },
                NavItem {
                    label: "Contact".to_string(),
                    href: "/contact".to_string(),
                    dropdown: None,
                    mega_menu_index: None,
                },
            ],
            mega_menus: vec![MegaMenu {
                columns: vec![
                    LinkColumn {
                        heading: "Consulting".to_string(),
                        links: vec![
                            NavLink::new("Strategy", "/strategy"),
                            NavLink::new("Research", "/research"),
                        ],
                    },
                    LinkColumn {
                        heading: "Delivery".to_string(),
                        links: vec![
                            NavLink::new("Design", "/design"),
                            NavLink::new("Build", "/build"),
                        ],
                    },
                    LinkColumn {
                        heading: "Support".to_string(),
                        links: vec![NavLink::new("Managed services", "/managed-services")],
                    },
                ],
            }],
            show_search: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterConfig {
    pub columns: Vec<LinkColumn>,
    /// `{year}` is replaced with the current year when rendered.
    pub copyright_text: String,
    #[serde(default)]
    pub show_social_links: bool,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            columns: vec![
                LinkColumn {
                    heading: "About".to_string(),
                    links: vec![
                        NavLink::new("About us", "/about"),
                        NavLink::new("Careers", "/careers"),
                    ],
                },
                LinkColumn {
                    heading: "Help".to_string(),
                    links: vec![
                        NavLink::new("Contact", "/contact"),
                        NavLink::new("FAQs", "/faqs"),
                    ],
                },
                LinkColumn {
                    heading: "Legal".to_string(),
                    links: vec![
                        NavLink::new("Privacy", "/privacy"),
                        NavLink::new("Terms", "/terms"),
                    ],
                },
            ],
            copyright_text: "© {year} Site name. All rights reserved.".to_string(),
            show_social_links: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WelcomePageConfig {
    pub title: String,
    pub intro_text: String,
    pub show_showcase_link: bool,
}

impl Default for WelcomePageConfig {
    fn default() -> Self {
        Self {
            title: "Website wireframes".to_string(),
            intro_text: "These wireframes show the proposed structure and content of each page. \
                         Select a page below to review it, and use the info buttons to read \
                         notes about individual components."
                .to_string(),
            show_showcase_link: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

pub fn parse_navigation_config(value: &Value) -> Result<NavigationConfig, ConfigError> {
    const NAME: &str = "navigation config";
    if !value.is_object() {
        return Err(invalid(NAME, "expected a JSON object"));
    }
    let config: NavigationConfig = serde_json::from_value(value.clone())
        .map_err(|source| ConfigError::Malformed { config: NAME, source })?;

    for (i, item) in config.items.iter().enumerate() {
        if item.label.trim().is_empty() {
            return Err(invalid(NAME, format!("items[{i}] has an empty label")));
        }
        if item.dropdown.is_some() && item.mega_menu_index.is_some() {
            return Err(invalid(
                NAME,
                format!("items[{i}] cannot have both a dropdown and a mega menu"),
            ));
        }
        if let Some(index) = item.mega_menu_index {
            if index >= config.mega_menus.len() {
                return Err(invalid(
                    NAME,
                    format!("items[{i}] references mega menu {index}, which does not exist"),
                ));
            }
        }
    }
    Ok(config)
}

pub fn parse_footer_config(value: &Value) -> Result<FooterConfig, ConfigError> {
    const NAME: &str = "footer config";
    let Some(object) = value.as_object() else {
        return Err(invalid(NAME, "expected a JSON object"));
    };
    match object.get("columns") {
        Some(Value::Array(columns)) => {
            for (i, column) in columns.iter().enumerate() {
                let has_heading = column.get("heading").is_some_and(Value::is_string);
                let has_links = column.get("links").is_some_and(Value::is_array);
                if !has_heading || !has_links {
                    return Err(invalid(
                        NAME,
                        format!("columns[{i}] needs a heading and a links array"),
                    ));
                }
            }
        }
        _ => return Err(invalid(NAME, "columns must be an array")),
    }
    if !object.get("copyrightText").is_some_and(Value::is_string) {
        return Err(invalid(NAME, "copyrightText must be a string"));
    }

    serde_json::from_value(value.clone())
        .map_err(|source| ConfigError::Malformed { config: NAME, source })
}

pub fn parse_welcome_config(value: &Value) -> Result<WelcomePageConfig, ConfigError> {
    const NAME: &str = "welcome page config";
    if !value.is_object() {
        return Err(invalid(NAME, "expected a JSON object"));
    }
    let config: WelcomePageConfig = serde_json::from_value(value.clone())
        .map_err(|source| ConfigError::Malformed { config: NAME, source })?;
    if config.title.trim().is_empty() {
        return Err(invalid(NAME, "title must not be empty"));
    }
    Ok(config)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
