//! Property schemas and the flat/structured form transforms.
//!
//! Each component type has an ordered list of editable fields driving the
//! property panel. Types whose canonical props hold an array of objects are
//! edited through numbered flat keys (`item0Title`, `item1Title`, ...) plus a
//! count key; [`flatten`] and [`unflatten`] convert between the two shapes.
//!
//! Round-trip law: for canonical props `x` (no blank required fields, no
//! blank optional fields, no empty arrays, at most `max_items` entries),
//! `unflatten(t, &flatten(t, &x)) == x`.

use serde::Serialize;
use serde_json::Value;

use crate::registry::ComponentType;
use crate::types::PropsBag;

// ---------------------------------------------------------------------------
// Field schema
// ---------------------------------------------------------------------------

/// Maximum number of tabs authored through numbered keys.
pub const MAX_TABS: usize = 6;

/// Maximum number of gallery images authored through numbered keys.
pub const MAX_GALLERY_IMAGES: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Textarea,
    Richtext,
    Select,
    Toggle,
    Number,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// One editable property in the builder's property panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchema {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl FieldSchema {
    fn new(key: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            placeholder: None,
            options: None,
            min: None,
            max: None,
        }
    }

    fn text(key: &str, label: &str) -> Self {
        Self::new(key, label, FieldKind::Text)
    }

    fn textarea(key: &str, label: &str) -> Self {
        Self::new(key, label, FieldKind::Textarea)
    }

    fn richtext(key: &str, label: &str) -> Self {
        Self::new(key, label, FieldKind::Richtext)
    }

    fn toggle(key: &str, label: &str) -> Self {
        Self::new(key, label, FieldKind::Toggle)
    }

    fn number(key: &str, label: &str, min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            ..Self::new(key, label, FieldKind::Number)
        }
    }

    fn select(key: &str, label: &str, options: &[(&'static str, &'static str)]) -> Self {
        Self {
            options: Some(
                options
                    .iter()
                    .map(|&(value, label)| SelectOption { value, label })
                    .collect(),
            ),
            ..Self::new(key, label, FieldKind::Select)
        }
    }

    fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }
}

// ---------------------------------------------------------------------------
// List specs
// ---------------------------------------------------------------------------

/// One field of an item in a flattened list.
#[derive(Debug, Clone, Copy)]
pub struct ListField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

/// Layout of an array-of-objects prop edited through numbered flat keys.
///
/// The first entry of `fields` is the required field: items whose required
/// value is blank are dropped by [`unflatten`].
#[derive(Debug, Clone, Copy)]
pub struct ListSpec {
    pub array_key: &'static str,
    pub prefix: &'static str,
    pub noun: &'static str,
    pub fields: &'static [ListField],
    pub max_items: usize,
}

impl ListSpec {
    pub fn count_key(&self) -> String {
        format!("{}Count", self.prefix)
    }

    /// Flat key for `field` of the item at `index`, e.g. `cta1ButtonText`.
    pub fn slot_key(&self, index: usize, field: &str) -> String {
        let mut chars = field.chars();
        let capitalised: String = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        format!("{}{index}{capitalised}", self.prefix)
    }

    fn required(&self) -> &ListField {
        &self.fields[0]
    }

    /// Placeholder shown in an empty slot.
    fn placeholder(&self, index: usize, field: &ListField) -> String {
        if field.name == self.required().name {
            format!("{} {}", self.noun, index + 1)
        } else {
            String::new()
        }
    }
}

const fn lf(name: &'static str, label: &'static str, kind: FieldKind) -> ListField {
    ListField { name, label, kind }
}

const SIGNPOST_FIELDS: &[ListField] = &[
    lf("title", "Title", FieldKind::Text),
    lf("subtitle", "Subtitle", FieldKind::Textarea),
    lf("tag", "Tag", FieldKind::Text),
    lf("link", "Link", FieldKind::Text),
];

const CTA_FIELDS: &[ListField] = &[
    lf("title", "Title", FieldKind::Text),
    lf("description", "Description", FieldKind::Textarea),
    lf("buttonText", "Button text", FieldKind::Text),
    lf("buttonLink", "Button link", FieldKind::Text),
];

const STAT_FIELDS: &[ListField] = &[
    lf("value", "Value", FieldKind::Text),
    lf("label", "Label", FieldKind::Text),
];

const PROMO_FIELDS: &[ListField] = &[
    lf("title", "Title", FieldKind::Text),
    lf("subtitle", "Subtitle", FieldKind::Textarea),
    lf("tag", "Tag", FieldKind::Text),
    lf("imageAlt", "Image description", FieldKind::Text),
];

const ACCORDION_FIELDS: &[ListField] = &[
    lf("title", "Title", FieldKind::Text),
    lf("content", "Content", FieldKind::Richtext),
];

/// The flattened list layout for a type, if it has one.
pub fn list_spec(component_type: ComponentType) -> Option<ListSpec> {
    use ComponentType as T;
    match component_type {
        T::Signposts => Some(ListSpec {
            array_key: "items",
            prefix: "item",
            noun: "Signpost",
            fields: SIGNPOST_FIELDS,
            max_items: 8,
        }),
        T::CallToAction => Some(ListSpec {
            array_key: "ctas",
            prefix: "cta",
            noun: "Call to action",
            fields: CTA_FIELDS,
            max_items: 3,
        }),
        T::Stats => Some(ListSpec {
            array_key: "stats",
            prefix: "stat",
            noun: "Statistic",
            fields: STAT_FIELDS,
            max_items: 4,
        }),
        T::FeaturedPromo => Some(ListSpec {
            array_key: "promos",
            prefix: "promo",
            noun: "Promo",
            fields: PROMO_FIELDS,
            max_items: 3,
        }),
        T::Accordion => Some(ListSpec {
            array_key: "items",
            prefix: "item",
            noun: "Question",
            fields: ACCORDION_FIELDS,
            max_items: 8,
        }),
        T::Hero
        | T::RichText
        | T::Breadcrumbs
        | T::Tabs
        | T::ContactForm
        | T::ImageGallery
        | T::Quote
        | T::NewsListing
        | T::VideoEmbed => None,
    }
}

fn list_fields(spec: &ListSpec) -> Vec<FieldSchema> {
    let mut fields = vec![FieldSchema::number(
        &spec.count_key(),
        &format!("Number of {}s", spec.noun.to_lowercase()),
        0.0,
        spec.max_items as f64,
    )];
    for index in 0..spec.max_items {
        for field in spec.fields {
            fields.push(
                FieldSchema::new(
                    spec.slot_key(index, field.name),
                    format!("{} {} {}", spec.noun, index + 1, field.label.to_lowercase()),
                    field.kind,
                )
                .with_placeholder(spec.placeholder(index, field)),
            );
        }
    }
    fields
}

fn numbered_fields(
    count_key: &str,
    count_label: &str,
    max: usize,
    slot: impl Fn(usize) -> Vec<FieldSchema>,
) -> Vec<FieldSchema> {
    let mut fields = vec![FieldSchema::number(count_key, count_label, 1.0, max as f64)];
    for n in 1..=max {
        fields.extend(slot(n));
    }
    fields
}

/// Ordered editable fields for a component type.
pub fn fields_for(component_type: ComponentType) -> Vec<FieldSchema> {
    use ComponentType as T;
    let list = list_spec(component_type).map(|s| list_fields(&s)).unwrap_or_default();

    let mut fields = match component_type {
        T::Hero => vec![
            FieldSchema::text("heading", "Heading"),
            FieldSchema::textarea("subheading", "Introduction"),
            FieldSchema::text("buttonText", "Button text"),
            FieldSchema::text("buttonLink", "Button link").with_placeholder("/contact"),
            FieldSchema::toggle("showImage", "Show image"),
            FieldSchema::select("alignment", "Alignment", &[("left", "Left"), ("center", "Centre")]),
        ],
        T::RichText => vec![FieldSchema::richtext("content", "Content")],
        T::Breadcrumbs => vec![
            FieldSchema::toggle("showHome", "Show home link"),
            FieldSchema::text("parentLabel", "Parent label"),
            FieldSchema::text("parentLink", "Parent link"),
            FieldSchema::text("currentLabel", "Current page label"),
        ],
        T::CallToAction | T::Stats => vec![FieldSchema::text("heading", "Heading")],
        T::Accordion => vec![
            FieldSchema::text("heading", "Heading"),
            FieldSchema::toggle("allowMultiple", "Allow several open at once"),
        ],
        T::Signposts => vec![
            FieldSchema::text("heading", "Heading"),
            FieldSchema::number("columns", "Columns", 2.0, 4.0),
        ],
        T::FeaturedPromo => vec![
            FieldSchema::select(
                "variant",
                "Layout",
                &[("single", "Single"), ("split", "Split"), ("grid", "Grid")],
            ),
            FieldSchema::text("heading", "Heading"),
        ],
        T::Tabs => {
            let mut f = vec![
                FieldSchema::text("heading", "Heading"),
                FieldSchema::select(
                    "style",
                    "Style",
                    &[("tabs", "Tabs"), ("buttons", "Button group")],
                ),
            ];
            f.extend(numbered_fields("tabCount", "Number of tabs", MAX_TABS, |n| {
                vec![
                    FieldSchema::text(&format!("tab{n}Label"), &format!("Tab {n} label"))
                        .with_placeholder(format!("Tab {n}")),
                    FieldSchema::richtext(&format!("tab{n}Content"), &format!("Tab {n} content")),
                ]
            }));
            f
        }
        T::ContactForm => vec![
            FieldSchema::text("heading", "Heading"),
            FieldSchema::textarea("intro", "Introduction"),
            FieldSchema::toggle("showPhone", "Ask for phone number"),
            FieldSchema::toggle("showCompany", "Ask for company"),
            FieldSchema::toggle("showMessage", "Include message box"),
            FieldSchema::text("submitLabel", "Submit button label"),
        ],
        T::ImageGallery => {
            let mut f = vec![
                FieldSchema::text("heading", "Heading"),
                FieldSchema::select(
                    "layout",
                    "Layout",
                    &[("grid", "Grid"), ("carousel", "Carousel")],
                ),
            ];
            f.extend(numbered_fields(
                "imageCount",
                "Number of images",
                MAX_GALLERY_IMAGES,
                |n| {
                    vec![FieldSchema::text(
                        &format!("image{n}Caption"),
                        &format!("Image {n} caption"),
                    )
                    .with_placeholder(format!("Image {n}"))]
                },
            ));
            f
        }
        T::Quote => vec![
            FieldSchema::textarea("quote", "Quote"),
            FieldSchema::text("attribution", "Attribution"),
            FieldSchema::text("role", "Role or organisation"),
        ],
        T::NewsListing => vec![
            FieldSchema::text("heading", "Heading"),
            FieldSchema::number("itemCount", "Number of articles", 1.0, 12.0),
            FieldSchema::toggle("showFilters", "Show category filters"),
            FieldSchema::text("categories", "Categories").with_placeholder("News, Events, Blog"),
        ],
        T::VideoEmbed => vec![
            FieldSchema::text("title", "Title"),
            FieldSchema::textarea("caption", "Caption"),
            FieldSchema::select(
                "aspectRatio",
                "Aspect ratio",
                &[("16:9", "Widescreen"), ("4:3", "Standard")],
            ),
        ],
    };
    fields.extend(list);
    fields
}

// ---------------------------------------------------------------------------
// Transforms
// ---------------------------------------------------------------------------

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Read a count value that may arrive as a JSON number or a numeric string.
pub fn read_count(value: Option<&Value>) -> Option<usize> {
    match value? {
        Value::Number(n) => n.as_u64().map(|v| v as usize),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    value
        .and_then(scalar_to_string)
        .map_or(true, |s| s.trim().is_empty())
}

/// Canonical props → flat form values.
///
/// Slots past the current item count are filled with placeholders so the
/// editor can grow the list without losing the slot layout.
pub fn flatten(component_type: ComponentType, props: &PropsBag) -> PropsBag {
    let Some(spec) = list_spec(component_type) else {
        return props.clone();
    };

    let items: Vec<&serde_json::Map<String, Value>> = props
        .get(spec.array_key)
        .and_then(Value::as_array)
        .map(|arr| arr.iter().filter_map(Value::as_object).collect())
        .unwrap_or_default();
    let count = items.len().min(spec.max_items);

    let mut flat = props.clone();
    flat.remove(spec.array_key);
    flat.insert(spec.count_key(), Value::from(count));

    for index in 0..spec.max_items {
        let item = items.get(index).filter(|_| index < count);
        for field in spec.fields {
            let value = match item {
                Some(item) => item
                    .get(field.name)
                    .and_then(scalar_to_string)
                    .unwrap_or_default(),
                None => spec.placeholder(index, field),
            };
            flat.insert(spec.slot_key(index, field.name), Value::String(value));
        }
    }

    flat
}

/// Flat form values → canonical props.
///
/// Only the first `count` slots are read. Items with a blank required field
/// are dropped and blank optional fields omitted; when nothing survives the
/// array key is removed entirely so the renderer's built-in defaults apply.
pub fn unflatten(component_type: ComponentType, flat: &PropsBag) -> PropsBag {
    let mut props = flat.clone();
    coerce_form_scalars(component_type, &mut props);

    let Some(spec) = list_spec(component_type) else {
        return props;
    };

    let count = read_count(flat.get(&spec.count_key()))
        .unwrap_or_else(|| highest_used_slot(&spec, flat))
        .min(spec.max_items);

    props.remove(&spec.count_key());
    for index in 0..spec.max_items {
        for field in spec.fields {
            props.remove(&spec.slot_key(index, field.name));
        }
    }

    let mut items = Vec::new();
    for index in 0..count {
        let required = spec.required();
        let required_value = flat.get(&spec.slot_key(index, required.name));
        if is_blank(required_value) {
            continue;
        }

        let mut item = serde_json::Map::new();
        for field in spec.fields {
            let value = flat.get(&spec.slot_key(index, field.name));
            if is_blank(value) {
                continue;
            }
            if let Some(text) = value.and_then(scalar_to_string) {
                item.insert(field.name.to_string(), Value::String(text));
            }
        }
        items.push(Value::Object(item));
    }

    if items.is_empty() {
        props.remove(spec.array_key);
    } else {
        props.insert(spec.array_key.to_string(), Value::Array(items));
    }
    props
}

/// Merge a submitted form into stored props: unflatten, shallow-merge, and
/// drop structured keys the form emptied. A form that carries neither the
/// count key nor any slot leaves the stored list alone.
pub fn apply_form(component_type: ComponentType, props: &mut PropsBag, flat: &PropsBag) {
    let canonical = unflatten(component_type, flat);
    for (key, value) in &canonical {
        props.insert(key.clone(), value.clone());
    }

    if let Some(spec) = list_spec(component_type) {
        if !canonical.contains_key(spec.array_key) && mentions_list(&spec, flat) {
            props.remove(spec.array_key);
        }
    }
    // A categories field that came in and did not survive was cleared.
    if flat.contains_key("categories") && !canonical.contains_key("categories") {
        props.remove("categories");
    }
}

fn mentions_list(spec: &ListSpec, flat: &PropsBag) -> bool {
    flat.contains_key(&spec.count_key()) || highest_used_slot(spec, flat) > 0
}

/// Number of leading slots that carry any key, used when the count key is
/// missing from a submitted form.
fn highest_used_slot(spec: &ListSpec, flat: &PropsBag) -> usize {
    (0..spec.max_items)
        .rev()
        .find(|&index| {
            spec.fields
                .iter()
                .any(|f| flat.contains_key(&spec.slot_key(index, f.name)))
        })
        .map_or(0, |index| index + 1)
}

/// Form inputs that arrive as text but are stored structurally.
fn coerce_form_scalars(component_type: ComponentType, props: &mut PropsBag) {
    if component_type == ComponentType::NewsListing {
        if let Some(Value::String(text)) = props.get("categories") {
            let categories = split_delimited(text);
            if categories.is_empty() {
                props.remove("categories");
            } else {
                props.insert(
                    "categories".to_string(),
                    Value::Array(categories.into_iter().map(Value::String).collect()),
                );
            }
        }
    }
}

/// Split a comma, pipe or newline delimited string into trimmed non-empty parts.
pub fn split_delimited(text: &str) -> Vec<String> {
    text.split([',', '|', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Form view
// ---------------------------------------------------------------------------

/// Everything the property panel needs to edit one placed component.
#[derive(Debug, Clone, Serialize)]
pub struct FormView {
    pub fields: Vec<FieldSchema>,
    pub values: PropsBag,
}

pub fn form_view(component_type: ComponentType, props: &PropsBag) -> FormView {
    FormView {
        fields: fields_for(component_type),
        values: flatten(component_type, props),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::props::ComponentProps;

    const FLATTENED: [ComponentType; 5] = [
        ComponentType::Signposts,
        ComponentType::CallToAction,
        ComponentType::Stats,
        ComponentType::FeaturedPromo,
        ComponentType::Accordion,
    ];

    fn bag(value: serde_json::Value) -> PropsBag {
        value.as_object().cloned().unwrap()
    }

    /// Build `n` canonical items for a spec with every field populated.
    fn full_items(spec: &ListSpec, n: usize) -> Vec<Value> {
        (0..n)
            .map(|i| {
                let mut item = serde_json::Map::new();
                for f in spec.fields {
                    item.insert(f.name.to_string(), json!(format!("{} {i}", f.name)));
                }
                Value::Object(item)
            })
            .collect()
    }

    fn with_items(spec: &ListSpec, items: Vec<Value>) -> PropsBag {
        let mut props = bag(json!({ "heading": "Heading" }));
        props.insert(spec.array_key.to_string(), Value::Array(items));
        props
    }

    #[test]
    fn slot_keys_are_camel_cased() {
        let spec = list_spec(ComponentType::CallToAction).unwrap();
        assert_eq!(spec.slot_key(1, "buttonText"), "cta1ButtonText");
        assert_eq!(spec.slot_key(0, "title"), "cta0Title");
        assert_eq!(spec.count_key(), "ctaCount");
    }

    #[test]
    fn round_trip_with_zero_items() {
        for t in FLATTENED {
            let props = bag(json!({ "heading": "Only a heading" }));
            assert_eq!(unflatten(t, &flatten(t, &props)), props, "{t}");
        }
    }

    #[test]
    fn round_trip_with_one_item() {
        for t in FLATTENED {
            let spec = list_spec(t).unwrap();
            let props = with_items(&spec, full_items(&spec, 1));
            assert_eq!(unflatten(t, &flatten(t, &props)), props, "{t}");
        }
    }

    #[test]
    fn round_trip_with_max_items() {
        for t in FLATTENED {
            let spec = list_spec(t).unwrap();
            let props = with_items(&spec, full_items(&spec, spec.max_items));
            assert_eq!(unflatten(t, &flatten(t, &props)), props, "{t}");
        }
    }

    #[test]
    fn round_trip_with_sparse_optional_fields() {
        let t = ComponentType::Signposts;
        let props = bag(json!({
            "heading": "Services",
            "columns": 2,
            "items": [
                { "title": "Design" },
                { "title": "Build", "tag": "New" },
                { "title": "Run", "subtitle": "Ongoing support", "link": "/run" }
            ]
        }));
        assert_eq!(unflatten(t, &flatten(t, &props)), props);
    }

    #[test]
    fn blank_titled_items_are_dropped_and_order_kept() {
        let t = ComponentType::Accordion;
        let props = bag(json!({
            "items": [
                { "title": "First", "content": "a" },
                { "title": "   ", "content": "orphan" },
                { "title": "Second" },
                { "title": "", "content": "orphan" },
                { "title": "Third", "content": "c" }
            ]
        }));
        let expected = bag(json!({
            "items": [
                { "title": "First", "content": "a" },
                { "title": "Second" },
                { "title": "Third", "content": "c" }
            ]
        }));
        assert_eq!(unflatten(t, &flatten(t, &props)), expected);
    }

    #[test]
    fn all_blank_items_omit_the_array() {
        let t = ComponentType::Stats;
        let props = bag(json!({ "stats": [ { "value": " " }, { "value": "" } ] }));
        let result = unflatten(t, &flatten(t, &props));
        assert!(!result.contains_key("stats"));
    }

    #[test]
    fn empty_array_is_equivalent_to_absent() {
        let t = ComponentType::FeaturedPromo;
        let props = bag(json!({ "variant": "grid", "promos": [] }));
        let result = unflatten(t, &flatten(t, &props));
        assert_eq!(result, bag(json!({ "variant": "grid" })));
    }

    #[test]
    fn flatten_fills_absent_slots_with_placeholders() {
        let t = ComponentType::Signposts;
        let flat = flatten(t, &bag(json!({ "items": [ { "title": "One" } ] })));
        assert_eq!(flat["itemCount"], 1);
        assert_eq!(flat["item0Title"], "One");
        assert_eq!(flat["item0Subtitle"], "");
        assert_eq!(flat["item1Title"], "Signpost 2");
        assert_eq!(flat["item7Title"], "Signpost 8");
        assert!(!flat.contains_key("item8Title"));
        assert!(!flat.contains_key("items"));
    }

    #[test]
    fn flatten_truncates_past_max() {
        let t = ComponentType::CallToAction;
        let spec = list_spec(t).unwrap();
        let flat = flatten(t, &with_items(&spec, full_items(&spec, 5)));
        assert_eq!(flat["ctaCount"], 3);
        let back = unflatten(t, &flat);
        assert_eq!(back["ctas"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn unflatten_reads_only_counted_slots() {
        let t = ComponentType::Stats;
        let flat = bag(json!({
            "statCount": "2",
            "stat0Value": "98%",
            "stat0Label": "Satisfaction",
            "stat1Value": "24/7",
            "stat2Value": "Statistic 3",
        }));
        let props = unflatten(t, &flat);
        assert_eq!(
            props,
            bag(json!({
                "stats": [
                    { "value": "98%", "label": "Satisfaction" },
                    { "value": "24/7" }
                ]
            }))
        );
    }

    #[test]
    fn unflatten_without_count_uses_highest_slot() {
        let t = ComponentType::Accordion;
        let flat = bag(json!({ "item0Title": "A", "item2Title": "C" }));
        let props = unflatten(t, &flat);
        assert_eq!(props["items"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn unflattened_props_decode_into_typed_shape() {
        for t in FLATTENED {
            let spec = list_spec(t).unwrap();
            let props = unflatten(t, &flatten(t, &with_items(&spec, full_items(&spec, 2))));
            assert!(ComponentProps::decode(t, &props).is_ok(), "{t}");
        }
    }

    #[test]
    fn non_list_types_pass_through() {
        let props = bag(json!({ "heading": "Hi", "tab1Label": "One" }));
        assert_eq!(flatten(ComponentType::Tabs, &props), props);
        assert_eq!(unflatten(ComponentType::Hero, &props), props);
    }

    #[test]
    fn news_categories_text_becomes_array() {
        let props = unflatten(
            ComponentType::NewsListing,
            &bag(json!({ "categories": "News, Events ,, Blog" })),
        );
        assert_eq!(props["categories"], json!(["News", "Events", "Blog"]));
    }

    #[test]
    fn apply_form_clears_emptied_lists() {
        let t = ComponentType::Stats;
        let mut props = bag(json!({ "heading": "Old", "stats": [ { "value": "1" } ] }));
        let flat = bag(json!({ "heading": "New", "statCount": 1, "stat0Value": "  " }));

        apply_form(t, &mut props, &flat);

        assert_eq!(props, bag(json!({ "heading": "New" })));
    }

    #[test]
    fn apply_form_without_list_fields_keeps_stored_list() {
        let t = ComponentType::Signposts;
        let mut props = bag(json!({ "heading": "Old", "items": [ { "title": "Design" } ] }));

        apply_form(t, &mut props, &bag(json!({ "heading": "New" })));

        assert_eq!(
            props,
            bag(json!({ "heading": "New", "items": [ { "title": "Design" } ] }))
        );
    }

    #[test]
    fn apply_form_with_only_slot_keys_replaces_list() {
        let t = ComponentType::Signposts;
        let mut props = bag(json!({ "items": [ { "title": "Design" } ] }));

        apply_form(t, &mut props, &bag(json!({ "item0Title": "Build" })));
        assert_eq!(props, bag(json!({ "items": [ { "title": "Build" } ] })));

        apply_form(t, &mut props, &bag(json!({ "item0Title": " " })));
        assert_eq!(props, bag(json!({})));
    }

    #[test]
    fn apply_form_keeps_untouched_keys() {
        let t = ComponentType::NewsListing;
        let mut props = bag(json!({ "heading": "News", "itemCount": 4 }));

        apply_form(t, &mut props, &bag(json!({ "categories": "A|B" })));

        assert_eq!(
            props,
            bag(json!({ "heading": "News", "itemCount": 4, "categories": ["A", "B"] }))
        );
    }

    #[test]
    fn every_type_has_fields() {
        for t in ComponentType::ALL {
            assert!(!fields_for(t).is_empty(), "{t}");
        }
        let signposts = fields_for(ComponentType::Signposts);
        assert!(signposts.iter().any(|f| f.key == "itemCount"));
        assert!(signposts.iter().any(|f| f.key == "item7Link"));
    }

    #[test]
    fn form_view_pairs_schema_and_values() {
        let view = form_view(
            ComponentType::Stats,
            &bag(json!({ "stats": [ { "value": "10" } ] })),
        );
        assert_eq!(view.values["stat0Value"], "10");
        assert!(view.fields.iter().any(|f| f.key == "stat3Label"));
    }
}
