//! Site profiles: ordered selector rules used by the extractor.
//!
//! A profile is a plain list of [`SelectorRule`]s. Site-specific rules come
//! first, the generic fallback rules last. Built-in profiles are static and
//! shared read-only between extraction calls.
//!
//! **Update process**: when a known site changes its markup, capture a page
//! sample, adjust the site rules below and add a fixture test.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

/// How a rule locates candidate elements.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Elements whose `attribute` value contains `needle` (case-sensitive).
    AttributeContains { attribute: String, needle: String },
    /// Elements whose tag name is one of `tags` and whose class list
    /// contains `class` (`span.price`, `div.price`, ...).
    TagsWithClass { tags: Vec<String>, class: String },
    /// Elements matching a CSS selector.
    Css(Selector),
}

impl Matcher {
    pub fn attribute_contains(attribute: &str, needle: &str) -> Self {
        Matcher::AttributeContains {
            attribute: attribute.to_string(),
            needle: needle.to_string(),
        }
    }

    pub fn tags_with_class(tags: &[&str], class: &str) -> Self {
        Matcher::TagsWithClass {
            tags: tags.iter().map(|t| t.to_ascii_lowercase()).collect(),
            class: class.to_string(),
        }
    }

    /// Compile a CSS selector. Returns `None` for invalid selector syntax.
    pub fn css(selector: &str) -> Option<Self> {
        Selector::parse(selector).ok().map(Matcher::Css)
    }

    /// All matching elements, in document order.
    pub fn find_all<'a>(&'a self, document: &'a Html) -> Box<dyn Iterator<Item = ElementRef<'a>> + 'a> {
        match self {
            Matcher::Css(selector) => Box::new(document.select(selector)),
            Matcher::AttributeContains { attribute, needle } => Box::new(elements(document).filter(
                move |el| {
                    el.value()
                        .attr(attribute)
                        .is_some_and(|value| value.contains(needle.as_str()))
                },
            )),
            Matcher::TagsWithClass { tags, class } => Box::new(elements(document).filter(move |el| {
                let element = el.value();
                tags.iter().any(|t| t.eq_ignore_ascii_case(element.name()))
                    && element.classes().any(|c| c == class.as_str())
            })),
        }
    }
}

fn elements(document: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    document.root_element().descendants().filter_map(ElementRef::wrap)
}

/// A described matcher.
#[derive(Debug, Clone)]
pub struct SelectorRule {
    pub description: String,
    pub matcher: Matcher,
}

impl SelectorRule {
    pub fn new(description: impl Into<String>, matcher: Matcher) -> Self {
        Self {
            description: description.into(),
            matcher,
        }
    }
}

/// Ordered selector rules for one kind of site.
#[derive(Debug, Clone)]
pub struct SiteProfile {
    pub name: String,
    pub rules: Vec<SelectorRule>,
}

/// Amazon's price markup; changes frequently.
const AMAZON_SELECTORS: [&str; 5] = [
    "span.a-price-whole",
    "span.a-offscreen",
    "span#priceblock_ourprice",
    "span#priceblock_dealprice",
    "span.a-color-price",
];

/// Tags that commonly carry a `price` class.
const PRICE_TAGS: [&str; 3] = ["span", "div", "p"];

static GENERIC: LazyLock<SiteProfile> = LazyLock::new(|| SiteProfile::new("generic", generic_rules()));

static AMAZON: LazyLock<SiteProfile> = LazyLock::new(|| {
    let mut rules: Vec<SelectorRule> = AMAZON_SELECTORS
        .iter()
        .filter_map(|s| Matcher::css(s).map(|m| SelectorRule::new(*s, m)))
        .collect();
    rules.extend(generic_rules());
    SiteProfile::new("amazon", rules)
});

fn generic_rules() -> Vec<SelectorRule> {
    vec![
        SelectorRule::new("class contains 'price'", Matcher::attribute_contains("class", "price")),
        SelectorRule::new("id contains 'price'", Matcher::attribute_contains("id", "price")),
        SelectorRule::new("class contains 'Price'", Matcher::attribute_contains("class", "Price")),
        SelectorRule::new("common price tags", Matcher::tags_with_class(&PRICE_TAGS, "price")),
    ]
}

impl SiteProfile {
    pub fn new(name: impl Into<String>, rules: Vec<SelectorRule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    /// Generic rules only.
    pub fn generic() -> &'static SiteProfile {
        &GENERIC
    }

    /// Amazon rules followed by the generic rules.
    pub fn amazon() -> &'static SiteProfile {
        &AMAZON
    }

    /// Pick the built-in profile for a product URL.
    pub fn for_url(url: &str) -> &'static SiteProfile {
        let host = reqwest::Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
            .unwrap_or_else(|| url.to_ascii_lowercase());

        if host.contains("amazon") {
            Self::amazon()
        } else {
            Self::generic()
        }
    }
}
