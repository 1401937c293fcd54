//! Small helpers over a parsed `scraper::Html` document

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// Elements whose text is never shown to a reader
const INVISIBLE_CONTAINERS: &[&str] = &["script", "style", "noscript", "template"];

/// Selects elements by CSS selector; an invalid selector selects nothing
pub fn select<'a>(document: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => document.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

/// Counts elements matching a CSS selector
pub fn count(document: &Html, css: &str) -> usize {
    match Selector::parse(css) {
        Ok(selector) => document.select(&selector).count(),
        Err(_) => 0,
    }
}

/// First element matching a CSS selector
pub fn first<'a>(document: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    document.select(&selector).next()
}

/// Every element in document order, including the root `<html>`
pub fn elements(document: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
}

/// Text content of an element with whitespace collapsed
pub fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text a reader would see: every text node outside script/style/noscript,
/// trimmed and joined with single spaces
pub fn visible_text(document: &Html) -> String {
    let mut pieces = Vec::new();

    for node in document.tree.root().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| INVISIBLE_CONTAINERS.contains(&el.name()))
        });
        if hidden {
            continue;
        }
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            pieces.push(trimmed);
        }
    }

    pieces.join(" ")
}

/// All text nodes in the document, scripts and styles included
pub fn all_text(document: &Html) -> String {
    document
        .tree
        .root()
        .descendants()
        .filter_map(|node| node.value().as_text().map(|t| t.trim()))
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// True when any single class of the element matches the pattern
pub fn has_class_matching(element: ElementRef<'_>, pattern: &Regex) -> bool {
    element.value().classes().any(|class| pattern.is_match(class))
}

/// True when a whitespace-separated attribute (like `rel`) contains `token`
pub fn attr_has_token(element: ElementRef<'_>, attr: &str, token: &str) -> bool {
    element
        .value()
        .attr(attr)
        .is_some_and(|value| {
            value
                .split_whitespace()
                .any(|t| t.eq_ignore_ascii_case(token))
        })
}

/// Returns the attribute value when present and non-empty
pub fn non_empty_attr<'a>(element: ElementRef<'a>, attr: &str) -> Option<&'a str> {
    element.value().attr(attr).filter(|v| !v.trim().is_empty())
}
