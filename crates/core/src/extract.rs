//! Recognising component references on the cursor line

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static COMPONENT_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    // namespace:name, e.g. bitrix:news.list
    Regex::new(r"[a-zA-Z_-]+:[a-zA-Z._-]+").unwrap()
});

static INCLUDE_COMPONENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\$APPLICATION->IncludeComponent\s*\(\s*["'](?P<component>[a-zA-Z_-]+:[a-zA-Z._-]+)["']\s*,\s*"#,
    )
    .unwrap()
});

static INCLUDE_COMPONENT_WITH_TEMPLATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"\$APPLICATION->IncludeComponent\s*\(\s*"#,
        r#"["'](?P<component>[a-zA-Z_-]+:[a-zA-Z._-]+)["']\s*,\s*"#,
        r#"["'](?P<template>[a-zA-Z._-]+)["']\s*,"#,
    ))
    .unwrap()
});

/// A component identifier found in a line, with its byte span in that line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentReference {
    pub name: String,
    pub span: Range<usize>,
}

/// Component and template named by an `IncludeComponent` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeCall {
    pub component: String,
    pub template: String,
}

/// Find a `namespace:name` token in `line`.
///
/// When the line holds several, the one under `column` (a byte offset into the
/// line) wins; otherwise the first one is returned.
pub fn component_reference(line: &str, column: usize) -> Option<ComponentReference> {
    let mut first = None;
    for m in COMPONENT_REFERENCE.find_iter(line) {
        let reference = ComponentReference {
            name: m.as_str().to_string(),
            span: m.range(),
        };
        if m.start() <= column && column <= m.end() {
            return Some(reference);
        }
        first.get_or_insert(reference);
    }
    first
}

/// Component name passed to `$APPLICATION->IncludeComponent(...)` in `line`
pub fn include_component_name(line: &str) -> Option<String> {
    INCLUDE_COMPONENT
        .captures(line)
        .map(|caps| caps["component"].to_string())
}

/// Component and template passed to `$APPLICATION->IncludeComponent(...)` in `line`
pub fn include_component_call(line: &str) -> Option<IncludeCall> {
    INCLUDE_COMPONENT_WITH_TEMPLATE
        .captures(line)
        .map(|caps| IncludeCall {
            component: caps["component"].to_string(),
            template: caps["template"].to_string(),
        })
}
