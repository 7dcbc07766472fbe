//! Field name completion for information block elements

use crate::context::EditingContext;
use regex::Regex;
use std::sync::LazyLock;

/// Standard fields of an information block element as exposed to templates
pub const IBLOCK_FIELDS: [&str; 34] = [
    "ID",
    "NAME",
    "CODE",
    "IBLOCK_ID",
    "IBLOCK_SECTION_ID",
    "IBLOCK_CODE",
    "ACTIVE",
    "DATE_ACTIVE_FROM",
    "DATE_ACTIVE_TO",
    "SORT",
    "PREVIEW_PICTURE",
    "PREVIEW_TEXT",
    "PREVIEW_TEXT_TYPE",
    "DETAIL_PICTURE",
    "DETAIL_TEXT",
    "DETAIL_TEXT_TYPE",
    "SEARCHABLE_CONTENT",
    "DATE_CREATE",
    "CREATED_BY",
    "CREATED_USER_NAME",
    "TIMESTAMP_X",
    "MODIFIED_BY",
    "USER_NAME",
    "LANG_DIR",
    "LIST_PAGE_URL",
    "DETAIL_PAGE_URL",
    "SHOW_COUNTER",
    "SHOW_COUNTER_START",
    "WF_COMMENTS",
    "WF_STATUS_ID",
    "LOCK_STATUS",
    "TAGS",
    "DISPLAY_PROPERTIES",
    "PROPERTIES",
];

static ELEMENT_SUBSCRIPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\$(arItem|arResult)\s*\[["']$"#).unwrap());

/// Completions for the key being typed inside `$arItem["…` or `$arResult['…`
pub fn iblock_completions(ctx: &EditingContext) -> Vec<&'static str> {
    let before = ctx.text_before_cursor();
    let prefix_start = before
        .char_indices()
        .rev()
        .find(|&(_, c)| !(c.is_ascii_alphanumeric() || c == '_'))
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let (context, prefix) = before.split_at(prefix_start);

    if !ELEMENT_SUBSCRIPT.is_match(context) {
        return Vec::new();
    }

    let prefix = prefix.to_ascii_uppercase();
    IBLOCK_FIELDS
        .iter()
        .copied()
        .filter(|field| field.starts_with(&prefix))
        .collect()
}
