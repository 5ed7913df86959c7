use crate::models::Record;
use crate::models::record::PARAGRAPH_SEPARATOR;

/// Formats a synopsis for display.
///
/// `continue_tag` follows the first paragraph and paragraph breaks are
/// doubled. An empty synopsis renders as just `continue_tag`.
#[must_use]
pub fn synopsis_block(synopsis: &str, continue_tag: &str) -> String {
    let synopsis = crate::parser::page::normalize_line_endings(synopsis);

    if synopsis.is_empty() {
        return continue_tag.to_string();
    }

    if !synopsis.contains(PARAGRAPH_SEPARATOR) {
        return format!("{synopsis}{continue_tag}");
    }

    let block = synopsis.replacen(
        PARAGRAPH_SEPARATOR,
        &format!("{continue_tag}{PARAGRAPH_SEPARATOR}"),
        1,
    );
    let double = PARAGRAPH_SEPARATOR.repeat(2);
    if block.contains(&double) {
        block
    } else {
        block.replace(PARAGRAPH_SEPARATOR, &double)
    }
}

/// Wraps a record's synopsis in a one-cell table captioned with its display
/// titles and season.
#[must_use]
pub fn synopsis_table(record: &Record, table_class: &str, continue_tag: &str) -> String {
    let caption = format!(
        "Synopsis for: {} ({})",
        record.canonical_titles(),
        record.season()
    );

    format!(
        "<table class=\"{}\">\n<caption>{}</caption>\n<tr><td>{}</td></tr>\n</table>",
        html_escape::encode_double_quoted_attribute(table_class),
        html_escape::encode_text(&caption),
        synopsis_block(&record.synopsis, continue_tag)
    )
}
