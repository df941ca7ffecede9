//! Moodle-style quiz XML for the LMS importer.

use crate::models::QuestionItem;

const FULL_CREDIT: &str = "100";
const NO_CREDIT: &str = "0";

/// Characters allowed by the XML 1.0 `Char` production.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

/// HTML entity escaping for user text embedded in the document.
///
/// Control characters XML cannot carry, even inside CDATA, are dropped.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars().filter(|&c| is_xml_char(c)) {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders the whole question list as one `<quiz>` document.
///
/// Each question is named `Question <n>` (1-based), its text and options go
/// into CDATA after [`escape_html`], and only the option at
/// `correct_index` gets `fraction="100"`. Lines are joined with `\n` and
/// there is no trailing newline.
pub fn render(questions: &[QuestionItem]) -> String {
    let mut lines = vec![
        r#"<?xml version="1.0" encoding="UTF-8"?>"#.to_string(),
        "<quiz>".to_string(),
    ];

    for (idx, question) in questions.iter().enumerate() {
        lines.push(format!(
            r#"<question type="multichoice"><name><text>Question {}</text></name>"#,
            idx + 1
        ));
        lines.push(format!(
            r#"<questiontext format="html"><text><![CDATA[{}]]></text></questiontext>"#,
            escape_html(&question.question)
        ));
        lines.push("<single>true</single><shuffleanswers>true</shuffleanswers>".to_string());

        for (i, option) in question.options.iter().enumerate() {
            let fraction = if i == question.correct_index {
                FULL_CREDIT
            } else {
                NO_CREDIT
            };
            lines.push(format!(
                r#"<answer fraction="{}" format="html"><text><![CDATA[{}]]></text></answer>"#,
                fraction,
                escape_html(option)
            ));
        }

        lines.push("</question>".to_string());
    }

    lines.push("</quiz>".to_string());
    lines.join("\n")
}
