//! Quizizz / Wayground spreadsheet template.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use super::ExportError;
use crate::models::QuestionItem;

/// Header row of the import template, in the order the importer expects.
pub const COLUMNS: [&str; 11] = [
    "Question Text",
    "Question Type",
    "Option 1",
    "Option 2",
    "Option 3",
    "Option 4",
    "Option 5",
    "Correct Answer",
    "Time in seconds",
    "Image Link",
    "Answer explanation",
];

const OPTION_SLOTS: usize = 5;
const QUESTION_TYPE: &str = "Multiple Choice";

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Blank,
}

impl Cell {
    fn text(value: &str) -> Self {
        if value.is_empty() {
            Cell::Blank
        } else {
            Cell::Text(value.to_string())
        }
    }
}

/// One question laid out on the template's fixed 11 columns.
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadsheetRow {
    pub question_text: String,
    /// Options beyond the fifth are dropped, missing ones stay empty.
    pub options: [String; OPTION_SLOTS],
    /// One-based.
    pub correct_answer: usize,
    pub time_limit: u32,
}

impl SpreadsheetRow {
    pub fn from_question(question: &QuestionItem) -> Self {
        let options = std::array::from_fn(|slot| {
            question.options.get(slot).cloned().unwrap_or_default()
        });

        Self {
            question_text: question.question.clone(),
            options,
            correct_answer: question.correct_index + 1,
            time_limit: question.time_limit,
        }
    }

    /// Cells in `COLUMNS` order. Image link and explanation are always blank.
    pub fn cells(&self) -> [Cell; 11] {
        let [o1, o2, o3, o4, o5] = &self.options;
        [
            Cell::text(&self.question_text),
            Cell::Text(QUESTION_TYPE.to_string()),
            Cell::text(o1),
            Cell::text(o2),
            Cell::text(o3),
            Cell::text(o4),
            Cell::text(o5),
            Cell::Number(self.correct_answer as f64),
            Cell::Number(f64::from(self.time_limit)),
            Cell::Blank,
            Cell::Blank,
        ]
    }
}

pub(super) fn write(questions: &[QuestionItem], path: &Path) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_column_width(0, 48)?;

    for (col, name) in COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, &header_format)?;
    }

    for (idx, question) in questions.iter().enumerate() {
        let row = (idx + 1) as u32;
        let cells = SpreadsheetRow::from_question(question).cells();

        for (col, cell) in cells.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(value) => {
                    sheet.write_string(row, col, value.as_str())?;
                }
                Cell::Number(value) => {
                    sheet.write_number(row, col, *value)?;
                }
                Cell::Blank => {}
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Read;
    use tempfile::TempDir;

    fn question(options: &[&str], correct_index: usize) -> QuestionItem {
        QuestionItem::new(
            "Pick one",
            options.iter().map(|s| s.to_string()).collect(),
            correct_index,
            45,
        )
    }

    #[test]
    fn test_row_pads_missing_options() {
        let row = SpreadsheetRow::from_question(&question(&["a", "b", "c"], 2));
        let cells = row.cells();

        assert_eq!(cells.len(), COLUMNS.len());
        assert_eq!(cells[0], Cell::Text("Pick one".into()));
        assert_eq!(cells[1], Cell::Text("Multiple Choice".into()));
        assert_eq!(cells[2], Cell::Text("a".into()));
        assert_eq!(cells[4], Cell::Text("c".into()));
        assert_eq!(cells[5], Cell::Blank);
        assert_eq!(cells[6], Cell::Blank);
        assert_eq!(cells[7], Cell::Number(3.0));
        assert_eq!(cells[8], Cell::Number(45.0));
        assert_eq!(cells[9], Cell::Blank);
        assert_eq!(cells[10], Cell::Blank);
    }

    #[test]
    fn test_row_truncates_extra_options() {
        let row = SpreadsheetRow::from_question(&question(&["1", "2", "3", "4", "5", "6", "7"], 0));
        assert_eq!(row.options, ["1", "2", "3", "4", "5"].map(String::from));
        assert_eq!(row.correct_answer, 1);
    }

    #[test]
    fn test_correct_answer_is_one_based() {
        for idx in 0..4 {
            let row = SpreadsheetRow::from_question(&question(&["a", "b", "c", "d"], idx));
            assert_eq!(row.correct_answer, idx + 1);
        }
    }

    #[test]
    fn test_workbook_contains_header_row() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("quiz.xlsx");
        write(&[question(&["yes", "no"], 0)], &path).unwrap();

        let mut archive = zip::ZipArchive::new(File::open(&path).unwrap()).unwrap();
        assert!(archive.by_name("xl/worksheets/sheet1.xml").is_ok());

        let mut strings = String::new();
        archive
            .by_name("xl/sharedStrings.xml")
            .unwrap()
            .read_to_string(&mut strings)
            .unwrap();
        for column in COLUMNS {
            assert!(strings.contains(column), "missing column {column}");
        }
        assert!(strings.contains("Pick one"));
    }
}
