mod parser;

use crate::rewards::Member;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Header of the member name column in the alliance export.
pub const DEFAULT_NAME_COLUMN: &str = "昵称";
/// Header of the weekly assessment score column.
pub const DEFAULT_PRIMARY_COLUMN: &str = "本周考核积分";
/// Header of the fortress points column.
pub const DEFAULT_SECONDARY_COLUMN: &str = "要塞积分";

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("roster: failed to read member export: {0}")]
    Io(#[from] std::io::Error),
    #[error("roster: invalid CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("roster: missing required column '{column}'")]
    MissingColumn { column: String },
    #[error("roster: row {row} has a non-integer value '{value}' in column '{column}'")]
    InvalidScore {
        row: usize,
        column: String,
        value: String,
    },
}

/// Header names used to locate the name and score columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterColumns {
    pub name: String,
    pub primary_score: String,
    pub secondary_score: String,
}

impl Default for RosterColumns {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME_COLUMN.to_string(),
            primary_score: DEFAULT_PRIMARY_COLUMN.to_string(),
            secondary_score: DEFAULT_SECONDARY_COLUMN.to_string(),
        }
    }
}

pub struct RosterLoader {
    columns: RosterColumns,
}

impl Default for RosterLoader {
    fn default() -> Self {
        Self::new(RosterColumns::default())
    }
}

impl RosterLoader {
    pub fn new(columns: RosterColumns) -> Self {
        Self { columns }
    }

    pub fn load_from_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Member>, RosterError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let members = self.load_from_reader(file)?;
        info!(path = %path.display(), members = members.len(), "roster loaded");
        Ok(members)
    }

    pub fn load_from_reader<R: Read>(&self, reader: R) -> Result<Vec<Member>, RosterError> {
        parser::parse_members(reader, &self.columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn loads_members_in_roster_order() {
        let csv = "\u{feff}编号,昵称,本周考核积分,要塞积分\n\
1,Ada,120,3400\n\
2, Bo ,80,5100\n";
        let members = RosterLoader::default()
            .load_from_reader(Cursor::new(csv))
            .expect("roster parses");

        assert_eq!(
            members,
            vec![Member::new("Ada", 120, 3400), Member::new("Bo", 80, 5100)]
        );
    }

    #[test]
    fn custom_columns_are_resolved_by_header() {
        let csv = "points,fortress,player\n10,20,ada\n";
        let loader = RosterLoader::new(RosterColumns {
            name: "player".to_string(),
            primary_score: "points".to_string(),
            secondary_score: "fortress".to_string(),
        });
        let members = loader.load_from_reader(csv.as_bytes()).expect("roster parses");
        assert_eq!(members, vec![Member::new("ada", 10, 20)]);
    }

    #[test]
    fn missing_column_is_reported() {
        let csv = "昵称,本周考核积分\nAda,120\n";
        let err = RosterLoader::default()
            .load_from_reader(csv.as_bytes())
            .expect_err("missing fortress column");
        match err {
            RosterError::MissingColumn { column } => assert_eq!(column, "要塞积分"),
            other => panic!("expected missing column, got {other:?}"),
        }
    }

    #[test]
    fn invalid_score_reports_row_and_column() {
        let csv = "昵称,本周考核积分,要塞积分\nAda,120,10\nBo,lots,10\n";
        let err = RosterLoader::default()
            .load_from_reader(csv.as_bytes())
            .expect_err("invalid score");
        assert_eq!(
            err.to_string(),
            "roster: row 2 has a non-integer value 'lots' in column '本周考核积分'"
        );
    }

    #[test]
    fn blank_score_cells_load_as_missing_scores() {
        let csv = "昵称,本周考核积分,要塞积分\nAda,120,3400\nBo,80,\nCy, ,900\nDi,40\n";
        let members = RosterLoader::default()
            .load_from_reader(csv.as_bytes())
            .expect("blank cells are not errors");

        assert_eq!(
            members,
            vec![
                Member::new("Ada", 120, 3400),
                Member::with_scores("Bo", Some(80), None),
                Member::with_scores("Cy", None, Some(900)),
                Member::with_scores("Di", Some(40), None),
            ]
        );
    }

    #[test]
    fn rows_without_names_are_skipped() {
        let csv = "昵称,本周考核积分,要塞积分\n,120,10\nBo,5,10\n";
        let members = RosterLoader::default()
            .load_from_reader(csv.as_bytes())
            .expect("roster parses");
        assert_eq!(members, vec![Member::new("Bo", 5, 10)]);
    }

    #[test]
    fn whole_floats_are_accepted_as_scores() {
        assert_eq!(parser::parse_integer_for_tests("120"), Some(120));
        assert_eq!(parser::parse_integer_for_tests("-3"), Some(-3));
        assert_eq!(parser::parse_integer_for_tests("120.0"), Some(120));
        assert_eq!(parser::parse_integer_for_tests("120.5"), None);
        assert_eq!(parser::parse_integer_for_tests("120."), None);
        assert_eq!(parser::parse_integer_for_tests(""), None);
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let err = RosterLoader::default()
            .load_from_path("./does-not-exist.csv")
            .expect_err("expected io error");
        assert!(matches!(err, RosterError::Io(_)));
    }
}
