use super::views::{DistributionView, MemberRewardsView, ReportTable};
use chrono::NaiveDate;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

const MEMBER_REWARDS_SUFFIX: &str = "member_rewards.csv";
const DISTRIBUTION_SUFFIX: &str = "rewards_distribution.csv";

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("report output: unable to prepare {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("report output: unable to write {}: {source}", path.display())]
    Csv { path: PathBuf, source: csv::Error },
    #[error("report output: unable to render tables: {0}")]
    Render(#[source] csv::Error),
}

/// Files produced by a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportPaths {
    pub member_rewards: PathBuf,
    pub distribution: PathBuf,
}

/// Serializes both report views as date-stamped CSV files.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    directory: PathBuf,
    stamp: NaiveDate,
}

impl ReportWriter {
    pub fn new<P: AsRef<Path>>(directory: P, stamp: NaiveDate) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
            stamp,
        }
    }

    pub fn paths(&self) -> ReportPaths {
        let prefix = self.stamp.format("%Y-%m-%d");
        ReportPaths {
            member_rewards: self
                .directory
                .join(format!("{prefix}_{MEMBER_REWARDS_SUFFIX}")),
            distribution: self.directory.join(format!("{prefix}_{DISTRIBUTION_SUFFIX}")),
        }
    }

    pub fn write(
        &self,
        members: &MemberRewardsView,
        distribution: &DistributionView,
    ) -> Result<ReportPaths, ReportError> {
        std::fs::create_dir_all(&self.directory).map_err(|source| ReportError::Io {
            path: self.directory.clone(),
            source,
        })?;

        let paths = self.paths();
        write_table_to_path(&members.to_table(), &paths.member_rewards)?;
        write_table_to_path(&distribution.to_table(), &paths.distribution)?;

        info!(
            member_rewards = %paths.member_rewards.display(),
            distribution = %paths.distribution.display(),
            "reward reports written"
        );

        Ok(paths)
    }
}

/// Renders both tables into one stream, each preceded by a `# <file name>`
/// line. Used for dry runs.
pub fn render<W: Write>(
    members: &MemberRewardsView,
    distribution: &DistributionView,
    mut out: W,
) -> Result<(), ReportError> {
    let sections = [
        (MEMBER_REWARDS_SUFFIX, members.to_table()),
        (DISTRIBUTION_SUFFIX, distribution.to_table()),
    ];

    for (position, (title, table)) in sections.iter().enumerate() {
        if position > 0 {
            writeln!(out).map_err(|err| ReportError::Render(err.into()))?;
        }
        writeln!(out, "# {title}").map_err(|err| ReportError::Render(err.into()))?;
        write_table(table, &mut out).map_err(ReportError::Render)?;
    }

    Ok(())
}

fn write_table_to_path(table: &ReportTable, path: &Path) -> Result<(), ReportError> {
    let file = File::create(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_table(table, file).map_err(|source| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a header row followed by every data row.
pub fn write_table<W: Write>(table: &ReportTable, writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(&table.headers)?;
    for row in &table.rows {
        csv_writer.write_record(row)?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stamp() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).expect("valid date")
    }

    #[test]
    fn paths_are_prefixed_with_the_run_date() {
        let writer = ReportWriter::new("/srv/rewards", stamp());
        let paths = writer.paths();
        assert_eq!(
            paths.member_rewards,
            PathBuf::from("/srv/rewards/2026-10-17_member_rewards.csv")
        );
        assert_eq!(
            paths.distribution,
            PathBuf::from("/srv/rewards/2026-10-17_rewards_distribution.csv")
        );
    }

    #[test]
    fn write_table_quotes_comma_joined_cells() {
        let table = ReportTable {
            headers: vec!["date".to_string(), "gold".to_string()],
            rows: vec![vec!["2026-10-17 Saturday".to_string(), "ada,bo".to_string()]],
        };
        let mut buffer = Vec::new();
        write_table(&table, &mut buffer).expect("table writes");

        let text = String::from_utf8(buffer).expect("utf8 output");
        assert_eq!(text, "date,gold\n2026-10-17 Saturday,\"ada,bo\"\n");
    }
}
