use crate::corpus::Corpus;
use crate::diagnostics::{Diagnostics, format_size};
use crate::splitter::Splitter;
use crate::union_find::Consolidated;
use itertools::Itertools;
use serde::Serialize;
use std::cmp::Reverse;
use std::io::{self, Write};

/// One numbered group of the final report. Rows are ascending corpus indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportGroup {
    pub number: usize,
    pub rows: Vec<usize>,
}

impl ReportGroup {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Final partition in reporting order: merged groups by descending size
/// (ties by lowest row index), then unmatched rows as singletons in row order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Report {
    groups: Vec<ReportGroup>,
    multi_row: usize,
}

impl Report {
    pub fn build(consolidated: &Consolidated) -> Self {
        let merged = consolidated
            .member_sets()
            .map(|members| members.iter().copied().collect::<Vec<_>>())
            .sorted_by_key(|rows| (Reverse(rows.len()), rows.first().copied()))
            .collect::<Vec<_>>();
        let multi_row = merged.len();

        let singletons = (0..consolidated.row_count())
            .filter(|&row| !consolidated.is_matched(row))
            .map(|row| vec![row]);

        let groups = merged
            .into_iter()
            .chain(singletons)
            .enumerate()
            .map(|(i, rows)| ReportGroup { number: i + 1, rows })
            .collect();

        Report { groups, multi_row }
    }

    pub fn groups(&self) -> &[ReportGroup] {
        &self.groups
    }

    pub fn total(&self) -> usize {
        self.groups.len()
    }

    /// Groups built from at least one condition; every one has two or more rows.
    pub fn multi_row(&self) -> usize {
        self.multi_row
    }

    pub fn singletons(&self) -> usize {
        self.groups.len() - self.multi_row
    }

    /// Group number (1-based) holding `row`.
    pub fn group_of(&self, row: usize) -> Option<usize> {
        self.groups
            .iter()
            .find(|g| g.rows.binary_search(&row).is_ok())
            .map(|g| g.number)
    }

    pub fn write_text<W: Write>(
        &self,
        out: &mut W,
        corpus: &Corpus,
        splitter: &Splitter,
        diagnostics: Option<&Diagnostics>,
    ) -> io::Result<()> {
        writeln!(out, "There are {} groups with 2 elements and more.", self.multi_row)?;
        writeln!(out)?;

        for group in &self.groups {
            let noun = if group.len() == 1 { "element" } else { "elements" };
            writeln!(out, "Group #{} (consists of {} {})", group.number, group.len(), noun)?;
            for &row in &group.rows {
                writeln!(out, "{}", corpus.render_row(row, splitter))?;
            }
            writeln!(out)?;
        }

        writeln!(out, "All {} groups created.", self.total())?;
        writeln!(
            out,
            "Multi-row groups: {}, singleton groups: {}.",
            self.multi_row,
            self.singletons()
        )?;
        writeln!(out)?;

        if let Some(d) = diagnostics {
            writeln!(out, "Total time: {} millis", d.elapsed_ms)?;
            writeln!(out, "Total memory: {}", format_size(d.memory_bytes))?;
        }
        Ok(())
    }

    pub fn write_json<W: Write>(
        &self,
        out: &mut W,
        corpus: &Corpus,
        diagnostics: Option<&Diagnostics>,
    ) -> Result<(), serde_json::Error> {
        let document = JsonReport {
            total_groups: self.total(),
            multi_row_groups: self.multi_row,
            singleton_groups: self.singletons(),
            groups: self
                .groups
                .iter()
                .map(|g| JsonGroup {
                    number: g.number,
                    size: g.len(),
                    rows: g
                        .rows
                        .iter()
                        .map(|&index| JsonRow {
                            index,
                            tokens: corpus.tokens(index).collect(),
                        })
                        .collect(),
                })
                .collect(),
            diagnostics,
        };
        serde_json::to_writer_pretty(&mut *out, &document)?;
        writeln!(out).map_err(serde_json::Error::io)
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    total_groups: usize,
    multi_row_groups: usize,
    singleton_groups: usize,
    groups: Vec<JsonGroup<'a>>,
    diagnostics: Option<&'a Diagnostics>,
}

#[derive(Serialize)]
struct JsonGroup<'a> {
    number: usize,
    size: usize,
    rows: Vec<JsonRow<'a>>,
}

#[derive(Serialize)]
struct JsonRow<'a> {
    index: usize,
    tokens: Vec<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::cluster;

    fn build(lines: &[&str]) -> (Corpus, Report) {
        let splitter = Splitter::default();
        let (corpus, _) = Corpus::from_lines(lines.iter().copied(), &splitter);
        let report = cluster(&corpus);
        (corpus, report)
    }

    fn text(lines: &[&str]) -> String {
        let (corpus, report) = build(lines);
        let mut out = Vec::new();
        report
            .write_text(&mut out, &corpus, &Splitter::default(), None)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_larger_groups_first_then_singletons() {
        let (_, report) = build(&[
            "\"5\";\"0\"",
            "\"1\";\"2\"",
            "\"1\";\"3\"",
            "\"6\";\"7\"",
            "\"1\";\"4\"",
            "\"5\";\"8\"",
        ]);
        let rows: Vec<_> = report.groups().iter().map(|g| g.rows.clone()).collect();
        assert_eq!(rows, vec![vec![1, 2, 4], vec![0, 5], vec![3]]);
        assert_eq!(report.multi_row(), 2);
        assert_eq!(report.singletons(), 1);
        assert_eq!(report.group_of(5), Some(2));
    }

    #[test]
    fn test_equal_sizes_ordered_by_lowest_row() {
        let (_, report) = build(&["\"9\";\"1\"", "\"8\";\"1\"", "\"2\";\"7\"", "\"2\";\"6\""]);
        assert_eq!(report.groups()[0].rows, vec![0, 1]);
        assert_eq!(report.groups()[1].rows, vec![2, 3]);
    }

    #[test]
    fn test_text_layout() {
        let rendered = text(&["\"1\";\"2\"", "\"1\";\"3\"", "\"4\";\"\""]);
        let expected = "There are 1 groups with 2 elements and more.\n\
            \n\
            Group #1 (consists of 2 elements)\n\
            \"1\";\"2\"\n\
            \"1\";\"3\"\n\
            \n\
            Group #2 (consists of 1 element)\n\
            \"4\";\"\"\n\
            \n\
            All 2 groups created.\n\
            Multi-row groups: 1, singleton groups: 1.\n\
            \n";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_empty_report() {
        let rendered = text(&[]);
        assert!(rendered.starts_with("There are 0 groups with 2 elements and more."));
        assert!(rendered.contains("All 0 groups created."));
        assert!(!rendered.contains("Group #"));
    }

    #[test]
    fn test_diagnostics_appended() {
        let (corpus, report) = build(&["\"1\""]);
        let diagnostics = Diagnostics {
            elapsed_ms: 12,
            memory_bytes: 2048,
        };
        let mut out = Vec::new();
        report
            .write_text(&mut out, &corpus, &Splitter::default(), Some(&diagnostics))
            .unwrap();
        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.ends_with("Total time: 12 millis\nTotal memory: 2.0 KB\n"));
    }

    #[test]
    fn test_json_layout() {
        let (corpus, report) = build(&["\"1\";\"2\"", "\"1\";\"3\"", "\"4\""]);
        let mut out = Vec::new();
        report.write_json(&mut out, &corpus, None).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["total_groups"], 2);
        assert_eq!(value["multi_row_groups"], 1);
        assert_eq!(value["singleton_groups"], 1);
        assert_eq!(value["groups"][0]["size"], 2);
        assert_eq!(value["groups"][0]["rows"][1]["tokens"], serde_json::json!(["1", "3"]));
        assert_eq!(value["groups"][1]["rows"][0]["index"], 2);
        assert!(value["diagnostics"].is_null());
    }
}
