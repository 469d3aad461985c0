use linegroups::groups::GroupId;
use linegroups::{Corpus, Report, Splitter, cluster};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

/// Digit 6 stands for an empty quoted pair.
const QUOTED_EMPTY: u8 = 6;

/// Rows drawn from a small alphabet so tokens collide often. `None` is a
/// bare empty field.
fn rows_strategy() -> impl Strategy<Value = Vec<Vec<Option<u8>>>> {
    prop::collection::vec(
        prop::collection::vec(prop::option::weighted(0.8, 0u8..=QUOTED_EMPTY), 1..5),
        0..40,
    )
}

fn to_lines(rows: &[Vec<Option<u8>>]) -> Vec<String> {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Some(QUOTED_EMPTY) => "\"\"".to_string(),
                    Some(d) => format!("\"{}\"", d),
                    None => String::new(),
                })
                .collect::<Vec<_>>()
                .join(";")
        })
        .collect()
}

fn corpus_tokens(corpus: &Corpus) -> Vec<Vec<String>> {
    (0..corpus.len())
        .map(|i| corpus.tokens(i).map(str::to_string).collect())
        .collect()
}

/// Naive reference: union rows directly whenever they share a non-empty
/// token in the same column.
fn reference_partition(rows: &[Vec<String>]) -> BTreeSet<BTreeSet<usize>> {
    let mut parent: Vec<usize> = (0..rows.len()).collect();
    fn root(parent: &mut [usize], mut x: usize) -> usize {
        while parent[x] != x {
            x = parent[x];
        }
        x
    }

    let mut first_at: HashMap<(usize, &str), usize> = HashMap::new();
    for (i, row) in rows.iter().enumerate() {
        for (position, token) in row.iter().enumerate() {
            if token.is_empty() {
                continue;
            }
            match first_at.get(&(position, token.as_str())) {
                Some(&j) => {
                    let (a, b) = (root(&mut parent, i), root(&mut parent, j));
                    parent[a] = b;
                }
                None => {
                    first_at.insert((position, token.as_str()), i);
                }
            }
        }
    }

    let mut sets: HashMap<usize, BTreeSet<usize>> = HashMap::new();
    for i in 0..rows.len() {
        let r = root(&mut parent, i);
        sets.entry(r).or_default().insert(i);
    }
    sets.into_values().collect()
}

fn partition(report: &Report) -> BTreeSet<BTreeSet<usize>> {
    report
        .groups()
        .iter()
        .map(|g| g.rows.iter().copied().collect())
        .collect()
}

proptest! {
    #[test]
    fn every_row_in_exactly_one_group(rows in rows_strategy()) {
        let (corpus, _) = Corpus::from_lines(to_lines(&rows), &Splitter::default());
        let report = cluster(&corpus);

        let mut seen = vec![0usize; corpus.len()];
        for group in report.groups() {
            for &row in &group.rows {
                seen[row] += 1;
            }
        }
        prop_assert!(seen.iter().all(|&n| n == 1), "row counts: {:?}", seen);
        prop_assert_eq!(report.total(), report.multi_row() + report.singletons());
    }

    #[test]
    fn matches_reference_partition(rows in rows_strategy()) {
        let (corpus, _) = Corpus::from_lines(to_lines(&rows), &Splitter::default());
        let report = cluster(&corpus);
        prop_assert_eq!(partition(&report), reference_partition(&corpus_tokens(&corpus)));
    }

    #[test]
    fn rows_sharing_a_column_value_share_a_group(rows in rows_strategy()) {
        let (corpus, _) = Corpus::from_lines(to_lines(&rows), &Splitter::default());
        let report = cluster(&corpus);
        let tokens = corpus_tokens(&corpus);

        for a in 0..tokens.len() {
            for b in (a + 1)..tokens.len() {
                let shares = tokens[a]
                    .iter()
                    .zip(&tokens[b])
                    .any(|(x, y)| !x.is_empty() && x == y);
                if shares {
                    prop_assert_eq!(report.group_of(a), report.group_of(b));
                }
            }
        }
    }

    #[test]
    fn groups_sorted_by_descending_size(rows in rows_strategy()) {
        let (corpus, _) = Corpus::from_lines(to_lines(&rows), &Splitter::default());
        let report = cluster(&corpus);
        let sizes: Vec<_> = report.groups().iter().map(|g| g.len()).collect();
        prop_assert!(sizes.windows(2).all(|w| w[0] >= w[1]), "sizes: {:?}", sizes);
        prop_assert!(report.groups()[..report.multi_row()].iter().all(|g| g.len() >= 2));
    }

    #[test]
    fn ingesting_rendered_corpus_is_idempotent(rows in rows_strategy()) {
        let splitter = Splitter::default();
        let (corpus, _) = Corpus::from_lines(to_lines(&rows), &splitter);
        let rendered: Vec<String> = (0..corpus.len())
            .map(|i| corpus.render_row(i, &splitter))
            .collect();
        let (again, stats) = Corpus::from_lines(&rendered, &splitter);

        prop_assert_eq!(stats.rejected, 0);
        prop_assert_eq!(stats.duplicates, 0);
        prop_assert_eq!(again.max_columns(), corpus.max_columns());
        prop_assert_eq!(corpus_tokens(&again), corpus_tokens(&corpus));
        prop_assert_eq!(&rendered, &(0..again.len()).map(|i| again.render_row(i, &splitter)).collect::<Vec<_>>());
    }

    #[test]
    fn group_id_is_injective(
        max_columns in 0usize..64,
        a in (0usize..1000, 0usize..=64),
        b in (0usize..1000, 0usize..=64),
    ) {
        let (ia, pa) = (a.0, a.1.min(max_columns));
        let (ib, pb) = (b.0, b.1.min(max_columns));
        let same_condition = (ia, pa) == (ib, pb);
        let same_id = GroupId::derive(ia, pa, max_columns) == GroupId::derive(ib, pb, max_columns);
        prop_assert_eq!(same_condition, same_id);
    }
}
