// Shared fixtures for unit tests.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::table::{Column, Table};

static COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Fresh, empty directory under the system temp dir
pub fn scratch_dir(name: &str) -> PathBuf {
    let n   = COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!(
        "student_performance_{}_{}_{}",
        name,
        std::process::id(),
        n
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// First rows of the public StudentsPerformance dataset, with every field quoted as in the published CSV
pub fn sample_csv() -> &'static str {
    concat!(
        "\"gender\",\"race/ethnicity\",\"parental level of education\",\"lunch\",",
        "\"test preparation course\",\"math score\",\"reading score\",\"writing score\"\n",
        "\"female\",\"group B\",\"bachelor's degree\",\"standard\",\"none\",\"72\",\"72\",\"74\"\n",
        "\"female\",\"group C\",\"some college\",\"standard\",\"completed\",\"69\",\"90\",\"88\"\n",
        "\"female\",\"group B\",\"master's degree\",\"standard\",\"none\",\"90\",\"95\",\"93\"\n",
        "\"male\",\"group A\",\"associate's degree\",\"free/reduced\",\"none\",\"47\",\"57\",\"44\"\n",
        "\"male\",\"group C\",\"some college\",\"standard\",\"none\",\"76\",\"78\",\"75\"\n",
        "\"female\",\"group B\",\"associate's degree\",\"standard\",\"none\",\"71\",\"83\",\"78\"\n",
        "\"female\",\"group B\",\"some college\",\"standard\",\"completed\",\"88\",\"95\",\"92\"\n",
        "\"male\",\"group B\",\"some college\",\"free/reduced\",\"none\",\"40\",\"43\",\"39\"\n",
        "\"male\",\"group D\",\"high school\",\"free/reduced\",\"completed\",\"64\",\"64\",\"67\"\n",
        "\"female\",\"group B\",\"high school\",\"free/reduced\",\"none\",\"38\",\"60\",\"50\"\n",
        "\"male\",\"group C\",\"associate's degree\",\"standard\",\"none\",\"58\",\"54\",\"52\"\n",
        "\"male\",\"group D\",\"associate's degree\",\"standard\",\"none\",\"40\",\"52\",\"43\"\n",
    )
}

/// Same shape as the loaded sample, built in memory (raw column names)
pub fn raw_scores_table(math: &[f64], reading: &[f64], writing: &[f64]) -> Table {
    let genders = (0..math.len()).map(|i| if i % 2 == 0 { "female" } else { "male" });
    Table::from_columns(vec![
        Column::categorical("gender", genders),
        Column::numeric("math score", math.iter().copied()),
        Column::numeric("reading score", reading.iter().copied()),
        Column::numeric("writing score", writing.iter().copied()),
    ])
    .unwrap()
}
