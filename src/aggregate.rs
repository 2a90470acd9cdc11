use crate::model::{ChangeRow, Commit};
use std::collections::HashMap;
use std::sync::Arc;

/// Groups rows by commit id, keeping the order in which ids first appear.
/// The first row of each group supplies the commit's author and timestamps.
pub fn aggregate(rows: &[ChangeRow], url_base: Option<&str>) -> Vec<Commit> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<ChangeRow>> = HashMap::new();

    for row in rows {
        let group = groups.entry(row.commit.as_str()).or_insert_with(|| {
            order.push(row.commit.as_str());
            Vec::new()
        });
        group.push(row.clone());
    }

    order
        .into_iter()
        .filter_map(|id| {
            let lines: Arc<[ChangeRow]> = groups.remove(id)?.into();
            let first = lines.first()?;
            let url = url_base.map(|base| commit_url(base, id));
            Some(Commit::new(id.to_string(), url, first, Arc::clone(&lines)))
        })
        .collect()
}

/// Stable chronological sort. Callers that need time order must ask for it.
pub fn sort_chronologically(commits: &mut [Commit]) {
    commits.sort_by(|a, b| a.datetime.cmp(&b.datetime));
}

pub fn commit_url(base: &str, id: &str) -> String {
    format!("{}{}", base, id)
}
