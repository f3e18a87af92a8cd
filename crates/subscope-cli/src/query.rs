//! Read-only commands over the data directory.

use subscope_store::JsonStore;

pub(crate) async fn run_list(store: &JsonStore) {
    let roster = store.load_roster().await;
    if roster.is_empty() {
        println!("no subjects analyzed yet; run `analyze` or `batch` first");
        return;
    }

    println!("{:<25}{:<30}{:<18}POSTS", "SLUG", "NAME", "LAST ANALYZED");
    for subject in &roster {
        let analyzed = subject
            .last_analyzed
            .map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string());
        println!(
            "{:<25}{:<30}{:<18}{}",
            subject.id, subject.name, analyzed, subject.post_count
        );
    }
}

/// Print the stored report for `slug` as pretty JSON.
///
/// # Errors
///
/// Returns an error if no report exists or it cannot be serialized.
pub(crate) async fn run_show(store: &JsonStore, slug: &str) -> anyhow::Result<()> {
    let report = store
        .load_report(slug)
        .await
        .ok_or_else(|| anyhow::anyhow!("no analysis found for '{slug}'"))?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
