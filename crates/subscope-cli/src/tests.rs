use super::*;

fn services() -> Services {
    Services {
        store: JsonStore::new("./unused-test-data"),
        profiles: SubjectProfiles::builtin().expect("builtin profiles"),
        feeds: FeedClient::new("subscope-test/0.1", 5).expect("feed client"),
        model: None,
        max_posts: 10,
    }
}

#[test]
fn parses_analyze_command() {
    let cli = Cli::try_parse_from([
        "subscope-cli",
        "analyze",
        "--name",
        "Dan Koe",
        "--feed-url",
        "https://thedankoe.substack.com",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Commands::Analyze {
            name,
            feed_url,
            description,
        } => {
            assert_eq!(name, "Dan Koe");
            assert_eq!(feed_url, "https://thedankoe.substack.com");
            assert!(description.is_none());
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn analyze_requires_feed_url() {
    assert!(Cli::try_parse_from(["subscope-cli", "analyze", "--name", "Dan Koe"]).is_err());
}

#[test]
fn parses_batch_without_filter() {
    let cli = Cli::try_parse_from(["subscope-cli", "batch"]).unwrap();
    assert!(matches!(cli.command, Commands::Batch { subject: None }));
}

#[test]
fn parses_batch_with_subject_filter() {
    let cli = Cli::try_parse_from(["subscope-cli", "batch", "--subject", "greg-isenberg"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Batch { subject: Some(ref s) } if s == "greg-isenberg"
    ));
}

#[test]
fn parses_list_and_show() {
    let cli = Cli::try_parse_from(["subscope-cli", "list"]).unwrap();
    assert!(matches!(cli.command, Commands::List));

    let cli = Cli::try_parse_from(["subscope-cli", "show", "dan-koe"]).unwrap();
    assert!(matches!(cli.command, Commands::Show { ref slug } if slug == "dan-koe"));
}

#[test]
fn missing_command_is_error() {
    assert!(Cli::try_parse_from(["subscope-cli"]).is_err());
}

#[test]
fn batch_selects_only_subjects_with_feeds() {
    let services = services();
    let selected = analyze::select_subjects(&services, None).unwrap();
    assert!(!selected.is_empty());
    assert!(selected.iter().all(|entry| entry.feed_url.is_some()));
    assert!(selected.iter().any(|entry| entry.name == "Greg Isenberg"));
}

#[test]
fn batch_filter_rejects_unknown_subject() {
    let services = services();
    let err = analyze::select_subjects(&services, Some("nobody")).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn batch_filter_rejects_subject_without_feed() {
    let services = services();
    let err = analyze::select_subjects(&services, Some("dan-koe")).unwrap_err();
    assert!(err.to_string().contains("no feed URL"));
}
