//! Report assembly with and without a completion model, and the full
//! analysis pipeline against a mocked feed.

use std::collections::BTreeSet;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use subscope_analysis::{
    normalize_content, run_subject_analysis, AnalysisContext, FeedClient, ModelClient,
    PipelineError, ReportAssembler,
};
use subscope_core::{
    AnalysisRequest, ImpactLevel, ModelConfig, Post, PrimaryFrame, Subject, SubjectProfiles,
};
use subscope_store::JsonStore;

const SAMPLE_RAW: &str = "Subscribe now! This is AMAZING. Visit https://x.com today. \
                          Only 3 spots left, don't miss this exclusive offer!";

fn subject(name: &str) -> Subject {
    Subject {
        id: subscope_core::slugify(name),
        name: name.to_string(),
        feed_url: "https://example.substack.com/feed".to_string(),
        description: String::new(),
        last_analyzed: None,
        post_count: 0,
    }
}

fn post_from_raw(id: &str, raw: &str) -> Post {
    Post {
        id: id.to_string(),
        title: id.to_string(),
        raw_content: raw.to_string(),
        normalized_content: normalize_content(raw),
        published_at: None,
        link: None,
        author: None,
        categories: BTreeSet::new(),
    }
}

fn model_client(server: &MockServer) -> ModelClient {
    ModelClient::new(&ModelConfig {
        api_key: "sk-test".to_string(),
        model: "gpt-4o-mini".to_string(),
        base_url: format!("{}/v1", server.uri()),
        timeout_secs: 5,
    })
    .expect("failed to build test ModelClient")
}

fn completion(content: &serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{ "message": { "role": "assistant", "content": content.to_string() } }]
    }))
}

/// One reply that satisfies every stage: each stage only reads its own keys.
fn universal_reply() -> serde_json::Value {
    json!({
        "archetype": "The Model Archetype",
        "authority": 91.4,
        "relatability": 130,
        "expertise": 60,
        "description": "from the model",
        "primaryTone": "Energetic",
        "secondaryTones": ["direct"],
        "emotionalRange": "wide",
        "uniqueValue": "model value",
        "vocabularyComplexity": "simple",
        "sentenceStructure": "Short and direct",
        "emotionalTone": { "positive": 40, "negative": 10 },
        "commonPhrases": ["a", "b", "c", "d", "e", "f"],
        "triggers": [
            { "type": "FOMO", "frequency": 4, "examples": ["w", "x", "y", "z"], "impact": "high" },
            { "type": "Authority", "frequency": 0, "examples": [], "impact": "low" },
            { "type": "Urgency", "frequency": 9, "examples": ["now"], "impact": "high" }
        ],
        "beforeState": "stuck",
        "afterState": "free",
        "journey": ["one"],
        "promises": ["two"],
        "evidence": ["three"],
        "mission": "model mission",
        "vision": "model vision",
        "values": ["model value"]
    })
}

#[tokio::test]
async fn sample_text_end_to_end_without_model() {
    let profiles = SubjectProfiles::builtin().unwrap();
    let assembler = ReportAssembler::new(&profiles, None);

    let post = post_from_raw("p1", SAMPLE_RAW);
    assert!(!post.normalized_content.contains("Subscribe now"));
    assert!(!post.normalized_content.contains("https://x.com"));

    let report = assembler
        .analyze_neuropsychology(&subject("Sample Author"), vec![post])
        .await;

    let fomo = report
        .psychological_triggers
        .iter()
        .find(|t| t.type_label == "FOMO")
        .expect("FOMO detected");
    assert!(fomo.frequency_count >= 1);
    assert!(report.language_patterns.emotional_tone.positive >= 1);
}

#[tokio::test]
async fn fomo_and_reciprocity_thresholds_through_report() {
    let profiles = SubjectProfiles::builtin().unwrap();
    let assembler = ReportAssembler::new(&profiles, None);
    let text = "Last chance. Limited time. Don't miss out. Exclusive access. \
                Closing soon. Before it's too late. Grab the free bonus.";

    let report = assembler
        .analyze_neuropsychology(&subject("Dan Koe"), vec![post_from_raw("p1", text)])
        .await;

    let find = |label: &str| {
        report
            .psychological_triggers
            .iter()
            .find(|t| t.type_label == label)
            .cloned()
    };
    let fomo = find("FOMO").expect("FOMO");
    assert_eq!(fomo.frequency_count, 6);
    assert_eq!(fomo.impact_level, ImpactLevel::High);
    let reciprocity = find("Reciprocity").expect("Reciprocity");
    assert_eq!(reciprocity.frequency_count, 2);
    assert_eq!(reciprocity.impact_level, ImpactLevel::Low);
    assert!(find("Social Proof").is_none());
}

#[tokio::test]
async fn no_model_report_is_fully_populated() {
    let profiles = SubjectProfiles::builtin().unwrap();
    let assembler = ReportAssembler::new(&profiles, None);
    let report = assembler
        .analyze_neuropsychology(&subject("Unknown Writer"), vec![])
        .await;

    let value = serde_json::to_value(&report).unwrap();
    for key in [
        "id",
        "influencerId",
        "influencerName",
        "analyzedAt",
        "posts",
        "brandProfile",
        "languagePatterns",
        "psychologicalTriggers",
        "transformationNarrative",
        "missionVision",
        "overallAssessment",
    ] {
        assert!(
            value.get(key).is_some_and(|v| !v.is_null()),
            "missing {key}"
        );
    }
    assert_eq!(report.language_patterns.common_phrases.len(), 5);
    let signals = &value["languagePatterns"]["signals"];
    for key in [
        "metaphors",
        "temporalFocus",
        "sensoryAnchors",
        "motivation",
        "arousal",
        "pronounProfile",
    ] {
        assert!(signals.get(key).is_some(), "missing signal {key}");
    }
    assert!(!report.mission_vision.values.is_empty());
    assert!(!report.overall_assessment_text.is_empty());
}

#[tokio::test]
async fn model_stages_fill_report() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(completion(&universal_reply()))
        .expect(5)
        .mount(&server)
        .await;

    let profiles = SubjectProfiles::builtin().unwrap();
    let model = model_client(&server);
    let assembler = ReportAssembler::new(&profiles, Some(&model));

    let report = assembler
        .analyze_neuropsychology(
            &subject("Dan Koe"),
            vec![post_from_raw("p1", "You can build freedom. You will.")],
        )
        .await;

    let positioning = &report.brand_profile.positioning;
    assert_eq!(positioning.archetype_label, "The Model Archetype");
    assert_eq!(positioning.authority_score, 91);
    assert_eq!(positioning.relatability_score, 100);

    let patterns = &report.language_patterns;
    assert_eq!(patterns.sentence_structure, "Short and direct");
    assert_eq!(patterns.common_phrases.len(), 5);
    assert_eq!(patterns.emotional_tone.neutral, 50);
    assert_eq!(patterns.identity_frame.primary, PrimaryFrame::You);
    assert_eq!(patterns.power_words, vec!["freedom"]);

    assert_eq!(report.psychological_triggers.len(), 1);
    let fomo = &report.psychological_triggers[0];
    assert_eq!(fomo.type_label, "FOMO");
    assert_eq!(fomo.frequency_count, 4);
    assert_eq!(fomo.impact_level, ImpactLevel::Medium);
    assert_eq!(fomo.example_snippets.len(), 3);
    assert_eq!(report.transformation_narrative.before_state, "stuck");
    assert_eq!(report.mission_vision.mission, "model mission");
}

#[tokio::test]
async fn model_failure_degrades_to_heuristic_report() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let profiles = SubjectProfiles::builtin().unwrap();
    let model = model_client(&server);
    let assembler = ReportAssembler::new(&profiles, Some(&model));

    let report = assembler
        .analyze_neuropsychology(&subject("Greg Isenberg"), vec![post_from_raw("p1", SAMPLE_RAW)])
        .await;

    assert_eq!(
        report.brand_profile.positioning.archetype_label,
        "The Strategic Mentor"
    );
    assert!(report
        .psychological_triggers
        .iter()
        .any(|t| t.type_label == "FOMO"));
}

#[tokio::test]
async fn unparseable_model_reply_degrades_to_heuristic_report() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": "not json at all" } }]
        })))
        .mount(&server)
        .await;

    let profiles = SubjectProfiles::builtin().unwrap();
    let model = model_client(&server);
    let assembler = ReportAssembler::new(&profiles, Some(&model));

    let report = assembler
        .analyze_neuropsychology(&subject("Chris Do"), vec![])
        .await;

    assert_eq!(
        report.brand_profile.positioning.archetype_label,
        "The Brand Philosopher"
    );
}

#[tokio::test]
async fn pipeline_persists_report_and_subject() {
    let server = MockServer::start().await;
    let rss = "<?xml version=\"1.0\"?><rss version=\"2.0\"><channel><title>t</title>\
               <link>https://example.com</link><description>d</description>\
               <item><title>One</title><guid>one</guid><description>Don't miss it.</description></item>\
               <item><title>Two</title><guid>two</guid><description>Proven ideas.</description></item>\
               </channel></rss>";
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_string(rss))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = JsonStore::new(dir.path());
    let profiles = SubjectProfiles::builtin().unwrap();
    let feeds = FeedClient::new("subscope-test/0.1", 5).unwrap();
    let ctx = AnalysisContext {
        feeds: &feeds,
        assembler: ReportAssembler::new(&profiles, None),
        store: &store,
        max_posts: 10,
    };

    let request = AnalysisRequest {
        name: Some("Test  Writer".to_string()),
        feed_url: Some(server.uri()),
        description: Some("Writes tests".to_string()),
    };
    let outcome = run_subject_analysis(&ctx, &request).await.unwrap();

    assert_eq!(outcome.report_id, "test-writer");
    assert_eq!(outcome.subject.post_count, 2);
    assert_eq!(outcome.subject.feed_url, format!("{}/feed", server.uri()));
    assert!(outcome.subject.last_analyzed.is_some());

    let saved = store.load_report("test-writer").await.expect("report saved");
    assert_eq!(saved.posts.len(), 2);
    let roster = store.load_roster().await;
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].description, "Writes tests");

    // Re-analysis without a description keeps the stored one.
    let rerun = AnalysisRequest {
        description: None,
        ..request
    };
    let outcome = run_subject_analysis(&ctx, &rerun).await.unwrap();
    assert_eq!(outcome.subject.description, "Writes tests");
    assert_eq!(store.load_roster().await.len(), 1);
}

#[tokio::test]
async fn pipeline_rejects_missing_fields_without_writing() {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::new(dir.path());
    let profiles = SubjectProfiles::builtin().unwrap();
    let feeds = FeedClient::new("subscope-test/0.1", 5).unwrap();
    let ctx = AnalysisContext {
        feeds: &feeds,
        assembler: ReportAssembler::new(&profiles, None),
        store: &store,
        max_posts: 10,
    };

    let err = run_subject_analysis(&ctx, &AnalysisRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::Validation(_)));
    assert!(store.load_roster().await.is_empty());
}

#[tokio::test]
async fn pipeline_feed_failure_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = JsonStore::new(dir.path());
    let profiles = SubjectProfiles::builtin().unwrap();
    let feeds = FeedClient::new("subscope-test/0.1", 5).unwrap();
    let ctx = AnalysisContext {
        feeds: &feeds,
        assembler: ReportAssembler::new(&profiles, None),
        store: &store,
        max_posts: 10,
    };

    let request = AnalysisRequest {
        name: Some("Dan Koe".to_string()),
        feed_url: Some(server.uri()),
        description: None,
    };
    let err = run_subject_analysis(&ctx, &request).await.unwrap_err();
    assert!(matches!(err, PipelineError::Analysis(_)));
    assert!(store.load_roster().await.is_empty());
    assert!(store.load_report("dan-koe").await.is_none());
}

#[tokio::test]
async fn roster_write_failure_leaves_no_unlisted_report() {
    let server = MockServer::start().await;
    let rss = "<?xml version=\"1.0\"?><rss version=\"2.0\"><channel><title>t</title>\
               <link>https://example.com</link><description>d</description>\
               <item><title>One</title><guid>one</guid><description>Body.</description></item>\
               </channel></rss>";
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_string(rss))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    // A directory where the roster file belongs makes every roster write fail.
    std::fs::create_dir(dir.path().join("influencers.json")).unwrap();
    let store = JsonStore::new(dir.path());
    let profiles = SubjectProfiles::builtin().unwrap();
    let feeds = FeedClient::new("subscope-test/0.1", 5).unwrap();
    let ctx = AnalysisContext {
        feeds: &feeds,
        assembler: ReportAssembler::new(&profiles, None),
        store: &store,
        max_posts: 10,
    };

    let request = AnalysisRequest {
        name: Some("Dan Koe".to_string()),
        feed_url: Some(server.uri()),
        description: None,
    };
    let err = run_subject_analysis(&ctx, &request).await.unwrap_err();
    assert!(matches!(err, PipelineError::Store(_)));
    assert!(store.load_report("dan-koe").await.is_none());
}
