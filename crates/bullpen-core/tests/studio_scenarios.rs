//! End-to-end studio runs: a full offline day, a budget halt against a
//! mocked provider, and the tie-break contract of the event queue.

#![allow(clippy::unwrap_used, clippy::panic)]

use bullpen_core::{EndReason, Event, EventAction, EventQueue, Studio, StudioConfig};
use bullpen_llm::{LlmConfig, OFFLINE_REPLY};
use bullpen_types::{AgentKind, SimHours};
use rust_decimal::Decimal;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A one-day, unpaced, fully offline configuration.
fn offline_config() -> StudioConfig {
    StudioConfig {
        seconds_per_hour: 0.0,
        skip_sandbox: true,
        seed: Some(42),
        llm: LlmConfig {
            offline: true,
            ..LlmConfig::default()
        },
        ..StudioConfig::default()
    }
}

/// Data rows of a Markdown table artifact, header and separator dropped.
fn data_rows(artifact: &str) -> Vec<&str> {
    artifact
        .lines()
        .filter(|line| line.starts_with("| "))
        .skip(1)
        .collect()
}

#[tokio::test]
async fn offline_day_runs_the_whole_calendar_for_free() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("run");
    tokio::fs::create_dir_all(&out).await.unwrap();

    let mut config = offline_config();
    config.budget = Decimal::ONE;
    config.validate().unwrap();

    let mut studio = Studio::launch("a tiny hello tool".to_owned(), config, &out, None)
        .await
        .unwrap();
    let summary = studio.run().await.unwrap();

    assert_eq!(summary.end_reason, EndReason::QueueDrained);
    assert_eq!(summary.total_spent, Decimal::ZERO);
    assert_eq!(summary.final_time, SimHours::new(8.0).unwrap());
    // 20 calendar events plus the manager's two follow-ups.
    assert_eq!(summary.events_executed, 22);

    let timeline = tokio::fs::read_to_string(studio.timeline_path())
        .await
        .unwrap();
    assert!(timeline.contains("Manager: Planning project"));
    assert!(timeline.contains("Dev-A: Writing hello.py"));
    assert!(timeline.contains("QA: Syntax check PASS"));
    assert!(timeline.contains("Deadline reached, stopping"));
    assert!(!timeline.contains("Budget exceeded"));

    // Every row bills zero, keeps morale/fatigue inside their bands, and
    // never steps backwards in simulated time.
    let mut last_time = 0.0_f64;
    for row in data_rows(&timeline) {
        assert!(row.contains("$0.0000"), "unexpected cost in row: {row}");

        let mut cells = row.split('|').map(str::trim);
        let time: f64 = cells.nth(1).unwrap().parse().unwrap();
        let morale: f64 = cells.nth(2).unwrap().parse().unwrap();
        let fatigue: f64 = cells.next().unwrap().parse().unwrap();
        assert!(time >= last_time, "timeline ran backwards at row: {row}");
        assert!((0.0..=100.0).contains(&morale), "morale out of band: {row}");
        assert!((0.0..=8.0).contains(&fatigue), "fatigue out of band: {row}");
        last_time = time;
    }

    // 15 gossip slots, all whispering the canned offline line.
    let gossip = tokio::fs::read_to_string(studio.gossip_path())
        .await
        .unwrap();
    let whispers = data_rows(&gossip);
    assert_eq!(whispers.len(), 15);
    assert!(whispers.iter().all(|row| row.contains("hello from the bullpen")));

    // A day of gossip wears the crew down; the bounds follow from the
    // decay range [1, 3] times 15 slots, plus coffee and the meeting.
    assert!(summary.final_morale >= 29.9 && summary.final_morale <= 60.1);
    assert!((summary.final_fatigue - 5.5).abs() < 1e-9);

    // The developer's program and QA's report landed in the workspace.
    let program = tokio::fs::read_to_string(out.join("src/hello.py"))
        .await
        .unwrap();
    assert_eq!(program, OFFLINE_REPLY);
    let report = tokio::fs::read_to_string(out.join("qa/test_log.txt"))
        .await
        .unwrap();
    assert!(report.trim().ends_with("PASS"));
}

#[tokio::test]
async fn a_tiny_budget_halts_the_studio_after_the_first_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": "1. Plan\n2. Build\n3. Check"}}],
            "usage": {"cost": 0.01}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("run");
    tokio::fs::create_dir_all(&out).await.unwrap();

    let mut config = offline_config();
    config.budget = Decimal::new(1, 4); // $0.0001
    config.llm = LlmConfig {
        offline: false,
        api_url: server.uri(),
        request_timeout_secs: 5,
        max_retries: 0,
        templates_dir: None,
    };
    config.validate().unwrap();

    let mut studio = Studio::launch(
        "a tiny hello tool".to_owned(),
        config,
        &out,
        Some("test-key".to_owned()),
    )
    .await
    .unwrap();
    let summary = studio.run().await.unwrap();

    // The manager's call crosses the ceiling; the kickoff finishes and
    // nothing scheduled after it survives.
    assert_eq!(summary.end_reason, EndReason::BudgetHalted);
    assert_eq!(summary.events_executed, 1);
    assert_eq!(summary.total_spent, Decimal::new(1, 2));

    let timeline = tokio::fs::read_to_string(studio.timeline_path())
        .await
        .unwrap();
    assert!(timeline.contains("Manager: Planning project"));
    assert!(timeline.contains("Project plan:"));
    assert!(!timeline.contains("Dev-A: Writing hello.py"));
    assert!(!timeline.contains("Deadline reached"));

    // The halt notice is the final row of the timeline.
    let rows = data_rows(&timeline);
    assert!(rows.last().unwrap().contains("Budget exceeded, halting the studio"));
}

#[test]
fn same_instant_events_pop_in_insertion_order() {
    let mut queue = EventQueue::default();
    let instant = SimHours::new(4.5).unwrap();

    queue.push(Event {
        time: instant,
        action: EventAction::Gossip(AgentKind::Developer),
        label: "first whisper".to_owned(),
    });
    queue.push(Event {
        time: instant,
        action: EventAction::Gossip(AgentKind::Qa),
        label: "second whisper".to_owned(),
    });

    assert_eq!(queue.pop().unwrap().label, "first whisper");
    assert_eq!(queue.pop().unwrap().label, "second whisper");
    assert!(queue.pop().is_none());
}
