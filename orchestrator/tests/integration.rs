//! End-to-end orchestration tests
//!
//! These drive the real orchestrator, pool and merge against in-process fakes,
//! so timing behaviour (queueing, deadlines, panics) is exercised for real.

use std::time::{Duration, Instant};

use orchestrator::{DealOrchestrator, OrchestratorError};
use shared::{ErrorKind, PipelineConfig, UnitStatus};

mod common;
use common::{CaptionScraper, FakeCandidates, ScriptedExtractor, ScriptedSearch, SearchBehaviour, TestFixtures};

type FakeOrchestrator = DealOrchestrator<FakeCandidates, ScriptedSearch, CaptionScraper, ScriptedExtractor>;

fn build(
    candidates: FakeCandidates,
    search: ScriptedSearch,
    scraper: CaptionScraper,
    extractor: ScriptedExtractor,
    config: PipelineConfig,
) -> FakeOrchestrator {
    DealOrchestrator::new(candidates, search, scraper, extractor, config).unwrap()
}

/// One business with a captioned post, one with nothing found
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_deals_for_one_business_only() {
    let search = ScriptedSearch::new().on(
        "MatchaTown",
        SearchBehaviour::Hits(vec![
            TestFixtures::MATCHA_POST.to_string(),
            "https://www.yelp.com/biz/matcha-town".to_string(),
        ]),
    );
    let scraper = CaptionScraper::new().with_caption(TestFixtures::MATCHA_POST, TestFixtures::MATCHA_CAPTION);
    let extractor = ScriptedExtractor::new().reply(
        "MatchaTown",
        vec![TestFixtures::deal_invocation(
            "MatchaTown",
            &[
                TestFixtures::deal("BOGO", "Buy one matcha latte, get one free", "BOGO"),
                TestFixtures::deal("Discount", "12% off gelato with student ID", "12% off"),
            ],
        )],
    );
    let received = extractor.received();

    let orchestrator = build(
        FakeCandidates::with(TestFixtures::neighbourhood()),
        search,
        scraper,
        extractor,
        PipelineConfig::default(),
    );
    let records = orchestrator.aggregate(37.32, -122.03).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "MatchaTown");
    assert_eq!(records[0].deals.len(), 2);
    assert_eq!(records[0].deals[1].price_or_discount, "12% off");
    assert_eq!(records[1].name, "HeyTea");
    assert_eq!(records[1].location, "Berkeley");
    assert!(records[1].deals.is_empty());

    let mut payloads = received.lock().unwrap().clone();
    payloads.sort();
    assert_eq!(payloads.len(), 2, "one extraction call per business");
    assert_eq!(payloads[0], r#"[{"HeyTea":{}}]"#);
    assert!(payloads[1].contains(TestFixtures::MATCHA_POST));
    assert!(payloads[1].contains("BOGO matcha lattes"));
}

/// Malformed arguments fail only that business
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_malformed_arguments_isolated() {
    let extractor = ScriptedExtractor::new()
        .reply(
            "MatchaTown",
            vec![TestFixtures::deal_invocation(
                "MatchaTown",
                &[TestFixtures::deal("BOGO", "Buy one, get one", "BOGO")],
            )],
        )
        .reply("HeyTea", vec![TestFixtures::malformed_invocation()]);

    let orchestrator = build(
        FakeCandidates::with(TestFixtures::neighbourhood()),
        ScriptedSearch::new(),
        CaptionScraper::new(),
        extractor,
        PipelineConfig::default(),
    );

    let result = orchestrator.dispatch(&TestFixtures::neighbourhood()).await;
    let heytea = result.get("HeyTea").unwrap();
    assert_eq!(heytea.status, UnitStatus::Failed);
    assert!(matches!(heytea.error, Some(ErrorKind::ParseError(_))));
    assert_eq!(result.get("MatchaTown").unwrap().status, UnitStatus::Succeeded);

    let records = orchestrator.aggregate(0.0, 0.0).await.unwrap();
    assert_eq!(records[0].deals.len(), 1);
    assert!(records[1].deals.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_every_business_reaches_a_terminal_state() {
    let shops = TestFixtures::shops(6);
    let search = ScriptedSearch::new()
        .on("Shop 1", SearchBehaviour::Fail)
        .on("Shop 3", SearchBehaviour::Panic);
    let extractor = ScriptedExtractor::new()
        .reply("Shop 0", vec![TestFixtures::deal_invocation("Shop 0", &[TestFixtures::deal("Promo", "Free cookie", "Free")])])
        .reply("Shop 4", vec![TestFixtures::malformed_invocation()]);

    let orchestrator = build(
        FakeCandidates::with(shops.clone()),
        search,
        CaptionScraper::new(),
        extractor,
        TestFixtures::config(3, Duration::from_secs(5)),
    );
    let result = orchestrator.dispatch(&shops).await;

    assert_eq!(result.len(), shops.len());
    for (outcome, shop) in result.outcomes().iter().zip(&shops) {
        assert_eq!(outcome.business_key, shop.name);
        assert_eq!(outcome.input, *shop);
    }

    // A failed search is absorbed, the lane still summarizes with no captions
    assert_eq!(result.get("Shop 1").unwrap().status, UnitStatus::Succeeded);
    assert!(matches!(result.get("Shop 3").unwrap().error, Some(ErrorKind::LaneAborted(_))));
    assert!(matches!(result.get("Shop 4").unwrap().error, Some(ErrorKind::ParseError(_))));
    assert_eq!(result.get("Shop 0").unwrap().deals().len(), 1);
    assert_eq!(result.succeeded(), 4);
    assert_eq!(result.failed(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_panicking_lane_does_not_disturb_others() {
    let search = ScriptedSearch::new().on("HeyTea", SearchBehaviour::Panic);
    let extractor = ScriptedExtractor::new().reply(
        "MatchaTown",
        vec![TestFixtures::deal_invocation("MatchaTown", &[TestFixtures::deal("BOGO", "Buy one, get one", "BOGO")])],
    );

    let orchestrator = build(
        FakeCandidates::with(TestFixtures::neighbourhood()),
        search,
        CaptionScraper::new(),
        extractor,
        PipelineConfig::default(),
    );
    let records = orchestrator.aggregate(0.0, 0.0).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].deals.len(), 1);
    assert!(records[1].deals.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_excess_businesses_queue_behind_pool() {
    let shops = TestFixtures::shops(10);
    let search = ScriptedSearch::new().with_delay(Duration::from_millis(40));
    let probe = search.probe();

    let orchestrator = build(
        FakeCandidates::with(shops.clone()),
        search,
        CaptionScraper::new(),
        ScriptedExtractor::new(),
        TestFixtures::config(3, Duration::from_secs(5)),
    );
    let records = orchestrator.aggregate(0.0, 0.0).await.unwrap();

    assert_eq!(records.len(), 10);
    assert_eq!(probe.calls(), 10, "no business dropped");
    assert!(probe.peak() <= 3, "peak concurrency {} exceeded the pool", probe.peak());
    assert!(probe.peak() >= 2, "lanes should overlap");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_unbounded_lane_limit_runs_every_business() {
    let extractor = ScriptedExtractor::new().reply(
        "MatchaTown",
        vec![TestFixtures::deal_invocation("MatchaTown", &[TestFixtures::deal("BOGO", "Buy one, get one", "BOGO")])],
    );
    let config = PipelineConfig::default()
        .with_overrides(|key| (key == "DEALS_MAX_LANES").then(|| usize::MAX.to_string()))
        .unwrap();
    assert_eq!(config.max_lanes, usize::MAX);

    let orchestrator = build(
        FakeCandidates::with(TestFixtures::neighbourhood()),
        ScriptedSearch::new(),
        CaptionScraper::new(),
        extractor,
        config,
    );
    let records = orchestrator.aggregate(0.0, 0.0).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].deals.len(), 1);
    assert!(records[1].deals.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_stalled_collaborator_times_out() {
    let search = ScriptedSearch::new().on("HeyTea", SearchBehaviour::Stall);
    let orchestrator = build(
        FakeCandidates::with(TestFixtures::neighbourhood()),
        search,
        CaptionScraper::new(),
        ScriptedExtractor::new(),
        TestFixtures::config(2, Duration::from_millis(50)),
    );

    let started = Instant::now();
    let result = orchestrator.dispatch(&TestFixtures::neighbourhood()).await;

    assert!(started.elapsed() < Duration::from_secs(2), "join must not wait on the stalled lane");
    assert_eq!(result.len(), 2);
    assert_eq!(result.get("HeyTea").unwrap().error, Some(ErrorKind::Timeout));
    assert_eq!(result.get("MatchaTown").unwrap().status, UnitStatus::Succeeded);
}

#[tokio::test]
async fn test_candidate_source_failure_is_total() {
    let orchestrator = build(
        FakeCandidates::failing("quota exceeded"),
        ScriptedSearch::new(),
        CaptionScraper::new(),
        ScriptedExtractor::new(),
        PipelineConfig::default(),
    );

    let err = orchestrator.aggregate(0.0, 0.0).await.unwrap_err();
    match err {
        OrchestratorError::TotalFailure { message } => assert!(message.contains("quota exceeded")),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_no_candidates_yields_empty_result() {
    let extractor = ScriptedExtractor::new();
    let received = extractor.received();
    let orchestrator = build(
        FakeCandidates::with(vec![]),
        ScriptedSearch::new(),
        CaptionScraper::new(),
        extractor,
        PipelineConfig::default(),
    );

    assert!(orchestrator.aggregate(0.0, 0.0).await.unwrap().is_empty());
    assert!(received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_requests_are_independent() {
    let extractor = ScriptedExtractor::new().reply(
        "MatchaTown",
        vec![TestFixtures::deal_invocation("MatchaTown", &[TestFixtures::deal("BOGO", "Buy one, get one", "BOGO")])],
    );
    let orchestrator = build(
        FakeCandidates::with(TestFixtures::neighbourhood()),
        ScriptedSearch::new(),
        CaptionScraper::new(),
        extractor,
        PipelineConfig::default(),
    );

    let first = orchestrator.aggregate(0.0, 0.0).await.unwrap();
    let second = orchestrator.aggregate(0.0, 0.0).await.unwrap();
    assert_eq!(first, second);
}
