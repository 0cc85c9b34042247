use std::cell::RefCell;
use std::rc::Rc;

use rstest::rstest;
use rum::test::{with_captured_beacons, TestPage, TestTransport};
use rum::types::protocol::{
    EventTiming, LargestContentfulPaint, LayoutShift, NavigationTiming, PaintTiming,
};
use rum::types::{EntryType, MetricSnapshot, PerformanceEntry, ReadyState};
use rum::{Agent, AgentOptions, Beacon, FlushState, Transport};

const PAGE: &str = "https://shop.example.com/products/42?ref=home";

fn fcp(start_time: f64) -> PerformanceEntry {
    PaintTiming {
        name: "first-contentful-paint".into(),
        start_time,
    }
    .into()
}

fn lcp(start_time: f64) -> PerformanceEntry {
    LargestContentfulPaint { start_time }.into()
}

fn shift(value: f64, had_recent_input: bool) -> PerformanceEntry {
    LayoutShift {
        value,
        had_recent_input,
    }
    .into()
}

fn first_input(start_time: f64, processing_start: f64) -> PerformanceEntry {
    EventTiming {
        name: "pointerdown".into(),
        start_time,
        processing_start,
    }
    .into()
}

fn navigation(dcl: f64, load: f64) -> PerformanceEntry {
    NavigationTiming {
        dom_content_loaded_event_start: dcl,
        load_event_start: load,
    }
    .into()
}

fn single_snapshot(beacons: Vec<Beacon>) -> MetricSnapshot {
    assert_eq!(beacons.len(), 1, "expected exactly one beacon");
    beacons[0].to_snapshot().unwrap()
}

#[test]
fn test_default_payload() {
    let page = TestPage::new(PAGE);
    let beacons = with_captured_beacons(&page, AgentOptions::default(), |page, _agent| {
        page.hide();
    });
    assert_eq!(beacons.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(beacons[0].body()).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "url": PAGE,
            "dcl": 0.0,
            "load": 0.0,
            "fcp": 0.0,
            "lcp": 0.0,
            "cls": 0.0,
            "fid": 0.0,
        })
    );
    assert_eq!(beacons[0].target(), "https://shop.example.com/api/perf");
    assert_eq!(beacons[0].content_type(), "text/plain;charset=UTF-8");
}

#[test]
fn test_full_page_view() {
    let page = TestPage::new(PAGE);
    let beacons = with_captured_beacons(&page, AgentOptions::default(), |page, agent| {
        page.add_entries(vec![fcp(310.0), lcp(450.0)]);
        page.add_entries(vec![navigation(640.0, 1020.5)]);
        page.finish_loading();
        assert!(agent.is_ready());
        assert_eq!(agent.snapshot().dcl, 0.0);
        page.run_until_idle();

        page.add_entries(vec![lcp(1210.0), shift(0.02, false)]);
        page.add_entries(vec![first_input(2400.0, 2416.0)]);
        page.add_entries(vec![shift(0.4, true), shift(0.01, false)]);
        page.hide();
    });

    let snapshot = single_snapshot(beacons);
    assert_eq!(snapshot.url, PAGE);
    assert_eq!(snapshot.dcl, 640.0);
    assert_eq!(snapshot.load, 1020.5);
    assert_eq!(snapshot.fcp, 310.0);
    assert_eq!(snapshot.lcp, 1210.0);
    assert!((snapshot.cls - 0.03).abs() < 1e-12);
    assert_eq!(snapshot.fid, 16.0);
}

#[rstest]
#[case(&[300.0, 900.0, 600.0])]
#[case(&[900.0, 600.0, 300.0])]
#[case(&[300.0, 600.0, 900.0])]
fn test_lcp_is_max_regardless_of_order(#[case] order: &[f64]) {
    let page = TestPage::new(PAGE);
    let beacons = with_captured_beacons(&page, AgentOptions::default(), |page, _agent| {
        for &time in order {
            page.add_entries(vec![lcp(time)]);
        }
        page.hide();
    });
    assert_eq!(single_snapshot(beacons).lcp, 900.0);
}

#[test]
fn test_mixed_cls() {
    let page = TestPage::new(PAGE);
    let beacons = with_captured_beacons(&page, AgentOptions::default(), |page, _agent| {
        page.add_entries(vec![
            shift(0.1, false),
            shift(0.3, true),
            shift(0.05, false),
        ]);
        page.hide();
    });
    assert!((single_snapshot(beacons).cls - 0.15).abs() < 1e-12);
}

#[test]
fn test_huge_layout_shifts_keep_a_numeric_payload() {
    let page = TestPage::new(PAGE);
    let beacons = with_captured_beacons(&page, AgentOptions::default(), |page, _agent| {
        page.add_entries(vec![shift(f64::MAX, false)]);
        page.add_entries(vec![shift(f64::MAX, false)]);
        page.hide();
    });
    assert!(!beacons[0].body_str().unwrap().contains("null"));
    assert!(single_snapshot(beacons).cls.is_finite());
}

#[test]
fn test_negative_input_delay_is_reported() {
    let page = TestPage::new(PAGE);
    let beacons = with_captured_beacons(&page, AgentOptions::default(), |page, _agent| {
        page.add_entries(vec![first_input(100.0, 99.5)]);
        page.hide();
    });
    assert_eq!(single_snapshot(beacons).fid, -0.5);
}

#[test]
fn test_repeated_fcp_is_last_write() {
    let page = TestPage::new(PAGE);
    let beacons = with_captured_beacons(&page, AgentOptions::default(), |page, _agent| {
        page.add_entries(vec![fcp(120.0)]);
        page.add_entries(vec![fcp(95.0)]);
        page.hide();
    });
    assert_eq!(single_snapshot(beacons).fcp, 95.0);
}

#[test]
fn test_flush_fires_once_on_first_hidden() {
    let page = TestPage::new(PAGE);
    let beacons = with_captured_beacons(&page, AgentOptions::default(), |page, agent| {
        page.show();
        page.add_entries(vec![lcp(500.0)]);
        page.show();
        assert_eq!(agent.flush_state(), FlushState::Armed);

        page.hide();
        assert_eq!(agent.flush_state(), FlushState::Fired);

        page.add_entries(vec![lcp(2000.0), shift(0.5, false)]);
        page.show();
        page.hide();
        page.hide();
        assert_eq!(agent.snapshot().lcp, 2000.0);
    });

    let snapshot = single_snapshot(beacons);
    assert_eq!(snapshot.lcp, 500.0);
    assert_eq!(snapshot.cls, 0.0);
}

#[test]
fn test_readiness_deferral_on_complete_document() {
    let page = TestPage::loaded(PAGE);
    page.add_entries(vec![navigation(400.0, 800.0)]);
    let transport = TestTransport::new();
    let agent = Agent::start(
        page.clone(),
        AgentOptions::new().with_transport(transport.clone()),
    );

    assert!(agent.is_ready());
    assert_eq!(agent.snapshot().dcl, 0.0);
    assert_eq!(agent.snapshot().load, 0.0);

    page.run_next_turn();
    assert_eq!(agent.snapshot().dcl, 400.0);
    assert_eq!(agent.snapshot().load, 800.0);
}

#[test]
fn test_navigation_waits_for_complete() {
    let page = TestPage::new(PAGE);
    let agent = Agent::start(page.clone(), AgentOptions::default());
    page.add_entries(vec![navigation(350.0, 910.0)]);

    page.set_ready_state(ReadyState::Interactive);
    page.run_until_idle();
    assert!(!agent.is_ready());
    assert_eq!(agent.snapshot().dcl, 0.0);

    page.set_ready_state(ReadyState::Complete);
    page.set_ready_state(ReadyState::Complete);
    assert_eq!(agent.snapshot().dcl, 0.0);
    assert_eq!(page.run_until_idle(), 1);

    let snapshot = agent.snapshot();
    assert_eq!((snapshot.dcl, snapshot.load), (350.0, 910.0));
}

#[test]
fn test_buffered_records_are_replayed() {
    let page = TestPage::new(PAGE);
    page.add_entries(vec![fcp(210.0), lcp(640.0), shift(0.07, false)]);

    let beacons = with_captured_beacons(&page, AgentOptions::default(), |page, agent| {
        assert_eq!(agent.snapshot().fcp, 0.0);
        page.run_until_idle();
        assert_eq!(agent.snapshot().fcp, 210.0);
        page.hide();
    });

    let snapshot = single_snapshot(beacons);
    assert_eq!(snapshot.fcp, 210.0);
    assert_eq!(snapshot.lcp, 640.0);
    assert_eq!(snapshot.cls, 0.07);
}

#[test]
fn test_unsupported_channels_stay_at_default() {
    let page = TestPage::new(PAGE);
    page.mark_unsupported(EntryType::LayoutShift);
    page.mark_unsupported(EntryType::FirstInput);

    let beacons = with_captured_beacons(&page, AgentOptions::default(), |page, agent| {
        assert_eq!(
            agent.unsupported(),
            &[EntryType::LayoutShift, EntryType::FirstInput]
        );
        assert_eq!(page.observer_count(EntryType::Paint), 1);
        assert_eq!(page.observer_count(EntryType::LayoutShift), 0);

        page.add_entries(vec![fcp(100.0), shift(0.3, false), first_input(10.0, 30.0)]);
        page.hide();
    });

    let snapshot = single_snapshot(beacons);
    assert_eq!(snapshot.fcp, 100.0);
    assert_eq!(snapshot.cls, 0.0);
    assert_eq!(snapshot.fid, 0.0);
}

#[test]
fn test_bad_batch_does_not_disable_channel() {
    let page = TestPage::new(PAGE);
    let beacons = with_captured_beacons(&page, AgentOptions::default(), |page, _agent| {
        page.deliver_raw(EntryType::LayoutShift, vec![shift(0.2, false), shift(f64::NAN, false)]);
        page.deliver_raw(EntryType::LargestContentfulPaint, vec![fcp(5000.0)]);
        page.add_entries(vec![shift(0.2, false), lcp(700.0)]);
        page.hide();
    });

    let snapshot = single_snapshot(beacons);
    assert_eq!(snapshot.cls, 0.2);
    assert_eq!(snapshot.lcp, 700.0);
}

#[test]
fn test_url_and_endpoint_overrides() {
    let page = TestPage::new(PAGE);
    let options = AgentOptions::new()
        .with_url("https://shop.example.com/products/{id}")
        .with_endpoint("https://rum.example.net/v1/vitals");
    let beacons = with_captured_beacons(&page, options, |page, _agent| page.hide());

    assert_eq!(beacons[0].target(), "https://rum.example.net/v1/vitals");
    assert_eq!(
        single_snapshot(beacons).url,
        "https://shop.example.com/products/{id}"
    );
}

#[test]
fn test_closure_transport_factory() {
    struct Recorder(Rc<RefCell<Vec<String>>>);

    impl Transport for Recorder {
        fn send_beacon(&self, beacon: Beacon) {
            self.0
                .borrow_mut()
                .push(beacon.body_str().unwrap().to_owned());
        }
    }

    let sent = Rc::new(RefCell::new(Vec::new()));
    let sink = sent.clone();
    let options = AgentOptions::new().with_transport(move |options: &AgentOptions| {
        assert_eq!(options.endpoint, "/api/perf");
        Rc::new(Recorder(sink.clone())) as Rc<dyn Transport>
    });

    let page = TestPage::new(PAGE);
    let _agent = Agent::start(page.clone(), options);
    page.add_entries(vec![first_input(100.0, 104.5)]);
    page.hide();

    let sent = sent.borrow();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains(r#""fid":4.5"#));
}

#[test]
fn test_no_transport_still_collects() {
    let page = TestPage::new(PAGE);
    let agent = Agent::start(page.clone(), AgentOptions::default());
    page.add_entries(vec![lcp(320.0)]);
    page.hide();
    assert_eq!(agent.flush_state(), FlushState::Fired);
    assert_eq!(agent.snapshot().lcp, 320.0);
}
