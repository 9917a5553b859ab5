use pdf_harvester_core::{
    derive_document_name, CandidateUrl, FailureReason, FetchResult, ReportBuilder, RunOutcome,
};
use pretty_assertions::assert_eq;
use url::Url;

fn candidate(url: &str) -> CandidateUrl {
    CandidateUrl::new(Url::parse(url).unwrap())
}

#[test]
fn builder_accumulates_results_and_counts() {
    let saved = derive_document_name("https://e.com/a.pdf").unwrap();
    let present = derive_document_name("https://e.com/b.pdf").unwrap();

    let mut builder = ReportBuilder::new("site");
    builder
        .set_candidates(3)
        .push(FetchResult::Saved {
            name: saved,
            bytes: 10,
        })
        .push(FetchResult::AlreadyPresent { name: present })
        .push(FetchResult::failed(
            &candidate("https://e.com/c.pdf"),
            FailureReason::Timeout,
        ));
    let report = builder.finish();

    assert_eq!(report.site(), "site");
    assert_eq!(report.outcome(), RunOutcome::Completed);
    assert_eq!(report.candidates(), 3);
    assert_eq!(report.saved(), 1);
    assert_eq!(report.already_present(), 1);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.bytes_saved(), 10);
    assert!(report.has_failures());
    assert!(!report.cancelled());
}

#[test]
fn listing_failure_has_single_failed_entry_and_no_candidates() {
    let report = ReportBuilder::new("teck").listing_failed(
        "https://www.teck.com/listing",
        FailureReason::ListingFetch("http status 503".into()),
    );
    assert_eq!(report.outcome(), RunOutcome::ListingFailed);
    assert_eq!(report.candidates(), 0);
    assert_eq!(report.failed(), 1);
    assert_eq!(
        report.results()[0].to_string(),
        "failed https://www.teck.com/listing: listing page unavailable: http status 503"
    );
}

#[test]
fn no_candidates_is_an_empty_successful_report() {
    let report = ReportBuilder::new("anto").no_candidates();
    assert_eq!(report.outcome(), RunOutcome::NoCandidatesFound);
    assert!(report.results().is_empty());
    assert!(!report.has_failures());
    assert_eq!(
        report.to_string(),
        "anto: 0 candidates, 0 saved, 0 already present, 0 failed (no candidates found)"
    );
}

#[test]
fn failure_reasons_render_stable_messages() {
    assert_eq!(FailureReason::UnrecognizedName.to_string(), "unrecognized name pattern");
    assert_eq!(FailureReason::Timeout.to_string(), "timeout");
    assert_eq!(FailureReason::HttpStatus(404).to_string(), "http status 404");
    assert_eq!(FailureReason::Cancelled.to_string(), "cancelled");
}

#[test]
fn report_serializes_tagged_results() {
    let mut builder = ReportBuilder::new("s");
    builder.set_candidates(1).push(FetchResult::failed(
        &candidate("https://e.com/x"),
        FailureReason::UnrecognizedName,
    ));
    let json = serde_json::to_value(builder.finish()).unwrap();
    assert_eq!(json["results"][0]["status"], "failed");
    assert_eq!(json["results"][0]["reason"]["kind"], "unrecognized_name");
    assert_eq!(json["outcome"], "completed");
}
