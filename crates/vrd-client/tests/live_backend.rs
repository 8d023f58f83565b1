//! Smoke tests against a running backend.
//!
//! Run with `VERDICT_API__BASE_URL=http://localhost:8000 cargo test -p vrd-client -- --ignored`.

use std::io::Write;

use vrd_client::ApiClient;
use vrd_config::VerdictConfig;
use vrd_core::enums::Strategy;

fn client() -> ApiClient {
    let config = VerdictConfig::load().expect("config should load");
    ApiClient::new(&config.api).expect("client should build")
}

#[tokio::test]
#[ignore] // requires a running backend
async fn live_list_endpoints() {
    let client = client();
    let suites = client.list_suites().await.expect("suites");
    let runs = client.list_runs().await.expect("runs");
    let docs = client.list_documents().await.expect("documents");
    let sessions = client.list_sessions().await.expect("sessions");
    println!(
        "suites={} runs={} documents={} sessions={}",
        suites.len(),
        runs.len(),
        docs.len(),
        sessions.len()
    );
}

#[tokio::test]
#[ignore] // requires a running backend
async fn live_predict_and_validate() {
    let client = client();
    let prediction = client
        .predict("Wie lange ist die Probezeit?", &Strategy::RuleBased)
        .await
        .expect("prediction");
    let validation = client
        .validate("Wie lange ist die Probezeit?", "Ein Monat", &prediction.answer)
        .await
        .expect("validation");
    println!("answer={} passed={}", prediction.answer, validation.passed);
}

#[tokio::test]
#[ignore] // requires a running backend
async fn live_suite_lifecycle() {
    let client = client();
    let suite = client
        .create_suite("verdict smoke test", "created by live_suite_lifecycle")
        .await
        .expect("create suite");
    let case = client
        .create_case(&suite.id, "1 + 1?", "2")
        .await
        .expect("create case");
    client
        .update_case(&case.id, "1 + 1 = ?", "2")
        .await
        .expect("update case");
    client.delete_case(&case.id).await.expect("delete case");
    client.delete_suite(&suite.id).await.expect("delete suite");
}

#[tokio::test]
#[ignore] // requires a running backend
async fn live_upload_document() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "Die Probezeit beträgt einen Monat.").expect("write");
    let doc = client()
        .upload_document(file.path())
        .await
        .expect("upload");
    println!("uploaded {} ({} bytes, {})", doc.name, doc.size, doc.status);
}
