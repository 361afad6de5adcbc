use org_stats::api::Error;
use org_stats::Scope;
use org_stats_app::{render, scan_organization, Args};
use secrecy::SecretString;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ORG: &str = "folio-org";

fn args(server: &MockServer, scope: Scope) -> Args {
    Args {
        username: "alice".to_string(),
        secret: SecretString::new("s3cr3t".to_string()),
        org: ORG.to_string(),
        scope,
        api_url: server.uri(),
        user_agent: "github org stats aggregator".to_string(),
        retry_delay_secs: 0,
        max_attempts: 10,
        max_jitter_secs: 0,
        json: false,
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn happy_path() {
    let server = MockServer::start().await;
    mock_repos(&server, &[("okapi", false), ("vault", true), ("stripes", false)]).await;
    mock_stats(
        &server,
        "okapi",
        json!([
            contribution_body("bob", 1, &[(4, 0)]),
            contribution_body("alice", 5, &[(10, 2), (0, 1)])
        ]),
    )
    .await;
    // GitHub answers `202 Accepted` until the stats are computed.
    Mock::given(method("GET"))
        .and(path(stats_path("stripes")))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({})))
        .up_to_n_times(3)
        .expect(3)
        .mount(&server)
        .await;
    mock_stats(
        &server,
        "stripes",
        json!([
            contribution_body("alice", 3, &[(1, 0)]),
            contribution_body("carol", 2, &[])
        ]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path(stats_path("vault")))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let report = scan_organization(&args(&server, Scope::Public)).await;

    assert!(report.is_complete());
    assert_eq!((report.listed, report.merged), (2, 2));
    let expected = "\
============================================================
UserLogin: Commit[Count] Addition[Count] Deletion[Count]
============================================================
alice: c[8] a[11] d[3]
bob: c[1] a[4] d[0]
carol: c[2] a[0] d[0]
============================================================
";
    assert_eq!(render(&report, false).unwrap(), expected);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn reports_merged_totals_after_transport_failure() {
    let server = MockServer::start().await;
    let repos = ["r1", "r2", "r3", "r4", "r5"];
    mock_repos(&server, &repos.map(|repo| (repo, false))).await;
    mock_stats(&server, "r1", json!([contribution_body("alice", 1, &[(1, 1)])])).await;
    mock_stats(&server, "r2", json!([contribution_body("alice", 2, &[(2, 0)])])).await;
    Mock::given(method("GET"))
        .and(path(stats_path("r3")))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Bad credentials" })))
        .mount(&server)
        .await;
    for repo in ["r4", "r5"] {
        Mock::given(method("GET"))
            .and(path(stats_path(repo)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;
    }

    let report = scan_organization(&args(&server, Scope::All)).await;

    assert!(matches!(report.abort, Some(Error::Transport(_))));
    assert_eq!(report.merged, 2);
    assert!(render(&report, false).unwrap().contains("alice: c[3] a[3] d[1]"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn malformed_stats_skip_only_their_repository() {
    let server = MockServer::start().await;
    mock_repos(&server, &[("broken", false), ("fine", false)]).await;
    mock_stats(&server, "broken", json!([{ "author": { "login": "mallory" }, "weeks": [] }])).await;
    mock_stats(&server, "fine", json!([contribution_body("dave", 7, &[(3, 2)])])).await;

    let report = scan_organization(&args(&server, Scope::Public)).await;

    assert!(report.is_complete());
    assert_eq!(report.skipped, vec!["broken".to_string()]);
    assert!(report.aggregate.get("mallory").is_none());
    let rendered: Value = serde_json::from_str(&render(&report, true).unwrap()).unwrap();
    assert_eq!(
        rendered,
        json!([{ "login": "dave", "commits": 7, "additions": 3, "deletions": 2 }])
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn user_is_not_an_organization() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orgs/folio-org/repos"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
        .mount(&server)
        .await;

    let report = scan_organization(&args(&server, Scope::Public)).await;

    assert!(matches!(report.abort, Some(Error::NotAnOrganization(_))));
    assert!(report.aggregate.is_empty());
    assert_eq!(render(&report, false).unwrap().lines().count(), 4);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn reports_empty_table_when_client_setup_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;
    let mut bad_agent = args(&server, Scope::Public);
    bad_agent.user_agent = "bad\nagent".to_string();

    let report = scan_organization(&bad_agent).await;

    assert!(report.abort.as_ref().map_or(false, Error::is_transport));
    assert!(report.aggregate.is_empty());
    assert_eq!(render(&report, false).unwrap().lines().count(), 4);
}

async fn mock_repos(server: &MockServer, repos: &[(&str, bool)]) {
    let body: Vec<Value> = repos
        .iter()
        .map(|(name, private)| json!({ "name": name, "private": private, "fork": false }))
        .collect();
    Mock::given(method("GET"))
        .and(path(format!("/orgs/{}/repos", ORG)))
        .and(query_param("per_page", "200"))
        .and(header("Accept", "application/vnd.github.v3+json"))
        .and(header("Authorization", "Basic YWxpY2U6czNjcjN0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Value::Array(body)))
        .expect(1)
        .mount(server)
        .await;
}

async fn mock_stats(server: &MockServer, repo: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(stats_path(repo)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn stats_path(repo: &str) -> String {
    format!("/repos/{}/{}/stats/contributors", ORG, repo)
}

fn contribution_body(login: &str, total: u64, weeks: &[(u64, u64)]) -> Value {
    let weeks: Vec<Value> = weeks
        .iter()
        .enumerate()
        .map(|(week, (a, d))| json!({ "w": 1_600_000_000 + week * 604_800, "a": a, "d": d, "c": 1 }))
        .collect();
    json!({ "author": { "login": login }, "total": total, "weeks": weeks })
}
