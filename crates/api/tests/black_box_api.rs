use std::path::Path;
use std::sync::Arc;

use partsfront_api::app::{build_app_with, services::AppServices};
use partsfront_integrations::memory::{InMemoryEnquirySink, RecordingIndexer, StaticGeoLookup};
use partsfront_integrations::{EnquirySink, GeoInfo, GeoLookup, IndexingClient};
use reqwest::StatusCode;
use serde_json::json;

const SITE: &str = "https://www.example.com";
const KEY: &str = "test-key";

struct Fakes {
    enquiries: Arc<InMemoryEnquirySink>,
    geo: Arc<StaticGeoLookup>,
    indexer: Arc<RecordingIndexer>,
}

impl Fakes {
    fn new() -> Self {
        Self {
            enquiries: Arc::new(InMemoryEnquirySink::new()),
            geo: Arc::new(StaticGeoLookup::new(GeoInfo::new(
                Some("Kenya".to_string()),
                Some("KE".to_string()),
                "IN",
            ))),
            indexer: Arc::new(RecordingIndexer::new()),
        }
    }
}

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(content_dir: &Path, fakes: &Fakes, indexnow_key: Option<&str>) -> Self {
        let services = AppServices {
            content_dir: content_dir.to_path_buf(),
            site_url: SITE.to_string(),
            indexnow_key: indexnow_key.map(str::to_string),
            enquiries: fakes.enquiries.clone() as Arc<dyn EnquirySink>,
            geo: fakes.geo.clone() as Arc<dyn GeoLookup>,
            indexer: fakes.indexer.clone() as Arc<dyn IndexingClient>,
        };

        // Same router as prod, bound to an ephemeral port.
        let app = build_app_with(services);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();

        Self {
            base_url,
            client,
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json(&self, path: &str) -> (StatusCode, serde_json::Value) {
        let res = self.client.get(self.url(path)).send().await.unwrap();
        let status = res.status();
        (status, res.json().await.unwrap())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn write(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).unwrap();
}

fn content_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "old-tooth.md",
        "---\ntitle: Bucket Tooth\ncategory: Motor Grader\nbrand_grader: CAT\npart_number: ABC 123\n\
         image: /images/bucket-tooth.webp\npriority: 1\n---\nHardened **steel** tooth.\n",
    );
    write(
        dir.path(),
        "seal-kit.md",
        "---\ntitle: Seal Kit\ncategory: Excavator\nbrand: [Komatsu, Hitachi]\npart_number: SK/200\n\
         sizes: 60mm, 80mm\nimage: images/seal-kit.png\npriority: \"2\"\navailability: On Request\n---\n\
         Boom cylinder seals.\n",
    );
    write(
        dir.path(),
        "pin.md",
        "---\ntitle: Pivot Pin\ncategory: Loader\nimage: /images/pin.jpg\n---\nLoader arm pin.\n",
    );
    write(dir.path(), "broken.md", "no frontmatter here\n");
    write(dir.path(), "notes.txt", "ignored\n");
    dir
}

fn titles(body: &serde_json::Value) -> Vec<String> {
    body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn health_is_ok() {
    let dir = content_dir();
    let srv = TestServer::spawn(dir.path(), &Fakes::new(), None).await;

    let res = srv.client.get(srv.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn canonical_product_url_serves_detail() {
    let dir = content_dir();
    let srv = TestServer::spawn(dir.path(), &Fakes::new(), None).await;

    let (status, body) = srv.get_json("/products/grader/abc-123").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slug"], "abc-123");
    assert_eq!(body["legacy_slug"], "old-tooth");
    assert_eq!(body["category"], "grader");
    assert_eq!(body["category_label"], "Motor Grader");
    assert_eq!(body["brands"], json!(["CAT"]));
    assert_eq!(body["url"], "https://www.example.com/products/grader/abc-123");
    assert_eq!(body["image"], "https://www.example.com/images/bucket-tooth.webp");
    assert_eq!(body["image_alt"], "bucket-tooth");
    assert_eq!(body["availability"], "In Stock");
    assert!(body["content_html"].as_str().unwrap().contains("<strong>steel</strong>"));
}

#[tokio::test]
async fn legacy_slug_redirects_permanently_to_canonical() {
    let dir = content_dir();
    let srv = TestServer::spawn(dir.path(), &Fakes::new(), None).await;

    let res = srv.client.get(srv.url("/products/grader/old-tooth")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(res.headers()["location"], "/products/grader/abc-123");
}

#[tokio::test]
async fn wrong_category_segment_redirects() {
    let dir = content_dir();
    let srv = TestServer::spawn(dir.path(), &Fakes::new(), None).await;

    let res = srv.client.get(srv.url("/products/loader/sk-200")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(res.headers()["location"], "/products/excavator/sk-200");
}

#[tokio::test]
async fn product_without_part_number_uses_file_slug() {
    let dir = content_dir();
    let srv = TestServer::spawn(dir.path(), &Fakes::new(), None).await;

    let (status, body) = srv.get_json("/products/loader/pin").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Pivot Pin");
}

#[tokio::test]
async fn unknown_slug_is_not_found() {
    let dir = content_dir();
    let srv = TestServer::spawn(dir.path(), &Fakes::new(), None).await;

    let (status, body) = srv.get_json("/products/loader/no-such-part").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let (status, _) = srv.get_json("/products/grader/broken").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn listing_sorts_by_priority_and_skips_bad_files() {
    let dir = content_dir();
    let srv = TestServer::spawn(dir.path(), &Fakes::new(), None).await;

    let (status, body) = srv.get_json("/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(titles(&body), vec!["Bucket Tooth", "Seal Kit", "Pivot Pin"]);

    let (_, body) = srv.get_json("/products?sort=title").await;
    assert_eq!(titles(&body), vec!["Bucket Tooth", "Pivot Pin", "Seal Kit"]);
}

#[tokio::test]
async fn listing_filters_by_category_search_and_availability() {
    let dir = content_dir();
    let srv = TestServer::spawn(dir.path(), &Fakes::new(), None).await;

    let (_, body) = srv.get_json("/products?category=grader").await;
    assert_eq!(titles(&body), vec!["Bucket Tooth"]);
    assert_eq!(body["category"]["name"], "Grader Spare Parts");

    let (_, body) = srv.get_json("/products?category=Motor%20Grader").await;
    assert_eq!(titles(&body), vec!["Bucket Tooth"]);

    let (_, body) = srv.get_json("/products?q=komatsu%20boom").await;
    assert_eq!(titles(&body), vec!["Seal Kit"]);

    let (_, body) = srv.get_json("/products?q=komatsu%20tooth").await;
    assert_eq!(body["total"], 0);

    let (_, body) = srv.get_json("/products?availability=On%20Request").await;
    assert_eq!(titles(&body), vec!["Seal Kit"]);

    let (_, body) = srv.get_json("/products?availability=all").await;
    assert_eq!(body["total"], 3);
}

#[tokio::test]
async fn missing_content_directory_is_an_empty_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let srv = TestServer::spawn(&dir.path().join("absent"), &Fakes::new(), None).await;

    let (status, body) = srv.get_json("/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn categories_report_counts() {
    let dir = content_dir();
    let srv = TestServer::spawn(dir.path(), &Fakes::new(), None).await;

    let (status, body) = srv.get_json("/categories").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"slug": "loader", "name": "Loader Spare Parts", "path": "/products?category=loader", "count": 1},
            {"slug": "excavator", "name": "Excavator Spare Parts", "path": "/products?category=excavator", "count": 1},
            {"slug": "grader", "name": "Grader Spare Parts", "path": "/products?category=grader", "count": 1},
        ])
    );
}

#[tokio::test]
async fn sitemap_lists_canonical_urls() {
    let dir = content_dir();
    let srv = TestServer::spawn(dir.path(), &Fakes::new(), None).await;

    let res = srv.client.get(srv.url("/sitemap.xml")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers()["content-type"].to_str().unwrap().starts_with("application/xml"));

    let xml = res.text().await.unwrap();
    assert!(xml.contains("<loc>https://www.example.com</loc>"));
    assert!(xml.contains("<loc>https://www.example.com/products?category=excavator</loc>"));
    assert!(xml.contains("<loc>https://www.example.com/products/grader/abc-123</loc>"));
    assert!(xml.contains("<loc>https://www.example.com/products/excavator/sk-200</loc>"));
    assert!(xml.contains("<loc>https://www.example.com/products/loader/pin</loc>"));
    assert!(!xml.contains("old-tooth"));
}

#[tokio::test]
async fn file_names_with_spaces_get_encoded_urls() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "seal kit.md",
        "---\ntitle: Seal Kit\ncategory: Motor Grader\nimage: /images/seal.png\n---\nBody\n",
    );
    write(
        dir.path(),
        "écrou.md",
        "---\ntitle: Ecrou\ncategory: Loader\nimage: /images/ecrou.png\n---\nBody\n",
    );
    let srv = TestServer::spawn(dir.path(), &Fakes::new(), None).await;

    let res = srv.client.get(srv.url("/products/loader/seal%20kit")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(res.headers()["location"], "/products/grader/seal%20kit");

    let (status, body) = srv.get_json("/products/grader/seal%20kit").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["url"], "https://www.example.com/products/grader/seal%20kit");

    let (status, _) = srv.get_json("/products/loader/%C3%A9crou").await;
    assert_eq!(status, StatusCode::OK);

    let xml = srv.client.get(srv.url("/sitemap.xml")).send().await.unwrap().text().await.unwrap();
    assert!(xml.contains("<loc>https://www.example.com/products/grader/seal%20kit</loc>"));
    assert!(xml.contains("<loc>https://www.example.com/products/loader/%C3%A9crou</loc>"));
    assert!(!xml.contains("seal kit"));
}

#[tokio::test]
async fn search_finds_part_number_typed_with_slash() {
    let dir = content_dir();
    let srv = TestServer::spawn(dir.path(), &Fakes::new(), None).await;

    let (_, body) = srv.get_json("/products?q=sk/200").await;
    assert_eq!(titles(&body), vec!["Seal Kit"]);

    let (_, body) = srv.get_json("/products?q=SK%2F200").await;
    assert_eq!(titles(&body), vec!["Seal Kit"]);
}

#[tokio::test]
async fn enquiry_validation_errors_are_per_field() {
    let dir = content_dir();
    let fakes = Fakes::new();
    let srv = TestServer::spawn(dir.path(), &fakes, None).await;

    let res = srv
        .client
        .post(srv.url("/api/enquiry"))
        .json(&json!({"name": "", "contact": "123", "message": "short"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
    assert!(body["fields"]["name"].is_string());
    assert!(body["fields"]["contact"].is_string());
    assert!(body["fields"]["message"].is_string());
    assert!(fakes.enquiries.received().is_empty());
}

#[tokio::test]
async fn valid_enquiry_is_relayed() {
    let dir = content_dir();
    let fakes = Fakes::new();
    let srv = TestServer::spawn(dir.path(), &fakes, None).await;

    let res = srv
        .client
        .post(srv.url("/api/enquiry"))
        .json(&json!({
            "name": " Ravi ",
            "company": "RK Infra",
            "contact-info": "+91 98300 12345",
            "message": "Need two seal kits for PC200",
            "product": "SK/200",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["id"], "local-1");

    let received = fakes.enquiries.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].name, "Ravi");
    assert_eq!(received[0].product.as_deref(), Some("SK/200"));
}

#[tokio::test]
async fn upstream_form_failure_is_bad_gateway() {
    let dir = content_dir();
    let mut fakes = Fakes::new();
    fakes.enquiries = Arc::new(InMemoryEnquirySink::failing(500));
    let srv = TestServer::spawn(dir.path(), &fakes, None).await;

    let res = srv
        .client
        .post(srv.url("/api/enquiry"))
        .json(&json!({"name": "Ravi", "contact": "ravi@example.com", "message": "Please send a quote"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "upstream_error");
}

#[tokio::test]
async fn geo_uses_forwarded_address() {
    let dir = content_dir();
    let fakes = Fakes::new();
    let srv = TestServer::spawn(dir.path(), &fakes, None).await;

    let res = srv
        .client
        .get(srv.url("/api/geo"))
        .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["country_code"], "KE");
    assert_eq!(body["is_international"], true);
    assert_eq!(fakes.geo.seen(), vec!["203.0.113.7".parse::<std::net::IpAddr>().unwrap()]);
}

#[tokio::test]
async fn geo_degrades_to_unknown() {
    let dir = content_dir();
    let mut fakes = Fakes::new();
    fakes.geo = Arc::new(StaticGeoLookup::unavailable());
    let srv = TestServer::spawn(dir.path(), &fakes, None).await;

    // no proxy headers and no socket info: nothing to look up
    let (status, body) = srv.get_json("/api/geo").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"country": null, "country_code": null, "is_international": null}));
    assert!(fakes.geo.seen().is_empty());

    let res = srv
        .client
        .get(srv.url("/api/geo"))
        .header("x-real-ip", "198.51.100.2")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["country_code"].is_null());
    assert_eq!(fakes.geo.seen().len(), 1);
}

#[tokio::test]
async fn indexnow_requires_the_secret() {
    let dir = content_dir();
    let fakes = Fakes::new();
    let srv = TestServer::spawn(dir.path(), &fakes, Some(KEY)).await;

    let res = srv
        .client
        .post(srv.url("/api/indexnow?secret=wrong"))
        .json(&json!({"all": true}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let (status, _) = srv.get_json("/api/indexnow?all=true").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(fakes.indexer.batches().is_empty());
}

#[tokio::test]
async fn indexnow_is_refused_without_a_configured_key() {
    let dir = content_dir();
    let fakes = Fakes::new();
    let srv = TestServer::spawn(dir.path(), &fakes, None).await;

    let (status, body) = srv.get_json("/api/indexnow?secret=&all=true").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
    assert!(fakes.indexer.batches().is_empty());
}

#[tokio::test]
async fn indexnow_all_submits_every_canonical_url() {
    let dir = content_dir();
    let fakes = Fakes::new();
    let srv = TestServer::spawn(dir.path(), &fakes, Some(KEY)).await;

    let res = srv
        .client
        .post(srv.url(&format!("/api/indexnow?secret={KEY}")))
        .json(&json!({"all": true}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["submitted"], 8);
    assert_eq!(body["indexNowStatus"], 202);

    let batches = fakes.indexer.batches();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0][0], SITE);
    assert!(batches[0].contains(&format!("{SITE}/products?category=grader")));
    assert!(batches[0].contains(&format!("{SITE}/products/grader/abc-123")));
}

#[tokio::test]
async fn indexnow_explicit_urls_and_empty_requests() {
    let dir = content_dir();
    let fakes = Fakes::new();
    let srv = TestServer::spawn(dir.path(), &fakes, Some(KEY)).await;
    let endpoint = srv.url(&format!("/api/indexnow?secret={KEY}"));

    let res = srv
        .client
        .post(&endpoint)
        .json(&json!({"urls": [format!("{SITE}/products/loader/pin")]}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    for empty in [json!({}), json!({"urls": []})] {
        let res = srv.client.post(&endpoint).json(&empty).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    let (status, body) = srv.get_json(&format!("/api/indexnow?secret={KEY}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["urls"], json!([SITE]));

    assert_eq!(
        fakes.indexer.batches(),
        vec![vec![format!("{SITE}/products/loader/pin")], vec![SITE.to_string()]]
    );
}
