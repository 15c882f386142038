//! Integration tests for the crawler
//!
//! These tests use wiremock to serve listing pages and run the full cycle:
//! HTTP fetching, row extraction, pagination, and SQLite persistence.

use flat_crawler::config::parse_config;
use flat_crawler::crawler::{crawl, Crawler, HttpFetcher};
use flat_crawler::job::{AgentIdentity, City, Job, Language, ListingType, RecencyWindow};
use flat_crawler::storage::{FixedClock, SqliteStorage};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const START_PATH: &str = "/ru/real-estate/flats/Riga/today/sell/";

fn sell_job(agent: AgentIdentity) -> Job {
    Job::new(
        agent,
        ListingType::Sell,
        Language::Ru,
        City::Riga,
        RecencyWindow::Today,
    )
}

fn listing_row(id: &str, text: &str, location: &str, price: &str) -> String {
    format!(
        r#"<tr id="{id}">
            <td><input type="checkbox"></td>
            <td><a href="/msg/ru/real-estate/flats/riga/{id}.html"><img src="x.jpg"></a></td>
            <td><a href="/msg/ru/real-estate/flats/riga/{id}.html">{text}</a></td>
            <td>{location}</td>
            <td>2</td>
            <td>54</td>
            <td>3/5</td>
            <td>Stalina</td>
            <td>1,574 €</td>
            <td>{price}</td>
        </tr>"#
    )
}

fn results_page(rows: &[String], pager: &[&str]) -> String {
    let anchors: String = pager
        .iter()
        .map(|href| format!(r#"<a name="nav_id" rel="next" href="{}">&gt;</a>"#, href))
        .collect();
    format!(
        r#"<html><head><title>Flats</title></head><body>
        <table>
            <tr id="head_line"><td>Header</td></tr>
            {}
        </table>
        <div class="td2">{}</div>
        </body></html>"#,
        rows.concat(),
        anchors
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_with_pagination() {
    let server = MockServer::start().await;

    let first = results_page(
        &[
            listing_row("tr_101", "Nice flat\n", "<b>Centre</b><br/>Main St", "85 000  €"),
            listing_row("tr_bnr_5", "Sponsored", "Centre", "1 €"),
        ],
        &["page2.html", START_PATH],
    );
    let second = results_page(
        &[listing_row("tr_102", "Quiet flat", "Teika", "€1 250")],
        &[START_PATH, "page2.html", "page3.html"],
    );

    mount_page(&server, START_PATH, first).await;
    mount_page(&server, &format!("{}page2.html", START_PATH), second).await;
    Mock::given(method("GET"))
        .and(path(format!("{}page3.html", START_PATH)))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&AgentIdentity::Firefox, Duration::from_secs(5)).unwrap();
    let report = Crawler::new(sell_job(AgentIdentity::Firefox), fetcher)
        .with_base_url(server.uri())
        .run()
        .await
        .unwrap();

    assert_eq!(report.stats.pages_fetched, 2);
    assert_eq!(report.stats.pages_failed, 1);
    assert_eq!(report.stats.adverts_skipped, 1);
    assert_eq!(report.visited, 3);

    let records = report.records.all();
    assert_eq!(records.len(), 2);

    assert_eq!(records[0].id_external, 101);
    assert_eq!(records[0].text, "Nice flat");
    assert_eq!(records[0].district, "Centre");
    assert_eq!(records[0].street, "Main St");
    assert_eq!(records[0].price, 85000);
    assert_eq!(records[0].listing_type, "sell");
    assert_eq!(
        records[0].url,
        format!("{}/msg/ru/real-estate/flats/riga/tr_101.html", server.uri())
    );

    assert_eq!(records[1].id_external, 102);
    assert_eq!(records[1].district, "Teika");
    assert_eq!(records[1].street, "");
    assert_eq!(records[1].price, 1250);

    let dir = tempfile::tempdir().unwrap();
    let mut storage = SqliteStorage::open(&dir.path().join("flats.db")).unwrap();
    let clock = FixedClock("2024-05-01 12:00:00".to_string());

    assert_eq!(report.records.persist(&mut storage, &clock).unwrap(), 2);
    assert_eq!(storage.count_flats().unwrap(), 2);
    assert_eq!(storage.price_of(101).unwrap(), Some(85000));

    // Persisting the same run again changes nothing
    assert_eq!(report.records.persist(&mut storage, &clock).unwrap(), 0);
    assert_eq!(storage.count_flats().unwrap(), 2);
}

#[tokio::test]
async fn test_crawl_sends_configured_user_agent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/lv/real-estate/flats/Jurmala/all/hand_over/"))
        .and(header("user-agent", "FlatCrawler/0.1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(results_page(
            &[listing_row("tr_9", "Seaside", "Majori", "600 €")],
            &[],
        )))
        .expect(1)
        .mount(&server)
        .await;

    let config = parse_config(&format!(
        r#"
[job]
user-agent = "FlatCrawler/0.1"
listing-type = "rent"
language = "lv"
city = "Jurmala"
window = "all"

[crawler]
base-url = "{}"
request-timeout-secs = 5

[output]
database-path = "./unused.db"
"#,
        server.uri()
    ))
    .unwrap();

    let report = crawl(&config).await.unwrap();

    assert_eq!(report.records.len(), 1);
    let listing = &report.records.all()[0];
    assert_eq!(listing.listing_type, "rent");
    assert_eq!(listing.city, "Jurmala");
    assert_eq!(listing.price, 600);
}

#[tokio::test]
async fn test_unreachable_start_page_is_not_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(START_PATH))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&AgentIdentity::Chrome, Duration::from_secs(5)).unwrap();
    let report = Crawler::new(sell_job(AgentIdentity::Chrome), fetcher)
        .with_base_url(server.uri())
        .run()
        .await
        .unwrap();

    assert!(report.records.is_empty());
    assert_eq!(report.stats.pages_failed, 1);

    let dir = tempfile::tempdir().unwrap();
    let mut storage = SqliteStorage::open(&dir.path().join("flats.db")).unwrap();
    let clock = FixedClock("2024-05-01 12:00:00".to_string());
    assert_eq!(report.records.persist(&mut storage, &clock).unwrap(), 0);
    assert_eq!(storage.count_flats().unwrap(), 0);
}
