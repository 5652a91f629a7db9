use chrono::Local;
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct RouteAverage {
    route: String,
    average: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartDataset {
    label: String,
    data: Vec<f64>,
    background_color: String,
    border_width: u32,
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    title: String,
    labels: Vec<String>,
    datasets: Vec<ChartDataset>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("taxi_dashboard_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

fn pickup(days_ago: i64) -> String {
    (Local::now().naive_local() - chrono::Duration::days(days_ago))
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

fn write_dataset(path: &str) {
    let dataset = serde_json::json!({
        "BOOKDATA": [
            { "pickup_date": pickup(1), "pickup_address": "A", "drop_address": "B", "taxi_amout": 100 },
            { "pickup_date": pickup(2), "pickup_address": "A", "drop_address": "B", "taxi_amout": 200 },
            { "pickup_date": pickup(20), "pickup_address": "Airport", "drop_address": "Station", "taxi_amout": 75.5 },
            { "pickup_date": "2024-01-01 08:00:00", "pickup_address": "Old", "drop_address": "Town", "taxi_amout": 50 },
            { "pickup_date": "2024-01-01 19:00:00", "pickup_address": "Old", "drop_address": "Town", "taxi_amout": 150 }
        ]
    });
    std::fs::write(path, serde_json::to_vec_pretty(&dataset).unwrap()).expect("write dataset");
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/health")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    write_dataset(&data_path);
    let child = Command::new(env!("CARGO_BIN_EXE_taxi_dashboard"))
        .env("PORT", port.to_string())
        .env("BOOKINGS_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn get_json<T: serde::de::DeserializeOwned>(client: &Client, url: String) -> T {
    let response = client.get(url).send().await.unwrap();
    assert!(response.status().is_success());
    response.json().await.unwrap()
}

#[tokio::test]
async fn http_weekly_averages_group_recent_routes() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let weekly: Vec<RouteAverage> =
        get_json(&client, format!("{}/api/averages?view=weekly", server.base_url)).await;
    assert_eq!(weekly.len(), 1);
    assert_eq!(weekly[0].route, "A → B");
    assert_eq!(weekly[0].average, "150.00");

    let monthly: Vec<RouteAverage> =
        get_json(&client, format!("{}/api/averages?view=monthly", server.base_url)).await;
    let routes: Vec<&str> = monthly.iter().map(|avg| avg.route.as_str()).collect();
    assert_eq!(routes, vec!["A → B", "Airport → Station"]);
    assert_eq!(monthly[1].average, "75.50");

    let default_view: Vec<RouteAverage> =
        get_json(&client, format!("{}/api/averages", server.base_url)).await;
    assert_eq!(default_view.len(), monthly.len());
}

#[tokio::test]
async fn http_unknown_timeframe_returns_no_routes() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let averages: Vec<RouteAverage> =
        get_json(&client, format!("{}/api/averages?view=yearly", server.base_url)).await;
    assert!(averages.is_empty());
}

#[tokio::test]
async fn http_chart_reports_daily_metric() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let highest: ChartResponse =
        get_json(&client, format!("{}/api/chart?graph_type=highest", server.base_url)).await;
    assert_eq!(highest.title, "Highest Taxi Price Per Day");
    assert_eq!(highest.labels[0], "2024-01-01");
    assert_eq!(highest.labels.len(), 4);
    let dataset = &highest.datasets[0];
    assert_eq!(dataset.label, "Highest Taxi Price");
    assert_eq!(dataset.data[0], 150.0);
    assert_eq!(dataset.background_color, "rgba(255, 99, 132, 0.6)");
    assert_eq!(dataset.border_width, 1);

    let rides: ChartResponse =
        get_json(&client, format!("{}/api/chart?graph_type=bogus", server.base_url)).await;
    assert_eq!(rides.datasets[0].label, "Number of Rides");
    assert_eq!(rides.datasets[0].data[0], 2.0);
    assert_eq!(rides.datasets[0].data.len(), rides.labels.len());
}

#[tokio::test]
async fn http_index_serves_dashboard() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client.get(format!("{}/", server.base_url)).send().await.unwrap();
    assert!(response.status().is_success());
    let body = response.text().await.unwrap();
    assert!(body.contains("Taxi Ride Dashboard"));
    assert!(body.contains("Select Timeframe:"));
}

#[tokio::test]
async fn http_malformed_query_is_bad_request() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/averages?view=weekly&view=monthly", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body = response.text().await.unwrap();
    assert!(!body.trim().is_empty());
}
