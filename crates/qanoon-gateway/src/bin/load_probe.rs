//! Load probe: concurrent askers hitting POST /api/legal-qa on a running gateway.
//! Run with gateway up: cargo run --bin load_probe
//! Target override: QANOON_PROBE_URL=http://host:port

use reqwest::Client;
use serde_json::json;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
const CONCURRENT_ASKERS: usize = 8;
const REQUESTS_PER_ASKER: usize = 5;

// (question, topic, language). The last entry is deliberately invalid to exercise 400s.
const QUESTIONS: &[(&str, &str, &str)] = &[
    ("Mera landlord bina notice ke ghar khali karwa sakta hai?", "tenant-disputes", "roman-urdu"),
    ("What is the minimum wage in Punjab?", "salary-issues", "english"),
    ("ایف آئی آر کیسے درج کروائی جاتی ہے؟", "fir-process", "urdu"),
    ("Can a bank take my house if I miss loan payments?", "loans", "english"),
    ("Beti ka wirasat mein kitna hissa hota hai?", "inheritance", "roman-urdu"),
    ("How do I get my security deposit back?", "tenant-disputes", "english"),
    ("?", "not-a-topic", "english"),
];

#[derive(Default)]
struct Tally {
    ok: AtomicU32,
    client_err: AtomicU32,
    server_err: AtomicU32,
    unreachable: AtomicU32,
}

#[tokio::main]
async fn main() {
    let base_url = std::env::var("QANOON_PROBE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    println!(
        "[LOAD PROBE] {} askers × {} requests = {} total",
        CONCURRENT_ASKERS,
        REQUESTS_PER_ASKER,
        CONCURRENT_ASKERS * REQUESTS_PER_ASKER
    );
    println!("[LOAD PROBE] Target: {} (ensure gateway is running)", base_url);

    let tally = Arc::new(Tally::default());
    let latencies: Arc<RwLock<Vec<u64>>> = Arc::new(RwLock::new(Vec::new()));
    let client = Client::new();
    let endpoint = format!("{}/api/legal-qa", base_url.trim_end_matches('/'));

    let mut handles = Vec::new();
    for asker in 0..CONCURRENT_ASKERS {
        let client = client.clone();
        let tally = Arc::clone(&tally);
        let latencies = Arc::clone(&latencies);
        let endpoint = endpoint.clone();

        handles.push(tokio::spawn(async move {
            for r in 0..REQUESTS_PER_ASKER {
                let (question, topic, language) = QUESTIONS[(asker + r) % QUESTIONS.len()];
                let body = json!({ "question": question, "topic": topic, "language": language });

                let start = Instant::now();
                let res = client.post(&endpoint).json(&body).send().await;
                let elapsed_ms = start.elapsed().as_millis() as u64;

                match res {
                    Ok(resp) if resp.status().is_success() => {
                        tally.ok.fetch_add(1, Ordering::Relaxed);
                        latencies.write().await.push(elapsed_ms);
                    }
                    Ok(resp) if resp.status().is_client_error() => {
                        tally.client_err.fetch_add(1, Ordering::Relaxed);
                    }
                    Ok(_) => {
                        tally.server_err.fetch_add(1, Ordering::Relaxed);
                    }
                    Err(_) => {
                        tally.unreachable.fetch_add(1, Ordering::Relaxed);
                    }
                }
            }
        }));
    }

    for h in handles {
        let _ = h.await;
    }

    let ok = tally.ok.load(Ordering::Relaxed);
    let client_err = tally.client_err.load(Ordering::Relaxed);
    let server_err = tally.server_err.load(Ordering::Relaxed);
    let unreachable = tally.unreachable.load(Ordering::Relaxed);
    let total = ok + client_err + server_err + unreachable;
    let answered_rate = if total > 0 { (ok as f64 / total as f64) * 100.0 } else { 0.0 };

    let mut sorted = latencies.read().await.clone();
    sorted.sort_unstable();
    let avg_ms = if sorted.is_empty() {
        0.0
    } else {
        sorted.iter().sum::<u64>() as f64 / sorted.len() as f64
    };
    let p95_ms = sorted
        .get((sorted.len() * 95 / 100).min(sorted.len().saturating_sub(1)))
        .copied()
        .unwrap_or(0);

    println!(
        "[LOAD PROBE] Answered: {:.1}% | Avg latency: {:.0}ms | p95: {}ms",
        answered_rate, avg_ms, p95_ms
    );
    println!(
        "[LOAD PROBE] Total: {} | 200: {} | 4xx: {} | 5xx: {} | unreachable: {}",
        total, ok, client_err, server_err, unreachable
    );
    if server_err > 0 {
        println!("[LOAD PROBE] 5xx replies usually mean no provider key is set or both providers failed; check gateway logs.");
    }
}
