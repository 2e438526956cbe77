//! Benchmark for SetRequest building and encoding.
//!
//! Builds synthetic interface and NTP batches, or a batch read from a
//! SetInput JSON file given as the first argument.

use std::fs;
use std::time::Instant;

use gnmi_set::ntp::{self, NtpServer, NtpSpec};
use gnmi_set::{
    build_set_request, decode_set_request, encode_set_request, ClientConfig, SetInput,
    SetRequest, TargetContext,
};

/// Number of synthetic batches to build.
const BATCHES: usize = 1_000;

/// Interfaces touched by each synthetic batch.
const INTERFACES_PER_BATCH: usize = 32;

const DECODE_ITERS: u32 = 10;

// =============================================================================
// SYNTHETIC BATCHES
// =============================================================================

fn interface_batch(config: &ClientConfig, batch: usize) -> SetInput {
    let mut input = config.set_input();
    for i in 0..INTERFACES_PER_BATCH {
        let name = format!("ethernet-{}/{}", batch % 8 + 1, i + 1);
        let base = format!("/interface[name={name}]");
        input = input
            .update_inline(
                &format!("{base}/description"),
                "string",
                &format!("uplink {batch}.{i}"),
            )
            .update_inline(&format!("{base}/mtu"), "uint", "9232")
            .replace_value(format!("{base}/admin-state"), "enable");
        if i % 4 == 0 {
            input = input.delete(format!("{base}/subinterface[index=0]"));
        }
    }
    input
}

fn ntp_spec(batch: usize) -> NtpSpec {
    let mut spec = NtpSpec::new("mgmt").admin_state("enable");
    for i in 0..4 {
        let mut server = NtpServer::new(format!("10.{}.0.{}", batch % 256, i + 1));
        if i == 0 {
            server = server.iburst().prefer();
        }
        spec = spec.server(server);
    }
    spec
}

// =============================================================================
// REPORTING
// =============================================================================

fn report_encode(label: &str, requests: &[SetRequest]) -> Vec<Vec<u8>> {
    let start = Instant::now();
    let encoded: Vec<Vec<u8>> = requests.iter().map(encode_set_request).collect();
    let elapsed = start.elapsed();
    let total: usize = encoded.iter().map(Vec::len).sum();

    println!("\n{label}: {} bytes in {:?}", total, elapsed);
    println!(
        "  Throughput: {:.2} MB/s",
        (total as f64 / 1_000_000.0) / elapsed.as_secs_f64()
    );
    encoded
}

fn report_decode(label: &str, encoded: &[Vec<u8>], requests: &[SetRequest]) {
    // Warmup
    for bytes in encoded.iter().take(16) {
        let _ = decode_set_request(bytes).expect("Failed to decode");
    }

    let start = Instant::now();
    let mut decoded: Vec<SetRequest> = Vec::new();
    for _ in 0..DECODE_ITERS {
        decoded = encoded
            .iter()
            .map(|bytes| decode_set_request(bytes).expect("Failed to decode"))
            .collect();
    }
    let elapsed = start.elapsed() / DECODE_ITERS;
    let total: usize = encoded.iter().map(Vec::len).sum();

    println!("{label} decode: {:?} (avg of {} iterations)", elapsed, DECODE_ITERS);
    println!(
        "  Throughput: {:.2} MB/s",
        (total as f64 / 1_000_000.0) / elapsed.as_secs_f64()
    );
    assert_eq!(decoded, requests, "decoded requests should match the built ones");
}

fn bench_file(path: &str, ctx: &TargetContext) {
    println!("Loading batch from: {}", path);
    let json = fs::read_to_string(path).expect("Failed to read batch file");
    let input: SetInput = serde_json::from_str(&json).expect("Failed to parse batch file");

    let start = Instant::now();
    let requests: Vec<SetRequest> = (0..BATCHES)
        .map(|_| build_set_request(&input, ctx).expect("Failed to build request"))
        .collect();
    let elapsed = start.elapsed();

    println!(
        "Built {} requests ({} ops each) in {:?}",
        requests.len(),
        requests[0].op_count(),
        elapsed
    );
    let encoded = report_encode("File batch", &requests);
    report_decode("File batch", &encoded, &requests);
}

fn bench_synthetic(config: &ClientConfig, ctx: &TargetContext) {
    let inputs: Vec<SetInput> = (0..BATCHES).map(|b| interface_batch(config, b)).collect();

    let start = Instant::now();
    let requests: Vec<SetRequest> = inputs
        .iter()
        .map(|input| build_set_request(input, ctx).expect("Failed to build request"))
        .collect();
    let elapsed = start.elapsed();
    let ops: usize = requests.iter().map(SetRequest::op_count).sum();

    println!("Built {} interface requests in {:?}", requests.len(), elapsed);
    println!("  - {} operations, {:.0} ops/s", ops, ops as f64 / elapsed.as_secs_f64());
    let encoded = report_encode("Interface batches", &requests);
    report_decode("Interface batches", &encoded, &requests);

    let start = Instant::now();
    let requests: Vec<SetRequest> = (0..BATCHES)
        .map(|b| ntp::set_request(&ntp_spec(b), ctx).expect("Failed to build ntp request"))
        .collect();
    let elapsed = start.elapsed();

    println!("\nBuilt {} ntp requests in {:?}", requests.len(), elapsed);
    let encoded = report_encode("NTP payloads", &requests);
    report_decode("NTP payloads", &encoded, &requests);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let config = ClientConfig::from_env();
    let ctx = config.target_context();
    tracing::info!(device = %ctx.target, batches = BATCHES, "starting benchmark");

    match std::env::args().nth(1) {
        Some(path) => bench_file(&path, &ctx),
        None => bench_synthetic(&config, &ctx),
    }
}
