use std::process::{Command, Output};

fn run_primecount(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_primecount"))
        .args(args)
        .output()
        .expect("Failed to execute primecount")
}

fn run_json(args: &[&str]) -> serde_json::Value {
    let mut full_args = vec!["--json"];
    full_args.extend_from_slice(args);
    let output = run_primecount(&full_args);

    assert!(
        output.status.success(),
        "primecount should exit successfully, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).expect("Invalid UTF-8 output");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_prime_count_within_sample() {
    let json = run_json(&["-n", "10000", "-t", "4", "-s", "1"]);

    let primes = json["results"]["primes"]
        .as_u64()
        .expect("primes should be a number");
    let partials: Vec<u64> = json["results"]["partial_counts"]
        .as_array()
        .expect("partial_counts should be an array")
        .iter()
        .map(|v| v.as_u64().expect("partial count should be a number"))
        .collect();

    assert_eq!(partials.len(), 4);
    assert_eq!(partials.iter().sum::<u64>(), primes);
    // Values below 10 are prime 4 times out of 10
    assert!(primes > 3000 && primes < 5000, "unexpected prime count {}", primes);
    assert_eq!(json["config"]["chunk_size"], 2500);
}

#[test]
fn test_different_strategies() {
    let strategies = vec!["sequential", "threads", "rayon", "elements"];
    let mut totals = Vec::new();

    for strategy in &strategies {
        let json = run_json(&["-n", "6000", "-t", "3", "-u", "1000", "-s", "99", "-c", *strategy]);
        assert_eq!(json["config"]["strategy"], *strategy);
        totals.push(json["results"]["primes"].clone());
    }

    assert!(
        totals.windows(2).all(|pair| pair[0] == pair[1]),
        "strategies disagree: {:?}",
        totals
    );
}

#[test]
fn test_total_independent_of_threads() {
    let expected =
        run_json(&["-n", "1200", "-u", "500", "-t", "1", "-s", "7"])["results"]["primes"].clone();

    for threads in ["2", "5", "7", "120"] {
        let json = run_json(&["-n", "1200", "-u", "500", "-t", threads, "-s", "7"]);
        assert_eq!(json["results"]["primes"], expected, "threads {}", threads);
    }
}

#[test]
fn test_zero_threads_fails() {
    let output = run_primecount(&["-n", "100", "-t", "0"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_remainder_policies() {
    let output = run_primecount(&["--json", "-r", "strict", "-n", "10", "-t", "3"]);
    assert!(!output.status.success());

    let output = run_primecount(&["--json", "--remainder", "strict", "-n", "12", "-t", "3"]);
    assert!(output.status.success());

    let json = run_json(&["-n", "10", "-t", "3", "-s", "5"]);
    assert_eq!(json["config"]["remainder"], "widen");
    assert_eq!(json["results"]["partial_counts"].as_array().unwrap().len(), 3);

    let output = run_primecount(&["-r", "pad", "-n", "10", "-t", "3"]);
    assert!(!output.status.success());
}

#[test]
fn test_one_value_per_thread_with_rayon() {
    for strategy in ["rayon", "elements"] {
        let json = run_json(&["-n", "3000", "-t", "3000", "-u", "100", "-s", "11", "-c", strategy]);
        let partials = json["results"]["partial_counts"].as_array().unwrap();
        assert_eq!(partials.len(), 3000);
        assert!(partials.iter().all(|count| *count == 0 || *count == 1));
    }
}

#[test]
fn test_human_output() {
    let output = run_primecount(&["-q", "-n", "100", "-t", "2", "-s", "3"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("Invalid UTF-8 output");
    assert!(stdout.contains("Primes in the sample:"));
    assert!(stdout.contains("Threads: 2 (50 values per chunk)"));
}
