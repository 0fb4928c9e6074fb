use std::time::Duration;

use serde::Serialize;

#[cfg(target_os = "linux")]
use procfs::process::Process;

pub fn get_memory_usage_bytes() -> Option<u64> {
    #[cfg(target_os = "linux")]
    {
        Process::myself()
            .ok()
            .and_then(|p| p.status().ok())
            .and_then(|s| s.vmhwm)
            .map(|kb| kb * 1024) // VmHWM is in KB
    }
    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}

pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let base = 1024_f64;
    let exp = (bytes as f64).log(base).floor() as usize;
    let exp = exp.min(UNITS.len() - 1);

    let value = bytes as f64 / base.powi(exp as i32);

    if exp == 0 {
        format!("{} {}", bytes, UNITS[exp])
    } else {
        format!("{:.2} {}", value, UNITS[exp])
    }
}

fn round_to_3_decimals(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn serialize_f64_3dp<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_f64(round_to_3_decimals(*value))
}

fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

#[derive(Debug, Serialize)]
pub struct Config {
    pub size: usize,
    pub upper_bound: u32,
    pub threads: usize,
    pub strategy: String,
    pub chunk_size: usize,
    pub remainder: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct Results {
    pub primes: u64,
    pub partial_counts: Vec<u64>,
    #[serde(serialize_with = "serialize_f64_3dp")]
    pub generate_time_ms: f64,
    #[serde(serialize_with = "serialize_f64_3dp")]
    pub count_time_ms: f64,
    #[serde(serialize_with = "serialize_f64_3dp")]
    pub total_time_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peak_memory_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peak_memory_human: Option<String>,
}

impl Results {
    pub fn new(
        primes: u64,
        partial_counts: Vec<u64>,
        generate_time: Duration,
        count_time: Duration,
        peak_memory_bytes: Option<u64>,
    ) -> Self {
        Results {
            primes,
            partial_counts,
            generate_time_ms: millis(generate_time),
            count_time_ms: millis(count_time),
            total_time_ms: millis(generate_time + count_time),
            peak_memory_bytes,
            peak_memory_human: peak_memory_bytes.map(format_bytes),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub config: Config,
    pub results: Results,
}

impl Report {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn print_human(&self) {
        let config = &self.config;
        let results = &self.results;

        println!("Sample size: {}", config.size);
        println!("Values drawn from: [0, {})", config.upper_bound);
        println!("Threads: {} ({} values per chunk)", config.threads, config.chunk_size);
        println!("Remainder: {}", config.remainder);
        println!("Strategy: {}", config.strategy);
        if let Some(seed) = config.seed {
            println!("Seed: {}", seed);
        }
        println!();
        println!("Results:");
        println!("  Primes in the sample: {}", results.primes);
        println!("  Per worker: {:?}", results.partial_counts);
        if let Some(peak_human) = &results.peak_memory_human {
            println!("  Peak memory: {}", peak_human);
        }
        println!();
        println!("Timing:");
        println!("  Generate time: {:.3} ms", results.generate_time_ms);
        println!("  Count time: {:.3} ms", results.count_time_ms);
        println!("  Total time: {:.3} ms", results.total_time_ms);
    }
}
