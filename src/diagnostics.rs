use serde::Serialize;
use std::time::Instant;
use sysinfo::System;

/// Elapsed time and resident memory growth of one run. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    pub elapsed_ms: u128,
    pub memory_bytes: u64,
}

/// Captures the starting point of a run.
pub struct RunProbe {
    started: Instant,
    baseline_memory: u64,
}

impl RunProbe {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            baseline_memory: process_memory().unwrap_or(0),
        }
    }

    pub fn finish(&self) -> Diagnostics {
        let current = process_memory().unwrap_or(self.baseline_memory);
        Diagnostics {
            elapsed_ms: self.started.elapsed().as_millis(),
            memory_bytes: current.saturating_sub(self.baseline_memory),
        }
    }
}

/// Resident memory of this process in bytes, if the platform reports it.
pub fn process_memory() -> Option<u64> {
    let pid = sysinfo::get_current_pid().ok()?;
    let mut sys = System::new();
    if !sys.refresh_process(pid) {
        return None;
    }
    sys.process(pid).map(|p| p.memory())
}

/// Human-readable byte count: `512 B`, `1.5 KB`, `3.0 MB`, ...
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let exponent = (63 - bytes.leading_zeros()) / 10;
    let unit = b" KMGTPE"[exponent as usize] as char;
    format!("{:.1} {}B", bytes as f64 / (1u64 << (exponent * 10)) as f64, unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_bytes() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
    }

    #[test]
    fn test_format_size_units() {
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(3 * 1_048_576), "3.0 MB");
        assert_eq!(format_size(1 << 30), "1.0 GB");
        assert_eq!(format_size(u64::MAX), "16.0 EB");
    }

    #[test]
    fn test_probe_reports_elapsed() {
        let probe = RunProbe::start();
        let diagnostics = probe.finish();
        assert!(diagnostics.elapsed_ms < 60_000);
    }
}
