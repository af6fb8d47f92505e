use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref STATUS_LINE: Regex =
        Regex::new(r"^(\w+):\s+(\d+)(\s+kB)?$").expect("regex compiles");
}

/// The parts of `/proc/self/status` the collector reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessStatus {
    pub threads: Option<u64>,
    pub rss_bytes: Option<u64>,
    pub vm_bytes: Option<u64>,
}

pub fn read_process_status() -> std::io::Result<ProcessStatus> {
    let status = std::fs::read_to_string("/proc/self/status")?;
    Ok(parse_process_status(&status))
}

pub fn parse_process_status(status: &str) -> ProcessStatus {
    let mut parsed = ProcessStatus::default();

    for captures in status.lines().filter_map(|line| STATUS_LINE.captures(line.trim())) {
        let Ok(value) = captures[2].parse::<u64>() else {
            continue;
        };
        let value = if captures.get(3).is_some() {
            value.saturating_mul(1024)
        } else {
            value
        };
        match &captures[1] {
            "Threads" => parsed.threads = Some(value),
            "VmRSS" => parsed.rss_bytes = Some(value),
            "VmSize" => parsed.vm_bytes = Some(value),
            _ => (),
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATUS: &str = "Name:\tmetricsinkd
Umask:\t0022
State:\tS (sleeping)
VmPeak:\t  120000 kB
VmSize:\t  110592 kB
VmRSS:\t    8192 kB
Threads:\t3
SigQ:\t0/63327
";

    #[test]
    fn reads_threads_and_memory() {
        assert_eq!(
            parse_process_status(STATUS),
            ProcessStatus {
                threads: Some(3),
                rss_bytes: Some(8192 * 1024),
                vm_bytes: Some(110592 * 1024),
            }
        );
    }

    #[test]
    fn missing_fields_stay_empty() {
        assert_eq!(
            parse_process_status("Name:\tsomething\nState:\tR (running)\n"),
            ProcessStatus::default()
        );
    }
}
