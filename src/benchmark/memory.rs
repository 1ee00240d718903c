//! 进程内存采样

use std::fs;

const KB_PER_MB: f64 = 1024.0;

/// 常驻内存采样接口
pub trait MemoryProbe {
    /// 当前常驻内存（MB），无法获取时返回 `None`
    fn resident_mb(&self) -> Option<f64>;
}

/// 读取 `/proc/self/status` 中 `VmRSS` 的进程内存探针
///
/// 非 Linux 平台上始终返回 `None`，内存差值记为 0。
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessMemory;

impl MemoryProbe for ProcessMemory {
    fn resident_mb(&self) -> Option<f64> {
        let status = fs::read_to_string("/proc/self/status").ok()?;
        parse_vm_rss(&status)
    }
}

/// 解析 `VmRSS:   <n> kB` 行，单位与页大小无关
fn parse_vm_rss(status: &str) -> Option<f64> {
    let line = status.lines().find(|l| l.starts_with("VmRSS:"))?;
    let mut fields = line["VmRSS:".len()..].split_whitespace();
    let kb: u64 = fields.next()?.parse().ok()?;
    if !fields.next()?.eq_ignore_ascii_case("kB") {
        return None;
    }
    Some(kb as f64 / KB_PER_MB)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vm_rss() {
        let status = "Name:\tpathbench\nVmPeak:\t   40960 kB\nVmRSS:\t   16384 kB\nThreads:\t1\n";
        assert_eq!(parse_vm_rss(status), Some(16.0));
        assert_eq!(parse_vm_rss("VmRSS:\t512 kB"), Some(0.5));
    }

    #[test]
    fn test_parse_vm_rss_rejects_bad_lines() {
        assert_eq!(parse_vm_rss("Name:\tpathbench\nVmPeak:\t4096 kB\n"), None);
        assert_eq!(parse_vm_rss("VmRSS:\tabc kB\n"), None);
        assert_eq!(parse_vm_rss("VmRSS:\t1024\n"), None);
        assert_eq!(parse_vm_rss("VmRSS:\t1024 pages\n"), None);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_process_memory_on_linux() {
        let rss = ProcessMemory.resident_mb().unwrap();
        assert!(rss > 0.0);
    }
}
