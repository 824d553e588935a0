//! `subsync sources`: list configured sources.

use subsync_core::config::SyncConfig;

pub fn run_sources(cfg: &SyncConfig) {
    println!("{:<12} {:<24} {:<8} {}", "KEY", "NAME", "TIMEOUT", "URL");
    for s in cfg.sources() {
        println!(
            "{:<12} {:<24} {:<8} {}",
            s.key,
            s.display_name(),
            format!("{}s", s.timeout.as_secs()),
            s.url
        );
    }
}
