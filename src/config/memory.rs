//! Memory ceiling correction against host capabilities.
//!
//! A configured ceiling above what the machine can grant makes the launched
//! game process fail outright, so startup replaces such values with a
//! suggestion derived from the probed physical memory.

/// Capability-optional probe for total physical memory.
///
/// Absence of the capability is not an error: `None` means unknown, and an
/// unknown total never triggers the too-close-to-physical correction.
pub trait MemoryProbe {
    fn total_memory_gib(&self) -> Option<f64>;
}

/// Probe backed by the host OS via `sysinfo`.
pub struct SystemProbe;

impl MemoryProbe for SystemProbe {
    fn total_memory_gib(&self) -> Option<f64> {
        let mut system = sysinfo::System::new();
        system.refresh_memory();
        let total = system.total_memory();
        if total == 0 {
            return None;
        }
        Some(total as f64 / 1024.0 / 1024.0 / 1024.0)
    }
}

/// Probe for platforms (and tests) where physical memory cannot be read.
pub struct UnknownProbe;

impl MemoryProbe for UnknownProbe {
    fn total_memory_gib(&self) -> Option<f64> {
        None
    }
}

/// Correct a configured maximum-memory setting (megabytes).
///
/// The suggested ceiling is 65% of physical memory on small machines
/// (≤ 12 GiB) and a flat 8 GiB otherwise. Correction applies when the
/// configured value is unset/non-positive, or sits within 1 GiB of the
/// physical total. Values the user set deliberately below that line pass
/// through untouched.
pub fn correct(configured_mb: i64, available_gib: Option<f64>) -> i64 {
    let configured_gib = configured_mb as f64 / 1024.0;

    let (available, suggested) = match available_gib {
        Some(available) if available <= 12.0 => (available, available * 0.65),
        Some(available) => (available, 8.0),
        None => (f64::MAX, 8.0),
    };

    if configured_mb <= 0 || configured_gib >= available - 1.0 {
        (suggested * 1024.0) as i64
    } else {
        configured_mb
    }
}
