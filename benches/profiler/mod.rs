// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dexview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dexview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use criterion::Criterion;

use pprof::criterion::{Output, PProfProfiler};

fn env_i32(name: &str, default: i32) -> i32 {
    std::env::var(name).ok().and_then(|raw| raw.trim().parse::<i32>().ok()).unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name).ok().and_then(|raw| raw.trim().parse::<u64>().ok()).unwrap_or(default)
}

/// Criterion tuned through `DEXVIEW_BENCH_*` variables, with pprof flamegraphs attached.
pub fn criterion() -> Criterion {
    let frequency = env_i32("DEXVIEW_PROFILE_FREQ", 100).clamp(1, 1000);
    let sample_size = env_u64("DEXVIEW_BENCH_SAMPLE_SIZE", 50).clamp(10, 200) as usize;
    let warmup = Duration::from_millis(env_u64("DEXVIEW_BENCH_WARMUP_MS", 2000).clamp(100, 60_000));
    let measurement =
        Duration::from_millis(env_u64("DEXVIEW_BENCH_MEASUREMENT_MS", 4000).clamp(500, 120_000));

    Criterion::default()
        .sample_size(sample_size)
        .warm_up_time(warmup)
        .measurement_time(measurement)
        .with_profiler(PProfProfiler::new(frequency, Output::Flamegraph(None)))
}
