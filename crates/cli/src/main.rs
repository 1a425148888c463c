// Copyright 2025 Myra Codec Contributors
// SPDX-License-Identifier: Apache-2.0

//! Myra benchmark report CLI entry point.

fn main() {
    if let Err(e) = myra_bench_cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
