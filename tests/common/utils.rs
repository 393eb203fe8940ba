// SPDX-License-Identifier: MIT 
// Copyright (c) 2026 Peter Carlton

use aln_subst::{Alignment, AssemblyConfig};

#[allow(dead_code)]
pub const EXAMPLE_ALN: &str = "tests/data/example.aln";
#[allow(dead_code)]
pub const OVERLAP_ALN: &str = "tests/data/overlap.aln";
#[allow(dead_code)]
pub const EMPTY_ALN: &str = "tests/data/empty.aln";
#[allow(dead_code)]
pub const REJECT_CONFIG: &str = "tests/data/reject.json";

// Shows the crate's log output when a test is run with RUST_LOG set (and --nocapture).
#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[allow(dead_code)]
pub fn load(path: &str) -> Alignment {
    init_logging();
    Alignment::from_path(path).expect("read")
}

#[allow(dead_code)]
pub fn load_with_config(path: &str, config_path: &str) -> Result<Alignment, aln_subst::AlnError> {
    init_logging();
    let config = AssemblyConfig::from_file(config_path).expect("config");
    Alignment::from_path_with_config(path, &config)
}
