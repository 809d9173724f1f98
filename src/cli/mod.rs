//! CLI argument structs shared by the `midx-build` and `midx-search` binaries.

pub mod args;
