// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// farbwerk-bench — Timed worker-count and resolution sweeps over the
// recolor engine.

pub mod harness;

pub use harness::BenchmarkHarness;
