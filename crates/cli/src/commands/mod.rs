// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Checker command implementations

pub mod common;
pub mod paper;
pub mod releases;
pub mod sale;
pub mod today;
