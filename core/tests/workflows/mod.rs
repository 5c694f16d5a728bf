// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end workflow tests for the eventhub-core crate.
//!
//! These tests drive the wizard against the SQLite store and read the result
//! back through the dashboard, the way the command line front end does.

mod config_driven;
mod dashboard_view;
mod wizard_lifecycle;
