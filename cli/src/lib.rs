// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line front end of EventHub: the dashboard listing and the terminal
//! event wizard.

mod cli;
mod cmd_dashboard;
mod cmd_tui;
mod config;
mod dashboard_formatter;
mod table;
mod tui;
mod util;

pub use crate::cli::{Cli, Commands, run};
pub use crate::config::{Config, parse_config};
