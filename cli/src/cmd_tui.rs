// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Commands that open the event wizard in the terminal.

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use colored::Colorize;
use eventhub_core::{EventHub, SubmitOutcome, Wizard};

use crate::cmd_dashboard::CmdDashboard;
use crate::config::Config;
use crate::tui;

#[derive(Debug, Clone, Copy, Default)]
pub struct CmdNew;

impl CmdNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Create a new event with the wizard")
    }

    pub fn from(_matches: &ArgMatches) -> Self {
        Self
    }

    pub async fn run(self, hub: &mut EventHub, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!("starting the event wizard");
        let outcome = tui::run_wizard(hub, Wizard::new()).await?;
        finish(outcome, hub, config).await
    }
}

#[derive(Debug, Clone)]
pub struct CmdEdit {
    /// Id of the event, or an unambiguous prefix of it
    pub id: String,
}

impl CmdEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit an event with the wizard")
            .arg(arg!(id: <ID> "The id of the event to edit, or a unique prefix of it"))
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let id = matches
            .get_one::<String>("id")
            .ok_or("Event id is required")?
            .clone();
        Ok(Self { id })
    }

    pub async fn run(self, hub: &mut EventHub, config: &Config) -> Result<(), Box<dyn Error>> {
        let wizard = hub.edit_wizard(&self.id).await?;
        let outcome = tui::run_wizard(hub, wizard).await?;
        finish(outcome, hub, config).await
    }
}

/// Reports the outcome of a wizard session and shows the updated dashboard.
async fn finish(
    outcome: Option<SubmitOutcome>,
    hub: &mut EventHub,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    let Some(outcome) = outcome else {
        tracing::info!("wizard closed without submitting");
        return Ok(());
    };

    println!("{} {}", "✓".green(), outcome.message());
    CmdDashboard::default().run(hub, config).await
}
