// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg, value_parser};
use colored::Colorize;
use eventhub_core::{CategoryFilter, DashboardFilter, EventHub, StatusFilter};

use crate::config::Config;
use crate::dashboard_formatter::DashboardFormatter;
use crate::util::OutputFormat;

#[derive(Debug, Default, Clone)]
pub struct CmdDashboard {
    pub filter: DashboardFilter,
    pub output_format: Option<OutputFormat>,
}

impl CmdDashboard {
    pub const NAME: &str = "dashboard";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List your events with sales and capacity")
            .arg(
                arg!(-s --status <STATUS> "Only show events with this status")
                    .value_parser(value_parser!(StatusFilter))
                    .default_value("all"),
            )
            .arg(
                arg!(--category <CATEGORY> "Only show events of this category")
                    .long_help(format!(
                        "Only show events of this category, matched exactly. One of: all, {}",
                        CategoryFilter::CHOICES.join(", ")
                    ))
                    .value_parser(parse_category)
                    .default_value("all"),
            )
            .arg(arg!(-q --search <TEXT> "Search in titles and organizers"))
            .arg(OutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let filter = DashboardFilter {
            status: matches.get_one("status").copied().unwrap_or_default(),
            category: matches
                .get_one::<CategoryFilter>("category")
                .cloned()
                .unwrap_or_default(),
            search: matches
                .get_one::<String>("search")
                .cloned()
                .unwrap_or_default(),
        };

        Self {
            filter,
            output_format: OutputFormat::from(matches),
        }
    }

    pub async fn run(self, hub: &mut EventHub, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "generating dashboard...");
        let rows = hub.dashboard(&self.filter).await?;

        let format = self
            .output_format
            .or(config.output_format)
            .unwrap_or(OutputFormat::Table);
        if format == OutputFormat::Table {
            println!("📋 {}", "Events".bold());
        }

        let formatter = DashboardFormatter::new(format);
        print!("{}", formatter.format(&rows));
        Ok(())
    }
}

fn parse_category(value: &str) -> Result<CategoryFilter, String> {
    value
        .parse()
        .map_err(|()| "category must not be empty".to_string())
}
