// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Helpers shared by the integration tests: wizard and config fixtures,
//! assertions and scratch directories.

mod assertions;
mod fixtures;
mod temp_dir;

#[allow(unused_imports)]
pub use assertions::{assert_file_exists, assert_step_blocked};
#[allow(unused_imports)]
pub use fixtures::{TestConfigBuilder, completed_wizard, standard_ticket, test_config};
pub use temp_dir::setup_temp_dirs;
