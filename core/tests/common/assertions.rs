// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Custom assertion helpers for integration tests.

use std::path::Path;

use eventhub_core::{ValidationError, Wizard};

/// Asserts that a file exists at the given path.
#[allow(dead_code)]
pub fn assert_file_exists(path: &Path) {
    assert!(
        path.exists(),
        "File should exist at path: {}",
        path.display()
    );
}

/// Asserts that advancing fails with the given error and keeps the step.
#[allow(dead_code)]
pub fn assert_step_blocked(wizard: &mut Wizard, expected: ValidationError) {
    let step = wizard.step();
    assert_eq!(wizard.advance(), Err(expected));
    assert_eq!(wizard.step(), step, "a failed advance must not move");
}
