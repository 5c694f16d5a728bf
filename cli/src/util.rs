// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use clap::{Arg, ArgMatches, arg, value_parser};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Table,
}

impl OutputFormat {
    pub fn arg() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format, defaults to table")
            .value_parser(value_parser!(OutputFormat))
    }

    pub fn from(matches: &ArgMatches) -> Option<Self> {
        matches.get_one("output-format").copied()
    }
}

/// Width on a terminal of the first `first_n` grapheme clusters of `s`.
pub fn unicode_width_of_slice(s: &str, first_n: usize) -> usize {
    s[..byte_offset_of_grapheme(s, first_n)].width()
}

/// Byte offset where the grapheme cluster at index `g_idx` starts, or the
/// length of `s` if out of bounds.
pub fn byte_offset_of_grapheme(s: &str, g_idx: usize) -> usize {
    s.grapheme_indices(true)
        .nth(g_idx)
        .map_or(s.len(), |(byte_start, _)| byte_start)
}

/// Return the byte range of the grapheme cluster at index `g_idx` in `s`.
/// If out of bounds, returns None.
pub fn byte_range_of_grapheme_at(s: &str, g_idx: usize) -> Option<std::ops::Range<usize>> {
    s.grapheme_indices(true)
        .nth(g_idx)
        .map(|(byte_start, g)| byte_start..byte_start + g.len())
}

/// Number of grapheme clusters in `s`.
pub fn grapheme_count(s: &str) -> usize {
    s.graphemes(true).count()
}

/// Cuts `s` to at most `max_width` terminal columns, marking the cut with `…`.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_owned();
    }

    let mut out = String::new();
    let mut width = 0;
    for g in s.graphemes(true) {
        let w = g.width();
        if width + w + 1 > max_width {
            break;
        }
        out.push_str(g);
        width += w;
    }
    out.push('…');
    out
}
