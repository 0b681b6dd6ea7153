// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Name-keyed terminal styling for the `colorize` filter.
//!
//! There is no process-wide theme; each transport passes style names explicitly, either as a
//! filter parameter or through its `colors` config map.

use colored::Colorize;

/// Applies the named style to `text`.
///
/// Known names are the eight ANSI colors, their `bright-` variants, `grey`/`gray`, and the
/// attributes `bold`, `dimmed`, `italic` and `underline`. Returns `None` for any other name.
pub(crate) fn paint(text: &str, style: &str) -> Option<String> {
    let styled = match style {
        "black" => text.black(),
        "red" => text.red(),
        "green" => text.green(),
        "yellow" => text.yellow(),
        "blue" => text.blue(),
        "magenta" => text.magenta(),
        "cyan" => text.cyan(),
        "white" => text.white(),
        "grey" | "gray" => text.bright_black(),
        "bright-black" => text.bright_black(),
        "bright-red" => text.bright_red(),
        "bright-green" => text.bright_green(),
        "bright-yellow" => text.bright_yellow(),
        "bright-blue" => text.bright_blue(),
        "bright-magenta" => text.bright_magenta(),
        "bright-cyan" => text.bright_cyan(),
        "bright-white" => text.bright_white(),
        "bold" => text.bold(),
        "dimmed" => text.dimmed(),
        "italic" => text.italic(),
        "underline" => text.underline(),
        _ => return None,
    };
    Some(styled.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_known_and_unknown_styles() {
        colored::control::set_override(true);

        let styled = paint("dlc", "red").unwrap();
        assert!(styled.contains("dlc"));
        assert!(styled.contains('\u{1b}'));

        assert!(paint("dlc", "zebra").is_none());
    }
}
