//! Start-up banner: centred "CampusLogin" figlet title over a titled rule line.

use crossterm::style::{Color, Stylize};
use crossterm::terminal;
use figlet_rs::FIGfont;

const TITLE: &str = "CampusLogin";
const SUBTITLE: &str = "Campus network portal login";

/// Portal blue (#1e6fd9).
const PORTAL_BLUE: Color = Color::Rgb {
    r: 0x1e,
    g: 0x6f,
    b: 0xd9,
};
/// Campus yellow (#f2c230).
const CAMPUS_YELLOW: Color = Color::Rgb {
    r: 0xf2,
    g: 0xc2,
    b: 0x30,
};

/// Used when stdout is not a terminal.
const FALLBACK_WIDTH: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleAlign {
    Center,
    Left,
}

/// Current terminal width in columns.
pub fn terminal_width() -> usize {
    terminal::size()
        .map(|(cols, _)| usize::from(cols))
        .ok()
        .filter(|&w| w > 0)
        .unwrap_or(FALLBACK_WIDTH)
}

/// Figlet art for the title, or the plain title if the builtin font fails to load.
fn title_art() -> String {
    FIGfont::standard()
        .ok()
        .and_then(|font| font.convert(TITLE).map(|fig| fig.to_string()))
        .unwrap_or_else(|| format!("{}\n", TITLE))
}

/// Centre a block of lines as one unit so the figlet glyphs stay aligned.
/// Blocks wider than `width` are left as they are.
fn center_block(block: &str, width: usize) -> Vec<String> {
    let lines: Vec<&str> = block.lines().map(str::trim_end).collect();
    let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let pad = " ".repeat(width.saturating_sub(widest) / 2);
    lines
        .iter()
        .map(|l| if l.is_empty() { String::new() } else { format!("{}{}", pad, l) })
        .collect()
}

/// A `─` line of `width` columns with `label` embedded, e.g. `──── label ────`.
/// Returns the two line segments around the label.
fn rule_parts(label: &str, width: usize, align: RuleAlign) -> (String, String) {
    let used = label.chars().count() + 2;
    let fill = width.saturating_sub(used);
    let left = match align {
        RuleAlign::Center => fill / 2,
        RuleAlign::Left => fill.min(2),
    };
    ("─".repeat(left), "─".repeat(fill - left))
}

/// Rule line with a yellow label, as printed under the title and above forms.
pub fn rule(label: &str, width: usize, align: RuleAlign) -> String {
    let (left, right) = rule_parts(label, width, align);
    format!(
        "{} {} {}",
        left.dark_grey(),
        label.with(CAMPUS_YELLOW),
        right.dark_grey()
    )
}

pub fn print_welcome() {
    let width = terminal_width();
    for line in center_block(&title_art(), width) {
        println!("{}", line.with(PORTAL_BLUE).bold());
    }
    let subtitle = format!("{} v{}", SUBTITLE, env!("CARGO_PKG_VERSION"));
    println!("{}", rule(&subtitle, width, RuleAlign::Center));
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_is_centred_as_a_unit() {
        let lines = center_block("ab\nabcd\n", 10);
        assert_eq!(lines, vec!["   ab", "   abcd"]);
    }

    #[test]
    fn test_wide_block_is_not_padded() {
        let lines = center_block("abcdef", 4);
        assert_eq!(lines, vec!["abcdef"]);
    }

    #[test]
    fn test_rule_fills_width() {
        let (l, r) = rule_parts("title", 21, RuleAlign::Center);
        assert_eq!(l.chars().count(), 7);
        assert_eq!(r.chars().count(), 7);
        assert_eq!(l.chars().count() + r.chars().count() + "title".len() + 2, 21);

        let (l, r) = rule_parts("title", 21, RuleAlign::Left);
        assert_eq!(l, "──");
        assert_eq!(r.chars().count(), 12);
    }

    #[test]
    fn test_rule_narrower_than_label() {
        let (l, r) = rule_parts("a long label", 4, RuleAlign::Center);
        assert!(l.is_empty() && r.is_empty());
    }

    #[test]
    fn test_title_art_is_multiline() {
        let art = title_art();
        assert!(art.lines().count() > 1);
        assert!(center_block(&art, 200).iter().all(|l| l.is_empty() || l.starts_with(' ')));
    }
}
