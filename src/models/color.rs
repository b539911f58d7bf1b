// Named terminal colors and per-field color rules

use crate::error::QueryError;

const ANSI_RESET: &str = "\x1b[0m";

/// Foreground colors from the standard 16-color palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Color {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "black" => Some(Color::Black),
            "red" => Some(Color::Red),
            "green" => Some(Color::Green),
            "yellow" => Some(Color::Yellow),
            "blue" => Some(Color::Blue),
            "magenta" => Some(Color::Magenta),
            "cyan" => Some(Color::Cyan),
            "white" => Some(Color::White),
            "bright_black" => Some(Color::BrightBlack),
            "bright_red" => Some(Color::BrightRed),
            "bright_green" => Some(Color::BrightGreen),
            "bright_yellow" => Some(Color::BrightYellow),
            "bright_blue" => Some(Color::BrightBlue),
            "bright_magenta" => Some(Color::BrightMagenta),
            "bright_cyan" => Some(Color::BrightCyan),
            "bright_white" => Some(Color::BrightWhite),
            _ => None,
        }
    }

    /// ANSI escape that switches the foreground to this color
    pub fn ansi_fg(&self) -> &'static str {
        match self {
            Color::Black => "\x1b[30m",
            Color::Red => "\x1b[31m",
            Color::Green => "\x1b[32m",
            Color::Yellow => "\x1b[33m",
            Color::Blue => "\x1b[34m",
            Color::Magenta => "\x1b[35m",
            Color::Cyan => "\x1b[36m",
            Color::White => "\x1b[37m",
            Color::BrightBlack => "\x1b[90m",
            Color::BrightRed => "\x1b[91m",
            Color::BrightGreen => "\x1b[92m",
            Color::BrightYellow => "\x1b[93m",
            Color::BrightBlue => "\x1b[94m",
            Color::BrightMagenta => "\x1b[95m",
            Color::BrightCyan => "\x1b[96m",
            Color::BrightWhite => "\x1b[97m",
        }
    }

    /// Wrap `text` in this color, resetting afterwards
    pub fn paint(&self, text: &str) -> String {
        format!("{}{}{}", self.ansi_fg(), text, ANSI_RESET)
    }
}

/// Value -> color mapping for a single field, with an optional fallback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorRule {
    pub field: String,
    pub colors: Vec<(String, Color)>,
    pub fallback: Option<Color>,
}

impl ColorRule {
    /// Build a rule from color names. Unknown color names are rejected.
    pub fn new(field: &str, colors: &[(&str, &str)], fallback: Option<&str>) -> Result<Self, QueryError> {
        let parse = |name: &str| {
            Color::from_name(name).ok_or_else(|| {
                QueryError::InvalidConfig(format!("unknown color '{}' for field {}", name, field))
            })
        };

        let colors = colors
            .iter()
            .map(|(value, name)| Ok((value.to_string(), parse(name)?)))
            .collect::<Result<Vec<_>, QueryError>>()?;
        let fallback = fallback.map(parse).transpose()?;

        Ok(Self {
            field: field.to_string(),
            colors,
            fallback,
        })
    }

    /// Color for a cell value: an exact match first, then the fallback
    pub fn color_for(&self, value: &str) -> Option<Color> {
        self.colors
            .iter()
            .find(|(key, _)| key == value)
            .map(|(_, color)| *color)
            .or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_rule() -> ColorRule {
        ColorRule::new(
            "STATE",
            &[("RUNNING", "green"), ("PENDING", "yellow")],
            Some("red"),
        )
        .unwrap()
    }

    #[test]
    fn test_color_name_parsing() {
        assert_eq!(Color::from_name("green"), Some(Color::Green));
        assert_eq!(Color::from_name("bright_black"), Some(Color::BrightBlack));
        assert_eq!(Color::from_name("Green"), None);
        assert_eq!(Color::from_name("purple"), None);
    }

    #[test]
    fn test_paint_wraps_in_escape_codes() {
        assert_eq!(Color::Green.paint("RUNNING"), "\x1b[32mRUNNING\x1b[0m");
        assert_eq!(Color::Red.paint(""), "\x1b[31m\x1b[0m");
    }

    #[test]
    fn test_rule_exact_match_then_fallback() {
        let rule = state_rule();
        assert_eq!(rule.color_for("RUNNING"), Some(Color::Green));
        assert_eq!(rule.color_for("PENDING"), Some(Color::Yellow));
        assert_eq!(rule.color_for("FAILED"), Some(Color::Red));
        assert_eq!(rule.color_for("[empty]"), Some(Color::Red));
        // Matching is case-sensitive
        assert_eq!(rule.color_for("running"), Some(Color::Red));
    }

    #[test]
    fn test_rule_without_fallback_leaves_unmatched_plain() {
        let rule = ColorRule::new("STATE", &[("RUNNING", "green")], None).unwrap();
        assert_eq!(rule.color_for("RUNNING"), Some(Color::Green));
        assert_eq!(rule.color_for("PENDING"), None);
    }

    #[test]
    fn test_rule_rejects_unknown_color() {
        let err = ColorRule::new("STATE", &[("RUNNING", "chartreuse")], None).unwrap_err();
        assert!(err.to_string().contains("chartreuse"));

        assert!(ColorRule::new("STATE", &[], Some("mauve")).is_err());
    }
}
