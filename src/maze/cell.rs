use crossterm::style::{Color, Stylize};

use std::fmt;

/// Visual state of one grid coordinate as seen by the observer.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    /// A closed wall slot or post.
    Wall,
    /// Open space that no generator has touched yet.
    #[default]
    Idle,
    /// Part of the current frontier.
    Active,
    /// Finalized by the generator.
    Done,
}

impl Fill {
    /// The width of each coordinate when rendered, in character widths.
    pub const CELL_WIDTH: u16 = 2;
}

impl fmt::Display for Fill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Fill::Wall => "██".with(Color::Black),
            Fill::Idle => "░░".with(Color::DarkGrey),
            Fill::Active => "▓▓".with(Color::Red),
            Fill::Done => "  ".with(Color::Reset),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Fill::CELL_WIDTH as usize,
                "Each coordinate must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fill_is_idle() {
        assert_eq!(Fill::default(), Fill::Idle);
    }

    #[test]
    fn test_every_fill_renders() {
        for fill in [Fill::Wall, Fill::Idle, Fill::Active, Fill::Done] {
            assert!(!fill.to_string().is_empty());
        }
    }
}
