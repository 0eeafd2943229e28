use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders},
};
use serde::{Deserialize, Serialize};

pub const GREEN: Color = Color::Rgb(92, 168, 92);
pub const AMBER: Color = Color::Rgb(210, 138, 60);
pub const RED: Color = Color::Rgb(180, 82, 62);

/// Heatmap cell colours: empty, then intensity 1..=4.
pub const HEAT: [Color; 5] = [
    Color::Rgb(48, 48, 56),
    Color::Rgb(70, 110, 80),
    Color::Rgb(90, 150, 100),
    Color::Rgb(110, 200, 130),
    Color::Rgb(34, 197, 94),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Purple,
    Ocean,
    Sunset,
    Forest,
    Cosmic,
    Royal,
}

impl ThemeName {
    pub fn all() -> Vec<ThemeName> {
        vec![
            ThemeName::Purple,
            ThemeName::Ocean,
            ThemeName::Sunset,
            ThemeName::Forest,
            ThemeName::Cosmic,
            ThemeName::Royal,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Purple => "purple",
            ThemeName::Ocean => "ocean",
            ThemeName::Sunset => "sunset",
            ThemeName::Forest => "forest",
            ThemeName::Cosmic => "cosmic",
            ThemeName::Royal => "royal",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ThemeName::Purple => "Purple Galaxy",
            ThemeName::Ocean => "Ocean Depths",
            ThemeName::Sunset => "Sunset Fire",
            ThemeName::Forest => "Forest Night",
            ThemeName::Cosmic => "Cosmic Void",
            ThemeName::Royal => "Royal Gold",
        }
    }

    /// Cycles in declaration order, wrapping around.
    pub fn next(&self) -> ThemeName {
        let all = Self::all();
        let idx = all.iter().position(|t| t == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    pub fn palette(&self) -> Palette {
        let (bg, surface, border, accent, text, text_dim) = match self {
            ThemeName::Purple => (
                Color::Rgb(24, 16, 40),
                Color::Rgb(36, 26, 58),
                Color::Rgb(72, 56, 110),
                Color::Rgb(192, 132, 252),
                Color::Rgb(233, 222, 255),
                Color::Rgb(150, 130, 190),
            ),
            ThemeName::Ocean => (
                Color::Rgb(10, 24, 36),
                Color::Rgb(16, 36, 52),
                Color::Rgb(40, 80, 100),
                Color::Rgb(34, 211, 238),
                Color::Rgb(207, 250, 254),
                Color::Rgb(110, 160, 176),
            ),
            ThemeName::Sunset => (
                Color::Rgb(36, 14, 12),
                Color::Rgb(54, 24, 20),
                Color::Rgb(110, 50, 40),
                Color::Rgb(251, 146, 60),
                Color::Rgb(255, 237, 213),
                Color::Rgb(190, 130, 110),
            ),
            ThemeName::Forest => (
                Color::Rgb(10, 28, 20),
                Color::Rgb(16, 42, 30),
                Color::Rgb(40, 90, 64),
                Color::Rgb(52, 211, 153),
                Color::Rgb(209, 250, 229),
                Color::Rgb(110, 170, 140),
            ),
            ThemeName::Cosmic => (
                Color::Rgb(17, 18, 22),
                Color::Rgb(28, 30, 36),
                Color::Rgb(64, 68, 80),
                Color::Rgb(148, 163, 184),
                Color::Rgb(226, 232, 240),
                Color::Rgb(120, 128, 142),
            ),
            ThemeName::Royal => (
                Color::Rgb(30, 22, 8),
                Color::Rgb(46, 34, 14),
                Color::Rgb(96, 74, 30),
                Color::Rgb(251, 191, 36),
                Color::Rgb(254, 243, 199),
                Color::Rgb(180, 150, 90),
            ),
        };
        Palette {
            bg,
            surface,
            border,
            accent,
            text,
            text_dim,
        }
    }
}

impl std::fmt::Display for ThemeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ThemeName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown theme '{}'. Use: purple, ocean, sunset, forest, cosmic, royal",
                    s
                )
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub bg: Color,
    pub surface: Color,
    pub border: Color,
    pub accent: Color,
    pub text: Color,
    pub text_dim: Color,
}

impl Palette {
    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.bg)
    }

    pub fn surface(&self) -> Style {
        Style::default().fg(self.text).bg(self.surface)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    pub fn bold(&self) -> Style {
        Style::default().fg(self.text).add_modifier(Modifier::BOLD)
    }

    /// Rounded panel; the border takes the accent colour while focused.
    pub fn panel<'a>(&self, title: &'a str, focused: bool) -> Block<'a> {
        Block::default()
            .title(Span::styled(title, self.accent()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if focused { self.accent() } else { self.border() })
            .style(self.surface())
    }
}

pub fn green() -> Style {
    Style::default().fg(GREEN)
}

pub fn amber() -> Style {
    Style::default().fg(AMBER)
}

pub fn red() -> Style {
    Style::default().fg(RED)
}

pub fn heat(intensity: Option<u8>) -> Style {
    let idx = intensity.map(|i| i.clamp(1, 4) as usize).unwrap_or(0);
    Style::default().fg(HEAT[idx])
}
