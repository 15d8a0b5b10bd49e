use ratatui::style::Color;

/// Colors used by the deck, modals and status bar
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub grey0: Color,
    pub grey1: Color,

    // Semantic colors
    pub card_border: Color,
    pub card_grabbing: Color,
    pub hovered: Color,
    pub modal_border: Color,
    pub tooltip: Color,
    pub error: Color,
    pub success: Color,
    pub info: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Gruvbox dark
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg1: Color::Rgb(0x32, 0x30, 0x2f),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            grey0: Color::Rgb(0x7c, 0x6f, 0x64),
            grey1: Color::Rgb(0x92, 0x83, 0x74),
            card_border: Color::Rgb(0x7d, 0xae, 0xa3),
            card_grabbing: Color::Rgb(0xe7, 0x8a, 0x4e),
            hovered: Color::Rgb(0xd8, 0xa6, 0x57),
            modal_border: Color::Rgb(0x89, 0xb4, 0x82),
            tooltip: Color::Rgb(0xd3, 0x86, 0x9b),
            error: Color::Rgb(0xea, 0x69, 0x62),
            success: Color::Rgb(0xa9, 0xb6, 0x65),
            info: Color::Rgb(0x7d, 0xae, 0xa3),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
        }
    }
}
