//! Colour theming consumed by display surfaces. Purely a lookup-by-name
//! contract; the overlay itself attaches no meaning to the tokens.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub trait ThemeProvider: Send + Sync {
    fn colour(&self, token: &str) -> Option<Colour>;
}

/// Fixed accent palette in the style of the game's overlay colour schemes.
pub struct OverlayColourScheme {
    tokens: &'static [(&'static str, Colour)],
}

impl OverlayColourScheme {
    /// The orange scheme the wiki overlay uses.
    pub fn orange() -> Self {
        const TOKENS: &[(&str, Colour)] = &[
            ("accent", Colour { r: 0xff, g: 0xa6, b: 0x2b }),
            ("heading", Colour { r: 0xff, g: 0xc6, b: 0x6f }),
            ("link", Colour { r: 0xff, g: 0xdd, b: 0xaa }),
            ("background", Colour { r: 0x2e, g: 0x22, b: 0x11 }),
        ];
        Self { tokens: TOKENS }
    }
}

impl ThemeProvider for OverlayColourScheme {
    fn colour(&self, token: &str) -> Option<Colour> {
        self.tokens
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, colour)| *colour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tokens_resolve() {
        let scheme = OverlayColourScheme::orange();
        assert!(scheme.colour("accent").is_some());
        assert!(scheme.colour("background").is_some());
        assert_eq!(scheme.colour("no-such-token"), None);
    }
}
