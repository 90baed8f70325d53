use async_trait::async_trait;
use overlay_core::{
    theme::{Colour, ThemeProvider},
    DisplaySurface, PageView,
};

/// Display surface that renders page views to the terminal, styled with the
/// overlay colour scheme when the output is a tty.
pub struct TerminalDisplay<T: ThemeProvider> {
    theme: T,
    use_colour: bool,
}

impl<T: ThemeProvider> TerminalDisplay<T> {
    pub fn new(theme: T) -> Self {
        let use_colour = std::io::IsTerminal::is_terminal(&std::io::stdout());
        Self { theme, use_colour }
    }

    fn paint(&self, token: &str, text: &str) -> String {
        if !self.use_colour {
            return text.to_string();
        }
        match self.theme.colour(token) {
            Some(Colour { r, g, b }) => format!("\x1b[38;2;{r};{g};{b}m{text}\x1b[0m"),
            None => text.to_string(),
        }
    }
}

#[async_trait]
impl<T: ThemeProvider> DisplaySurface for TerminalDisplay<T> {
    async fn load(&self, view: PageView) -> anyhow::Result<()> {
        match view {
            PageView::Index { markdown } => {
                println!("{}", self.paint("heading", "== wiki index =="));
                println!("{markdown}");
            }
            PageView::Article { url, markdown } => {
                println!("{}", self.paint("link", &url));
                println!("{markdown}");
            }
            PageView::Failure {
                requested_path,
                markdown,
            } => {
                println!(
                    "{}",
                    self.paint("accent", &format!("== failed: {requested_path} =="))
                );
                println!("{markdown}");
            }
        }
        Ok(())
    }
}
