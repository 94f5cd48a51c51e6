//! Terminal markdown rendering with syntax-highlighted code blocks.
//!
//! `ChatRenderer` combines `termimad` for prose and `syntect` for code block
//! syntax highlighting. While a response streams, `LiveRender` re-renders the
//! accumulated markdown in place after each fragment; the final pass adds
//! syntect highlighting for fenced code.

use std::io::Write;
use std::time::{Duration, Instant};

use syntect::easy::HighlightLines;
use syntect::highlighting::{Style, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::as_24_bit_terminal_escaped;
use termimad::MadSkin;

use super::term::erase_lines;

/// Responses wrap at this column even on wider terminals.
const MAX_RENDER_WIDTH: usize = 79;

fn render_width() -> usize {
    match crossterm::terminal::size() {
        Ok((cols, _)) if cols > 0 => (cols as usize).min(MAX_RENDER_WIDTH),
        _ => MAX_RENDER_WIDTH,
    }
}

/// Terminal markdown renderer with syntax highlighting.
pub struct ChatRenderer {
    skin: MadSkin,
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    width: usize,
}

impl ChatRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();

        // Style inline code
        skin.inline_code
            .set_fg(termimad::crossterm::style::Color::Yellow);

        Self {
            skin,
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            width: render_width(),
        }
    }

    /// Render markdown without code highlighting.
    ///
    /// Used for in-flight partial responses, where fences may still be open.
    pub fn render_markdown(&self, markdown: &str) -> String {
        format!("{}", self.skin.text(markdown, Some(self.width)))
    }

    /// Render a complete markdown response with syntax-highlighted code blocks.
    ///
    /// Code fences with a language tag are highlighted via syntect; everything
    /// else is rendered through termimad.
    pub fn render_final(&self, markdown: &str) -> String {
        let mut output = String::new();
        let mut in_code_block = false;
        let mut code_lang = String::new();
        let mut code_buf = String::new();

        for line in markdown.lines() {
            if line.starts_with("```") && !in_code_block {
                // Opening code fence
                in_code_block = true;
                code_lang = line.trim_start_matches('`').trim().to_string();
                code_buf.clear();
            } else if line.starts_with("```") && in_code_block {
                // Closing code fence -- render the accumulated code
                in_code_block = false;
                let highlighted = self.highlight_code(&code_buf, &code_lang);
                output.push_str(&highlighted);
                output.push('\n');
            } else if in_code_block {
                code_buf.push_str(line);
                code_buf.push('\n');
            } else {
                // Prose line -- render through termimad
                let rendered = self.skin.text(line, Some(self.width));
                output.push_str(&format!("{rendered}"));
            }
        }

        // Handle unclosed code block
        if in_code_block && !code_buf.is_empty() {
            let highlighted = self.highlight_code(&code_buf, &code_lang);
            output.push_str(&highlighted);
        }

        output
    }

    /// Print the stats footer after a response.
    ///
    /// Format: "| {session} . {time}s . {model}"
    pub fn print_stats_footer(&self, session_id: &str, elapsed_secs: f64, model: &str) {
        let footer = format!(
            "\n  {} {} {} {:.1}s {} {}",
            console::style("|").dim(),
            console::style(session_id).dim(),
            console::style("\u{00b7}").dim(),
            console::style(elapsed_secs).dim(),
            console::style("\u{00b7}").dim(),
            console::style(model).dim(),
        );
        println!("{footer}");
    }

    /// Highlight a code block using syntect.
    fn highlight_code(&self, code: &str, lang: &str) -> String {
        let syntax = if lang.is_empty() {
            self.syntax_set.find_syntax_plain_text()
        } else {
            self.syntax_set
                .find_syntax_by_token(lang)
                .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
        };

        let theme = &self.theme_set.themes["base16-ocean.dark"];
        let mut h = HighlightLines::new(syntax, theme);

        let mut output = String::new();
        output.push_str(&format!("  {}\n", console::style(format!("--- {lang} ---")).dim()));

        for line in code.lines() {
            let ranges: Vec<(Style, &str)> = h
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_default();
            let escaped = as_24_bit_terminal_escaped(&ranges[..], false);
            output.push_str(&format!("  {escaped}\x1b[0m\n"));
        }

        output
    }
}

impl Default for ChatRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Redraws a streaming response in place.
///
/// Tracks how many lines the previous draw emitted and erases exactly that
/// many before drawing again, so the response grows in place instead of
/// scrolling. Updates are throttled; `finish` always draws.
pub struct LiveRender {
    lines_drawn: usize,
    last_refresh: Option<Instant>,
    refresh_every: Duration,
}

impl LiveRender {
    pub fn new() -> Self {
        Self::with_refresh(Duration::from_millis(100))
    }

    /// A zero interval disables throttling; tests use this for determinism.
    pub fn with_refresh(refresh_every: Duration) -> Self {
        Self {
            lines_drawn: 0,
            last_refresh: None,
            refresh_every,
        }
    }

    /// Re-render the accumulated markdown, skipping if the last draw was
    /// within the refresh interval.
    pub fn update<W: Write>(
        &mut self,
        out: &mut W,
        renderer: &ChatRenderer,
        markdown: &str,
    ) -> std::io::Result<()> {
        if let Some(last) = self.last_refresh {
            if last.elapsed() < self.refresh_every {
                return Ok(());
            }
        }
        self.redraw(out, &renderer.render_markdown(markdown))
    }

    /// Draw the fully rendered response, replacing whatever is on screen.
    pub fn finish<W: Write>(&mut self, out: &mut W, rendered: &str) -> std::io::Result<()> {
        self.redraw(out, rendered)
    }

    fn redraw<W: Write>(&mut self, out: &mut W, rendered: &str) -> std::io::Result<()> {
        erase_lines(out, self.lines_drawn)?;
        let mut drawn = 0;
        for line in rendered.lines() {
            write!(out, "{line}\r\n")?;
            drawn += 1;
        }
        out.flush()?;
        self.lines_drawn = drawn;
        self.last_refresh = Some(Instant::now());
        Ok(())
    }
}

impl Default for LiveRender {
    fn default() -> Self {
        Self::new()
    }
}
