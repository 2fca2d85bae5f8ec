//! Terminal output
//!
//! Capability detection, markdown rendering and status lines for the REPL
//! and one-shot commands. Styling is dropped automatically when stdout is
//! not a color-capable terminal.

use std::io;
use std::sync::OnceLock;
use std::time::Duration;

use console::{style, Style, Term};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use supports_color::Stream;

use crate::core::explain::{GenerationResult, ValidationReport};

static TERMINAL_CAPS: OnceLock<TerminalCapabilities> = OnceLock::new();

pub fn terminal_caps() -> &'static TerminalCapabilities {
    TERMINAL_CAPS.get_or_init(TerminalCapabilities::detect)
}

// ============================================================================
// Terminal Capability Detection
// ============================================================================

/// What stdout can display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalCapabilities {
    /// Any ANSI color at all
    pub color: bool,
    /// 24-bit color, used as a proxy for OSC 8 hyperlink support
    pub truecolor: bool,
    pub unicode: bool,
    pub interactive: bool,
    pub width: u16,
}

impl TerminalCapabilities {
    pub fn detect() -> Self {
        use is_terminal::IsTerminal;

        let support = supports_color::on(Stream::Stdout);
        let unicode = !env_contains("TERM", "dumb")
            && std::env::var("LANG")
                .map(|lang| lang.to_ascii_lowercase().replace('-', "").contains("utf8"))
                .unwrap_or(true);

        Self {
            color: support.is_some_and(|s| s.has_basic),
            truecolor: support.is_some_and(|s| s.has_16m),
            unicode,
            interactive: io::stdout().is_terminal(),
            width: Term::stdout().size().1,
        }
    }

    /// No color, ASCII only; what pipes and tests get
    pub fn plain() -> Self {
        Self {
            color: false,
            truecolor: false,
            unicode: false,
            interactive: false,
            width: 80,
        }
    }

    pub fn should_colorize(&self) -> bool {
        self.interactive && self.color
    }
}

fn env_contains(var: &str, needle: &str) -> bool {
    std::env::var(var).map(|v| v.contains(needle)).unwrap_or(false)
}

/// Configure miette's fatal-error report to match the terminal.
pub fn install_miette_hook() {
    let caps = terminal_caps();

    miette::set_hook(Box::new(move |_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(caps.truecolor)
                .unicode(caps.unicode)
                .context_lines(3)
                .tab_width(4)
                .break_words(true)
                .color(caps.should_colorize())
                .build(),
        )
    }))
    .ok(); // Ignore if already set
}

// ============================================================================
// Markdown Rendering
// ============================================================================

/// Render model markdown (headings, bold, lists) as terminal text.
///
/// Styling is decided by `caps` alone, independent of console's global
/// color setting.
pub fn render_markdown(markdown: &str, caps: &TerminalCapabilities) -> String {
    let colorize = caps.should_colorize();
    let bold = Style::new().bold().force_styling(colorize);
    let accent = Style::new().cyan().force_styling(colorize);
    let major = Style::new().cyan().bold().force_styling(colorize);

    let mut output = String::new();
    let mut list_depth: usize = 0;
    let mut ordered_index: Vec<Option<u64>> = Vec::new();
    let mut in_heading = false;
    let mut strong_depth: usize = 0;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                if caps.unicode {
                    let marker = match level {
                        HeadingLevel::H1 | HeadingLevel::H2 => major.apply_to("▌"),
                        _ => accent.apply_to("▸"),
                    };
                    output.push_str(&format!("{} ", marker));
                }
                in_heading = true;
            }
            Event::End(TagEnd::Heading(_)) => {
                in_heading = false;
                output.push_str("\n\n");
            }

            Event::Start(Tag::List(start)) => {
                list_depth += 1;
                ordered_index.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                list_depth = list_depth.saturating_sub(1);
                ordered_index.pop();
                if list_depth == 0 {
                    output.push('\n');
                }
            }
            Event::Start(Tag::Item) => {
                let indent = "  ".repeat(list_depth.saturating_sub(1));
                let bullet = match ordered_index.last_mut() {
                    Some(Some(n)) => {
                        let label = format!("{}.", n);
                        *n += 1;
                        label
                    }
                    _ if caps.unicode => "•".to_string(),
                    _ => "*".to_string(),
                };
                output.push_str(&format!("{}{} ", indent, accent.apply_to(bullet)));
            }
            Event::End(TagEnd::Item) => {
                if !output.ends_with('\n') {
                    output.push('\n');
                }
            }

            Event::Start(Tag::Strong) => strong_depth += 1,
            Event::End(TagEnd::Strong) => strong_depth = strong_depth.saturating_sub(1),

            Event::Text(text) => {
                if in_heading || strong_depth > 0 {
                    output.push_str(&bold.apply_to(&*text).to_string());
                } else {
                    output.push_str(&text);
                }
            }
            Event::Code(code) => {
                output.push_str(&accent.apply_to(format!("`{}`", code)).to_string());
            }

            Event::SoftBreak => output.push(' '),
            Event::HardBreak => output.push('\n'),

            Event::End(TagEnd::Paragraph) => {
                // paragraphs inside list items stay tight
                output.push_str(if list_depth > 0 { "\n" } else { "\n\n" });
            }

            _ => {}
        }
    }

    output.trim_end().to_string()
}

// ============================================================================
// Console Output Utilities
// ============================================================================

/// Print a styled panel with title and content
pub fn print_panel(title: &str, content: &str) {
    let caps = terminal_caps();
    let width = (caps.width as usize).clamp(20, 80);

    let (h, tl, tr, bl, br) = if caps.unicode {
        ("─", "╭", "╮", "╰", "╯")
    } else {
        ("-", "+", "+", "+", "+")
    };

    let title_display = format!(" {} ", title);
    let border_len = width
        .saturating_sub(console::measure_text_width(&title_display))
        .saturating_sub(2)
        .max(1);

    println!(
        "{}{}{}{}",
        style(tl).cyan(),
        style(&title_display).cyan().bold(),
        style(h.repeat(border_len)).cyan(),
        style(tr).cyan()
    );
    for line in content.lines() {
        println!("  {}", line);
    }
    println!(
        "{}{}{}",
        style(bl).cyan(),
        style(h.repeat(width.saturating_sub(2).max(1))).cyan(),
        style(br).cyan()
    );
}

fn prefix(unicode: &'static str, ascii: &'static str) -> &'static str {
    if terminal_caps().unicode {
        unicode
    } else {
        ascii
    }
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", style(prefix("✅", "[v]")).green(), style(message).green());
}

/// Print an error message
pub fn print_error(message: &str) {
    println!("{} {}", style(prefix("❌", "[x]")).red(), style(message).red().bold());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!(
        "{} {}",
        style(prefix("⚠️", "[!]")).yellow(),
        style(message).yellow().bold()
    );
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", style(prefix("ℹ️", "(i)")).blue(), style(message).blue());
}

/// Full terminal presentation of one generation result.
pub fn print_result(result: &GenerationResult) {
    let Some(text) = result.text.as_deref().filter(|_| result.success) else {
        print_error(result.error_message.as_deref().unwrap_or("Unknown error"));
        return;
    };

    let title = match result.level {
        Some(level) => format!("Explanation for a {}", level.label()),
        None => "Explanation".to_string(),
    };
    print_panel(&title, &render_markdown(text, terminal_caps()));

    if let Some(words) = result.word_count {
        print_info(&format!("{} words", words));
    }
    if result.validation_passed {
        print_success("Passed structure validation");
    }
    if let Some(warning) = &result.warning {
        print_warning(warning);
        for deficiency in &result.deficiencies {
            println!("   - {}", deficiency);
        }
    }
}

pub fn print_report(report: &ValidationReport) {
    print_info(&format!(
        "Level {}: {} words (expected {})",
        report.level, report.word_count, report.word_range
    ));
    if report.valid {
        print_success("Response passes validation");
    } else {
        print_warning("Response does not validate");
        for deficiency in &report.deficiencies {
            println!("   - {}", deficiency);
        }
    }
}

// ============================================================================
// Progress
// ============================================================================

/// Spinner shown while waiting on the provider; hidden off-terminal.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if !terminal_caps().interactive {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"])
        .template("{spinner:.cyan} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_caps_detection() {
        let caps = TerminalCapabilities::detect();
        assert!(caps.width > 0);
        assert!(!caps.truecolor || caps.color);
    }

    #[test]
    fn test_plain_caps_never_colorize() {
        assert!(!TerminalCapabilities::plain().should_colorize());
    }

    #[test]
    fn test_render_markdown_plain() {
        let markdown = "## 🎯 For Kids\n\nA robot is a **helper**.\n\n- one\n- two\n";
        let rendered = render_markdown(markdown, &TerminalCapabilities::plain());

        assert!(rendered.contains("🎯 For Kids"));
        assert!(rendered.contains("A robot is a helper."));
        assert!(rendered.contains("* one\n* two"));
        assert!(!rendered.contains("**"));
        assert!(!rendered.contains('\u{1b}'));
    }

    #[test]
    fn test_heading_stays_bold_after_inline_strong() {
        let caps = TerminalCapabilities {
            color: true,
            truecolor: false,
            unicode: false,
            interactive: true,
            width: 80,
        };
        let bold = Style::new().bold().force_styling(true);

        let rendered = render_markdown("## **Big** idea\n\nplain body\n", &caps);

        assert!(rendered.contains(&bold.apply_to("Big").to_string()));
        assert!(rendered.contains(&bold.apply_to(" idea").to_string()));
        assert!(rendered.contains("plain body"));
        assert!(!rendered.contains(&bold.apply_to("plain body").to_string()));
    }

    #[test]
    fn test_render_ordered_list() {
        let rendered = render_markdown("1. first\n2. second\n", &TerminalCapabilities::plain());
        assert!(rendered.contains("1. first"));
        assert!(rendered.contains("2. second"));
    }
}
