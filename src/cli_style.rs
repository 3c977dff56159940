use clap::builder::styling::{AnsiColor, Color, Style};
use clap::builder::Styles;
use crossterm::style::{Attribute, Stylize};
use unicode_width::UnicodeWidthStr;

// ═══════════════════════════════════════════════════════════════════════════════
// Clap Styles
// ═══════════════════════════════════════════════════════════════════════════════

fn ansi(color: AnsiColor) -> Style {
    Style::new().fg_color(Some(Color::Ansi(color)))
}

pub fn get_styles() -> Styles {
    Styles::styled()
        .usage(ansi(AnsiColor::Cyan).bold().underline())
        .header(ansi(AnsiColor::Cyan).bold().underline())
        .literal(ansi(AnsiColor::Green).bold())
        .invalid(ansi(AnsiColor::Red).bold())
        .error(ansi(AnsiColor::Red).bold())
        .valid(ansi(AnsiColor::Green).bold())
        .placeholder(ansi(AnsiColor::BrightBlack))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Palette
// ═══════════════════════════════════════════════════════════════════════════════

/// Colors by role, not by hue.
mod palette {
    use crossterm::style::Color;

    pub const FRAME: Color = Color::Rgb { r: 0, g: 200, b: 220 };
    pub const BANNER: Color = Color::Rgb { r: 180, g: 100, b: 255 };
    pub const SELECTED: Color = Color::Rgb { r: 255, g: 0, b: 255 };
    pub const OK: Color = Color::Rgb { r: 0, g: 255, b: 136 };
    pub const WARN: Color = Color::Rgb { r: 255, g: 165, b: 0 };
    pub const ERR: Color = Color::Rgb { r: 255, g: 85, b: 85 };
    pub const MUTED: Color = Color::Rgb { r: 128, g: 128, b: 128 };
    pub const TEXT: Color = Color::Rgb { r: 255, g: 255, b: 255 };
    pub const BAR: Color = Color::Rgb { r: 0, g: 170, b: 255 };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Frames
// ═══════════════════════════════════════════════════════════════════════════════

struct Frame {
    top: [&'static str; 3],
    middle: [&'static str; 3],
    bottom: [&'static str; 3],
    horizontal: &'static str,
    vertical: &'static str,
}

const ROUNDED: Frame = Frame {
    top: ["╭", "┬", "╮"],
    middle: ["├", "┼", "┤"],
    bottom: ["╰", "┴", "╯"],
    horizontal: "─",
    vertical: "│",
};

const DOUBLE: Frame = Frame {
    top: ["╔", "╦", "╗"],
    middle: ["╠", "╬", "╣"],
    bottom: ["╚", "╩", "╝"],
    horizontal: "═",
    vertical: "║",
};

const BAR_CELL: &str = "█";

impl Frame {
    /// A horizontal rule over columns of the given inner widths.
    fn rule(&self, corners: &[&str; 3], widths: &[usize]) -> String {
        let segments: Vec<String> = widths.iter().map(|w| self.horizontal.repeat(*w)).collect();
        format!("{}{}{}", corners[0], segments.join(corners[1]), corners[2])
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Status Indicators
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_success(message: &str) {
    println!(" {} {}", "✓".with(palette::OK).bold(), message.with(palette::OK));
}

pub fn print_error(message: &str) {
    println!(" {} {}", "✗".with(palette::ERR).bold(), message.with(palette::ERR));
}

pub fn print_warning(message: &str) {
    println!(" {} {}", "⚠".with(palette::WARN).bold(), message.with(palette::WARN));
}

// ═══════════════════════════════════════════════════════════════════════════════
// Sections
// ═══════════════════════════════════════════════════════════════════════════════

const SECTION_WIDTH: usize = 60;

pub fn print_section_header(title: &str) {
    let title_len = title.width() + 2;
    let left = SECTION_WIDTH.saturating_sub(title_len) / 2;
    let right = SECTION_WIDTH.saturating_sub(title_len + left);

    println!();
    println!(
        "{}{}{}",
        format!("{}{}", ROUNDED.top[0], ROUNDED.horizontal.repeat(left)).with(palette::FRAME),
        format!(" {} ", title)
            .with(palette::FRAME)
            .bold()
            .attribute(Attribute::Italic),
        format!("{}{}", ROUNDED.horizontal.repeat(right), ROUNDED.top[2]).with(palette::FRAME),
    );
}

pub fn print_section_footer() {
    println!(
        "{}",
        ROUNDED
            .rule(&ROUNDED.bottom, &[SECTION_WIDTH])
            .with(palette::FRAME)
    );
    println!();
}

pub fn print_key_value(key: &str, value: &str) {
    println!(
        "  {} {} {}",
        "●".with(palette::BANNER),
        format!("{}:", key).with(palette::MUTED),
        value.with(palette::TEXT)
    );
}

/// One dropdown entry, highlighted when it is the current selection.
pub fn print_list_item(item: &str, selected: bool) {
    if selected {
        println!("  {}  {}", "◆".with(palette::SELECTED), item.with(palette::OK).bold());
    } else {
        println!("  {}  {}", "▶".with(palette::FRAME), item.with(palette::TEXT));
    }
}

pub fn print_empty_list(message: &str) {
    println!(
        "  {} {}",
        "○".with(palette::MUTED),
        message.with(palette::MUTED).attribute(Attribute::Italic)
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Bars
// ═══════════════════════════════════════════════════════════════════════════════

/// A horizontal bar proportional to `value / max`, at most `width` cells.
pub fn render_bar(value: f64, max: f64, width: usize) -> String {
    if !(max > 0.0) || !(value > 0.0) {
        return String::new();
    }
    let cells = ((value / max) * width as f64).round() as usize;
    BAR_CELL.repeat(cells.clamp(1, width))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tables
// ═══════════════════════════════════════════════════════════════════════════════

pub struct TableBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
}

impl TableBuilder {
    pub fn new(headers: Vec<&str>) -> Self {
        TableBuilder {
            col_widths: headers.iter().map(|h| h.width()).collect(),
            headers: headers.into_iter().map(String::from).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        for (width, cell) in self.col_widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.width());
        }
        self.rows.push(row);
    }

    fn print_rule(&self, corners: &[&str; 3]) {
        let padded: Vec<usize> = self.col_widths.iter().map(|w| w + 2).collect();
        println!("{}", ROUNDED.rule(corners, &padded).with(palette::FRAME));
    }

    fn print_cells(&self, cells: &[String], header: bool) {
        let separator = ROUNDED.vertical.with(palette::FRAME);
        print!("{}", separator);
        for (i, width) in self.col_widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let padding = " ".repeat(width.saturating_sub(cell.width()));
            if header {
                print!(" {}{} ", cell.with(palette::FRAME).bold(), padding);
            } else if cell.starts_with(BAR_CELL) {
                print!(" {}{} ", cell.with(palette::BAR), padding);
            } else {
                print!(" {}{} ", cell.with(palette::TEXT), padding);
            }
            print!("{}", separator);
        }
        println!();
    }

    pub fn print(&self) {
        if self.col_widths.is_empty() {
            return;
        }
        self.print_rule(&ROUNDED.top);
        self.print_cells(&self.headers, true);
        self.print_rule(&ROUNDED.middle);
        for row in &self.rows {
            self.print_cells(row, false);
        }
        self.print_rule(&ROUNDED.bottom);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Prompt and Welcome
// ═══════════════════════════════════════════════════════════════════════════════

pub fn get_prompt() -> String {
    format!(
        "{}{} ",
        "lyrics".with(palette::BANNER).bold(),
        "❯".with(palette::FRAME).bold(),
    )
}

const WELCOME_WIDTH: usize = 64;

fn print_welcome_line(content: String, visible_len: usize) {
    let side = DOUBLE.vertical.with(palette::BANNER);
    println!(
        "  {}{}{}{}",
        side,
        content,
        " ".repeat(WELCOME_WIDTH.saturating_sub(visible_len)),
        side
    );
}

/// Banner with the corpus location and the given summary lines.
pub fn print_welcome(corpus_path: &str, lines: &[(&str, String)]) {
    println!(
        "  {}",
        DOUBLE
            .rule(&DOUBLE.top, &[WELCOME_WIDTH])
            .with(palette::BANNER)
    );

    let title = "Lyrics corpus loaded";
    print_welcome_line(format!("  {}", title.with(palette::OK)), title.width() + 2);

    let corpus_line = ("Corpus", corpus_path.to_owned());
    for (key, value) in std::iter::once(&corpus_line).chain(lines.iter()) {
        print_welcome_line(
            format!("  {} {}", format!("{}:", key).with(palette::MUTED), value),
            key.width() + value.width() + 4,
        );
    }

    let help = "  Type 'help' for available commands";
    print_welcome_line(help.with(palette::MUTED).to_string(), help.width());

    println!(
        "  {}",
        DOUBLE
            .rule(&DOUBLE.bottom, &[WELCOME_WIDTH])
            .with(palette::BANNER)
    );
    println!();
}
