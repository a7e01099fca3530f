//! Custom dialoguer theme and banner for the tagging session.

use console::{style, Style};
use dialoguer::theme::ColorfulTheme;

/// Returns a `ColorfulTheme` configured with tagdeck's visual identity.
///
/// - Prompt prefix: cyan `?`
/// - Active item indicator: cyan `▸`
/// - Checked tag: green `[x]`
pub fn tagdeck_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("?".to_string()).for_stderr().cyan(),
        prompt_style: Style::new().for_stderr().bold(),
        prompt_suffix: style("›".to_string()).for_stderr().bright().black(),
        active_item_prefix: style("▸".to_string()).for_stderr().cyan(),
        active_item_style: Style::new().for_stderr().cyan(),
        checked_item_prefix: style("[x]".to_string()).for_stderr().green(),
        unchecked_item_prefix: style("[ ]".to_string()).for_stderr().dim(),
        success_prefix: style("✓".to_string()).for_stderr().green(),
        error_prefix: style("✗".to_string()).for_stderr().red(),
        error_style: Style::new().for_stderr().red(),
        values_style: Style::new().for_stderr().green(),
        ..ColorfulTheme::default()
    }
}

/// Prints the tagdeck banner to stderr.
pub fn print_banner() {
    let version_line = format!("tagdeck v{}", tagdeck_core::VERSION);
    let tagline = "multi-label image tagging";

    let inner_width = tagline.len() + 4;

    let top = format!("  ╔{:═<width$}╗", "", width = inner_width);
    let mid1 = format!("  ║{:^width$}║", version_line, width = inner_width);
    let mid2 = format!("  ║{:^width$}║", tagline, width = inner_width);
    let bot = format!("  ╚{:═<width$}╝", "", width = inner_width);

    let cyan = Style::new().for_stderr().cyan();

    eprintln!();
    for line in [top, mid1, mid2, bot] {
        eprintln!("{}", cyan.apply_to(line));
    }
    eprintln!();
}

/// Print a red error line. Used for rejected operations that keep the
/// session running.
pub fn print_error(message: impl std::fmt::Display) {
    let err = Style::new().for_stderr().red();
    eprintln!("  {} {message}", err.apply_to("✗"));
}

/// Print a green confirmation line.
pub fn print_success(message: impl std::fmt::Display) {
    let ok = Style::new().for_stderr().green();
    eprintln!("  {} {message}", ok.apply_to("✓"));
}
