use indicatif::{ProgressBar, ProgressStyle};
use term_size::dimensions;

const PROGRESS_SCALE: u64 = 100;

/// Percentage bar stretched to the terminal width.
pub fn percent_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(PROGRESS_SCALE);

    let term_width = dimensions().map(|(w, _)| w.saturating_sub(2)).unwrap_or(40);
    let bar_width = if term_width > 60 { term_width - 60 } else { 20 };

    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:{bar_width}.cyan/blue}}] {{pos}}% {{msg}}"
            ))
            .expect("Invalid progress bar template.")
            .progress_chars("#>-"),
    );

    pb
}

/// `rN7n7o...6fzRH` style label for logs and prompts.
pub fn shorten_address(address: &str) -> String {
    const HEAD: usize = 6;
    const TAIL: usize = 5;

    if address.len() <= HEAD + TAIL + 3 || !address.is_ascii() {
        return address.to_string();
    }

    format!("{}...{}", &address[..HEAD], &address[address.len() - TAIL..])
}
