use indicatif::{ProgressBar, ProgressStyle};

const TEMPLATE_PROGRESS: &str =
    "[{elapsed_precise}] {msg} {spinner:.green} [{wide_bar:.cyan/blue}] {pos}/{len} eta: {eta}";

pub fn create_progress_bar_count(quiet_mode: bool, msg: &str, length: u64) -> ProgressBar {
    let bar = match quiet_mode {
        true => ProgressBar::hidden(),
        false => ProgressBar::new(length),
    };

    bar.set_message(msg);
    bar.set_style(
        ProgressStyle::default_bar()
            .template(TEMPLATE_PROGRESS)
            .progress_chars("=> "),
    );

    bar.inc(0); // Just to avoid the drawing after the log.

    bar
}
