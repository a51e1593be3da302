use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Spinner for a single check. Drawn on stderr and hidden when stderr is not a
/// terminal. It is ticked by hand, so no background thread is started.
pub fn stage_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner} {msg}")
            .expect("invalid spinner template"),
    );
    pb.set_message(message.to_string());
    pb.tick();
    pb
}

/// Spinners are transient here: the report carries the outcome.
pub fn finish_spinner(pb: &ProgressBar) {
    pb.finish_and_clear();
}
