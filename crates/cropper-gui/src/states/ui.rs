use std::path::PathBuf;

const MAX_LOG_MESSAGES: usize = 200;

#[derive(Default)]
pub struct UIState {
    /// Source image of the current session.
    pub file_path: Option<PathBuf>,
    pub log_messages: Vec<String>,
    pub show_about: bool,
    /// Crop size edited in the side panel, applied on demand.
    pub pending_clip: Option<[f64; 2]>,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
        if self.log_messages.len() > MAX_LOG_MESSAGES {
            let excess = self.log_messages.len() - MAX_LOG_MESSAGES;
            self.log_messages.drain(..excess);
        }
    }
}
