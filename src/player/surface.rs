use crate::catalog::Track;

/// Display targets the player writes to but does not own: the track list,
/// title and time labels, the progress bar, the play/pause indicator and
/// user notifications.
pub trait PlayerSurface {
    /// Build the track list once, in catalog order.
    fn render_tracklist(&mut self, tracks: &[Track]);
    /// Mark `index` as the only active track list item.
    fn mark_active(&mut self, index: usize);
    fn set_title(&mut self, title: &str);
    fn set_duration_label(&mut self, text: &str);
    fn set_elapsed_label(&mut self, text: &str);
    /// Progress bar fill in `[0, 1]`.
    fn set_progress(&mut self, fraction: f64);
    fn set_playing(&mut self, playing: bool);
    /// Show a message the user has to acknowledge.
    fn notify(&mut self, message: &str);
}
