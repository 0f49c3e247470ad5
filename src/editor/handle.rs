/// Imperative controls the host may hold on to.
pub trait EditorHandle {
    /// Move keyboard focus to the document surface.
    fn focus(&mut self);

    fn toggle_link_dialog(&mut self);

    /// Show or hide the summary area above the document.
    fn toggle_preface(&mut self);
}
