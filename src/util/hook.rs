use crate::ui::tui;

/// Leaves the alternate screen before the default hook prints the panic,
/// otherwise the report is swallowed by the raw-mode terminal.
pub fn set_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::Tui::restore();
        hook(panic_info);
    }));
}
