use crossterm::event::Event;
use ratatui::Frame;
use ratatui::layout::Rect;

pub mod help_overlay;
pub mod markdown;
pub mod note_editor;
pub mod stack_panel;
pub mod status_bar;

pub use help_overlay::HelpOverlay;
pub use note_editor::NoteEditor;
pub use stack_panel::StackPanel;
pub use status_bar::StatusBar;

pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool);

    fn handle_event(&mut self, _event: &Event) -> bool {
        false
    }
}
