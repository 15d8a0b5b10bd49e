mod modal;
mod status_bar;
mod tooltip;
mod user_deck;

pub use modal::ModalWidget;
pub use status_bar::StatusBarWidget;
pub use tooltip::TooltipWidget;
pub use user_deck::{TaskPanelWidget, UserDeckWidget};
