// Presentation layer: console rendering of gateway outcomes plus the page's cosmetic helpers.

pub mod console;
pub mod counter;
pub mod toast;

pub use console::ConsolePresenter;
pub use counter::CounterAnimation;
pub use toast::{Toast, ToastSlot};
