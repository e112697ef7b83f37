//! UI Components

mod board_view;
mod card_view;
mod column_view;
mod new_card_form;

pub use board_view::BoardView;
pub use card_view::CardView;
pub use column_view::ColumnView;
pub use new_card_form::NewCardForm;
