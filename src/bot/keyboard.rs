//! The main menu and the callbacks its buttons carry.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::config::Config;

/// Text sent together with the menu.
pub const MENU_PROMPT: &str = "Выберите действие:";

/// Buttons that come back to the bot as callback queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Sends the picture.
    ShowImage,
    /// Reads the value cell.
    GetValue,
    /// Starts date entry.
    InputDate,
}

impl MenuAction {
    /// Every menu action, in menu order.
    pub const ALL: [MenuAction; 3] = [
        MenuAction::ShowImage,
        MenuAction::GetValue,
        MenuAction::InputDate,
    ];

    /// Payload carried by the button.
    pub fn callback_data(self) -> &'static str {
        match self {
            MenuAction::ShowImage => "show_image",
            MenuAction::GetValue => "get_a2_value",
            MenuAction::InputDate => "input_date",
        }
    }

    /// `None` for data no menu button sends.
    pub fn from_callback_data(data: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.callback_data() == data)
    }
}

/// Builds the fixed five-button menu. Map and payment buttons are plain links.
pub fn main_menu(config: &Config) -> InlineKeyboardMarkup {
    let rows = vec![
        vec![InlineKeyboardButton::url(
            "Открыть на карте: улица Ленина, дом 1",
            config.map_url.clone(),
        )],
        vec![InlineKeyboardButton::url("Оплатить 2 рубля", config.payment_link.clone())],
        vec![InlineKeyboardButton::callback(
            "Посмотреть картинку",
            MenuAction::ShowImage.callback_data(),
        )],
        vec![InlineKeyboardButton::callback(
            format!("Получить значение ячейки {}", config.value_cell),
            MenuAction::GetValue.callback_data(),
        )],
        vec![InlineKeyboardButton::callback(
            format!("Ввести дату в ячейку {}", config.date_cell),
            MenuAction::InputDate.callback_data(),
        )],
    ];

    InlineKeyboardMarkup::new(rows)
}
