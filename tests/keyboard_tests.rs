mod common;

use sheets_menu_bot::bot::keyboard::{main_menu, MenuAction};
use teloxide::types::InlineKeyboardButtonKind;

#[test]
fn test_menu_has_five_single_button_rows() {
    let menu = main_menu(&common::test_config());
    assert_eq!(menu.inline_keyboard.len(), 5);
    assert!(menu.inline_keyboard.iter().all(|row| row.len() == 1));
}

#[test]
fn test_menu_buttons_in_order() {
    let config = common::test_config();
    let menu = main_menu(&config);
    let buttons: Vec<_> = menu.inline_keyboard.iter().map(|row| &row[0]).collect();

    assert_eq!(buttons[0].text, "Открыть на карте: улица Ленина, дом 1");
    match &buttons[0].kind {
        InlineKeyboardButtonKind::Url(url) => {
            assert_eq!(url.host_str(), Some("yandex.ru"));
            assert_eq!(url.path(), "/maps/");
            let text = url.query_pairs().find(|(k, _)| k == "text").map(|(_, v)| v.into_owned());
            assert_eq!(text.as_deref(), Some("Ленина 1"));
        }
        other => panic!("map button should be a link, got {other:?}"),
    }

    assert_eq!(buttons[1].text, "Оплатить 2 рубля");
    assert_eq!(buttons[1].kind, InlineKeyboardButtonKind::Url(config.payment_link.clone()));

    let expected = [
        ("Посмотреть картинку", "show_image"),
        ("Получить значение ячейки A2", "get_a2_value"),
        ("Ввести дату в ячейку B2", "input_date"),
    ];
    for (button, (label, data)) in buttons[2..].iter().zip(expected) {
        assert_eq!(button.text, label);
        assert_eq!(button.kind, InlineKeyboardButtonKind::CallbackData(data.to_string()));
    }
}

#[test]
fn test_menu_is_stable() {
    let config = common::test_config();
    assert_eq!(main_menu(&config), main_menu(&config));
}

#[test]
fn test_callback_data_round_trips() {
    for action in MenuAction::ALL {
        assert_eq!(MenuAction::from_callback_data(action.callback_data()), Some(action));
    }
}

#[test]
fn test_unknown_callback_data() {
    assert_eq!(MenuAction::from_callback_data("settings:open"), None);
    assert_eq!(MenuAction::from_callback_data(""), None);
    assert_eq!(MenuAction::from_callback_data("show_image "), None);
}
