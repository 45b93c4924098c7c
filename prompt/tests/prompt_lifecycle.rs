// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Drive whole prompts through their public API, with mock devices standing in for the
//! terminal.

use std::{sync::Arc, time::Duration};

use pretty_assertions::assert_eq;
use r3bl_prompt::{AbortController, Action, AliasRegistry, ConfirmOptions, ConfirmPrompt,
                  InputDevice, InputDeviceExtMock, KeyPress, MultiSelectOptions,
                  MultiSelectPrompt, OutputDevice, OutputDeviceExt, PasswordOptions,
                  PasswordPrompt, PromptEvent, PromptEventKind, PromptIo, PromptResult,
                  PromptState, SelectOption, SelectOptions, SelectPrompt, Size, SpecialKey,
                  StdMutex, StdoutMock, TextOptions, TextPrompt, is_cancel, key_press,
                  validator};
use serial_test::serial;
use smallvec::smallvec;

fn mock_io(keys: impl IntoIterator<Item = KeyPress>) -> (PromptIo, StdoutMock) {
    let (output_device, stdout_mock) = OutputDevice::new_mock();
    let io = PromptIo {
        output_device,
        input_device: Some(InputDevice::new_mock_key_presses(keys)),
        aliases: Some(AliasRegistry::new()),
        ..Default::default()
    };
    (io, stdout_mock)
}

fn required() -> r3bl_prompt::Validator<String> {
    validator(|value: Option<&String>| match value {
        Some(value) if !value.is_empty() => Ok(()),
        _ => Err("required".into()),
    })
}

#[tokio::test]
async fn test_text_abc_enter() {
    let (io, _) = mock_io([
        key_press!(@char 'a'),
        key_press!(@char 'b'),
        key_press!(@char 'c'),
        key_press!(@special SpecialKey::Enter),
    ]);
    let mut text = TextPrompt::new(TextOptions {
        message: "Name".into(),
        initial_value: Some(String::new()),
        io,
        ..Default::default()
    });

    let result = text.inner_mut().prompt().await.unwrap();
    assert_eq!(result, PromptResult::Submit(Some("abc".to_string())));
    assert_eq!(text.inner().state(), PromptState::Submit);
}

#[tokio::test]
async fn test_select_down_down_up_enter() {
    let (io, _) = mock_io([
        key_press!(@special SpecialKey::Down),
        key_press!(@special SpecialKey::Down),
        key_press!(@special SpecialKey::Up),
        key_press!(@special SpecialKey::Enter),
    ]);
    let mut select = SelectPrompt::new(SelectOptions {
        message: "Pick".into(),
        options: [1, 2, 3].into_iter().map(SelectOption::from).collect(),
        io,
        ..Default::default()
    });

    let result = select.inner_mut().prompt().await.unwrap();
    assert_eq!(select.inner().core().cursor, 1);
    assert_eq!(result, PromptResult::Submit(Some(2)));
}

#[tokio::test]
async fn test_ctrl_c_cancels_every_prompt() {
    let ctrl_c = || [key_press!(@char 'x'), KeyPress::ctrl('c')];

    let (io, _) = mock_io(ctrl_c());
    let result = TextPrompt::new(TextOptions {
        io,
        ..Default::default()
    })
    .prompt()
    .await
    .unwrap();
    assert!(is_cancel(&result));

    let (io, _) = mock_io(ctrl_c());
    let result = PasswordPrompt::new(PasswordOptions {
        io,
        ..Default::default()
    })
    .prompt()
    .await
    .unwrap();
    assert!(is_cancel(&result));

    let (io, _) = mock_io([KeyPress::ctrl('c')]);
    let result = ConfirmPrompt::new(ConfirmOptions {
        io,
        ..Default::default()
    })
    .prompt()
    .await
    .unwrap();
    assert!(is_cancel(&result));

    let (io, _) = mock_io(ctrl_c());
    let result = SelectPrompt::new(SelectOptions {
        options: vec![SelectOption::from("a")],
        io,
        ..Default::default()
    })
    .prompt()
    .await
    .unwrap();
    assert!(is_cancel(&result));

    let (io, _) = mock_io(ctrl_c());
    let result = MultiSelectPrompt::new(MultiSelectOptions {
        options: vec![SelectOption::from("a")],
        io,
        ..Default::default()
    })
    .prompt()
    .await
    .unwrap();
    assert!(is_cancel(&result));
}

#[tokio::test]
async fn test_cancel_wins_over_failing_validation() {
    let (io, _) = mock_io([
        key_press!(@char 'x'),
        key_press!(@special SpecialKey::Enter),
        key_press!(@special SpecialKey::Esc),
    ]);
    let mut text = TextPrompt::new(TextOptions {
        validate: Some(validator(|_: Option<&String>| Err("never".into()))),
        io,
        ..Default::default()
    });

    let result = text.inner_mut().prompt().await.unwrap();
    assert!(result.is_cancel());
    assert_eq!(text.inner().state(), PromptState::Cancel);
}

#[test]
fn test_required_then_recover() {
    let (io, _) = mock_io([]);
    let mut text = TextPrompt::new(TextOptions {
        validate: Some(required()),
        io,
        ..Default::default()
    });

    text.inner_mut()
        .handle_keypress(key_press!(@special SpecialKey::Enter))
        .unwrap();
    assert_eq!(text.inner().state(), PromptState::Error);
    assert_eq!(text.inner().core().error, "required");

    text.inner_mut().handle_keypress(key_press!(@char 'x')).unwrap();
    assert_eq!(text.inner().state(), PromptState::Active);
    text.inner_mut()
        .handle_keypress(key_press!(@special SpecialKey::Enter))
        .unwrap();
    assert_eq!(text.inner().state(), PromptState::Submit);
    assert_eq!(text.inner().core().value.as_deref(), Some("x"));
}

#[tokio::test]
async fn test_tab_completes_placeholder() {
    let (io, _) = mock_io([
        key_press!(@special SpecialKey::Tab),
        key_press!(@special SpecialKey::Enter),
    ]);
    let mut text = TextPrompt::new(TextOptions {
        placeholder: Some("foo".into()),
        io,
        ..Default::default()
    });
    let values = Arc::new(StdMutex::new(vec![]));
    let values_clone = values.clone();
    text.inner_mut().on(PromptEventKind::Value, move |event, _| {
        if let PromptEvent::Value(value) = event {
            values_clone.lock().unwrap().push(value.clone());
        }
    });

    assert_eq!(
        text.prompt().await.unwrap(),
        PromptResult::Submit("foo".to_string())
    );
    assert_eq!(*values.lock().unwrap(), vec!["foo".to_string()]);
}

#[test]
fn test_same_frame_is_not_written_twice() {
    let (io, stdout_mock) = mock_io([]);
    let mut text = TextPrompt::new(TextOptions {
        message: "Name".into(),
        io,
        ..Default::default()
    });
    let size = Size {
        col_count: 80,
        row_count: 20,
    };

    text.inner_mut().handle_resize(size).unwrap();
    let after_first_paint = stdout_mock.get_copy_of_buffer();
    assert!(!after_first_paint.is_empty());

    text.inner_mut().handle_resize(size).unwrap();
    assert_eq!(stdout_mock.get_copy_of_buffer(), after_first_paint);
}

#[tokio::test]
async fn test_abort_while_active() {
    let controller = AbortController::new();
    let (output_device, stdout_mock) = OutputDevice::new_mock();
    let select = SelectPrompt::new(SelectOptions {
        options: vec![SelectOption::from("a"), SelectOption::from("b")],
        io: PromptIo {
            output_device,
            input_device: Some(InputDevice::new_mock_then_pending(smallvec![])),
            abort_signal: Some(controller.signal()),
            aliases: Some(AliasRegistry::new()),
            ..Default::default()
        },
        ..Default::default()
    });

    let (result, ()) = tokio::join!(select.prompt(), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        controller.abort();
    });

    assert!(result.unwrap().is_cancel());
    // The prompt was painted, then torn down.
    assert!(
        stdout_mock
            .get_copy_of_buffer_as_string()
            .ends_with("\n\x1b[?25h")
    );
}

#[test]
#[serial]
fn test_global_aliases_do_not_override_defaults() {
    let global = AliasRegistry::global();
    global.set_aliases([
        (key_press!(@char 'k'), Action::Down),
        (key_press!(@char 'w'), Action::Up),
    ]);
    assert_eq!(global.resolve(&key_press!(@char 'k')), Some(Action::Up));
    assert_eq!(global.resolve(&key_press!(@char 'w')), Some(Action::Up));
    assert_eq!(
        AliasRegistry::global().resolve(&key_press!(@char 'w')),
        Some(Action::Up)
    );
}
