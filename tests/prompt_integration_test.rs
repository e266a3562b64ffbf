//! End-to-end prompt flows driven by the scripted renderer

use dialogwiz::constants::diagnostics;
use dialogwiz::error::Error;
use dialogwiz::prompt::{
    Answer, CancelAction, CancellationPolicy, DialogController, FileSpec, FormSpec, InputSpec,
    ListSpec, MenuSpec, MessageSpec, PromptSpec, Response, TimeSpec,
};
use dialogwiz::renderer::ScriptedRenderer;
use dialogwiz::types::{Choice, FormElement, MenuItem, TimeOfDay};
use dialogwiz::validation::{ExtensionPolicy, ValidatorKind};
use std::cell::Cell;
use std::fs;
use std::rc::Rc;
use tempfile::TempDir;
use test_log::test;

fn controller(
    renderer: &ScriptedRenderer,
    policy: CancellationPolicy,
) -> DialogController<&ScriptedRenderer> {
    DialogController::new(renderer, policy)
}

#[test]
fn integer_box_retries_until_valid() {
    let renderer = ScriptedRenderer::new().with_text("12a").with_text("7");
    let dialogs = controller(&renderer, CancellationPolicy::RaiseInterrupt);

    let response = dialogs.integer_input_box(&InputSpec::new("Workers")).unwrap();

    assert_eq!(response, Response::Value("7".to_string()));
    let messages = renderer.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].text, diagnostics::INTEGER);
    assert_eq!(messages[0].title, diagnostics::TITLE);
    assert_eq!(messages[0].geometry.width, diagnostics::WIDTH);
}

#[test]
fn decimal_box_retries_until_valid() {
    let renderer = ScriptedRenderer::new().with_text("0.5").with_text("1.5");
    let dialogs = controller(&renderer, CancellationPolicy::RaiseInterrupt);

    let response = dialogs.decimal_input_box(&InputSpec::new("Ratio")).unwrap();

    assert_eq!(response, Response::Value("1.5".to_string()));
    let messages = renderer.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].text, diagnostics::DECIMAL);
    assert_eq!(messages[0].geometry.height, diagnostics::SHORT_HEIGHT);
}

#[test]
fn host_box_retries_until_valid() {
    let renderer = ScriptedRenderer::new()
        .with_text("bad host!")
        .with_text("Example.COM")
        .with_text("localhost");
    let dialogs = controller(&renderer, CancellationPolicy::RaiseInterrupt);

    let response = dialogs.host_input_box(&InputSpec::new("Server")).unwrap();

    assert_eq!(response, Response::Value("localhost".to_string()));
    let messages = renderer.messages();
    assert_eq!(messages.len(), 2);
    assert!(messages.iter().all(|message| message.text == diagnostics::HOST));
    assert_eq!(messages[0].geometry.height, diagnostics::TALL_HEIGHT);
}

#[test]
fn time_box_answers_hour_and_minute_only() {
    let renderer = ScriptedRenderer::new().with_time(TimeOfDay::new(23, 59, 59).unwrap());
    let dialogs = controller(&renderer, CancellationPolicy::RaiseInterrupt);

    let response = dialogs.time_box(&TimeSpec::new("Backup at")).unwrap();

    assert_eq!(response, Response::Value(TimeOfDay::new(23, 59, 0).unwrap()));
}

#[test]
fn host_form_is_accepted_or_rejected_as_a_whole() {
    let renderer = ScriptedRenderer::new()
        .with_values(&["10.0.0.1", "bad host!"])
        .with_values(&["10.0.0.1", "db.example.com"]);
    let dialogs = controller(&renderer, CancellationPolicy::RaiseInterrupt);
    let spec = FormSpec::new(
        "Servers",
        vec![FormElement::new("Primary", ""), FormElement::new("Replica", "")],
    )
    .with_validator(ValidatorKind::Host);

    let response = dialogs.form(&spec).unwrap();

    assert_eq!(
        response.value(),
        Some(vec!["10.0.0.1".to_string(), "db.example.com".to_string()])
    );
    let messages = renderer.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].text, diagnostics::HOST);
    assert_eq!(messages[0].geometry.height, diagnostics::TALL_HEIGHT);
}

#[test]
fn empty_form_field_shows_required_value() {
    let renderer = ScriptedRenderer::new().with_values(&["", "x"]).with_values(&["y", "x"]);
    let dialogs = controller(&renderer, CancellationPolicy::RaiseInterrupt);
    let spec =
        FormSpec::new("Names", vec![FormElement::new("A", ""), FormElement::new("B", "")]);

    dialogs.form(&spec).unwrap();

    assert_eq!(renderer.messages()[0].text, diagnostics::EMPTY_VALUE);
}

#[test]
fn raise_interrupt_stops_on_first_cancel() {
    let renderer = ScriptedRenderer::new().with_cancel().with_text("unused");
    let dialogs = controller(&renderer, CancellationPolicy::RaiseInterrupt);

    let err = dialogs.input_box(&InputSpec::new("Name")).unwrap_err();

    assert!(matches!(err, Error::Interrupted));
    assert_eq!(renderer.remaining(), 1);
}

#[test]
fn sentinel_policy_applies_to_every_kind() {
    let renderer = ScriptedRenderer::new().with_cancel().with_cancel().with_cancel();
    let dialogs = controller(&renderer, CancellationPolicy::sentinel("0"));

    let menu = MenuSpec::new("Pick", vec![MenuItem::new("1", "One")]);
    assert_eq!(dialogs.menu(&menu).unwrap().sentinel(), Some("0"));

    let list = ListSpec::new("Services", vec![Choice::new("ssh", "SSH", false)]);
    assert!(dialogs.check_list(&list).unwrap().is_sentinel());

    let file = FileSpec::new("/etc");
    assert!(dialogs.file_select(&file).unwrap().is_sentinel());
    assert!(renderer.messages().is_empty());
}

#[test]
fn callback_runs_once_per_cancellation_and_can_reprompt() {
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let policy = CancellationPolicy::callback(move || {
        counter.set(counter.get() + 1);
        CancelAction::Reprompt
    });
    let renderer = ScriptedRenderer::new().with_cancel().with_cancel().with_text("eth0");
    let dialogs = controller(&renderer, policy);

    let response = dialogs.input_box(&InputSpec::new("Interface")).unwrap();

    assert_eq!(response, Response::Value("eth0".to_string()));
    assert_eq!(calls.get(), 2);
    assert_eq!(renderer.widgets(), vec!["inputbox", "inputbox", "inputbox"]);
}

#[test]
fn help_re_renders_radio_list_but_cancels_menu() {
    let renderer = ScriptedRenderer::new().with_help().with_text("b").with_help();
    let dialogs = controller(&renderer, CancellationPolicy::sentinel("none"));

    let list = ListSpec::new(
        "Mode",
        vec![Choice::new("a", "Alpha", true), Choice::new("b", "Beta", false)],
    );
    assert_eq!(dialogs.radio_list(&list).unwrap(), Response::Value("b".to_string()));

    let menu = MenuSpec::new("Pick", vec![MenuItem::new("1", "One")]);
    assert_eq!(dialogs.menu(&menu).unwrap(), Response::Sentinel("none".to_string()));
}

#[test]
fn empty_selection_asks_for_one_option() {
    let renderer = ScriptedRenderer::new().with_values(&[]).with_values(&["ftp"]);
    let dialogs = controller(&renderer, CancellationPolicy::RaiseInterrupt);
    let list = ListSpec::new(
        "Services",
        vec![Choice::new("ssh", "SSH", false), Choice::new("ftp", "FTP", false)],
    );

    let response = dialogs.check_list(&list).unwrap();

    assert_eq!(response.value(), Some(vec!["ftp".to_string()]));
    assert_eq!(renderer.messages()[0].text, diagnostics::SELECT_ONE);
    assert_eq!(renderer.messages()[0].geometry.height, diagnostics::SHORT_HEIGHT);
}

#[test]
fn file_select_checks_existence_then_extension() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("app.yaml");
    let notes = dir.path().join("notes.txt");
    fs::write(&config, "a: 1").unwrap();
    fs::write(&notes, "").unwrap();

    let missing = dir.path().join("missing.yaml");
    let renderer = ScriptedRenderer::new()
        .with_text("")
        .with_text(missing.to_str().unwrap())
        .with_text(notes.to_str().unwrap())
        .with_text(config.to_str().unwrap());
    let dialogs = controller(&renderer, CancellationPolicy::RaiseInterrupt);
    let spec = FileSpec::new(dir.path()).with_extensions(ExtensionPolicy::single("yaml"));

    let response = dialogs.file_select(&spec).unwrap();

    assert_eq!(response.value(), Some(config));
    let texts: Vec<String> = renderer.messages().into_iter().map(|m| m.text).collect();
    assert_eq!(
        texts,
        vec![
            "\nInvalid data. Required value: .yaml file.",
            "\nFile doesn't exist. Required value: .yaml file.",
            "\nInvalid extension. Required value: .yaml file.",
        ]
    );
}

#[test]
fn malformed_menu_is_rejected_before_rendering() {
    let renderer = ScriptedRenderer::new().with_text("1");
    let dialogs = controller(&renderer, CancellationPolicy::RaiseInterrupt);

    let duplicate = MenuSpec::new("Pick", vec![MenuItem::new("1", "A"), MenuItem::new("1", "B")]);
    assert!(matches!(dialogs.menu(&duplicate), Err(Error::MalformedPrompt(_))));
    assert!(renderer.widgets().is_empty());
}

#[test]
fn yes_no_and_message_bypass_the_policy() {
    let renderer = ScriptedRenderer::new().with_cancel().with_yes_no(true);
    let dialogs = controller(&renderer, CancellationPolicy::RaiseInterrupt);
    let question = MessageSpec::new("Continue?");

    assert!(!dialogs.yes_no(&question).unwrap());
    assert!(dialogs.yes_no(&question).unwrap());

    let answer = dialogs.prompt(&PromptSpec::Message(MessageSpec::new("Done"))).unwrap();
    assert_eq!(answer, Answer::Shown);
}

#[test]
fn prompt_dispatches_and_wraps_answers() {
    let renderer = ScriptedRenderer::new().with_text("8080").with_cancel();
    let dialogs = controller(&renderer, CancellationPolicy::sentinel("0"));
    let port = PromptSpec::InputBox(InputSpec::new("Port").with_validator(ValidatorKind::Port));

    assert_eq!(dialogs.prompt(&port).unwrap(), Answer::Text("8080".into()));
    assert_eq!(dialogs.prompt(&port).unwrap(), Answer::Sentinel { sentinel: "0".into() });
}
