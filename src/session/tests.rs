use crate::editor::{PromptKind, PromptResponse, ToolbarCommand};
use crate::history::HistoryState;
use crate::render::{RenderOptions, Renderer};

use super::{
    EXPORT_FILE_NAME, EXPORT_MIME, Effect, KeyChord, Message, NEW_FILE_CONFIRMATION, Orientation,
    STARTER_DOCUMENT, Session, shortcut, update,
};

fn create_test_session() -> Session {
    Session::new("# Test\n\nHello world")
}

fn run(session: Session, messages: impl IntoIterator<Item = Message>) -> Session {
    messages.into_iter().fold(session, update)
}

#[test]
fn test_new_session_renders_and_records_initial_text() {
    let session = create_test_session();
    assert!(session.preview.html.contains(r#"<h1 id="test">Test</h1>"#));
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.history().state(), HistoryState::AtHead);
}

#[test]
fn test_starter_document_renders_toc_and_math() {
    let session = Session::with_starter();
    assert_eq!(session.text(), STARTER_DOCUMENT);
    let html = &session.preview.html;
    assert!(html.starts_with(r#"<div class="toc">"#));
    assert!(html.contains(r#"<li class="task-list-item"><input type="checkbox" checked disabled>"#));
    assert!(html.contains("$E=mc^2$"));
    assert!(html.contains(r#"<div class="code-block-wrapper">"#));
    assert!(html.contains("<table>"));
    assert!(session.preview.toc.len() >= 10);
}

#[test]
fn test_input_rerenders_and_records() {
    let session = update(create_test_session(), Message::Input("## Changed".to_string()));
    assert_eq!(session.preview.html, "<h2 id=\"changed\">Changed</h2>\n");
    assert_eq!(session.history().len(), 2);
}

#[test]
fn test_identical_input_is_not_recorded_twice() {
    let session = run(
        create_test_session(),
        [
            Message::Input("same".to_string()),
            Message::Input("same".to_string()),
        ],
    );
    assert_eq!(session.history().len(), 2);
}

#[test]
fn test_typing_inserts_at_selection() {
    let session = run(
        Session::new("Hello world"),
        [
            Message::Select(6, 11),
            Message::Type("there".to_string()),
        ],
    );
    assert_eq!(session.text(), "Hello there");
    assert_eq!(session.preview.html, "<p>Hello there</p>\n");
}

#[test]
fn test_backspace_at_start_records_nothing() {
    let session = run(Session::new("abc"), [Message::Select(0, 0), Message::Backspace]);
    assert_eq!(session.text(), "abc");
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_undo_restores_without_recording() {
    let session = run(
        Session::new("a"),
        [
            Message::Input("ab".to_string()),
            Message::Input("abc".to_string()),
            Message::Undo,
        ],
    );
    assert_eq!(session.text(), "ab");
    assert_eq!(session.preview.html, "<p>ab</p>\n");
    assert_eq!(session.history().len(), 3);
    assert_eq!(session.history().state(), HistoryState::MidStack);
}

#[test]
fn test_undo_then_redo_round_trips() {
    let session = run(
        Session::new("a"),
        [Message::Input("ab".to_string()), Message::Undo, Message::Redo],
    );
    assert_eq!(session.text(), "ab");
    assert_eq!(session.history().state(), HistoryState::AtHead);
}

#[test]
fn test_undo_past_oldest_is_noop() {
    let session = run(Session::new("a"), [Message::Undo, Message::Undo]);
    assert_eq!(session.text(), "a");
    assert_eq!(session.history().cursor(), Some(0));
}

#[test]
fn test_edit_after_undo_prunes_redo_branch() {
    let session = run(
        Session::new("a"),
        [
            Message::Input("ab".to_string()),
            Message::Input("abc".to_string()),
            Message::Undo,
            Message::Undo,
            Message::Input("ax".to_string()),
            Message::Redo,
        ],
    );
    assert_eq!(session.text(), "ax");
    assert_eq!(session.history().len(), 2);
    assert!(!session.history().can_redo());
}

#[test]
fn test_history_limit_from_options() {
    let mut session = Session::with_options("0", Renderer::new(RenderOptions::default()), 3);
    for i in 1..10 {
        session = update(session, Message::Input(i.to_string()));
    }
    assert_eq!(session.history().len(), 3);
    let entries: Vec<_> = session.history().entries().cloned().collect();
    assert_eq!(entries, vec!["7", "8", "9"]);
}

#[test]
fn test_toolbar_bold_wraps_and_records() {
    let session = run(
        Session::new("make loud"),
        [Message::Select(5, 9), Message::Toolbar(ToolbarCommand::Bold)],
    );
    assert_eq!(session.text(), "make **loud**");
    assert_eq!(session.buffer.selected_text(), "loud");
    assert_eq!(session.preview.html, "<p>make <strong>loud</strong></p>\n");
    assert_eq!(session.history().len(), 2);
}

#[test]
fn test_toolbar_heading_zero_changes_nothing() {
    let session = update(
        create_test_session(),
        Message::Toolbar(ToolbarCommand::Heading(0)),
    );
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_link_prompt_flow() {
    let mut session = run(
        Session::new("docs"),
        [Message::Select(0, 4), Message::Toolbar(ToolbarCommand::Link)],
    );
    assert!(session.is_waiting());
    let effects = session.take_effects();
    let [Effect::Prompt(request)] = effects.as_slice() else {
        panic!("expected one prompt, got {effects:?}");
    };
    assert_eq!(request.kind, PromptKind::LinkUrl);
    assert_eq!(request.default, "https://");

    let session = update(
        session,
        Message::PromptAnswered(PromptResponse::Answered("https://x.y".to_string())),
    );
    assert!(!session.is_waiting());
    assert_eq!(session.text(), "[docs](https://x.y)");
    assert!(session.preview.html.contains(r#"<a href="https://x.y">docs</a>"#));
}

#[test]
fn test_edits_wait_for_open_prompt() {
    let session = run(
        Session::new("hello world"),
        [
            Message::Select(6, 11),
            Message::Toolbar(ToolbarCommand::Link),
            Message::Input("xy".to_string()),
            Message::Type("!".to_string()),
            Message::Backspace,
            Message::Undo,
            Message::Import(Some("other".to_string())),
        ],
    );
    assert!(session.is_waiting());
    assert_eq!(session.text(), "hello world");
    assert_eq!(session.history().len(), 1);

    let session = update(
        session,
        Message::PromptAnswered(PromptResponse::Answered("u".to_string())),
    );
    assert_eq!(session.text(), "hello [world](u)");
}

#[test]
fn test_view_messages_pass_while_confirm_is_open() {
    let session = run(
        create_test_session(),
        [
            Message::NewFile,
            Message::IncreaseFontSize,
            Message::Input("changed".to_string()),
        ],
    );
    assert!(session.is_waiting());
    assert_eq!(session.font_size.px(), 16);
    assert_eq!(session.text(), "# Test\n\nHello world");

    let session = update(session, Message::ConfirmAnswered(true));
    assert!(!session.is_waiting());
    assert_eq!(session.text(), "");
}

#[test]
fn test_cancelled_prompt_inserts_nothing() {
    let session = run(
        Session::new("docs"),
        [
            Message::Toolbar(ToolbarCommand::Image),
            Message::PromptAnswered(PromptResponse::Cancelled),
        ],
    );
    assert_eq!(session.text(), "docs");
    assert!(!session.is_waiting());
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_unsolicited_prompt_answer_is_ignored() {
    let session = update(
        create_test_session(),
        Message::PromptAnswered(PromptResponse::Answered("https://x.y".to_string())),
    );
    assert_eq!(session.text(), "# Test\n\nHello world");
}

#[test]
fn test_new_file_requires_confirmation() {
    let mut session = update(create_test_session(), Message::NewFile);
    assert_eq!(
        session.take_effects(),
        vec![Effect::Confirm {
            message: NEW_FILE_CONFIRMATION
        }]
    );

    let session = update(session, Message::ConfirmAnswered(false));
    assert_eq!(session.text(), "# Test\n\nHello world");
    assert!(!session.is_waiting());
}

#[test]
fn test_confirmed_new_file_clears_and_resets_history() {
    let session = run(
        create_test_session(),
        [
            Message::Input("more".to_string()),
            Message::NewFile,
            Message::ConfirmAnswered(true),
        ],
    );
    assert_eq!(session.text(), "");
    assert_eq!(session.preview.html, "");
    assert_eq!(session.history().len(), 1);
    assert!(!session.history().can_undo());
}

#[test]
fn test_confirm_without_request_is_ignored() {
    let session = update(create_test_session(), Message::ConfirmAnswered(true));
    assert_eq!(session.text(), "# Test\n\nHello world");
}

#[test]
fn test_import_replaces_document_and_history() {
    let session = run(
        create_test_session(),
        [
            Message::Input("edit".to_string()),
            Message::Import(Some("# Imported".to_string())),
        ],
    );
    assert_eq!(session.text(), "# Imported");
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.preview.toc.len(), 1);
}

#[test]
fn test_import_without_file_is_noop() {
    let session = update(create_test_session(), Message::Import(None));
    assert_eq!(session.text(), "# Test\n\nHello world");
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_export_emits_download() {
    let mut session = update(Session::new("naïve"), Message::Export);
    assert_eq!(
        session.take_effects(),
        vec![Effect::Download {
            file_name: EXPORT_FILE_NAME,
            mime: EXPORT_MIME,
            bytes: "naïve".as_bytes().to_vec(),
        }]
    );
    assert!(session.take_effects().is_empty());
}

#[test]
fn test_export_marks_buffer_clean() {
    let session = update(create_test_session(), Message::Input("edited".to_string()));
    assert!(session.buffer.is_dirty());
    let session = update(session, Message::Export);
    assert!(!session.buffer.is_dirty());
}

#[test]
fn test_font_size_messages() {
    let session = run(
        create_test_session(),
        [Message::IncreaseFontSize, Message::IncreaseFontSize],
    );
    assert_eq!(session.font_size.px(), 18);
    let session = run(session, std::iter::repeat_n(Message::DecreaseFontSize, 10));
    assert_eq!(session.font_size.px(), 10);
}

#[test]
fn test_layout_messages() {
    let session = run(
        create_test_session(),
        [
            Message::ViewportResized(600),
            Message::ResizeSplit {
                proposed: 400.0,
                container: 1000.0,
            },
            Message::ResizeSplit {
                proposed: 50.0,
                container: 1000.0,
            },
        ],
    );
    assert_eq!(session.layout.orientation(), Orientation::Vertical);
    assert!((session.layout.preview_percent() - 40.0).abs() < 1e-9);
}

#[test]
fn test_shortcut_drives_update() {
    let session = Session::new("a");
    let session = update(session, Message::Input("ab".to_string()));
    let msg = shortcut(KeyChord::new('z').ctrl()).unwrap();
    let session = update(session, msg);
    assert_eq!(session.text(), "a");
}
