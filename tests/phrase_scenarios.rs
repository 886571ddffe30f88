use phrasing::editor::{EditEvent, TextBuffer};
use phrasing::phrase::{ChunkParser, FormatSession, PhraseChunk};
use phrasing::{Editor, Error};

#[test]
fn camel_phrase_without_surrounding_text() {
    let mut session = FormatSession::new();
    let mut buffer = TextBuffer::new().blind();

    session
        .insert_phrase(&mut buffer, &[PhraseChunk::dictation("hello world")], "camel")
        .unwrap();

    assert_eq!(buffer.inserted_text(), "helloWorld");
}

#[test]
fn snake_phrase_pads_after_identifier() {
    let mut session = FormatSession::new();
    let mut buffer = TextBuffer::with_text("x", "");

    session
        .insert_phrase(&mut buffer, &[PhraseChunk::dictation("my var")], "snake")
        .unwrap();

    assert_eq!(buffer.inserted_text(), "_my_var");
    assert_eq!(buffer.text(), "x_my_var");
}

#[test]
fn mid_phrase_switch_updates_last_used() {
    let mut session = FormatSession::new();
    let mut buffer = TextBuffer::new();

    session
        .insert_phrase(
            &mut buffer,
            &[PhraseChunk::formatter("upper"), PhraseChunk::dictation("shout")],
            "sentence",
        )
        .unwrap();

    assert_eq!(buffer.inserted_text(), "SHOUT");
    assert_eq!(session.last_used(), Some("upper"));
}

#[test]
fn empty_phrase_is_a_no_op() {
    let mut session = FormatSession::new();
    let mut buffer = TextBuffer::with_text("keep", "");

    session.insert_phrase(&mut buffer, &[], "sentence").unwrap();

    assert!(buffer.events().is_empty());
    assert_eq!(buffer.text(), "keep");
    assert_eq!(session.last_used(), None);
}

#[test]
fn unknown_formatter_inserts_nothing() {
    let mut session = FormatSession::new();
    let mut buffer = TextBuffer::new();

    let result = session.format(&mut buffer, "x", "not_a_real_formatter");
    assert!(matches!(
        result,
        Err(Error::UnknownFormatter { ref name }) if name == "not_a_real_formatter"
    ));

    let result = session.insert_phrase(
        &mut buffer,
        &[PhraseChunk::dictation("x")],
        "not_a_real_formatter",
    );
    assert!(result.is_err());
    assert!(buffer.events().is_empty());
}

#[test]
fn previous_repeats_across_phrases() {
    let mut session = FormatSession::new();
    let mut buffer = TextBuffer::new();

    session
        .insert_phrase(&mut buffer, &[PhraseChunk::dictation("max size")], "upper snake")
        .unwrap();
    assert_eq!(session.last_used(), Some("upper snake"));

    session
        .insert_phrase(&mut buffer, &[PhraseChunk::keypress("space")], "lower")
        .unwrap();
    session
        .insert_phrase(&mut buffer, &[PhraseChunk::dictation("Min Size")], "previous")
        .unwrap();

    assert_eq!(session.last_used(), Some("lower"));
    assert_eq!(buffer.text(), "MAX_SIZE min size");
}

#[test]
fn spoken_utterance_end_to_end() {
    let parser = ChunkParser::new();
    let mut session = FormatSession::new();
    let mut buffer = TextBuffer::new();

    let parsed = parser.parse("sentence hello comma world period");
    let directive = parsed.directive.as_deref().unwrap_or("lower");
    session
        .insert_phrase(&mut buffer, &parsed.chunks, directive)
        .unwrap();

    assert_eq!(buffer.text(), "Hello, world.");
}

fn dictate(utterance: &str) -> String {
    let parsed = ChunkParser::new().parse(utterance);
    let mut session = FormatSession::new();
    let mut buffer = TextBuffer::new();
    session
        .insert_phrase(&mut buffer, &parsed.chunks, parsed.directive.as_deref().unwrap())
        .unwrap();
    buffer.text()
}

#[test]
fn spoken_punctuation_joins_words() {
    assert_eq!(dictate("sentence don apostrophe t stop"), "Don't stop");
    assert_eq!(dictate("sentence well dash known"), "Well-known");
    assert_eq!(dictate("sentence mail me at sign home"), "Mail me@home");
}

#[test]
fn spoken_quotes_wrap_words() {
    assert_eq!(dictate("sentence say quote hi quote"), "Say \"hi\"");
    assert_eq!(
        dictate("sentence say quote hi quote again"),
        "Say \"hi\" again"
    );
    assert_eq!(
        dictate("sentence see open paren below close paren"),
        "See (below)"
    );
}

#[test]
fn function_call_leaves_cursor_inside_parens() {
    let parser = ChunkParser::new();
    let mut session = FormatSession::new();
    let mut buffer = TextBuffer::with_text("let n = ", ";");

    let parsed = parser.parse("euler count words");
    session
        .insert_phrase(&mut buffer, &parsed.chunks, parsed.directive.as_deref().unwrap())
        .unwrap();

    assert_eq!(buffer.text(), "let n = count_words();");
    assert_eq!(buffer.cursor(), "let n = count_words(".len());
    assert_eq!(
        buffer.events().last(),
        Some(&EditEvent::Key("left".to_string()))
    );
}

#[test]
fn reformat_last_words() {
    let mut session = FormatSession::new();
    let mut buffer = TextBuffer::with_text("let user name", " = 1");

    session.reformat_left(&mut buffer, "snake", 2).unwrap();

    assert_eq!(buffer.text(), "let user_name = 1");
    assert_eq!(session.last_used(), Some("snake"));
}

#[test]
fn bad_key_rejects_whole_phrase() {
    let mut session = FormatSession::new();
    let mut buffer = TextBuffer::new();

    let result = session.insert_phrase(
        &mut buffer,
        &[PhraseChunk::dictation("typed"), PhraseChunk::keypress("hyper-q")],
        "lower",
    );

    assert!(result.is_err());
    assert!(buffer.events().is_empty());
    assert!(buffer.surrounding_text().is_some());
}
