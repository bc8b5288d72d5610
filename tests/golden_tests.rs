//! Golden tests for the terminal facade and screen buffer
//!
//! Each test feeds a byte sequence to the terminal and checks the resulting
//! buffer state.

use termbuffer::core::{Color, Cursor, Line, Snapshot};
use termbuffer::{Config, Terminal};

fn run(input: &[u8], cols: usize, rows: usize) -> Terminal {
    let mut term = Terminal::new(cols, rows);
    term.feed(input);
    term
}

fn run_chunked(input: &[u8], cols: usize, rows: usize, chunk_size: usize) -> Terminal {
    let mut term = Terminal::new(cols, rows);
    for chunk in input.chunks(chunk_size) {
        term.feed(chunk);
    }
    term
}

fn visible_text(term: &Terminal) -> Vec<String> {
    term.buffer().dump(false).iter().map(|l| l.text()).collect()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_erase_to_end_of_line() {
    let term = run(b"AB\x1b[2G\x1b[K", 80, 24);
    assert_eq!(visible_text(&term), vec!["A"]);
    assert_eq!(term.buffer().cell(0, 0).unwrap().ch, 'A');
    assert!(term.buffer().cell(1, 0).is_none());
}

#[test]
fn test_erase_display_then_write() {
    let term = run(b"one\ntwo\nthree\x1b[2JX", 80, 24);

    let lines = term.buffer().dump(false);
    let written: Vec<&&Line> = lines.iter().filter(|l| !l.is_empty()).collect();
    assert_eq!(written.len(), 1);
    assert_eq!(written[0].text().trim(), "X");
}

#[test]
fn test_sgr_color_then_reset() {
    let term = run(b"\x1b[31mZ\x1b[0mY", 80, 24);
    let buffer = term.buffer();

    assert_eq!(buffer.cell(0, 0).unwrap().attributes().fg, Color::Indexed(1));
    assert_eq!(buffer.cell(1, 0).unwrap().attributes().fg, Color::Default);
}

#[test]
fn test_wrap_at_last_column() {
    let mut term = run(b"\x1b[1;80HX", 80, 24);
    // The cursor waits past the last column until the next character
    assert_eq!(term.buffer().cursor(), Cursor::new(80, 0));

    term.feed(b"Y");
    let buffer = term.buffer();
    assert_eq!(buffer.cursor(), Cursor::new(1, 1));
    assert_eq!(buffer.cell(0, 1).unwrap().ch, 'Y');
    assert!(buffer.line(0).unwrap().is_soft());
    assert!(!buffer.line(1).unwrap().is_soft());
}

#[test]
fn test_scroll_region_leaves_outside_rows() {
    let fill: Vec<String> = (0..24).map(|i| format!("r{}", i)).collect();
    let mut term = run(fill.join("\n").as_bytes(), 80, 24);

    term.feed(b"\x1b[3;11r\x1b[11;1H");
    term.feed(b"\n\n\n\n\n\n\n\n\n");

    let text = visible_text(&term);
    assert_eq!(text.len(), 24);
    assert_eq!(text[0], "r0");
    assert_eq!(text[1], "r1");
    for row in &text[2..=10] {
        assert_eq!(row, "");
    }
    for (i, row) in text.iter().enumerate().skip(11) {
        assert_eq!(row, &format!("r{}", i));
    }
    assert!(term.buffer().scrollback().is_empty());
}

#[test]
fn test_erase_display_marks_every_row_changed() {
    let mut term = run(b"one\ntwo\nthree", 80, 24);
    term.buffer_mut().clear_changed_flags();
    term.feed(b"\x1b[2J");

    let rows = term.buffer().dump(false);
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|l| l.is_empty() && l.is_changed()));

    let mut term = run(b"a\nb\nc", 80, 24);
    term.buffer_mut().clear_changed_flags();
    term.feed(b"\x1b[1;1H\x1b[J\x1b[3;1Hz");
    let rows: Vec<(String, bool)> = term
        .buffer()
        .dump(false)
        .iter()
        .map(|l| (l.text(), l.is_changed()))
        .collect();
    assert_eq!(
        rows,
        vec![
            (String::new(), true),
            (String::new(), true),
            ("z".to_string(), true)
        ]
    );
}

#[test]
fn test_large_scroll_count_is_bounded() {
    let term = run(b"hello\x1b[65535S", 80, 24);
    let buffer = term.buffer();
    assert_eq!(buffer.scrollback().len(), 24);
    assert_eq!(buffer.scrollback().get(0).unwrap().text(), "hello");
    assert_eq!(buffer.lines().len(), 24);
}

#[test]
fn test_relative_motion_moves_count_minus_one() {
    let term = run(b"\x1b[10;10H\x1b[3A", 80, 24);
    assert_eq!(term.buffer().cursor(), Cursor::new(9, 7));
}

// ============================================================================
// Attributes
// ============================================================================

#[test]
fn test_consecutive_cells_share_attributes() {
    let term = run(b"\x1b[32mab\x1b[33mc", 80, 24);
    let buffer = term.buffer();

    let a = buffer.cell(0, 0).unwrap();
    let b = buffer.cell(1, 0).unwrap();
    let c = buffer.cell(2, 0).unwrap();
    assert_eq!(a.attributes(), b.attributes());
    assert!(a.shares_attributes_with(b));
    assert_eq!(a.attributes().fg, Color::GREEN);
    assert_eq!(c.attributes().fg, Color::YELLOW);
}

#[test]
fn test_erase_keeps_current_attributes() {
    let term = run(b"\x1b[31mabc\x1b[2K\x1b[1Gxyz", 80, 24);
    let buffer = term.buffer();

    assert_eq!(visible_text(&term), vec!["xyz"]);
    for col in 0..3 {
        assert_eq!(buffer.cell(col, 0).unwrap().attributes().fg, Color::RED);
    }
}

#[test]
fn test_erase_then_rewrite_with_reset() {
    let term = run(b"\x1b[4mhello\x1b[2K\x1b[0m\x1b[1Ghello", 5, 2);
    let buffer = term.buffer();

    assert_eq!(visible_text(&term), vec!["hello"]);
    assert_eq!(
        buffer.cell(4, 0).unwrap().attributes(),
        buffer.default_attributes()
    );
}

// ============================================================================
// Streaming
// ============================================================================

#[test]
fn test_chunked_input_matches_single_feed() {
    let input = "prompt$ ls\r\n\x1b[1;34mdir\x1b[0m  file.txt\r\n\
                 \x1b[5;10H\x1b[7mé─┼\x1b[27m\x1b[2A\x1b[K\tend\x1b(B\x1b[?25l"
        .as_bytes();

    let whole = run(input, 20, 6);
    let expected = Snapshot::from_buffer(whole.buffer(), true);

    for chunk_size in [1, 2, 3, 5, 7, 64] {
        let chunked = run_chunked(input, 20, 6, chunk_size);
        let snapshot = Snapshot::from_buffer(chunked.buffer(), true);
        assert!(
            expected.content_equals(&snapshot),
            "chunk size {} diverged",
            chunk_size
        );
        assert_eq!(expected.cursor, snapshot.cursor);
    }
}

#[test]
fn test_dump_with_scrollback_after_overflow() {
    let term = run(b"1\n2\n3\n4\n5", 10, 3);

    let all: Vec<String> = term.buffer().dump(true).iter().map(|l| l.text()).collect();
    assert_eq!(all, vec!["1", "2", "3", "4", "5"]);
    assert_eq!(visible_text(&term), vec!["3", "4", "5"]);
}

#[test]
fn test_scrollback_limit_keeps_newest() {
    let config = Config {
        cols: 10,
        rows: 2,
        scrollback_limit: Some(2),
        ..Config::default()
    };
    let mut term = Terminal::with_config(&config);
    term.feed(b"a\nb\nc\nd\ne\nf");

    let history: Vec<String> = term.buffer().scrollback().iter().map(|l| l.text()).collect();
    assert_eq!(history, vec!["c", "d"]);
}

#[test]
fn test_resize_round_trip_keeps_text() {
    let mut term = run(b"first line here\nsecond\nthird line", 20, 5);
    term.resize(6, 5);
    term.resize(20, 5);

    let all: Vec<String> = term.buffer().dump(true).iter().map(|l| l.text()).collect();
    assert_eq!(all, vec!["first line here", "second", "third line"]);
}

#[test]
fn test_render_text_locates_cursor() {
    let mut term = run(b"ab\ncd", 10, 3);
    term.buffer_mut().clear_changed_flags();
    term.feed(b"\x1b[1;2Hx");

    assert_eq!(
        term.buffer().render_text(true),
        "   v\n*>ax\n  cd\n   ^"
    );
}
