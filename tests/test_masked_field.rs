use rat_textmask::bulk_replace::{KeepDigits, StripChars};
use rat_textmask::event::TextOutcome;
use rat_textmask::{FieldDelegate, MaskError, MaskedFieldState, MaskedValue};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;

static LOGGING: Once = Once::new();

fn setup_logging() -> Result<(), anyhow::Error> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("{} {}", record.level(), message)) //
        })
        .level(log::LevelFilter::Debug)
        .chain(std::io::stdout())
        .apply()?;
    Ok(())
}

fn phone() -> MaskedFieldState {
    LOGGING.call_once(|| {
        _ = setup_logging();
    });

    MaskedFieldState::new()
        .with_pattern(" ___/___/___", "_")
        .expect("pattern")
        .with_prefix("+68")
        .with_allowed_characters(["/"])
}

#[test]
fn test_initial() {
    let s = phone();
    assert_eq!(s.text(), "+68 ___/___/___");
    assert_eq!(s.raw_text(), "+68");
    assert_eq!(s.cursor(), 4);
    assert_eq!(s.len(), 15);
    assert!(!s.is_empty());
    assert!(!s.is_finished());
}

#[test]
fn test_typing() {
    let mut s = phone();

    assert_eq!(s.insert_char('1'), TextOutcome::TextChanged);
    assert_eq!(s.text(), "+68 1__/___/___");
    assert_eq!(s.cursor(), 5);

    assert_eq!(s.insert_char('2'), TextOutcome::TextChanged);
    assert_eq!(s.text(), "+68 12_/___/___");
    assert_eq!(s.cursor(), 6);

    s.insert_char('3');
    assert_eq!(s.text(), "+68 123/___/___");
    assert_eq!(s.cursor(), 8);

    for c in "456789".chars() {
        s.insert_char(c);
    }
    assert_eq!(s.text(), "+68 123/456/789");
    assert_eq!(s.cursor(), 15);
    assert!(s.is_finished());

    // full, accepted but nothing happens.
    assert_eq!(s.insert_char('0'), TextOutcome::TextChanged);
    assert_eq!(s.text(), "+68 123/456/789");
    assert_eq!(s.raw_text(), "+68123456789");
}

#[test]
fn test_delete() {
    let mut s = phone();
    s.set_raw_text("1234");
    assert_eq!(s.text(), "+68 123/4__/___");
    assert_eq!(s.cursor(), 9);

    assert_eq!(s.delete_prev_char(), TextOutcome::TextChanged);
    assert_eq!(s.text(), "+68 123/___/___");
    assert_eq!(s.cursor(), 8);

    // removes the separator in the host buffer, but the
    // last slot in the value.
    assert_eq!(s.delete_prev_char(), TextOutcome::TextChanged);
    assert_eq!(s.text(), "+68 12_/___/___");
    assert_eq!(s.cursor(), 6);

    s.delete_prev_char();
    s.delete_prev_char();
    assert_eq!(s.text(), "+68 ___/___/___");
    assert_eq!(s.cursor(), 4);

    // next one would hit the prefix
    assert_eq!(s.delete_prev_char(), TextOutcome::Unchanged);
    assert_eq!(s.raw_text(), "+68");
}

#[test]
fn test_prefix() {
    let mut s = phone();
    s.set_raw_text("12");

    assert_eq!(s.delete_range(1..2), TextOutcome::Unchanged);
    assert_eq!(s.text(), "+68 12_/___/___");
    assert_eq!(s.raw_text(), "+6812");

    assert_eq!(s.delete_range(0..4), TextOutcome::Unchanged);
    assert_eq!(s.delete_range(2..2), TextOutcome::Unchanged);
    assert_eq!(s.handle_edit(2..3, "9"), TextOutcome::Unchanged);
    assert_eq!(s.raw_text(), "+6812");
}

#[test]
fn test_paste() {
    let mut s = phone();
    assert_eq!(s.paste("111222333"), TextOutcome::TextChanged);
    assert_eq!(s.raw_text(), "+68111222333");
    assert_eq!(s.text(), "+68 111/222/333");
    assert_eq!(s.cursor(), 15);
    assert!(s.is_finished());
    assert_eq!(s.unmasked_with_allowed_characters(), "+68111/222/333");

    let mut s = phone().with_bulk_replace(KeepDigits);
    s.insert_char('5');
    s.paste("(111) 222-333");
    assert_eq!(s.raw_text(), "+68111222333");
    assert_eq!(s.text(), "+68 111/222/333");

    let mut s = phone().with_bulk_replace(StripChars::new(["-"]));
    s.paste("111-222");
    assert_eq!(s.raw_text(), "+68111222");
    assert_eq!(s.text(), "+68 111/222/___");
    assert_eq!(s.cursor(), 12);
}

#[test]
fn test_cursor_snaps_back() {
    let mut s = phone();
    s.set_raw_text("12");
    assert_eq!(s.cursor(), 6);

    assert!(!s.set_cursor(0));
    assert_eq!(s.cursor(), 6);
    assert!(!s.set_cursor(14));
    assert_eq!(s.cursor(), 6);

    // a host that moved its cursor anyway.
    s.handle_edit(14..15, "3");
    assert_eq!(s.cursor(), 8);
    assert_eq!(s.text(), "+68 123/___/___");
}

#[test]
fn test_focus_gained() {
    let mut s = phone();
    s.set_raw_text("111222333");
    assert_eq!(s.focus_gained(), TextOutcome::Changed);
    assert_eq!(s.text(), "+68 111/222/333");
    assert_eq!(s.cursor(), 15);
}

#[derive(Debug, Clone, Default)]
struct Observer {
    seen: Rc<RefCell<Vec<String>>>,
}

impl FieldDelegate for Observer {
    fn value_changed(&mut self, value: &MaskedValue) {
        self.seen
            .borrow_mut()
            .push(value.unmasked_with_allowed_characters());
    }
}

#[derive(Debug, Clone)]
struct Validator;

impl FieldDelegate for Validator {
    fn value_changed(&mut self, _value: &MaskedValue) {}

    fn claims_edit_authority(&self) -> bool {
        true
    }
}

#[test]
fn test_delegate() {
    let mut s = phone();
    let observer = Observer::default();
    let seen = observer.seen.clone();
    s.set_delegate(Some(observer)).expect("observer");
    assert!(s.delegate().is_some());

    s.insert_char('1');
    s.set_raw_text("111/222/333");
    // rejected edits don't notify.
    s.delete_range(0..1);
    assert_eq!(
        seen.borrow().as_slice(),
        &["+681//".to_string(), "+68111/222/333".to_string()]
    );

    s.set_prefix("+1");
    assert_eq!(seen.borrow().last().map(|v| v.as_str()), Some("+1//"));
}

#[test]
fn test_value_read_only() {
    let mut s = phone();
    s.set_raw_text("111222");
    assert_eq!(s.value().raw_text(), "+68111222");
    assert_eq!(s.value().text(), s.text());
    assert_eq!(s.value().cursor(), Some(s.cursor()));
    assert_eq!(s.value().prefix(), "+68");

    s.set_allowed_characters(["/", " "]);
    assert_eq!(s.value().allowed_characters(), &["/", " "]);
    assert_eq!(s.unmasked_with_allowed_characters(), "+68 111/222/");

    s.set_bulk_replace(Some(KeepDigits));
    assert!(s.value().bulk_replace().is_some());
    s.set_bulk_replace(None::<KeepDigits>);
    assert!(s.value().bulk_replace().is_none());
}

#[test]
fn test_edit_authority() {
    let mut s = phone();
    s.set_delegate(Some(Observer::default())).expect("observer");

    assert_eq!(
        s.set_delegate(Some(Validator)),
        Err(MaskError::EditAuthorityTaken)
    );
    // the observer is still there.
    assert!(s.delegate().is_some());

    s.set_delegate(None::<Observer>).expect("none");
    assert!(s.delegate().is_none());
}

#[test]
fn test_plain() {
    let mut s = MaskedFieldState::new();
    assert_eq!(s.text(), "");
    assert!(s.is_empty());

    s.insert_char('a');
    s.insert_char('b');
    assert_eq!(s.text(), "ab");
    assert_eq!(s.raw_text(), "ab");
    assert_eq!(s.cursor(), 2);

    assert!(s.set_cursor(1));
    s.insert_str("xyz");
    assert_eq!(s.text(), "axyzb");
    assert_eq!(s.cursor(), 4);

    s.delete_prev_char();
    assert_eq!(s.text(), "axyb");
    assert_eq!(s.cursor(), 3);

    assert!(s.set_cursor(10));
    assert_eq!(s.cursor(), 4);
}

#[test]
fn test_reconfigure() {
    let mut s = phone();
    s.set_raw_text("123");
    s.set_pattern("(___) ___-____", "_").expect("pattern");
    assert_eq!(s.text(), "+68(___) ___-____");
    assert_eq!(s.cursor(), 4);

    assert_eq!(s.set_pattern("___", ""), Err(MaskError::MissingPlaceholder));
    assert_eq!(s.text(), "+68(___) ___-____");

    s.set_pattern("", "").expect("no mask");
    assert_eq!(s.text(), "+68");
    s.insert_char('1');
    assert_eq!(s.text(), "+681");
}
