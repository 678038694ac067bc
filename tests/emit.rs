use std::fs;
use std::path::PathBuf;
use std::process;

use vectool::emitter;
use vectool::vectors::TABLE_ROWS;

fn scratch_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("vectool-{}-{}.txt", tag, process::id()))
}

#[test]
fn emits_the_full_table() {
    let path = scratch_path("full");
    let written = emitter::emit(&path).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    // cleanup first; a failed assertion would skip it
    fs::remove_file(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(written, TABLE_ROWS);
    assert_eq!(lines.len(), TABLE_ROWS);
    assert_eq!(
        lines[0],
        "IDT.lock().interrupts[LEGACY_HARDWARE_INTERRUPTS_BASE + 0x1] = \
         prepare_no_irq_handler!(no_irq_fn, 0x21);"
    );
    assert_eq!(
        lines[TABLE_ROWS - 1],
        "IDT.lock().interrupts[LEGACY_HARDWARE_INTERRUPTS_BASE + 0xdf] = \
         prepare_no_irq_handler!(no_irq_fn, 0xff);"
    );
    assert!(text.ends_with('\n'));
}

#[test]
fn regenerating_is_byte_identical() {
    let path = scratch_path("idem");
    emitter::emit(&path).unwrap();
    let first = fs::read(&path).unwrap();
    emitter::emit(&path).unwrap();
    let second = fs::read(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn unwritable_artifact_is_fatal() {
    // parent directory does not exist, so creation must fail
    let path = std::env::temp_dir()
        .join(format!("vectool-absent-{}", process::id()))
        .join("entries.txt");
    let err = emitter::emit(&path).unwrap_err();
    assert!(err.to_string().contains("entries.txt"));
}
