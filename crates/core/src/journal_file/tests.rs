use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::tempdir;

use super::*;
use crate::config::DungeonConfig;
use crate::types::{GridCoord, Vec2};

fn journal_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(name)
}

fn empty_journal(seed: u64) -> EventJournal {
    EventJournal::new(seed, &DungeonConfig::default())
}

#[test]
fn header_and_records_round_trip() {
    let dir = tempdir().unwrap();
    let path = journal_path(dir.path(), "roundtrip.jsonl");

    let mut journal = empty_journal(42);
    journal.append(0, WorldEvent::PlayerEnteredRoom { room: GridCoord::new(1, 0) });
    journal.append(0, WorldEvent::Tick { dt: 0.1 });
    journal.append(1, WorldEvent::PlayerMoved { to: Vec2::new(3.5, -1.0) });
    save_journal_to_file(&path, &journal).unwrap();

    let loaded = load_journal_from_file(&path).unwrap();
    assert_eq!(loaded.journal, journal);
    assert_eq!(loaded.next_seq, 3);
    assert_ne!(loaded.last_sha256_hex, GENESIS_HASH);
}

#[test]
fn edited_record_breaks_the_chain() {
    let dir = tempdir().unwrap();
    let path = journal_path(dir.path(), "tampered.jsonl");

    let mut writer = JournalWriter::create(&path, &empty_journal(1)).unwrap();
    writer.append(0, &WorldEvent::DamagePlayer { amount: 1 }).unwrap();
    writer.append(0, &WorldEvent::DamagePlayer { amount: 2 }).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let mut lines: Vec<String> = content.lines().map(String::from).collect();
    assert_eq!(lines.len(), 3);
    lines[2] = lines[2].replace("\"amount\":2", "\"amount\":9");
    fs::write(&path, lines.join("\n") + "\n").unwrap();

    let result = load_journal_from_file(&path);
    assert!(
        matches!(result, Err(JournalLoadError::HashChainBroken { line: 3 })),
        "expected hash chain broken at line 3, got: {result:?}"
    );
}

#[test]
fn deleted_record_is_detected() {
    let dir = tempdir().unwrap();
    let path = journal_path(dir.path(), "deleted.jsonl");

    let mut writer = JournalWriter::create(&path, &empty_journal(1)).unwrap();
    for tick in 0..3 {
        writer.append(tick, &WorldEvent::Tick { dt: 0.1 }).unwrap();
    }

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    fs::write(&path, format!("{}\n{}\n{}\n", lines[0], lines[1], lines[3])).unwrap();

    let result = load_journal_from_file(&path);
    assert!(
        matches!(
            result,
            Err(JournalLoadError::HashChainBroken { .. }) | Err(JournalLoadError::InvalidRecord { .. })
        ),
        "expected chain corruption error, got: {result:?}"
    );
}

#[test]
fn truncated_last_line_is_incomplete() {
    let dir = tempdir().unwrap();
    let path = journal_path(dir.path(), "truncated.jsonl");

    let mut writer = JournalWriter::create(&path, &empty_journal(1)).unwrap();
    writer.append(0, &WorldEvent::Tick { dt: 0.1 }).unwrap();
    drop(writer);

    let mut file = OpenOptions::new().append(true).open(&path).unwrap();
    write!(file, "{{\"seq\":1,\"tick").unwrap();

    let result = load_journal_from_file(&path);
    assert!(
        matches!(result, Err(JournalLoadError::IncompleteLine { line: 3 })),
        "expected incomplete line at line 3, got: {result:?}"
    );
}

#[test]
fn empty_file_is_rejected() {
    let dir = tempdir().unwrap();
    let path = journal_path(dir.path(), "empty.jsonl");
    fs::write(&path, "").unwrap();
    assert!(matches!(load_journal_from_file(&path), Err(JournalLoadError::EmptyFile)));
}

#[test]
fn header_only_file_loads_an_empty_journal() {
    let dir = tempdir().unwrap();
    let path = journal_path(dir.path(), "header_only.jsonl");
    let _writer = JournalWriter::create(&path, &empty_journal(555)).unwrap();

    let loaded = load_journal_from_file(&path).unwrap();
    assert_eq!(loaded.journal.seed, 555);
    assert!(loaded.journal.records.is_empty());
    assert_eq!(loaded.next_seq, 0);
    assert_eq!(loaded.last_sha256_hex, GENESIS_HASH);
}

#[test]
fn resumed_writer_continues_the_chain() {
    let dir = tempdir().unwrap();
    let path = journal_path(dir.path(), "resume.jsonl");

    let mut writer = JournalWriter::create(&path, &empty_journal(1)).unwrap();
    writer.append(0, &WorldEvent::Tick { dt: 0.1 }).unwrap();
    drop(writer);

    let loaded = load_journal_from_file(&path).unwrap();
    let mut writer = JournalWriter::resume(&path, loaded.last_sha256_hex, loaded.next_seq).unwrap();
    assert_eq!(writer.append(1, &WorldEvent::HealPlayer { amount: 1 }).unwrap(), 1);
    drop(writer);

    let reloaded = load_journal_from_file(&path).unwrap();
    assert_eq!(reloaded.journal.records.len(), 2);
    assert_eq!(reloaded.journal.records[1].seq, 1);
    assert_eq!(reloaded.next_seq, 2);
}

#[test]
fn invalid_header_is_rejected() {
    let dir = tempdir().unwrap();
    let path = journal_path(dir.path(), "bad_header.jsonl");
    fs::write(&path, "not valid json\n").unwrap();

    let result = load_journal_from_file(&path);
    assert!(
        matches!(result, Err(JournalLoadError::InvalidHeader { line: 1, .. })),
        "expected invalid header error, got: {result:?}"
    );
}
