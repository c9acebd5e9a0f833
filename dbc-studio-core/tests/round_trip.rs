// Write documents to disk, load them back and compare
use dbc_studio_core::{
    decode, serialize, write, ByteOrder, Document, EditorDefaults, Message, Signal, WriteError,
};
use std::fs;

fn signal(name: &str, start: u64, length: u64) -> Signal {
    Signal::new(name, start, length)
}

fn sample_document() -> Document {
    let mut speed = signal("Speed", 0, 16);
    speed.scale = 0.1;
    speed.minimum = Some(0.0);
    speed.maximum = Some(250.0);
    speed.unit = "km/h".to_string();
    speed.receivers = vec!["Cluster".to_string()];

    let mut accel = signal("Accel", 16, 12);
    accel.byte_order = ByteOrder::BigEndian;
    accel.is_signed = true;
    accel.scale = 0.00125;
    accel.offset = -2.5;
    accel.unit = "g".to_string();
    accel.receivers = vec!["Cluster".to_string(), "ABS".to_string()];
    // limits left unspecified

    let mut status = Message::new(0x123, "VehicleStatus", 8);
    status.senders = vec!["Gateway".to_string()];
    status.signals = vec![speed, accel];

    let mut wide = signal("Counter", 0, 64);
    wide.maximum = Some(1e-05);

    let mut extended = Message::new(0x1FFF_FFFF, "Diagnostics", 64);
    extended.signals = vec![wide];

    let mut doc = Document::with_version("1.0");
    doc.messages = vec![status, extended];
    doc
}

#[test]
fn round_trip_reproduces_messages_and_signals() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vehicle.dbc");
    let original = sample_document();

    write(&original, &path).unwrap();
    let loaded = decode(&path).unwrap();

    assert_eq!(loaded.path.as_deref(), Some(path.as_path()));
    assert_eq!(loaded.version.as_deref(), Some("1.0"));
    assert_eq!(loaded.message_names(), original.message_names());

    for (before, after) in original.messages.iter().zip(&loaded.messages) {
        assert_eq!(after.frame_id, before.frame_id);
        assert_eq!(after.length, before.length);
        assert_eq!(after.senders, before.senders);
        assert_eq!(after.signals.len(), before.signals.len());

        for (a, b) in before.signals.iter().zip(&after.signals) {
            assert_eq!(b.name, a.name);
            assert_eq!(b.start, a.start);
            assert_eq!(b.length, a.length);
            assert_eq!(b.byte_order, a.byte_order);
            assert_eq!(b.is_signed, a.is_signed);
            assert_eq!(b.scale, a.scale);
            assert_eq!(b.offset, a.offset);
            assert_eq!(b.unit, a.unit);
            assert_eq!(b.receivers, a.receivers);
        }
    }
}

#[test]
fn round_trip_turns_absent_limits_into_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("limits.dbc");
    let original = sample_document();

    let accel = &original.messages[0].signals[1];
    assert_eq!(accel.minimum, None);
    assert_eq!(accel.maximum, None);

    write(&original, &path).unwrap();
    let loaded = decode(&path).unwrap();

    // Present limits survive as they were
    let speed = &loaded.messages[0].signals[0];
    assert_eq!(speed.minimum, Some(0.0));
    assert_eq!(speed.maximum, Some(250.0));

    // Absent limits come back as a literal zero, not as absent
    let accel = &loaded.messages[0].signals[1];
    assert_eq!(accel.minimum, Some(0.0));
    assert_eq!(accel.maximum, Some(0.0));

    let counter = &loaded.messages[1].signals[0];
    assert_eq!(counter.minimum, Some(0.0));
    assert_eq!(counter.maximum, Some(1e-05));
}

#[test]
fn reserialized_text_is_identical() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stable.dbc");
    let original = sample_document();

    write(&original, &path).unwrap();
    let first = fs::read_to_string(&path).unwrap();

    let loaded = decode(&path).unwrap();
    assert_eq!(serialize(&loaded), first);
}

#[test]
fn written_file_has_expected_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.dbc");

    write(&sample_document(), &path).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();

    assert!(lines.contains(&"VERSION \"1.0\""));
    assert!(lines.contains(&"BU_: ABS Cluster Gateway"));
    assert!(lines.contains(&"BO_ 291 VehicleStatus: 8 Gateway"));
    assert!(lines.contains(&" SG_ Speed : 0|16@1+ (0.1,0) [0|250] \"km/h\" Cluster"));
    assert!(lines.contains(&" SG_ Accel : 16|12@0- (0.00125,-2.5) [0|0] \"g\" Cluster,ABS"));
    assert!(lines.contains(&"BO_ 536870911 Diagnostics: 64 Vector__XXX"));
    assert!(lines.contains(&" SG_ Counter : 0|64@1+ (1,0) [0|1e-05] \"\" Vector__XXX"));

    assert!(content.ends_with("Vector__XXX\n"));
    assert!(!content.starts_with('\u{feff}'));
}

#[test]
fn write_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("existing.dbc");
    fs::write(&path, "old content that is much longer than a version line\n".repeat(100)).unwrap();

    write(&Document::with_version("2"), &path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("VERSION \"2\"\n"));
    assert!(!content.contains("old content"));
}

#[cfg(unix)]
#[test]
fn write_keeps_permissions_of_existing_file() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    for mode in [0o644, 0o640, 0o664] {
        let path = dir.path().join(format!("mode_{:o}.dbc", mode));
        fs::write(&path, "VERSION \"old\"\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();

        write(&sample_document(), &path).unwrap();

        let written = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(written, mode, "mode of {:?}", path);
    }
}

#[cfg(unix)]
#[test]
fn write_new_file_gets_default_mode() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let reference = dir.path().join("reference.txt");
    fs::write(&reference, "x").unwrap();
    let path = dir.path().join("fresh.dbc");

    write(&sample_document(), &path).unwrap();

    let mode_of = |p: &std::path::Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode_of(&path), mode_of(&reference));
}

#[test]
fn write_to_missing_directory_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("out.dbc");

    let err = write(&sample_document(), &path).unwrap_err();
    assert!(matches!(err, WriteError::Io { .. }));
    assert!(!path.exists());
}

#[test]
fn edited_document_survives_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("edited.dbc");
    let defaults = EditorDefaults::new();

    let mut doc = Document::new();
    let message = doc.add_message(&defaults);
    message.senders.push("Body".to_string());
    let signal = message.add_signal(&defaults);
    signal.receivers.push("Dash".to_string());
    doc.add_message(&defaults);

    write(&doc, &path).unwrap();
    let loaded = decode(&path).unwrap();

    assert_eq!(loaded.version.as_deref(), Some(""));
    assert_eq!(loaded.message_names(), vec!["NewMessage", "NewMessage1"]);
    assert_eq!(loaded.messages[0].frame_id, 0x100);
    assert_eq!(loaded.messages[1].frame_id, 0x101);
    assert_eq!(loaded.messages[0].signals[0].name, "Signal1");
    assert_eq!(loaded.messages[0].signals[0].maximum, Some(255.0));
    assert!(loaded.messages[1].senders.is_empty());
}

#[test]
fn sentinel_among_receivers_survives_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("receivers.dbc");

    let mut gear = signal("Gear", 0, 4);
    gear.receivers = vec!["Dash".to_string(), "Vector__XXX".to_string()];
    let mut message = Message::new(0x10, "Trans", 1);
    message.signals.push(gear);
    let mut doc = Document::with_version("1");
    doc.messages.push(message);

    write(&doc, &path).unwrap();
    let loaded = decode(&path).unwrap();

    assert_eq!(
        loaded.messages[0].signals[0].receivers,
        vec!["Dash".to_string(), "Vector__XXX".to_string()]
    );
}
