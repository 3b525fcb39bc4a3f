//! End-to-end audit runs over on-disk fixtures.

mod common;

use txaudit_core::{encode_fingerprint, run_audit, AuditError, AuditPaths, RowOutcome};

#[test]
fn test_two_rows_one_verified_one_tampered() {
    let dir = tempfile::tempdir().unwrap();
    let (manifest, logs_dir, image) = common::fixture_layout(dir.path());

    common::write_key_image(&image, "GlaDOS");

    let mut plaintext = br#"{"amount": 10.5, "note":"x"}"#.to_vec();
    plaintext.extend_from_slice(&[0xDE, 0xAD, 0x00]); // trailing garbage
    common::write_encrypted_log(&logs_dir, "T1", &plaintext, b"GlaDOS");

    common::write_manifest(
        &manifest,
        &[("T1", &encode_fingerprint("T1")), ("T2", "not-the-hash")],
    );

    let summary = run_audit(&AuditPaths::new(&manifest, &logs_dir, &image)).unwrap();

    assert_eq!(summary.total, 10.5);
    assert_eq!(summary.formatted_total(), "10.5");
    assert_eq!(summary.rows.len(), 2);
    assert_eq!(summary.rows[0].transaction_id, "T1");
    assert_eq!(
        summary.rows[0].outcome,
        RowOutcome::Credited { amount: 10.5 }
    );
    // The tampered row is filtered silently: no log file was ever
    // opened for it (none exists, and no ReadFailed is reported).
    assert_eq!(summary.rows[1].outcome, RowOutcome::SkippedUnverified);
}

#[test]
fn test_missing_log_file_reported_once_run_continues() {
    let dir = tempfile::tempdir().unwrap();
    let (manifest, logs_dir, image) = common::fixture_layout(dir.path());

    common::write_key_image(&image, "GlaDOS");
    common::write_encrypted_log(&logs_dir, "T2", br#"{"amount": 4.25}"#, b"GlaDOS");
    common::write_manifest(
        &manifest,
        &[
            ("T1", &encode_fingerprint("T1")), // verified, but no file on disk
            ("T2", &encode_fingerprint("T2")),
        ],
    );

    let summary = run_audit(&AuditPaths::new(&manifest, &logs_dir, &image)).unwrap();

    let failures: Vec<_> = summary
        .rows
        .iter()
        .filter_map(|r| match &r.outcome {
            RowOutcome::ReadFailed { path, .. } => Some(path.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(failures, vec![logs_dir.join("T1.dat")]);

    // The failed row contributed zero; the rest of the run was not aborted.
    assert_eq!(summary.total, 4.25);
}

#[test]
fn test_all_rows_failing_totals_zero() {
    let dir = tempfile::tempdir().unwrap();
    let (manifest, logs_dir, image) = common::fixture_layout(dir.path());

    common::write_key_image(&image, "GlaDOS");
    common::write_manifest(&manifest, &[("T1", &encode_fingerprint("T1"))]);

    let summary = run_audit(&AuditPaths::new(&manifest, &logs_dir, &image)).unwrap();
    assert_eq!(summary.total, 0.0);
    assert_eq!(summary.formatted_total(), "0.0");
}

#[test]
fn test_missing_key_is_fatal_before_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let (_, logs_dir, image) = common::fixture_layout(dir.path());

    // Software field present but no key marker.
    common::write_image_with_software(&image, "Adobe ImageReady");

    // The manifest path does not exist: if the driver touched it before
    // key recovery, the error would be a manifest error instead.
    let missing_manifest = dir.path().join("nope.csv");
    let result = run_audit(&AuditPaths::new(&missing_manifest, &logs_dir, &image));
    assert!(matches!(result, Err(AuditError::KeyNotFound)));
}

#[test]
fn test_undecryptable_payload_counts_zero() {
    let dir = tempfile::tempdir().unwrap();
    let (manifest, logs_dir, image) = common::fixture_layout(dir.path());

    common::write_key_image(&image, "GlaDOS");
    // Encrypted under a different key: decrypts to garbage.
    common::write_encrypted_log(&logs_dir, "T1", br#"{"amount": 99.0}"#, b"wrong-key");
    common::write_manifest(&manifest, &[("T1", &encode_fingerprint("T1"))]);

    let summary = run_audit(&AuditPaths::new(&manifest, &logs_dir, &image)).unwrap();
    assert_eq!(summary.rows[0].outcome, RowOutcome::NoPayload);
    assert_eq!(summary.total, 0.0);
}

#[test]
fn test_payload_without_amount_credits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let (manifest, logs_dir, image) = common::fixture_layout(dir.path());

    common::write_key_image(&image, "k");
    common::write_encrypted_log(&logs_dir, "T1", br#"{"note": "no amount here"}"#, b"k");
    common::write_manifest(&manifest, &[("T1", &encode_fingerprint("T1"))]);

    let summary = run_audit(&AuditPaths::new(&manifest, &logs_dir, &image)).unwrap();
    assert_eq!(summary.rows[0].outcome, RowOutcome::Credited { amount: 0.0 });
    assert_eq!(summary.formatted_total(), "0.0");
}

#[test]
fn test_totals_accumulate_across_rows() {
    let dir = tempfile::tempdir().unwrap();
    let (manifest, logs_dir, image) = common::fixture_layout(dir.path());

    common::write_key_image(&image, "GlaDOS");
    common::write_encrypted_log(&logs_dir, "T1", br#"{"amount": 10.5}"#, b"GlaDOS");
    common::write_encrypted_log(&logs_dir, "T2", br#"{"amount": 2}"#, b"GlaDOS");
    common::write_manifest(
        &manifest,
        &[
            ("T1", &encode_fingerprint("T1")),
            ("T2", &encode_fingerprint("T2")),
            ("T3", "tampered"),
        ],
    );

    let summary = run_audit(&AuditPaths::new(&manifest, &logs_dir, &image)).unwrap();
    assert_eq!(summary.total, 12.5);
    assert_eq!(summary.formatted_total(), "12.5");
}
