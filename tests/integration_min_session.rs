// Drives the compiled binary through a PTY to exercise the real event loop
// and crossterm input handling.
//
// Requires a TTY (expectrl allocates one). Unix-only and ignored by default.
// Run manually via: `cargo test --test integration_min_session -- --ignored`.

#![cfg(unix)]

use std::time::Duration;

use expectrl::{spawn, Eof};

#[test]
#[ignore]
fn minimal_session_opens_menu_and_exits() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let bin = assert_cmd::cargo::cargo_bin("keytrainer");
    let cmd = format!(
        "{} --countdown 0 --history {}",
        bin.display(),
        dir.path().join("attempts.csv").display()
    );

    let mut p = spawn(cmd)?;

    // let the app enter the alternate screen
    std::thread::sleep(Duration::from_millis(200));

    // start the 15 second attempt, type a little, pause, then leave
    p.send("\r")?;
    std::thread::sleep(Duration::from_millis(100));
    p.send("abc")?;
    p.send("\x1b")?; // pause
    std::thread::sleep(Duration::from_millis(100));
    p.send("\x1b")?; // pause -> menu
    std::thread::sleep(Duration::from_millis(100));
    p.send("\x1b")?; // menu -> quit

    p.expect(Eof)?;
    Ok(())
}
