use crossterm::{
    ExecutableCommand,
    event::{DisableMouseCapture, EnableMouseCapture},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    tty::IsTty,
};
use std::io::{self, stdout};

/// Minimum terminal size that fits the bar and the open dropdown
pub const MIN_COLUMNS: u16 = super::render::BAR_WIDTH;
pub const MIN_ROWS: u16 = 3 + super::render::DROPDOWN_HEIGHT;

pub fn test_terminal_setup() -> io::Result<()> {
    println!("Testing terminal capabilities...");

    // Check if we're in a TTY
    if IsTty::is_tty(&stdout()) {
        println!("✓ Running in a TTY");
    } else {
        println!("✗ Not running in a TTY");
        return Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "Terminal interface requires a TTY",
        ));
    }

    let (columns, rows) = terminal::size()?;
    if columns >= MIN_COLUMNS && rows >= MIN_ROWS {
        println!("✓ Terminal size {}x{}", columns, rows);
    } else {
        println!(
            "✗ Terminal size {}x{}, the date picker needs at least {}x{}",
            columns, rows, MIN_COLUMNS, MIN_ROWS
        );
    }

    print!("Testing raw mode... ");
    enable_raw_mode()?;
    println!("✓ Raw mode enabled");

    print!("Testing alternate screen... ");
    stdout().execute(EnterAlternateScreen)?;
    println!("✓ Alternate screen enabled");

    print!("Testing mouse capture... ");
    stdout().execute(EnableMouseCapture)?;
    stdout().execute(DisableMouseCapture)?;
    println!("✓ Mouse capture toggled");

    // Clean up
    stdout().execute(LeaveAlternateScreen)?;
    disable_raw_mode()?;
    println!("✓ Terminal restored");

    println!("All terminal tests passed!");
    Ok(())
}
